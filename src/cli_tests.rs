use std::path::PathBuf;

use super::*;

#[test]
fn cli_generate_defaults() {
    let cli = Cli::parse_from(["dispatcher-cfg", "generate"]);
    match cli.command {
        Commands::Generate(args) => {
            assert_eq!(args.config, None);
            assert_eq!(args.out_dir, PathBuf::from("out"));
            assert!(!args.stdout);
            assert!(args.farm.is_empty());
        }
        _ => panic!("Expected Generate command"),
    }
}

#[test]
fn cli_generate_with_config() {
    let cli = Cli::parse_from(["dispatcher-cfg", "generate", "--config", "custom.toml"]);
    match cli.command {
        Commands::Generate(args) => {
            assert_eq!(args.config, Some(PathBuf::from("custom.toml")));
        }
        _ => panic!("Expected Generate command"),
    }
}

#[test]
fn cli_generate_with_out_dir_and_stdout() {
    let cli = Cli::parse_from(["dispatcher-cfg", "generate", "-o", "rendered", "--stdout"]);
    match cli.command {
        Commands::Generate(args) => {
            assert_eq!(args.out_dir, PathBuf::from("rendered"));
            assert!(args.stdout);
        }
        _ => panic!("Expected Generate command"),
    }
}

#[test]
fn cli_generate_with_farm_selection() {
    let cli = Cli::parse_from([
        "dispatcher-cfg",
        "generate",
        "--farm",
        "publish",
        "--farm",
        "author",
    ]);
    match cli.command {
        Commands::Generate(args) => {
            assert_eq!(args.farm, vec!["publish", "author"]);
        }
        _ => panic!("Expected Generate command"),
    }
}

#[test]
fn cli_validate_with_format() {
    let cli = Cli::parse_from(["dispatcher-cfg", "validate", "--format", "json"]);
    match cli.command {
        Commands::Validate(args) => {
            assert_eq!(args.format, crate::output::OutputFormat::Json);
        }
        _ => panic!("Expected Validate command"),
    }
}

#[test]
fn cli_validate_defaults_to_text() {
    let cli = Cli::parse_from(["dispatcher-cfg", "validate"]);
    match cli.command {
        Commands::Validate(args) => {
            assert_eq!(args.format, crate::output::OutputFormat::Text);
            assert_eq!(args.config, None);
        }
        _ => panic!("Expected Validate command"),
    }
}

#[test]
fn cli_init_defaults() {
    let cli = Cli::parse_from(["dispatcher-cfg", "init"]);
    match cli.command {
        Commands::Init(args) => {
            assert_eq!(args.output, None);
            assert!(!args.force);
        }
        _ => panic!("Expected Init command"),
    }
}

#[test]
fn cli_init_with_force_and_output() {
    let cli = Cli::parse_from(["dispatcher-cfg", "init", "--force", "--output", "cfg.toml"]);
    match cli.command {
        Commands::Init(args) => {
            assert_eq!(args.output, Some(PathBuf::from("cfg.toml")));
            assert!(args.force);
        }
        _ => panic!("Expected Init command"),
    }
}

#[test]
fn cli_global_flags() {
    let cli = Cli::parse_from(["dispatcher-cfg", "-v", "--color", "never", "validate"]);
    assert_eq!(cli.verbose, 1);
    assert!(matches!(cli.color, ColorChoice::Never));
}
