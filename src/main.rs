use std::path::Path;

use clap::Parser;

use dispatcher_cfg::cli::{Cli, ColorChoice, Commands, GenerateArgs, InitArgs, ValidateArgs};
use dispatcher_cfg::config::{CONFIG_FILE_NAME, Config, ConfigLoader, FileConfigLoader};
use dispatcher_cfg::output::{
    ColorMode, JsonFormatter, OutputFormat, OutputFormatter, TextFormatter, ValidationReport,
    plan_files, write_files,
};
use dispatcher_cfg::{
    DispatcherCfgError, EXIT_CONFIG_ERROR, EXIT_SUCCESS, EXIT_VALIDATION_FAILED,
};

const fn color_choice_to_mode(choice: ColorChoice) -> ColorMode {
    match choice {
        ColorChoice::Auto => ColorMode::Auto,
        ColorChoice::Always => ColorMode::Always,
        ColorChoice::Never => ColorMode::Never,
    }
}

fn main() {
    let cli = Cli::parse();

    let exit_code = match &cli.command {
        Commands::Generate(args) => run_generate(args, &cli),
        Commands::Validate(args) => run_validate(args, &cli),
        Commands::Init(args) => run_init(args),
    };

    std::process::exit(exit_code);
}

/// Invalid input documents exit 1; everything else (unreadable files, write
/// failures) exits 2.
const fn error_exit_code(error: &DispatcherCfgError) -> i32 {
    match error {
        DispatcherCfgError::Config(_)
        | DispatcherCfgError::TomlParse(_)
        | DispatcherCfgError::UnknownFarm(_) => EXIT_VALIDATION_FAILED,
        _ => EXIT_CONFIG_ERROR,
    }
}

fn load_config(path: Option<&Path>) -> dispatcher_cfg::Result<Config> {
    let loader = FileConfigLoader::new();
    match path {
        Some(path) => loader.load_from_path(path),
        None => loader.load(),
    }
}

fn run_generate(args: &GenerateArgs, cli: &Cli) -> i32 {
    match run_generate_impl(args, cli) {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            error_exit_code(&e)
        }
    }
}

fn run_generate_impl(args: &GenerateArgs, cli: &Cli) -> dispatcher_cfg::Result<()> {
    let mut config = load_config(args.config.as_deref())?;

    if !args.farm.is_empty() {
        for name in &args.farm {
            if !config.farms.contains_key(name) {
                return Err(DispatcherCfgError::UnknownFarm(name.clone()));
            }
        }
        config.farms.retain(|name, _| args.farm.contains(name));
    }

    let files = plan_files(&config);

    if args.stdout {
        for file in &files {
            println!("# {}", file.name);
            print!("{}", file.content);
        }
        return Ok(());
    }

    write_files(&args.out_dir, &files)?;
    if !cli.quiet {
        for file in &files {
            if cli.verbose > 0 {
                println!(
                    "wrote {} ({} lines)",
                    args.out_dir.join(&file.name).display(),
                    file.content.lines().count()
                );
            }
        }
        println!(
            "Generated {} file(s) in {}",
            files.len(),
            args.out_dir.display()
        );
    }
    Ok(())
}

fn run_validate(args: &ValidateArgs, cli: &Cli) -> i32 {
    match run_validate_impl(args, cli) {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            error_exit_code(&e)
        }
    }
}

fn run_validate_impl(args: &ValidateArgs, cli: &Cli) -> dispatcher_cfg::Result<()> {
    let config = load_config(args.config.as_deref())?;
    let report = ValidationReport::from_config(&config);
    let output = match args.format {
        OutputFormat::Text => TextFormatter::new(color_choice_to_mode(cli.color)).format(&report),
        OutputFormat::Json => JsonFormatter.format(&report),
    }?;
    if !cli.quiet {
        print!("{output}");
    }
    Ok(())
}

fn run_init(args: &InitArgs) -> i32 {
    match run_init_impl(args) {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            EXIT_CONFIG_ERROR
        }
    }
}

fn run_init_impl(args: &InitArgs) -> dispatcher_cfg::Result<()> {
    let output_path = args
        .output
        .clone()
        .unwrap_or_else(|| Path::new(CONFIG_FILE_NAME).to_path_buf());

    if output_path.exists() && !args.force {
        return Err(DispatcherCfgError::Config(format!(
            "Configuration file already exists: {}. Use --force to overwrite.",
            output_path.display()
        )));
    }

    std::fs::write(&output_path, config_template()).map_err(|e| {
        DispatcherCfgError::FileWrite {
            path: output_path.clone(),
            source: e,
        }
    })?;

    println!("Created configuration file: {}", output_path.display());
    Ok(())
}

fn config_template() -> &'static str {
    r#"# dispatcher-cfg farm definitions
# Run `dispatcher-cfg generate` to render the .any files.

[module]
# Directory where dispatcher.farms.any is deployed on the web server host
farms_path = "/etc/httpd/conf.modules.d"
log_file = "/var/log/httpd/dispatcher.log"
# One of: trace, debug, info, warn, error
log_level = "warn"
decline_root = true
use_processed_url = true
# "0", "1", or status ranges like "400-411,413-417,500"
pass_error = "0"

[farms.publish]
priority = 0
virtualhosts = ["*"]
renderers = [{ hostname = "localhost", port = 4503 }]
# Appends hardened deny filters and a deny-all allowed client
secure = true

# Rule lists keep their input order; ranks only express your own intent.
[[farms.publish.filters]]
rank = 1
allow = true
path = { pattern = "/content/*" }
extension = { regex = true, pattern = "(css|eot|gif|ico|jpeg|jpg|js|pdf|png|svg|swf|ttf|woff|woff2|html)" }

[farms.publish.cache]
docroot = "/var/www/html"
rules = [{ rank = 1, glob = "*.html", allow = true }]
allowed_clients = [{ rank = 1, glob = "127.0.0.1", allow = true }]

# [farms.publish.sessionmanagement]
# directory = "/var/cache/dispatcher/sessions"
# encode = "sha1"

# [farms.publish.vanity_urls]
# file = "/tmp/vanity_urls"
# delay = 300
"#
}
