mod common;

use common::{MINIMAL_CONFIG, TestFixture};
use predicates::prelude::*;

#[test]
fn validate_reports_each_farm() {
    let fixture = TestFixture::new();
    fixture.create_config(MINIMAL_CONFIG);

    dispatcher_cfg!()
        .current_dir(fixture.path())
        .args(["--color", "never", "validate"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "✓ publish -> dispatcher.00-publish.inc.any",
        ))
        .stdout(predicate::str::contains("1 farm(s) valid"));
}

#[test]
fn validate_text_lists_traits() {
    let fixture = TestFixture::new();
    fixture.create_config(
        r#"
        [farms.site]
        secure = true
        renderers = [
            { hostname = "render1", port = 4503 },
            { hostname = "render2", port = 4503 },
        ]
        "#,
    );

    dispatcher_cfg!()
        .current_dir(fixture.path())
        .args(["--color", "never", "validate"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "[2 renderer(s), 1 filter(s), secure]",
        ));
}

#[test]
fn validate_json_output() {
    let fixture = TestFixture::new();
    fixture.create_config(MINIMAL_CONFIG);

    let output = dispatcher_cfg!()
        .current_dir(fixture.path())
        .args(["validate", "--format", "json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(json["summary"]["total_farms"], 1);
    assert_eq!(json["farms"][0]["name"], "publish");
    assert_eq!(json["farms"][0]["file_name"], "dispatcher.00-publish.inc.any");
    assert_eq!(json["farms"][0]["cache"], true);
}

#[test]
fn validate_invalid_config_exits_one() {
    let fixture = TestFixture::new();
    fixture.create_config(
        r#"
        [farms.publish.cache]
        docroot = "relative/path"
        rules = [{ rank = 1, glob = "*", allow = true }]
        allowed_clients = [{ rank = 1, glob = "*", allow = true }]
        "#,
    );

    dispatcher_cfg!()
        .current_dir(fixture.path())
        .arg("validate")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("docroot"));
}

#[test]
fn validate_malformed_toml_exits_one() {
    let fixture = TestFixture::new();
    fixture.create_config("[farms.publish\n");

    dispatcher_cfg!()
        .current_dir(fixture.path())
        .arg("validate")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("TOML parse error"));
}

#[test]
fn validate_unknown_field_exits_one() {
    let fixture = TestFixture::new();
    fixture.create_config(
        r#"
        [farms.publish]
        docroot = "/var/www/html"
        "#,
    );

    dispatcher_cfg!()
        .current_dir(fixture.path())
        .arg("validate")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("unknown field"));
}

#[test]
fn validate_missing_explicit_config_exits_two() {
    let fixture = TestFixture::new();

    dispatcher_cfg!()
        .current_dir(fixture.path())
        .args(["validate", "--config", "nope.toml"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Failed to read file"));
}

#[test]
fn validate_quiet_only_sets_exit_code() {
    let fixture = TestFixture::new();
    fixture.create_config(MINIMAL_CONFIG);

    dispatcher_cfg!()
        .current_dir(fixture.path())
        .args(["--quiet", "validate"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}
