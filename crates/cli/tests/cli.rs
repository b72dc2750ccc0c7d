use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;
use testing::fixtures::{copy_fixture, fixture_path, write_model};
use testing::symbols::{ModelBuilder, TypeBuilder, patch};

fn harmonize() -> Command {
    let mut cmd = Command::cargo_bin("harmonize").expect("cargo bin harmonize");
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn ambiguous_target_fails_with_fixes_listed() {
    harmonize()
        .arg("analyze")
        .arg(fixture_path("ambiguous_overloads.json"))
        .assert()
        .code(1)
        .stdout(predicate::str::contains(
            "Mod/FooPatch.cs:7:9: error[HARMONIZE001]",
        ))
        .stdout(predicate::str::contains("fix: Target 'Player.Foo()'"))
        .stdout(predicate::str::contains("1 errors"));
}

#[test]
fn patch_of_missing_member_is_an_error() {
    let temp_dir = TempDir::new().unwrap();
    let model = ModelBuilder::new()
        .with_type(TypeBuilder::new("Game.Player").method("Jump", |m| m))
        .with_type(
            TypeBuilder::new("Mod.FlyPatch")
                .attribute(patch().target_type("Game.Player").name("Fly").build())
                .method("Prefix", |m| m.static_method()),
        )
        .declare_all()
        .build();
    let dump = write_model(temp_dir.path(), "model.json", &model);

    harmonize()
        .arg("analyze")
        .arg(&dump)
        .assert()
        .code(1)
        .stdout(predicate::str::contains(
            "Mod/FlyPatch.cs:4:5: error[HARMONIZE001]: A single unambiguous target could not be resolved for 'Prefix'",
        ))
        .stdout(predicate::str::contains("2 declarations analyzed: 1 errors"));
}

#[test]
fn clean_model_succeeds() {
    harmonize()
        .args(["analyze", "--threads", "2"])
        .arg(fixture_path("clean_patch.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "3 declarations analyzed: 0 errors, 0 warnings, 0 infos",
        ));
}

#[test]
fn warnings_alone_do_not_fail() {
    harmonize()
        .arg("analyze")
        .arg(fixture_path("mixed_findings.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("warning[HARMONIZE003]"))
        .stdout(predicate::str::contains("warning[HARMONIZE002]"))
        .stdout(predicate::str::contains("warning[HARMONIZE004]"));
}

#[test]
fn json_report_is_machine_readable() {
    let output = harmonize()
        .args(["analyze", "--format", "json"])
        .arg(fixture_path("mixed_findings.json"))
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let rules: Vec<&str> = report["diagnostics"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["rule"].as_str().unwrap())
        .collect();
    assert_eq!(rules, vec!["HARMONIZE003", "HARMONIZE002", "HARMONIZE004"]);
    assert_eq!(report["declarations_analyzed"], 2);
}

#[test]
fn configuration_beside_the_model_is_picked_up() {
    let temp_dir = TempDir::new().unwrap();
    let model = copy_fixture(temp_dir.path(), "ambiguous_overloads.json");
    fs::write(
        temp_dir.path().join("harmonize.toml"),
        "[rules]\nHARMONIZE001 = \"warning\"\n",
    )
    .unwrap();

    harmonize()
        .arg("analyze")
        .arg(&model)
        .assert()
        .success()
        .stdout(predicate::str::contains("warning[HARMONIZE001]"));
}

#[test]
fn unknown_rule_in_configuration_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let config = temp_dir.path().join("custom.toml");
    fs::write(&config, "[rules]\nHARMONIZE404 = \"off\"\n").unwrap();

    harmonize()
        .arg("analyze")
        .arg(fixture_path("clean_patch.json"))
        .arg("--config")
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown rule id in [rules]: HARMONIZE404"));
}

#[test]
fn missing_model_is_reported() {
    harmonize()
        .args(["analyze", "does-not-exist.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load symbol model"));
}

#[test]
fn log_file_receives_the_logs() {
    let temp_dir = TempDir::new().unwrap();
    let log_file = temp_dir.path().join("logs").join("harmonize.log");

    harmonize()
        .arg("analyze")
        .arg(fixture_path("clean_patch.json"))
        .arg("--log-file")
        .arg(&log_file)
        .assert()
        .success()
        .stderr(predicate::str::is_empty());

    let logs = fs::read_to_string(&log_file).unwrap();
    assert!(logs.contains("Analysis finished"));
}

#[test]
fn resolve_prints_the_target() {
    harmonize()
        .args(["resolve"])
        .arg(fixture_path("clean_patch.json"))
        .arg("M:Mod.JumpPatch.OnHealth")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Postfix patch of Game.Player: M:Game.Player.get_Health",
        ));
}

#[test]
fn resolve_json_reports_ambiguous_targets() {
    let output = harmonize()
        .args(["resolve", "--format", "json"])
        .arg(fixture_path("ambiguous_overloads.json"))
        .arg("M:Mod.FooPatch.Prefix")
        .output()
        .unwrap();
    assert!(output.status.success());

    let resolution: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(resolution["outcome"], "resolved");
    assert_eq!(resolution["target_method"].as_array().unwrap().len(), 2);
}

#[test]
fn rules_lists_every_rule() {
    harmonize()
        .arg("rules")
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"HARMONIZE001\s+error").unwrap())
        .stdout(predicate::str::is_match(r"HARMONIZE004\s+warning").unwrap())
        .stdout(predicate::str::contains("Harmonize.Targeting"));
}
