use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use std::process::Command;
use tempfile::tempdir;

fn write_file(path: &PathBuf, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

#[test]
fn doctor_reads_provided_config_path() {
    let tmp = tempdir().unwrap();
    let vault = tmp.path().join("vault");
    write_file(&vault.join("a.md"), "#one");
    write_file(&vault.join("sub/b.md"), "#two");

    let cfg = tmp.path().join("config.toml");
    let toml = format!(
        r#"
version = 1
profile = "default"

[profiles.default]
vault_root = "{}"
"#,
        vault.display()
    );
    write_file(&cfg, &toml);

    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("nvault"));
    cmd.args(["doctor", "--config", cfg.to_str().unwrap()]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("OK   nvault doctor"))
        .stdout(predicate::str::contains("profile: default"))
        .stdout(predicate::str::contains("notes: 2"))
        .stdout(predicate::str::contains("logging.level: info"));
}

#[test]
fn doctor_uses_xdg_default_when_present() {
    let tmp = tempdir().unwrap();
    let vault = tmp.path().join("vault");
    fs::create_dir_all(&vault).unwrap();

    let cfg_path = tmp.path().join("notevault").join("config.toml");
    write_file(
        &cfg_path,
        &format!(
            r#"
version = 1
profile = "work"
[profiles.work]
vault_root = "{}"
"#,
            vault.display()
        ),
    );

    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("nvault"));
    cmd.env("XDG_CONFIG_HOME", tmp.path());
    cmd.arg("doctor");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("OK   nvault doctor"))
        .stdout(predicate::str::contains("profile: work"))
        .stdout(predicate::str::contains("notes: 0"));
}

#[test]
fn doctor_accepts_vault_flag_without_config() {
    let tmp = tempdir().unwrap();
    let vault = tmp.path().join("vault");
    write_file(&vault.join("only.md"), "hello");

    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("nvault"));
    cmd.env("XDG_CONFIG_HOME", tmp.path().join("empty"));
    cmd.arg("--vault").arg(&vault).arg("doctor");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("path: (none)"))
        .stdout(predicate::str::contains("notes: 1"));
}
