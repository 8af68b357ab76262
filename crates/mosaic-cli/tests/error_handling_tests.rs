//! Exit codes and error rendering.

use assert_cmd::Command;
use predicates::prelude::*;

fn mosaic() -> Command {
    Command::cargo_bin("mosaic").unwrap()
}

#[test]
fn no_arguments_prints_help_and_exits_2() {
    let dir = tempfile::tempdir().unwrap();
    mosaic()
        .current_dir(dir.path())
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn invalid_project_name_is_a_user_error_with_suggestions() {
    let dir = tempfile::tempdir().unwrap();
    mosaic()
        .current_dir(dir.path())
        .args(["generate", "lib", "1bad"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("must start with a letter"))
        .stderr(predicate::str::contains("Suggestions"));
}

#[test]
fn publishable_without_import_path_fails_cleanly() {
    let dir = tempfile::tempdir().unwrap();
    mosaic()
        .current_dir(dir.path())
        .args(["generate", "lib", "billing", "--publishable"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("importPath"));

    // Validation fired before mutation: nothing was written.
    assert!(!dir.path().join("libs").exists());
}

#[test]
fn unknown_flag_is_rejected_by_clap() {
    let dir = tempfile::tempdir().unwrap();
    mosaic()
        .current_dir(dir.path())
        .args(["generate", "lib", "x", "--no-such-flag"])
        .assert()
        .code(2);
}

#[test]
fn missing_explicit_config_file_exits_4() {
    let dir = tempfile::tempdir().unwrap();
    mosaic()
        .current_dir(dir.path())
        .args(["--config", "/definitely/not/here.toml", "list"])
        .assert()
        .code(4);
}

#[test]
fn completions_render_for_bash() {
    mosaic()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("mosaic"));
}
