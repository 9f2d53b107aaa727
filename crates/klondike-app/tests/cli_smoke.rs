use assert_cmd::Command;
use predicates::prelude::*;

fn mdklondike() -> Command {
    Command::cargo_bin("mdklondike").expect("binary builds")
}

#[test]
fn help_lists_the_flags() {
    mdklondike()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--games"))
        .stdout(predicate::str::contains("--export-snapshot"));
}

#[test]
fn version_names_the_binary() {
    mdklondike()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("mdklondike"));
}

#[test]
fn unknown_commands_exit_nonzero() {
    mdklondike()
        .arg("--bogus")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown command"));
}

#[test]
fn importing_a_missing_snapshot_fails() {
    mdklondike()
        .args(["--import-snapshot", "no-such-dir/missing.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Snapshot not found"));
}

#[test]
fn quiet_batches_print_a_summary() {
    mdklondike()
        .args(["--games", "2", "--seed", "3", "--quiet", "--max-steps", "200"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"games\": 2"));
}

#[test]
fn snapshots_export_and_import() {
    let path = std::env::temp_dir().join(format!("mdklondike-smoke-{}.json", std::process::id()));

    mdklondike()
        .args(["--export-snapshot", path.to_str().expect("utf-8 temp path")])
        .args(["--seed", "4"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Snapshot saved"));

    mdklondike()
        .args(["--import-snapshot", path.to_str().expect("utf-8 temp path")])
        .args(["--quiet", "--max-steps", "200"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Outcome:"));

    let _ = std::fs::remove_file(&path);
}
