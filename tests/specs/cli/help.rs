//! Help output specs

use crate::prelude::*;
use predicates::prelude::*;

#[test]
fn help_lists_flags() {
    let temp = Project::empty();

    temp.ferry()
        .args(&["--help"])
        .passes()
        .stdout_has("--output")
        .stdout_has("--seed")
        .stdout_has("--check")
        .stdout_has("--summary");
}

#[test]
fn version_prints_package_version() {
    let temp = Project::empty();

    temp.ferry()
        .args(&["--version"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("ferry ").and(predicate::str::contains(".")));
}
