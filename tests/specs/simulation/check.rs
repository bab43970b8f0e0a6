//! Transcript audit specs

use crate::prelude::*;

#[test]
fn check_passes_on_a_real_run() {
    let temp = Project::empty();

    temp.ferry()
        .args(&["10", "15", "7", "500", "50", "--check"])
        .passes();
}

#[test]
fn check_passes_across_seeds() {
    let temp = Project::empty();

    for seed in ["1", "2", "3", "4", "5"] {
        temp.ferry()
            .args(&["5", "5", "4", "100", "10", "--seed", seed, "--check"])
            .passes();
    }
}
