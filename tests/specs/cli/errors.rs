//! Argument error specs
//!
//! Bad arguments are rejected before any worker starts and before the
//! action log is created.

use crate::prelude::*;

#[test]
fn missing_arguments_show_usage() {
    let temp = Project::empty();

    temp.ferry()
        .args(&["10", "20"])
        .fails()
        .code_is(2)
        .stderr_has("expected 5 arguments, got 2")
        .stderr_has("Usage: ferry <NUM_TRUCKS>");

    assert!(!temp.path().join("ferry.out").exists());
}

#[test]
fn extra_arguments_are_rejected() {
    let temp = Project::empty();

    temp.ferry()
        .args(&["1", "1", "3", "0", "0", "7"])
        .fails()
        .stderr_has("expected 5 arguments, got 6");
}

#[test]
fn capacity_below_minimum_is_out_of_range() {
    let temp = Project::empty();

    temp.ferry()
        .args(&["1", "1", "2", "0", "0"])
        .fails()
        .code_is(2)
        .stderr_has("capacity out of range: 2")
        .stderr_has("Choose capacity between 3 and 100");

    assert!(!temp.path().join("ferry.out").exists());
}

#[test]
fn negative_count_is_out_of_range() {
    let temp = Project::empty();

    temp.ferry()
        .args(&["-1", "1", "3", "0", "0"])
        .fails()
        .stderr_has("num_trucks out of range: -1");
}

#[test]
fn ferry_arrival_bound_is_capped() {
    let temp = Project::empty();

    temp.ferry()
        .args(&["1", "1", "3", "0", "1001"])
        .fails()
        .stderr_has("max_ferry_arrival_us out of range: 1001");
}

#[test]
fn non_numeric_argument_is_malformed() {
    let temp = Project::empty();

    temp.ferry()
        .args(&["1", "many", "3", "0", "0"])
        .fails()
        .stderr_has("invalid number for num_cars: \"many\"")
        .stderr_has("Pass a whole decimal number for num_cars");
}

#[test]
fn unwritable_output_is_reported() {
    let temp = Project::empty();

    temp.ferry()
        .args(&["1", "1", "3", "0", "0", "--output", "no/such/dir/ferry.out"])
        .fails()
        .stderr_has("Cannot create action log")
        .stderr_has("--output <PATH>");
}
