extern crate assert_cmd;
extern crate predicates;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

fn mandelcycle() -> Command {
    Command::cargo_bin("mandelcycle").unwrap()
}

#[test]
fn a_single_frame_is_the_static_picture() {
    mandelcycle()
        .args(&["--size", "8x6", "--iterations", "20", "--frames", "1", "--interval", "0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\u{2580}"));
}

#[test]
fn a_short_animation_runs_to_completion() {
    mandelcycle()
        .args(&["-s", "6x4", "-i", "5", "-f", "10", "-d", "0", "-p", "inferno"])
        .assert()
        .success();
}

#[test]
fn inverted_rectangles_are_refused() {
    mandelcycle()
        .args(&["-l", "1,1", "-r", "-1,-1", "-f", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid parameter"));
}

#[test]
fn empty_fields_are_refused() {
    mandelcycle()
        .args(&["-s", "0x10", "-f", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("must be positive"));
}

#[test]
fn unknown_palettes_are_refused() {
    mandelcycle()
        .args(&["-p", "viridis", "-f", "1"])
        .assert()
        .failure();
}

#[test]
fn oversized_fields_are_refused() {
    mandelcycle()
        .args(&["-s", "4294967296x4294967296", "-f", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Could not parse field size"));
    mandelcycle()
        .args(&["-s", "8192x8192", "-f", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid parameter"));
}

#[test]
fn piped_output_ends_with_the_cursor_restored() {
    mandelcycle()
        .args(&["-s", "4x4", "-i", "5", "-f", "2", "-d", "0"])
        .assert()
        .success()
        .stdout(predicate::str::ends_with("\x1b[?25h\n"));
}
