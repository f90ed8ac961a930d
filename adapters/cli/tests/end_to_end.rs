use std::{fs, path::Path, process::Command};

fn invasion(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_alien-invasion"))
        .args(["--tick-delay-ms", "0", "--seed", "7"])
        .args(args)
        .env("RUST_LOG", "off")
        .output()
        .expect("failed to run alien-invasion")
}

fn write_layout(directory: &Path, contents: &str) -> String {
    let path = directory.join("cities.txt");
    fs::write(&path, contents).expect("write layout");
    path.display().to_string()
}

#[test]
fn two_aliens_in_a_single_city_destroy_it_on_day_zero() {
    let directory = tempfile::tempdir().expect("temp dir");
    let layout = write_layout(directory.path(), "Solo\n");

    let output = invasion(&["--city-config", &layout, "--aliens", "2"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("day 0 | alive 0 | dead 2 | standing 0 | destroyed 1\n"));
    assert!(stdout.ends_with("invasion over: 0 aliens alive, 2 dead, 1 of 1 cities destroyed\n"));
}

#[test]
fn generated_runs_are_reproducible() {
    let args = ["--matrix", "4", "--cities", "9", "--aliens", "6", "--days", "50"];

    let first = invasion(&args);
    let second = invasion(&args);

    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);
}

#[test]
fn invalid_layout_fails_before_simulating() {
    let directory = tempfile::tempdir().expect("temp dir");
    let layout = write_layout(directory.path(), "Foo north=Bar\nBar west=Foo\n");

    let output = invasion(&["--city-config", &layout]);

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("has no east road back"));
}

#[test]
fn settings_file_fills_unset_flags() {
    let directory = tempfile::tempdir().expect("temp dir");
    let _ = write_layout(directory.path(), "A south=B\nB north=A\n");
    let config = directory.path().join("invasion.toml");
    fs::write(&config, "aliens = 1\ndays = 3\ncity_config = \"cities.txt\"\n").expect("write config");

    let output = invasion(&["--config", &config.display().to_string()]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.matches("day ").count(), 3);
    assert!(stdout.ends_with("invasion over: 1 aliens alive, 0 dead, 0 of 2 cities destroyed\n"));
}
