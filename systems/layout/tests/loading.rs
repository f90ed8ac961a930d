use std::io::Write;

use alien_invasion_core::Direction;
use alien_invasion_system_layout::{load, LayoutError};

fn layout_file(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    file.write_all(contents.as_bytes()).expect("write layout");
    file
}

#[test]
fn loads_valid_layout_from_disk() {
    let file = layout_file("Foo north=Bar west=Baz\nBar south=Foo\nBaz east=Foo\n");

    let layout = load(file.path()).expect("valid layout");

    assert_eq!(layout.len(), 3);
    assert_eq!(layout["Foo"][&Direction::North], "Bar");
    assert_eq!(layout["Baz"][&Direction::East], "Foo");
}

#[test]
fn missing_file_reports_path() {
    let directory = tempfile::tempdir().expect("temp dir");
    let path = directory.path().join("absent.txt");

    let error = load(&path).expect_err("file is missing");

    assert!(matches!(error, LayoutError::Io { .. }));
    assert!(error.to_string().contains("absent.txt"));
}

#[test]
fn malformed_file_is_rejected_before_validation() {
    let file = layout_file("Foo north=Bar\nBar south=Foo=west=Bee\n");

    assert!(matches!(
        load(file.path()),
        Err(LayoutError::MalformedLine { line: 2, .. })
    ));
}

#[test]
fn non_reciprocal_file_is_rejected() {
    let file = layout_file("Foo north=Bar\nBar west=Foo\n");

    let error = load(file.path()).expect_err("missing return road");

    assert!(matches!(error, LayoutError::MissingReciprocal { .. }));
    assert_eq!(
        error.to_string(),
        "road west from \"Bar\" to \"Foo\" has no east road back"
    );
}
