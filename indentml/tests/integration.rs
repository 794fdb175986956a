//! Integration tests that transpile complete fixture files end-to-end.

use indentml::{Options, SelfClosingMode, Severity, codes};
use pretty_assertions::assert_eq;

fn fixtures_dir() -> std::path::PathBuf {
    std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("../tests/fixtures")
}

fn read_fixture(name: &str) -> String {
    let path = fixtures_dir().join(name);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture '{}': {}", path.display(), e))
}

#[test]
fn page_fixture_matches_expected() {
    let source = read_fixture("page.haml");
    let expected = read_fixture("page.html");
    let output = indentml::transpile(&source, &Options::default()).unwrap();
    assert_eq!(output, expected.trim_end());
}

#[test]
fn page_fixture_diagnostics() {
    let source = read_fixture("page.haml");
    let result = indentml::transpile_with_diagnostics(&source, &Options::default()).unwrap();

    // Only the doctype-style line is reported, as info.
    assert_eq!(result.diagnostics.len(), 1);
    let diag = &result.diagnostics[0];
    assert_eq!(diag.severity, Severity::Info);
    assert_eq!(diag.code.as_deref(), Some(codes::METADATA_PASSTHROUGH));
    assert_eq!(diag.line, Some(1));
}

#[test]
fn page_fixture_html5_mode() {
    let source = read_fixture("page.haml");
    let options = Options {
        self_closing_mode: SelfClosingMode::Html5,
        ..Default::default()
    };
    let output = indentml::transpile(&source, &options).unwrap();
    assert!(output.contains("<meta charset=\"utf-8\">"));
    assert!(output.contains("<br>"));
    assert!(!output.contains(" />"));
    assert!(!output.contains("</br>"));
}

#[test]
fn irregular_widths_are_normalised() {
    let source = read_fixture("irregular.haml");
    let expected = read_fixture("irregular.html");
    let output = indentml::transpile(&source, &Options::default()).unwrap();
    assert_eq!(output, expected.trim_end());
}

#[test]
fn irregular_widths_unformatted_keep_source_columns() {
    let source = read_fixture("irregular.haml");
    let options = Options {
        format_output: false,
        ..Default::default()
    };
    let output = indentml::transpile(&source, &options).unwrap();
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines[1], "   <article>");
    assert_eq!(lines[4], "             deep text");
    assert_eq!(lines[5], "        </p>");
    assert_eq!(lines[6], "   </article>");
}

#[test]
fn formatting_existing_output_is_stable() {
    let source = read_fixture("page.haml");
    let once = indentml::transpile(&source, &Options::default()).unwrap();
    let twice = indentml::format::format_markup(&once, 2, indentml::SelfClosingTags::html());
    assert_eq!(twice, once);
}

#[test]
fn five_levels_then_abrupt_dedent() {
    let source = "%a\n  %b\n    %c\n      %d\n        %e\n%x\n%y\n%z";
    let output = indentml::transpile(source, &Options::default()).unwrap();
    let lines: Vec<&str> = output.lines().map(str::trim).collect();
    assert_eq!(
        lines,
        [
            "<a>", "<b>", "<c>", "<d>", "<e>", "</e>", "</d>", "</c>", "</b>", "</a>", "<x>",
            "</x>", "<y>", "</y>", "<z>", "</z>"
        ]
    );
}
