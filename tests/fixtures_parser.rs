use std::fs;
use std::path::PathBuf;

use cmd_doc::parser::parse_help;

fn fixture(name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    fs::read_to_string(&path).unwrap_or_else(|err| panic!("failed to read {path:?}: {err}"))
}

#[test]
fn test_parse_cmd_doc_fixture_extracts_all_fields() {
    let sections = parse_help(&fixture("cmd-doc-help.txt"));

    assert_eq!(sections.name(), "cmd-doc");
    assert_eq!(sections.usage(), "generates markdown from commands");
    assert_eq!(sections.version(), "v0.0.0");
    assert_eq!(sections.commands(), vec!["urfave"]);
    assert_eq!(
        sections.description(),
        "This command is a utility to allow automated documentation of binaries.\n\
         Output will be printed to stdout in markdown format, and may be processed\n\
         further, from there.\n"
    );
}

#[test]
fn test_parse_cmd_doc_fixture_keeps_option_sections() {
    let sections = parse_help(&fixture("cmd-doc-help.txt"));

    let options = sections.get("Global Options");
    assert!(options.contains("--header value"));
    assert!(options.contains("--version, -v"));
}

#[test]
fn test_parse_build_metadata_fixture() {
    let sections = parse_help(&fixture("build-metadata-help.txt"));

    assert_eq!(sections.name(), "deployer");
    assert_eq!(sections.usage(), "ships builds to production");
    assert_eq!(sections.version(), "2.4.1");
    assert_eq!(sections.get("Build Version").trim(), "abc1234");
    assert_eq!(sections.get("Build Date").trim(), "2018-06-01T10:00:00Z");
    assert_eq!(sections.get("Build User").trim(), "ci-bot");
    assert_eq!(sections.commands(), vec!["push", "status"]);
}
