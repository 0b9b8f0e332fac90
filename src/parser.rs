//! Section-based help text parsing.
//!
//! Help output in the urfave/cli style is organized into labeled sections:
//!
//! ```text
//! NAME:
//!    app - does app things
//!
//! COMMANDS:
//!      run    runs the app
//! ```
//!
//! [`parse_help`] splits such text into a [`HelpSections`] map keyed by
//! title-cased section label, and the accessors extract the individual
//! semantic fields. Every accessor degrades to an empty value when its
//! section is missing or malformed; parsing never fails.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

/// A section header line: uppercase letters and spaces, then a colon,
/// then nothing but trailing whitespace (e.g. `GLOBAL OPTIONS:`).
/// Mixed-case headers are deliberately not recognized.
static HEADER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Z]+[A-Z\s]*):\s*$").expect("static regex must compile")
});

/// One sub-command name per line of a "Commands" section: leading
/// whitespace, then a name starting with a letter, terminated by
/// whitespace or a comma (aliases after the comma are ignored).
static COMMAND_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s+([A-Za-z]\S*?)[\s,]").expect("static regex must compile")
});

/// Help text split into labeled sections.
///
/// Produced by [`parse_help`]. Section bodies keep their lines verbatim;
/// any text before the first header is stored under the empty-string key.
#[derive(Debug, Clone, Default)]
pub struct HelpSections {
    sections: HashMap<String, String>,
}

impl HelpSections {
    /// Returns the raw body of the section with the given title-cased
    /// label, or `""` when the section is absent.
    pub fn get(&self, label: &str) -> &str {
        self.sections
            .get(label)
            .map(String::as_str)
            .unwrap_or_default()
    }

    /// The command name from the "Name" section.
    ///
    /// Shares a source line with [`usage`](Self::usage): the first line of
    /// the section whose part left of `" - "` is non-blank.
    pub fn name(&self) -> String {
        parse_name(self.get("Name")).0
    }

    /// The one-line usage summary from the "Name" section, `""` when the
    /// section has no `" - "` separator.
    pub fn usage(&self) -> String {
        parse_name(self.get("Name")).1
    }

    /// The first non-blank line of the "Version" section, trimmed.
    pub fn version(&self) -> String {
        parse_version(self.get("Version"))
    }

    /// The normalized "Description" section text.
    pub fn description(&self) -> String {
        parse_description(self.get("Description"))
    }

    /// Sub-command names from the "Commands" section, in order of
    /// appearance. The literal name `help` is excluded.
    pub fn commands(&self) -> Vec<String> {
        parse_commands(self.get("Commands"))
    }
}

/// Splits help text into sections keyed by title-cased header label.
///
/// A header line consists solely of uppercase letters and spaces followed
/// by a colon (`VERSION:`, `GLOBAL OPTIONS:`). The header line itself is
/// dropped; every other line accumulates verbatim (with a trailing
/// newline) under the most recently seen header, or under `""` before the
/// first header.
///
/// # Examples
///
/// ```
/// use cmd_doc::parser::parse_help;
///
/// let sections = parse_help("NAME:\n   app - demo\n\nVERSION:\n   1.2.3\n");
/// assert_eq!(sections.name(), "app");
/// assert_eq!(sections.usage(), "demo");
/// assert_eq!(sections.version(), "1.2.3");
/// assert_eq!(sections.commands(), Vec::<String>::new());
/// ```
pub fn parse_help(help: &str) -> HelpSections {
    let mut sections: HashMap<String, String> = HashMap::new();
    let mut header = String::new();

    for line in split_lines(help) {
        if let Some(caps) = HEADER_RE.captures(line) {
            header = title_case(caps[1].trim());
            continue;
        }

        let body = sections.entry(header.clone()).or_default();
        body.push_str(line);
        body.push('\n');
    }

    HelpSections { sections }
}

/// Extracts `(name, usage)` from a "Name" section body.
///
/// Takes the first line whose part left of the literal `" - "` separator
/// trims to something non-blank; the left part is the name and the right
/// part (when present) is the usage summary.
///
/// # Examples
///
/// ```
/// use cmd_doc::parser::parse_name;
///
/// assert_eq!(
///     parse_name("   foo - does a thing\n"),
///     ("foo".to_string(), "does a thing".to_string())
/// );
/// assert_eq!(parse_name("foo\n"), ("foo".to_string(), String::new()));
/// ```
pub fn parse_name(name_help: &str) -> (String, String) {
    for line in split_lines(name_help) {
        let (left, right) = match line.split_once(" - ") {
            Some((left, right)) => (left, Some(right)),
            None => (line, None),
        };

        let name = left.trim();
        if name.is_empty() {
            continue;
        }

        let usage = right.map(str::trim).unwrap_or_default();
        return (name.to_string(), usage.to_string());
    }

    (String::new(), String::new())
}

/// Returns the first non-blank line of a "Version" section body, trimmed.
pub fn parse_version(version_help: &str) -> String {
    for line in split_lines(version_help) {
        let line = line.trim();
        if !line.is_empty() {
            return line.to_string();
        }
    }

    String::new()
}

/// Normalizes a "Description" section body.
///
/// Each line is trimmed and blank lines are dropped; the result is empty
/// or ends with exactly one newline.
///
/// # Examples
///
/// ```
/// use cmd_doc::parser::parse_description;
///
/// assert_eq!(
///     parse_description("  line one  \n\n  line two  \n"),
///     "line one\nline two\n"
/// );
/// assert_eq!(parse_description("   \n\n"), "");
/// ```
pub fn parse_description(description_help: &str) -> String {
    let mut result = String::new();

    for line in split_lines(description_help) {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        result.push_str(line);
        result.push('\n');
    }

    result
}

/// Extracts sub-command names from a "Commands" section body.
///
/// Each line contributes at most one name: the indented token up to the
/// first comma or whitespace. Aliases after a comma are ignored, order is
/// preserved, duplicates are kept, and the literal name `help` is
/// excluded.
///
/// # Examples
///
/// ```
/// use cmd_doc::parser::parse_commands;
///
/// let commands = parse_commands(
///     "   build, b      builds the project\n   help            shows help\n",
/// );
/// assert_eq!(commands, vec!["build"]);
/// ```
pub fn parse_commands(commands_help: &str) -> Vec<String> {
    let mut result = Vec::new();

    for line in split_lines(commands_help) {
        if let Some(caps) = COMMAND_RE.captures(line) {
            let name = &caps[1];
            if name != "help" {
                result.push(name.to_string());
            }
        }
    }

    result
}

/// Splits on each `\n` or `\r` individually, so `\r\n` yields an empty
/// line between the two terminators.
fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    text.split(['\n', '\r'])
}

/// Lowercases a header label and uppercases the first letter of each
/// word: `GLOBAL OPTIONS` becomes `Global Options`.
fn title_case(label: &str) -> String {
    let mut result = String::with_capacity(label.len());
    let mut boundary = true;

    for ch in label.to_lowercase().chars() {
        if boundary && ch.is_alphabetic() {
            result.extend(ch.to_uppercase());
            boundary = false;
        } else {
            result.push(ch);
            boundary = !ch.is_alphabetic();
        }
    }

    result
}
