//! Markdown documentation generated from `--help` output.
//!
//! This crate turns the help text of an arbitrary command-line program
//! into a structured command tree and renders that tree as markdown, one
//! section per command with increasing heading depth. It understands the
//! section layout emitted by urfave/cli-style tools (`NAME:`, `USAGE:`,
//! `VERSION:`, `COMMANDS:`, ...) and degrades gracefully on anything
//! else: unrecognized help text still renders, just with empty metadata.
//!
//! # Main entry points
//!
//! - [`command::build_command`] — invoke a program with `--help`
//!   recursively and build a [`command::CommandHelp`] tree (one process
//!   per node).
//! - [`render::generate_markdown`] — render any [`command::Command`]
//!   tree as markdown.
//! - [`render_help_text`] — parse pre-captured help text and render a
//!   single-command document without executing anything.
//!
//! # Example
//!
//! ```
//! let help = "\
//! NAME:
//!    app - does app things
//!
//! COMMANDS:
//!      run    runs the app
//! ";
//!
//! let markdown = cmd_doc::render_help_text(help);
//! assert!(markdown.starts_with("# app\n"));
//! assert!(markdown.contains("```\nNAME:\n"));
//! ```

pub mod command;
pub mod output;
pub mod parser;
pub mod render;
pub mod runner;

use command::CommandHelp;
use render::generate_markdown;
use runner::{CommandRunner, RunError};

/// Builds the command tree for `program` and renders it as markdown.
///
/// One external invocation is made per discovered command; any invocation
/// failure aborts the whole run and nothing is rendered.
pub fn document_command(
    runner: &dyn CommandRunner,
    program: &str,
    args: &[String],
) -> Result<String, RunError> {
    let root = command::build_command(runner, program, args)?;
    Ok(generate_markdown(&root))
}

/// Renders pre-captured help text as a single-command markdown document.
///
/// No commands are executed, so sub-commands listed in the text are not
/// expanded into nested sections.
pub fn render_help_text(help_text: &str) -> String {
    generate_markdown(&CommandHelp::from_help_text(help_text))
}
