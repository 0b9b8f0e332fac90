//! Command tree construction.
//!
//! [`build_command`] probes a program's `--help` output through a
//! [`CommandRunner`], parses it, and recurses into every discovered
//! sub-command to build a [`CommandHelp`] tree. One process invocation is
//! made per node, strictly sequentially: a node's sub-commands are only
//! known once its own help output has been captured and parsed.
//!
//! The [`Command`] trait is the open rendering contract; anything
//! implementing it (including test doubles) can be passed to
//! [`generate_markdown`](crate::render::generate_markdown).

use tracing::debug;

use crate::parser::parse_help;
use crate::runner::{CommandRunner, RunError};

/// A documented command, possibly with nested sub-commands.
///
/// [`CommandHelp`] is the canonical implementation; renderers accept any
/// implementor.
pub trait Command {
    /// Single-line command name.
    fn name(&self) -> &str;
    /// Short human-readable summary; each line gets block-quoted when
    /// rendered.
    fn info(&self) -> String;
    /// Free-text description, copied into the output verbatim.
    fn description(&self) -> &str;
    /// Raw captured help text, rendered as pre-formatted text.
    fn help(&self) -> &str;
    /// Nested sub-commands, in discovery order.
    fn children(&self) -> Vec<&dyn Command>;
}

/// Structured help for one command, built from captured help text.
#[derive(Debug, Clone, Default)]
pub struct CommandHelp {
    base: Vec<String>,
    name: String,
    version: String,
    usage: String,
    build_version: String,
    build_date: String,
    build_user: String,
    description: String,
    help: String,
    children: Vec<CommandHelp>,
}

impl CommandHelp {
    /// Parses a single node from pre-captured help text.
    ///
    /// No commands are executed, so discovered sub-command names are not
    /// expanded into children.
    ///
    /// # Examples
    ///
    /// ```
    /// use cmd_doc::command::{Command, CommandHelp};
    ///
    /// let node = CommandHelp::from_help_text("NAME:\n   app - demo\n");
    /// assert_eq!(node.name(), "app");
    /// assert!(node.children().is_empty());
    /// ```
    pub fn from_help_text(help: impl Into<String>) -> Self {
        let help = help.into();
        let sections = parse_help(&help);

        CommandHelp {
            base: Vec::new(),
            name: sections.name(),
            version: sections.version(),
            usage: sections.usage(),
            build_version: sections.get("Build Version").trim().to_string(),
            build_date: sections.get("Build Date").trim().to_string(),
            build_user: sections.get("Build User").trim().to_string(),
            description: sections.description(),
            help,
            children: Vec::new(),
        }
    }
}

impl Command for CommandHelp {
    fn name(&self) -> &str {
        &self.name
    }

    /// Synthesizes the info block: one `key: value` line per non-empty
    /// metadata field, with the usage summary prepended before the rest.
    fn info(&self) -> String {
        let mut result = String::new();

        for (key, value) in [
            ("name", &self.name),
            ("version", &self.version),
            ("build_version", &self.build_version),
            ("build_date", &self.build_date),
            ("build_user", &self.build_user),
        ] {
            let value = value.trim();
            if !value.is_empty() {
                result.push_str(key);
                result.push_str(": ");
                result.push_str(value);
                result.push('\n');
            }
        }

        let usage = self.usage.trim();
        if !usage.is_empty() {
            if result.is_empty() {
                result = format!("{usage}\n");
            } else {
                result = format!("{usage}\n\n{result}");
            }
        }

        result
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn help(&self) -> &str {
        &self.help
    }

    fn children(&self) -> Vec<&dyn Command> {
        self.children.iter().map(|child| child as &dyn Command).collect()
    }
}

/// Builds the full command tree for `program` (with fixed leading `args`)
/// by recursively invoking it with `--help`.
///
/// Any invocation failure aborts the whole build; no partial tree is
/// returned.
pub fn build_command(
    runner: &dyn CommandRunner,
    program: &str,
    args: &[String],
) -> Result<CommandHelp, RunError> {
    let mut base = Vec::with_capacity(args.len() + 1);
    base.push(program.to_string());
    base.extend_from_slice(args);
    build_node(runner, base)
}

/// Builds one node from its invocation path, then its children in
/// discovery order. Fields are fully parsed before any child runs.
fn build_node(runner: &dyn CommandRunner, base: Vec<String>) -> Result<CommandHelp, RunError> {
    let mut argv = base.clone();
    argv.push("--help".to_string());

    debug!(command = ?argv, "capturing help output");
    let help = runner.combined_output(&argv)?;

    let subcommands = parse_help(&help).commands();
    let mut node = CommandHelp::from_help_text(help);
    node.base = base;

    for name in subcommands {
        let mut child_base = node.base.clone();
        child_base.push(name);
        node.children.push(build_node(runner, child_base)?);
    }

    Ok(node)
}
