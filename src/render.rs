//! Markdown rendering of command trees.

use crate::command::Command;

/// Renders a command tree as a single markdown document.
///
/// Pure and deterministic: each node becomes a heading at `#` × (depth+1)
/// (root depth 0), a block-quoted info summary, the verbatim description,
/// and the raw help text in a fenced code block, followed by its children
/// in order. A nameless node renders under the placeholder `COMMAND`.
///
/// # Examples
///
/// ```
/// use cmd_doc::command::CommandHelp;
/// use cmd_doc::render::generate_markdown;
///
/// let root = CommandHelp::from_help_text("NAME:\n   app - demo\n");
/// let markdown = generate_markdown(&root);
/// assert!(markdown.starts_with("# app\n\n> demo\n"));
/// ```
pub fn generate_markdown(command: &dyn Command) -> String {
    render_node(command, 0)
}

fn render_node(command: &dyn Command, depth: usize) -> String {
    let name = match command.name() {
        "" => "COMMAND",
        name => name,
    };

    // Block-quote the synthesized info; an entirely empty info block is
    // elided along with its trailing blank line.
    let info = command.info();
    let mut quoted = String::new();
    if !info.is_empty() {
        for line in info.strip_suffix('\n').unwrap_or(&info).split('\n') {
            quoted.push_str("> ");
            quoted.push_str(line);
            quoted.push('\n');
        }
        quoted.push('\n');
    }

    let description = command.description();

    let mut body = String::new();
    body.push_str(&"#".repeat(depth + 1));
    body.push(' ');
    body.push_str(name);
    body.push_str("\n\n");
    body.push_str(&quoted);
    body.push_str(description);
    if !description.is_empty() {
        body.push('\n');
    }
    body.push_str("```\n");
    body.push_str(command.help());
    body.push_str("\n```\n");

    for child in command.children() {
        body.push('\n');
        body.push_str(&render_node(child, depth + 1));
    }

    body
}
