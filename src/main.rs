use std::fs;
use std::io::Read;
use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use cmd_doc::output::write_markdown;
use cmd_doc::runner::SystemRunner;
use cmd_doc::{document_command, render_help_text};

#[derive(Debug, Parser)]
#[command(name = "cmd-doc", version)]
#[command(about = "Generate markdown documentation from a command's --help output")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Invoke a command recursively with --help and emit a markdown tree.
    Generate(GenerateArgs),
    /// Render help text from a file without executing any commands.
    ParseFile(ParseFileArgs),
    /// Render help text from stdin without executing any commands.
    ParseStdin(ParseStdinArgs),
}

#[derive(Debug, Args)]
struct OutputArgs {
    /// Prepended to the output as-is (no extra newline).
    #[arg(long, default_value = "")]
    header: String,
    /// Appended to the output as-is (no extra newline).
    #[arg(long, default_value = "")]
    footer: String,
    /// Write to this file instead of stdout.
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct GenerateArgs {
    #[command(flatten)]
    out: OutputArgs,
    /// Per-invocation timeout in seconds (0 disables the timeout).
    #[arg(long, default_value_t = 0)]
    timeout_secs: u64,
    /// Command to document, with any fixed leading arguments.
    #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
    command: Vec<String>,
}

#[derive(Debug, Args)]
struct ParseFileArgs {
    #[command(flatten)]
    out: OutputArgs,
    /// Path to a file containing captured help text.
    #[arg(long)]
    input: PathBuf,
}

#[derive(Debug, Args)]
struct ParseStdinArgs {
    #[command(flatten)]
    out: OutputArgs,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Command::Generate(args) => run_generate(args),
        Command::ParseFile(args) => run_parse_file(args),
        Command::ParseStdin(args) => run_parse_stdin(args),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run_generate(args: GenerateArgs) -> Result<(), String> {
    let Some((program, rest)) = args.command.split_first() else {
        return Err("command argument required".to_string());
    };

    let runner = match args.timeout_secs {
        0 => SystemRunner::new(),
        secs => SystemRunner::with_timeout(Duration::from_secs(secs)),
    };

    let markdown = document_command(&runner, program, rest).map_err(|err| err.to_string())?;
    write_output(&args.out, &markdown)
}

fn run_parse_file(args: ParseFileArgs) -> Result<(), String> {
    let help_text = fs::read_to_string(&args.input)
        .map_err(|err| format!("failed to read '{}': {err}", args.input.display()))?;
    write_output(&args.out, &render_help_text(&help_text))
}

fn run_parse_stdin(args: ParseStdinArgs) -> Result<(), String> {
    let mut help_text = String::new();
    std::io::stdin()
        .read_to_string(&mut help_text)
        .map_err(|err| format!("failed to read stdin: {err}"))?;
    write_output(&args.out, &render_help_text(&help_text))
}

fn write_output(out: &OutputArgs, markdown: &str) -> Result<(), String> {
    write_markdown(out.output.as_deref(), &out.header, markdown, &out.footer)
        .map_err(|err| format!("failed to write output: {err}"))
}
