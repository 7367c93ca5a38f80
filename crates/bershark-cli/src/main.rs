use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use glob::glob;

use bershark_core::{OutputFormat, ReadSource, dump_file, dump_source};

#[derive(Parser, Debug)]
#[command(name = "bershark")]
#[command(version)]
#[command(
    about = "Dump BER-encoded tag-length-value streams as readable text.",
    long_about = None,
    after_help = "Examples:\n  bershark records.ber\n  bershark -f flat 'captures/*.ber'\n  cat records.ber | bershark -f path"
)]
struct Cli {
    /// Output form for decoded records
    #[arg(short = 'f', long, value_enum, default_value_t = Format::Tree)]
    format: Format,

    /// Input files or glob patterns; none, or a bare `-`, reads stdin
    inputs: Vec<PathBuf>,

    /// Suppress the per-input record summary on stderr
    #[arg(long)]
    quiet: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Format {
    /// Indented nested structure
    Tree,
    /// One `number|value` line per node with BEGIN/END markers
    Flat,
    /// Flat form with the full tag-number path as identifier
    Path,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Tree => OutputFormat::Tree,
            Format::Flat => OutputFormat::Flat,
            Format::Path => OutputFormat::Path,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let format = OutputFormat::from(cli.format);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    let mut failed = false;
    for input in resolve_inputs(&cli.inputs) {
        let outcome = input.and_then(|input| dump_input(&input, format, &mut out, cli.quiet));
        if let Err(err) = outcome {
            eprintln!("error: {}", err.message);
            if let Some(hint) = err.hint {
                eprintln!("hint: {}", hint);
            }
            failed = true;
        }
    }

    if failed {
        ExitCode::from(2)
    } else {
        ExitCode::SUCCESS
    }
}

#[derive(Debug)]
struct CliError {
    message: String,
    hint: Option<String>,
}

impl CliError {
    fn new(message: impl Into<String>, hint: Option<String>) -> Self {
        Self {
            message: message.into(),
            hint,
        }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        CliError::new(format!("{:#}", err), None)
    }
}

#[derive(Debug)]
enum Input {
    Stdin,
    File(PathBuf),
}

fn dump_input<W: Write>(
    input: &Input,
    format: OutputFormat,
    out: &mut W,
    quiet: bool,
) -> Result<(), CliError> {
    match input {
        Input::Stdin => {
            let stdin = io::stdin();
            let mut source = ReadSource::new(stdin.lock());
            let records =
                dump_source(&mut source, format, out).context("failed to dump standard input")?;
            summarize("standard input", records, quiet);
        }
        Input::File(path) => {
            validate_input_file(path)?;
            let records = dump_file(path, format, out)
                .with_context(|| format!("failed to dump {}", path.display()))?;
            summarize(&path.display().to_string(), records, quiet);
        }
    }
    Ok(())
}

fn summarize(label: &str, records: u64, quiet: bool) {
    if !quiet {
        eprintln!("OK: {} records <- {}", records, label);
    }
}

fn validate_input_file(path: &Path) -> Result<(), CliError> {
    if !path.exists() {
        return Err(CliError::new(
            format!("input file not found: {}", path.display()),
            Some("check the path, or pass `-` for standard input".to_string()),
        ));
    }
    if !path.is_file() {
        return Err(CliError::new(
            format!("input is not a file: {}", path.display()),
            None,
        ));
    }
    Ok(())
}

/// Expand the argument list into concrete inputs, in argument order.
///
/// Unresolvable arguments become error entries so one bad input never
/// stops the ones after it.
fn resolve_inputs(args: &[PathBuf]) -> Vec<Result<Input, CliError>> {
    if args.is_empty() {
        return vec![Ok(Input::Stdin)];
    }

    let mut inputs = Vec::new();
    for arg in args {
        if arg.as_os_str() == "-" {
            inputs.push(Ok(Input::Stdin));
            continue;
        }
        let pattern = arg.to_string_lossy();
        if !is_glob_pattern(&pattern) {
            inputs.push(Ok(Input::File(arg.clone())));
            continue;
        }
        expand_pattern(&pattern, &mut inputs);
    }
    inputs
}

fn expand_pattern(pattern: &str, inputs: &mut Vec<Result<Input, CliError>>) {
    let paths = match glob(pattern) {
        Ok(paths) => paths,
        Err(err) => {
            inputs.push(Err(CliError::new(
                format!("invalid input pattern '{}'", pattern),
                Some(format!("pattern error: {}", err.msg)),
            )));
            return;
        }
    };

    let mut pushed_any = false;
    for entry in paths {
        match entry {
            Ok(path) if path.is_file() => {
                pushed_any = true;
                inputs.push(Ok(Input::File(path)));
            }
            Ok(_) => {}
            Err(err) => {
                pushed_any = true;
                inputs.push(Err(CliError::new(
                    format!("invalid input pattern '{}'", pattern),
                    Some(format!("pattern error: {}", err)),
                )));
            }
        }
    }

    if !pushed_any {
        inputs.push(Err(CliError::new(
            format!("no files match pattern '{}'", pattern),
            Some("check the path or quote the pattern".to_string()),
        )));
    }
}

fn is_glob_pattern(input: &str) -> bool {
    input.contains('*') || input.contains('?') || input.contains('[')
}
