use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use snapdump_core::{DisplayOptions, DissectSummary, IoSink, dissect_pcap_file};

#[derive(Parser, Debug)]
#[command(name = "snapdump")]
#[command(version)]
#[command(
    about = "Print captured network packets as protocol-aware text.",
    long_about = None,
    after_help = "Examples:\n  snapdump capture.pcap\n  snapdump -n -v capture.pcapng\n  snapdump capture.pcap -w decoded.txt"
)]
struct Cli {
    /// Path to a .pcap or .pcapng file
    input: PathBuf,

    /// Print port numbers instead of service names
    #[arg(short = 'n', long)]
    numeric: bool,

    /// Increase output detail (repeatable)
    #[arg(short = 'v', action = clap::ArgAction::Count)]
    verbose: u8,

    /// Write decoded text to a file instead of stdout
    #[arg(short = 'w', long)]
    output: Option<PathBuf>,

    /// Suppress the summary line on stderr
    #[arg(long)]
    quiet: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err.message);
            if let Some(hint) = err.hint {
                eprintln!("hint: {}", hint);
            }
            ExitCode::from(2)
        }
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
        CliError::new(err.to_string(), None)
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    validate_input_file(&cli.input)?;

    let opts = DisplayOptions {
        numeric_ports: cli.numeric,
        verbosity: cli.verbose,
    };

    let summary = match cli.output.as_ref() {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            dissect_into(&cli, file, opts)?
        }
        None => dissect_into(&cli, io::stdout().lock(), opts)?,
    };

    if !cli.quiet {
        eprintln!(
            "OK: {} packets read, {} decoded",
            summary.packets_total, summary.packets_printed
        );
    }
    Ok(())
}

fn dissect_into<W: Write>(
    cli: &Cli,
    writer: W,
    opts: DisplayOptions,
) -> Result<DissectSummary, CliError> {
    let mut sink = IoSink::new(writer);
    let summary = dissect_pcap_file(&cli.input, &mut sink, opts)
        .context("PCAP/PCAPNG dissection failed")?;
    if let Some(err) = sink.take_error() {
        return Err(CliError::new(
            format!("failed to write output: {err}"),
            Some("check the output destination".to_string()),
        ));
    }
    Ok(summary)
}

fn validate_input_file(input: &PathBuf) -> Result<(), CliError> {
    if !input.exists() {
        return Err(CliError::new(
            format!("input file not found: {}", input.display()),
            Some("use a .pcap or .pcapng file".to_string()),
        ));
    }
    if !input.is_file() {
        return Err(CliError::new(
            format!("input is not a file: {}", input.display()),
            Some("use a .pcap or .pcapng file".to_string()),
        ));
    }
    let ext = input
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    if ext != "pcap" && ext != "pcapng" {
        return Err(CliError::new(
            format!("unsupported input format '{}'", input.display()),
            Some("expected a .pcap or .pcapng file".to_string()),
        ));
    }
    Ok(())
}
