use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

use anyhow::Result;
use clap::Parser;

use rudiff_core::{driver, Algorithm, DiffOptions, OutputFormat, PROGRAM};

#[derive(Parser)]
#[command(name = "rudiff", about = "Compare two files line by line")]
struct Cli {
    /// Treat runs of blanks as a single space and ignore trailing blanks
    #[arg(short = 'b')]
    ignore_space_change: bool,

    /// Ignore case differences in line content
    #[arg(short = 'i')]
    ignore_case: bool,

    /// Recursively compare common subdirectories
    #[arg(short = 'r')]
    recursive: bool,

    /// Output three lines of copied context
    #[arg(short = 'c')]
    context: bool,

    /// Output <n> lines of copied context
    #[arg(short = 'C', value_name = "n")]
    context_lines: Option<usize>,

    /// Output three lines of unified context
    #[arg(short = 'u')]
    unified: bool,

    /// Output <n> lines of unified context
    #[arg(short = 'U', value_name = "n")]
    unified_lines: Option<usize>,

    /// Output an ed script
    #[arg(short = 'e')]
    ed: bool,

    /// Output a forward ed script (not valid ed input)
    #[arg(short = 'f')]
    forward_ed: bool,

    /// Use the patience diff algorithm
    #[arg(long)]
    patience: bool,

    /// Use the histogram diff algorithm
    #[arg(long)]
    histogram: bool,

    /// Render file times in UTC
    #[arg(long)]
    utc: bool,

    /// First file or directory, or - for standard input
    #[arg(value_name = "file1")]
    file1: PathBuf,

    /// Second file or directory, or - for standard input
    #[arg(value_name = "file2")]
    file2: PathBuf,
}

fn main() {
    let cli = Cli::parse();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match run(&cli, &mut out) {
        Ok(false) => process::exit(0),
        Ok(true) => process::exit(1),
        Err(err) => {
            eprintln!("{PROGRAM}: {err}");
            process::exit(2);
        }
    }
}

fn run(cli: &Cli, out: &mut impl Write) -> Result<bool> {
    let opts = build_options(cli);
    let found = driver::run(&cli.file1, &cli.file2, &opts, out)?;
    out.flush()?;
    Ok(found)
}

/// Assemble the options record. Exactly one output mode is active; later
/// flags in the option list override earlier ones.
fn build_options(cli: &Cli) -> DiffOptions {
    let format = if cli.forward_ed {
        OutputFormat::AltEd
    } else if cli.ed {
        OutputFormat::Ed
    } else if let Some(radius) = cli.unified_lines {
        OutputFormat::Unified(radius)
    } else if cli.unified {
        OutputFormat::Unified(3)
    } else if let Some(radius) = cli.context_lines {
        OutputFormat::Context(radius)
    } else if cli.context {
        OutputFormat::Context(3)
    } else {
        OutputFormat::Normal
    };

    let algorithm = if cli.histogram {
        Algorithm::Histogram
    } else if cli.patience {
        Algorithm::Patience
    } else {
        Algorithm::Myers
    };

    DiffOptions {
        algorithm,
        format,
        ignore_space_change: cli.ignore_space_change,
        ignore_case: cli.ignore_case,
        recursive: cli.recursive,
        utc: cli.utc,
    }
}
