// minipl: run a Mini-PL program from a file

use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use crossterm::{
    execute,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
};
use tracing::info;
use tracing_subscriber::EnvFilter;

use minipl::config::{Config, DEFAULT_WINDOW_SIZE};
use minipl::driver::{self, Outcome};
use minipl::io::ConsoleIo;
use minipl::parser::reader::InputBuffer;

#[derive(Parser, Debug)]
#[command(name = "minipl", version, about = "Mini-PL interpreter")]
struct Args {
    /// Program source file
    path: PathBuf,

    /// Skip semantic analysis and execute directly
    #[arg(long)]
    no_analysis: bool,

    /// Lookahead window of the source reader
    #[arg(long, value_name = "K", default_value_t = DEFAULT_WINDOW_SIZE)]
    window: usize,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn install_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

/// Print a file problem to stderr, highlighted when stderr is a terminal.
fn report_file_error(path: &Path, cause: &dyn std::error::Error) {
    let mut stderr = io::stderr();
    let styled = execute!(
        stderr,
        SetForegroundColor(Color::Red),
        SetAttribute(Attribute::Bold),
        Print(format!("There were problems with using file {}:", path.display())),
        ResetColor,
        SetAttribute(Attribute::Reset),
        Print(format!("\n{}\n", cause)),
    );
    if styled.is_err() {
        let _ = writeln!(
            stderr,
            "There were problems with using file {}:\n{}",
            path.display(),
            cause
        );
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    install_tracing(args.verbose);

    let mut config = Config::default().with_window_size(args.window);
    if args.no_analysis {
        config = config.without_analysis();
    }

    let file = match File::open(&args.path) {
        Ok(file) => file,
        Err(err) => {
            report_file_error(&args.path, &err);
            return ExitCode::FAILURE;
        }
    };

    let input = match InputBuffer::new(BufReader::new(file), config.window_size) {
        Ok(input) => input,
        Err(err) => {
            report_file_error(&args.path, &err);
            return ExitCode::FAILURE;
        }
    };

    info!(path = %args.path.display(), "running program");
    let mut console = ConsoleIo::new();
    match driver::run(&mut console, input, config.semantic_analysis) {
        Outcome::Completed => ExitCode::SUCCESS,
        outcome => {
            info!(?outcome, "program did not complete");
            ExitCode::FAILURE
        }
    }
}
