//! Entry point for the `vfs-batch` binary.
//!
//! Reads commands from a batch file (or stdin), applies them to a fresh in-memory tree and
//! exits with the code of the first failure:
//! 0 ok, 1 cannot open data stream, 2 parsing error, 3 arguments error, 4 logic error.

mod cli;

use std::io::Write;

use anyhow::Context;
use clap::Parser;
use cli::Cli;
use env_logger::{Env, Target};
use log::{Level as LogLevel, LevelFilter};
use vfs_batch::{ErrorCode, LogNarrator, MapFS, RunError, RunOptions, Runner};

fn init_logging(verbose: bool, quiet: bool) {
    let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or("info"));
    builder
        .target(Target::Stdout)
        .format(|buf, record| {
            let label = match record.level() {
                LogLevel::Error => "ERROR",
                LogLevel::Warn => "WARNING",
                LogLevel::Info => "INFO",
                LogLevel::Debug => "DEBUG",
                LogLevel::Trace => "TRACE",
            };
            writeln!(buf, "{label}: {}", record.args())
        });
    if verbose {
        builder.filter_level(LevelFilter::Debug);
    } else if quiet {
        builder.filter_level(LevelFilter::Error);
    }
    if let Err(err) = builder.try_init() {
        eprintln!("vfs-batch: logging is unavailable: {err}");
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let options = RunOptions {
        print_tree: !cli.no_tree,
    };
    let mut runner = Runner::with_options(MapFS::new(), LogNarrator, options);

    match &cli.batch_file {
        Some(path) => runner
            .run_file(path)
            .with_context(|| format!("batch file {}", path.display())),
        None => runner.run_stdin().context("standard input"),
    }
}

fn exit_code(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<RunError>()
        .map(RunError::error_code)
        .unwrap_or(ErrorCode::CannotOpenDataStream)
        .exit_code()
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    // failures are already narrated by the runner
    if let Err(err) = run(&cli) {
        log::debug!("{err:#}");
        std::process::exit(exit_code(&err));
    }
}
