//! Command-line options for the `vfs-batch` binary.

use clap::Parser;
use std::path::PathBuf;

/// Runs cp/md/mf/mv/rm commands against an in-memory file tree.
#[derive(Parser, Debug)]
#[command(name = "vfs-batch")]
#[command(version, about = "Run batch file tree commands in memory", long_about = None)]
pub struct Cli {
    /// Batch file with one command per line; commands are read from stdin when omitted
    #[arg(value_name = "BATCH_FILE", env = "VFS_BATCH_FILE")]
    pub batch_file: Option<PathBuf>,

    /// Do not print the file tree when the run is over
    #[arg(long, env = "VFS_BATCH_NO_TREE")]
    pub no_tree: bool,

    /// Enable debug output
    #[arg(long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only report errors
    #[arg(long)]
    pub quiet: bool,
}
