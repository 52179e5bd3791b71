use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};
use clap_complete::Shell;

use dialogue_core::VERSION;

/// Dialogue - a password-locked local journal
#[derive(Parser)]
#[command(name = "dialogue")]
#[command(author, version = VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the config file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (minimal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Arguments for the `lock` command
#[derive(Args)]
pub struct LockArgs {
    /// File or directory to lock in place
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Gzip the archive when locking a directory
    #[arg(long)]
    pub compress: bool,
}

/// Arguments for the `unlock` command
#[derive(Args)]
pub struct UnlockArgs {
    /// Locked container to read
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Where to restore the file or directory (defaults to PATH with the
    /// locked suffix swapped for the unlocked one)
    #[arg(short, long, value_name = "OUT")]
    pub output: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Encrypt a file or directory, replacing it with a locked container
    Lock(LockArgs),

    /// Decrypt a locked container into a file or directory
    Unlock(UnlockArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}
