//! Dialogue CLI - a password-locked local journal
//!
//! Locks a file or directory in place behind a password and unlocks it
//! back into a sibling path.

mod app;
mod cli;
mod commands;
mod config;
mod constants;
mod errors;
mod helpers;
mod logging;

use clap::Parser;

use crate::app::AppContext;
use crate::cli::{Cli, Commands};
use crate::commands::{lock, misc, unlock};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Commands::Completions { shell } = &cli.command {
        return misc::handle_completions(*shell);
    }

    let ctx = AppContext::load(&cli)?;
    match &cli.command {
        Commands::Lock(args) => lock::handle_lock(&ctx, args)?,
        Commands::Unlock(args) => unlock::handle_unlock(&ctx, args)?,
        Commands::Completions { .. } => {}
    }
    Ok(())
}
