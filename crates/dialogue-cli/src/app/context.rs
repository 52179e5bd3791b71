//! Application context for the Dialogue CLI.
//!
//! Combines CLI arguments with the loaded config and the log dispatch the
//! core operations run under.

use std::io::{self, IsTerminal};

use dialogue_core::crypto::{confirm_password, Password};
use dialogue_core::Locker;
use tracing::Dispatch;

use crate::cli::Cli;
use crate::config::{read_config, resolve_config_path, DialogueConfig};
use crate::errors::CliError;
use crate::helpers::prompt_password_pair;
use crate::logging::build_dispatch;

/// Application context that bundles CLI flags with configuration.
pub struct AppContext {
    config: DialogueConfig,
    dispatch: Dispatch,
    quiet: bool,
}

impl AppContext {
    /// Load config and build the log dispatch for this invocation.
    pub fn load(cli: &Cli) -> anyhow::Result<Self> {
        let path = resolve_config_path(cli.config.as_deref())?;
        let config = read_config(&path)?;
        let dispatch = build_dispatch(config.log.level.raised_by(cli.verbose));
        tracing::dispatcher::with_default(&dispatch, || {
            tracing::debug!(config = %path.display(), "loaded config");
        });

        Ok(Self {
            config,
            dispatch,
            quiet: cli.quiet,
        })
    }

    pub fn config(&self) -> &DialogueConfig {
        &self.config
    }

    /// Check if quiet mode is enabled.
    pub fn quiet(&self) -> bool {
        self.quiet
    }

    /// A locker logging through this context's dispatch.
    pub fn locker(&self, compress: bool) -> Locker {
        Locker::new()
            .with_compression(compress)
            .with_dispatch(self.dispatch.clone())
    }

    /// Prompt for the password and its confirmation.
    ///
    /// Exits with `INVALID_INPUT` when they differ or the password is empty.
    pub fn read_password(&self) -> anyhow::Result<Password> {
        let pair = prompt_password_pair(io::stdin().is_terminal())?;
        let password = confirm_password(pair.entered.as_bytes(), pair.retyped.as_bytes())
            .unwrap_or_else(|e| CliError::from(e).exit());
        Ok(password)
    }
}
