//! CLI Tooling
//!
//! Command-line surface over [`Environment`]. Each command returns the text
//! to print; parsing and printing stay in the binary.

use crate::config::{ConfigLoader, RolesConfig};
use crate::environment::Environment;
use crate::error::{EnvironmentError, Result};
use crate::logging::LoggingConfig;
use crate::tooling::format::{
    format_pruned, format_refresh_outcome, format_reset, format_role_change,
    format_role_listing_json, format_role_listing_text, format_status_json, format_status_text,
    StatusReport,
};
use crate::vcs::GitFetch;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::SystemTime;

/// Manage Puppet roles of a Vagrant development environment
#[derive(Parser)]
#[command(name = "vagrant-roles")]
#[command(about = "List, enable and disable Puppet roles of a Vagrant environment")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Environment root (default: nearest directory containing a Vagrantfile)
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, file+stderr)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// List available roles; enabled roles are marked
    ListRoles {
        /// Output format (text or json)
        #[arg(long, default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },
    /// Enable one or more roles
    EnableRole {
        #[arg(required = true, num_args = 1..)]
        roles: Vec<String>,
    },
    /// Disable one or more roles
    DisableRole {
        #[arg(required = true, num_args = 1..)]
        roles: Vec<String>,
    },
    /// Disable all roles
    ResetRoles,
    /// Remove enabled roles that no longer exist
    PruneRoles,
    /// Fetch remote commits if the last fetch is more than a week old
    Update {
        /// Fetch even if the last fetch is recent (the opt-out still applies)
        #[arg(long)]
        force: bool,
    },
    /// Show environment status
    Status {
        /// Output format (text or json)
        #[arg(long, default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },
}

impl Cli {
    /// Logging configuration with command-line overrides applied.
    pub fn logging_config(&self, base: &LoggingConfig) -> LoggingConfig {
        let mut config = base.clone();
        if let Some(level) = &self.log_level {
            config.level = level.clone();
        }
        if let Some(format) = &self.log_format {
            config.format = format.clone();
        }
        if let Some(output) = &self.log_output {
            config.output = output.clone();
        }
        if self.log_file.is_some() {
            config.file = self.log_file.clone();
        }
        config
    }
}

/// CLI context bound to one environment
pub struct CliContext {
    env: Environment,
    config: RolesConfig,
}

impl CliContext {
    /// Create a new CLI context.
    ///
    /// Without an explicit root the nearest enclosing Vagrant environment of
    /// the current directory is used.
    pub fn new(root: Option<PathBuf>, config_path: Option<PathBuf>) -> Result<Self> {
        let root = match root {
            Some(root) => root,
            None => {
                let cwd = std::env::current_dir().map_err(|e| EnvironmentError::io(".", e))?;
                Environment::locate(cwd)?
            }
        };

        let config = match &config_path {
            Some(path) => ConfigLoader::load_from_file(path)?,
            None => ConfigLoader::load(&root)?,
        };

        let env =
            Environment::with_config(&root, config.environment.clone(), config.refresh.clone())?;
        Ok(Self { env, config })
    }

    pub fn environment(&self) -> &Environment {
        &self.env
    }

    pub fn config(&self) -> &RolesConfig {
        &self.config
    }

    /// Execute a CLI command
    pub fn execute(&self, command: &Commands) -> Result<String> {
        match command {
            Commands::ListRoles { format } => {
                let entries = self.env.role_listing()?;
                Ok(match format.as_str() {
                    "json" => format_role_listing_json(&entries),
                    _ => format_role_listing_text(&entries),
                })
            }
            Commands::EnableRole { roles } => {
                let change = self.env.enable_roles(roles)?;
                Ok(format_role_change("enabled", &change))
            }
            Commands::DisableRole { roles } => {
                let change = self.env.disable_roles(roles)?;
                Ok(format_role_change("disabled", &change))
            }
            Commands::ResetRoles => {
                let previous = self.env.reset_roles()?;
                Ok(format_reset(&previous))
            }
            Commands::PruneRoles => {
                let pruned = self.env.prune_roles()?;
                Ok(format_pruned(&pruned))
            }
            Commands::Update { force } => {
                let gate = self.env.refresh_gate();
                let outcome = if *force {
                    self.env.force_update_with(&GitFetch, gate)?
                } else {
                    self.env.update_with(&GitFetch, gate, SystemTime::now())?
                };
                Ok(format_refresh_outcome(&outcome))
            }
            Commands::Status { format } => {
                let report = self.status_report(SystemTime::now())?;
                Ok(match format.as_str() {
                    "json" => format_status_json(&report),
                    _ => format_status_text(&report),
                })
            }
        }
    }

    /// Collect environment status as of `now`.
    pub fn status_report(&self, now: SystemTime) -> Result<StatusReport> {
        let marker = self.env.fetch_marker()?;
        Ok(StatusReport {
            root: self.env.root().display().to_string(),
            commit: self.env.commit(),
            last_fetched: marker.last_fetched().map(|t| t.to_rfc3339()),
            fetch_age_secs: marker.age_at(now).map(|age| age.as_secs()),
            stale: marker.is_stale_at(now, self.env.refresh_config().threshold()),
            opt_out: self.env.refresh_gate().opt_out,
            available_roles: self.env.roles_available()?.len(),
            enabled_roles: self.env.roles_enabled()?.len(),
        })
    }
}
