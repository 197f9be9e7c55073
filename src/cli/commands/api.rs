use crate::config::{ApiPaths, AppConfig, DEFAULT_API_BASE_URL, default_session_file};
use anyhow::{Result, anyhow};
use clap::{Arg, ArgMatches, Command};
use std::{path::PathBuf, time::Duration};

pub const ARG_API_URL: &str = "api-url";
pub const ARG_TIMEOUT_SECONDS: &str = "timeout-seconds";
pub const ARG_API_PATHS: &str = "api-paths";
pub const ARG_SESSION_FILE: &str = "session-file";

#[derive(Debug, Clone)]
pub struct Options {
    pub api_url: String,
    pub timeout_seconds: u64,
    pub api_paths: String,
    pub session_file: Option<PathBuf>,
}

impl Options {
    /// Parse connection arguments from matches.
    ///
    /// # Errors
    /// Returns an error if required arguments are missing.
    pub fn parse(matches: &ArgMatches) -> Result<Self> {
        let api_url = matches
            .get_one::<String>(ARG_API_URL)
            .cloned()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| anyhow!("missing required argument: --{ARG_API_URL}"))?;

        Ok(Self {
            api_url,
            timeout_seconds: matches
                .get_one::<u64>(ARG_TIMEOUT_SECONDS)
                .copied()
                .unwrap_or(crate::config::DEFAULT_TIMEOUT_SECS),
            api_paths: matches
                .get_one::<String>(ARG_API_PATHS)
                .cloned()
                .unwrap_or_else(|| "latest".to_string()),
            session_file: matches
                .get_one::<String>(ARG_SESSION_FILE)
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from),
        })
    }

    /// Build the client configuration.
    ///
    /// # Errors
    /// Returns an error if the base URL is invalid, the timeout is zero or the
    /// path convention is unknown.
    pub fn into_config(self) -> Result<AppConfig> {
        if self.timeout_seconds == 0 {
            return Err(anyhow!("--{ARG_TIMEOUT_SECONDS} must be greater than zero"));
        }
        let paths = ApiPaths::by_name(&self.api_paths).ok_or_else(|| {
            anyhow!(
                "unknown --{ARG_API_PATHS} value '{}', expected latest or legacy",
                self.api_paths
            )
        })?;

        Ok(AppConfig::new(&self.api_url)?
            .with_timeout(Duration::from_secs(self.timeout_seconds))
            .with_paths(paths)
            .with_session_file(self.session_file.unwrap_or_else(default_session_file)))
    }
}

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_API_URL)
                .long(ARG_API_URL)
                .help("Base URL of the listing platform API")
                .env("ESTATE_ADMIN_API_URL")
                .default_value(DEFAULT_API_BASE_URL)
                .global(true),
        )
        .arg(
            Arg::new(ARG_TIMEOUT_SECONDS)
                .long(ARG_TIMEOUT_SECONDS)
                .help("Request timeout in seconds")
                .env("ESTATE_ADMIN_TIMEOUT_SECONDS")
                .default_value("10")
                .value_parser(clap::value_parser!(u64))
                .global(true),
        )
        .arg(
            Arg::new(ARG_API_PATHS)
                .long(ARG_API_PATHS)
                .help("Endpoint path convention of the backend")
                .env("ESTATE_ADMIN_API_PATHS")
                .value_parser(["latest", "legacy"])
                .default_value("latest")
                .global(true),
        )
        .arg(
            Arg::new(ARG_SESSION_FILE)
                .long(ARG_SESSION_FILE)
                .help("Where the login session is persisted (default: user config dir)")
                .env("ESTATE_ADMIN_SESSION_FILE")
                .global(true),
        )
}
