use crate::gateway::config::DEFAULT_BASE_URL;
use clap::{Arg, Command};

pub const ARG_API_URL: &str = "api-url";
pub const ARG_SESSION_FILE: &str = "session-file";
pub const ARG_TIMEOUT: &str = "timeout";

/// Seconds, kept in line with `config::DEFAULT_TIMEOUT`.
pub const DEFAULT_TIMEOUT_SECS: &str = "10";

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_API_URL)
                .long(ARG_API_URL)
                .help("Base URL of the tracker API")
                .env("TRACKER_API_URL")
                .default_value(DEFAULT_BASE_URL)
                .global(true),
        )
        .arg(
            Arg::new(ARG_SESSION_FILE)
                .long(ARG_SESSION_FILE)
                .help("File holding the access and refresh tokens")
                .long_help(
                    "File holding the access and refresh tokens. Defaults to tracker-client/session.json under the user config directory.",
                )
                .env("TRACKER_SESSION_FILE")
                .global(true),
        )
        .arg(
            Arg::new(ARG_TIMEOUT)
                .long(ARG_TIMEOUT)
                .help("Request timeout in seconds")
                .env("TRACKER_TIMEOUT")
                .default_value(DEFAULT_TIMEOUT_SECS)
                .global(true)
                .value_parser(clap::value_parser!(u64).range(1..)),
        )
}
