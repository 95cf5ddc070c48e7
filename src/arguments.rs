/// Command-line arguments
///
/// Two run modes:
/// - serve (default): HTTP host on the configured address
/// - invoke: `--event <path|->` runs a single event and prints the envelope
use crate::logger::{LogLevel, LoggerConfig};
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "trade-relay", version, about = "Validate trade instructions and relay them to the brokerage")]
pub struct Arguments {
    /// Path to the TOML configuration file
    #[arg(long, default_value = crate::config::CONFIG_FILE_PATH)]
    pub config: PathBuf,

    /// Run a single event (JSON file, or '-' for stdin) and print the response envelope
    #[arg(long, value_name = "PATH")]
    pub event: Option<String>,

    /// Request id for --event mode (defaults to a random UUID)
    #[arg(long, value_name = "ID", requires = "event")]
    pub request_id: Option<String>,

    /// Override the configured bind port
    #[arg(long)]
    pub port: Option<u16>,

    /// Only log errors
    #[arg(
        long,
        conflicts_with_all = [
            "verbose",
            "debug_request",
            "debug_broker",
            "debug_executor",
            "debug_handler",
            "debug_webserver",
            "debug_config",
        ]
    )]
    pub quiet: bool,

    /// Log raw payloads (all tags)
    #[arg(long)]
    pub verbose: bool,

    /// Disable colored log output
    #[arg(long)]
    pub no_color: bool,

    /// Debug output for event normalization
    #[arg(long)]
    pub debug_request: bool,

    /// Debug output for brokerage calls
    #[arg(long)]
    pub debug_broker: bool,

    /// Debug output for trade execution
    #[arg(long)]
    pub debug_executor: bool,

    /// Debug output for the invocation handler
    #[arg(long)]
    pub debug_handler: bool,

    /// Debug output for the HTTP host
    #[arg(long)]
    pub debug_webserver: bool,

    /// Debug output for configuration loading
    #[arg(long)]
    pub debug_config: bool,
}

impl Arguments {
    pub fn is_invoke_mode(&self) -> bool {
        self.event.is_some()
    }

    /// Debug keys of every --debug-<tag> flag that was set
    pub fn debug_tags(&self) -> Vec<&'static str> {
        [
            (self.debug_request, "request"),
            (self.debug_broker, "broker"),
            (self.debug_executor, "executor"),
            (self.debug_handler, "handler"),
            (self.debug_webserver, "webserver"),
            (self.debug_config, "config"),
        ]
        .into_iter()
        .filter(|(enabled, _)| *enabled)
        .map(|(_, tag)| tag)
        .collect()
    }

    /// Logger settings implied by the flags
    ///
    /// Invoke mode logs to stderr so stdout carries only the envelope.
    pub fn logger_config(&self) -> LoggerConfig {
        let min_level = if self.quiet {
            LogLevel::Error
        } else if self.verbose {
            LogLevel::Verbose
        } else {
            LogLevel::Info
        };

        LoggerConfig {
            min_level,
            debug_tags: self.debug_tags().into_iter().map(String::from).collect(),
            use_stderr: self.is_invoke_mode(),
            colored: !self.no_color,
            ..LoggerConfig::default()
        }
    }
}
