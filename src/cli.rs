//! Command-line argument parsing.
//!
//! Uses clap to parse the database location, config file, and output options.

use crate::config::{Config, DatabaseConfig};
use crate::error::Result;
use clap::Parser;
use std::path::PathBuf;

/// Output format for flight listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// One line per flight.
    #[default]
    Text,
    /// A JSON array of row objects.
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("Invalid output format: {s}. Expected: text or json")),
        }
    }
}

/// Query a flight-delay dataset and chart the results.
#[derive(Parser, Debug)]
#[command(name = "flights")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// SQLite database path or URI (e.g., sqlite:///flights.sqlite3)
    #[arg(value_name = "DATABASE")]
    pub database: Option<String>,

    /// Use named database from config
    #[arg(short = 'c', long, value_name = "NAME")]
    pub database_name: Option<String>,

    /// Config file path
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Render charts as text in the console instead of full-screen
    #[arg(long)]
    pub text_charts: bool,

    /// Output format for flight listings
    #[arg(long, value_name = "FORMAT", default_value = "text")]
    pub output: String,

    /// Write logs to stderr instead of the log file
    #[arg(long)]
    pub log_stderr: bool,
}

impl Cli {
    /// Parses command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Converts the positional database argument to a DatabaseConfig.
    pub fn to_database_config(&self) -> Result<Option<DatabaseConfig>> {
        self.database
            .as_deref()
            .map(DatabaseConfig::from_uri)
            .transpose()
    }

    /// Returns the config file path to use.
    ///
    /// Uses the --config argument if provided, otherwise the default path.
    pub fn config_path(&self) -> PathBuf {
        self.config.clone().unwrap_or_else(Config::default_path)
    }

    /// Returns the named database to use, if specified.
    pub fn database_name(&self) -> Option<&str> {
        self.database_name.as_deref()
    }

    /// Parses the output format from the --output argument.
    pub fn parse_output_format(&self) -> std::result::Result<OutputFormat, String> {
        self.output.parse()
    }
}
