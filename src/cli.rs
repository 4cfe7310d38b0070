//! Command-line interface parsing for the Touchline TUI
//!
//! This module handles parsing of CLI arguments using clap: the competition
//! code, an optional season year, and the initial fixture filter mode.

use clap::Parser;
use thiserror::Error;

use crate::data::MatchFilter;

/// Error types for CLI argument parsing
#[derive(Debug, Error)]
pub enum CliError {
    /// The specified filter name is not recognized
    #[error("Invalid filter: '{0}'. Valid filters: unplayed, played, all")]
    InvalidFilter(String),
}

/// Touchline - football league standings and fixtures in the terminal
#[derive(Parser, Debug)]
#[command(name = "touchline")]
#[command(about = "Football league standings and fixtures in the terminal")]
#[command(version)]
pub struct Cli {
    /// Competition code to show the table for
    ///
    /// Examples:
    ///   touchline                  # Premier League
    ///   touchline --league BL1     # Bundesliga
    #[arg(long, value_name = "CODE", default_value = "PL")]
    pub league: String,

    /// Season start year (e.g., 2025); omit for the current season
    #[arg(long, value_name = "YEAR")]
    pub season: Option<String>,

    /// Initial fixture filter mode: unplayed, played, or all
    #[arg(long, value_name = "MODE")]
    pub filter: Option<String>,
}

/// Configuration derived from CLI arguments for application startup
#[derive(Debug, Clone)]
pub struct StartupConfig {
    /// Competition code (e.g., "PL")
    pub league: String,
    /// Season year to scope requests to, when specified
    pub season: Option<String>,
    /// Filter mode the matches screen opens with
    pub initial_filter: MatchFilter,
}

impl Default for StartupConfig {
    fn default() -> Self {
        Self {
            league: "PL".to_string(),
            season: None,
            initial_filter: MatchFilter::default(),
        }
    }
}

/// Parses a filter string argument into a MatchFilter.
///
/// # Arguments
/// * `s` - The filter string from CLI
///
/// # Returns
/// * `Ok(MatchFilter)` if the string matches a valid filter mode
/// * `Err(CliError::InvalidFilter)` if the string doesn't match
pub fn parse_filter_arg(s: &str) -> Result<MatchFilter, CliError> {
    MatchFilter::from_str(s).ok_or_else(|| CliError::InvalidFilter(s.to_string()))
}

impl StartupConfig {
    /// Creates a StartupConfig from parsed CLI arguments.
    ///
    /// # Returns
    /// * `Ok(StartupConfig)` with appropriate settings
    /// * `Err(CliError)` if an invalid filter mode was specified
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        let initial_filter = match &cli.filter {
            None => MatchFilter::default(),
            Some(mode) => parse_filter_arg(mode)?,
        };

        Ok(StartupConfig {
            league: cli.league.clone(),
            season: cli.season.clone(),
            initial_filter,
        })
    }
}
