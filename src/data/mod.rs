//! Core data models for the Touchline TUI
//!
//! This module contains the data types used throughout the application for
//! representing teams, league standings, and fixtures, plus the filter
//! policy applied to a team's match list.

pub mod football_data;

pub use football_data::{ApiError, FootballDataClient};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A football club as returned by the standings and matches endpoints
///
/// Immutable once fetched; a fresh set of teams is built on every fetch.
/// `short_name`, `tla` and `crest` are nullable on the wire, so they are
/// optional here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    /// Unique identifier assigned by the API
    pub id: u64,
    /// Full club name (e.g., "Arsenal FC")
    pub name: String,
    /// Shorter display name (e.g., "Arsenal")
    #[serde(default)]
    pub short_name: Option<String>,
    /// Three-letter abbreviation (e.g., "ARS")
    #[serde(default)]
    pub tla: Option<String>,
    /// URL of the club crest image
    #[serde(default)]
    pub crest: Option<String>,
}

impl Team {
    /// Name used in table rows: the short name when the API provides one
    pub fn display_name(&self) -> &str {
        self.short_name.as_deref().unwrap_or(&self.name)
    }
}

/// One row of the league table
///
/// Positions are unique within a fetch; the position-ordered sequence of
/// standings is the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Standing {
    /// Rank in the table, 1..N
    pub position: u32,
    /// The club this row is for
    pub team: Team,
    /// Games played so far
    pub played_games: u32,
    /// Recent results string (e.g., "W,W,D,L,W"), when the API provides it
    #[serde(default)]
    pub form: Option<String>,
    /// Wins
    pub won: u32,
    /// Draws
    pub draw: u32,
    /// Losses
    pub lost: u32,
    /// Points total
    pub points: u32,
    /// Goals scored
    pub goals_for: u32,
    /// Goals conceded
    pub goals_against: u32,
    /// Goal difference, may be negative
    pub goal_difference: i32,
}

/// Lifecycle status of a fixture
///
/// Wire values not listed in the variants are folded into the closest one:
/// TIMED means scheduled with a confirmed kickoff, PAUSED is a half-time
/// interval, SUSPENDED fixtures are expected to resume later, and AWARDED
/// results are final.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchStatus {
    /// Not yet kicked off
    #[serde(rename = "SCHEDULED", alias = "TIMED")]
    Scheduled,
    /// Currently being played
    #[serde(rename = "IN_PLAY", alias = "PAUSED")]
    InPlay,
    /// Full time, result available
    #[serde(rename = "FINISHED", alias = "AWARDED")]
    Finished,
    /// Pushed to a later date
    #[serde(rename = "POSTPONED", alias = "SUSPENDED")]
    Postponed,
    /// Will not be played
    #[serde(rename = "CANCELLED")]
    Cancelled,
}

/// Full-time score of a match
///
/// Present only once the match has started; both goal counts are reported
/// from the home/away orientation of the fixture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    /// Goals scored by the home side
    pub home: u32,
    /// Goals scored by the away side
    pub away: u32,
}

/// A scheduled or completed game between two clubs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    /// Unique identifier assigned by the API
    pub id: u64,
    /// Kickoff timestamp in UTC
    pub utc_date: DateTime<Utc>,
    /// Home side
    pub home_team: Team,
    /// Away side
    pub away_team: Team,
    /// Current fixture status
    pub status: MatchStatus,
    /// Full-time score, when the match has started or finished
    #[serde(default)]
    pub score: Option<Score>,
}

/// Visibility filter applied to a team's match list
///
/// In-play and cancelled matches appear under `All` only: a live match has
/// no final result to show under `Played`, and neither it nor a cancelled
/// fixture is something to plan around under `Unplayed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchFilter {
    /// Matches still expected to produce a result: scheduled and postponed
    Unplayed,
    /// Matches with a final result: finished
    Played,
    /// Everything the API returned, in original order
    #[default]
    All,
}

impl MatchFilter {
    /// Whether a match with the given status is visible under this filter
    pub fn admits(&self, status: MatchStatus) -> bool {
        match self {
            MatchFilter::Unplayed => {
                matches!(status, MatchStatus::Scheduled | MatchStatus::Postponed)
            }
            MatchFilter::Played => matches!(status, MatchStatus::Finished),
            MatchFilter::All => true,
        }
    }

    /// Returns the visible subset of `matches`, preserving their order
    pub fn apply<'a>(&self, matches: &'a [Match]) -> Vec<&'a Match> {
        matches.iter().filter(|m| self.admits(m.status)).collect()
    }

    /// Parses a filter name as accepted on the command line
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "unplayed" | "upcoming" => Some(MatchFilter::Unplayed),
            "played" | "results" => Some(MatchFilter::Played),
            "all" => Some(MatchFilter::All),
            _ => None,
        }
    }

    /// Label shown in the matches screen header and help line
    pub fn label(&self) -> &'static str {
        match self {
            MatchFilter::Unplayed => "unplayed",
            MatchFilter::Played => "played",
            MatchFilter::All => "all",
        }
    }
}
