//! football-data.org v4 API client
//!
//! Fetches league standings and per-team fixtures, authenticating with the
//! X-Auth-Token header and consulting the response cache before every call.

use super::{Match, MatchStatus, Score, Standing, Team};
use crate::cache::CacheStore;
use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

/// Base URL for the football-data.org API
const FOOTBALL_DATA_BASE_URL: &str = "https://api.football-data.org/v4";

/// Header carrying the API key
const AUTH_HEADER: &str = "X-Auth-Token";

/// Time-to-live for cached responses in seconds
///
/// Chosen to match the API's per-minute call quota: a screen re-entered
/// within the window is served from cache instead of burning a call.
const CACHE_TTL_SECS: u64 = 60;

/// Upper bound on a single request before it surfaces as a network error
const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Errors that can occur when talking to the API
#[derive(Debug, Error)]
pub enum ApiError {
    /// The API rejected the key (HTTP 401/403)
    #[error("API key rejected")]
    Auth,

    /// Per-minute call quota exhausted (HTTP 429)
    #[error("API rate limit reached")]
    RateLimited,

    /// Connectivity failure or timeout
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The response body did not match the expected shape
    #[error("unexpected response: {0}")]
    Parse(String),

    /// Any other non-success HTTP status
    #[error("API returned HTTP {0}")]
    Status(u16),
}

/// Client for the football-data.org standings and matches endpoints
///
/// Constructed explicitly from the API key; owns the response cache so the
/// whole fetch context travels as one value instead of ambient globals.
#[derive(Debug)]
pub struct FootballDataClient {
    http_client: Client,
    api_key: String,
    /// Season year to scope requests to; None defers to the API's current season
    season: Option<String>,
    base_url: String,
    cache: CacheStore,
}

impl FootballDataClient {
    /// Creates a client with the default base URL and a 10 second timeout
    pub fn new(api_key: impl Into<String>) -> Result<Self, ApiError> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            http_client,
            api_key: api_key.into(),
            season: None,
            base_url: FOOTBALL_DATA_BASE_URL.to_string(),
            cache: CacheStore::new(),
        })
    }

    /// Scopes all requests to a specific season year
    pub fn with_season(mut self, season: impl Into<String>) -> Self {
        self.season = Some(season.into());
        self
    }

    /// Creates a client pointed at a custom base URL (for testing)
    #[cfg(test)]
    fn with_base_url(api_key: &str, base_url: String) -> Result<Self, ApiError> {
        let mut client = Self::new(api_key)?;
        client.base_url = base_url;
        Ok(client)
    }

    /// Fetches the league table for a competition, ordered by ascending position
    ///
    /// # Arguments
    /// * `league` - Competition code (e.g., "PL")
    ///
    /// # Behavior
    /// Consults the cache first; a fresh entry is returned with no network
    /// call. An expired entry is treated as absent and triggers a re-fetch,
    /// whose result replaces it.
    pub async fn fetch_standings(&mut self, league: &str) -> Result<Vec<Standing>, ApiError> {
        let key = self.cache_key("standings", league);
        if let Some(cached) = self.cache.read::<Vec<Standing>>(&key) {
            if !cached.is_expired {
                return Ok(cached.data);
            }
        }

        let url = format!("{}/competitions/{}/standings", self.base_url, league);
        let body = self.get_body(&url, &self.season_params()).await?;
        let table = parse_standings(&body)?;

        let _ = self.cache.write(&key, &table, CACHE_TTL_SECS);
        Ok(table)
    }

    /// Fetches a team's matches in a competition, ordered by ascending kickoff
    ///
    /// # Arguments
    /// * `team_id` - API identifier of the team
    /// * `competitions` - Competition code to scope the fixture list to
    ///
    /// Same cache behavior and error taxonomy as [`fetch_standings`].
    ///
    /// [`fetch_standings`]: FootballDataClient::fetch_standings
    pub async fn fetch_matches(
        &mut self,
        team_id: u64,
        competitions: &str,
    ) -> Result<Vec<Match>, ApiError> {
        let key = self.cache_key("matches", &format!("{}_{}", team_id, competitions));
        if let Some(cached) = self.cache.read::<Vec<Match>>(&key) {
            if !cached.is_expired {
                return Ok(cached.data);
            }
        }

        let url = format!("{}/teams/{}/matches", self.base_url, team_id);
        let mut params = self.season_params();
        params.push(("competitions", competitions));
        let body = self.get_body(&url, &params).await?;
        let matches = parse_matches(&body)?;

        let _ = self.cache.write(&key, &matches, CACHE_TTL_SECS);
        Ok(matches)
    }

    /// Issues an authenticated GET and returns the response body
    async fn get_body(&self, url: &str, params: &[(&str, &str)]) -> Result<String, ApiError> {
        let response = self
            .http_client
            .get(url)
            .header(AUTH_HEADER, &self.api_key)
            .query(params)
            .send()
            .await?;

        if let Some(err) = error_for_status(response.status()) {
            return Err(err);
        }

        Ok(response.text().await?)
    }

    /// Cache key derived from endpoint, scope, and the configured season
    fn cache_key(&self, endpoint: &str, scope: &str) -> String {
        format!(
            "{}_{}_{}",
            endpoint,
            scope,
            self.season.as_deref().unwrap_or("current")
        )
    }

    /// Query parameters shared by both endpoints
    fn season_params(&self) -> Vec<(&'static str, &str)> {
        match &self.season {
            Some(season) => vec![("season", season.as_str())],
            None => Vec::new(),
        }
    }
}

/// Maps a non-success HTTP status to the matching error, None on success
fn error_for_status(status: StatusCode) -> Option<ApiError> {
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return Some(ApiError::Auth);
    }
    if status == StatusCode::TOO_MANY_REQUESTS {
        return Some(ApiError::RateLimited);
    }
    if !status.is_success() {
        return Some(ApiError::Status(status.as_u16()));
    }
    None
}

/// Parses a standings response body into a position-ordered table
///
/// The endpoint returns one group per table variant (TOTAL, HOME, AWAY);
/// the TOTAL group is the league table.
fn parse_standings(body: &str) -> Result<Vec<Standing>, ApiError> {
    let response: StandingsResponse =
        serde_json::from_str(body).map_err(|e| ApiError::Parse(e.to_string()))?;

    let group = response
        .standings
        .iter()
        .find(|g| g.group_type.as_deref() == Some("TOTAL"))
        .or_else(|| response.standings.first())
        .ok_or_else(|| ApiError::Parse("no standings table in response".to_string()))?;

    let mut table = group.table.clone();
    table.sort_by_key(|s| s.position);
    if table.windows(2).any(|w| w[0].position == w[1].position) {
        return Err(ApiError::Parse(
            "duplicate positions in standings table".to_string(),
        ));
    }

    Ok(table)
}

/// Parses a matches response body into a kickoff-ordered fixture list
fn parse_matches(body: &str) -> Result<Vec<Match>, ApiError> {
    let response: MatchesResponse =
        serde_json::from_str(body).map_err(|e| ApiError::Parse(e.to_string()))?;

    let mut matches: Vec<Match> = response
        .matches
        .into_iter()
        .map(ApiMatch::into_match)
        .collect();
    matches.sort_by_key(|m| m.utc_date);

    Ok(matches)
}

/// Standings endpoint response structure
#[derive(Debug, Deserialize)]
struct StandingsResponse {
    standings: Vec<StandingsGroup>,
}

/// One table variant within a standings response
#[derive(Debug, Deserialize)]
struct StandingsGroup {
    #[serde(rename = "type", default)]
    group_type: Option<String>,
    table: Vec<Standing>,
}

/// Matches endpoint response structure
#[derive(Debug, Deserialize)]
struct MatchesResponse {
    matches: Vec<ApiMatch>,
}

/// A match as it appears on the wire, before score flattening
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiMatch {
    id: u64,
    utc_date: DateTime<Utc>,
    home_team: Team,
    away_team: Team,
    status: MatchStatus,
    #[serde(default)]
    score: Option<ApiScore>,
}

impl ApiMatch {
    /// Flattens the nested wire score into the domain representation
    ///
    /// A Score is produced only when the API reported both full-time goal
    /// counts; scheduled fixtures carry nulls there.
    fn into_match(self) -> Match {
        let score = self
            .score
            .and_then(|s| s.full_time)
            .and_then(|ft| match (ft.home, ft.away) {
                (Some(home), Some(away)) => Some(Score { home, away }),
                _ => None,
            });

        Match {
            id: self.id,
            utc_date: self.utc_date,
            home_team: self.home_team,
            away_team: self.away_team,
            status: self.status,
            score,
        }
    }
}

/// Nested score object from the matches endpoint
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiScore {
    #[serde(default)]
    full_time: Option<ApiScorePair>,
}

/// Goal counts within a score object; null until kickoff
#[derive(Debug, Deserialize)]
struct ApiScorePair {
    #[serde(default)]
    home: Option<u32>,
    #[serde(default)]
    away: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Standings response in the wire shape, table deliberately out of order
    const STANDINGS_RESPONSE: &str = r#"{
        "filters": {"season": "2025"},
        "competition": {"id": 2021, "name": "Premier League", "code": "PL"},
        "season": {"id": 2403, "startDate": "2025-08-15", "endDate": "2026-05-24"},
        "standings": [
            {
                "stage": "REGULAR_SEASON",
                "type": "TOTAL",
                "table": [
                    {
                        "position": 2,
                        "team": {"id": 61, "name": "Chelsea FC", "shortName": "Chelsea", "tla": "CHE", "crest": "https://crests.football-data.org/61.png"},
                        "playedGames": 3,
                        "form": "W,D,W",
                        "won": 2, "draw": 1, "lost": 0,
                        "points": 7,
                        "goalsFor": 6, "goalsAgainst": 2, "goalDifference": 4
                    },
                    {
                        "position": 1,
                        "team": {"id": 57, "name": "Arsenal FC", "shortName": "Arsenal", "tla": "ARS", "crest": "https://crests.football-data.org/57.png"},
                        "playedGames": 3,
                        "form": "W,W,W",
                        "won": 3, "draw": 0, "lost": 0,
                        "points": 9,
                        "goalsFor": 8, "goalsAgainst": 1, "goalDifference": 7
                    },
                    {
                        "position": 3,
                        "team": {"id": 64, "name": "Liverpool FC", "shortName": "Liverpool", "tla": "LIV", "crest": null},
                        "playedGames": 3,
                        "form": null,
                        "won": 2, "draw": 0, "lost": 1,
                        "points": 6,
                        "goalsFor": 5, "goalsAgainst": 6, "goalDifference": -1
                    }
                ]
            },
            {
                "stage": "REGULAR_SEASON",
                "type": "HOME",
                "table": []
            }
        ]
    }"#;

    /// Matches response with one finished and one scheduled fixture,
    /// deliberately out of kickoff order
    const MATCHES_RESPONSE: &str = r#"{
        "filters": {"competitions": "PL"},
        "resultSet": {"count": 2},
        "matches": [
            {
                "id": 500002,
                "utcDate": "2025-08-23T16:30:00Z",
                "status": "TIMED",
                "homeTeam": {"id": 61, "name": "Chelsea FC", "shortName": "Chelsea", "tla": "CHE", "crest": null},
                "awayTeam": {"id": 57, "name": "Arsenal FC", "shortName": "Arsenal", "tla": "ARS", "crest": null},
                "score": {"winner": null, "duration": "REGULAR", "fullTime": {"home": null, "away": null}}
            },
            {
                "id": 500001,
                "utcDate": "2025-08-16T14:00:00Z",
                "status": "FINISHED",
                "homeTeam": {"id": 57, "name": "Arsenal FC", "shortName": "Arsenal", "tla": "ARS", "crest": null},
                "awayTeam": {"id": 64, "name": "Liverpool FC", "shortName": "Liverpool", "tla": "LIV", "crest": null},
                "score": {"winner": "HOME_TEAM", "duration": "REGULAR", "fullTime": {"home": 2, "away": 1}}
            }
        ]
    }"#;

    #[test]
    fn test_parse_standings_orders_by_position() {
        let table = parse_standings(STANDINGS_RESPONSE).expect("should parse");

        assert_eq!(table.len(), 3);
        let positions: Vec<u32> = table.iter().map(|s| s.position).collect();
        assert_eq!(positions, vec![1, 2, 3]);
        assert_eq!(table[0].team.display_name(), "Arsenal");
        assert_eq!(table[2].goal_difference, -1);
        assert_eq!(table[2].form, None);
    }

    #[test]
    fn test_parse_standings_picks_total_group() {
        // The HOME group is empty; picking it by accident would yield no rows
        let table = parse_standings(STANDINGS_RESPONSE).expect("should parse");
        assert!(!table.is_empty());
    }

    #[test]
    fn test_parse_standings_rejects_duplicate_positions() {
        let body = STANDINGS_RESPONSE.replace("\"position\": 2", "\"position\": 1");
        let result = parse_standings(&body);

        assert!(matches!(result, Err(ApiError::Parse(_))));
    }

    #[test]
    fn test_parse_standings_rejects_malformed_body() {
        let result = parse_standings("{\"standings\": \"not a list\"}");
        assert!(matches!(result, Err(ApiError::Parse(_))));
    }

    #[test]
    fn test_parse_matches_orders_by_kickoff() {
        let matches = parse_matches(MATCHES_RESPONSE).expect("should parse");

        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].id, 500001, "Earlier kickoff should come first");
        assert!(matches[0].utc_date < matches[1].utc_date);
    }

    #[test]
    fn test_parse_matches_flattens_full_time_score() {
        let matches = parse_matches(MATCHES_RESPONSE).expect("should parse");

        let finished = &matches[0];
        assert_eq!(finished.status, MatchStatus::Finished);
        assert_eq!(finished.score, Some(Score { home: 2, away: 1 }));

        let scheduled = &matches[1];
        assert_eq!(scheduled.status, MatchStatus::Scheduled);
        assert_eq!(scheduled.score, None, "Null goal counts should yield no score");
    }

    #[test]
    fn test_error_for_status_taxonomy() {
        assert!(matches!(
            error_for_status(StatusCode::UNAUTHORIZED),
            Some(ApiError::Auth)
        ));
        assert!(matches!(
            error_for_status(StatusCode::FORBIDDEN),
            Some(ApiError::Auth)
        ));
        assert!(matches!(
            error_for_status(StatusCode::TOO_MANY_REQUESTS),
            Some(ApiError::RateLimited)
        ));
        assert!(matches!(
            error_for_status(StatusCode::INTERNAL_SERVER_ERROR),
            Some(ApiError::Status(500))
        ));
        assert!(error_for_status(StatusCode::OK).is_none());
    }

    #[test]
    fn test_cache_key_includes_season_scope() {
        let client = FootballDataClient::new("test-key")
            .expect("client should build")
            .with_season("2025");

        assert_eq!(client.cache_key("standings", "PL"), "standings_PL_2025");

        let unscoped = FootballDataClient::new("test-key").expect("client should build");
        assert_eq!(unscoped.cache_key("standings", "PL"), "standings_PL_current");
    }

    #[tokio::test]
    async fn test_fresh_cache_hit_makes_no_network_call() {
        // Base URL points at a closed local port; any network attempt fails
        let mut client =
            FootballDataClient::with_base_url("test-key", "http://127.0.0.1:9".to_string())
                .expect("client should build");

        let table = parse_standings(STANDINGS_RESPONSE).expect("should parse");
        let key = client.cache_key("standings", "PL");
        client.cache.write(&key, &table, 60).expect("seed should succeed");

        let result = client
            .fetch_standings("PL")
            .await
            .expect("fresh cache entry should be served without a network call");
        assert_eq!(result.len(), 3);
    }

    #[tokio::test]
    async fn test_expired_cache_entry_triggers_refetch() {
        let mut client =
            FootballDataClient::with_base_url("test-key", "http://127.0.0.1:9".to_string())
                .expect("client should build");

        let table = parse_standings(STANDINGS_RESPONSE).expect("should parse");
        let key = client.cache_key("standings", "PL");
        client.cache.write(&key, &table, 0).expect("seed should succeed");
        tokio::time::sleep(Duration::from_millis(10)).await;

        // The failing network attempt proves the expired entry was ignored
        let result = client.fetch_standings("PL").await;
        assert!(matches!(result, Err(ApiError::Network(_))));
    }

    #[tokio::test]
    async fn test_matches_cache_hit_makes_no_network_call() {
        let mut client =
            FootballDataClient::with_base_url("test-key", "http://127.0.0.1:9".to_string())
                .expect("client should build");

        let matches = parse_matches(MATCHES_RESPONSE).expect("should parse");
        let key = client.cache_key("matches", "57_PL");
        client.cache.write(&key, &matches, 60).expect("seed should succeed");

        let result = client
            .fetch_matches(57, "PL")
            .await
            .expect("fresh cache entry should be served without a network call");
        assert_eq!(result.len(), 2);
    }
}
