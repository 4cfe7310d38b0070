//! Application state management for the Touchline TUI
//!
//! This module contains the screen stack, keyboard input handling, data
//! loading, and the transitions between the standings and matches screens.

use chrono::{DateTime, Local};
use crossterm::event::{KeyCode, KeyEvent};

use crate::cli::StartupConfig;
use crate::data::{ApiError, FootballDataClient, Match, MatchFilter, Standing, Team};

/// View state for one screen on the navigation stack
#[derive(Debug, Clone, PartialEq)]
pub enum Screen {
    /// The league table with a cursor over its rows
    Standings { cursor: usize },
    /// One team's fixture list with its filter and cursor state
    Matches {
        team: Team,
        matches: Vec<Match>,
        filter: MatchFilter,
        cursor: usize,
    },
}

/// Navigation stack of screens
///
/// The standings screen is pushed at construction and is never removable;
/// selecting a team while a matches screen is already showing replaces the
/// top instead of growing the stack, so depth never exceeds 2.
#[derive(Debug)]
pub struct ScreenStack {
    screens: Vec<Screen>,
}

impl ScreenStack {
    /// Creates a stack with the standings screen as its sole element
    pub fn new() -> Self {
        Self {
            screens: vec![Screen::Standings { cursor: 0 }],
        }
    }

    /// The screen currently shown
    pub fn top(&self) -> &Screen {
        // The constructor seeds one screen and pop() refuses to remove it
        self.screens.last().expect("screen stack is never empty")
    }

    /// Mutable access to the screen currently shown
    pub fn top_mut(&mut self) -> &mut Screen {
        self.screens.last_mut().expect("screen stack is never empty")
    }

    /// Pushes a matches screen, replacing the top if one is already showing
    pub fn push_matches(&mut self, screen: Screen) {
        if matches!(self.screens.last(), Some(Screen::Matches { .. })) {
            self.screens.pop();
        }
        self.screens.push(screen);
    }

    /// Pops the top screen; returns false (and does nothing) at the bottom
    pub fn pop(&mut self) -> bool {
        if self.screens.len() > 1 {
            self.screens.pop();
            true
        } else {
            false
        }
    }

    /// Current stack depth
    #[allow(dead_code)]
    pub fn depth(&self) -> usize {
        self.screens.len()
    }
}

impl Default for ScreenStack {
    fn default() -> Self {
        Self::new()
    }
}

/// A fetch the main loop should run on behalf of the last key press
///
/// Key handling stays synchronous and testable; the event loop executes
/// whatever action it returns.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Nothing to do
    None,
    /// Fetch the team's fixtures and push the matches screen
    OpenTeam(Team),
    /// Re-request the current screen's data
    Refresh,
}

/// Main application struct managing state and data
pub struct App {
    /// Navigation stack; the top screen is rendered
    pub stack: ScreenStack,
    /// Current league table, replaced wholesale on each successful fetch
    pub standings: Vec<Standing>,
    /// Competition code requests are scoped to
    pub league: String,
    /// Inline notice from the last failed fetch, cleared on success
    pub notice: Option<String>,
    /// Flag indicating the application should quit
    pub should_quit: bool,
    /// Flag to show the help overlay
    pub show_help: bool,
    /// Timestamp of the last successful fetch
    pub last_refresh: Option<DateTime<Local>>,
    /// Filter mode a freshly opened matches screen starts with
    pub initial_filter: MatchFilter,
    /// API client, owns the response cache
    client: FootballDataClient,
}

impl App {
    /// Creates a new App from startup configuration and a constructed client
    pub fn new(config: StartupConfig, client: FootballDataClient) -> Self {
        Self {
            stack: ScreenStack::new(),
            standings: Vec::new(),
            league: config.league,
            notice: None,
            should_quit: false,
            show_help: false,
            last_refresh: None,
            initial_filter: config.initial_filter,
            client,
        }
    }

    /// Loads the league table; called once before the UI starts
    ///
    /// Failure here is fatal to the caller: nothing useful can be rendered
    /// without the table. Later fetch failures surface as notices instead.
    pub async fn load_standings(&mut self) -> Result<(), ApiError> {
        self.standings = self.client.fetch_standings(&self.league).await?;
        self.last_refresh = Some(Local::now());
        Ok(())
    }

    /// The standing row under the cursor, when the standings screen is on top
    #[allow(dead_code)]
    pub fn selected_standing(&self) -> Option<&Standing> {
        match self.stack.top() {
            Screen::Standings { cursor } => self.standings.get(*cursor),
            Screen::Matches { .. } => None,
        }
    }

    /// Handles keyboard input and updates state accordingly
    ///
    /// # Key Bindings
    /// - `q`: Quit the application from any screen
    /// - `?`: Toggle the help overlay (intercepts all keys while shown)
    /// - `r`: Re-request the current screen's data
    /// - `Up`/`k`, `Down`/`j`: Move the cursor, wrapping at both ends
    /// - `Enter` (standings): Open the highlighted team's fixtures
    /// - `Esc` (matches): Go back to the standings screen
    /// - `Esc` (standings): No-op; the bottom screen is never popped
    /// - `u`/`p`/`a` (matches): Filter to unplayed / played / all fixtures
    /// - `g`/`G` (matches): Jump to the first / last visible row
    pub fn handle_key(&mut self, key_event: KeyEvent) -> Action {
        // Help overlay intercepts all keys when shown
        if self.show_help {
            match key_event.code {
                KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') => {
                    self.show_help = false;
                }
                _ => {}
            }
            return Action::None;
        }

        match key_event.code {
            KeyCode::Char('q') => {
                self.should_quit = true;
                return Action::None;
            }
            KeyCode::Char('?') => {
                self.show_help = true;
                return Action::None;
            }
            KeyCode::Char('r') => {
                return Action::Refresh;
            }
            _ => {}
        }

        match self.stack.top() {
            Screen::Standings { .. } => self.handle_standings_key(key_event),
            Screen::Matches { .. } => self.handle_matches_key(key_event),
        }
    }

    /// Key handling for the standings screen
    fn handle_standings_key(&mut self, key_event: KeyEvent) -> Action {
        let count = self.standings.len();
        let Screen::Standings { cursor } = self.stack.top_mut() else {
            return Action::None;
        };

        match key_event.code {
            KeyCode::Up | KeyCode::Char('k') => {
                *cursor = wrap_up(*cursor, count);
                Action::None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                *cursor = wrap_down(*cursor, count);
                Action::None
            }
            KeyCode::Enter => {
                let index = *cursor;
                self.standings
                    .get(index)
                    .map(|row| Action::OpenTeam(row.team.clone()))
                    .unwrap_or(Action::None)
            }
            _ => Action::None,
        }
    }

    /// Key handling for the matches screen
    fn handle_matches_key(&mut self, key_event: KeyEvent) -> Action {
        if key_event.code == KeyCode::Esc {
            self.stack.pop();
            return Action::None;
        }

        let Screen::Matches {
            matches,
            filter,
            cursor,
            ..
        } = self.stack.top_mut()
        else {
            return Action::None;
        };

        // Two rendered rows per visible match, one per perspective
        let row_count = 2 * filter.apply(matches).len();

        match key_event.code {
            KeyCode::Up | KeyCode::Char('k') => {
                *cursor = wrap_up(*cursor, row_count);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                *cursor = wrap_down(*cursor, row_count);
            }
            KeyCode::Char('u') => {
                *filter = MatchFilter::Unplayed;
                *cursor = 0;
            }
            KeyCode::Char('p') => {
                *filter = MatchFilter::Played;
                *cursor = 0;
            }
            KeyCode::Char('a') => {
                *filter = MatchFilter::All;
                *cursor = 0;
            }
            KeyCode::Char('g') => {
                *cursor = 0;
            }
            KeyCode::Char('G') => {
                *cursor = row_count.saturating_sub(1);
            }
            _ => {}
        }
        Action::None
    }

    /// Executes the action returned by [`handle_key`]
    ///
    /// [`handle_key`]: App::handle_key
    pub async fn run_action(&mut self, action: Action) {
        match action {
            Action::None => {}
            Action::OpenTeam(team) => self.open_team(team).await,
            Action::Refresh => self.refresh().await,
        }
    }

    /// Fetches a team's fixtures and pushes (or replaces) the matches screen
    async fn open_team(&mut self, team: Team) {
        match self.client.fetch_matches(team.id, &self.league).await {
            Ok(matches) => {
                self.notice = None;
                self.last_refresh = Some(Local::now());
                self.stack.push_matches(Screen::Matches {
                    team,
                    matches,
                    filter: self.initial_filter,
                    cursor: 0,
                });
            }
            Err(err) => {
                self.notice = Some(notice_for(&err));
            }
        }
    }

    /// Re-requests the data behind the current screen
    ///
    /// Within the cache TTL this is served from memory, which keeps manual
    /// refresh inside the API quota.
    async fn refresh(&mut self) {
        let team = match self.stack.top() {
            Screen::Standings { .. } => None,
            Screen::Matches { team, .. } => Some(team.clone()),
        };

        match team {
            None => match self.client.fetch_standings(&self.league).await {
                Ok(table) => {
                    self.standings = table;
                    self.last_refresh = Some(Local::now());
                    self.notice = None;
                }
                Err(err) => {
                    self.notice = Some(notice_for(&err));
                }
            },
            Some(team) => match self.client.fetch_matches(team.id, &self.league).await {
                Ok(new_matches) => {
                    if let Screen::Matches { matches, cursor, .. } = self.stack.top_mut() {
                        *matches = new_matches;
                        *cursor = 0;
                    }
                    self.last_refresh = Some(Local::now());
                    self.notice = None;
                }
                Err(err) => {
                    self.notice = Some(notice_for(&err));
                }
            },
        }
    }
}

/// Moves a cursor up with wrap-around
fn wrap_up(cursor: usize, count: usize) -> usize {
    if count == 0 {
        0
    } else if cursor == 0 {
        count - 1
    } else {
        cursor - 1
    }
}

/// Moves a cursor down with wrap-around
fn wrap_down(cursor: usize, count: usize) -> usize {
    if count == 0 {
        0
    } else {
        (cursor + 1) % count
    }
}

/// User-facing notice text for a failed fetch
pub fn notice_for(err: &ApiError) -> String {
    match err {
        ApiError::Auth => "API key rejected - restart with a valid FOOTBALL_API_KEY".to_string(),
        ApiError::RateLimited => "Rate limit reached - wait a minute and try again".to_string(),
        ApiError::Network(_) => "Network error - check your connection and retry".to_string(),
        ApiError::Parse(_) => "Unexpected response from the API".to_string(),
        ApiError::Status(code) => format!("API returned HTTP {}", code),
    }
}
