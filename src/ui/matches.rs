//! Matches screen rendering
//!
//! Renders one team's fixture list under the active filter. Each visible
//! match produces two rows, one per side's perspective: the perspective
//! club, its opponent, a home/away indicator, the kickoff date, and the
//! score oriented to that club when available.

use chrono::{DateTime, Local, Utc};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::{App, Screen};
use crate::data::{Match, MatchStatus};

/// Width of the club and opponent columns
const CLUB_WIDTH: usize = 16;

/// Which side of the fixture a row is rendered from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Venue {
    Home,
    Away,
}

impl Venue {
    /// Single-character indicator shown in the venue column
    pub fn indicator(&self) -> &'static str {
        match self {
            Venue::Home => "H",
            Venue::Away => "A",
        }
    }
}

/// One rendered row of the matches table
#[derive(Debug, Clone, PartialEq)]
pub struct MatchRow {
    /// The club this row is seen from
    pub club: String,
    /// The other side of the fixture
    pub opponent: String,
    /// Whether the perspective club plays at home or away
    pub venue: Venue,
    /// Kickoff timestamp in UTC
    pub kickoff: DateTime<Utc>,
    /// Fixture status
    pub status: MatchStatus,
    /// (for, against) goals from the perspective club's side, when available
    pub score: Option<(u32, u32)>,
}

/// Expands each match into its two perspective rows, home side first
pub fn match_rows(visible: &[&Match]) -> Vec<MatchRow> {
    let mut rows = Vec::with_capacity(visible.len() * 2);

    for m in visible {
        rows.push(MatchRow {
            club: m.home_team.display_name().to_string(),
            opponent: m.away_team.display_name().to_string(),
            venue: Venue::Home,
            kickoff: m.utc_date,
            status: m.status,
            score: m.score.map(|s| (s.home, s.away)),
        });
        rows.push(MatchRow {
            club: m.away_team.display_name().to_string(),
            opponent: m.home_team.display_name().to_string(),
            venue: Venue::Away,
            kickoff: m.utc_date,
            status: m.status,
            score: m.score.map(|s| (s.away, s.home)),
        });
    }

    rows
}

/// Renders the matches screen
///
/// # Arguments
/// * `frame` - The ratatui Frame to render to
/// * `app` - The application state; the top screen must be Matches
pub fn render(frame: &mut Frame, app: &App) {
    let Screen::Matches {
        team,
        matches,
        filter,
        cursor,
    } = app.stack.top()
    else {
        return;
    };

    let area = frame.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(3),    // Fixture rows
            Constraint::Length(1), // Help text
        ])
        .split(area);

    let visible = filter.apply(matches);
    let rows = match_rows(&visible);

    render_header(frame, chunks[0], team.display_name(), visible.len(), filter.label());
    render_rows(frame, chunks[1], &rows, *cursor, team.display_name());
    render_help(frame, chunks[2], app);
}

/// Renders the title bar with the team name and active filter
fn render_header(frame: &mut Frame, area: Rect, team_name: &str, count: usize, filter_label: &str) {
    let width = area.width as usize;
    let separator = "─".repeat(width.saturating_sub(2));

    let lines = vec![
        Line::from(vec![
            Span::styled(
                team_name.to_string(),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  {} fixtures", count),
                Style::default().fg(Color::White),
            ),
        ]),
        Line::from(Span::styled(separator, Style::default().fg(Color::DarkGray))),
        Line::from(Span::styled(
            format!("filter: {}", filter_label),
            Style::default().fg(Color::Gray),
        )),
    ];

    frame.render_widget(Paragraph::new(lines), area);
}

/// Renders the fixture rows, keeping the cursor inside the viewport
fn render_rows(frame: &mut Frame, area: Rect, rows: &[MatchRow], cursor: usize, team_name: &str) {
    let viewport = area.height.saturating_sub(2) as usize;
    let offset = if viewport == 0 {
        0
    } else {
        cursor.saturating_sub(viewport - 1)
    };

    let mut lines: Vec<Line> = Vec::with_capacity(viewport);

    if rows.is_empty() {
        lines.push(Line::from(Span::styled(
            "No matches under this filter",
            Style::default().fg(Color::DarkGray),
        )));
    }

    for (index, row) in rows.iter().enumerate().skip(offset).take(viewport) {
        let is_selected = index == cursor;
        let marker = if is_selected { "\u{25B8} " } else { "  " }; // ▸ or space

        let club_style = if is_selected {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };

        let venue_color = match row.venue {
            Venue::Home => Color::Green,
            Venue::Away => Color::Blue,
        };

        let date_str = row
            .kickoff
            .with_timezone(&Local)
            .format("%a %b %d")
            .to_string();

        let (result, result_color) = result_cell(row);

        lines.push(Line::from(vec![
            Span::styled(marker, Style::default().fg(Color::Cyan)),
            Span::styled(date_str, Style::default().fg(Color::Gray)),
            Span::raw("  "),
            Span::styled(row.venue.indicator(), Style::default().fg(venue_color)),
            Span::raw("  "),
            Span::styled(format!("{:<width$}", row.club, width = CLUB_WIDTH), club_style),
            Span::styled(" vs ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{:<width$}", row.opponent, width = CLUB_WIDTH),
                Style::default().fg(Color::White),
            ),
            Span::raw(" "),
            Span::styled(result, Style::default().fg(result_color)),
        ]));
    }

    let block = Block::default()
        .title(format!(" {} Fixtures ", team_name))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Result column: perspective score when available, otherwise status
fn result_cell(row: &MatchRow) -> (String, Color) {
    match row.status {
        MatchStatus::Finished => match row.score {
            Some((for_goals, against_goals)) => {
                let color = if for_goals > against_goals {
                    Color::Green
                } else if for_goals < against_goals {
                    Color::Red
                } else {
                    Color::Yellow
                };
                (format!("{}-{}", for_goals, against_goals), color)
            }
            None => ("-".to_string(), Color::Gray),
        },
        MatchStatus::InPlay => match row.score {
            Some((for_goals, against_goals)) => {
                (format!("{}-{} LIVE", for_goals, against_goals), Color::Green)
            }
            None => ("LIVE".to_string(), Color::Green),
        },
        MatchStatus::Scheduled => (
            row.kickoff.with_timezone(&Local).format("%H:%M").to_string(),
            Color::Gray,
        ),
        MatchStatus::Postponed => ("PP".to_string(), Color::Yellow),
        MatchStatus::Cancelled => ("CANC".to_string(), Color::Red),
    }
}

/// Renders the help text at the bottom of the screen
fn render_help(frame: &mut Frame, area: Rect, app: &App) {
    let mut help_spans = vec![
        Span::styled("↑/↓", Style::default().fg(Color::Yellow)),
        Span::raw(" Navigate  "),
        Span::styled("u/p/a", Style::default().fg(Color::Yellow)),
        Span::raw(" Filter  "),
        Span::styled("Esc", Style::default().fg(Color::Yellow)),
        Span::raw(" Back  "),
        Span::styled("r", Style::default().fg(Color::Yellow)),
        Span::raw(" Refresh  "),
        Span::styled("q", Style::default().fg(Color::Yellow)),
        Span::raw(" Quit"),
    ];

    if let Some(notice) = &app.notice {
        help_spans.push(Span::styled(
            format!(" │ {}", notice),
            Style::default().fg(Color::Red),
        ));
    }

    let paragraph = Paragraph::new(Line::from(help_spans)).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use ratatui::{backend::TestBackend, Terminal};

    use crate::cli::StartupConfig;
    use crate::data::{FootballDataClient, MatchFilter, Score, Team};

    fn team(id: u64, name: &str) -> Team {
        Team {
            id,
            name: format!("{} FC", name),
            short_name: Some(name.to_string()),
            tla: None,
            crest: None,
        }
    }

    fn fixture(id: u64, status: MatchStatus, score: Option<(u32, u32)>) -> Match {
        Match {
            id,
            utc_date: Utc.with_ymd_and_hms(2025, 8, 16, 14, 0, 0).unwrap(),
            home_team: team(57, "Arsenal"),
            away_team: team(61, "Chelsea"),
            status,
            score: score.map(|(home, away)| Score { home, away }),
        }
    }

    #[test]
    fn test_match_rows_two_per_match_home_first() {
        let m = fixture(1, MatchStatus::Finished, Some((2, 1)));
        let rows = match_rows(&[&m]);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].club, "Arsenal");
        assert_eq!(rows[0].opponent, "Chelsea");
        assert_eq!(rows[0].venue, Venue::Home);
        assert_eq!(rows[1].club, "Chelsea");
        assert_eq!(rows[1].opponent, "Arsenal");
        assert_eq!(rows[1].venue, Venue::Away);
    }

    #[test]
    fn test_match_rows_flip_score_to_perspective() {
        let m = fixture(1, MatchStatus::Finished, Some((2, 1)));
        let rows = match_rows(&[&m]);

        assert_eq!(rows[0].score, Some((2, 1)), "Home row keeps home orientation");
        assert_eq!(rows[1].score, Some((1, 2)), "Away row is flipped");
    }

    #[test]
    fn test_match_rows_no_score_for_unplayed() {
        let m = fixture(1, MatchStatus::Scheduled, None);
        let rows = match_rows(&[&m]);

        assert_eq!(rows[0].score, None);
        assert_eq!(rows[1].score, None);
    }

    #[test]
    fn test_row_counts_match_filter_semantics() {
        let matches = vec![
            fixture(1, MatchStatus::Finished, Some((2, 1))),
            fixture(2, MatchStatus::Scheduled, None),
        ];

        let all = MatchFilter::All.apply(&matches);
        assert_eq!(match_rows(&all).len(), 4);

        let played = MatchFilter::Played.apply(&matches);
        assert_eq!(match_rows(&played).len(), 2);

        let unplayed = MatchFilter::Unplayed.apply(&matches);
        assert_eq!(match_rows(&unplayed).len(), 2);
    }

    #[test]
    fn test_result_cell_colors_follow_perspective() {
        let m = fixture(1, MatchStatus::Finished, Some((2, 1)));
        let rows = match_rows(&[&m]);

        let (winner_text, winner_color) = result_cell(&rows[0]);
        assert_eq!(winner_text, "2-1");
        assert_eq!(winner_color, Color::Green);

        let (loser_text, loser_color) = result_cell(&rows[1]);
        assert_eq!(loser_text, "1-2");
        assert_eq!(loser_color, Color::Red);
    }

    #[test]
    fn test_result_cell_status_fallbacks() {
        let postponed = match_rows(&[&fixture(1, MatchStatus::Postponed, None)]);
        assert_eq!(result_cell(&postponed[0]).0, "PP");

        let cancelled = match_rows(&[&fixture(2, MatchStatus::Cancelled, None)]);
        assert_eq!(result_cell(&cancelled[0]).0, "CANC");

        let live = match_rows(&[&fixture(3, MatchStatus::InPlay, Some((1, 1)))]);
        assert_eq!(result_cell(&live[0]).0, "1-1 LIVE");
    }

    #[test]
    fn test_render_shows_team_and_filter() {
        let client = FootballDataClient::new("test-key").expect("client should build");
        let mut app = App::new(StartupConfig::default(), client);
        app.stack.push_matches(Screen::Matches {
            team: team(57, "Arsenal"),
            matches: vec![
                fixture(1, MatchStatus::Finished, Some((2, 1))),
                fixture(2, MatchStatus::Scheduled, None),
            ],
            filter: MatchFilter::All,
            cursor: 0,
        });

        let backend = TestBackend::new(90, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| render(frame, &app)).unwrap();

        let buffer = terminal.backend().buffer();
        let content: String = buffer.content().iter().map(|cell| cell.symbol()).collect();

        assert!(content.contains("Arsenal"));
        assert!(content.contains("Chelsea"));
        assert!(content.contains("filter: all"));
        assert!(content.contains("2 fixtures"));
    }

    #[test]
    fn test_render_empty_filter_shows_placeholder() {
        let client = FootballDataClient::new("test-key").expect("client should build");
        let mut app = App::new(StartupConfig::default(), client);
        app.stack.push_matches(Screen::Matches {
            team: team(57, "Arsenal"),
            matches: vec![fixture(1, MatchStatus::Cancelled, None)],
            filter: MatchFilter::Played,
            cursor: 0,
        });

        let backend = TestBackend::new(90, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| render(frame, &app)).unwrap();

        let buffer = terminal.backend().buffer();
        let content: String = buffer.content().iter().map(|cell| cell.symbol()).collect();

        assert!(content.contains("No matches under this filter"));
    }
}
