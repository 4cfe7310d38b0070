//! Standings screen rendering
//!
//! Renders the league table with one row per standing in fetch order:
//! position, club, games played, results breakdown, goals, and points.

use chrono::Local;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::{App, Screen};
use crate::data::Standing;

/// Width of the club name column
const CLUB_WIDTH: usize = 18;

/// Renders the standings screen
///
/// # Arguments
/// * `frame` - The ratatui Frame to render to
/// * `app` - The application state containing the table and cursor
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(3),    // League table
            Constraint::Length(1), // Help text
        ])
        .split(area);

    render_header(frame, app, chunks[0]);
    render_table(frame, app, chunks[1]);
    render_help(frame, chunks[2], app);
}

/// Renders the title bar with the league code and current time
fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let now = Local::now();
    let time_str = now.format("%a %b %d, %H:%M").to_string();

    let width = area.width as usize;
    let separator = "─".repeat(width.saturating_sub(2));

    let lines = vec![
        Line::from(vec![
            Span::styled(
                "TOUCHLINE",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(time_str, Style::default().fg(Color::White)),
        ]),
        Line::from(Span::styled(separator, Style::default().fg(Color::DarkGray))),
        Line::from(Span::styled(
            format!("{} · {} clubs", app.league, app.standings.len()),
            Style::default().fg(Color::Gray),
        )),
    ];

    frame.render_widget(Paragraph::new(lines), area);
}

/// Renders the league table rows
fn render_table(frame: &mut Frame, app: &App, area: Rect) {
    let selected = match app.stack.top() {
        Screen::Standings { cursor } => *cursor,
        Screen::Matches { .. } => 0,
    };

    let mut lines: Vec<Line> = Vec::with_capacity(app.standings.len() + 1);

    lines.push(Line::from(Span::styled(
        header_row(),
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::BOLD),
    )));

    for (index, row) in app.standings.iter().enumerate() {
        let is_selected = index == selected;
        let cursor = if is_selected { "\u{25B8} " } else { "  " }; // ▸ or space

        let row_style = if is_selected {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };

        lines.push(Line::from(vec![
            Span::styled(cursor, Style::default().fg(Color::Cyan)),
            Span::styled(standing_row(row), row_style),
        ]));
    }

    let block = Block::default()
        .title(format!(" {} Standings ", app.league))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Column header line, aligned with [`standing_row`]
fn header_row() -> String {
    format!(
        "{:>3}  {:<width$} {:>3} {:>3} {:>3} {:>3} {:>4} {:>4} {:>4} {:>4}",
        "POS",
        "CLUB",
        "GP",
        "W",
        "D",
        "L",
        "GF",
        "GA",
        "GD",
        "PTS",
        width = CLUB_WIDTH
    )
}

/// Formats one standing as a fixed-width table row
fn standing_row(s: &Standing) -> String {
    format!(
        "{:>3}  {:<width$} {:>3} {:>3} {:>3} {:>3} {:>4} {:>4} {:>4} {:>4}",
        s.position,
        truncate(s.team.display_name(), CLUB_WIDTH),
        s.played_games,
        s.won,
        s.draw,
        s.lost,
        s.goals_for,
        s.goals_against,
        format_goal_difference(s.goal_difference),
        s.points,
        width = CLUB_WIDTH
    )
}

/// Goal difference with an explicit sign for positive values
fn format_goal_difference(gd: i32) -> String {
    if gd > 0 {
        format!("+{}", gd)
    } else {
        gd.to_string()
    }
}

/// Truncates a club name to the column width
fn truncate(name: &str, max: usize) -> String {
    if name.chars().count() <= max {
        name.to_string()
    } else {
        name.chars().take(max).collect()
    }
}

/// Renders the help text at the bottom of the screen
fn render_help(frame: &mut Frame, area: Rect, app: &App) {
    let mut help_spans = vec![
        Span::styled("↑/↓", Style::default().fg(Color::Yellow)),
        Span::raw(" Navigate  "),
        Span::styled("Enter", Style::default().fg(Color::Yellow)),
        Span::raw(" Fixtures  "),
        Span::styled("r", Style::default().fg(Color::Yellow)),
        Span::raw(" Refresh  "),
        Span::styled("?", Style::default().fg(Color::Yellow)),
        Span::raw(" Help  "),
        Span::styled("q", Style::default().fg(Color::Yellow)),
        Span::raw(" Quit"),
    ];

    if let Some(notice) = &app.notice {
        help_spans.push(Span::styled(
            format!(" │ {}", notice),
            Style::default().fg(Color::Red),
        ));
    } else if let Some(last_refresh) = app.last_refresh {
        let mins_ago = (Local::now() - last_refresh).num_minutes();
        let freshness = if mins_ago < 1 {
            " │ Data: just now".to_string()
        } else {
            format!(" │ Data: {}m ago", mins_ago)
        };
        help_spans.push(Span::styled(freshness, Style::default().fg(Color::DarkGray)));
    }

    let paragraph = Paragraph::new(Line::from(help_spans)).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    use crate::cli::StartupConfig;
    use crate::data::{FootballDataClient, Team};

    fn standing(position: u32, name: &str, gd: i32) -> Standing {
        Standing {
            position,
            team: Team {
                id: position as u64,
                name: format!("{} FC", name),
                short_name: Some(name.to_string()),
                tla: None,
                crest: None,
            },
            played_games: 3,
            form: None,
            won: 2,
            draw: 1,
            lost: 0,
            points: 7,
            goals_for: 6,
            goals_against: 2,
            goal_difference: gd,
        }
    }

    fn test_app() -> App {
        let client = FootballDataClient::new("test-key").expect("client should build");
        let mut app = App::new(StartupConfig::default(), client);
        app.standings = vec![
            standing(1, "Arsenal", 7),
            standing(2, "Chelsea", 4),
            standing(3, "Liverpool", -1),
        ];
        app
    }

    #[test]
    fn test_format_goal_difference_signs() {
        assert_eq!(format_goal_difference(7), "+7");
        assert_eq!(format_goal_difference(0), "0");
        assert_eq!(format_goal_difference(-3), "-3");
    }

    #[test]
    fn test_standing_row_contains_all_columns() {
        let row = standing_row(&standing(2, "Chelsea", 4));

        assert!(row.starts_with("  2"));
        assert!(row.contains("Chelsea"));
        assert!(row.contains("+4"));
        assert!(row.ends_with("   7"), "Points column should close the row: {:?}", row);
    }

    #[test]
    fn test_standing_row_aligns_with_header() {
        let header = header_row();
        let row = standing_row(&standing(1, "Arsenal", 7));
        assert_eq!(header.chars().count(), row.chars().count());
    }

    #[test]
    fn test_truncate_long_club_names() {
        assert_eq!(truncate("Borussia Mönchengladbach", 18).chars().count(), 18);
        assert_eq!(truncate("Arsenal", 18), "Arsenal");
    }

    #[test]
    fn test_render_shows_clubs_in_table_order() {
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        let app = test_app();

        terminal.draw(|frame| render(frame, &app)).unwrap();

        let buffer = terminal.backend().buffer();
        let content: String = buffer.content().iter().map(|cell| cell.symbol()).collect();

        assert!(content.contains("Arsenal"));
        assert!(content.contains("Chelsea"));
        assert!(content.contains("Liverpool"));

        let arsenal = content.find("Arsenal").unwrap();
        let chelsea = content.find("Chelsea").unwrap();
        let liverpool = content.find("Liverpool").unwrap();
        assert!(arsenal < chelsea && chelsea < liverpool, "Rows should follow table order");
    }

    #[test]
    fn test_render_shows_notice_when_set() {
        let backend = TestBackend::new(100, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut app = test_app();
        app.notice = Some("Rate limit reached".to_string());

        terminal.draw(|frame| render(frame, &app)).unwrap();

        let buffer = terminal.backend().buffer();
        let content: String = buffer.content().iter().map(|cell| cell.symbol()).collect();

        assert!(content.contains("Rate limit reached"));
    }
}
