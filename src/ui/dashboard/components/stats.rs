//! Dashboard stats panel component
//!
//! Renders the agent's aggregate counters

use super::super::state::DashboardState;
use ratatui::Frame;
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Padding, Paragraph, Wrap};

/// Render the stats panel. Values are the last ones a poll delivered; a
/// failed poll leaves them untouched.
pub fn render_stats_panel(f: &mut Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    let stats = &state.stats;
    let mut stats_lines = Vec::new();

    stats_lines.push(Line::from(vec![
        Span::styled("Emails: ", Style::default().fg(Color::Gray)),
        Span::styled(
            format!("{}", stats.total_emails),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
    ]));

    stats_lines.push(Line::from(vec![
        Span::styled("Actions: ", Style::default().fg(Color::Gray)),
        Span::styled(
            format!("{}", stats.total_actions),
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
    ]));

    let retry_color = if stats.pending_retries == 0 {
        Color::Green
    } else {
        Color::Yellow
    };
    stats_lines.push(Line::from(vec![
        Span::styled("Pending retries: ", Style::default().fg(Color::Gray)),
        Span::styled(
            format!("{}", stats.pending_retries),
            Style::default().fg(retry_color).add_modifier(Modifier::BOLD),
        ),
    ]));

    let stats_block = Block::default()
        .title("AGENT STATS")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan))
        .padding(Padding::uniform(1));

    let stats_paragraph = Paragraph::new(stats_lines)
        .block(stats_block)
        .wrap(Wrap { trim: true });
    f.render_widget(stats_paragraph, area);
}
