//! Action log page component
//!
//! Renders the agent's decision history table

use super::super::state::DashboardState;
use super::super::utils::format_compact_timestamp;
use crate::model::LogEntry;

use ratatui::Frame;
use ratatui::layout::Constraint;
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders, Cell, Padding, Row, Table};

/// Render the action log page as a table, newest rows first.
pub fn render_logs_page(f: &mut Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    let header = Row::new(vec!["Time", "Email", "Intent", "Proposed", "Taken"])
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .bottom_margin(1);

    let table = Table::new(
        log_rows(&state.logs),
        [
            Constraint::Length(11),
            Constraint::Length(24),
            Constraint::Length(20),
            Constraint::Fill(1),
            Constraint::Fill(1),
        ],
    )
    .header(header)
    .column_spacing(1)
    .block(
        Block::default()
            .title(format!("ACTION LOG ({})", state.logs.len()))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Cyan))
            .padding(Padding::uniform(1)),
    );
    f.render_widget(table, area);
}

/// Build table rows from log entries. The taken action is highlighted when
/// policy checks overrode what the agent proposed.
pub(crate) fn log_rows(logs: &[LogEntry]) -> Vec<Row<'static>> {
    logs.iter()
        .map(|entry| {
            let action_color = if entry.agent_action == entry.proposed_action {
                Color::Green
            } else {
                Color::Yellow
            };
            Row::new(vec![
                Cell::from(format_compact_timestamp(&entry.created_at)),
                Cell::from(entry.email_id.clone()),
                Cell::from(entry.intent.clone()),
                Cell::from(entry.proposed_action.clone()),
                Cell::from(entry.agent_action.clone()).style(Style::default().fg(action_color)),
            ])
        })
        .collect()
}
