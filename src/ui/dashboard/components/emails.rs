//! Email page component
//!
//! Renders the triaged email table

use super::super::state::DashboardState;
use super::super::utils::format_compact_timestamp;
use crate::model::{EmailSummary, PriorityClass};

use ratatui::Frame;
use ratatui::layout::Constraint;
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders, Cell, Padding, Row, Table};

/// Widest a sender cell gets before clipping.
const SENDER_WIDTH: usize = 24;
/// Widest a subject cell gets before clipping.
const SUBJECT_WIDTH: usize = 60;

/// Render the email page as a table, newest rows first.
pub fn render_emails_page(f: &mut Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    let header = Row::new(vec![
        "Time",
        "Sender",
        "Subject",
        "Priority",
        "Next Action",
        "Status",
    ])
    .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
    .bottom_margin(1);

    let table = Table::new(
        email_rows(&state.emails),
        [
            Constraint::Length(11),
            Constraint::Length(SENDER_WIDTH as u16),
            Constraint::Fill(1),
            Constraint::Length(16),
            Constraint::Length(16),
            Constraint::Length(12),
        ],
    )
    .header(header)
    .column_spacing(1)
    .block(
        Block::default()
            .title(format!("EMAILS ({})", state.emails.len()))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Cyan))
            .padding(Padding::uniform(1)),
    );
    f.render_widget(table, area);
}

/// Build table rows from email summaries. An empty listing yields no rows,
/// leaving just the header under the count in the title.
pub(crate) fn email_rows(emails: &[EmailSummary]) -> Vec<Row<'static>> {
    emails
        .iter()
        .map(|email| {
            let priority_color = match email.priority_class() {
                PriorityClass::High => Color::Red,
                PriorityClass::Medium => Color::Yellow,
                PriorityClass::Low => Color::Green,
            };
            Row::new(vec![
                Cell::from(format_compact_timestamp(&email.timestamp)),
                Cell::from(email.short_sender(SENDER_WIDTH)),
                Cell::from(email.short_subject(SUBJECT_WIDTH)),
                Cell::from(format!(
                    "{} ({})",
                    email.priority_label_or_unknown(),
                    email.priority_score
                ))
                .style(Style::default().fg(priority_color)),
                Cell::from(email.next_action.clone()),
                Cell::from(email.task_status.clone()),
            ])
        })
        .collect()
}
