//! Dashboard header component
//!
//! Renders the title and the agent run state line

use super::super::state::DashboardState;

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

/// Render the header with title and the agent's run state.
pub fn render_header(f: &mut Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    let header_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Length(2)])
        .split(area);

    let version = env!("CARGO_PKG_VERSION");
    let title = Paragraph::new(format!("MAILDECK v{}", version))
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_type(BorderType::Thick),
        );
    f.render_widget(title, header_chunks[0]);

    // Run state line. An unreachable backend reads as stopped, with a note,
    // so the toggle hint always matches what a press would send.
    let (state_color, state_text) = if state.agent.is_running {
        (
            Color::LightGreen,
            format!("RUNNING - uptime {}", state.agent.formatted_uptime()),
        )
    } else if state.agent.reachable {
        (Color::Red, "STOPPED".to_string())
    } else {
        (Color::Red, "STOPPED - backend unreachable".to_string())
    };

    let state_line = Line::from(vec![
        Span::styled(
            state_text,
            Style::default()
                .fg(state_color)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("   "),
        Span::styled(
            format!("[S] {}", state.agent.toggle_label()),
            Style::default().fg(Color::DarkGray),
        ),
    ]);

    let state_paragraph = Paragraph::new(state_line)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
    f.render_widget(state_paragraph, header_chunks[1]);
}
