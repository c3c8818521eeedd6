//! Dashboard footer component
//!
//! Renders footer with the keybinding hints

use super::super::state::DashboardState;

use ratatui::Frame;
use ratatui::layout::Alignment;
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

/// Render the footer. The toggle hint tracks the displayed run state.
pub fn render_footer(f: &mut Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    let footer_text = format!(
        "[Q] Quit | [Tab] Next Page | [1-3] Pages | [S] {} | [R] Refresh",
        state.agent.toggle_label()
    );

    let footer = Paragraph::new(footer_text)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .block(
            Block::default()
                .borders(Borders::TOP)
                .border_type(BorderType::Thick),
        );
    f.render_widget(footer, area);
}
