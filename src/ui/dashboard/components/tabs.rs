//! Dashboard tab bar component

use super::super::state::{DashboardState, Page};

use ratatui::Frame;
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::Tabs;

/// Render the page tabs, numbered the way the keybindings select them.
pub fn render_tabs(f: &mut Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    let titles: Vec<Line> = Page::ALL
        .iter()
        .enumerate()
        .map(|(i, page)| Line::from(format!("[{}] {}", i + 1, page.title())))
        .collect();

    let tabs = Tabs::new(titles)
        .select(state.active_page.index())
        .style(Style::default().fg(Color::DarkGray))
        .highlight_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .divider("|");
    f.render_widget(tabs, area);
}
