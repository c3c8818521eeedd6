//! Dashboard main renderer

use super::components::{activity, emails, footer, header, info_panel, logs, stats, tabs};
use super::state::{DashboardState, Page};
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::{Color, Style};
use ratatui::widgets::Block;

pub fn render_dashboard(f: &mut Frame, state: &DashboardState) {
    if state.with_background_color {
        f.render_widget(
            Block::default().style(Style::default().bg(Color::Rgb(16, 20, 24))),
            f.area(),
        );
    }

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(2),
        ])
        .margin(1)
        .split(f.area());

    header::render_header(f, main_chunks[0], state);
    tabs::render_tabs(f, main_chunks[1], state);

    // Exactly one page owns the body area at a time
    match state.active_page {
        Page::Overview => {
            let content_chunks = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
                .split(main_chunks[2]);

            let left_chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
                .split(content_chunks[0]);

            info_panel::render_info_panel(f, left_chunks[0], state);
            stats::render_stats_panel(f, left_chunks[1], state);
            activity::render_activity_panel(f, content_chunks[1], state);
        }
        Page::Emails => emails::render_emails_page(f, main_chunks[2], state),
        Page::Logs => logs::render_logs_page(f, main_chunks[2], state),
    }

    footer::render_footer(f, main_chunks[3], state);
}
