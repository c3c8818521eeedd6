//! Dashboard info panel component
//!
//! Renders the connection and client details panel

use crate::environment::Environment;

use super::super::state::DashboardState;
use ratatui::Frame;
use ratatui::prelude::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Padding, Paragraph, Wrap};

/// Render the connection panel with backend and client details.
pub fn render_info_panel(f: &mut Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    let mut info_lines = Vec::new();

    // Environment with color coding
    let env_color = match state.environment {
        Environment::Local => Color::Green,
        Environment::Custom { .. } => Color::Yellow,
    };
    info_lines.push(Line::from(vec![Span::styled(
        format!("Env: {}", state.environment),
        Style::default().fg(env_color),
    )]));

    info_lines.push(Line::from(vec![Span::styled(
        format!("Backend: {}", state.environment.base_url()),
        Style::default().fg(Color::LightBlue),
    )]));

    // Version info
    let version = env!("CARGO_PKG_VERSION");
    info_lines.push(Line::from(vec![Span::styled(
        format!("Version: {}", version),
        Style::default().fg(Color::Cyan),
    )]));

    // Client uptime with better formatting
    let uptime = state.start_time.elapsed();
    let uptime_string = if uptime.as_secs() >= 86400 {
        format!(
            "Uptime: {}d {}h {}m",
            uptime.as_secs() / 86400,
            (uptime.as_secs() % 86400) / 3600,
            (uptime.as_secs() % 3600) / 60
        )
    } else if uptime.as_secs() >= 3600 {
        format!(
            "Uptime: {}h {}m {}s",
            uptime.as_secs() / 3600,
            (uptime.as_secs() % 3600) / 60,
            uptime.as_secs() % 60
        )
    } else {
        format!(
            "Uptime: {}m {}s",
            uptime.as_secs() / 60,
            uptime.as_secs() % 60
        )
    };
    info_lines.push(Line::from(vec![Span::styled(
        uptime_string,
        Style::default().fg(Color::LightGreen),
    )]));

    // Age of the newest applied status result
    let poll_text = match state.last_status_at() {
        Some(at) => format!("Last poll: {}s ago", at.elapsed().as_secs()),
        None => "Last poll: waiting".to_string(),
    };
    info_lines.push(Line::from(vec![Span::styled(
        poll_text,
        Style::default().fg(Color::LightYellow),
    )]));

    // Dashboard process usage
    info_lines.push(Line::from(vec![Span::styled(
        format!("CPU: {:.1}%", state.system_metrics.cpu_percent),
        Style::default().fg(state.system_metrics.cpu_color()),
    )]));
    info_lines.push(Line::from(vec![Span::styled(
        format!("RAM: {}", state.system_metrics.format_ram()),
        Style::default().fg(state.system_metrics.ram_color()),
    )]));

    let info_block = Block::default()
        .title("CONNECTION")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan))
        .padding(Padding::uniform(1));

    let info_paragraph = Paragraph::new(info_lines)
        .block(info_block)
        .wrap(Wrap { trim: true });
    f.render_widget(info_paragraph, area);
}
