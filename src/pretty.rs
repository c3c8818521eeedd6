//! Console rendering for one-shot command output.

use crate::model::{AgentStatus, EmailSummary, LogEntry, PriorityClass, StatsSnapshot};
use crate::ui::dashboard::utils::format_compact_timestamp;
use crate::ui::splash::LOGO_NAME;

const GREEN: &str = "\x1b[1;32m";
const RED: &str = "\x1b[1;31m";
const YELLOW: &str = "\x1b[33m";
const DIM: &str = "\x1b[2m";
const RESET: &str = "\x1b[0m";

/// Banner shown when the backend cannot be reached at all.
pub(crate) fn print_backend_unreachable(base_url: &str) {
    // RGB: FF = 255, AA = 170, 00 = 0
    println!("\x1b[38;2;255;170;0m{}\x1b[0m", LOGO_NAME);
    println!("\x1b[38;2;255;170;0mNo backend answering at {}\x1b[0m", base_url);
    println!("Start the agent API, or point maildeck elsewhere with --base-url.\n");
}

/// One line summary of the agent's run state.
pub(crate) fn print_status(status: &AgentStatus) {
    let color = if status.is_running { GREEN } else { RED };
    println!("Agent: {}{}{}", color, status, RESET);
}

/// Aggregate counters, one per line.
pub(crate) fn print_stats(stats: &StatsSnapshot) {
    println!("{:<16} {}", "Total emails", stats.total_emails);
    println!("{:<16} {}", "Total actions", stats.total_actions);
    println!("{:<16} {}", "Pending retries", stats.pending_retries);
}

/// Fixed-width email table, newest rows first.
pub(crate) fn print_email_table(emails: &[EmailSummary]) {
    if emails.is_empty() {
        println!("No emails yet.");
        return;
    }

    println!(
        "{}{:<12} {:<24} {:<40} {:<14} {:<14} {:<10}{}",
        DIM, "TIME", "SENDER", "SUBJECT", "PRIORITY", "NEXT ACTION", "STATUS", RESET
    );
    for email in emails {
        let priority_color = match email.priority_class() {
            PriorityClass::High => RED,
            PriorityClass::Medium => YELLOW,
            PriorityClass::Low => GREEN,
        };
        // Pad before coloring so escape codes don't skew column widths
        let priority = format!(
            "{:<14}",
            format!("{} ({})", email.priority_label_or_unknown(), email.priority_score)
        );
        println!(
            "{:<12} {:<24} {:<40} {}{}{} {:<14} {:<10}",
            format_compact_timestamp(&email.timestamp),
            email.short_sender(24),
            email.short_subject(40),
            priority_color,
            priority,
            RESET,
            email.next_action,
            email.task_status,
        );
    }
    println!("{}{} emails{}", DIM, emails.len(), RESET);
}

/// Fixed-width action log table, newest rows first.
pub(crate) fn print_log_table(logs: &[LogEntry]) {
    if logs.is_empty() {
        println!("No actions logged yet.");
        return;
    }

    println!(
        "{}{:<12} {:<24} {:<20} {:<16} {:<16}{}",
        DIM, "TIME", "EMAIL", "INTENT", "PROPOSED", "TAKEN", RESET
    );
    for entry in logs {
        let taken_color = if entry.agent_action == entry.proposed_action {
            GREEN
        } else {
            YELLOW
        };
        let taken = format!("{:<16}", entry.agent_action);
        println!(
            "{:<12} {:<24} {:<20} {:<16} {}{}{}",
            format_compact_timestamp(&entry.created_at),
            entry.email_id,
            entry.intent,
            entry.proposed_action,
            taken_color,
            taken,
            RESET,
        );
    }
    println!("{}{} entries{}", DIM, logs.len(), RESET);
}
