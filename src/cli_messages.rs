//! Console messaging for one-shot commands.
//!
//! Status, start/stop, listing and config commands all report through these
//! helpers so their output lines up across subcommands.

/// Severity tag printed in front of a command message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Severity {
    Info,
    Warn,
    Error,
    Success,
}

impl Severity {
    fn tag(self) -> &'static str {
        match self {
            Severity::Info => "\x1b[1;33m[INFO]\x1b[0m",
            Severity::Warn => "\x1b[1;91m[WARN]\x1b[0m",
            Severity::Error => "\x1b[1;31m[ERROR]\x1b[0m",
            Severity::Success => "\x1b[1;32m[SUCCESS]\x1b[0m",
        }
    }
}

fn print_line(severity: Severity, title: &str, details: &str) {
    if details.is_empty() {
        println!("{} {}", severity.tag(), title);
    } else {
        println!("{} {}\t {}", severity.tag(), title, details);
    }
}

/// Print CLI command info message
pub fn print_info(title: &str, details: &str) {
    print_line(Severity::Info, title, details);
}

/// Print CLI command warn message
pub fn print_warn(title: &str, details: &str) {
    print_line(Severity::Warn, title, details);
}

/// Print CLI command error, with the details on their own tagged line.
pub fn print_error(title: &str, details: Option<&str>) {
    print_line(Severity::Error, title, "");
    if let Some(details) = details {
        print_line(Severity::Error, &format!("Details: {}", details), "");
    }
}

/// Print CLI command success
pub fn print_success(title: &str, details: &str) {
    print_line(Severity::Success, title, details);
}

/// Macro for info messages with formatted details
#[macro_export]
macro_rules! print_cmd_info {
    ($title:expr, $($details:tt)*) => {
        $crate::cli_messages::print_info($title, &format!($($details)*))
    };
}

/// Macro for warn messages with formatted details
#[macro_export]
macro_rules! print_cmd_warn {
    ($title:expr, $($details:tt)*) => {
        $crate::cli_messages::print_warn($title, &format!($($details)*))
    };
}

/// Macro for CLI errors
#[macro_export]
macro_rules! print_cmd_error {
    ($title:expr) => {
        $crate::cli_messages::print_error($title, None)
    };
    ($title:expr, $details:expr) => {
        $crate::cli_messages::print_error($title, Some($details))
    };
}

/// Macro for CLI success messages
#[macro_export]
macro_rules! print_cmd_success {
    ($title:expr, $($details:tt)*) => {
        $crate::cli_messages::print_success($title, &format!($($details)*))
    };
}
