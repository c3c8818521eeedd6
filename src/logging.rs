//! RUST_LOG threshold handling for the activity feed.

use crate::error_classifier::LogLevel;
use std::env;

/// Directive prefix that targets this crate specifically, as in
/// `RUST_LOG=maildeck=debug,hyper=warn`.
const CRATE_DIRECTIVE: &str = "maildeck";

/// Threshold below which events stay out of the activity feed.
pub fn get_rust_log_level() -> LogLevel {
    match env::var("RUST_LOG") {
        Ok(spec) => parse_rust_log_level(&spec),
        Err(_) => LogLevel::Info,
    }
}

/// Parse a RUST_LOG value into a threshold.
///
/// A `maildeck=` directive wins over the bare default; other crates'
/// directives are ignored. Unrecognized levels fall back to info.
pub fn parse_rust_log_level(rust_log: &str) -> LogLevel {
    let mut fallback = None;
    for directive in rust_log.split(',') {
        match directive.split_once('=') {
            Some((target, level)) if target.trim() == CRATE_DIRECTIVE => {
                return level_from_str(level);
            }
            Some(_) => {}
            None if fallback.is_none() => fallback = Some(directive),
            None => {}
        }
    }
    fallback.map(level_from_str).unwrap_or(LogLevel::Info)
}

fn level_from_str(level: &str) -> LogLevel {
    match level.trim().to_lowercase().as_str() {
        "trace" => LogLevel::Trace,
        "debug" => LogLevel::Debug,
        "info" => LogLevel::Info,
        "warn" | "warning" => LogLevel::Warn,
        "error" => LogLevel::Error,
        _ => LogLevel::Info,
    }
}

pub fn should_log(event_level: LogLevel, threshold: LogLevel) -> bool {
    event_level >= threshold
}

/// Whether an event at `event_level` clears the RUST_LOG threshold.
pub fn should_log_with_env(event_level: LogLevel) -> bool {
    should_log(event_level, get_rust_log_level())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_levels_parse() {
        assert_eq!(parse_rust_log_level("trace"), LogLevel::Trace);
        assert_eq!(parse_rust_log_level("debug"), LogLevel::Debug);
        assert_eq!(parse_rust_log_level("info"), LogLevel::Info);
        assert_eq!(parse_rust_log_level("warning"), LogLevel::Warn);
        assert_eq!(parse_rust_log_level("error"), LogLevel::Error);
    }

    #[test]
    // A directive naming this crate beats the bare default, wherever it
    // appears in the list.
    fn test_crate_directive_wins() {
        assert_eq!(parse_rust_log_level("maildeck=debug"), LogLevel::Debug);
        assert_eq!(
            parse_rust_log_level("warn,maildeck=trace"),
            LogLevel::Trace
        );
        assert_eq!(
            parse_rust_log_level("maildeck=error,hyper=debug"),
            LogLevel::Error
        );
    }

    #[test]
    // Other crates' directives do not change our threshold.
    fn test_foreign_directives_are_ignored() {
        assert_eq!(parse_rust_log_level("hyper=debug"), LogLevel::Info);
        assert_eq!(parse_rust_log_level("warn,hyper=trace"), LogLevel::Warn);
    }

    #[test]
    fn test_garbage_defaults_to_info() {
        assert_eq!(parse_rust_log_level("loud"), LogLevel::Info);
        assert_eq!(parse_rust_log_level(""), LogLevel::Info);
    }

    #[test]
    fn test_should_log() {
        assert!(should_log(LogLevel::Error, LogLevel::Debug));
        assert!(should_log(LogLevel::Warn, LogLevel::Warn));
        assert!(!should_log(LogLevel::Debug, LogLevel::Error));
        assert!(!should_log(LogLevel::Info, LogLevel::Error));
    }
}
