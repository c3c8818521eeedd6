use crate::backend::error::BackendError;
use log::LevelFilter;

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Trace = 0,
    Debug = 1,
    Info = 2,
    Warn = 3,
    Error = 4,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => LevelFilter::Trace,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Error => LevelFilter::Error,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ErrorClassifier;

impl ErrorClassifier {
    pub fn new() -> Self {
        Self
    }

    pub fn classify_fetch_error(&self, error: &BackendError) -> LogLevel {
        match error {
            // Non-critical: Temporary server issues
            BackendError::Http { status, .. } if *status == 429 => LogLevel::Debug,
            BackendError::Http { status, .. } if (500..=599).contains(status) => LogLevel::Warn,

            // Critical: Auth, malformed responses
            BackendError::Http { status, .. } if *status == 401 => LogLevel::Error,
            BackendError::Http { status, .. } if *status == 403 => LogLevel::Error,
            BackendError::Decode(_) => LogLevel::Error,

            // Network issues - usually temporary
            _ => LogLevel::Warn,
        }
    }
}

impl Default for ErrorClassifier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_status_classification() {
        let classifier = ErrorClassifier::new();

        let throttled = BackendError::Http {
            status: 429,
            message: "slow down".to_string(),
        };
        assert_eq!(classifier.classify_fetch_error(&throttled), LogLevel::Debug);

        let server_error = BackendError::Http {
            status: 503,
            message: "unavailable".to_string(),
        };
        assert_eq!(
            classifier.classify_fetch_error(&server_error),
            LogLevel::Warn
        );

        let forbidden = BackendError::Http {
            status: 403,
            message: "forbidden".to_string(),
        };
        assert_eq!(
            classifier.classify_fetch_error(&forbidden),
            LogLevel::Error
        );
    }

    #[test]
    // A body that fails to decode means the backend contract broke.
    fn test_decode_errors_are_critical() {
        let classifier = ErrorClassifier::new();
        let bad_json: Result<crate::model::AgentStatus, _> = serde_json::from_str("not json");
        let error = BackendError::Decode(bad_json.unwrap_err());
        assert_eq!(classifier.classify_fetch_error(&error), LogLevel::Error);
    }
}
