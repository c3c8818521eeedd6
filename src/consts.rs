pub mod cli_consts {
    //! Dashboard Configuration Constants
    //!
    //! This module contains all configuration constants for the dashboard,
    //! organized by functional area for clarity and maintainability.

    // =============================================================================
    // QUEUE CONFIGURATION
    // =============================================================================
    // Queue sizes are chosen to be larger than one polling cycle's worth of
    // traffic so workers never block on a slow UI frame.

    /// The maximum number of events to keep in the activity logs.
    pub const MAX_ACTIVITY_LOGS: usize = 100;

    /// Maximum number of event buffer size for worker threads
    pub const EVENT_QUEUE_SIZE: usize = 100;

    /// Buffer size of the typed state-update channel feeding the view model.
    pub const UPDATE_QUEUE_SIZE: usize = 64;

    /// Buffer size of the UI-to-worker command channels (fetch and control).
    pub const COMMAND_QUEUE_SIZE: usize = 16;

    // =============================================================================
    // LISTING CONFIGURATION
    // =============================================================================

    /// Default number of rows requested from the emails and logs endpoints.
    pub const DEFAULT_PAGE_SIZE: u32 = 50;

    // =============================================================================
    // POLLING CONFIGURATION
    // =============================================================================

    /// Polling cadences against the agent's control API
    pub mod polling {
        use std::time::Duration;

        /// Interval between agent status fetches (milliseconds)
        pub const STATUS_INTERVAL_MS: u64 = 2_000;

        /// Interval between aggregate stats fetches (milliseconds)
        pub const STATS_INTERVAL_MS: u64 = 5_000;

        /// Delay before the post-toggle reconcile status fetch (milliseconds)
        /// Long enough for the agent loop to observe the start/stop signal
        pub const RECONCILE_DELAY_MS: u64 = 500;

        /// Helper function to get the status polling interval
        pub const fn status_interval() -> Duration {
            Duration::from_millis(STATUS_INTERVAL_MS)
        }

        /// Helper function to get the stats polling interval
        pub const fn stats_interval() -> Duration {
            Duration::from_millis(STATS_INTERVAL_MS)
        }

        /// Helper function to get the reconcile delay
        pub const fn reconcile_delay() -> Duration {
            Duration::from_millis(RECONCILE_DELAY_MS)
        }
    }

    // =============================================================================
    // NETWORK CONFIGURATION
    // =============================================================================

    /// HTTP client timeouts
    pub mod http {
        use std::time::Duration;

        /// TCP connect timeout for backend requests (milliseconds)
        pub const CONNECT_TIMEOUT_MS: u64 = 5_000;

        /// Overall request timeout for backend requests (milliseconds)
        /// Generous so slow listing queries on large mailboxes still complete
        pub const REQUEST_TIMEOUT_MS: u64 = 10_000;

        /// Helper function to get the connect timeout
        pub const fn connect_timeout() -> Duration {
            Duration::from_millis(CONNECT_TIMEOUT_MS)
        }

        /// Helper function to get the request timeout
        pub const fn request_timeout() -> Duration {
            Duration::from_millis(REQUEST_TIMEOUT_MS)
        }
    }
}
