//! Application-wide constants and configuration values
//!
//! This module centralizes all magic numbers and fixed endpoint values
//! to improve maintainability and make the codebase more configurable.

#![allow(dead_code)]

/// Default StartGG GraphQL endpoint. Can be overridden via config or env var,
/// which the test suite uses to point at a local mock server.
pub const DEFAULT_API_URL: &str = "https://api.start.gg/gql/alpha";

/// Default timeout for HTTP requests in seconds
pub const DEFAULT_HTTP_TIMEOUT_SECONDS: u64 = 30;

/// Maximum number of connections per host in the HTTP client pool
pub const HTTP_POOL_MAX_IDLE_PER_HOST: usize = 100;

/// Number of match sets requested per page. Fixed by the set-page query;
/// not configurable at the paginator layer.
pub const SETS_PER_PAGE: u64 = 20;

/// Maximum number of characters of a non-2xx response body carried inside a
/// transport error
pub const ERROR_BODY_EXCERPT_MAX_CHARS: usize = 256;

/// Maximum number of characters of an offending record included in a
/// validation rejection log line
pub const REJECTED_RECORD_LOG_MAX_CHARS: usize = 512;

/// Environment variable names
pub mod env_vars {
    /// Environment variable for the StartGG API bearer token override
    pub const API_TOKEN: &str = "STARTGG_SYNC_TOKEN";

    /// Environment variable for the GraphQL endpoint override
    pub const API_URL: &str = "STARTGG_SYNC_API_URL";

    /// Environment variable for log file path override
    pub const LOG_FILE: &str = "STARTGG_SYNC_LOG_FILE";

    /// Environment variable for HTTP timeout in seconds (default: 30)
    pub const HTTP_TIMEOUT: &str = "STARTGG_SYNC_HTTP_TIMEOUT";
}
