use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Failed to reach StartGG API: {0}")]
    ApiFetch(#[from] reqwest::Error),

    #[error("Failed to parse API response: {0}")]
    ApiParse(#[from] serde_json::Error),

    // Remote call failed at the HTTP layer
    #[error("StartGG API request failed ({status}): {excerpt}")]
    Transport { status: u16, excerpt: String },

    #[error("Network timeout while fetching data from: {url}")]
    NetworkTimeout { url: String },

    #[error("Connection failed to: {url} - {message}")]
    NetworkConnection { url: String, message: String },

    // The service itself reported an error (top-level `errors` or `errorId`)
    #[error("StartGG API reported an error: {details}")]
    Application { details: String },

    // Response decoded fine but violated the expected envelope or
    // pagination contract
    #[error("StartGG API returned an unexpected response shape: {message}")]
    Protocol { message: String },

    #[error("Selection index {index} is out of range for list of length {len}")]
    SelectionOutOfRange { index: usize, len: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Log setup error: {0}")]
    LogSetup(String),
}

impl AppError {
    /// Create a transport error from an HTTP status and a (pre-truncated)
    /// body excerpt
    pub fn transport(status: u16, excerpt: impl Into<String>) -> Self {
        Self::Transport {
            status,
            excerpt: excerpt.into(),
        }
    }

    /// Create an application error carrying the remote error payload
    pub fn application(details: impl Into<String>) -> Self {
        Self::Application {
            details: details.into(),
        }
    }

    /// Create a protocol error for an envelope or pagination shape violation
    pub fn protocol(message: impl Into<String>) -> Self {
        Self::Protocol {
            message: message.into(),
        }
    }

    /// Create a network timeout error
    pub fn network_timeout(url: impl Into<String>) -> Self {
        Self::NetworkTimeout { url: url.into() }
    }

    /// Create a network connection error
    pub fn network_connection(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::NetworkConnection {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Create a selection range error
    pub fn selection_out_of_range(index: usize, len: usize) -> Self {
        Self::SelectionOutOfRange { index, len }
    }

    /// Create a configuration error with context
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a log setup error with context
    pub fn log_setup_error(msg: impl Into<String>) -> Self {
        Self::LogSetup(msg.into())
    }

    /// Check if the error originated from the remote call rather than local
    /// configuration or I/O. Remote errors abort the current refresh cycle
    /// and leave previously synchronized state unchanged.
    pub fn is_remote(&self) -> bool {
        matches!(
            self,
            AppError::ApiFetch(_)
                | AppError::Transport { .. }
                | AppError::NetworkTimeout { .. }
                | AppError::NetworkConnection { .. }
                | AppError::Application { .. }
                | AppError::Protocol { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_helper() {
        let error = AppError::transport(500, "Internal Server Error");
        assert!(matches!(error, AppError::Transport { status: 500, .. }));
        assert_eq!(
            error.to_string(),
            "StartGG API request failed (500): Internal Server Error"
        );
    }

    #[test]
    fn test_application_helper() {
        let error = AppError::application(r#"[{"message":"bad query"}]"#);
        assert!(matches!(error, AppError::Application { .. }));
        assert!(error.to_string().contains("bad query"));
    }

    #[test]
    fn test_protocol_helper() {
        let error = AppError::protocol("missing data field");
        assert!(matches!(error, AppError::Protocol { .. }));
        assert_eq!(
            error.to_string(),
            "StartGG API returned an unexpected response shape: missing data field"
        );
    }

    #[test]
    fn test_selection_out_of_range_helper() {
        let error = AppError::selection_out_of_range(5, 3);
        assert!(matches!(
            error,
            AppError::SelectionOutOfRange { index: 5, len: 3 }
        ));
        assert_eq!(
            error.to_string(),
            "Selection index 5 is out of range for list of length 3"
        );
    }

    #[test]
    fn test_config_error_helper() {
        let error = AppError::config_error("Missing API token");
        assert!(matches!(error, AppError::Config(_)));
        assert_eq!(error.to_string(), "Configuration error: Missing API token");
    }

    #[test]
    fn test_log_setup_error_helper() {
        let error = AppError::log_setup_error("Failed to initialize logger");
        assert!(matches!(error, AppError::LogSetup(_)));
    }

    #[test]
    fn test_is_remote() {
        assert!(AppError::transport(502, "Bad Gateway").is_remote());
        assert!(AppError::application("errorId 42").is_remote());
        assert!(AppError::protocol("data is not an object").is_remote());
        assert!(AppError::network_timeout("https://api.start.gg").is_remote());
        assert!(
            AppError::network_connection("https://api.start.gg", "refused").is_remote()
        );

        assert!(!AppError::config_error("no token").is_remote());
        assert!(!AppError::selection_out_of_range(1, 0).is_remote());
        assert!(!AppError::log_setup_error("boom").is_remote());
    }

    #[test]
    fn test_error_from_serde_json() {
        let json_error = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let app_error: AppError = json_error.into();
        assert!(matches!(app_error, AppError::ApiParse(_)));
    }

    #[test]
    fn test_error_from_io() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let app_error: AppError = io_error.into();
        assert!(matches!(app_error, AppError::Io(_)));
    }

    #[test]
    fn test_error_from_toml_deserialize() {
        let invalid_toml = "invalid = [toml";
        let toml_error = toml::from_str::<serde_json::Value>(invalid_toml).unwrap_err();
        let app_error: AppError = toml_error.into();
        assert!(matches!(app_error, AppError::TomlDeserialize(_)));
    }
}
