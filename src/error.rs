//! Error types for the ETA bridge

use thiserror::Error;

/// Result type alias for bridge operations
pub type Result<T> = std::result::Result<T, EtaError>;

/// Error types for ETA controller operations
#[derive(Error, Debug)]
pub enum EtaError {
    /// Connection errors (refused, reset, DNS)
    #[error("Connection error: {0}")]
    Connection(String),

    /// Request deadline exceeded
    #[error("Operation timed out: {0}")]
    Timeout(String),

    /// HTTP client errors
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx response from the controller
    #[error("HTTP status {status}: {body}")]
    HttpStatus {
        /// Response status code
        status: u16,
        /// Response body, as far as it could be read
        body: String,
    },

    /// Malformed XML in a controller response
    #[error("XML parsing error: {0}")]
    Parse(String),

    /// Response is well-formed but carries no value element
    #[error("Value extraction failed: {0}")]
    Extraction(String),

    /// Numeric payload could not be converted to a displayable number
    #[error("Value conversion failed: {0}")]
    Conversion(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid command arguments
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Generic I/O errors (config file access)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl EtaError {
    /// Create a connection error
    pub fn connection<S: Into<String>>(msg: S) -> Self {
        Self::Connection(msg.into())
    }

    /// Create a timeout error
    pub fn timeout<S: Into<String>>(msg: S) -> Self {
        Self::Timeout(msg.into())
    }

    /// Create an HTTP status error
    pub fn http_status<S: Into<String>>(status: u16, body: S) -> Self {
        Self::HttpStatus {
            status,
            body: body.into(),
        }
    }

    /// Create an XML parse error
    pub fn parse<S: Into<String>>(msg: S) -> Self {
        Self::Parse(msg.into())
    }

    /// Create an extraction error
    pub fn extraction<S: Into<String>>(msg: S) -> Self {
        Self::Extraction(msg.into())
    }

    /// Create a conversion error
    pub fn conversion<S: Into<String>>(msg: S) -> Self {
        Self::Conversion(msg.into())
    }

    /// Create a configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// Create an invalid input error
    pub fn invalid_input<S: Into<String>>(msg: S) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Check if this error belongs to the read path, i.e. is absorbed at
    /// the poll boundary instead of propagating to the scheduler.
    pub fn is_read_path(&self) -> bool {
        matches!(
            self,
            EtaError::Connection(_)
                | EtaError::Timeout(_)
                | EtaError::Http(_)
                | EtaError::HttpStatus { .. }
                | EtaError::Parse(_)
                | EtaError::Extraction(_)
                | EtaError::Conversion(_)
        )
    }
}
