//! Error types for the rainwater monitor
//!
//! Centralized error handling using snafu for ergonomic error definitions.

use snafu::Snafu;

/// Main error type for the monitor
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    /// The persisted history log exists but cannot be parsed
    #[snafu(display("Corrupt history in slot '{slot}': {source}"))]
    CorruptHistory {
        slot: String,
        source: serde_json::Error,
    },

    /// The durable medium rejected a write
    #[snafu(display("Persistence unavailable for slot '{slot}': {source}"))]
    PersistenceUnavailable {
        slot: String,
        source: std::io::Error,
    },

    /// Invalid input or configuration
    #[snafu(display("Invalid: {message}"))]
    Invalid { message: String },

    /// IO error (file operations)
    #[snafu(display("IO error: {source}"))]
    Io { source: std::io::Error },

    /// JSON serialization/deserialization error
    #[snafu(display("JSON error: {source}"))]
    Json { source: serde_json::Error },

    /// TOML deserialization error
    #[snafu(display("TOML parse error: {source}"))]
    TomlDe { source: toml::de::Error },

    /// TOML serialization error
    #[snafu(display("TOML serialize error: {source}"))]
    TomlSe { source: toml::ser::Error },

    /// Channel send error
    #[snafu(display("Channel send error: {message}"))]
    ChannelSend { message: String },
}

impl Error {
    /// Whether this error means a record did not reach the durable medium
    pub fn is_persistence_unavailable(&self) -> bool {
        matches!(self, Error::PersistenceUnavailable { .. })
    }

    /// Whether this error means the stored log could not be read back
    pub fn is_corrupt_history(&self) -> bool {
        matches!(self, Error::CorruptHistory { .. })
    }
}

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io { source }
    }
}

impl From<serde_json::Error> for Error {
    fn from(source: serde_json::Error) -> Self {
        Error::Json { source }
    }
}

impl From<toml::de::Error> for Error {
    fn from(source: toml::de::Error) -> Self {
        Error::TomlDe { source }
    }
}

impl From<toml::ser::Error> for Error {
    fn from(source: toml::ser::Error) -> Self {
        Error::TomlSe { source }
    }
}

/// Result type alias for convenience
pub type Result<T, E = Error> = std::result::Result<T, E>;
