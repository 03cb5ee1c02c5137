//! Errors for constructing lifetime components and loading identifier profiles
//!
//! Attribute setters and getters never fail; these errors only cover values
//! built outside a record (bounded lifetime components, identifier ranges) and
//! the profile configuration surface.

/// Error type for key metadata construction and configuration
#[derive(Debug, thiserror::Error)]
pub enum KeyAttributesError {
    /// Location indicator does not fit in 24 bits
    #[error("Location out of range: {value:#x} exceeds 24 bits")]
    LocationOutOfRange {
        /// The rejected raw value
        value: u32,
    },

    /// Identifier range bounds are unusable
    #[error("Invalid key identifier range {min:#x}..={max:#x}: {reason}")]
    InvalidRange {
        /// Lower bound as supplied
        min: u32,
        /// Upper bound as supplied
        max: u32,
        /// Why the range was rejected
        reason: &'static str,
    },

    /// Application and vendor ranges share identifiers
    #[error("Application range {application} overlaps vendor range {vendor}")]
    OverlappingRanges {
        /// Configured application range
        application: String,
        /// Configured vendor range
        vendor: String,
    },

    /// Profile file could not be parsed
    #[error("Invalid profile configuration: {message}")]
    Config {
        /// Parser message
        message: String,
    },

    /// Profile file extension is not a supported format
    #[error("Unsupported profile format: {extension}")]
    UnsupportedFormat {
        /// Extension found on the path (empty if none)
        extension: String,
    },

    /// Profile file could not be read
    #[error("Failed to read profile: {0}")]
    Io(#[from] std::io::Error),
}

impl KeyAttributesError {
    /// Create a configuration parse error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}

impl From<toml::de::Error> for KeyAttributesError {
    fn from(err: toml::de::Error) -> Self {
        Self::config(err.to_string())
    }
}

impl From<serde_json::Error> for KeyAttributesError {
    fn from(err: serde_json::Error) -> Self {
        Self::config(err.to_string())
    }
}

/// Standard Result type for key metadata operations
pub type Result<T> = std::result::Result<T, KeyAttributesError>;
