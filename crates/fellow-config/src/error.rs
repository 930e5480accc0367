use thiserror::Error;

/// Failure to build a usable `FellowConfig`.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A provider could not be read or a value has the wrong shape.
    #[error("failed to extract fellow configuration: {0}")]
    Figment(#[from] figment::Error),

    /// A value parsed but is outside the range the store accepts.
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}
