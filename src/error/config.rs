use thiserror::Error;

/// Configuration read from the environment was invalid.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A variable was set but could not be parsed.
    #[error("Invalid value for environment variable {var}: {reason}")]
    InvalidEnvValue {
        /// Variable name
        var: String,
        /// Why the value was rejected
        reason: String,
    },
}
