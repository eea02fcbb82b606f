//! CLI Error Types

use chain_params::{ConfigCompatError, ConfigError};
use thiserror::Error;

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Genesis file could not be loaded or failed validation
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    /// The replacement configuration rewrites processed blocks
    #[error("Incompatible configuration: {0}")]
    Incompatible(#[from] ConfigCompatError),
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    pub fn invalid_arg(message: impl Into<String>) -> Self {
        CliError::InvalidArgument {
            message: message.into(),
        }
    }

    /// Get exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Config(ConfigError::Order(_)) => 3,
            CliError::Config(ConfigError::Io(_)) => 5,
            CliError::Config(_) => 1,
            CliError::InvalidArgument { .. } => 2,
            CliError::Incompatible(_) => 4,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chain_params::{Fork, ForkOrderError};
    use num_bigint::BigUint;

    #[test]
    fn test_incompatible_exit_code() {
        let compat = ConfigCompatError::new("London", None, Some(&BigUint::from(200u32)));
        let err = CliError::from(compat);
        assert_eq!(err.exit_code(), 4);
        assert!(err.to_string().contains("rewindto 199"));
    }

    #[test]
    fn test_order_exit_code() {
        let order = ForkOrderError::MissingBlobConfig { fork: Fork::Osaka };
        let err = CliError::from(ConfigError::from(order));
        assert_eq!(err.exit_code(), 3);
        assert!(err.to_string().contains("blobSchedule"));
    }

    #[test]
    fn test_deprecated_exit_code() {
        let err = CliError::from(ConfigError::Deprecated {
            field: "clique".to_string(),
        });
        assert_eq!(err.exit_code(), 1);
        assert!(err.to_string().contains("clique is deprecated"));
    }

    #[test]
    fn test_invalid_argument() {
        let err = CliError::invalid_arg("height out of range");
        assert_eq!(err.exit_code(), 2);
    }
}
