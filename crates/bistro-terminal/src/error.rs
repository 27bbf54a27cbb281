//! # Terminal Error Types
//!
//! `TerminalError` is what the facade returns; `ApiError` is the
//! serializable shape handed to the screen layer.
//!
//! ## Serialization
//! This is what the screen receives when an action fails:
//! ```json
//! {
//!   "code": "NOT_FOUND",
//!   "message": "Menu item not found: 42"
//! }
//! ```

use serde::Serialize;
use thiserror::Error;

use bistro_core::CoreError;

use crate::checkout::CheckoutError;

// =============================================================================
// Terminal Error
// =============================================================================

/// Errors raised by the terminal facade.
#[derive(Debug, Error)]
pub enum TerminalError {
    /// Catalog or cart rule violation.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The checkout collaborator refused or failed the order.
    #[error("Checkout failed: {0}")]
    Checkout(#[from] CheckoutError),

    /// Place Order was pressed on an empty cart.
    #[error("Cannot place an order with an empty cart")]
    EmptyOrder,

    /// Config values failed validation.
    #[error("Invalid terminal configuration: {0}")]
    InvalidConfig(String),

    /// Reading or writing a config or menu file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A config or menu file is not valid TOML for its schema.
    #[error("Failed to parse file: {0}")]
    Parse(#[from] toml::de::Error),

    /// Config could not be rendered back to TOML.
    #[error("Failed to write config: {0}")]
    Write(#[from] toml::ser::Error),
}

/// Convenience type alias for terminal results.
pub type TerminalResult<T> = Result<T, TerminalError>;

// =============================================================================
// API Error
// =============================================================================

/// Error returned across the boundary to the screen layer.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for the screen layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Menu item does not exist
    NotFound,

    /// Input or data validation failed
    ValidationError,

    /// Cart rule violated (caps, empty order)
    CartError,

    /// Checkout collaborator failed
    CheckoutError,

    /// Terminal configuration or menu file problem
    ConfigError,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        let code = match &err {
            CoreError::ItemNotFound(_) => ErrorCode::NotFound,
            CoreError::CartTooLarge { .. } => ErrorCode::CartError,
            CoreError::QuantityTooLarge { .. } | CoreError::Validation(_) => {
                ErrorCode::ValidationError
            }
        };
        ApiError::new(code, err.to_string())
    }
}

impl From<TerminalError> for ApiError {
    fn from(err: TerminalError) -> Self {
        match err {
            TerminalError::Core(e) => ApiError::from(e),
            TerminalError::EmptyOrder => ApiError::new(ErrorCode::CartError, err.to_string()),
            TerminalError::Checkout(e) => {
                tracing::error!("Checkout failed: {}", e);
                ApiError::new(ErrorCode::CheckoutError, "Order could not be placed")
            }
            TerminalError::InvalidConfig(_)
            | TerminalError::Io(_)
            | TerminalError::Parse(_)
            | TerminalError::Write(_) => ApiError::new(ErrorCode::ConfigError, err.to_string()),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

// =============================================================================
// Unit Tests
// =============================================================================
