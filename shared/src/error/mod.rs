//! Unified error system for the E-Kantin API
//!
//! - [`ErrorCode`]: Standardized error codes for all error types
//! - [`ErrorCategory`]: Classification of errors by domain
//! - [`AppError`]: Error type with code, message, and details
//! - [`ErrorBody`]: The `{ "error": ... }` JSON envelope
//!
//! # Error Code Ranges
//!
//! - 0xxx: General errors
//! - 1xxx: Kantin errors
//! - 2xxx: Menu errors
//! - 3xxx: Profile errors
//! - 9xxx: System errors
//!
//! # Example
//!
//! ```
//! use shared::error::{AppError, ErrorCode};
//!
//! let err = AppError::new(ErrorCode::MenuPriceRequired);
//! assert_eq!(err.http_status().as_u16(), 400);
//!
//! let err = AppError::validation("limit must be a number")
//!     .with_detail("field", "limit");
//! assert!(err.details.is_some());
//! ```

mod category;
mod codes;
mod http;
mod types;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{AppError, ErrorBody};
