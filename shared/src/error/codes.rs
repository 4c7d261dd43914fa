//! Unified error codes for the E-Kantin API
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Kantin errors
//! - 2xxx: Menu errors
//! - 3xxx: Profile errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values so they serialize the same
/// way for the Rust server and the TypeScript frontend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Validation failed
    ValidationFailed = 2,
    /// Required field missing
    RequiredField = 7,

    // ==================== 1xxx: Kantin ====================
    /// Kantin lookup needs an id or a name
    KantinLookupRequired = 1001,

    // ==================== 2xxx: Menu ====================
    /// Price ceiling missing or not positive
    MenuPriceRequired = 2001,
    /// Unknown new-menu period token
    MenuPeriodInvalid = 2002,
    /// Menu id list missing or not an array
    MenuIdsRequired = 2003,

    // ==================== 3xxx: Profile ====================
    /// Profile id missing
    ProfileIdRequired = 3001,
    /// Profile id is not a UUID
    ProfileIdInvalid = 3002,
    /// Profile email is malformed
    ProfileEmailInvalid = 3003,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Configuration error
    ConfigError = 9005,
    /// Email provider rejected or failed the request
    EmailDeliveryFailed = 9101,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Get the default message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::RequiredField => "Required field is missing",

            // Kantin
            ErrorCode::KantinLookupRequired => "kantin_id atau kantin_name wajib diisi",

            // Menu
            ErrorCode::MenuPriceRequired => "max_price wajib diisi dan harus lebih dari 0",
            ErrorCode::MenuPeriodInvalid => "period harus salah satu dari: today, week, month",
            ErrorCode::MenuIdsRequired => "menuIds must be an array",

            // Profile
            ErrorCode::ProfileIdRequired => "id wajib diisi",
            ErrorCode::ProfileIdInvalid => "id harus berupa UUID",
            ErrorCode::ProfileEmailInvalid => "Format email tidak valid",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::ConfigError => "Configuration error",
            ErrorCode::EmailDeliveryFailed => "Email delivery failed",
        }
    }
}

/// Error returned when converting an unknown u16 into an [`ErrorCode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl From<ErrorCode> for u16 {
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            2 => Ok(ErrorCode::ValidationFailed),
            7 => Ok(ErrorCode::RequiredField),

            // Kantin
            1001 => Ok(ErrorCode::KantinLookupRequired),

            // Menu
            2001 => Ok(ErrorCode::MenuPriceRequired),
            2002 => Ok(ErrorCode::MenuPeriodInvalid),
            2003 => Ok(ErrorCode::MenuIdsRequired),

            // Profile
            3001 => Ok(ErrorCode::ProfileIdRequired),
            3002 => Ok(ErrorCode::ProfileIdInvalid),
            3003 => Ok(ErrorCode::ProfileEmailInvalid),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),
            9005 => Ok(ErrorCode::ConfigError),
            9101 => Ok(ErrorCode::EmailDeliveryFailed),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
