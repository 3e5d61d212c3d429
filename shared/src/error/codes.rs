//! Unified error codes for the café server
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 3xxx: Booking errors
//! - 4xxx: Order errors
//! - 5xxx: Payment errors
//! - 6xxx: Menu errors (items and packages)
//! - 7xxx: Table errors
//! - 8xxx: User errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values so the dashboard can switch
/// on them without parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Invalid format
    InvalidFormat = 6,
    /// Required field missing
    RequiredField = 7,
    /// Value out of range
    ValueOutOfRange = 8,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Invalid credentials (email/password)
    InvalidCredentials = 1002,
    /// Token has expired
    TokenExpired = 1003,
    /// Token is invalid
    TokenInvalid = 1004,
    /// Account is temporarily blocked after too many failed logins
    AccountLocked = 1006,
    /// Account is disabled
    AccountDisabled = 1007,
    /// Account has been deleted
    AccountDeleted = 1008,
    /// Password and its confirmation differ
    PasswordMismatch = 1009,
    /// Old password is wrong
    WrongOldPassword = 1010,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,
    /// Specific role required
    RoleRequired = 2002,
    /// Cannot modify an owner account
    CannotModifyOwner = 2004,
    /// Cannot grant the owner role
    CannotAssignOwner = 2006,

    // ==================== 3xxx: Booking ====================
    /// Booking not found
    BookingNotFound = 3001,

    // ==================== 4xxx: Order ====================
    /// Order not found
    OrderNotFound = 4001,
    /// Order has already been paid
    OrderAlreadyPaid = 4002,
    /// Order has already been completed
    OrderAlreadyCompleted = 4003,
    /// Order is empty
    OrderEmpty = 4007,
    /// Order has not been paid yet
    OrderNotPaid = 4008,

    // ==================== 5xxx: Payment ====================
    /// Payment processing failed
    PaymentFailed = 5001,
    /// Payment type not found
    PaymentTypeNotFound = 5101,
    /// Payment type is not active
    PaymentTypeInactive = 5102,
    /// Payment type is referenced by orders
    PaymentTypeInUse = 5103,
    /// Payment gateway is not configured
    PaymentGatewayDisabled = 5201,

    // ==================== 6xxx: Menu ====================
    /// Menu item not found
    MenuItemNotFound = 6001,
    /// Menu item has invalid price
    MenuItemInvalidPrice = 6002,
    /// Menu item is not available
    MenuItemUnavailable = 6003,
    /// Package not found
    PackageNotFound = 6101,
    /// Package has no items
    PackageEmpty = 6102,
    /// Package is not available
    PackageUnavailable = 6104,

    // ==================== 7xxx: Table ====================
    /// Table not found
    TableNotFound = 7001,
    /// Table number already exists
    TableNumberExists = 7002,
    /// Table is referenced by orders or bookings
    TableHasOrders = 7104,

    // ==================== 8xxx: User ====================
    /// User not found
    UserNotFound = 8001,
    /// Email already registered
    EmailExists = 8002,
    /// User cannot delete their own account
    UserCannotDeleteSelf = 8003,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Network error
    NetworkError = 9003,
    /// Operation timeout
    TimeoutError = 9004,
    /// Configuration error
    ConfigError = 9005,
    /// QR code rendering failed
    QrCodeFailed = 9101,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::InvalidFormat => "Invalid format",
            ErrorCode::RequiredField => "Required field is missing",
            ErrorCode::ValueOutOfRange => "Value is out of range",

            // Auth
            ErrorCode::NotAuthenticated => "User is not authenticated",
            ErrorCode::InvalidCredentials => "Wrong email or password",
            ErrorCode::TokenExpired => "Authentication token has expired",
            ErrorCode::TokenInvalid => "Authentication token is invalid",
            ErrorCode::AccountLocked => "Account is still blocked",
            ErrorCode::AccountDisabled => "Account is no longer active",
            ErrorCode::AccountDeleted => "Account is deleted",
            ErrorCode::PasswordMismatch => "Passwords do not match",
            ErrorCode::WrongOldPassword => "Wrong old password",

            // Permission
            ErrorCode::PermissionDenied => "Permission denied",
            ErrorCode::RoleRequired => "Owner or manager role is required",
            ErrorCode::CannotModifyOwner => "Not allowed to modify a user with the owner role",
            ErrorCode::CannotAssignOwner => "Not allowed to grant the owner role",

            // Booking
            ErrorCode::BookingNotFound => "Booking not found",

            // Order
            ErrorCode::OrderNotFound => "Order not found",
            ErrorCode::OrderAlreadyPaid => "Order has already been paid",
            ErrorCode::OrderAlreadyCompleted => "Order has already been completed",
            ErrorCode::OrderEmpty => "Order has no items",
            ErrorCode::OrderNotPaid => "Order has not been paid",

            // Payment
            ErrorCode::PaymentFailed => "Payment failed",
            ErrorCode::PaymentTypeNotFound => "Payment type not found",
            ErrorCode::PaymentTypeInactive => "Payment type is not active",
            ErrorCode::PaymentTypeInUse => "Payment type is used by existing orders",
            ErrorCode::PaymentGatewayDisabled => "Payment gateway is not configured",

            // Menu
            ErrorCode::MenuItemNotFound => "Item not found",
            ErrorCode::MenuItemInvalidPrice => "Item price is invalid",
            ErrorCode::MenuItemUnavailable => "Item is not available",
            ErrorCode::PackageNotFound => "Package not found",
            ErrorCode::PackageEmpty => "Package has no items",
            ErrorCode::PackageUnavailable => "Package is not available",

            // Table
            ErrorCode::TableNotFound => "Table not found",
            ErrorCode::TableNumberExists => "Table number already exists",
            ErrorCode::TableHasOrders => "Table is used by existing orders or bookings",

            // User
            ErrorCode::UserNotFound => "User not found",
            ErrorCode::EmailExists => "Email already exists",
            ErrorCode::UserCannotDeleteSelf => "Cannot delete your own account",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::NetworkError => "Network error",
            ErrorCode::TimeoutError => "Operation timed out",
            ErrorCode::ConfigError => "Configuration error",
            ErrorCode::QrCodeFailed => "Failed to render QR code",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),
            6 => Ok(ErrorCode::InvalidFormat),
            7 => Ok(ErrorCode::RequiredField),
            8 => Ok(ErrorCode::ValueOutOfRange),

            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),
            1002 => Ok(ErrorCode::InvalidCredentials),
            1003 => Ok(ErrorCode::TokenExpired),
            1004 => Ok(ErrorCode::TokenInvalid),
            1006 => Ok(ErrorCode::AccountLocked),
            1007 => Ok(ErrorCode::AccountDisabled),
            1008 => Ok(ErrorCode::AccountDeleted),
            1009 => Ok(ErrorCode::PasswordMismatch),
            1010 => Ok(ErrorCode::WrongOldPassword),

            // Permission
            2001 => Ok(ErrorCode::PermissionDenied),
            2002 => Ok(ErrorCode::RoleRequired),
            2004 => Ok(ErrorCode::CannotModifyOwner),
            2006 => Ok(ErrorCode::CannotAssignOwner),

            // Booking
            3001 => Ok(ErrorCode::BookingNotFound),

            // Order
            4001 => Ok(ErrorCode::OrderNotFound),
            4002 => Ok(ErrorCode::OrderAlreadyPaid),
            4003 => Ok(ErrorCode::OrderAlreadyCompleted),
            4007 => Ok(ErrorCode::OrderEmpty),
            4008 => Ok(ErrorCode::OrderNotPaid),

            // Payment
            5001 => Ok(ErrorCode::PaymentFailed),
            5101 => Ok(ErrorCode::PaymentTypeNotFound),
            5102 => Ok(ErrorCode::PaymentTypeInactive),
            5103 => Ok(ErrorCode::PaymentTypeInUse),
            5201 => Ok(ErrorCode::PaymentGatewayDisabled),

            // Menu
            6001 => Ok(ErrorCode::MenuItemNotFound),
            6002 => Ok(ErrorCode::MenuItemInvalidPrice),
            6003 => Ok(ErrorCode::MenuItemUnavailable),
            6101 => Ok(ErrorCode::PackageNotFound),
            6102 => Ok(ErrorCode::PackageEmpty),
            6104 => Ok(ErrorCode::PackageUnavailable),

            // Table
            7001 => Ok(ErrorCode::TableNotFound),
            7002 => Ok(ErrorCode::TableNumberExists),
            7104 => Ok(ErrorCode::TableHasOrders),

            // User
            8001 => Ok(ErrorCode::UserNotFound),
            8002 => Ok(ErrorCode::EmailExists),
            8003 => Ok(ErrorCode::UserCannotDeleteSelf),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),
            9003 => Ok(ErrorCode::NetworkError),
            9004 => Ok(ErrorCode::TimeoutError),
            9005 => Ok(ErrorCode::ConfigError),
            9101 => Ok(ErrorCode::QrCodeFailed),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::Success.code(), 0);
        assert_eq!(ErrorCode::NotFound.code(), 3);
        assert_eq!(ErrorCode::InvalidCredentials.code(), 1002);
        assert_eq!(ErrorCode::AccountLocked.code(), 1006);
        assert_eq!(ErrorCode::RoleRequired.code(), 2002);
        assert_eq!(ErrorCode::BookingNotFound.code(), 3001);
        assert_eq!(ErrorCode::OrderNotPaid.code(), 4008);
        assert_eq!(ErrorCode::PaymentTypeInactive.code(), 5102);
        assert_eq!(ErrorCode::PackageNotFound.code(), 6101);
        assert_eq!(ErrorCode::TableNumberExists.code(), 7002);
        assert_eq!(ErrorCode::EmailExists.code(), 8002);
        assert_eq!(ErrorCode::QrCodeFailed.code(), 9101);
    }

    #[test]
    fn test_try_from_accepts_every_declared_code() {
        let all = [
            ErrorCode::Success,
            ErrorCode::ValidationFailed,
            ErrorCode::AccountDeleted,
            ErrorCode::WrongOldPassword,
            ErrorCode::CannotAssignOwner,
            ErrorCode::OrderAlreadyCompleted,
            ErrorCode::PaymentGatewayDisabled,
            ErrorCode::MenuItemUnavailable,
            ErrorCode::PackageUnavailable,
            ErrorCode::TableHasOrders,
            ErrorCode::UserCannotDeleteSelf,
            ErrorCode::ConfigError,
        ];
        for code in all {
            assert_eq!(ErrorCode::try_from(code.code()), Ok(code));
        }
    }

    #[test]
    fn test_try_from_invalid() {
        assert_eq!(ErrorCode::try_from(999), Err(InvalidErrorCode(999)));
        assert_eq!(ErrorCode::try_from(10000), Err(InvalidErrorCode(10000)));
        assert_eq!(ErrorCode::try_from(1005), Err(InvalidErrorCode(1005)));
    }

    #[test]
    fn test_serialize_as_number() {
        assert_eq!(serde_json::to_string(&ErrorCode::NotFound).unwrap(), "3");
        assert_eq!(
            serde_json::to_string(&ErrorCode::OrderNotFound).unwrap(),
            "4001"
        );
        let code: ErrorCode = serde_json::from_str("6101").unwrap();
        assert_eq!(code, ErrorCode::PackageNotFound);
        assert!(serde_json::from_str::<ErrorCode>("4999").is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", ErrorCode::Success), "0");
        assert_eq!(format!("{}", ErrorCode::TableNotFound), "7001");
        assert_eq!(format!("{}", InvalidErrorCode(999)), "invalid error code: 999");
    }

    #[test]
    fn test_message() {
        assert_eq!(ErrorCode::InvalidCredentials.message(), "Wrong email or password");
        assert_eq!(ErrorCode::MenuItemNotFound.message(), "Item not found");
        assert_eq!(ErrorCode::InternalError.message(), "Internal server error");
    }
}
