//! Unified error codes for the Little Lemon platform
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 3xxx: Catalog errors
//! - 4xxx: Cart errors
//! - 5xxx: Order errors
//! - 6xxx: Booking errors
//! - 7xxx: User and group errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values so clients can branch on
/// a stable number instead of parsing messages.
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

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Invalid credentials (username/password)
    InvalidCredentials = 1002,
    /// Token is invalid
    TokenInvalid = 1003,
    /// Account is disabled
    AccountDisabled = 1004,
    /// Password and confirmation differ
    PasswordMismatch = 1005,
    /// Password rejected by the strength rules
    PasswordTooWeak = 1006,
    /// Username already taken
    UsernameExists = 1007,
    /// Logout without an active token
    NoActiveToken = 1008,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,
    /// Manager role required
    ManagerRequired = 2002,
    /// Manager or site admin required
    AdminRequired = 2003,
    /// Caller does not own the order
    NotOrderOwner = 2004,
    /// Delivery crew is not assigned to the order
    NotAssignedCrew = 2005,
    /// Caller does not own the booking
    NotBookingOwner = 2006,

    // ==================== 3xxx: Catalog ====================
    /// Category not found
    CategoryNotFound = 3001,
    /// Category still referenced by menu items
    CategoryHasMenuItems = 3002,
    /// Menu item not found
    MenuItemNotFound = 3101,
    /// Menu item price is not a valid amount
    MenuItemInvalidPrice = 3102,
    /// Menu item references an unknown category
    MenuItemCategoryInvalid = 3103,

    // ==================== 4xxx: Cart ====================
    /// No cart to delete
    CartNotFound = 4001,
    /// No cart to show
    CartEmpty = 4002,
    /// User already holds a cart
    CartAlreadyExists = 4003,
    /// Quantity outside the accepted range
    CartInvalidQuantity = 4004,

    // ==================== 5xxx: Order ====================
    /// Order not found
    OrderNotFound = 5001,
    /// Customer has not placed any order
    NoOrdersFound = 5002,
    /// User already ordered this menu item
    OrderItemExists = 5003,
    /// Delivery crew user does not exist
    DeliveryCrewNotFound = 5004,
    /// Delivery crew update without a status
    OrderStatusRequired = 5005,

    // ==================== 6xxx: Booking ====================
    /// Booking not found
    BookingNotFound = 6001,
    /// Booking has an invalid guest count
    BookingInvalidGuests = 6002,

    // ==================== 7xxx: User / Group ====================
    /// User not found
    UserNotFound = 7001,
    /// Group not found
    GroupNotFound = 7002,
    /// User is not a member of the group
    UserNotInGroup = 7003,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
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

    /// Default human-readable message for this code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "Unknown error",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::InvalidFormat => "Invalid format",
            ErrorCode::RequiredField => "Required field missing",

            // Auth
            ErrorCode::NotAuthenticated => "Authentication credentials were not provided",
            ErrorCode::InvalidCredentials => "Invalid credentials",
            ErrorCode::TokenInvalid => "Invalid token",
            ErrorCode::AccountDisabled => "User inactive or deleted",
            ErrorCode::PasswordMismatch => "Passwords don't match",
            ErrorCode::PasswordTooWeak => "Password is too weak",
            ErrorCode::UsernameExists => "A user with that username already exists",
            ErrorCode::NoActiveToken => "No active token found",

            // Permission
            ErrorCode::PermissionDenied => {
                "You do not have permission to perform this action"
            }
            ErrorCode::ManagerRequired => "Only managers can perform this action",
            ErrorCode::AdminRequired => "Only managers or administrators can perform this action",
            ErrorCode::NotOrderOwner => "This order does not belong to you",
            ErrorCode::NotAssignedCrew => "This order is not assigned to you",
            ErrorCode::NotBookingOwner => "You can only access your own bookings",

            // Catalog
            ErrorCode::CategoryNotFound => "Category not found",
            ErrorCode::CategoryHasMenuItems => {
                "Category is referenced by menu items and cannot be deleted"
            }
            ErrorCode::MenuItemNotFound => "Menu item not found",
            ErrorCode::MenuItemInvalidPrice => "Invalid menu item price",
            ErrorCode::MenuItemCategoryInvalid => "Invalid category",

            // Cart
            ErrorCode::CartNotFound => "The user has no cart",
            ErrorCode::CartEmpty => "The cart is empty.",
            ErrorCode::CartAlreadyExists => "The user has already a cart.",
            ErrorCode::CartInvalidQuantity => "Quantity must be a positive integer",

            // Order
            ErrorCode::OrderNotFound => "Order not found",
            ErrorCode::NoOrdersFound => "No orders found for this user",
            ErrorCode::OrderItemExists => "This menu item has already been ordered by the user",
            ErrorCode::DeliveryCrewNotFound => "Delivery crew user not found",
            ErrorCode::OrderStatusRequired => "Delivery crew may only update the status field",

            // Booking
            ErrorCode::BookingNotFound => "Booking not found",
            ErrorCode::BookingInvalidGuests => "Number of guests must be at least 1",

            // User / Group
            ErrorCode::UserNotFound => "User not found",
            ErrorCode::GroupNotFound => "Group not found",
            ErrorCode::UserNotInGroup => "User is not a member of this group",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
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

            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),
            1002 => Ok(ErrorCode::InvalidCredentials),
            1003 => Ok(ErrorCode::TokenInvalid),
            1004 => Ok(ErrorCode::AccountDisabled),
            1005 => Ok(ErrorCode::PasswordMismatch),
            1006 => Ok(ErrorCode::PasswordTooWeak),
            1007 => Ok(ErrorCode::UsernameExists),
            1008 => Ok(ErrorCode::NoActiveToken),

            // Permission
            2001 => Ok(ErrorCode::PermissionDenied),
            2002 => Ok(ErrorCode::ManagerRequired),
            2003 => Ok(ErrorCode::AdminRequired),
            2004 => Ok(ErrorCode::NotOrderOwner),
            2005 => Ok(ErrorCode::NotAssignedCrew),
            2006 => Ok(ErrorCode::NotBookingOwner),

            // Catalog
            3001 => Ok(ErrorCode::CategoryNotFound),
            3002 => Ok(ErrorCode::CategoryHasMenuItems),
            3101 => Ok(ErrorCode::MenuItemNotFound),
            3102 => Ok(ErrorCode::MenuItemInvalidPrice),
            3103 => Ok(ErrorCode::MenuItemCategoryInvalid),

            // Cart
            4001 => Ok(ErrorCode::CartNotFound),
            4002 => Ok(ErrorCode::CartEmpty),
            4003 => Ok(ErrorCode::CartAlreadyExists),
            4004 => Ok(ErrorCode::CartInvalidQuantity),

            // Order
            5001 => Ok(ErrorCode::OrderNotFound),
            5002 => Ok(ErrorCode::NoOrdersFound),
            5003 => Ok(ErrorCode::OrderItemExists),
            5004 => Ok(ErrorCode::DeliveryCrewNotFound),
            5005 => Ok(ErrorCode::OrderStatusRequired),

            // Booking
            6001 => Ok(ErrorCode::BookingNotFound),
            6002 => Ok(ErrorCode::BookingInvalidGuests),

            // User / Group
            7001 => Ok(ErrorCode::UserNotFound),
            7002 => Ok(ErrorCode::GroupNotFound),
            7003 => Ok(ErrorCode::UserNotInGroup),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
