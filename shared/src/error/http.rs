//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    ///
    /// Conflicts on carts and order items answer 400, which is what existing
    /// clients expect; only the protect-on-delete rule answers 409.
    pub fn http_status(&self) -> StatusCode {
        match self {
            // Success
            Self::Success => StatusCode::OK,

            // 404 Not Found
            Self::NotFound
            | Self::CategoryNotFound
            | Self::MenuItemNotFound
            | Self::CartNotFound
            | Self::OrderNotFound
            | Self::NoOrdersFound
            | Self::BookingNotFound
            | Self::UserNotFound
            | Self::GroupNotFound => StatusCode::NOT_FOUND,

            // 409 Conflict
            Self::CategoryHasMenuItems => StatusCode::CONFLICT,

            // 401 Unauthorized
            Self::NotAuthenticated
            | Self::InvalidCredentials
            | Self::TokenInvalid
            | Self::AccountDisabled => StatusCode::UNAUTHORIZED,

            // 403 Forbidden
            Self::PermissionDenied
            | Self::ManagerRequired
            | Self::AdminRequired
            | Self::NotOrderOwner
            | Self::NotAssignedCrew
            | Self::NotBookingOwner => StatusCode::FORBIDDEN,

            // 500 Internal Server Error
            Self::Unknown
            | Self::InternalError
            | Self::DatabaseError => StatusCode::INTERNAL_SERVER_ERROR,

            // 400 Bad Request (default for validation/business errors)
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_status() {
        assert_eq!(ErrorCode::Success.http_status(), StatusCode::OK);
    }

    #[test]
    fn test_not_found_status() {
        assert_eq!(ErrorCode::NotFound.http_status(), StatusCode::NOT_FOUND);
        assert_eq!(ErrorCode::CartNotFound.http_status(), StatusCode::NOT_FOUND);
        assert_eq!(ErrorCode::NoOrdersFound.http_status(), StatusCode::NOT_FOUND);
        assert_eq!(ErrorCode::UserNotFound.http_status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_conflicts_are_bad_request() {
        assert_eq!(ErrorCode::CartAlreadyExists.http_status(), StatusCode::BAD_REQUEST);
        assert_eq!(ErrorCode::OrderItemExists.http_status(), StatusCode::BAD_REQUEST);
        assert_eq!(ErrorCode::CartEmpty.http_status(), StatusCode::BAD_REQUEST);
        assert_eq!(ErrorCode::UserNotInGroup.http_status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_protect_on_delete_is_conflict() {
        assert_eq!(ErrorCode::CategoryHasMenuItems.http_status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_auth_status() {
        assert_eq!(ErrorCode::NotAuthenticated.http_status(), StatusCode::UNAUTHORIZED);
        assert_eq!(ErrorCode::InvalidCredentials.http_status(), StatusCode::UNAUTHORIZED);
        assert_eq!(ErrorCode::TokenInvalid.http_status(), StatusCode::UNAUTHORIZED);
        assert_eq!(ErrorCode::PasswordMismatch.http_status(), StatusCode::BAD_REQUEST);
        assert_eq!(ErrorCode::UsernameExists.http_status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_forbidden_status() {
        assert_eq!(ErrorCode::PermissionDenied.http_status(), StatusCode::FORBIDDEN);
        assert_eq!(ErrorCode::ManagerRequired.http_status(), StatusCode::FORBIDDEN);
        assert_eq!(ErrorCode::NotAssignedCrew.http_status(), StatusCode::FORBIDDEN);
        assert_eq!(ErrorCode::NotBookingOwner.http_status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_system_status() {
        assert_eq!(ErrorCode::InternalError.http_status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(ErrorCode::DatabaseError.http_status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_validation_default() {
        assert_eq!(ErrorCode::ValidationFailed.http_status(), StatusCode::BAD_REQUEST);
        assert_eq!(ErrorCode::MenuItemInvalidPrice.http_status(), StatusCode::BAD_REQUEST);
        assert_eq!(ErrorCode::CartInvalidQuantity.http_status(), StatusCode::BAD_REQUEST);
    }
}
