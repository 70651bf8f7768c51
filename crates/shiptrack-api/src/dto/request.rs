//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Signup request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SignupRequest {
    /// First name.
    #[validate(length(min = 1, message = "First name is required"))]
    pub first_name: String,
    /// Last name.
    #[validate(length(min = 1, message = "Last name is required"))]
    pub last_name: String,
    /// Email address.
    #[validate(email(message = "A valid email is required"))]
    pub email: String,
    /// Postal address.
    #[validate(length(min = 1, message = "Address is required"))]
    pub address: String,
    /// Telephone number.
    #[validate(length(min = 10, max = 15, message = "Telephone must be 10-15 characters"))]
    pub telephone: String,
    /// Password.
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
}

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Email address.
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Forgot-password request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ForgotPasswordRequest {
    /// Email address.
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
}

/// Reset-password request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ResetPasswordRequest {
    /// Reset token from the emailed link.
    #[validate(length(min = 1, message = "Token is required"))]
    pub token: String,
    /// New password.
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
}

/// Create shipment request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateShipmentRequest {
    /// Owner account email; must match the authenticated caller.
    #[validate(email(message = "A valid owner email is required"))]
    pub user_email: String,
    /// Pickup address.
    #[validate(length(min = 1, message = "Sender address is required"))]
    pub sender_address: String,
    /// Receiver first name.
    #[validate(length(min = 1, message = "Receiver first name is required"))]
    pub receiver_first_name: String,
    /// Receiver last name.
    #[validate(length(min = 1, message = "Receiver last name is required"))]
    pub receiver_last_name: String,
    /// Delivery address.
    #[validate(length(min = 1, message = "Receiver address is required"))]
    pub receiver_address: String,
    /// Receiver telephone number.
    #[validate(length(min = 10, max = 15, message = "Telephone must be 10-15 characters"))]
    pub receiver_telephone: String,
    /// Parcel weight in kilograms.
    #[validate(range(exclusive_min = 0.0, message = "Weight must be positive"))]
    pub weight: f64,
}

/// Status transition request body.
///
/// The status arrives as a string and is parsed against the enum so an
/// unknown literal yields the 400 of the error taxonomy rather than a
/// deserialization rejection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateStatusRequest {
    /// Requested destination status (wire spelling).
    pub status: String,
}
