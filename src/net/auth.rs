//! Authentication endpoints.

use super::errors::ApiError;
use super::gateway::Gateway;
use super::http::Transport;
use super::types::{AuthResponse, LoginRequest, RegisterRequest, User};

pub const REGISTER_PATH: &str = "/auth/register";
pub const LOGIN_PATH: &str = "/auth/login";
pub const CURRENT_USER_PATH: &str = "/users/me";

/// Create an account; a 409 means the email or username is taken.
///
/// # Errors
///
/// Any gateway error, unchanged.
pub async fn register<T: Transport>(gateway: &Gateway<T>, data: &RegisterRequest) -> Result<AuthResponse, ApiError> {
    gateway.post_json(REGISTER_PATH, data).await
}

/// # Errors
///
/// Any gateway error, unchanged; bad credentials arrive as a 401.
pub async fn login<T: Transport>(gateway: &Gateway<T>, data: &LoginRequest) -> Result<AuthResponse, ApiError> {
    gateway.post_json(LOGIN_PATH, data).await
}

/// The user the attached credential belongs to.
///
/// # Errors
///
/// Any gateway error, unchanged; a rejected credential arrives as a 401.
pub async fn current_user<T: Transport>(gateway: &Gateway<T>) -> Result<User, ApiError> {
    gateway.get_json(CURRENT_USER_PATH).await
}
