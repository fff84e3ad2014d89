use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::db::models::Document;

/// User object submitted to obtain a session token
#[derive(Deserialize, Debug, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,

    /// Remaining user fields, signed into the token as-is
    #[serde(flatten)]
    pub profile: Document,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub success: bool,
}

#[derive(Serialize)]
pub struct LogoutResponse {
    pub success: &'static str,
}
