use actix_web::{
    HttpResponse, post,
    web::{Data, ServiceConfig},
};
use actix_web_validator::Json;
use tracing::info;

use super::models::{LoginRequest, LoginResponse, LogoutResponse};
use crate::api::error::ServiceError;
use crate::auth::{cookie, TokenIssuer};
use crate::config::CookiePolicy;

/// Issue a session token for the submitted user and set it as a cookie
#[post("/jwt")]
async fn login(
    issuer: Data<TokenIssuer>,
    policy: Data<CookiePolicy>,
    user: Json<LoginRequest>,
) -> Result<HttpResponse, ServiceError> {
    let LoginRequest { email, profile } = user.into_inner();
    let token = issuer.issue(&email, profile)?;

    info!("Issued session token for {}", email);
    Ok(HttpResponse::Ok()
        .cookie(cookie::session_cookie(**policy, token))
        .json(LoginResponse { success: true }))
}

#[post("/logout")]
async fn logout(policy: Data<CookiePolicy>) -> HttpResponse {
    HttpResponse::Ok()
        .cookie(cookie::removal_cookie(**policy))
        .json(LogoutResponse {
            success: "Logout successful",
        })
}

pub fn auth_config(config: &mut ServiceConfig) {
    config.service(login).service(logout);
}
