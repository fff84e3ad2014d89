use std::future::{ready, Ready};

use actix_web::{dev::Payload, web::Data, FromRequest, HttpRequest};
use tracing::warn;

use super::{SessionClaims, TokenIssuer, SESSION_COOKIE};
use crate::api::error::ServiceError;

/// Authenticated subject of a request.
///
/// Extracting it rejects the request with 401 when the session cookie is
/// missing or its token does not verify.
#[derive(Debug, Clone)]
pub struct SessionUser(pub SessionClaims);

impl SessionUser {
    pub fn email(&self) -> &str {
        &self.0.email
    }

    /// The subject may only read resources owned by its own email
    pub fn authorize_email(&self, requested: Option<&str>) -> Result<(), ServiceError> {
        match requested {
            Some(email) if email == self.email() => Ok(()),
            _ => {
                warn!("Session subject {} denied access to {:?}", self.email(), requested);
                Err(ServiceError::Forbidden)
            }
        }
    }

    fn from_http_request(req: &HttpRequest) -> Result<Self, ServiceError> {
        let issuer = req
            .app_data::<Data<TokenIssuer>>()
            .ok_or_else(|| ServiceError::Internal("token issuer is not configured".to_string()))?;

        let cookie = req
            .cookie(SESSION_COOKIE)
            .filter(|cookie| !cookie.value().is_empty())
            .ok_or_else(|| {
                warn!("Session cookie missing, authentication denied");
                ServiceError::Unauthenticated
            })?;

        issuer
            .verify(cookie.value())
            .map(SessionUser)
            .map_err(|e| {
                warn!("Session token rejected: {}", e);
                ServiceError::Unauthenticated
            })
    }
}

impl FromRequest for SessionUser {
    type Error = ServiceError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Self::from_http_request(req))
    }
}
