use actix_web::cookie::Cookie;

use super::SESSION_COOKIE;
use crate::config::CookiePolicy;

/// Http-only session cookie carrying `token`
pub fn session_cookie(policy: CookiePolicy, token: String) -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE, token)
        .path("/")
        .http_only(true)
        .secure(policy.secure)
        .same_site(policy.same_site)
        .finish()
}

/// Cookie that clears the session cookie.
///
/// Browsers only drop a cookie when path, secure and same-site match the one
/// that was set.
pub fn removal_cookie(policy: CookiePolicy) -> Cookie<'static> {
    let mut cookie = session_cookie(policy, String::new());
    cookie.make_removal();
    cookie
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DeploymentEnvironment;
    use actix_web::cookie::{time::Duration, SameSite};

    #[test]
    fn production_session_cookie_flags() {
        let policy = CookiePolicy::for_environment(DeploymentEnvironment::Production);
        let cookie = session_cookie(policy, "abc".to_string());

        assert_eq!(cookie.name(), "token");
        assert_eq!(cookie.value(), "abc");
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::None));
        assert_eq!(cookie.path(), Some("/"));
    }

    #[test]
    fn removal_cookie_matches_session_cookie_attributes() {
        let policy = CookiePolicy::for_environment(DeploymentEnvironment::Development);
        let cookie = removal_cookie(policy);

        assert_eq!(cookie.name(), "token");
        assert_eq!(cookie.value(), "");
        assert_eq!(cookie.max_age(), Some(Duration::ZERO));
        assert_eq!(cookie.secure(), Some(false));
        assert_eq!(cookie.same_site(), Some(SameSite::Strict));
        assert_eq!(cookie.path(), Some("/"));
    }
}
