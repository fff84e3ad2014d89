pub mod cookie;
pub mod session;
pub mod token;

pub use session::SessionUser;
pub use token::{SessionClaims, TokenIssuer};

/// Name of the cookie carrying the session token
pub const SESSION_COOKIE: &str = "token";
