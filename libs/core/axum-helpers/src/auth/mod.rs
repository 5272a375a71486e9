//! Stateless JWT authentication.
//!
//! Tokens are HS256-signed and carry `{sub, email, exp, iat, jti}` claims.
//! Validity is signature + expiry only; nothing is persisted server-side.

pub mod config;
pub mod jwt;
pub mod middleware;

pub use config::JwtConfig;
pub use jwt::{JwtAuth, JwtClaims};
pub use middleware::{bearer_auth_middleware, AuthUser};
