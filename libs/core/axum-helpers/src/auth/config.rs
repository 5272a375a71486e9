//! JWT configuration.
//!
//! Implements the `FromEnv` trait from `core_config`, following the same
//! pattern as `PostgresConfig` and `ServerConfig`.

use core_config::{env_or_default, env_required, ConfigError, FromEnv};

/// Default token lifetime in seconds (1 hour).
pub const DEFAULT_TOKEN_TTL_SECS: i64 = 3600;

/// JWT authentication configuration.
///
/// Loaded from environment variables:
/// - `JWT_SECRET` (required) - Must be at least 32 characters for security
/// - `JWT_TTL_SECS` (optional, default: 3600) - Token lifetime in seconds
///
/// # Example
///
/// ```ignore
/// use axum_helpers::JwtConfig;
/// use core_config::FromEnv;
///
/// // From environment variables
/// let config = JwtConfig::from_env()?;
///
/// // Manual construction (for testing)
/// let config = JwtConfig::new("my-super-secret-key-that-is-at-least-32-chars", 3600);
/// ```
#[derive(Clone, Debug)]
pub struct JwtConfig {
    /// JWT signing secret (minimum 32 characters)
    pub secret: String,

    /// Token lifetime in seconds
    pub ttl_secs: i64,
}

impl JwtConfig {
    /// Create a new JwtConfig with the given secret and TTL.
    ///
    /// # Panics
    /// Panics if the secret is less than 32 characters.
    pub fn new(secret: impl Into<String>, ttl_secs: i64) -> Self {
        let secret = secret.into();
        assert!(
            secret.len() >= 32,
            "JWT secret must be at least 32 characters"
        );
        Self { secret, ttl_secs }
    }
}

impl FromEnv for JwtConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let secret = env_required("JWT_SECRET")?;

        if secret.len() < 32 {
            return Err(ConfigError::ParseError {
                key: "JWT_SECRET".to_string(),
                details: format!(
                    "must be at least 32 characters for security (got {}). Generate one with: openssl rand -base64 32",
                    secret.len()
                ),
            });
        }

        let ttl_secs = env_or_default("JWT_TTL_SECS", &DEFAULT_TOKEN_TTL_SECS.to_string())
            .parse()
            .map_err(|e| ConfigError::ParseError {
                key: "JWT_TTL_SECS".to_string(),
                details: format!("{}", e),
            })?;

        Ok(Self { secret, ttl_secs })
    }
}
