//! Configuration for Users API

use axum_helpers::JwtConfig;
use core_config::{app_info, server::ServerConfig, AppInfo, FromEnv};
use database::postgres::PostgresConfig;

pub use core_config::Environment;

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub database: PostgresConfig,
    pub jwt: JwtConfig,
    pub server: ServerConfig,
    pub environment: Environment,
    pub default_per_page: u64,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let database = PostgresConfig::from_env()?;
        let jwt = JwtConfig::from_env()?;
        let server = ServerConfig::from_env()?;

        let default_per_page = std::env::var("DEFAULT_PER_PAGE")
            .unwrap_or_else(|_| "10".to_string())
            .parse()
            .unwrap_or(10);

        Ok(Self {
            app: app_info!(),
            database,
            jwt,
            server,
            environment,
            default_per_page,
        })
    }
}
