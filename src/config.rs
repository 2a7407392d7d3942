use anyhow::Result;
use std::env;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    // Server
    pub port: u16,
    pub rust_log: String,

    // Database
    pub database_url: String,
    pub postgres_host: String,
    pub postgres_port: u16,
    pub postgres_user: String,
    pub postgres_password: String,
    pub postgres_db: String,

    // CORS
    pub cors_allowed_origins: String,

    // Demo data
    pub seed_demo_data: bool,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").unwrap_or_else(|_| {
            format!(
                "postgresql://{}:{}@{}:{}/{}",
                get_env_or_default("POSTGRES_USER", "postgres"),
                get_env_or_default("POSTGRES_PASSWORD", ""),
                get_env_or_default("POSTGRES_HOST", "localhost"),
                get_env_or_default("POSTGRES_PORT", "5432"),
                get_env_or_default("POSTGRES_DB", "surveys")
            )
        });

        Ok(Self {
            // Server
            port: get_env_or_default("PORT", "3001").parse().unwrap_or(3001),
            rust_log: get_env_or_default("RUST_LOG", "info"),

            // Database
            database_url,
            postgres_host: get_env_or_default("POSTGRES_HOST", "localhost"),
            postgres_port: get_env_or_default("POSTGRES_PORT", "5432")
                .parse()
                .unwrap_or(5432),
            postgres_user: get_env_or_default("POSTGRES_USER", "postgres"),
            postgres_password: get_env_or_default("POSTGRES_PASSWORD", ""),
            postgres_db: get_env_or_default("POSTGRES_DB", "surveys"),

            // CORS
            cors_allowed_origins: get_env_or_default(
                "CORS_ALLOWED_ORIGINS",
                "http://localhost:3000,http://localhost:5173",
            ),

            // Demo data
            seed_demo_data: get_env_or_default("SEED_DEMO_DATA", "false")
                .parse()
                .unwrap_or(false),
        })
    }
}

fn get_env_or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}
