/// Configuration management for the API server
///
/// Configuration comes from environment variables, with `.env` support for
/// local development.
///
/// # Environment Variables
///
/// - `DATABASE_URL`: PostgreSQL connection string (required)
/// - `DATABASE_MAX_CONNECTIONS`: Pool size (default: 10)
/// - `API_HOST`: Host to bind to (default: 0.0.0.0)
/// - `API_PORT`: Port to bind to (default: 8080)
/// - `JWT_KEY`: HMAC signing key, at least 32 characters (required)
/// - `JWT_ISSUER`: Token issuer (default: taskboard-api)
/// - `JWT_AUDIENCE`: Token audience (default: taskboard-web)
/// - `JWT_EXPIRATION_MINUTES`: Token lifetime, at most one year (default: 60)
/// - `CORS_ALLOWED_ORIGINS`: Comma-separated origins, `*` for any
/// - `APP_ENV`: `production` enables HSTS (default: development)
/// - `SEED_DEMO_DATA`: Seed an empty database with demo rows (default: true)
///
/// # Example
///
/// ```no_run
/// use taskboard_api::config::Config;
///
/// # fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// println!("Server will listen on {}", config.bind_address());
/// # Ok(())
/// # }
/// ```

use std::env;

use taskboard_shared::{
    auth::jwt::{JwtSettings, DEFAULT_AUDIENCE, DEFAULT_EXPIRATION_MINUTES, DEFAULT_ISSUER},
    db::pool::DatabaseConfig,
};

/// Origins allowed when `CORS_ALLOWED_ORIGINS` is unset
pub const DEFAULT_CORS_ORIGINS: &str = "http://localhost:5173,http://localhost:3000";

const MIN_JWT_KEY_LEN: usize = 32;

/// One year
const MAX_EXPIRATION_MINUTES: i64 = 525_600;

/// Complete application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// API server configuration
    pub api: ApiConfig,

    /// Database pool configuration
    pub database: DatabaseConfig,

    /// Token signing and validation settings
    pub jwt: JwtSettings,

    /// Whether to seed demo data into an empty database on startup
    pub seed_demo_data: bool,
}

/// API server configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host to bind to
    pub host: String,

    /// Port to bind to
    pub port: u16,

    /// Allowed CORS origins; `*` means any origin
    pub cors_origins: Vec<String>,

    /// Production mode (enables HSTS)
    pub production: bool,
}

impl Config {
    /// Loads configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `DATABASE_URL` or `JWT_KEY` is missing
    /// - `JWT_KEY` is shorter than 32 characters
    /// - A numeric or boolean variable does not parse
    pub fn from_env() -> anyhow::Result<Self> {
        // Load .env file if present (for development)
        dotenvy::dotenv().ok();

        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str, default: &str| lookup(name).unwrap_or_else(|| default.to_string());

        let host = var("API_HOST", "0.0.0.0");
        let port = var("API_PORT", "8080")
            .parse::<u16>()
            .map_err(|e| anyhow::anyhow!("API_PORT is not a valid port: {}", e))?;

        let database_url = lookup("DATABASE_URL")
            .ok_or_else(|| anyhow::anyhow!("DATABASE_URL environment variable is required"))?;

        let max_connections = var("DATABASE_MAX_CONNECTIONS", "10")
            .parse::<u32>()
            .map_err(|e| anyhow::anyhow!("DATABASE_MAX_CONNECTIONS is not a number: {}", e))?;

        let jwt_key = lookup("JWT_KEY")
            .ok_or_else(|| anyhow::anyhow!("JWT_KEY environment variable is required"))?;

        if jwt_key.len() < MIN_JWT_KEY_LEN {
            anyhow::bail!("JWT_KEY must be at least {} characters long", MIN_JWT_KEY_LEN);
        }

        let expiration_minutes = var("JWT_EXPIRATION_MINUTES", &DEFAULT_EXPIRATION_MINUTES.to_string())
            .parse::<i64>()
            .map_err(|e| anyhow::anyhow!("JWT_EXPIRATION_MINUTES is not a number: {}", e))?;

        if expiration_minutes <= 0 {
            anyhow::bail!("JWT_EXPIRATION_MINUTES must be positive");
        }
        if expiration_minutes > MAX_EXPIRATION_MINUTES {
            anyhow::bail!(
                "JWT_EXPIRATION_MINUTES must be at most {} (one year)",
                MAX_EXPIRATION_MINUTES
            );
        }

        let seed_demo_data = parse_bool("SEED_DEMO_DATA", &var("SEED_DEMO_DATA", "true"))?;
        let production = var("APP_ENV", "development").eq_ignore_ascii_case("production");

        Ok(Self {
            api: ApiConfig {
                host,
                port,
                cors_origins: parse_origins(&var("CORS_ALLOWED_ORIGINS", DEFAULT_CORS_ORIGINS)),
                production,
            },
            database: DatabaseConfig {
                url: database_url,
                max_connections,
                ..Default::default()
            },
            jwt: JwtSettings {
                key: jwt_key,
                issuer: var("JWT_ISSUER", DEFAULT_ISSUER),
                audience: var("JWT_AUDIENCE", DEFAULT_AUDIENCE),
                expiration_minutes,
            },
            seed_demo_data,
        })
    }

    /// Returns the server bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.api.host, self.api.port)
    }

    /// Whether any origin may call the API
    pub fn allows_any_origin(&self) -> bool {
        self.api.cors_origins.iter().any(|o| o == "*")
    }
}

/// Splits a comma-separated origin list
///
/// Entries are trimmed, empty entries dropped and duplicates removed
/// case-insensitively, keeping the first spelling.
pub fn parse_origins(raw: &str) -> Vec<String> {
    let mut origins: Vec<String> = Vec::new();

    for origin in raw.split(',').map(str::trim).filter(|o| !o.is_empty()) {
        let origin = origin.trim_end_matches('/');
        if !origins.iter().any(|o| o.eq_ignore_ascii_case(origin)) {
            origins.push(origin.to_string());
        }
    }

    origins
}

fn parse_bool(name: &str, value: &str) -> anyhow::Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => anyhow::bail!("{} must be a boolean, got '{}'", name, other),
    }
}
