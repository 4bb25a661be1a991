use std::env;
use std::str::FromStr;

use crate::services::dashboard::CounterMode;

/// Where per-session state lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionBackend {
    Redis,
    Memory,
}

impl FromStr for SessionBackend {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "redis" => Ok(Self::Redis),
            "memory" => Ok(Self::Memory),
            other => Err(format!("unknown session backend '{other}'")),
        }
    }
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub database_max_connections: u32,
    pub redis_url: String,
    pub host: String,
    pub port: u16,
    pub jwt_secret: String,
    pub jwt_access_token_expiry_secs: i64,
    pub jwt_refresh_token_expiry_secs: i64,
    pub frontend_url: String,
    pub session_backend: SessionBackend,
    pub session_ttl_secs: u64,
    pub visit_counter_mode: CounterMode,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, env::VarError> {
        Ok(Self {
            database_url: env::var("DATABASE_URL")?,
            database_max_connections: parse_or("DATABASE_MAX_CONNECTIONS", 10),
            redis_url: env::var("REDIS_URL")
                .unwrap_or_else(|_| "redis://localhost:6379".to_string()),
            host: env::var("BACKEND_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: parse_or("BACKEND_PORT", 3000),
            jwt_secret: env::var("JWT_SECRET")?,
            jwt_access_token_expiry_secs: parse_or("JWT_ACCESS_TOKEN_EXPIRY_SECS", 900),
            jwt_refresh_token_expiry_secs: parse_or("JWT_REFRESH_TOKEN_EXPIRY_SECS", 604800),
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            session_backend: parse_or("SESSION_BACKEND", SessionBackend::Redis),
            // Two weeks, matching the usual session cookie age.
            session_ttl_secs: parse_or("SESSION_TTL_SECS", 1_209_600),
            visit_counter_mode: parse_or("VISIT_COUNTER_MODE", CounterMode::default()),
        })
    }
}

/// Read and parse an optional variable, falling back when missing or malformed.
fn parse_or<T: FromStr>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            tracing::warn!(key, value = %raw, "Invalid value, using default");
            default
        }),
        Err(_) => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_backend_names() {
        assert_eq!("memory".parse(), Ok(SessionBackend::Memory));
        assert_eq!(" Redis ".parse(), Ok(SessionBackend::Redis));
        assert!("memcached".parse::<SessionBackend>().is_err());
    }

    #[test]
    fn unknown_counter_mode_falls_back_to_default() {
        env::set_var("TAXI_TEST_COUNTER_MODE_TYPO", "read-then-write");
        let mode = parse_or("TAXI_TEST_COUNTER_MODE_TYPO", CounterMode::default());
        assert_eq!(mode, CounterMode::Atomic);

        env::set_var("TAXI_TEST_COUNTER_MODE_OK", "read_then_write");
        let mode = parse_or("TAXI_TEST_COUNTER_MODE_OK", CounterMode::default());
        assert_eq!(mode, CounterMode::ReadThenWrite);
    }

    #[test]
    fn missing_variable_uses_default() {
        let backend = parse_or("TAXI_TEST_SESSION_BACKEND_UNSET", SessionBackend::Redis);
        assert_eq!(backend, SessionBackend::Redis);
    }
}
