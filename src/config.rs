//! Static configuration read once at startup from the environment (and `.env`).

use crate::error::ConfigError;
use sqlx::mysql::MySqlConnectOptions;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_PORT: u16 = 3003;
pub const DEFAULT_POOL_SIZE: u32 = 10;

#[derive(Clone, Debug)]
pub struct DbConfig {
    /// Full connection url; when set it wins over the discrete fields.
    pub url: Option<String>,
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,
    pub pool_size: u32,
    pub acquire_timeout: Duration,
}

impl Default for DbConfig {
    fn default() -> Self {
        DbConfig {
            url: None,
            host: "localhost".into(),
            port: 3306,
            user: "modul150User".into(),
            password: "1234".into(),
            database: "modul150".into(),
            pool_size: DEFAULT_POOL_SIZE,
            acquire_timeout: Duration::from_secs(30),
        }
    }
}

impl DbConfig {
    pub fn connect_options(&self) -> Result<MySqlConnectOptions, ConfigError> {
        match &self.url {
            Some(url) => MySqlConnectOptions::from_str(url).map_err(ConfigError::DatabaseUrl),
            None => Ok(MySqlConnectOptions::new()
                .host(&self.host)
                .port(self.port)
                .username(&self.user)
                .password(&self.password)
                .database(&self.database)),
        }
    }
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub db: DbConfig,
    pub bind_addr: String,
    pub port: u16,
    pub access_log: PathBuf,
    /// Base url advertised in the API document.
    pub public_url: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup; missing keys fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = DbConfig::default();
        let port = parse_or(&lookup, "PORT", DEFAULT_PORT)?;
        let db = DbConfig {
            url: lookup("DATABASE_URL").filter(|s| !s.trim().is_empty()),
            host: lookup("DB_HOST").unwrap_or(defaults.host),
            port: parse_or(&lookup, "DB_PORT", defaults.port)?,
            user: lookup("DB_USER").unwrap_or(defaults.user),
            password: lookup("DB_PASSWORD").unwrap_or(defaults.password),
            database: lookup("DB_NAME").unwrap_or(defaults.database),
            pool_size: parse_or(&lookup, "DB_POOL_SIZE", defaults.pool_size)?,
            acquire_timeout: Duration::from_secs(parse_or(
                &lookup,
                "DB_ACQUIRE_TIMEOUT_SECS",
                defaults.acquire_timeout.as_secs(),
            )?),
        };
        Ok(AppConfig {
            db,
            bind_addr: lookup("BIND_ADDR").unwrap_or_else(|| "0.0.0.0".into()),
            port,
            access_log: lookup("ACCESS_LOG_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("./access.log")),
            public_url: lookup("PUBLIC_URL")
                .unwrap_or_else(|| format!("http://localhost:{}", port)),
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        None => Ok(default),
        Some(value) => {
            let parsed = value.trim().parse();
            parsed.map_err(|_| ConfigError::Invalid { key, value })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(pairs: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|k| env.get(k).cloned())
    }

    #[test]
    fn defaults() {
        let c = config(&[]).unwrap();
        assert_eq!(c.port, 3003);
        assert_eq!(c.db.pool_size, 10);
        assert_eq!(c.db.database, "modul150");
        assert_eq!(c.public_url, "http://localhost:3003");
        assert!(c.db.url.is_none());
    }

    #[test]
    fn overrides() {
        let c = config(&[("PORT", "8080"), ("DB_POOL_SIZE", "4"), ("DB_HOST", "db")]).unwrap();
        assert_eq!(c.port, 8080);
        assert_eq!(c.db.pool_size, 4);
        assert_eq!(c.db.host, "db");
        assert_eq!(c.public_url, "http://localhost:8080");
    }

    #[test]
    fn malformed_number_is_rejected() {
        let err = config(&[("DB_POOL_SIZE", "ten")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "DB_POOL_SIZE", .. }));
    }

    #[test]
    fn database_url_must_parse() {
        let c = config(&[("DATABASE_URL", "not a url")]).unwrap();
        assert!(c.db.connect_options().is_err());
    }
}
