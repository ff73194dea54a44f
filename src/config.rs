use std::fmt;
use std::time::Duration;

/// Runtime configuration, read from the process environment.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub session_key: Option<String>,
    pub session_lifetime: Duration,
    pub short_session: Duration,
    pub admin_username: String,
    pub admin_password: String,
    pub seed_demo: bool,
    pub login_max_attempts: u32,
    pub login_window: Duration,
    pub app_name: String,
    pub cookie_secure: bool,
}

#[derive(Debug)]
pub enum ConfigError {
    Invalid { key: String, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Invalid { key, value } => write!(f, "Invalid value for {key}: {value:?}"),
        }
    }
}

impl std::error::Error for ConfigError {}

pub const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

impl AppConfig {
    /// Load configuration from the environment, honouring a `.env` file if present.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup. Missing keys fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let text = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        Ok(Self {
            host: text("HOST", "127.0.0.1"),
            port: parse(&lookup, "PORT", 7071)?,
            database_url: text("DATABASE_URL", "sqlite://data/leakwatch.db"),
            session_key: lookup("SESSION_KEY").filter(|k| !k.is_empty()),
            session_lifetime: Duration::from_secs(parse::<u64, _>(&lookup, "SESSION_LIFETIME_HOURS", 24)? * 3600),
            short_session: Duration::from_secs(parse::<u64, _>(&lookup, "SHORT_SESSION_MINUTES", 60)? * 60),
            admin_username: text("ADMIN_USERNAME", "admin"),
            admin_password: text("ADMIN_PASSWORD", DEFAULT_ADMIN_PASSWORD),
            seed_demo: parse_bool(&lookup, "SEED_DEMO", false)?,
            login_max_attempts: parse(&lookup, "LOGIN_MAX_ATTEMPTS", 5)?,
            login_window: Duration::from_secs(parse(&lookup, "LOGIN_WINDOW_SECS", 900)?),
            app_name: text("APP_NAME", "LeakWatch"),
            cookie_secure: parse_bool(&lookup, "COOKIE_SECURE", false)?,
        })
    }

    pub fn bind_addr(&self) -> (String, u16) {
        (self.host.clone(), self.port)
    }
}

fn parse<T, F>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
            key: key.to_string(),
            value: raw,
        }),
    }
}

fn parse_bool<F>(lookup: &F, key: &str, default: bool) -> Result<bool, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" | "" => Ok(false),
            _ => Err(ConfigError::Invalid { key: key.to_string(), value: raw }),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_env_is_empty() {
        let cfg = config_from(&[]).unwrap();
        assert_eq!(cfg.port, 7071);
        assert_eq!(cfg.host, "127.0.0.1");
        assert_eq!(cfg.session_lifetime, Duration::from_secs(24 * 3600));
        assert_eq!(cfg.short_session, Duration::from_secs(3600));
        assert_eq!(cfg.login_max_attempts, 5);
        assert_eq!(cfg.login_window, Duration::from_secs(900));
        assert!(cfg.session_key.is_none());
        assert!(!cfg.seed_demo);
    }

    #[test]
    fn values_are_read_from_lookup() {
        let cfg = config_from(&[("PORT", "9000"), ("SEED_DEMO", "true"), ("APP_NAME", "Watch")]).unwrap();
        assert_eq!(cfg.port, 9000);
        assert!(cfg.seed_demo);
        assert_eq!(cfg.app_name, "Watch");
    }

    #[test]
    fn invalid_number_is_rejected() {
        let err = config_from(&[("PORT", "eighty")]).unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }

    #[test]
    fn invalid_bool_is_rejected() {
        assert!(config_from(&[("COOKIE_SECURE", "maybe")]).is_err());
    }
}
