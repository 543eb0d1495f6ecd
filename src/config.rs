use anyhow::Context;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_ENVIRONMENT: &str = "development";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub connection_string: String,
    /// Overrides the database named in the connection string.
    pub database: Option<String>,
    pub host: String,
    pub port: u16,
    pub environment: String,
    pub fail_fast_on_connect_error: bool,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let connection_string = lookup("MONGODB_URI")
            .filter(|v| !v.is_empty())
            .context("MONGODB_URI is not set")?;

        let port = match lookup("PORT") {
            Some(v) => v
                .parse::<u16>()
                .with_context(|| format!("invalid PORT value {:?}", v))?,
            None => DEFAULT_PORT,
        };

        let fail_fast_on_connect_error = match lookup("FAIL_FAST_ON_CONNECT_ERROR") {
            Some(v) => parse_bool(&v)
                .with_context(|| format!("invalid FAIL_FAST_ON_CONNECT_ERROR value {:?}", v))?,
            None => true,
        };

        Ok(Self {
            connection_string,
            database: lookup("MONGODB_DATABASE").filter(|v| !v.is_empty()),
            host: lookup("APP_HOST").unwrap_or_else(|| DEFAULT_HOST.into()),
            port,
            environment: lookup("APP_ENV")
                .or_else(|| lookup("NODE_ENV"))
                .unwrap_or_else(|| DEFAULT_ENVIRONMENT.into()),
            fail_fast_on_connect_error,
        })
    }
}

fn parse_bool(v: &str) -> Option<bool> {
    match v.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> anyhow::Result<AppConfig> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_only_uri_is_set() {
        let cfg = config_from(&[("MONGODB_URI", "mongodb://localhost:27017/profiles")]).unwrap();
        assert_eq!(cfg.connection_string, "mongodb://localhost:27017/profiles");
        assert_eq!(cfg.database, None);
        assert_eq!(cfg.host, "0.0.0.0");
        assert_eq!(cfg.port, 3000);
        assert_eq!(cfg.environment, "development");
        assert!(cfg.fail_fast_on_connect_error);
    }

    #[test]
    fn missing_uri_is_an_error() {
        let err = config_from(&[("PORT", "8080")]).unwrap_err();
        assert!(err.to_string().contains("MONGODB_URI"));

        assert!(config_from(&[("MONGODB_URI", "")]).is_err());
    }

    #[test]
    fn reads_all_overrides() {
        let cfg = config_from(&[
            ("MONGODB_URI", "mongodb://db:27017"),
            ("MONGODB_DATABASE", "profiles"),
            ("APP_HOST", "127.0.0.1"),
            ("PORT", "8080"),
            ("APP_ENV", "production"),
            ("FAIL_FAST_ON_CONNECT_ERROR", "false"),
        ])
        .unwrap();
        assert_eq!(cfg.database.as_deref(), Some("profiles"));
        assert_eq!(cfg.host, "127.0.0.1");
        assert_eq!(cfg.port, 8080);
        assert_eq!(cfg.environment, "production");
        assert!(!cfg.fail_fast_on_connect_error);
    }

    #[test]
    fn environment_falls_back_to_node_env() {
        let cfg = config_from(&[("MONGODB_URI", "mongodb://db"), ("NODE_ENV", "production")])
            .unwrap();
        assert_eq!(cfg.environment, "production");

        let cfg = config_from(&[
            ("MONGODB_URI", "mongodb://db"),
            ("APP_ENV", "staging"),
            ("NODE_ENV", "production"),
        ])
        .unwrap();
        assert_eq!(cfg.environment, "staging");
    }

    #[test]
    fn rejects_malformed_port_and_flag() {
        let err = config_from(&[("MONGODB_URI", "mongodb://db"), ("PORT", "http")]).unwrap_err();
        assert!(err.to_string().contains("PORT"));

        let err = config_from(&[
            ("MONGODB_URI", "mongodb://db"),
            ("FAIL_FAST_ON_CONNECT_ERROR", "maybe"),
        ])
        .unwrap_err();
        assert!(err.to_string().contains("FAIL_FAST_ON_CONNECT_ERROR"));
    }
}
