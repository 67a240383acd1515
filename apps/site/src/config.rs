use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};

use crate::careers::loader::DEFAULT_CONTENT_DIR;
use crate::careers::ValuePolicy;

/// Site configuration loaded from environment variables (and `.env`).
/// Every variable is optional; CLI flags override the directory and port.
#[derive(Debug, Clone)]
pub struct Config {
    pub content_dir: PathBuf,
    pub out_dir: PathBuf,
    pub port: u16,
    pub rust_log: String,
    pub value_policy: ValuePolicy,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        Ok(Config {
            content_dir: lookup("CAREERS_DIR")
                .unwrap_or_else(|| DEFAULT_CONTENT_DIR.to_string())
                .into(),
            out_dir: lookup("OUT_DIR").unwrap_or_else(|| "out".to_string()).into(),
            port: lookup("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            value_policy: match lookup("VALUE_POLICY") {
                Some(raw) => raw
                    .parse()
                    .map_err(|e: String| anyhow!(e))
                    .context("VALUE_POLICY is invalid")?,
                None => ValuePolicy::default(),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.content_dir, PathBuf::from("data/careers"));
        assert_eq!(config.out_dir, PathBuf::from("out"));
        assert_eq!(config.port, 8080);
        assert_eq!(config.rust_log, "info");
        assert_eq!(config.value_policy, ValuePolicy::Any);
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("CAREERS_DIR", "/srv/careers"),
            ("OUT_DIR", "public"),
            ("PORT", "3000"),
            ("VALUE_POLICY", "boolean_only"),
        ])
        .unwrap();
        assert_eq!(config.content_dir, PathBuf::from("/srv/careers"));
        assert_eq!(config.out_dir, PathBuf::from("public"));
        assert_eq!(config.port, 3000);
        assert_eq!(config.value_policy, ValuePolicy::BooleanOnly);
    }

    #[test]
    fn test_invalid_port() {
        let err = config_from(&[("PORT", "eighty")]).unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }

    #[test]
    fn test_invalid_policy() {
        let err = config_from(&[("VALUE_POLICY", "strict")]).unwrap_err();
        assert!(err.to_string().contains("VALUE_POLICY"));
    }
}
