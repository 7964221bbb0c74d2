use std::env;
use std::str::FromStr;

use anyhow::{anyhow, bail};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "postgres" => Ok(StoreBackend::Postgres),
            "memory" => Ok(StoreBackend::Memory),
            other => bail!("Invalid STORE_BACKEND: {}. Must be 'postgres' or 'memory'", other),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub store_backend: StoreBackend,
    pub database_url: Option<String>,
    pub max_connections: u32,
    pub run_migrations: bool,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let store_backend: StoreBackend = lookup("STORE_BACKEND")
            .unwrap_or_else(|| "postgres".into())
            .parse()?;

        let database_url = lookup("DATABASE_URL").filter(|url| !url.trim().is_empty());
        if store_backend == StoreBackend::Postgres && database_url.is_none() {
            bail!("DATABASE_URL must be set when STORE_BACKEND is postgres");
        }

        Ok(Self {
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".into()),
            port: lookup("PORT")
                .unwrap_or_else(|| "3000".into())
                .parse::<u16>()
                .map_err(|e| anyhow!("Invalid PORT: {}", e))?,
            store_backend,
            database_url,
            max_connections: lookup("DATABASE_MAX_CONNECTIONS")
                .unwrap_or_else(|| "10".into())
                .parse::<u32>()
                .map_err(|e| anyhow!("Invalid DATABASE_MAX_CONNECTIONS: {}", e))?,
            run_migrations: lookup("RUN_MIGRATIONS")
                .unwrap_or_else(|| "false".into())
                .trim()
                .parse::<bool>()
                .map_err(|_| anyhow!("Invalid RUN_MIGRATIONS: must be 'true' or 'false'"))?,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(pairs: &[(&str, &str)]) -> anyhow::Result<AppConfig> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_with_database_url() {
        let cfg = config(&[("DATABASE_URL", "postgres://localhost/ibank")]).unwrap();
        assert_eq!(cfg.port, 3000);
        assert_eq!(cfg.host, "0.0.0.0");
        assert_eq!(cfg.store_backend, StoreBackend::Postgres);
        assert_eq!(cfg.max_connections, 10);
        assert!(!cfg.run_migrations);
        assert_eq!(cfg.bind_address(), "0.0.0.0:3000");
    }

    #[test]
    fn test_postgres_requires_database_url() {
        assert!(config(&[]).is_err());
        assert!(config(&[("DATABASE_URL", "  ")]).is_err());
    }

    #[test]
    fn test_memory_backend_needs_no_database() {
        let cfg = config(&[("STORE_BACKEND", "Memory"), ("PORT", "8081")]).unwrap();
        assert_eq!(cfg.store_backend, StoreBackend::Memory);
        assert_eq!(cfg.port, 8081);
        assert!(cfg.database_url.is_none());
    }

    #[test]
    fn test_invalid_values() {
        assert!(config(&[("STORE_BACKEND", "sqlite")]).is_err());
        assert!(config(&[("STORE_BACKEND", "memory"), ("PORT", "http")]).is_err());
    }

    #[test]
    fn test_run_migrations_must_be_a_boolean() {
        for bad in ["1", "yes", "ture"] {
            let err = config(&[("STORE_BACKEND", "memory"), ("RUN_MIGRATIONS", bad)]).unwrap_err();
            assert!(err.to_string().contains("RUN_MIGRATIONS"));
        }

        let cfg = config(&[("STORE_BACKEND", "memory"), ("RUN_MIGRATIONS", "true")]).unwrap();
        assert!(cfg.run_migrations);
    }
}
