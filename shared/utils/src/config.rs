use config::{Config, ConfigError, Environment, File};
use partlink_models::SupplierDescriptor;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::env;
use std::time::Duration;

use crate::error::{PartlinkError, PartlinkResult};
use crate::validation::validate_model;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub suppliers: Vec<SupplierDescriptor>,
    pub fetch: FetchConfig,
    pub logging: LoggingConfig,
    pub monitoring: MonitoringConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub max_request_size: usize,
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Upper bound for a single supplier retrieval.
    pub supplier_timeout_ms: u64,
    /// Upper bound for the whole fan-out; stragglers past it count as failed.
    pub global_timeout_ms: u64,
    pub user_agent: String,
}

impl FetchConfig {
    pub fn supplier_timeout(&self) -> Duration {
        Duration::from_millis(self.supplier_timeout_ms)
    }

    pub fn global_timeout(&self) -> Duration {
        Duration::from_millis(self.global_timeout_ms)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
    pub file_path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub metrics_enabled: bool,
    pub prometheus_namespace: String,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if it exists
        dotenvy::dotenv().ok();

        let config = Config::builder()
            // Start with built-in defaults so partial files are enough
            .add_source(Config::try_from(&AppConfig::default())?)
            .add_source(File::with_name("config/default").required(false))
            // Add environment-specific config
            .add_source(
                File::with_name(&format!(
                    "config/{}",
                    env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into())
                ))
                .required(false),
            )
            // Add local config (gitignored)
            .add_source(File::with_name("config/local").required(false))
            // Add environment variables with PARTLINK prefix
            .add_source(
                Environment::with_prefix("PARTLINK")
                    .separator("__")
                    .try_parsing(true),
            );

        config.build()?.try_deserialize()
    }

    /// Checks the loaded configuration before the service starts.
    pub fn validate(&self) -> PartlinkResult<()> {
        if self.suppliers.is_empty() {
            return Err(PartlinkError::configuration("at least one supplier must be configured"));
        }

        let mut seen = HashSet::new();
        for supplier in &self.suppliers {
            validate_model(supplier).map_err(|e| {
                PartlinkError::configuration(format!("supplier '{}': {}", supplier.name, e))
            })?;
            if !seen.insert(supplier.name.as_str()) {
                return Err(PartlinkError::configuration(format!(
                    "supplier '{}' is configured more than once",
                    supplier.name
                )));
            }
        }

        if self.fetch.supplier_timeout_ms == 0 || self.fetch.global_timeout_ms == 0 {
            return Err(PartlinkError::configuration("fetch timeouts must be greater than zero"));
        }

        Ok(())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8080,
                max_request_size: 64 * 1024, // 64KB
                timeout_seconds: 30,
            },
            suppliers: vec![
                SupplierDescriptor::new(
                    "Arrow",
                    "https://backend-takehome.s3.us-east-1.amazonaws.com/myarrow.json",
                ),
                SupplierDescriptor::new(
                    "TTI",
                    "https://backend-takehome.s3.us-east-1.amazonaws.com/tti.json",
                ),
            ],
            fetch: FetchConfig {
                supplier_timeout_ms: 5_000,
                global_timeout_ms: 10_000,
                user_agent: format!("partlink/{}", env!("CARGO_PKG_VERSION")),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                format: "json".to_string(),
                file_path: None,
            },
            monitoring: MonitoringConfig {
                metrics_enabled: true,
                prometheus_namespace: "partlink".to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.suppliers.len(), 2);
        assert_eq!(config.fetch.supplier_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn duplicate_supplier_names_are_rejected() {
        let mut config = AppConfig::default();
        config.suppliers.push(SupplierDescriptor::new("TTI", "https://example.com/tti.json"));

        let error = config.validate().unwrap_err();
        assert_eq!(error.error_code(), "CONFIGURATION_ERROR");
        assert!(error.to_string().contains("more than once"));
    }

    #[test]
    fn empty_supplier_list_and_zero_timeouts_are_rejected() {
        let mut config = AppConfig::default();
        config.suppliers.clear();
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.fetch.global_timeout_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn invalid_endpoint_is_rejected() {
        let mut config = AppConfig::default();
        config.suppliers[0].endpoint = "not-a-url".to_string();

        let error = config.validate().unwrap_err();
        assert!(error.to_string().contains("Arrow"));
    }
}
