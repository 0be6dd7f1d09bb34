//! Configuration for the report API.

use serde::{Deserialize, Serialize};

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Results database, relative to the working directory unless absolute
    #[serde(default = "default_database_path")]
    pub database_path: String,
}

fn default_database_path() -> String {
    "report.db".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
        }
    }
}

/// HTML report layout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Lines shown above the border
    #[serde(default = "default_best_results")]
    pub best_results: usize,
    #[serde(default = "default_borderline_length")]
    pub borderline_length: usize,
    /// Field separator for report lines
    #[serde(default = "default_separator")]
    pub separator: String,
}

fn default_best_results() -> usize {
    15
}

fn default_borderline_length() -> usize {
    72
}

fn default_separator() -> String {
    " |".to_string()
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            best_results: default_best_results(),
            borderline_length: default_borderline_length(),
            separator: default_separator(),
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub report: ReportConfig,
}

impl AppConfig {
    /// Load configuration from environment and config file
    pub fn load() -> anyhow::Result<Self> {
        let config = config::Config::builder()
            // Start with defaults
            .add_source(config::Config::try_from(&AppConfig::default())?)
            // Add config file if exists
            .add_source(config::File::with_name("config").required(false))
            // Override with environment variables (REPORT_SERVER__PORT, REPORT_STORAGE__DATABASE_PATH)
            .add_source(
                config::Environment::with_prefix("REPORT")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(config.try_deserialize()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.storage.database_path, "report.db");
        assert_eq!(config.report.best_results, 15);
        assert_eq!(config.report.borderline_length, 72);
        assert_eq!(config.report.separator, " |");
    }

    #[test]
    fn test_partial_sections_fill_defaults() {
        let config: AppConfig =
            serde_json::from_str(r#"{"report": {"best_results": 10}}"#).unwrap();
        assert_eq!(config.report.best_results, 10);
        assert_eq!(config.report.borderline_length, 72);
        assert_eq!(config.server.host, "0.0.0.0");
    }

    #[test]
    fn test_defaults_round_trip_through_config_source() {
        let config = config::Config::builder()
            .add_source(config::Config::try_from(&AppConfig::default()).unwrap())
            .build()
            .unwrap();
        let loaded: AppConfig = config.try_deserialize().unwrap();
        assert_eq!(loaded.report.separator, " |");
        assert_eq!(loaded.storage.database_path, "report.db");
    }
}
