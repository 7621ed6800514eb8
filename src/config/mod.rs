//! Application configuration module
//!
//! Type-safe configuration loading from environment variables using the
//! `config` and `dotenvy` crates. Configuration is loaded with the
//! `STAYHAVEN` prefix and nested values use double underscores as
//! separators. The loaded struct is passed into constructors explicitly;
//! nothing in the engine reads configuration ambiently.
//!
//! # Example
//!
//! ```no_run
//! use stayhaven::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod database;
mod error;
mod service;

pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use service::{Environment, ServiceConfig};

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Service runtime configuration (environment, logging)
    #[serde(default)]
    pub service: ServiceConfig,

    /// Database configuration (PostgreSQL connection)
    pub database: DatabaseConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Environment Variable Format
    ///
    /// - `STAYHAVEN__SERVICE__ENVIRONMENT=production` -> `service.environment`
    /// - `STAYHAVEN__DATABASE__URL=postgres://...` -> `database.url`
    ///
    /// A `.env` file is loaded first if present (development convenience).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or values
    /// cannot be parsed into the expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("STAYHAVEN")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.service.validate()?;
        self.database.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.service.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validates_sections_together() {
        let config = AppConfig {
            service: ServiceConfig::default(),
            database: DatabaseConfig {
                url: "postgresql://localhost/bookings".to_string(),
                ..Default::default()
            },
        };
        assert!(config.validate().is_ok());
        assert!(!config.is_production());
    }

    #[test]
    fn invalid_database_section_fails_validation() {
        let config = AppConfig {
            service: ServiceConfig::default(),
            database: DatabaseConfig::default(),
        };
        assert!(config.validate().is_err());
    }
}
