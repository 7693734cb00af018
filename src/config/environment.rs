//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno y variables de configuración.

use std::env;
use std::time::Duration;

use crate::utils::errors::{ApiError, ApiResult};

const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_PAGE_SIZE: u32 = 20;

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub api_base_url: String,
    pub api_timeout_secs: u64,
    pub routes_page_size: u32,
}

impl EnvironmentConfig {
    /// Cargar configuración desde variables de entorno (`API_BASE_URL` es obligatoria)
    pub fn from_env() -> ApiResult<Self> {
        let api_base_url = env::var("API_BASE_URL")
            .map_err(|_| ApiError::Config("API_BASE_URL must be set".to_string()))?;

        Ok(Self {
            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
            api_timeout_secs: parse_var("API_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?,
            routes_page_size: parse_var("ROUTES_PAGE_SIZE", DEFAULT_PAGE_SIZE)?,
        })
    }

    /// Configuración con valores por defecto apuntando a `api_base_url`
    pub fn with_base_url(api_base_url: impl Into<String>) -> Self {
        let api_base_url: String = api_base_url.into();
        Self {
            environment: "development".to_string(),
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
            api_timeout_secs: DEFAULT_TIMEOUT_SECS,
            routes_page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Verificar si estamos en modo desarrollo
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Verificar si estamos en modo producción
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.api_timeout_secs)
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, default: T) -> ApiResult<T> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ApiError::Config(format!("{} must be a valid number", name))),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_base_url_trims_trailing_slash() {
        let config = EnvironmentConfig::with_base_url("http://localhost:3000/");
        assert_eq!(config.api_base_url, "http://localhost:3000");
        assert_eq!(config.timeout(), Duration::from_secs(10));
        assert_eq!(config.routes_page_size, 20);
        assert!(config.is_development());
        assert!(!config.is_production());
    }
}
