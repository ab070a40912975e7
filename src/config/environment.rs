//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno y variables de configuración.

use std::env;
use std::str::FromStr;

use chrono::{FixedOffset, Offset, Utc};
use rust_decimal::Decimal;
use thiserror::Error;

use crate::services::fidelizacion::UMBRAL_POR_DEFECTO;

/// Error al leer la configuración
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("La variable {name} tiene un valor inválido: '{value}'")]
    InvalidValue { name: &'static str, value: String },
}

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    pub cors_origins: Vec<String>,
    /// Desfase horario (en horas) usado para el día de negocio
    pub utc_offset_hours: i32,
    pub default_loyalty_threshold: i32,
    pub default_commission_percentage: Decimal,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            port: 3000,
            host: "0.0.0.0".to_string(),
            cors_origins: Vec::new(),
            utc_offset_hours: -5,
            default_loyalty_threshold: UMBRAL_POR_DEFECTO,
            default_commission_percentage: Decimal::from(30),
        }
    }
}

impl EnvironmentConfig {
    /// Cargar la configuración desde las variables de entorno
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Cargar la configuración usando una función de búsqueda de variables
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let utc_offset_hours = parse_or(&lookup, "UTC_OFFSET_HOURS", defaults.utc_offset_hours)?;
        if !(-12..=14).contains(&utc_offset_hours) {
            return Err(ConfigError::InvalidValue {
                name: "UTC_OFFSET_HOURS",
                value: utc_offset_hours.to_string(),
            });
        }

        let default_loyalty_threshold =
            parse_or(&lookup, "DEFAULT_LOYALTY_THRESHOLD", defaults.default_loyalty_threshold)?;
        if !(2..=100).contains(&default_loyalty_threshold) {
            return Err(ConfigError::InvalidValue {
                name: "DEFAULT_LOYALTY_THRESHOLD",
                value: default_loyalty_threshold.to_string(),
            });
        }

        let default_commission_percentage = parse_or(
            &lookup,
            "DEFAULT_COMMISSION_PERCENTAGE",
            defaults.default_commission_percentage,
        )?;
        if default_commission_percentage < Decimal::ZERO
            || default_commission_percentage > Decimal::ONE_HUNDRED
        {
            return Err(ConfigError::InvalidValue {
                name: "DEFAULT_COMMISSION_PERCENTAGE",
                value: default_commission_percentage.to_string(),
            });
        }

        Ok(Self {
            environment: lookup("ENVIRONMENT").unwrap_or(defaults.environment),
            port: parse_or(&lookup, "PORT", defaults.port)?,
            host: lookup("HOST").unwrap_or(defaults.host),
            cors_origins: lookup("CORS_ORIGINS")
                .map(|origins| {
                    origins
                        .split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
            utc_offset_hours,
            default_loyalty_threshold,
            default_commission_percentage,
        })
    }

    /// Verificar si estamos en modo desarrollo
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Verificar si estamos en modo producción
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Obtener la URL del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Zona horaria fija del día de negocio
    pub fn business_offset(&self) -> FixedOffset {
        FixedOffset::east_opt(self.utc_offset_hours * 3600)
            .unwrap_or_else(|| Utc.fix())
    }
}

fn parse_or<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(name) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { name, value }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = EnvironmentConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.default_loyalty_threshold, 10);
        assert_eq!(config.default_commission_percentage, Decimal::from(30));
        assert!(config.is_development());
        assert_eq!(config.business_offset().local_minus_utc(), -5 * 3600);
    }

    #[test]
    fn test_overrides() {
        let config = EnvironmentConfig::from_lookup(lookup_from(&[
            ("ENVIRONMENT", "production"),
            ("PORT", "8080"),
            ("CORS_ORIGINS", "https://a.com, https://b.com,"),
            ("UTC_OFFSET_HOURS", "2"),
            ("DEFAULT_COMMISSION_PERCENTAGE", "12.5"),
        ]))
        .unwrap();
        assert!(config.is_production());
        assert_eq!(config.server_url(), "0.0.0.0:8080");
        assert_eq!(config.cors_origins, vec!["https://a.com", "https://b.com"]);
        assert_eq!(config.business_offset().local_minus_utc(), 7200);
        assert_eq!(config.default_commission_percentage, Decimal::new(125, 1));
    }

    #[test]
    fn test_invalid_values() {
        assert!(EnvironmentConfig::from_lookup(lookup_from(&[("PORT", "abc")])).is_err());
        assert!(
            EnvironmentConfig::from_lookup(lookup_from(&[("DEFAULT_LOYALTY_THRESHOLD", "1")]))
                .is_err()
        );
        assert!(EnvironmentConfig::from_lookup(lookup_from(&[(
            "DEFAULT_COMMISSION_PERCENTAGE",
            "150"
        )]))
        .is_err());
        assert!(EnvironmentConfig::from_lookup(lookup_from(&[("UTC_OFFSET_HOURS", "20")])).is_err());
    }
}
