//! Utilidades de validación
//!
//! Funciones helper usadas por los `#[validate(custom = ...)]` de los DTOs
//! y por los controladores para normalizar datos de entrada.

use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::Decimal;
use validator::ValidationError;

use crate::models::usuario::PERMISOS_VALIDOS;

lazy_static! {
    // Placas de autos (ABC123) y motos (ABC12D), ya normalizadas
    static ref PLACA_RE: Regex = Regex::new(r"^[A-Z]{3}[0-9]{2}[0-9A-Z]$").unwrap();
    static ref CODIGO_RE: Regex = Regex::new(r"^[A-Za-z0-9_-]{3,32}$").unwrap();
}

/// Normalizar una placa: mayúsculas y sin espacios ni guiones
pub fn normalizar_placa(value: &str) -> String {
    value
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_' | '.'))
        .flat_map(char::to_uppercase)
        .collect()
}

/// Validar formato de placa (acepta la placa sin normalizar)
pub fn validate_placa(value: &str) -> Result<(), ValidationError> {
    let placa = normalizar_placa(value);
    if !PLACA_RE.is_match(&placa) {
        let mut error = ValidationError::new("placa");
        error.message = Some("La placa debe tener el formato ABC123 o ABC12D".into());
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar formato de teléfono (solo dígitos, 7 a 15)
pub fn validate_telefono(value: &str) -> Result<(), ValidationError> {
    let digits = normalizar_telefono(value);
    let only_allowed = value
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, ' ' | '-' | '+' | '(' | ')'));
    if !only_allowed || digits.len() < 7 || digits.len() > 15 {
        let mut error = ValidationError::new("telefono");
        error.message = Some("Teléfono inválido".into());
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Dejar solo los dígitos del teléfono
pub fn normalizar_telefono(value: &str) -> String {
    value.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Validar código de usuario
pub fn validate_codigo(value: &str) -> Result<(), ValidationError> {
    if !CODIGO_RE.is_match(value) {
        let mut error = ValidationError::new("codigo");
        error.message = Some("El código solo admite letras, números, '-' y '_' (3 a 32)".into());
        return Err(error);
    }
    Ok(())
}

/// Validar un porcentaje entre 0 y 100
pub fn validate_porcentaje(value: &Decimal) -> Result<(), ValidationError> {
    if *value < Decimal::ZERO || *value > Decimal::ONE_HUNDRED {
        let mut error = ValidationError::new("porcentaje");
        error.message = Some("El porcentaje debe estar entre 0 y 100".into());
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar que un monto no sea negativo
pub fn validate_monto(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() && !value.is_zero() {
        let mut error = ValidationError::new("monto");
        error.message = Some("El monto no puede ser negativo".into());
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar que todos los permisos existan
pub fn validate_permisos(values: &[String]) -> Result<(), ValidationError> {
    if let Some(invalido) = values
        .iter()
        .find(|p| !PERMISOS_VALIDOS.contains(&p.as_str()))
    {
        let mut error = ValidationError::new("permisos");
        error.message = Some("Permiso desconocido".into());
        error.add_param("value".into(), invalido);
        return Err(error);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalizar_placa() {
        assert_eq!(normalizar_placa("abc-123"), "ABC123");
        assert_eq!(normalizar_placa(" xyz 12d "), "XYZ12D");
    }

    #[test]
    fn test_validate_placa() {
        assert!(validate_placa("ABC123").is_ok());
        assert!(validate_placa("abc-123").is_ok());
        assert!(validate_placa("XYZ12D").is_ok());
        assert!(validate_placa("AB123").is_err());
        assert!(validate_placa("1234567").is_err());
        assert!(validate_placa("").is_err());
    }

    #[test]
    fn test_validate_telefono() {
        assert!(validate_telefono("3001234567").is_ok());
        assert!(validate_telefono("+57 300 123-4567").is_ok());
        assert!(validate_telefono("123").is_err());
        assert!(validate_telefono("300abc4567").is_err());
        assert_eq!(normalizar_telefono("+57 (300) 123"), "57300123");
    }

    #[test]
    fn test_validate_codigo() {
        assert!(validate_codigo("lav_01").is_ok());
        assert!(validate_codigo("ab").is_err());
        assert!(validate_codigo("con espacio").is_err());
    }

    #[test]
    fn test_validate_porcentaje() {
        assert!(validate_porcentaje(&Decimal::from(30)).is_ok());
        assert!(validate_porcentaje(&Decimal::ZERO).is_ok());
        assert!(validate_porcentaje(&Decimal::from(101)).is_err());
        assert!(validate_porcentaje(&Decimal::from(-1)).is_err());
    }

    #[test]
    fn test_validate_monto() {
        assert!(validate_monto(&Decimal::from(15000)).is_ok());
        assert!(validate_monto(&Decimal::ZERO).is_ok());
        assert!(validate_monto(&Decimal::from(-5)).is_err());
    }

    #[test]
    fn test_validate_permisos() {
        assert!(validate_permisos(&["ordenes".to_string(), "reportes".to_string()]).is_ok());
        assert!(validate_permisos(&["volar".to_string()]).is_err());
    }
}
