use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::usuario::{Rol, Usuario};
use crate::utils::validation::{validate_codigo, validate_permisos};

// Request para crear un usuario
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUsuarioRequest {
    #[validate(custom = "validate_codigo")]
    pub codigo: String,
    #[validate(length(min = 2, max = 120))]
    pub nombre: String,
    #[validate(length(min = 4, max = 100))]
    pub password: String,
    pub rol: Rol,
    #[validate(custom = "validate_permisos")]
    pub permisos: Option<Vec<String>>,
    pub punto_id: Option<Uuid>,
}

// Request para actualizar un usuario
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateUsuarioRequest {
    #[validate(length(min = 2, max = 120))]
    pub nombre: Option<String>,
    #[validate(length(min = 4, max = 100))]
    pub password: Option<String>,
    pub rol: Option<Rol>,
    #[validate(custom = "validate_permisos")]
    pub permisos: Option<Vec<String>>,
    pub punto_id: Option<Uuid>,
    pub activo: Option<bool>,
}

// Filtros del listado de usuarios
#[derive(Debug, Default, Deserialize)]
pub struct UsuarioFilters {
    pub rol: Option<Rol>,
    pub activo: Option<bool>,
}

// Response de usuario (sin password)
#[derive(Debug, Serialize)]
pub struct UsuarioResponse {
    pub id: Uuid,
    pub codigo: String,
    pub nombre: String,
    pub rol: Rol,
    pub permisos: Vec<String>,
    pub punto_id: Option<Uuid>,
    pub saldo_comision: Decimal,
    pub total_comisiones: Decimal,
    pub total_lavados: i64,
    pub activo: bool,
    pub created_at: DateTime<Utc>,
}

impl From<Usuario> for UsuarioResponse {
    fn from(usuario: Usuario) -> Self {
        Self {
            id: usuario.id,
            codigo: usuario.codigo,
            nombre: usuario.nombre,
            rol: usuario.rol,
            permisos: usuario.permisos,
            punto_id: usuario.punto_id,
            saldo_comision: usuario.saldo_comision,
            total_comisiones: usuario.total_comisiones,
            total_lavados: usuario.total_lavados,
            activo: usuario.activo,
            created_at: usuario.created_at,
        }
    }
}

// Resultado de liquidar el saldo de comisión de un lavador
#[derive(Debug, Serialize)]
pub struct LiquidacionComisionResponse {
    pub usuario_id: Uuid,
    pub monto_pagado: Decimal,
    pub saldo_restante: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_create_usuario_validation() {
        let ok: CreateUsuarioRequest = serde_json::from_value(json!({
            "codigo": "lav01",
            "nombre": "Pedro",
            "password": "1234",
            "rol": "lavador"
        }))
        .unwrap();
        assert!(ok.validate().is_ok());

        let bad: CreateUsuarioRequest = serde_json::from_value(json!({
            "codigo": "x",
            "nombre": "P",
            "password": "1",
            "rol": "cajero",
            "permisos": ["volar"]
        }))
        .unwrap();
        let errors = bad.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("codigo"));
        assert!(fields.contains_key("nombre"));
        assert!(fields.contains_key("password"));
        assert!(fields.contains_key("permisos"));
    }

    #[test]
    fn test_response_hides_password() {
        let usuario = Usuario::new(
            "caj01".into(),
            "Ana".into(),
            "$2b$hash".into(),
            Rol::Cajero,
            vec![],
            None,
        );
        let body = serde_json::to_value(UsuarioResponse::from(usuario)).unwrap();
        assert!(body.get("password_hash").is_none());
        assert_eq!(body["rol"], "cajero");
    }
}
