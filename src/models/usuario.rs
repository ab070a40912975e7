//! Modelo de Usuario
//!
//! Personal del lavadero. Los lavadores acumulan comisión por cada orden
//! completada que tengan asignada.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

/// Permisos que se pueden asignar a un usuario
pub const PERMISOS_VALIDOS: &[&str] = &[
    "usuarios",
    "puntos",
    "clientes",
    "ordenes",
    "cobros",
    "reportes",
    "comisiones",
];

/// Rol del usuario - mapea al ENUM rol_usuario
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "rol_usuario", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Rol {
    Superadmin,
    Admin,
    Colaborador,
    Cajero,
    Lavador,
}

impl Rol {
    /// Permisos que recibe un usuario nuevo si no se especifican
    pub fn permisos_por_defecto(&self) -> Vec<String> {
        let permisos: &[&str] = match self {
            Rol::Superadmin | Rol::Admin => PERMISOS_VALIDOS,
            Rol::Colaborador => &["clientes", "ordenes"],
            Rol::Cajero => &["clientes", "ordenes", "cobros", "reportes"],
            Rol::Lavador => &[],
        };
        permisos.iter().map(|p| p.to_string()).collect()
    }

    pub fn es_administrativo(&self) -> bool {
        matches!(self, Rol::Superadmin | Rol::Admin)
    }
}

/// Usuario principal - mapea exactamente a la tabla usuarios
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Usuario {
    pub id: Uuid,
    pub codigo: String,
    pub nombre: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub rol: Rol,
    pub permisos: Vec<String>,
    pub punto_id: Option<Uuid>,
    pub saldo_comision: Decimal,
    pub total_comisiones: Decimal,
    pub total_lavados: i64,
    pub activo: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Usuario {
    pub fn new(
        codigo: String,
        nombre: String,
        password_hash: String,
        rol: Rol,
        permisos: Vec<String>,
        punto_id: Option<Uuid>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            codigo,
            nombre,
            password_hash,
            rol,
            permisos,
            punto_id,
            saldo_comision: Decimal::ZERO,
            total_comisiones: Decimal::ZERO,
            total_lavados: 0,
            activo: true,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Verificar si un rol con ciertos permisos puede realizar una acción
pub fn tiene_permiso(rol: Rol, permisos: &[String], permiso: &str) -> bool {
    rol.es_administrativo() || permisos.iter().any(|p| p == permiso)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permisos_por_defecto() {
        assert_eq!(Rol::Superadmin.permisos_por_defecto().len(), PERMISOS_VALIDOS.len());
        assert!(Rol::Lavador.permisos_por_defecto().is_empty());
        assert!(Rol::Cajero
            .permisos_por_defecto()
            .contains(&"cobros".to_string()));
    }

    #[test]
    fn test_tiene_permiso() {
        assert!(tiene_permiso(Rol::Admin, &[], "usuarios"));
        assert!(!tiene_permiso(Rol::Cajero, &["cobros".to_string()], "usuarios"));
        assert!(tiene_permiso(Rol::Cajero, &["cobros".to_string()], "cobros"));
    }

    #[test]
    fn test_rol_serde() {
        let rol: Rol = serde_json::from_str("\"lavador\"").unwrap();
        assert_eq!(rol, Rol::Lavador);
        assert_eq!(serde_json::to_string(&Rol::Superadmin).unwrap(), "\"superadmin\"");
    }
}
