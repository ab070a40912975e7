//! Modelo de Vehiculo
//!
//! El bloque de estadísticas (`contador_actual`, `total_lavados`,
//! `lavados_gratis`, `ultimo_lavado`) es el que mueve la fidelización.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

/// Tipo de vehículo - mapea al ENUM tipo_vehiculo
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
#[sqlx(type_name = "tipo_vehiculo", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TipoVehiculo {
    Moto,
    Auto,
    Camioneta,
    Furgon,
}

/// Vehiculo principal - mapea exactamente a la tabla vehiculos
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Vehiculo {
    pub id: Uuid,
    pub placa: String,
    pub tipo: TipoVehiculo,
    pub cliente_id: Option<Uuid>,
    pub contador_actual: i32,
    pub total_lavados: i64,
    pub lavados_gratis: i64,
    pub ultimo_lavado: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Vehiculo {
    pub fn new(placa: String, tipo: TipoVehiculo, contador_inicial: i32) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            placa,
            tipo,
            cliente_id: None,
            contador_actual: contador_inicial,
            total_lavados: 0,
            lavados_gratis: 0,
            ultimo_lavado: None,
            created_at: now,
            updated_at: now,
        }
    }
}
