//! Modelo de Punto
//!
//! Un punto es una sede física del lavadero. Guarda la tabla de tarifas,
//! el umbral de fidelización, el porcentaje de comisión de los lavadores
//! y estadísticas acumuladas.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

use super::orden::TipoLavado;
use super::vehiculo::TipoVehiculo;

/// Tarifas por tipo de vehículo y tipo de lavado
pub type Tarifas = BTreeMap<TipoVehiculo, BTreeMap<TipoLavado, Decimal>>;

/// Punto principal - mapea exactamente a la tabla puntos
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Punto {
    pub id: Uuid,
    pub nombre: String,
    pub direccion: String,
    pub tarifas: Json<Tarifas>,
    pub umbral_fidelizacion: i32,
    pub porcentaje_comision: Decimal,
    pub total_ordenes: i64,
    pub total_ingresos: Decimal,
    pub total_comisiones: Decimal,
    pub activo: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Punto {
    pub fn new(
        nombre: String,
        direccion: String,
        tarifas: Tarifas,
        umbral_fidelizacion: i32,
        porcentaje_comision: Decimal,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            nombre,
            direccion,
            tarifas: Json(tarifas),
            umbral_fidelizacion,
            porcentaje_comision,
            total_ordenes: 0,
            total_ingresos: Decimal::ZERO,
            total_comisiones: Decimal::ZERO,
            activo: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Precio configurado para un tipo de vehículo y lavado
    pub fn tarifa(&self, tipo: TipoVehiculo, lavado: TipoLavado) -> Option<Decimal> {
        self.tarifas.0.get(&tipo).and_then(|t| t.get(&lavado)).copied()
    }
}
