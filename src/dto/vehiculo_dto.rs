use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::vehiculo::{TipoVehiculo, Vehiculo};
use crate::services::fidelizacion;

// Response de vehículo
#[derive(Debug, Serialize)]
pub struct VehiculoResponse {
    pub id: Uuid,
    pub placa: String,
    pub tipo: TipoVehiculo,
    pub cliente_id: Option<Uuid>,
    pub contador_actual: i32,
    pub total_lavados: i64,
    pub lavados_gratis: i64,
    pub ultimo_lavado: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<Vehiculo> for VehiculoResponse {
    fn from(vehiculo: Vehiculo) -> Self {
        Self {
            id: vehiculo.id,
            placa: vehiculo.placa,
            tipo: vehiculo.tipo,
            cliente_id: vehiculo.cliente_id,
            contador_actual: vehiculo.contador_actual,
            total_lavados: vehiculo.total_lavados,
            lavados_gratis: vehiculo.lavados_gratis,
            ultimo_lavado: vehiculo.ultimo_lavado,
            created_at: vehiculo.created_at,
        }
    }
}

// Estado de fidelización del vehículo frente a un umbral
#[derive(Debug, Serialize, PartialEq)]
pub struct FidelizacionInfo {
    pub contador_actual: i32,
    pub umbral: i32,
    pub lavados_restantes: i32,
    pub proximo_gratis: bool,
}

impl FidelizacionInfo {
    pub fn new(contador_actual: i32, umbral: i32) -> Self {
        Self {
            contador_actual,
            umbral,
            lavados_restantes: fidelizacion::lavados_restantes(contador_actual, umbral),
            proximo_gratis: fidelizacion::proximo_es_gratis(contador_actual, umbral),
        }
    }
}

// Query de consultas por placa y órdenes recientes
#[derive(Debug, Default, Deserialize)]
pub struct VehiculoQuery {
    pub punto_id: Option<Uuid>,
    pub limite: Option<i64>,
}

impl VehiculoQuery {
    pub const LIMITE_RECIENTES: i64 = 5;

    pub fn limite_recientes(&self) -> i64 {
        self.limite.unwrap_or(Self::LIMITE_RECIENTES).clamp(1, 50)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fidelizacion_info() {
        let info = FidelizacionInfo::new(9, 10);
        assert!(info.proximo_gratis);
        assert_eq!(info.lavados_restantes, 0);

        let info = FidelizacionInfo::new(2, 10);
        assert!(!info.proximo_gratis);
        assert_eq!(info.lavados_restantes, 7);
    }

    #[test]
    fn test_limite_recientes() {
        assert_eq!(VehiculoQuery::default().limite_recientes(), 5);
        let q = VehiculoQuery { punto_id: None, limite: Some(500) };
        assert_eq!(q.limite_recientes(), 50);
    }
}
