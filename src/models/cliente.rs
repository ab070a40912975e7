//! Modelo de Cliente

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::orden::TipoLavado;

/// Cliente principal - mapea exactamente a la tabla clientes
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Cliente {
    pub id: Uuid,
    pub nombre: String,
    pub telefono: String,
    pub tipo_lavado_preferido: TipoLavado,
    pub placa: String,
    pub vehiculo_id: Option<Uuid>,
    pub lavados_iniciales: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Cliente {
    pub fn new(
        nombre: String,
        telefono: String,
        tipo_lavado_preferido: TipoLavado,
        placa: String,
        lavados_iniciales: i32,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            nombre,
            telefono,
            tipo_lavado_preferido,
            placa,
            vehiculo_id: None,
            lavados_iniciales,
            created_at: now,
            updated_at: now,
        }
    }
}
