use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::orden::MetodoPago;

// Query del cierre de caja
#[derive(Debug, Default, Deserialize)]
pub struct CierreCajaQuery {
    pub fecha: Option<NaiveDate>,
    pub punto_id: Option<Uuid>,
}

// Total cobrado por método de pago
#[derive(Debug, Serialize, FromRow)]
pub struct TotalMetodoPago {
    pub metodo_pago: MetodoPago,
    pub cantidad: i64,
    pub total: Decimal,
}

// Conteos del día por estado
#[derive(Debug, Default, FromRow)]
pub struct ResumenDia {
    pub completadas: i64,
    pub canceladas: i64,
    pub activas: i64,
    pub lavados_gratis: i64,
    pub total_ventas: Decimal,
    pub total_descuentos: Decimal,
    pub total_comisiones: Decimal,
}

// Cierre de caja diario
#[derive(Debug, Serialize)]
pub struct CierreCajaResponse {
    pub fecha: NaiveDate,
    pub punto_id: Option<Uuid>,
    pub ordenes_completadas: i64,
    pub ordenes_canceladas: i64,
    pub ordenes_activas: i64,
    pub lavados_gratis: i64,
    pub total_ventas: Decimal,
    pub total_descuentos: Decimal,
    pub total_comisiones: Decimal,
    pub neto: Decimal,
    pub por_metodo_pago: Vec<TotalMetodoPago>,
}

impl CierreCajaResponse {
    pub fn new(
        fecha: NaiveDate,
        punto_id: Option<Uuid>,
        resumen: ResumenDia,
        por_metodo_pago: Vec<TotalMetodoPago>,
    ) -> Self {
        Self {
            fecha,
            punto_id,
            ordenes_completadas: resumen.completadas,
            ordenes_canceladas: resumen.canceladas,
            ordenes_activas: resumen.activas,
            lavados_gratis: resumen.lavados_gratis,
            neto: resumen.total_ventas - resumen.total_comisiones,
            total_ventas: resumen.total_ventas,
            total_descuentos: resumen.total_descuentos,
            total_comisiones: resumen.total_comisiones,
            por_metodo_pago,
        }
    }
}

// Query del reporte de comisiones
#[derive(Debug, Default, Deserialize)]
pub struct ComisionesQuery {
    pub desde: Option<NaiveDate>,
    pub hasta: Option<NaiveDate>,
    pub lavador_id: Option<Uuid>,
    pub punto_id: Option<Uuid>,
}

// Comisiones de un lavador en el rango
#[derive(Debug, Serialize, FromRow)]
pub struct ComisionLavador {
    pub lavador_id: Uuid,
    pub codigo: String,
    pub nombre: String,
    pub ordenes: i64,
    pub total_ventas: Decimal,
    pub total_comision: Decimal,
    pub saldo_pendiente: Decimal,
}

#[derive(Debug, Serialize)]
pub struct ComisionesResponse {
    pub desde: NaiveDate,
    pub hasta: NaiveDate,
    pub total_comisiones: Decimal,
    pub lavadores: Vec<ComisionLavador>,
}

// Query de estadísticas del encabezado
#[derive(Debug, Default, Deserialize)]
pub struct EstadisticasQuery {
    pub punto_id: Option<Uuid>,
}

// Estadísticas mostradas en el encabezado de la aplicación
#[derive(Debug, Serialize)]
pub struct EstadisticasResponse {
    pub fecha: NaiveDate,
    pub ordenes_hoy: i64,
    pub ordenes_activas: i64,
    pub completadas_hoy: i64,
    pub ingresos_hoy: Decimal,
    pub lavados_gratis_hoy: i64,
    pub clientes_registrados: i64,
    pub clientes_nuevos_hoy: i64,
    pub punto: Option<EstadisticasPunto>,
}

#[derive(Debug, Serialize)]
pub struct EstadisticasPunto {
    pub punto_id: Uuid,
    pub nombre: String,
    pub total_ordenes: i64,
    pub total_ingresos: Decimal,
    pub total_comisiones: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cierre_neto() {
        let resumen = ResumenDia {
            completadas: 3,
            total_ventas: Decimal::from(45000),
            total_comisiones: Decimal::from(13500),
            ..Default::default()
        };
        let fecha = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let cierre = CierreCajaResponse::new(fecha, None, resumen, vec![]);
        assert_eq!(cierre.neto, Decimal::from(31500));
        assert_eq!(cierre.ordenes_completadas, 3);
    }
}
