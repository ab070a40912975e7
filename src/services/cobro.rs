//! Cobro de una orden
//!
//! Reúne en un solo paso la fidelización, el total final y la comisión del
//! lavador. El controlador persiste el resultado dentro de la transacción.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use super::comision::calcular_comision;
use super::fidelizacion::{registrar_lavado, ResultadoFidelizacion};
use super::tarifas::liquidar;
use crate::models::orden::{EstadoOrden, MetodoPago, Orden};
use crate::models::punto::Punto;
use crate::utils::errors::AppError;

/// Orden ya completada junto con el movimiento de fidelización
#[derive(Debug, Clone)]
pub struct Cobro {
    pub orden: Orden,
    pub fidelizacion: ResultadoFidelizacion,
}

impl Cobro {
    pub fn comision_monto(&self) -> Decimal {
        self.orden.comision_monto
    }
}

/// Completar una orden activa con el contador actual del vehículo
///
/// Sin lavador asignado la orden no genera comisión.
pub fn aplicar_cobro(
    orden: Orden,
    contador_vehiculo: i32,
    punto: &Punto,
    lavador_id: Option<Uuid>,
    metodo_pago: MetodoPago,
    ahora: DateTime<Utc>,
) -> Result<Cobro, AppError> {
    if orden.estado.es_final() {
        return Err(estado_invalido(&orden, "cobrar"));
    }

    let fidelizacion = registrar_lavado(contador_vehiculo, punto.umbral_fidelizacion);
    let liquidacion = liquidar(orden.servicios.0.clone(), orden.descuento, fidelizacion.es_gratis);

    let (porcentaje, monto) = match lavador_id {
        Some(_) => (
            punto.porcentaje_comision,
            calcular_comision(liquidacion.total, punto.porcentaje_comision),
        ),
        None => (Decimal::ZERO, Decimal::ZERO),
    };

    let orden = Orden {
        estado: EstadoOrden::Completada,
        metodo_pago: Some(metodo_pago),
        lavador_id,
        descuento: liquidacion.descuento,
        total: liquidacion.total,
        comision_porcentaje: porcentaje,
        comision_monto: monto,
        contador_fidelizacion: Some(fidelizacion.contador_nuevo),
        es_gratis: fidelizacion.es_gratis,
        completada_at: Some(ahora),
        ..orden
    };

    Ok(Cobro {
        orden,
        fidelizacion,
    })
}

/// Error para operaciones sobre órdenes que ya no están activas
pub fn estado_invalido(orden: &Orden, operacion: &str) -> AppError {
    let estado = match orden.estado {
        EstadoOrden::Activa => "activa",
        EstadoOrden::Completada => "completada",
        EstadoOrden::Cancelada => "cancelada",
    };
    AppError::Conflict(format!(
        "No se puede {} la orden {}: está {}",
        operacion, orden.numero, estado
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::orden::{ServicioOrden, TipoLavado};
    use crate::models::vehiculo::TipoVehiculo;
    use sqlx::types::Json;
    use std::collections::BTreeMap;

    fn punto() -> Punto {
        Punto::new(
            "Sede Centro".to_string(),
            "Cra 7 # 10-20".to_string(),
            BTreeMap::new(),
            10,
            Decimal::from(30),
        )
    }

    fn orden_activa(precio: i64, descuento: i64) -> Orden {
        let now = Utc::now();
        Orden {
            id: Uuid::new_v4(),
            numero: "ORD-20240601-0001".to_string(),
            punto_id: Uuid::new_v4(),
            cliente_id: None,
            vehiculo_id: Uuid::new_v4(),
            placa: "ABC123".to_string(),
            tipo_vehiculo: TipoVehiculo::Auto,
            tipo_lavado: TipoLavado::Basico,
            servicios: Json(vec![ServicioOrden {
                nombre: "Lavado básico".to_string(),
                precio: Decimal::from(precio),
            }]),
            subtotal: Decimal::from(precio),
            descuento: Decimal::from(descuento),
            total: Decimal::from(precio - descuento),
            metodo_pago: None,
            lavador_id: None,
            comision_porcentaje: Decimal::ZERO,
            comision_monto: Decimal::ZERO,
            contador_fidelizacion: None,
            es_gratis: false,
            estado: EstadoOrden::Activa,
            notas: None,
            creado_por: None,
            completada_at: None,
            cancelada_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_cobro_pagado_con_lavador() {
        let lavador = Uuid::new_v4();
        let ahora = Utc::now();
        let cobro = aplicar_cobro(
            orden_activa(20000, 2000),
            3,
            &punto(),
            Some(lavador),
            MetodoPago::Nequi,
            ahora,
        )
        .unwrap();

        assert_eq!(cobro.orden.estado, EstadoOrden::Completada);
        assert_eq!(cobro.orden.metodo_pago, Some(MetodoPago::Nequi));
        assert_eq!(cobro.orden.total, Decimal::from(18000));
        assert_eq!(cobro.orden.comision_porcentaje, Decimal::from(30));
        assert_eq!(cobro.comision_monto(), Decimal::from(5400));
        assert_eq!(cobro.orden.lavador_id, Some(lavador));
        assert_eq!(cobro.orden.contador_fidelizacion, Some(4));
        assert_eq!(cobro.orden.completada_at, Some(ahora));
        assert!(!cobro.orden.es_gratis);
        assert_eq!(cobro.fidelizacion.contador_nuevo, 4);
    }

    #[test]
    fn test_decimo_cobro_es_gratis_y_sin_comision() {
        let cobro = aplicar_cobro(
            orden_activa(20000, 0),
            9,
            &punto(),
            Some(Uuid::new_v4()),
            MetodoPago::Efectivo,
            Utc::now(),
        )
        .unwrap();

        assert!(cobro.orden.es_gratis);
        assert!(cobro.fidelizacion.es_gratis);
        assert_eq!(cobro.orden.total, Decimal::ZERO);
        assert_eq!(cobro.orden.subtotal, Decimal::from(20000));
        assert_eq!(cobro.comision_monto(), Decimal::ZERO);
        assert_eq!(cobro.orden.contador_fidelizacion, Some(0));
        assert_eq!(cobro.fidelizacion.contador_nuevo, 0);
    }

    #[test]
    fn test_diez_cobros_seguidos() {
        let punto = punto();
        let mut contador = 0;
        let mut gratis = Vec::new();
        for lavado in 1..=10 {
            let cobro = aplicar_cobro(
                orden_activa(15000, 0),
                contador,
                &punto,
                None,
                MetodoPago::Tarjeta,
                Utc::now(),
            )
            .unwrap();
            if cobro.orden.es_gratis {
                gratis.push(lavado);
            }
            contador = cobro.fidelizacion.contador_nuevo;
        }
        assert_eq!(gratis, vec![10]);
        assert_eq!(contador, 0);
    }

    #[test]
    fn test_sin_lavador_no_hay_comision() {
        let cobro = aplicar_cobro(
            orden_activa(15000, 0),
            0,
            &punto(),
            None,
            MetodoPago::Efectivo,
            Utc::now(),
        )
        .unwrap();
        assert_eq!(cobro.orden.total, Decimal::from(15000));
        assert_eq!(cobro.orden.comision_porcentaje, Decimal::ZERO);
        assert_eq!(cobro.comision_monto(), Decimal::ZERO);
    }

    #[test]
    fn test_orden_ya_cobrada_es_conflicto() {
        let primera = aplicar_cobro(
            orden_activa(15000, 0),
            0,
            &punto(),
            None,
            MetodoPago::Efectivo,
            Utc::now(),
        )
        .unwrap();

        let err = aplicar_cobro(
            primera.orden,
            1,
            &punto(),
            None,
            MetodoPago::Efectivo,
            Utc::now(),
        )
        .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));

        let mut cancelada = orden_activa(15000, 0);
        cancelada.estado = EstadoOrden::Cancelada;
        let err = aplicar_cobro(cancelada, 0, &punto(), None, MetodoPago::Efectivo, Utc::now())
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }
}
