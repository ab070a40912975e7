//! Cálculo del precio de una orden a partir de las tarifas del punto

use rust_decimal::Decimal;

use crate::models::orden::{ServicioOrden, TipoLavado};
use crate::models::punto::Punto;
use crate::models::vehiculo::TipoVehiculo;
use crate::utils::errors::AppError;

/// Montos de una orden
#[derive(Debug, Clone, PartialEq)]
pub struct Liquidacion {
    pub servicios: Vec<ServicioOrden>,
    pub subtotal: Decimal,
    pub descuento: Decimal,
    pub total: Decimal,
}

/// Nombre del servicio que se genera desde la tabla de tarifas
pub fn nombre_servicio(lavado: TipoLavado) -> &'static str {
    match lavado {
        TipoLavado::Basico => "Lavado básico",
        TipoLavado::Completo => "Lavado completo",
        TipoLavado::Premium => "Lavado premium",
    }
}

/// Resolver los servicios de la orden: los enviados o el de la tabla de tarifas
pub fn resolver_servicios(
    punto: &Punto,
    tipo: TipoVehiculo,
    lavado: TipoLavado,
    servicios: Vec<ServicioOrden>,
) -> Result<Vec<ServicioOrden>, AppError> {
    if !servicios.is_empty() {
        return Ok(servicios);
    }
    let precio = punto.tarifa(tipo, lavado).ok_or_else(|| {
        AppError::BadRequest(format!(
            "El punto '{}' no tiene tarifa para {:?} / {:?}",
            punto.nombre, tipo, lavado
        ))
    })?;
    Ok(vec![ServicioOrden {
        nombre: nombre_servicio(lavado).to_string(),
        precio,
    }])
}

/// Calcular subtotal y total; una orden gratis queda en cero
pub fn liquidar(servicios: Vec<ServicioOrden>, descuento: Decimal, es_gratis: bool) -> Liquidacion {
    let subtotal: Decimal = servicios.iter().map(|s| s.precio).sum();
    let descuento = descuento.max(Decimal::ZERO).min(subtotal);
    let total = if es_gratis {
        Decimal::ZERO
    } else {
        subtotal - descuento
    };

    Liquidacion {
        servicios,
        subtotal,
        descuento,
        total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn punto_de_prueba() -> Punto {
        let mut tarifas = BTreeMap::new();
        tarifas.insert(
            TipoVehiculo::Auto,
            BTreeMap::from([
                (TipoLavado::Basico, Decimal::from(15000)),
                (TipoLavado::Premium, Decimal::from(30000)),
            ]),
        );
        Punto::new(
            "Sede Norte".to_string(),
            "Calle 1 # 2-3".to_string(),
            tarifas,
            10,
            Decimal::from(30),
        )
    }

    #[test]
    fn test_servicio_desde_tarifa() {
        let punto = punto_de_prueba();
        let servicios =
            resolver_servicios(&punto, TipoVehiculo::Auto, TipoLavado::Premium, vec![]).unwrap();
        assert_eq!(servicios.len(), 1);
        assert_eq!(servicios[0].precio, Decimal::from(30000));
        assert_eq!(servicios[0].nombre, "Lavado premium");
    }

    #[test]
    fn test_tarifa_faltante() {
        let punto = punto_de_prueba();
        let err = resolver_servicios(&punto, TipoVehiculo::Moto, TipoLavado::Basico, vec![])
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[test]
    fn test_servicios_explicitos() {
        let punto = punto_de_prueba();
        let enviados = vec![
            ServicioOrden { nombre: "Lavado".into(), precio: Decimal::from(12000) },
            ServicioOrden { nombre: "Encerado".into(), precio: Decimal::from(8000) },
        ];
        let servicios = resolver_servicios(
            &punto,
            TipoVehiculo::Moto,
            TipoLavado::Basico,
            enviados.clone(),
        )
        .unwrap();
        assert_eq!(servicios, enviados);

        let liq = liquidar(servicios, Decimal::from(2000), false);
        assert_eq!(liq.subtotal, Decimal::from(20000));
        assert_eq!(liq.total, Decimal::from(18000));
    }

    #[test]
    fn test_descuento_acotado() {
        let servicios = vec![ServicioOrden { nombre: "Lavado".into(), precio: Decimal::from(10000) }];
        let liq = liquidar(servicios, Decimal::from(50000), false);
        assert_eq!(liq.descuento, Decimal::from(10000));
        assert_eq!(liq.total, Decimal::ZERO);
    }

    #[test]
    fn test_orden_gratis() {
        let servicios = vec![ServicioOrden { nombre: "Lavado".into(), precio: Decimal::from(10000) }];
        let liq = liquidar(servicios, Decimal::ZERO, true);
        assert_eq!(liq.subtotal, Decimal::from(10000));
        assert_eq!(liq.total, Decimal::ZERO);
    }
}
