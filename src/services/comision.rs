//! Cálculo de comisiones de lavadores

use rust_decimal::{Decimal, RoundingStrategy};

/// comisión = total × porcentaje / 100, redondeada a 2 decimales
pub fn calcular_comision(total: Decimal, porcentaje: Decimal) -> Decimal {
    if total <= Decimal::ZERO || porcentaje <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    (total * porcentaje / Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calcular_comision() {
        assert_eq!(
            calcular_comision(Decimal::from(20000), Decimal::from(30)),
            Decimal::from(6000)
        );
        assert_eq!(
            calcular_comision(Decimal::new(1999, 2), Decimal::new(125, 1)),
            Decimal::new(250, 2)
        );
    }

    #[test]
    fn test_comision_orden_gratis() {
        assert_eq!(calcular_comision(Decimal::ZERO, Decimal::from(30)), Decimal::ZERO);
    }

    #[test]
    fn test_comision_sin_porcentaje() {
        assert_eq!(calcular_comision(Decimal::from(15000), Decimal::ZERO), Decimal::ZERO);
    }
}
