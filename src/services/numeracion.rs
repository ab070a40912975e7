//! Numeración diaria de órdenes: `ORD-YYYYMMDD-NNNN`
//!
//! También define el día de negocio, que se calcula con un desfase fijo
//! respecto a UTC y se usa en la numeración y en los reportes diarios.

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveTime, TimeZone, Utc};

use crate::utils::errors::{validation_error, AppError};

/// Fecha de negocio local para un instante, según el desfase configurado
pub fn fecha_local(instante: DateTime<Utc>, offset: FixedOffset) -> NaiveDate {
    instante.with_timezone(&offset).date_naive()
}

/// Instantes UTC [inicio, fin) que cubren un día de negocio local
///
/// Las fechas en el borde del calendario de chrono se rechazan como error de validación.
pub fn rango_dia(
    fecha: NaiveDate,
    offset: FixedOffset,
) -> Result<(DateTime<Utc>, DateTime<Utc>), AppError> {
    let inicio_local = fecha.and_time(NaiveTime::MIN);
    let inicio = offset
        .from_local_datetime(&inicio_local)
        .single()
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|| Utc.from_utc_datetime(&inicio_local));
    let fin = inicio
        .checked_add_signed(Duration::days(1))
        .ok_or_else(|| validation_error("fecha", "La fecha está fuera del rango permitido"))?;
    Ok((inicio, fin))
}

/// Instantes UTC [inicio, fin) que cubren los días `desde..=hasta`
pub fn rango_dias(
    desde: NaiveDate,
    hasta: NaiveDate,
    offset: FixedOffset,
) -> Result<(DateTime<Utc>, DateTime<Utc>), AppError> {
    let (inicio, _) = rango_dia(desde, offset)?;
    let (_, fin) = rango_dia(hasta, offset)?;
    Ok((inicio, fin))
}

/// Formatear el número de orden a partir de la fecha y la secuencia del día
pub fn formatear_numero(fecha: NaiveDate, secuencia: i32) -> String {
    format!("ORD-{}-{:04}", fecha.format("%Y%m%d"), secuencia)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_formatear_numero() {
        let fecha = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        assert_eq!(formatear_numero(fecha, 1), "ORD-20240307-0001");
        assert_eq!(formatear_numero(fecha, 42), "ORD-20240307-0042");
        assert_eq!(formatear_numero(fecha, 12345), "ORD-20240307-12345");
    }

    #[test]
    fn test_fecha_local_con_desfase() {
        let offset = FixedOffset::west_opt(5 * 3600).unwrap();
        // 02:00 UTC todavía es el día anterior en UTC-5
        let instante = Utc.with_ymd_and_hms(2024, 3, 8, 2, 0, 0).unwrap();
        assert_eq!(
            fecha_local(instante, offset),
            NaiveDate::from_ymd_opt(2024, 3, 7).unwrap()
        );
    }

    #[test]
    fn test_rango_dia() {
        let offset = FixedOffset::west_opt(5 * 3600).unwrap();
        let fecha = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        let (inicio, fin) = rango_dia(fecha, offset).unwrap();
        assert_eq!(inicio, Utc.with_ymd_and_hms(2024, 3, 7, 5, 0, 0).unwrap());
        assert_eq!(fin, Utc.with_ymd_and_hms(2024, 3, 8, 5, 0, 0).unwrap());
    }

    #[test]
    fn test_rango_dias() {
        let offset = FixedOffset::east_opt(0).unwrap();
        let desde = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let hasta = NaiveDate::from_ymd_opt(2024, 3, 31).unwrap();
        let (inicio, fin) = rango_dias(desde, hasta, offset).unwrap();
        assert_eq!(inicio, Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap());
        assert_eq!(fin, Utc.with_ymd_and_hms(2024, 4, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_fecha_en_el_borde_del_calendario() {
        let offset = FixedOffset::west_opt(5 * 3600).unwrap();
        let err = rango_dia(NaiveDate::MAX, offset).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        let desde = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert!(rango_dias(desde, NaiveDate::MAX, offset).is_err());
    }
}
