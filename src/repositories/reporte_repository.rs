use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::reporte_dto::{ComisionLavador, ResumenDia, TotalMetodoPago};
use crate::models::orden::EstadoOrden;
use crate::utils::errors::AppError;

/// Conteos de órdenes usados por las estadísticas del encabezado
#[derive(Debug, sqlx::FromRow)]
pub struct ConteoHoy {
    pub ordenes_hoy: i64,
    pub completadas_hoy: i64,
    pub ingresos_hoy: rust_decimal::Decimal,
    pub lavados_gratis_hoy: i64,
}

pub struct ReporteRepository {
    pool: PgPool,
}

impl ReporteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Resumen de un día: las completadas cuentan por fecha de cobro,
    /// las demás por fecha de creación
    pub async fn resumen_dia(
        &self,
        inicio: DateTime<Utc>,
        fin: DateTime<Utc>,
        punto_id: Option<Uuid>,
    ) -> Result<ResumenDia, AppError> {
        let result = sqlx::query_as::<_, ResumenDia>(
            r#"
            SELECT
                COUNT(*) FILTER (WHERE estado = 'completada' AND completada_at >= $1 AND completada_at < $2) AS completadas,
                COUNT(*) FILTER (WHERE estado = 'cancelada' AND created_at >= $1 AND created_at < $2) AS canceladas,
                COUNT(*) FILTER (WHERE estado = 'activa' AND created_at >= $1 AND created_at < $2) AS activas,
                COUNT(*) FILTER (WHERE estado = 'completada' AND es_gratis AND completada_at >= $1 AND completada_at < $2) AS lavados_gratis,
                COALESCE(SUM(total) FILTER (WHERE estado = 'completada' AND completada_at >= $1 AND completada_at < $2), 0) AS total_ventas,
                COALESCE(SUM(descuento) FILTER (WHERE estado = 'completada' AND completada_at >= $1 AND completada_at < $2), 0) AS total_descuentos,
                COALESCE(SUM(comision_monto) FILTER (WHERE estado = 'completada' AND completada_at >= $1 AND completada_at < $2), 0) AS total_comisiones
            FROM ordenes
            WHERE ($3::uuid IS NULL OR punto_id = $3)
              AND (created_at >= $1 AND created_at < $2 OR completada_at >= $1 AND completada_at < $2)
            "#,
        )
        .bind(inicio)
        .bind(fin)
        .bind(punto_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(result)
    }

    /// Totales cobrados por método de pago en el rango
    pub async fn por_metodo_pago(
        &self,
        inicio: DateTime<Utc>,
        fin: DateTime<Utc>,
        punto_id: Option<Uuid>,
    ) -> Result<Vec<TotalMetodoPago>, AppError> {
        let result = sqlx::query_as::<_, TotalMetodoPago>(
            r#"
            SELECT metodo_pago, COUNT(*) AS cantidad, COALESCE(SUM(total), 0) AS total
            FROM ordenes
            WHERE estado = $4
              AND metodo_pago IS NOT NULL
              AND completada_at >= $1 AND completada_at < $2
              AND ($3::uuid IS NULL OR punto_id = $3)
            GROUP BY metodo_pago
            ORDER BY metodo_pago
            "#,
        )
        .bind(inicio)
        .bind(fin)
        .bind(punto_id)
        .bind(EstadoOrden::Completada)
        .fetch_all(&self.pool)
        .await?;

        Ok(result)
    }

    /// Comisiones por lavador en el rango
    pub async fn comisiones(
        &self,
        inicio: DateTime<Utc>,
        fin: DateTime<Utc>,
        lavador_id: Option<Uuid>,
        punto_id: Option<Uuid>,
    ) -> Result<Vec<ComisionLavador>, AppError> {
        let result = sqlx::query_as::<_, ComisionLavador>(
            r#"
            SELECT
                u.id AS lavador_id,
                u.codigo,
                u.nombre,
                COUNT(o.id) AS ordenes,
                COALESCE(SUM(o.total), 0) AS total_ventas,
                COALESCE(SUM(o.comision_monto), 0) AS total_comision,
                u.saldo_comision AS saldo_pendiente
            FROM usuarios u
            JOIN ordenes o ON o.lavador_id = u.id
            WHERE o.estado = $5
              AND o.completada_at >= $1 AND o.completada_at < $2
              AND ($3::uuid IS NULL OR u.id = $3)
              AND ($4::uuid IS NULL OR o.punto_id = $4)
            GROUP BY u.id, u.codigo, u.nombre, u.saldo_comision
            ORDER BY total_comision DESC, u.nombre
            "#,
        )
        .bind(inicio)
        .bind(fin)
        .bind(lavador_id)
        .bind(punto_id)
        .bind(EstadoOrden::Completada)
        .fetch_all(&self.pool)
        .await?;

        Ok(result)
    }

    pub async fn conteo_hoy(
        &self,
        inicio: DateTime<Utc>,
        fin: DateTime<Utc>,
        punto_id: Option<Uuid>,
    ) -> Result<ConteoHoy, AppError> {
        let result = sqlx::query_as::<_, ConteoHoy>(
            r#"
            SELECT
                COUNT(*) FILTER (WHERE created_at >= $1 AND created_at < $2) AS ordenes_hoy,
                COUNT(*) FILTER (WHERE estado = 'completada' AND completada_at >= $1 AND completada_at < $2) AS completadas_hoy,
                COALESCE(SUM(total) FILTER (WHERE estado = 'completada' AND completada_at >= $1 AND completada_at < $2), 0) AS ingresos_hoy,
                COUNT(*) FILTER (WHERE es_gratis AND estado = 'completada' AND completada_at >= $1 AND completada_at < $2) AS lavados_gratis_hoy
            FROM ordenes
            WHERE ($3::uuid IS NULL OR punto_id = $3)
            "#,
        )
        .bind(inicio)
        .bind(fin)
        .bind(punto_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(result)
    }

    /// Órdenes activas en cualquier fecha
    pub async fn ordenes_activas(&self, punto_id: Option<Uuid>) -> Result<i64, AppError> {
        let result: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM ordenes WHERE estado = $1 AND ($2::uuid IS NULL OR punto_id = $2)",
        )
        .bind(EstadoOrden::Activa)
        .bind(punto_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(result.0)
    }

    /// Total de clientes y clientes creados en el rango
    pub async fn clientes(
        &self,
        inicio: DateTime<Utc>,
        fin: DateTime<Utc>,
    ) -> Result<(i64, i64), AppError> {
        let result: (i64, i64) = sqlx::query_as(
            r#"
            SELECT
                COUNT(*),
                COUNT(*) FILTER (WHERE created_at >= $1 AND created_at < $2)
            FROM clientes
            "#,
        )
        .bind(inicio)
        .bind(fin)
        .fetch_one(&self.pool)
        .await?;

        Ok(result)
    }
}
