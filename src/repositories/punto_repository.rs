use rust_decimal::Decimal;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::models::punto::Punto;
use crate::utils::errors::AppError;

pub struct PuntoRepository {
    pool: PgPool,
}

impl PuntoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, punto: &Punto) -> Result<Punto, AppError> {
        let result = sqlx::query_as::<_, Punto>(
            r#"
            INSERT INTO puntos (
                id, nombre, direccion, tarifas, umbral_fidelizacion, porcentaje_comision,
                total_ordenes, total_ingresos, total_comisiones, activo, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING *
            "#,
        )
        .bind(punto.id)
        .bind(&punto.nombre)
        .bind(&punto.direccion)
        .bind(&punto.tarifas)
        .bind(punto.umbral_fidelizacion)
        .bind(punto.porcentaje_comision)
        .bind(punto.total_ordenes)
        .bind(punto.total_ingresos)
        .bind(punto.total_comisiones)
        .bind(punto.activo)
        .bind(punto.created_at)
        .bind(punto.updated_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(result)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Punto>, AppError> {
        let result = sqlx::query_as::<_, Punto>("SELECT * FROM puntos WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(result)
    }

    pub async fn list(&self) -> Result<Vec<Punto>, AppError> {
        let result = sqlx::query_as::<_, Punto>("SELECT * FROM puntos ORDER BY nombre")
            .fetch_all(&self.pool)
            .await?;

        Ok(result)
    }

    pub async fn update(&self, punto: &Punto) -> Result<Punto, AppError> {
        let result = sqlx::query_as::<_, Punto>(
            r#"
            UPDATE puntos
            SET nombre = $2, direccion = $3, tarifas = $4, umbral_fidelizacion = $5,
                porcentaje_comision = $6, activo = $7, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(punto.id)
        .bind(&punto.nombre)
        .bind(&punto.direccion)
        .bind(&punto.tarifas)
        .bind(punto.umbral_fidelizacion)
        .bind(punto.porcentaje_comision)
        .bind(punto.activo)
        .fetch_one(&self.pool)
        .await?;

        Ok(result)
    }

    /// Leer el punto dentro de una transacción
    pub async fn find_by_id_tx(
        conn: &mut PgConnection,
        id: Uuid,
    ) -> Result<Option<Punto>, AppError> {
        let result = sqlx::query_as::<_, Punto>("SELECT * FROM puntos WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;

        Ok(result)
    }

    /// Sumar una orden completada a las estadísticas del punto
    pub async fn sumar_orden(
        conn: &mut PgConnection,
        id: Uuid,
        ingreso: Decimal,
        comision: Decimal,
    ) -> Result<(), AppError> {
        sqlx::query(
            r#"
            UPDATE puntos
            SET total_ordenes = total_ordenes + 1,
                total_ingresos = total_ingresos + $2,
                total_comisiones = total_comisiones + $3,
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(ingreso)
        .bind(comision)
        .execute(&mut *conn)
        .await?;

        Ok(())
    }
}
