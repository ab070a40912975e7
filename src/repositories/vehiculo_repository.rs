use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::models::vehiculo::Vehiculo;
use crate::utils::errors::AppError;

pub struct VehiculoRepository {
    pool: PgPool,
}

impl VehiculoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Vehiculo>, AppError> {
        let vehiculo = sqlx::query_as::<_, Vehiculo>("SELECT * FROM vehiculos WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(vehiculo)
    }

    pub async fn find_by_placa(&self, placa: &str) -> Result<Option<Vehiculo>, AppError> {
        let vehiculo = sqlx::query_as::<_, Vehiculo>("SELECT * FROM vehiculos WHERE placa = $1")
            .bind(placa)
            .fetch_optional(&self.pool)
            .await?;

        Ok(vehiculo)
    }

    pub async fn placa_exists(&self, placa: &str) -> Result<bool, AppError> {
        let result: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM vehiculos WHERE placa = $1)")
                .bind(placa)
                .fetch_one(&self.pool)
                .await?;

        Ok(result.0)
    }

    pub async fn insert(conn: &mut PgConnection, vehiculo: &Vehiculo) -> Result<Vehiculo, AppError> {
        let vehiculo = sqlx::query_as::<_, Vehiculo>(
            r#"
            INSERT INTO vehiculos (
                id, placa, tipo, cliente_id, contador_actual, total_lavados,
                lavados_gratis, ultimo_lavado, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(vehiculo.id)
        .bind(&vehiculo.placa)
        .bind(vehiculo.tipo)
        .bind(vehiculo.cliente_id)
        .bind(vehiculo.contador_actual)
        .bind(vehiculo.total_lavados)
        .bind(vehiculo.lavados_gratis)
        .bind(vehiculo.ultimo_lavado)
        .bind(vehiculo.created_at)
        .bind(vehiculo.updated_at)
        .fetch_one(&mut *conn)
        .await?;

        Ok(vehiculo)
    }

    /// Bloquear la fila del vehículo hasta el fin de la transacción
    pub async fn find_by_id_for_update(
        conn: &mut PgConnection,
        id: Uuid,
    ) -> Result<Option<Vehiculo>, AppError> {
        let vehiculo =
            sqlx::query_as::<_, Vehiculo>("SELECT * FROM vehiculos WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *conn)
                .await?;

        Ok(vehiculo)
    }

    /// Guardar el nuevo contador y sumar el lavado a las estadísticas
    pub async fn registrar_lavado(
        conn: &mut PgConnection,
        id: Uuid,
        contador_nuevo: i32,
        es_gratis: bool,
    ) -> Result<Vehiculo, AppError> {
        let vehiculo = sqlx::query_as::<_, Vehiculo>(
            r#"
            UPDATE vehiculos
            SET contador_actual = $2,
                total_lavados = total_lavados + 1,
                lavados_gratis = lavados_gratis + CASE WHEN $3 THEN 1 ELSE 0 END,
                ultimo_lavado = NOW(),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(contador_nuevo)
        .bind(es_gratis)
        .fetch_one(&mut *conn)
        .await?;

        Ok(vehiculo)
    }
}
