use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{PgConnection, PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::models::orden::{EstadoOrden, Orden};
use crate::utils::errors::AppError;

/// Filtros ya resueltos del historial de órdenes
#[derive(Debug, Default)]
pub struct FiltroOrdenes {
    pub rango: Option<(DateTime<Utc>, DateTime<Utc>)>,
    pub estado: Option<EstadoOrden>,
    pub lavador_id: Option<Uuid>,
    pub placa: Option<String>,
    pub punto_id: Option<Uuid>,
}

impl FiltroOrdenes {
    fn push_where<'a>(&'a self, builder: &mut QueryBuilder<'a, Postgres>) {
        builder.push(" WHERE 1 = 1");
        if let Some((inicio, fin)) = &self.rango {
            builder
                .push(" AND created_at >= ")
                .push_bind(inicio)
                .push(" AND created_at < ")
                .push_bind(fin);
        }
        if let Some(estado) = self.estado {
            builder.push(" AND estado = ").push_bind(estado);
        }
        if let Some(lavador_id) = self.lavador_id {
            builder.push(" AND lavador_id = ").push_bind(lavador_id);
        }
        if let Some(placa) = &self.placa {
            builder.push(" AND placa = ").push_bind(placa);
        }
        if let Some(punto_id) = self.punto_id {
            builder.push(" AND punto_id = ").push_bind(punto_id);
        }
    }
}

pub struct OrdenRepository {
    pool: PgPool,
}

impl OrdenRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Incrementar atómicamente el contador del día y devolver la nueva secuencia
    pub async fn siguiente_secuencia(
        conn: &mut PgConnection,
        fecha: NaiveDate,
    ) -> Result<i32, AppError> {
        let result: (i32,) = sqlx::query_as(
            r#"
            INSERT INTO contadores_orden (fecha, secuencia)
            VALUES ($1, 1)
            ON CONFLICT (fecha) DO UPDATE SET secuencia = contadores_orden.secuencia + 1
            RETURNING secuencia
            "#,
        )
        .bind(fecha)
        .fetch_one(&mut *conn)
        .await?;

        Ok(result.0)
    }

    pub async fn insert(conn: &mut PgConnection, orden: &Orden) -> Result<Orden, AppError> {
        let result = sqlx::query_as::<_, Orden>(
            r#"
            INSERT INTO ordenes (
                id, numero, punto_id, cliente_id, vehiculo_id, placa, tipo_vehiculo, tipo_lavado,
                servicios, subtotal, descuento, total, metodo_pago, lavador_id,
                comision_porcentaje, comision_monto, contador_fidelizacion, es_gratis, estado,
                notas, creado_por, completada_at, cancelada_at, created_at, updated_at
            )
            VALUES (
                $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14,
                $15, $16, $17, $18, $19, $20, $21, $22, $23, $24, $25
            )
            RETURNING *
            "#,
        )
        .bind(orden.id)
        .bind(&orden.numero)
        .bind(orden.punto_id)
        .bind(orden.cliente_id)
        .bind(orden.vehiculo_id)
        .bind(&orden.placa)
        .bind(orden.tipo_vehiculo)
        .bind(orden.tipo_lavado)
        .bind(&orden.servicios)
        .bind(orden.subtotal)
        .bind(orden.descuento)
        .bind(orden.total)
        .bind(orden.metodo_pago)
        .bind(orden.lavador_id)
        .bind(orden.comision_porcentaje)
        .bind(orden.comision_monto)
        .bind(orden.contador_fidelizacion)
        .bind(orden.es_gratis)
        .bind(orden.estado)
        .bind(&orden.notas)
        .bind(orden.creado_por)
        .bind(orden.completada_at)
        .bind(orden.cancelada_at)
        .bind(orden.created_at)
        .bind(orden.updated_at)
        .fetch_one(&mut *conn)
        .await?;

        Ok(result)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Orden>, AppError> {
        let result = sqlx::query_as::<_, Orden>("SELECT * FROM ordenes WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(result)
    }

    /// Bloquear la orden hasta el fin de la transacción
    pub async fn find_by_id_for_update(
        conn: &mut PgConnection,
        id: Uuid,
    ) -> Result<Option<Orden>, AppError> {
        let result =
            sqlx::query_as::<_, Orden>("SELECT * FROM ordenes WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *conn)
                .await?;

        Ok(result)
    }

    /// Persistir la orden completada (montos, pago, comisión y fidelización)
    pub async fn completar(conn: &mut PgConnection, orden: &Orden) -> Result<Orden, AppError> {
        let result = sqlx::query_as::<_, Orden>(
            r#"
            UPDATE ordenes
            SET estado = $2, metodo_pago = $3, lavador_id = $4, descuento = $5, total = $6,
                comision_porcentaje = $7, comision_monto = $8, contador_fidelizacion = $9,
                es_gratis = $10, completada_at = $11, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(orden.id)
        .bind(orden.estado)
        .bind(orden.metodo_pago)
        .bind(orden.lavador_id)
        .bind(orden.descuento)
        .bind(orden.total)
        .bind(orden.comision_porcentaje)
        .bind(orden.comision_monto)
        .bind(orden.contador_fidelizacion)
        .bind(orden.es_gratis)
        .bind(orden.completada_at)
        .fetch_one(&mut *conn)
        .await?;

        Ok(result)
    }

    /// Cancelar solo si la orden sigue activa
    pub async fn cancelar(&self, id: Uuid, notas: Option<String>) -> Result<Option<Orden>, AppError> {
        let result = sqlx::query_as::<_, Orden>(
            r#"
            UPDATE ordenes
            SET estado = $2, cancelada_at = NOW(), notas = COALESCE($3, notas), updated_at = NOW()
            WHERE id = $1 AND estado = $4
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(EstadoOrden::Cancelada)
        .bind(notas)
        .bind(EstadoOrden::Activa)
        .fetch_optional(&self.pool)
        .await?;

        Ok(result)
    }

    pub async fn list(
        &self,
        filtro: &FiltroOrdenes,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<Orden>, i64), AppError> {
        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new("SELECT * FROM ordenes");
        filtro.push_where(&mut builder);
        builder
            .push(" ORDER BY created_at DESC LIMIT ")
            .push_bind(limit)
            .push(" OFFSET ")
            .push_bind(offset);
        let ordenes = builder
            .build_query_as::<Orden>()
            .fetch_all(&self.pool)
            .await?;

        let mut count: QueryBuilder<Postgres> = QueryBuilder::new("SELECT COUNT(*) FROM ordenes");
        filtro.push_where(&mut count);
        let total: (i64,) = count.build_query_as().fetch_one(&self.pool).await?;

        Ok((ordenes, total.0))
    }

    /// Últimas órdenes de un vehículo
    pub async fn recientes_por_vehiculo(
        &self,
        vehiculo_id: Uuid,
        limit: i64,
    ) -> Result<Vec<Orden>, AppError> {
        let result = sqlx::query_as::<_, Orden>(
            "SELECT * FROM ordenes WHERE vehiculo_id = $1 ORDER BY created_at DESC LIMIT $2",
        )
        .bind(vehiculo_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(result)
    }
}
