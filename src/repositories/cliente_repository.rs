use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::models::cliente::Cliente;
use crate::utils::errors::AppError;

pub struct ClienteRepository {
    pool: PgPool,
}

impl ClienteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn insert(conn: &mut PgConnection, cliente: &Cliente) -> Result<Cliente, AppError> {
        let result = sqlx::query_as::<_, Cliente>(
            r#"
            INSERT INTO clientes (
                id, nombre, telefono, tipo_lavado_preferido, placa, vehiculo_id,
                lavados_iniciales, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(cliente.id)
        .bind(&cliente.nombre)
        .bind(&cliente.telefono)
        .bind(cliente.tipo_lavado_preferido)
        .bind(&cliente.placa)
        .bind(cliente.vehiculo_id)
        .bind(cliente.lavados_iniciales)
        .bind(cliente.created_at)
        .bind(cliente.updated_at)
        .fetch_one(&mut *conn)
        .await?;

        Ok(result)
    }

    /// Enlazar el cliente con su vehículo
    pub async fn set_vehiculo(
        conn: &mut PgConnection,
        cliente_id: Uuid,
        vehiculo_id: Uuid,
    ) -> Result<Cliente, AppError> {
        let result = sqlx::query_as::<_, Cliente>(
            "UPDATE clientes SET vehiculo_id = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(cliente_id)
        .bind(vehiculo_id)
        .fetch_one(&mut *conn)
        .await?;

        Ok(result)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Cliente>, AppError> {
        let result = sqlx::query_as::<_, Cliente>("SELECT * FROM clientes WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(result)
    }

    pub async fn find_by_placa(&self, placa: &str) -> Result<Option<Cliente>, AppError> {
        let result = sqlx::query_as::<_, Cliente>(
            r#"
            SELECT c.* FROM clientes c
            LEFT JOIN vehiculos v ON v.id = c.vehiculo_id
            WHERE c.placa = $1 OR v.placa = $1
            ORDER BY c.created_at DESC
            LIMIT 1
            "#,
        )
        .bind(placa)
        .fetch_optional(&self.pool)
        .await?;

        Ok(result)
    }

    pub async fn telefono_exists(&self, telefono: &str) -> Result<bool, AppError> {
        let result: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM clientes WHERE telefono = $1)")
                .bind(telefono)
                .fetch_one(&self.pool)
                .await?;

        Ok(result.0)
    }

    /// Buscar clientes por nombre, teléfono o placa
    pub async fn search(
        &self,
        q: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<Cliente>, i64), AppError> {
        let patron = q.map(patron_busqueda);

        let clientes = sqlx::query_as::<_, Cliente>(
            r#"
            SELECT * FROM clientes
            WHERE $1::text IS NULL
               OR LOWER(nombre) LIKE $1 ESCAPE '\'
               OR telefono LIKE $1 ESCAPE '\'
               OR LOWER(placa) LIKE $1 ESCAPE '\'
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(&patron)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        let total: (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*) FROM clientes
            WHERE $1::text IS NULL
               OR LOWER(nombre) LIKE $1 ESCAPE '\'
               OR telefono LIKE $1 ESCAPE '\'
               OR LOWER(placa) LIKE $1 ESCAPE '\'
            "#,
        )
        .bind(&patron)
        .fetch_one(&self.pool)
        .await?;

        Ok((clientes, total.0))
    }

    pub async fn update(&self, cliente: &Cliente) -> Result<Cliente, AppError> {
        let result = sqlx::query_as::<_, Cliente>(
            r#"
            UPDATE clientes
            SET nombre = $2, telefono = $3, tipo_lavado_preferido = $4, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(cliente.id)
        .bind(&cliente.nombre)
        .bind(&cliente.telefono)
        .bind(cliente.tipo_lavado_preferido)
        .fetch_one(&self.pool)
        .await?;

        Ok(result)
    }
}

/// Patrón LIKE en minúsculas con `%`, `_` y `\` tomados literalmente
fn patron_busqueda(q: &str) -> String {
    let mut patron = String::with_capacity(q.len() + 2);
    patron.push('%');
    for c in q.to_lowercase().chars() {
        if matches!(c, '%' | '_' | '\\') {
            patron.push('\\');
        }
        patron.push(c);
    }
    patron.push('%');
    patron
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patron_busqueda() {
        assert_eq!(patron_busqueda("Ana"), "%ana%");
        assert_eq!(patron_busqueda("50%"), "%50\\%%");
        assert_eq!(patron_busqueda("a_b"), "%a\\_b%");
        assert_eq!(patron_busqueda("c:\\x"), "%c:\\\\x%");
    }
}
