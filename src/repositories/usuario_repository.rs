use rust_decimal::Decimal;
use sqlx::{PgConnection, PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::dto::usuario_dto::UsuarioFilters;
use crate::models::usuario::{Rol, Usuario};
use crate::utils::errors::AppError;

pub struct UsuarioRepository {
    pool: PgPool,
}

impl UsuarioRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, usuario: &Usuario) -> Result<Usuario, AppError> {
        let result = sqlx::query_as::<_, Usuario>(
            r#"
            INSERT INTO usuarios (
                id, codigo, nombre, password_hash, rol, permisos, punto_id,
                saldo_comision, total_comisiones, total_lavados, activo, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING *
            "#,
        )
        .bind(usuario.id)
        .bind(&usuario.codigo)
        .bind(&usuario.nombre)
        .bind(&usuario.password_hash)
        .bind(usuario.rol)
        .bind(&usuario.permisos)
        .bind(usuario.punto_id)
        .bind(usuario.saldo_comision)
        .bind(usuario.total_comisiones)
        .bind(usuario.total_lavados)
        .bind(usuario.activo)
        .bind(usuario.created_at)
        .bind(usuario.updated_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(result)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Usuario>, AppError> {
        let result = sqlx::query_as::<_, Usuario>("SELECT * FROM usuarios WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(result)
    }

    pub async fn find_by_codigo(&self, codigo: &str) -> Result<Option<Usuario>, AppError> {
        let result = sqlx::query_as::<_, Usuario>("SELECT * FROM usuarios WHERE codigo = $1")
            .bind(codigo)
            .fetch_optional(&self.pool)
            .await?;

        Ok(result)
    }

    pub async fn codigo_exists(&self, codigo: &str) -> Result<bool, AppError> {
        let result: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM usuarios WHERE codigo = $1)")
                .bind(codigo)
                .fetch_one(&self.pool)
                .await?;

        Ok(result.0)
    }

    pub async fn list(&self, filters: &UsuarioFilters) -> Result<Vec<Usuario>, AppError> {
        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new("SELECT * FROM usuarios WHERE 1 = 1");
        if let Some(rol) = filters.rol {
            builder.push(" AND rol = ").push_bind(rol);
        }
        if let Some(activo) = filters.activo {
            builder.push(" AND activo = ").push_bind(activo);
        }
        builder.push(" ORDER BY nombre");

        let result = builder
            .build_query_as::<Usuario>()
            .fetch_all(&self.pool)
            .await?;

        Ok(result)
    }

    pub async fn update(&self, usuario: &Usuario) -> Result<Usuario, AppError> {
        let result = sqlx::query_as::<_, Usuario>(
            r#"
            UPDATE usuarios
            SET nombre = $2, password_hash = $3, rol = $4, permisos = $5,
                punto_id = $6, activo = $7, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(usuario.id)
        .bind(&usuario.nombre)
        .bind(&usuario.password_hash)
        .bind(usuario.rol)
        .bind(&usuario.permisos)
        .bind(usuario.punto_id)
        .bind(usuario.activo)
        .fetch_one(&self.pool)
        .await?;

        Ok(result)
    }

    /// Eliminar un usuario; devuelve false si no existía
    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM usuarios WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Poner en cero el saldo de comisión y devolver lo que se pagó
    pub async fn liquidar_comision(&self, id: Uuid) -> Result<Option<Decimal>, AppError> {
        let result: Option<(Decimal,)> = sqlx::query_as(
            r#"
            UPDATE usuarios u
            SET saldo_comision = 0, updated_at = NOW()
            FROM (SELECT id, saldo_comision FROM usuarios WHERE id = $1 FOR UPDATE) anterior
            WHERE u.id = anterior.id
            RETURNING anterior.saldo_comision
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(result.map(|r| r.0))
    }

    /// Leer un usuario dentro de una transacción
    pub async fn find_by_id_tx(
        conn: &mut PgConnection,
        id: Uuid,
    ) -> Result<Option<Usuario>, AppError> {
        let result = sqlx::query_as::<_, Usuario>("SELECT * FROM usuarios WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;

        Ok(result)
    }

    /// Acreditar la comisión de una orden completada al lavador
    pub async fn acreditar_comision(
        conn: &mut PgConnection,
        id: Uuid,
        monto: Decimal,
    ) -> Result<(), AppError> {
        sqlx::query(
            r#"
            UPDATE usuarios
            SET saldo_comision = saldo_comision + $2,
                total_comisiones = total_comisiones + $2,
                total_lavados = total_lavados + 1,
                updated_at = NOW()
            WHERE id = $1 AND rol = $3
            "#,
        )
        .bind(id)
        .bind(monto)
        .bind(Rol::Lavador)
        .execute(&mut *conn)
        .await?;

        Ok(())
    }
}
