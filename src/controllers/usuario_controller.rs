use bcrypt::{hash, DEFAULT_COST};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::dto::api_response::ApiResponse;
use crate::dto::usuario_dto::{
    CreateUsuarioRequest, LiquidacionComisionResponse, UpdateUsuarioRequest, UsuarioFilters,
    UsuarioResponse,
};
use crate::middleware::auth::AuthenticatedUser;
use crate::models::usuario::{Rol, Usuario};
use crate::repositories::punto_repository::PuntoRepository;
use crate::repositories::usuario_repository::UsuarioRepository;
use crate::utils::errors::{conflict_error, forbidden_error, not_found_error, AppError};

pub struct UsuarioController {
    repository: UsuarioRepository,
    puntos: PuntoRepository,
}

impl UsuarioController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: UsuarioRepository::new(pool.clone()),
            puntos: PuntoRepository::new(pool),
        }
    }

    pub async fn create(
        &self,
        actor: &AuthenticatedUser,
        request: CreateUsuarioRequest,
    ) -> Result<ApiResponse<UsuarioResponse>, AppError> {
        actor.require("usuarios")?;
        request.validate()?;
        check_rol_asignable(actor, request.rol)?;

        let codigo = request.codigo.trim().to_string();
        if self.repository.codigo_exists(&codigo).await? {
            return Err(conflict_error("un usuario", "código", &codigo));
        }
        if let Some(punto_id) = request.punto_id {
            self.ensure_punto(punto_id).await?;
        }

        let password_hash = hash(&request.password, DEFAULT_COST)?;
        let permisos = request
            .permisos
            .unwrap_or_else(|| request.rol.permisos_por_defecto());

        let usuario = Usuario::new(
            codigo,
            request.nombre.trim().to_string(),
            password_hash,
            request.rol,
            permisos,
            request.punto_id,
        );
        let saved = self.repository.create(&usuario).await?;

        info!("👤 Usuario creado: {} ({:?})", saved.codigo, saved.rol);
        Ok(ApiResponse::success_with_message(
            saved.into(),
            "Usuario creado exitosamente",
        ))
    }

    pub async fn list(&self, filters: UsuarioFilters) -> Result<Vec<UsuarioResponse>, AppError> {
        let usuarios = self.repository.list(&filters).await?;
        Ok(usuarios.into_iter().map(UsuarioResponse::from).collect())
    }

    /// Lavadores activos, para asignarlos a las órdenes
    pub async fn lavadores(&self) -> Result<Vec<UsuarioResponse>, AppError> {
        let filters = UsuarioFilters {
            rol: Some(Rol::Lavador),
            activo: Some(true),
        };
        self.list(filters).await
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<UsuarioResponse, AppError> {
        let usuario = self.find(id).await?;
        Ok(usuario.into())
    }

    pub async fn update(
        &self,
        actor: &AuthenticatedUser,
        id: Uuid,
        request: UpdateUsuarioRequest,
    ) -> Result<ApiResponse<UsuarioResponse>, AppError> {
        actor.require("usuarios")?;
        request.validate()?;

        let mut usuario = self.find(id).await?;
        check_rol_asignable(actor, usuario.rol)?;

        if let Some(nombre) = request.nombre {
            usuario.nombre = nombre.trim().to_string();
        }
        if let Some(password) = request.password {
            usuario.password_hash = hash(&password, DEFAULT_COST)?;
        }
        if let Some(rol) = request.rol {
            check_rol_asignable(actor, rol)?;
            usuario.rol = rol;
        }
        if let Some(permisos) = request.permisos {
            usuario.permisos = permisos;
        }
        if let Some(punto_id) = request.punto_id {
            self.ensure_punto(punto_id).await?;
            usuario.punto_id = Some(punto_id);
        }
        if let Some(activo) = request.activo {
            usuario.activo = activo;
        }

        let updated = self.repository.update(&usuario).await?;
        Ok(ApiResponse::success_with_message(
            updated.into(),
            "Usuario actualizado exitosamente",
        ))
    }

    pub async fn delete(&self, actor: &AuthenticatedUser, id: Uuid) -> Result<(), AppError> {
        actor.require("usuarios")?;
        if actor.user_id == id {
            return Err(forbidden_error("eliminar el usuario", "no puede eliminarse a sí mismo"));
        }

        let usuario = self.find(id).await?;
        check_rol_asignable(actor, usuario.rol)?;

        if !self.repository.delete(id).await? {
            return Err(not_found_error("Usuario", &id.to_string()));
        }
        info!("🗑️ Usuario eliminado: {}", usuario.codigo);
        Ok(())
    }

    /// Pagar al lavador su saldo de comisión pendiente
    pub async fn liquidar_comision(
        &self,
        actor: &AuthenticatedUser,
        id: Uuid,
    ) -> Result<ApiResponse<LiquidacionComisionResponse>, AppError> {
        actor.require("comisiones")?;

        let usuario = self.find(id).await?;
        if usuario.rol != Rol::Lavador {
            return Err(AppError::BadRequest(
                "Solo los lavadores tienen saldo de comisión".to_string(),
            ));
        }

        let pagado = self
            .repository
            .liquidar_comision(id)
            .await?
            .ok_or_else(|| not_found_error("Usuario", &id.to_string()))?;

        info!("💵 Comisión liquidada a {}: {}", usuario.codigo, pagado);
        Ok(ApiResponse::success_with_message(
            LiquidacionComisionResponse {
                usuario_id: id,
                monto_pagado: pagado,
                saldo_restante: rust_decimal::Decimal::ZERO,
            },
            "Comisión liquidada exitosamente",
        ))
    }

    async fn find(&self, id: Uuid) -> Result<Usuario, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Usuario", &id.to_string()))
    }

    async fn ensure_punto(&self, punto_id: Uuid) -> Result<(), AppError> {
        self.puntos
            .find_by_id(punto_id)
            .await?
            .map(|_| ())
            .ok_or_else(|| not_found_error("Punto", &punto_id.to_string()))
    }
}

/// Solo un superadmin puede crear o modificar otros superadmins
fn check_rol_asignable(actor: &AuthenticatedUser, rol: Rol) -> Result<(), AppError> {
    if rol == Rol::Superadmin && actor.rol != Rol::Superadmin {
        return Err(forbidden_error(
            "gestionar un superadmin",
            "solo un superadmin puede hacerlo",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn actor(rol: Rol) -> AuthenticatedUser {
        AuthenticatedUser {
            user_id: Uuid::new_v4(),
            codigo: "actor".into(),
            nombre: "Actor".into(),
            rol,
            permisos: rol.permisos_por_defecto(),
            punto_id: None,
        }
    }

    #[test]
    fn test_admin_cannot_manage_superadmin() {
        assert!(check_rol_asignable(&actor(Rol::Admin), Rol::Superadmin).is_err());
        assert!(check_rol_asignable(&actor(Rol::Admin), Rol::Lavador).is_ok());
        assert!(check_rol_asignable(&actor(Rol::Superadmin), Rol::Superadmin).is_ok());
    }
}
