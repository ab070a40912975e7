use bcrypt::verify;
use sqlx::PgPool;
use tracing::{info, warn};
use validator::Validate;

use crate::dto::auth_dto::{LoginRequest, LoginResponse};
use crate::repositories::usuario_repository::UsuarioRepository;
use crate::utils::errors::AppError;

pub struct AuthController {
    repository: UsuarioRepository,
}

impl AuthController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: UsuarioRepository::new(pool),
        }
    }

    /// Verificar código y contraseña; no se emite token
    pub async fn login(&self, request: LoginRequest) -> Result<LoginResponse, AppError> {
        request.validate()?;

        let codigo = request.codigo.trim();
        let usuario = self
            .repository
            .find_by_codigo(codigo)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Credenciales inválidas".to_string()))?;

        if !verify(&request.password, &usuario.password_hash)? {
            warn!("🔒 Contraseña incorrecta para el usuario {}", codigo);
            return Err(AppError::Unauthorized("Credenciales inválidas".to_string()));
        }

        if !usuario.activo {
            return Err(AppError::Forbidden("El usuario está inactivo".to_string()));
        }

        info!("✅ Login exitoso: {} ({:?})", usuario.codigo, usuario.rol);
        Ok(LoginResponse {
            success: true,
            message: format!("Bienvenido, {}", usuario.nombre),
            usuario: usuario.into(),
        })
    }
}
