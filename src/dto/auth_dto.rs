use serde::{Deserialize, Serialize};
use validator::Validate;

use super::usuario_dto::UsuarioResponse;

// Login request: código de usuario + contraseña
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "El código es requerido"))]
    pub codigo: String,
    #[validate(length(min = 1, message = "La contraseña es requerida"))]
    pub password: String,
}

// Login response (no emite token)
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub message: String,
    pub usuario: UsuarioResponse,
}
