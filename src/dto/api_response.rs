use serde::{Deserialize, Serialize};

// Response genérica
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: Option<String>,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
        }
    }

    pub fn success_with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: Some(data),
        }
    }
}

/// Parámetros de paginación comunes a los listados
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Paginacion {
    pub limite: Option<i64>,
    pub pagina: Option<i64>,
}

impl Paginacion {
    pub const LIMITE_POR_DEFECTO: i64 = 20;
    pub const LIMITE_MAXIMO: i64 = 100;

    pub fn limit(&self) -> i64 {
        self.limite
            .unwrap_or(Self::LIMITE_POR_DEFECTO)
            .clamp(1, Self::LIMITE_MAXIMO)
    }

    pub fn page(&self) -> i64 {
        self.pagina.unwrap_or(1).max(1)
    }

    pub fn offset(&self) -> i64 {
        (self.page() - 1).saturating_mul(self.limit())
    }
}

// Listado paginado
#[derive(Debug, Serialize)]
pub struct ListResponse<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub pagina: i64,
    pub limite: i64,
}

impl<T> ListResponse<T> {
    pub fn new(items: Vec<T>, total: i64, paginacion: &Paginacion) -> Self {
        Self {
            items,
            total,
            pagina: paginacion.page(),
            limite: paginacion.limit(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paginacion_defaults() {
        let p = Paginacion::default();
        assert_eq!(p.limit(), 20);
        assert_eq!(p.page(), 1);
        assert_eq!(p.offset(), 0);
    }

    #[test]
    fn test_paginacion_clamps() {
        let p = Paginacion { limite: Some(500), pagina: Some(3) };
        assert_eq!(p.limit(), 100);
        assert_eq!(p.offset(), 200);

        let p = Paginacion { limite: Some(0), pagina: Some(-2) };
        assert_eq!(p.limit(), 1);
        assert_eq!(p.page(), 1);
    }

    #[test]
    fn test_paginacion_pagina_extrema() {
        let p = Paginacion { limite: Some(100), pagina: Some(i64::MAX) };
        assert_eq!(p.offset(), i64::MAX);

        let p = Paginacion { limite: None, pagina: Some(i64::MAX) };
        assert!(p.offset() > 0);
    }

    #[test]
    fn test_api_response_shape() {
        let body = serde_json::to_value(ApiResponse::success_with_message(5, "ok")).unwrap();
        assert_eq!(body["success"], true);
        assert_eq!(body["message"], "ok");
        assert_eq!(body["data"], 5);
    }
}
