//! DTOs de la API
//!
//! Requests y responses que cruzan la frontera HTTP.

pub mod api_response;
pub mod auth_dto;
pub mod cliente_dto;
pub mod orden_dto;
pub mod punto_dto;
pub mod reporte_dto;
pub mod usuario_dto;
pub mod vehiculo_dto;
