//! Controladores
//!
//! Validan las requests, orquestan repositorios y servicios y arman las
//! responses de la API.

pub mod auth_controller;
pub mod cliente_controller;
pub mod orden_controller;
pub mod punto_controller;
pub mod reporte_controller;
pub mod usuario_controller;
pub mod vehiculo_controller;
