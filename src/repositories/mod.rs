//! Repositorios
//!
//! Acceso a PostgreSQL con sqlx. Los métodos que reciben `&mut PgConnection`
//! están pensados para ejecutarse dentro de una transacción abierta por el
//! controlador.

pub mod cliente_repository;
pub mod orden_repository;
pub mod punto_repository;
pub mod reporte_repository;
pub mod usuario_repository;
pub mod vehiculo_repository;
