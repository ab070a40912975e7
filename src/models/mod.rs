//! Modelos del sistema
//!
//! Este módulo contiene todos los modelos de datos que mapean exactamente
//! al schema PostgreSQL definido en `migrations/`.

pub mod cliente;
pub mod orden;
pub mod punto;
pub mod usuario;
pub mod vehiculo;
