//! Utilidades del sistema
//!
//! Manejo de errores y helpers de validación.

pub mod errors;
pub mod validation;
