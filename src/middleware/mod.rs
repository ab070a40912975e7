//! Middleware del sistema
//!
//! Autenticación (stub) y CORS.

pub mod auth;
pub mod cors;

pub use auth::*;
pub use cors::*;
