//! Servicios de negocio
//!
//! Reglas puras (sin acceso a base de datos) que usan los controladores:
//! fidelización, comisiones, numeración de órdenes y tarifas.

pub mod cobro;
pub mod comision;
pub mod fidelizacion;
pub mod numeracion;
pub mod tarifas;
