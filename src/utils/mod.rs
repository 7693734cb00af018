//! Utilidades del sistema
//!
//! Este módulo contiene el manejo de errores compartido por clientes y servicios.

pub mod errors;

pub use errors::*;
