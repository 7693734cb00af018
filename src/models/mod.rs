//! Modelos del sistema
//!
//! Este módulo contiene los modelos de datos que mapean exactamente
//! al JSON del backend de la app de conductores.

pub mod api;
pub mod auth;
pub mod bag;
pub mod pickup;
pub mod route;
pub mod stats;
