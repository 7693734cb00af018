//! Cliente de la app de conductores
//!
//! Sesión, directorio de rutas, activación exclusiva de ruta por conductor,
//! pickups y bolsas sobre el backend REST.

pub mod clients;
pub mod config;
pub mod models;
pub mod services;
pub mod state;
pub mod utils;

pub use config::EnvironmentConfig;
pub use services::DriverServices;
pub use state::{AppState, RouteState};
pub use utils::errors::{ActivationError, ApiError, ApiResult, PickupError};
