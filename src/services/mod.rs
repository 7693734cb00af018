//! Services module
//!
//! Este módulo contiene la lógica de negocio del cliente. `DriverServices`
//! construye todos los servicios sobre un mismo `AppState` y un mismo
//! `ApiClient`.

pub mod bag_service;
pub mod driver_stats_service;
pub mod pickup_service;
pub mod route_activation;
pub mod route_backend;
pub mod route_directory;
pub mod session_service;

pub use bag_service::BagService;
pub use driver_stats_service::DriverStatsService;
pub use pickup_service::PickupService;
pub use route_activation::RouteActivationCoordinator;
pub use route_backend::{HttpRouteBackend, RouteBackend};
pub use route_directory::RouteDirectory;
pub use session_service::SessionService;

use std::sync::Arc;

use crate::clients::api_client::ApiClient;
use crate::config::environment::EnvironmentConfig;
use crate::state::AppState;
use crate::utils::errors::ApiResult;

/// Servicios de la app de conductores compartiendo estado
pub struct DriverServices {
    pub state: AppState,
    pub session: SessionService,
    pub routes: RouteDirectory,
    pub activation: Arc<RouteActivationCoordinator>,
    pub pickups: PickupService,
    pub bags: BagService,
    pub stats: DriverStatsService,
}

impl DriverServices {
    pub fn new(config: &EnvironmentConfig, state: AppState) -> ApiResult<Self> {
        let client = ApiClient::new(config, state.clone())?;
        let backend: Arc<dyn RouteBackend> = Arc::new(HttpRouteBackend::new(client.clone()));
        let activation = Arc::new(RouteActivationCoordinator::new(backend.clone(), state.clone()));

        Ok(Self {
            session: SessionService::new(client.clone(), state.clone()),
            routes: RouteDirectory::new(backend, state.clone(), config.routes_page_size),
            pickups: PickupService::new(client.clone(), activation.clone()),
            stats: DriverStatsService::new(client.clone(), activation.clone()),
            bags: BagService::new(client),
            activation,
            state,
        })
    }
}
