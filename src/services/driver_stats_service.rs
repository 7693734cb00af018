//! Servicio de estadísticas del conductor
//!
//! Usa el endpoint agregado del panel y, si no está disponible, el de
//! estadísticas básicas.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::clients::api_client::{endpoints, ApiClient};
use crate::models::stats::{DriverStats, DriverStatsResponse};
use crate::services::route_activation::RouteActivationCoordinator;
use crate::utils::errors::ApiResult;

pub struct DriverStatsService {
    client: ApiClient,
    activation: Arc<RouteActivationCoordinator>,
}

impl DriverStatsService {
    pub fn new(client: ApiClient, activation: Arc<RouteActivationCoordinator>) -> Self {
        Self { client, activation }
    }

    pub async fn fetch(&self) -> ApiResult<DriverStats> {
        let mut stats = match self.fetch_from(endpoints::DRIVER_DASHBOARD).await {
            Ok(stats) => stats,
            Err(e) if e.is_unauthorized() => return Err(e),
            Err(e) => {
                warn!("⚠️ Panel no disponible ({}), usando estadísticas básicas", e);
                self.fetch_from(endpoints::DRIVER_STATS).await?
            }
        };

        // Sin ruta en la respuesta se usa la ruta activa conocida localmente
        if stats.active_route.is_none() {
            stats.active_route = self.activation.active_route().await.map(|route| route.name);
        }

        debug!(
            "📊 Stats: {} completadas, {} pendientes",
            stats.completed_pickups, stats.pending_pickups
        );
        Ok(stats)
    }

    async fn fetch_from(&self, path: &str) -> ApiResult<DriverStats> {
        let response: DriverStatsResponse = self
            .client
            .get(path, &[], "Failed to fetch stats")
            .await?;
        response.into_stats("Failed to fetch stats")
    }
}
