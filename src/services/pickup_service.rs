//! Servicio de pickups
//!
//! Completar una recogida solo está permitido cuando el conductor está activo
//! en la ruta de esa recogida.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::clients::api_client::{endpoints, ApiClient};
use crate::models::api::MessageResponse;
use crate::models::pickup::{CompletePickupRequest, Pickup, PickupListResponse, PickupStatus};
use crate::services::route_activation::RouteActivationCoordinator;
use crate::utils::errors::{ApiResult, PickupError};

pub struct PickupService {
    client: ApiClient,
    activation: Arc<RouteActivationCoordinator>,
}

impl PickupService {
    pub fn new(client: ApiClient, activation: Arc<RouteActivationCoordinator>) -> Self {
        Self { client, activation }
    }

    /// Recogidas de una ruta, opcionalmente filtradas por estado. Las de
    /// clientes inactivos no se devuelven.
    pub async fn list_for_route(
        &self,
        route_id: &str,
        status: Option<PickupStatus>,
    ) -> ApiResult<Vec<Pickup>> {
        let query: Vec<(&str, String)> = status
            .map(|s| vec![("status", s.as_str().to_string())])
            .unwrap_or_default();

        let response: PickupListResponse = self
            .client
            .get(&endpoints::pickups_by_route(route_id), &query, "Failed to fetch pickups")
            .await?;
        let pickups = response.into_active_pickups("Failed to fetch pickups")?;

        debug!("📦 {} pickups en ruta '{}'", pickups.len(), route_id);
        Ok(pickups)
    }

    /// Si el control "completar" debe estar habilitado para `pickup`
    pub async fn can_complete(&self, pickup: &Pickup) -> bool {
        !pickup.status.is_done() && self.activation.is_active_on_route(&pickup.route_id).await
    }

    pub async fn complete(&self, pickup: &Pickup, notes: &str) -> Result<Option<String>, PickupError> {
        if !self.activation.is_active_on_route(&pickup.route_id).await {
            warn!(
                "⛔ Pickup '{}' bloqueado: conductor no activo en ruta '{}'",
                pickup.id, pickup.route_id
            );
            return Err(PickupError::RouteNotActive {
                route_id: pickup.route_id.clone(),
            });
        }

        let response: MessageResponse = self
            .client
            .put(
                &endpoints::pickup(&pickup.id),
                &CompletePickupRequest::new(notes),
                "Failed to mark pickup as completed",
            )
            .await?;
        let message = response.into_message("Failed to mark pickup as completed")?;

        info!("✅ Pickup '{}' marcado como completado", pickup.id);
        Ok(message)
    }
}
