//! Backend de rutas
//!
//! `RouteBackend` es la frontera con el directorio de rutas del servidor. La
//! implementación HTTP usa `ApiClient`; los tests usan un backend en memoria.

use async_trait::async_trait;
use tracing::debug;

use crate::clients::api_client::{endpoints, ApiClient};
use crate::models::api::{ApiEnvelope, MessageResponse};
use crate::models::route::{ActivationIntent, ActiveRouteData, Route, RoutePage};
use crate::utils::errors::ApiResult;

/// Operaciones del servidor sobre rutas para el conductor autenticado
#[async_trait]
pub trait RouteBackend: Send + Sync {
    /// Ruta en la que el conductor actual está activo, si hay alguna
    async fn fetch_active_route(&self) -> ApiResult<Option<Route>>;

    /// Pedir exclusividad sobre `route_id`. Devuelve el mensaje de confirmación.
    async fn activate(&self, route_id: &str) -> ApiResult<Option<String>>;

    async fn deactivate(&self, route_id: &str) -> ApiResult<Option<String>>;

    async fn list_routes(&self, page: u32, limit: u32) -> ApiResult<RoutePage>;
}

/// Implementación HTTP del backend de rutas
#[derive(Clone)]
pub struct HttpRouteBackend {
    client: ApiClient,
}

impl HttpRouteBackend {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl RouteBackend for HttpRouteBackend {
    async fn fetch_active_route(&self) -> ApiResult<Option<Route>> {
        let envelope: ApiEnvelope<ActiveRouteData> = self
            .client
            .get(endpoints::ROUTES_ACTIVE, &[], "Failed to fetch active route")
            .await?;

        let data = envelope.into_optional("Failed to fetch active route")?;
        Ok(data.and_then(|d| d.route))
    }

    async fn activate(&self, route_id: &str) -> ApiResult<Option<String>> {
        debug!("🚦 POST activate route_id={}", route_id);
        let response: MessageResponse = self
            .client
            .post(
                endpoints::ROUTES_ACTIVATE,
                &ActivationIntent { route_id },
                "Failed to activate route",
            )
            .await?;
        response.into_message("Failed to activate route")
    }

    async fn deactivate(&self, route_id: &str) -> ApiResult<Option<String>> {
        debug!("🚦 POST deactivate route_id={}", route_id);
        let response: MessageResponse = self
            .client
            .post(
                endpoints::ROUTES_DEACTIVATE,
                &ActivationIntent { route_id },
                "Failed to deactivate route",
            )
            .await?;
        response.into_message("Failed to deactivate route")
    }

    async fn list_routes(&self, page: u32, limit: u32) -> ApiResult<RoutePage> {
        let envelope: ApiEnvelope<RoutePage> = self
            .client
            .get(
                endpoints::ROUTES_LIST,
                &[("page", page.to_string()), ("limit", limit.to_string())],
                "Failed to fetch routes",
            )
            .await?;

        Ok(envelope
            .into_optional("Failed to fetch routes")?
            .unwrap_or_default())
    }
}
