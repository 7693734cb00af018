//! Cliente HTTP para el backend de la app de conductores
//!
//! Adjunta el bearer token de la sesión actual, convierte status no exitosos
//! en `ApiError` y limpia la sesión (y el estado de rutas derivado de ella)
//! cuando el backend responde 401.

use reqwest::{Client, RequestBuilder, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};

use crate::config::environment::EnvironmentConfig;
use crate::models::api::ErrorBody;
use crate::state::AppState;
use crate::utils::errors::{ApiError, ApiResult};

/// Endpoints del backend
pub mod endpoints {
    pub const LOGIN: &str = "/api/auth/login";
    pub const PROFILE: &str = "/api/auth/profile";

    pub const ROUTES_ACTIVE: &str = "/driver/routes/active";
    pub const ROUTES_ACTIVATE: &str = "/driver/routes/activate";
    pub const ROUTES_DEACTIVATE: &str = "/driver/routes/deactivate";
    pub const ROUTES_LIST: &str = "/organization/routes";

    pub const BAG_STATS: &str = "/driver/bags/stats";
    pub const BAG_TRANSFERS: &str = "/driver/bags/transfers";
    pub const BAG_TRANSFER_INITIATE: &str = "/driver/bags/transfer/initiate";
    pub const BAG_TRANSFER_COMPLETE: &str = "/driver/bags/transfer/complete";

    pub const BAG_DISTRIBUTE: &str = "/api/bags/distribute";
    pub const BAG_VERIFY: &str = "/api/bags/verify";
    pub const BAG_CURRENT_WEEK: &str = "/api/bags/current-week";

    pub const DRIVER_DASHBOARD: &str = "/api/driver/dashboard";
    pub const DRIVER_STATS: &str = "/api/driver/stats";

    pub fn pickups_by_route(route_id: &str) -> String {
        format!("/api/pickUps/route/{}", urlencoding::encode(route_id))
    }

    pub fn pickup(pickup_id: &str) -> String {
        format!("/api/pickUps/{}", urlencoding::encode(pickup_id))
    }
}

/// Cliente HTTP autenticado
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    state: AppState,
}

impl ApiClient {
    /// Crear nuevo cliente con el timeout configurado
    pub fn new(config: &EnvironmentConfig, state: AppState) -> ApiResult<Self> {
        let client = Client::builder().timeout(config.timeout()).build()?;

        Ok(Self {
            client,
            base_url: config.api_base_url.clone(),
            state,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
        default_message: &str,
    ) -> ApiResult<T> {
        let request = self.client.get(self.url(path)).query(query);
        self.send(request, default_message).await
    }

    pub async fn post<B, T>(&self, path: &str, body: &B, default_message: &str) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.client.post(self.url(path)).json(body);
        self.send(request, default_message).await
    }

    pub async fn put<B, T>(&self, path: &str, body: &B, default_message: &str) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.client.put(self.url(path)).json(body);
        self.send(request, default_message).await
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        default_message: &str,
    ) -> ApiResult<T> {
        let request = match self.state.session.read().await.as_ref() {
            Some(session) => request.bearer_auth(&session.token),
            None => request,
        };

        let response = request.send().await?;
        let status = response.status();
        debug!("📡 {} {}", status.as_u16(), response.url().path());

        if !status.is_success() {
            let body: ErrorBody = response.json().await.unwrap_or_default();
            let message = body.message_or(default_message);

            if status == StatusCode::UNAUTHORIZED {
                warn!("🔒 Unauthorized - limpiando sesión almacenada");
                self.state.clear().await;
            }

            return Err(ApiError::from_status(status, message));
        }

        let bytes = response.bytes().await?;
        let payload: &[u8] = if bytes.is_empty() { b"{}" } else { &bytes[..] };
        serde_json::from_slice(payload).map_err(|e| {
            ApiError::InvalidResponse(format!("{}: error parsing JSON: {}", default_message, e))
        })
    }
}
