//! Servicio de sesión
//!
//! Login, logout y perfil del conductor. La sesión vive en el `AppState`; el
//! `ApiClient` la lee para adjuntar el bearer token.

use tracing::{info, warn};
use validator::Validate;

use crate::clients::api_client::{endpoints, ApiClient};
use crate::models::api::ApiEnvelope;
use crate::models::auth::{DriverSession, LoginRequest, LoginResponse, User};
use crate::state::AppState;
use crate::utils::errors::{invalid_response, ApiError, ApiResult};

pub struct SessionService {
    client: ApiClient,
    state: AppState,
}

impl SessionService {
    pub fn new(client: ApiClient, state: AppState) -> Self {
        Self { client, state }
    }

    /// Autenticar con email y contraseña y almacenar la sesión
    pub async fn login(&self, email: &str, password: &str) -> ApiResult<User> {
        let request = LoginRequest {
            email: email.trim().to_string(),
            password: password.to_string(),
        };
        request.validate()?;

        // Un token anterior no debe viajar con el login
        self.state.clear().await;

        let response: LoginResponse = self
            .client
            .post(endpoints::LOGIN, &request, "Login failed")
            .await?;

        if response.success == Some(false) {
            let message = response
                .error
                .or(response.message)
                .unwrap_or_else(|| "Login failed".to_string());
            return Err(ApiError::Unauthorized(message));
        }

        let (token, user) = match (response.token, response.user) {
            (Some(token), Some(user)) => (token, user),
            _ => return Err(invalid_response("Invalid response from server")),
        };

        if !user.is_driver() {
            warn!("⚠️ Usuario '{}' autenticado con rol '{}'", user.id, user.role);
        }

        info!("🔐 Login exitoso para {}", user.email);
        self.state.set_session(DriverSession::new(token, user.clone())).await;
        Ok(user)
    }

    /// Reanudar una sesión ya existente (token obtenido previamente)
    pub async fn restore(&self, session: DriverSession) {
        self.state.set_session(session).await;
    }

    pub async fn logout(&self) {
        info!("👋 Cerrando sesión");
        self.state.clear().await;
    }

    /// Obtener el perfil y actualizar el usuario de la sesión
    pub async fn profile(&self) -> ApiResult<User> {
        let envelope: ApiEnvelope<User> = self
            .client
            .get(endpoints::PROFILE, &[], "Failed to fetch profile")
            .await?;
        let user = envelope.into_data("Failed to fetch profile")?;

        if let Some(session) = self.state.session.write().await.as_mut() {
            session.user = user.clone();
        }
        Ok(user)
    }

    pub async fn current_driver_id(&self) -> Option<String> {
        self.state
            .current_session()
            .await
            .map(|s| s.driver_id().to_string())
    }

    pub async fn is_authenticated(&self) -> bool {
        self.state.session.read().await.is_some()
    }
}
