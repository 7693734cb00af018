//! Coordinador de activación de rutas
//!
//! Un conductor puede estar activo en una sola ruta a la vez. El coordinador
//! pide activación/desactivación al backend, reconcilia el estado local con la
//! respuesta del servidor y distingue un 409 (ruta ocupada) de un error
//! genérico. Solo admite una petición de activación en curso a la vez.

use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};

use crate::models::route::{ActiveDriver, Route};
use crate::services::route_backend::RouteBackend;
use crate::state::{AppState, RouteState};
use crate::utils::errors::{ActivationError, ApiError};

pub struct RouteActivationCoordinator {
    backend: Arc<dyn RouteBackend>,
    state: AppState,
    request_gate: Mutex<()>,
}

impl RouteActivationCoordinator {
    pub fn new(backend: Arc<dyn RouteBackend>, state: AppState) -> Self {
        Self {
            backend,
            state,
            request_gate: Mutex::new(()),
        }
    }

    /// Refrescar la ruta activa desde el servidor.
    ///
    /// Un fallo no es fatal: se registra el error y se trata como "sin ruta activa".
    /// Si mientras tanto se confirmó una activación o desactivación, la
    /// respuesta se descarta y se devuelve la ruta activa local.
    pub async fn fetch_active_route(&self) -> Option<Route> {
        let driver = self.state.current_driver().await;
        let epoch = self.state.routes.read().await.activation_epoch;

        let result = self.backend.fetch_active_route().await;

        let mut state = self.state.routes.write().await;
        if state.activation_epoch != epoch {
            debug!("⏭️ Respuesta de ruta activa obsoleta descartada");
            return state.active_route.clone();
        }

        match result {
            Ok(route) => {
                debug!(
                    "📍 Ruta activa según servidor: {:?}",
                    route.as_ref().map(|r| r.id.as_str())
                );
                state.apply_active_route(driver.as_ref(), route);
                state.last_error = None;
                state.active_route.clone()
            }
            Err(e) => {
                warn!("⚠️ Error obteniendo ruta activa: {}", e);
                state.active_route = None;
                state.last_error = Some(e.user_message());
                None
            }
        }
    }

    /// Activar al conductor actual en `route_id`.
    ///
    /// En éxito la ruta anterior (si la hay) queda libre y la nueva asignada en
    /// la misma actualización del estado. En fallo el estado de rutas no cambia.
    /// Si la lectura de confirmación devuelve otra ruta, se aplica lo que dice
    /// el servidor y se devuelve `InvalidResponse`.
    pub async fn activate(&self, route_id: &str) -> Result<Route, ActivationError> {
        let _gate = self
            .request_gate
            .try_lock()
            .map_err(|_| ActivationError::RequestInFlight)?;
        let driver = self.require_driver().await?;

        let loading = LoadingGuard::start(&self.state.routes).await;
        info!("🚦 Activando conductor '{}' en ruta '{}'", driver.id, route_id);

        let message = match self.backend.activate(route_id).await {
            Ok(message) => message,
            Err(e) => return Err(self.record_failure(loading, classify(e)).await),
        };

        let confirmation = self.backend.fetch_active_route().await;

        let mut state = self.state.routes.write().await;
        loading.finish(&mut state);
        state.mark_activation_change();

        let route = match confirmation {
            Ok(Some(route)) if route.id == route_id => route,
            Ok(other) => {
                let reported = other.as_ref().map(|r| r.id.clone());
                warn!(
                    "⚠️ Servidor reporta ruta activa {:?} tras activar '{}'",
                    reported, route_id
                );
                state.apply_active_route(Some(&driver), other);
                let error = ApiError::InvalidResponse(format!(
                    "Server reports a different active route after activating '{}'",
                    route_id
                ));
                state.last_error = Some(error.user_message());
                return Err(error.into());
            }
            Err(e) => {
                warn!("⚠️ No se pudo confirmar la ruta activa: {}", e);
                state
                    .find_route(route_id)
                    .cloned()
                    .unwrap_or_else(|| Route::placeholder(route_id))
            }
        };

        state.apply_active_route(Some(&driver), Some(route));
        state.last_error = None;
        state.last_message =
            Some(message.unwrap_or_else(|| "Route activated successfully".to_string()));

        info!("✅ Ruta '{}' activada", route_id);
        state
            .active_route
            .clone()
            .ok_or_else(|| ActivationError::Failed(ApiError::InvalidResponse("active route missing".into())))
    }

    /// Desactivar al conductor actual de `route_id`.
    ///
    /// La petición se envía aunque el estado local no lo marque activo en esa
    /// ruta; en éxito la ruta activa local solo se limpia si coincide.
    pub async fn deactivate(&self, route_id: &str) -> Result<(), ActivationError> {
        let _gate = self
            .request_gate
            .try_lock()
            .map_err(|_| ActivationError::RequestInFlight)?;
        let driver = self.require_driver().await?;

        let loading = LoadingGuard::start(&self.state.routes).await;
        if !self.is_active_on_route(route_id).await {
            debug!("Desactivando '{}' sin estar activo localmente en ella", route_id);
        }

        let message = match self.backend.deactivate(route_id).await {
            Ok(message) => message,
            Err(e) => return Err(self.record_failure(loading, ActivationError::Failed(e)).await),
        };

        let mut state = self.state.routes.write().await;
        loading.finish(&mut state);
        state.mark_activation_change();
        state.apply_deactivation(&driver.id, route_id);
        state.last_error = None;
        state.last_message =
            Some(message.unwrap_or_else(|| "Route deactivated successfully".to_string()));

        info!("✅ Ruta '{}' desactivada", route_id);
        Ok(())
    }

    pub async fn is_active_on_route(&self, route_id: &str) -> bool {
        self.state.routes.read().await.is_active_on_route(route_id)
    }

    pub async fn active_route(&self) -> Option<Route> {
        self.state.routes.read().await.active_route.clone()
    }

    pub async fn snapshot(&self) -> RouteState {
        self.state.route_snapshot().await
    }

    async fn require_driver(&self) -> Result<ActiveDriver, ActivationError> {
        self.state
            .current_driver()
            .await
            .ok_or_else(|| ApiError::Unauthorized("No authenticated driver".to_string()).into())
    }

    async fn record_failure(&self, loading: LoadingGuard, error: ActivationError) -> ActivationError {
        warn!("❌ {}: {}", error.title(), error);
        let mut state = self.state.routes.write().await;
        loading.finish(&mut state);
        state.last_error = Some(error.user_message());
        error
    }
}

/// Mantiene `loading` en `true` mientras hay una petición en curso. Si el
/// future se cancela antes de `finish`, el drop lo devuelve a `false`.
struct LoadingGuard {
    routes: Arc<RwLock<RouteState>>,
    armed: bool,
}

impl LoadingGuard {
    async fn start(routes: &Arc<RwLock<RouteState>>) -> Self {
        routes.write().await.loading = true;
        Self {
            routes: routes.clone(),
            armed: true,
        }
    }

    fn finish(mut self, state: &mut RouteState) {
        state.loading = false;
        self.armed = false;
    }
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        debug!("Petición de ruta cancelada, liberando loading");
        if let Ok(mut state) = self.routes.try_write() {
            state.loading = false;
        } else if let Ok(handle) = tokio::runtime::Handle::try_current() {
            let routes = self.routes.clone();
            handle.spawn(async move {
                routes.write().await.loading = false;
            });
        }
    }
}

fn classify(error: ApiError) -> ActivationError {
    match error {
        ApiError::Conflict(message) => ActivationError::Occupied { message },
        other => ActivationError::Failed(other),
    }
}
