//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación. Es el único
//! contenedor de la sesión, la lista de rutas en memoria y la ruta activa;
//! los servicios reciben un clon del handle en lugar de usar globales.

use std::sync::Arc;
use tokio::sync::RwLock;

use crate::models::auth::DriverSession;
use crate::models::route::{ActiveDriver, Route};

/// Handle compartido de la sesión actual
pub type SessionHandle = Arc<RwLock<Option<DriverSession>>>;

/// Estado de rutas y activación visto por todas las pantallas
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RouteState {
    pub routes: Vec<Route>,
    pub active_route: Option<Route>,
    pub loading: bool,
    pub last_error: Option<String>,
    pub last_message: Option<String>,
    pub next_page: u32,
    pub has_more: bool,
    /// Se incrementa con cada activación/desactivación confirmada
    pub activation_epoch: u64,
}

impl RouteState {
    pub fn find_route(&self, route_id: &str) -> Option<&Route> {
        self.routes.iter().find(|r| r.id == route_id)
    }

    pub fn is_active_on_route(&self, route_id: &str) -> bool {
        self.active_route
            .as_ref()
            .map_or(false, |route| route.id == route_id)
    }

    /// Fijar la ruta activa del conductor y reflejarlo en la lista en una sola
    /// actualización: la ruta nueva queda asignada y cualquier otra que lo
    /// tuviera como conductor activo queda libre.
    pub fn apply_active_route(&mut self, driver: Option<&ActiveDriver>, route: Option<Route>) {
        let mut route = route;

        if let Some(driver) = driver {
            let active_id = route.as_ref().map(|r| r.id.clone());
            for entry in self.routes.iter_mut() {
                if Some(&entry.id) == active_id.as_ref() {
                    entry.assign_driver(driver.clone());
                } else if entry.is_driven_by(&driver.id) {
                    entry.clear_driver();
                }
            }
            if let Some(route) = route.as_mut() {
                route.assign_driver(driver.clone());
            }
        }

        self.active_route = route;
    }

    /// Quitar al conductor de `route_id`. La ruta activa local solo se limpia
    /// si coincide con `route_id`.
    pub fn apply_deactivation(&mut self, driver_id: &str, route_id: &str) {
        for entry in self.routes.iter_mut() {
            if entry.id == route_id && entry.is_driven_by(driver_id) {
                entry.clear_driver();
            }
        }
        if self.is_active_on_route(route_id) {
            self.active_route = None;
        }
    }

    /// Registrar un cambio de activación. Las lecturas de ruta activa iniciadas
    /// antes de este punto quedan obsoletas.
    pub fn mark_activation_change(&mut self) {
        self.activation_epoch = self.activation_epoch.wrapping_add(1);
    }

    pub fn replace_routes(&mut self, routes: Vec<Route>) {
        self.routes = routes;
    }

    /// Añadir una página nueva sin duplicar ids ya presentes
    pub fn append_routes(&mut self, routes: Vec<Route>) -> usize {
        let before = self.routes.len();
        for route in routes {
            if let Some(existing) = self.routes.iter_mut().find(|r| r.id == route.id) {
                *existing = route;
            } else {
                self.routes.push(route);
            }
        }
        self.routes.len() - before
    }

    pub fn routes_driven_by(&self, driver_id: &str) -> Vec<&Route> {
        self.routes.iter().filter(|r| r.is_driven_by(driver_id)).collect()
    }
}

#[derive(Clone, Default)]
pub struct AppState {
    pub session: SessionHandle,
    pub routes: Arc<RwLock<RouteState>>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Estado inicial con una sesión ya autenticada
    pub fn with_session(session: DriverSession) -> Self {
        Self {
            session: Arc::new(RwLock::new(Some(session))),
            routes: Arc::new(RwLock::new(RouteState::default())),
        }
    }

    pub async fn current_session(&self) -> Option<DriverSession> {
        self.session.read().await.clone()
    }

    pub async fn current_driver(&self) -> Option<ActiveDriver> {
        self.session.read().await.as_ref().map(|s| ActiveDriver {
            id: s.user.id.clone(),
            name: s.user.name.clone(),
        })
    }

    pub async fn set_session(&self, session: DriverSession) {
        tracing::info!("💾 Sesión almacenada para conductor '{}'", session.driver_id());
        *self.session.write().await = Some(session);
    }

    /// Limpiar sesión y todo el estado derivado de ella
    pub async fn clear(&self) {
        self.session.write().await.take();
        *self.routes.write().await = RouteState::default();
    }

    pub async fn route_snapshot(&self) -> RouteState {
        self.routes.read().await.clone()
    }
}
