#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use reqwest::StatusCode;
use tokio::sync::Notify;

use driver_route_client::models::auth::{DriverSession, User};
use driver_route_client::models::route::{ActiveDriver, Pagination, Route, RoutePage};
use driver_route_client::services::{RouteActivationCoordinator, RouteBackend, RouteDirectory};
use driver_route_client::{ApiError, ApiResult, AppState};

/// Servidor de rutas en memoria que impone exclusividad como el backend real
#[derive(Default)]
pub struct FakeRouteServer {
    routes: Mutex<Vec<Route>>,
    failures: Mutex<HashMap<&'static str, (StatusCode, String)>>,
    reported_active: Mutex<Option<Option<String>>>,
    pub activate_calls: AtomicUsize,
}

impl FakeRouteServer {
    pub fn with_routes(ids: &[&str]) -> Arc<Self> {
        let server = Self::default();
        *server.routes.lock().unwrap() = ids
            .iter()
            .map(|id| {
                let mut route = Route::placeholder(*id);
                route.name = format!("Route {}", id);
                route.path = format!("{} street", id);
                route
            })
            .collect();
        Arc::new(server)
    }

    /// La próxima llamada a `op` ("fetch", "activate", "deactivate", "list") falla
    pub fn fail_next(&self, op: &'static str, status: StatusCode, message: &str) {
        self.failures
            .lock()
            .unwrap()
            .insert(op, (status, message.to_string()));
    }

    /// La próxima lectura de ruta activa devuelve `route_id` (o ninguna)
    /// sin importar quién conduce qué
    pub fn report_next_fetch(&self, route_id: Option<&str>) {
        *self.reported_active.lock().unwrap() = Some(route_id.map(str::to_string));
    }

    fn check(&self, op: &'static str) -> ApiResult<()> {
        match self.failures.lock().unwrap().remove(op) {
            Some((status, message)) => Err(ApiError::from_status(status, message)),
            None => Ok(()),
        }
    }

    pub fn driver_on(&self, route_id: &str) -> Option<String> {
        self.routes
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id == route_id)
            .and_then(|r| r.active_driver_id.clone())
    }

    pub fn routes_held_by(&self, driver_id: &str) -> Vec<String> {
        self.routes
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.is_driven_by(driver_id))
            .map(|r| r.id.clone())
            .collect()
    }
}

/// Puntos de sincronización para retener una llamada en curso
#[derive(Default)]
pub struct Hold {
    pub entered: Notify,
    pub release: Notify,
}

/// Vista del servidor para un conductor autenticado
pub struct FakeRouteBackend {
    server: Arc<FakeRouteServer>,
    driver: ActiveDriver,
    hold: Mutex<Option<(&'static str, Arc<Hold>)>>,
}

impl FakeRouteBackend {
    pub fn new(server: Arc<FakeRouteServer>, driver_id: &str) -> Self {
        Self {
            server,
            driver: active_driver(driver_id),
            hold: Mutex::new(None),
        }
    }

    /// Retener la primera llamada a `activate`
    pub fn with_hold(self, hold: Arc<Hold>) -> Self {
        self.with_hold_on("activate", hold)
    }

    /// Retener la primera llamada a `op` hasta `hold.release`
    pub fn with_hold_on(self, op: &'static str, hold: Arc<Hold>) -> Self {
        self.hold_next(op, hold);
        self
    }

    /// Como `with_hold_on`, para un backend ya compartido
    pub fn hold_next(&self, op: &'static str, hold: Arc<Hold>) {
        *self.hold.lock().unwrap() = Some((op, hold));
    }

    async fn pause(&self, op: &'static str) {
        let hold = {
            let mut slot = self.hold.lock().unwrap();
            let matches = slot.as_ref().map_or(false, |(held_op, _)| *held_op == op);
            if matches {
                slot.take().map(|(_, hold)| hold)
            } else {
                None
            }
        };
        if let Some(hold) = hold {
            hold.entered.notify_one();
            hold.release.notified().await;
        }
    }
}

#[async_trait]
impl RouteBackend for FakeRouteBackend {
    async fn fetch_active_route(&self) -> ApiResult<Option<Route>> {
        self.server.check("fetch")?;
        let reported = self.server.reported_active.lock().unwrap().take();
        let active = {
            let routes = self.server.routes.lock().unwrap();
            match reported {
                Some(route_id) => route_id.map(|id| {
                    let mut route = routes
                        .iter()
                        .find(|r| r.id == id)
                        .cloned()
                        .unwrap_or_else(|| Route::placeholder(id));
                    route.assign_driver(self.driver.clone());
                    route
                }),
                None => routes.iter().find(|r| r.is_driven_by(&self.driver.id)).cloned(),
            }
        };
        // La respuesta se calcula antes de la pausa, como una lectura lenta
        self.pause("fetch").await;
        Ok(active)
    }

    async fn activate(&self, route_id: &str) -> ApiResult<Option<String>> {
        self.server.activate_calls.fetch_add(1, Ordering::SeqCst);
        self.pause("activate").await;
        self.server.check("activate")?;

        let mut routes = self.server.routes.lock().unwrap();
        match routes.iter().find(|r| r.id == route_id) {
            None => return Err(ApiError::NotFound("Route not found".to_string())),
            Some(r) if r.is_occupied() && !r.is_driven_by(&self.driver.id) => {
                return Err(ApiError::Conflict(
                    "Route is already occupied by another driver".to_string(),
                ))
            }
            Some(_) => {}
        }

        for route in routes.iter_mut() {
            if route.id == route_id {
                route.assign_driver(self.driver.clone());
            } else if route.is_driven_by(&self.driver.id) {
                route.clear_driver();
            }
        }
        Ok(Some("Route activated successfully".to_string()))
    }

    async fn deactivate(&self, route_id: &str) -> ApiResult<Option<String>> {
        self.server.check("deactivate")?;

        let mut routes = self.server.routes.lock().unwrap();
        let route = routes
            .iter_mut()
            .find(|r| r.id == route_id)
            .ok_or_else(|| ApiError::NotFound("Route not found".to_string()))?;
        if route.is_driven_by(&self.driver.id) {
            route.clear_driver();
        }
        Ok(Some("Route deactivated successfully".to_string()))
    }

    async fn list_routes(&self, page: u32, limit: u32) -> ApiResult<RoutePage> {
        self.server.check("list")?;

        let routes = self.server.routes.lock().unwrap();
        let total = routes.len();
        let start = ((page.max(1) - 1) * limit) as usize;
        let data: Vec<Route> = routes.iter().skip(start).take(limit as usize).cloned().collect();
        let pages = ((total as u32) + limit - 1) / limit;

        Ok(RoutePage {
            routes: data,
            pagination: Some(Pagination {
                page,
                limit,
                total: total as u64,
                pages,
            }),
        })
    }
}

pub fn active_driver(id: &str) -> ActiveDriver {
    ActiveDriver {
        id: id.to_string(),
        name: format!("Driver {}", id),
    }
}

pub fn driver_session(id: &str) -> DriverSession {
    DriverSession::new(
        format!("token-{}", id),
        User {
            id: id.to_string(),
            name: format!("Driver {}", id),
            email: format!("{}@example.com", id),
            role: "driver".to_string(),
            phone: None,
            is_active: true,
        },
    )
}

/// Cliente de un conductor: estado propio, coordinador y directorio
pub struct DriverHarness {
    pub state: AppState,
    pub activation: Arc<RouteActivationCoordinator>,
    pub directory: RouteDirectory,
}

pub fn driver_harness(server: &Arc<FakeRouteServer>, driver_id: &str) -> DriverHarness {
    harness_with_backend(FakeRouteBackend::new(server.clone(), driver_id), driver_id)
}

pub fn harness_with_backend(backend: FakeRouteBackend, driver_id: &str) -> DriverHarness {
    harness_with_shared_backend(Arc::new(backend), driver_id)
}

pub fn harness_with_shared_backend(backend: Arc<FakeRouteBackend>, driver_id: &str) -> DriverHarness {
    let state = AppState::with_session(driver_session(driver_id));
    let backend: Arc<dyn RouteBackend> = backend;
    DriverHarness {
        activation: Arc::new(RouteActivationCoordinator::new(backend.clone(), state.clone())),
        directory: RouteDirectory::new(backend, state.clone(), 20),
        state,
    }
}
