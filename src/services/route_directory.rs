//! Directorio de rutas paginado
//!
//! Mantiene la lista de rutas en el `AppState` compartido para que la
//! activación y la lista vean siempre la misma copia.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::models::route::{Route, RouteQuery};
use crate::services::route_backend::RouteBackend;
use crate::state::AppState;
use crate::utils::errors::ApiResult;

pub struct RouteDirectory {
    backend: Arc<dyn RouteBackend>,
    state: AppState,
    page_size: u32,
}

impl RouteDirectory {
    pub fn new(backend: Arc<dyn RouteBackend>, state: AppState, page_size: u32) -> Self {
        Self {
            backend,
            state,
            page_size: page_size.max(1),
        }
    }

    /// Recargar desde la primera página, reemplazando la lista en memoria
    pub async fn refresh(&self) -> ApiResult<usize> {
        let page = match self.backend.list_routes(1, self.page_size).await {
            Ok(page) => page,
            Err(e) => {
                warn!("⚠️ Error obteniendo rutas: {}", e);
                self.state.routes.write().await.last_error = Some(e.user_message());
                return Err(e);
            }
        };

        let has_more = page.has_more(1, self.page_size);
        let count = page.routes.len();

        let mut state = self.state.routes.write().await;
        state.replace_routes(page.routes);
        state.next_page = 2;
        state.has_more = has_more;
        state.last_error = None;

        info!("📋 {} rutas cargadas (más páginas: {})", count, has_more);
        Ok(count)
    }

    /// Cargar la siguiente página si existe. Devuelve cuántas rutas nuevas se añadieron.
    pub async fn load_more(&self) -> ApiResult<usize> {
        let (page_number, has_more) = {
            let state = self.state.routes.read().await;
            (state.next_page.max(1), state.has_more)
        };
        if !has_more {
            debug!("No hay más páginas de rutas");
            return Ok(0);
        }

        let page = self.backend.list_routes(page_number, self.page_size).await?;
        let has_more = page.has_more(page_number, self.page_size);

        let mut state = self.state.routes.write().await;
        let added = state.append_routes(page.routes);
        state.next_page = page_number + 1;
        state.has_more = has_more;

        debug!("📋 Página {} de rutas: {} nuevas", page_number, added);
        Ok(added)
    }

    /// Rutas en memoria filtradas por búsqueda y ocupación
    pub async fn visible_routes(&self, query: &RouteQuery) -> Vec<Route> {
        self.state
            .routes
            .read()
            .await
            .routes
            .iter()
            .filter(|route| query.matches(route))
            .cloned()
            .collect()
    }

    /// Ruta de la lista que tiene al conductor actual como activo
    pub async fn current_driver_route(&self) -> Option<Route> {
        let driver = self.state.current_driver().await?;
        let state = self.state.routes.read().await;
        let route = state.routes.iter().find(|r| r.is_driven_by(&driver.id)).cloned();
        route
    }
}
