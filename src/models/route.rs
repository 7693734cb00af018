//! Modelo de Route
//!
//! Este módulo contiene el struct Route tal como lo devuelve el directorio de
//! rutas, la paginación y los filtros de búsqueda usados por la lista.

use serde::{Deserialize, Serialize};

/// Resumen del conductor activo en una ruta
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveDriver {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
}

/// Route principal - mapea al JSON del directorio de rutas
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, alias = "active_driver_id")]
    pub active_driver_id: Option<String>,
    #[serde(default, alias = "active_driver")]
    pub active_driver: Option<ActiveDriver>,
}

impl Route {
    /// Ruta mínima conocida solo por su id
    pub fn placeholder(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            path: String::new(),
            description: None,
            active_driver_id: None,
            active_driver: None,
        }
    }

    pub fn is_occupied(&self) -> bool {
        self.active_driver_id.is_some()
    }

    pub fn is_driven_by(&self, driver_id: &str) -> bool {
        self.active_driver_id.as_deref() == Some(driver_id)
    }

    pub fn assign_driver(&mut self, driver: ActiveDriver) {
        self.active_driver_id = Some(driver.id.clone());
        self.active_driver = Some(driver);
    }

    pub fn clear_driver(&mut self) {
        self.active_driver_id = None;
        self.active_driver = None;
    }

    /// Búsqueda case-insensitive sobre nombre y path
    pub fn matches_search(&self, search: &str) -> bool {
        let needle = search.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        self.name.to_lowercase().contains(&needle) || self.path.to_lowercase().contains(&needle)
    }
}

/// Intención de activación: body `{ route_id }` de activate/deactivate
#[derive(Debug, Clone, Serialize)]
pub struct ActivationIntent<'a> {
    pub route_id: &'a str,
}

/// Payload de `GET /driver/routes/active`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ActiveRouteData {
    #[serde(default)]
    pub route: Option<Route>,
}

/// Información de paginación
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Pagination {
    #[serde(default = "first_page")]
    pub page: u32,
    #[serde(default)]
    pub limit: u32,
    #[serde(default)]
    pub total: u64,
    #[serde(default, alias = "totalPages")]
    pub pages: u32,
}

fn first_page() -> u32 {
    1
}

/// Página del directorio de rutas
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RoutePage {
    #[serde(default, rename = "data")]
    pub routes: Vec<Route>,
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

impl RoutePage {
    /// Sin información de paginación, una página incompleta es la última
    pub fn has_more(&self, page: u32, limit: u32) -> bool {
        match &self.pagination {
            Some(p) if p.pages > 0 => page < p.pages,
            _ => self.routes.len() as u32 >= limit && limit > 0,
        }
    }
}

/// Filtro de ocupación de la lista de rutas
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OccupancyFilter {
    #[default]
    All,
    Empty,
    Occupied,
}

impl OccupancyFilter {
    pub fn accepts(&self, route: &Route) -> bool {
        match self {
            OccupancyFilter::All => true,
            OccupancyFilter::Empty => !route.is_occupied(),
            OccupancyFilter::Occupied => route.is_occupied(),
        }
    }
}

/// Filtros para búsqueda de rutas
#[derive(Debug, Clone, Default)]
pub struct RouteQuery {
    pub search: String,
    pub occupancy: OccupancyFilter,
}

impl RouteQuery {
    pub fn matches(&self, route: &Route) -> bool {
        route.matches_search(&self.search) && self.occupancy.accepts(route)
    }
}
