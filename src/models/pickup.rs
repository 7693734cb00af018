//! Modelos de pickups (recogidas programadas por cliente y ruta)

use serde::{Deserialize, Serialize};

use crate::utils::errors::{ApiError, ApiResult};

/// Estado de una recogida
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PickupStatus {
    Picked,
    Unpicked,
    #[default]
    NotYetMarked,
    Completed,
}

impl PickupStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PickupStatus::Picked => "picked",
            PickupStatus::Unpicked => "unpicked",
            PickupStatus::NotYetMarked => "not_yet_marked",
            PickupStatus::Completed => "completed",
        }
    }

    pub fn is_done(&self) -> bool {
        matches!(self, PickupStatus::Picked | PickupStatus::Completed)
    }
}

/// Cliente dueño de una recogida, anidado como `user` en la respuesta
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PickupClient {
    #[serde(default, alias = "_id")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub account_number: Option<String>,
    #[serde(default, alias = "is_active")]
    pub is_active: Option<bool>,
}

/// Recogida asociada a un cliente y una ruta
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pickup {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default, alias = "user_id")]
    pub user_id: Option<String>,
    #[serde(default)]
    pub user: Option<PickupClient>,
    #[serde(alias = "route_id")]
    pub route_id: String,
    #[serde(default)]
    pub status: PickupStatus,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default, alias = "date")]
    pub scheduled_date: Option<String>,
    #[serde(default)]
    pub completed_at: Option<String>,
    #[serde(default)]
    pub bags_collected: u32,
}

impl Pickup {
    pub fn client_name(&self) -> &str {
        self.user
            .as_ref()
            .and_then(|u| u.name.as_deref())
            .unwrap_or("Unknown Client")
    }

    pub fn address(&self) -> &str {
        self.user
            .as_ref()
            .and_then(|u| u.address.as_deref())
            .unwrap_or("No address provided")
    }

    /// Solo se muestran recogidas con cliente que no esté marcado como inactivo
    pub fn has_active_client(&self) -> bool {
        self.user
            .as_ref()
            .map_or(false, |u| u.is_active != Some(false))
    }
}

/// Respuesta de la lista de recogidas: el backend usa `users` o `data`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PickupListResponse {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub users: Option<Vec<Pickup>>,
    #[serde(default)]
    pub data: Option<Vec<Pickup>>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl PickupListResponse {
    /// Recogidas de clientes activos; `success: false` es un rechazo
    pub fn into_active_pickups(self, default_message: &str) -> ApiResult<Vec<Pickup>> {
        if self.success == Some(false) {
            let message = self
                .error
                .or(self.message)
                .unwrap_or_else(|| default_message.to_string());
            return Err(ApiError::BadRequest(message));
        }

        Ok(self
            .users
            .or(self.data)
            .unwrap_or_default()
            .into_iter()
            .filter(Pickup::has_active_client)
            .collect())
    }
}

/// Body de `PUT /api/pickUps/{id}`
#[derive(Debug, Clone, Serialize)]
pub struct CompletePickupRequest {
    pub status: PickupStatus,
    pub notes: String,
}

impl CompletePickupRequest {
    pub fn new(notes: impl Into<String>) -> Self {
        Self {
            status: PickupStatus::Completed,
            notes: notes.into(),
        }
    }
}
