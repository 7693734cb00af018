//! Estadísticas del panel del conductor

use serde::Deserialize;

use crate::utils::errors::{ApiError, ApiResult};

/// Cifras del panel; cualquier campo ausente vale cero / vacío
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DriverStats {
    pub today_pickups: u32,
    pub completed_pickups: u32,
    pub pending_pickups: u32,
    pub total_routes: u32,
    pub total_pickups: u32,
    pub active_route: Option<String>,
    pub current_shift: Option<String>,
    pub success_rate: Option<String>,
    pub rating: Option<String>,
    pub today_earnings: Option<f64>,
}

/// Respuesta del panel: las cifras llegan en `data` o en la raíz del body
#[derive(Debug, Clone, Deserialize)]
pub struct DriverStatsResponse {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub data: Option<DriverStats>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(flatten)]
    pub inline: DriverStats,
}

impl DriverStatsResponse {
    pub fn into_stats(self, default_message: &str) -> ApiResult<DriverStats> {
        if self.success == Some(false) {
            let message = self
                .error
                .or(self.message)
                .unwrap_or_else(|| default_message.to_string());
            return Err(ApiError::BadRequest(message));
        }
        Ok(self.data.unwrap_or(self.inline))
    }
}
