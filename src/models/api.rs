//! Envoltorio de respuestas del backend
//!
//! El backend responde `{ success | status, data, message, error }`. Aquí se
//! convierte a `ApiResult` para que nadie consuma datos a medio inicializar.

use serde::Deserialize;

use crate::utils::errors::{ApiError, ApiResult};

/// Respuesta genérica del backend
#[derive(Debug, Clone, Deserialize)]
pub struct ApiEnvelope<T> {
    #[serde(default, alias = "status")]
    pub success: Option<bool>,
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl<T> ApiEnvelope<T> {
    /// Mensaje del backend, prefiriendo `error` sobre `message`
    pub fn server_message(&self) -> Option<String> {
        self.error.clone().or_else(|| self.message.clone())
    }

    /// Verificar `success` y devolver el payload (puede faltar)
    pub fn into_optional(self, default_message: &str) -> ApiResult<Option<T>> {
        if self.success == Some(false) {
            let message = self
                .server_message()
                .unwrap_or_else(|| default_message.to_string());
            return Err(ApiError::BadRequest(message));
        }
        Ok(self.data)
    }

    /// Como `into_optional`, pero un payload ausente es una respuesta inválida
    pub fn into_data(self, default_message: &str) -> ApiResult<T> {
        self.into_optional(default_message)?
            .ok_or_else(|| ApiError::InvalidResponse(format!("{}: missing data", default_message)))
    }
}

/// Respuesta sin payload relevante (confirmaciones)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MessageResponse {
    #[serde(default, alias = "status")]
    pub success: Option<bool>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl MessageResponse {
    /// Confirmación del backend; `success: false` con status 200 es un rechazo
    pub fn into_message(self, default_message: &str) -> ApiResult<Option<String>> {
        if self.success == Some(false) {
            let message = self
                .error
                .or(self.message)
                .unwrap_or_else(|| default_message.to_string());
            return Err(ApiError::BadRequest(message));
        }
        Ok(self.message)
    }
}

/// Body de error devuelto con status no exitoso
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorBody {
    pub fn message_or(self, default_message: &str) -> String {
        self.error
            .or(self.message)
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| default_message.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_alias_and_failure() {
        let envelope: ApiEnvelope<u32> = serde_json::from_value(json!({
            "status": false,
            "message": "No bags allocated"
        }))
        .unwrap();

        let err = envelope.into_data("Failed to fetch bag stats").unwrap_err();
        assert_eq!(err.user_message(), "No bags allocated");
    }

    #[test]
    fn test_missing_data_is_invalid() {
        let envelope: ApiEnvelope<u32> = serde_json::from_value(json!({ "success": true })).unwrap();
        assert!(matches!(
            envelope.into_data("Failed to fetch"),
            Err(ApiError::InvalidResponse(_))
        ));
    }

    #[test]
    fn test_error_body_prefers_error_field() {
        let body: ErrorBody = serde_json::from_value(json!({
            "error": "Route is occupied",
            "message": "Conflict"
        }))
        .unwrap();
        assert_eq!(body.message_or("Failed to activate route"), "Route is occupied");
        assert_eq!(ErrorBody::default().message_or("Failed to activate route"), "Failed to activate route");
    }
}
