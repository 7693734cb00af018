//! Sistema de manejo de errores
//!
//! Este módulo define los tipos de errores del cliente y su clasificación
//! a partir de las respuestas HTTP del backend.

use reqwest::StatusCode;
use thiserror::Error;

/// Errores principales del cliente de API
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ApiError {
    /// Clasificar un status HTTP no exitoso con el mensaje extraído del body
    pub fn from_status(status: StatusCode, message: String) -> Self {
        match status {
            StatusCode::CONFLICT => ApiError::Conflict(message),
            StatusCode::UNAUTHORIZED => ApiError::Unauthorized(message),
            StatusCode::NOT_FOUND => ApiError::NotFound(message),
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                ApiError::BadRequest(message)
            }
            other => ApiError::Server {
                status: other.as_u16(),
                message,
            },
        }
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, ApiError::Conflict(_))
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized(_))
    }

    /// Mensaje apto para mostrar al usuario, sin el prefijo de la variante
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Conflict(msg)
            | ApiError::Unauthorized(msg)
            | ApiError::NotFound(msg)
            | ApiError::BadRequest(msg)
            | ApiError::InvalidResponse(msg)
            | ApiError::Config(msg) => msg.clone(),
            ApiError::Server { message, .. } => message.clone(),
            ApiError::Network(_) => "Network error, please check your connection".to_string(),
            ApiError::Validation(_) => "The provided data is invalid".to_string(),
        }
    }
}

/// Resultado tipado para operaciones que pueden fallar
pub type ApiResult<T> = Result<T, ApiError>;

/// Errores de activación / desactivación de ruta
#[derive(Error, Debug)]
pub enum ActivationError {
    /// La ruta ya está ocupada por otro conductor (HTTP 409)
    #[error("Route occupied: {message}")]
    Occupied { message: String },

    /// Ya hay una petición de activación en curso para este conductor
    #[error("Another route request is already in progress")]
    RequestInFlight,

    #[error(transparent)]
    Failed(#[from] ApiError),
}

impl ActivationError {
    /// Título para el mensaje que ve el usuario
    pub fn title(&self) -> &'static str {
        match self {
            ActivationError::Occupied { .. } => "Route Occupied",
            ActivationError::RequestInFlight => "Please wait",
            ActivationError::Failed(_) => "Error",
        }
    }

    pub fn is_occupied(&self) -> bool {
        matches!(self, ActivationError::Occupied { .. })
    }

    pub fn user_message(&self) -> String {
        match self {
            ActivationError::Occupied { message } => message.clone(),
            ActivationError::RequestInFlight => self.to_string(),
            ActivationError::Failed(e) => e.user_message(),
        }
    }
}

/// Errores de operaciones sobre pickups
#[derive(Error, Debug)]
pub enum PickupError {
    #[error("Driver is not active on route '{route_id}'")]
    RouteNotActive { route_id: String },

    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Función helper para crear errores de respuesta inválida
pub fn invalid_response(message: &str) -> ApiError {
    ApiError::InvalidResponse(message.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_classification() {
        assert!(ApiError::from_status(StatusCode::CONFLICT, "taken".into()).is_conflict());
        assert!(ApiError::from_status(StatusCode::UNAUTHORIZED, "no".into()).is_unauthorized());
        assert!(matches!(
            ApiError::from_status(StatusCode::UNPROCESSABLE_ENTITY, "bad".into()),
            ApiError::BadRequest(_)
        ));
        assert!(matches!(
            ApiError::from_status(StatusCode::BAD_GATEWAY, "down".into()),
            ApiError::Server { status: 502, .. }
        ));
    }

    #[test]
    fn test_activation_titles() {
        let occupied = ActivationError::Occupied { message: "Route already has a driver".into() };
        assert_eq!(occupied.title(), "Route Occupied");
        assert_eq!(occupied.user_message(), "Route already has a driver");

        let generic = ActivationError::from(ApiError::from_status(
            StatusCode::INTERNAL_SERVER_ERROR,
            "boom".into(),
        ));
        assert_eq!(generic.title(), "Error");
        assert!(!generic.is_occupied());
    }
}
