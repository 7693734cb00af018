//! Modelos de autenticación
//!
//! Este módulo contiene los modelos de login, usuario y sesión del conductor.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request de login
#[derive(Debug, Clone, Serialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,

    #[validate(length(min = 1, max = 128))]
    pub password: String,
}

/// Usuario autenticado
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default = "default_true", alias = "is_active")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

impl User {
    pub fn is_driver(&self) -> bool {
        self.role.eq_ignore_ascii_case("driver")
    }
}

/// Response de login
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Sesión del conductor actual
#[derive(Debug, Clone, PartialEq)]
pub struct DriverSession {
    pub token: String,
    pub user: User,
}

impl DriverSession {
    pub fn new(token: impl Into<String>, user: User) -> Self {
        Self {
            token: token.into(),
            user,
        }
    }

    pub fn driver_id(&self) -> &str {
        &self.user.id
    }
}
