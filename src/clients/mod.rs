//! Clients - HTTP Clients for External APIs
//!
//! This module contains the HTTP client for the driver backend.

pub mod api_client;

// Re-export main types for convenience
pub use api_client::{endpoints, ApiClient};
