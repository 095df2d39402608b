//! API request and response types.

use serde::{Deserialize, Serialize};

/// Request to create a directory entry.
#[derive(Debug, Deserialize)]
pub struct CreateRequest {
    /// Phone number, raw or already in E.164 form
    pub phone: String,

    /// Postal address to store under it
    pub address: String,
}

/// Request to replace the address of an existing entry.
#[derive(Debug, Deserialize)]
pub struct ReplaceRequest {
    /// New postal address
    pub address: String,

    /// Optional echo of the phone number; the path value is authoritative
    pub phone: Option<String>,
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub store_healthy: bool,
}
