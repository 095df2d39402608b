//! HTTP request handlers.
//!
//! Each handler normalizes its phone argument first - nothing reaches the
//! store on a validation failure - and then issues the store primitive for
//! its operation: a plain read for Lookup, one atomic conditional write for
//! Create and Replace, and a read followed by a delete for Delete.

use super::types::{CreateRequest, HealthResponse, ReplaceRequest};
use super::AppState;
use crate::directory::{DirectoryEntry, PhoneKey};
use crate::error::DirectoryError;
use crate::store::Store;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::{info, warn};

/// Health check endpoint.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let store_healthy = state.store.ping().await;

    Json(HealthResponse {
        status: "ok".to_string(),
        store_healthy,
    })
}

/// Shared lookup: the entry stored under a key, or NotFound.
async fn fetch_entry(store: &Store, phone: &PhoneKey) -> Result<DirectoryEntry, DirectoryError> {
    match store.get(phone).await? {
        Some(address) => Ok(DirectoryEntry {
            phone: phone.clone(),
            address,
        }),
        None => Err(DirectoryError::NotFound(phone.to_string())),
    }
}

/// Reject empty addresses before they reach the store.
fn validate_address(address: &str) -> Result<(), DirectoryError> {
    if address.trim().is_empty() {
        return Err(DirectoryError::EmptyAddress);
    }
    Ok(())
}

/// Look up the address registered for a phone number.
pub async fn lookup_entry(
    State(state): State<AppState>,
    Path(phone): Path<String>,
) -> Result<Json<DirectoryEntry>, DirectoryError> {
    let phone = PhoneKey::parse(&phone).map_err(DirectoryError::InvalidPhoneNumber)?;

    let entry = fetch_entry(&state.store, &phone).await?;
    Ok(Json(entry))
}

/// Create an entry for a phone number that has none yet.
pub async fn create_entry(
    State(state): State<AppState>,
    Json(request): Json<CreateRequest>,
) -> Result<(StatusCode, Json<DirectoryEntry>), DirectoryError> {
    let phone = PhoneKey::parse(&request.phone).map_err(DirectoryError::InvalidPhoneNumber)?;
    validate_address(&request.address)?;
    info!(phone = %phone, "Create request received");

    // The conditional write is the entire duplicate check: the store decides
    // atomically, so two concurrent creates for one key cannot both succeed.
    let created = state.store.set_if_absent(&phone, &request.address).await?;
    if !created {
        warn!(phone = %phone, "Attempted to create a duplicate entry");
        return Err(DirectoryError::Duplicate(phone.to_string()));
    }

    info!(phone = %phone, "Entry created");

    Ok((
        StatusCode::CREATED,
        Json(DirectoryEntry {
            phone,
            address: request.address,
        }),
    ))
}

/// Replace the address of an existing entry.
pub async fn replace_entry(
    State(state): State<AppState>,
    Path(phone): Path<String>,
    Json(request): Json<ReplaceRequest>,
) -> Result<Json<DirectoryEntry>, DirectoryError> {
    let phone = PhoneKey::parse(&phone).map_err(DirectoryError::InvalidPhoneNumber)?;

    // The path is authoritative; a phone echoed in the body must agree.
    if let Some(echoed) = request.phone.as_deref() {
        let echoed = PhoneKey::parse(echoed).map_err(DirectoryError::InvalidPhoneNumber)?;
        if echoed != phone {
            return Err(DirectoryError::InvalidPhoneNumber(format!(
                "Body phone number {} does not match path {}",
                echoed, phone
            )));
        }
    }
    validate_address(&request.address)?;
    info!(phone = %phone, "Replace request received");

    // Never creates: the store only writes over an existing value.
    let updated = state.store.set_if_exists(&phone, &request.address).await?;
    if !updated {
        return Err(DirectoryError::NotFound(phone.to_string()));
    }

    info!(phone = %phone, "Entry replaced");

    Ok(Json(DirectoryEntry {
        phone,
        address: request.address,
    }))
}

/// Delete an entry, returning it as it stood before deletion.
pub async fn delete_entry(
    State(state): State<AppState>,
    Path(phone): Path<String>,
) -> Result<Json<DirectoryEntry>, DirectoryError> {
    let phone = PhoneKey::parse(&phone).map_err(DirectoryError::InvalidPhoneNumber)?;
    info!(phone = %phone, "Delete request received");

    // Two calls, because the pre-deletion entry is returned to the caller.
    // The pair is not atomic: a write landing between the read and the
    // delete can be lost. Accepted for this service; an atomic get-and-
    // delete primitive would close the window if the store grows one.
    let entry = fetch_entry(&state.store, &phone).await?;
    state.store.delete(&phone).await?;

    info!(phone = %phone, "Entry deleted");

    Ok(Json(entry))
}
