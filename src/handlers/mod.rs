pub mod activity;
pub mod budget;
pub mod catalog;
pub mod favorites;
pub mod goals;
pub mod health;
pub mod history;
pub mod insights;
pub mod notes;
pub mod promo;
pub mod renewals;
pub mod selection;
pub mod spending;
pub mod tags;

use actix_web::HttpResponse;

use crate::models::common::ApiResponse;
use crate::services::storage::StoreError;

/// Persistence failures are server-side faults, not user errors.
pub(crate) fn storage_failure(e: StoreError) -> HttpResponse {
    log::error!("store write failed: {}", e);
    HttpResponse::InternalServerError().json(ApiResponse::<()>::error(format!(
        "failed to persist change: {}",
        e
    )))
}

pub(crate) fn bad_request(message: String) -> HttpResponse {
    HttpResponse::BadRequest().json(ApiResponse::<()>::error(message))
}

pub(crate) fn not_found(message: &str) -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::<()>::error(message.to_string()))
}
