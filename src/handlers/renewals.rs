use actix_web::web::{Data, Json, Path, Query};
use actix_web::{delete, get, post, put, HttpResponse, Result};
use chrono::Utc;
use serde::Deserialize;
use validator::Validate;

use crate::handlers::{bad_request, not_found, storage_failure};
use crate::models::common::ApiResponse;
use crate::models::renewal::{CreateRenewalRequest, UpdateRenewalRequest};
use crate::services::Stores;

#[get("")]
pub async fn list_renewals(stores: Data<Stores>) -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(ApiResponse::success(stores.renewals.list())))
}

#[post("")]
pub async fn upsert_renewal(
    stores: Data<Stores>,
    payload: Json<CreateRenewalRequest>,
) -> Result<HttpResponse> {
    if let Err(e) = payload.validate() {
        return Ok(bad_request(format!("invalid renewal: {}", e)));
    }
    match stores.renewals.upsert(payload.into_inner()) {
        Ok(renewal) => Ok(HttpResponse::Ok().json(ApiResponse::success(renewal))),
        Err(e) => Ok(storage_failure(e)),
    }
}

#[put("/{subscription_id}")]
pub async fn update_renewal(
    stores: Data<Stores>,
    path: Path<String>,
    payload: Json<UpdateRenewalRequest>,
) -> Result<HttpResponse> {
    if let Err(e) = payload.validate() {
        return Ok(bad_request(format!("invalid renewal update: {}", e)));
    }
    match stores.renewals.update(&path.into_inner(), payload.into_inner()) {
        Ok(Some(renewal)) => Ok(HttpResponse::Ok().json(ApiResponse::success(renewal))),
        Ok(None) => Ok(not_found("renewal not found")),
        Err(e) => Ok(storage_failure(e)),
    }
}

#[delete("/{subscription_id}")]
pub async fn delete_renewal(stores: Data<Stores>, path: Path<String>) -> Result<HttpResponse> {
    match stores.renewals.delete(&path.into_inner()) {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_with_message(
            (),
            "renewal deleted".to_string(),
        ))),
        Ok(false) => Ok(not_found("renewal not found")),
        Err(e) => Ok(storage_failure(e)),
    }
}

#[derive(Deserialize)]
pub struct UpcomingQuery {
    pub days: Option<u32>,
}

#[get("/upcoming")]
pub async fn upcoming_renewals(
    stores: Data<Stores>,
    query: Query<UpcomingQuery>,
) -> Result<HttpResponse> {
    let today = Utc::now().date_naive();
    let days = query.days.unwrap_or(30);
    Ok(HttpResponse::Ok().json(ApiResponse::success(stores.renewals.upcoming(today, days))))
}

#[get("/alerts")]
pub async fn renewal_alerts(stores: Data<Stores>) -> Result<HttpResponse> {
    let today = Utc::now().date_naive();
    Ok(HttpResponse::Ok().json(ApiResponse::success(stores.renewals.alerts_due(today))))
}
