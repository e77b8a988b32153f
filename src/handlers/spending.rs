use actix_web::web::{Data, Json, Query};
use actix_web::{delete, get, post, HttpResponse, Result};
use serde::Deserialize;

use crate::handlers::storage_failure;
use crate::models::common::ApiResponse;
use crate::models::spending::RecordSnapshotRequest;
use crate::services::Stores;

#[get("")]
pub async fn list_snapshots(stores: Data<Stores>) -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(ApiResponse::success(stores.spending.list())))
}

#[derive(Deserialize)]
pub struct RecentQuery {
    pub months: Option<usize>,
}

#[get("/recent")]
pub async fn recent_snapshots(
    stores: Data<Stores>,
    query: Query<RecentQuery>,
) -> Result<HttpResponse> {
    let months = query.months.unwrap_or(6);
    Ok(HttpResponse::Ok().json(ApiResponse::success(stores.spending.last_months(months))))
}

/// `data: null` until at least two months were recorded.
#[get("/evolution")]
pub async fn spending_evolution(stores: Data<Stores>) -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(ApiResponse::success(stores.spending.evolution())))
}

#[post("")]
pub async fn record_snapshot(
    stores: Data<Stores>,
    payload: Json<RecordSnapshotRequest>,
) -> Result<HttpResponse> {
    match stores.spending.record(payload.into_inner()) {
        Ok(snapshot) => Ok(HttpResponse::Ok().json(ApiResponse::success(snapshot))),
        Err(e) => Ok(storage_failure(e)),
    }
}

#[delete("")]
pub async fn clear_snapshots(stores: Data<Stores>) -> Result<HttpResponse> {
    match stores.spending.clear() {
        Ok(()) => Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_with_message(
            (),
            "spending history cleared".to_string(),
        ))),
        Err(e) => Ok(storage_failure(e)),
    }
}
