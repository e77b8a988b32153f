use actix_web::web::{Data, Json, Path, Query};
use actix_web::{delete, get, post, HttpResponse, Result};
use serde::Deserialize;

use crate::handlers::storage_failure;
use crate::models::activity::LogActivityRequest;
use crate::models::common::ApiResponse;
use crate::services::Stores;

#[get("")]
pub async fn list_activity(stores: Data<Stores>) -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(ApiResponse::success(stores.activity.list())))
}

#[post("")]
pub async fn log_activity(
    stores: Data<Stores>,
    payload: Json<LogActivityRequest>,
) -> Result<HttpResponse> {
    match stores.activity.log(payload.into_inner()) {
        Ok(entry) => Ok(HttpResponse::Created().json(ApiResponse::success(entry))),
        Err(e) => Ok(storage_failure(e)),
    }
}

#[derive(Deserialize)]
pub struct RecentQuery {
    pub days: Option<u32>,
}

#[get("/recent")]
pub async fn recent_activity(
    stores: Data<Stores>,
    query: Query<RecentQuery>,
) -> Result<HttpResponse> {
    let days = query.days.unwrap_or(7);
    Ok(HttpResponse::Ok().json(ApiResponse::success(stores.activity.recent(days))))
}

#[get("/subscription/{subscription_id}")]
pub async fn activity_for_subscription(
    stores: Data<Stores>,
    path: Path<String>,
) -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        stores.activity.for_subscription(&path.into_inner()),
    )))
}

#[delete("")]
pub async fn clear_activity(stores: Data<Stores>) -> Result<HttpResponse> {
    match stores.activity.clear() {
        Ok(()) => Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_with_message(
            (),
            "activity log cleared".to_string(),
        ))),
        Err(e) => Ok(storage_failure(e)),
    }
}
