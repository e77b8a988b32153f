use actix_web::web::{Data, Json, Path};
use actix_web::{delete, get, post, put, HttpResponse, Result};
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::handlers::{bad_request, not_found, storage_failure};
use crate::models::common::ApiResponse;
use crate::models::goal::CreateGoalRequest;
use crate::services::Stores;

#[get("")]
pub async fn list_goals(stores: Data<Stores>) -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(ApiResponse::success(stores.goals.list())))
}

#[get("/active")]
pub async fn list_active(stores: Data<Stores>) -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(ApiResponse::success(stores.goals.active())))
}

#[get("/completed")]
pub async fn list_completed(stores: Data<Stores>) -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(ApiResponse::success(stores.goals.completed())))
}

#[post("")]
pub async fn create_goal(
    stores: Data<Stores>,
    payload: Json<CreateGoalRequest>,
) -> Result<HttpResponse> {
    if let Err(e) = payload.validate() {
        return Ok(bad_request(format!("invalid goal: {}", e)));
    }
    match stores.goals.add(payload.into_inner()) {
        Ok(goal) => Ok(HttpResponse::Created().json(ApiResponse::success(goal))),
        Err(e) => Ok(storage_failure(e)),
    }
}

#[derive(Deserialize)]
pub struct ProgressRequest {
    pub amount: Decimal,
}

#[put("/{goal_id}/progress")]
pub async fn update_progress(
    stores: Data<Stores>,
    path: Path<Uuid>,
    payload: Json<ProgressRequest>,
) -> Result<HttpResponse> {
    match stores.goals.set_progress(path.into_inner(), payload.amount) {
        Ok(Some(goal)) => Ok(HttpResponse::Ok().json(ApiResponse::success(goal))),
        Ok(None) => Ok(not_found("goal not found")),
        Err(e) => Ok(storage_failure(e)),
    }
}

#[post("/{goal_id}/complete")]
pub async fn complete_goal(stores: Data<Stores>, path: Path<Uuid>) -> Result<HttpResponse> {
    match stores.goals.complete(path.into_inner()) {
        Ok(Some(goal)) => Ok(HttpResponse::Ok().json(ApiResponse::success(goal))),
        Ok(None) => Ok(not_found("goal not found")),
        Err(e) => Ok(storage_failure(e)),
    }
}

#[delete("/{goal_id}")]
pub async fn delete_goal(stores: Data<Stores>, path: Path<Uuid>) -> Result<HttpResponse> {
    match stores.goals.delete(path.into_inner()) {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_with_message(
            (),
            "goal deleted".to_string(),
        ))),
        Ok(false) => Ok(not_found("goal not found")),
        Err(e) => Ok(storage_failure(e)),
    }
}
