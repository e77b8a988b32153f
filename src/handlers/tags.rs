use actix_web::web::{Data, Json, Path};
use actix_web::{delete, get, post, HttpResponse, Result};
use uuid::Uuid;
use validator::Validate;

use crate::handlers::{bad_request, not_found, storage_failure};
use crate::models::common::ApiResponse;
use crate::models::tag::CreateTagRequest;
use crate::services::Stores;

#[get("")]
pub async fn list_tags(stores: Data<Stores>) -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(ApiResponse::success(stores.tags.list())))
}

#[post("")]
pub async fn create_tag(
    stores: Data<Stores>,
    payload: Json<CreateTagRequest>,
) -> Result<HttpResponse> {
    if let Err(e) = payload.validate() {
        return Ok(bad_request(format!("invalid tag: {}", e)));
    }
    match stores.tags.create(payload.into_inner()) {
        Ok(tag) => Ok(HttpResponse::Created().json(ApiResponse::success(tag))),
        Err(e) => Ok(storage_failure(e)),
    }
}

#[delete("/{tag_id}")]
pub async fn delete_tag(stores: Data<Stores>, path: Path<Uuid>) -> Result<HttpResponse> {
    match stores.tags.delete(path.into_inner()) {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_with_message(
            (),
            "tag deleted".to_string(),
        ))),
        Ok(false) => Ok(not_found("tag not found")),
        Err(e) => Ok(storage_failure(e)),
    }
}

#[post("/{tag_id}/subscriptions/{subscription_id}")]
pub async fn assign_tag(stores: Data<Stores>, path: Path<(Uuid, String)>) -> Result<HttpResponse> {
    let (tag_id, subscription_id) = path.into_inner();
    if !stores.tags.list().iter().any(|t| t.id == tag_id) {
        return Ok(not_found("tag not found"));
    }
    match stores.tags.assign(&subscription_id, tag_id) {
        Ok(()) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            stores.tags.tags_for(&subscription_id),
        ))),
        Err(e) => Ok(storage_failure(e)),
    }
}

#[delete("/{tag_id}/subscriptions/{subscription_id}")]
pub async fn unassign_tag(
    stores: Data<Stores>,
    path: Path<(Uuid, String)>,
) -> Result<HttpResponse> {
    let (tag_id, subscription_id) = path.into_inner();
    match stores.tags.unassign(&subscription_id, tag_id) {
        Ok(()) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            stores.tags.tags_for(&subscription_id),
        ))),
        Err(e) => Ok(storage_failure(e)),
    }
}

#[get("/{tag_id}/subscriptions")]
pub async fn subscriptions_with_tag(
    stores: Data<Stores>,
    path: Path<Uuid>,
) -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        stores.tags.subscriptions_with(path.into_inner()),
    )))
}

#[get("/subscription/{subscription_id}")]
pub async fn tags_for_subscription(
    stores: Data<Stores>,
    path: Path<String>,
) -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        stores.tags.tags_for(&path.into_inner()),
    )))
}
