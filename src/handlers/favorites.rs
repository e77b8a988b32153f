use actix_web::web::{Data, Path};
use actix_web::{delete, get, post, HttpResponse, Result};
use serde::Serialize;

use crate::handlers::storage_failure;
use crate::models::common::ApiResponse;
use crate::services::Stores;

#[get("")]
pub async fn list_favorites(stores: Data<Stores>) -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(ApiResponse::success(stores.favorites.list())))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ToggleResult {
    subscription_id: String,
    is_favorite: bool,
}

#[post("/{subscription_id}/toggle")]
pub async fn toggle_favorite(stores: Data<Stores>, path: Path<String>) -> Result<HttpResponse> {
    let id = path.into_inner();
    match stores.favorites.toggle(&id) {
        Ok(is_favorite) => Ok(HttpResponse::Ok().json(ApiResponse::success(ToggleResult {
            subscription_id: id,
            is_favorite,
        }))),
        Err(e) => Ok(storage_failure(e)),
    }
}

#[delete("")]
pub async fn clear_favorites(stores: Data<Stores>) -> Result<HttpResponse> {
    match stores.favorites.clear() {
        Ok(()) => Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_with_message(
            (),
            "favorites cleared".to_string(),
        ))),
        Err(e) => Ok(storage_failure(e)),
    }
}
