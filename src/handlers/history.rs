use actix_web::web::{Data, Json, Path};
use actix_web::{delete, get, post, HttpResponse, Result};
use serde::Deserialize;

use crate::handlers::{not_found, storage_failure};
use crate::models::common::ApiResponse;
use crate::services::catalog::CatalogService;
use crate::services::Stores;

#[get("")]
pub async fn list_history(stores: Data<Stores>) -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(ApiResponse::success(stores.history.list())))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewRequest {
    pub subscription_id: String,
}

/// Records a subscription view; name and logo are resolved from the catalog
/// so history entries can't drift from the reference data.
#[post("")]
pub async fn record_view(
    stores: Data<Stores>,
    catalog: Data<CatalogService>,
    payload: Json<ViewRequest>,
) -> Result<HttpResponse> {
    let Some(subscription) = catalog.get(&payload.subscription_id) else {
        return Ok(not_found("subscription not found"));
    };
    match stores
        .history
        .add(&subscription.id, &subscription.name, &subscription.logo)
    {
        Ok(()) => Ok(HttpResponse::Ok().json(ApiResponse::success(stores.history.list()))),
        Err(e) => Ok(storage_failure(e)),
    }
}

#[delete("/{subscription_id}")]
pub async fn remove_from_history(stores: Data<Stores>, path: Path<String>) -> Result<HttpResponse> {
    match stores.history.remove(&path.into_inner()) {
        Ok(()) => Ok(HttpResponse::Ok().json(ApiResponse::success(stores.history.list()))),
        Err(e) => Ok(storage_failure(e)),
    }
}

#[delete("")]
pub async fn clear_history(stores: Data<Stores>) -> Result<HttpResponse> {
    match stores.history.clear() {
        Ok(()) => Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_with_message(
            (),
            "history cleared".to_string(),
        ))),
        Err(e) => Ok(storage_failure(e)),
    }
}
