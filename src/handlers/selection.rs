use actix_web::web::{Data, Json, Path};
use actix_web::{delete, get, post, HttpResponse, Result};
use serde::Deserialize;

use crate::handlers::{bad_request, not_found, storage_failure};
use crate::models::common::ApiResponse;
use crate::services::catalog::CatalogService;
use crate::services::Stores;

#[get("")]
pub async fn get_selection(stores: Data<Stores>) -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(ApiResponse::success(stores.selection.get())))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectPlanRequest {
    pub plan_index: usize,
}

#[post("/{subscription_id}")]
pub async fn select_plan(
    stores: Data<Stores>,
    catalog: Data<CatalogService>,
    path: Path<String>,
    payload: Json<SelectPlanRequest>,
) -> Result<HttpResponse> {
    let id = path.into_inner();
    let Some(subscription) = catalog.get(&id) else {
        return Ok(not_found("subscription not found"));
    };
    if payload.plan_index >= subscription.plans.len() {
        return Ok(bad_request(format!(
            "plan index {} out of range for '{}' ({} plans)",
            payload.plan_index,
            id,
            subscription.plans.len()
        )));
    }

    match stores.selection.set_plan(&id, payload.plan_index) {
        Ok(()) => Ok(HttpResponse::Ok().json(ApiResponse::success(stores.selection.get()))),
        Err(e) => Ok(storage_failure(e)),
    }
}

#[delete("/{subscription_id}")]
pub async fn deselect(stores: Data<Stores>, path: Path<String>) -> Result<HttpResponse> {
    let id = path.into_inner();
    match stores.selection.remove(&id) {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success(stores.selection.get()))),
        Ok(false) => Ok(not_found("subscription not in selection")),
        Err(e) => Ok(storage_failure(e)),
    }
}

#[delete("")]
pub async fn clear_selection(stores: Data<Stores>) -> Result<HttpResponse> {
    match stores.selection.clear() {
        Ok(()) => Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_with_message(
            (),
            "selection cleared".to_string(),
        ))),
        Err(e) => Ok(storage_failure(e)),
    }
}
