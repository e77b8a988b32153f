use actix_web::web::{Data, Json, Path};
use actix_web::{delete, get, post, HttpResponse, Result};
use uuid::Uuid;
use validator::Validate;

use crate::handlers::{bad_request, not_found, storage_failure};
use crate::models::common::ApiResponse;
use crate::models::promo::CreatePromoCodeRequest;
use crate::services::Stores;

#[get("")]
pub async fn list_promo_codes(stores: Data<Stores>) -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(ApiResponse::success(stores.promo_codes.list())))
}

#[get("/active")]
pub async fn active_promo_codes(stores: Data<Stores>) -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(ApiResponse::success(stores.promo_codes.usable_now())))
}

#[get("/subscription/{subscription_id}")]
pub async fn promo_codes_for_subscription(
    stores: Data<Stores>,
    path: Path<String>,
) -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        stores.promo_codes.for_subscription(&path.into_inner()),
    )))
}

#[post("")]
pub async fn add_promo_code(
    stores: Data<Stores>,
    payload: Json<CreatePromoCodeRequest>,
) -> Result<HttpResponse> {
    if let Err(e) = payload.validate() {
        return Ok(bad_request(format!("invalid promo code: {}", e)));
    }
    match stores.promo_codes.add(payload.into_inner()) {
        Ok(code) => Ok(HttpResponse::Created().json(ApiResponse::success(code))),
        Err(e) => Ok(storage_failure(e)),
    }
}

#[post("/{promo_id}/toggle")]
pub async fn toggle_promo_code(stores: Data<Stores>, path: Path<Uuid>) -> Result<HttpResponse> {
    match stores.promo_codes.toggle(path.into_inner()) {
        Ok(Some(code)) => Ok(HttpResponse::Ok().json(ApiResponse::success(code))),
        Ok(None) => Ok(not_found("promo code not found")),
        Err(e) => Ok(storage_failure(e)),
    }
}

#[delete("/{promo_id}")]
pub async fn delete_promo_code(stores: Data<Stores>, path: Path<Uuid>) -> Result<HttpResponse> {
    match stores.promo_codes.delete(path.into_inner()) {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_with_message(
            (),
            "promo code deleted".to_string(),
        ))),
        Ok(false) => Ok(not_found("promo code not found")),
        Err(e) => Ok(storage_failure(e)),
    }
}
