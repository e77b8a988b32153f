use actix_web::web::{Data, Json, Query};
use actix_web::{get, put, HttpResponse, Result};
use rust_decimal::Decimal;
use serde::Deserialize;
use validator::Validate;

use crate::handlers::{bad_request, storage_failure};
use crate::models::budget::BudgetUpdate;
use crate::models::common::ApiResponse;
use crate::services::Stores;

#[get("")]
pub async fn get_budget(stores: Data<Stores>) -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(ApiResponse::success(stores.budget.get())))
}

#[put("")]
pub async fn update_budget(
    stores: Data<Stores>,
    payload: Json<BudgetUpdate>,
) -> Result<HttpResponse> {
    if let Err(e) = payload.validate() {
        return Ok(bad_request(format!("invalid budget update: {}", e)));
    }
    match stores.budget.update(payload.into_inner()) {
        Ok(budget) => Ok(HttpResponse::Ok().json(ApiResponse::success(budget))),
        Err(e) => Ok(storage_failure(e)),
    }
}

#[derive(Deserialize)]
pub struct UsageQuery {
    pub spent: Decimal,
}

/// Returns `data: null` when no budget is configured; the UI treats that as
/// "nothing to show", not an error.
#[get("/usage")]
pub async fn get_usage(stores: Data<Stores>, query: Query<UsageQuery>) -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        stores.budget.calculate_usage(query.spent),
    )))
}
