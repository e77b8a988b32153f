use std::collections::HashSet;

use actix_web::web::{Data, Json};
use actix_web::{get, post, HttpResponse, Result};
use serde::Deserialize;

use crate::handlers::bad_request;
use crate::models::common::ApiResponse;
use crate::services::catalog::CatalogService;
use crate::services::insights::{self, InsightsError};
use crate::services::Stores;

#[get("/duplicates")]
pub async fn get_duplicates(
    stores: Data<Stores>,
    catalog: Data<CatalogService>,
) -> Result<HttpResponse> {
    let selection = stores.selection.get();
    let duplicates = insights::detect_duplicates(&catalog, &selection);
    Ok(HttpResponse::Ok().json(ApiResponse::success(duplicates)))
}

#[get("/recommendations")]
pub async fn get_recommendations(
    stores: Data<Stores>,
    catalog: Data<CatalogService>,
) -> Result<HttpResponse> {
    let selection = stores.selection.get();
    let duplicates = insights::detect_duplicates(&catalog, &selection);
    let recommendations = insights::recommendations_for_duplicates(&catalog, &duplicates);
    Ok(HttpResponse::Ok().json(ApiResponse::success(recommendations)))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FamilyCostRequest {
    pub household_size: u32,
    pub months: u32,
    #[serde(default)]
    pub shared: Vec<String>,
}

#[post("/family-cost")]
pub async fn family_cost(
    stores: Data<Stores>,
    catalog: Data<CatalogService>,
    payload: Json<FamilyCostRequest>,
) -> Result<HttpResponse> {
    let selection = stores.selection.get();
    let shared: HashSet<String> = payload.shared.iter().cloned().collect();
    let breakdown = insights::family_cost(
        &catalog,
        &selection,
        &shared,
        payload.household_size,
        payload.months,
    );
    Ok(HttpResponse::Ok().json(ApiResponse::success(breakdown)))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompareRequest {
    pub ids: Vec<String>,
    pub months: u32,
}

#[post("/compare")]
pub async fn compare(
    catalog: Data<CatalogService>,
    payload: Json<CompareRequest>,
) -> Result<HttpResponse> {
    match insights::compare_subscriptions(&catalog, &payload.ids, payload.months) {
        Ok(rows) => Ok(HttpResponse::Ok().json(ApiResponse::success(rows))),
        Err(e @ InsightsError::TooManySubscriptions { .. }) => Ok(bad_request(e.to_string())),
        Err(e @ InsightsError::UnknownSubscription(_)) => Ok(bad_request(e.to_string())),
    }
}
