use actix_web::web::{Data, Path};
use actix_web::{get, HttpResponse, Result};
use serde::Serialize;

use crate::handlers::not_found;
use crate::models::common::ApiResponse;
use crate::services::catalog::CatalogService;
use crate::services::insights::{self, Badge};

#[get("")]
pub async fn list_subscriptions(catalog: Data<CatalogService>) -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(ApiResponse::success(catalog.subscriptions())))
}

#[get("/durations")]
pub async fn list_durations(catalog: Data<CatalogService>) -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(ApiResponse::success(catalog.duration_options())))
}

#[get("/{subscription_id}")]
pub async fn get_subscription(
    catalog: Data<CatalogService>,
    path: Path<String>,
) -> Result<HttpResponse> {
    let id = path.into_inner();
    match catalog.get(&id) {
        Some(subscription) => Ok(HttpResponse::Ok().json(ApiResponse::success(subscription))),
        None => Ok(not_found("subscription not found")),
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BadgeView {
    badge: Badge,
    label: &'static str,
}

#[get("/{subscription_id}/badges")]
pub async fn get_badges(catalog: Data<CatalogService>, path: Path<String>) -> Result<HttpResponse> {
    let id = path.into_inner();
    match catalog.get(&id) {
        Some(subscription) => {
            let badges: Vec<BadgeView> = insights::badges_for(&catalog, subscription)
                .into_iter()
                .map(|badge| BadgeView {
                    badge,
                    label: badge.label(),
                })
                .collect();
            Ok(HttpResponse::Ok().json(ApiResponse::success(badges)))
        }
        None => Ok(not_found("subscription not found")),
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ScoreView {
    subscription_id: String,
    value_score: f64,
}

#[get("/{subscription_id}/score")]
pub async fn get_score(catalog: Data<CatalogService>, path: Path<String>) -> Result<HttpResponse> {
    let id = path.into_inner();
    match catalog.get(&id) {
        Some(subscription) => Ok(HttpResponse::Ok().json(ApiResponse::success(ScoreView {
            subscription_id: id,
            value_score: insights::value_score(subscription),
        }))),
        None => Ok(not_found("subscription not found")),
    }
}
