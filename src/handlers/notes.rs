use actix_web::web::{Data, Json, Path};
use actix_web::{delete, get, put, HttpResponse, Result};
use serde::Deserialize;

use crate::handlers::{not_found, storage_failure};
use crate::models::common::ApiResponse;
use crate::services::Stores;

#[get("")]
pub async fn list_notes(stores: Data<Stores>) -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(ApiResponse::success(stores.notes.list())))
}

#[get("/{subscription_id}")]
pub async fn get_note(stores: Data<Stores>, path: Path<String>) -> Result<HttpResponse> {
    match stores.notes.get(&path.into_inner()) {
        Some(note) => Ok(HttpResponse::Ok().json(ApiResponse::success(note))),
        None => Ok(not_found("note not found")),
    }
}

#[derive(Deserialize)]
pub struct NoteRequest {
    pub content: String,
}

#[put("/{subscription_id}")]
pub async fn save_note(
    stores: Data<Stores>,
    path: Path<String>,
    payload: Json<NoteRequest>,
) -> Result<HttpResponse> {
    match stores
        .notes
        .save_note(&path.into_inner(), payload.into_inner().content)
    {
        Ok(note) => Ok(HttpResponse::Ok().json(ApiResponse::success(note))),
        Err(e) => Ok(storage_failure(e)),
    }
}

#[delete("/{subscription_id}")]
pub async fn delete_note(stores: Data<Stores>, path: Path<String>) -> Result<HttpResponse> {
    match stores.notes.delete(&path.into_inner()) {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_with_message(
            (),
            "note deleted".to_string(),
        ))),
        Ok(false) => Ok(not_found("note not found")),
        Err(e) => Ok(storage_failure(e)),
    }
}
