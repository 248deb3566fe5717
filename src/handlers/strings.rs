use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use crate::db::queries;
use crate::errors::AppError;
use crate::handlers::check_auth;
use crate::models::{StringProduct, StringType};
use crate::services::catalog;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct StringsQuery {
    #[serde(rename = "type")]
    pub string_type: Option<String>,
}

// GET /api/strings
pub async fn list_strings(
    State(state): State<Arc<AppState>>,
    Query(query): Query<StringsQuery>,
) -> Result<Json<Vec<StringProduct>>, AppError> {
    let type_filter = query.string_type.as_deref().map(StringType::parse);

    let strings = {
        let db = state.db.lock().unwrap();
        queries::list_strings(&db, type_filter)?
    };

    Ok(Json(strings))
}

// GET /api/strings/catalog
#[derive(Deserialize)]
pub struct CatalogQuery {
    #[serde(rename = "type")]
    pub string_type: String,
    /// Display-name group to list colors for; omitted means the full grouping.
    pub name: Option<String>,
}

pub async fn catalog(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CatalogQuery>,
) -> Result<Json<serde_json::Value>, AppError> {
    let racket_type = StringType::parse(&query.string_type);

    let strings = {
        let db = state.db.lock().unwrap();
        queries::list_strings(&db, Some(racket_type))?
    };

    match query.name {
        Some(name) => {
            let colors = catalog::available_colors(&strings, racket_type, &name);
            Ok(Json(serde_json::json!({ "colors": colors })))
        }
        None => {
            let groups = catalog::grouped_strings(&strings, racket_type);
            Ok(Json(serde_json::json!({ "groups": groups })))
        }
    }
}

// GET /api/strings/:id
pub async fn get_string(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<StringProduct>, AppError> {
    let product = {
        let db = state.db.lock().unwrap();
        queries::get_string(&db, &id)?
    };

    product
        .map(Json)
        .ok_or_else(|| AppError::NotFound("string not found".to_string()))
}

// POST /api/strings
#[derive(Deserialize)]
pub struct SaveStringRequest {
    pub name: Option<String>,
    pub string_type: StringType,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub quantity: i64,
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub model: String,
    pub description: Option<String>,
}

impl SaveStringRequest {
    fn into_product(self, id: String) -> Result<StringProduct, AppError> {
        let name = match self.name {
            Some(name) if !name.trim().is_empty() => name,
            _ if !self.brand.is_empty() && !self.model.is_empty() => {
                format!("{} {}", self.brand, self.model)
            }
            _ => {
                return Err(AppError::Validation(
                    "a name or a brand and model is required".to_string(),
                ))
            }
        };
        if self.quantity < 0 {
            return Err(AppError::Validation(
                "quantity must not be negative".to_string(),
            ));
        }

        Ok(StringProduct {
            id,
            name,
            string_type: self.string_type,
            color: self.color,
            quantity: self.quantity,
            brand: self.brand,
            model: self.model,
            description: self.description,
        })
    }
}

pub async fn create_string(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(body): Json<SaveStringRequest>,
) -> Result<(StatusCode, Json<StringProduct>), AppError> {
    check_auth(&headers, &state.config.admin_token)?;

    let product = body.into_product(Uuid::new_v4().to_string())?;

    {
        let db = state.db.lock().unwrap();
        queries::insert_string(&db, &product)?;
    }

    Ok((StatusCode::CREATED, Json(product)))
}

// PUT /api/strings/:id
pub async fn update_string(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(body): Json<SaveStringRequest>,
) -> Result<Json<StringProduct>, AppError> {
    check_auth(&headers, &state.config.admin_token)?;

    let product = body.into_product(id)?;

    let updated = {
        let db = state.db.lock().unwrap();
        queries::update_string(&db, &product)?
    };

    if updated {
        Ok(Json(product))
    } else {
        Err(AppError::NotFound("string not found".to_string()))
    }
}

// DELETE /api/strings/:id
pub async fn delete_string(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    check_auth(&headers, &state.config.admin_token)?;

    let removed = {
        let db = state.db.lock().unwrap();
        queries::delete_string(&db, &id)?
    };

    if removed {
        Ok(Json(serde_json::json!({ "ok": true })))
    } else {
        Err(AppError::NotFound("string not found".to_string()))
    }
}
