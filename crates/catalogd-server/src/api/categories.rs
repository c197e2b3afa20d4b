//! Handlers for the category endpoints.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::Response;
use axum::Json;
use catalogd_core::NewCategory;
use serde::{Deserialize, Serialize};

use super::{map_store_error, respond, ApiError, AppState};

#[derive(Debug, Serialize)]
struct CategoryItem {
    name: String,
    code: String,
}

/// The category list keeps its historical `products` wire key; consumers
/// were built against it and renaming would break them.
#[derive(Debug, Serialize)]
struct CategoriesResponse {
    #[serde(rename = "products")]
    categories: Vec<CategoryItem>,
    total: usize,
}

/// Absent fields decode as empty strings and fail validation in the store,
/// so `{}` draws the same 400 as explicit empties.
#[derive(Debug, Deserialize)]
pub(super) struct CreateCategoryRequest {
    #[serde(default)]
    code: String,
    #[serde(default)]
    name: String,
}

/// `GET /categories`.
pub(super) async fn list_categories(State(state): State<AppState>) -> Result<Response, ApiError> {
    let categories = state
        .store
        .all_categories()
        .await
        .map_err(|e| map_store_error(&e))?;

    let categories: Vec<CategoryItem> = categories
        .into_iter()
        .map(|category| CategoryItem {
            name: category.name,
            code: category.code,
        })
        .collect();

    Ok(respond::ok(&CategoriesResponse {
        total: categories.len(),
        categories,
    }))
}

/// `POST /categories` with a `{code, name}` JSON body.
pub(super) async fn create_category(
    State(state): State<AppState>,
    body: Result<Json<CreateCategoryRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(request) =
        body.map_err(|e| ApiError::invalid_input(format!("invalid category payload: {e}")))?;

    let created = state
        .store
        .add_category(NewCategory {
            code: request.code,
            name: request.name,
        })
        .await
        .map_err(|e| map_store_error(&e))?;

    Ok(respond::ok(&CategoryItem {
        name: created.name,
        code: created.code,
    }))
}
