// src/handlers/categories.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::rbac::{ManagerOnly, RequireRole},
    models::inventory::{Category, CreateCategoryPayload},
};

// GET /api/categories
#[utoipa::path(
    get,
    path = "/api/categories",
    tag = "Categorias",
    responses(
        (status = 200, description = "Todas as categorias, em ordem alfabética", body = [Category]),
        (status = 401, description = "Não autenticado")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_categories(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let categories = app_state.inventory_service.list_categories().await?;
    Ok((StatusCode::OK, Json(categories)))
}

// POST /api/categories
// O nome é único no banco; a violação volta como 400, sem criar linha.
#[utoipa::path(
    post,
    path = "/api/categories",
    tag = "Categorias",
    request_body = CreateCategoryPayload,
    responses(
        (status = 201, description = "Categoria criada", body = Category),
        (status = 400, description = "Nome vazio ou já existente"),
        (status = 401, description = "Não autenticado ou papel insuficiente")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_category(
    State(app_state): State<AppState>,
    _guard: RequireRole<ManagerOnly>,
    Json(payload): Json<CreateCategoryPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let category = app_state
        .inventory_service
        .create_category(&payload.name, payload.description.as_deref())
        .await?;

    Ok((StatusCode::CREATED, Json(category)))
}
