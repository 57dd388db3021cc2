// src/handlers/admin.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::rbac::{AdminOnly, RequireRole},
    models::{
        auth::{CreateUserPayload, UserRole},
        company::{CreateCompanyPayload, UpdateCompanyPayload},
    },
};

// =========================================================================
//  EMPRESAS
// =========================================================================

pub async fn create_company(
    State(app_state): State<AppState>,
    _guard: RequireRole<AdminOnly>,
    Json(payload): Json<CreateCompanyPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let company = app_state
        .company_repo
        .create(
            &payload.name,
            payload.email.as_deref(),
            payload.phone.as_deref(),
            payload.address.as_deref(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(company)))
}

pub async fn list_companies(
    State(app_state): State<AppState>,
    _guard: RequireRole<AdminOnly>,
) -> Result<impl IntoResponse, AppError> {
    let companies = app_state.company_repo.list().await?;
    Ok((StatusCode::OK, Json(companies)))
}

pub async fn get_company(
    State(app_state): State<AppState>,
    _guard: RequireRole<AdminOnly>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let company = app_state
        .company_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Empresa não encontrada.".into()))?;

    Ok((StatusCode::OK, Json(company)))
}

pub async fn update_company(
    State(app_state): State<AppState>,
    _guard: RequireRole<AdminOnly>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateCompanyPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let company = app_state
        .company_repo
        .update(
            id,
            payload.name.as_deref(),
            payload.email.as_deref(),
            payload.phone.as_deref(),
            payload.address.as_deref(),
        )
        .await?
        .ok_or_else(|| AppError::NotFound("Empresa não encontrada.".into()))?;

    Ok((StatusCode::OK, Json(company)))
}

pub async fn delete_company(
    State(app_state): State<AppState>,
    _guard: RequireRole<AdminOnly>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let affected = app_state.company_repo.delete(id).await?;
    if affected == 0 {
        return Err(AppError::NotFound("Empresa não encontrada.".into()));
    }

    Ok(StatusCode::NO_CONTENT)
}

// =========================================================================
//  USUÁRIOS (visão global)
// =========================================================================

pub async fn create_user(
    State(app_state): State<AppState>,
    _guard: RequireRole<AdminOnly>,
    Json(payload): Json<CreateUserPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let role = payload.role.unwrap_or(UserRole::User);

    // Só administradores globais podem viver sem empresa
    if role != UserRole::Admin && payload.company_id.is_none() {
        return Err(AppError::BadRequest(
            "O campo 'companyId' é obrigatório para este papel.".into(),
        ));
    }

    let user = app_state
        .auth_service
        .create_user_with_role(
            &payload.name,
            &payload.email,
            &payload.password,
            role,
            payload.company_id,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(user)))
}

pub async fn list_users(
    State(app_state): State<AppState>,
    _guard: RequireRole<AdminOnly>,
) -> Result<impl IntoResponse, AppError> {
    let users = app_state.user_repo.list_all().await?;
    Ok((StatusCode::OK, Json(users)))
}

pub async fn delete_user(
    State(app_state): State<AppState>,
    _guard: RequireRole<AdminOnly>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let affected = app_state.user_repo.delete(id).await?;
    if affected == 0 {
        return Err(AppError::NotFound("Usuário não encontrado.".into()));
    }

    Ok(StatusCode::NO_CONTENT)
}
