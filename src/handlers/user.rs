// src/handlers/user.rs

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
    middleware::{auth::AuthenticatedUser, rbac::require_company},
    models::{
        finance::{CreateExpensePayload, UserBalance},
        orders::{CreateOrderPayload, OrderDetail},
    },
};

// Rotas do próprio usuário: qualquer papel autenticado, sempre limitado
// aos registros de quem está logado.

// =========================================================================
//  PEDIDOS
// =========================================================================

#[utoipa::path(
    post,
    path = "/api/user/orders",
    tag = "Usuário",
    request_body = CreateOrderPayload,
    responses(
        (status = 201, description = "Pedido criado com status PENDING", body = OrderDetail),
        (status = 400, description = "Itens ausentes ou quantidades inválidas"),
        (status = 401, description = "Não autenticado"),
        (status = 404, description = "Produto fora da empresa do solicitante")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_order(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Json(payload): Json<CreateOrderPayload>,
) -> Result<impl IntoResponse, AppError> {
    let company_id = require_company(&user.0)?;

    payload.validate().map_err(AppError::ValidationError)?;

    let detail = app_state
        .orders_service
        .create_order(user.0.id, company_id, &payload.items, payload.notes.as_deref())
        .await?;

    Ok((StatusCode::CREATED, Json(detail)))
}

pub async fn list_orders(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    let orders = app_state.orders_service.list_by_user(user.0.id).await?;
    Ok((StatusCode::OK, Json(orders)))
}

pub async fn cancel_order(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let order = app_state.orders_service.cancel_own(id, user.0.id).await?;
    Ok((StatusCode::OK, Json(order)))
}

// =========================================================================
//  FINANCEIRO
// =========================================================================

pub async fn list_payments(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    let payments = app_state.finance_repo.list_payments_by_user(user.0.id).await?;
    Ok((StatusCode::OK, Json(payments)))
}

pub async fn create_expense(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Json(payload): Json<CreateExpensePayload>,
) -> Result<impl IntoResponse, AppError> {
    let company_id = require_company(&user.0)?;

    payload.validate().map_err(AppError::ValidationError)?;

    let incurred_on = payload
        .incurred_on
        .unwrap_or_else(|| chrono::Utc::now().date_naive());

    let expense = app_state
        .finance_repo
        .create_expense(user.0.id, company_id, &payload.description, payload.amount, incurred_on)
        .await?;

    Ok((StatusCode::CREATED, Json(expense)))
}

pub async fn list_expenses(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    let expenses = app_state.finance_repo.list_expenses_by_user(user.0.id).await?;
    Ok((StatusCode::OK, Json(expenses)))
}

// =========================================================================
//  SALDO
// =========================================================================

#[utoipa::path(
    get,
    path = "/api/user/balance",
    tag = "Usuário",
    responses(
        (status = 200, description = "Saldo devedor recalculado na hora", body = UserBalance),
        (status = 401, description = "Não autenticado")
    ),
    security(("api_jwt" = []))
)]
pub async fn my_balance(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    let balance = app_state
        .balance_service
        .user_balance(user.0.id, &user.0.name)
        .await?;

    Ok((StatusCode::OK, Json(balance)))
}
