// src/handlers/director.rs

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
    middleware::{
        auth::AuthenticatedUser,
        rbac::{require_company, DirectorOnly, RequireRole},
    },
    models::{
        auth::{CreateUserPayload, UserRole},
        finance::{CompanyBalances, CreateExpensePayload, CreatePaymentPayload, PaymentMethod, UserBalance},
        inventory::{
            CreateProductPayload, Product, RestockPayload, UpdateProductPayload,
            UpdateThresholdsPayload,
        },
        orders::{OrderRequest, TransitionOrderPayload},
    },
};

// Toda rota deste módulo roda sob RequireRole<DirectorOnly>; as consultas
// e mutações são sempre filtradas pela empresa do diretor logado.

// =========================================================================
//  PRODUTOS
// =========================================================================

#[utoipa::path(
    post,
    path = "/api/director/products",
    tag = "Diretor",
    request_body = CreateProductPayload,
    responses(
        (status = 201, description = "Produto criado na empresa do diretor", body = Product),
        (status = 400, description = "Campos inválidos"),
        (status = 401, description = "Não autenticado ou papel insuficiente"),
        (status = 404, description = "Categoria não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_product(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    _guard: RequireRole<DirectorOnly>,
    Json(payload): Json<CreateProductPayload>,
) -> Result<impl IntoResponse, AppError> {
    let company_id = require_company(&user.0)?;

    // Validação padrão do Validator
    payload.validate().map_err(AppError::ValidationError)?;

    // Nossa validação de consistência entre campos
    payload.validate_consistency().map_err(|e| {
        let mut errors = validator::ValidationErrors::new();
        errors.add("maxStock", e);
        AppError::ValidationError(errors)
    })?;

    let product = app_state
        .inventory_service
        .create_product(
            company_id,
            user.0.id,
            payload.category_id.unwrap_or_default(),
            &payload.name,
            &payload.sku,
            payload.price,
            payload.initial_stock,
            payload.min_stock,
            payload.max_stock,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(product)))
}

#[utoipa::path(
    get,
    path = "/api/director/products",
    tag = "Diretor",
    responses(
        (status = 200, description = "Produtos da empresa do diretor", body = [Product]),
        (status = 401, description = "Não autenticado ou papel insuficiente")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_products(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    _guard: RequireRole<DirectorOnly>,
) -> Result<impl IntoResponse, AppError> {
    let company_id = require_company(&user.0)?;

    let products = app_state.inventory_service.list_products(company_id).await?;
    Ok((StatusCode::OK, Json(products)))
}

pub async fn get_product(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    _guard: RequireRole<DirectorOnly>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let company_id = require_company(&user.0)?;

    let product = app_state.inventory_service.get_product(id, company_id).await?;
    Ok((StatusCode::OK, Json(product)))
}

pub async fn update_product(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    _guard: RequireRole<DirectorOnly>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateProductPayload>,
) -> Result<impl IntoResponse, AppError> {
    let company_id = require_company(&user.0)?;

    payload.validate().map_err(AppError::ValidationError)?;
    payload.validate_consistency().map_err(|e| {
        let mut errors = validator::ValidationErrors::new();
        errors.add("price", e);
        AppError::ValidationError(errors)
    })?;

    let product = app_state
        .inventory_service
        .update_product(
            id,
            company_id,
            payload.name.as_deref(),
            payload.sku.as_deref(),
            payload.category_id,
            payload.price,
        )
        .await?;

    Ok((StatusCode::OK, Json(product)))
}

pub async fn delete_product(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    _guard: RequireRole<DirectorOnly>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let company_id = require_company(&user.0)?;

    app_state.inventory_service.delete_product(id, company_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// =========================================================================
//  REPOSIÇÃO, LIMITES E HISTÓRICO
// =========================================================================

// POST /api/director/products/{id}/restock
#[utoipa::path(
    post,
    path = "/api/director/products/{id}/restock",
    tag = "Diretor",
    request_body = RestockPayload,
    params(("id" = Uuid, Path, description = "ID do produto")),
    responses(
        (status = 200, description = "Produto com a quantidade atualizada", body = Product),
        (status = 400, description = "Quantidade não positiva"),
        (status = 401, description = "Não autenticado ou papel insuficiente"),
        (status = 404, description = "Produto de outra empresa ou inexistente")
    ),
    security(("api_jwt" = []))
)]
pub async fn restock_product(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    _guard: RequireRole<DirectorOnly>,
    Path(id): Path<Uuid>,
    Json(payload): Json<RestockPayload>,
) -> Result<impl IntoResponse, AppError> {
    let company_id = require_company(&user.0)?;

    payload.validate().map_err(AppError::ValidationError)?;

    let product = app_state
        .inventory_service
        .restock(id, company_id, user.0.id, payload.quantity, payload.notes.as_deref())
        .await?;

    Ok((StatusCode::OK, Json(product)))
}

// PUT /api/director/products/{id}/thresholds
#[utoipa::path(
    put,
    path = "/api/director/products/{id}/thresholds",
    tag = "Diretor",
    request_body = UpdateThresholdsPayload,
    params(("id" = Uuid, Path, description = "ID do produto")),
    responses(
        (status = 200, description = "Produto com os limites atualizados", body = Product),
        (status = 400, description = "minStock negativo ou maxStock <= minStock"),
        (status = 401, description = "Não autenticado ou papel insuficiente"),
        (status = 404, description = "Produto de outra empresa ou inexistente")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_thresholds(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    _guard: RequireRole<DirectorOnly>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateThresholdsPayload>,
) -> Result<impl IntoResponse, AppError> {
    let company_id = require_company(&user.0)?;

    payload.validate().map_err(AppError::ValidationError)?;
    payload.validate_consistency().map_err(|e| {
        let mut errors = validator::ValidationErrors::new();
        errors.add("maxStock", e);
        AppError::ValidationError(errors)
    })?;

    let product = app_state
        .inventory_service
        .update_thresholds(id, company_id, payload.min_stock, payload.max_stock)
        .await?;

    Ok((StatusCode::OK, Json(product)))
}

pub async fn product_movements(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    _guard: RequireRole<DirectorOnly>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let company_id = require_company(&user.0)?;

    let movements = app_state
        .inventory_service
        .movements_for_product(id, company_id)
        .await?;

    Ok((StatusCode::OK, Json(movements)))
}

// =========================================================================
//  USUÁRIOS DA EMPRESA
// =========================================================================

pub async fn list_users(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    _guard: RequireRole<DirectorOnly>,
) -> Result<impl IntoResponse, AppError> {
    let company_id = require_company(&user.0)?;

    let users = app_state.user_repo.list_by_company(company_id).await?;
    Ok((StatusCode::OK, Json(users)))
}

// O diretor só cria usuários comuns, sempre dentro da própria empresa.
pub async fn create_user(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    _guard: RequireRole<DirectorOnly>,
    Json(payload): Json<CreateUserPayload>,
) -> Result<impl IntoResponse, AppError> {
    let company_id = require_company(&user.0)?;

    payload.validate().map_err(AppError::ValidationError)?;

    let created = app_state
        .auth_service
        .create_user_with_role(
            &payload.name,
            &payload.email,
            &payload.password,
            UserRole::User,
            Some(company_id),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(created)))
}

// =========================================================================
//  PEDIDOS
// =========================================================================

#[utoipa::path(
    get,
    path = "/api/director/orders",
    tag = "Diretor",
    responses(
        (status = 200, description = "Pedidos da empresa, mais recentes primeiro", body = [OrderRequest]),
        (status = 401, description = "Não autenticado ou papel insuficiente")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_orders(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    _guard: RequireRole<DirectorOnly>,
) -> Result<impl IntoResponse, AppError> {
    let company_id = require_company(&user.0)?;

    let orders = app_state.orders_service.list_by_company(company_id).await?;
    Ok((StatusCode::OK, Json(orders)))
}

pub async fn get_order(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    _guard: RequireRole<DirectorOnly>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let company_id = require_company(&user.0)?;

    let detail = app_state.orders_service.get_in_company(id, company_id).await?;
    Ok((StatusCode::OK, Json(detail)))
}

// PUT /api/director/orders/{id}/status
// Aprovar baixa o estoque dos itens e grava o histórico.
#[utoipa::path(
    put,
    path = "/api/director/orders/{id}/status",
    tag = "Diretor",
    request_body = TransitionOrderPayload,
    params(("id" = Uuid, Path, description = "ID do pedido")),
    responses(
        (status = 200, description = "Pedido com o novo status", body = OrderRequest),
        (status = 400, description = "Status de destino inválido"),
        (status = 401, description = "Não autenticado ou papel insuficiente"),
        (status = 404, description = "Pedido de outra empresa, inexistente ou já resolvido")
    ),
    security(("api_jwt" = []))
)]
pub async fn transition_order(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    _guard: RequireRole<DirectorOnly>,
    Path(id): Path<Uuid>,
    Json(payload): Json<TransitionOrderPayload>,
) -> Result<impl IntoResponse, AppError> {
    let company_id = require_company(&user.0)?;

    let order = app_state
        .orders_service
        .transition(id, company_id, user.0.id, payload.status)
        .await?;

    Ok((StatusCode::OK, Json(order)))
}

// =========================================================================
//  FINANCEIRO (pagamentos e despesas)
// =========================================================================

pub async fn create_payment(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    _guard: RequireRole<DirectorOnly>,
    Json(payload): Json<CreatePaymentPayload>,
) -> Result<impl IntoResponse, AppError> {
    let company_id = require_company(&user.0)?;

    payload.validate().map_err(AppError::ValidationError)?;

    // O pagador precisa ser um usuário da empresa do diretor
    let payer_id = payload.user_id.unwrap_or_default();
    let payer = app_state
        .user_repo
        .find_in_company(payer_id, company_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Usuário não encontrado.".into()))?;

    let payment = app_state
        .finance_repo
        .create_payment(
            payer.id,
            company_id,
            payload.amount,
            payload.method.unwrap_or(PaymentMethod::Cash),
            payload.reference.as_deref(),
            payload.notes.as_deref(),
            payload.paid_at,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(payment)))
}

pub async fn list_payments(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    _guard: RequireRole<DirectorOnly>,
) -> Result<impl IntoResponse, AppError> {
    let company_id = require_company(&user.0)?;

    let payments = app_state.finance_repo.list_payments_by_company(company_id).await?;
    Ok((StatusCode::OK, Json(payments)))
}

pub async fn create_expense(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    _guard: RequireRole<DirectorOnly>,
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
    _guard: RequireRole<DirectorOnly>,
) -> Result<impl IntoResponse, AppError> {
    let company_id = require_company(&user.0)?;

    let expenses = app_state.finance_repo.list_expenses_by_company(company_id).await?;
    Ok((StatusCode::OK, Json(expenses)))
}

// =========================================================================
//  SALDOS
// =========================================================================

#[utoipa::path(
    get,
    path = "/api/director/balances",
    tag = "Diretor",
    responses(
        (status = 200, description = "Saldo devedor de cada usuário da empresa e totais", body = CompanyBalances),
        (status = 401, description = "Não autenticado ou papel insuficiente")
    ),
    security(("api_jwt" = []))
)]
pub async fn company_balances(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    _guard: RequireRole<DirectorOnly>,
) -> Result<impl IntoResponse, AppError> {
    let company_id = require_company(&user.0)?;

    let balances = app_state.balance_service.company_balances(company_id).await?;
    Ok((StatusCode::OK, Json(balances)))
}

#[utoipa::path(
    get,
    path = "/api/director/balances/{user_id}",
    tag = "Diretor",
    params(("user_id" = Uuid, Path, description = "ID do usuário")),
    responses(
        (status = 200, description = "Saldo devedor de um usuário da empresa", body = UserBalance),
        (status = 401, description = "Não autenticado ou papel insuficiente"),
        (status = 404, description = "Usuário de outra empresa ou inexistente")
    ),
    security(("api_jwt" = []))
)]
pub async fn user_balance(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    _guard: RequireRole<DirectorOnly>,
    Path(user_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let company_id = require_company(&user.0)?;

    let target = app_state
        .user_repo
        .find_in_company(user_id, company_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Usuário não encontrado.".into()))?;

    let balance = app_state.balance_service.user_balance(target.id, &target.name).await?;
    Ok((StatusCode::OK, Json(balance)))
}
