// src/docs.rs

use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::register,
        handlers::auth::login,
        handlers::auth::get_me,

        // --- Categorias ---
        handlers::categories::list_categories,
        handlers::categories::create_category,

        // --- Diretor ---
        handlers::director::create_product,
        handlers::director::list_products,
        handlers::director::restock_product,
        handlers::director::update_thresholds,
        handlers::director::list_orders,
        handlers::director::transition_order,
        handlers::director::company_balances,
        handlers::director::user_balance,

        // --- Usuário ---
        handlers::user::create_order,
        handlers::user::my_balance,

        // --- Dashboard ---
        handlers::dashboard::get_stats,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::User,
            models::auth::UserRole,
            models::auth::RegisterUserPayload,
            models::auth::LoginUserPayload,
            models::auth::AuthResponse,

            // --- Inventário ---
            models::inventory::Category,
            models::inventory::CreateCategoryPayload,
            models::inventory::Product,
            models::inventory::CreateProductPayload,
            models::inventory::RestockPayload,
            models::inventory::UpdateThresholdsPayload,
            models::inventory::StockMovement,
            models::inventory::StockMovementReason,

            // --- Pedidos ---
            models::orders::OrderRequest,
            models::orders::OrderItem,
            models::orders::OrderDetail,
            models::orders::OrderStatus,
            models::orders::CreateOrderPayload,
            models::orders::OrderItemPayload,
            models::orders::TransitionOrderPayload,

            // --- Financeiro ---
            models::finance::UserBalance,
            models::finance::CompanyBalances,

            // --- Dashboard ---
            models::dashboard::DashboardStats,
            models::dashboard::AdminStats,
            models::dashboard::DirectorStats,
            models::dashboard::UserStats,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Auth", description = "Registro, login e sessão"),
        (name = "Categorias", description = "Categorias globais de produtos"),
        (name = "Diretor", description = "Gestão da empresa do diretor"),
        (name = "Usuário", description = "Pedidos e finanças do próprio usuário"),
        (name = "Dashboard", description = "Resumos por papel"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "api_jwt",
                SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
            );
        }
    }
}
