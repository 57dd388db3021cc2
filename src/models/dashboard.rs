// src/models/dashboard.rs

use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

// O resumo do painel depende do papel de quem pergunta.
// O serde "untagged" deixa a resposta plana, sem discriminador.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(untagged)]
pub enum DashboardStats {
    Admin(AdminStats),
    Director(DirectorStats),
    User(UserStats),
}

// Visão global da plataforma.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminStats {
    pub companies: i64,
    pub users: i64,
    pub products: i64,
    pub orders: i64,
}

// Visão da empresa do diretor.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DirectorStats {
    pub products: i64,

    // Produtos com quantity <= min_stock
    pub low_stock_products: i64,

    pub users: i64,
    pub pending_orders: i64,

    #[schema(example = "1320.00")]
    pub outstanding_total: Decimal,
}

// Visão do próprio usuário.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    pub pending_orders: i64,

    #[schema(example = "300.00")]
    pub approved_orders_total: Decimal,

    #[schema(example = "120.00")]
    pub payments_total: Decimal,

    #[schema(example = "180.00")]
    pub outstanding: Decimal,
}
