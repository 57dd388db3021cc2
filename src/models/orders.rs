// src/models/orders.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// Situação de um pedido. Apenas pedidos APPROVED entram no saldo devedor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "order_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Pending,
    Approved,
    Rejected,
    Cancelled,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    pub id: Uuid,
    pub user_id: Uuid,
    pub company_id: Uuid,
    pub status: OrderStatus,

    #[schema(example = "149.70")]
    pub total_amount: Decimal,

    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub id: Uuid,
    pub order_id: Uuid,
    pub product_id: Uuid,
    pub quantity: i32,

    // Preço unitário congelado no momento da criação do pedido
    pub unit_price: Decimal,
}

// Pedido com seus itens, usado nas respostas de detalhe.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderDetail {
    #[serde(flatten)]
    pub order: OrderRequest,
    pub items: Vec<OrderItem>,
}

// ---
// Payload: CreateOrder
// ---
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemPayload {
    #[validate(required(message = "O campo 'productId' é obrigatório."))]
    pub product_id: Option<Uuid>,

    #[validate(range(min = 1, message = "A quantidade deve ser um inteiro positivo."))]
    pub quantity: i32,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderPayload {
    #[validate(length(min = 1, message = "O pedido precisa de ao menos um item."), nested)]
    pub items: Vec<OrderItemPayload>,

    pub notes: Option<String>,
}

// ---
// Payload: TransitionOrder (diretor aprova ou rejeita)
// ---
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TransitionOrderPayload {
    pub status: OrderStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pedido_sem_itens_e_rejeitado() {
        let payload = CreateOrderPayload { items: vec![], notes: None };
        assert!(payload.validate().is_err());
    }

    #[test]
    fn item_com_quantidade_zero_e_rejeitado() {
        let payload = CreateOrderPayload {
            items: vec![OrderItemPayload { product_id: Some(Uuid::new_v4()), quantity: 0 }],
            notes: None,
        };
        assert!(payload.validate().is_err());
    }

    #[test]
    fn item_sem_produto_e_rejeitado() {
        let payload = CreateOrderPayload {
            items: vec![OrderItemPayload { product_id: None, quantity: 2 }],
            notes: None,
        };
        assert!(payload.validate().is_err());
    }
}
