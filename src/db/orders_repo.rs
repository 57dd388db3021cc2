// src/db/orders_repo.rs

use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::orders::{OrderItem, OrderRequest, OrderStatus},
};

#[derive(Clone)]
pub struct OrdersRepository {
    pool: PgPool,
}

impl OrdersRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create_order(
        &self,
        user_id: Uuid,
        company_id: Uuid,
        total_amount: Decimal,
        notes: Option<&str>,
    ) -> Result<OrderRequest, AppError> {
        let order = sqlx::query_as::<_, OrderRequest>(
            r#"
            INSERT INTO order_requests (user_id, company_id, total_amount, notes)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(company_id)
        .bind(total_amount)
        .bind(notes)
        .fetch_one(&self.pool)
        .await?;

        Ok(order)
    }

    pub async fn insert_item(
        &self,
        order_id: Uuid,
        product_id: Uuid,
        quantity: i32,
        unit_price: Decimal,
    ) -> Result<OrderItem, AppError> {
        let item = sqlx::query_as::<_, OrderItem>(
            r#"
            INSERT INTO order_items (order_id, product_id, quantity, unit_price)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(order_id)
        .bind(product_id)
        .bind(quantity)
        .bind(unit_price)
        .fetch_one(&self.pool)
        .await?;

        Ok(item)
    }

    pub async fn items(&self, order_id: Uuid) -> Result<Vec<OrderItem>, AppError> {
        let items = sqlx::query_as::<_, OrderItem>(
            "SELECT * FROM order_items WHERE order_id = $1",
        )
        .bind(order_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    pub async fn list_by_company(&self, company_id: Uuid) -> Result<Vec<OrderRequest>, AppError> {
        let orders = sqlx::query_as::<_, OrderRequest>(
            "SELECT * FROM order_requests WHERE company_id = $1 ORDER BY created_at DESC",
        )
        .bind(company_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(orders)
    }

    pub async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<OrderRequest>, AppError> {
        let orders = sqlx::query_as::<_, OrderRequest>(
            "SELECT * FROM order_requests WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(orders)
    }

    pub async fn find_in_company(
        &self,
        id: Uuid,
        company_id: Uuid,
    ) -> Result<Option<OrderRequest>, AppError> {
        let order = sqlx::query_as::<_, OrderRequest>(
            "SELECT * FROM order_requests WHERE id = $1 AND company_id = $2",
        )
        .bind(id)
        .bind(company_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(order)
    }

    // Transição de status, restrita a pedidos PENDING da empresa do diretor.
    // A cláusula WHERE faz a checagem e a escrita num único statement.
    pub async fn transition_pending(
        &self,
        id: Uuid,
        company_id: Uuid,
        new_status: OrderStatus,
    ) -> Result<Option<OrderRequest>, AppError> {
        let order = sqlx::query_as::<_, OrderRequest>(
            r#"
            UPDATE order_requests
            SET status = $3, updated_at = now()
            WHERE id = $1 AND company_id = $2 AND status = 'PENDING'
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(company_id)
        .bind(new_status)
        .fetch_optional(&self.pool)
        .await?;

        Ok(order)
    }

    // Cancelamento pelo próprio dono, apenas enquanto PENDING.
    pub async fn cancel_own_pending(
        &self,
        id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<OrderRequest>, AppError> {
        let order = sqlx::query_as::<_, OrderRequest>(
            r#"
            UPDATE order_requests
            SET status = 'CANCELLED', updated_at = now()
            WHERE id = $1 AND user_id = $2 AND status = 'PENDING'
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(order)
    }
}
