// src/db/inventory_repo.rs

use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::inventory::{Category, Product, StockMovement, StockMovementReason},
};

#[derive(Clone)]
pub struct InventoryRepository {
    pool: PgPool,
}

impl InventoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    //  CATEGORIAS (globais, nome único)
    // =========================================================================

    pub async fn create_category(
        &self,
        name: &str,
        description: Option<&str>,
    ) -> Result<Category, AppError> {
        let category = sqlx::query_as::<_, Category>(
            r#"
            INSERT INTO categories (name, description)
            VALUES ($1, $2)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(description)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::UniqueConstraintViolation(
                        "Já existe uma categoria com esse nome.".into(),
                    );
                }
            }
            e.into()
        })?;

        Ok(category)
    }

    pub async fn list_categories(&self) -> Result<Vec<Category>, AppError> {
        let categories = sqlx::query_as::<_, Category>(
            "SELECT * FROM categories ORDER BY name ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(categories)
    }

    pub async fn find_category(&self, id: Uuid) -> Result<Option<Category>, AppError> {
        let category = sqlx::query_as::<_, Category>(
            "SELECT * FROM categories WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(category)
    }

    // =========================================================================
    //  PRODUTOS (sempre filtrados pela empresa dona)
    // =========================================================================

    pub async fn create_product(
        &self,
        company_id: Uuid,
        category_id: Uuid,
        name: &str,
        sku: &str,
        price: Decimal,
        quantity: i32,
        min_stock: i32,
        max_stock: Option<i32>,
    ) -> Result<Product, AppError> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO products (company_id, category_id, name, sku, price, quantity, min_stock, max_stock)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(company_id)
        .bind(category_id)
        .bind(name)
        .bind(sku)
        .bind(price)
        .bind(quantity)
        .bind(min_stock)
        .bind(max_stock)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::UniqueConstraintViolation(
                        "Já existe um produto com esse SKU nesta empresa.".into(),
                    );
                }
            }
            e.into()
        })?;

        Ok(product)
    }

    pub async fn list_products(&self, company_id: Uuid) -> Result<Vec<Product>, AppError> {
        let products = sqlx::query_as::<_, Product>(
            "SELECT * FROM products WHERE company_id = $1 ORDER BY name ASC",
        )
        .bind(company_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    pub async fn find_product(
        &self,
        id: Uuid,
        company_id: Uuid,
    ) -> Result<Option<Product>, AppError> {
        let product = sqlx::query_as::<_, Product>(
            "SELECT * FROM products WHERE id = $1 AND company_id = $2",
        )
        .bind(id)
        .bind(company_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    pub async fn update_product(
        &self,
        id: Uuid,
        company_id: Uuid,
        name: Option<&str>,
        sku: Option<&str>,
        category_id: Option<Uuid>,
        price: Option<Decimal>,
    ) -> Result<Option<Product>, AppError> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            UPDATE products
            SET name        = COALESCE($3, name),
                sku         = COALESCE($4, sku),
                category_id = COALESCE($5, category_id),
                price       = COALESCE($6, price),
                updated_at  = now()
            WHERE id = $1 AND company_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(company_id)
        .bind(name)
        .bind(sku)
        .bind(category_id)
        .bind(price)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    pub async fn delete_product(&self, id: Uuid, company_id: Uuid) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1 AND company_id = $2")
            .bind(id)
            .bind(company_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    // Incremento atômico em um único UPDATE; a atomicidade fica por conta do banco.
    pub async fn increment_quantity(
        &self,
        id: Uuid,
        company_id: Uuid,
        delta: i32,
    ) -> Result<Option<Product>, AppError> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            UPDATE products
            SET quantity = quantity + $3, updated_at = now()
            WHERE id = $1 AND company_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(company_id)
        .bind(delta)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    // Variante sem filtro de empresa, usada pela aprovação de pedidos
    // (o pedido já foi resolvido dentro da empresa do diretor).
    pub async fn decrement_quantity(
        &self,
        product_id: Uuid,
        delta: i32,
    ) -> Result<u64, AppError> {
        let result = sqlx::query(
            "UPDATE products SET quantity = quantity - $2, updated_at = now() WHERE id = $1",
        )
        .bind(product_id)
        .bind(delta)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    pub async fn update_thresholds(
        &self,
        id: Uuid,
        company_id: Uuid,
        min_stock: i32,
        max_stock: Option<i32>,
    ) -> Result<Option<Product>, AppError> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            UPDATE products
            SET min_stock = $3, max_stock = $4, updated_at = now()
            WHERE id = $1 AND company_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(company_id)
        .bind(min_stock)
        .bind(max_stock)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    // =========================================================================
    //  MOVIMENTAÇÕES DE ESTOQUE (histórico append-only)
    // =========================================================================

    pub async fn log_movement(
        &self,
        product_id: Uuid,
        user_id: Uuid,
        quantity_change: i32,
        reason: StockMovementReason,
        notes: Option<&str>,
    ) -> Result<StockMovement, AppError> {
        let movement = sqlx::query_as::<_, StockMovement>(
            r#"
            INSERT INTO stock_movements (product_id, user_id, quantity_change, reason, notes)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(product_id)
        .bind(user_id)
        .bind(quantity_change)
        .bind(reason)
        .bind(notes)
        .fetch_one(&self.pool)
        .await?;

        Ok(movement)
    }

    // Histórico de um produto, sempre conferindo a empresa dona via JOIN.
    pub async fn movements_for_product(
        &self,
        product_id: Uuid,
        company_id: Uuid,
    ) -> Result<Vec<StockMovement>, AppError> {
        let movements = sqlx::query_as::<_, StockMovement>(
            r#"
            SELECT m.*
            FROM stock_movements m
            JOIN products p ON p.id = m.product_id
            WHERE m.product_id = $1 AND p.company_id = $2
            ORDER BY m.created_at DESC
            "#,
        )
        .bind(product_id)
        .bind(company_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(movements)
    }
}
