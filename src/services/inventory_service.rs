// src/services/inventory_service.rs

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::InventoryRepository,
    models::inventory::{Category, Product, StockMovement, StockMovementReason},
};

#[derive(Clone)]
pub struct InventoryService {
    repo: InventoryRepository,
}

impl InventoryService {
    pub fn new(repo: InventoryRepository) -> Self {
        Self { repo }
    }

    // =========================================================================
    //  CATEGORIAS
    // =========================================================================

    pub async fn create_category(
        &self,
        name: &str,
        description: Option<&str>,
    ) -> Result<Category, AppError> {
        self.repo.create_category(name, description).await
    }

    pub async fn list_categories(&self) -> Result<Vec<Category>, AppError> {
        self.repo.list_categories().await
    }

    // =========================================================================
    //  PRODUTOS
    // =========================================================================

    #[allow(clippy::too_many_arguments)]
    pub async fn create_product(
        &self,
        company_id: Uuid,
        actor_id: Uuid,
        category_id: Uuid,
        name: &str,
        sku: &str,
        price: Decimal,
        initial_stock: i32,
        min_stock: i32,
        max_stock: Option<i32>,
    ) -> Result<Product, AppError> {
        // A categoria é global; um UUID desconhecido vira 404 em vez de
        // estourar como violação de FK (500).
        self.repo
            .find_category(category_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Categoria não encontrada.".into()))?;

        let product = self
            .repo
            .create_product(company_id, category_id, name, sku, price, initial_stock, min_stock, max_stock)
            .await?;

        if initial_stock > 0 {
            self.repo
                .log_movement(
                    product.id,
                    actor_id,
                    initial_stock,
                    StockMovementReason::InitialStock,
                    None,
                )
                .await?;
        }

        Ok(product)
    }

    pub async fn list_products(&self, company_id: Uuid) -> Result<Vec<Product>, AppError> {
        self.repo.list_products(company_id).await
    }

    pub async fn get_product(&self, id: Uuid, company_id: Uuid) -> Result<Product, AppError> {
        self.repo
            .find_product(id, company_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Produto não encontrado.".into()))
    }

    pub async fn update_product(
        &self,
        id: Uuid,
        company_id: Uuid,
        name: Option<&str>,
        sku: Option<&str>,
        category_id: Option<Uuid>,
        price: Option<Decimal>,
    ) -> Result<Product, AppError> {
        if let Some(category_id) = category_id {
            self.repo
                .find_category(category_id)
                .await?
                .ok_or_else(|| AppError::NotFound("Categoria não encontrada.".into()))?;
        }

        self.repo
            .update_product(id, company_id, name, sku, category_id, price)
            .await?
            .ok_or_else(|| AppError::NotFound("Produto não encontrado.".into()))
    }

    pub async fn delete_product(&self, id: Uuid, company_id: Uuid) -> Result<(), AppError> {
        let affected = self.repo.delete_product(id, company_id).await?;
        if affected == 0 {
            return Err(AppError::NotFound("Produto não encontrado.".into()));
        }
        Ok(())
    }

    // =========================================================================
    //  REPOSIÇÃO E LIMITES
    // =========================================================================

    // O incremento é um único UPDATE atômico; o histórico é gravado em seguida.
    pub async fn restock(
        &self,
        id: Uuid,
        company_id: Uuid,
        actor_id: Uuid,
        quantity: i32,
        notes: Option<&str>,
    ) -> Result<Product, AppError> {
        let product = self
            .repo
            .increment_quantity(id, company_id, quantity)
            .await?
            .ok_or_else(|| AppError::NotFound("Produto não encontrado.".into()))?;

        self.repo
            .log_movement(product.id, actor_id, quantity, StockMovementReason::Restock, notes)
            .await?;

        Ok(product)
    }

    pub async fn update_thresholds(
        &self,
        id: Uuid,
        company_id: Uuid,
        min_stock: i32,
        max_stock: Option<i32>,
    ) -> Result<Product, AppError> {
        self.repo
            .update_thresholds(id, company_id, min_stock, max_stock)
            .await?
            .ok_or_else(|| AppError::NotFound("Produto não encontrado.".into()))
    }

    pub async fn movements_for_product(
        &self,
        product_id: Uuid,
        company_id: Uuid,
    ) -> Result<Vec<StockMovement>, AppError> {
        // 404 quando o produto não existe ou pertence a outra empresa
        self.get_product(product_id, company_id).await?;
        self.repo.movements_for_product(product_id, company_id).await
    }
}
