// src/models/inventory.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

// --- 1. Categorias (globais, nome único) ---
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

// --- 2. Produtos ---
// Pertencem a uma empresa e a uma categoria; o preço é um Decimal
// (serializado como número simples no JSON) e o estoque é inteiro.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: Uuid,

    pub company_id: Uuid,
    pub category_id: Uuid,

    #[schema(example = "Papel A4 75g")]
    pub name: String,

    #[schema(example = "PAP-A4-75")]
    pub sku: String,

    #[schema(example = "24.90")]
    pub price: Decimal,

    pub quantity: i32,

    // Limites de reposição: min_stock dispara alerta de estoque baixo;
    // max_stock, quando definido, precisa ser maior que min_stock.
    pub min_stock: i32,
    pub max_stock: Option<i32>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// --- 3. Movimentações de Estoque (Histórico) ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "stock_movement_reason", rename_all = "SCREAMING_SNAKE_CASE")] // Banco
#[serde(rename_all = "SCREAMING_SNAKE_CASE")] // JSON
pub enum StockMovementReason {
    InitialStock, // Vira "INITIAL_STOCK"
    Restock,
    OrderApproved,
    Adjustment,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StockMovement {
    pub id: Uuid,
    pub product_id: Uuid,
    pub user_id: Uuid,
    pub quantity_change: i32,
    pub reason: StockMovementReason,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

// ---
// Validação Customizada
// ---
fn validate_not_negative(val: &Decimal) -> Result<(), ValidationError> {
    if val.is_sign_negative() {
        let mut err = ValidationError::new("range");
        err.message = Some("O valor não pode ser negativo.".into());
        return Err(err);
    }
    Ok(())
}

// ---
// Payload: CreateCategory
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategoryPayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub name: String,
    pub description: Option<String>,
}

// ---
// Payload: CreateProduct
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductPayload {
    #[validate(required(message = "O campo 'categoryId' é obrigatório."))]
    pub category_id: Option<Uuid>,

    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub name: String,

    #[validate(length(min = 1, message = "O SKU é obrigatório."))]
    pub sku: String,

    #[validate(custom(function = "validate_not_negative"))]
    pub price: Decimal,

    // Estoque inicial; se ausente no JSON, assume 0
    #[validate(range(min = 0, message = "O estoque inicial não pode ser negativo."))]
    #[serde(default)]
    pub initial_stock: i32,

    #[validate(range(min = 0, message = "O estoque mínimo não pode ser negativo."))]
    #[serde(default)]
    pub min_stock: i32,

    pub max_stock: Option<i32>,
}

impl CreateProductPayload {
    // Regra entre campos: max_stock, quando informado, deve superar min_stock.
    pub fn validate_consistency(&self) -> Result<(), ValidationError> {
        if let Some(max) = self.max_stock {
            if max <= self.min_stock {
                let mut err = ValidationError::new("MaxStockMustExceedMin");
                err.message =
                    Some("O campo 'maxStock' deve ser maior que 'minStock'.".into());
                return Err(err);
            }
        }
        Ok(())
    }
}

// ---
// Payload: UpdateProduct (parcial)
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductPayload {
    #[validate(length(min = 1, message = "O nome não pode ser vazio."))]
    pub name: Option<String>,

    #[validate(length(min = 1, message = "O SKU não pode ser vazio."))]
    pub sku: Option<String>,

    pub category_id: Option<Uuid>,

    pub price: Option<Decimal>,
}

impl UpdateProductPayload {
    pub fn validate_consistency(&self) -> Result<(), ValidationError> {
        if let Some(price) = self.price {
            if price.is_sign_negative() {
                let mut err = ValidationError::new("range");
                err.message = Some("O preço não pode ser negativo.".into());
                return Err(err);
            }
        }
        Ok(())
    }
}

// ---
// Payload: Restock
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RestockPayload {
    #[validate(range(min = 1, message = "A quantidade deve ser um inteiro positivo."))]
    pub quantity: i32,

    pub notes: Option<String>,
}

// ---
// Payload: UpdateThresholds
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateThresholdsPayload {
    #[validate(range(min = 0, message = "O campo 'minStock' não pode ser negativo."))]
    pub min_stock: i32,

    pub max_stock: Option<i32>,
}

impl UpdateThresholdsPayload {
    pub fn validate_consistency(&self) -> Result<(), ValidationError> {
        if let Some(max) = self.max_stock {
            if max <= self.min_stock {
                let mut err = ValidationError::new("MaxStockMustExceedMin");
                err.message =
                    Some("O campo 'maxStock' deve ser maior que 'minStock'.".into());
                return Err(err);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn restock_rejeita_quantidade_nao_positiva() {
        let payload = RestockPayload { quantity: 0, notes: None };
        assert!(payload.validate().is_err());

        let payload = RestockPayload { quantity: -5, notes: None };
        assert!(payload.validate().is_err());

        let payload = RestockPayload { quantity: 1, notes: None };
        assert!(payload.validate().is_ok());
    }

    #[test]
    fn limites_exigem_max_maior_que_min() {
        let payload = UpdateThresholdsPayload { min_stock: 10, max_stock: Some(10) };
        assert!(payload.validate_consistency().is_err());

        let payload = UpdateThresholdsPayload { min_stock: 10, max_stock: Some(5) };
        assert!(payload.validate_consistency().is_err());

        let payload = UpdateThresholdsPayload { min_stock: 10, max_stock: Some(11) };
        assert!(payload.validate_consistency().is_ok());

        // Sem max_stock não há regra cruzada
        let payload = UpdateThresholdsPayload { min_stock: 0, max_stock: None };
        assert!(payload.validate_consistency().is_ok());
    }

    #[test]
    fn limite_minimo_nao_pode_ser_negativo() {
        let payload = UpdateThresholdsPayload { min_stock: -1, max_stock: None };
        assert!(payload.validate().is_err());
    }
}
