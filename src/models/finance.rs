// src/models/finance.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

// --- Enums (Mapeando o Postgres) ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "payment_method", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    Cash,
    Pix,
    Transfer,
    Card,
}

// --- Structs ---

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: Uuid,
    pub user_id: Uuid,
    pub company_id: Uuid,

    #[schema(example = "250.00")]
    pub amount: Decimal,

    pub method: PaymentMethod,
    pub reference: Option<String>,
    pub notes: Option<String>,
    pub paid_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: Uuid,
    pub user_id: Uuid,
    pub company_id: Uuid,

    #[schema(example = "Frete da transportadora")]
    pub description: String,

    #[schema(example = "89.90")]
    pub amount: Decimal,

    pub incurred_on: NaiveDate,
    pub created_at: DateTime<Utc>,
}

// Linha auxiliar das agregações por usuário (não é serializada).
#[derive(Debug, Clone, FromRow)]
pub struct UserTotal {
    pub user_id: Uuid,
    pub total: Decimal,
}

// --- Saldos (calculados, nunca persistidos) ---

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserBalance {
    pub user_id: Uuid,
    pub user_name: String,

    #[schema(example = "300.00")]
    pub orders_total: Decimal,

    #[schema(example = "120.00")]
    pub payments_total: Decimal,

    // max(0, orders_total - payments_total)
    #[schema(example = "180.00")]
    pub outstanding: Decimal,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompanyBalances {
    pub company_id: Uuid,
    pub users: Vec<UserBalance>,
    pub orders_total: Decimal,
    pub payments_total: Decimal,
    pub outstanding: Decimal,
}

// ---
// Validação Customizada
// ---
fn validate_positive_amount(val: &Decimal) -> Result<(), ValidationError> {
    if val.is_sign_negative() || val.is_zero() {
        let mut err = ValidationError::new("range");
        err.message = Some("O valor deve ser maior que zero.".into());
        return Err(err);
    }
    Ok(())
}

// ---
// Payload: CreatePayment (registrado pelo diretor em nome de um usuário)
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentPayload {
    #[validate(required(message = "O campo 'userId' é obrigatório."))]
    pub user_id: Option<Uuid>,

    #[validate(custom(function = "validate_positive_amount"))]
    pub amount: Decimal,

    pub method: Option<PaymentMethod>,
    pub reference: Option<String>,
    pub notes: Option<String>,
    pub paid_at: Option<DateTime<Utc>>,
}

// ---
// Payload: CreateExpense
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateExpensePayload {
    #[validate(length(min = 1, message = "A descrição é obrigatória."))]
    pub description: String,

    #[validate(custom(function = "validate_positive_amount"))]
    pub amount: Decimal,

    pub incurred_on: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(user_id: Option<Uuid>, amount: Decimal) -> CreatePaymentPayload {
        CreatePaymentPayload {
            user_id,
            amount,
            method: None,
            reference: None,
            notes: None,
            paid_at: None,
        }
    }

    #[test]
    fn pagamento_exige_valor_positivo() {
        let user = Some(Uuid::new_v4());

        assert!(payload(user, Decimal::ZERO).validate().is_err());
        // -10.50
        assert!(payload(user, Decimal::new(-1050, 2)).validate().is_err());
        // 10.50
        assert!(payload(user, Decimal::new(1050, 2)).validate().is_ok());
    }

    #[test]
    fn pagamento_exige_usuario() {
        assert!(payload(None, Decimal::new(10, 0)).validate().is_err());
    }
}
