// src/db/finance_repo.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::finance::{Expense, Payment, PaymentMethod, UserTotal},
};

#[derive(Clone)]
pub struct FinanceRepository {
    pool: PgPool,
}

impl FinanceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    //  PAGAMENTOS
    // =========================================================================

    pub async fn create_payment(
        &self,
        user_id: Uuid,
        company_id: Uuid,
        amount: Decimal,
        method: PaymentMethod,
        reference: Option<&str>,
        notes: Option<&str>,
        paid_at: Option<DateTime<Utc>>,
    ) -> Result<Payment, AppError> {
        let payment = sqlx::query_as::<_, Payment>(
            r#"
            INSERT INTO payments (user_id, company_id, amount, method, reference, notes, paid_at)
            VALUES ($1, $2, $3, $4, $5, $6, COALESCE($7, now()))
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(company_id)
        .bind(amount)
        .bind(method)
        .bind(reference)
        .bind(notes)
        .bind(paid_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(payment)
    }

    pub async fn list_payments_by_company(
        &self,
        company_id: Uuid,
    ) -> Result<Vec<Payment>, AppError> {
        let payments = sqlx::query_as::<_, Payment>(
            "SELECT * FROM payments WHERE company_id = $1 ORDER BY paid_at DESC",
        )
        .bind(company_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(payments)
    }

    pub async fn list_payments_by_user(&self, user_id: Uuid) -> Result<Vec<Payment>, AppError> {
        let payments = sqlx::query_as::<_, Payment>(
            "SELECT * FROM payments WHERE user_id = $1 ORDER BY paid_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(payments)
    }

    // =========================================================================
    //  DESPESAS
    // =========================================================================

    pub async fn create_expense(
        &self,
        user_id: Uuid,
        company_id: Uuid,
        description: &str,
        amount: Decimal,
        incurred_on: NaiveDate,
    ) -> Result<Expense, AppError> {
        let expense = sqlx::query_as::<_, Expense>(
            r#"
            INSERT INTO expenses (user_id, company_id, description, amount, incurred_on)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(company_id)
        .bind(description)
        .bind(amount)
        .bind(incurred_on)
        .fetch_one(&self.pool)
        .await?;

        Ok(expense)
    }

    pub async fn list_expenses_by_company(
        &self,
        company_id: Uuid,
    ) -> Result<Vec<Expense>, AppError> {
        let expenses = sqlx::query_as::<_, Expense>(
            "SELECT * FROM expenses WHERE company_id = $1 ORDER BY incurred_on DESC",
        )
        .bind(company_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(expenses)
    }

    pub async fn list_expenses_by_user(&self, user_id: Uuid) -> Result<Vec<Expense>, AppError> {
        let expenses = sqlx::query_as::<_, Expense>(
            "SELECT * FROM expenses WHERE user_id = $1 ORDER BY incurred_on DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(expenses)
    }

    // =========================================================================
    //  AGREGAÇÕES DE SALDO
    // =========================================================================

    // Soma dos pedidos APPROVED de um usuário
    pub async fn sum_approved_orders(&self, user_id: Uuid) -> Result<Decimal, AppError> {
        let total = sqlx::query_scalar::<_, Decimal>(
            r#"
            SELECT COALESCE(SUM(total_amount), 0)
            FROM order_requests
            WHERE user_id = $1 AND status = 'APPROVED'
            "#,
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(total)
    }

    // Soma dos pagamentos de um usuário
    pub async fn sum_payments(&self, user_id: Uuid) -> Result<Decimal, AppError> {
        let total = sqlx::query_scalar::<_, Decimal>(
            "SELECT COALESCE(SUM(amount), 0) FROM payments WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(total)
    }

    // Totais de pedidos APPROVED agrupados por usuário de uma empresa
    pub async fn approved_totals_by_user(
        &self,
        company_id: Uuid,
    ) -> Result<Vec<UserTotal>, AppError> {
        let totals = sqlx::query_as::<_, UserTotal>(
            r#"
            SELECT user_id, COALESCE(SUM(total_amount), 0) AS total
            FROM order_requests
            WHERE company_id = $1 AND status = 'APPROVED'
            GROUP BY user_id
            "#,
        )
        .bind(company_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(totals)
    }

    // Totais de pagamentos agrupados por usuário de uma empresa
    pub async fn payment_totals_by_user(
        &self,
        company_id: Uuid,
    ) -> Result<Vec<UserTotal>, AppError> {
        let totals = sqlx::query_as::<_, UserTotal>(
            r#"
            SELECT user_id, COALESCE(SUM(amount), 0) AS total
            FROM payments
            WHERE company_id = $1
            GROUP BY user_id
            "#,
        )
        .bind(company_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(totals)
    }
}
