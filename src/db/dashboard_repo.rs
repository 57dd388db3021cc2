// src/db/dashboard_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::common::error::AppError;

// Contagens usadas pelos resumos do painel. Cada método é uma única
// consulta escalar; o fan-out acontece no service, com try_join.
#[derive(Clone)]
pub struct DashboardRepository {
    pool: PgPool,
}

impl DashboardRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn count(&self, sql: &str) -> Result<i64, AppError> {
        let n = sqlx::query_scalar::<_, i64>(sql)
            .fetch_one(&self.pool)
            .await?;
        Ok(n)
    }

    async fn count_scoped(&self, sql: &str, id: Uuid) -> Result<i64, AppError> {
        let n = sqlx::query_scalar::<_, i64>(sql)
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(n)
    }

    // --- Visão global (admin) ---

    pub async fn count_companies(&self) -> Result<i64, AppError> {
        self.count("SELECT COUNT(*) FROM companies").await
    }

    pub async fn count_users(&self) -> Result<i64, AppError> {
        self.count("SELECT COUNT(*) FROM users").await
    }

    pub async fn count_products(&self) -> Result<i64, AppError> {
        self.count("SELECT COUNT(*) FROM products").await
    }

    pub async fn count_orders(&self) -> Result<i64, AppError> {
        self.count("SELECT COUNT(*) FROM order_requests").await
    }

    // --- Visão da empresa (diretor) ---

    pub async fn count_company_products(&self, company_id: Uuid) -> Result<i64, AppError> {
        self.count_scoped("SELECT COUNT(*) FROM products WHERE company_id = $1", company_id)
            .await
    }

    pub async fn count_company_low_stock(&self, company_id: Uuid) -> Result<i64, AppError> {
        self.count_scoped(
            "SELECT COUNT(*) FROM products WHERE company_id = $1 AND quantity <= min_stock",
            company_id,
        )
        .await
    }

    pub async fn count_company_users(&self, company_id: Uuid) -> Result<i64, AppError> {
        self.count_scoped("SELECT COUNT(*) FROM users WHERE company_id = $1", company_id)
            .await
    }

    pub async fn count_company_pending_orders(&self, company_id: Uuid) -> Result<i64, AppError> {
        self.count_scoped(
            "SELECT COUNT(*) FROM order_requests WHERE company_id = $1 AND status = 'PENDING'",
            company_id,
        )
        .await
    }

    // --- Visão do usuário ---

    pub async fn count_user_pending_orders(&self, user_id: Uuid) -> Result<i64, AppError> {
        self.count_scoped(
            "SELECT COUNT(*) FROM order_requests WHERE user_id = $1 AND status = 'PENDING'",
            user_id,
        )
        .await
    }
}
