// src/services/dashboard_service.rs

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{DashboardRepository, FinanceRepository},
    models::{
        auth::{User, UserRole},
        dashboard::{AdminStats, DashboardStats, DirectorStats, UserStats},
    },
    services::balance_service::{outstanding, BalanceService},
};

#[derive(Clone)]
pub struct DashboardService {
    repo: DashboardRepository,
    finance_repo: FinanceRepository,
    balance_service: BalanceService,
}

impl DashboardService {
    pub fn new(
        repo: DashboardRepository,
        finance_repo: FinanceRepository,
        balance_service: BalanceService,
    ) -> Self {
        Self { repo, finance_repo, balance_service }
    }

    // O resumo muda conforme o papel de quem pergunta.
    pub async fn stats_for(&self, user: &User) -> Result<DashboardStats, AppError> {
        match user.role {
            UserRole::Admin => Ok(DashboardStats::Admin(self.admin_stats().await?)),
            UserRole::CompanyDirector => {
                let company_id = user.company_id.ok_or(AppError::Unauthorized)?;
                Ok(DashboardStats::Director(self.director_stats(company_id).await?))
            }
            UserRole::User => Ok(DashboardStats::User(self.user_stats(user.id).await?)),
        }
    }

    async fn admin_stats(&self) -> Result<AdminStats, AppError> {
        let (companies, users, products, orders) = tokio::try_join!(
            self.repo.count_companies(),
            self.repo.count_users(),
            self.repo.count_products(),
            self.repo.count_orders(),
        )?;

        Ok(AdminStats { companies, users, products, orders })
    }

    async fn director_stats(&self, company_id: Uuid) -> Result<DirectorStats, AppError> {
        let (products, low_stock_products, users, pending_orders, balances) = tokio::try_join!(
            self.repo.count_company_products(company_id),
            self.repo.count_company_low_stock(company_id),
            self.repo.count_company_users(company_id),
            self.repo.count_company_pending_orders(company_id),
            self.balance_service.company_balances(company_id),
        )?;

        Ok(DirectorStats {
            products,
            low_stock_products,
            users,
            pending_orders,
            outstanding_total: balances.outstanding,
        })
    }

    async fn user_stats(&self, user_id: Uuid) -> Result<UserStats, AppError> {
        let (pending_orders, approved_orders_total, payments_total) = tokio::try_join!(
            self.repo.count_user_pending_orders(user_id),
            self.finance_repo.sum_approved_orders(user_id),
            self.finance_repo.sum_payments(user_id),
        )?;

        Ok(UserStats {
            pending_orders,
            approved_orders_total,
            payments_total,
            outstanding: outstanding(approved_orders_total, payments_total),
        })
    }
}
