// src/services/balance_service.rs

use std::collections::HashMap;

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{FinanceRepository, UserRepository},
    models::finance::{CompanyBalances, UserBalance},
};

// Saldo devedor: max(0, soma dos pedidos APPROVED - soma dos pagamentos).
// Nunca é persistido; cada leitura recalcula a partir do banco.
pub fn outstanding(orders_total: Decimal, payments_total: Decimal) -> Decimal {
    (orders_total - payments_total).max(Decimal::ZERO)
}

#[derive(Clone)]
pub struct BalanceService {
    finance_repo: FinanceRepository,
    user_repo: UserRepository,
}

impl BalanceService {
    pub fn new(finance_repo: FinanceRepository, user_repo: UserRepository) -> Self {
        Self { finance_repo, user_repo }
    }

    // As duas somas saem em paralelo e são reduzidas aqui.
    pub async fn user_balance(
        &self,
        user_id: Uuid,
        user_name: &str,
    ) -> Result<UserBalance, AppError> {
        let (orders_total, payments_total) = tokio::try_join!(
            self.finance_repo.sum_approved_orders(user_id),
            self.finance_repo.sum_payments(user_id),
        )?;

        Ok(UserBalance {
            user_id,
            user_name: user_name.to_string(),
            orders_total,
            payments_total,
            outstanding: outstanding(orders_total, payments_total),
        })
    }

    // Visão da empresa: agrega o saldo de cada usuário e soma os totais.
    pub async fn company_balances(&self, company_id: Uuid) -> Result<CompanyBalances, AppError> {
        let (users, order_totals, payment_totals) = tokio::try_join!(
            self.user_repo.list_by_company(company_id),
            self.finance_repo.approved_totals_by_user(company_id),
            self.finance_repo.payment_totals_by_user(company_id),
        )?;

        let orders_by_user: HashMap<Uuid, Decimal> =
            order_totals.into_iter().map(|t| (t.user_id, t.total)).collect();
        let payments_by_user: HashMap<Uuid, Decimal> =
            payment_totals.into_iter().map(|t| (t.user_id, t.total)).collect();

        let mut balances = Vec::with_capacity(users.len());
        let mut orders_total = Decimal::ZERO;
        let mut payments_total = Decimal::ZERO;
        let mut outstanding_total = Decimal::ZERO;

        for user in users {
            let user_orders = orders_by_user.get(&user.id).copied().unwrap_or(Decimal::ZERO);
            let user_payments = payments_by_user.get(&user.id).copied().unwrap_or(Decimal::ZERO);
            let user_outstanding = outstanding(user_orders, user_payments);

            orders_total += user_orders;
            payments_total += user_payments;
            outstanding_total += user_outstanding;

            balances.push(UserBalance {
                user_id: user.id,
                user_name: user.name,
                orders_total: user_orders,
                payments_total: user_payments,
                outstanding: user_outstanding,
            });
        }

        Ok(CompanyBalances {
            company_id,
            users: balances,
            orders_total,
            payments_total,
            outstanding: outstanding_total,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn saldo_e_a_diferenca_entre_pedidos_e_pagamentos() {
        let orders = Decimal::new(30000, 2); // 300.00
        let payments = Decimal::new(12000, 2); // 120.00

        assert_eq!(outstanding(orders, payments), Decimal::new(18000, 2));
    }

    #[test]
    fn saldo_nunca_e_negativo() {
        let orders = Decimal::new(5000, 2); // 50.00
        let payments = Decimal::new(12000, 2); // 120.00

        assert_eq!(outstanding(orders, payments), Decimal::ZERO);
    }

    #[test]
    fn saldo_zerado_quando_nao_ha_movimento() {
        assert_eq!(outstanding(Decimal::ZERO, Decimal::ZERO), Decimal::ZERO);
    }

    #[test]
    fn pagamento_exato_quita_o_saldo() {
        let total = Decimal::new(9990, 2); // 99.90
        assert_eq!(outstanding(total, total), Decimal::ZERO);
    }
}
