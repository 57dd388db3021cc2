// src/config.rs

use sqlx::{postgres::PgPoolOptions, PgPool};
use std::{env, time::Duration};

use crate::{
    db::{
        CompanyRepository, DashboardRepository, FinanceRepository, InventoryRepository,
        OrdersRepository, UserRepository,
    },
    services::{AuthService, BalanceService, DashboardService, InventoryService, OrdersService},
};

#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub jwt_secret: String,

    // Repositórios usados diretamente pelos handlers mais simples
    pub user_repo: UserRepository,
    pub company_repo: CompanyRepository,
    pub finance_repo: FinanceRepository,

    // Serviços com regra de negócio
    pub auth_service: AuthService,
    pub inventory_service: InventoryService,
    pub orders_service: OrdersService,
    pub balance_service: BalanceService,
    pub dashboard_service: DashboardService,
}

impl AppState {
    // A assinatura retorna um Result: se a configuração falhar,
    // a aplicação não deve iniciar.
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL deve ser definida");
        let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET deve ser definido");

        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        Ok(Self::assemble(db_pool, jwt_secret))
    }

    // Monta o gráfico de dependências a partir de uma pool já criada.
    // Também é o ponto de entrada dos testes de router.
    pub fn assemble(db_pool: PgPool, jwt_secret: String) -> Self {
        let user_repo = UserRepository::new(db_pool.clone());
        let company_repo = CompanyRepository::new(db_pool.clone());
        let inventory_repo = InventoryRepository::new(db_pool.clone());
        let orders_repo = OrdersRepository::new(db_pool.clone());
        let finance_repo = FinanceRepository::new(db_pool.clone());
        let dashboard_repo = DashboardRepository::new(db_pool.clone());

        let auth_service =
            AuthService::new(user_repo.clone(), company_repo.clone(), jwt_secret.clone());
        let inventory_service = InventoryService::new(inventory_repo.clone());
        let orders_service = OrdersService::new(orders_repo, inventory_repo);
        let balance_service = BalanceService::new(finance_repo.clone(), user_repo.clone());
        let dashboard_service = DashboardService::new(
            dashboard_repo,
            finance_repo.clone(),
            balance_service.clone(),
        );

        Self {
            db_pool,
            jwt_secret,
            user_repo,
            company_repo,
            finance_repo,
            auth_service,
            inventory_service,
            orders_service,
            balance_service,
            dashboard_service,
        }
    }
}
