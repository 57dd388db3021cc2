pub mod auth;
pub use auth::AuthService;
pub mod inventory_service;
pub use inventory_service::InventoryService;
pub mod orders_service;
pub use orders_service::OrdersService;
pub mod balance_service;
pub use balance_service::BalanceService;
pub mod dashboard_service;
pub use dashboard_service::DashboardService;
