// src/services/orders_service.rs

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{InventoryRepository, OrdersRepository},
    models::{
        inventory::StockMovementReason,
        orders::{OrderDetail, OrderItemPayload, OrderRequest, OrderStatus},
    },
};

#[derive(Clone)]
pub struct OrdersService {
    repo: OrdersRepository,
    inventory_repo: InventoryRepository,
}

impl OrdersService {
    pub fn new(repo: OrdersRepository, inventory_repo: InventoryRepository) -> Self {
        Self { repo, inventory_repo }
    }

    // Cria o pedido com preços congelados no momento da solicitação.
    // Cada escrita é um statement independente (sem transação multi-comando);
    // uma falha no meio aparece como 500 e fica registrada no log.
    pub async fn create_order(
        &self,
        user_id: Uuid,
        company_id: Uuid,
        items: &[OrderItemPayload],
        notes: Option<&str>,
    ) -> Result<OrderDetail, AppError> {
        // Resolve todos os produtos dentro da empresa do solicitante antes
        // de escrever qualquer coisa.
        let mut resolved: Vec<(Uuid, i32, Decimal)> = Vec::with_capacity(items.len());
        for item in items {
            // O validator já garantiu a presença; o unwrap_or_default nunca
            // encontra None aqui.
            let product_id = item.product_id.unwrap_or_default();
            let product = self
                .inventory_repo
                .find_product(product_id, company_id)
                .await?
                .ok_or_else(|| AppError::NotFound("Produto não encontrado.".into()))?;

            resolved.push((product.id, item.quantity, product.price));
        }

        let total: Decimal = resolved
            .iter()
            .map(|(_, qty, price)| *price * Decimal::from(*qty))
            .sum();

        let order = self.repo.create_order(user_id, company_id, total, notes).await?;

        let mut order_items = Vec::with_capacity(resolved.len());
        for (product_id, quantity, unit_price) in resolved {
            let item = self
                .repo
                .insert_item(order.id, product_id, quantity, unit_price)
                .await?;
            order_items.push(item);
        }

        Ok(OrderDetail { order, items: order_items })
    }

    pub async fn list_by_company(&self, company_id: Uuid) -> Result<Vec<OrderRequest>, AppError> {
        self.repo.list_by_company(company_id).await
    }

    pub async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<OrderRequest>, AppError> {
        self.repo.list_by_user(user_id).await
    }

    pub async fn get_in_company(
        &self,
        id: Uuid,
        company_id: Uuid,
    ) -> Result<OrderDetail, AppError> {
        let order = self
            .repo
            .find_in_company(id, company_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Pedido não encontrado.".into()))?;

        let items = self.repo.items(order.id).await?;
        Ok(OrderDetail { order, items })
    }

    // O diretor só pode levar um pedido PENDING para APPROVED ou REJECTED.
    // Na aprovação o estoque de cada item é baixado e o histórico registrado.
    pub async fn transition(
        &self,
        id: Uuid,
        company_id: Uuid,
        actor_id: Uuid,
        new_status: OrderStatus,
    ) -> Result<OrderRequest, AppError> {
        match new_status {
            OrderStatus::Approved | OrderStatus::Rejected => {}
            _ => {
                return Err(AppError::BadRequest(
                    "O campo 'status' deve ser APPROVED ou REJECTED.".into(),
                ));
            }
        }

        let order = self
            .repo
            .transition_pending(id, company_id, new_status)
            .await?
            .ok_or_else(|| {
                AppError::NotFound("Pedido não encontrado ou não está pendente.".into())
            })?;

        if new_status == OrderStatus::Approved {
            let items = self.repo.items(order.id).await?;
            for item in items {
                self.inventory_repo
                    .decrement_quantity(item.product_id, item.quantity)
                    .await?;
                self.inventory_repo
                    .log_movement(
                        item.product_id,
                        actor_id,
                        -item.quantity,
                        StockMovementReason::OrderApproved,
                        None,
                    )
                    .await?;
            }
        }

        Ok(order)
    }

    pub async fn cancel_own(&self, id: Uuid, user_id: Uuid) -> Result<OrderRequest, AppError> {
        self.repo
            .cancel_own_pending(id, user_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound("Pedido não encontrado ou não está pendente.".into())
            })
    }
}
