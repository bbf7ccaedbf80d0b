// src/db/purchase_order_repo.rs

use sqlx::{Executor, Postgres};

use crate::{
    common::error::AppError,
    db::constraints::map_write_error,
    models::purchase_order::{NewPurchaseOrder, PurchaseOrder},
};

#[derive(Clone, Default)]
pub struct PurchaseOrderRepository;

impl PurchaseOrderRepository {
    pub fn new() -> Self {
        Self
    }

    pub async fn insert<'e, E>(&self, executor: E, order: &NewPurchaseOrder) -> Result<PurchaseOrder, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, PurchaseOrder>(
            r#"
            INSERT INTO purchase_orders (
                event_id, event_name, vendor_id, vendor_name, cdsid, order_date,
                order_amount_inr, order_amount_usd, status, prid, negotiation_id
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING *
            "#,
        )
        .bind(order.event_id)
        .bind(&order.event_name)
        .bind(order.vendor_id)
        .bind(&order.vendor_name)
        .bind(&order.cdsid)
        .bind(order.order_date)
        .bind(order.order_amount_inr)
        .bind(order.order_amount_usd)
        .bind(order.status)
        .bind(order.prid)
        .bind(order.negotiation_id)
        .fetch_one(executor)
        .await
        .map_err(map_write_error)
    }

    pub async fn find_by_id<'e, E>(&self, executor: E, id: i32) -> Result<Option<PurchaseOrder>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let order = sqlx::query_as::<_, PurchaseOrder>("SELECT * FROM purchase_orders WHERE id = $1")
            .bind(id)
            .fetch_optional(executor)
            .await?;

        Ok(order)
    }

    pub async fn find_by_negotiation<'e, E>(&self, executor: E, negotiation_id: i32) -> Result<Option<PurchaseOrder>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let order = sqlx::query_as::<_, PurchaseOrder>("SELECT * FROM purchase_orders WHERE negotiation_id = $1")
            .bind(negotiation_id)
            .fetch_optional(executor)
            .await?;

        Ok(order)
    }

    pub async fn list<'e, E>(&self, executor: E) -> Result<Vec<PurchaseOrder>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let orders = sqlx::query_as::<_, PurchaseOrder>("SELECT * FROM purchase_orders ORDER BY id")
            .fetch_all(executor)
            .await?;

        Ok(orders)
    }

    pub async fn update<'e, E>(&self, executor: E, order: &PurchaseOrder) -> Result<Option<PurchaseOrder>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, PurchaseOrder>(
            r#"
            UPDATE purchase_orders
            SET event_id = $2, event_name = $3, vendor_id = $4, vendor_name = $5, cdsid = $6,
                order_date = $7, order_amount_inr = $8, order_amount_usd = $9, status = $10,
                prid = $11, negotiation_id = $12
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(order.id)
        .bind(order.event_id)
        .bind(&order.event_name)
        .bind(order.vendor_id)
        .bind(&order.vendor_name)
        .bind(&order.cdsid)
        .bind(order.order_date)
        .bind(order.order_amount_inr)
        .bind(order.order_amount_usd)
        .bind(order.status)
        .bind(order.prid)
        .bind(order.negotiation_id)
        .fetch_optional(executor)
        .await
        .map_err(map_write_error)
    }

    pub async fn delete<'e, E>(&self, executor: E, id: i32) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM purchase_orders WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
