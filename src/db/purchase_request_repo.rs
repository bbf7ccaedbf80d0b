// src/db/purchase_request_repo.rs

use sqlx::{Executor, Postgres};

use crate::{
    common::error::AppError,
    db::constraints::map_write_error,
    models::purchase_request::{NewPurchaseRequest, PrStatus, PurchaseRequest},
};

#[derive(Clone, Default)]
pub struct PurchaseRequestRepository;

impl PurchaseRequestRepository {
    pub fn new() -> Self {
        Self
    }

    pub async fn insert<'e, E>(&self, executor: E, request: &NewPurchaseRequest) -> Result<PurchaseRequest, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, PurchaseRequest>(
            r#"
            INSERT INTO purchase_requests (
                event_id, event_name, vendor_id, vendor_name, cdsid,
                request_date, allocated_amount, status
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(request.event_id)
        .bind(&request.event_name)
        .bind(request.vendor_id)
        .bind(&request.vendor_name)
        .bind(&request.cdsid)
        .bind(request.request_date)
        .bind(request.allocated_amount)
        .bind(request.status)
        .fetch_one(executor)
        .await
        .map_err(map_write_error)
    }

    pub async fn find_by_id<'e, E>(&self, executor: E, id: i32) -> Result<Option<PurchaseRequest>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let request = sqlx::query_as::<_, PurchaseRequest>("SELECT * FROM purchase_requests WHERE id = $1")
            .bind(id)
            .fetch_optional(executor)
            .await?;

        Ok(request)
    }

    pub async fn find_by_event<'e, E>(&self, executor: E, event_id: i32) -> Result<Option<PurchaseRequest>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let request = sqlx::query_as::<_, PurchaseRequest>("SELECT * FROM purchase_requests WHERE event_id = $1")
            .bind(event_id)
            .fetch_optional(executor)
            .await?;

        Ok(request)
    }

    pub async fn list<'e, E>(&self, executor: E) -> Result<Vec<PurchaseRequest>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        // Ordem de inserção
        let requests = sqlx::query_as::<_, PurchaseRequest>("SELECT * FROM purchase_requests ORDER BY id")
            .fetch_all(executor)
            .await?;

        Ok(requests)
    }

    pub async fn update<'e, E>(&self, executor: E, request: &PurchaseRequest) -> Result<Option<PurchaseRequest>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, PurchaseRequest>(
            r#"
            UPDATE purchase_requests
            SET event_id = $2, event_name = $3, vendor_id = $4, vendor_name = $5,
                cdsid = $6, request_date = $7, allocated_amount = $8, status = $9
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(request.id)
        .bind(request.event_id)
        .bind(&request.event_name)
        .bind(request.vendor_id)
        .bind(&request.vendor_name)
        .bind(&request.cdsid)
        .bind(request.request_date)
        .bind(request.allocated_amount)
        .bind(request.status)
        .fetch_optional(executor)
        .await
        .map_err(map_write_error)
    }

    pub async fn set_status<'e, E>(&self, executor: E, id: i32, status: PrStatus) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query("UPDATE purchase_requests SET status = $2 WHERE id = $1")
            .bind(id)
            .bind(status)
            .execute(executor)
            .await?;

        Ok(())
    }

    pub async fn delete<'e, E>(&self, executor: E, id: i32) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM purchase_requests WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
