// src/db/negotiation_repo.rs

use sqlx::{Executor, Postgres};

use crate::{
    common::error::AppError,
    db::constraints::map_write_error,
    models::negotiation::{Negotiation, NewNegotiation},
};

#[derive(Clone, Default)]
pub struct NegotiationRepository;

impl NegotiationRepository {
    pub fn new() -> Self {
        Self
    }

    pub async fn insert<'e, E>(&self, executor: E, negotiation: &NewNegotiation) -> Result<Negotiation, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Negotiation>(
            r#"
            INSERT INTO negotiations (
                event_id, event_name, vendor_id, vendor_name, cdsid, negotiation_date,
                initial_quote_amount, final_amount, status, notes, prid
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING *
            "#,
        )
        .bind(negotiation.event_id)
        .bind(&negotiation.event_name)
        .bind(negotiation.vendor_id)
        .bind(&negotiation.vendor_name)
        .bind(&negotiation.cdsid)
        .bind(negotiation.negotiation_date)
        .bind(negotiation.initial_quote_amount)
        .bind(negotiation.final_amount)
        .bind(negotiation.status)
        .bind(&negotiation.notes)
        .bind(negotiation.prid)
        .fetch_one(executor)
        .await
        .map_err(map_write_error)
    }

    pub async fn find_by_id<'e, E>(&self, executor: E, id: i32) -> Result<Option<Negotiation>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let negotiation = sqlx::query_as::<_, Negotiation>("SELECT * FROM negotiations WHERE id = $1")
            .bind(id)
            .fetch_optional(executor)
            .await?;

        Ok(negotiation)
    }

    pub async fn find_by_request<'e, E>(&self, executor: E, prid: i32) -> Result<Option<Negotiation>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let negotiation = sqlx::query_as::<_, Negotiation>("SELECT * FROM negotiations WHERE prid = $1")
            .bind(prid)
            .fetch_optional(executor)
            .await?;

        Ok(negotiation)
    }

    pub async fn list<'e, E>(&self, executor: E) -> Result<Vec<Negotiation>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let negotiations = sqlx::query_as::<_, Negotiation>("SELECT * FROM negotiations ORDER BY id")
            .fetch_all(executor)
            .await?;

        Ok(negotiations)
    }

    // prid e os campos copiados da origem não mudam depois da criação
    pub async fn update_terms<'e, E>(&self, executor: E, negotiation: &Negotiation) -> Result<Option<Negotiation>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let updated = sqlx::query_as::<_, Negotiation>(
            r#"
            UPDATE negotiations
            SET negotiation_date = $2, final_amount = $3, status = $4, notes = $5
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(negotiation.id)
        .bind(negotiation.negotiation_date)
        .bind(negotiation.final_amount)
        .bind(negotiation.status)
        .bind(&negotiation.notes)
        .fetch_optional(executor)
        .await?;

        Ok(updated)
    }

    pub async fn delete<'e, E>(&self, executor: E, id: i32) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM negotiations WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
