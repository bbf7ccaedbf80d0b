// src/db/constraints.rs

use crate::{
    common::error::AppError,
    db::store::{DUPLICATE_EVENT_ID, NEGOTIATION_EXISTS, PURCHASE_ORDER_EXISTS},
};

// Nomes definidos na migração
const EVENT_ID_KEY: &str = "purchase_requests_event_id_key";
const NEGOTIATION_PRID_KEY: &str = "negotiations_prid_key";
const ORDER_NEGOTIATION_KEY: &str = "purchase_orders_negotiation_id_key";

/// Converte violações de unicidade conhecidas nos erros de negócio equivalentes.
pub(crate) fn map_write_error(e: sqlx::Error) -> AppError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            match db_err.constraint() {
                Some(EVENT_ID_KEY) => return AppError::InvalidInput(DUPLICATE_EVENT_ID.to_string()),
                Some(NEGOTIATION_PRID_KEY) => return AppError::DerivationError(NEGOTIATION_EXISTS.to_string()),
                Some(ORDER_NEGOTIATION_KEY) => return AppError::DerivationError(PURCHASE_ORDER_EXISTS.to_string()),
                _ => {}
            }
        }
    }
    AppError::DatabaseError(e)
}
