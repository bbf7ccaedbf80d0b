// src/services/lifecycle.rs

use crate::{common::error::AppError, models::status::Lifecycle};

/// Aplica a tabela de transições do status.
pub fn ensure_transition<S: Lifecycle>(entity: &str, from: S, to: S) -> Result<(), AppError> {
    if from.can_become(to) {
        return Ok(());
    }
    Err(AppError::InvalidInput(format!(
        "{} cannot move from {} to {}",
        entity,
        from.label(),
        to.label()
    )))
}

/// Referências de origem (`prid`, `negotiationid`) só podem ser preenchidas uma vez.
pub fn merge_back_reference(field: &str, current: Option<i32>, requested: Option<i32>) -> Result<Option<i32>, AppError> {
    match (current, requested) {
        (Some(current), Some(requested)) if current != requested => Err(AppError::InvalidInput(format!(
            "{} cannot be changed once set",
            field
        ))),
        (Some(current), _) => Ok(Some(current)),
        (None, requested) => Ok(requested),
    }
}
