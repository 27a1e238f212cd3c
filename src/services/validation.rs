// src/services/validation.rs

use crate::models::{ServiceError, ViewedTeamsUpdateRequest};
use crate::utils::{email, team_storage};
use log::{error, warn};
use sqlx::SqlitePool;
use std::collections::BTreeSet;

pub fn validate_email(user_email: &str) -> Result<(), ServiceError> {
    if email::is_valid(user_email) {
        Ok(())
    } else {
        Err(ServiceError::Validation(format!(
            "'{}' is not a valid email address.",
            user_email
        )))
    }
}

// Runs before the tracker; a rejected request never reaches viewed teams storage
pub async fn validate_update_request(
    request: &ViewedTeamsUpdateRequest,
    limit: usize,
    pool: &SqlitePool,
) -> Result<(), ServiceError> {
    validate_email(&request.user_email)?;

    if request.team_ids.is_empty() || request.team_ids.len() > limit {
        return Err(ServiceError::Validation(format!(
            "The 'team_ids' list must contain between 1 and {} teams.",
            limit
        )));
    }

    let known = team_storage::find_existing_team_ids(pool, &request.team_ids)
        .await
        .map_err(|e| {
            error!("❌ Team id validation failed: {}", e);
            ServiceError::Validation(
                "Failed to validate 'team_ids' due to a database error.".to_string(),
            )
        })?;

    let invalid: BTreeSet<&str> = request
        .team_ids
        .iter()
        .filter(|team_id| !known.contains(team_id.as_str()))
        .map(String::as_str)
        .collect();

    if !invalid.is_empty() {
        warn!("Rejected unknown team ids for {}: {:?}", request.user_email, invalid);
        return Err(ServiceError::Validation(format!(
            "The following 'team_ids' are invalid: {}",
            invalid.into_iter().collect::<Vec<_>>().join(", ")
        )));
    }

    Ok(())
}
