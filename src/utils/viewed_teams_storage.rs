// ptg-service/src/utils/viewed_teams_storage.rs
use crate::models::{ServiceError, ViewedTeamEntry, ViewedTeamsRecord, ViewedTeamsRow};
use crate::utils::queries::{GET_VIEWED_TEAMS_QUERY, UPDATE_VIEWED_TEAMS_QUERY};
use chrono::{DateTime, Utc};
use log::{debug, error};
use sqlx::SqlitePool;

// Load the stored record for a user, if one exists
pub async fn find_viewed_teams(
    pool: &SqlitePool,
    user_email: &str,
) -> Result<Option<ViewedTeamsRecord>, ServiceError> {
    let row = sqlx::query_as::<_, ViewedTeamsRow>(GET_VIEWED_TEAMS_QUERY)
        .bind(user_email)
        .fetch_optional(pool)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch viewed teams for {}: {:?}", user_email, e);
            ServiceError::from(e)
        })?;

    match row {
        Some(row) => Ok(Some(ViewedTeamsRecord {
            user_email: user_email.to_string(),
            date_updated: row.date_updated,
            entries: parse_entries(row.teams.as_deref())?,
        })),
        None => Ok(None),
    }
}

// Insert the user's row, or replace date_updated and teams if it already exists
pub async fn upsert_viewed_teams(
    pool: &SqlitePool,
    user_email: &str,
    date_updated: DateTime<Utc>,
    entries: &[ViewedTeamEntry],
) -> Result<(), ServiceError> {
    let teams_json = serde_json::to_string(entries).map_err(|e| {
        error!("❌ Failed to serialize viewed teams: {:?}", e);
        ServiceError::Storage(e.to_string())
    })?;

    sqlx::query(UPDATE_VIEWED_TEAMS_QUERY)
        .bind(user_email)
        .bind(date_updated)
        .bind(&teams_json)
        .execute(pool)
        .await
        .map_err(|e| {
            error!("❌ Failed to save viewed teams for {}: {:?}", user_email, e);
            ServiceError::from(e)
        })?;

    debug!("Saved {} viewed teams for {}", entries.len(), user_email);
    Ok(())
}

// A NULL or empty column is an empty history
fn parse_entries(teams: Option<&str>) -> Result<Vec<ViewedTeamEntry>, ServiceError> {
    match teams {
        Some(json) if !json.trim().is_empty() => serde_json::from_str(json).map_err(|e| {
            error!("❌ Failed to parse stored viewed teams: {:?}", e);
            ServiceError::Storage(format!("Corrupt viewed teams record: {}", e))
        }),
        _ => Ok(Vec::new()),
    }
}
