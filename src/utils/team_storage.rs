// ptg-service/src/utils/team_storage.rs
use crate::models::ServiceError;
use crate::utils::queries::{with_placeholders, GET_TEAM_IDS_BY_IDS_QUERY};
use log::error;
use sqlx::SqlitePool;
use std::collections::HashSet;

// Return the subset of `team_ids` present in the teams catalog
pub async fn find_existing_team_ids(
    pool: &SqlitePool,
    team_ids: &[String],
) -> Result<HashSet<String>, ServiceError> {
    if team_ids.is_empty() {
        return Ok(HashSet::new());
    }

    let query = with_placeholders(GET_TEAM_IDS_BY_IDS_QUERY, team_ids.len());
    let mut statement = sqlx::query_scalar::<_, String>(&query);
    for team_id in team_ids {
        statement = statement.bind(team_id);
    }

    let rows = statement.fetch_all(pool).await.map_err(|e| {
        error!("❌ Failed to look up team ids: {:?}", e);
        ServiceError::from(e)
    })?;

    Ok(rows.into_iter().collect())
}
