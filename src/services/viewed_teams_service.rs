// src/services/viewed_teams_service.rs

use crate::models::{ServiceError, ViewedTeamEntry, ViewedTeams};
use crate::utils::user_lock::UserLockRegistry;
use crate::utils::viewed_teams_storage;
use chrono::{DateTime, Utc};
use log::{debug, info};
use sqlx::SqlitePool;
use std::collections::HashMap;

/// Reads and maintains each user's most-recently-viewed teams.
#[derive(Clone)]
pub struct ViewedTeamsService {
    pool: SqlitePool,
    locks: UserLockRegistry,
}

impl ViewedTeamsService {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            locks: UserLockRegistry::new(),
        }
    }

    /// Stored viewed teams for `user_email`, most recent first.
    ///
    /// A user with no stored history is `NotFound`, never an empty list.
    pub async fn get(&self, user_email: &str) -> Result<ViewedTeams, ServiceError> {
        let record = viewed_teams_storage::find_viewed_teams(&self.pool, user_email)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("No team_ids saved for user_email: {}", user_email))
            })?;

        debug!("Loaded {} viewed teams for {}", record.entries.len(), record.user_email);
        Ok(ViewedTeams::from(record))
    }

    /// Record `new_team_ids` as viewed now and persist the merged history.
    ///
    /// The ids are expected to be validated already; the merge still holds
    /// its invariants for any input.
    pub async fn update(
        &self,
        user_email: &str,
        new_team_ids: &[String],
        limit: usize,
    ) -> Result<String, ServiceError> {
        let _guard = self.locks.acquire(user_email).await;

        let viewed_at = Utc::now();
        let existing = viewed_teams_storage::find_viewed_teams(&self.pool, user_email)
            .await?
            .map(|record| record.entries)
            .unwrap_or_default();

        let merged = merge_viewed_teams(existing, new_team_ids, viewed_at, limit);
        debug!("Merged viewed teams for {}: {:?}", user_email, merged);

        viewed_teams_storage::upsert_viewed_teams(&self.pool, user_email, Utc::now(), &merged)
            .await?;

        info!("✅ Saved {} viewed teams for user: {}", merged.len(), user_email);

        Ok(format!(
            "Most recent {} viewed team_ids saved successfully for user_email: {}",
            merged.len(),
            user_email
        ))
    }
}

/// Merge newly viewed ids into an existing history.
///
/// New ids are stamped with `viewed_at` and appended after `existing`; for a
/// repeated `team_id` the later occurrence replaces the earlier one. The
/// survivors are ordered by timestamp, newest first, and cut to `limit`.
///
/// Equal timestamps fall back to the rank of the surviving occurrence: new
/// ids ahead of stored ones, the last supplied new id first, stored entries
/// in their stored order.
pub fn merge_viewed_teams(
    existing: Vec<ViewedTeamEntry>,
    new_team_ids: &[String],
    viewed_at: DateTime<Utc>,
    limit: usize,
) -> Vec<ViewedTeamEntry> {
    let existing_len = existing.len();
    let new_len = new_team_ids.len();
    let total = existing_len + new_len;

    let stamped = new_team_ids.iter().map(|team_id| ViewedTeamEntry {
        team_id: team_id.clone(),
        timestamp: viewed_at,
    });

    // team_id -> (position of latest occurrence, entry)
    let mut unique: HashMap<String, (usize, ViewedTeamEntry)> = HashMap::new();
    for (position, entry) in existing.into_iter().chain(stamped).enumerate() {
        unique.insert(entry.team_id.clone(), (position, entry));
    }

    let tie_rank = |position: usize| {
        if position >= existing_len {
            total - 1 - position
        } else {
            new_len + position
        }
    };

    let mut ranked: Vec<(usize, ViewedTeamEntry)> = unique
        .into_values()
        .map(|(position, entry)| (tie_rank(position), entry))
        .collect();
    ranked.sort_by(|(rank_a, a), (rank_b, b)| {
        b.timestamp.cmp(&a.timestamp).then_with(|| rank_a.cmp(rank_b))
    });
    ranked.truncate(limit);

    ranked.into_iter().map(|(_, entry)| entry).collect()
}
