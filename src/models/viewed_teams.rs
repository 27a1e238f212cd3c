// ptg-service/src/models/viewed_teams.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// One (team, last viewed at) fact for a user
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ViewedTeamEntry {
    pub team_id: String,
    pub timestamp: DateTime<Utc>,
}

// A user's persisted viewed-teams history
#[derive(Debug, Clone, PartialEq)]
pub struct ViewedTeamsRecord {
    pub user_email: String,
    pub date_updated: DateTime<Utc>,
    pub entries: Vec<ViewedTeamEntry>,
}

// Raw row of user_viewed_teams; `teams` holds the JSON-encoded entries
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ViewedTeamsRow {
    pub date_updated: DateTime<Utc>,
    pub teams: Option<String>,
}

// Read model returned to clients
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ViewedTeams {
    pub date_updated_utc: DateTime<Utc>,
    pub team_ids: Vec<String>,
}

impl From<ViewedTeamsRecord> for ViewedTeams {
    fn from(record: ViewedTeamsRecord) -> Self {
        Self {
            date_updated_utc: record.date_updated,
            team_ids: record.entries.into_iter().map(|entry| entry.team_id).collect(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ViewedTeamsList {
    pub viewed_teams: Vec<ViewedTeams>,
}

// Body of POST /teams/viewed
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ViewedTeamsUpdateRequest {
    pub user_email: String,
    pub team_ids: Vec<String>,
}
