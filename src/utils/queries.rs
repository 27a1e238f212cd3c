// ptg-service/src/utils/queries.rs

// SCHEMA
pub const CREATE_TEAMS_TABLE: &str = "
    CREATE TABLE IF NOT EXISTS teams (
        team_id TEXT PRIMARY KEY,
        name TEXT,
        nickname TEXT NOT NULL
    )";

pub const CREATE_VIEWED_TEAMS_TABLE: &str = "
    CREATE TABLE IF NOT EXISTS user_viewed_teams (
        email TEXT PRIMARY KEY,
        date_updated TEXT NOT NULL,
        teams TEXT
    )";

// TEAMS
// `{}` is replaced with one `?` placeholder per id
pub const GET_TEAM_IDS_BY_IDS_QUERY: &str = "
    SELECT team_id
    FROM teams
    WHERE team_id IN ({})";

// VIEWED TEAMS
pub const GET_VIEWED_TEAMS_QUERY: &str = "
    SELECT date_updated, teams
    FROM user_viewed_teams
    WHERE email = ?";

pub const UPDATE_VIEWED_TEAMS_QUERY: &str = "
    INSERT INTO user_viewed_teams (email, date_updated, teams)
    VALUES (?, ?, ?)
    ON CONFLICT(email) DO UPDATE SET
        date_updated = excluded.date_updated,
        teams = excluded.teams";

pub fn with_placeholders(query: &str, count: usize) -> String {
    let placeholders = vec!["?"; count].join(", ");
    query.replacen("{}", &placeholders, 1)
}
