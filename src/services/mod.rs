// src/services/mod.rs
pub mod validation;
pub mod viewed_teams_service;

pub use viewed_teams_service::{merge_viewed_teams, ViewedTeamsService};
