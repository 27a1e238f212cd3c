// src/routes/mod.rs
pub mod status_routes;
pub mod viewed_team_routes;
