// src/tests/mod.rs
mod viewed_teams_tests;
