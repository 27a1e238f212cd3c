// src/routes/viewed_team_routes.rs
use crate::config::Config;
use crate::models::{DefaultResponse, ServiceError, ViewedTeamsList, ViewedTeamsUpdateRequest};
use crate::services::validation::{validate_email, validate_update_request};
use crate::services::ViewedTeamsService;
use actix_web::{get, post, web, HttpResponse};
use log::{error, info};
use sqlx::SqlitePool;

// Saved viewed team ids for a user, most recent first
#[get("/teams/viewed/{user_email}")]
async fn get_viewed_teams(
    path: web::Path<String>,
    service: web::Data<ViewedTeamsService>,
) -> Result<HttpResponse, ServiceError> {
    let user_email = path.into_inner();
    validate_email(&user_email)?;

    info!("📋 Fetching viewed teams for user: {}", user_email);

    let viewed_teams = service.get(&user_email).await.map_err(|e| {
        error!("❌ Could not fetch viewed teams for {}: {}", user_email, e);
        e
    })?;

    info!("✅ Found {} viewed teams for user: {}", viewed_teams.team_ids.len(), user_email);

    Ok(HttpResponse::Ok().json(ViewedTeamsList {
        viewed_teams: vec![viewed_teams],
    }))
}

// Add or refresh a user's most recently viewed team ids
#[post("/teams/viewed")]
async fn update_viewed_teams(
    request: web::Json<ViewedTeamsUpdateRequest>,
    config: web::Data<Config>,
    pool: web::Data<SqlitePool>,
    service: web::Data<ViewedTeamsService>,
) -> Result<HttpResponse, ServiceError> {
    let request = request.into_inner();

    info!(
        "📝 Updating viewed teams for user: {} ({} ids)",
        request.user_email,
        request.team_ids.len()
    );

    validate_update_request(&request, config.viewed_teams_limit, pool.get_ref()).await?;

    let message = service
        .update(&request.user_email, &request.team_ids, config.viewed_teams_limit)
        .await?;

    Ok(HttpResponse::Ok().json(DefaultResponse::new(message)))
}

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(get_viewed_teams).service(update_viewed_teams);
}
