//Third-party-dependencies
use actix_web::{middleware::Logger, web, App, HttpServer};
use log::{error, info};

use ptg_service::config::Config;
use ptg_service::services::ViewedTeamsService;
use ptg_service::utils::{api_key_middleware::ApiKeyAuth, db};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::load().map_err(|e| {
        error!("❌ {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
    })?;

    let pool = db::connect(&config)
        .await
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;

    let address = config.bind_address.clone();
    info!(
        "🚀 Server started at {} (env: {}, version: {})",
        address, config.app_env, config.app_version
    );
    info!("Viewed teams limit: {}", config.viewed_teams_limit);

    let config = web::Data::new(config);
    let service = web::Data::new(ViewedTeamsService::new(pool.clone()));
    let pool = web::Data::new(pool);

    HttpServer::new(move || {
        App::new()
            .app_data(config.clone())
            .app_data(pool.clone())
            .app_data(service.clone())
            .wrap(ApiKeyAuth)
            .wrap(Logger::default())
            .configure(ptg_service::configure_app)
    })
        .bind(address)?
        .run()
        .await
}
