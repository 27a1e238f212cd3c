#[cfg(test)]
mod tests {
    use actix_http::Request;
    use actix_web::body::MessageBody;
    use actix_web::dev::{Service, ServiceResponse};
    use actix_web::http::StatusCode;
    use actix_web::{test, web, App};
    use serde_json::{json, Value};
    use sqlx::SqlitePool;

    use crate::config::Config;
    use crate::configure_app;
    use crate::models::ViewedTeamsList;
    use crate::services::ViewedTeamsService;
    use crate::utils::api_key_middleware::{ApiKeyAuth, API_KEY_HEADER};
    use crate::utils::db::{block_viewed_teams_updates, in_memory_pool, seed_teams};

    const KEY: &str = "test-key";

    fn test_config(limit: usize) -> Config {
        Config {
            api_key: KEY.to_string(),
            app_version: "2024-06-01".to_string(),
            viewed_teams_limit: limit,
            ..Config::default()
        }
    }

    // Helper building the full app over a seeded in-memory database
    async fn create_test_app(
        limit: usize,
    ) -> (
        impl Service<
            Request,
            Response = ServiceResponse<impl MessageBody>,
            Error = actix_web::Error,
        >,
        SqlitePool,
    ) {
        let pool = in_memory_pool().await;
        seed_teams(&pool, &["a", "b", "c", "d"]).await;

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(test_config(limit)))
                .app_data(web::Data::new(pool.clone()))
                .app_data(web::Data::new(ViewedTeamsService::new(pool.clone())))
                .wrap(ApiKeyAuth)
                .configure(configure_app),
        )
        .await;

        (app, pool)
    }

    fn post_viewed(user_email: &str, team_ids: &[&str]) -> Request {
        test::TestRequest::post()
            .uri("/teams/viewed")
            .insert_header((API_KEY_HEADER, KEY))
            .set_json(&json!({ "user_email": user_email, "team_ids": team_ids }))
            .to_request()
    }

    fn get_viewed(user_email: &str) -> Request {
        test::TestRequest::get()
            .uri(&format!("/teams/viewed/{}", user_email))
            .insert_header((API_KEY_HEADER, KEY))
            .to_request()
    }

    #[actix_rt::test]
    async fn test_health_skips_api_key() {
        let (app, _pool) = create_test_app(6).await;

        let request = test::TestRequest::get().uri("/health").to_request();
        let response = test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[actix_rt::test]
    async fn test_missing_or_wrong_api_key_is_forbidden() {
        let (app, _pool) = create_test_app(6).await;

        let request = test::TestRequest::get().uri("/").to_request();
        let response = test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        let body: Value = test::read_body_json(response).await;
        assert_eq!(body["message"], "Unable to validate API key");

        let request = test::TestRequest::get()
            .uri("/teams/viewed/fan@example.com")
            .insert_header((API_KEY_HEADER, "wrong"))
            .to_request();
        let response = test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[actix_rt::test]
    async fn test_index_and_status() {
        let (app, _pool) = create_test_app(6).await;

        let request = test::TestRequest::get()
            .uri("/")
            .insert_header((API_KEY_HEADER, KEY))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, request).await;
        assert_eq!(body["message"], "Welcome to the PTG API");

        let request = test::TestRequest::get()
            .uri("/status")
            .insert_header((API_KEY_HEADER, KEY))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, request).await;
        assert_eq!(body["version"], "2024-06-01");
    }

    #[actix_rt::test]
    async fn test_unknown_user_is_not_found() {
        let (app, _pool) = create_test_app(6).await;

        let response = test::call_service(&app, get_viewed("nobody@example.com")).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body: Value = test::read_body_json(response).await;
        assert_eq!(body["message"], "No team_ids saved for user_email: nobody@example.com");
    }

    #[actix_rt::test]
    async fn test_malformed_email_is_rejected() {
        let (app, _pool) = create_test_app(6).await;

        let response = test::call_service(&app, get_viewed("not-an-email")).await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[actix_rt::test]
    async fn test_update_then_read_back() {
        let (app, _pool) = create_test_app(6).await;

        let body: Value =
            test::call_and_read_body_json(&app, post_viewed("fan@example.com", &["a", "b"])).await;
        assert_eq!(
            body["message"],
            "Most recent 2 viewed team_ids saved successfully for user_email: fan@example.com"
        );

        let list: ViewedTeamsList =
            test::call_and_read_body_json(&app, get_viewed("fan@example.com")).await;
        assert_eq!(list.viewed_teams.len(), 1);
        assert_eq!(list.viewed_teams[0].team_ids, vec!["b", "a"]);
    }

    #[actix_rt::test]
    async fn test_viewing_again_moves_team_to_front() {
        let (app, _pool) = create_test_app(6).await;

        test::call_service(&app, post_viewed("fan@example.com", &["a", "b", "c"])).await;
        let response = test::call_service(&app, post_viewed("fan@example.com", &["a"])).await;
        assert_eq!(response.status(), StatusCode::OK);

        let list: ViewedTeamsList =
            test::call_and_read_body_json(&app, get_viewed("fan@example.com")).await;
        assert_eq!(list.viewed_teams[0].team_ids, vec!["a", "c", "b"]);
    }

    #[actix_rt::test]
    async fn test_history_is_capped_at_limit() {
        let (app, _pool) = create_test_app(2).await;

        test::call_service(&app, post_viewed("fan@example.com", &["a"])).await;
        test::call_service(&app, post_viewed("fan@example.com", &["b"])).await;
        let body: Value =
            test::call_and_read_body_json(&app, post_viewed("fan@example.com", &["c"])).await;
        assert_eq!(
            body["message"],
            "Most recent 2 viewed team_ids saved successfully for user_email: fan@example.com"
        );

        let list: ViewedTeamsList =
            test::call_and_read_body_json(&app, get_viewed("fan@example.com")).await;
        assert_eq!(list.viewed_teams[0].team_ids, vec!["c", "b"]);
    }

    #[actix_rt::test]
    async fn test_invalid_update_leaves_store_untouched() {
        let (app, _pool) = create_test_app(2).await;

        let unknown = post_viewed("fan@example.com", &["a", "zz"]);
        let response = test::call_service(&app, unknown).await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body: Value = test::read_body_json(response).await;
        assert_eq!(body["message"], "The following 'team_ids' are invalid: zz");

        let oversized = post_viewed("fan@example.com", &["a", "b", "c"]);
        let response = test::call_service(&app, oversized).await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let response = test::call_service(&app, post_viewed("fan@example.com", &[])).await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let response = test::call_service(&app, get_viewed("fan@example.com")).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    fn post_raw(payload: &'static str) -> Request {
        test::TestRequest::post()
            .uri("/teams/viewed")
            .insert_header((API_KEY_HEADER, KEY))
            .insert_header(("content-type", "application/json"))
            .set_payload(payload)
            .to_request()
    }

    #[actix_rt::test]
    async fn test_wrongly_shaped_body_is_unprocessable() {
        let (app, _pool) = create_test_app(6).await;

        let response = test::call_service(&app, post_raw("{\"user_email\": 42}")).await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let missing_ids = post_raw("{\"user_email\": \"fan@example.com\"}");
        let response = test::call_service(&app, missing_ids).await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body: Value = test::read_body_json(response).await;
        assert!(body["message"].as_str().unwrap().contains("team_ids"));
    }

    #[actix_rt::test]
    async fn test_broken_json_is_bad_request() {
        let (app, _pool) = create_test_app(6).await;

        let response = test::call_service(&app, post_raw("{\"user_email\": ")).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let request = test::TestRequest::post()
            .uri("/teams/viewed")
            .insert_header((API_KEY_HEADER, KEY))
            .insert_header(("content-type", "text/plain"))
            .set_payload("user_email=fan@example.com")
            .to_request();
        let response = test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_rt::test]
    async fn test_storage_failure_is_internal_error() {
        let (app, pool) = create_test_app(6).await;

        test::call_service(&app, post_viewed("fan@example.com", &["a"])).await;
        pool.close().await;

        let response = test::call_service(&app, get_viewed("fan@example.com")).await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[actix_rt::test]
    async fn test_failed_write_is_internal_error_and_keeps_record() {
        let (app, pool) = create_test_app(6).await;

        test::call_service(&app, post_viewed("fan@example.com", &["a"])).await;
        block_viewed_teams_updates(&pool).await;

        let response = test::call_service(&app, post_viewed("fan@example.com", &["b"])).await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let list: ViewedTeamsList =
            test::call_and_read_body_json(&app, get_viewed("fan@example.com")).await;
        assert_eq!(list.viewed_teams[0].team_ids, vec!["a"]);
    }
}
