//! Bearer token middleware tests against the real routes

mod common;

use actix_web::{http::header, http::StatusCode, test, web};
use chrono::{Duration, Utc};
use serde_json::Value;
use std::sync::Arc;

use common::{issue_token, seed_user, test_config, test_state, TestState};
use uh_api::{create_app, AppState};
use uh_core::repositories::{InMemoryTokenRepository, InMemoryUserRepository, TokenRepository};
use uh_core::services::TokenService;
use uh_core::NewAccessToken;

async fn current_user_status(state: web::Data<TestState>, authorization: Option<String>) -> StatusCode {
    let config = test_config();
    let app = test::init_service(create_app(state, &config)).await;

    let mut req = test::TestRequest::get().uri("/user");
    if let Some(value) = authorization {
        req = req.insert_header((header::AUTHORIZATION, value));
    }
    test::call_service(&app, req.to_request()).await.status()
}

#[actix_web::test]
async fn test_missing_header_is_rejected() {
    let config = test_config();
    let state = test_state(&config);
    let app = test::init_service(create_app(state, &config)).await;

    let req = test::TestRequest::get().uri("/user").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        resp.headers().get(header::WWW_AUTHENTICATE).unwrap(),
        "Bearer"
    );
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Unauthenticated.");
}

#[actix_web::test]
async fn test_wrong_scheme_and_malformed_tokens_are_rejected() {
    let config = test_config();
    let state = test_state(&config);
    let user = seed_user(&state, "Jane", "jane@example.com").await;
    let token = issue_token(&state, user.id).await;

    let (id, _) = token.split_once('|').unwrap();
    let candidates = [
        format!("Basic {}", token),
        "Bearer".to_string(),
        "Bearer not-a-token".to_string(),
        format!("Bearer {}|{}", id, "x".repeat(40)),
        format!("Bearer 999|{}", "x".repeat(40)),
    ];

    for value in candidates {
        let status = current_user_status(state.clone(), Some(value.clone())).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{}", value);
    }
}

#[actix_web::test]
async fn test_scheme_is_case_insensitive() {
    let config = test_config();
    let state = test_state(&config);
    let user = seed_user(&state, "Jane", "jane@example.com").await;
    let token = issue_token(&state, user.id).await;

    let status = current_user_status(state, Some(format!("bearer {}", token))).await;
    assert_eq!(status, StatusCode::OK);
}

#[actix_web::test]
async fn test_expired_token_is_rejected() {
    let config = test_config();
    let tokens = Arc::new(InMemoryTokenRepository::new());
    let state = web::Data::new(AppState::new(
        Arc::new(InMemoryUserRepository::new()),
        tokens.clone(),
        &config.auth,
    ));
    let user = seed_user(&state, "Jane", "jane@example.com").await;

    let secret = TokenService::<InMemoryTokenRepository>::generate_secret();
    let stored = tokens
        .create(NewAccessToken {
            user_id: user.id,
            name: "api-token".to_string(),
            token_hash: TokenService::<InMemoryTokenRepository>::hash_secret(&secret),
            expires_at: Some(Utc::now() - Duration::minutes(1)),
        })
        .await
        .unwrap();

    let status = current_user_status(state, Some(format!("Bearer {}|{}", stored.id, secret))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_authenticated_request_touches_token() {
    let config = test_config();
    let tokens = Arc::new(InMemoryTokenRepository::new());
    let state = web::Data::new(AppState::new(
        Arc::new(InMemoryUserRepository::new()),
        tokens.clone(),
        &config.auth,
    ));
    let user = seed_user(&state, "Jane", "jane@example.com").await;
    let token = issue_token(&state, user.id).await;
    let token_id: i64 = token.split_once('|').unwrap().0.parse().unwrap();

    assert!(tokens.find_by_id(token_id).await.unwrap().unwrap().last_used_at.is_none());

    let status = current_user_status(state, Some(format!("Bearer {}", token))).await;
    assert_eq!(status, StatusCode::OK);

    let stored = tokens.find_by_id(token_id).await.unwrap().unwrap();
    assert!(stored.last_used_at.is_some());
}

#[actix_web::test]
async fn test_public_routes_ignore_authorization() {
    let config = test_config();
    let state = test_state(&config);
    let app = test::init_service(create_app(state, &config)).await;

    let req = test::TestRequest::get()
        .uri("/users")
        .insert_header((header::AUTHORIZATION, "Bearer garbage"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
}
