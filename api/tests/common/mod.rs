//! Shared fixtures for the HTTP tests

#![allow(dead_code)]

use actix_web::{http::header, test::TestRequest, web};
use serde_json::json;
use std::sync::Arc;

use uh_api::AppState;
use uh_core::repositories::{InMemoryTokenRepository, InMemoryUserRepository};
use uh_core::services::CreateUser;
use uh_core::User;
use uh_shared::{AppConfig, Environment};

pub type TestState = AppState<InMemoryUserRepository, InMemoryTokenRepository>;

pub const PASSWORD: &str = "password123";

/// Staging defaults with a cheap bcrypt cost
pub fn test_config() -> AppConfig {
    let mut config = AppConfig::for_environment(Environment::Staging);
    config.auth.password.bcrypt_cost = 4;
    config.auth.throttle.max_attempts = 3;
    config
}

pub fn test_state(config: &AppConfig) -> web::Data<TestState> {
    web::Data::new(AppState::new(
        Arc::new(InMemoryUserRepository::new()),
        Arc::new(InMemoryTokenRepository::new()),
        &config.auth,
    ))
}

pub async fn seed_user(state: &TestState, name: &str, email: &str) -> User {
    state
        .user_service
        .create(CreateUser {
            name: name.to_string(),
            email: email.to_string(),
            password: PASSWORD.to_string(),
        })
        .await
        .unwrap()
}

/// Plain-text bearer token for the user
pub async fn issue_token(state: &TestState, user_id: i64) -> String {
    let (_, plain) = state.token_service.issue(user_id, "api-token").await.unwrap();
    plain.to_string()
}

pub fn bearer(token: &str) -> (header::HeaderName, String) {
    (header::AUTHORIZATION, format!("Bearer {}", token))
}

pub fn login_request(email: &str, password: &str) -> TestRequest {
    TestRequest::post()
        .uri("/login")
        .set_json(json!({ "email": email, "password": password }))
}
