//! HTTP tests for the user resource

mod common;

use actix_web::{test, http::StatusCode};
use serde_json::{json, Value};

use common::{bearer, issue_token, seed_user, test_config, test_state, PASSWORD};
use uh_api::create_app;

#[actix_web::test]
async fn test_list_users_empty() {
    let config = test_config();
    let state = test_state(&config);
    let app = test::init_service(create_app(state, &config)).await;

    let req = test::TestRequest::get().uri("/users").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!([]));
}

#[actix_web::test]
async fn test_list_users_hides_passwords() {
    let config = test_config();
    let state = test_state(&config);
    seed_user(&state, "Jane", "jane@example.com").await;
    seed_user(&state, "John", "john@example.com").await;
    let app = test::init_service(create_app(state, &config)).await;

    let req = test::TestRequest::get().uri("/users").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    let users = body.as_array().unwrap();
    assert_eq!(users.len(), 2);
    assert_eq!(users[0]["name"], "Jane");
    assert_eq!(users[1]["email"], "john@example.com");
    assert!(users.iter().all(|u| u.get("password").is_none()));
    assert!(users[0]["created_at"].is_string());
    assert!(users[0]["email_verified_at"].is_null());
}

#[actix_web::test]
async fn test_show_user() {
    let config = test_config();
    let state = test_state(&config);
    let user = seed_user(&state, "Jane", "jane@example.com").await;
    let app = test::init_service(create_app(state, &config)).await;

    let req = test::TestRequest::get()
        .uri(&format!("/users/{}", user.id))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["id"], user.id);
    assert_eq!(body["name"], "Jane");
}

#[actix_web::test]
async fn test_show_unknown_or_non_numeric_user() {
    let config = test_config();
    let state = test_state(&config);
    let app = test::init_service(create_app(state, &config)).await;

    for uri in ["/users/999", "/users/abc"] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::NOT_FOUND, "{}", uri);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "User with that ID does not exist");
    }
}

#[actix_web::test]
async fn test_create_user() {
    let config = test_config();
    let state = test_state(&config);
    let app = test::init_service(create_app(state.clone(), &config)).await;

    let req = test::TestRequest::post()
        .uri("/user/create")
        .set_json(json!({
            "name": "  Jane Doe ",
            "email": "jane@example.com",
            "password": PASSWORD
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["name"], "Jane Doe");
    assert_eq!(body["email"], "jane@example.com");
    assert!(body.get("password").is_none());

    let stored = state.user_service.list().await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_ne!(stored[0].password_hash, PASSWORD);
}

#[actix_web::test]
async fn test_create_user_missing_fields() {
    let config = test_config();
    let state = test_state(&config);
    let app = test::init_service(create_app(state, &config)).await;

    let req = test::TestRequest::post()
        .uri("/user/create")
        .set_json(json!({ "name": "   " }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "The name field is required. (and 2 more errors)");
    assert_eq!(body["errors"]["name"][0], "The name field is required.");
    assert_eq!(body["errors"]["email"][0], "The email field is required.");
    assert_eq!(body["errors"]["password"][0], "The password field is required.");
}

#[actix_web::test]
async fn test_create_user_invalid_fields() {
    let config = test_config();
    let state = test_state(&config);
    let app = test::init_service(create_app(state, &config)).await;

    let req = test::TestRequest::post()
        .uri("/user/create")
        .set_json(json!({
            "name": "x".repeat(256),
            "email": "not-an-email",
            "password": "short"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body["errors"]["name"][0],
        "The name field must not be greater than 255 characters."
    );
    assert_eq!(
        body["errors"]["email"][0],
        "The email field must be a valid email address."
    );
    assert_eq!(
        body["errors"]["password"][0],
        "The password field must be at least 8 characters."
    );
}

#[actix_web::test]
async fn test_create_user_duplicate_email() {
    let config = test_config();
    let state = test_state(&config);
    seed_user(&state, "Jane", "jane@example.com").await;
    let app = test::init_service(create_app(state, &config)).await;

    let req = test::TestRequest::post()
        .uri("/user/create")
        .set_json(json!({
            "name": "Other Jane",
            "email": "JANE@example.com",
            "password": PASSWORD
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "The email has already been taken.");
    assert_eq!(body["errors"]["email"][0], "The email has already been taken.");
}

#[actix_web::test]
async fn test_create_user_malformed_json() {
    let config = test_config();
    let state = test_state(&config);
    let app = test::init_service(create_app(state, &config)).await;

    let req = test::TestRequest::post()
        .uri("/user/create")
        .insert_header(("content-type", "application/json"))
        .set_payload("{\"name\": ")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["errors"]["body"].is_array());
}

#[actix_web::test]
async fn test_update_user() {
    let config = test_config();
    let state = test_state(&config);
    let user = seed_user(&state, "Jane", "jane@example.com").await;
    let token = issue_token(&state, user.id).await;
    let app = test::init_service(create_app(state.clone(), &config)).await;

    let req = test::TestRequest::put()
        .uri(&format!("/users/{}", user.id))
        .insert_header(bearer(&token))
        .set_json(json!({
            "name": "Jane Smith",
            "email": "jane.smith@example.com",
            "password": "new-password"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["name"], "Jane Smith");
    assert_eq!(body["email"], "jane.smith@example.com");

    let stored = state.user_service.get(user.id).await.unwrap();
    assert_ne!(stored.password_hash, user.password_hash);
}

#[actix_web::test]
async fn test_update_user_keeps_own_email() {
    let config = test_config();
    let state = test_state(&config);
    let user = seed_user(&state, "Jane", "jane@example.com").await;
    let token = issue_token(&state, user.id).await;
    let app = test::init_service(create_app(state, &config)).await;

    let req = test::TestRequest::put()
        .uri(&format!("/users/{}", user.id))
        .insert_header(bearer(&token))
        .set_json(json!({
            "name": "Jane Renamed",
            "email": "jane@example.com",
            "password": PASSWORD
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_update_user_email_taken_by_other() {
    let config = test_config();
    let state = test_state(&config);
    let jane = seed_user(&state, "Jane", "jane@example.com").await;
    seed_user(&state, "John", "john@example.com").await;
    let token = issue_token(&state, jane.id).await;
    let app = test::init_service(create_app(state, &config)).await;

    let req = test::TestRequest::put()
        .uri(&format!("/users/{}", jane.id))
        .insert_header(bearer(&token))
        .set_json(json!({
            "name": "Jane",
            "email": "john@example.com",
            "password": PASSWORD
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["errors"]["email"][0], "The email has already been taken.");
}

#[actix_web::test]
async fn test_update_unknown_user_reports_not_found_first() {
    let config = test_config();
    let state = test_state(&config);
    let user = seed_user(&state, "Jane", "jane@example.com").await;
    let token = issue_token(&state, user.id).await;
    let app = test::init_service(create_app(state, &config)).await;

    let req = test::TestRequest::put()
        .uri("/users/999")
        .insert_header(bearer(&token))
        .set_json(json!({}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_update_user_requires_token() {
    let config = test_config();
    let state = test_state(&config);
    let user = seed_user(&state, "Jane", "jane@example.com").await;
    let app = test::init_service(create_app(state, &config)).await;

    let req = test::TestRequest::put()
        .uri(&format!("/users/{}", user.id))
        .set_json(json!({
            "name": "Jane",
            "email": "jane@example.com",
            "password": PASSWORD
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Unauthenticated.");
}

#[actix_web::test]
async fn test_update_password() {
    let config = test_config();
    let state = test_state(&config);
    let user = seed_user(&state, "Jane", "jane@example.com").await;
    let token = issue_token(&state, user.id).await;
    let app = test::init_service(create_app(state, &config)).await;

    let req = test::TestRequest::patch()
        .uri(&format!("/users/{}/password", user.id))
        .insert_header(bearer(&token))
        .set_json(json!({ "password": "brand-new-secret" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Password updated successfully");
    assert_eq!(body["user"]["id"], user.id);

    let req = common::login_request("jane@example.com", "brand-new-secret").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_update_password_too_short() {
    let config = test_config();
    let state = test_state(&config);
    let user = seed_user(&state, "Jane", "jane@example.com").await;
    let token = issue_token(&state, user.id).await;
    let app = test::init_service(create_app(state, &config)).await;

    let req = test::TestRequest::patch()
        .uri(&format!("/users/{}/password", user.id))
        .insert_header(bearer(&token))
        .set_json(json!({ "password": "short" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "The password field must be at least 8 characters.");
}

#[actix_web::test]
async fn test_delete_user_revokes_tokens() {
    let config = test_config();
    let state = test_state(&config);
    let admin = seed_user(&state, "Admin", "admin@example.com").await;
    let jane = seed_user(&state, "Jane", "jane@example.com").await;
    let admin_token = issue_token(&state, admin.id).await;
    let jane_token = issue_token(&state, jane.id).await;
    let app = test::init_service(create_app(state.clone(), &config)).await;

    let req = test::TestRequest::delete()
        .uri(&format!("/users/{}", jane.id))
        .insert_header(bearer(&admin_token))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "User deleted successfully");

    let req = test::TestRequest::get()
        .uri(&format!("/users/{}", jane.id))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::get()
        .uri("/user")
        .insert_header(bearer(&jane_token))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_delete_unknown_user() {
    let config = test_config();
    let state = test_state(&config);
    let user = seed_user(&state, "Jane", "jane@example.com").await;
    let token = issue_token(&state, user.id).await;
    let app = test::init_service(create_app(state, &config)).await;

    let req = test::TestRequest::delete()
        .uri("/users/999")
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
