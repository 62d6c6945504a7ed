
use actix_web::{http::StatusCode, test::TestRequest};
use serde_json::json;
use test_utils::*;

#[actix_rt::test]
async fn login_returns_bearer_tokens() {
    let app = TestApp::spawn().await;

    let auth = app.login_admin().await;

    assert!(!auth.access_token.is_empty());
    assert!(!auth.refresh_token.is_empty());
    assert_eq!(auth.token_type, "Bearer");
}

#[actix_rt::test]
async fn wrong_password_and_unknown_email_are_unauthorized() {
    let app = TestApp::spawn().await;

    let wrong_password = app.login(ADMIN_EMAIL, "not-the-password").await;
    assert_eq!(wrong_password.status, StatusCode::UNAUTHORIZED);

    let unknown = app.login("nobody@portal.com", ADMIN_PASSWORD).await;
    assert_eq!(unknown.status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password.body, unknown.body);
}

#[actix_rt::test]
async fn me_returns_profile_without_password_hash() {
    let app = TestApp::spawn().await;
    let auth = app.login_admin().await;

    let response = app.get_as("/api/v1/auth/me", &auth.access_token).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["email"], ADMIN_EMAIL);
    assert_eq!(response.body["is_admin"], true);
    assert!(response.body.get("password_hash").is_none());
}

#[actix_rt::test]
async fn protected_endpoints_require_a_token() {
    let app = TestApp::spawn().await;

    let missing = app.get("/api/v1/auth/me").await;
    assert_eq!(missing.status, StatusCode::UNAUTHORIZED);

    let garbage = app.get_as("/api/v1/auth/me", "not.a.jwt").await;
    assert_eq!(garbage.status, StatusCode::UNAUTHORIZED);
}

#[actix_rt::test]
async fn refresh_token_is_single_use() {
    let app = TestApp::spawn().await;
    let auth = app.login_admin().await;
    let body = json!({ "refresh_token": auth.refresh_token });

    let first = app
        .send(TestRequest::post().uri("/api/v1/auth/refresh-token").set_json(&body))
        .await;
    assert_eq!(first.status, StatusCode::OK);
    assert!(first.body["access_token"].is_string());

    let replay = app
        .send(TestRequest::post().uri("/api/v1/auth/refresh-token").set_json(&body))
        .await;
    assert_eq!(replay.status, StatusCode::UNAUTHORIZED);
}

#[actix_rt::test]
async fn access_token_is_not_a_refresh_token() {
    let app = TestApp::spawn().await;
    let auth = app.login_admin().await;

    let response = app
        .send(
            TestRequest::post()
                .uri("/api/v1/auth/refresh-token")
                .set_json(json!({ "refresh_token": auth.access_token })),
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[actix_rt::test]
async fn logout_revokes_both_tokens() {
    let app = TestApp::spawn().await;
    let auth = app.login_admin().await;

    let logout = app
        .post_json_as(
            "/api/v1/auth/logout",
            &auth.access_token,
            &json!({ "refresh_token": auth.refresh_token }),
        )
        .await;
    assert_eq!(logout.status, StatusCode::OK);

    let me = app.get_as("/api/v1/auth/me", &auth.access_token).await;
    assert_eq!(me.status, StatusCode::UNAUTHORIZED);

    let refresh = app
        .send(
            TestRequest::post()
                .uri("/api/v1/auth/refresh-token")
                .set_json(json!({ "refresh_token": auth.refresh_token })),
        )
        .await;
    assert_eq!(refresh.status, StatusCode::UNAUTHORIZED);
}

#[actix_rt::test]
async fn logout_rejects_another_users_refresh_token() {
    let app = TestApp::spawn().await;
    let admin = app.login_admin().await;
    let editor = app.login_regular_user().await;

    let response = app
        .post_json_as(
            "/api/v1/auth/logout",
            &admin.access_token,
            &json!({ "refresh_token": editor.refresh_token }),
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    let still_valid = app.get_as("/api/v1/auth/me", &admin.access_token).await;
    assert_eq!(still_valid.status, StatusCode::OK);
}

#[actix_rt::test]
async fn non_admin_is_forbidden_from_back_office() {
    let app = TestApp::spawn().await;
    let editor = app.login_regular_user().await;

    let me = app.get_as("/api/v1/auth/me", &editor.access_token).await;
    assert_eq!(me.status, StatusCode::OK);
    assert_eq!(me.body["is_admin"], false);

    let dashboard = app.get_as("/api/v1/admin/dashboard", &editor.access_token).await;
    assert_eq!(dashboard.status, StatusCode::FORBIDDEN);
}

#[actix_rt::test]
async fn malformed_json_is_a_bad_request() {
    let app = TestApp::spawn().await;

    let response = app
        .send(
            TestRequest::post()
                .uri("/api/v1/auth/login")
                .insert_header(("Content-Type", "application/json"))
                .set_payload("{\"email\":"),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.body["error"].as_str().unwrap().starts_with("JSON payload error"));
}
