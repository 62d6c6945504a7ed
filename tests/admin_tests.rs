
use actix_web::http::StatusCode;
use serde_json::json;
use test_utils::*;

#[actix_rt::test]
async fn scholarship_crud_round_trip() {
    let app = TestApp::spawn().await;
    let token = app.login_admin().await.access_token;

    let created = app
        .post_json_as("/api/v1/admin/scholarships", &token, &scholarship_form("Trinity PhD Award"))
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
    let id = created.body["id"].as_i64().unwrap();
    assert_eq!(created.body["public_url"], format!("/api/v1/scholarships/{id}"));

    let public = app.get(&format!("/api/v1/scholarships/{id}")).await;
    assert_eq!(public.status, StatusCode::OK);
    assert_eq!(public.body["scholarship"]["currency"], "USD");

    let mut form = scholarship_form("Trinity PhD Award (2026)");
    form["is_active"] = json!(false);
    let updated = app
        .put_json_as(&format!("/api/v1/admin/scholarships/{id}"), &token, &form)
        .await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.body["title"], "Trinity PhD Award (2026)");

    let hidden = app.get(&format!("/api/v1/scholarships/{id}")).await;
    assert_eq!(hidden.status, StatusCode::NOT_FOUND);

    let admin_view = app.get_as(&format!("/api/v1/admin/scholarships/{id}"), &token).await;
    assert_eq!(admin_view.status, StatusCode::OK);
    assert_eq!(admin_view.body["is_active"], false);

    let deleted = app.delete_as(&format!("/api/v1/admin/scholarships/{id}"), &token).await;
    assert_eq!(deleted.status, StatusCode::NO_CONTENT);

    let gone = app.get_as(&format!("/api/v1/admin/scholarships/{id}"), &token).await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn invalid_scholarship_form_lists_field_errors() {
    let app = TestApp::spawn().await;
    let token = app.login_admin().await.access_token;

    let mut form = scholarship_form("   ");
    form["amount"] = json!("-5");
    form["application_url"] = json!("not a url");

    let response = app.post_json_as("/api/v1/admin/scholarships", &token, &form).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    let fields: Vec<_> = response.body["details"].as_array().unwrap().iter()
        .map(|e| e["field"].as_str().unwrap().to_string())
        .collect();
    assert!(fields.contains(&"title".to_string()));
    assert!(fields.contains(&"amount".to_string()));
    assert!(fields.contains(&"application_url".to_string()));
}

#[actix_rt::test]
async fn scholarship_notes_are_admin_only_and_bounded() {
    let app = TestApp::spawn().await;
    let token = app.login_admin().await.access_token;
    let id = app.insert_scholarship(ScholarshipSeed::new("Noted"));
    let uri = format!("/api/v1/admin/scholarships/{id}/notes");

    let saved = app.put_json_as(&uri, &token, &json!({ "admin_notes": "Call the sponsor" })).await;
    assert_eq!(saved.status, StatusCode::OK);
    assert_eq!(saved.body["admin_notes"], "Call the sponsor");

    let too_long = app.put_json_as(&uri, &token, &json!({ "admin_notes": "x".repeat(1001) })).await;
    assert_eq!(too_long.status, StatusCode::BAD_REQUEST);

    let anonymous = app.send(
        actix_web::test::TestRequest::put().uri(&uri).set_json(json!({ "admin_notes": "hi" }))
    ).await;
    assert_eq!(anonymous.status, StatusCode::UNAUTHORIZED);
}

#[actix_rt::test]
async fn page_lifecycle_with_derived_slug_and_sanitized_output() {
    let app = TestApp::spawn().await;
    let token = app.login_admin().await.access_token;

    let created = app
        .post_json_as(
            "/api/v1/admin/pages",
            &token,
            &json!({
                "title": "Study in Ireland",
                "content_html": "<p>Hello</p><script>alert(1)</script>",
                "is_published": false
            }),
        )
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.body["slug"], "study-in-ireland");
    let id = created.body["id"].as_i64().unwrap();

    let draft = app.get("/api/v1/pages/study-in-ireland").await;
    assert_eq!(draft.status, StatusCode::NOT_FOUND);

    let published = app
        .put_json_as(
            &format!("/api/v1/admin/pages/{id}"),
            &token,
            &json!({
                "slug": "study-in-ireland",
                "title": "Study in Ireland",
                "content_html": "<p>Hello</p><script>alert(1)</script>",
                "is_published": true
            }),
        )
        .await;
    assert_eq!(published.status, StatusCode::OK);

    let public = app.get("/api/v1/pages/study-in-ireland").await;
    assert_eq!(public.status, StatusCode::OK);
    let html = public.body["content_html"].as_str().unwrap();
    assert!(html.contains("<p>Hello</p>"));
    assert!(!html.contains("script"));

    let deleted = app.delete_as(&format!("/api/v1/admin/pages/{id}"), &token).await;
    assert_eq!(deleted.status, StatusCode::NO_CONTENT);
    assert_eq!(app.get("/api/v1/pages/study-in-ireland").await.status, StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn duplicate_page_slug_is_a_conflict() {
    let app = TestApp::spawn().await;
    let token = app.login_admin().await.access_token;

    let response = app
        .post_json_as(
            "/api/v1/admin/pages",
            &token,
            &json!({ "slug": "faq", "title": "Another FAQ", "content_html": "<p>dup</p>" }),
        )
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
}

#[actix_rt::test]
async fn default_pages_are_seeded_and_public() {
    let app = TestApp::spawn().await;
    let token = app.login_admin().await.access_token;

    let listing = app.get_as("/api/v1/admin/pages", &token).await;
    assert_eq!(listing.status, StatusCode::OK);
    assert_eq!(listing.body["total"], 4);

    for slug in ["home", "faq", "privacy-policy", "terms-of-service"] {
        let page = app.get(&format!("/api/v1/pages/{slug}")).await;
        assert_eq!(page.status, StatusCode::OK, "{slug}");
    }
}

#[actix_rt::test]
async fn dashboard_summarizes_the_store() {
    let app = TestApp::spawn().await;
    let token = app.login_admin().await.access_token;
    app.insert_scholarship(ScholarshipSeed::new("Open"));
    app.insert_scholarship(ScholarshipSeed::new("Closed").deadline_in(chrono::Duration::days(-3)));
    app.send(
        actix_web::test::TestRequest::post().uri("/api/v1/contact").set_json(contact_form("Ada"))
    ).await;

    let response = app.get_as("/api/v1/admin/dashboard", &token).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["total_scholarships"], 2);
    assert_eq!(response.body["active_scholarships"], 1);
    assert_eq!(response.body["published_pages"], 4);
    assert_eq!(response.body["unread_inquiries"], 1);
    assert_eq!(response.body["recent_inquiries"].as_array().unwrap().len(), 1);
    assert_eq!(response.body["recent_scholarships"].as_array().unwrap().len(), 2);
}
