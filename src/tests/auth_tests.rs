use super::common;
use actix_web::http::StatusCode;
use actix_web::test;
use serde_json::{json, Value};
use uuid::Uuid;

#[actix_rt::test]
async fn test_signup_login_profile_roundtrip() {
    let app = test::init_service(common::build_app()).await;
    let email = format!("dana-{}@example.com", Uuid::new_v4());

    // Signup hands back a usable token
    let req = test::TestRequest::post()
        .uri("/auth/signup")
        .set_json(json!({ "name": "Dana", "email": email, "password": "hunter2!" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["token"].is_string());
    assert_eq!(body["user"]["email"], email.as_str());

    // The same address cannot register twice
    let req = test::TestRequest::post()
        .uri("/auth/signup")
        .set_json(json!({ "name": "Dana", "email": email, "password": "hunter2!" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    // Wrong password is rejected, right one yields a token
    let req = test::TestRequest::post()
        .uri("/auth/login")
        .set_json(json!({ "email": email, "password": "wrong" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::post()
        .uri("/auth/login")
        .set_json(json!({ "email": email, "password": "hunter2!" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    let token = body["token"].as_str().unwrap().to_string();

    // Profile reads and updates through the bearer token
    let req = common::get_authed("/auth/profile", &token).to_request();
    let profile: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(profile["name"], "Dana");

    let req = common::put_json(
        "/auth/profile",
        &token,
        json!({ "name": "Dana Scully", "profileImage": "https://example.com/d.png" }),
    )
    .to_request();
    let updated: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(updated["name"], "Dana Scully");
    assert_eq!(updated["profileImage"], "https://example.com/d.png");
}

#[actix_rt::test]
async fn test_signup_validates_inputs() {
    let app = test::init_service(common::build_app()).await;

    let cases = [
        json!({ "name": "", "email": "a@example.com", "password": "hunter2!" }),
        json!({ "name": "Eve", "email": "not-an-email", "password": "hunter2!" }),
        json!({ "name": "Eve", "email": "eve@example.com", "password": "short" }),
    ];

    for body in cases {
        let req = test::TestRequest::post()
            .uri("/auth/signup")
            .set_json(body.clone())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "case: {}", body);
    }
}

#[actix_rt::test]
async fn test_protected_routes_reject_missing_or_bad_tokens() {
    let app = test::init_service(common::build_app()).await;

    let req = test::TestRequest::get().uri("/auth/profile").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = common::get_authed("/teams/my-teams", "not-a-jwt").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}
