use super::common;
use crate::models::TeamRole;
use actix_web::http::StatusCode;
use actix_web::test;
use serde_json::{json, Value};

#[actix_rt::test]
async fn test_create_team_assigns_owner_and_records_creation() {
    let app = test::init_service(common::build_app()).await;
    let (alice, token) = common::create_user("alice");

    let req = common::post_json("/teams", &token, json!({ "name": "Platform" })).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let team: Value = test::read_body_json(resp).await;
    assert_eq!(team["name"], "Platform");
    assert_eq!(team["ownerId"], alice.id.as_str());
    let team_id = team["_id"].as_str().unwrap().to_string();

    // Exactly one membership, the owner's
    let req = common::get_authed(&format!("/teams/{}/members", team_id), &token).to_request();
    let members: Value = test::call_and_read_body_json(&app, req).await;
    let members = members.as_array().unwrap();
    assert_eq!(members.len(), 1);
    assert_eq!(members[0]["role"], "OWNER");
    assert_eq!(members[0]["userId"]["_id"], alice.id.as_str());

    // One TEAM_CREATED record in the feed
    let req = common::get_authed(&format!("/teams/{}/activities", team_id), &token).to_request();
    let feed: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(feed["total"], 1);
    assert_eq!(feed["activities"][0]["action"], "TEAM_CREATED");
    assert_eq!(feed["activities"][0]["performedBy"]["_id"], alice.id.as_str());
}

#[actix_rt::test]
async fn test_team_name_length_is_validated() {
    let app = test::init_service(common::build_app()).await;
    let (_, token) = common::create_user("alice");

    let req = common::post_json("/teams", &token, json!({ "name": "" })).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req =
        common::post_json("/teams", &token, json!({ "name": "x".repeat(51) })).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["message"].as_str().unwrap().contains("name"));
}

#[actix_rt::test]
async fn test_rename_is_owner_only_and_audited() {
    let app = test::init_service(common::build_app()).await;
    let (alice, alice_token) = common::create_user("alice");
    let (bob, bob_token) = common::create_user("bob");
    let team_id = common::seed_team(&alice, "Old Name");
    common::seed_member(&team_id, &bob, TeamRole::Admin);

    // Admins cannot rename
    let req = common::put_json(
        &format!("/teams/{}", team_id),
        &bob_token,
        json!({ "name": "Hijacked" }),
    )
    .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    // The owner can
    let req = common::put_json(
        &format!("/teams/{}", team_id),
        &alice_token,
        json!({ "name": "New Name" }),
    )
    .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let team: Value = test::read_body_json(resp).await;
    assert_eq!(team["name"], "New Name");

    let req =
        common::get_authed(&format!("/teams/{}/activities", team_id), &alice_token).to_request();
    let feed: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(feed["activities"][0]["action"], "TEAM_RENAMED");
    assert_eq!(feed["activities"][0]["metadata"]["from"], "Old Name");
    assert_eq!(feed["activities"][0]["metadata"]["to"], "New Name");
}

#[actix_rt::test]
async fn test_soft_deleted_team_becomes_unreachable() {
    let app = test::init_service(common::build_app()).await;
    let (alice, token) = common::create_user("alice");
    let team_id = common::seed_team(&alice, "Doomed");

    let req = common::delete_authed(&format!("/teams/{}", team_id), &token).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    // Every normal query now reports the team as missing
    for uri in [
        format!("/teams/{}", team_id),
        format!("/teams/{}/members", team_id),
        format!("/teams/{}/activities", team_id),
    ] {
        let req = common::get_authed(&uri, &token).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND, "{} should be gone", uri);
    }

    // And it no longer shows up in the caller's team list
    let req = common::get_authed("/teams/my-teams", &token).to_request();
    let teams: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(teams.as_array().unwrap().len(), 0);

    // Deleting twice is NotFound, not a second delete
    let req = common::delete_authed(&format!("/teams/{}", team_id), &token).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn test_delete_requires_owner() {
    let app = test::init_service(common::build_app()).await;
    let (alice, _) = common::create_user("alice");
    let (bob, bob_token) = common::create_user("bob");
    let team_id = common::seed_team(&alice, "Platform");
    common::seed_member(&team_id, &bob, TeamRole::Admin);

    let req = common::delete_authed(&format!("/teams/{}", team_id), &bob_token).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[actix_rt::test]
async fn test_team_reads_require_membership() {
    let app = test::init_service(common::build_app()).await;
    let (alice, _) = common::create_user("alice");
    let (_, mallory_token) = common::create_user("mallory");
    let team_id = common::seed_team(&alice, "Private");

    for uri in [
        format!("/teams/{}", team_id),
        format!("/teams/{}/members", team_id),
        format!("/teams/{}/activities", team_id),
    ] {
        let req = common::get_authed(&uri, &mallory_token).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN, "{} should be forbidden", uri);
    }
}

#[actix_rt::test]
async fn test_my_teams_embeds_team_and_role() {
    let app = test::init_service(common::build_app()).await;
    let (alice, _) = common::create_user("alice");
    let (bob, bob_token) = common::create_user("bob");
    let team_id = common::seed_team(&alice, "Shared");
    common::seed_team(&alice, "Not Bob's");
    common::seed_member(&team_id, &bob, TeamRole::Member);

    let req = common::get_authed("/teams/my-teams", &bob_token).to_request();
    let teams: Value = test::call_and_read_body_json(&app, req).await;
    let teams = teams.as_array().unwrap();
    assert_eq!(teams.len(), 1);
    assert_eq!(teams[0]["userRole"], "MEMBER");
    assert_eq!(teams[0]["teamId"]["_id"], team_id.as_str());
    assert_eq!(teams[0]["teamId"]["name"], "Shared");
    assert_eq!(teams[0]["teamId"]["ownerId"], alice.id.as_str());
}
