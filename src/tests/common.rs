use crate::models::{TeamRole, User};
use crate::routes::{auth_routes, invitation_routes, team_routes};
use crate::services::{membership_service, team_service};
use crate::utils::{jwt, user_storage, Authentication};
use actix_web::body::MessageBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{test, web, App, Error};
use chrono::Utc;
use uuid::Uuid;

// Mirror of the app wiring in main.rs
pub fn build_app() -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
> {
    App::new().configure(auth_routes::init_routes).service(
        web::scope("")
            .wrap(Authentication)
            .configure(auth_routes::init_protected_routes)
            .configure(team_routes::init_routes)
            .configure(invitation_routes::init_routes),
    )
}

// Persist a user and mint a bearer token for it. The hash is a
// placeholder; these users never log in through the password flow.
pub fn create_user(name: &str) -> (User, String) {
    let user = User {
        id: Uuid::new_v4().to_string(),
        name: name.to_string(),
        email: format!("{}-{}@example.com", name, Uuid::new_v4()),
        password_hash: "unused".to_string(),
        profile_image: None,
        created_at: Utc::now(),
    };
    user_storage::save_user(&user).expect("save user");
    let token = jwt::generate_token(&user).expect("mint token");
    (user, token)
}

// Team with the given owner, built through the service layer
pub fn seed_team(owner: &User, name: &str) -> String {
    team_service::create_team(&owner.id, name)
        .expect("create team")
        .id
}

pub fn seed_member(team_id: &str, user: &User, role: TeamRole) {
    membership_service::add_member(team_id, &user.id, role).expect("add member");
}

pub fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {}", token))
}

pub fn get_authed(uri: &str, token: &str) -> test::TestRequest {
    test::TestRequest::get()
        .uri(uri)
        .insert_header(bearer(token))
}

pub fn post_json(uri: &str, token: &str, body: serde_json::Value) -> test::TestRequest {
    test::TestRequest::post()
        .uri(uri)
        .insert_header(bearer(token))
        .set_json(body)
}

pub fn put_json(uri: &str, token: &str, body: serde_json::Value) -> test::TestRequest {
    test::TestRequest::put()
        .uri(uri)
        .insert_header(bearer(token))
        .set_json(body)
}

pub fn delete_authed(uri: &str, token: &str) -> test::TestRequest {
    test::TestRequest::delete()
        .uri(uri)
        .insert_header(bearer(token))
}
