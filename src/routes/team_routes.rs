// teamflow-service/src/routes/team_routes.rs
use crate::models::{ActivityQuery, ChangeRoleRequest, ServiceError, TeamData};
use crate::services::{activity_log, membership_service, team_service};
use crate::utils::{get_user_id_from_request, team_storage};
use actix_web::{delete, get, post, put, web, HttpRequest, HttpResponse};
use log::info;
use serde_json::json;

// Create a new team; the caller becomes its owner
#[post("/teams")]
async fn create_team(
    req: HttpRequest,
    team_data: web::Json<TeamData>,
) -> Result<HttpResponse, ServiceError> {
    let user_id = get_user_id_from_request(&req)?;

    let team = team_service::create_team(&user_id, &team_data.name)?;

    Ok(HttpResponse::Created().json(team))
}

// All teams the current user belongs to
#[get("/teams/my-teams")]
async fn my_teams(req: HttpRequest) -> Result<HttpResponse, ServiceError> {
    let user_id = get_user_id_from_request(&req)?;

    info!("📋 Fetching teams for user: {}", user_id);

    let teams = team_service::my_teams(&user_id)?;

    Ok(HttpResponse::Ok().json(teams))
}

// Get a specific team by ID
#[get("/teams/{team_id}")]
async fn get_team(req: HttpRequest, path: web::Path<String>) -> Result<HttpResponse, ServiceError> {
    let user_id = get_user_id_from_request(&req)?;
    let team_id = path.into_inner();

    let team = team_service::get_team(&team_id, &user_id)?;

    Ok(HttpResponse::Ok().json(team))
}

// Rename a team
#[put("/teams/{team_id}")]
async fn rename_team(
    req: HttpRequest,
    path: web::Path<String>,
    team_data: web::Json<TeamData>,
) -> Result<HttpResponse, ServiceError> {
    let user_id = get_user_id_from_request(&req)?;
    let team_id = path.into_inner();

    let team = team_service::rename_team(&team_id, &user_id, &team_data.name)?;

    Ok(HttpResponse::Ok().json(team))
}

// Soft-delete a team
#[delete("/teams/{team_id}")]
async fn delete_team(
    req: HttpRequest,
    path: web::Path<String>,
) -> Result<HttpResponse, ServiceError> {
    let user_id = get_user_id_from_request(&req)?;
    let team_id = path.into_inner();

    team_service::soft_delete_team(&team_id, &user_id)?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Team deleted successfully",
        "teamId": team_id
    })))
}

// Get team members with resolved identities
#[get("/teams/{team_id}/members")]
async fn get_team_members(
    req: HttpRequest,
    path: web::Path<String>,
) -> Result<HttpResponse, ServiceError> {
    let user_id = get_user_id_from_request(&req)?;
    let team_id = path.into_inner();

    team_storage::find_active_team(&team_id)?;
    membership_service::require_member(&team_id, &user_id)?;

    let members = membership_service::list_members(&team_id)?;

    Ok(HttpResponse::Ok().json(members))
}

// Remove a member from a team
#[delete("/teams/{team_id}/members/{user_id}")]
async fn remove_team_member(
    req: HttpRequest,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse, ServiceError> {
    let current_user_id = get_user_id_from_request(&req)?;
    let (team_id, target_user_id) = path.into_inner();

    membership_service::kick(&team_id, &current_user_id, &target_user_id)?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "User removed from team successfully",
        "userId": target_user_id,
        "teamId": team_id
    })))
}

// Leave a team
#[post("/teams/{team_id}/leave")]
async fn leave_team(
    req: HttpRequest,
    path: web::Path<String>,
) -> Result<HttpResponse, ServiceError> {
    let user_id = get_user_id_from_request(&req)?;
    let team_id = path.into_inner();

    membership_service::leave(&team_id, &user_id)?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Left team successfully",
        "teamId": team_id
    })))
}

// Update a team member's role
#[put("/teams/{team_id}/role")]
async fn change_member_role(
    req: HttpRequest,
    path: web::Path<String>,
    data: web::Json<ChangeRoleRequest>,
) -> Result<HttpResponse, ServiceError> {
    let current_user_id = get_user_id_from_request(&req)?;
    let team_id = path.into_inner();

    let member =
        membership_service::change_role(&team_id, &current_user_id, &data.user_id, data.new_role)?;

    Ok(HttpResponse::Ok().json(json!({
        "message": format!("User role updated to: {}", member.role),
        "userId": member.user_id,
        "teamId": team_id,
        "role": member.role
    })))
}

// Paginated activity feed, newest first
#[get("/teams/{team_id}/activities")]
async fn team_activities(
    req: HttpRequest,
    path: web::Path<String>,
    query: web::Query<ActivityQuery>,
) -> Result<HttpResponse, ServiceError> {
    let user_id = get_user_id_from_request(&req)?;
    let team_id = path.into_inner();

    team_storage::find_active_team(&team_id)?;
    membership_service::require_member(&team_id, &user_id)?;

    let page = activity_log::list_by_team(
        &team_id,
        query.page.unwrap_or(1),
        query.limit.unwrap_or(activity_log::DEFAULT_PAGE_LIMIT),
    )?;

    Ok(HttpResponse::Ok().json(page))
}

// Register all team routes. my-teams has to land before the {team_id}
// matcher.
pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(create_team)
        .service(my_teams)
        .service(get_team_members)
        .service(team_activities)
        .service(get_team)
        .service(rename_team)
        .service(delete_team)
        .service(remove_team_member)
        .service(leave_team)
        .service(change_member_role);
}
