// teamflow-service/src/routes/invitation_routes.rs
use crate::models::{AcceptQuery, CreateInvitationRequest, ServiceError, TeamRole};
use crate::services::{invitation_service, notifier};
use crate::utils::get_user_id_from_request;
use actix_web::{post, web, HttpRequest, HttpResponse};
use log::info;
use serde_json::json;

// Invite someone to a team by email; defaults to MEMBER
#[post("/teams/{team_id}/invite")]
async fn invite_member(
    req: HttpRequest,
    path: web::Path<String>,
    data: web::Json<CreateInvitationRequest>,
) -> Result<HttpResponse, ServiceError> {
    let user_id = get_user_id_from_request(&req)?;
    let team_id = path.into_inner();

    info!("📧 Creating invitation to team: {} for email: {}", team_id, data.email);

    let invitation = invitation_service::issue(
        &team_id,
        &user_id,
        &data.email,
        data.role.unwrap_or(TeamRole::Member),
        notifier::default_notifier(),
    )?;

    Ok(HttpResponse::Created().json(invitation))
}

// Consume an invitation token; the caller joins the team at the invited role
#[post("/teams/invite/accept")]
async fn accept_invitation(
    req: HttpRequest,
    query: web::Query<AcceptQuery>,
) -> Result<HttpResponse, ServiceError> {
    let user_id = get_user_id_from_request(&req)?;

    let team = invitation_service::accept(&query.token, &user_id)?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Invitation accepted successfully",
        "team": team
    })))
}

// Register all invitation routes
pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(accept_invitation).service(invite_member);
}
