// teamflow-service/src/services/invitation_service.rs
use crate::models::{
    ActivityAction, InvitationStatus, ServiceError, TeamInvitation, TeamRole, TeamView,
};
use crate::services::authorization::{authorize, TeamAction};
use crate::services::notifier::Notifier;
use crate::services::{activity_log, membership_service, team_service};
use crate::utils::validation;
use crate::utils::{invitation_storage, team_lock, team_storage, user_storage};
use chrono::Utc;
use log::{debug, info};
use serde_json::json;
use sha2::{Digest, Sha256};
use std::sync::PoisonError;
use uuid::Uuid;

// Unguessable single-use credential: 244 bits of UUID entropy hashed down
// to a 256-bit hex string.
fn generate_invite_token() -> String {
    let mut hasher = Sha256::new();
    hasher.update(Uuid::new_v4().as_bytes());
    hasher.update(Uuid::new_v4().as_bytes());
    hasher.update(
        Utc::now()
            .timestamp_nanos_opt()
            .unwrap_or_default()
            .to_be_bytes(),
    );
    format!("{:x}", hasher.finalize())
}

// Issue an invitation. A still-open invitation for the same email is
// superseded: its token stops working the moment the new one exists.
pub fn issue(
    team_id: &str,
    actor_id: &str,
    email: &str,
    role: TeamRole,
    notifier: &dyn Notifier,
) -> Result<TeamInvitation, ServiceError> {
    let lock = team_lock::lock_team(team_id);
    let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);

    let team = team_storage::find_active_team(team_id)?;
    let actor = membership_service::require_member(team_id, actor_id)?;

    validation::validate_email(email)?;
    if role == TeamRole::Owner {
        return Err(ServiceError::Validation(
            "role may not be OWNER".to_string(),
        ));
    }

    if !authorize(actor.role, TeamAction::InviteMember { proposed: role }) {
        return Err(ServiceError::Forbidden);
    }

    // Inviting someone who already sits in the team is a conflict, not a
    // second membership
    if let Some(user) = user_storage::find_user_by_email(email)? {
        if team_storage::find_member(team_id, &user.id)?.is_some() {
            return Err(ServiceError::Conflict(
                "User is already a member of the team".to_string(),
            ));
        }
    }

    if let Some(mut previous) = invitation_storage::find_pending_for_email(team_id, email)? {
        debug!(
            "Superseding invitation {} for {} on team {}",
            previous.id, email, team_id
        );
        previous.revoked_at = Some(Utc::now());
        invitation_storage::save_invitation(&previous)?;
    }

    let invitation = TeamInvitation::new(
        team_id.to_string(),
        email.to_string(),
        actor_id.to_string(),
        role,
        generate_invite_token(),
    );

    invitation_storage::save_invitation(&invitation)?;

    notifier.invitation_issued(email, &team.name, &invitation.token, invitation.expires_at);

    activity_log::append(
        team_id,
        ActivityAction::MemberInvited,
        actor_id,
        None,
        json!({ "email": email, "role": role.as_str() }),
    )?;

    info!("✅ Invitation {} issued for {} to team {}", invitation.id, email, team_id);

    Ok(invitation)
}

// Consume an invitation token. At most one acceptance ever succeeds: the
// whole check-and-consume runs under the team lock, so racing callers
// observe Conflict.
pub fn accept(token: &str, caller_user_id: &str) -> Result<TeamView, ServiceError> {
    let found = invitation_storage::find_by_token(token)?.ok_or(ServiceError::NotFound)?;

    let lock = team_lock::lock_team(&found.team_id);
    let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);

    // Re-read under the lock; a racing accept may have consumed it already
    let mut invitation = invitation_storage::find_by_token(token)?.ok_or(ServiceError::NotFound)?;

    match invitation.status() {
        InvitationStatus::Accepted => {
            return Err(ServiceError::Conflict(
                "Invitation has already been used".to_string(),
            ))
        }
        // A superseded or cascaded-away token is indistinguishable from an
        // invalid one
        InvitationStatus::Revoked => return Err(ServiceError::NotFound),
        InvitationStatus::Expired => {
            return Err(ServiceError::Gone("Invitation has expired".to_string()))
        }
        InvitationStatus::Pending => {}
    }

    let team = team_storage::find_active_team(&invitation.team_id)?;

    if team_storage::find_member(&invitation.team_id, caller_user_id)?.is_some() {
        return Err(ServiceError::Conflict(
            "User is already a member of the team".to_string(),
        ));
    }

    invitation.accepted_at = Some(Utc::now());
    invitation.accepted_by = Some(caller_user_id.to_string());
    invitation_storage::save_invitation(&invitation)?;

    membership_service::add_member(&invitation.team_id, caller_user_id, invitation.role)?;

    activity_log::append(
        &invitation.team_id,
        ActivityAction::MemberJoined,
        caller_user_id,
        None,
        json!({ "role": invitation.role.as_str() }),
    )?;

    info!(
        "✅ Invitation {} accepted by {} on team {}",
        invitation.id, caller_user_id, invitation.team_id
    );

    team_service::view(team)
}
