// teamflow-service/src/services/membership_service.rs
use crate::models::{ActivityAction, MemberView, ServiceError, TeamMember, TeamRole, UserSummary};
use crate::services::activity_log;
use crate::services::authorization::{authorize, TeamAction};
use crate::utils::{team_lock, team_storage, user_storage};
use chrono::Utc;
use log::info;
use serde_json::json;
use std::sync::PoisonError;
use uuid::Uuid;

// Membership checks double as the read-access gate: a caller without a
// membership gets Forbidden.
pub fn require_member(team_id: &str, user_id: &str) -> Result<TeamMember, ServiceError> {
    team_storage::find_member(team_id, user_id)?.ok_or(ServiceError::Forbidden)
}

// Internal entry point used by team creation and invitation acceptance.
// Callers hold the team lock.
pub fn add_member(
    team_id: &str,
    user_id: &str,
    role: TeamRole,
) -> Result<TeamMember, ServiceError> {
    let mut members = team_storage::load_members(team_id)?;

    if members.iter().any(|m| m.user_id == user_id) {
        return Err(ServiceError::Conflict(
            "User is already a member of the team".to_string(),
        ));
    }

    let member = TeamMember {
        id: Uuid::new_v4().to_string(),
        user_id: user_id.to_string(),
        team_id: team_id.to_string(),
        role,
        joined_at: Utc::now(),
    };

    members.push(member.clone());
    team_storage::store_members(team_id, &members)?;

    info!("✅ User {} added to team {} as {}", user_id, team_id, role);

    Ok(member)
}

// Remove another member from the team
pub fn kick(team_id: &str, actor_id: &str, target_user_id: &str) -> Result<(), ServiceError> {
    let lock = team_lock::lock_team(team_id);
    let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);

    team_storage::find_active_team(team_id)?;
    let actor = require_member(team_id, actor_id)?;

    let mut members = team_storage::load_members(team_id)?;
    let target = members
        .iter()
        .find(|m| m.user_id == target_user_id)
        .ok_or(ServiceError::NotFound)?;

    if !authorize(actor.role, TeamAction::KickMember { target: target.role }) {
        return Err(ServiceError::Forbidden);
    }

    members.retain(|m| m.user_id != target_user_id);
    team_storage::store_members(team_id, &members)?;

    activity_log::append(
        team_id,
        ActivityAction::MemberKicked,
        actor_id,
        Some(target_user_id),
        json!({}),
    )?;

    info!("🗑️ User {} removed from team {} by {}", target_user_id, team_id, actor_id);

    Ok(())
}

// Leave the team voluntarily. The owner cannot leave: ownership has to be
// resolved first by deleting the team.
pub fn leave(team_id: &str, user_id: &str) -> Result<(), ServiceError> {
    let lock = team_lock::lock_team(team_id);
    let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);

    team_storage::find_active_team(team_id)?;
    let member = require_member(team_id, user_id)?;

    if !authorize(member.role, TeamAction::LeaveTeam) {
        return Err(ServiceError::Forbidden);
    }

    let mut members = team_storage::load_members(team_id)?;
    members.retain(|m| m.user_id != user_id);
    team_storage::store_members(team_id, &members)?;

    activity_log::append(team_id, ActivityAction::MemberLeft, user_id, None, json!({}))?;

    info!("👋 User {} left team {}", user_id, team_id);

    Ok(())
}

// Change another member's role
pub fn change_role(
    team_id: &str,
    actor_id: &str,
    target_user_id: &str,
    new_role: TeamRole,
) -> Result<TeamMember, ServiceError> {
    let lock = team_lock::lock_team(team_id);
    let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);

    team_storage::find_active_team(team_id)?;
    let actor = require_member(team_id, actor_id)?;

    let mut members = team_storage::load_members(team_id)?;
    let target = members
        .iter_mut()
        .find(|m| m.user_id == target_user_id)
        .ok_or(ServiceError::NotFound)?;

    if !authorize(
        actor.role,
        TeamAction::ChangeRole {
            target: target.role,
            new_role,
        },
    ) {
        return Err(ServiceError::Forbidden);
    }

    let old_role = target.role;
    target.role = new_role;
    let updated = target.clone();
    team_storage::store_members(team_id, &members)?;

    activity_log::append(
        team_id,
        ActivityAction::RoleChanged,
        actor_id,
        Some(target_user_id),
        json!({ "from": old_role.as_str(), "to": new_role.as_str() }),
    )?;

    info!(
        "🔄 Role of {} in team {} changed {} -> {}",
        target_user_id, team_id, old_role, new_role
    );

    Ok(updated)
}

// Member list with identities resolved through identity lookup
pub fn list_members(team_id: &str) -> Result<Vec<MemberView>, ServiceError> {
    let members = team_storage::load_members(team_id)?;
    let mut views = Vec::with_capacity(members.len());

    for member in members {
        let user = user_storage::find_user_by_id(&member.user_id)?
            .map(|u| u.summary())
            .unwrap_or_else(|| UserSummary {
                id: member.user_id.clone(),
                name: "Unknown user".to_string(),
                email: String::new(),
                profile_image: None,
            });

        views.push(MemberView {
            id: member.id,
            user_id: user,
            role: member.role,
            joined_at: member.joined_at,
        });
    }

    Ok(views)
}
