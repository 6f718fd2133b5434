// teamflow-service/src/services/team_service.rs
use crate::models::{
    ActivityAction, InvitationStatus, MyTeamView, ServiceError, Team, TeamRole, TeamView,
};
use crate::services::authorization::{authorize, TeamAction};
use crate::services::{activity_log, membership_service};
use crate::utils::validation;
use crate::utils::{invitation_storage, team_lock, team_storage};
use chrono::Utc;
use log::{error, info};
use serde_json::json;
use std::sync::PoisonError;
use uuid::Uuid;

// Wire shape with the derived ownerId: the owner is whoever holds the
// single OWNER membership.
pub fn view(team: Team) -> Result<TeamView, ServiceError> {
    let members = team_storage::load_members(&team.id)?;
    let owner = members
        .iter()
        .find(|m| m.role == TeamRole::Owner)
        .ok_or_else(|| {
            error!("❌ Team {} has no owner membership", team.id);
            ServiceError::InternalServerError
        })?;

    Ok(TeamView {
        id: team.id,
        name: team.name,
        owner_id: owner.user_id.clone(),
        is_deleted: team.is_deleted,
        deleted_at: team.deleted_at,
        created_at: team.created_at,
        updated_at: team.updated_at,
    })
}

// Create a team together with its owning membership; neither is observable
// without the other.
pub fn create_team(owner_user_id: &str, name: &str) -> Result<TeamView, ServiceError> {
    let name = validation::validate_name("name", name)?;
    let team_id = Uuid::new_v4().to_string();

    info!("📝 Creating new team: {} for user: {}", name, owner_user_id);

    let lock = team_lock::lock_team(&team_id);
    let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);

    let now = Utc::now();
    let team = Team {
        id: team_id.clone(),
        name: name.clone(),
        is_deleted: false,
        deleted_at: None,
        created_at: now,
        updated_at: now,
    };

    team_storage::save_team(&team)?;
    membership_service::add_member(&team_id, owner_user_id, TeamRole::Owner)?;

    activity_log::append(
        &team_id,
        ActivityAction::TeamCreated,
        owner_user_id,
        None,
        json!({ "name": name }),
    )?;

    info!("✅ Team created successfully: {}", team_id);

    view(team)
}

// Rename a team; owner only
pub fn rename_team(
    team_id: &str,
    actor_id: &str,
    new_name: &str,
) -> Result<TeamView, ServiceError> {
    let lock = team_lock::lock_team(team_id);
    let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);

    let mut team = team_storage::find_active_team(team_id)?;
    let actor = membership_service::require_member(team_id, actor_id)?;

    if !authorize(actor.role, TeamAction::RenameTeam) {
        return Err(ServiceError::Forbidden);
    }

    let new_name = validation::validate_name("name", new_name)?;
    let old_name = team.name.clone();

    team.name = new_name.clone();
    team.updated_at = Utc::now();
    team_storage::save_team(&team)?;

    activity_log::append(
        team_id,
        ActivityAction::TeamRenamed,
        actor_id,
        None,
        json!({ "from": old_name, "to": new_name }),
    )?;

    info!("✅ Team {} renamed: {} -> {}", team_id, old_name, new_name);

    view(team)
}

// Soft-delete a team: the record stays for audit, but the team and
// everything hanging off it become unreachable through normal queries.
pub fn soft_delete_team(team_id: &str, actor_id: &str) -> Result<(), ServiceError> {
    let lock = team_lock::lock_team(team_id);
    let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);

    let mut team = team_storage::find_active_team(team_id)?;
    let actor = membership_service::require_member(team_id, actor_id)?;

    if !authorize(actor.role, TeamAction::DeleteTeam) {
        return Err(ServiceError::Forbidden);
    }

    // The deletion record has to land while the team is still reachable
    activity_log::append(team_id, ActivityAction::TeamDeleted, actor_id, None, json!({}))?;

    team.is_deleted = true;
    team.deleted_at = Some(Utc::now());
    team_storage::save_team(&team)?;

    // Open invitations die with the team
    for mut invitation in invitation_storage::get_invitations_for_team(team_id)? {
        if invitation.status() == InvitationStatus::Pending {
            invitation.revoked_at = Some(Utc::now());
            invitation_storage::save_invitation(&invitation)?;
        }
    }

    info!("🗑️ Team soft-deleted: {}", team_id);

    Ok(())
}

// Fetch a team the caller belongs to
pub fn get_team(team_id: &str, caller_id: &str) -> Result<TeamView, ServiceError> {
    let team = team_storage::find_active_team(team_id)?;
    membership_service::require_member(team_id, caller_id)?;
    view(team)
}

// All of the caller's memberships with their teams embedded
pub fn my_teams(user_id: &str) -> Result<Vec<MyTeamView>, ServiceError> {
    let mut entries = Vec::new();

    for membership in team_storage::memberships_for_user(user_id)? {
        let team = match team_storage::find_team_by_id(&membership.team_id)? {
            Some(team) if !team.is_deleted => team,
            _ => continue,
        };

        entries.push(MyTeamView {
            id: membership.id,
            team_id: view(team)?,
            user_role: membership.role,
            joined_at: membership.joined_at,
        });
    }

    entries.sort_by(|a, b| b.joined_at.cmp(&a.joined_at));

    Ok(entries)
}
