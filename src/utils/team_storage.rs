// teamflow-service/src/utils/team_storage.rs
use crate::models::{ServiceError, Team, TeamMember};
use log::{error, warn};
use std::fs;
use std::path::Path;

const TEAMS_DIR: &str = "./storage/teams";
const MEMBERS_DIR: &str = "./storage/members";

fn ensure_dir(dir: &str) -> Result<(), ServiceError> {
    let path = Path::new(dir);
    if !path.exists() {
        fs::create_dir_all(path).map_err(|e| {
            error!("Failed to create storage directory {}: {:?}", dir, e);
            ServiceError::InternalServerError
        })?;
    }
    Ok(())
}

// Save a team to storage
pub fn save_team(team: &Team) -> Result<(), ServiceError> {
    ensure_dir(TEAMS_DIR)?;
    let team_path = format!("{}/{}.json", TEAMS_DIR, team.id);

    let team_json = serde_json::to_string_pretty(team).map_err(|e| {
        error!("Failed to serialize team: {:?}", e);
        ServiceError::InternalServerError
    })?;

    fs::write(&team_path, team_json).map_err(|e| {
        error!("Failed to save team: {:?}", e);
        ServiceError::InternalServerError
    })
}

// Find a team by ID, soft-deleted ones included
pub fn find_team_by_id(team_id: &str) -> Result<Option<Team>, ServiceError> {
    let team_path = format!("{}/{}.json", TEAMS_DIR, team_id);
    let path = Path::new(&team_path);

    if !path.exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(path).map_err(|e| {
        error!("Failed to read team file: {:?}", e);
        ServiceError::InternalServerError
    })?;

    let team: Team = serde_json::from_str(&content).map_err(|e| {
        error!("Failed to parse team JSON: {:?}", e);
        ServiceError::InternalServerError
    })?;

    Ok(Some(team))
}

// A soft-deleted team is invisible to normal queries
pub fn find_active_team(team_id: &str) -> Result<Team, ServiceError> {
    match find_team_by_id(team_id)? {
        Some(team) if !team.is_deleted => Ok(team),
        _ => Err(ServiceError::NotFound),
    }
}

fn members_path(team_id: &str) -> String {
    format!("{}/{}.json", MEMBERS_DIR, team_id)
}

// Load the membership set of a team; a team with no file has no members
pub fn load_members(team_id: &str) -> Result<Vec<TeamMember>, ServiceError> {
    let path_str = members_path(team_id);
    let path = Path::new(&path_str);

    if !path.exists() {
        return Ok(Vec::new());
    }

    let content = fs::read_to_string(path).map_err(|e| {
        error!("Failed to read members file: {:?}", e);
        ServiceError::InternalServerError
    })?;

    serde_json::from_str(&content).map_err(|e| {
        error!("Failed to parse members JSON: {:?}", e);
        ServiceError::InternalServerError
    })
}

// Replace the membership set of a team. Callers hold the team lock.
pub fn store_members(team_id: &str, members: &[TeamMember]) -> Result<(), ServiceError> {
    ensure_dir(MEMBERS_DIR)?;

    let members_json = serde_json::to_string_pretty(members).map_err(|e| {
        error!("Failed to serialize members: {:?}", e);
        ServiceError::InternalServerError
    })?;

    fs::write(members_path(team_id), members_json).map_err(|e| {
        error!("Failed to save members: {:?}", e);
        ServiceError::InternalServerError
    })
}

pub fn find_member(team_id: &str, user_id: &str) -> Result<Option<TeamMember>, ServiceError> {
    Ok(load_members(team_id)?
        .into_iter()
        .find(|m| m.user_id == user_id))
}

// All memberships held by a user, across teams
pub fn memberships_for_user(user_id: &str) -> Result<Vec<TeamMember>, ServiceError> {
    ensure_dir(MEMBERS_DIR)?;
    let mut memberships = Vec::new();

    for entry_result in fs::read_dir(MEMBERS_DIR).map_err(|e| {
        error!("Failed to read members directory: {:?}", e);
        ServiceError::InternalServerError
    })? {
        let entry = entry_result.map_err(|e| {
            error!("Failed to read directory entry: {:?}", e);
            ServiceError::InternalServerError
        })?;

        let path = entry.path();
        if path.is_file() && path.extension().map_or(false, |ext| ext == "json") {
            let content = fs::read_to_string(&path).map_err(|e| {
                error!("Failed to read members file: {:?}", e);
                ServiceError::InternalServerError
            })?;

            let members: Vec<TeamMember> = match serde_json::from_str(&content) {
                Ok(members) => members,
                Err(e) => {
                    warn!("Failed to parse members JSON: {:?}", e);
                    continue;
                }
            };

            memberships.extend(members.into_iter().filter(|m| m.user_id == user_id));
        }
    }

    Ok(memberships)
}
