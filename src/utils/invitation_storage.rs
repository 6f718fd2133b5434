// teamflow-service/src/utils/invitation_storage.rs
use crate::models::{InvitationStatus, ServiceError, TeamInvitation};
use log::{error, warn};
use std::fs;
use std::path::Path;

const INVITATIONS_DIR: &str = "./storage/invitations";

fn ensure_invitations_dir() -> Result<(), ServiceError> {
    let dir = Path::new(INVITATIONS_DIR);
    if !dir.exists() {
        fs::create_dir_all(dir).map_err(|e| {
            error!("Failed to create invitations directory: {:?}", e);
            ServiceError::InternalServerError
        })?;
    }
    Ok(())
}

// Save invitation to storage
pub fn save_invitation(invitation: &TeamInvitation) -> Result<(), ServiceError> {
    ensure_invitations_dir()?;

    let invitation_path = format!("{}/{}.json", INVITATIONS_DIR, invitation.id);
    let invitation_json = serde_json::to_string_pretty(invitation).map_err(|e| {
        error!("Failed to serialize invitation: {:?}", e);
        ServiceError::InternalServerError
    })?;

    fs::write(&invitation_path, invitation_json).map_err(|e| {
        error!("Failed to save invitation: {:?}", e);
        ServiceError::InternalServerError
    })
}

fn scan<F>(mut keep: F) -> Result<Vec<TeamInvitation>, ServiceError>
where
    F: FnMut(&TeamInvitation) -> bool,
{
    ensure_invitations_dir()?;
    let mut invitations = Vec::new();

    for entry_result in fs::read_dir(INVITATIONS_DIR).map_err(|e| {
        error!("Failed to read invitations directory: {:?}", e);
        ServiceError::InternalServerError
    })? {
        let entry = entry_result.map_err(|e| {
            error!("Failed to read directory entry: {:?}", e);
            ServiceError::InternalServerError
        })?;

        let path = entry.path();
        if path.is_file() && path.extension().map_or(false, |ext| ext == "json") {
            let content = fs::read_to_string(&path).map_err(|e| {
                error!("Failed to read invitation file: {:?}", e);
                ServiceError::InternalServerError
            })?;

            let invitation: TeamInvitation = match serde_json::from_str(&content) {
                Ok(inv) => inv,
                Err(e) => {
                    warn!("Failed to parse invitation JSON: {:?}", e);
                    continue;
                }
            };

            if keep(&invitation) {
                invitations.push(invitation);
            }
        }
    }

    Ok(invitations)
}

// Look up an invitation by its token
pub fn find_by_token(token: &str) -> Result<Option<TeamInvitation>, ServiceError> {
    Ok(scan(|inv| inv.token == token)?.into_iter().next())
}

// The open invitation for an email within a team, if one exists. At most
// one can be open at a time because issuance supersedes the previous one.
pub fn find_pending_for_email(
    team_id: &str,
    email: &str,
) -> Result<Option<TeamInvitation>, ServiceError> {
    Ok(scan(|inv| {
        inv.team_id == team_id
            && inv.email.eq_ignore_ascii_case(email)
            && inv.status() == InvitationStatus::Pending
    })?
    .into_iter()
    .next())
}

// Get all invitations for a team
pub fn get_invitations_for_team(team_id: &str) -> Result<Vec<TeamInvitation>, ServiceError> {
    scan(|inv| inv.team_id == team_id)
}
