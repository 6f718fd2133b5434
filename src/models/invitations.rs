// teamflow-service/src/models/invitations.rs
use crate::models::TeamRole;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

// Invitation status is derived from time and usage, never stored. A stored
// status field would drift against wall-clock expiry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InvitationStatus {
    #[serde(rename = "pending")]
    Pending,
    #[serde(rename = "accepted")]
    Accepted,
    #[serde(rename = "expired")]
    Expired,
    #[serde(rename = "revoked")]
    Revoked,
}

// Team invitation model
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct TeamInvitation {
    #[serde(rename = "_id")]
    pub id: String,
    pub team_id: String,
    pub email: String,
    pub role: TeamRole,
    pub token: String,
    pub invited_by: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accepted_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accepted_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revoked_at: Option<DateTime<Utc>>,
}

// Request to create a new invitation; role defaults to MEMBER
#[derive(Deserialize, Debug)]
pub struct CreateInvitationRequest {
    pub email: String,
    pub role: Option<TeamRole>,
}

#[derive(Deserialize, Debug)]
pub struct AcceptQuery {
    pub token: String,
}

impl TeamInvitation {
    // Create a new invitation; valid for 7 days from issuance
    pub fn new(
        team_id: String,
        email: String,
        invited_by: String,
        role: TeamRole,
        token: String,
    ) -> Self {
        let now = Utc::now();
        let expires_at = now + Duration::days(7);

        Self {
            id: uuid::Uuid::new_v4().to_string(),
            team_id,
            email,
            role,
            token,
            invited_by,
            created_at: now,
            expires_at,
            accepted_at: None,
            accepted_by: None,
            revoked_at: None,
        }
    }

    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }

    // Consumption and revocation are permanent; expiry only matters while
    // the invitation is still open.
    pub fn status(&self) -> InvitationStatus {
        if self.accepted_at.is_some() {
            InvitationStatus::Accepted
        } else if self.revoked_at.is_some() {
            InvitationStatus::Revoked
        } else if self.is_expired() {
            InvitationStatus::Expired
        } else {
            InvitationStatus::Pending
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn invitation() -> TeamInvitation {
        TeamInvitation::new(
            "team-1".to_string(),
            "bob@example.com".to_string(),
            "alice".to_string(),
            TeamRole::Member,
            "token-1".to_string(),
        )
    }

    #[test]
    fn fresh_invitation_is_pending_for_seven_days() {
        let inv = invitation();
        assert_eq!(inv.status(), InvitationStatus::Pending);
        assert!(inv.expires_at - inv.created_at == Duration::days(7));
    }

    #[test]
    fn expiry_is_computed_from_wall_clock() {
        let mut inv = invitation();
        inv.expires_at = Utc::now() - Duration::days(1);
        assert_eq!(inv.status(), InvitationStatus::Expired);
    }

    #[test]
    fn acceptance_takes_precedence_over_expiry() {
        let mut inv = invitation();
        inv.expires_at = Utc::now() - Duration::days(1);
        inv.accepted_at = Some(Utc::now() - Duration::days(2));
        inv.accepted_by = Some("bob".to_string());
        assert_eq!(inv.status(), InvitationStatus::Accepted);
    }

    #[test]
    fn revocation_makes_open_invitation_unusable() {
        let mut inv = invitation();
        inv.revoked_at = Some(Utc::now());
        assert_eq!(inv.status(), InvitationStatus::Revoked);
    }
}
