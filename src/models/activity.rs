// teamflow-service/src/models/activity.rs
use crate::models::UserSummary;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

// Everything the audit trail can record about a team
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActivityAction {
    #[serde(rename = "TEAM_CREATED")]
    TeamCreated,
    #[serde(rename = "TEAM_RENAMED")]
    TeamRenamed,
    #[serde(rename = "TEAM_DELETED")]
    TeamDeleted,
    #[serde(rename = "MEMBER_INVITED")]
    MemberInvited,
    #[serde(rename = "MEMBER_JOINED")]
    MemberJoined,
    #[serde(rename = "MEMBER_KICKED")]
    MemberKicked,
    #[serde(rename = "MEMBER_LEFT")]
    MemberLeft,
    #[serde(rename = "ROLE_CHANGED")]
    RoleChanged,
}

// One entry in a team's append-only feed. seq is the per-team insertion
// sequence and breaks ordering ties between equal timestamps.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ActivityRecord {
    #[serde(rename = "_id")]
    pub id: String,
    pub team_id: String,
    pub seq: u64,
    pub action: ActivityAction,
    pub actor_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_user_id: Option<String>,
    #[serde(default)]
    pub metadata: Value,
    pub created_at: DateTime<Utc>,
}

impl ActivityRecord {
    // Human-readable sentence for the feed. Identity attributes come from
    // the caller (resolved at read time), roles and names from metadata
    // captured when the event happened.
    pub fn describe(&self, target_name: Option<&str>) -> String {
        let meta_str = |key: &str| {
            self.metadata
                .get(key)
                .and_then(Value::as_str)
                .unwrap_or("")
                .to_string()
        };
        let target = target_name
            .map(str::to_string)
            .unwrap_or_else(|| self.target_user_id.clone().unwrap_or_default());

        match self.action {
            ActivityAction::TeamCreated => {
                format!("created the team \"{}\"", meta_str("name"))
            }
            ActivityAction::TeamRenamed => format!(
                "renamed the team from \"{}\" to \"{}\"",
                meta_str("from"),
                meta_str("to")
            ),
            ActivityAction::TeamDeleted => "deleted the team".to_string(),
            ActivityAction::MemberInvited => {
                format!("invited {} as {}", meta_str("email"), meta_str("role"))
            }
            ActivityAction::MemberJoined => {
                format!("joined the team as {}", meta_str("role"))
            }
            ActivityAction::MemberKicked => format!("removed {} from the team", target),
            ActivityAction::MemberLeft => "left the team".to_string(),
            ActivityAction::RoleChanged => format!(
                "changed {}'s role from {} to {}",
                target,
                meta_str("from"),
                meta_str("to")
            ),
        }
    }
}

// Feed entry as served to clients
#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ActivityView {
    #[serde(rename = "_id")]
    pub id: String,
    pub action: ActivityAction,
    pub description: String,
    pub performed_by: UserSummary,
    pub metadata: Value,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, Debug)]
pub struct ActivityPage {
    pub activities: Vec<ActivityView>,
    pub page: usize,
    pub total: usize,
}
