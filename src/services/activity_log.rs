// teamflow-service/src/services/activity_log.rs
use crate::models::{ActivityAction, ActivityPage, ActivityRecord, ActivityView, ServiceError,
                    UserSummary};
use crate::utils::{activity_storage, user_storage};
use chrono::Utc;
use log::debug;
use serde_json::Value;
use uuid::Uuid;

// The client's teams page requests 20 per page; the embedded activity tab 10
pub const DEFAULT_PAGE_LIMIT: usize = 20;

// Append a record to a team's feed. Callers hold the team lock, so the
// per-team sequence number cannot collide.
pub fn append(
    team_id: &str,
    action: ActivityAction,
    actor_id: &str,
    target_user_id: Option<&str>,
    metadata: Value,
) -> Result<(), ServiceError> {
    let mut feed = activity_storage::load_feed(team_id)?;

    let record = ActivityRecord {
        id: Uuid::new_v4().to_string(),
        team_id: team_id.to_string(),
        seq: feed.len() as u64,
        action,
        actor_id: actor_id.to_string(),
        target_user_id: target_user_id.map(str::to_string),
        metadata,
        created_at: Utc::now(),
    };

    debug!("Appending activity {:?} for team {}", action, team_id);

    feed.push(record);
    activity_storage::store_feed(team_id, &feed)
}

// Newest-first feed page. Pages are 1-indexed; timestamp ties fall back to
// the insertion sequence so pagination is stable.
pub fn list_by_team(
    team_id: &str,
    page: usize,
    limit: usize,
) -> Result<ActivityPage, ServiceError> {
    let mut feed = activity_storage::load_feed(team_id)?;
    feed.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| b.seq.cmp(&a.seq))
    });

    let total = feed.len();
    let page = page.max(1);
    let limit = if limit == 0 { DEFAULT_PAGE_LIMIT } else { limit };

    let activities = feed
        .into_iter()
        .skip((page - 1) * limit)
        .take(limit)
        .map(view_of)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ActivityPage {
        activities,
        page,
        total,
    })
}

// Identity attributes are resolved at read time, never cached in the record
fn view_of(record: ActivityRecord) -> Result<ActivityView, ServiceError> {
    let performed_by = resolve_user(&record.actor_id)?;
    let target_name = match &record.target_user_id {
        Some(id) => user_storage::find_user_by_id(id)?.map(|u| u.name),
        None => None,
    };
    let description = record.describe(target_name.as_deref());

    Ok(ActivityView {
        id: record.id,
        action: record.action,
        description,
        performed_by,
        metadata: record.metadata,
        created_at: record.created_at,
    })
}

fn resolve_user(user_id: &str) -> Result<UserSummary, ServiceError> {
    Ok(user_storage::find_user_by_id(user_id)?
        .map(|u| u.summary())
        .unwrap_or_else(|| UserSummary {
            id: user_id.to_string(),
            name: "Unknown user".to_string(),
            email: String::new(),
            profile_image: None,
        }))
}
