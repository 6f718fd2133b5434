// teamflow-service/src/utils/activity_storage.rs
use crate::models::{ActivityRecord, ServiceError};
use log::error;
use std::fs;
use std::path::Path;

const ACTIVITIES_DIR: &str = "./storage/activities";

fn feed_path(team_id: &str) -> String {
    format!("{}/{}.json", ACTIVITIES_DIR, team_id)
}

// Load a team's feed in insertion order; a team with no file has no history
pub fn load_feed(team_id: &str) -> Result<Vec<ActivityRecord>, ServiceError> {
    let path_str = feed_path(team_id);
    let path = Path::new(&path_str);

    if !path.exists() {
        return Ok(Vec::new());
    }

    let content = fs::read_to_string(path).map_err(|e| {
        error!("Failed to read activity feed: {:?}", e);
        ServiceError::InternalServerError
    })?;

    serde_json::from_str(&content).map_err(|e| {
        error!("Failed to parse activity feed JSON: {:?}", e);
        ServiceError::InternalServerError
    })
}

// Rewrite a team's feed. Records are only ever appended; callers hold the
// team lock while mutating.
pub fn store_feed(team_id: &str, feed: &[ActivityRecord]) -> Result<(), ServiceError> {
    let dir = Path::new(ACTIVITIES_DIR);
    if !dir.exists() {
        fs::create_dir_all(dir).map_err(|e| {
            error!("Failed to create activities directory: {:?}", e);
            ServiceError::InternalServerError
        })?;
    }

    let feed_json = serde_json::to_string_pretty(feed).map_err(|e| {
        error!("Failed to serialize activity feed: {:?}", e);
        ServiceError::InternalServerError
    })?;

    fs::write(feed_path(team_id), feed_json).map_err(|e| {
        error!("Failed to save activity feed: {:?}", e);
        ServiceError::InternalServerError
    })
}
