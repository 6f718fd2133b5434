// teamflow-service/src/utils/team_lock.rs
use lazy_static::lazy_static;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

// Per-team mutual exclusion. Every mutating operation against a team runs
// with that team's guard held, so concurrent accepts of one token or a kick
// racing a role change produce exactly one winner. Operations on different
// teams never contend.
pub struct TeamLockRegistry {
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl TeamLockRegistry {
    pub fn new() -> Self {
        Self {
            locks: Mutex::new(HashMap::new()),
        }
    }

    // Get or create the lock entry for a team
    pub fn lock_for(&self, team_id: &str) -> Arc<Mutex<()>> {
        let mut locks = self
            .locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        locks
            .entry(team_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}

impl Default for TeamLockRegistry {
    fn default() -> Self {
        Self::new()
    }
}

lazy_static! {
    static ref REGISTRY: TeamLockRegistry = TeamLockRegistry::new();
}

pub fn lock_team(team_id: &str) -> Arc<Mutex<()>> {
    REGISTRY.lock_for(team_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_team_resolves_to_same_lock() {
        let registry = TeamLockRegistry::new();
        let a = registry.lock_for("team-1");
        let b = registry.lock_for("team-1");
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn different_teams_never_share_a_lock() {
        let registry = TeamLockRegistry::new();
        let a = registry.lock_for("team-1");
        let b = registry.lock_for("team-2");
        assert!(!Arc::ptr_eq(&a, &b));
    }
}
