// teamflow-service/src/services/notifier.rs
use chrono::{DateTime, Utc};
use log::info;

// Delivering the invitation (email, in production) is a collaborator
// concern; the invitation engine only needs a capability to hand the token
// to once issuance has committed.
pub trait Notifier: Send + Sync {
    fn invitation_issued(
        &self,
        email: &str,
        team_name: &str,
        token: &str,
        expires_at: DateTime<Utc>,
    );
}

// Default notifier: records the would-be delivery in the service log
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn invitation_issued(
        &self,
        email: &str,
        team_name: &str,
        token: &str,
        expires_at: DateTime<Utc>,
    ) {
        info!(
            "📧 Invitation for {} to join \"{}\": token={} expires={}",
            email, team_name, token, expires_at
        );
    }
}

static LOG_NOTIFIER: LogNotifier = LogNotifier;

pub fn default_notifier() -> &'static dyn Notifier {
    &LOG_NOTIFIER
}
