// teamflow-service/src/services/mod.rs
pub mod activity_log;
pub mod authorization;
pub mod invitation_service;
pub mod membership_service;
pub mod notifier;
pub mod team_service;
