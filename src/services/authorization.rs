// teamflow-service/src/services/authorization.rs
use crate::models::TeamRole;

// A requested action against a team, carrying the target's role where the
// decision depends on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TeamAction {
    RenameTeam,
    DeleteTeam,
    InviteMember { proposed: TeamRole },
    KickMember { target: TeamRole },
    ChangeRole { target: TeamRole, new_role: TeamRole },
    LeaveTeam,
    ReadTeam,
}

// The single permission table. Pure: no storage, no clock.
//
// No actor may act on a target with an equal or higher role, and OWNER can
// never be handed out through invite or role change; the only OWNER
// membership is created with the team itself.
pub fn authorize(actor: TeamRole, action: TeamAction) -> bool {
    match action {
        TeamAction::RenameTeam | TeamAction::DeleteTeam => actor == TeamRole::Owner,
        TeamAction::InviteMember { proposed } => {
            proposed < TeamRole::Owner && actor >= TeamRole::Admin
        }
        TeamAction::KickMember { target } => target < actor,
        TeamAction::ChangeRole { target, new_role } => {
            actor == TeamRole::Owner && target < TeamRole::Owner && new_role < TeamRole::Owner
        }
        TeamAction::LeaveTeam => actor < TeamRole::Owner,
        TeamAction::ReadTeam => true,
    }
}
