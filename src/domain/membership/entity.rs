//! Membership pair and outcomes

use serde::{Deserialize, Serialize};

use crate::domain::team::TeamId;
use crate::domain::user::UserId;

/// A user belonging to a team. The pair carries no attributes of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Membership {
    pub user_id: UserId,
    pub team_id: TeamId,
}

impl Membership {
    pub fn new(user_id: UserId, team_id: TeamId) -> Self {
        Self { user_id, team_id }
    }
}

/// Result of adding a member; adding an existing pair is not an error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    AlreadyMember,
}

impl AddOutcome {
    pub fn from_inserted(inserted: bool) -> Self {
        if inserted {
            Self::Added
        } else {
            Self::AlreadyMember
        }
    }

    pub fn is_added(&self) -> bool {
        matches!(self, Self::Added)
    }
}
