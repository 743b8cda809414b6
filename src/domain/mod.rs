//! Domain layer - Core business logic and entities

pub mod error;
pub mod membership;
pub mod team;
pub mod user;

pub use error::DomainError;
pub use membership::{AddOutcome, Membership, MembershipRepository};
pub use team::{NewTeam, Team, TeamId, TeamRepository, TreeNode};
pub use user::{NewUser, User, UserId, UserRepository};
