//! Membership domain module
//!
//! Membership is a many-to-many relation between users and teams, stored as a
//! set of `(user, team)` pairs owned by neither side.

mod entity;
mod repository;

pub use entity::{AddOutcome, Membership};
pub use repository::MembershipRepository;

#[cfg(test)]
pub use repository::MockMembershipRepository;
