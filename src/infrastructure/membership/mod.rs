//! Membership infrastructure module

mod postgres_repository;
mod repository;
mod service;

pub use postgres_repository::PostgresMembershipRepository;
pub use repository::InMemoryMembershipRepository;
pub use service::{MemberRequest, MembershipService};
