//! Team service: hierarchy writes, reads and tree serialization

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::membership::MembershipRepository;
use crate::domain::team::{NewTeam, Team, TeamId, TeamRepository, TreeBuilder, TreeNode};
use crate::domain::DomainError;

/// Request for creating a new team
#[derive(Debug, Clone)]
pub struct CreateTeamRequest {
    pub name: String,
    pub parent_id: Option<i64>,
}

/// Team service for managing the team hierarchy
#[derive(Clone)]
pub struct TeamService {
    teams: Arc<dyn TeamRepository>,
    memberships: Arc<dyn MembershipRepository>,
}

impl std::fmt::Debug for TeamService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TeamService").finish_non_exhaustive()
    }
}

impl TeamService {
    /// Create a new team service
    pub fn new(
        teams: Arc<dyn TeamRepository>,
        memberships: Arc<dyn MembershipRepository>,
    ) -> Self {
        Self { teams, memberships }
    }

    /// Create a team, optionally under an existing parent
    pub async fn create_team(&self, request: CreateTeamRequest) -> Result<Team, DomainError> {
        info!(name = %request.name, parent_id = ?request.parent_id, "Creating team");

        let parent_id = request
            .parent_id
            .map(|id| TeamId::new(id).map_err(|_| DomainError::InvalidParent { parent_id: id }))
            .transpose()?;

        let mut new_team =
            NewTeam::new(request.name).map_err(|e| DomainError::validation(e.to_string()))?;

        if let Some(parent_id) = parent_id {
            new_team = new_team.with_parent(parent_id);
        }

        let team = self
            .teams
            .create(new_team)
            .await
            .inspect_err(|e| warn!(error = %e, "Team creation failed"))?;

        info!(team_id = %team.id(), "Created team");
        Ok(team)
    }

    /// Get a team by raw id; non-positive ids never match
    pub async fn get(&self, id: i64) -> Result<Option<Team>, DomainError> {
        match TeamId::new(id) {
            Ok(team_id) => self.teams.get(team_id).await,
            Err(_) => Ok(None),
        }
    }

    /// Teams without a parent, in insertion order
    pub async fn list_roots(&self) -> Result<Vec<Team>, DomainError> {
        self.teams.list_roots().await
    }

    /// Direct children of a team, in insertion order
    pub async fn children_of(&self, id: TeamId) -> Result<Vec<Team>, DomainError> {
        self.teams.children_of(id).await
    }

    /// Serialize a team with its members and all descendants.
    ///
    /// Walks depth-first with an explicit stack; children keep store order.
    pub async fn serialize(&self, team: &Team) -> Result<TreeNode, DomainError> {
        let mut builder = TreeBuilder::new();
        let mut visited = HashSet::new();
        let mut stack: Vec<(Team, Option<usize>)> = vec![(team.clone(), None)];

        while let Some((current, parent)) = stack.pop() {
            if !visited.insert(current.id()) {
                warn!(team_id = %current.id(), "Team reached twice during serialization, skipping");
                continue;
            }

            let members = self.memberships.members_of(current.id()).await?;
            let children = self.teams.children_of(current.id()).await?;
            let slot = builder.push(&current, members, parent);

            stack.extend(children.into_iter().rev().map(|child| (child, Some(slot))));
        }

        debug!(team_id = %team.id(), nodes = builder.len(), "Serialized team tree");

        builder
            .finish()
            .ok_or_else(|| DomainError::internal("Serialized tree has no root"))
    }

    /// Serialize each root, preserving order
    pub async fn serialize_forest(&self, roots: &[Team]) -> Result<Vec<TreeNode>, DomainError> {
        let mut forest = Vec::with_capacity(roots.len());

        for root in roots {
            forest.push(self.serialize(root).await?);
        }

        Ok(forest)
    }

    /// The whole hierarchy as a forest of trees
    pub async fn hierarchy(&self) -> Result<Vec<TreeNode>, DomainError> {
        let roots = self.list_roots().await?;
        self.serialize_forest(&roots).await
    }

    /// The subtree rooted at a team
    pub async fn subtree(&self, id: i64) -> Result<TreeNode, DomainError> {
        let team = self
            .get(id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Team {} not found", id)))?;

        self.serialize(&team).await
    }

    /// Count all teams
    pub async fn count(&self) -> Result<usize, DomainError> {
        self.teams.count().await
    }
}
