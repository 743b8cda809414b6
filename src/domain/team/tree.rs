//! Nested team tree output
//!
//! Trees are assembled from a flat, depth-first list of nodes, written out as
//! JSON and dropped with explicit stacks so that arbitrarily deep hierarchies
//! never grow the call stack.

use std::io::Write;

use super::entity::Team;

/// A team with its direct members and all transitive children
#[derive(Debug, PartialEq, Eq)]
pub struct TreeNode {
    pub id: i64,
    pub name: String,
    pub parent_id: Option<i64>,
    pub members: Vec<String>,
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    /// Create a node without children
    pub fn leaf(team: &Team, members: Vec<String>) -> Self {
        Self {
            id: team.id().value(),
            name: team.name().to_string(),
            parent_id: team.parent_id().map(|p| p.value()),
            members,
            children: Vec::new(),
        }
    }

    /// Number of nodes in this subtree, including itself
    pub fn size(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];

        while let Some(node) = stack.pop() {
            count += 1;
            stack.extend(node.children.iter());
        }

        count
    }

    /// Render this subtree as a JSON object
    pub fn to_json(&self) -> serde_json::Result<Vec<u8>> {
        let mut out = Vec::new();
        write_tree(&mut out, self)?;
        Ok(out)
    }
}

impl Drop for TreeNode {
    fn drop(&mut self) {
        let mut stack = std::mem::take(&mut self.children);
        while let Some(mut node) = stack.pop() {
            stack.append(&mut node.children);
        }
    }
}

/// Render a list of trees as a JSON array
pub fn forest_to_json(roots: &[TreeNode]) -> serde_json::Result<Vec<u8>> {
    let mut out = Vec::new();
    out.push(b'[');
    for (i, root) in roots.iter().enumerate() {
        if i > 0 {
            out.push(b',');
        }
        write_tree(&mut out, root)?;
    }
    out.push(b']');
    Ok(out)
}

enum Step<'a> {
    Open(&'a TreeNode),
    Comma,
    Close,
}

fn write_tree(out: &mut Vec<u8>, root: &TreeNode) -> serde_json::Result<()> {
    let mut steps = vec![Step::Open(root)];

    while let Some(step) = steps.pop() {
        match step {
            Step::Open(node) => {
                write!(out, "{{\"id\":{},\"name\":", node.id).map_err(serde_json::Error::io)?;
                serde_json::to_writer(&mut *out, &node.name)?;
                match node.parent_id {
                    Some(parent) => write!(out, ",\"parent_id\":{}", parent),
                    None => write!(out, ",\"parent_id\":null"),
                }
                .map_err(serde_json::Error::io)?;
                out.extend_from_slice(b",\"members\":");
                serde_json::to_writer(&mut *out, &node.members)?;
                out.extend_from_slice(b",\"children\":[");

                steps.push(Step::Close);
                for (i, child) in node.children.iter().enumerate().rev() {
                    steps.push(Step::Open(child));
                    if i > 0 {
                        steps.push(Step::Comma);
                    }
                }
            }
            Step::Comma => out.push(b','),
            Step::Close => out.extend_from_slice(b"]}"),
        }
    }

    Ok(())
}

/// Builds a `TreeNode` from nodes recorded in depth-first pre-order.
///
/// The first node pushed is the root and must have no parent slot. Every later
/// node names the slot of a node pushed before it.
#[derive(Debug, Default)]
pub struct TreeBuilder {
    nodes: Vec<Option<TreeNode>>,
    parents: Vec<Option<usize>>,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a node and return its slot
    pub fn push(&mut self, team: &Team, members: Vec<String>, parent: Option<usize>) -> usize {
        debug_assert!(parent.is_none_or(|p| p < self.nodes.len()));

        let slot = self.nodes.len();
        self.nodes.push(Some(TreeNode::leaf(team, members)));
        self.parents.push(parent);
        slot
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Attach every node to its parent and return the root
    pub fn finish(self) -> Option<TreeNode> {
        let Self { mut nodes, parents } = self;

        // Children always sit in later slots than their parent, so walking
        // backwards completes each subtree before it is attached.
        for slot in (1..nodes.len()).rev() {
            let Some(mut node) = nodes[slot].take() else {
                continue;
            };
            node.children.reverse();

            if let Some(Some(parent)) = parents[slot].and_then(|p| nodes.get_mut(p)) {
                parent.children.push(node);
            }
        }

        let mut root = nodes.into_iter().next().flatten()?;
        root.children.reverse();
        Some(root)
    }
}
