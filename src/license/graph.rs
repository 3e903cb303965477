use std::collections::HashMap;

use tracing::debug;

use crate::error::GraphError;
use crate::license::ruleset::RuleSet;
use crate::models::PermissionTier;

/// A license vertex. Edges are stored as indices into the owning graph.
#[derive(Debug, Clone)]
pub struct LicenseNode {
    id: String,
    tier: PermissionTier,
    edges: Vec<usize>,
}

impl LicenseNode {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn tier(&self) -> PermissionTier {
        self.tier
    }
}

/// Directed license-compatibility graph for a single resolution call.
///
/// An edge `A -> B` means the terms of `A` remain satisfiable when the
/// combined work is distributed under `B`.
#[derive(Debug, Default)]
pub struct LicenseGraph {
    nodes: Vec<LicenseNode>,
    index: HashMap<String, usize>,
}

impl LicenseGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from `rules`, failing on the first duplicate license or
    /// edge to an undeclared license.
    pub fn from_rule_set(rules: &RuleSet) -> Result<Self, GraphError> {
        let mut graph = Self::new();
        for (id, tier) in rules.licenses() {
            graph.add_node(id, *tier)?;
        }
        for (from, to) in rules.edges() {
            graph.add_edge(from, to)?;
        }
        debug!(
            nodes = graph.len(),
            edges = rules.edges().len(),
            "built license graph"
        );
        Ok(graph)
    }

    pub fn add_node(&mut self, id: &str, tier: PermissionTier) -> Result<&LicenseNode, GraphError> {
        if self.index.contains_key(id) {
            return Err(GraphError::DuplicateNode(id.to_string()));
        }
        let idx = self.nodes.len();
        self.nodes.push(LicenseNode {
            id: id.to_string(),
            tier,
            edges: Vec::new(),
        });
        self.index.insert(id.to_string(), idx);
        Ok(&self.nodes[idx])
    }

    /// Add `from -> to`. Both ends must already be registered. Adding an
    /// existing edge again has no effect.
    pub fn add_edge(&mut self, from: &str, to: &str) -> Result<(), GraphError> {
        let unknown = |missing: &str| GraphError::UnknownNode {
            from: from.to_string(),
            to: to.to_string(),
            missing: missing.to_string(),
        };
        let from_idx = *self.index.get(from).ok_or_else(|| unknown(from))?;
        let to_idx = *self.index.get(to).ok_or_else(|| unknown(to))?;

        let edges = &mut self.nodes[from_idx].edges;
        if !edges.contains(&to_idx) {
            edges.push(to_idx);
        }
        Ok(())
    }

    pub fn get_node(&self, id: &str) -> Option<&LicenseNode> {
        self.index.get(id).map(|&idx| &self.nodes[idx])
    }

    /// Registration order of `id`; for a graph built from a rule set this is
    /// the rule set's declaration order.
    pub fn declaration_index(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// Direct upgrade targets of `node`, in edge insertion order.
    ///
    /// `node` must belong to this graph: its edges are indices into `self`.
    pub fn successors<'g>(&'g self, node: &'g LicenseNode) -> impl Iterator<Item = &'g LicenseNode> + 'g {
        node.edges.iter().map(move |&idx| &self.nodes[idx])
    }

    /// Nodes in declaration order.
    pub fn nodes(&self) -> impl Iterator<Item = &LicenseNode> {
        self.nodes.iter()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
