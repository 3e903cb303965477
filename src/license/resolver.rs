use std::collections::HashSet;

use serde::Deserialize;
use tracing::debug;

use crate::license::graph::{LicenseGraph, LicenseNode};
use crate::license::reachability::reachable_set;
use crate::models::PermissionTier;

/// Which input license wins when several of them are common destinations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TieBreak {
    /// Most restrictive tier first, then earliest declaration in the rule set.
    #[default]
    MostRestrictive,
    /// Last qualifying license in intersection order.
    LastMatch,
}

/// Picks a single stack license from the licenses every input can reach.
pub struct CompatibilityResolver<'g> {
    graph: &'g LicenseGraph,
    tie_break: TieBreak,
}

impl<'g> CompatibilityResolver<'g> {
    pub fn new(graph: &'g LicenseGraph, tie_break: TieBreak) -> Self {
        Self { graph, tie_break }
    }

    /// Licenses reachable from every input, ordered as in the first input's
    /// reachable set. Empty if there are none, no inputs, or an input is not
    /// in the graph.
    pub fn common_destinations(&self, inputs: &[&str]) -> Vec<&'g LicenseNode> {
        let mut common: Option<Vec<&'g LicenseNode>> = None;

        for &id in inputs {
            let Some(node) = self.graph.get_node(id) else {
                return Vec::new();
            };
            let reachable = reachable_set(self.graph, node);

            let narrowed = match common {
                None => reachable,
                Some(current) => {
                    let ids: HashSet<&str> = reachable.iter().map(|n| n.id()).collect();
                    current
                        .into_iter()
                        .filter(|n| ids.contains(n.id()))
                        .collect()
                }
            };

            if narrowed.is_empty() {
                debug!(license = id, "no common destination left");
                return narrowed;
            }
            common = Some(narrowed);
        }

        common.unwrap_or_default()
    }

    /// The stack license for `inputs`, or `None` when no license is reachable
    /// from all of them.
    pub fn resolve(&self, inputs: &[&str]) -> Option<&'g LicenseNode> {
        let common = self.common_destinations(inputs);
        if common.is_empty() {
            return None;
        }

        let qualifying: Vec<&'g LicenseNode> = common
            .iter()
            .copied()
            .filter(|n| inputs.contains(&n.id()))
            .collect();

        if !qualifying.is_empty() {
            return self.break_tie(&qualifying);
        }

        // No input is itself a destination: take the least restrictive tier present.
        PermissionTier::PRIORITY
            .iter()
            .find_map(|tier| common.iter().copied().find(|n| n.tier() == *tier))
    }

    fn break_tie(&self, candidates: &[&'g LicenseNode]) -> Option<&'g LicenseNode> {
        match self.tie_break {
            TieBreak::LastMatch => candidates.last().copied(),
            TieBreak::MostRestrictive => candidates.iter().copied().max_by(|a, b| {
                let order = |n: &LicenseNode| self.graph.declaration_index(n.id());
                a.tier()
                    .cmp(&b.tier())
                    .then_with(|| order(b).cmp(&order(a)))
            }),
        }
    }
}
