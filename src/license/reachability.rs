use std::collections::{HashSet, VecDeque};

use crate::license::graph::{LicenseGraph, LicenseNode};

/// Every license `start` can be upgraded into, `start` included.
///
/// Breadth-first over outgoing edges. The result lists `start` first and then
/// nodes in discovery order.
pub fn reachable_set<'g>(graph: &'g LicenseGraph, start: &'g LicenseNode) -> Vec<&'g LicenseNode> {
    let mut visited: HashSet<&str> = HashSet::new();
    let mut reachable = vec![start];
    visited.insert(start.id());

    let mut worklist: VecDeque<&LicenseNode> = graph.successors(start).collect();
    for &node in &worklist {
        if visited.insert(node.id()) {
            reachable.push(node);
        }
    }

    while let Some(node) = worklist.pop_front() {
        for next in graph.successors(node) {
            if visited.insert(next.id()) {
                reachable.push(next);
                worklist.push_back(next);
            }
        }
    }

    reachable
}

/// Identities reachable from the license named `id`, or `None` if the graph
/// does not know it.
pub fn reachable_ids<'g>(graph: &'g LicenseGraph, id: &str) -> Option<Vec<&'g str>> {
    let start = graph.get_node(id)?;
    Some(reachable_set(graph, start).into_iter().map(LicenseNode::id).collect())
}
