use std::collections::BTreeSet;
use std::path::Path;

use crate::models::PermissionTier;

/// Known licenses in declaration order, with their permission tier.
const STANDARD_LICENSES: [(&str, PermissionTier); 12] = [
    // Permissive
    ("PD", PermissionTier::Permissive),
    ("MIT", PermissionTier::Permissive),
    ("BSD", PermissionTier::Permissive),
    ("APACHE", PermissionTier::Permissive),
    // Weakly protective
    ("LGPL V2.1", PermissionTier::WeaklyProtective),
    ("LGPL V2.1+", PermissionTier::WeaklyProtective),
    ("LGPL V3+", PermissionTier::WeaklyProtective),
    ("MPL 1.1", PermissionTier::WeaklyProtective),
    // Strongly protective
    ("GPL V2", PermissionTier::StronglyProtective),
    ("GPL V2+", PermissionTier::StronglyProtective),
    ("GPL V3+", PermissionTier::StronglyProtective),
    // Network protective
    ("AGPL V3+", PermissionTier::NetworkProtective),
];

/// Directed upgrade paths: the source license can be combined under the target.
const STANDARD_EDGES: [(&str, &str); 17] = [
    ("PD", "MIT"),
    ("MIT", "BSD"),
    ("BSD", "APACHE"),
    ("BSD", "MPL 1.1"),
    ("BSD", "LGPL V2.1"),
    ("BSD", "LGPL V2.1+"),
    ("BSD", "LGPL V3+"),
    ("APACHE", "LGPL V3+"),
    ("LGPL V2.1+", "LGPL V2.1"),
    ("LGPL V2.1+", "LGPL V3+"),
    ("LGPL V2.1", "GPL V2"),
    ("LGPL V2.1", "GPL V2+"),
    ("LGPL V2.1+", "GPL V2+"),
    ("LGPL V3+", "GPL V3+"),
    ("GPL V2+", "GPL V2"),
    ("GPL V2+", "GPL V3+"),
    ("GPL V3+", "AGPL V3+"),
];

/// Table of license identities, their tiers and the compatibility edges
/// between them. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSet {
    licenses: Vec<(String, PermissionTier)>,
    edges: Vec<(String, String)>,
}

impl RuleSet {
    /// Build a rule set from arbitrary tables. No validation happens here;
    /// building a [`LicenseGraph`](super::graph::LicenseGraph) from it does that.
    pub fn new(licenses: Vec<(String, PermissionTier)>, edges: Vec<(String, String)>) -> Self {
        Self { licenses, edges }
    }

    /// The built-in rule set: 12 licenses, 17 edges.
    pub fn standard() -> Self {
        Self {
            licenses: STANDARD_LICENSES
                .iter()
                .map(|(id, tier)| (id.to_string(), *tier))
                .collect(),
            edges: STANDARD_EDGES
                .iter()
                .map(|(from, to)| (from.to_string(), to.to_string()))
                .collect(),
        }
    }

    pub fn licenses(&self) -> &[(String, PermissionTier)] {
        &self.licenses
    }

    pub fn edges(&self) -> &[(String, String)] {
        &self.edges
    }

    pub fn contains(&self, id: &str) -> bool {
        self.declaration_index(id).is_some()
    }

    /// Position of `id` in the declaration table.
    pub fn declaration_index(&self, id: &str) -> Option<usize> {
        self.licenses.iter().position(|(known, _)| known == id)
    }

    /// Identities from `ids` that this rule set does not know, sorted and deduplicated.
    pub fn unrecognized<'a, I>(&self, ids: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        ids.into_iter()
            .filter(|id| !self.contains(id))
            .map(str::to_string)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::standard()
    }
}

/// Source of the rule set used by the scoring service.
///
/// The `train`, `load` and `save` hooks leave room for a data-driven rule set;
/// every provider shipped today is static, so they do nothing.
pub trait RuleSetProvider {
    fn rule_set(&self) -> &RuleSet;

    fn train(&mut self, _data_store: &Path) -> std::io::Result<()> {
        Ok(())
    }

    fn load(&mut self, _data_store: &Path, _name: &str) -> std::io::Result<()> {
        Ok(())
    }

    fn save(&self, _data_store: &Path, _name: &str) -> std::io::Result<()> {
        Ok(())
    }
}

/// Provider backed by the built-in table.
#[derive(Debug, Default)]
pub struct StaticRuleSet {
    rules: RuleSet,
}

impl StaticRuleSet {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RuleSetProvider for StaticRuleSet {
    fn rule_set(&self) -> &RuleSet {
        &self.rules
    }
}
