use std::collections::BTreeSet;

use serde::Deserialize;
use tracing::debug;

use crate::license::resolver::CompatibilityResolver;

/// How a failed resolution is broken down into conflicting licenses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConflictMode {
    /// Every pair is judged by resolving the whole input set, so every
    /// distinct input license ends up reported.
    #[default]
    WholeSet,
    /// A pair is reported only when those two licenses have no common
    /// destination on their own.
    Pairwise,
}

/// Reports which input licenses conflict once resolution has failed.
pub struct ConflictDetector<'r, 'g> {
    resolver: &'r CompatibilityResolver<'g>,
    mode: ConflictMode,
}

impl<'r, 'g> ConflictDetector<'r, 'g> {
    pub fn new(resolver: &'r CompatibilityResolver<'g>, mode: ConflictMode) -> Self {
        Self { resolver, mode }
    }

    /// Licenses from `inputs` that take part in at least one failing pair.
    ///
    /// Pairs are taken over positions, so a license repeated in the input
    /// still forms pairs. A single input forms no pair at all.
    pub fn conflicts(&self, inputs: &[&str]) -> BTreeSet<String> {
        // The whole-set verdict is the same for every pair.
        let whole_set_fails = match self.mode {
            ConflictMode::WholeSet => self.resolver.resolve(inputs).is_none(),
            ConflictMode::Pairwise => false,
        };

        let mut conflicting = BTreeSet::new();
        for (i, &left) in inputs.iter().enumerate() {
            for &right in &inputs[i + 1..] {
                let pair_fails = match self.mode {
                    ConflictMode::WholeSet => whole_set_fails,
                    ConflictMode::Pairwise => self.resolver.resolve(&[left, right]).is_none(),
                };
                if pair_fails {
                    conflicting.insert(left.to_string());
                    conflicting.insert(right.to_string());
                }
            }
        }

        debug!(
            mode = ?self.mode,
            conflicts = conflicting.len(),
            "conflict detection finished"
        );
        conflicting
    }
}
