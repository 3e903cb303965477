//! License-compatibility graph and resolution.
//!
//! - [`ruleset`] — the fixed table of licenses, tiers and upgrade edges.
//! - [`graph`] — per-call directed graph built from a [`ruleset::RuleSet`].
//! - [`reachability`] — forward transitive closure of a license.
//! - [`resolver`] — common-destination selection with tie-breaking.
//! - [`conflict`] — conflicting licenses once resolution has failed.

pub mod conflict;
pub mod graph;
pub mod reachability;
pub mod resolver;
pub mod ruleset;
