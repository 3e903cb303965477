//! Report renderers for scoring results.
//!
//! - [`terminal`] — colored headline plus conflict and reachability tables;
//!   respects `--verbose` / `--quiet`.
//!
//! JSON output is the serialized [`ScoringResult`](crate::models::ScoringResult).

pub mod terminal;
