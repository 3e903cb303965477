//! `stack-license` — pick one license under which a whole dependency stack can
//! be distributed, or report the packages whose licenses conflict.
//!
//! # Flow
//! 1. Parse the payload into [`models::PackageRecord`]s ([`ingest`]).
//! 2. Reject unrecognized licenses softly ([`license::ruleset`]).
//! 3. Build a fresh [`license::graph::LicenseGraph`] and intersect the
//!    reachable sets of all input licenses ([`license::resolver`]).
//! 4. On failure, find the conflicting licenses ([`license::conflict`]).
//! 5. Shape a [`models::ScoringResult`] ([`scoring::ScoringService`]).

pub mod config;
pub mod error;
pub mod ingest;
pub mod license;
pub mod models;
pub mod report;
pub mod scoring;

pub use config::{Config, ResolutionConfig};
pub use error::{GraphError, InputValidationError, ScoringError};
pub use models::{ConflictRecord, PackageRecord, PermissionTier, ScoringResult};
pub use scoring::ScoringService;
