//! Error types for graph construction, payload validation and scoring.

use thiserror::Error;

/// Violations of the graph build contract. Only a malformed rule set can
/// produce these.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// A license identity was registered twice.
    #[error("duplicate license node '{0}'")]
    DuplicateNode(String),

    /// An edge referenced a license that was never registered.
    #[error("edge {from} -> {to} references unknown license node '{missing}'")]
    UnknownNode {
        from: String,
        to: String,
        missing: String,
    },
}

/// A payload that does not match the input contract.
#[derive(Error, Debug)]
pub enum InputValidationError {
    /// The payload is not valid JSON or has the wrong shape at the top level.
    #[error("invalid payload: {0}")]
    Json(#[from] serde_json::Error),

    /// The top-level `packages` array is missing.
    #[error("payload has no 'packages' array")]
    MissingPackages,

    /// A package record lacks a required field or has it with the wrong type.
    #[error("package record {index}: missing or invalid field '{field}'")]
    MissingField { index: usize, field: &'static str },

    /// A package record declares no license at all.
    #[error("package record {index}: license list is empty")]
    EmptyLicenseList { index: usize },

    /// Nothing to resolve.
    #[error("payload contains no packages")]
    NoPackages,
}

/// Errors surfaced by [`crate::scoring::ScoringService`].
#[derive(Error, Debug)]
pub enum ScoringError {
    #[error(transparent)]
    Input(#[from] InputValidationError),

    #[error("malformed rule set: {0}")]
    Graph(#[from] GraphError),
}
