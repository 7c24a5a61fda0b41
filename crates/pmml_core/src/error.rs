//! Analysis error types.

use pmml_ast::{NodeKind, Version};
use thiserror::Error;

/// Structural failures raised by scope resolution.
///
/// Both variants indicate a malformed tree or an engine bug, never a
/// property of well-formed input; resolution aborts immediately and
/// returns no partial result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScopeError {
    /// A declaration site had no enclosing scope-owner node at the
    /// expected ancestry depth.
    #[error("{kind} declaration has no enclosing scope owner at depth {depth}")]
    MissingOwner { kind: NodeKind, depth: usize },

    /// A declaration or publication found no open frame for its owner.
    #[error("no open scope frame owned by an enclosing {owner}")]
    MissingFrame { owner: NodeKind },

    /// A scope-boundary exit was reached without a matching open frame.
    #[error("scope underflow: exit of {kind} found no matching frame")]
    Underflow { kind: NodeKind },
}

/// The document's constructs admit no common schema version.
///
/// This is a fully formed analysis outcome, not a crash: folding every
/// applicable constraint drove the minimum above the maximum. Both bounds
/// are reported so callers can name the clash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("document requires at least version {minimum} but at most version {maximum}")]
pub struct VersionContradiction {
    /// Supremum of every per-construct minimum.
    pub minimum: Version,
    /// Infimum of every per-construct maximum.
    pub maximum: Version,
}
