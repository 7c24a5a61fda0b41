//! Visitor pattern for document tree traversal.
//!
//! # Overview
//!
//! - [`Visitor`] — one method per node kind, each defaulting into the
//!   generic [`Visitor::visit_node`] hook
//! - [`VisitFlow`] — per-node control signal (continue / skip subtree /
//!   terminate)
//! - [`traverse`] — depth-first pre-order walk with a parent-context stack
//! - [`Traversal`] — the engine-owned context handlers may query for
//!   ancestors
//!
//! The engine never mutates the tree and keeps no analysis state of its
//! own; analyses (scope resolution, version inference) are visitor
//! implementations that accumulate their own state.
//!
//! # Examples
//!
//! Counting field references:
//!
//! ```rust
//! use pmml_ast::{NodeRef, Traversal, VisitFlow, Visitor, traverse};
//! use pmml_ast::{DataDictionary, Document, Header};
//!
//! struct RefCounter {
//!     refs: usize,
//! }
//!
//! impl<'t> Visitor<'t> for RefCounter {
//!     fn visit_node(&mut self, node: NodeRef<'t>, _cx: &Traversal<'t>) -> VisitFlow {
//!         if matches!(node, NodeRef::FieldRef(_)) {
//!             self.refs += 1;
//!         }
//!         VisitFlow::Continue
//!     }
//! }
//!
//! let doc = Document::new("4.4", Header::new(), DataDictionary::new());
//! let mut counter = RefCounter { refs: 0 };
//! traverse(NodeRef::Document(&doc), &mut counter);
//! assert_eq!(counter.refs, 0);
//! ```

mod visit;
mod walk;

pub use visit::{VisitFlow, Visitor};
pub use walk::{Outcome, Traversal, traverse};
