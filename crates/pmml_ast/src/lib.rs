//! # pmml_ast
//!
//! Document tree and traversal engine for PMML semantic analysis.
//!
//! This crate defines the closed catalogue of node kinds that make up a
//! predictive-model interchange document, a uniform borrowed view over
//! them ([`NodeRef`]), and the depth-first traversal engine the analyses
//! in `pmml_core` are built on.
//!
//! ## Architecture
//!
//! - Nodes own their children outright; the tree is acyclic and stores no
//!   parent pointers. Ancestry is available only through the traversal
//!   engine's parent stack ([`Traversal::parent_at`]).
//! - The engine consumes exactly three node capabilities: the kind tag,
//!   the ordered children, and named attribute access
//!   ([`NodeRef::attr`]). Everything else is opaque to it.
//! - Dispatch is an exhaustive match over the closed [`NodeRef`] variant
//!   set, so adding a node kind is a compile-time event for every
//!   visitor, not a silently ignored subtree.
//!
//! ## Example
//!
//! ```rust
//! use pmml_ast::{DataDictionary, DataField, DataType, Document, Header, OpType};
//!
//! let doc = Document::new(
//!     "4.4",
//!     Header::new().with_copyright("ACME Corporation"),
//!     DataDictionary::new()
//!         .with_field(DataField::new("y", DataType::Double, OpType::Continuous)),
//! );
//! ```

mod expression;
mod field;
mod model;
mod node;
mod node_ref;
mod types;
mod version;
pub mod visitor;

pub use expression::{Apply, Constant, Expression, FieldRef};
pub use field::{Field, FieldOrigin};
pub use model::{
    MiningField, MiningSchema, Model, NumericPredictor, Output, OutputField, Predicate,
    RegressionTable, Segment, Segmentation, SimplePredicate, Target, TargetValue, Targets,
    TruePredicate,
};
pub use node::{
    DataDictionary, DataField, DefineFunction, DerivedField, Document, Header,
    LocalTransformations, ParameterField, TransformationDictionary,
};
pub use node_ref::{AttrValue, NodeId, NodeKind, NodeRef};
pub use types::{
    DataType, FieldUsage, MiningFunction, ModelKind, MultipleModelMethod, OpType, OutputFeature,
    PredicateOp,
};
pub use version::{UnknownVersion, Version, VersionRange};

// Re-export commonly used visitor items for convenience
pub use visitor::{Outcome, Traversal, VisitFlow, Visitor, traverse};
