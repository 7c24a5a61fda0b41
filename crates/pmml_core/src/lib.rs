//! # pmml_core
//!
//! Semantic analyses over PMML document trees.
//!
//! This crate provides:
//! - [`FieldResolver`] — the set of named fields visible at any point of
//!   the tree, honoring model, segment, and function-definition scoping
//! - [`VersionInspector`] — the narrowest schema version range the
//!   document's constructs admit, driven by a data-only
//!   [`VersionRuleTable`]
//!
//! Both analyses are clients of the traversal engine in `pmml_ast`: they
//! never mutate the tree, carry their own per-run state, and may run
//! concurrently over a shared tree as long as each thread uses its own
//! instance.
//!
//! ## Example
//!
//! ```rust
//! use pmml_ast::{DataDictionary, DataField, DataType, Document, Header, OpType};
//! use pmml_core::{VersionInspector, VersionRuleTable};
//!
//! let document = Document::new(
//!     "4.4",
//!     Header::new(),
//!     DataDictionary::new()
//!         .with_field(DataField::new("y", DataType::Double, OpType::Continuous)),
//! );
//!
//! let table = VersionRuleTable::standard();
//! let mut inspector = VersionInspector::new(&table);
//! let range = inspector.run(&document).unwrap();
//! assert_eq!(range, pmml_ast::VersionRange::full());
//! ```

mod error;
mod inspector;
mod resolver;
mod rules;
mod scope;

pub use error::{ScopeError, VersionContradiction};
pub use inspector::VersionInspector;
pub use resolver::FieldResolver;
pub use rules::{Condition, VersionRule, VersionRuleTable};
pub use scope::{FrameKind, ScopeStack};

pub use pmml_ast::{Field, FieldOrigin, Version, VersionRange};
