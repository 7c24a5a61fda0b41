//! Version inference: the narrowest schema version range a document fits.
//!
//! Every node is visited; the constraints of every rule that fires are
//! folded into a running [minimum, maximum] pair. Constraints are purely
//! additive and order-independent, so the walk never skips and keeps no
//! scope state; the parent stack is consulted only by rules whose
//! condition looks at an ancestor.

use pmml_ast::{
    Document, NodeRef, Outcome, Traversal, Version, VersionRange, VisitFlow, Visitor, traverse,
};
use tracing::debug;

use crate::error::VersionContradiction;
use crate::rules::VersionRuleTable;

/// Infers the schema version range a document conforms to.
///
/// The running bounds reset automatically at the start of each
/// [`VersionInspector::run`], so one inspector may be reused across
/// documents; the bounds left by the latest run remain readable through
/// [`VersionInspector::minimum`] and [`VersionInspector::maximum`] (also
/// after a contradiction).
#[derive(Debug)]
pub struct VersionInspector<'r> {
    rules: &'r VersionRuleTable,
    minimum: Version,
    maximum: Version,
}

impl<'r> VersionInspector<'r> {
    /// Creates an inspector over the given rule table.
    pub fn new(rules: &'r VersionRuleTable) -> Self {
        Self {
            rules,
            minimum: Version::EARLIEST,
            maximum: Version::LATEST,
        }
    }

    /// The running lower bound of the latest run.
    pub fn minimum(&self) -> Version {
        self.minimum
    }

    /// The running upper bound of the latest run.
    pub fn maximum(&self) -> Version {
        self.maximum
    }

    /// Folds every applicable rule across the tree and returns the
    /// resulting range, or the contradiction when the bounds crossed.
    pub fn run(&mut self, document: &Document) -> Result<VersionRange, VersionContradiction> {
        self.minimum = Version::EARLIEST;
        self.maximum = Version::LATEST;

        let mut folder = RuleFolder {
            rules: self.rules,
            range: VersionRange::full(),
        };
        let outcome = traverse(NodeRef::Document(document), &mut folder);
        debug_assert_eq!(outcome, Outcome::CompletedFully);

        self.minimum = folder.range.minimum;
        self.maximum = folder.range.maximum;

        if folder.range.is_contradictory() {
            Err(VersionContradiction {
                minimum: self.minimum,
                maximum: self.maximum,
            })
        } else {
            Ok(folder.range)
        }
    }
}

struct RuleFolder<'r> {
    rules: &'r VersionRuleTable,
    range: VersionRange,
}

impl<'t> Visitor<'t> for RuleFolder<'_> {
    fn visit_node(&mut self, node: NodeRef<'t>, cx: &Traversal<'t>) -> VisitFlow {
        for rule in self.rules.for_kind(node.kind()) {
            if rule.condition.evaluate(node, cx) {
                let narrowed = self.range.narrow(rule.constraint);
                if narrowed != self.range {
                    debug!(
                        note = rule.note,
                        constraint = %rule.constraint,
                        range = %narrowed,
                        "version constraint narrowed bounds"
                    );
                }
                self.range = narrowed;
            }
        }
        VisitFlow::Continue
    }
}
