//! Depth-first pre-order walk with a parent-context stack.

use crate::node_ref::NodeRef;
use crate::visitor::visit::{VisitFlow, Visitor};

/// Result of a completed [`traverse`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Every reachable node was visited.
    CompletedFully,
    /// A handler returned [`VisitFlow::Terminate`] and the walk stopped
    /// early.
    TerminatedEarly,
}

/// Traversal context handed to every visitor callback.
///
/// Holds the stack of ancestors of the node currently being visited,
/// innermost last. The stack is owned by the engine and valid only for
/// the duration of the traversal; nodes themselves never store parent
/// pointers.
#[derive(Debug)]
pub struct Traversal<'t> {
    parents: Vec<NodeRef<'t>>,
}

impl<'t> Traversal<'t> {
    fn new() -> Self {
        Self {
            parents: Vec::new(),
        }
    }

    /// Number of ancestors of the node currently being visited.
    pub fn depth(&self) -> usize {
        self.parents.len()
    }

    /// The immediate parent of the node currently being visited, or
    /// `None` at the root.
    pub fn parent(&self) -> Option<NodeRef<'t>> {
        self.parent_at(0)
    }

    /// The ancestor `depth` levels up (0 is the immediate parent).
    ///
    /// Returns `None` when `depth` reaches past the root; callers that
    /// treat this as impossible should surface it as a structural error
    /// rather than ignore it.
    pub fn parent_at(&self, depth: usize) -> Option<NodeRef<'t>> {
        let len = self.parents.len();
        if depth < len {
            Some(self.parents[len - 1 - depth])
        } else {
            None
        }
    }

    /// Iterates over the ancestors, innermost first.
    pub fn ancestors(&self) -> impl Iterator<Item = NodeRef<'t>> + '_ {
        self.parents.iter().rev().copied()
    }

    fn walk<V: Visitor<'t>>(&mut self, node: NodeRef<'t>, visitor: &mut V) -> VisitFlow {
        match dispatch(visitor, node, self) {
            VisitFlow::Terminate => return VisitFlow::Terminate,
            VisitFlow::SkipChildren => {
                visitor.depart_node(node, self);
                return VisitFlow::Continue;
            }
            VisitFlow::Continue => {}
        }

        self.parents.push(node);
        for child in node.children() {
            if self.walk(child, visitor) == VisitFlow::Terminate {
                self.parents.pop();
                return VisitFlow::Terminate;
            }
        }
        self.parents.pop();

        visitor.depart_node(node, self);
        VisitFlow::Continue
    }
}

/// Walks the tree rooted at `root` depth-first in pre-order, dispatching
/// each node to the matching kind-specific visitor method.
///
/// A node's children are visited in document order after the node itself;
/// the parent stack is pushed before descending and popped afterwards, so
/// handlers observe exactly the ancestors of the node they are handed.
pub fn traverse<'t, V: Visitor<'t>>(root: NodeRef<'t>, visitor: &mut V) -> Outcome {
    let mut traversal = Traversal::new();
    match traversal.walk(root, visitor) {
        VisitFlow::Terminate => Outcome::TerminatedEarly,
        _ => Outcome::CompletedFully,
    }
}

/// Routes a node to the visitor method for its kind. Exhaustive over the
/// closed catalogue.
fn dispatch<'t, V: Visitor<'t>>(
    visitor: &mut V,
    node: NodeRef<'t>,
    cx: &Traversal<'t>,
) -> VisitFlow {
    match node {
        NodeRef::Document(n) => visitor.visit_document(n, cx),
        NodeRef::Header(n) => visitor.visit_header(n, cx),
        NodeRef::DataDictionary(n) => visitor.visit_data_dictionary(n, cx),
        NodeRef::DataField(n) => visitor.visit_data_field(n, cx),
        NodeRef::TransformationDictionary(n) => visitor.visit_transformation_dictionary(n, cx),
        NodeRef::LocalTransformations(n) => visitor.visit_local_transformations(n, cx),
        NodeRef::DerivedField(n) => visitor.visit_derived_field(n, cx),
        NodeRef::DefineFunction(n) => visitor.visit_define_function(n, cx),
        NodeRef::ParameterField(n) => visitor.visit_parameter_field(n, cx),
        NodeRef::Constant(n) => visitor.visit_constant(n, cx),
        NodeRef::FieldRef(n) => visitor.visit_field_ref(n, cx),
        NodeRef::Apply(n) => visitor.visit_apply(n, cx),
        NodeRef::Model(n) => visitor.visit_model(n, cx),
        NodeRef::MiningSchema(n) => visitor.visit_mining_schema(n, cx),
        NodeRef::MiningField(n) => visitor.visit_mining_field(n, cx),
        NodeRef::Output(n) => visitor.visit_output(n, cx),
        NodeRef::OutputField(n) => visitor.visit_output_field(n, cx),
        NodeRef::Targets(n) => visitor.visit_targets(n, cx),
        NodeRef::Target(n) => visitor.visit_target(n, cx),
        NodeRef::TargetValue(n) => visitor.visit_target_value(n, cx),
        NodeRef::Segmentation(n) => visitor.visit_segmentation(n, cx),
        NodeRef::Segment(n) => visitor.visit_segment(n, cx),
        NodeRef::TruePredicate(n) => visitor.visit_true_predicate(n, cx),
        NodeRef::SimplePredicate(n) => visitor.visit_simple_predicate(n, cx),
        NodeRef::RegressionTable(n) => visitor.visit_regression_table(n, cx),
        NodeRef::NumericPredictor(n) => visitor.visit_numeric_predictor(n, cx),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expression::{Apply, Constant, FieldRef};
    use crate::node::{
        DataDictionary, DataField, DerivedField, Document, Header, TransformationDictionary,
    };
    use crate::node_ref::NodeKind;
    use crate::types::{DataType, OpType};
    use pretty_assertions::assert_eq;

    fn sample_document() -> Document {
        Document::new(
            "4.4",
            Header::new(),
            DataDictionary::new()
                .with_field(DataField::new("y", DataType::Double, OpType::Continuous))
                .with_field(DataField::new("x1", DataType::Double, OpType::Continuous)),
        )
        .with_transformation_dictionary(
            TransformationDictionary::new().with_derived_field(DerivedField::new(
                "x1_squared",
                DataType::Double,
                OpType::Continuous,
                Apply::new("*")
                    .with_arg(FieldRef::new("x1"))
                    .with_arg(FieldRef::new("x1")),
            )),
        )
    }

    #[derive(Default)]
    struct KindRecorder {
        visited: Vec<NodeKind>,
        departed: Vec<NodeKind>,
    }

    impl<'t> Visitor<'t> for KindRecorder {
        fn visit_node(&mut self, node: NodeRef<'t>, _cx: &Traversal<'t>) -> VisitFlow {
            self.visited.push(node.kind());
            VisitFlow::Continue
        }

        fn depart_node(&mut self, node: NodeRef<'t>, _cx: &Traversal<'t>) {
            self.departed.push(node.kind());
        }
    }

    #[test]
    fn visits_in_pre_order_document_order() {
        let doc = sample_document();
        let mut recorder = KindRecorder::default();
        let outcome = traverse(NodeRef::Document(&doc), &mut recorder);

        assert_eq!(outcome, Outcome::CompletedFully);
        assert_eq!(
            recorder.visited,
            vec![
                NodeKind::Document,
                NodeKind::Header,
                NodeKind::DataDictionary,
                NodeKind::DataField,
                NodeKind::DataField,
                NodeKind::TransformationDictionary,
                NodeKind::DerivedField,
                NodeKind::Apply,
                NodeKind::FieldRef,
                NodeKind::FieldRef,
            ]
        );
    }

    #[test]
    fn departures_run_post_order() {
        let doc = sample_document();
        let mut recorder = KindRecorder::default();
        traverse(NodeRef::Document(&doc), &mut recorder);

        assert_eq!(recorder.departed.len(), recorder.visited.len());
        assert_eq!(recorder.departed.first(), Some(&NodeKind::Header));
        assert_eq!(recorder.departed.last(), Some(&NodeKind::Document));
    }

    struct DictionarySkipper {
        visited: Vec<NodeKind>,
    }

    impl<'t> Visitor<'t> for DictionarySkipper {
        fn visit_node(&mut self, node: NodeRef<'t>, _cx: &Traversal<'t>) -> VisitFlow {
            self.visited.push(node.kind());
            if node.kind() == NodeKind::DataDictionary {
                VisitFlow::SkipChildren
            } else {
                VisitFlow::Continue
            }
        }
    }

    #[test]
    fn skip_children_prunes_only_the_subtree() {
        let doc = sample_document();
        let mut skipper = DictionarySkipper {
            visited: Vec::new(),
        };
        let outcome = traverse(NodeRef::Document(&doc), &mut skipper);

        assert_eq!(outcome, Outcome::CompletedFully);
        assert!(!skipper.visited.contains(&NodeKind::DataField));
        assert!(skipper.visited.contains(&NodeKind::DerivedField));
    }

    struct Terminator {
        visited: Vec<NodeKind>,
    }

    impl<'t> Visitor<'t> for Terminator {
        fn visit_node(&mut self, node: NodeRef<'t>, _cx: &Traversal<'t>) -> VisitFlow {
            self.visited.push(node.kind());
            if node.kind() == NodeKind::DataField {
                VisitFlow::Terminate
            } else {
                VisitFlow::Continue
            }
        }
    }

    #[test]
    fn terminate_aborts_the_whole_traversal() {
        let doc = sample_document();
        let mut terminator = Terminator {
            visited: Vec::new(),
        };
        let outcome = traverse(NodeRef::Document(&doc), &mut terminator);

        assert_eq!(outcome, Outcome::TerminatedEarly);
        assert_eq!(terminator.visited.last(), Some(&NodeKind::DataField));
        assert!(!terminator.visited.contains(&NodeKind::TransformationDictionary));
    }

    struct ParentChecker {
        checked: usize,
    }

    impl<'t> Visitor<'t> for ParentChecker {
        fn visit_field_ref(&mut self, _field_ref: &'t FieldRef, cx: &Traversal<'t>) -> VisitFlow {
            assert_eq!(cx.parent().map(NodeRef::kind), Some(NodeKind::Apply));
            assert_eq!(
                cx.parent_at(1).map(NodeRef::kind),
                Some(NodeKind::DerivedField)
            );
            assert_eq!(cx.parent_at(cx.depth()), None);
            self.checked += 1;
            VisitFlow::Continue
        }

        fn visit_document(&mut self, document: &'t Document, cx: &Traversal<'t>) -> VisitFlow {
            assert_eq!(cx.depth(), 0);
            assert_eq!(cx.parent().map(NodeRef::kind), None);
            self.visit_node(NodeRef::Document(document), cx)
        }
    }

    #[test]
    fn parent_stack_tracks_ancestry() {
        let doc = sample_document();
        let mut checker = ParentChecker { checked: 0 };
        traverse(NodeRef::Document(&doc), &mut checker);
        assert_eq!(checker.checked, 2);
    }

    #[test]
    fn ancestors_iterate_innermost_first() {
        struct AncestorCheck;

        impl<'t> Visitor<'t> for AncestorCheck {
            fn visit_constant(&mut self, _c: &'t Constant, cx: &Traversal<'t>) -> VisitFlow {
                let kinds: Vec<NodeKind> = cx.ancestors().map(NodeRef::kind).collect();
                assert_eq!(
                    kinds,
                    vec![
                        NodeKind::Apply,
                        NodeKind::DerivedField,
                        NodeKind::TransformationDictionary,
                        NodeKind::Document,
                    ]
                );
                VisitFlow::Continue
            }
        }

        let doc = Document::new("4.4", Header::new(), DataDictionary::new())
            .with_transformation_dictionary(
                TransformationDictionary::new().with_derived_field(DerivedField::new(
                    "two",
                    DataType::Integer,
                    OpType::Continuous,
                    Apply::new("+").with_arg(Constant::new("2")),
                )),
            );
        traverse(NodeRef::Document(&doc), &mut AncestorCheck);
    }
}
