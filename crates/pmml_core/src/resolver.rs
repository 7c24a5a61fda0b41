//! Field resolution: which fields are visible where.
//!
//! The resolver is a traversal-engine client. It opens a frame on entry to
//! each scope-boundary node (document, model, function definition,
//! segmentation, segment), records declarations as they are encountered,
//! and closes the frame when the node's subtree is done. Callers hook an
//! observer closure that runs at every node after scope maintenance and
//! can query the visible set there; the resolver itself never judges
//! whether a reference resolves.
//!
//! Declaration timing carries the scoping rules:
//!
//! - data-dictionary fields are visible from their declaration on;
//! - a derived field publishes itself only once its own defining
//!   expression has been visited, so the expression sees earlier
//!   declarations but never itself or later siblings;
//! - a segment's output fields defer until the segment exits and then
//!   publish to the enclosing segmentation, so chained segments see their
//!   predecessors' outputs but a segment never sees its own;
//! - function parameters live in an isolated frame: a function body sees
//!   its parameters and nothing else.

use std::collections::BTreeSet;

use pmml_ast::{
    DataField, DefineFunction, Document, Field, FieldOrigin, Model, NodeKind, NodeRef, Outcome,
    ParameterField, Segment, Segmentation, Traversal, VisitFlow, Visitor, traverse,
};
use tracing::debug;

use crate::error::ScopeError;
use crate::scope::{FrameKind, ScopeStack};

/// Resolves the set of fields visible at each point of a document tree.
///
/// The visible set is meaningful only while [`FieldResolver::resolve`] is
/// driving a traversal; after a completed run every frame has been popped
/// again and [`FieldResolver::visible_fields`] is empty.
#[derive(Debug, Default)]
pub struct FieldResolver {
    scopes: ScopeStack,
}

impl FieldResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// The fields visible at the node currently being visited.
    pub fn visible_fields(&self) -> Vec<&Field> {
        self.scopes.visible_fields()
    }

    /// The visible field names, sorted.
    pub fn visible_names(&self) -> BTreeSet<&str> {
        self.scopes.visible_names()
    }

    /// Number of currently open scope frames.
    pub fn scope_depth(&self) -> usize {
        self.scopes.depth()
    }

    /// Walks the document, maintaining scopes, and calls `observer` at
    /// every node. The observer receives the node, the traversal context
    /// (for ancestor lookups), and the scope stack (for visibility
    /// queries), and steers the walk through its returned [`VisitFlow`].
    ///
    /// Any previous state is discarded at the start of each call. On
    /// [`Outcome::CompletedFully`] the scope stack is balanced back to
    /// empty; an observer that returns [`VisitFlow::Terminate`] aborts
    /// mid-flight and may leave frames open until the next call.
    pub fn resolve<'t, F>(
        &mut self,
        document: &'t Document,
        observer: F,
    ) -> Result<Outcome, ScopeError>
    where
        F: FnMut(NodeRef<'t>, &Traversal<'t>, &ScopeStack) -> VisitFlow,
    {
        self.scopes.clear();
        let mut visitor = ResolverVisitor {
            scopes: &mut self.scopes,
            observer,
            error: None,
        };
        let outcome = traverse(NodeRef::Document(document), &mut visitor);
        match visitor.error {
            Some(error) => Err(error),
            None => Ok(outcome),
        }
    }
}

struct ResolverVisitor<'s, F> {
    scopes: &'s mut ScopeStack,
    observer: F,
    error: Option<ScopeError>,
}

impl<F> ResolverVisitor<'_, F> {
    fn fail(&mut self, error: ScopeError) -> VisitFlow {
        debug!(%error, "aborting field resolution");
        self.error = Some(error);
        VisitFlow::Terminate
    }

    fn enclosing<'t>(
        &self,
        cx: &Traversal<'t>,
        depth: usize,
        kind: NodeKind,
    ) -> Result<NodeRef<'t>, ScopeError> {
        cx.parent_at(depth)
            .ok_or(ScopeError::MissingOwner { kind, depth })
    }

    fn declare_in_enclosing(
        &mut self,
        cx: &Traversal<'_>,
        depth: usize,
        kind: NodeKind,
        field: Field,
    ) -> Result<(), ScopeError> {
        let owner = self.enclosing(cx, depth, kind)?;
        self.scopes.declare(owner.id(), owner.kind(), field)
    }

    fn depart(&mut self, node: NodeRef<'_>, cx: &Traversal<'_>) -> Result<(), ScopeError> {
        match node {
            NodeRef::Document(_)
            | NodeRef::Model(_)
            | NodeRef::DefineFunction(_)
            | NodeRef::Segmentation(_) => {
                self.scopes.pop(node.id(), node.kind())?;
            }
            NodeRef::Segment(_) => {
                let deferred = self.scopes.pop(node.id(), NodeKind::Segment)?;
                self.scopes
                    .publish_to_innermost(NodeKind::Segmentation, deferred)?;
            }
            NodeRef::DerivedField(field) => {
                // Published only now, after the defining expression: the
                // expression saw earlier declarations but not this field.
                let record = Field::new(
                    &field.name,
                    Some(field.data_type),
                    Some(field.op_type),
                    FieldOrigin::DerivedField,
                );
                self.declare_in_enclosing(cx, 1, NodeKind::DerivedField, record)?;
            }
            NodeRef::OutputField(field) => {
                let record = Field::new(
                    &field.name,
                    field.data_type,
                    field.op_type,
                    FieldOrigin::OutputField,
                );
                // Inside an ensemble, outputs surface to subsequent
                // sibling segments; a standalone model keeps its own.
                if let Err(record) = self.scopes.defer_in_innermost(NodeKind::Segment, record) {
                    self.declare_in_enclosing(cx, 1, NodeKind::OutputField, record)?;
                }
            }
            _ => {}
        }
        Ok(())
    }
}

impl<'t, F> Visitor<'t> for ResolverVisitor<'_, F>
where
    F: FnMut(NodeRef<'t>, &Traversal<'t>, &ScopeStack) -> VisitFlow,
{
    fn visit_node(&mut self, node: NodeRef<'t>, cx: &Traversal<'t>) -> VisitFlow {
        if self.error.is_some() {
            return VisitFlow::Terminate;
        }
        (self.observer)(node, cx, self.scopes)
    }

    fn depart_node(&mut self, node: NodeRef<'t>, cx: &Traversal<'t>) {
        if self.error.is_some() {
            return;
        }
        if let Err(error) = self.depart(node, cx) {
            debug!(%error, "aborting field resolution");
            self.error = Some(error);
        }
    }

    fn visit_document(&mut self, document: &'t Document, cx: &Traversal<'t>) -> VisitFlow {
        let node = NodeRef::Document(document);
        self.scopes.push(node.id(), NodeKind::Document, FrameKind::Additive);
        self.visit_node(node, cx)
    }

    fn visit_model(&mut self, model: &'t Model, cx: &Traversal<'t>) -> VisitFlow {
        let node = NodeRef::Model(model);
        self.scopes.push(node.id(), NodeKind::Model, FrameKind::Additive);
        self.visit_node(node, cx)
    }

    fn visit_segmentation(
        &mut self,
        segmentation: &'t Segmentation,
        cx: &Traversal<'t>,
    ) -> VisitFlow {
        let node = NodeRef::Segmentation(segmentation);
        self.scopes
            .push(node.id(), NodeKind::Segmentation, FrameKind::Additive);
        self.visit_node(node, cx)
    }

    fn visit_segment(&mut self, segment: &'t Segment, cx: &Traversal<'t>) -> VisitFlow {
        let node = NodeRef::Segment(segment);
        self.scopes.push(node.id(), NodeKind::Segment, FrameKind::Additive);
        self.visit_node(node, cx)
    }

    fn visit_define_function(
        &mut self,
        function: &'t DefineFunction,
        cx: &Traversal<'t>,
    ) -> VisitFlow {
        let node = NodeRef::DefineFunction(function);
        self.scopes
            .push(node.id(), NodeKind::DefineFunction, FrameKind::Isolated);
        self.visit_node(node, cx)
    }

    fn visit_data_field(&mut self, field: &'t DataField, cx: &Traversal<'t>) -> VisitFlow {
        let record = Field::new(
            &field.name,
            Some(field.data_type),
            Some(field.op_type),
            FieldOrigin::DataDictionary,
        );
        if let Err(error) = self.declare_in_enclosing(cx, 1, NodeKind::DataField, record) {
            return self.fail(error);
        }
        self.visit_node(NodeRef::DataField(field), cx)
    }

    fn visit_parameter_field(
        &mut self,
        parameter: &'t ParameterField,
        cx: &Traversal<'t>,
    ) -> VisitFlow {
        let record = Field::new(
            &parameter.name,
            parameter.data_type,
            parameter.op_type,
            FieldOrigin::Parameter,
        );
        if let Err(error) = self.declare_in_enclosing(cx, 0, NodeKind::ParameterField, record) {
            return self.fail(error);
        }
        self.visit_node(NodeRef::ParameterField(parameter), cx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pmml_ast::{
        Apply, DataDictionary, DataType, DerivedField, FieldRef, Header, OpType,
        TransformationDictionary,
    };
    use pretty_assertions::assert_eq;

    fn document_with_derived_fields() -> Document {
        Document::new(
            "4.4",
            Header::new(),
            DataDictionary::new()
                .with_field(DataField::new("y", DataType::Double, OpType::Continuous))
                .with_field(DataField::new("x1", DataType::Double, OpType::Continuous)),
        )
        .with_transformation_dictionary(
            TransformationDictionary::new()
                .with_derived_field(DerivedField::new(
                    "x1_squared",
                    DataType::Double,
                    OpType::Continuous,
                    Apply::new("*")
                        .with_arg(FieldRef::new("x1"))
                        .with_arg(FieldRef::new("x1")),
                ))
                .with_derived_field(DerivedField::new(
                    "x1_cubed",
                    DataType::Double,
                    OpType::Continuous,
                    Apply::new("*")
                        .with_arg(FieldRef::new("x1_squared"))
                        .with_arg(FieldRef::new("x1")),
                )),
        )
    }

    #[test]
    fn derived_field_expressions_see_only_earlier_declarations() {
        let document = document_with_derived_fields();
        let mut resolver = FieldResolver::new();
        let mut observed = Vec::new();

        resolver
            .resolve(&document, |node, cx, scopes| {
                if let NodeRef::Apply(_) = node {
                    let enclosing = cx.parent().and_then(|parent| match parent {
                        NodeRef::DerivedField(field) => Some(field.name.clone()),
                        _ => None,
                    });
                    let names: Vec<String> = scopes
                        .visible_names()
                        .into_iter()
                        .map(str::to_string)
                        .collect();
                    observed.push((enclosing, names));
                }
                VisitFlow::Continue
            })
            .unwrap();

        assert_eq!(
            observed,
            vec![
                (
                    Some("x1_squared".to_string()),
                    vec!["x1".to_string(), "y".to_string()],
                ),
                (
                    Some("x1_cubed".to_string()),
                    vec!["x1".to_string(), "x1_squared".to_string(), "y".to_string()],
                ),
            ]
        );
    }

    #[test]
    fn completed_resolution_leaves_no_open_scopes() {
        let document = document_with_derived_fields();
        let mut resolver = FieldResolver::new();
        let outcome = resolver
            .resolve(&document, |_, _, _| VisitFlow::Continue)
            .unwrap();

        assert_eq!(outcome, Outcome::CompletedFully);
        assert_eq!(resolver.scope_depth(), 0);
        assert!(resolver.visible_fields().is_empty());
    }

    #[test]
    fn observer_can_terminate_early() {
        let document = document_with_derived_fields();
        let mut resolver = FieldResolver::new();
        let outcome = resolver
            .resolve(&document, |node, _, _| {
                if node.kind() == NodeKind::DataField {
                    VisitFlow::Terminate
                } else {
                    VisitFlow::Continue
                }
            })
            .unwrap();

        assert_eq!(outcome, Outcome::TerminatedEarly);
    }

    #[test]
    fn resolver_resets_between_runs() {
        let document = document_with_derived_fields();
        let mut resolver = FieldResolver::new();

        resolver
            .resolve(&document, |node, _, _| {
                if node.kind() == NodeKind::DerivedField {
                    VisitFlow::Terminate
                } else {
                    VisitFlow::Continue
                }
            })
            .unwrap();
        // Terminated mid-flight: frames may still be open.
        assert!(resolver.scope_depth() > 0);

        let outcome = resolver
            .resolve(&document, |_, _, _| VisitFlow::Continue)
            .unwrap();
        assert_eq!(outcome, Outcome::CompletedFully);
        assert_eq!(resolver.scope_depth(), 0);
    }
}
