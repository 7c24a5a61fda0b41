//! The read-only visitor trait.

use crate::expression::{Apply, Constant, FieldRef};
use crate::model::{
    MiningField, MiningSchema, Model, NumericPredictor, Output, OutputField, RegressionTable,
    Segment, Segmentation, SimplePredicate, Target, TargetValue, Targets, TruePredicate,
};
use crate::node::{
    DataDictionary, DataField, DefineFunction, DerivedField, Document, Header,
    LocalTransformations, ParameterField, TransformationDictionary,
};
use crate::node_ref::NodeRef;
use crate::visitor::walk::Traversal;

/// Control signal returned by each visit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VisitFlow {
    /// Descend into this node's children.
    #[default]
    Continue,
    /// Do not descend into this node's children; the traversal continues
    /// with the next sibling.
    SkipChildren,
    /// Abort the entire traversal immediately. No further nodes are
    /// visited and no departure hooks run while unwinding.
    Terminate,
}

/// Read-only tree visitor.
///
/// Every kind-specific method defaults to delegating into
/// [`Visitor::visit_node`], so an implementation overrides only the kinds
/// it cares about and still observes every node through the generic hook.
/// Kind-specific overrides conventionally end by calling `visit_node`
/// themselves, keeping the generic hook an every-node observation point.
///
/// [`Visitor::depart_node`] runs after a node's children have been visited
/// (immediately, for a visit that returned [`VisitFlow::SkipChildren`]);
/// it does not run for nodes unwound by [`VisitFlow::Terminate`].
pub trait Visitor<'t> {
    /// Generic hook, invoked for every node whose kind-specific method is
    /// not overridden. Defaults to [`VisitFlow::Continue`].
    fn visit_node(&mut self, node: NodeRef<'t>, cx: &Traversal<'t>) -> VisitFlow {
        let _ = (node, cx);
        VisitFlow::Continue
    }

    /// Post-order hook, invoked once a node's subtree is done.
    fn depart_node(&mut self, node: NodeRef<'t>, cx: &Traversal<'t>) {
        let _ = (node, cx);
    }

    fn visit_document(&mut self, document: &'t Document, cx: &Traversal<'t>) -> VisitFlow {
        self.visit_node(NodeRef::Document(document), cx)
    }

    fn visit_header(&mut self, header: &'t Header, cx: &Traversal<'t>) -> VisitFlow {
        self.visit_node(NodeRef::Header(header), cx)
    }

    fn visit_data_dictionary(
        &mut self,
        dictionary: &'t DataDictionary,
        cx: &Traversal<'t>,
    ) -> VisitFlow {
        self.visit_node(NodeRef::DataDictionary(dictionary), cx)
    }

    fn visit_data_field(&mut self, field: &'t DataField, cx: &Traversal<'t>) -> VisitFlow {
        self.visit_node(NodeRef::DataField(field), cx)
    }

    fn visit_transformation_dictionary(
        &mut self,
        dictionary: &'t TransformationDictionary,
        cx: &Traversal<'t>,
    ) -> VisitFlow {
        self.visit_node(NodeRef::TransformationDictionary(dictionary), cx)
    }

    fn visit_local_transformations(
        &mut self,
        transformations: &'t LocalTransformations,
        cx: &Traversal<'t>,
    ) -> VisitFlow {
        self.visit_node(NodeRef::LocalTransformations(transformations), cx)
    }

    fn visit_derived_field(&mut self, field: &'t DerivedField, cx: &Traversal<'t>) -> VisitFlow {
        self.visit_node(NodeRef::DerivedField(field), cx)
    }

    fn visit_define_function(
        &mut self,
        function: &'t DefineFunction,
        cx: &Traversal<'t>,
    ) -> VisitFlow {
        self.visit_node(NodeRef::DefineFunction(function), cx)
    }

    fn visit_parameter_field(
        &mut self,
        parameter: &'t ParameterField,
        cx: &Traversal<'t>,
    ) -> VisitFlow {
        self.visit_node(NodeRef::ParameterField(parameter), cx)
    }

    fn visit_constant(&mut self, constant: &'t Constant, cx: &Traversal<'t>) -> VisitFlow {
        self.visit_node(NodeRef::Constant(constant), cx)
    }

    fn visit_field_ref(&mut self, field_ref: &'t FieldRef, cx: &Traversal<'t>) -> VisitFlow {
        self.visit_node(NodeRef::FieldRef(field_ref), cx)
    }

    fn visit_apply(&mut self, apply: &'t Apply, cx: &Traversal<'t>) -> VisitFlow {
        self.visit_node(NodeRef::Apply(apply), cx)
    }

    fn visit_model(&mut self, model: &'t Model, cx: &Traversal<'t>) -> VisitFlow {
        self.visit_node(NodeRef::Model(model), cx)
    }

    fn visit_mining_schema(&mut self, schema: &'t MiningSchema, cx: &Traversal<'t>) -> VisitFlow {
        self.visit_node(NodeRef::MiningSchema(schema), cx)
    }

    fn visit_mining_field(&mut self, field: &'t MiningField, cx: &Traversal<'t>) -> VisitFlow {
        self.visit_node(NodeRef::MiningField(field), cx)
    }

    fn visit_output(&mut self, output: &'t Output, cx: &Traversal<'t>) -> VisitFlow {
        self.visit_node(NodeRef::Output(output), cx)
    }

    fn visit_output_field(&mut self, field: &'t OutputField, cx: &Traversal<'t>) -> VisitFlow {
        self.visit_node(NodeRef::OutputField(field), cx)
    }

    fn visit_targets(&mut self, targets: &'t Targets, cx: &Traversal<'t>) -> VisitFlow {
        self.visit_node(NodeRef::Targets(targets), cx)
    }

    fn visit_target(&mut self, target: &'t Target, cx: &Traversal<'t>) -> VisitFlow {
        self.visit_node(NodeRef::Target(target), cx)
    }

    fn visit_target_value(&mut self, value: &'t TargetValue, cx: &Traversal<'t>) -> VisitFlow {
        self.visit_node(NodeRef::TargetValue(value), cx)
    }

    fn visit_segmentation(
        &mut self,
        segmentation: &'t Segmentation,
        cx: &Traversal<'t>,
    ) -> VisitFlow {
        self.visit_node(NodeRef::Segmentation(segmentation), cx)
    }

    fn visit_segment(&mut self, segment: &'t Segment, cx: &Traversal<'t>) -> VisitFlow {
        self.visit_node(NodeRef::Segment(segment), cx)
    }

    fn visit_true_predicate(
        &mut self,
        predicate: &'t TruePredicate,
        cx: &Traversal<'t>,
    ) -> VisitFlow {
        self.visit_node(NodeRef::TruePredicate(predicate), cx)
    }

    fn visit_simple_predicate(
        &mut self,
        predicate: &'t SimplePredicate,
        cx: &Traversal<'t>,
    ) -> VisitFlow {
        self.visit_node(NodeRef::SimplePredicate(predicate), cx)
    }

    fn visit_regression_table(
        &mut self,
        table: &'t RegressionTable,
        cx: &Traversal<'t>,
    ) -> VisitFlow {
        self.visit_node(NodeRef::RegressionTable(table), cx)
    }

    fn visit_numeric_predictor(
        &mut self,
        predictor: &'t NumericPredictor,
        cx: &Traversal<'t>,
    ) -> VisitFlow {
        self.visit_node(NodeRef::NumericPredictor(predictor), cx)
    }
}
