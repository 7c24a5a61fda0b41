//! The uniform node view consumed by the traversal engine.
//!
//! [`NodeRef`] is a borrowed tagged variant over every node kind in the
//! catalogue. The engine needs exactly three capabilities from it: the
//! kind tag, the ordered children, and named attribute access. Dispatch
//! over the closed set is exhaustive, so an unhandled kind is a compile
//! error rather than a silently skipped subtree.

use std::fmt;

use serde::Serialize;

use crate::expression::{Apply, Constant, Expression, FieldRef};
use crate::model::{
    MiningField, MiningSchema, Model, NumericPredictor, Output, OutputField, Predicate,
    RegressionTable, Segment, Segmentation, SimplePredicate, Target, TargetValue, Targets,
    TruePredicate,
};
use crate::node::{
    DataDictionary, DataField, DefineFunction, DerivedField, Document, Header,
    LocalTransformations, ParameterField, TransformationDictionary,
};

/// Kind tag of a document node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum NodeKind {
    Document,
    Header,
    DataDictionary,
    DataField,
    TransformationDictionary,
    LocalTransformations,
    DerivedField,
    DefineFunction,
    ParameterField,
    Constant,
    FieldRef,
    Apply,
    Model,
    MiningSchema,
    MiningField,
    Output,
    OutputField,
    Targets,
    Target,
    TargetValue,
    Segmentation,
    Segment,
    TruePredicate,
    SimplePredicate,
    RegressionTable,
    NumericPredictor,
}

impl NodeKind {
    /// Returns the element name of this kind.
    pub const fn as_str(self) -> &'static str {
        match self {
            NodeKind::Document => "Document",
            NodeKind::Header => "Header",
            NodeKind::DataDictionary => "DataDictionary",
            NodeKind::DataField => "DataField",
            NodeKind::TransformationDictionary => "TransformationDictionary",
            NodeKind::LocalTransformations => "LocalTransformations",
            NodeKind::DerivedField => "DerivedField",
            NodeKind::DefineFunction => "DefineFunction",
            NodeKind::ParameterField => "ParameterField",
            NodeKind::Constant => "Constant",
            NodeKind::FieldRef => "FieldRef",
            NodeKind::Apply => "Apply",
            NodeKind::Model => "Model",
            NodeKind::MiningSchema => "MiningSchema",
            NodeKind::MiningField => "MiningField",
            NodeKind::Output => "Output",
            NodeKind::OutputField => "OutputField",
            NodeKind::Targets => "Targets",
            NodeKind::Target => "Target",
            NodeKind::TargetValue => "TargetValue",
            NodeKind::Segmentation => "Segmentation",
            NodeKind::Segment => "Segment",
            NodeKind::TruePredicate => "True",
            NodeKind::SimplePredicate => "SimplePredicate",
            NodeKind::RegressionTable => "RegressionTable",
            NodeKind::NumericPredictor => "NumericPredictor",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Opaque node identity, valid for the lifetime of the borrowed tree.
///
/// Compares by address and kind; the kind disambiguates a node from a
/// child struct laid out at its first byte. Analyses use this to tie
/// per-node bookkeeping (such as scope frames) back to the node that
/// created it without storing parent pointers in the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize, NodeKind);

/// A typed attribute value surfaced through [`NodeRef::attr`].
///
/// Collection-valued attributes surface as [`AttrValue::Count`] so rule
/// predicates can test for non-emptiness without knowing element types.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AttrValue<'a> {
    Str(&'a str),
    Bool(bool),
    Int(i64),
    Float(f64),
    Count(usize),
}

impl<'a> AttrValue<'a> {
    /// Returns the string payload, if this is a string attribute.
    pub fn as_str(self) -> Option<&'a str> {
        match self {
            AttrValue::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Returns true for a non-empty collection attribute.
    pub fn is_non_empty(self) -> bool {
        matches!(self, AttrValue::Count(n) if n > 0)
    }
}

/// A borrowed, uniformly typed view of any node in the tree.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NodeRef<'a> {
    Document(&'a Document),
    Header(&'a Header),
    DataDictionary(&'a DataDictionary),
    DataField(&'a DataField),
    TransformationDictionary(&'a TransformationDictionary),
    LocalTransformations(&'a LocalTransformations),
    DerivedField(&'a DerivedField),
    DefineFunction(&'a DefineFunction),
    ParameterField(&'a ParameterField),
    Constant(&'a Constant),
    FieldRef(&'a FieldRef),
    Apply(&'a Apply),
    Model(&'a Model),
    MiningSchema(&'a MiningSchema),
    MiningField(&'a MiningField),
    Output(&'a Output),
    OutputField(&'a OutputField),
    Targets(&'a Targets),
    Target(&'a Target),
    TargetValue(&'a TargetValue),
    Segmentation(&'a Segmentation),
    Segment(&'a Segment),
    TruePredicate(&'a TruePredicate),
    SimplePredicate(&'a SimplePredicate),
    RegressionTable(&'a RegressionTable),
    NumericPredictor(&'a NumericPredictor),
}

impl<'a> NodeRef<'a> {
    /// Returns the kind tag of this node.
    pub const fn kind(self) -> NodeKind {
        match self {
            NodeRef::Document(_) => NodeKind::Document,
            NodeRef::Header(_) => NodeKind::Header,
            NodeRef::DataDictionary(_) => NodeKind::DataDictionary,
            NodeRef::DataField(_) => NodeKind::DataField,
            NodeRef::TransformationDictionary(_) => NodeKind::TransformationDictionary,
            NodeRef::LocalTransformations(_) => NodeKind::LocalTransformations,
            NodeRef::DerivedField(_) => NodeKind::DerivedField,
            NodeRef::DefineFunction(_) => NodeKind::DefineFunction,
            NodeRef::ParameterField(_) => NodeKind::ParameterField,
            NodeRef::Constant(_) => NodeKind::Constant,
            NodeRef::FieldRef(_) => NodeKind::FieldRef,
            NodeRef::Apply(_) => NodeKind::Apply,
            NodeRef::Model(_) => NodeKind::Model,
            NodeRef::MiningSchema(_) => NodeKind::MiningSchema,
            NodeRef::MiningField(_) => NodeKind::MiningField,
            NodeRef::Output(_) => NodeKind::Output,
            NodeRef::OutputField(_) => NodeKind::OutputField,
            NodeRef::Targets(_) => NodeKind::Targets,
            NodeRef::Target(_) => NodeKind::Target,
            NodeRef::TargetValue(_) => NodeKind::TargetValue,
            NodeRef::Segmentation(_) => NodeKind::Segmentation,
            NodeRef::Segment(_) => NodeKind::Segment,
            NodeRef::TruePredicate(_) => NodeKind::TruePredicate,
            NodeRef::SimplePredicate(_) => NodeKind::SimplePredicate,
            NodeRef::RegressionTable(_) => NodeKind::RegressionTable,
            NodeRef::NumericPredictor(_) => NodeKind::NumericPredictor,
        }
    }

    /// Returns this node's identity token.
    pub fn id(self) -> NodeId {
        fn addr<T>(node: &T) -> usize {
            node as *const T as usize
        }

        let addr = match self {
            NodeRef::Document(n) => addr(n),
            NodeRef::Header(n) => addr(n),
            NodeRef::DataDictionary(n) => addr(n),
            NodeRef::DataField(n) => addr(n),
            NodeRef::TransformationDictionary(n) => addr(n),
            NodeRef::LocalTransformations(n) => addr(n),
            NodeRef::DerivedField(n) => addr(n),
            NodeRef::DefineFunction(n) => addr(n),
            NodeRef::ParameterField(n) => addr(n),
            NodeRef::Constant(n) => addr(n),
            NodeRef::FieldRef(n) => addr(n),
            NodeRef::Apply(n) => addr(n),
            NodeRef::Model(n) => addr(n),
            NodeRef::MiningSchema(n) => addr(n),
            NodeRef::MiningField(n) => addr(n),
            NodeRef::Output(n) => addr(n),
            NodeRef::OutputField(n) => addr(n),
            NodeRef::Targets(n) => addr(n),
            NodeRef::Target(n) => addr(n),
            NodeRef::TargetValue(n) => addr(n),
            NodeRef::Segmentation(n) => addr(n),
            NodeRef::Segment(n) => addr(n),
            NodeRef::TruePredicate(n) => addr(n),
            NodeRef::SimplePredicate(n) => addr(n),
            NodeRef::RegressionTable(n) => addr(n),
            NodeRef::NumericPredictor(n) => addr(n),
        };
        NodeId(addr, self.kind())
    }

    /// Returns the children in document order.
    pub fn children(self) -> Vec<NodeRef<'a>> {
        match self {
            NodeRef::Document(doc) => {
                let mut children = vec![
                    NodeRef::Header(&doc.header),
                    NodeRef::DataDictionary(&doc.data_dictionary),
                ];
                if let Some(dictionary) = &doc.transformation_dictionary {
                    children.push(NodeRef::TransformationDictionary(dictionary));
                }
                children.extend(doc.models.iter().map(NodeRef::Model));
                children
            }
            NodeRef::Header(_) => Vec::new(),
            NodeRef::DataDictionary(dictionary) => {
                dictionary.fields.iter().map(NodeRef::DataField).collect()
            }
            NodeRef::DataField(_) => Vec::new(),
            NodeRef::TransformationDictionary(dictionary) => {
                let mut children: Vec<NodeRef<'a>> = dictionary
                    .derived_fields
                    .iter()
                    .map(NodeRef::DerivedField)
                    .collect();
                children.extend(dictionary.define_functions.iter().map(NodeRef::DefineFunction));
                children
            }
            NodeRef::LocalTransformations(transformations) => transformations
                .derived_fields
                .iter()
                .map(NodeRef::DerivedField)
                .collect(),
            NodeRef::DerivedField(field) => vec![field.expression.as_node()],
            NodeRef::DefineFunction(function) => {
                let mut children: Vec<NodeRef<'a>> = function
                    .parameters
                    .iter()
                    .map(NodeRef::ParameterField)
                    .collect();
                children.push(function.expression.as_node());
                children
            }
            NodeRef::ParameterField(_) => Vec::new(),
            NodeRef::Constant(_) => Vec::new(),
            NodeRef::FieldRef(_) => Vec::new(),
            NodeRef::Apply(apply) => apply.args.iter().map(Expression::as_node).collect(),
            NodeRef::Model(model) => {
                let mut children = Vec::new();
                if let Some(schema) = &model.mining_schema {
                    children.push(NodeRef::MiningSchema(schema));
                }
                if let Some(output) = &model.output {
                    children.push(NodeRef::Output(output));
                }
                if let Some(targets) = &model.targets {
                    children.push(NodeRef::Targets(targets));
                }
                if let Some(transformations) = &model.local_transformations {
                    children.push(NodeRef::LocalTransformations(transformations));
                }
                children.extend(model.regression_tables.iter().map(NodeRef::RegressionTable));
                if let Some(segmentation) = &model.segmentation {
                    children.push(NodeRef::Segmentation(segmentation));
                }
                children
            }
            NodeRef::MiningSchema(schema) => {
                schema.fields.iter().map(NodeRef::MiningField).collect()
            }
            NodeRef::MiningField(_) => Vec::new(),
            NodeRef::Output(output) => output.fields.iter().map(NodeRef::OutputField).collect(),
            NodeRef::OutputField(_) => Vec::new(),
            NodeRef::Targets(targets) => targets.targets.iter().map(NodeRef::Target).collect(),
            NodeRef::Target(target) => target.values.iter().map(NodeRef::TargetValue).collect(),
            NodeRef::TargetValue(_) => Vec::new(),
            NodeRef::Segmentation(segmentation) => {
                segmentation.segments.iter().map(NodeRef::Segment).collect()
            }
            NodeRef::Segment(segment) => {
                vec![segment.predicate.as_node(), NodeRef::Model(&segment.model)]
            }
            NodeRef::TruePredicate(_) => Vec::new(),
            NodeRef::SimplePredicate(_) => Vec::new(),
            NodeRef::RegressionTable(table) => table
                .predictors
                .iter()
                .map(NodeRef::NumericPredictor)
                .collect(),
            NodeRef::NumericPredictor(_) => Vec::new(),
        }
    }

    /// Looks up a named attribute by its schema spelling.
    ///
    /// Returns `None` both for attribute names a kind does not carry and
    /// for optional attributes that are absent on this node.
    pub fn attr(self, name: &str) -> Option<AttrValue<'a>> {
        match self {
            NodeRef::Document(doc) => match name {
                "version" => Some(AttrValue::Str(&doc.version)),
                _ => None,
            },
            NodeRef::Header(header) => match name {
                "copyright" => header.copyright.as_deref().map(AttrValue::Str),
                "description" => header.description.as_deref().map(AttrValue::Str),
                _ => None,
            },
            NodeRef::DataDictionary(dictionary) => match name {
                "numberOfFields" => Some(AttrValue::Count(dictionary.fields.len())),
                _ => None,
            },
            NodeRef::DataField(field) => match name {
                "name" => Some(AttrValue::Str(&field.name)),
                "dataType" => Some(AttrValue::Str(field.data_type.as_str())),
                "opType" => Some(AttrValue::Str(field.op_type.as_str())),
                "cyclic" => field.cyclic.map(AttrValue::Bool),
                _ => None,
            },
            NodeRef::TransformationDictionary(_) => None,
            NodeRef::LocalTransformations(transformations) => match name {
                "derivedFields" => Some(AttrValue::Count(transformations.derived_fields.len())),
                _ => None,
            },
            NodeRef::DerivedField(field) => match name {
                "name" => Some(AttrValue::Str(&field.name)),
                "dataType" => Some(AttrValue::Str(field.data_type.as_str())),
                "opType" => Some(AttrValue::Str(field.op_type.as_str())),
                _ => None,
            },
            NodeRef::DefineFunction(function) => match name {
                "name" => Some(AttrValue::Str(&function.name)),
                "opType" => Some(AttrValue::Str(function.op_type.as_str())),
                "dataType" => function.data_type.map(|t| AttrValue::Str(t.as_str())),
                _ => None,
            },
            NodeRef::ParameterField(parameter) => match name {
                "name" => Some(AttrValue::Str(&parameter.name)),
                "dataType" => parameter.data_type.map(|t| AttrValue::Str(t.as_str())),
                "opType" => parameter.op_type.map(|t| AttrValue::Str(t.as_str())),
                _ => None,
            },
            NodeRef::Constant(constant) => match name {
                "dataType" => constant.data_type.map(|t| AttrValue::Str(t.as_str())),
                "missing" => Some(AttrValue::Bool(constant.missing)),
                _ => None,
            },
            NodeRef::FieldRef(field_ref) => match name {
                "field" => Some(AttrValue::Str(&field_ref.field)),
                _ => None,
            },
            NodeRef::Apply(apply) => match name {
                "function" => Some(AttrValue::Str(&apply.function)),
                "invalidValueTreatment" => apply
                    .invalid_value_treatment
                    .as_deref()
                    .map(AttrValue::Str),
                "args" => Some(AttrValue::Count(apply.args.len())),
                _ => None,
            },
            NodeRef::Model(model) => match name {
                "kind" => Some(AttrValue::Str(model.kind.as_str())),
                "functionName" => Some(AttrValue::Str(model.function.as_str())),
                "modelName" => model.model_name.as_deref().map(AttrValue::Str),
                "algorithmName" => model.algorithm_name.as_deref().map(AttrValue::Str),
                "scorable" => model.scorable.map(AttrValue::Bool),
                _ => None,
            },
            NodeRef::MiningSchema(schema) => match name {
                "miningFields" => Some(AttrValue::Count(schema.fields.len())),
                _ => None,
            },
            NodeRef::MiningField(field) => match name {
                "name" => Some(AttrValue::Str(&field.name)),
                "usageType" => field.usage.map(|u| AttrValue::Str(u.as_str())),
                _ => None,
            },
            NodeRef::Output(output) => match name {
                "outputFields" => Some(AttrValue::Count(output.fields.len())),
                _ => None,
            },
            NodeRef::OutputField(field) => match name {
                "name" => Some(AttrValue::Str(&field.name)),
                "feature" => field.feature.map(|f| AttrValue::Str(f.as_str())),
                "dataType" => field.data_type.map(|t| AttrValue::Str(t.as_str())),
                "opType" => field.op_type.map(|t| AttrValue::Str(t.as_str())),
                "segmentId" => field.segment_id.as_deref().map(AttrValue::Str),
                _ => None,
            },
            NodeRef::Targets(targets) => match name {
                "targets" => Some(AttrValue::Count(targets.targets.len())),
                _ => None,
            },
            NodeRef::Target(target) => match name {
                "field" => target.field.as_deref().map(AttrValue::Str),
                "targetValues" => Some(AttrValue::Count(target.values.len())),
                _ => None,
            },
            NodeRef::TargetValue(value) => match name {
                "value" => value.value.as_deref().map(AttrValue::Str),
                "displayValue" => value.display_value.as_deref().map(AttrValue::Str),
                "priorProbability" => value.prior_probability.map(AttrValue::Float),
                _ => None,
            },
            NodeRef::Segmentation(segmentation) => match name {
                "multipleModelMethod" => Some(AttrValue::Str(segmentation.method.as_str())),
                "segments" => Some(AttrValue::Count(segmentation.segments.len())),
                _ => None,
            },
            NodeRef::Segment(segment) => match name {
                "id" => segment.id.as_deref().map(AttrValue::Str),
                "weight" => segment.weight.map(AttrValue::Float),
                _ => None,
            },
            NodeRef::TruePredicate(_) => None,
            NodeRef::SimplePredicate(predicate) => match name {
                "field" => Some(AttrValue::Str(&predicate.field)),
                "operator" => Some(AttrValue::Str(predicate.operator.as_str())),
                "value" => predicate.value.as_deref().map(AttrValue::Str),
                _ => None,
            },
            NodeRef::RegressionTable(table) => match name {
                "intercept" => Some(AttrValue::Float(table.intercept)),
                "targetCategory" => table.target_category.as_deref().map(AttrValue::Str),
                "predictors" => Some(AttrValue::Count(table.predictors.len())),
                _ => None,
            },
            NodeRef::NumericPredictor(predictor) => match name {
                "name" => Some(AttrValue::Str(&predictor.name)),
                "exponent" => predictor.exponent.map(|e| AttrValue::Int(e as i64)),
                "coefficient" => Some(AttrValue::Float(predictor.coefficient)),
                _ => None,
            },
        }
    }
}

impl Expression {
    /// Returns the uniform view of this expression node.
    pub fn as_node(&self) -> NodeRef<'_> {
        match self {
            Expression::Constant(constant) => NodeRef::Constant(constant),
            Expression::FieldRef(field_ref) => NodeRef::FieldRef(field_ref),
            Expression::Apply(apply) => NodeRef::Apply(apply),
        }
    }
}

impl Predicate {
    /// Returns the uniform view of this predicate node.
    pub fn as_node(&self) -> NodeRef<'_> {
        match self {
            Predicate::True(predicate) => NodeRef::TruePredicate(predicate),
            Predicate::Simple(predicate) => NodeRef::SimplePredicate(predicate),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{DataDictionary, DataField, Document, Header};
    use crate::types::{DataType, MiningFunction, ModelKind, OpType};
    use pretty_assertions::assert_eq;

    fn sample_document() -> Document {
        Document::new(
            "4.4",
            Header::new().with_copyright("ACME Corporation"),
            DataDictionary::new()
                .with_field(DataField::new("y", DataType::Double, OpType::Continuous))
                .with_field(DataField::new("x1", DataType::Double, OpType::Continuous)),
        )
        .with_model(Model::new(ModelKind::Regression, MiningFunction::Regression))
    }

    #[test]
    fn document_children_are_in_document_order() {
        let doc = sample_document();
        let kinds: Vec<NodeKind> = NodeRef::Document(&doc)
            .children()
            .into_iter()
            .map(NodeRef::kind)
            .collect();
        assert_eq!(
            kinds,
            vec![NodeKind::Header, NodeKind::DataDictionary, NodeKind::Model]
        );
    }

    #[test]
    fn model_children_follow_schema_sequence() {
        let model = Model::new(ModelKind::Regression, MiningFunction::Regression)
            .with_mining_schema(MiningSchema::new().with_field(MiningField::new("y")))
            .with_output(Output::new().with_field(OutputField::new("prediction")))
            .with_local_transformations(crate::node::LocalTransformations::new())
            .with_regression_table(RegressionTable::new(0.5));
        let kinds: Vec<NodeKind> = NodeRef::Model(&model)
            .children()
            .into_iter()
            .map(NodeRef::kind)
            .collect();
        assert_eq!(
            kinds,
            vec![
                NodeKind::MiningSchema,
                NodeKind::Output,
                NodeKind::LocalTransformations,
                NodeKind::RegressionTable,
            ]
        );
    }

    #[test]
    fn attributes_resolve_by_schema_spelling() {
        let doc = sample_document();
        let root = NodeRef::Document(&doc);
        assert_eq!(root.attr("version"), Some(AttrValue::Str("4.4")));
        assert_eq!(root.attr("nope"), None);

        let field = DataField::new("x", DataType::Integer, OpType::Ordinal).with_cyclic(true);
        let node = NodeRef::DataField(&field);
        assert_eq!(node.attr("dataType"), Some(AttrValue::Str("integer")));
        assert_eq!(node.attr("cyclic"), Some(AttrValue::Bool(true)));

        let plain = DataField::new("x", DataType::Integer, OpType::Ordinal);
        assert_eq!(NodeRef::DataField(&plain).attr("cyclic"), None);
    }

    #[test]
    fn collection_attributes_surface_as_counts() {
        let doc = sample_document();
        let dictionary = NodeRef::DataDictionary(&doc.data_dictionary);
        assert_eq!(dictionary.attr("numberOfFields"), Some(AttrValue::Count(2)));
        assert!(dictionary.attr("numberOfFields").unwrap().is_non_empty());

        let target = Target::new();
        assert_eq!(
            NodeRef::Target(&target).attr("targetValues"),
            Some(AttrValue::Count(0))
        );
        assert!(!NodeRef::Target(&target).attr("targetValues").unwrap().is_non_empty());
    }

    #[test]
    fn node_identity_distinguishes_equal_nodes() {
        let a = DataField::new("x", DataType::Double, OpType::Continuous);
        let b = DataField::new("x", DataType::Double, OpType::Continuous);
        assert_eq!(a, b);
        assert_ne!(NodeRef::DataField(&a).id(), NodeRef::DataField(&b).id());
        assert_eq!(NodeRef::DataField(&a).id(), NodeRef::DataField(&a).id());
    }

    #[test]
    fn segment_children_are_predicate_then_model() {
        let segment = Segment::new(
            TruePredicate::new(),
            Model::new(ModelKind::Tree, MiningFunction::Classification),
        );
        let kinds: Vec<NodeKind> = NodeRef::Segment(&segment)
            .children()
            .into_iter()
            .map(NodeRef::kind)
            .collect();
        assert_eq!(kinds, vec![NodeKind::TruePredicate, NodeKind::Model]);
    }
}
