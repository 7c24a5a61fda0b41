//! Model container nodes and their substructure.
//!
//! The schema spells each model family as its own element with a largely
//! shared substructure; here a single [`Model`] container carries the
//! family as a [`ModelKind`] attribute, which keeps dispatch closed and
//! lets version rules predicate on the family as data.

use serde::Serialize;

use crate::node::LocalTransformations;
use crate::types::{
    DataType, FieldUsage, MiningFunction, ModelKind, MultipleModelMethod, OpType, OutputFeature,
    PredicateOp,
};

/// A model container.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Model {
    pub kind: ModelKind,
    pub function: MiningFunction,
    pub model_name: Option<String>,
    pub algorithm_name: Option<String>,
    /// Whether the model may be scored standalone. Absent means
    /// unspecified, which the schema treats as scorable.
    pub scorable: Option<bool>,
    pub mining_schema: Option<MiningSchema>,
    pub output: Option<Output>,
    pub targets: Option<Targets>,
    pub local_transformations: Option<LocalTransformations>,
    pub regression_tables: Vec<RegressionTable>,
    pub segmentation: Option<Segmentation>,
}

impl Model {
    pub fn new(kind: ModelKind, function: MiningFunction) -> Self {
        Self {
            kind,
            function,
            model_name: None,
            algorithm_name: None,
            scorable: None,
            mining_schema: None,
            output: None,
            targets: None,
            local_transformations: None,
            regression_tables: Vec::new(),
            segmentation: None,
        }
    }

    pub fn with_model_name(mut self, name: impl Into<String>) -> Self {
        self.model_name = Some(name.into());
        self
    }

    pub fn with_algorithm_name(mut self, name: impl Into<String>) -> Self {
        self.algorithm_name = Some(name.into());
        self
    }

    pub fn with_scorable(mut self, scorable: bool) -> Self {
        self.scorable = Some(scorable);
        self
    }

    pub fn with_mining_schema(mut self, schema: MiningSchema) -> Self {
        self.mining_schema = Some(schema);
        self
    }

    pub fn with_output(mut self, output: Output) -> Self {
        self.output = Some(output);
        self
    }

    pub fn with_targets(mut self, targets: Targets) -> Self {
        self.targets = Some(targets);
        self
    }

    pub fn with_local_transformations(mut self, transformations: LocalTransformations) -> Self {
        self.local_transformations = Some(transformations);
        self
    }

    pub fn with_regression_table(mut self, table: RegressionTable) -> Self {
        self.regression_tables.push(table);
        self
    }

    pub fn with_segmentation(mut self, segmentation: Segmentation) -> Self {
        self.segmentation = Some(segmentation);
        self
    }
}

/// The fields a model consumes from its enclosing scope.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MiningSchema {
    pub fields: Vec<MiningField>,
}

impl MiningSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_field(mut self, field: MiningField) -> Self {
        self.fields.push(field);
        self
    }
}

/// A reference to a consumed field, with its usage.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MiningField {
    pub name: String,
    pub usage: Option<FieldUsage>,
}

impl MiningField {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            usage: None,
        }
    }

    pub fn with_usage(mut self, usage: FieldUsage) -> Self {
        self.usage = Some(usage);
        self
    }
}

/// The result fields a model publishes.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Output {
    pub fields: Vec<OutputField>,
}

impl Output {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_field(mut self, field: OutputField) -> Self {
        self.fields.push(field);
        self
    }
}

/// A single published result field.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputField {
    pub name: String,
    pub feature: Option<OutputFeature>,
    pub data_type: Option<DataType>,
    pub op_type: Option<OpType>,
    /// Restricts the feature to one segment's result.
    pub segment_id: Option<String>,
}

impl OutputField {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            feature: None,
            data_type: None,
            op_type: None,
            segment_id: None,
        }
    }

    pub fn with_feature(mut self, feature: OutputFeature) -> Self {
        self.feature = Some(feature);
        self
    }

    pub fn with_data_type(mut self, data_type: DataType) -> Self {
        self.data_type = Some(data_type);
        self
    }

    pub fn with_op_type(mut self, op_type: OpType) -> Self {
        self.op_type = Some(op_type);
        self
    }

    pub fn with_segment_id(mut self, id: impl Into<String>) -> Self {
        self.segment_id = Some(id.into());
        self
    }
}

/// Target metadata for a model.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Targets {
    pub targets: Vec<Target>,
}

impl Targets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_target(mut self, target: Target) -> Self {
        self.targets.push(target);
        self
    }
}

/// Per-target settings. The field reference is optional since schema
/// version 4.3 (a single unambiguous target may be left implicit).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Target {
    pub field: Option<String>,
    pub values: Vec<TargetValue>,
}

impl Target {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    pub fn with_value(mut self, value: TargetValue) -> Self {
        self.values.push(value);
        self
    }
}

/// A categorical target value with optional display and prior.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetValue {
    pub value: Option<String>,
    pub display_value: Option<String>,
    pub prior_probability: Option<f64>,
}

impl TargetValue {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
            display_value: None,
            prior_probability: None,
        }
    }

    pub fn with_display_value(mut self, display: impl Into<String>) -> Self {
        self.display_value = Some(display.into());
        self
    }

    pub fn with_prior_probability(mut self, probability: f64) -> Self {
        self.prior_probability = Some(probability);
        self
    }
}

/// The segment list of an ensemble model.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Segmentation {
    pub method: MultipleModelMethod,
    pub segments: Vec<Segment>,
}

impl Segmentation {
    pub fn new(method: MultipleModelMethod) -> Self {
        Self {
            method,
            segments: Vec::new(),
        }
    }

    pub fn with_segment(mut self, segment: Segment) -> Self {
        self.segments.push(segment);
        self
    }
}

/// One member of an ensemble: a predicate guarding an embedded model.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    pub id: Option<String>,
    pub weight: Option<f64>,
    pub predicate: Predicate,
    pub model: Model,
}

impl Segment {
    pub fn new(predicate: impl Into<Predicate>, model: Model) -> Self {
        Self {
            id: None,
            weight: None,
            predicate: predicate.into(),
            model,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = Some(weight);
        self
    }
}

/// A segment activation predicate.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Predicate {
    True(TruePredicate),
    Simple(SimplePredicate),
}

impl From<TruePredicate> for Predicate {
    fn from(value: TruePredicate) -> Self {
        Predicate::True(value)
    }
}

impl From<SimplePredicate> for Predicate {
    fn from(value: SimplePredicate) -> Self {
        Predicate::Simple(value)
    }
}

/// The always-true predicate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TruePredicate;

impl TruePredicate {
    pub fn new() -> Self {
        Self
    }
}

/// A single field comparison.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimplePredicate {
    pub field: String,
    pub operator: PredicateOp,
    pub value: Option<String>,
}

impl SimplePredicate {
    pub fn new(field: impl Into<String>, operator: PredicateOp) -> Self {
        Self {
            field: field.into(),
            operator,
            value: None,
        }
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }
}

/// One regression equation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegressionTable {
    pub intercept: f64,
    pub target_category: Option<String>,
    pub predictors: Vec<NumericPredictor>,
}

impl RegressionTable {
    pub fn new(intercept: f64) -> Self {
        Self {
            intercept,
            target_category: None,
            predictors: Vec::new(),
        }
    }

    pub fn with_target_category(mut self, category: impl Into<String>) -> Self {
        self.target_category = Some(category.into());
        self
    }

    pub fn with_predictor(mut self, predictor: NumericPredictor) -> Self {
        self.predictors.push(predictor);
        self
    }
}

/// A numeric term of a regression equation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NumericPredictor {
    pub name: String,
    pub exponent: Option<i32>,
    pub coefficient: f64,
}

impl NumericPredictor {
    pub fn new(name: impl Into<String>, coefficient: f64) -> Self {
        Self {
            name: name.into(),
            exponent: None,
            coefficient,
        }
    }

    pub fn with_exponent(mut self, exponent: i32) -> Self {
        self.exponent = Some(exponent);
        self
    }
}
