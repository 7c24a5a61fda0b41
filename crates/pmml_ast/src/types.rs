//! Enumerated vocabulary types shared across the document tree.
//!
//! These mirror the attribute vocabularies of the interchange schema. Each
//! enum exposes its schema spelling through `as_str`, which is also the
//! value surfaced by the generic attribute accessor on nodes.

use std::fmt;

use serde::Serialize;

/// Data type of a field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum DataType {
    String,
    Integer,
    Float,
    Double,
    Boolean,
    Date,
    DateTime,
}

impl DataType {
    /// Returns the schema spelling of this data type.
    pub const fn as_str(self) -> &'static str {
        match self {
            DataType::String => "string",
            DataType::Integer => "integer",
            DataType::Float => "float",
            DataType::Double => "double",
            DataType::Boolean => "boolean",
            DataType::Date => "date",
            DataType::DateTime => "dateTime",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Operational type of a field (how its values may be compared).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum OpType {
    Categorical,
    Ordinal,
    Continuous,
}

impl OpType {
    /// Returns the schema spelling of this operational type.
    pub const fn as_str(self) -> &'static str {
        match self {
            OpType::Categorical => "categorical",
            OpType::Ordinal => "ordinal",
            OpType::Continuous => "continuous",
        }
    }
}

impl fmt::Display for OpType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Mining function a model implements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum MiningFunction {
    Regression,
    Classification,
    Clustering,
    AssociationRules,
    Sequences,
    TimeSeries,
    Mixed,
}

impl MiningFunction {
    /// Returns the schema spelling of this mining function.
    pub const fn as_str(self) -> &'static str {
        match self {
            MiningFunction::Regression => "regression",
            MiningFunction::Classification => "classification",
            MiningFunction::Clustering => "clustering",
            MiningFunction::AssociationRules => "associationRules",
            MiningFunction::Sequences => "sequences",
            MiningFunction::TimeSeries => "timeSeries",
            MiningFunction::Mixed => "mixed",
        }
    }
}

impl fmt::Display for MiningFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Model family of a model container node.
///
/// The interchange schema spells each family as its own element; the tree
/// folds them into one container node tagged with this kind, so analyses
/// (and the version rule table) can predicate on the family as an attribute
/// instead of dispatching over a dozen near-identical node kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ModelKind {
    Regression,
    GeneralRegression,
    Tree,
    NeuralNetwork,
    Clustering,
    Association,
    NaiveBayes,
    RuleSet,
    Sequence,
    Text,
    TimeSeries,
    Baseline,
    Scorecard,
    NearestNeighbor,
    BayesianNetwork,
    GaussianProcess,
    /// Multi-model ensemble (segmented model).
    Ensemble,
}

impl ModelKind {
    /// Returns the schema spelling of this model family.
    pub const fn as_str(self) -> &'static str {
        match self {
            ModelKind::Regression => "regression",
            ModelKind::GeneralRegression => "generalRegression",
            ModelKind::Tree => "tree",
            ModelKind::NeuralNetwork => "neuralNetwork",
            ModelKind::Clustering => "clustering",
            ModelKind::Association => "association",
            ModelKind::NaiveBayes => "naiveBayes",
            ModelKind::RuleSet => "ruleSet",
            ModelKind::Sequence => "sequence",
            ModelKind::Text => "text",
            ModelKind::TimeSeries => "timeSeries",
            ModelKind::Baseline => "baseline",
            ModelKind::Scorecard => "scorecard",
            ModelKind::NearestNeighbor => "nearestNeighbor",
            ModelKind::BayesianNetwork => "bayesianNetwork",
            ModelKind::GaussianProcess => "gaussianProcess",
            ModelKind::Ensemble => "ensemble",
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Usage of a field within a model's mining schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldUsage {
    Active,
    Target,
    Supplementary,
    Group,
    Order,
    FrequencyWeight,
    AnalysisWeight,
}

impl FieldUsage {
    /// Returns the schema spelling of this usage type.
    pub const fn as_str(self) -> &'static str {
        match self {
            FieldUsage::Active => "active",
            FieldUsage::Target => "target",
            FieldUsage::Supplementary => "supplementary",
            FieldUsage::Group => "group",
            FieldUsage::Order => "order",
            FieldUsage::FrequencyWeight => "frequencyWeight",
            FieldUsage::AnalysisWeight => "analysisWeight",
        }
    }
}

impl fmt::Display for FieldUsage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result feature computed by an output field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum OutputFeature {
    PredictedValue,
    PredictedDisplayValue,
    Probability,
    Affinity,
    TransformedValue,
    DecisionValue,
    RuleValue,
    RuleId,
    RuleAffinity,
}

impl OutputFeature {
    /// Returns the schema spelling of this result feature.
    pub const fn as_str(self) -> &'static str {
        match self {
            OutputFeature::PredictedValue => "predictedValue",
            OutputFeature::PredictedDisplayValue => "predictedDisplayValue",
            OutputFeature::Probability => "probability",
            OutputFeature::Affinity => "affinity",
            OutputFeature::TransformedValue => "transformedValue",
            OutputFeature::DecisionValue => "decisionValue",
            OutputFeature::RuleValue => "ruleValue",
            OutputFeature::RuleId => "ruleId",
            OutputFeature::RuleAffinity => "ruleAffinity",
        }
    }
}

impl fmt::Display for OutputFeature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Strategy for combining segment results in an ensemble.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum MultipleModelMethod {
    MajorityVote,
    WeightedMajorityVote,
    Average,
    WeightedAverage,
    Median,
    Max,
    Sum,
    SelectFirst,
    SelectAll,
    ModelChain,
}

impl MultipleModelMethod {
    /// Returns the schema spelling of this combination method.
    pub const fn as_str(self) -> &'static str {
        match self {
            MultipleModelMethod::MajorityVote => "majorityVote",
            MultipleModelMethod::WeightedMajorityVote => "weightedMajorityVote",
            MultipleModelMethod::Average => "average",
            MultipleModelMethod::WeightedAverage => "weightedAverage",
            MultipleModelMethod::Median => "median",
            MultipleModelMethod::Max => "max",
            MultipleModelMethod::Sum => "sum",
            MultipleModelMethod::SelectFirst => "selectFirst",
            MultipleModelMethod::SelectAll => "selectAll",
            MultipleModelMethod::ModelChain => "modelChain",
        }
    }
}

impl fmt::Display for MultipleModelMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Comparison operator of a simple predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PredicateOp {
    Equal,
    NotEqual,
    LessThan,
    LessOrEqual,
    GreaterThan,
    GreaterOrEqual,
    IsMissing,
    IsNotMissing,
}

impl PredicateOp {
    /// Returns the schema spelling of this operator.
    pub const fn as_str(self) -> &'static str {
        match self {
            PredicateOp::Equal => "equal",
            PredicateOp::NotEqual => "notEqual",
            PredicateOp::LessThan => "lessThan",
            PredicateOp::LessOrEqual => "lessOrEqual",
            PredicateOp::GreaterThan => "greaterThan",
            PredicateOp::GreaterOrEqual => "greaterOrEqual",
            PredicateOp::IsMissing => "isMissing",
            PredicateOp::IsNotMissing => "isNotMissing",
        }
    }
}

impl fmt::Display for PredicateOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
