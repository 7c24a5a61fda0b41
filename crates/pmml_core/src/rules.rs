//! The static version-compatibility rule table.
//!
//! A rule ties a node kind, plus an optional condition over the node's
//! attributes (or an ancestor's), to an inclusive version constraint. The
//! table is plain data: extending coverage means adding rows, not engine
//! code. Rules are never mutated during analysis.

use pmml_ast::{AttrValue, ModelKind, NodeKind, NodeRef, Traversal, VersionRange};
use serde::Serialize;

/// A declarative predicate over a node, evaluated at visit time.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Condition {
    /// Fires unconditionally for the rule's node kind.
    Always,
    /// The named attribute is present.
    AttrPresent(&'static str),
    /// The named attribute is absent.
    AttrAbsent(&'static str),
    /// The named attribute equals the given schema spelling.
    AttrEquals(&'static str, &'static str),
    /// The named boolean attribute is present and true.
    AttrTrue(&'static str),
    /// The named collection-valued attribute is non-empty.
    NonEmpty(&'static str),
    /// The nearest enclosing model container has the given family.
    InsideModel(ModelKind),
    /// Every listed condition holds.
    All(Vec<Condition>),
}

impl Condition {
    /// Evaluates this condition against a node and its ancestry.
    pub fn evaluate(&self, node: NodeRef<'_>, cx: &Traversal<'_>) -> bool {
        match self {
            Condition::Always => true,
            Condition::AttrPresent(name) => node.attr(name).is_some(),
            Condition::AttrAbsent(name) => node.attr(name).is_none(),
            Condition::AttrEquals(name, value) => {
                node.attr(name).and_then(AttrValue::as_str) == Some(*value)
            }
            Condition::AttrTrue(name) => {
                matches!(node.attr(name), Some(AttrValue::Bool(true)))
            }
            Condition::NonEmpty(name) => node.attr(name).is_some_and(AttrValue::is_non_empty),
            Condition::InsideModel(kind) => {
                let enclosing = cx.ancestors().find_map(|ancestor| match ancestor {
                    NodeRef::Model(model) => Some(model.kind),
                    _ => None,
                });
                enclosing == Some(*kind)
            }
            Condition::All(conditions) => {
                conditions.iter().all(|condition| condition.evaluate(node, cx))
            }
        }
    }
}

/// One version-compatibility rule.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VersionRule {
    /// Node kind the rule applies to.
    pub kind: NodeKind,
    /// Gate deciding whether the rule fires on a given node.
    pub condition: Condition,
    /// Constraint folded into the running bounds when the rule fires.
    pub constraint: VersionRange,
    /// Short label naming the gated construct, used in trace output.
    pub note: &'static str,
}

impl VersionRule {
    pub fn new(
        kind: NodeKind,
        condition: Condition,
        constraint: VersionRange,
        note: &'static str,
    ) -> Self {
        Self {
            kind,
            condition,
            constraint,
            note,
        }
    }

    /// Returns true when this rule fires on the given node.
    pub fn applies(&self, node: NodeRef<'_>, cx: &Traversal<'_>) -> bool {
        self.kind == node.kind() && self.condition.evaluate(node, cx)
    }
}

/// An immutable collection of version rules.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct VersionRuleTable {
    rules: Vec<VersionRule>,
}

impl VersionRuleTable {
    /// Builds a table from caller-supplied rules.
    pub fn new(rules: Vec<VersionRule>) -> Self {
        Self { rules }
    }

    /// Every rule in the table.
    pub fn rules(&self) -> &[VersionRule] {
        &self.rules
    }

    /// The rules registered for one node kind.
    pub fn for_kind(&self, kind: NodeKind) -> impl Iterator<Item = &VersionRule> {
        self.rules.iter().filter(move |rule| rule.kind == kind)
    }

    /// The built-in compatibility metadata for the supported schema
    /// versions.
    pub fn standard() -> Self {
        use pmml_ast::Version::{V3_1, V3_2, V4_0, V4_1, V4_2, V4_3, V4_4};

        let since = VersionRange::since;
        let until = VersionRange::until;

        Self::new(vec![
            // Model families introduced after the earliest supported
            // schema version.
            VersionRule::new(
                NodeKind::Model,
                Condition::AttrEquals("kind", "timeSeries"),
                since(V4_0),
                "time series models",
            ),
            VersionRule::new(
                NodeKind::Model,
                Condition::AttrEquals("kind", "baseline"),
                since(V4_1),
                "baseline models",
            ),
            VersionRule::new(
                NodeKind::Model,
                Condition::AttrEquals("kind", "scorecard"),
                since(V4_1),
                "scorecards",
            ),
            VersionRule::new(
                NodeKind::Model,
                Condition::AttrEquals("kind", "nearestNeighbor"),
                since(V4_1),
                "nearest neighbor models",
            ),
            VersionRule::new(
                NodeKind::Model,
                Condition::AttrEquals("kind", "bayesianNetwork"),
                since(V4_3),
                "bayesian network models",
            ),
            VersionRule::new(
                NodeKind::Model,
                Condition::AttrEquals("kind", "gaussianProcess"),
                since(V4_3),
                "gaussian process models",
            ),
            VersionRule::new(
                NodeKind::Model,
                Condition::AttrEquals("kind", "ensemble"),
                since(V4_0),
                "segmented ensembles",
            ),
            // Attribute-gated model features.
            VersionRule::new(
                NodeKind::Model,
                Condition::AttrPresent("scorable"),
                since(V4_1),
                "isScorable attribute",
            ),
            // The output section and its feature vocabulary.
            VersionRule::new(
                NodeKind::Output,
                Condition::Always,
                since(V4_0),
                "model output section",
            ),
            VersionRule::new(
                NodeKind::OutputField,
                Condition::AttrEquals("feature", "transformedValue"),
                since(V4_1),
                "transformed value outputs",
            ),
            VersionRule::new(
                NodeKind::OutputField,
                Condition::All(vec![
                    Condition::AttrEquals("feature", "ruleAffinity"),
                    Condition::InsideModel(ModelKind::Association),
                ]),
                since(V4_1),
                "rule feature outputs",
            ),
            // Rule feature outputs without a declared data type were
            // retired once output fields required explicit typing.
            VersionRule::new(
                NodeKind::OutputField,
                Condition::All(vec![
                    Condition::AttrEquals("feature", "ruleAffinity"),
                    Condition::AttrAbsent("dataType"),
                    Condition::InsideModel(ModelKind::Association),
                ]),
                until(V4_2),
                "untyped rule feature outputs",
            ),
            // Ensembles.
            VersionRule::new(
                NodeKind::Segmentation,
                Condition::Always,
                since(V4_0),
                "segmentation",
            ),
            VersionRule::new(
                NodeKind::Segmentation,
                Condition::AttrEquals("multipleModelMethod", "modelChain"),
                since(V4_1),
                "model chains",
            ),
            // Targets.
            VersionRule::new(
                NodeKind::Target,
                Condition::AttrAbsent("field"),
                since(V4_3),
                "implicit target field",
            ),
            VersionRule::new(
                NodeKind::TargetValue,
                Condition::AttrPresent("displayValue"),
                since(V3_2),
                "target display values",
            ),
            VersionRule::new(
                NodeKind::Target,
                Condition::All(vec![
                    Condition::NonEmpty("targetValues"),
                    Condition::InsideModel(ModelKind::GeneralRegression),
                ]),
                until(V4_2),
                "general regression target value lists",
            ),
            // Dictionary features.
            VersionRule::new(
                NodeKind::DataField,
                Condition::AttrPresent("cyclic"),
                since(V3_1),
                "cyclic data fields",
            ),
            // Expression vocabulary.
            VersionRule::new(
                NodeKind::Apply,
                Condition::AttrEquals("function", "lowercase"),
                since(V4_1),
                "lowercase built-in",
            ),
            VersionRule::new(
                NodeKind::Apply,
                Condition::AttrEquals("function", "concat"),
                since(V4_2),
                "concat built-in",
            ),
            VersionRule::new(
                NodeKind::Apply,
                Condition::AttrPresent("invalidValueTreatment"),
                since(V4_2),
                "invalid value treatment on apply",
            ),
            VersionRule::new(
                NodeKind::Constant,
                Condition::AttrTrue("missing"),
                since(V4_4),
                "missing-value constants",
            ),
            // Mining schema vocabulary.
            VersionRule::new(
                NodeKind::MiningField,
                Condition::AttrEquals("usageType", "analysisWeight"),
                since(V4_3),
                "analysis weight fields",
            ),
        ])
    }
}
