//! End-to-end field resolution over a chained ensemble document.
//!
//! The fixture mirrors a model-chain scoring pipeline: a global dictionary
//! and transformation dictionary, a function definition, and four chained
//! segments whose regression models publish output fields consumed by the
//! segments that follow.

use std::collections::{BTreeSet, HashMap};

use pmml_ast::{
    Apply, Constant, DataDictionary, DataField, DataType, DefineFunction, DerivedField, Document,
    FieldRef, Header, LocalTransformations, MiningField, MiningFunction, MiningSchema, Model,
    ModelKind, MultipleModelMethod, NodeId, NodeRef, NumericPredictor, OpType, Outcome, Output,
    OutputField, OutputFeature, ParameterField, RegressionTable, Segment, Segmentation,
    TransformationDictionary, TruePredicate, VisitFlow,
};
use pmml_core::FieldResolver;
use pretty_assertions::assert_eq;

fn names<const N: usize>(list: [&str; N]) -> BTreeSet<&str> {
    list.into_iter().collect()
}

fn dictionary_names() -> BTreeSet<&'static str> {
    names(["y", "x1", "x2", "x3"])
}

fn global_names() -> BTreeSet<&'static str> {
    let mut set = dictionary_names();
    set.extend(["x1_squared", "x1_cubed"]);
    set
}

fn with_extras<'a>(base: BTreeSet<&'a str>, extras: &[&'a str]) -> BTreeSet<&'a str> {
    let mut set = base;
    set.extend(extras.iter().copied());
    set
}

fn regression_segment(id: &str, output_name: Option<&str>) -> Segment {
    let mut model = Model::new(ModelKind::Regression, MiningFunction::Regression)
        .with_mining_schema(MiningSchema::new().with_field(MiningField::new("y")))
        .with_regression_table(
            RegressionTable::new(0.0).with_predictor(NumericPredictor::new("x1_squared", 1.0)),
        );
    if let Some(name) = output_name {
        model = model.with_output(
            Output::new().with_field(
                OutputField::new(name)
                    .with_feature(OutputFeature::PredictedValue)
                    .with_data_type(DataType::Double),
            ),
        );
    }
    Segment::new(TruePredicate::new(), model).with_id(id)
}

/// A four-segment model chain; the second segment also carries local
/// transformations of its own.
fn chained_ensemble_document() -> Document {
    let second_model = Model::new(ModelKind::Regression, MiningFunction::Regression)
        .with_output(
            Output::new().with_field(
                OutputField::new("second_output")
                    .with_feature(OutputFeature::PredictedValue)
                    .with_data_type(DataType::Double),
            ),
        )
        .with_local_transformations(
            LocalTransformations::new()
                .with_derived_field(DerivedField::new(
                    "x2_squared",
                    DataType::Double,
                    OpType::Continuous,
                    Apply::new("square").with_arg(FieldRef::new("x2")),
                ))
                .with_derived_field(DerivedField::new(
                    "x2_cubed",
                    DataType::Double,
                    OpType::Continuous,
                    Apply::new("cube").with_arg(FieldRef::new("x2_squared")),
                )),
        )
        .with_regression_table(
            RegressionTable::new(0.0).with_predictor(NumericPredictor::new("x2_cubed", 1.0)),
        );

    let ensemble = Model::new(ModelKind::Ensemble, MiningFunction::Regression)
        .with_mining_schema(
            MiningSchema::new()
                .with_field(MiningField::new("y"))
                .with_field(MiningField::new("x1"))
                .with_field(MiningField::new("x2"))
                .with_field(MiningField::new("x3")),
        )
        .with_segmentation(
            Segmentation::new(MultipleModelMethod::ModelChain)
                .with_segment(regression_segment("first", Some("first_output")))
                .with_segment(Segment::new(TruePredicate::new(), second_model).with_id("second"))
                .with_segment(regression_segment("third", Some("third_output")))
                .with_segment(regression_segment("sum", None)),
        );

    Document::new(
        "4.4",
        Header::new().with_copyright("ACME Corporation"),
        DataDictionary::new()
            .with_field(DataField::new("y", DataType::Double, OpType::Continuous))
            .with_field(DataField::new("x1", DataType::Double, OpType::Continuous))
            .with_field(DataField::new("x2", DataType::Double, OpType::Continuous))
            .with_field(DataField::new("x3", DataType::Double, OpType::Continuous)),
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
            ))
            .with_define_function(
                DefineFunction::new(
                    "power",
                    OpType::Continuous,
                    Apply::new("pow")
                        .with_arg(FieldRef::new("x"))
                        .with_arg(Constant::new("2").with_data_type(DataType::Integer)),
                )
                .with_parameter(ParameterField::new("x").with_data_type(DataType::Double)),
            ),
    )
    .with_model(ensemble)
}

#[test]
fn apply_nodes_see_the_scope_accumulated_so_far() {
    let document = chained_ensemble_document();
    let mut resolver = FieldResolver::new();
    let mut checked = 0usize;

    let outcome = resolver
        .resolve(&document, |node, cx, scopes| {
            let NodeRef::Apply(apply) = node else {
                return VisitFlow::Continue;
            };
            let visible = scopes.visible_names();
            match apply.function.as_str() {
                "*" => {
                    let Some(NodeRef::DerivedField(field)) = cx.parent() else {
                        panic!("multiplication outside a derived field");
                    };
                    match field.name.as_str() {
                        "x1_squared" => assert_eq!(visible, dictionary_names()),
                        "x1_cubed" => {
                            assert_eq!(visible, with_extras(dictionary_names(), &["x1_squared"]))
                        }
                        other => panic!("unexpected derived field {other}"),
                    }
                }
                // The function body sees its parameter and nothing else.
                "pow" => assert_eq!(visible, names(["x"])),
                "square" => assert_eq!(visible, with_extras(global_names(), &["first_output"])),
                "cube" => assert_eq!(
                    visible,
                    with_extras(global_names(), &["first_output", "x2_squared"])
                ),
                other => panic!("unexpected function {other}"),
            }
            checked += 1;
            VisitFlow::Continue
        })
        .unwrap();

    assert_eq!(outcome, Outcome::CompletedFully);
    assert_eq!(checked, 5);
    assert!(resolver.visible_fields().is_empty());
}

#[test]
fn chained_segments_see_their_predecessors_outputs() {
    let document = chained_ensemble_document();
    let mut resolver = FieldResolver::new();
    let mut checked = 0usize;

    resolver
        .resolve(&document, |node, cx, scopes| {
            if !matches!(node, NodeRef::RegressionTable(_)) {
                return VisitFlow::Continue;
            }
            let Some(NodeRef::Segment(segment)) = cx.parent_at(1) else {
                panic!("regression table outside a segment");
            };
            let visible = scopes.visible_names();
            match segment.id.as_deref() {
                Some("first") => assert_eq!(visible, global_names()),
                Some("second") => assert_eq!(
                    visible,
                    with_extras(
                        global_names(),
                        &["first_output", "x2_squared", "x2_cubed"]
                    )
                ),
                Some("third") => assert_eq!(
                    visible,
                    with_extras(global_names(), &["first_output", "second_output"])
                ),
                Some("sum") => assert_eq!(
                    visible,
                    with_extras(
                        global_names(),
                        &["first_output", "second_output", "third_output"]
                    )
                ),
                other => panic!("unexpected segment {other:?}"),
            }
            checked += 1;
            VisitFlow::Continue
        })
        .unwrap();

    assert_eq!(checked, 4);
    assert_eq!(resolver.scope_depth(), 0);
}

#[test]
fn visibility_grows_monotonically_outside_function_bodies() {
    let document = chained_ensemble_document();
    let mut resolver = FieldResolver::new();
    let mut sets: HashMap<NodeId, BTreeSet<String>> = HashMap::new();

    resolver
        .resolve(&document, |node, cx, scopes| {
            let visible: BTreeSet<String> = scopes
                .visible_names()
                .into_iter()
                .map(str::to_string)
                .collect();

            let isolated = matches!(node, NodeRef::DefineFunction(_))
                || cx
                    .ancestors()
                    .any(|ancestor| matches!(ancestor, NodeRef::DefineFunction(_)));
            if !isolated && let Some(parent) = cx.parent() {
                let at_parent = &sets[&parent.id()];
                assert!(
                    visible.is_superset(at_parent),
                    "visibility shrank between {} and {}",
                    parent.kind(),
                    node.kind()
                );
            }

            sets.insert(node.id(), visible);
            VisitFlow::Continue
        })
        .unwrap();
}

#[test]
fn repeated_resolution_is_stable() {
    let document = chained_ensemble_document();
    let mut resolver = FieldResolver::new();

    for _ in 0..2 {
        let mut apply_sets = Vec::new();
        resolver
            .resolve(&document, |node, _, scopes| {
                if matches!(node, NodeRef::Apply(_)) {
                    apply_sets.push(
                        scopes
                            .visible_names()
                            .into_iter()
                            .map(str::to_string)
                            .collect::<Vec<_>>(),
                    );
                }
                VisitFlow::Continue
            })
            .unwrap();
        assert_eq!(apply_sets.len(), 5);
        assert_eq!(resolver.scope_depth(), 0);
    }
}
