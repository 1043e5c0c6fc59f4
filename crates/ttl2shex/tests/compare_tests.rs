use ttl2shex::{
    compare_schemas, parse_schema, shapes_match, turtle_to_shape, ComparisonOutcome, ParsedShapeSchema,
    ShapeDecl, ValueType,
};

const EX: &str = "http://ex.org/";

fn shape(id: &str, predicates: &[&str]) -> ShapeDecl {
    predicates.iter().fold(ShapeDecl::new(id), |decl, p| {
        decl.with_property(format!("{EX}{p}"), ValueType::Literal)
    })
}

fn schema(shapes: Vec<ShapeDecl>) -> ParsedShapeSchema {
    ParsedShapeSchema::new(shapes)
}

#[test]
fn property_order_does_not_matter() {
    let local = schema(vec![shape("#CreditConsumerAdShape", &["label", "amount"])]);
    let remote = schema(vec![shape("#CreditConsumerAdShape", &["amount", "label"])]);
    assert!(shapes_match(&remote, &local));
}

#[test]
fn shape_count_short_circuits() {
    let local = schema(vec![shape("#A", &["p"])]);
    let remote = schema(vec![shape("#A", &["p"]), shape("#B", &["q"])]);
    assert_eq!(
        compare_schemas(&remote, &local),
        ComparisonOutcome::CountMismatch {
            remote: 2,
            local: 1
        }
    );
}

#[test]
fn shape_order_does_not_matter() {
    let local = schema(vec![shape("#A", &["p"]), shape("#B", &["q"])]);
    let remote = schema(vec![shape("#B", &["q"]), shape("#A", &["p"])]);
    assert!(shapes_match(&remote, &local));
}

#[test]
fn shape_ids_must_agree() {
    let local = schema(vec![shape("#A", &["p"])]);
    let remote = schema(vec![shape("#Other", &["p"])]);
    assert_eq!(
        compare_schemas(&remote, &local),
        ComparisonOutcome::MissingShape { id: "#A".into() }
    );
}

#[test]
fn remote_may_have_extra_predicates() {
    let local = schema(vec![shape("#A", &["p"])]);
    let remote = schema(vec![shape("#A", &["p", "extra"])]);
    assert!(shapes_match(&remote, &local));
    assert!(!shapes_match(&local, &remote));
}

#[test]
fn value_types_are_ignored() {
    let local = parse_schema("PREFIX ex: <http://ex.org/>\n<#A> { ex:p IRI }").unwrap();
    let remote = parse_schema(
        "PREFIX ex: <http://ex.org/>\nPREFIX xsd: <http://www.w3.org/2001/XMLSchema#>\n<#A> { ex:p xsd:decimal }",
    )
    .unwrap();
    assert!(shapes_match(&remote, &local));
}

#[test]
fn schema_matches_itself() {
    let text = "PREFIX ex: <http://ex.org/>\n<#A> { a [ex:A] ; ex:p IRI ; ex:q LITERAL }\n<#B> { ex:r . }";
    let parsed = parse_schema(text).unwrap();
    assert!(shapes_match(&parsed, &parsed));
}

#[test]
fn outcome_serializes_with_its_tag() {
    let json = serde_json::to_string(&ComparisonOutcome::Matched).unwrap();
    assert_eq!(json, r#"{"outcome":"matched"}"#);
}

#[test]
fn repeated_shape_ids_match_themselves() {
    let shex = turtle_to_shape(
        "@prefix ex: <http://ex.org/> .\n\
         ex:a a ex:Loan ; ex:label \"x\" .\n\
         ex:b a ex:Loan ; ex:rate 1.5 .\n",
    )
    .unwrap();
    let parsed = parse_schema(&shex).unwrap();
    assert_eq!(parsed.shapes.len(), 2);
    assert_eq!(parsed.shapes[0].id, parsed.shapes[1].id);
    assert_eq!(compare_schemas(&parsed, &parsed), ComparisonOutcome::Matched);
}

#[test]
fn repeated_ids_still_need_every_predicate() {
    let local = schema(vec![shape("#Loan", &["label", "term"]), shape("#Loan", &["rate"])]);
    let remote = schema(vec![shape("#Loan", &["label"]), shape("#Loan", &["rate"])]);
    assert_eq!(
        compare_schemas(&remote, &local),
        ComparisonOutcome::MissingPredicate {
            shape: "#Loan".into(),
            predicate: format!("{EX}term")
        }
    );
}
