use ttl2shex::{parse_schema, ValueType};

const PREFIXES: &str = "PREFIX ex: <http://ex.org/>\nPREFIX xsd: <http://www.w3.org/2001/XMLSchema#>\n";

fn with_prefixes(body: &str) -> String {
    format!("{PREFIXES}\n{body}")
}

#[test]
fn synthesized_block() {
    let schema = parse_schema(&with_prefixes(
        "<#LoanShape> {\n\ta\t[ex:Loan] ;\n\tex:rate xsd:decimal ;\n\towner IRI\n}\n",
    ))
    .unwrap();

    let shape = &schema.shapes[0];
    assert_eq!(shape.id, "#LoanShape");
    assert_eq!(shape.type_values, vec!["http://ex.org/Loan"]);
    assert_eq!(shape.property_expressions.len(), 2);
    assert_eq!(
        shape.property_expressions[0].value_type,
        ValueType::Datatype("http://www.w3.org/2001/XMLSchema#decimal".into())
    );
    assert_eq!(shape.property_expressions[1].predicate, "owner");
    assert_eq!(shape.property_expressions[1].value_type, ValueType::Iri);
}

#[test]
fn node_kinds_values_and_references() {
    let schema = parse_schema(&with_prefixes(
        "ex:PersonShape {\n\
           ex:knows @ex:PersonShape * ;\n\
           ex:status [ex:Active ex:Retired] ;\n\
           ex:note LITERAL ? ;\n\
           ex:tag BNODE + ;\n\
           ex:ref NONLITERAL {0,2} ;\n\
           <http://ex.org/any> . {1,} ;\n\
         }",
    ))
    .unwrap();

    let shape = &schema.shapes[0];
    assert_eq!(shape.id, "http://ex.org/PersonShape");
    let kinds: Vec<&ValueType> = shape
        .property_expressions
        .iter()
        .map(|p| &p.value_type)
        .collect();
    assert_eq!(
        kinds,
        vec![
            &ValueType::ShapeRef("http://ex.org/PersonShape".into()),
            &ValueType::ValueSet(vec![
                "http://ex.org/Active".into(),
                "http://ex.org/Retired".into()
            ]),
            &ValueType::Literal,
            &ValueType::BNode,
            &ValueType::NonLiteral,
            &ValueType::Any,
        ]
    );
}

#[test]
fn several_shapes_keep_document_order() {
    let schema = parse_schema(&with_prefixes(
        "<#A> { ex:p IRI }\n\n# second shape\n<#B> CLOSED { ex:q IRI ; ex:r IRI }",
    ))
    .unwrap();
    let ids: Vec<&str> = schema.shapes.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec!["#A", "#B"]);
    assert!(schema.shapes[1].has_predicate("http://ex.org/r"));
}

#[test]
fn empty_shape_and_empty_document() {
    assert!(parse_schema("").unwrap().shapes.is_empty());
    let schema = parse_schema("<#Empty> { }").unwrap();
    assert!(schema.shapes[0].property_expressions.is_empty());
}

#[test]
fn relative_predicates_resolve_against_base() {
    let schema = parse_schema("BASE <http://ex.org/>\n<#S> { <name> LITERAL }").unwrap();
    assert!(schema.shapes[0].has_predicate("http://ex.org/name"));
    assert_eq!(schema.shapes[0].id, "#S");
}

#[test]
fn unclosed_shape_is_an_error() {
    let err = parse_schema(&with_prefixes("<#S> {\n\tex:p IRI ;\n\tex:q IRI\n")).unwrap_err();
    assert_eq!(err.line, 7);
    assert!(err.message.contains("closing a shape"));
}

#[test]
fn missing_value_expression_is_an_error() {
    let err = parse_schema(&with_prefixes("<#S> { ex:p }")).unwrap_err();
    assert_eq!((err.line, err.column), (4, 13));
}

#[test]
fn schema_serializes_for_the_cli() {
    let schema = parse_schema(&with_prefixes("<#S> { ex:p IRI }")).unwrap();
    let json = serde_json::to_string(&schema).unwrap();
    assert!(json.contains("\"propertyExpressions\":[{\"predicate\":\"http://ex.org/p\",\"valueType\":{\"kind\":\"iri\"}}]"));
}
