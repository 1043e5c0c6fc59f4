//! ShEx compact-syntax schemas.
//!
//! Covers the subset of ShExC that shape synthesis produces and that shape
//! documents stored next to shape trees use: `PREFIX`/`BASE` directives and
//! shape declarations made of triple constraints with node kinds, datatypes,
//! value sets, shape references and cardinalities.

pub mod lexer;
pub mod parser;
pub mod token;

use serde::Serialize;

use crate::error::SchemaParseError;

pub use parser::SchemaParser;

/// Expected value of a triple constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum ValueType {
    Iri,
    Literal,
    BNode,
    NonLiteral,
    /// Any value (`.`)
    Any,
    Datatype(String),
    ValueSet(Vec<String>),
    ShapeRef(String),
}

/// A triple constraint: predicate plus expected value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyExpression {
    pub predicate: String,
    pub value_type: ValueType,
}

impl PropertyExpression {
    pub fn new(predicate: impl Into<String>, value_type: ValueType) -> Self {
        Self {
            predicate: predicate.into(),
            value_type,
        }
    }
}

/// One shape declaration.
///
/// The `rdf:type` constraint (`a [...]`) is kept apart in `type_values`;
/// `property_expressions` holds every other constraint in document order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeDecl {
    pub id: String,
    pub type_values: Vec<String>,
    pub property_expressions: Vec<PropertyExpression>,
}

impl ShapeDecl {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            type_values: Vec::new(),
            property_expressions: Vec::new(),
        }
    }

    pub fn with_property(mut self, predicate: impl Into<String>, value_type: ValueType) -> Self {
        self.property_expressions
            .push(PropertyExpression::new(predicate, value_type));
        self
    }

    pub fn has_predicate(&self, predicate: &str) -> bool {
        self.property_expressions
            .iter()
            .any(|p| p.predicate == predicate)
    }
}

/// A parsed schema: shapes in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParsedShapeSchema {
    pub shapes: Vec<ShapeDecl>,
}

impl ParsedShapeSchema {
    pub fn new(shapes: Vec<ShapeDecl>) -> Self {
        Self { shapes }
    }
}

/// Parse ShEx compact syntax.
pub fn parse_schema(text: &str) -> Result<ParsedShapeSchema, SchemaParseError> {
    SchemaParser::new(text)?.parse()
}
