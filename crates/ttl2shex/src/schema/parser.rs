//! Recursive-descent parser over the ShEx token stream.

use super::lexer::{line_col, tokenize};
use super::token::{Token, TokenKind};
use super::{ParsedShapeSchema, PropertyExpression, ShapeDecl, ValueType};
use crate::error::SchemaParseError;
use crate::model::ontology::standard;
use crate::model::triple::PrefixMap;

/// Parser state.
pub struct SchemaParser<'a> {
    text: &'a str,
    tokens: Vec<Token>,
    pos: usize,
    prefixes: PrefixMap,
    base: Option<String>,
}

impl<'a> SchemaParser<'a> {
    pub fn new(text: &'a str) -> Result<Self, SchemaParseError> {
        Ok(Self {
            text,
            tokens: tokenize(text)?,
            pos: 0,
            prefixes: PrefixMap::new(),
            base: None,
        })
    }

    /// Parse the entire schema document.
    pub fn parse(mut self) -> Result<ParsedShapeSchema, SchemaParseError> {
        let mut shapes = Vec::new();
        while !self.is_at_end() {
            if self.current().kind.is_keyword("PREFIX") {
                self.parse_prefix_directive()?;
            } else if self.current().kind.is_keyword("BASE") {
                self.parse_base_directive()?;
            } else {
                shapes.push(self.parse_shape_decl()?);
            }
        }
        Ok(ParsedShapeSchema::new(shapes))
    }

    fn is_at_end(&self) -> bool {
        matches!(self.current().kind, TokenKind::Eof)
    }

    fn current(&self) -> &Token {
        &self.tokens[self.pos]
    }

    fn advance(&mut self) {
        if !self.is_at_end() {
            self.pos += 1;
        }
    }

    fn error(&self, message: impl Into<String>) -> SchemaParseError {
        let (line, column) = line_col(self.text, self.current().start);
        SchemaParseError::new(line, column, message)
    }

    fn expect(&mut self, kind: TokenKind, what: &str) -> Result<(), SchemaParseError> {
        if self.current().kind == kind {
            self.advance();
            Ok(())
        } else {
            Err(self.error(format!(
                "expected {what}, found {:?}",
                self.current().kind
            )))
        }
    }

    fn parse_prefix_directive(&mut self) -> Result<(), SchemaParseError> {
        self.advance();
        let TokenKind::PnameNs(prefix) = self.current().kind.clone() else {
            return Err(self.error("expected prefix name after PREFIX"));
        };
        self.advance();
        let TokenKind::IriRef(iri) = self.current().kind.clone() else {
            return Err(self.error("expected IRI for prefix namespace"));
        };
        self.advance();
        let namespace = self.resolve(iri);
        self.prefixes.insert(&prefix, &namespace);
        Ok(())
    }

    fn parse_base_directive(&mut self) -> Result<(), SchemaParseError> {
        self.advance();
        let TokenKind::IriRef(iri) = self.current().kind.clone() else {
            return Err(self.error("expected IRI after BASE"));
        };
        self.advance();
        self.base = Some(iri);
        Ok(())
    }

    /// Relative IRIs in constraints are appended to the declared base.
    fn resolve(&self, iri: String) -> String {
        match &self.base {
            Some(base) if !iri.contains(':') => format!("{base}{iri}"),
            _ => iri,
        }
    }

    fn expand(&self, prefix: &str, local: &str) -> Result<String, SchemaParseError> {
        self.prefixes
            .get(prefix)
            .map(|ns| format!("{ns}{local}"))
            .ok_or_else(|| self.error(format!("undeclared prefix '{prefix}:'")))
    }

    /// Shape labels are kept as written so that ids compare across documents.
    fn parse_label(&mut self) -> Result<String, SchemaParseError> {
        match self.current().kind.clone() {
            TokenKind::IriRef(iri) => {
                self.advance();
                Ok(iri)
            }
            TokenKind::PnameLn { prefix, local } => {
                let iri = self.expand(&prefix, &local)?;
                self.advance();
                Ok(iri)
            }
            other => Err(self.error(format!("expected shape label, found {other:?}"))),
        }
    }

    fn parse_shape_decl(&mut self) -> Result<ShapeDecl, SchemaParseError> {
        let mut shape = ShapeDecl::new(self.parse_label()?);
        if self.current().kind.is_keyword("CLOSED") {
            self.advance();
        }
        self.expect(TokenKind::LBrace, "'{' opening a shape")?;
        while self.current().kind != TokenKind::RBrace {
            self.parse_triple_constraint(&mut shape)?;
            if self.current().kind == TokenKind::Semicolon {
                self.advance();
            } else {
                break;
            }
        }
        self.expect(TokenKind::RBrace, "';' or '}' closing a shape")?;
        Ok(shape)
    }

    fn parse_triple_constraint(&mut self, shape: &mut ShapeDecl) -> Result<(), SchemaParseError> {
        let predicate = self.parse_predicate()?;
        let value_type = self.parse_value_expr()?;
        self.parse_cardinality()?;

        if predicate == standard::RDF_TYPE {
            if let ValueType::ValueSet(values) = value_type {
                shape.type_values.extend(values);
            }
        } else {
            shape
                .property_expressions
                .push(PropertyExpression::new(predicate, value_type));
        }
        Ok(())
    }

    fn parse_predicate(&mut self) -> Result<String, SchemaParseError> {
        let predicate = match self.current().kind.clone() {
            TokenKind::Name(name) if name == "a" => standard::RDF_TYPE.to_string(),
            TokenKind::IriRef(iri) => self.resolve(iri),
            TokenKind::PnameLn { prefix, local } => self.expand(&prefix, &local)?,
            // bare names are what synthesis falls back to for unprefixed namespaces
            TokenKind::Name(name) => name,
            other => return Err(self.error(format!("expected predicate, found {other:?}"))),
        };
        self.advance();
        Ok(predicate)
    }

    fn parse_value_expr(&mut self) -> Result<ValueType, SchemaParseError> {
        let kind = self.current().kind.clone();
        let value = match kind {
            TokenKind::Name(ref word) => match word.to_ascii_uppercase().as_str() {
                "IRI" => ValueType::Iri,
                "LITERAL" => ValueType::Literal,
                "BNODE" => ValueType::BNode,
                "NONLITERAL" => ValueType::NonLiteral,
                _ => return Err(self.error(format!("unknown node kind '{word}'"))),
            },
            TokenKind::Dot => ValueType::Any,
            TokenKind::IriRef(iri) => ValueType::Datatype(self.resolve(iri)),
            TokenKind::PnameLn { prefix, local } => {
                ValueType::Datatype(self.expand(&prefix, &local)?)
            }
            TokenKind::LBracket => {
                self.advance();
                return self.parse_value_set();
            }
            TokenKind::At => {
                self.advance();
                return Ok(ValueType::ShapeRef(self.parse_label()?));
            }
            other => {
                return Err(self.error(format!("expected value expression, found {other:?}")))
            }
        };
        self.advance();
        Ok(value)
    }

    fn parse_value_set(&mut self) -> Result<ValueType, SchemaParseError> {
        let mut values = Vec::new();
        loop {
            match self.current().kind.clone() {
                TokenKind::RBracket => {
                    self.advance();
                    return Ok(ValueType::ValueSet(values));
                }
                TokenKind::IriRef(iri) => values.push(self.resolve(iri)),
                TokenKind::PnameLn { prefix, local } => values.push(self.expand(&prefix, &local)?),
                other => {
                    return Err(self.error(format!("unsupported value set entry {other:?}")))
                }
            }
            self.advance();
        }
    }

    fn parse_cardinality(&mut self) -> Result<(), SchemaParseError> {
        match self.current().kind {
            TokenKind::Star | TokenKind::Plus | TokenKind::Question => {
                self.advance();
            }
            TokenKind::LBrace => {
                self.advance();
                self.expect_integer()?;
                if self.current().kind == TokenKind::Comma {
                    self.advance();
                    match self.current().kind {
                        TokenKind::Integer(_) | TokenKind::Star => {
                            self.advance();
                        }
                        _ => {}
                    }
                }
                self.expect(TokenKind::RBrace, "'}' closing a cardinality")?;
            }
            _ => {}
        }
        Ok(())
    }

    fn expect_integer(&mut self) -> Result<u64, SchemaParseError> {
        match self.current().kind {
            TokenKind::Integer(n) => {
                self.advance();
                Ok(n)
            }
            _ => Err(self.error("expected integer in cardinality")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closed_shape_with_cardinalities() {
        let schema = SchemaParser::new(
            "PREFIX ex: <http://ex.org/>\n<#S> CLOSED { ex:a IRI * ; ex:b . {1,3} ; ex:c @<#T> ? }",
        )
        .unwrap()
        .parse()
        .unwrap();
        let shape = &schema.shapes[0];
        assert_eq!(shape.property_expressions.len(), 3);
        assert_eq!(
            shape.property_expressions[2].value_type,
            ValueType::ShapeRef("#T".into())
        );
    }

    #[test]
    fn undeclared_prefix_points_at_the_name() {
        let err = SchemaParser::new("<#S> {\n  ex:a IRI\n}")
            .unwrap()
            .parse()
            .unwrap_err();
        assert_eq!((err.line, err.column), (2, 3));
        assert!(err.message.contains("ex:"));
    }
}
