//! Structural equivalence of two parsed shape schemas.
//!
//! Only shape ids and predicates count. Value types and cardinalities are
//! ignored, and so is the order of shapes and of their constraints.

use serde::Serialize;

use crate::schema::{ParsedShapeSchema, ShapeDecl};

/// Why two schemas did or did not match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "camelCase")]
pub enum ComparisonOutcome {
    Matched,
    CountMismatch { remote: usize, local: usize },
    MissingShape { id: String },
    MissingPredicate { shape: String, predicate: String },
}

impl ComparisonOutcome {
    pub fn is_match(&self) -> bool {
        matches!(self, ComparisonOutcome::Matched)
    }
}

/// Compare a remote schema against the local one.
///
/// Every local shape must have a remote shape with the same id that carries
/// all of its predicates. When several remote shapes share the id, any one
/// of them will do.
pub fn compare_schemas(remote: &ParsedShapeSchema, local: &ParsedShapeSchema) -> ComparisonOutcome {
    if remote.shapes.len() != local.shapes.len() {
        return ComparisonOutcome::CountMismatch {
            remote: remote.shapes.len(),
            local: local.shapes.len(),
        };
    }

    for local_shape in &local.shapes {
        // synthesis emits one block per typed resource, so ids may repeat
        let mut candidates = remote.shapes.iter().filter(|s| s.id == local_shape.id).peekable();
        let Some(first) = candidates.peek().copied() else {
            return ComparisonOutcome::MissingShape {
                id: local_shape.id.clone(),
            };
        };
        if candidates.any(|remote_shape| missing_predicate(remote_shape, local_shape).is_none()) {
            continue;
        }
        if let Some(predicate) = missing_predicate(first, local_shape) {
            return ComparisonOutcome::MissingPredicate {
                shape: local_shape.id.clone(),
                predicate: predicate.to_string(),
            };
        }
    }

    ComparisonOutcome::Matched
}

fn missing_predicate<'a>(remote_shape: &ShapeDecl, local_shape: &'a ShapeDecl) -> Option<&'a str> {
    local_shape
        .property_expressions
        .iter()
        .find(|p| !remote_shape.has_predicate(&p.predicate))
        .map(|p| p.predicate.as_str())
}

/// `true` when [`compare_schemas`] reports a match.
pub fn shapes_match(remote: &ParsedShapeSchema, local: &ParsedShapeSchema) -> bool {
    compare_schemas(remote, local).is_match()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ValueType;

    #[test]
    fn empty_schemas_match() {
        let empty = ParsedShapeSchema::default();
        assert_eq!(compare_schemas(&empty, &empty), ComparisonOutcome::Matched);
    }

    #[test]
    fn first_missing_predicate_is_reported() {
        let remote = ParsedShapeSchema::new(vec![
            ShapeDecl::new("#S").with_property("http://ex.org/a", ValueType::Iri)
        ]);
        let local = ParsedShapeSchema::new(vec![ShapeDecl::new("#S")
            .with_property("http://ex.org/a", ValueType::Literal)
            .with_property("http://ex.org/b", ValueType::Iri)]);
        assert_eq!(
            compare_schemas(&remote, &local),
            ComparisonOutcome::MissingPredicate {
                shape: "#S".into(),
                predicate: "http://ex.org/b".into()
            }
        );
    }
}
