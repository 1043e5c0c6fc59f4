pub mod n3patch;
pub mod shex;

use crate::model::ontology::standard;
use crate::model::triple::{Object, Subject, Triple};

/// Consumer of a triple stream in document order.
///
/// Prefix declarations may arrive before the first triple or interleaved
/// with triples, as they do while Turtle is being parsed.
pub trait TripleSink {
    /// Register a namespace prefix.
    fn add_prefix(&mut self, prefix: &str, iri: &str);
    /// Consume one triple.
    fn emit(&mut self, triple: &Triple);
    /// Return the number of triples consumed so far.
    fn triple_count(&self) -> u64;

    /// Emit a triple with an IRI object.
    fn emit_iri(&mut self, subject: &str, predicate: &str, object: &str) {
        self.emit(&Triple::new(
            Subject::Iri(subject.to_string()),
            predicate,
            Object::Iri(object.to_string()),
        ));
    }

    /// Emit a triple with a plain string literal object.
    fn emit_literal(&mut self, subject: &str, predicate: &str, value: &str) {
        self.emit_typed_literal(subject, predicate, value, standard::XSD_STRING);
    }

    /// Emit a triple with a typed literal object.
    fn emit_typed_literal(&mut self, subject: &str, predicate: &str, value: &str, datatype: &str) {
        self.emit(&Triple::new(
            Subject::Iri(subject.to_string()),
            predicate,
            Object::Literal {
                value: value.to_string(),
                datatype: datatype.to_string(),
                language: None,
            },
        ));
    }
}
