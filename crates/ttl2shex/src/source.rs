//! Turtle triple source built on `oxttl`.
//!
//! Triples are handed to a [`TripleSink`] in document order. Prefixes are
//! announced to the sink as soon as the parser has seen them, so a sink sees
//! every prefix declared before a triple ahead of that triple.

use oxrdf::{Subject as OxSubject, Term};
use oxttl::turtle::SliceTurtleParser;
use oxttl::TurtleParser;
use tracing::trace;

use crate::emitter::TripleSink;
use crate::error::TurtleError;
use crate::model::triple::{Object, PrefixMap, Subject, Triple};

/// A fully collected Turtle document.
#[derive(Debug, Clone, Default)]
pub struct ParsedTurtle {
    pub triples: Vec<Triple>,
    pub prefixes: PrefixMap,
}

impl ParsedTurtle {
    /// IRI objects of `predicate`, optionally restricted to one subject,
    /// in document order.
    pub fn iri_objects(&self, subject: Option<&str>, predicate: &str) -> Vec<String> {
        self.triples
            .iter()
            .filter(|t| t.predicate == predicate)
            .filter(|t| match (subject, &t.subject) {
                (None, _) => true,
                (Some(wanted), Subject::Iri(s)) => s == wanted,
                (Some(_), Subject::Blank(_)) => false,
            })
            .filter_map(|t| match &t.object {
                Object::Iri(iri) => Some(iri.clone()),
                _ => None,
            })
            .collect()
    }
}

impl TripleSink for ParsedTurtle {
    fn add_prefix(&mut self, prefix: &str, iri: &str) {
        self.prefixes.insert(prefix, iri);
    }

    fn emit(&mut self, triple: &Triple) {
        self.triples.push(triple.clone());
    }

    fn triple_count(&self) -> u64 {
        self.triples.len() as u64
    }
}

/// Parse `text` and stream its prefixes and triples into `sink`.
///
/// Relative IRIs are resolved against `base_iri` when one is given.
pub fn stream_turtle<S: TripleSink>(
    text: &str,
    base_iri: Option<&str>,
    sink: &mut S,
) -> Result<(), TurtleError> {
    let mut parser = TurtleParser::new();
    if let Some(base) = base_iri {
        parser = parser
            .with_base_iri(base)
            .map_err(|e| TurtleError::BaseIri {
                iri: base.to_string(),
                message: e.to_string(),
            })?;
    }

    let mut reader = parser.for_slice(text.as_bytes());
    let mut announced = PrefixMap::new();
    while let Some(result) = reader.next() {
        let triple = result.map_err(|e| TurtleError::Syntax(e.to_string()))?;
        announce_prefixes(&reader, &mut announced, sink);
        sink.emit(&convert(triple));
    }
    announce_prefixes(&reader, &mut announced, sink);
    trace!(triples = sink.triple_count(), prefixes = announced.len(), "turtle parsed");
    Ok(())
}

/// Parse `text` into a [`ParsedTurtle`].
pub fn parse_turtle(text: &str, base_iri: Option<&str>) -> Result<ParsedTurtle, TurtleError> {
    let mut parsed = ParsedTurtle::default();
    stream_turtle(text, base_iri, &mut parsed)?;
    Ok(parsed)
}

/// Whether `text` is syntactically valid Turtle.
pub fn is_valid_turtle(text: &str) -> bool {
    TurtleParser::new()
        .for_slice(text.as_bytes())
        .all(|result| result.is_ok())
}

/// Forward prefixes the parser knows about but the sink has not seen yet.
/// Prefixes discovered together are announced in name order.
fn announce_prefixes<S: TripleSink>(
    reader: &SliceTurtleParser<'_>,
    announced: &mut PrefixMap,
    sink: &mut S,
) {
    let mut fresh: Vec<(String, String)> = reader
        .prefixes()
        .filter(|(name, ns)| announced.get(name) != Some(*ns))
        .map(|(name, ns)| (name.to_string(), ns.to_string()))
        .collect();
    fresh.sort();
    for (name, ns) in fresh {
        announced.insert(&name, &ns);
        sink.add_prefix(&name, &ns);
    }
}

fn convert(triple: oxrdf::Triple) -> Triple {
    let subject = match triple.subject {
        OxSubject::NamedNode(node) => Subject::Iri(node.into_string()),
        OxSubject::BlankNode(node) => Subject::Blank(node.as_str().to_string()),
        #[allow(unreachable_patterns)]
        other => Subject::Blank(other.to_string()),
    };
    let object = match triple.object {
        Term::NamedNode(node) => Object::Iri(node.into_string()),
        Term::BlankNode(node) => Object::Blank(node.as_str().to_string()),
        Term::Literal(literal) => Object::Literal {
            value: literal.value().to_string(),
            datatype: literal.datatype().as_str().to_string(),
            language: literal.language().map(str::to_string),
        },
        #[allow(unreachable_patterns)]
        other => Object::Blank(other.to_string()),
    };
    Triple::new(subject, triple.predicate.into_string(), object)
}
