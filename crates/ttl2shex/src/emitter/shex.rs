//! Shape synthesis: a streaming triple sink that derives a ShEx schema.
//!
//! Every `rdf:type` triple closes the shape being built and opens a new one
//! named after the type. Other triples become property constraints of the
//! open shape: literal objects constrain the datatype, everything else is
//! constrained to `IRI`.
//!
//! ```text
//! PREFIX ex: <http://ex.org/>
//! PREFIX xsd: <http://www.w3.org/2001/XMLSchema#>
//!
//! <#LoanShape> {
//! 	a	[ex:Loan] ;
//! 	ex:rate xsd:decimal
//! }
//! ```

use tracing::debug;

use super::TripleSink;
use crate::error::SynthError;
use crate::model::iri::local_name;
use crate::model::ontology::standard;
use crate::model::triple::{Object, PrefixMap, Triple};
use crate::source::stream_turtle;

/// Derive a ShEx schema from a Turtle sample.
pub fn turtle_to_shape(turtle: &str) -> Result<String, SynthError> {
    let mut synth = ShapeSynthesizer::new();
    stream_turtle(turtle, None, &mut synth)?;
    synth.finish()
}

/// One shape block under construction.
#[derive(Debug)]
struct ShapeBuilder {
    name: String,
    lines: Vec<String>,
}

impl ShapeBuilder {
    fn render(&self) -> String {
        format!("<#{}> {{\n\t{}\n}}", self.name, self.lines.join(" ;\n\t"))
    }
}

/// Streaming Turtle-to-ShEx transformer.
#[derive(Debug, Default)]
pub struct ShapeSynthesizer {
    prefixes: PrefixMap,
    current: Option<ShapeBuilder>,
    shapes: Vec<ShapeBuilder>,
    /// Property lines seen before the first type triple.
    pending: Vec<String>,
    uses_xsd: bool,
    error: Option<SynthError>,
    count: u64,
}

impl ShapeSynthesizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Close the current shape and open a new one for `type_iri`.
    fn open_shape(&mut self, type_iri: &str) {
        let local = local_name(type_iri);
        if local.is_empty() {
            self.error.get_or_insert_with(|| {
                SynthError::MalformedShape(format!("cannot name a shape after <{type_iri}>"))
            });
            return;
        }
        if let Some(done) = self.current.take() {
            self.shapes.push(done);
        }
        let value = self.compact_or_bracket(type_iri);
        let mut lines = vec![format!("a\t[{value}]")];
        lines.append(&mut self.pending);
        self.current = Some(ShapeBuilder {
            name: format!("{local}Shape"),
            lines,
        });
    }

    fn push_line(&mut self, line: String) {
        match self.current.as_mut() {
            Some(shape) => shape.lines.push(line),
            None => self.pending.push(line),
        }
    }

    fn literal_line(&mut self, predicate: &str, datatype: &str) -> String {
        let property = match self.prefixes.compact(predicate) {
            Some((prefix, local)) => format!("{prefix}:{local}"),
            None => {
                debug!(%predicate, "no prefix declared for predicate namespace; using bare local name");
                local_name(predicate).to_string()
            }
        };
        let datatype = match datatype.strip_prefix(standard::XSD) {
            Some(local) if !local.is_empty() => {
                self.uses_xsd = true;
                format!("{}:{local}", standard::XSD_PREFIX)
            }
            _ => self.compact_or_bracket(datatype),
        };
        format!("{property} {datatype}")
    }

    fn iri_line(&self, predicate: &str) -> String {
        match local_name(predicate) {
            "" => format!("<{predicate}> IRI"),
            local => format!("{local} IRI"),
        }
    }

    fn compact_or_bracket(&self, iri: &str) -> String {
        match self.prefixes.compact(iri) {
            Some((prefix, local)) => format!("{prefix}:{local}"),
            None => format!("<{iri}>"),
        }
    }

    /// Render the schema text.
    ///
    /// Fails with [`SynthError::NoShapeFound`] when no type triple was seen.
    pub fn finish(mut self) -> Result<String, SynthError> {
        if let Some(err) = self.error.take() {
            return Err(err);
        }
        if let Some(done) = self.current.take() {
            self.shapes.push(done);
        }
        if self.shapes.is_empty() {
            return Err(SynthError::NoShapeFound);
        }
        if self.uses_xsd && !self.prefixes.contains_prefix(standard::XSD_PREFIX) {
            self.prefixes.insert(standard::XSD_PREFIX, standard::XSD);
        }

        let mut out = String::new();
        for (prefix, ns) in self.prefixes.iter() {
            out.push_str(&format!("PREFIX {prefix}: <{ns}>\n"));
        }
        if !self.prefixes.is_empty() {
            out.push('\n');
        }
        let blocks: Vec<String> = self.shapes.iter().map(ShapeBuilder::render).collect();
        out.push_str(&blocks.join("\n\n"));
        out.push('\n');
        Ok(out)
    }
}

impl TripleSink for ShapeSynthesizer {
    fn add_prefix(&mut self, prefix: &str, iri: &str) {
        self.prefixes.insert(prefix, iri);
    }

    fn emit(&mut self, triple: &Triple) {
        self.count += 1;
        match &triple.object {
            Object::Iri(object) if triple.is_type() => self.open_shape(object),
            Object::Literal { datatype, .. } => {
                let line = self.literal_line(&triple.predicate, datatype);
                self.push_line(line);
            }
            Object::Iri(_) | Object::Blank(_) => {
                let line = self.iri_line(&triple.predicate);
                self.push_line(line);
            }
        }
    }

    fn triple_count(&self) -> u64 {
        self.count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EX: &str = "http://ex.org/";

    fn synth_with_ex() -> ShapeSynthesizer {
        let mut synth = ShapeSynthesizer::new();
        synth.add_prefix("ex", EX);
        synth
    }

    #[test]
    fn last_line_of_every_block_has_no_separator() {
        let mut synth = synth_with_ex();
        synth.emit_iri("http://ex.org/a", standard::RDF_TYPE, "http://ex.org/Loan");
        synth.emit_literal("http://ex.org/a", "http://ex.org/label", "x");
        synth.emit_iri("http://ex.org/b", standard::RDF_TYPE, "http://ex.org/Person");
        synth.emit_literal("http://ex.org/b", "http://ex.org/name", "y");
        let text = synth.finish().unwrap();
        assert!(text.contains("\tex:label xsd:string\n}"));
        assert!(text.contains("\tex:name xsd:string\n}"));
        assert!(text.contains("\ta\t[ex:Person] ;\n"));
    }

    #[test]
    fn properties_before_the_type_join_the_first_shape() {
        let mut synth = synth_with_ex();
        synth.emit_literal("http://ex.org/a", "http://ex.org/label", "x");
        synth.emit_iri("http://ex.org/a", standard::RDF_TYPE, "http://ex.org/Loan");
        let text = synth.finish().unwrap();
        assert!(text.contains("<#LoanShape> {\n\ta\t[ex:Loan] ;\n\tex:label xsd:string\n}"));
    }

    #[test]
    fn type_named_by_trailing_slash_is_malformed() {
        let mut synth = synth_with_ex();
        synth.emit_iri("http://ex.org/a", standard::RDF_TYPE, "http://ex.org/types/");
        assert!(matches!(synth.finish(), Err(SynthError::MalformedShape(_))));
    }

    #[test]
    fn xsd_prefix_is_declared_when_used() {
        let mut synth = synth_with_ex();
        synth.emit_iri("http://ex.org/a", standard::RDF_TYPE, "http://ex.org/Loan");
        synth.emit_typed_literal(
            "http://ex.org/a",
            "http://ex.org/rate",
            "5.0",
            "http://www.w3.org/2001/XMLSchema#decimal",
        );
        let text = synth.finish().unwrap();
        assert!(text.starts_with(
            "PREFIX ex: <http://ex.org/>\nPREFIX xsd: <http://www.w3.org/2001/XMLSchema#>\n\n"
        ));
    }
}
