//! Solid N3 patch writer.

use std::io::{self, Write};

use super::TripleSink;
use crate::model::ontology::{solid, standard};
use crate::model::triple::{Object, PrefixMap, Subject, Triple};

/// Writes a Solid `InsertDeletePatch` whose `solid:inserts` block holds the
/// emitted triples.
pub struct N3PatchWriter<W: Write> {
    writer: W,
    count: u64,
    prefixes: PrefixMap,
    header_written: bool,
    failure: Option<io::Error>,
}

impl<W: Write> N3PatchWriter<W> {
    pub fn new(writer: W) -> Self {
        let mut prefixes = PrefixMap::new();
        prefixes.insert(solid::PREFIX, solid::NS);
        Self {
            writer,
            count: 0,
            prefixes,
            header_written: false,
            failure: None,
        }
    }

    /// Write prefixes and open the inserts block (called before first triple).
    fn write_header(&mut self) {
        if self.header_written {
            return;
        }
        self.header_written = true;
        let mut header = String::new();
        for (prefix, iri) in self.prefixes.iter() {
            header.push_str(&format!("@prefix {prefix}: <{iri}>.\n"));
        }
        header.push_str("\n_:rename a solid:InsertDeletePatch;\n    solid:inserts {\n");
        self.write(&header);
    }

    fn write(&mut self, text: &str) {
        if self.failure.is_none() {
            if let Err(e) = self.writer.write_all(text.as_bytes()) {
                self.failure = Some(e);
            }
        }
    }

    /// Try to compact an IRI using registered prefixes.
    fn compact_iri(&self, iri: &str) -> String {
        match self.prefixes.compact(iri) {
            Some((prefix, local)) => format!("{prefix}:{local}"),
            None => format!("<{iri}>"),
        }
    }

    fn escape_literal(s: &str) -> String {
        let mut out = String::with_capacity(s.len());
        for c in s.chars() {
            match c {
                '\\' => out.push_str("\\\\"),
                '"' => out.push_str("\\\""),
                '\n' => out.push_str("\\n"),
                '\r' => out.push_str("\\r"),
                '\t' => out.push_str("\\t"),
                _ => out.push(c),
            }
        }
        out
    }

    fn term(&self, object: &Object) -> String {
        match object {
            Object::Iri(iri) => self.compact_iri(iri),
            Object::Blank(label) => format!("_:{label}"),
            Object::Literal {
                value, language: Some(lang), ..
            } => format!("\"{}\"@{lang}", Self::escape_literal(value)),
            Object::Literal {
                value, datatype, ..
            } if datatype == standard::XSD_STRING => {
                format!("\"{}\"", Self::escape_literal(value))
            }
            Object::Literal {
                value, datatype, ..
            } => format!(
                "\"{}\"^^{}",
                Self::escape_literal(value),
                self.compact_iri(datatype)
            ),
        }
    }

    /// Close the patch and hand back the writer.
    pub fn finish(mut self) -> io::Result<W> {
        self.write_header();
        self.write("    } .\n");
        if let Some(e) = self.failure.take() {
            return Err(e);
        }
        self.writer.flush()?;
        Ok(self.writer)
    }
}

impl<W: Write> TripleSink for N3PatchWriter<W> {
    /// Prefixes arriving after the header has been written are ignored.
    fn add_prefix(&mut self, prefix: &str, iri: &str) {
        if !self.header_written {
            self.prefixes.insert(prefix, iri);
        }
    }

    fn emit(&mut self, triple: &Triple) {
        self.write_header();
        let s = match &triple.subject {
            Subject::Iri(iri) => format!("<{iri}>"),
            Subject::Blank(label) => format!("_:{label}"),
        };
        let p = format!("<{}>", triple.predicate);
        let o = self.term(&triple.object);
        self.write(&format!("        {s} {p} {o} .\n"));
        self.count += 1;
    }

    fn triple_count(&self) -> u64 {
        self.count
    }
}
