//! Triples and prefix maps as seen by the shape pipeline.

use super::ontology::standard;

/// Subject of a triple.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Subject {
    Iri(String),
    Blank(String),
}

/// Object of a triple.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Object {
    Iri(String),
    Blank(String),
    Literal {
        value: String,
        datatype: String,
        language: Option<String>,
    },
}

/// An RDF triple in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Triple {
    pub subject: Subject,
    pub predicate: String,
    pub object: Object,
}

impl Triple {
    pub fn new(subject: Subject, predicate: impl Into<String>, object: Object) -> Self {
        Self {
            subject,
            predicate: predicate.into(),
            object,
        }
    }

    /// Whether this is an `rdf:type` statement.
    pub fn is_type(&self) -> bool {
        self.predicate == standard::RDF_TYPE
    }
}

/// Prefix declarations in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrefixMap {
    entries: Vec<(String, String)>,
}

impl PrefixMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `prefix` to `namespace`. Rebinding keeps the original position.
    pub fn insert(&mut self, prefix: &str, namespace: &str) {
        match self.entries.iter_mut().find(|(p, _)| p == prefix) {
            Some(entry) => entry.1 = namespace.to_string(),
            None => self
                .entries
                .push((prefix.to_string(), namespace.to_string())),
        }
    }

    pub fn get(&self, prefix: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(p, _)| p == prefix)
            .map(|(_, ns)| ns.as_str())
    }

    pub fn contains_prefix(&self, prefix: &str) -> bool {
        self.get(prefix).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(p, ns)| (p.as_str(), ns.as_str()))
    }

    /// Reverse lookup: the prefix whose namespace starts `iri`, together with
    /// the remaining local name. Longest matching namespace wins; a match is
    /// only accepted when the local name is a plain name.
    pub fn compact<'a>(&'a self, iri: &'a str) -> Option<(&'a str, &'a str)> {
        let mut best: Option<(&str, &str)> = None;
        for (prefix, ns) in &self.entries {
            if iri.starts_with(ns.as_str())
                && best.is_none_or(|(_, prev_ns)| ns.len() > prev_ns.len())
            {
                best = Some((prefix.as_str(), ns.as_str()));
            }
        }
        let (prefix, ns) = best?;
        let local = &iri[ns.len()..];
        is_plain_local(local).then_some((prefix, local))
    }
}

fn is_plain_local(local: &str) -> bool {
    !local.is_empty()
        && !local.ends_with('.')
        && local
            .chars()
            .all(|c| c.is_alphanumeric() || c == '_' || c == '-' || c == '.')
}
