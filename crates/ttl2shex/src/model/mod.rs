pub mod iri;
pub mod ontology;
pub mod triple;
