//! RDF vocabulary constants for Solid registries and shape trees.
//!
//! - `interop:` (http://www.w3.org/ns/solid/interop#) -- data registries and registrations
//! - `st:` (http://www.w3.org/ns/shapetrees#) -- shape tree documents
//! - `ldp:`, `solid:`, `dct:` -- container listing, patches, titles

/// Standard RDF/XSD namespace URIs
pub mod standard {
    pub const RDF: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
    pub const XSD: &str = "http://www.w3.org/2001/XMLSchema#";
    pub const XSD_PREFIX: &str = "xsd";
    pub const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
    pub const XSD_STRING: &str = "http://www.w3.org/2001/XMLSchema#string";
    pub const XSD_DATE_TIME: &str = "http://www.w3.org/2001/XMLSchema#dateTime";
}

/// Linked Data Platform containers (`ldp:` prefix)
pub mod ldp {
    pub const PREFIX: &str = "ldp";
    pub const NS: &str = "http://www.w3.org/ns/ldp#";

    pub const CONTAINS: &str = "http://www.w3.org/ns/ldp#contains";
}

/// Solid application interoperability (`interop:` prefix)
pub mod interop {
    pub const PREFIX: &str = "interop";
    pub const NS: &str = "http://www.w3.org/ns/solid/interop#";

    // Classes
    pub const DATA_REGISTRY: &str = "http://www.w3.org/ns/solid/interop#DataRegistry";
    pub const DATA_REGISTRATION: &str = "http://www.w3.org/ns/solid/interop#DataRegistration";

    // Predicates
    pub const HAS_DATA_REGISTRATION: &str =
        "http://www.w3.org/ns/solid/interop#hasDataRegistration";
    pub const REGISTERED_SHAPE_TREE: &str =
        "http://www.w3.org/ns/solid/interop#registeredShapeTree";
    pub const REGISTERED_BY: &str = "http://www.w3.org/ns/solid/interop#registeredBy";
    pub const REGISTERED_WITH: &str = "http://www.w3.org/ns/solid/interop#registeredWith";
    pub const REGISTERED_AT: &str = "http://www.w3.org/ns/solid/interop#registeredAt";
    pub const UPDATED_AT: &str = "http://www.w3.org/ns/solid/interop#updatedAt";
}

/// Shape tree documents (`st:` prefix)
pub mod st {
    pub const PREFIX: &str = "st";
    pub const NS: &str = "http://www.w3.org/ns/shapetrees#";

    pub const SHAPE: &str = "http://www.w3.org/ns/shapetrees#shape";
}

/// Solid N3 patches (`solid:` prefix)
pub mod solid {
    pub const PREFIX: &str = "solid";
    pub const NS: &str = "http://www.w3.org/ns/solid/terms#";
}

/// Dublin Core terms (`dct:` prefix)
pub mod dct {
    pub const PREFIX: &str = "dct";
    pub const NS: &str = "http://purl.org/dc/terms/";

    pub const TITLE: &str = "http://purl.org/dc/terms/title";
}
