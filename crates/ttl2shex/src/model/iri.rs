//! IRI splitting for shape naming, and URI minting for Solid pod containers.

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, CONTROLS};

/// Characters that need percent-encoding in IRI path segments.
/// We keep alphanumeric, -, _, ., ~ as unreserved per RFC 3987.
const IRI_ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'!')
    .add(b'"')
    .add(b'#')
    .add(b'$')
    .add(b'%')
    .add(b'&')
    .add(b'\'')
    .add(b'(')
    .add(b')')
    .add(b'*')
    .add(b'+')
    .add(b',')
    .add(b'/')
    .add(b':')
    .add(b';')
    .add(b'<')
    .add(b'=')
    .add(b'>')
    .add(b'?')
    .add(b'@')
    .add(b'[')
    .add(b']')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// Local name of an IRI: the fragment after `#`, otherwise the segment after
/// the last `/`. May be empty.
pub fn local_name(iri: &str) -> &str {
    match iri.rfind('#') {
        Some(pos) => &iri[pos + 1..],
        None => match iri.rfind('/') {
            Some(pos) => &iri[pos + 1..],
            None => iri,
        },
    }
}

/// Drop the `#fragment` of an IRI, if any.
pub fn strip_fragment(iri: &str) -> &str {
    iri.split('#').next().unwrap_or(iri)
}

/// Label of a container URI: its second-to-last `/` segment, percent-decoded.
/// `https://pod.example/loans/2024/` yields `2024`.
pub fn container_label(uri: &str) -> String {
    let segment = uri.rsplit('/').nth(1).unwrap_or_default();
    decode(segment)
}

/// Label of a plain resource URI: its last `/` segment, percent-decoded.
pub fn resource_label(uri: &str) -> String {
    let segment = uri.rsplit('/').next().unwrap_or_default();
    decode(segment)
}

fn decode(segment: &str) -> String {
    percent_decode_str(segment).decode_utf8_lossy().into_owned()
}

/// Generates the URIs the wizard uses inside an organisation's storage.
pub struct IriMinter {
    storage_uri: String,
}

impl IriMinter {
    pub fn new(storage_uri: &str) -> Self {
        Self {
            storage_uri: format!("{}/", storage_uri.trim_end_matches('/')),
        }
    }

    /// Escape a string for use in an IRI path segment.
    pub fn escape(value: &str) -> String {
        utf8_percent_encode(value, IRI_ENCODE_SET).to_string()
    }

    /// The profile registry listing all data registries.
    pub fn profile_registry_iri(&self) -> String {
        format!("{}profile/registry", self.storage_uri)
    }

    /// Container IRI for a data registry.
    pub fn registry_iri(&self, registry_name: &str) -> String {
        format!("{}{}/", self.storage_uri, Self::escape(registry_name))
    }

    /// Container IRI for a data registration inside a registry.
    pub fn registration_iri(&self, registry_name: &str, registration_name: &str) -> String {
        format!(
            "{}{}/",
            self.registry_iri(registry_name),
            Self::escape(registration_name)
        )
    }
}

/// Auxiliary `.meta` resource describing a container.
pub fn meta_iri(resource_uri: &str) -> String {
    format!("{resource_uri}.meta")
}
