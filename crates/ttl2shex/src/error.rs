//! Error types shared across the crate.

use thiserror::Error;

/// Turtle could not be read by the triple source.
#[derive(Debug, Error)]
pub enum TurtleError {
    #[error("Turtle syntax error: {0}")]
    Syntax(String),

    #[error("invalid base IRI {iri}: {message}")]
    BaseIri { iri: String, message: String },
}

/// Failures of the shape synthesizer.
#[derive(Debug, Error)]
pub enum SynthError {
    /// No `rdf:type` triple was seen, so no shape name could be derived.
    #[error("no rdf:type triple found; cannot derive a shape")]
    NoShapeFound,

    /// A shape could not be given a usable name or body.
    #[error("malformed shape: {0}")]
    MalformedShape(String),

    #[error(transparent)]
    Turtle(#[from] TurtleError),
}

/// ShEx compact syntax rejected by the schema parser.
#[derive(Debug, Error)]
#[error("ShEx parse error at line {line}, column {column}: {message}")]
pub struct SchemaParseError {
    pub line: usize,
    pub column: usize,
    pub message: String,
}

impl SchemaParseError {
    pub fn new(line: usize, column: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            column,
            message: message.into(),
        }
    }
}

/// Failures reported by the Solid pod boundary.
#[derive(Debug, Error)]
pub enum PodError {
    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("{uri} returned status {status}")]
    Status { uri: String, status: u16 },

    #[error("resource not found: {0}")]
    NotFound(String),

    #[error("could not read RDF from {uri}: {source}")]
    Rdf {
        uri: String,
        #[source]
        source: TurtleError,
    },

    #[error("{0}")]
    Rejected(String),
}

impl From<reqwest::Error> for PodError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            PodError::Http(format!("request timeout: {e}"))
        } else if e.is_connect() {
            PodError::Http(format!("failed to connect: {e}"))
        } else {
            PodError::Http(e.to_string())
        }
    }
}

/// Failures inside the registry scan. Never escapes
/// [`match_shape_registries`](crate::matcher::match_shape_registries), which
/// degrades all of them to an empty result.
#[derive(Debug, Error)]
pub enum MatchError {
    /// Cooperative cancellation observed at a stage boundary.
    #[error("shape matching skipped")]
    Skipped,

    #[error(transparent)]
    Pod(#[from] PodError),

    #[error(transparent)]
    Schema(#[from] SchemaParseError),

    #[error(transparent)]
    Turtle(#[from] TurtleError),
}

/// Configuration file problems.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("missing setting: {0}")]
    Missing(&'static str),

    #[error("could not build HTTP client: {0}")]
    Client(String),
}
