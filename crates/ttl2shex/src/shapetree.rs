//! Reading ShapeTree documents.

use crate::error::TurtleError;
use crate::model::iri::strip_fragment;
use crate::model::ontology::st;
use crate::source::parse_turtle;

/// Shape documents referenced by `st:shape` in a ShapeTree, fragment
/// removed, in document order. Duplicates are kept once.
pub fn shape_uris(tree_turtle: &str, base_iri: Option<&str>) -> Result<Vec<String>, TurtleError> {
    let parsed = parse_turtle(tree_turtle, base_iri)?;
    let mut uris: Vec<String> = Vec::new();
    for shape in parsed.iri_objects(None, st::SHAPE) {
        let document = strip_fragment(&shape).to_string();
        if !uris.contains(&document) {
            uris.push(document);
        }
    }
    Ok(uris)
}
