//! Registry shape matcher.
//!
//! Walks registries, then their registrations, then the shape trees bound to
//! each registration, and reports the registrations whose shape documents
//! structurally match a local shape. Each level is fetched concurrently and
//! awaited as a batch before the next level starts.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use futures::future::try_join_all;
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::compare::shapes_match;
use crate::error::MatchError;
use crate::model::iri::{container_label, strip_fragment};
use crate::pod::SolidPod;
use crate::registry::registered_shape_trees;
use crate::schema::{parse_schema, ParsedShapeSchema};
use crate::shapetree::shape_uris;

/// Cooperative cancellation, polled between stages.
pub type SkipFlag = Arc<AtomicBool>;

/// Parsed shape documents keyed by URI, shared across scans for as long as
/// the caller keeps it.
#[derive(Debug, Clone, Default)]
pub struct ShapeCache {
    inner: Arc<RwLock<HashMap<String, Arc<ParsedShapeSchema>>>>,
}

impl ShapeCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, uri: &str) -> Option<Arc<ParsedShapeSchema>> {
        self.inner.read().await.get(uri).cloned()
    }

    pub async fn insert(&self, uri: &str, schema: Arc<ParsedShapeSchema>) {
        self.inner.write().await.insert(uri.to_string(), schema);
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }
}

/// A registration whose shape tree points at a matching shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchedShapeRegistry {
    pub registration_uri: String,
    pub registration_name: String,
    pub registry_name: String,
    pub registry_uri: String,
    #[serde(rename = "shapeURI")]
    pub shape_uri: String,
    #[serde(rename = "shapeTreeURI")]
    pub shape_tree_uri: String,
}

/// A shape tree bound to a registration, still to be checked.
#[derive(Debug, Clone)]
struct Candidate {
    registry_uri: String,
    registration_uri: String,
    shape_tree_uri: String,
}

/// Scan the registry tree under `root_registry_uri` for shapes matching
/// `local_shape_text`.
///
/// Never fails: any fetch or parse failure, and a set `skip_matching` flag,
/// yield an empty list.
pub async fn match_shape_registries<P>(
    pod: &P,
    root_registry_uri: &str,
    local_shape_text: &str,
    skip_matching: &SkipFlag,
) -> Vec<MatchedShapeRegistry>
where
    P: SolidPod + ?Sized,
{
    let cache = ShapeCache::new();
    match_shape_registries_with_cache(pod, root_registry_uri, local_shape_text, skip_matching, &cache)
        .await
}

/// [`match_shape_registries`] reusing shape documents held in `cache`.
pub async fn match_shape_registries_with_cache<P>(
    pod: &P,
    root_registry_uri: &str,
    local_shape_text: &str,
    skip_matching: &SkipFlag,
    cache: &ShapeCache,
) -> Vec<MatchedShapeRegistry>
where
    P: SolidPod + ?Sized,
{
    match scan(pod, root_registry_uri, local_shape_text, skip_matching, cache).await {
        Ok(matches) => matches,
        Err(MatchError::Skipped) => {
            info!(root = root_registry_uri, "shape matching skipped");
            Vec::new()
        }
        Err(e) => {
            warn!(root = root_registry_uri, error = %e, "shape matching failed");
            Vec::new()
        }
    }
}

fn check_skip(skip: &SkipFlag) -> Result<(), MatchError> {
    if skip.load(Ordering::SeqCst) {
        Err(MatchError::Skipped)
    } else {
        Ok(())
    }
}

/// The fallible pipeline behind [`match_shape_registries`].
pub async fn scan<P>(
    pod: &P,
    root_registry_uri: &str,
    local_shape_text: &str,
    skip: &SkipFlag,
    cache: &ShapeCache,
) -> Result<Vec<MatchedShapeRegistry>, MatchError>
where
    P: SolidPod + ?Sized,
{
    check_skip(skip)?;
    let local = parse_schema(local_shape_text)?;
    let registries = pod.list_container_entries(root_registry_uri).await?;
    info!(count = registries.len(), "registries listed");

    check_skip(skip)?;
    let registrations: Vec<(String, String)> =
        try_join_all(registries.iter().map(|registry| async move {
            let entries = pod.list_container_entries(registry).await?;
            Ok::<_, MatchError>(
                entries
                    .into_iter()
                    .map(|registration| (registry.clone(), registration))
                    .collect::<Vec<_>>(),
            )
        }))
        .await?
        .into_iter()
        .flatten()
        .collect();
    info!(count = registrations.len(), "registrations listed");

    check_skip(skip)?;
    let candidates: Vec<Candidate> =
        try_join_all(registrations.iter().map(|(registry, registration)| async move {
            let trees = registered_shape_trees(pod, registration).await?;
            Ok::<_, MatchError>(
                trees
                    .into_iter()
                    .map(|tree| Candidate {
                        registry_uri: registry.clone(),
                        registration_uri: registration.clone(),
                        shape_tree_uri: tree,
                    })
                    .collect::<Vec<_>>(),
            )
        }))
        .await?
        .into_iter()
        .flatten()
        .collect();
    info!(count = candidates.len(), "shape trees found");

    check_skip(skip)?;
    let local = &local;
    let matches: Vec<MatchedShapeRegistry> =
        try_join_all(candidates.into_iter().map(|candidate| async move {
            let shape = first_matching_shape(pod, &candidate.shape_tree_uri, local, cache).await?;
            Ok::<_, MatchError>(shape.map(|shape_uri| MatchedShapeRegistry {
                registration_name: container_label(&candidate.registration_uri),
                registry_name: container_label(&candidate.registry_uri),
                registration_uri: candidate.registration_uri,
                registry_uri: candidate.registry_uri,
                shape_uri,
                shape_tree_uri: candidate.shape_tree_uri,
            }))
        }))
        .await?
        .into_iter()
        .flatten()
        .collect();
    info!(count = matches.len(), "matching shapes");

    Ok(matches)
}

async fn first_matching_shape<P>(
    pod: &P,
    shape_tree_uri: &str,
    local: &ParsedShapeSchema,
    cache: &ShapeCache,
) -> Result<Option<String>, MatchError>
where
    P: SolidPod + ?Sized,
{
    let document = strip_fragment(shape_tree_uri);
    let tree = pod.fetch_resource(document).await?;
    for shape_uri in shape_uris(&tree, Some(document))? {
        let remote = shape_schema(pod, &shape_uri, cache).await?;
        if shapes_match(&remote, local) {
            debug!(shape = %shape_uri, tree = shape_tree_uri, "shape matched");
            return Ok(Some(shape_uri));
        }
    }
    Ok(None)
}

async fn shape_schema<P>(
    pod: &P,
    shape_uri: &str,
    cache: &ShapeCache,
) -> Result<Arc<ParsedShapeSchema>, MatchError>
where
    P: SolidPod + ?Sized,
{
    if let Some(schema) = cache.get(shape_uri).await {
        return Ok(schema);
    }
    let text = pod.fetch_resource(shape_uri).await?;
    let schema = Arc::new(parse_schema(&text)?);
    cache.insert(shape_uri, schema.clone()).await;
    Ok(schema)
}
