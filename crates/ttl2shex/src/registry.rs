//! Registry browsing and the N3 patches that maintain registry metadata.

use chrono::{DateTime, SecondsFormat, Utc};
use futures::future::try_join_all;
use serde::Serialize;
use tracing::{debug, info};

use crate::emitter::n3patch::N3PatchWriter;
use crate::emitter::TripleSink;
use crate::error::PodError;
use crate::model::iri::{container_label, meta_iri, resource_label, strip_fragment, IriMinter};
use crate::model::ontology::{dct, interop, standard};
use crate::pod::SolidPod;
use crate::shapetree::shape_uris;
use crate::source::parse_turtle;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RegistryNodeKind {
    DataRegistry,
    DataRegistration,
    DataInstance,
}

/// One node of the registry tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistryNode {
    pub key: String,
    pub label: String,
    #[serde(rename = "type")]
    pub kind: RegistryNodeKind,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<RegistryNode>,
}

impl RegistryNode {
    pub fn is_leaf(&self) -> bool {
        self.kind == RegistryNodeKind::DataInstance
    }
}

/// Registries under `root_registry_uri`, each with its registrations and
/// their data instances.
pub async fn full_registry<P>(pod: &P, root_registry_uri: &str) -> Result<Vec<RegistryNode>, PodError>
where
    P: SolidPod + ?Sized,
{
    let registries = pod.list_container_entries(root_registry_uri).await?;
    let nodes = try_join_all(registries.into_iter().map(|registry_uri| async move {
        let registrations = pod.list_container_entries(&registry_uri).await?;
        let children = try_join_all(registrations.into_iter().map(|registration_uri| async move {
            let instances = pod.list_container_entries(&registration_uri).await?;
            Ok::<_, PodError>(RegistryNode {
                label: container_label(&registration_uri),
                key: registration_uri,
                kind: RegistryNodeKind::DataRegistration,
                children: instances
                    .into_iter()
                    .map(|uri| RegistryNode {
                        label: resource_label(&uri),
                        key: uri,
                        kind: RegistryNodeKind::DataInstance,
                        children: Vec::new(),
                    })
                    .collect(),
            })
        }))
        .await?;
        Ok::<_, PodError>(RegistryNode {
            label: container_label(&registry_uri),
            key: registry_uri,
            kind: RegistryNodeKind::DataRegistry,
            children,
        })
    }))
    .await?;
    info!(registries = nodes.len(), "registry tree loaded");
    Ok(nodes)
}

/// Shape trees bound to a registration through `interop:registeredShapeTree`
/// in its description.
pub async fn registered_shape_trees<P>(pod: &P, registration_uri: &str) -> Result<Vec<String>, PodError>
where
    P: SolidPod + ?Sized,
{
    let body = pod.fetch_resource(registration_uri).await?;
    let description = parse_turtle(&body, Some(registration_uri)).map_err(|source| PodError::Rdf {
        uri: registration_uri.to_string(),
        source,
    })?;
    Ok(description.iri_objects(Some(registration_uri), interop::REGISTERED_SHAPE_TREE))
}

/// Bind `shape_tree_uri` to a registration unless it already has a shape
/// tree. Returns whether a patch was sent.
///
/// The tree document and every shape document it names must already exist
/// on the pod.
pub async fn apply_shape_tree<P>(
    pod: &P,
    registration_uri: &str,
    registered_by: &str,
    shape_tree_uri: &str,
    now: DateTime<Utc>,
) -> Result<bool, PodError>
where
    P: SolidPod + ?Sized,
{
    if !registered_shape_trees(pod, registration_uri).await?.is_empty() {
        debug!(registration = registration_uri, "shape tree already registered");
        return Ok(false);
    }
    ensure_shape_tree_published(pod, shape_tree_uri).await?;
    let body = shape_tree_patch_body(registration_uri, registered_by, shape_tree_uri, now);
    pod.patch_resource(&meta_iri(registration_uri), &body).await?;
    info!(registration = registration_uri, tree = shape_tree_uri, "shape tree registered");
    Ok(true)
}

async fn ensure_shape_tree_published<P>(pod: &P, shape_tree_uri: &str) -> Result<(), PodError>
where
    P: SolidPod + ?Sized,
{
    let document = strip_fragment(shape_tree_uri);
    ensure_exists(pod, document).await?;
    let tree = pod.fetch_resource(document).await?;
    let shapes = shape_uris(&tree, Some(document)).map_err(|source| PodError::Rdf {
        uri: document.to_string(),
        source,
    })?;
    for shape_uri in &shapes {
        ensure_exists(pod, shape_uri).await?;
    }
    Ok(())
}

async fn ensure_exists<P>(pod: &P, uri: &str) -> Result<(), PodError>
where
    P: SolidPod + ?Sized,
{
    if pod.resource_exists(uri).await? {
        Ok(())
    } else {
        Err(PodError::NotFound(uri.to_string()))
    }
}

/// Create the data registry `registry_name` in the storage unless it exists.
/// Returns whether anything was written.
pub async fn create_data_registry<P>(
    pod: &P,
    minter: &IriMinter,
    registry_name: &str,
) -> Result<bool, PodError>
where
    P: SolidPod + ?Sized,
{
    let registry_uri = minter.registry_iri(registry_name);
    if pod.resource_exists(&registry_uri).await? {
        debug!(registry = %registry_uri, "data registry already exists");
        return Ok(false);
    }
    pod.patch_resource(
        &meta_iri(&registry_uri),
        &registry_patch_body(&registry_uri, registry_name),
    )
    .await?;
    info!(registry = %registry_uri, "data registry created");
    Ok(true)
}

/// Create a data registration inside an existing registry and link it from
/// the registry. Returns whether anything was written.
pub async fn create_data_registration<P>(
    pod: &P,
    minter: &IriMinter,
    registry_name: &str,
    registration_name: &str,
) -> Result<bool, PodError>
where
    P: SolidPod + ?Sized,
{
    let registry_uri = minter.registry_iri(registry_name);
    ensure_exists(pod, &registry_uri).await?;

    let registration_uri = minter.registration_iri(registry_name, registration_name);
    if pod.resource_exists(&registration_uri).await? {
        debug!(registration = %registration_uri, "data registration already exists");
        return Ok(false);
    }
    pod.patch_resource(
        &meta_iri(&registration_uri),
        &registration_patch_body(&registration_uri, registration_name),
    )
    .await?;
    pod.patch_resource(
        &meta_iri(&registry_uri),
        &registration_link_patch_body(&registry_uri, registration_name),
    )
    .await?;
    info!(registration = %registration_uri, "data registration created");
    Ok(true)
}

/// Patch inserting the shape tree binding of a registration.
pub fn shape_tree_patch_body(
    registration_uri: &str,
    registered_by: &str,
    shape_tree_uri: &str,
    now: DateTime<Utc>,
) -> String {
    let timestamp = now.to_rfc3339_opts(SecondsFormat::Millis, true);
    render_patch(|patch| {
        patch.add_prefix(interop::PREFIX, interop::NS);
        patch.add_prefix(standard::XSD_PREFIX, standard::XSD);
        patch.emit_iri(registration_uri, interop::REGISTERED_SHAPE_TREE, shape_tree_uri);
        patch.emit_iri(registration_uri, interop::REGISTERED_BY, registered_by);
        patch.emit_iri(registration_uri, interop::REGISTERED_WITH, "#blank");
        for predicate in [interop::REGISTERED_AT, interop::UPDATED_AT] {
            patch.emit_typed_literal(
                registration_uri,
                predicate,
                &timestamp,
                standard::XSD_DATE_TIME,
            );
        }
    })
}

/// Patch for the `.meta` of a new registry container.
pub fn registry_patch_body(registry_uri: &str, title: &str) -> String {
    typed_container_patch(registry_uri, title, interop::DATA_REGISTRY)
}

/// Patch for the `.meta` of a new registration container.
pub fn registration_patch_body(registration_uri: &str, title: &str) -> String {
    typed_container_patch(registration_uri, title, interop::DATA_REGISTRATION)
}

/// Patch linking a registry to a registration it holds, by relative IRI.
pub fn registration_link_patch_body(registry_uri: &str, registration_name: &str) -> String {
    let relative = format!("{}/", IriMinter::escape(registration_name));
    render_patch(|patch| {
        patch.add_prefix(interop::PREFIX, interop::NS);
        patch.emit_iri(registry_uri, interop::HAS_DATA_REGISTRATION, &relative);
    })
}

fn typed_container_patch(container_uri: &str, title: &str, class: &str) -> String {
    render_patch(|patch| {
        patch.add_prefix(interop::PREFIX, interop::NS);
        patch.add_prefix(dct::PREFIX, dct::NS);
        patch.emit_literal(container_uri, dct::TITLE, title);
        patch.emit_iri(container_uri, standard::RDF_TYPE, class);
    })
}

fn render_patch(build: impl FnOnce(&mut N3PatchWriter<Vec<u8>>)) -> String {
    let mut patch = N3PatchWriter::new(Vec::new());
    build(&mut patch);
    // writes into a Vec cannot fail
    let bytes = patch.finish().unwrap_or_default();
    String::from_utf8_lossy(&bytes).into_owned()
}
