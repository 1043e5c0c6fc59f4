//! The Solid pod boundary.
//!
//! Everything the matcher and the registry browser need from a pod goes
//! through [`SolidPod`]: reading a resource, listing a container, probing
//! for existence and sending an N3 patch.

pub mod http;
pub mod memory;

use async_trait::async_trait;

use crate::error::PodError;

pub use http::HttpPod;
pub use memory::MemoryPod;

#[async_trait]
pub trait SolidPod: Send + Sync {
    /// Body of the resource at `uri`, as Turtle (or ShEx for shape documents).
    async fn fetch_resource(&self, uri: &str) -> Result<String, PodError>;

    /// URIs of the resources a container holds (its `ldp:contains` objects).
    async fn list_container_entries(&self, uri: &str) -> Result<Vec<String>, PodError>;

    async fn resource_exists(&self, uri: &str) -> Result<bool, PodError>;

    /// Apply an N3 `solid:InsertDeletePatch` to the resource at `uri`.
    async fn patch_resource(&self, uri: &str, body: &str) -> Result<(), PodError>;
}
