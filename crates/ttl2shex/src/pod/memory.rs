//! In-memory [`SolidPod`] for tests and dry runs.

use std::collections::{BTreeMap, HashSet};

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::debug;

use super::SolidPod;
use crate::error::PodError;
use crate::model::ontology::ldp;
use crate::source::parse_turtle;

/// Resources held as Turtle text keyed by URI. Containers list their
/// entries with `ldp:contains`, exactly like a Solid server would serve them.
#[derive(Debug, Default)]
pub struct MemoryPod {
    resources: Mutex<BTreeMap<String, String>>,
    failing: HashSet<String>,
    patches: Mutex<Vec<(String, String)>>,
}

impl MemoryPod {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `body` at `uri`, replacing what was there.
    pub fn with_resource(mut self, uri: &str, body: &str) -> Self {
        self.resources
            .get_mut()
            .insert(uri.to_string(), body.to_string());
        self
    }

    /// Append `ldp:contains` triples for `entries` to the container at `uri`.
    pub fn with_container(mut self, uri: &str, entries: &[&str]) -> Self {
        let body = self.resources.get_mut().entry(uri.to_string()).or_default();
        for entry in entries {
            body.push_str(&format!("\n<{uri}> <{}> <{entry}> .", ldp::CONTAINS));
        }
        self
    }

    /// Make every request for `uri` fail.
    pub fn with_failure(mut self, uri: &str) -> Self {
        self.failing.insert(uri.to_string());
        self
    }

    /// Patches received so far as `(uri, body)` pairs.
    pub async fn patches(&self) -> Vec<(String, String)> {
        self.patches.lock().await.clone()
    }

    fn guard(&self, uri: &str) -> Result<(), PodError> {
        if self.failing.contains(uri) {
            return Err(PodError::Rejected(format!("{uri} is unavailable")));
        }
        Ok(())
    }
}

#[async_trait]
impl SolidPod for MemoryPod {
    async fn fetch_resource(&self, uri: &str) -> Result<String, PodError> {
        self.guard(uri)?;
        debug!(uri, "memory GET");
        self.resources
            .lock()
            .await
            .get(uri)
            .cloned()
            .ok_or_else(|| PodError::NotFound(uri.to_string()))
    }

    async fn list_container_entries(&self, uri: &str) -> Result<Vec<String>, PodError> {
        let body = self.fetch_resource(uri).await?;
        let parsed = parse_turtle(&body, Some(uri)).map_err(|source| PodError::Rdf {
            uri: uri.to_string(),
            source,
        })?;
        Ok(parsed.iri_objects(Some(uri), ldp::CONTAINS))
    }

    async fn resource_exists(&self, uri: &str) -> Result<bool, PodError> {
        self.guard(uri)?;
        Ok(self.resources.lock().await.contains_key(uri))
    }

    async fn patch_resource(&self, uri: &str, body: &str) -> Result<(), PodError> {
        self.guard(uri)?;
        self.patches
            .lock()
            .await
            .push((uri.to_string(), body.to_string()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn containers_list_in_document_order() {
        let pod = MemoryPod::new().with_container(
            "https://pod.example/reg/",
            &["https://pod.example/reg/b/", "https://pod.example/reg/a/"],
        );
        assert_eq!(
            pod.list_container_entries("https://pod.example/reg/")
                .await
                .unwrap(),
            vec!["https://pod.example/reg/b/", "https://pod.example/reg/a/"]
        );
    }

    #[tokio::test]
    async fn failing_uri_rejects_every_operation() {
        let pod = MemoryPod::new()
            .with_resource("https://pod.example/x", "")
            .with_failure("https://pod.example/x");
        assert!(pod.fetch_resource("https://pod.example/x").await.is_err());
        assert!(pod
            .patch_resource("https://pod.example/x", "")
            .await
            .is_err());
    }
}
