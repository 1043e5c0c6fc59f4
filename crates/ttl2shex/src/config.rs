//! Pod connection configuration.
//!
//! Loaded from a JSON file given with `--config`; every field is optional.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::model::iri::IriMinter;

pub const DEFAULT_CONNECT_TIMEOUT_MS: u64 = 5_000;
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 30_000;

#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PodConfig {
    /// Root of the user's storage, e.g. `https://pod.example/alice/`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_uri: Option<String>,

    /// Bearer token sent with every request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth_token: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub connect_timeout_ms: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_timeout_ms: Option<u64>,
}

impl PodConfig {
    pub fn new(storage_uri: impl Into<String>) -> Self {
        Self {
            storage_uri: Some(storage_uri.into()),
            ..Default::default()
        }
    }

    /// Read a JSON configuration file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    pub fn with_auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    pub fn with_timeouts(mut self, connect_timeout_ms: u64, request_timeout_ms: u64) -> Self {
        self.connect_timeout_ms = Some(connect_timeout_ms);
        self.request_timeout_ms = Some(request_timeout_ms);
        self
    }

    pub fn connect_timeout_ms(&self) -> u64 {
        self.connect_timeout_ms.unwrap_or(DEFAULT_CONNECT_TIMEOUT_MS)
    }

    pub fn request_timeout_ms(&self) -> u64 {
        self.request_timeout_ms.unwrap_or(DEFAULT_REQUEST_TIMEOUT_MS)
    }

    /// Registry to scan: `explicit` when given, else the profile registry
    /// of the configured storage.
    pub fn registry_uri(&self, explicit: Option<&str>) -> Result<String, ConfigError> {
        if let Some(uri) = explicit {
            return Ok(uri.to_string());
        }
        let storage = self
            .storage_uri
            .as_deref()
            .ok_or(ConfigError::Missing("storage_uri or --registry"))?;
        Ok(IriMinter::new(storage).profile_registry_iri())
    }
}

impl fmt::Debug for PodConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PodConfig")
            .field("storage_uri", &self.storage_uri)
            .field("has_auth_token", &self.auth_token.is_some())
            .field("connect_timeout_ms", &self.connect_timeout_ms())
            .field("request_timeout_ms", &self.request_timeout_ms())
            .finish()
    }
}
