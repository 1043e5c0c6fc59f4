//! [`SolidPod`] over HTTP.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Response, StatusCode};
use tracing::debug;

use super::SolidPod;
use crate::config::PodConfig;
use crate::error::{ConfigError, PodError};
use crate::model::ontology::ldp;
use crate::source::parse_turtle;

const TURTLE: &str = "text/turtle";
const N3: &str = "text/n3";

/// Talks to a Solid server with an optional bearer token.
pub struct HttpPod {
    client: Client,
    auth_token: Option<String>,
}

impl HttpPod {
    /// Build a pod client with the timeouts of `config`.
    pub fn from_config(config: &PodConfig) -> Result<Self, ConfigError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_millis(config.connect_timeout_ms()))
            .timeout(Duration::from_millis(config.request_timeout_ms()))
            .build()
            .map_err(|e| ConfigError::Client(e.to_string()))?;

        Ok(Self {
            client,
            auth_token: config.auth_token.clone(),
        })
    }

    pub fn new() -> Self {
        Self {
            client: Client::new(),
            auth_token: None,
        }
    }

    pub fn with_auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.auth_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    fn check(uri: &str, response: Response) -> Result<Response, PodError> {
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(PodError::NotFound(uri.to_string()));
        }
        if !status.is_success() {
            return Err(PodError::Status {
                uri: uri.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(response)
    }
}

impl Default for HttpPod {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for HttpPod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpPod")
            .field("has_auth_token", &self.auth_token.is_some())
            .finish()
    }
}

#[async_trait]
impl SolidPod for HttpPod {
    async fn fetch_resource(&self, uri: &str) -> Result<String, PodError> {
        debug!(uri, "GET");
        let request = self.authorize(self.client.get(uri).header(ACCEPT, TURTLE));
        let response = Self::check(uri, request.send().await?)?;
        Ok(response.text().await?)
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
        debug!(uri, "HEAD");
        let response = self.authorize(self.client.head(uri)).send().await?;
        match Self::check(uri, response) {
            Ok(_) => Ok(true),
            Err(PodError::NotFound(_)) => Ok(false),
            Err(e) => Err(e),
        }
    }

    async fn patch_resource(&self, uri: &str, body: &str) -> Result<(), PodError> {
        debug!(uri, bytes = body.len(), "PATCH");
        let request = self.authorize(
            self.client
                .patch(uri)
                .header(CONTENT_TYPE, N3)
                .body(body.to_string()),
        );
        Self::check(uri, request.send().await?)?;
        Ok(())
    }
}
