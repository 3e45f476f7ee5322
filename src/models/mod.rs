//! Response model seen by the gateway.
//!
//! The gateway never looks inside a response body. It only needs to know
//! what *kind* of resource came back (a concrete entity, an aggregate batch
//! result, or a collection of links) and, for the entity-returning fetch,
//! the response metadata.
//!
//! Author: kelexine (<https://github.com/kelexine>)

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// What a fetched resource represents, as far as fetch auditing cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    /// A concrete resource that should be served from cache once fetched.
    #[default]
    Entity,
    /// A response that aggregates many resources in one retrieval.
    BatchResult,
    /// A container of hyperlinks rather than a concrete resource.
    Links,
}

impl ResourceKind {
    /// Batch results and link collections are never audited.
    pub fn is_audit_exempt(self) -> bool {
        matches!(self, ResourceKind::BatchResult | ResourceKind::Links)
    }
}

/// A response type the gateway can fetch, cache and hand back.
///
/// Types that aggregate other resources override [`Resource::kind`].
pub trait Resource: Serialize + DeserializeOwned + Send + Sync + 'static {
    fn kind(&self) -> ResourceKind {
        ResourceKind::Entity
    }
}

impl Resource for serde_json::Value {}

/// A domain object that knows its own canonical URI.
pub trait Locatable {
    fn uri(&self) -> &str;
}

impl<L: Locatable + ?Sized> Locatable for &L {
    fn uri(&self) -> &str {
        (**self).uri()
    }
}

/// A response body together with its status line and headers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseEntity<T> {
    pub status: u16,
    /// Header names are stored lower-cased.
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
    pub body: T,
}

impl<T> ResponseEntity<T> {
    pub fn new(status: u16, body: T) -> Self {
        Self {
            status,
            headers: BTreeMap::new(),
            body,
        }
    }

    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.insert(name.to_ascii_lowercase(), value.into());
        self
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }
}
