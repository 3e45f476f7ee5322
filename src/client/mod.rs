// REST client module
// Author: kelexine (https://github.com/kelexine)

mod http;

pub use http::HttpRestClient;

use crate::error::Result;
use crate::models::{Resource, ResponseEntity};
use async_trait::async_trait;

/// The two GET operations the gateway reads through.
///
/// Implemented by the real HTTP client and by the caching gateway that
/// wraps it, so callers cannot tell the two apart.
#[async_trait]
pub trait RestOperations: Send + Sync {
    /// Fetch a resource body.
    async fn get_for_object<T: Resource>(&self, uri: &str) -> Result<T>;

    /// Fetch a resource body together with its status and headers.
    async fn get_for_entity<T: Resource>(&self, uri: &str) -> Result<ResponseEntity<T>>;
}
