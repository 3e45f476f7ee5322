// Cache key derivation for outbound requests
// Author: kelexine (https://github.com/kelexine)

use reqwest::Method;
use std::fmt;

/// Key under which a response is cached.
///
/// Built from the request method and the literal request URI. The URI is
/// never parsed, so query terms keep their original order and spelling.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    uri: String,
    canonical: String,
}

impl CacheKey {
    /// The literal URI this key was built from.
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Canonical string form, as indexed by the cache store.
    pub fn as_str(&self) -> &str {
        &self.canonical
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical)
    }
}

/// Build the cache key for a request.
pub fn build_key(method: &Method, uri: &str) -> CacheKey {
    CacheKey {
        uri: uri.to_string(),
        canonical: format!("{} {}", method.as_str(), uri),
    }
}
