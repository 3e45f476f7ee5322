// cachegate - Read-through caching gateway for REST API clients
// Author: kelexine (https://github.com/kelexine)

pub mod audit;
pub mod cache;
pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod gateway;
pub mod metrics;
pub mod models;
pub mod utils;

pub use audit::{is_search, AccessPolicy, AuditGuard};
pub use cache::{build_key, CacheKey, CacheStore, MemoryStore, NoopStore};
pub use client::{HttpRestClient, RestOperations};
pub use error::{GatewayError, Result};
pub use gateway::CachingRestClient;
pub use models::{Locatable, Resource, ResourceKind, ResponseEntity};
