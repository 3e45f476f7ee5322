// Cache module - keys, entries and stores
// Author: kelexine (https://github.com/kelexine)

pub mod key;
pub mod models;
pub mod store;

pub use key::{build_key, CacheKey};
pub use models::{CacheConfig, CacheEntry, CacheStats};
pub use store::{CacheStore, MemoryStore, NoopStore};
