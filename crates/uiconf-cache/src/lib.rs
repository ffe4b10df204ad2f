//! Pool caching for uiconf.
//!
//! Only the raw pool (before overrides and argument resolution) is ever
//! cached. A payload that cannot be decoded is treated as a miss and
//! replaced by a fresh build.

mod pool_cache;
mod store;

pub use pool_cache::{cache_key, CacheStatus, PoolCache, DEFAULT_NAMESPACE, FORMAT_VERSION};
pub use store::{FileCacheStore, MemoryCacheStore};
