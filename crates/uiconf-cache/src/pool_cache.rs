//! Surface-keyed pool cache.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uiconf_core::{CacheError, CacheStore, ComponentPool};

/// Default key namespace.
pub const DEFAULT_NAMESPACE: &str = "ui_component_configuration_data";

/// Version of the cached payload layout. Payloads of any other version are
/// rebuilt.
pub const FORMAT_VERSION: u32 = 1;

/// Cache key of a surface: `<namespace>_<surface>`.
pub fn cache_key(namespace: &str, surface: &str) -> String {
    format!("{namespace}_{surface}")
}

/// Where a resolved pool came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    /// Restored from the store.
    Hit,
    /// Built and saved to the store.
    Miss,
    /// A payload existed but could not be used; rebuilt and overwritten.
    Rebuilt,
    /// Caching is disabled; built without touching the store.
    Bypassed,
}

#[derive(Serialize)]
struct PayloadRef<'a> {
    version: u32,
    surface: &'a str,
    pool: &'a ComponentPool,
}

#[derive(Deserialize)]
struct Payload {
    version: u32,
    surface: String,
    pool: ComponentPool,
}

/// Memoizes built pools in a [`CacheStore`].
pub struct PoolCache {
    store: Box<dyn CacheStore>,
    namespace: String,
    enabled: bool,
}

impl PoolCache {
    /// Create an enabled cache over `store` with the default namespace.
    pub fn new(store: impl CacheStore + 'static) -> Self {
        Self::from_boxed(Box::new(store))
    }

    /// Create an enabled cache over an already boxed store.
    pub fn from_boxed(store: Box<dyn CacheStore>) -> Self {
        Self {
            store,
            namespace: DEFAULT_NAMESPACE.to_string(),
            enabled: true,
        }
    }

    /// Set the key namespace.
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// Enable or disable the cache.
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Cache key of `surface` in this cache's namespace.
    pub fn key(&self, surface: &str) -> String {
        cache_key(&self.namespace, surface)
    }

    /// The underlying store.
    pub fn store(&self) -> &dyn CacheStore {
        self.store.as_ref()
    }

    /// Return the pool of `surface`, from the store or from `build`.
    ///
    /// `build` runs only when nothing usable is stored. Its result is saved
    /// before being returned. Store failures propagate; an undecodable
    /// payload does not.
    pub fn resolve_pool<F, E>(
        &self,
        surface: &str,
        build: F,
    ) -> Result<(ComponentPool, CacheStatus), E>
    where
        F: FnOnce() -> Result<ComponentPool, E>,
        E: From<CacheError>,
    {
        if !self.enabled {
            return Ok((build()?, CacheStatus::Bypassed));
        }

        let key = self.key(surface);
        let status = match self.store.load(&key)? {
            Some(bytes) => match decode(&bytes, surface) {
                Ok(pool) => {
                    debug!(surface, key = %key, nodes = pool.len(), "component pool cache hit");
                    return Ok((pool, CacheStatus::Hit));
                }
                Err(reason) => {
                    warn!(surface, key = %key, reason = %reason, "discarding unusable cached pool");
                    CacheStatus::Rebuilt
                }
            },
            None => {
                debug!(surface, key = %key, "component pool cache miss");
                CacheStatus::Miss
            }
        };

        let pool = build()?;
        self.store.save(&encode(&pool, surface)?, &key)?;
        Ok((pool, status))
    }

    /// Drop the cached pool of `surface`. Returns whether one was stored.
    pub fn invalidate(&self, surface: &str) -> Result<bool, CacheError> {
        let key = self.key(surface);
        let removed = self.store.remove(&key)?;
        debug!(surface, key = %key, removed, "invalidated cached pool");
        Ok(removed)
    }
}

impl std::fmt::Debug for PoolCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PoolCache")
            .field("namespace", &self.namespace)
            .field("enabled", &self.enabled)
            .finish_non_exhaustive()
    }
}

fn encode(pool: &ComponentPool, surface: &str) -> Result<Vec<u8>, CacheError> {
    serde_json::to_vec(&PayloadRef {
        version: FORMAT_VERSION,
        surface,
        pool,
    })
    .map_err(|e| CacheError::Encode {
        surface: surface.to_string(),
        reason: e.to_string(),
    })
}

fn decode(bytes: &[u8], surface: &str) -> Result<ComponentPool, String> {
    let payload: Payload = serde_json::from_slice(bytes).map_err(|e| e.to_string())?;
    if payload.version != FORMAT_VERSION {
        return Err(format!(
            "payload version {} does not match {FORMAT_VERSION}",
            payload.version
        ));
    }
    if payload.surface != surface {
        return Err(format!("payload belongs to surface '{}'", payload.surface));
    }
    if !payload.pool.is_consistent() {
        return Err("payload pool is structurally inconsistent".to_string());
    }
    Ok(payload.pool)
}
