//! Per-request session state.

use indexmap::IndexMap;
use uiconf_core::ComponentPool;
use uiconf_source::ReaderRegistry;

/// Everything one request accumulates while preparing surfaces.
///
/// Create one per request or session and drop it when the request ends. It
/// holds the resolved pool of every prepared surface and the readers created
/// so far. A context must not be shared between concurrent requests.
#[derive(Debug, Default)]
pub struct SessionContext {
    prepared: IndexMap<String, ComponentPool>,
    pub(crate) readers: ReaderRegistry,
}

impl SessionContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// The resolved pool of `surface`, or `None` if it was not prepared.
    pub fn get_data(&self, surface: &str) -> Option<&ComponentPool> {
        self.prepared.get(surface)
    }

    /// Check whether `surface` has been prepared.
    pub fn has_data(&self, surface: &str) -> bool {
        self.prepared.contains_key(surface)
    }

    /// Prepared surfaces in preparation order.
    pub fn surfaces(&self) -> impl Iterator<Item = &str> {
        self.prepared.keys().map(String::as_str)
    }

    /// Readers created in this context.
    pub fn readers(&self) -> &ReaderRegistry {
        &self.readers
    }

    pub fn len(&self) -> usize {
        self.prepared.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prepared.is_empty()
    }

    pub(crate) fn insert(&mut self, surface: &str, pool: ComponentPool) {
        self.prepared.insert(surface.to_string(), pool);
    }
}
