//! Per-surface reader registry.

use std::collections::HashMap;

use tracing::debug;
use uiconf_core::{ReaderFactory, SourceError, SurfaceReader};

/// Surface name -> reader, created through a factory on first use.
///
/// A registry belongs to one request context; readers are reused for every
/// later lookup of the same surface during that context's lifetime.
#[derive(Default)]
pub struct ReaderRegistry {
    readers: HashMap<String, Box<dyn SurfaceReader>>,
}

impl ReaderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the reader of `surface`, creating it with `factory` if needed.
    pub fn get_or_create(
        &mut self,
        surface: &str,
        factory: &dyn ReaderFactory,
    ) -> Result<&dyn SurfaceReader, SourceError> {
        if !self.readers.contains_key(surface) {
            let reader = factory.create(surface)?;
            debug!(surface, "created descriptor reader");
            self.readers.insert(surface.to_string(), reader);
        }
        Ok(self.readers[surface].as_ref())
    }

    /// Check whether a reader exists for `surface`.
    pub fn contains(&self, surface: &str) -> bool {
        self.readers.contains_key(surface)
    }

    pub fn len(&self) -> usize {
        self.readers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readers.is_empty()
    }
}

impl std::fmt::Debug for ReaderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReaderRegistry")
            .field("surfaces", &self.readers.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemorySource;
    use std::cell::Cell;
    use uiconf_core::{Descriptor, DescriptorGraph};

    struct CountingFactory {
        inner: MemorySource,
        created: Cell<usize>,
    }

    impl ReaderFactory for CountingFactory {
        fn create(&self, surface: &str) -> Result<Box<dyn SurfaceReader>, SourceError> {
            self.created.set(self.created.get() + 1);
            self.inner.create(surface)
        }
    }

    fn factory() -> CountingFactory {
        CountingFactory {
            inner: MemorySource::new().with_surface(
                "cms_page_listing",
                DescriptorGraph::with_root("listing", Descriptor::new()),
            ),
            created: Cell::new(0),
        }
    }

    #[test]
    fn test_reader_created_once() {
        let factory = factory();
        let mut registry = ReaderRegistry::new();

        registry.get_or_create("cms_page_listing", &factory).unwrap();
        registry.get_or_create("cms_page_listing", &factory).unwrap();

        assert_eq!(factory.created.get(), 1);
        assert!(registry.contains("cms_page_listing"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_failed_creation_is_not_cached() {
        let factory = factory();
        let mut registry = ReaderRegistry::new();

        assert!(registry.get_or_create("missing", &factory).is_err());
        assert!(registry.get_or_create("missing", &factory).is_err());

        assert_eq!(factory.created.get(), 2);
        assert!(registry.is_empty());
    }
}
