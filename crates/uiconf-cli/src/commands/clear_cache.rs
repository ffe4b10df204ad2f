//! `uiconf clear-cache`.

use std::path::Path;

use tracing::info;
use uiconf_cache::{FileCacheStore, PoolCache};

use super::load_options;

pub fn run(
    surface: &str,
    cache_dir: &Path,
    config: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let options = load_options(config)?;
    let cache = PoolCache::new(FileCacheStore::new(cache_dir)).with_namespace(options.cache_namespace);

    if cache.invalidate(surface)? {
        info!(surface, "cleared cached pool");
    } else {
        info!(surface, "no cached pool to clear");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use uiconf_core::CacheStore;

    #[test]
    fn test_clear_cache() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileCacheStore::new(dir.path());
        store
            .save(b"{}", "ui_component_configuration_data_cms_page_listing")
            .unwrap();

        run("cms_page_listing", dir.path(), None).unwrap();
        assert_eq!(
            store
                .load("ui_component_configuration_data_cms_page_listing")
                .unwrap(),
            None
        );

        // Clearing twice is not an error
        run("cms_page_listing", dir.path(), None).unwrap();
    }
}
