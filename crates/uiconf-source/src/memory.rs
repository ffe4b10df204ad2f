//! In-memory descriptor source.

use indexmap::IndexMap;
use uiconf_core::{
    ComponentSchema, DescriptorGraph, ReaderFactory, SchemaProvider, SourceError, SurfaceReader,
};

/// Holds descriptor graphs per surface and schemas per component type.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    surfaces: IndexMap<String, DescriptorGraph>,
    schemas: IndexMap<String, ComponentSchema>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the descriptor graph of a surface.
    pub fn with_surface(mut self, surface: &str, graph: DescriptorGraph) -> Self {
        self.insert_surface(surface, graph);
        self
    }

    /// Register the schema of a component type.
    pub fn with_schema(mut self, component_type: &str, schema: ComponentSchema) -> Self {
        self.insert_schema(component_type, schema);
        self
    }

    pub fn insert_surface(&mut self, surface: &str, graph: DescriptorGraph) {
        self.surfaces.insert(surface.to_string(), graph);
    }

    pub fn insert_schema(&mut self, component_type: &str, schema: ComponentSchema) {
        self.schemas.insert(component_type.to_string(), schema);
    }

    /// Names of all registered surfaces.
    pub fn surfaces(&self) -> impl Iterator<Item = &str> {
        self.surfaces.keys().map(String::as_str)
    }
}

struct MemoryReader {
    graph: DescriptorGraph,
}

impl SurfaceReader for MemoryReader {
    fn read(&self) -> Result<DescriptorGraph, SourceError> {
        Ok(self.graph.clone())
    }
}

impl ReaderFactory for MemorySource {
    fn create(&self, surface: &str) -> Result<Box<dyn SurfaceReader>, SourceError> {
        let graph = self
            .surfaces
            .get(surface)
            .cloned()
            .ok_or_else(|| SourceError::SurfaceNotFound {
                surface: surface.to_string(),
            })?;
        Ok(Box::new(MemoryReader { graph }))
    }
}

impl SchemaProvider for MemorySource {
    fn component_data(&self, component_type: &str) -> Result<ComponentSchema, SourceError> {
        Ok(self.schemas.get(component_type).cloned().unwrap_or_default())
    }
}
