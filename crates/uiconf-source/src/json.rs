//! JSON directory descriptor source.
//!
//! A directory holds one `<surface>.json` file per surface and an optional
//! `definition.json` with the schema of every component type:
//!
//! ```json
//! {
//!   "listing": [{
//!     "attributes": { "name": "cms_page_listing" },
//!     "arguments": { "data": { "config": { "paging": true } } },
//!     "columns": [{ "attributes": { "name": "title" } }, {}]
//!   }]
//! }
//! ```
//!
//! A group is either an array (entries keyed by position) or an object
//! (entries keyed by their declared key). Every key of an entry other than
//! `attributes` and `arguments` names a nested child group.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde_json::{Map, Value as Json};
use tracing::debug;
use uiconf_core::{
    ComponentSchema, ConfigMap, Descriptor, DescriptorGraph, DescriptorGroup, ReaderFactory,
    SchemaProvider, SourceError, SurfaceReader, Value,
};

/// File holding component type schemas.
pub const DEFINITION_FILE: &str = "definition.json";

const ATTRIBUTES_KEY: &str = "attributes";
const ARGUMENTS_KEY: &str = "arguments";

/// Reads surfaces and schemas from a directory of JSON files.
#[derive(Debug, Clone)]
pub struct JsonDirectorySource {
    root: PathBuf,
    schemas: IndexMap<String, ComponentSchema>,
}

impl JsonDirectorySource {
    /// Open a directory, loading `definition.json` when present.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, SourceError> {
        let root = root.into();
        let definition = root.join(DEFINITION_FILE);
        let schemas = if definition.is_file() {
            parse_schemas(&read_json(&definition)?, &definition.display().to_string())?
        } else {
            IndexMap::new()
        };
        debug!(
            root = %root.display(),
            schemas = schemas.len(),
            "opened JSON descriptor directory"
        );
        Ok(Self { root, schemas })
    }

    /// Path of the file declaring `surface`.
    ///
    /// Names that could point outside the directory (path separators, `..`,
    /// NUL) are rejected.
    pub fn surface_path(&self, surface: &str) -> Result<PathBuf, SourceError> {
        if !is_plain_file_stem(surface) {
            return Err(SourceError::InvalidSurfaceName {
                surface: surface.to_string(),
            });
        }
        Ok(self.root.join(format!("{surface}.json")))
    }
}

fn is_plain_file_stem(name: &str) -> bool {
    !name.is_empty() && !name.contains(['/', '\\', '\0']) && !name.contains("..")
}

impl ReaderFactory for JsonDirectorySource {
    fn create(&self, surface: &str) -> Result<Box<dyn SurfaceReader>, SourceError> {
        let path = self.surface_path(surface)?;
        if !path.is_file() {
            return Err(SourceError::SurfaceNotFound {
                surface: surface.to_string(),
            });
        }
        Ok(Box::new(JsonFileReader { path }))
    }
}

impl SchemaProvider for JsonDirectorySource {
    fn component_data(&self, component_type: &str) -> Result<ComponentSchema, SourceError> {
        Ok(self.schemas.get(component_type).cloned().unwrap_or_default())
    }
}

/// Reads one surface file. The file is re-read on every call.
#[derive(Debug, Clone)]
pub struct JsonFileReader {
    path: PathBuf,
}

impl JsonFileReader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SurfaceReader for JsonFileReader {
    fn read(&self) -> Result<DescriptorGraph, SourceError> {
        let json = read_json(&self.path)?;
        parse_graph(&json, &self.path.display().to_string())
    }
}

fn read_json(path: &Path) -> Result<Json, SourceError> {
    let content = std::fs::read_to_string(path).map_err(|source| SourceError::Io {
        path: path.display().to_string(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|e| SourceError::Malformed {
        location: path.display().to_string(),
        reason: e.to_string(),
    })
}

/// Parse a surface document into a descriptor graph.
pub fn parse_graph(json: &Json, location: &str) -> Result<DescriptorGraph, SourceError> {
    let object = expect_object(json, location)?;
    let mut graph = DescriptorGraph::new();
    for (component_type, group) in object {
        let group_location = format!("{location}:{component_type}");
        graph.insert_group(component_type, parse_group(group, &group_location)?);
    }
    Ok(graph)
}

/// Parse a `definition.json` document: component type -> schema.
pub fn parse_schemas(
    json: &Json,
    location: &str,
) -> Result<IndexMap<String, ComponentSchema>, SourceError> {
    let object = expect_object(json, location)?;
    let mut schemas = IndexMap::new();
    for (component_type, definition) in object {
        let schema_location = format!("{location}:{component_type}");
        let definition = expect_object(definition, &schema_location)?;
        let schema = ComponentSchema {
            attributes: config_map(definition.get(ATTRIBUTES_KEY), &schema_location)?,
            arguments: config_map(definition.get(ARGUMENTS_KEY), &schema_location)?,
        };
        schemas.insert(component_type.clone(), schema);
    }
    Ok(schemas)
}

fn parse_group(json: &Json, location: &str) -> Result<DescriptorGroup, SourceError> {
    let mut group = DescriptorGroup::new();
    match json {
        Json::Array(entries) => {
            for (index, entry) in entries.iter().enumerate() {
                group.push(parse_descriptor(entry, &format!("{location}[{index}]"))?);
            }
        }
        Json::Object(entries) => {
            for (key, entry) in entries {
                group.insert(key.clone(), parse_descriptor(entry, &format!("{location}.{key}"))?);
            }
        }
        _ => {
            return Err(SourceError::Malformed {
                location: location.to_string(),
                reason: "a component group must be an array or an object".to_string(),
            })
        }
    }
    Ok(group)
}

fn parse_descriptor(json: &Json, location: &str) -> Result<Descriptor, SourceError> {
    let object = expect_object(json, location)?;
    let mut descriptor = Descriptor::new();
    for (key, value) in object {
        match key.as_str() {
            ATTRIBUTES_KEY => descriptor.attributes = config_map(Some(value), location)?,
            ARGUMENTS_KEY => descriptor.arguments = config_map(Some(value), location)?,
            component_type => {
                let group = parse_group(value, &format!("{location}/{component_type}"))?;
                descriptor.children.insert(component_type.to_string(), group);
            }
        }
    }
    Ok(descriptor)
}

fn config_map(json: Option<&Json>, location: &str) -> Result<ConfigMap, SourceError> {
    match json {
        None | Some(Json::Null) => Ok(ConfigMap::new()),
        Some(Json::Object(entries)) => Ok(entries
            .iter()
            .map(|(key, value)| (key.clone(), Value::from(value.clone())))
            .collect()),
        Some(_) => Err(SourceError::Malformed {
            location: location.to_string(),
            reason: "attributes and arguments must be objects".to_string(),
        }),
    }
}

fn expect_object<'a>(json: &'a Json, location: &str) -> Result<&'a Map<String, Json>, SourceError> {
    json.as_object().ok_or_else(|| SourceError::Malformed {
        location: location.to_string(),
        reason: format!("expected an object, found {}", kind(json)),
    })
}

fn kind(json: &Json) -> &'static str {
    match json {
        Json::Null => "null",
        Json::Bool(_) => "a boolean",
        Json::Number(_) => "a number",
        Json::String(_) => "a string",
        Json::Array(_) => "an array",
        Json::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn listing_json() -> Json {
        json!({
            "listing": [{
                "attributes": { "name": "cms_page_listing", "noNamespaceSchemaLocation": "ui.xsd" },
                "arguments": { "data": { "config": { "paging": true } } },
                "columns": [
                    { "attributes": { "name": "title" } },
                    {}
                ],
                "filters": { "main": { "arguments": { "data": { "config": { "sticky": false } } } } }
            }]
        })
    }

    #[test]
    fn test_parse_graph() {
        let graph = parse_graph(&listing_json(), "test").unwrap();
        let (component_type, root) = graph.root().unwrap();

        assert_eq!(component_type, "listing");
        assert_eq!(root.name(), Some(&Value::from("cms_page_listing")));

        let columns = &root.children["columns"];
        let keys: Vec<_> = columns.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["0", "1"]);
        assert_eq!(columns.get("0").unwrap().name(), Some(&Value::from("title")));

        let filters = &root.children["filters"];
        assert!(filters.get("main").is_some());
    }

    #[test]
    fn test_malformed_group() {
        let err = parse_graph(&json!({ "listing": "nope" }), "bad.json").unwrap_err();
        assert!(matches!(err, SourceError::Malformed { location, .. } if location == "bad.json:listing"));
    }

    #[test]
    fn test_malformed_arguments() {
        let err = parse_graph(&json!({ "listing": [{ "arguments": [1, 2] }] }), "bad.json").unwrap_err();
        assert!(matches!(err, SourceError::Malformed { .. }));
    }

    #[test]
    fn test_parse_schemas() {
        let schemas = parse_schemas(
            &json!({
                "column": { "arguments": { "data": { "config": { "sortable": true } } } },
                "toolbar": {}
            }),
            "definition.json",
        )
        .unwrap();

        assert_eq!(schemas.len(), 2);
        assert!(schemas["toolbar"].arguments.is_empty());
        assert_eq!(
            schemas["column"].arguments["data"].get_path(&["config", "sortable"]),
            Some(&Value::Bool(true))
        );
    }

    #[test]
    fn test_directory_source() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("cms_page_listing.json"),
            serde_json::to_string(&listing_json()).unwrap(),
        )
        .unwrap();
        std::fs::write(
            dir.path().join(DEFINITION_FILE),
            r#"{ "listing": { "attributes": { "class": "Listing" } } }"#,
        )
        .unwrap();

        let source = JsonDirectorySource::open(dir.path()).unwrap();
        let graph = source.create("cms_page_listing").unwrap().read().unwrap();
        assert!(graph.root().is_some());
        assert_eq!(
            source.component_data("listing").unwrap().attributes["class"],
            Value::from("Listing")
        );
        assert!(matches!(
            source.create("missing").err().unwrap(),
            SourceError::SurfaceNotFound { .. }
        ));
    }

    #[test]
    fn test_surface_names_stay_inside_directory() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("surfaces");
        std::fs::create_dir(&root).unwrap();
        std::fs::write(
            dir.path().join("outside.json"),
            serde_json::to_string(&listing_json()).unwrap(),
        )
        .unwrap();
        let source = JsonDirectorySource::open(&root).unwrap();

        for surface in ["../outside", "sub/listing", "sub\\listing", "..", "", "a\0b"] {
            assert!(
                matches!(
                    source.create(surface).err().unwrap(),
                    SourceError::InvalidSurfaceName { surface: ref s } if s == surface
                ),
                "accepted {surface:?}"
            );
        }
        assert_eq!(
            source.surface_path("cms_page_listing").unwrap(),
            root.join("cms_page_listing.json")
        );
    }
}
