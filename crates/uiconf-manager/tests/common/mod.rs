//! Shared fixtures for manager integration tests.

#![allow(dead_code)]

use std::cell::Cell;
use std::rc::Rc;

use uiconf_core::{
    ComponentSchema, ConfigMap, Descriptor, DescriptorGraph, EvaluateError, ExpressionEvaluator,
    Value,
};
use uiconf_source::MemorySource;

pub const SURFACE: &str = "cms_page_listing";

/// `listing` root with a `columns` group of two unnamed columns.
pub fn anonymous_columns_graph() -> DescriptorGraph {
    DescriptorGraph::with_root(
        "listing",
        Descriptor::new()
            .named("listing")
            .with_child("columns", Descriptor::new())
            .with_child("columns", Descriptor::new()),
    )
}

/// `listing` root with a `grid` columns child configured `{paging: true}`.
pub fn grid_graph() -> DescriptorGraph {
    DescriptorGraph::with_root(
        "listing",
        Descriptor::new().named("listing").with_child(
            "columns",
            Descriptor::new()
                .named("grid")
                .with_argument("data", config(vec![("paging", true.into())])),
        ),
    )
}

/// `{config: {..entries}}`, the usual `data` argument.
pub fn config(entries: Vec<(&str, Value)>) -> Value {
    Value::map([("config", Value::Map(map(entries)))])
}

pub fn map(entries: Vec<(&str, Value)>) -> ConfigMap {
    entries.into_iter().map(|(k, v)| (k.to_string(), v)).collect()
}

pub fn source() -> MemorySource {
    MemorySource::new()
        .with_surface(SURFACE, anonymous_columns_graph())
        .with_surface("cms_block_listing", grid_graph())
        .with_schema(
            "columns",
            ComponentSchema::new()
                .with_attribute("class", "Columns")
                .with_argument("data", config(vec![("sortable", true.into())])),
        )
}

/// Passes arguments through and counts how often it ran.
#[derive(Clone, Default)]
pub struct CountingEvaluator {
    pub calls: Rc<Cell<usize>>,
}

impl ExpressionEvaluator for CountingEvaluator {
    fn evaluate(&self, raw: &Value) -> Result<Value, EvaluateError> {
        self.calls.set(self.calls.get() + 1);
        Ok(raw.clone())
    }
}
