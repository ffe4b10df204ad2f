//! Collaborator traits.
//!
//! The pipeline talks to the outside world only through these narrow
//! contracts. Implementations decide where descriptors, cache payloads and
//! overrides live; errors they return are propagated unchanged.

use crate::descriptor::{ComponentSchema, DescriptorGraph};
use crate::errors::{CacheError, EvaluateError, OverrideError, SourceError};
use crate::value::Value;
use indexmap::IndexMap;
use std::rc::Rc;

/// Reads the descriptor graph of one surface.
pub trait SurfaceReader {
    /// Read and structurally merge all declarations of the surface.
    fn read(&self) -> Result<DescriptorGraph, SourceError>;
}

/// Creates the reader responsible for a surface.
pub trait ReaderFactory {
    fn create(&self, surface: &str) -> Result<Box<dyn SurfaceReader>, SourceError>;
}

/// Looks up the schema of a component type.
///
/// A type without a definition has an empty schema.
pub trait SchemaProvider {
    fn component_data(&self, component_type: &str) -> Result<ComponentSchema, SourceError>;
}

/// Turns a raw argument into its final value.
///
/// Evaluators may depend on live context (permissions, locale, ...), so their
/// results are never cached.
pub trait ExpressionEvaluator {
    fn evaluate(&self, raw: &Value) -> Result<Value, EvaluateError>;
}

/// Byte-level storage for serialized pools.
///
/// Stores may be shared between managers; `save` therefore takes `&self`.
pub trait CacheStore {
    /// Load the payload stored under `key`, or `None` when absent.
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError>;

    /// Store `data` under `key`, replacing any previous payload.
    fn save(&self, data: &[u8], key: &str) -> Result<(), CacheError>;

    /// Remove the payload stored under `key`. Returns whether one existed.
    fn remove(&self, key: &str) -> Result<bool, CacheError>;
}

/// User-scoped overrides: parent instance name -> child instance name -> fragment.
pub type OverrideSet = IndexMap<String, IndexMap<String, Value>>;

/// Returns the saved override set of an override domain.
pub trait OverrideStore {
    fn overrides_for(&self, domain: &str) -> Result<OverrideSet, OverrideError>;
}

impl<T: ReaderFactory + ?Sized> ReaderFactory for Rc<T> {
    fn create(&self, surface: &str) -> Result<Box<dyn SurfaceReader>, SourceError> {
        (**self).create(surface)
    }
}

impl<T: SchemaProvider + ?Sized> SchemaProvider for Rc<T> {
    fn component_data(&self, component_type: &str) -> Result<ComponentSchema, SourceError> {
        (**self).component_data(component_type)
    }
}

impl<T: ExpressionEvaluator + ?Sized> ExpressionEvaluator for Rc<T> {
    fn evaluate(&self, raw: &Value) -> Result<Value, EvaluateError> {
        (**self).evaluate(raw)
    }
}

impl<T: CacheStore + ?Sized> CacheStore for Rc<T> {
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        (**self).load(key)
    }

    fn save(&self, data: &[u8], key: &str) -> Result<(), CacheError> {
        (**self).save(data, key)
    }

    fn remove(&self, key: &str) -> Result<bool, CacheError> {
        (**self).remove(key)
    }
}

impl<T: OverrideStore + ?Sized> OverrideStore for Rc<T> {
    fn overrides_for(&self, domain: &str) -> Result<OverrideSet, OverrideError> {
        (**self).overrides_for(domain)
    }
}
