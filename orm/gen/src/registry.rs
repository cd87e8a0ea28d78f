//! Artifacts produced by one generation run, grouped by class kind.

use std::collections::BTreeMap;
use std::sync::Arc;

use orm_define::ClassKind;

use crate::definition::ClassDefinition;

/// Registry of class definitions for a single run.
///
/// Each run starts from an empty registry; artifacts keep registration order
/// within their kind.
#[derive(Debug, Default)]
pub struct GenerationRegistry {
    artifacts: BTreeMap<ClassKind, Vec<Arc<ClassDefinition>>>,
}

impl GenerationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a definition under its kind and returns the shared handle.
    pub fn register(&mut self, definition: ClassDefinition) -> Arc<ClassDefinition> {
        let definition = Arc::new(definition);
        self.artifacts
            .entry(definition.kind)
            .or_default()
            .push(Arc::clone(&definition));
        definition
    }

    /// All artifacts of `kind`, in registration order.
    pub fn artifacts_of(&self, kind: ClassKind) -> &[Arc<ClassDefinition>] {
        self.artifacts.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Looks up an artifact by fully-qualified class name.
    pub fn find(&self, qualified_name: &str) -> Option<&Arc<ClassDefinition>> {
        self.iter().find(|d| d.qualified_name() == qualified_name)
    }

    /// Every artifact, grouped by kind in stage order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<ClassDefinition>> {
        self.artifacts.values().flatten()
    }

    pub fn len(&self) -> usize {
        self.artifacts.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&mut self) {
        self.artifacts.clear();
    }
}
