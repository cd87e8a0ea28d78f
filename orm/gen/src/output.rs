//! Writing generated classes.
//!
//! The pipeline hands each assembled [`ClassDefinition`] to an
//! [`ArtifactWriter`]. Two writers ship with the crate:
//!
//! - [`FsWriter`] renders to `<root>/<package path>/<Name>.java`, or prints
//!   the source in dry-run mode
//! - [`MemoryWriter`] keeps rendered sources in memory, keyed by
//!   fully-qualified class name
//!
//! File writes are atomic: content goes to a temp file first and is then
//! renamed over the target.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::definition::ClassDefinition;
use crate::errors::GeneratorError;
use crate::render::{package_path, render_class};

/// Handle for one written class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenUnit {
    /// Fully-qualified class name.
    pub class: String,
    /// Target file, when the writer touched the filesystem.
    pub path: Option<PathBuf>,
    /// Size of the rendered source in bytes.
    pub bytes: usize,
}

/// Destination for assembled classes.
pub trait ArtifactWriter {
    /// Renders and stores one class.
    ///
    /// ## Errors
    ///
    /// Returns [`GeneratorError::WriteError`] when the output cannot be stored.
    fn write(&mut self, definition: &ClassDefinition) -> Result<WrittenUnit, GeneratorError>;
}

/// Source file path for a class below `root`.
pub fn source_path(root: &Path, definition: &ClassDefinition) -> PathBuf {
    let mut path = root.to_path_buf();
    if !definition.package.is_empty() {
        path.push(package_path(&definition.package));
    }
    path.push(format!("{}.java", definition.name));
    path
}

/// Writes `.java` files below an output root.
#[derive(Debug, Clone)]
pub struct FsWriter {
    root: PathBuf,
    dry_run: bool,
}

impl FsWriter {
    /// Creates a writer rooted at `root`.
    ///
    /// ## Errors
    ///
    /// Returns [`GeneratorError::OutputDirNotFound`] when `root` is not an
    /// existing directory, unless `dry_run` is set.
    pub fn new(root: impl Into<PathBuf>, dry_run: bool) -> Result<Self, GeneratorError> {
        let root = root.into();
        if !dry_run && !root.is_dir() {
            return Err(GeneratorError::OutputDirNotFound(root.display().to_string()));
        }
        Ok(Self { root, dry_run })
    }
}

impl ArtifactWriter for FsWriter {
    fn write(&mut self, definition: &ClassDefinition) -> Result<WrittenUnit, GeneratorError> {
        let source = render_class(definition);
        let path = source_path(&self.root, definition);

        if self.dry_run {
            println!("=== {} ===\n{}", path.display(), source);
            return Ok(WrittenUnit {
                class: definition.qualified_name(),
                path: None,
                bytes: source.len(),
            });
        }

        write_atomic(&path, &source)?;
        debug!(path = %path.display(), bytes = source.len(), "Wrote source file");
        Ok(WrittenUnit {
            class: definition.qualified_name(),
            path: Some(path),
            bytes: source.len(),
        })
    }
}

/// Keeps rendered sources in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryWriter {
    sources: BTreeMap<String, String>,
}

impl MemoryWriter {
    /// Rendered source of a class, by fully-qualified name.
    pub fn source(&self, qualified_name: &str) -> Option<&str> {
        self.sources.get(qualified_name).map(String::as_str)
    }

    /// All sources, sorted by class name.
    pub fn sources(&self) -> impl Iterator<Item = (&str, &str)> {
        self.sources.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

impl ArtifactWriter for MemoryWriter {
    fn write(&mut self, definition: &ClassDefinition) -> Result<WrittenUnit, GeneratorError> {
        let source = render_class(definition);
        let class = definition.qualified_name();
        let bytes = source.len();
        self.sources.insert(class.clone(), source);
        Ok(WrittenUnit {
            class,
            path: None,
            bytes,
        })
    }
}

/// Writes content to a file atomically using temp file + rename.
///
/// Parent directories are created as needed.
///
/// ## Errors
///
/// Returns [`GeneratorError::WriteError`] if:
/// - Parent directories cannot be created
/// - The temp file cannot be written
/// - The rename operation fails
pub fn write_atomic(path: &Path, content: &str) -> Result<(), GeneratorError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| GeneratorError::WriteError {
            path: parent.display().to_string(),
            source: e,
        })?;
    }

    let temp_path = path.with_extension("tmp");
    fs::write(&temp_path, content).map_err(|e| GeneratorError::WriteError {
        path: temp_path.display().to_string(),
        source: e,
    })?;

    fs::rename(&temp_path, path).map_err(|e| GeneratorError::WriteError {
        path: path.display().to_string(),
        source: e,
    })?;

    Ok(())
}
