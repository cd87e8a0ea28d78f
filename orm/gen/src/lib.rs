//! Java persistence-class generator.
//!
//! This crate turns a declarative metamodel (see `orm-define`) into Java
//! source for JPA entities, embeddables, mapped superclasses, identifier
//! classes and plain beans. Each generated class carries:
//!
//! - Fields with persistence, bean-validation and JSON-binding annotations
//! - Constructors that forward inherited parameters to `super(...)`
//! - `equals`, `hashCode` and `toString` bodies dispatched on field type
//! - User annotations and snippets at named insertion points
//!
//! ## Modules
//!
//! - [`codegen`] - Fragment synthesizers for methods, annotations and constructors
//! - [`assembler`] - Builds one [`definition::ClassDefinition`] from a class descriptor
//! - [`pipeline`] - Staged, dependency-ordered generation runs
//! - [`registry`] - Artifacts produced by a run, grouped by class kind
//! - [`render`] - Java source rendering
//! - [`output`] - File and in-memory writers
//! - [`persistence_unit`] - `persistence.xml` rendering
//! - [`errors`] - Error types for the generator
//!
//! ## Example Usage
//!
//! ```no_run
//! use std::path::Path;
//! use orm_gen::input::load_metamodel;
//! use orm_gen::options::GenerationOptions;
//! use orm_gen::output::FsWriter;
//! use orm_gen::pipeline::run;
//!
//! let model = load_metamodel(Path::new("model.json")).unwrap();
//! let mut writer = FsWriter::new("src/main/java", false).unwrap();
//! let report = run(&model, &GenerationOptions::default(), &mut writer).unwrap();
//! println!("{} classes generated", report.registry.len());
//! ```

pub mod assembler;
pub mod codegen;
pub mod definition;
pub mod dispatch;
pub mod errors;
pub mod fragment;
pub mod input;
pub mod options;
pub mod ordering;
pub mod output;
pub mod persistence_unit;
pub mod pipeline;
pub mod primes;
pub mod registry;
pub mod render;

#[cfg(test)]
mod test_utils;
