//! ORM Metamodel Definition Library
//!
//! This crate provides the declarative description of persistence-mapped
//! classes consumed by the `orm-gen` code generator. The generator treats a
//! [`Metamodel`] as a read-only snapshot: it never edits or persists it.
//!
//! ## Core Types
//!
//! - [`Metamodel`] - Root element: package, global interfaces and snippets, classes
//! - [`ClassDescriptor`] - One generatable class (entity, embeddable, superclass,
//!   identifier class or bean)
//! - [`Attribute`] - A field with its persistence mapping, constraints and bindings
//! - [`ClassMembers`] - Attributes selected for `equals`/`hashCode`/`toString`
//! - [`ConstructorDescriptor`] - A constructor and the attributes it assigns
//! - [`Constraint`] / [`ConstraintRule`] - Bean-validation rules
//! - [`Annotation`] / [`Snippet`] - Raw text injected at named extension points
//!
//! ## Examples
//!
//! ```
//! use orm_define::{Attribute, AttributeMapping, ClassDescriptor, ClassKind, ClassMembers, Metamodel};
//!
//! let mut person = ClassDescriptor::new("Person", ClassKind::Entity);
//! person.attributes.push(Attribute::new("id", "Long").with_mapping(AttributeMapping::id()));
//! person.attributes.push(Attribute::new("name", "String"));
//! person.equals_method = ClassMembers::of(["id"]);
//!
//! let mut model = Metamodel::new("com.example.model");
//! model.classes.push(person);
//!
//! assert_eq!(model.classes_of(ClassKind::Entity).count(), 1);
//! ```
//!
//! Metamodels are usually loaded from JSON:
//!
//! ```
//! use orm_define::Metamodel;
//!
//! let json = r#"{
//!     "package": "com.example",
//!     "classes": [
//!         { "name": "Tag", "kind": "bean", "attributes": [ { "name": "label", "data_type": "String" } ] }
//!     ]
//! }"#;
//! let model: Metamodel = serde_json::from_str(json).unwrap();
//! assert_eq!(model.classes[0].attributes[0].name, "label");
//! ```

pub mod attribute;
pub mod binding;
pub mod constraint;
pub mod extension;
pub mod lookup;
pub mod prelude;
pub mod types;

// Re-export main types at crate root
pub use attribute::{
    Attribute, AttributeMapping, Column, Convert, EnumType, FetchType, GenerationStrategy, Relation,
    TemporalType,
};
pub use binding::{AttributeBinding, ClassBinding, FormatSpec};
pub use constraint::{Constraint, ConstraintRule, PatternFlag};
pub use extension::{
    Annotation, AnnotationLocation, AttributeAnnotationLocation, AttributeSnippetLocation,
    ClassAnnotationLocation, ClassSnippetLocation, Snippet, SnippetLocation,
};
pub use lookup::{LookupError, ResolvedAttribute};
pub use types::{
    AccessModifier, ClassDescriptor, ClassKind, ClassMembers, ConstructorDescriptor, Metamodel,
    ReferenceClass,
};
