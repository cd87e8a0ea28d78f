//! User-supplied annotations and code snippets.
//!
//! Both are tagged with a location enum that tells the generator where the raw
//! text goes. The generator never interprets the text, except that snippets at
//! an import location are normalized into complete import statements.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Marker for annotation placement enums.
pub trait AnnotationLocation: Copy + Ord + std::fmt::Debug {}

/// Marker for snippet insertion-point enums.
pub trait SnippetLocation: Copy + Ord + std::fmt::Debug {
    /// Returns true for the insertion point that holds import statements.
    fn is_import(self) -> bool;
}

/// An annotation written by hand, e.g. `@Cacheable(true)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation<L> {
    /// Annotation text; the leading `@` is optional.
    pub name: String,
    pub location: L,
    #[serde(default = "enabled")]
    pub enabled: bool,
}

impl<L> Annotation<L> {
    /// Creates an enabled annotation at a location.
    pub fn new(name: impl Into<String>, location: L) -> Self {
        Self {
            name: name.into(),
            location,
            enabled: true,
        }
    }
}

/// A raw code snippet inserted at a named extension point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snippet<L> {
    pub value: String,
    pub location: L,
    #[serde(default = "enabled")]
    pub enabled: bool,
}

impl<L> Snippet<L> {
    /// Creates an enabled snippet at a location.
    pub fn new(value: impl Into<String>, location: L) -> Self {
        Self {
            value: value.into(),
            location,
            enabled: true,
        }
    }
}

/// Where a class annotation is placed.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ClassAnnotationLocation {
    #[default]
    Type,
}

impl AnnotationLocation for ClassAnnotationLocation {}

/// Where an attribute annotation is placed.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum AttributeAnnotationLocation {
    /// On the field declaration.
    #[default]
    Property,
    Getter,
    Setter,
}

impl AnnotationLocation for AttributeAnnotationLocation {}

/// Insertion points within a generated class, in source order.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ClassSnippetLocation {
    BeforePackage,
    Import,
    TypeJavadoc,
    BeforeClass,
    BeforeField,
    AfterField,
    BeforeMethod,
    AfterMethod,
    AfterClass,
}

impl SnippetLocation for ClassSnippetLocation {
    fn is_import(self) -> bool {
        self == ClassSnippetLocation::Import
    }
}

/// Insertion points around one attribute's field and accessors.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum AttributeSnippetLocation {
    Import,
    PropertyJavadoc,
    BeforeProperty,
    AfterProperty,
    GetterJavadoc,
    BeforeGetter,
    AfterGetter,
    /// First statements inside the getter body.
    PreGetter,
    /// Statements just before the getter returns.
    PostGetter,
    SetterJavadoc,
    BeforeSetter,
    AfterSetter,
    PreSetter,
    PostSetter,
}

impl SnippetLocation for AttributeSnippetLocation {
    fn is_import(self) -> bool {
        self == AttributeSnippetLocation::Import
    }
}

fn enabled() -> bool {
    true
}
