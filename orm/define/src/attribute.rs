//! Attribute definitions and their persistence mapping.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::binding::AttributeBinding;
use crate::constraint::Constraint;
use crate::extension::{Annotation, AttributeAnnotationLocation, AttributeSnippetLocation, Snippet};
use crate::types::AccessModifier;

/// A single attribute of a class.
///
/// `data_type` is the Java type text exactly as it should appear in the field
/// declaration (`int`, `String`, `byte[]`, `java.util.Map<String, Long>`).
///
/// ## Examples
///
/// ```
/// use orm_define::{Attribute, AttributeMapping};
///
/// let id = Attribute::new("id", "Long").with_mapping(AttributeMapping::id());
/// assert_eq!(id.name, "id");
/// assert!(matches!(id.mapping, AttributeMapping::Id { .. }));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    pub name: String,
    pub data_type: String,
    #[serde(default)]
    pub access: AccessModifier,
    /// Initializer expression for the field declaration.
    #[serde(default)]
    pub default_value: Option<String>,
    /// Rendered as the field's javadoc.
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub mapping: AttributeMapping,
    #[serde(default)]
    pub column: Option<Column>,
    #[serde(default)]
    pub convert: Option<Convert>,
    #[serde(default)]
    pub lob: bool,
    #[serde(default)]
    pub temporal: Option<TemporalType>,
    #[serde(default)]
    pub enumerated: Option<EnumType>,
    /// Constraints on the attribute value itself.
    #[serde(default)]
    pub constraints: Vec<Constraint>,
    /// Constraints on map keys (type-use position).
    #[serde(default)]
    pub key_constraints: Vec<Constraint>,
    /// Constraints on collection elements or map values (type-use position).
    #[serde(default)]
    pub value_constraints: Vec<Constraint>,
    #[serde(default)]
    pub binding: AttributeBinding,
    #[serde(default)]
    pub property_change_support: bool,
    #[serde(default)]
    pub vetoable_change_support: bool,
    #[serde(default)]
    pub annotations: Vec<Annotation<AttributeAnnotationLocation>>,
    #[serde(default)]
    pub runtime_annotations: Vec<Annotation<AttributeAnnotationLocation>>,
    #[serde(default)]
    pub snippets: Vec<Snippet<AttributeSnippetLocation>>,
    #[serde(default)]
    pub runtime_snippets: Vec<Snippet<AttributeSnippetLocation>>,
}

impl Attribute {
    /// Creates a private basic attribute with no extras.
    pub fn new(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: data_type.into(),
            access: AccessModifier::Private,
            default_value: None,
            description: None,
            mapping: AttributeMapping::default(),
            column: None,
            convert: None,
            lob: false,
            temporal: None,
            enumerated: None,
            constraints: Vec::new(),
            key_constraints: Vec::new(),
            value_constraints: Vec::new(),
            binding: AttributeBinding::default(),
            property_change_support: false,
            vetoable_change_support: false,
            annotations: Vec::new(),
            runtime_annotations: Vec::new(),
            snippets: Vec::new(),
            runtime_snippets: Vec::new(),
        }
    }

    /// Replaces the persistence mapping.
    pub fn with_mapping(mut self, mapping: AttributeMapping) -> Self {
        self.mapping = mapping;
        self
    }

    /// Adds a value constraint.
    pub fn with_constraint(mut self, constraint: Constraint) -> Self {
        self.constraints.push(constraint);
        self
    }
}

/// How an attribute is mapped to the database.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AttributeMapping {
    /// Primary key, optionally generated.
    Id {
        #[serde(default)]
        generated: Option<GenerationStrategy>,
    },
    #[default]
    Basic,
    Version,
    Transient,
    Embedded,
    EmbeddedId,
    ElementCollection {
        #[serde(default)]
        fetch: Option<FetchType>,
    },
    OneToOne(Relation),
    ManyToOne(Relation),
    OneToMany(Relation),
    ManyToMany(Relation),
}

impl AttributeMapping {
    /// A non-generated primary key.
    pub fn id() -> Self {
        AttributeMapping::Id { generated: None }
    }
}

/// Options shared by the relationship mappings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Relation {
    /// Owning-side attribute name for bidirectional relationships.
    pub mapped_by: Option<String>,
    pub optional: Option<bool>,
    pub fetch: Option<FetchType>,
}

/// Identifier generation strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum GenerationStrategy {
    Auto,
    Identity,
    Sequence,
    Table,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum FetchType {
    Lazy,
    Eager,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum TemporalType {
    Date,
    Time,
    Timestamp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum EnumType {
    Ordinal,
    String,
}

/// Column settings for a basic attribute.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Column {
    pub name: Option<String>,
    pub nullable: Option<bool>,
    pub unique: Option<bool>,
    pub length: Option<u32>,
}

/// Attribute converter settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Convert {
    /// Fully-qualified converter class.
    pub converter: Option<String>,
    pub disable_conversion: bool,
    /// Target attribute for embedded or map conversions.
    pub attribute_name: Option<String>,
}
