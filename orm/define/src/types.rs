//! Core types for class metamodels.
//!
//! This module provides the fundamental types describing generatable classes:
//!
//! - [`Metamodel`] - The root element holding every class and global settings
//! - [`ClassDescriptor`] - One generatable class
//! - [`ClassKind`] - Entity, embeddable, superclass, identifier class or bean
//! - [`ClassMembers`] - Attributes selected for `equals`/`hashCode`/`toString`
//! - [`ConstructorDescriptor`] - A constructor and the attributes it assigns

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::attribute::Attribute;
use crate::binding::ClassBinding;
use crate::extension::{Annotation, ClassAnnotationLocation, ClassSnippetLocation, Snippet};

/// The kind of class being generated.
///
/// The kind decides which persistence annotations the class carries and in
/// which pipeline stage it is emitted.
///
/// ## Examples
///
/// ```
/// use std::str::FromStr;
/// use orm_define::ClassKind;
///
/// let kind = ClassKind::from_str("mapped_superclass").unwrap();
/// assert_eq!(kind, ClassKind::MappedSuperclass);
/// assert_eq!(ClassKind::EmbeddedId.to_string(), "embedded_id");
/// ```
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
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ClassKind {
    /// A mapped superclass whose state is inherited by entities.
    MappedSuperclass,
    /// A persistent entity.
    Entity,
    /// An embeddable value type.
    Embeddable,
    /// A composite primary key class referenced through `@IdClass`.
    IdClass,
    /// A composite primary key class embedded through `@EmbeddedId`.
    EmbeddedId,
    /// A plain bean with no persistence mapping.
    Bean,
}

impl ClassKind {
    /// Returns true for the two composite-identifier kinds.
    ///
    /// Identifier classes derive their member set from their own fields and
    /// get their constructors synthesized when none are declared.
    pub fn is_identifier(self) -> bool {
        matches!(self, ClassKind::IdClass | ClassKind::EmbeddedId)
    }

    /// Returns true when attributes of this kind carry persistence annotations.
    pub fn is_managed(self) -> bool {
        !matches!(self, ClassKind::IdClass | ClassKind::Bean)
    }
}

/// Java access modifier for fields and constructors.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AccessModifier {
    Public,
    Protected,
    #[default]
    Private,
    /// Package-private (no keyword).
    Package,
}

impl AccessModifier {
    /// Returns the keyword followed by a space, or an empty string for package access.
    pub fn prefix(self) -> &'static str {
        match self {
            AccessModifier::Public => "public ",
            AccessModifier::Protected => "protected ",
            AccessModifier::Private => "private ",
            AccessModifier::Package => "",
        }
    }
}

/// A reference to a type outside the metamodel (interface, adapter, superclass).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReferenceClass {
    /// Fully-qualified name of the referenced type.
    pub name: String,
    /// Disabled references are kept in the model but never emitted.
    #[serde(default = "enabled")]
    pub enabled: bool,
}

impl ReferenceClass {
    /// Creates an enabled reference.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            enabled: true,
        }
    }

    /// Returns the simple (unqualified) name of the referenced type.
    ///
    /// ```
    /// use orm_define::ReferenceClass;
    ///
    /// assert_eq!(ReferenceClass::new("com.example.AuditAdapter").simple_name(), "AuditAdapter");
    /// assert_eq!(ReferenceClass::new("Local").simple_name(), "Local");
    /// ```
    pub fn simple_name(&self) -> &str {
        self.name.rsplit('.').next().unwrap_or(&self.name)
    }
}

/// The attributes designated for one generated method, plus free-text hooks.
///
/// `pre_code` runs before the per-attribute logic and `post_code` after it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassMembers {
    /// Attribute names, in generation order.
    pub attributes: Vec<String>,
    pub pre_code: Option<String>,
    pub post_code: Option<String>,
}

impl ClassMembers {
    /// Creates members for the given attribute names with no hooks.
    pub fn of<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            attributes: names.into_iter().map(Into::into).collect(),
            pre_code: None,
            post_code: None,
        }
    }
}

/// A constructor declared on a class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstructorDescriptor {
    /// Names of the attributes the constructor assigns, in parameter order.
    #[serde(default)]
    pub attributes: Vec<String>,
    #[serde(default = "enabled")]
    pub enabled: bool,
    #[serde(default = "public")]
    pub access: AccessModifier,
}

impl ConstructorDescriptor {
    /// Creates an enabled public constructor over the given attribute names.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            attributes: names.into_iter().map(Into::into).collect(),
            enabled: true,
            access: AccessModifier::Public,
        }
    }

    /// Creates an enabled public no-argument constructor.
    pub fn no_args() -> Self {
        Self::new(Vec::<String>::new())
    }
}

/// A single generatable class.
///
/// ## Examples
///
/// ```
/// use orm_define::{Attribute, ClassDescriptor, ClassKind, ClassMembers};
///
/// let mut person = ClassDescriptor::new("Person", ClassKind::Entity);
/// person.attributes.push(Attribute::new("name", "String"));
/// person.equals_method = ClassMembers::of(["name"]);
///
/// assert_eq!(person.qualified_name("com.example"), "com.example.Person");
/// assert!(person.generate_source);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassDescriptor {
    /// Simple class name.
    pub name: String,
    /// Package override; the metamodel package is used when absent.
    #[serde(default)]
    pub package: Option<String>,
    pub kind: ClassKind,
    #[serde(default, rename = "abstract")]
    pub is_abstract: bool,
    #[serde(default = "enabled")]
    pub generate_source: bool,
    /// Table name for entities.
    #[serde(default)]
    pub table: Option<String>,
    /// Direct superclass: the name of another class of the metamodel.
    #[serde(default)]
    pub superclass: Option<String>,
    /// Named superclass outside the metamodel.
    #[serde(default)]
    pub superclass_ref: Option<ReferenceClass>,
    #[serde(default)]
    pub interfaces: Vec<ReferenceClass>,
    #[serde(default)]
    pub attributes: Vec<Attribute>,
    #[serde(default)]
    pub constructors: Vec<ConstructorDescriptor>,
    #[serde(default)]
    pub equals_method: ClassMembers,
    #[serde(default)]
    pub hash_code_method: ClassMembers,
    #[serde(default)]
    pub to_string_method: ClassMembers,
    #[serde(default)]
    pub annotations: Vec<Annotation<ClassAnnotationLocation>>,
    /// Annotations contributed at generation time by other tooling.
    #[serde(default)]
    pub runtime_annotations: Vec<Annotation<ClassAnnotationLocation>>,
    #[serde(default)]
    pub snippets: Vec<Snippet<ClassSnippetLocation>>,
    /// Snippets contributed at generation time by other tooling.
    #[serde(default)]
    pub runtime_snippets: Vec<Snippet<ClassSnippetLocation>>,
    #[serde(default)]
    pub binding: ClassBinding,
}

impl ClassDescriptor {
    /// Creates an empty, source-generating class of the given kind.
    pub fn new(name: impl Into<String>, kind: ClassKind) -> Self {
        Self {
            name: name.into(),
            package: None,
            kind,
            is_abstract: false,
            generate_source: true,
            table: None,
            superclass: None,
            superclass_ref: None,
            interfaces: Vec::new(),
            attributes: Vec::new(),
            constructors: Vec::new(),
            equals_method: ClassMembers::default(),
            hash_code_method: ClassMembers::default(),
            to_string_method: ClassMembers::default(),
            annotations: Vec::new(),
            runtime_annotations: Vec::new(),
            snippets: Vec::new(),
            runtime_snippets: Vec::new(),
            binding: ClassBinding::default(),
        }
    }

    /// Returns the package this class lives in.
    pub fn package_or<'a>(&'a self, default_package: &'a str) -> &'a str {
        self.package.as_deref().unwrap_or(default_package)
    }

    /// Returns the fully-qualified class name.
    pub fn qualified_name(&self, default_package: &str) -> String {
        let package = self.package_or(default_package);
        if package.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", package, self.name)
        }
    }

    /// Looks up an attribute declared directly on this class.
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|attr| attr.name == name)
    }
}

/// The root element of a metamodel snapshot.
///
/// Global interfaces and snippets declared here apply to every class, ahead
/// of the class's own declarations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Metamodel {
    /// Default package for every class.
    pub package: String,
    /// Whether generated classes carry XML-binding support.
    pub binding_support: bool,
    /// Persistence unit name used for the descriptor.
    pub persistence_unit: Option<String>,
    pub interfaces: Vec<ReferenceClass>,
    pub snippets: Vec<Snippet<ClassSnippetLocation>>,
    pub classes: Vec<ClassDescriptor>,
}

impl Metamodel {
    /// Creates an empty metamodel rooted at the given package.
    pub fn new(package: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            ..Default::default()
        }
    }

    /// Iterates the classes of one kind, in declaration order.
    pub fn classes_of(&self, kind: ClassKind) -> impl Iterator<Item = &ClassDescriptor> {
        self.classes.iter().filter(move |class| class.kind == kind)
    }

    /// Looks up a class by simple name.
    pub fn find_class(&self, name: &str) -> Option<&ClassDescriptor> {
        self.classes.iter().find(|class| class.name == name)
    }
}

fn enabled() -> bool {
    true
}

fn public() -> AccessModifier {
    AccessModifier::Public
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn class_kind_display_snake_case() {
        assert_eq!(ClassKind::MappedSuperclass.to_string(), "mapped_superclass");
        assert_eq!(ClassKind::IdClass.to_string(), "id_class");
        assert_eq!(ClassKind::Bean.to_string(), "bean");
    }

    #[test]
    fn class_kind_from_str_rejects_unknown() {
        assert!(ClassKind::from_str("entity").is_ok());
        assert!(ClassKind::from_str("Entity").is_err());
        assert!(ClassKind::from_str("").is_err());
    }

    #[test]
    fn class_kind_iterates_in_stage_order() {
        let kinds: Vec<_> = ClassKind::iter().collect();
        assert_eq!(kinds.first(), Some(&ClassKind::MappedSuperclass));
        assert_eq!(kinds.last(), Some(&ClassKind::Bean));
        assert_eq!(kinds.len(), 6);
    }

    #[test]
    fn identifier_and_managed_kinds() {
        assert!(ClassKind::IdClass.is_identifier());
        assert!(ClassKind::EmbeddedId.is_identifier());
        assert!(!ClassKind::Entity.is_identifier());

        assert!(ClassKind::EmbeddedId.is_managed());
        assert!(!ClassKind::IdClass.is_managed());
        assert!(!ClassKind::Bean.is_managed());
    }

    #[test]
    fn access_modifier_prefix() {
        assert_eq!(AccessModifier::Private.prefix(), "private ");
        assert_eq!(AccessModifier::Package.prefix(), "");
        assert_eq!(AccessModifier::default(), AccessModifier::Private);
    }

    #[test]
    fn qualified_name_uses_override_package() {
        let mut class = ClassDescriptor::new("Order", ClassKind::Entity);
        assert_eq!(class.qualified_name("shop"), "shop.Order");
        assert_eq!(class.qualified_name(""), "Order");

        class.package = Some("shop.billing".to_string());
        assert_eq!(class.qualified_name("shop"), "shop.billing.Order");
    }

    #[test]
    fn descriptor_deserializes_with_defaults() {
        let json = r#"{ "name": "Address", "kind": "embeddable" }"#;
        let class: ClassDescriptor = serde_json::from_str(json).unwrap();

        assert_eq!(class.kind, ClassKind::Embeddable);
        assert!(class.generate_source);
        assert!(!class.is_abstract);
        assert!(class.attributes.is_empty());
        assert_eq!(class.equals_method, ClassMembers::default());
    }

    #[test]
    fn constructor_defaults_to_enabled_public() {
        let json = r#"{ "attributes": ["id"] }"#;
        let ctor: ConstructorDescriptor = serde_json::from_str(json).unwrap();

        assert!(ctor.enabled);
        assert_eq!(ctor.access, AccessModifier::Public);
        assert_eq!(ctor.attributes, vec!["id".to_string()]);
    }

    #[test]
    fn metamodel_filters_by_kind() {
        let mut model = Metamodel::new("com.example");
        model.classes.push(ClassDescriptor::new("A", ClassKind::Entity));
        model.classes.push(ClassDescriptor::new("B", ClassKind::Bean));
        model.classes.push(ClassDescriptor::new("C", ClassKind::Entity));

        let entities: Vec<_> = model.classes_of(ClassKind::Entity).map(|c| c.name.as_str()).collect();
        assert_eq!(entities, vec!["A", "C"]);
        assert!(model.find_class("B").is_some());
        assert!(model.find_class("D").is_none());
    }
}
