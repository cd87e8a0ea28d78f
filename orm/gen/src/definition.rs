//! The assembled artifact for one class.
//!
//! A [`ClassDefinition`] is built once by the assembler and never changes
//! afterwards. Field artifacts are shared through [`Arc`] so that a field
//! referenced by several constructors is one value, not several copies.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use orm_define::{
    AccessModifier, AttributeAnnotationLocation, AttributeSnippetLocation, ClassAnnotationLocation, ClassKind,
    ClassSnippetLocation,
};

use crate::dispatch::TypeCategory;
use crate::fragment::{Fragment, simple_name};

pub const PROPERTY_CHANGE_SUPPORT: &str = "java.beans.PropertyChangeSupport";
pub const PROPERTY_CHANGE_LISTENER: &str = "java.beans.PropertyChangeListener";
pub const VETOABLE_CHANGE_SUPPORT: &str = "java.beans.VetoableChangeSupport";
pub const VETOABLE_CHANGE_LISTENER: &str = "java.beans.VetoableChangeListener";
pub const PROPERTY_VETO_EXCEPTION: &str = "java.beans.PropertyVetoException";

/// One attribute as seen by the class being generated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldArtifact {
    pub name: String,
    /// Java type text as declared.
    pub data_type: String,
    pub category: TypeCategory,
    pub access: AccessModifier,
    pub default_value: Option<String>,
    pub description: Option<String>,
    /// Simple name of the class that declares the attribute.
    pub owner: String,
    /// False for inherited attributes, which only appear as constructor parameters.
    pub declared: bool,
    pub persistence: Vec<Fragment>,
    pub constraints: Vec<Fragment>,
    /// Type-use constraints on map keys.
    pub key_constraints: Vec<Fragment>,
    /// Type-use constraints on collection elements or map values.
    pub value_constraints: Vec<Fragment>,
    pub binding: Vec<Fragment>,
    pub annotations: BTreeMap<AttributeAnnotationLocation, Vec<String>>,
    pub snippets: BTreeMap<AttributeSnippetLocation, Vec<String>>,
    pub property_change_support: bool,
    pub vetoable_change_support: bool,
}

impl FieldArtifact {
    /// A bare artifact with no annotations.
    pub fn new(name: impl Into<String>, data_type: impl Into<String>, owner: impl Into<String>) -> Self {
        let data_type = data_type.into();
        Self {
            name: name.into(),
            category: TypeCategory::classify(&data_type),
            data_type,
            access: AccessModifier::Private,
            default_value: None,
            description: None,
            owner: owner.into(),
            declared: true,
            persistence: Vec::new(),
            constraints: Vec::new(),
            key_constraints: Vec::new(),
            value_constraints: Vec::new(),
            binding: Vec::new(),
            annotations: BTreeMap::new(),
            snippets: BTreeMap::new(),
            property_change_support: false,
            vetoable_change_support: false,
        }
    }

    /// Every fragment attached to the field, in rendering order.
    pub fn fragments(&self) -> impl Iterator<Item = &Fragment> {
        self.persistence
            .iter()
            .chain(&self.constraints)
            .chain(&self.key_constraints)
            .chain(&self.value_constraints)
            .chain(&self.binding)
    }
}

/// A synthesized constructor and the fields it takes.
#[derive(Debug, Clone)]
pub struct ConstructorArtifact {
    pub access: AccessModifier,
    /// Ancestor-owned parameters, forwarded to `super(...)`.
    pub inherited: Vec<Arc<FieldArtifact>>,
    /// Parameters assigned to this class's own fields.
    pub local: Vec<Arc<FieldArtifact>>,
    pub fragment: Fragment,
}

impl ConstructorArtifact {
    pub fn arity(&self) -> usize {
        self.inherited.len() + self.local.len()
    }
}

/// Everything needed to write one class.
#[derive(Debug, Clone)]
pub struct ClassDefinition {
    pub kind: ClassKind,
    pub package: String,
    pub name: String,
    pub is_abstract: bool,
    /// Fully-qualified superclass name.
    pub superclass: Option<String>,
    /// Fully-qualified interface names, deduplicated, in declaration order.
    pub interfaces: Vec<String>,
    /// Persistence annotations for the class kind.
    pub persistence: Vec<Fragment>,
    pub binding: Vec<Fragment>,
    pub annotations: BTreeMap<ClassAnnotationLocation, Vec<String>>,
    pub snippets: BTreeMap<ClassSnippetLocation, Vec<String>>,
    /// Fields declared by this class, in declaration order.
    pub fields: Vec<Arc<FieldArtifact>>,
    pub constructors: Vec<ConstructorArtifact>,
    pub equals_method: Option<Fragment>,
    pub hash_code_method: Option<Fragment>,
    pub to_string_method: Option<Fragment>,
    /// Serialization-binding flag copied from the metamodel.
    pub binding_support: bool,
}

impl ClassDefinition {
    pub fn qualified_name(&self) -> String {
        if self.package.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.package, self.name)
        }
    }

    /// True when any declared field fires property-change events.
    pub fn property_change_support(&self) -> bool {
        self.fields.iter().any(|f| f.property_change_support)
    }

    /// True when any declared field fires vetoable-change events.
    pub fn vetoable_change_support(&self) -> bool {
        self.fields.iter().any(|f| f.vetoable_change_support)
    }

    /// Simple name of the superclass, as written after `extends`.
    pub fn superclass_simple_name(&self) -> Option<&str> {
        self.superclass.as_deref().map(simple_name)
    }

    /// Fully-qualified names this class must import, sorted and deduplicated.
    ///
    /// Types in `java.lang` and in the class's own package are left out.
    pub fn required_imports(&self) -> BTreeSet<String> {
        let mut symbols: BTreeSet<String> = BTreeSet::new();
        let class_fragments = self
            .persistence
            .iter()
            .chain(&self.binding)
            .chain(self.constructors.iter().map(|c| &c.fragment))
            .chain(self.equals_method.iter())
            .chain(self.hash_code_method.iter())
            .chain(self.to_string_method.iter());
        let field_fragments = self.fields.iter().flat_map(|f| f.fragments());
        for fragment in class_fragments.chain(field_fragments) {
            symbols.extend(fragment.imports().iter().cloned());
        }
        symbols.extend(self.interfaces.iter().cloned());
        symbols.extend(self.superclass.iter().cloned());
        if self.property_change_support() {
            symbols.insert(PROPERTY_CHANGE_SUPPORT.to_string());
            symbols.insert(PROPERTY_CHANGE_LISTENER.to_string());
        }
        if self.vetoable_change_support() {
            symbols.insert(VETOABLE_CHANGE_SUPPORT.to_string());
            symbols.insert(VETOABLE_CHANGE_LISTENER.to_string());
            symbols.insert(PROPERTY_VETO_EXCEPTION.to_string());
        }
        symbols.retain(|symbol| self.needs_import(symbol));
        symbols
    }

    fn needs_import(&self, symbol: &str) -> bool {
        match symbol.rsplit_once('.') {
            None => false,
            Some((package, _)) => package != "java.lang" && package != self.package,
        }
    }
}
