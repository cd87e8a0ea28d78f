//! Synthesizers that turn metamodel settings into [`Fragment`]s.
//!
//! Each submodule handles one family of generated text:
//!
//! - [`equals`], [`hash_code`], [`to_string`] - generated method bodies
//! - [`constraints`] - bean-validation annotations
//! - [`binding`] - JSON-binding annotations
//! - [`mapping`] - persistence annotations for classes and attributes
//! - [`constructor`] - constructor declarations
//! - [`extension`] - user snippets and annotations bucketed by location
//!
//! Synthesizers are pure functions of their input. Anything malformed fails
//! with [`GeneratorError::InvalidInput`]; nothing is logged or written here.
//!
//! [`Fragment`]: crate::fragment::Fragment
//! [`GeneratorError::InvalidInput`]: crate::errors::GeneratorError::InvalidInput

pub mod binding;
pub mod constraints;
pub mod constructor;
pub mod equals;
pub mod extension;
pub mod hash_code;
pub mod mapping;
pub mod to_string;

pub use binding::{synthesize_attribute_binding, synthesize_class_binding};
pub use constraints::{synthesize_constraint, synthesize_constraints};
pub use constructor::{ConstructorParam, synthesize_constructor};
pub use equals::synthesize_equals;
pub use extension::{bucket_annotations, bucket_snippets, normalize_import};
pub use hash_code::synthesize_hash_code;
pub use mapping::{synthesize_attribute_mapping, synthesize_class_mapping};
pub use to_string::synthesize_to_string;

use crate::dispatch::TypeCategory;
use crate::errors::GeneratorError;
use crate::fragment::is_java_identifier;

/// One attribute taking part in a generated method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub name: String,
    pub category: TypeCategory,
}

impl Member {
    pub fn new(name: impl Into<String>, category: TypeCategory) -> Self {
        Self {
            name: name.into(),
            category,
        }
    }
}

/// Resolved members for one generated method plus the user hooks around them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MethodMembers {
    pub members: Vec<Member>,
    pub pre_code: Option<String>,
    pub post_code: Option<String>,
}

impl MethodMembers {
    pub fn new(members: Vec<Member>) -> Self {
        Self {
            members,
            pre_code: None,
            post_code: None,
        }
    }

    /// True when there is nothing to generate: no members and blank hooks.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty() && self.pre_code().is_none() && self.post_code().is_none()
    }

    /// The pre hook, when it has any non-whitespace content.
    pub fn pre_code(&self) -> Option<&str> {
        non_blank(&self.pre_code)
    }

    pub fn post_code(&self) -> Option<&str> {
        non_blank(&self.post_code)
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|text| !text.is_empty())
}

/// Checks that the class name and every member name are usable identifiers.
pub(crate) fn check_identifiers(class_name: &str, members: &MethodMembers) -> Result<(), GeneratorError> {
    if !is_java_identifier(class_name) {
        return Err(GeneratorError::invalid(
            class_name,
            format!("'{}' is not a valid class name", class_name),
        ));
    }
    if let Some(bad) = members.members.iter().find(|m| !is_java_identifier(&m.name)) {
        return Err(GeneratorError::invalid(
            class_name,
            format!("'{}' is not a valid member name", bad.name),
        ));
    }
    Ok(())
}
