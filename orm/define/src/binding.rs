//! JSON-binding settings for classes and attributes.

use serde::{Deserialize, Serialize};

use crate::types::ReferenceClass;

/// A date or number format with an optional locale.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatSpec {
    pub value: Option<String>,
    pub locale: Option<String>,
}

impl FormatSpec {
    /// Creates a format with a pattern and no locale.
    pub fn pattern(value: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
            locale: None,
        }
    }

    /// Returns true when neither the pattern nor the locale is set.
    ///
    /// ```
    /// use orm_define::FormatSpec;
    ///
    /// assert!(FormatSpec::default().is_empty());
    /// assert!(FormatSpec { value: Some(" ".into()), locale: None }.is_empty());
    /// assert!(!FormatSpec::pattern("yyyy-MM-dd").is_empty());
    /// ```
    pub fn is_empty(&self) -> bool {
        blank(&self.value) && blank(&self.locale)
    }
}

/// Class-level binding settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassBinding {
    pub nillable: bool,
    /// Attribute names in serialization order.
    pub property_order: Vec<String>,
    pub date_format: Option<FormatSpec>,
    pub number_format: Option<FormatSpec>,
    pub type_adapter: Option<ReferenceClass>,
    pub type_deserializer: Option<ReferenceClass>,
    pub type_serializer: Option<ReferenceClass>,
    /// Custom property visibility strategy.
    pub visibility: Option<ReferenceClass>,
}

/// Attribute-level binding overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttributeBinding {
    /// Excludes the attribute; every other binding setting is ignored.
    pub transient: bool,
    /// Serialized property name.
    pub property: Option<String>,
    pub nillable: bool,
    pub date_format: Option<FormatSpec>,
    pub number_format: Option<FormatSpec>,
    pub type_adapter: Option<ReferenceClass>,
    pub type_deserializer: Option<ReferenceClass>,
    pub type_serializer: Option<ReferenceClass>,
}

fn blank(value: &Option<String>) -> bool {
    value.as_deref().is_none_or(|v| v.trim().is_empty())
}
