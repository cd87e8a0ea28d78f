//! Convenient re-exports for building metamodels.
//!
//! ## Examples
//!
//! ```
//! use orm_define::prelude::*;
//!
//! let mut key = ClassDescriptor::new("OrderLineKey", ClassKind::IdClass);
//! key.attributes.push(Attribute::new("orderId", "long"));
//! key.attributes.push(Attribute::new("line", "int"));
//! assert!(key.kind.is_identifier());
//! ```

pub use crate::attribute::{Attribute, AttributeMapping, Column, Convert, FetchType, Relation};
pub use crate::binding::{AttributeBinding, ClassBinding, FormatSpec};
pub use crate::constraint::{Constraint, ConstraintRule, PatternFlag};
pub use crate::extension::{
    Annotation, AttributeAnnotationLocation, AttributeSnippetLocation, ClassAnnotationLocation,
    ClassSnippetLocation, Snippet,
};
pub use crate::types::{
    AccessModifier, ClassDescriptor, ClassKind, ClassMembers, ConstructorDescriptor, Metamodel,
    ReferenceClass,
};
