//! Name resolution across the class hierarchy.
//!
//! Constructors and class members refer to attributes by name. A name resolves
//! against the class's own attributes first, then up the direct-superclass
//! chain. The class that declares the attribute is its owner.

use thiserror::Error;

use crate::attribute::Attribute;
use crate::types::{ClassDescriptor, Metamodel};

/// Errors raised while resolving references inside a metamodel.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    /// A superclass reference names a class that is not in the metamodel.
    #[error("class '{referenced_by}' extends unknown class '{name}'")]
    UnknownClass { name: String, referenced_by: String },

    /// An attribute name is neither declared nor inherited.
    #[error("attribute '{attribute}' is not visible from class '{class}'")]
    UnknownAttribute { class: String, attribute: String },

    /// Following superclass references leads back to the starting class.
    #[error("superclass chain of '{class}' is cyclic")]
    CyclicHierarchy { class: String },
}

/// An attribute together with the class that declares it.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedAttribute<'a> {
    pub attribute: &'a Attribute,
    pub owner: &'a ClassDescriptor,
}

impl ResolvedAttribute<'_> {
    /// Returns true when the attribute is declared on `class` itself.
    pub fn is_owned_by(&self, class: &ClassDescriptor) -> bool {
        self.owner.name == class.name
    }
}

impl Metamodel {
    /// Returns the direct superclass of `class` when it lives in this metamodel.
    ///
    /// ## Errors
    ///
    /// Returns [`LookupError::UnknownClass`] when the reference does not resolve.
    pub fn superclass_of(&self, class: &ClassDescriptor) -> Result<Option<&ClassDescriptor>, LookupError> {
        match &class.superclass {
            None => Ok(None),
            Some(name) => self.find_class(name).map(Some).ok_or_else(|| LookupError::UnknownClass {
                name: name.clone(),
                referenced_by: class.name.clone(),
            }),
        }
    }

    /// Returns every ancestor of `class`, nearest first.
    ///
    /// ## Errors
    ///
    /// Returns [`LookupError::CyclicHierarchy`] when the chain loops, or
    /// [`LookupError::UnknownClass`] when a link does not resolve.
    pub fn ancestors<'a>(&'a self, class: &'a ClassDescriptor) -> Result<Vec<&'a ClassDescriptor>, LookupError> {
        let mut chain: Vec<&ClassDescriptor> = Vec::new();
        let mut current = class;
        while let Some(parent) = self.superclass_of(current)? {
            if parent.name == class.name || chain.iter().any(|seen| seen.name == parent.name) {
                return Err(LookupError::CyclicHierarchy {
                    class: class.name.clone(),
                });
            }
            chain.push(parent);
            current = parent;
        }
        Ok(chain)
    }

    /// Resolves an attribute name as seen from `class`.
    ///
    /// ## Examples
    ///
    /// ```
    /// use orm_define::{Attribute, ClassDescriptor, ClassKind, Metamodel};
    ///
    /// let mut base = ClassDescriptor::new("Base", ClassKind::MappedSuperclass);
    /// base.attributes.push(Attribute::new("id", "Long"));
    /// let mut user = ClassDescriptor::new("User", ClassKind::Entity);
    /// user.superclass = Some("Base".to_string());
    /// user.attributes.push(Attribute::new("email", "String"));
    ///
    /// let mut model = Metamodel::new("app");
    /// model.classes = vec![base, user];
    ///
    /// let user = model.find_class("User").unwrap();
    /// let id = model.resolve_attribute(user, "id").unwrap();
    /// assert_eq!(id.owner.name, "Base");
    /// assert!(!id.is_owned_by(user));
    /// assert!(model.resolve_attribute(user, "missing").is_err());
    /// ```
    ///
    /// ## Errors
    ///
    /// Returns [`LookupError::UnknownAttribute`] when no class in the chain
    /// declares the name.
    pub fn resolve_attribute<'a>(
        &'a self,
        class: &'a ClassDescriptor,
        name: &str,
    ) -> Result<ResolvedAttribute<'a>, LookupError> {
        if let Some(attribute) = class.attribute(name) {
            return Ok(ResolvedAttribute { attribute, owner: class });
        }
        for ancestor in self.ancestors(class)? {
            if let Some(attribute) = ancestor.attribute(name) {
                return Ok(ResolvedAttribute {
                    attribute,
                    owner: ancestor,
                });
            }
        }
        Err(LookupError::UnknownAttribute {
            class: class.name.clone(),
            attribute: name.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ClassKind;

    fn hierarchy() -> Metamodel {
        let mut root = ClassDescriptor::new("Root", ClassKind::MappedSuperclass);
        root.attributes.push(Attribute::new("id", "Long"));
        let mut audited = ClassDescriptor::new("Audited", ClassKind::MappedSuperclass);
        audited.superclass = Some("Root".to_string());
        audited.attributes.push(Attribute::new("createdAt", "java.time.Instant"));
        let mut invoice = ClassDescriptor::new("Invoice", ClassKind::Entity);
        invoice.superclass = Some("Audited".to_string());
        invoice.attributes.push(Attribute::new("total", "java.math.BigDecimal"));

        let mut model = Metamodel::new("billing");
        model.classes = vec![root, audited, invoice];
        model
    }

    #[test]
    fn ancestors_nearest_first() {
        let model = hierarchy();
        let invoice = model.find_class("Invoice").unwrap();
        let names: Vec<_> = model
            .ancestors(invoice)
            .unwrap()
            .into_iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(names, vec!["Audited", "Root"]);
    }

    #[test]
    fn resolves_through_two_levels() {
        let model = hierarchy();
        let invoice = model.find_class("Invoice").unwrap();

        assert_eq!(model.resolve_attribute(invoice, "total").unwrap().owner.name, "Invoice");
        assert_eq!(model.resolve_attribute(invoice, "createdAt").unwrap().owner.name, "Audited");
        assert_eq!(model.resolve_attribute(invoice, "id").unwrap().owner.name, "Root");
    }

    #[test]
    fn own_attribute_shadows_inherited() {
        let mut model = hierarchy();
        model.classes[2].attributes.push(Attribute::new("id", "String"));
        let invoice = model.find_class("Invoice").unwrap();

        let id = model.resolve_attribute(invoice, "id").unwrap();
        assert!(id.is_owned_by(invoice));
        assert_eq!(id.attribute.data_type, "String");
    }

    #[test]
    fn unknown_superclass_is_reported() {
        let mut model = hierarchy();
        model.classes[0].superclass = Some("Ghost".to_string());
        let invoice = model.find_class("Invoice").unwrap();

        assert_eq!(
            model.ancestors(invoice).unwrap_err(),
            LookupError::UnknownClass {
                name: "Ghost".to_string(),
                referenced_by: "Root".to_string(),
            }
        );
    }

    #[test]
    fn cycle_is_reported() {
        let mut model = hierarchy();
        model.classes[0].superclass = Some("Invoice".to_string());
        let invoice = model.find_class("Invoice").unwrap();

        assert!(matches!(
            model.ancestors(invoice),
            Err(LookupError::CyclicHierarchy { .. })
        ));
    }
}
