//! Builds one [`ClassDefinition`] from one class descriptor.
//!
//! An assembler run owns a memo of field artifacts keyed by attribute name.
//! The first reference to an attribute builds its artifact; later references
//! (a second constructor, a generated method) reuse the same `Arc`. The memo
//! is dropped with the assembler.

use std::collections::HashMap;
use std::sync::Arc;

use orm_define::{Attribute, ClassDescriptor, ClassMembers, ConstructorDescriptor, LookupError, Metamodel};
use tracing::debug;

use crate::codegen::{
    ConstructorParam, Member, MethodMembers, bucket_annotations, bucket_snippets, synthesize_attribute_binding,
    synthesize_attribute_mapping, synthesize_class_binding, synthesize_class_mapping, synthesize_constraints,
    synthesize_constructor, synthesize_equals, synthesize_hash_code, synthesize_to_string,
};
use crate::definition::{ClassDefinition, ConstructorArtifact, FieldArtifact};
use crate::dispatch::type_arguments;
use crate::errors::GeneratorError;
use crate::fragment::is_java_identifier;
use crate::options::GenerationOptions;
use crate::primes::PrimeSource;

/// Assembles a single class.
///
/// ## Examples
///
/// ```
/// use orm_define::{Attribute, ClassDescriptor, ClassKind, ClassMembers, Metamodel};
/// use orm_gen::assembler::ClassAssembler;
/// use orm_gen::options::GenerationOptions;
/// use orm_gen::primes::FixedPrimes;
///
/// let mut person = ClassDescriptor::new("Person", ClassKind::Entity);
/// person.attributes.push(Attribute::new("name", "String"));
/// person.to_string_method = ClassMembers::of(["name"]);
///
/// let mut model = Metamodel::new("com.example");
/// model.classes.push(person);
///
/// let options = GenerationOptions::default();
/// let definition = ClassAssembler::new(&model, &model.classes[0], &options)
///     .assemble(&mut FixedPrimes::default())
///     .unwrap();
///
/// assert_eq!(definition.qualified_name(), "com.example.Person");
/// assert_eq!(definition.fields.len(), 1);
/// assert!(definition.to_string_method.is_some());
/// assert!(definition.equals_method.is_none());
/// ```
pub struct ClassAssembler<'a> {
    model: &'a Metamodel,
    class: &'a ClassDescriptor,
    options: &'a GenerationOptions,
    fields: HashMap<String, Arc<FieldArtifact>>,
}

impl<'a> ClassAssembler<'a> {
    pub fn new(model: &'a Metamodel, class: &'a ClassDescriptor, options: &'a GenerationOptions) -> Self {
        Self {
            model,
            class,
            options,
            fields: HashMap::new(),
        }
    }

    /// Runs the assembly.
    ///
    /// ## Errors
    ///
    /// Returns [`GeneratorError::InvalidInput`] when any synthesizer fails or a
    /// name does not resolve. Nothing is produced in that case.
    pub fn assemble(mut self, primes: &mut dyn PrimeSource) -> Result<ClassDefinition, GeneratorError> {
        let class = self.class;
        if !is_java_identifier(&class.name) {
            return Err(self.invalid(format!("'{}' is not a valid class name", class.name)));
        }
        self.check_attribute_names()?;

        // Declared fields first, so the memo holds them in declaration order.
        let mut fields = Vec::with_capacity(class.attributes.len());
        for attribute in &class.attributes {
            fields.push(self.field(&attribute.name)?);
        }

        let synthesize_identity = class.kind.is_identifier() && class.constructors.is_empty();
        let (equality, hashing, printing) = if synthesize_identity {
            let own = self.own_members();
            (
                self.method_members(&with_hooks(&own, &class.equals_method))?,
                self.method_members(&with_hooks(&own, &class.hash_code_method))?,
                self.method_members(&with_hooks(&own, &class.to_string_method))?,
            )
        } else {
            (
                self.method_members(&class.equals_method)?,
                self.method_members(&class.hash_code_method)?,
                self.method_members(&class.to_string_method)?,
            )
        };

        let constructors = if synthesize_identity {
            self.identity_constructors(&equality)?
        } else {
            self.declared_constructors()?
        };

        let visible = self.visible_attribute_names()?;
        let binding = synthesize_class_binding(&class.name, &class.binding, &visible)?;

        let definition = ClassDefinition {
            kind: class.kind,
            package: class.package_or(&self.model.package).to_string(),
            name: class.name.clone(),
            is_abstract: class.is_abstract,
            superclass: self.superclass()?,
            interfaces: self.interfaces(),
            persistence: synthesize_class_mapping(class),
            binding,
            annotations: bucket_annotations(&class.annotations, &class.runtime_annotations),
            snippets: bucket_snippets(
                self.model
                    .snippets
                    .iter()
                    .chain(&class.snippets)
                    .chain(&class.runtime_snippets),
            ),
            fields,
            constructors,
            equals_method: synthesize_equals(&class.name, &equality)?,
            hash_code_method: synthesize_hash_code(&class.name, &hashing, primes)?,
            to_string_method: synthesize_to_string(&class.name, &printing)?,
            binding_support: self.model.binding_support,
        };
        debug!(
            class = %class.name,
            fields = definition.fields.len(),
            constructors = definition.constructors.len(),
            "Assembled class definition"
        );
        Ok(definition)
    }

    fn invalid(&self, reason: impl Into<String>) -> GeneratorError {
        GeneratorError::invalid(&self.class.name, reason)
    }

    fn lookup(&self, err: LookupError) -> GeneratorError {
        self.invalid(err.to_string())
    }

    /// Attribute names must be unique across the class and its ancestors.
    fn check_attribute_names(&self) -> Result<(), GeneratorError> {
        let ancestors = self.model.ancestors(self.class).map_err(|e| self.lookup(e))?;
        let mut seen: Vec<&str> = Vec::new();
        for attribute in &self.class.attributes {
            if !is_java_identifier(&attribute.name) {
                return Err(self.invalid(format!("'{}' is not a valid attribute name", attribute.name)));
            }
            if seen.contains(&attribute.name.as_str()) {
                return Err(self.invalid(format!("attribute '{}' is declared twice", attribute.name)));
            }
            if let Some(ancestor) = ancestors.iter().find(|a| a.attribute(&attribute.name).is_some()) {
                return Err(self.invalid(format!(
                    "attribute '{}' is already declared by superclass '{}'",
                    attribute.name, ancestor.name
                )));
            }
            seen.push(&attribute.name);
        }
        Ok(())
    }

    /// Returns the memoized artifact for `name`, building it on first use.
    fn field(&mut self, name: &str) -> Result<Arc<FieldArtifact>, GeneratorError> {
        if let Some(existing) = self.fields.get(name) {
            debug!(class = %self.class.name, attribute = name, "Reusing memoized field");
            return Ok(Arc::clone(existing));
        }
        let resolved = self
            .model
            .resolve_attribute(self.class, name)
            .map_err(|e| self.lookup(e))?;
        let artifact = if resolved.is_owned_by(self.class) {
            self.declared_field(resolved.attribute)?
        } else {
            let mut inherited =
                FieldArtifact::new(&resolved.attribute.name, &resolved.attribute.data_type, &resolved.owner.name);
            inherited.declared = false;
            inherited
        };
        debug!(class = %self.class.name, attribute = name, owner = %artifact.owner, "Memoized field");
        let artifact = Arc::new(artifact);
        self.fields.insert(name.to_string(), Arc::clone(&artifact));
        Ok(artifact)
    }

    fn declared_field(&self, attribute: &Attribute) -> Result<FieldArtifact, GeneratorError> {
        let class = &self.class.name;
        let java_se = self.options.java_se_support;
        let mut field = FieldArtifact::new(&attribute.name, &attribute.data_type, class);
        field.access = attribute.access;
        field.default_value = attribute.default_value.clone();
        field.description = attribute.description.clone();
        field.persistence = synthesize_attribute_mapping(class, self.class.kind, attribute, self.options)?;
        field.constraints = synthesize_constraints(class, &attribute.name, &attribute.constraints, self.options)?;
        field.key_constraints =
            synthesize_constraints(class, &attribute.name, &attribute.key_constraints, self.options)?;
        field.value_constraints =
            synthesize_constraints(class, &attribute.name, &attribute.value_constraints, self.options)?;
        let arity = type_arguments(&attribute.data_type).map_or(0, |(_, args)| args.len());
        if !field.key_constraints.is_empty() && arity != 2 {
            return Err(self.invalid(format!(
                "attribute '{}': key constraints need a map type, found '{}'",
                attribute.name, attribute.data_type
            )));
        }
        if !field.value_constraints.is_empty() && arity == 0 {
            return Err(self.invalid(format!(
                "attribute '{}': value constraints need a parameterized type, found '{}'",
                attribute.name, attribute.data_type
            )));
        }
        field.binding = synthesize_attribute_binding(&attribute.binding);
        field.annotations = bucket_annotations(&attribute.annotations, &attribute.runtime_annotations);
        field.snippets = bucket_snippets(attribute.snippets.iter().chain(&attribute.runtime_snippets));
        field.property_change_support = java_se && attribute.property_change_support;
        field.vetoable_change_support = java_se && attribute.vetoable_change_support;
        Ok(field)
    }

    fn own_members(&self) -> ClassMembers {
        ClassMembers::of(self.class.attributes.iter().map(|a| a.name.clone()))
    }

    fn method_members(&mut self, members: &ClassMembers) -> Result<MethodMembers, GeneratorError> {
        let mut resolved = Vec::with_capacity(members.attributes.len());
        for name in &members.attributes {
            if resolved.iter().any(|m: &Member| &m.name == name) {
                return Err(self.invalid(format!("member '{}' is listed twice", name)));
            }
            let field = self.field(name)?;
            resolved.push(Member::new(name.clone(), field.category));
        }
        Ok(MethodMembers {
            members: resolved,
            pre_code: members.pre_code.clone(),
            post_code: members.post_code.clone(),
        })
    }

    fn declared_constructors(&mut self) -> Result<Vec<ConstructorArtifact>, GeneratorError> {
        let class = self.class;
        let mut constructors = Vec::new();
        for descriptor in class.constructors.iter().filter(|c| c.enabled) {
            let constructor = self.constructor(descriptor)?;
            if constructors
                .iter()
                .any(|existing: &ConstructorArtifact| same_signature(existing, &constructor))
            {
                return Err(self.invalid(format!(
                    "two constructors take the same parameters ({})",
                    descriptor.attributes.join(", ")
                )));
            }
            constructors.push(constructor);
        }
        Ok(constructors)
    }

    fn identity_constructors(&mut self, equality: &MethodMembers) -> Result<Vec<ConstructorArtifact>, GeneratorError> {
        let mut constructors = vec![self.constructor(&ConstructorDescriptor::no_args())?];
        if !equality.members.is_empty() {
            let names = equality.members.iter().map(|m| m.name.clone());
            constructors.push(self.constructor(&ConstructorDescriptor::new(names))?);
        }
        Ok(constructors)
    }

    fn constructor(&mut self, descriptor: &ConstructorDescriptor) -> Result<ConstructorArtifact, GeneratorError> {
        let mut inherited = Vec::new();
        let mut local = Vec::new();
        for name in &descriptor.attributes {
            let field = self.field(name)?;
            if field.declared {
                local.push(field);
            } else {
                inherited.push(field);
            }
        }
        let params = |fields: &[Arc<FieldArtifact>]| -> Vec<ConstructorParam> {
            fields
                .iter()
                .map(|f| ConstructorParam::new(&f.name, &f.data_type))
                .collect()
        };
        let fragment = synthesize_constructor(&self.class.name, descriptor.access, &params(&inherited), &params(&local))?;
        Ok(ConstructorArtifact {
            access: descriptor.access,
            inherited,
            local,
            fragment,
        })
    }

    fn visible_attribute_names(&self) -> Result<Vec<&'a str>, GeneratorError> {
        let ancestors = self.model.ancestors(self.class).map_err(|e| self.lookup(e))?;
        Ok(std::iter::once(self.class)
            .chain(ancestors)
            .flat_map(|c| c.attributes.iter().map(|a| a.name.as_str()))
            .collect())
    }

    /// The metamodel reference wins over the named external reference.
    fn superclass(&self) -> Result<Option<String>, GeneratorError> {
        if let Some(parent) = self.model.superclass_of(self.class).map_err(|e| self.lookup(e))? {
            return Ok(Some(parent.qualified_name(&self.model.package)));
        }
        Ok(self
            .class
            .superclass_ref
            .as_ref()
            .filter(|r| r.enabled && !r.name.trim().is_empty())
            .map(|r| r.name.clone()))
    }

    /// Global interfaces then the class's own, enabled only, first occurrence kept.
    ///
    /// Identifier classes take only their own interfaces.
    fn interfaces(&self) -> Vec<String> {
        let global = if self.class.kind.is_identifier() {
            &[][..]
        } else {
            self.model.interfaces.as_slice()
        };
        let mut interfaces: Vec<String> = Vec::new();
        for reference in global.iter().chain(&self.class.interfaces) {
            if reference.enabled && !interfaces.contains(&reference.name) {
                interfaces.push(reference.name.clone());
            }
        }
        interfaces
    }
}

/// `members` with the pre/post hooks taken from `hooks`.
fn with_hooks(members: &ClassMembers, hooks: &ClassMembers) -> ClassMembers {
    ClassMembers {
        attributes: members.attributes.clone(),
        pre_code: hooks.pre_code.clone(),
        post_code: hooks.post_code.clone(),
    }
}

fn same_signature(a: &ConstructorArtifact, b: &ConstructorArtifact) -> bool {
    let types = |c: &ConstructorArtifact| -> Vec<String> {
        c.inherited
            .iter()
            .chain(&c.local)
            .map(|f| f.data_type.clone())
            .collect()
    };
    types(a) == types(b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primes::FixedPrimes;
    use crate::test_utils::{entity_with, make_model};
    use orm_define::{
        AttributeMapping, ClassKind, ClassSnippetLocation, Constraint, ConstraintRule, ReferenceClass, Snippet,
    };

    fn assemble(model: &Metamodel, name: &str, options: &GenerationOptions) -> Result<ClassDefinition, GeneratorError> {
        let class = model.find_class(name).unwrap();
        ClassAssembler::new(model, class, options).assemble(&mut FixedPrimes::default())
    }

    #[test]
    fn shared_attribute_is_memoized_once() {
        let mut order = entity_with("Order", &[("id", "Long"), ("note", "String")]);
        order.constructors = vec![
            ConstructorDescriptor::new(["id"]),
            ConstructorDescriptor::new(["id", "note"]),
        ];
        let model = make_model(vec![order]);
        let definition = assemble(&model, "Order", &GenerationOptions::default()).unwrap();

        let id_fields: Vec<_> = definition.fields.iter().filter(|f| f.name == "id").collect();
        assert_eq!(id_fields.len(), 1);
        let first = &definition.constructors[0].local[0];
        let second = &definition.constructors[1].local[0];
        assert!(Arc::ptr_eq(first, second));
        assert!(Arc::ptr_eq(first, id_fields[0]));
    }

    #[test]
    fn constructor_partitions_inherited_parameters() {
        let base = {
            let mut base = entity_with("Base", &[("id", "Long")]);
            base.kind = ClassKind::MappedSuperclass;
            base
        };
        let mut employee = entity_with("Employee", &[("salary", "int")]);
        employee.superclass = Some("Base".into());
        employee.constructors = vec![ConstructorDescriptor::new(["id", "salary"])];
        let model = make_model(vec![base, employee]);

        let definition = assemble(&model, "Employee", &GenerationOptions::default()).unwrap();
        let ctor = &definition.constructors[0];
        assert_eq!(ctor.inherited[0].name, "id");
        assert_eq!(ctor.inherited[0].owner, "Base");
        assert_eq!(ctor.local[0].name, "salary");
        assert!(ctor.fragment.text().contains("super(id);"));
        assert_eq!(definition.superclass.as_deref(), Some("com.example.Base"));
        // Inherited attributes are parameters only, never declared fields.
        assert_eq!(definition.fields.len(), 1);
    }

    #[test]
    fn identifier_class_synthesizes_two_constructors() {
        let mut key = entity_with("OrderKey", &[("orderId", "long"), ("line", "int")]);
        key.kind = ClassKind::IdClass;
        let model = make_model(vec![key]);

        let definition = assemble(&model, "OrderKey", &GenerationOptions::default()).unwrap();
        assert_eq!(definition.constructors.len(), 2);
        assert_eq!(definition.constructors[0].arity(), 0);
        let names: Vec<_> = definition.constructors[1].local.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["orderId", "line"]);
        assert!(definition.equals_method.as_ref().unwrap().text().contains("this.line != other.line"));
        assert!(definition.hash_code_method.is_some());
        assert_eq!(
            definition.to_string_method.as_ref().unwrap().text(),
            r#"return "OrderKey{orderId=" + orderId + ", line=" + line + "}";"#
        );
        assert!(definition.persistence.is_empty());
    }

    #[test]
    fn identifier_class_keeps_user_to_string_hooks() {
        let mut key = entity_with("LineId", &[("line", "int")]);
        key.kind = ClassKind::EmbeddedId;
        key.to_string_method = ClassMembers {
            pre_code: Some("audit();".into()),
            ..Default::default()
        };
        let model = make_model(vec![key]);

        let definition = assemble(&model, "LineId", &GenerationOptions::default()).unwrap();
        let text = definition.to_string_method.unwrap();
        assert!(text.text().starts_with("audit();\n"));
        assert!(text.text().contains(r#""LineId{line=" + line + "}""#));
    }

    #[test]
    fn identifier_class_with_constructors_keeps_declared_members() {
        let mut key = entity_with("OrderKey", &[("orderId", "long")]);
        key.kind = ClassKind::EmbeddedId;
        key.constructors = vec![ConstructorDescriptor::new(["orderId"])];
        let model = make_model(vec![key]);

        let definition = assemble(&model, "OrderKey", &GenerationOptions::default()).unwrap();
        assert_eq!(definition.constructors.len(), 1);
        assert!(definition.equals_method.is_none());
    }

    #[test]
    fn import_snippets_are_normalized_and_ordered() {
        let mut order = entity_with("Order", &[]);
        order.snippets = vec![Snippet::new("com.example.Own", ClassSnippetLocation::Import)];
        order.runtime_snippets = vec![Snippet::new("import com.example.Runtime;", ClassSnippetLocation::Import)];
        let mut model = make_model(vec![order]);
        model.snippets = vec![Snippet::new("com.example.Global", ClassSnippetLocation::Import)];

        let definition = assemble(&model, "Order", &GenerationOptions::default()).unwrap();
        assert_eq!(
            definition.snippets[&ClassSnippetLocation::Import],
            [
                "import com.example.Global;",
                "import com.example.Own;",
                "import com.example.Runtime;"
            ]
        );
    }

    #[test]
    fn interfaces_merge_and_deduplicate() {
        let mut order = entity_with("Order", &[]);
        let mut disabled = ReferenceClass::new("com.example.Hidden");
        disabled.enabled = false;
        order.interfaces = vec![ReferenceClass::new("java.io.Serializable"), disabled];
        let mut model = make_model(vec![order]);
        model.interfaces = vec![ReferenceClass::new("java.io.Serializable"), ReferenceClass::new("com.example.Auditable")];

        let definition = assemble(&model, "Order", &GenerationOptions::default()).unwrap();
        assert_eq!(definition.interfaces, ["java.io.Serializable", "com.example.Auditable"]);
    }

    #[test]
    fn named_superclass_used_when_no_model_reference() {
        let mut order = entity_with("Order", &[]);
        order.superclass_ref = Some(ReferenceClass::new("com.lib.AbstractEntity"));
        let model = make_model(vec![order]);

        let definition = assemble(&model, "Order", &GenerationOptions::default()).unwrap();
        assert_eq!(definition.superclass.as_deref(), Some("com.lib.AbstractEntity"));
    }

    #[test]
    fn model_superclass_wins_over_named_reference() {
        let base = {
            let mut base = entity_with("Base", &[("id", "Long")]);
            base.kind = ClassKind::MappedSuperclass;
            base
        };
        let mut order = entity_with("Order", &[]);
        order.superclass = Some("Base".into());
        order.superclass_ref = Some(ReferenceClass::new("com.lib.AbstractEntity"));
        let model = make_model(vec![base, order]);

        let definition = assemble(&model, "Order", &GenerationOptions::default()).unwrap();
        assert_eq!(definition.superclass.as_deref(), Some("com.example.Base"));
        assert!(!definition.required_imports().contains("com.lib.AbstractEntity"));
    }

    #[test]
    fn synthesizer_failure_fails_the_class() {
        let mut order = entity_with("Order", &[]);
        order.attributes.push(Attribute::new("code", "String").with_constraint(Constraint::new(
            ConstraintRule::Digits {
                integer: Some(2),
                fraction: None,
            },
        )));
        let model = make_model(vec![order]);

        let err = assemble(&model, "Order", &GenerationOptions::default()).unwrap_err();
        assert!(matches!(err, GeneratorError::InvalidInput { ref class, .. } if class == "Order"));
    }

    #[test]
    fn unknown_member_is_invalid() {
        let mut order = entity_with("Order", &[("id", "Long")]);
        order.equals_method = ClassMembers::of(["id", "ghost"]);
        let model = make_model(vec![order]);

        let err = assemble(&model, "Order", &GenerationOptions::default()).unwrap_err();
        assert!(err.to_string().contains("ghost"));
    }

    #[test]
    fn duplicate_and_shadowed_attributes_are_invalid() {
        let mut twice = entity_with("Twice", &[("id", "Long"), ("id", "String")]);
        twice.attributes[0].mapping = AttributeMapping::id();
        let mut base = entity_with("Base", &[("id", "Long")]);
        base.kind = ClassKind::MappedSuperclass;
        let mut child = entity_with("Child", &[("id", "Long")]);
        child.superclass = Some("Base".into());
        let model = make_model(vec![twice, base, child]);

        assert!(assemble(&model, "Twice", &GenerationOptions::default()).is_err());
        assert!(assemble(&model, "Child", &GenerationOptions::default()).is_err());
    }

    #[test]
    fn change_support_requires_global_toggle() {
        let mut order = entity_with("Order", &[("total", "java.math.BigDecimal")]);
        order.attributes[0].property_change_support = true;
        let model = make_model(vec![order]);

        let off = assemble(&model, "Order", &GenerationOptions::default()).unwrap();
        assert!(!off.property_change_support());

        let options = GenerationOptions {
            java_se_support: true,
            ..Default::default()
        };
        let on = assemble(&model, "Order", &options).unwrap();
        assert!(on.property_change_support());
        assert!(!on.vetoable_change_support());
    }

    #[test]
    fn key_constraints_require_a_map() {
        let mut order = entity_with("Order", &[("tags", "java.util.List<String>")]);
        order.attributes[0].value_constraints = vec![Constraint::new(ConstraintRule::NotBlank)];
        let model = make_model(vec![order.clone()]);
        assert!(assemble(&model, "Order", &GenerationOptions::default()).is_ok());

        order.attributes[0].key_constraints = vec![Constraint::new(ConstraintRule::NotNull)];
        let model = make_model(vec![order]);
        assert!(assemble(&model, "Order", &GenerationOptions::default()).is_err());
    }

    #[test]
    fn identical_constructor_signatures_are_invalid() {
        let mut order = entity_with("Order", &[("a", "String"), ("b", "String")]);
        order.constructors = vec![ConstructorDescriptor::new(["a"]), ConstructorDescriptor::new(["b"])];
        let model = make_model(vec![order]);
        assert!(assemble(&model, "Order", &GenerationOptions::default()).is_err());
    }
}
