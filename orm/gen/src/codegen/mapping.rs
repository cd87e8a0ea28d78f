//! Persistence annotation synthesis for classes and attributes.
//!
//! Only managed kinds (entities, embeddables, mapped superclasses and
//! embedded identifiers) are annotated. `@IdClass` key classes and beans are
//! plain Java.

use orm_define::{Attribute, AttributeMapping, ClassDescriptor, ClassKind, Column, Convert, EnumType, Relation};

use crate::errors::GeneratorError;
use crate::fragment::{AnnotationBuilder, Fragment};
use crate::options::GenerationOptions;

pub const PERSISTENCE_PACKAGE: &str = "javax.persistence";

const COLUMN_LENGTH_DEFAULT: u32 = 255;

fn persistence(name: &str) -> String {
    format!("{}.{}", PERSISTENCE_PACKAGE, name)
}

fn annotation(name: &str, builder: AnnotationBuilder) -> Fragment {
    Fragment::new(builder.build()).with_import(persistence(name))
}

fn marker(name: &str) -> Fragment {
    annotation(name, AnnotationBuilder::new(name))
}

/// Generates the kind annotations of a class.
///
/// ```
/// use orm_define::{ClassDescriptor, ClassKind};
/// use orm_gen::codegen::synthesize_class_mapping;
///
/// let mut order = ClassDescriptor::new("Order", ClassKind::Entity);
/// order.table = Some("ORDERS".into());
/// let texts: Vec<String> = synthesize_class_mapping(&order)
///     .iter()
///     .map(|f| f.text().to_string())
///     .collect();
/// assert_eq!(texts, ["@Entity", r#"@Table(name="ORDERS")"#]);
///
/// assert!(synthesize_class_mapping(&ClassDescriptor::new("Dto", ClassKind::Bean)).is_empty());
/// ```
pub fn synthesize_class_mapping(class: &ClassDescriptor) -> Vec<Fragment> {
    match class.kind {
        ClassKind::Entity => {
            let mut fragments = vec![marker("Entity")];
            if let Some(table) = class.table.as_deref().filter(|t| !t.trim().is_empty()) {
                fragments.push(annotation("Table", AnnotationBuilder::new("Table").quoted("name", table)));
            }
            fragments
        }
        ClassKind::MappedSuperclass => vec![marker("MappedSuperclass")],
        ClassKind::Embeddable | ClassKind::EmbeddedId => vec![marker("Embeddable")],
        ClassKind::IdClass | ClassKind::Bean => Vec::new(),
    }
}

/// Generates the persistence annotations of one attribute declared on a class
/// of `kind`.
///
/// ## Errors
///
/// Returns [`GeneratorError::InvalidInput`] when settings contradict the
/// mapping: `mappedBy` on a `@ManyToOne`, `optional` on a to-many relation,
/// or column-level settings on a relationship, embedded or transient
/// attribute.
pub fn synthesize_attribute_mapping(
    class: &str,
    kind: ClassKind,
    attribute: &Attribute,
    options: &GenerationOptions,
) -> Result<Vec<Fragment>, GeneratorError> {
    if !kind.is_managed() {
        return Ok(Vec::new());
    }
    let invalid = |reason: &str| GeneratorError::invalid(class, format!("attribute '{}': {}", attribute.name, reason));
    let defaults = options.generate_default_values;
    let mut fragments = Vec::new();

    let columnar = match &attribute.mapping {
        AttributeMapping::Id { generated } => {
            fragments.push(marker("Id"));
            if let Some(strategy) = generated {
                let builder = AnnotationBuilder::new("GeneratedValue").arg("strategy", format!("GenerationType.{}", strategy));
                fragments.push(annotation("GeneratedValue", builder).with_import(persistence("GenerationType")));
            }
            true
        }
        AttributeMapping::Basic => {
            if defaults {
                fragments.push(marker("Basic"));
            }
            true
        }
        AttributeMapping::Version => {
            fragments.push(marker("Version"));
            true
        }
        AttributeMapping::ElementCollection { fetch } => {
            let mut builder = AnnotationBuilder::new("ElementCollection");
            let mut fragment_imports = Vec::new();
            if let Some(fetch) = fetch {
                builder = builder.arg("fetch", format!("FetchType.{}", fetch));
                fragment_imports.push(persistence("FetchType"));
            }
            fragments.push(annotation("ElementCollection", builder).with_imports(fragment_imports));
            true
        }
        AttributeMapping::Transient => {
            fragments.push(marker("Transient"));
            false
        }
        AttributeMapping::Embedded => {
            fragments.push(marker("Embedded"));
            false
        }
        AttributeMapping::EmbeddedId => {
            fragments.push(marker("EmbeddedId"));
            false
        }
        AttributeMapping::OneToOne(relation) => {
            fragments.push(relationship("OneToOne", relation, true, true));
            false
        }
        AttributeMapping::ManyToOne(relation) => {
            if relation.mapped_by.is_some() {
                return Err(invalid("@ManyToOne is always the owning side and cannot be mappedBy"));
            }
            fragments.push(relationship("ManyToOne", relation, true, false));
            false
        }
        AttributeMapping::OneToMany(relation) | AttributeMapping::ManyToMany(relation) => {
            if relation.optional.is_some() {
                return Err(invalid("to-many relationships have no 'optional' setting"));
            }
            let name = if matches!(attribute.mapping, AttributeMapping::OneToMany(_)) {
                "OneToMany"
            } else {
                "ManyToMany"
            };
            fragments.push(relationship(name, relation, false, true));
            false
        }
    };

    let has_column_settings = attribute.column.is_some()
        || attribute.lob
        || attribute.temporal.is_some()
        || attribute.enumerated.is_some();
    if has_column_settings && !columnar {
        return Err(invalid("column settings apply only to basic, id, version and element-collection attributes"));
    }

    if let Some(column) = &attribute.column {
        fragments.push(column_annotation(column, defaults));
    }
    if attribute.lob {
        fragments.push(marker("Lob"));
    }
    if let Some(temporal) = attribute.temporal {
        let builder = AnnotationBuilder::new("Temporal").value(format!("TemporalType.{}", temporal));
        fragments.push(annotation("Temporal", builder).with_import(persistence("TemporalType")));
    }
    if let Some(enumerated) = attribute.enumerated {
        if enumerated == EnumType::Ordinal && !defaults {
            fragments.push(marker("Enumerated"));
        } else {
            let builder = AnnotationBuilder::new("Enumerated").value(format!("EnumType.{}", enumerated));
            fragments.push(annotation("Enumerated", builder).with_import(persistence("EnumType")));
        }
    }
    if let Some(convert) = &attribute.convert {
        fragments.push(convert_annotation(convert, defaults));
    }
    Ok(fragments)
}

fn relationship(name: &str, relation: &Relation, allows_optional: bool, allows_mapped_by: bool) -> Fragment {
    let mut builder = AnnotationBuilder::new(name);
    let mut imports = Vec::new();
    if allows_mapped_by && let Some(mapped_by) = relation.mapped_by.as_deref() {
        builder = builder.quoted("mappedBy", mapped_by);
    }
    if allows_optional && let Some(optional) = relation.optional {
        builder = builder.arg("optional", optional);
    }
    if let Some(fetch) = relation.fetch {
        builder = builder.arg("fetch", format!("FetchType.{}", fetch));
        imports.push(persistence("FetchType"));
    }
    annotation(name, builder).with_imports(imports)
}

fn column_annotation(column: &Column, defaults: bool) -> Fragment {
    let mut builder = AnnotationBuilder::new("Column");
    if let Some(name) = column.name.as_deref().filter(|n| !n.trim().is_empty()) {
        builder = builder.quoted("name", name);
    }
    let nullable = column.nullable.unwrap_or(true);
    if defaults || !nullable {
        builder = builder.arg("nullable", nullable);
    }
    let unique = column.unique.unwrap_or(false);
    if defaults || unique {
        builder = builder.arg("unique", unique);
    }
    let length = column.length.unwrap_or(COLUMN_LENGTH_DEFAULT);
    if defaults || length != COLUMN_LENGTH_DEFAULT {
        builder = builder.arg("length", length);
    }
    annotation("Column", builder)
}

fn convert_annotation(convert: &Convert, defaults: bool) -> Fragment {
    let mut builder = AnnotationBuilder::new("Convert");
    let mut imports = Vec::new();
    if let Some(converter) = convert.converter.as_deref().filter(|c| !c.trim().is_empty()) {
        let simple = converter.rsplit('.').next().unwrap_or(converter);
        builder = builder.arg("converter", format!("{}.class", simple));
        imports.push(converter.to_string());
    }
    if defaults || convert.disable_conversion {
        builder = builder.arg("disableConversion", convert.disable_conversion);
    }
    if let Some(attribute_name) = convert.attribute_name.as_deref().filter(|a| !a.trim().is_empty()) {
        builder = builder.quoted("attributeName", attribute_name);
    }
    annotation("Convert", builder).with_imports(imports)
}

#[cfg(test)]
mod tests {
    use super::*;
    use orm_define::{FetchType, GenerationStrategy, TemporalType};

    fn texts(class_kind: ClassKind, attribute: &Attribute, options: &GenerationOptions) -> Vec<String> {
        synthesize_attribute_mapping("Owner", class_kind, attribute, options)
            .unwrap()
            .iter()
            .map(|f| f.text().to_string())
            .collect()
    }

    fn explicit() -> GenerationOptions {
        GenerationOptions {
            generate_default_values: true,
            ..Default::default()
        }
    }

    #[test]
    fn generated_id_imports_generation_type() {
        let id = Attribute::new("id", "Long").with_mapping(AttributeMapping::Id {
            generated: Some(GenerationStrategy::Identity),
        });
        let fragments =
            synthesize_attribute_mapping("Owner", ClassKind::Entity, &id, &GenerationOptions::default()).unwrap();

        assert_eq!(fragments[0].text(), "@Id");
        assert_eq!(fragments[1].text(), "@GeneratedValue(strategy=GenerationType.IDENTITY)");
        assert!(fragments[1].imports().contains(&"javax.persistence.GenerationType".to_string()));
    }

    #[test]
    fn basic_is_implicit_unless_defaults_requested() {
        let name = Attribute::new("name", "String");
        assert!(texts(ClassKind::Entity, &name, &GenerationOptions::default()).is_empty());
        assert_eq!(texts(ClassKind::Entity, &name, &explicit()), ["@Basic"]);
    }

    #[test]
    fn beans_and_id_classes_are_unannotated() {
        let id = Attribute::new("id", "Long").with_mapping(AttributeMapping::id());
        assert!(texts(ClassKind::Bean, &id, &explicit()).is_empty());
        assert!(texts(ClassKind::IdClass, &id, &explicit()).is_empty());
        assert_eq!(texts(ClassKind::EmbeddedId, &id, &GenerationOptions::default()), ["@Id"]);
    }

    #[test]
    fn column_defaults_follow_toggle() {
        let mut name = Attribute::new("name", "String");
        name.column = Some(Column {
            name: Some("FULL_NAME".into()),
            nullable: Some(false),
            ..Default::default()
        });
        assert_eq!(
            texts(ClassKind::Entity, &name, &GenerationOptions::default()),
            [r#"@Column(name="FULL_NAME", nullable=false)"#]
        );
        assert_eq!(
            texts(ClassKind::Entity, &name, &explicit()),
            ["@Basic", r#"@Column(name="FULL_NAME", nullable=false, unique=false, length=255)"#]
        );
    }

    #[test]
    fn temporal_and_enumerated() {
        let mut born = Attribute::new("born", "java.util.Date");
        born.temporal = Some(TemporalType::Date);
        assert_eq!(
            texts(ClassKind::Entity, &born, &GenerationOptions::default()),
            ["@Temporal(TemporalType.DATE)"]
        );

        let mut status = Attribute::new("status", "Status");
        status.enumerated = Some(EnumType::Ordinal);
        assert_eq!(texts(ClassKind::Entity, &status, &GenerationOptions::default()), ["@Enumerated"]);
        assert_eq!(
            texts(ClassKind::Entity, &status, &explicit()),
            ["@Basic", "@Enumerated(EnumType.ORDINAL)"]
        );
    }

    #[test]
    fn relation_arguments() {
        let items = Attribute::new("items", "java.util.List<Item>").with_mapping(AttributeMapping::OneToMany(Relation {
            mapped_by: Some("order".into()),
            optional: None,
            fetch: Some(FetchType::Lazy),
        }));
        assert_eq!(
            texts(ClassKind::Entity, &items, &GenerationOptions::default()),
            [r#"@OneToMany(mappedBy="order", fetch=FetchType.LAZY)"#]
        );

        let customer = Attribute::new("customer", "Customer").with_mapping(AttributeMapping::ManyToOne(Relation {
            optional: Some(false),
            ..Default::default()
        }));
        assert_eq!(
            texts(ClassKind::Entity, &customer, &GenerationOptions::default()),
            ["@ManyToOne(optional=false)"]
        );
    }

    #[test]
    fn contradictory_settings_are_invalid() {
        let mapped = Attribute::new("customer", "Customer").with_mapping(AttributeMapping::ManyToOne(Relation {
            mapped_by: Some("orders".into()),
            ..Default::default()
        }));
        assert!(synthesize_attribute_mapping("Order", ClassKind::Entity, &mapped, &GenerationOptions::default()).is_err());

        let mut transient = Attribute::new("cache", "String").with_mapping(AttributeMapping::Transient);
        transient.column = Some(Column::default());
        assert!(matches!(
            synthesize_attribute_mapping("Order", ClassKind::Entity, &transient, &GenerationOptions::default()),
            Err(GeneratorError::InvalidInput { .. })
        ));
    }

    #[test]
    fn convert_follows_toggle() {
        let mut amount = Attribute::new("amount", "Money");
        amount.convert = Some(Convert {
            converter: Some("com.example.MoneyConverter".into()),
            disable_conversion: false,
            attribute_name: None,
        });
        let fragments =
            synthesize_attribute_mapping("Order", ClassKind::Entity, &amount, &GenerationOptions::default()).unwrap();
        assert_eq!(fragments[0].text(), "@Convert(converter=MoneyConverter.class)");
        assert!(fragments[0].imports().contains(&"com.example.MoneyConverter".to_string()));

        let texts = texts(ClassKind::Entity, &amount, &explicit());
        assert_eq!(texts[1], "@Convert(converter=MoneyConverter.class, disableConversion=false)");
    }

    #[test]
    fn class_kinds() {
        let kinds = |kind| {
            synthesize_class_mapping(&ClassDescriptor::new("X", kind))
                .iter()
                .map(|f| f.text().to_string())
                .collect::<Vec<_>>()
        };
        assert_eq!(kinds(ClassKind::MappedSuperclass), ["@MappedSuperclass"]);
        assert_eq!(kinds(ClassKind::Embeddable), ["@Embeddable"]);
        assert_eq!(kinds(ClassKind::EmbeddedId), ["@Embeddable"]);
        assert!(kinds(ClassKind::IdClass).is_empty());
    }
}
