//! JSON-binding annotation synthesis.

use orm_define::{AttributeBinding, ClassBinding, FormatSpec, ReferenceClass};

use crate::errors::GeneratorError;
use crate::fragment::{AnnotationBuilder, Fragment, java_string};

pub const BINDING_PACKAGE: &str = "javax.json.bind.annotation";

fn annotation(name: &str, builder: AnnotationBuilder) -> Fragment {
    Fragment::new(builder.build()).with_import(format!("{}.{}", BINDING_PACKAGE, name))
}

fn format(name: &str, spec: &Option<FormatSpec>) -> Option<Fragment> {
    let spec = spec.as_ref().filter(|spec| !spec.is_empty())?;
    let mut builder = AnnotationBuilder::new(name);
    if let Some(value) = spec.value.as_deref().filter(|v| !v.trim().is_empty()) {
        builder = builder.quoted("value", value);
    }
    if let Some(locale) = spec.locale.as_deref().filter(|l| !l.trim().is_empty()) {
        builder = builder.quoted("locale", locale);
    }
    Some(annotation(name, builder))
}

fn type_reference(name: &str, reference: &Option<ReferenceClass>) -> Option<Fragment> {
    let reference = reference
        .as_ref()
        .filter(|r| r.enabled && !r.name.trim().is_empty())?;
    let builder = AnnotationBuilder::new(name).value(format!("{}.class", reference.simple_name()));
    Some(annotation(name, builder).with_import(reference.name.clone()))
}

/// Generates the binding annotations for one attribute.
///
/// `@JsonbTransient` is exclusive: when set, nothing else is emitted.
///
/// ```
/// use orm_define::{AttributeBinding, FormatSpec};
/// use orm_gen::codegen::synthesize_attribute_binding;
///
/// let binding = AttributeBinding {
///     property: Some("birth_date".into()),
///     date_format: Some(FormatSpec::pattern("yyyy-MM-dd")),
///     ..Default::default()
/// };
/// let texts: Vec<String> = synthesize_attribute_binding(&binding)
///     .iter()
///     .map(|f| f.text().to_string())
///     .collect();
/// assert_eq!(texts, [r#"@JsonbProperty("birth_date")"#, r#"@JsonbDateFormat(value="yyyy-MM-dd")"#]);
/// ```
pub fn synthesize_attribute_binding(binding: &AttributeBinding) -> Vec<Fragment> {
    if binding.transient {
        return vec![annotation("JsonbTransient", AnnotationBuilder::new("JsonbTransient"))];
    }

    let mut fragments = Vec::new();
    let property = binding.property.as_deref().filter(|p| !p.trim().is_empty());
    if property.is_some() || binding.nillable {
        let mut builder = AnnotationBuilder::new("JsonbProperty");
        builder = match (property, binding.nillable) {
            (Some(property), false) => builder.value(java_string(property)),
            (Some(property), true) => builder.quoted("value", property).arg("nillable", true),
            (None, _) => builder.arg("nillable", true),
        };
        fragments.push(annotation("JsonbProperty", builder));
    }
    fragments.extend(format("JsonbDateFormat", &binding.date_format));
    fragments.extend(format("JsonbNumberFormat", &binding.number_format));
    fragments.extend(type_reference("JsonbTypeAdapter", &binding.type_adapter));
    fragments.extend(type_reference("JsonbTypeDeserializer", &binding.type_deserializer));
    fragments.extend(type_reference("JsonbTypeSerializer", &binding.type_serializer));
    fragments
}

/// Generates the class-level binding annotations.
///
/// `visible` lists the attribute names the class can see; every name in the
/// property order must be one of them.
///
/// ## Errors
///
/// Returns [`GeneratorError::InvalidInput`] when the property order names an
/// unknown or repeated attribute.
pub fn synthesize_class_binding(
    class: &str,
    binding: &ClassBinding,
    visible: &[&str],
) -> Result<Vec<Fragment>, GeneratorError> {
    let mut fragments = Vec::new();
    if binding.nillable {
        fragments.push(annotation("JsonbNillable", AnnotationBuilder::new("JsonbNillable")));
    }
    if !binding.property_order.is_empty() {
        let mut seen: Vec<&str> = Vec::new();
        for name in &binding.property_order {
            if !visible.contains(&name.as_str()) {
                return Err(GeneratorError::invalid(
                    class,
                    format!("property order names unknown attribute '{}'", name),
                ));
            }
            if seen.contains(&name.as_str()) {
                return Err(GeneratorError::invalid(
                    class,
                    format!("property order lists '{}' twice", name),
                ));
            }
            seen.push(name.as_str());
        }
        let names: Vec<String> = seen.iter().map(|name| java_string(name)).collect();
        let builder = AnnotationBuilder::new("JsonbPropertyOrder").value(format!("{{{}}}", names.join(", ")));
        fragments.push(annotation("JsonbPropertyOrder", builder));
    }
    fragments.extend(format("JsonbDateFormat", &binding.date_format));
    fragments.extend(format("JsonbNumberFormat", &binding.number_format));
    fragments.extend(type_reference("JsonbTypeAdapter", &binding.type_adapter));
    fragments.extend(type_reference("JsonbTypeDeserializer", &binding.type_deserializer));
    fragments.extend(type_reference("JsonbTypeSerializer", &binding.type_serializer));
    fragments.extend(type_reference("JsonbVisibility", &binding.visibility));
    Ok(fragments)
}
