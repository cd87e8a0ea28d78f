//! Java source rendering for assembled class definitions.
//!
//! Rendering never fails: every check happens during assembly. The renderer
//! only lays fragments and snippets out at their insertion points.

use std::collections::BTreeSet;

use orm_define::{AttributeAnnotationLocation, AttributeSnippetLocation, ClassAnnotationLocation, ClassSnippetLocation};

use crate::dispatch::{Primitive, TypeCategory, type_arguments};
use crate::definition::{ClassDefinition, FieldArtifact};
use crate::fragment::{Fragment, simple_name};

const INDENT: &str = "    ";

/// Renders a complete `.java` compilation unit.
///
/// ## Examples
///
/// ```
/// use orm_define::{Attribute, ClassDescriptor, ClassKind, Metamodel};
/// use orm_gen::assembler::ClassAssembler;
/// use orm_gen::options::GenerationOptions;
/// use orm_gen::primes::FixedPrimes;
/// use orm_gen::render::render_class;
///
/// let mut tag = ClassDescriptor::new("Tag", ClassKind::Embeddable);
/// tag.attributes.push(Attribute::new("label", "String"));
/// let mut model = Metamodel::new("com.example");
/// model.classes.push(tag);
///
/// let options = GenerationOptions::default();
/// let definition = ClassAssembler::new(&model, &model.classes[0], &options)
///     .assemble(&mut FixedPrimes::default())
///     .unwrap();
/// let source = render_class(&definition);
///
/// assert!(source.starts_with("package com.example;\n"));
/// assert!(source.contains("import javax.persistence.Embeddable;"));
/// assert!(source.contains("@Embeddable\npublic class Tag {"));
/// assert!(source.contains("    private String label;"));
/// assert!(source.contains("    public String getLabel() {"));
/// ```
pub fn render_class(definition: &ClassDefinition) -> String {
    let mut out = Writer::default();

    out.snippets(0, definition.snippets.get(&ClassSnippetLocation::BeforePackage));
    if !definition.package.is_empty() {
        out.line(0, &format!("package {};", definition.package));
        out.blank();
    }

    let imports = import_statements(definition);
    if !imports.is_empty() {
        for statement in &imports {
            out.line(0, statement);
        }
        out.blank();
    }

    out.snippets(0, definition.snippets.get(&ClassSnippetLocation::TypeJavadoc));
    out.snippets(0, definition.snippets.get(&ClassSnippetLocation::BeforeClass));
    for fragment in definition.persistence.iter().chain(&definition.binding) {
        out.line(0, fragment.text());
    }
    out.snippets(0, definition.annotations.get(&ClassAnnotationLocation::Type));
    out.line(0, &class_header(definition));

    let mut body = Body::default();

    let mut fields = Writer::default();
    fields.snippets(1, definition.snippets.get(&ClassSnippetLocation::BeforeField));
    if definition.property_change_support() {
        fields.line(
            1,
            "private final transient PropertyChangeSupport propertyChangeSupport = new PropertyChangeSupport(this);",
        );
    }
    if definition.vetoable_change_support() {
        fields.line(
            1,
            "private final transient VetoableChangeSupport vetoableChangeSupport = new VetoableChangeSupport(this);",
        );
    }
    for (index, field) in definition.fields.iter().enumerate() {
        if index > 0 {
            fields.blank();
        }
        render_field(&mut fields, field);
    }
    fields.snippets(1, definition.snippets.get(&ClassSnippetLocation::AfterField));
    body.section(fields);

    for constructor in &definition.constructors {
        let mut section = Writer::default();
        section.block(1, constructor.fragment.text());
        body.section(section);
    }

    let before_method = definition.snippets.get(&ClassSnippetLocation::BeforeMethod);
    if before_method.is_some() {
        let mut section = Writer::default();
        section.snippets(1, before_method);
        body.section(section);
    }
    for field in &definition.fields {
        let mut getter = Writer::default();
        render_getter(&mut getter, field);
        body.section(getter);
        let mut setter = Writer::default();
        render_setter(&mut setter, field);
        body.section(setter);
    }
    for (signature, method) in [
        ("public boolean equals(Object obj)", &definition.equals_method),
        ("public int hashCode()", &definition.hash_code_method),
        ("public String toString()", &definition.to_string_method),
    ] {
        if let Some(method) = method {
            body.section(method_section(signature, method));
        }
    }
    render_listener_methods(&mut body, definition);
    let after_method = definition.snippets.get(&ClassSnippetLocation::AfterMethod);
    if after_method.is_some() {
        let mut section = Writer::default();
        section.snippets(1, after_method);
        body.section(section);
    }

    out.push_body(body);
    out.line(0, "}");
    out.snippets(0, definition.snippets.get(&ClassSnippetLocation::AfterClass));
    out.finish()
}

/// Sorted, deduplicated import statements for the class.
fn import_statements(definition: &ClassDefinition) -> BTreeSet<String> {
    let mut statements: BTreeSet<String> = definition
        .required_imports()
        .into_iter()
        .map(|symbol| format!("import {};", symbol))
        .collect();
    let field_imports = definition
        .fields
        .iter()
        .filter_map(|f| f.snippets.get(&AttributeSnippetLocation::Import))
        .flatten();
    let class_imports = definition
        .snippets
        .get(&ClassSnippetLocation::Import)
        .into_iter()
        .flatten();
    statements.extend(class_imports.chain(field_imports).cloned());
    statements
}

fn class_header(definition: &ClassDefinition) -> String {
    let mut header = String::from("public ");
    if definition.is_abstract {
        header.push_str("abstract ");
    }
    header.push_str("class ");
    header.push_str(&definition.name);
    if let Some(superclass) = definition.superclass_simple_name() {
        header.push_str(" extends ");
        header.push_str(superclass);
    }
    if !definition.interfaces.is_empty() {
        let names: Vec<&str> = definition.interfaces.iter().map(|i| simple_name(i)).collect();
        header.push_str(" implements ");
        header.push_str(&names.join(", "));
    }
    header.push_str(" {");
    header
}

fn render_field(out: &mut Writer, field: &FieldArtifact) {
    if let Some(description) = field.description.as_deref().filter(|d| !d.trim().is_empty()) {
        out.line(1, "/**");
        for line in description.lines() {
            out.line(1, format!(" * {}", line).trim_end());
        }
        out.line(1, " */");
    }
    out.snippets(1, field.snippets.get(&AttributeSnippetLocation::PropertyJavadoc));
    out.snippets(1, field.snippets.get(&AttributeSnippetLocation::BeforeProperty));
    for fragment in field.persistence.iter().chain(&field.constraints).chain(&field.binding) {
        out.line(1, fragment.text());
    }
    out.snippets(1, field.annotations.get(&AttributeAnnotationLocation::Property));

    let mut declaration = format!("{}{} {}", field.access.prefix(), declared_type(field), field.name);
    if let Some(default) = field.default_value.as_deref().filter(|d| !d.trim().is_empty()) {
        declaration.push_str(" = ");
        declaration.push_str(default.trim());
    }
    declaration.push(';');
    out.line(1, &declaration);
    out.snippets(1, field.snippets.get(&AttributeSnippetLocation::AfterProperty));
}

/// The field type with key/value constraints placed as type-use annotations.
fn declared_type(field: &FieldArtifact) -> String {
    if field.key_constraints.is_empty() && field.value_constraints.is_empty() {
        return field.data_type.clone();
    }
    let Some((raw, args)) = type_arguments(&field.data_type) else {
        return field.data_type.clone();
    };
    let annotate = |constraints: &[Fragment], arg: &str| -> String {
        let mut annotated: Vec<&str> = constraints.iter().map(Fragment::text).collect();
        annotated.push(arg);
        annotated.join(" ")
    };
    let rendered: Vec<String> = match args.as_slice() {
        [key, value] => vec![
            annotate(field.key_constraints.as_slice(), key),
            annotate(field.value_constraints.as_slice(), value),
        ],
        [value] => vec![annotate(field.value_constraints.as_slice(), value)],
        other => other.iter().map(|a| a.to_string()).collect(),
    };
    format!("{}<{}>", raw, rendered.join(", "))
}

fn capitalized(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn render_getter(out: &mut Writer, field: &FieldArtifact) {
    let prefix = if field.category == TypeCategory::Primitive(Primitive::Boolean) {
        "is"
    } else {
        "get"
    };
    out.snippets(1, field.snippets.get(&AttributeSnippetLocation::GetterJavadoc));
    out.snippets(1, field.snippets.get(&AttributeSnippetLocation::BeforeGetter));
    out.snippets(1, field.annotations.get(&AttributeAnnotationLocation::Getter));
    out.line(
        1,
        &format!("public {} {}{}() {{", field.data_type, prefix, capitalized(&field.name)),
    );
    out.snippets(2, field.snippets.get(&AttributeSnippetLocation::PreGetter));
    out.snippets(2, field.snippets.get(&AttributeSnippetLocation::PostGetter));
    out.line(2, &format!("return this.{};", field.name));
    out.line(1, "}");
    out.snippets(1, field.snippets.get(&AttributeSnippetLocation::AfterGetter));
}

fn render_setter(out: &mut Writer, field: &FieldArtifact) {
    let name = &field.name;
    let old = format!("old{}", capitalized(name));
    let throws = if field.vetoable_change_support {
        " throws PropertyVetoException"
    } else {
        ""
    };
    out.snippets(1, field.snippets.get(&AttributeSnippetLocation::SetterJavadoc));
    out.snippets(1, field.snippets.get(&AttributeSnippetLocation::BeforeSetter));
    out.snippets(1, field.annotations.get(&AttributeAnnotationLocation::Setter));
    out.line(
        1,
        &format!(
            "public void set{}({} {}){} {{",
            capitalized(name),
            field.data_type,
            name,
            throws
        ),
    );
    out.snippets(2, field.snippets.get(&AttributeSnippetLocation::PreSetter));
    let fires = field.property_change_support || field.vetoable_change_support;
    if fires {
        out.line(2, &format!("{} {} = this.{};", field.data_type, old, name));
    }
    if field.vetoable_change_support {
        out.line(
            2,
            &format!("vetoableChangeSupport.fireVetoableChange(\"{}\", {}, {});", name, old, name),
        );
    }
    out.line(2, &format!("this.{n} = {n};", n = name));
    if field.property_change_support {
        out.line(
            2,
            &format!("propertyChangeSupport.firePropertyChange(\"{}\", {}, {});", name, old, name),
        );
    }
    out.snippets(2, field.snippets.get(&AttributeSnippetLocation::PostSetter));
    out.line(1, "}");
    out.snippets(1, field.snippets.get(&AttributeSnippetLocation::AfterSetter));
}

fn method_section(signature: &str, body: &Fragment) -> Writer {
    let mut section = Writer::default();
    section.line(1, "@Override");
    section.line(1, &format!("{} {{", signature));
    section.block(2, body.text());
    section.line(1, "}");
    section
}

fn render_listener_methods(body: &mut Body, definition: &ClassDefinition) {
    let mut pairs = Vec::new();
    if definition.property_change_support() {
        pairs.push(("PropertyChangeListener", "propertyChangeSupport"));
    }
    if definition.vetoable_change_support() {
        pairs.push(("VetoableChangeListener", "vetoableChangeSupport"));
    }
    for (listener, support) in pairs {
        for verb in ["add", "remove"] {
            let mut section = Writer::default();
            section.line(1, &format!("public void {}{}({} listener) {{", verb, listener, listener));
            section.line(2, &format!("{}.{}{}(listener);", support, verb, listener));
            section.line(1, "}");
            body.section(section);
        }
    }
}

/// Line-oriented text builder with four-space indentation.
#[derive(Default)]
struct Writer {
    lines: Vec<String>,
}

impl Writer {
    fn line(&mut self, depth: usize, text: &str) {
        if text.is_empty() {
            self.lines.push(String::new());
        } else {
            self.lines.push(format!("{}{}", INDENT.repeat(depth), text));
        }
    }

    fn blank(&mut self) {
        self.lines.push(String::new());
    }

    /// Writes multi-line text, indenting every line.
    fn block(&mut self, depth: usize, text: &str) {
        for line in text.lines() {
            self.line(depth, line);
        }
    }

    fn snippets(&mut self, depth: usize, snippets: Option<&Vec<String>>) {
        for snippet in snippets.into_iter().flatten() {
            self.block(depth, snippet);
        }
    }

    fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    fn push_body(&mut self, body: Body) {
        for (index, section) in body.sections.into_iter().enumerate() {
            if index > 0 {
                self.blank();
            }
            self.lines.extend(section.lines);
        }
    }

    fn finish(self) -> String {
        let mut text = self.lines.join("\n");
        text.push('\n');
        text
    }
}

/// Class body sections, separated by blank lines when rendered.
#[derive(Default)]
struct Body {
    sections: Vec<Writer>,
}

impl Body {
    fn section(&mut self, section: Writer) {
        if !section.is_empty() {
            self.sections.push(section);
        }
    }
}

/// Directory path, relative to the output root, for a package.
pub fn package_path(package: &str) -> String {
    package.replace('.', "/")
}
