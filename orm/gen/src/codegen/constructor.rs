//! Constructor declaration synthesis.

use orm_define::AccessModifier;

use crate::errors::GeneratorError;
use crate::fragment::{Fragment, is_java_identifier};

/// One constructor parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstructorParam {
    pub name: String,
    pub data_type: String,
}

impl ConstructorParam {
    pub fn new(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: data_type.into(),
        }
    }
}

/// Generates a complete constructor declaration.
///
/// Parameters list the `inherited` group first, passed on through `super(...)`,
/// followed by the `local` group, assigned to fields directly.
///
/// ```
/// use orm_define::AccessModifier;
/// use orm_gen::codegen::{ConstructorParam, synthesize_constructor};
///
/// let ctor = synthesize_constructor(
///     "Employee",
///     AccessModifier::Public,
///     &[ConstructorParam::new("id", "Long")],
///     &[ConstructorParam::new("salary", "int")],
/// )
/// .unwrap();
///
/// assert_eq!(
///     ctor.text(),
///     "public Employee(Long id, int salary) {\n    super(id);\n    this.salary = salary;\n}"
/// );
/// ```
///
/// ## Errors
///
/// Returns [`GeneratorError::InvalidInput`] when a parameter name is not an
/// identifier or appears twice.
pub fn synthesize_constructor(
    class: &str,
    access: AccessModifier,
    inherited: &[ConstructorParam],
    local: &[ConstructorParam],
) -> Result<Fragment, GeneratorError> {
    let mut names: Vec<&str> = Vec::new();
    for param in inherited.iter().chain(local) {
        if !is_java_identifier(&param.name) {
            return Err(GeneratorError::invalid(
                class,
                format!("constructor parameter '{}' is not a valid identifier", param.name),
            ));
        }
        if names.contains(&param.name.as_str()) {
            return Err(GeneratorError::invalid(
                class,
                format!("constructor assigns '{}' more than once", param.name),
            ));
        }
        names.push(&param.name);
    }

    let params: Vec<String> = inherited
        .iter()
        .chain(local)
        .map(|p| format!("{} {}", p.data_type, p.name))
        .collect();
    let mut lines = vec![format!("{}{}({}) {{", access.prefix(), class, params.join(", "))];
    if !inherited.is_empty() {
        let args: Vec<&str> = inherited.iter().map(|p| p.name.as_str()).collect();
        lines.push(format!("    super({});", args.join(", ")));
    }
    for param in local {
        lines.push(format!("    this.{n} = {n};", n = param.name));
    }
    lines.push("}".to_string());

    Ok(Fragment::new(lines.join("\n")))
}
