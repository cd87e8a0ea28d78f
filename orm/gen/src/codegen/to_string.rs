//! `toString()` body synthesis.

use crate::codegen::{MethodMembers, check_identifiers};
use crate::errors::GeneratorError;
use crate::fragment::Fragment;

/// Generates the body of `toString()` as `ClassName{a=<a>, b=<b>}`.
///
/// Formatting is the same for every attribute type, so member categories are
/// ignored.
///
/// ```
/// use orm_gen::codegen::{Member, MethodMembers, synthesize_to_string};
/// use orm_gen::dispatch::TypeCategory;
///
/// let members = MethodMembers::new(vec![
///     Member::new("name", TypeCategory::Object),
///     Member::new("age", TypeCategory::classify("int")),
/// ]);
/// let body = synthesize_to_string("Person", &members).unwrap().unwrap();
/// assert_eq!(body.text(), r#"return "Person{name=" + name + ", age=" + age + "}";"#);
/// ```
///
/// ## Errors
///
/// Returns [`GeneratorError::InvalidInput`] when the class or a member name is
/// not a Java identifier.
pub fn synthesize_to_string(class_name: &str, members: &MethodMembers) -> Result<Option<Fragment>, GeneratorError> {
    if members.is_empty() {
        return Ok(None);
    }
    check_identifiers(class_name, members)?;

    let mut expression = format!("\"{}{{", class_name);
    for (index, member) in members.members.iter().enumerate() {
        let separator = if index == 0 { "" } else { ", " };
        expression.push_str(&format!("{}{}=\" + {} + \"", separator, member.name, member.name));
    }
    expression.push_str("}\"");

    let mut lines = Vec::new();
    if let Some(pre) = members.pre_code() {
        lines.push(pre.to_string());
    }
    if let Some(post) = members.post_code() {
        lines.push(post.to_string());
    }
    lines.push(format!("return {};", expression));

    Ok(Some(Fragment::new(lines.join("\n"))))
}
