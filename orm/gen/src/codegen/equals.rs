//! `equals(Object)` body synthesis.

use crate::codegen::{MethodMembers, check_identifiers};
use crate::errors::GeneratorError;
use crate::fragment::Fragment;

/// Generates the body of `equals(Object obj)` for `class_name`.
///
/// Returns `Ok(None)` when `members` is empty and both hooks are blank, so the
/// method is omitted rather than generated with an empty body.
///
/// ## Examples
///
/// ```
/// use orm_gen::codegen::{Member, MethodMembers, synthesize_equals};
/// use orm_gen::dispatch::TypeCategory;
///
/// let members = MethodMembers::new(vec![Member::new("age", TypeCategory::classify("int"))]);
/// let body = synthesize_equals("Person", &members).unwrap().unwrap();
///
/// assert!(body.text().contains("final Person other = (Person) obj;"));
/// assert!(body.text().contains("if (this.age != other.age) {"));
/// assert!(body.text().ends_with("return true;"));
/// assert!(body.imports().is_empty());
///
/// assert!(synthesize_equals("Person", &MethodMembers::default()).unwrap().is_none());
/// ```
///
/// ## Errors
///
/// Returns [`GeneratorError::InvalidInput`] when the class or a member name is
/// not a Java identifier.
pub fn synthesize_equals(class_name: &str, members: &MethodMembers) -> Result<Option<Fragment>, GeneratorError> {
    if members.is_empty() {
        return Ok(None);
    }
    check_identifiers(class_name, members)?;

    let mut lines = vec![
        "if (obj == null) {".to_string(),
        "    return false;".to_string(),
        "}".to_string(),
        "if (getClass() != obj.getClass()) {".to_string(),
        "    return false;".to_string(),
        "}".to_string(),
        format!("final {c} other = ({c}) obj;", c = class_name),
    ];
    if let Some(pre) = members.pre_code() {
        lines.push(pre.to_string());
    }
    for member in &members.members {
        lines.push(format!("if ({}) {{", member.category.differs(&member.name)));
        lines.push("    return false;".to_string());
        lines.push("}".to_string());
    }
    if let Some(post) = members.post_code() {
        lines.push(post.to_string());
    }
    lines.push("return true;".to_string());

    Ok(Some(Fragment::new(lines.join("\n"))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codegen::Member;
    use crate::dispatch::TypeCategory;
    use proptest::prelude::*;

    fn member(name: &str, java_type: &str) -> Member {
        Member::new(name, TypeCategory::classify(java_type))
    }

    #[test]
    fn name_and_age_use_their_categories() {
        let members = MethodMembers::new(vec![member("name", "String"), member("age", "int")]);
        let text = synthesize_equals("Person", &members).unwrap().unwrap().text().to_string();

        let name_at = text
            .find("if (!java.util.Objects.equals(this.name, other.name)) {")
            .unwrap();
        let age_at = text.find("if (this.age != other.age) {").unwrap();
        assert!(name_at < age_at);
    }

    #[test]
    fn hooks_wrap_member_checks() {
        let members = MethodMembers {
            members: vec![member("id", "long")],
            pre_code: Some("  // pre  ".into()),
            post_code: Some("// post".into()),
        };
        let text = synthesize_equals("Order", &members).unwrap().unwrap().text().to_string();

        let pre = text.find("// pre").unwrap();
        let check = text.find("this.id != other.id").unwrap();
        let post = text.find("// post").unwrap();
        assert!(pre < check && check < post);
        assert!(text.ends_with("return true;"));
    }

    #[test]
    fn hooks_alone_still_produce_a_method() {
        let members = MethodMembers {
            pre_code: Some("audit();".into()),
            ..Default::default()
        };
        let text = synthesize_equals("Order", &members).unwrap().unwrap().text().to_string();
        assert!(text.contains("audit();"));
        assert_eq!(text.matches("return true;").count(), 1);
    }

    #[test]
    fn invalid_class_name_fails() {
        let members = MethodMembers::new(vec![member("id", "long")]);
        assert!(matches!(
            synthesize_equals("Not A Class", &members),
            Err(GeneratorError::InvalidInput { .. })
        ));
    }

    proptest! {
        #[test]
        fn one_check_per_member_in_order(names in prop::collection::btree_set("[a-z][a-zA-Z0-9]{0,8}", 1..8)) {
            let names: Vec<String> = names.into_iter().collect();
            let members = MethodMembers::new(
                names.iter().map(|n| Member::new(n.clone(), TypeCategory::Object)).collect(),
            );
            let text = synthesize_equals("Thing", &members).unwrap().unwrap().text().to_string();

            let checks: Vec<&str> = text
                .lines()
                .filter(|line| line.starts_with("if (!java.util.Objects.equals(this."))
                .collect();
            prop_assert_eq!(checks.len(), names.len());
            for (line, name) in checks.iter().zip(&names) {
                let expected = format!("if (!java.util.Objects.equals(this.{n}, other.{n})) {{", n = name);
                prop_assert_eq!(*line, expected.as_str());
            }
            prop_assert_eq!(text.matches("return true;").count(), 1);
            prop_assert!(text.ends_with("return true;"));
        }
    }
}
