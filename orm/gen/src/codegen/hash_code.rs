//! `hashCode()` body synthesis.

use crate::codegen::{MethodMembers, check_identifiers};
use crate::errors::GeneratorError;
use crate::fragment::Fragment;
use crate::primes::PrimeSource;

/// Generates the body of `hashCode()` for `class_name`.
///
/// The seed and multiplier come from `primes`, which is consulted once per
/// generated method; the policy for choosing them belongs to the caller.
///
/// ## Examples
///
/// ```
/// use orm_gen::codegen::{Member, MethodMembers, synthesize_hash_code};
/// use orm_gen::dispatch::TypeCategory;
/// use orm_gen::primes::FixedPrimes;
///
/// let members = MethodMembers::new(vec![Member::new("id", TypeCategory::classify("Long"))]);
/// let body = synthesize_hash_code("Order", &members, &mut FixedPrimes::default())
///     .unwrap()
///     .unwrap();
///
/// assert_eq!(
///     body.text(),
///     "int hash = 7;\nhash = 31 * hash + java.util.Objects.hashCode(this.id);\nreturn hash;"
/// );
/// ```
///
/// ## Errors
///
/// Returns [`GeneratorError::InvalidInput`] when the class or a member name is
/// not a Java identifier.
pub fn synthesize_hash_code(
    class_name: &str,
    members: &MethodMembers,
    primes: &mut dyn PrimeSource,
) -> Result<Option<Fragment>, GeneratorError> {
    if members.is_empty() {
        return Ok(None);
    }
    check_identifiers(class_name, members)?;

    let primes = primes.next_primes();
    let mut lines = vec![format!("int hash = {};", primes.seed)];
    if let Some(pre) = members.pre_code() {
        lines.push(pre.to_string());
    }
    for member in &members.members {
        lines.push(format!(
            "hash = {} * hash + {};",
            primes.multiplier,
            member.category.hash_term(&member.name)
        ));
    }
    if let Some(post) = members.post_code() {
        lines.push(post.to_string());
    }
    lines.push("return hash;".to_string());

    Ok(Some(Fragment::new(lines.join("\n"))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codegen::Member;
    use crate::dispatch::TypeCategory;
    use crate::primes::{FixedPrimes, HashPrimes};

    #[test]
    fn one_contribution_per_member() {
        let members = MethodMembers::new(vec![
            Member::new("name", TypeCategory::classify("String")),
            Member::new("age", TypeCategory::classify("int")),
        ]);
        let mut primes = FixedPrimes(HashPrimes { seed: 3, multiplier: 53 });
        let text = synthesize_hash_code("Person", &members, &mut primes)
            .unwrap()
            .unwrap()
            .text()
            .to_string();

        assert!(text.starts_with("int hash = 3;"));
        assert!(text.contains("hash = 53 * hash + java.util.Objects.hashCode(this.name);"));
        assert!(text.contains("hash = 53 * hash + this.age;"));
        assert_eq!(text.matches("hash = 53 * hash").count(), 2);
        assert!(text.ends_with("return hash;"));
    }

    #[test]
    fn omitted_when_empty() {
        let result = synthesize_hash_code("Person", &MethodMembers::default(), &mut FixedPrimes::default()).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn empty_members_do_not_consume_primes() {
        struct Panicking;
        impl PrimeSource for Panicking {
            fn next_primes(&mut self) -> HashPrimes {
                panic!("primes drawn for an omitted method");
            }
        }
        assert!(
            synthesize_hash_code("Person", &MethodMembers::default(), &mut Panicking)
                .unwrap()
                .is_none()
        );
    }

    #[test]
    fn post_hook_precedes_return() {
        let members = MethodMembers {
            members: vec![Member::new("flag", TypeCategory::classify("boolean"))],
            pre_code: None,
            post_code: Some("hash ^= 1;".into()),
        };
        let text = synthesize_hash_code("Flagged", &members, &mut FixedPrimes::default())
            .unwrap()
            .unwrap()
            .text()
            .to_string();
        assert!(text.ends_with("hash ^= 1;\nreturn hash;"));
        assert!(text.contains("(this.flag ? 1 : 0)"));
    }
}
