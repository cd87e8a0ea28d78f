//! Bean-validation annotation synthesis.
//!
//! One rule kind maps to one annotation. Optional arguments equal to their
//! defaults are left out unless [`GenerationOptions::generate_default_values`]
//! is set, in which case they are written explicitly.

use orm_define::{Constraint, ConstraintRule};

use crate::errors::GeneratorError;
use crate::fragment::{AnnotationBuilder, Fragment};
use crate::options::GenerationOptions;

/// Package holding every constraint annotation.
pub const CONSTRAINTS_PACKAGE: &str = "javax.validation.constraints";

const SIZE_MAX_DEFAULT: u32 = i32::MAX as u32;

/// Generates the annotation for one constraint on `class.attribute`.
///
/// Unselected constraints and empty ones (required option entirely absent)
/// produce `Ok(None)`.
///
/// ## Examples
///
/// ```
/// use orm_define::{Constraint, ConstraintRule};
/// use orm_gen::codegen::synthesize_constraint;
/// use orm_gen::options::GenerationOptions;
///
/// let options = GenerationOptions::default();
/// let size = Constraint::new(ConstraintRule::Size { min: Some(2), max: None })
///     .with_message("too short");
///
/// let fragment = synthesize_constraint("User", "login", &size, &options).unwrap().unwrap();
/// assert_eq!(fragment.text(), r#"@Size(min=2, message="too short")"#);
/// assert_eq!(fragment.imports(), ["javax.validation.constraints.Size"]);
/// ```
///
/// ## Errors
///
/// Returns [`GeneratorError::InvalidInput`] for a partially configured
/// `Digits`, an inverted or out-of-range `Size`, or a `DecimalMin`/`DecimalMax`
/// value that is not a decimal number.
pub fn synthesize_constraint(
    class: &str,
    attribute: &str,
    constraint: &Constraint,
    options: &GenerationOptions,
) -> Result<Option<Fragment>, GeneratorError> {
    if !constraint.selected || constraint.is_empty() {
        return Ok(None);
    }
    let invalid = |reason: String| GeneratorError::invalid(class, format!("attribute '{}': {}", attribute, reason));
    let defaults = options.generate_default_values;
    let name = constraint.rule.annotation_name();
    let mut builder = AnnotationBuilder::new(name);

    match &constraint.rule {
        ConstraintRule::Min { value } | ConstraintRule::Max { value } => {
            if let Some(value) = value {
                builder = builder.arg("value", value);
            }
        }
        ConstraintRule::DecimalMin { value, inclusive } | ConstraintRule::DecimalMax { value, inclusive } => {
            if let Some(value) = value.as_deref().map(str::trim) {
                if !is_decimal(value) {
                    return Err(invalid(format!("@{} value '{}' is not a decimal number", name, value)));
                }
                builder = builder.quoted("value", value);
            }
            let inclusive = inclusive.unwrap_or(true);
            if defaults || !inclusive {
                builder = builder.arg("inclusive", inclusive);
            }
        }
        ConstraintRule::Size { min, max } => {
            if let (Some(min), Some(max)) = (min, max)
                && min > max
            {
                return Err(invalid(format!("@Size min {} exceeds max {}", min, max)));
            }
            for (key, value, default) in [("min", *min, 0), ("max", *max, SIZE_MAX_DEFAULT)] {
                if value.is_some_and(|v| v > SIZE_MAX_DEFAULT) {
                    return Err(invalid(format!("@Size {} does not fit in an int", key)));
                }
                match value {
                    Some(v) if v != default || defaults => builder = builder.arg(key, v),
                    None if defaults => builder = builder.arg(key, default),
                    _ => {}
                }
            }
        }
        ConstraintRule::Digits { integer, fraction } => match (integer, fraction) {
            (Some(integer), Some(fraction)) => {
                builder = builder.arg("integer", integer).arg("fraction", fraction);
            }
            _ => return Err(invalid("@Digits needs both integer and fraction".to_string())),
        },
        ConstraintRule::Pattern { regexp, flags } => {
            if let Some(regexp) = regexp {
                builder = builder.quoted("regexp", regexp);
            }
            if !flags.is_empty() {
                let flags: Vec<String> = flags.iter().map(|f| format!("Pattern.Flag.{}", f)).collect();
                builder = builder.arg("flags", format!("{{{}}}", flags.join(", ")));
            } else if defaults {
                builder = builder.arg("flags", "{}");
            }
        }
        ConstraintRule::Email { regexp } => match regexp.as_deref().filter(|r| !r.is_empty()) {
            Some(regexp) => builder = builder.quoted("regexp", regexp),
            None if defaults => builder = builder.quoted("regexp", ".*"),
            None => {}
        },
        _ => {}
    }

    if let Some(message) = &constraint.message {
        builder = builder.quoted("message", message);
    }

    Ok(Some(
        Fragment::new(builder.build()).with_import(format!("{}.{}", CONSTRAINTS_PACKAGE, name)),
    ))
}

/// Generates annotations for every emitted constraint in `constraints`, in order.
///
/// ## Errors
///
/// Fails on the first malformed constraint; see [`synthesize_constraint`].
pub fn synthesize_constraints(
    class: &str,
    attribute: &str,
    constraints: &[Constraint],
    options: &GenerationOptions,
) -> Result<Vec<Fragment>, GeneratorError> {
    let mut fragments = Vec::new();
    for constraint in constraints {
        if let Some(fragment) = synthesize_constraint(class, attribute, constraint, options)? {
            fragments.push(fragment);
        }
    }
    Ok(fragments)
}

/// Accepts the literal forms `java.math.BigDecimal` parses: sign, digits,
/// optional fraction, optional exponent.
fn is_decimal(text: &str) -> bool {
    let unsigned = text.strip_prefix(['+', '-']).unwrap_or(text);
    let (mantissa, exponent) = match unsigned.split_once(['e', 'E']) {
        Some((mantissa, exponent)) => (mantissa, Some(exponent)),
        None => (unsigned, None),
    };
    let (whole, fraction) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    let digits = |s: &str| s.chars().all(|c| c.is_ascii_digit());
    let mantissa_ok = (!whole.is_empty() || !fraction.is_empty()) && digits(whole) && digits(fraction);
    let exponent_ok = exponent.is_none_or(|e| {
        let e = e.strip_prefix(['+', '-']).unwrap_or(e);
        !e.is_empty() && digits(e)
    });
    mantissa_ok && exponent_ok
}
