//! Bean-validation constraint definitions.
//!
//! A [`Constraint`] pairs a [`ConstraintRule`] with the settings shared by every
//! rule (selection flag and message). Rules carry their own options.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr};

/// A validation constraint configured on an attribute.
///
/// ## Examples
///
/// ```
/// use orm_define::{Constraint, ConstraintRule};
///
/// let size = Constraint::new(ConstraintRule::Size { min: Some(1), max: Some(64) });
/// assert!(size.selected);
/// assert!(!size.is_empty());
///
/// let min = Constraint::new(ConstraintRule::Min { value: None });
/// assert!(min.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Constraint {
    /// Unselected constraints are kept in the model but never emitted.
    #[serde(default = "selected")]
    pub selected: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(flatten)]
    pub rule: ConstraintRule,
}

impl Constraint {
    /// Creates a selected constraint without a message.
    pub fn new(rule: ConstraintRule) -> Self {
        Self {
            selected: true,
            message: None,
            rule,
        }
    }

    /// Sets the violation message.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Returns true when the rule's required options are all absent.
    ///
    /// Empty constraints carry nothing worth emitting and are skipped. A rule
    /// with only part of its required options is not empty; it is malformed.
    pub fn is_empty(&self) -> bool {
        match &self.rule {
            ConstraintRule::Min { value } | ConstraintRule::Max { value } => value.is_none(),
            ConstraintRule::DecimalMin { value, .. } | ConstraintRule::DecimalMax { value, .. } => {
                value.as_deref().is_none_or(|v| v.trim().is_empty())
            }
            ConstraintRule::Digits { integer, fraction } => integer.is_none() && fraction.is_none(),
            ConstraintRule::Pattern { regexp, .. } => {
                regexp.as_deref().is_none_or(|r| r.is_empty())
            }
            _ => false,
        }
    }
}

/// The validation rule kinds with their options.
///
/// The static name of each variant is the annotation name.
///
/// ```
/// use orm_define::ConstraintRule;
///
/// let name: &'static str = (&ConstraintRule::NotBlank).into();
/// assert_eq!(name, "NotBlank");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, IntoStaticStr)]
#[serde(tag = "kind")]
pub enum ConstraintRule {
    NotNull,
    Null,
    AssertTrue,
    AssertFalse,
    NotEmpty,
    NotBlank,
    Positive,
    PositiveOrZero,
    Negative,
    NegativeOrZero,
    Past,
    PastOrPresent,
    Future,
    FutureOrPresent,
    Min {
        #[serde(default)]
        value: Option<i64>,
    },
    Max {
        #[serde(default)]
        value: Option<i64>,
    },
    DecimalMin {
        #[serde(default)]
        value: Option<String>,
        #[serde(default)]
        inclusive: Option<bool>,
    },
    DecimalMax {
        #[serde(default)]
        value: Option<String>,
        #[serde(default)]
        inclusive: Option<bool>,
    },
    Size {
        #[serde(default)]
        min: Option<u32>,
        #[serde(default)]
        max: Option<u32>,
    },
    Digits {
        #[serde(default)]
        integer: Option<u32>,
        #[serde(default)]
        fraction: Option<u32>,
    },
    Pattern {
        #[serde(default)]
        regexp: Option<String>,
        #[serde(default)]
        flags: Vec<PatternFlag>,
    },
    Email {
        #[serde(default)]
        regexp: Option<String>,
    },
}

impl ConstraintRule {
    /// Returns the annotation simple name for this rule.
    pub fn annotation_name(&self) -> &'static str {
        self.into()
    }
}

/// Regular-expression flags accepted by `@Pattern`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum PatternFlag {
    UnixLines,
    CaseInsensitive,
    Comments,
    Multiline,
    Dotall,
    UnicodeCase,
    CanonEq,
}

fn selected() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn annotation_names_match_variants() {
        assert_eq!(ConstraintRule::NotNull.annotation_name(), "NotNull");
        assert_eq!(
            ConstraintRule::DecimalMax {
                value: None,
                inclusive: None
            }
            .annotation_name(),
            "DecimalMax"
        );
        assert_eq!(ConstraintRule::Email { regexp: None }.annotation_name(), "Email");
    }

    #[test]
    fn deserializes_flattened_rule() {
        let json = r#"{ "kind": "Size", "max": 20, "message": "too long" }"#;
        let constraint: Constraint = serde_json::from_str(json).unwrap();

        assert!(constraint.selected);
        assert_eq!(constraint.message.as_deref(), Some("too long"));
        assert_eq!(constraint.rule, ConstraintRule::Size { min: None, max: Some(20) });
    }

    #[test]
    fn empty_only_when_required_options_absent() {
        assert!(!Constraint::new(ConstraintRule::NotNull).is_empty());
        assert!(Constraint::new(ConstraintRule::Max { value: None }).is_empty());
        assert!(!Constraint::new(ConstraintRule::Max { value: Some(3) }).is_empty());
        assert!(
            Constraint::new(ConstraintRule::DecimalMin {
                value: Some("  ".into()),
                inclusive: Some(false)
            })
            .is_empty()
        );
        assert!(
            !Constraint::new(ConstraintRule::Digits {
                integer: Some(3),
                fraction: None
            })
            .is_empty()
        );
        assert!(
            Constraint::new(ConstraintRule::Pattern {
                regexp: None,
                flags: vec![]
            })
            .is_empty()
        );
    }

    #[test]
    fn pattern_flag_display() {
        assert_eq!(PatternFlag::CaseInsensitive.to_string(), "CASE_INSENSITIVE");
        assert_eq!(PatternFlag::Dotall.to_string(), "DOTALL");
    }
}
