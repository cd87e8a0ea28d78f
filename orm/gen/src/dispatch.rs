//! Attribute-type dispatch for comparison and hashing expressions.
//!
//! [`TypeCategory`] is the single place that knows how a Java type is compared
//! and hashed. The equality and hash-code synthesizers ask it for expression
//! text and never inspect type names themselves.
//!
//! | Category   | Equality (differs)                          | Hash term                          |
//! |------------|---------------------------------------------|------------------------------------|
//! | primitive  | `this.x != other.x`                         | `this.x`, widened or folded        |
//! | floating   | bit-pattern `!=`                            | bit pattern folded to `int`        |
//! | array      | `!java.util.Arrays.equals(...)`             | `java.util.Arrays.hashCode(...)`   |
//! | object     | `!java.util.Objects.equals(...)`            | `java.util.Objects.hashCode(...)`  |
//!
//! Floating-point values compare by bit pattern so that `NaN` equals itself
//! and `0.0` differs from `-0.0`, keeping `equals` consistent with `hashCode`.

/// Primitive Java types other than the floating-point ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    Boolean,
    Byte,
    Char,
    Short,
    Int,
    Long,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Floating {
    Float,
    Double,
}

/// The comparison category of a declared Java type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeCategory {
    Primitive(Primitive),
    Floating(Floating),
    /// An array; `nested` for arrays of arrays.
    Array { nested: bool },
    /// Boxed primitives, strings, collections and any other reference type.
    Object,
}

impl TypeCategory {
    /// Classifies Java type text.
    ///
    /// ## Examples
    ///
    /// ```
    /// use orm_gen::dispatch::{Floating, Primitive, TypeCategory};
    ///
    /// assert_eq!(TypeCategory::classify("int"), TypeCategory::Primitive(Primitive::Int));
    /// assert_eq!(TypeCategory::classify("double"), TypeCategory::Floating(Floating::Double));
    /// assert_eq!(TypeCategory::classify("byte[]"), TypeCategory::Array { nested: false });
    /// assert_eq!(TypeCategory::classify("Integer"), TypeCategory::Object);
    /// assert_eq!(TypeCategory::classify("java.util.List<String>"), TypeCategory::Object);
    /// ```
    pub fn classify(java_type: &str) -> Self {
        let trimmed = java_type.trim();
        if let Some(element) = trimmed.strip_suffix("[]") {
            return TypeCategory::Array {
                nested: element.trim_end().ends_with("[]"),
            };
        }
        if trimmed.ends_with("...") {
            return TypeCategory::Array { nested: false };
        }
        match trimmed {
            "boolean" => TypeCategory::Primitive(Primitive::Boolean),
            "byte" => TypeCategory::Primitive(Primitive::Byte),
            "char" => TypeCategory::Primitive(Primitive::Char),
            "short" => TypeCategory::Primitive(Primitive::Short),
            "int" => TypeCategory::Primitive(Primitive::Int),
            "long" => TypeCategory::Primitive(Primitive::Long),
            "float" => TypeCategory::Floating(Floating::Float),
            "double" => TypeCategory::Floating(Floating::Double),
            _ => TypeCategory::Object,
        }
    }

    /// Expression that is true when `this.<field>` and `other.<field>` differ.
    ///
    /// ```
    /// use orm_gen::dispatch::TypeCategory;
    ///
    /// assert_eq!(TypeCategory::classify("long").differs("id"), "this.id != other.id");
    /// assert_eq!(
    ///     TypeCategory::classify("String").differs("name"),
    ///     "!java.util.Objects.equals(this.name, other.name)"
    /// );
    /// ```
    pub fn differs(self, field: &str) -> String {
        match self {
            TypeCategory::Primitive(_) => format!("this.{f} != other.{f}", f = field),
            TypeCategory::Floating(Floating::Float) => format!(
                "Float.floatToIntBits(this.{f}) != Float.floatToIntBits(other.{f})",
                f = field
            ),
            TypeCategory::Floating(Floating::Double) => format!(
                "Double.doubleToLongBits(this.{f}) != Double.doubleToLongBits(other.{f})",
                f = field
            ),
            TypeCategory::Array { nested: false } => {
                format!("!java.util.Arrays.equals(this.{f}, other.{f})", f = field)
            }
            TypeCategory::Array { nested: true } => {
                format!("!java.util.Arrays.deepEquals(this.{f}, other.{f})", f = field)
            }
            TypeCategory::Object => {
                format!("!java.util.Objects.equals(this.{f}, other.{f})", f = field)
            }
        }
    }

    /// The `int` contribution of `this.<field>` to a hash code.
    ///
    /// ```
    /// use orm_gen::dispatch::TypeCategory;
    ///
    /// assert_eq!(TypeCategory::classify("boolean").hash_term("active"), "(this.active ? 1 : 0)");
    /// assert_eq!(TypeCategory::classify("char[][]").hash_term("grid"), "java.util.Arrays.deepHashCode(this.grid)");
    /// ```
    pub fn hash_term(self, field: &str) -> String {
        match self {
            TypeCategory::Primitive(Primitive::Boolean) => format!("(this.{} ? 1 : 0)", field),
            TypeCategory::Primitive(Primitive::Long) => {
                format!("(int) (this.{f} ^ (this.{f} >>> 32))", f = field)
            }
            TypeCategory::Primitive(_) => format!("this.{}", field),
            TypeCategory::Floating(Floating::Float) => format!("Float.floatToIntBits(this.{})", field),
            TypeCategory::Floating(Floating::Double) => format!(
                "(int) (Double.doubleToLongBits(this.{f}) ^ (Double.doubleToLongBits(this.{f}) >>> 32))",
                f = field
            ),
            TypeCategory::Array { nested: false } => format!("java.util.Arrays.hashCode(this.{})", field),
            TypeCategory::Array { nested: true } => {
                format!("java.util.Arrays.deepHashCode(this.{})", field)
            }
            TypeCategory::Object => format!("java.util.Objects.hashCode(this.{})", field),
        }
    }
}

/// Splits the top-level generic arguments of a parameterized type.
///
/// Returns the text before `<` and the trimmed arguments, or `None` when the
/// type is not parameterized.
///
/// ```
/// use orm_gen::dispatch::type_arguments;
///
/// let (raw, args) = type_arguments("java.util.Map<String, java.util.List<Long>>").unwrap();
/// assert_eq!(raw, "java.util.Map");
/// assert_eq!(args, ["String", "java.util.List<Long>"]);
/// assert!(type_arguments("String").is_none());
/// ```
pub fn type_arguments(java_type: &str) -> Option<(&str, Vec<&str>)> {
    let trimmed = java_type.trim();
    let open = trimmed.find('<')?;
    let close = trimmed.rfind('>')?;
    if close < open {
        return None;
    }
    let inner = &trimmed[open + 1..close];
    let mut args = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (index, ch) in inner.char_indices() {
        match ch {
            '<' => depth += 1,
            '>' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                args.push(inner[start..index].trim());
                start = index + 1;
            }
            _ => {}
        }
    }
    args.push(inner[start..].trim());
    Some((&trimmed[..open], args))
}
