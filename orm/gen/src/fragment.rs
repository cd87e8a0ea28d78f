//! The atomic unit of generated source.
//!
//! A [`Fragment`] is a self-contained piece of Java text (an annotation, a
//! constructor, a method body) plus the fully-qualified names it needs
//! imported. Fragments are immutable once built; assembling a class only
//! collects them.

use std::fmt;

/// A piece of generated source and the symbols it requires.
///
/// ## Examples
///
/// ```
/// use orm_gen::fragment::Fragment;
///
/// let fragment = Fragment::new("@NotNull")
///     .with_import("javax.validation.constraints.NotNull")
///     .with_import("javax.validation.constraints.NotNull");
///
/// assert_eq!(fragment.text(), "@NotNull");
/// assert_eq!(fragment.imports(), ["javax.validation.constraints.NotNull"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    text: String,
    imports: Vec<String>,
}

impl Fragment {
    /// Creates a fragment with no imports.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            imports: Vec::new(),
        }
    }

    /// Adds a required import; duplicates are ignored.
    pub fn with_import(mut self, symbol: impl Into<String>) -> Self {
        let symbol = symbol.into();
        if !self.imports.contains(&symbol) {
            self.imports.push(symbol);
        }
        self
    }

    /// Adds several required imports.
    pub fn with_imports<I, S>(self, symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        symbols
            .into_iter()
            .fold(self, |fragment, symbol| fragment.with_import(symbol))
    }

    /// The generated source text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Fully-qualified names this fragment needs imported.
    pub fn imports(&self) -> &[String] {
        &self.imports
    }
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Builds annotation text of the form `@Name(key=value, ...)`.
///
/// An annotation with no arguments renders bare, without parentheses.
///
/// ```
/// use orm_gen::fragment::AnnotationBuilder;
///
/// let bare = AnnotationBuilder::new("Embeddable").build();
/// assert_eq!(bare, "@Embeddable");
///
/// let sized = AnnotationBuilder::new("Size")
///     .arg("min", 1)
///     .quoted("message", "say \"hi\"")
///     .build();
/// assert_eq!(sized, r#"@Size(min=1, message="say \"hi\"")"#);
/// ```
#[derive(Debug, Clone)]
pub struct AnnotationBuilder {
    name: String,
    args: Vec<String>,
}

impl AnnotationBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: Vec::new(),
        }
    }

    /// Adds a `key=value` argument written verbatim.
    pub fn arg(mut self, key: &str, value: impl fmt::Display) -> Self {
        self.args.push(format!("{}={}", key, value));
        self
    }

    /// Adds a `key="value"` argument with Java string escaping.
    pub fn quoted(mut self, key: &str, value: &str) -> Self {
        self.args.push(format!("{}={}", key, java_string(value)));
        self
    }

    /// Adds an unnamed single-value argument, e.g. `@Temporal(TemporalType.DATE)`.
    pub fn value(mut self, value: impl fmt::Display) -> Self {
        self.args.push(value.to_string());
        self
    }

    pub fn build(self) -> String {
        if self.args.is_empty() {
            format!("@{}", self.name)
        } else {
            format!("@{}({})", self.name, self.args.join(", "))
        }
    }
}

/// Renders `value` as a Java string literal.
///
/// ```
/// use orm_gen::fragment::java_string;
///
/// assert_eq!(java_string(r"\d+"), r#""\\d+""#);
/// assert_eq!(java_string("a\nb"), r#""a\nb""#);
/// ```
pub fn java_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for ch in value.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            other => out.push(other),
        }
    }
    out.push('"');
    out
}

/// Returns the simple name of a possibly qualified Java type.
pub fn simple_name(qualified: &str) -> &str {
    qualified.rsplit('.').next().unwrap_or(qualified)
}

/// Returns true for a syntactically valid Java identifier.
pub fn is_java_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' || first == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn imports_keep_first_seen_order() {
        let fragment = Fragment::new("x").with_imports(["b.B", "a.A", "b.B"]);
        assert_eq!(fragment.imports(), ["b.B", "a.A"]);
    }

    #[test]
    fn display_writes_text_only() {
        let fragment = Fragment::new("@Id").with_import("javax.persistence.Id");
        assert_eq!(fragment.to_string(), "@Id");
    }

    #[test]
    fn builder_value_and_args_mix() {
        let text = AnnotationBuilder::new("Enumerated").value("EnumType.STRING").build();
        assert_eq!(text, "@Enumerated(EnumType.STRING)");
    }

    #[test]
    fn identifiers() {
        assert!(is_java_identifier("name"));
        assert!(is_java_identifier("_id$2"));
        assert!(!is_java_identifier("2nd"));
        assert!(!is_java_identifier("first-name"));
        assert!(!is_java_identifier(""));
    }

    #[test]
    fn simple_names() {
        assert_eq!(simple_name("java.util.List"), "List");
        assert_eq!(simple_name("Local"), "Local");
    }
}
