//! User snippets and annotations, bucketed by where they go.
//!
//! Contents are opaque. The only rewrite is for snippets at an import
//! location, which become complete import statements.

use std::collections::BTreeMap;

use orm_define::{Annotation, AnnotationLocation, Snippet, SnippetLocation};

/// Turns a raw import snippet into a complete import statement.
///
/// Idempotent: an already complete statement comes back unchanged.
///
/// ```
/// use orm_gen::codegen::normalize_import;
///
/// assert_eq!(normalize_import("com.example.Foo"), "import com.example.Foo;");
/// assert_eq!(normalize_import("import com.example.Foo;"), "import com.example.Foo;");
/// assert_eq!(normalize_import("  import static java.util.Objects.hash "), "import static java.util.Objects.hash;");
/// ```
pub fn normalize_import(raw: &str) -> String {
    let trimmed = raw.trim();
    let mut statement = if trimmed.starts_with("import ") {
        trimmed.to_string()
    } else {
        format!("import {}", trimmed)
    };
    if !statement.ends_with(';') {
        statement.push(';');
    }
    statement
}

/// Groups enabled snippets by location, preserving the order they arrive in.
///
/// Callers pass sources already concatenated in precedence order.
pub fn bucket_snippets<'a, L, I>(snippets: I) -> BTreeMap<L, Vec<String>>
where
    L: SnippetLocation + 'a,
    I: IntoIterator<Item = &'a Snippet<L>>,
{
    let mut buckets: BTreeMap<L, Vec<String>> = BTreeMap::new();
    for snippet in snippets.into_iter().filter(|s| s.enabled) {
        if snippet.value.trim().is_empty() {
            continue;
        }
        let value = if snippet.location.is_import() {
            normalize_import(&snippet.value)
        } else {
            snippet.value.clone()
        };
        buckets.entry(snippet.location).or_default().push(value);
    }
    buckets
}

/// Merges design-time and runtime annotations by location, enabled only.
///
/// Within a location, design-time annotations come first. A missing leading
/// `@` is added.
///
/// ```
/// use orm_define::{Annotation, ClassAnnotationLocation};
/// use orm_gen::codegen::bucket_annotations;
///
/// let design = vec![Annotation::new("Cacheable", ClassAnnotationLocation::Type)];
/// let runtime = vec![Annotation::new("@Audited", ClassAnnotationLocation::Type)];
/// let merged = bucket_annotations(&design, &runtime);
/// assert_eq!(merged[&ClassAnnotationLocation::Type], ["@Cacheable", "@Audited"]);
/// ```
pub fn bucket_annotations<L: AnnotationLocation>(
    design: &[Annotation<L>],
    runtime: &[Annotation<L>],
) -> BTreeMap<L, Vec<String>> {
    let mut buckets: BTreeMap<L, Vec<String>> = BTreeMap::new();
    for annotation in design.iter().chain(runtime).filter(|a| a.enabled) {
        let text = annotation.name.trim();
        if text.is_empty() {
            continue;
        }
        let text = if text.starts_with('@') {
            text.to_string()
        } else {
            format!("@{}", text)
        };
        buckets.entry(annotation.location).or_default().push(text);
    }
    buckets
}
