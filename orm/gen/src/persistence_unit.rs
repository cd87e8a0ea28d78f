//! `persistence.xml` descriptor for the entities of a run.

use std::path::{Path, PathBuf};

use orm_define::ClassKind;
use quick_xml::se::Serializer;
use serde::Serialize;
use tracing::info;

use crate::errors::GeneratorError;
use crate::output::write_atomic;
use crate::registry::GenerationRegistry;

/// Location of the descriptor below an output root.
pub const DESCRIPTOR_PATH: &str = "META-INF/persistence.xml";

const XML_DECLARATION: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>";
const PERSISTENCE_NS: &str = "http://xmlns.jcp.org/xml/ns/persistence";
const XSI_NS: &str = "http://www.w3.org/2001/XMLSchema-instance";
const SCHEMA_LOCATION: &str =
    "http://xmlns.jcp.org/xml/ns/persistence http://xmlns.jcp.org/xml/ns/persistence/persistence_2_2.xsd";

#[derive(Debug, Serialize)]
#[serde(rename = "persistence")]
struct PersistenceDocument<'a> {
    #[serde(rename = "@version")]
    version: &'a str,
    #[serde(rename = "@xmlns")]
    xmlns: &'a str,
    #[serde(rename = "@xmlns:xsi")]
    xmlns_xsi: &'a str,
    #[serde(rename = "@xsi:schemaLocation")]
    schema_location: &'a str,
    #[serde(rename = "persistence-unit")]
    unit: PersistenceUnit<'a>,
}

#[derive(Debug, Serialize)]
struct PersistenceUnit<'a> {
    #[serde(rename = "@name")]
    name: &'a str,
    #[serde(rename = "@transaction-type")]
    transaction_type: &'a str,
    class: Vec<String>,
    #[serde(rename = "exclude-unlisted-classes")]
    exclude_unlisted_classes: bool,
}

/// Renders a descriptor listing every registered entity in registration order.
///
/// ## Examples
///
/// ```
/// use orm_gen::persistence_unit::render_persistence_unit;
/// use orm_gen::registry::GenerationRegistry;
///
/// let xml = render_persistence_unit("shop", &GenerationRegistry::new()).unwrap();
/// assert!(xml.contains(r#"<persistence-unit name="shop" transaction-type="RESOURCE_LOCAL">"#));
/// assert!(xml.contains("<exclude-unlisted-classes>true</exclude-unlisted-classes>"));
/// ```
///
/// ## Errors
///
/// Returns [`GeneratorError::XmlError`] when the descriptor cannot be serialized.
pub fn render_persistence_unit(name: &str, registry: &GenerationRegistry) -> Result<String, GeneratorError> {
    let document = PersistenceDocument {
        version: "2.2",
        xmlns: PERSISTENCE_NS,
        xmlns_xsi: XSI_NS,
        schema_location: SCHEMA_LOCATION,
        unit: PersistenceUnit {
            name,
            transaction_type: "RESOURCE_LOCAL",
            class: registry
                .artifacts_of(ClassKind::Entity)
                .iter()
                .map(|entity| entity.qualified_name())
                .collect(),
            exclude_unlisted_classes: true,
        },
    };

    let mut body = String::new();
    let mut serializer = Serializer::new(&mut body);
    serializer.indent(' ', 2);
    document.serialize(serializer)?;

    Ok(format!("{}\n{}\n", XML_DECLARATION, body))
}

/// Writes the descriptor to `<root>/META-INF/persistence.xml`.
///
/// Returns the written path, or `None` in dry-run mode, where the descriptor
/// is printed instead.
///
/// ## Errors
///
/// Returns [`GeneratorError::WriteError`] when the file cannot be written and
/// [`GeneratorError::XmlError`] when the descriptor cannot be serialized.
pub fn write_persistence_unit(
    root: &Path,
    name: &str,
    registry: &GenerationRegistry,
    dry_run: bool,
) -> Result<Option<PathBuf>, GeneratorError> {
    let xml = render_persistence_unit(name, registry)?;
    let path = root.join(DESCRIPTOR_PATH);
    if dry_run {
        println!("=== {} ===\n{}", path.display(), xml);
        return Ok(None);
    }
    write_atomic(&path, &xml)?;
    info!(path = %path.display(), unit = name, "Wrote persistence unit");
    Ok(Some(path))
}
