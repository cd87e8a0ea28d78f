//! Loading metamodel snapshots from JSON.

use std::path::Path;

use orm_define::Metamodel;
use tracing::debug;

use crate::errors::GeneratorError;

/// Parses a metamodel from JSON text.
///
/// ## Errors
///
/// Returns [`GeneratorError::ParseError`] when the text is not a valid metamodel.
pub fn parse_metamodel(json: &str) -> Result<Metamodel, GeneratorError> {
    serde_json::from_str(json).map_err(|e| GeneratorError::ParseError(e.to_string()))
}

/// Reads and parses a metamodel file.
///
/// ## Errors
///
/// Returns [`GeneratorError::ParseError`] when the file cannot be read or
/// does not hold a valid metamodel.
pub fn load_metamodel(path: &Path) -> Result<Metamodel, GeneratorError> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| GeneratorError::ParseError(format!("cannot read {}: {}", path.display(), e)))?;
    let model = parse_metamodel(&text)
        .map_err(|e| GeneratorError::ParseError(format!("{}: {}", path.display(), e)))?;
    debug!(path = %path.display(), classes = model.classes.len(), "Loaded metamodel");
    Ok(model)
}

#[cfg(test)]
mod tests {
    use super::*;
    use orm_define::{AttributeMapping, ClassKind, ConstraintRule};

    const SHOP: &str = r#"{
        "package": "com.shop",
        "persistence_unit": "shop",
        "classes": [
            {
                "name": "Order",
                "kind": "entity",
                "table": "ORDERS",
                "attributes": [
                    { "name": "id", "data_type": "Long", "mapping": { "kind": "id", "generated": "IDENTITY" } },
                    { "name": "code", "data_type": "String", "constraints": [{ "kind": "NotBlank" }] }
                ],
                "equals_method": { "attributes": ["code"] }
            },
            { "name": "OrderDto", "kind": "bean", "generate_source": false }
        ]
    }"#;

    #[test]
    fn parses_a_minimal_snapshot() {
        let model = parse_metamodel(SHOP).unwrap();

        assert_eq!(model.package, "com.shop");
        assert_eq!(model.persistence_unit.as_deref(), Some("shop"));
        assert_eq!(model.classes.len(), 2);

        let order = &model.classes[0];
        assert_eq!(order.kind, ClassKind::Entity);
        assert!(order.generate_source);
        assert!(matches!(order.attributes[0].mapping, AttributeMapping::Id { generated: Some(_) }));
        assert_eq!(order.attributes[1].constraints[0].rule, ConstraintRule::NotBlank);
        assert_eq!(order.equals_method.attributes, ["code"]);
        assert!(!model.classes[1].generate_source);
    }

    #[test]
    fn malformed_json_is_parse_error() {
        let err = parse_metamodel(r#"{ "classes": [ { "name": "X" } ] }"#).unwrap_err();
        assert!(matches!(err, GeneratorError::ParseError(_)));
    }

    #[test]
    fn missing_file_is_parse_error() {
        let err = load_metamodel(Path::new("/nonexistent/model.json")).unwrap_err();
        assert!(matches!(err, GeneratorError::ParseError(_)));
    }

    #[test]
    fn loads_from_disk() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("model.json");
        std::fs::write(&path, SHOP).unwrap();

        let model = load_metamodel(&path).unwrap();
        assert_eq!(model.classes[0].name, "Order");
    }
}
