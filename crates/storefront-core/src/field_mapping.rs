use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// One card field to display, identified by the backend field name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappedField {
    pub name: String,
}

/// Ordered list of the product fields a results card shows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldMapping {
    pub fields: Vec<MappedField>,
}

impl FieldMapping {
    /// Builds a mapping from field names, keeping their order.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fields: names
                .into_iter()
                .map(|name| MappedField { name: name.into() })
                .collect(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Load and validate a card field mapping from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_field_mapping(path: &Path) -> Result<FieldMapping, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FieldMappingIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let mapping: FieldMapping = serde_yaml::from_str(&content)?;

    validate_field_mapping(&mapping)?;

    Ok(mapping)
}

fn validate_field_mapping(mapping: &FieldMapping) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();

    for field in &mapping.fields {
        if field.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "field name must be non-empty".to_string(),
            ));
        }

        if !seen.insert(field.name.to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate field name: '{}'",
                field.name
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_yaml_field_list() {
        let yaml = "fields:\n  - name: Name\n  - name: StockKeepingUnit\n";
        let mapping: FieldMapping = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(mapping, FieldMapping::from_names(["Name", "StockKeepingUnit"]));
        assert!(validate_field_mapping(&mapping).is_ok());
    }

    #[test]
    fn validate_rejects_blank_name() {
        let mapping = FieldMapping::from_names(["Name", "  "]);
        let err = validate_field_mapping(&mapping).unwrap_err();
        assert!(err.to_string().contains("non-empty"));
    }

    #[test]
    fn validate_rejects_case_insensitive_duplicates() {
        let mapping = FieldMapping::from_names(["Description", "description"]);
        let err = validate_field_mapping(&mapping).unwrap_err();
        assert!(err.to_string().contains("duplicate field name: 'description'"));
    }

    #[test]
    fn load_reports_missing_file_path() {
        let err = load_field_mapping(Path::new("/nonexistent/fields.yaml")).unwrap_err();
        assert!(
            matches!(err, ConfigError::FieldMappingIo { ref path, .. } if path == "/nonexistent/fields.yaml"),
            "expected FieldMappingIo, got: {err:?}"
        );
    }
}
