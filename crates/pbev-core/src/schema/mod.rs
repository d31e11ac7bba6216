pub mod field;

use crate::error::PbevError;
pub use field::{Field, ValueKind};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// One positional column of the report table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub position: usize,
    pub field: Field,
    pub kind: ValueKind,
}

/// Positional binding between raw table cells and record fields.
///
/// The PBEV layout is a fixed 28-column contract; [`ColumnSchema::pbev`]
/// is that contract. Alternative layouts can be loaded from JSON, but only
/// as reorderings of the same field set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSchema {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub columns: Vec<FieldDescriptor>,
}

impl ColumnSchema {
    /// The built-in schema of the PBEV report tables.
    pub fn pbev() -> Self {
        let columns = Field::ALL
            .iter()
            .enumerate()
            .map(|(position, &field)| FieldDescriptor {
                position,
                field,
                kind: field.kind(),
            })
            .collect();

        ColumnSchema {
            name: "PBEV".into(),
            description: Some("Programa Brasileiro de Etiquetagem Veicular, 28 colunas".into()),
            columns,
        }
    }

    /// Number of cells a raw row is padded to before mapping.
    pub fn width(&self) -> usize {
        self.columns
            .iter()
            .map(|c| c.position + 1)
            .max()
            .unwrap_or(0)
    }
}

impl Default for ColumnSchema {
    fn default() -> Self {
        Self::pbev()
    }
}

/// Load a column schema from a JSON file.
pub fn load_schema(path: &Path) -> Result<ColumnSchema, PbevError> {
    let content = std::fs::read_to_string(path).map_err(|e| PbevError::SchemaLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    parse_schema(&content, path)
}

/// Parse a column schema from a JSON string.
pub fn parse_schema(json: &str, source: &Path) -> Result<ColumnSchema, PbevError> {
    let schema: ColumnSchema = serde_json::from_str(json).map_err(|e| PbevError::SchemaLoad {
        path: source.to_path_buf(),
        reason: e.to_string(),
    })?;
    validate_schema(&schema)?;
    Ok(schema)
}

/// Parse a column schema from a JSON string (no file path context).
pub fn parse_schema_str(json: &str) -> Result<ColumnSchema, PbevError> {
    let schema: ColumnSchema = serde_json::from_str(json).map_err(PbevError::Json)?;
    validate_schema(&schema)?;
    Ok(schema)
}

/// Validate that a schema binds every field exactly once at distinct positions.
pub fn validate_schema(schema: &ColumnSchema) -> Result<(), PbevError> {
    if schema.columns.is_empty() {
        return Err(PbevError::SchemaInvalid("columns must not be empty".into()));
    }

    let mut positions = HashSet::new();
    let mut fields = HashSet::new();

    for column in &schema.columns {
        if !positions.insert(column.position) {
            return Err(PbevError::SchemaInvalid(format!(
                "position {} is bound more than once",
                column.position
            )));
        }

        if !fields.insert(column.field) {
            return Err(PbevError::SchemaInvalid(format!(
                "field '{}' is bound more than once",
                column.field.key()
            )));
        }

        if column.kind != column.field.kind() {
            return Err(PbevError::SchemaInvalid(format!(
                "field '{}' must be {} but is declared {}",
                column.field.key(),
                column.field.kind(),
                column.kind
            )));
        }
    }

    let missing: Vec<&str> = Field::ALL
        .iter()
        .filter(|f| !fields.contains(*f))
        .map(|f| f.key())
        .collect();
    if !missing.is_empty() {
        return Err(PbevError::SchemaInvalid(format!(
            "missing fields: {}",
            missing.join(", ")
        )));
    }

    Ok(())
}
