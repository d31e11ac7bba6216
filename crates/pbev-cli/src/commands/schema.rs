use pbev_core::error::PbevError;
use pbev_core::schema::{load_schema, ColumnSchema};
use std::path::Path;

use crate::output;

pub fn print() -> Result<(), PbevError> {
    output::json::print(&ColumnSchema::pbev())
}

pub fn validate(file: &Path) -> Result<(), PbevError> {
    let schema = load_schema(file)?;
    println!(
        "Valid schema: {} ({} columns, rows padded to {} cells)",
        schema.name,
        schema.columns.len(),
        schema.width()
    );
    if let Some(ref desc) = schema.description {
        println!("  {}", desc);
    }
    Ok(())
}
