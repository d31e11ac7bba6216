pub mod columns;
pub mod config;
pub mod dataset;
pub mod derive;
pub mod error;
pub mod export;
pub mod extraction;
pub mod legend;
pub mod model;
pub mod parsing;
pub mod schema;
pub mod summary;

use dataset::VehicleTable;
use error::PbevError;
use extraction::TableExtractor;
use parsing::{RowStats, VehicleRows};
use schema::ColumnSchema;
use serde::Serialize;
use std::path::Path;

/// Result of running the pipeline over one document.
#[derive(Debug, Clone, Serialize)]
pub struct Extraction {
    pub stats: RowStats,
    pub table: VehicleTable,
}

/// Extract every table of the PDF and keep the vehicle rows.
pub fn extract_vehicle_rows(
    pdf_bytes: &[u8],
    extractor: &dyn TableExtractor,
    min_row_cells: usize,
) -> Result<VehicleRows, PbevError> {
    log::debug!("extracting tables with {}", extractor.backend_name());
    let pages = extractor.extract_tables(pdf_bytes)?;
    let rows = parsing::collect_vehicle_rows(&pages, min_row_cells);

    log::info!("Vehicle rows: {}", rows.stats.kept);
    log::debug!(
        "{} table(s), dropped {} row(s): {} too short, {} header, {} not a vehicle",
        rows.stats.tables,
        rows.stats.dropped(),
        rows.stats.too_short,
        rows.stats.header,
        rows.stats.not_vehicle
    );
    Ok(rows)
}

/// Map kept rows onto the schema and assemble the output table.
pub fn build_table(rows: &VehicleRows, schema: &ColumnSchema) -> VehicleTable {
    let records = parsing::map_records(&rows.rows, schema);
    let without_brand = rows.rows.len() - records.len();
    if without_brand > 0 {
        log::debug!("dropped {without_brand} row(s) without a brand");
    }
    VehicleTable::from_records(records)
}

/// Main API entry point: PDF bytes in, assembled table out.
pub fn process_pdf(
    pdf_bytes: &[u8],
    extractor: &dyn TableExtractor,
    schema: &ColumnSchema,
    min_row_cells: usize,
) -> Result<Extraction, PbevError> {
    let rows = extract_vehicle_rows(pdf_bytes, extractor, min_row_cells)?;
    let table = build_table(&rows, schema);
    Ok(Extraction {
        stats: rows.stats,
        table,
    })
}

/// Read `input` and run [`process_pdf`] over it.
pub fn process_file(
    input: &Path,
    extractor: &dyn TableExtractor,
    schema: &ColumnSchema,
    min_row_cells: usize,
) -> Result<Extraction, PbevError> {
    if !input.is_file() {
        return Err(PbevError::InputNotFound(input.to_path_buf()));
    }
    let pdf_bytes = std::fs::read(input)?;
    process_pdf(&pdf_bytes, extractor, schema, min_row_cells)
}
