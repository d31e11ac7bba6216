use pbev_core::columns::output_columns;
use pbev_core::config::{load_config, Config};
use pbev_core::error::PbevError;
use pbev_core::export::{detect_year, export_table};
use pbev_core::extraction::pdftotext::PdftotextExtractor;
use pbev_core::schema::{load_schema, ColumnSchema};
use pbev_core::summary::run_report;
use std::path::PathBuf;

use crate::output;

pub fn run(
    input_file: PathBuf,
    output_dir: Option<PathBuf>,
    config_file: Option<PathBuf>,
    schema_file: Option<PathBuf>,
) -> Result<(), PbevError> {
    if !input_file.is_file() {
        return Err(PbevError::InputNotFound(input_file));
    }

    let config = match config_file {
        Some(path) => load_config(&path)?,
        None => Config::default(),
    };
    let schema = match schema_file {
        Some(path) => load_schema(&path)?,
        None => ColumnSchema::pbev(),
    };
    let output_dir = output_dir.unwrap_or(config.output_dir);
    let year = detect_year(&input_file);

    println!("{}", output::report::banner(&format!("EXTRAÇÃO PBEV {year}")));

    let extractor = PdftotextExtractor::new(config.layout);
    let result = pbev_core::process_file(&input_file, &extractor, &schema, config.min_row_cells)?;

    let report = run_report(&result.table);
    print!("{}", output::report::format_report(&year, &report));

    let paths = export_table(&result.table, &input_file, &output_dir)?;
    print!("{}", output::report::format_columns(&output_columns()));
    print!("{}", output::report::format_paths(&paths));

    Ok(())
}
