use pbev_core::config::{load_config, Config};
use pbev_core::error::PbevError;
use pbev_core::extraction::pdftotext::PdftotextExtractor;
use std::path::PathBuf;

use crate::output;

pub fn run(
    pdf_file: PathBuf,
    output_file: Option<PathBuf>,
    config_file: Option<PathBuf>,
) -> Result<(), PbevError> {
    let config = match config_file {
        Some(path) => load_config(&path)?,
        None => Config::default(),
    };
    if !pdf_file.is_file() {
        return Err(PbevError::InputNotFound(pdf_file));
    }

    let pdf_bytes = std::fs::read(&pdf_file)?;
    let extractor = PdftotextExtractor::new(config.layout);
    let rows = pbev_core::extract_vehicle_rows(&pdf_bytes, &extractor, config.min_row_cells)?;

    match output_file {
        Some(path) => {
            output::json::write(&path, &rows)?;
            eprintln!(
                "Kept {} row(s) from {} table(s), written to {}",
                rows.stats.kept,
                rows.stats.tables,
                path.display()
            );
            if rows.stats.dropped() > 0 {
                eprintln!(
                    "  {} row(s) dropped ({} too short, {} header, {} not a vehicle)",
                    rows.stats.dropped(),
                    rows.stats.too_short,
                    rows.stats.header,
                    rows.stats.not_vehicle
                );
            }
        }
        None => output::json::print(&rows)?,
    }

    Ok(())
}
