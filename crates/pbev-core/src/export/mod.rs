pub mod csv;
pub mod xlsx;

use crate::columns::output_columns;
use crate::dataset::VehicleTable;
use crate::error::PbevError;
use crate::legend::LEGEND;
use crate::model::CellValue;
use crate::schema::Field;
use crate::summary;
use regex::Regex;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use xlsx::Sheet;

static YEAR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"20\d\d").unwrap());

/// Label used in output names when the input name carries no year.
pub const NO_YEAR: &str = "PBEV";

pub const SHEET_DATA: &str = "Dados";
pub const SHEET_POWERTRAIN: &str = "Resumo_Propulsão";
pub const SHEET_BRAND: &str = "Resumo_Marca";
pub const SHEET_CATEGORY: &str = "Resumo_Categoria";
pub const SHEET_DICTIONARY: &str = "Dicionário";
pub const SHEET_LEGEND: &str = "Legendas";

/// Files written by one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputPaths {
    pub xlsx: PathBuf,
    pub csv: PathBuf,
}

/// Edition year from the input file name, e.g. `pbe-veicular-2024-1.pdf` -> `2024`.
pub fn detect_year(input: &Path) -> String {
    input
        .file_name()
        .map(|n| n.to_string_lossy())
        .and_then(|name| YEAR.find(&name).map(|m| m.as_str().to_string()))
        .unwrap_or_else(|| NO_YEAR.to_string())
}

pub fn output_paths(input: &Path, output_dir: &Path) -> OutputPaths {
    let year = detect_year(input);
    OutputPaths {
        xlsx: output_dir.join(format!("pbev_{year}_dados.xlsx")),
        csv: output_dir.join(format!("pbev_{year}_dados.csv")),
    }
}

/// Write the workbook and the CSV for `table`, creating `output_dir` if needed.
pub fn export_table(
    table: &VehicleTable,
    input: &Path,
    output_dir: &Path,
) -> Result<OutputPaths, PbevError> {
    std::fs::create_dir_all(output_dir).map_err(|e| PbevError::Export {
        path: output_dir.to_path_buf(),
        reason: e.to_string(),
    })?;
    let paths = output_paths(input, output_dir);

    log::info!("Saving: {}", paths.xlsx.display());
    xlsx::write_workbook(&paths.xlsx, &workbook_sheets(table))?;

    log::info!("Saving: {}", paths.csv.display());
    csv::write_csv(&paths.csv, table, &output_columns())?;

    Ok(paths)
}

/// All sheets of the workbook, in order.
pub fn workbook_sheets(table: &VehicleTable) -> Vec<Sheet> {
    vec![
        data_sheet(table),
        powertrain_sheet(table),
        brand_sheet(table),
        category_sheet(table),
        dictionary_sheet(table),
        legend_sheet(),
    ]
}

fn count(n: usize) -> CellValue {
    CellValue::Integer(n as u64)
}

fn text(s: &str) -> CellValue {
    CellValue::Text(s.to_string())
}

fn data_sheet(table: &VehicleTable) -> Sheet {
    let columns = output_columns();
    let header: Vec<&str> = columns.iter().map(|c| c.label()).collect();
    let mut sheet = Sheet::new(SHEET_DATA, &header);
    sheet.rows = table
        .rows
        .iter()
        .map(|row| columns.iter().map(|c| c.value(row)).collect())
        .collect();
    sheet
}

fn powertrain_sheet(table: &VehicleTable) -> Sheet {
    let mut sheet = Sheet::new(
        SHEET_POWERTRAIN,
        &[
            Field::Powertrain.label(),
            "Quantidade",
            "CO2_Medio_gkm",
            "CO2_Mediano_gkm",
            "Consumo_Energetico_Medio_MJkm",
        ],
    );
    sheet.rows = summary::powertrain_summary(table)
        .into_iter()
        .map(|s| {
            vec![
                CellValue::Text(s.powertrain),
                count(s.count),
                s.co2_mean.into(),
                s.co2_median.into(),
                s.energy_mean.into(),
            ]
        })
        .collect();
    sheet
}

fn brand_sheet(table: &VehicleTable) -> Sheet {
    let mut sheet = Sheet::new(
        SHEET_BRAND,
        &["Marca", "Modelos", "Versões", "CO2_Medio_gkm", "Pct_Eletrificados"],
    );
    sheet.rows = summary::brand_summary(table)
        .into_iter()
        .map(|s| {
            vec![
                CellValue::Text(s.brand),
                count(s.models),
                count(s.versions),
                s.co2_mean.into(),
                CellValue::Number(s.pct_electrified),
            ]
        })
        .collect();
    sheet
}

fn category_sheet(table: &VehicleTable) -> Sheet {
    let mut sheet = Sheet::new(
        SHEET_CATEGORY,
        &["Categoria", "Quantidade", "CO2_Medio_gkm", "Consumo_Gas_Combinado_kml"],
    );
    sheet.rows = summary::category_summary(table)
        .into_iter()
        .map(|s| {
            vec![
                CellValue::Text(s.category),
                count(s.count),
                s.co2_mean.into(),
                s.fossil_combined_mean.into(),
            ]
        })
        .collect();
    sheet
}

fn dictionary_sheet(table: &VehicleTable) -> Sheet {
    let mut sheet = Sheet::new(
        SHEET_DICTIONARY,
        &["Nº", "Coluna", "Tipo", "Preenchidos", "Exemplo"],
    );
    sheet.rows = summary::column_dictionary(table)
        .into_iter()
        .map(|e| {
            vec![
                count(e.number),
                text(e.column),
                text(e.type_name),
                count(e.filled),
                CellValue::Text(e.example),
            ]
        })
        .collect();
    sheet
}

fn legend_sheet() -> Sheet {
    let mut sheet = Sheet::new(SHEET_LEGEND, &["Campo", "Código", "Significado"]);
    sheet.rows = LEGEND
        .iter()
        .map(|e| vec![text(e.field), text(e.code), text(e.meaning)])
        .collect();
    sheet
}
