//! Integration tests for the process_pdf() end-to-end pipeline.
//!
//! Uses a MockExtractor that returns pre-built PageTables without
//! invoking pdftotext, so these tests run without poppler-utils.

use calamine::{open_workbook, Data, Reader, Xlsx};
use pbev_core::error::PbevError;
use pbev_core::export::{csv::UTF8_BOM, export_table};
use pbev_core::extraction::{ExtractedTable, PageTables, TableExtractor};
use pbev_core::model::RawRow;
use pbev_core::parsing::classify::MIN_ROW_CELLS;
use pbev_core::schema::ColumnSchema;
use pbev_core::{process_file, process_pdf};
use rust_decimal_macros::dec;
use std::path::Path;

struct MockExtractor {
    pages: Vec<PageTables>,
}

impl TableExtractor for MockExtractor {
    fn extract_tables(&self, _pdf_bytes: &[u8]) -> Result<Vec<PageTables>, PbevError> {
        Ok(self.pages.clone())
    }

    fn backend_name(&self) -> &str {
        "mock"
    }
}

struct FailingExtractor;

impl TableExtractor for FailingExtractor {
    fn extract_tables(&self, _pdf_bytes: &[u8]) -> Result<Vec<PageTables>, PbevError> {
        Err(PbevError::PdftotextNotFound)
    }

    fn backend_name(&self) -> &str {
        "failing"
    }
}

fn page(number: usize, tables: Vec<Vec<RawRow>>) -> PageTables {
    PageTables {
        page_number: number,
        tables: tables
            .into_iter()
            .map(|rows| ExtractedTable {
                page_number: number,
                rows,
            })
            .collect(),
    }
}

fn row(cells: &[&str]) -> RawRow {
    let mut row: RawRow = cells.iter().map(|s| Some(s.to_string())).collect();
    row.resize(28, None);
    row
}

fn header_row() -> RawRow {
    row(&["", "Marca", "Modelo", "Versão", "Motor"])
}

/// A 28-cell vehicle row with the given identity and fossil consumption.
fn vehicle(category: &str, brand: &str, model: &str, city: &str, highway: &str) -> RawRow {
    row(&[
        category, brand, model, "1.0 Drive", "1.0", "Combustão", "M-5", "S", "E", "F", "15,2",
        "210", "ND", "A", "0", "96", "-", "9,8", "10,9", city, highway, "\\", "\\", "1,46", "-",
        "B", "A", "Sim",
    ])
}

// ---------------------------------------------------------------------------
// Header row followed by one vehicle row
// ---------------------------------------------------------------------------
#[test]
fn header_then_vehicle_row() {
    let extractor = MockExtractor {
        pages: vec![page(
            1,
            vec![vec![header_row(), vehicle("compacto", "Fiat", "Argo", "14.0", "16.0")]],
        )],
    };

    let result = process_pdf(&[], &extractor, &ColumnSchema::pbev(), MIN_ROW_CELLS).unwrap();

    assert_eq!(result.table.len(), 1);
    assert_eq!(result.stats.header, 1);
    let record = &result.table.rows[0];
    assert_eq!(record.record.brand.as_deref(), Some("Fiat"));
    assert_eq!(record.record.category.as_deref(), Some("compacto"));
    assert_eq!(record.derived.fossil_combined, Some(dec!(14.90)));
    assert_eq!(record.derived.transmission_type.as_deref(), Some("M"));
    assert_eq!(record.derived.gear_count, Some(5));
    assert_eq!(record.record.conpet_seal.as_deref(), Some("SIM"));
}

// ---------------------------------------------------------------------------
// Header detection wins over a vehicle-looking first cell
// ---------------------------------------------------------------------------
#[test]
fn header_keyword_excludes_vehicle_like_row() {
    let mut looks_like_vehicle = vehicle("Compacto", "Fiat", "Argo", "14,0", "16,0");
    looks_like_vehicle[3] = Some("Categoria".into());
    let extractor = MockExtractor {
        pages: vec![page(1, vec![vec![looks_like_vehicle]])],
    };

    let result = process_pdf(&[], &extractor, &ColumnSchema::pbev(), MIN_ROW_CELLS).unwrap();
    assert!(result.table.is_empty());
    assert_eq!(result.stats.header, 1);
}

// ---------------------------------------------------------------------------
// Rows spread over pages and tables, with duplicates and noise
// ---------------------------------------------------------------------------
#[test]
fn multi_page_dedup_and_sort() {
    let argo = vehicle("Compacto", "Fiat", "Argo", "14,0", "16,0");
    let extractor = MockExtractor {
        pages: vec![
            page(
                1,
                vec![
                    vec![header_row(), vehicle("Médio", "Toyota", "Corolla", "12,1", "14,3")],
                    vec![argo.clone(), vec![Some("Compacto".into()), Some("Fiat".into())]],
                ],
            ),
            page(
                2,
                vec![vec![
                    argo,
                    vehicle("Utilitário Esportivo Grande 4x4", "Jeep", "Commander", "8,0", "9,5"),
                    row(&["Página 2 de 40"]),
                ]],
            ),
        ],
    };

    let result = process_pdf(&[], &extractor, &ColumnSchema::pbev(), MIN_ROW_CELLS).unwrap();

    assert_eq!(result.stats.tables, 3);
    assert_eq!(result.stats.kept, 4);
    assert_eq!(result.stats.too_short, 1);
    assert_eq!(result.stats.not_vehicle, 1);
    assert_eq!(result.table.duplicates_removed, 1);

    let models: Vec<&str> = result
        .table
        .rows
        .iter()
        .filter_map(|r| r.record.model.as_deref())
        .collect();
    assert_eq!(models, ["Argo", "Corolla", "Commander"]);
}

// ---------------------------------------------------------------------------
// Rows with a blank brand are dropped after mapping
// ---------------------------------------------------------------------------
#[test]
fn blank_brand_dropped() {
    let extractor = MockExtractor {
        pages: vec![page(
            1,
            vec![vec![
                vehicle("Compacto", "-", "Argo", "14,0", "16,0"),
                vehicle("Compacto", "Fiat", "Mobi", "14,0", "16,0"),
            ]],
        )],
    };

    let result = process_pdf(&[], &extractor, &ColumnSchema::pbev(), MIN_ROW_CELLS).unwrap();
    assert_eq!(result.stats.kept, 2);
    assert_eq!(result.table.len(), 1);
    assert_eq!(result.table.rows[0].record.model.as_deref(), Some("Mobi"));
}

// ---------------------------------------------------------------------------
// Extraction errors propagate
// ---------------------------------------------------------------------------
#[test]
fn extractor_error_propagates() {
    let err = process_pdf(&[], &FailingExtractor, &ColumnSchema::pbev(), MIN_ROW_CELLS).unwrap_err();
    assert!(matches!(err, PbevError::PdftotextNotFound));
}

#[test]
fn missing_input_file() {
    let extractor = MockExtractor { pages: vec![] };
    let err = process_file(
        Path::new("/nonexistent/pbe-veicular-2024-1.pdf"),
        &extractor,
        &ColumnSchema::pbev(),
        MIN_ROW_CELLS,
    )
    .unwrap_err();
    assert!(matches!(err, PbevError::InputNotFound(_)));
}

// ---------------------------------------------------------------------------
// Full run: PDF file on disk to workbook and CSV
// ---------------------------------------------------------------------------
#[test]
fn export_writes_workbook_and_csv() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("pbe-veicular-2024-1.pdf");
    std::fs::write(&input, b"%PDF-1.4").unwrap();
    let output_dir = dir.path().join("processed");

    let extractor = MockExtractor {
        pages: vec![page(
            1,
            vec![vec![
                header_row(),
                vehicle("Compacto", "Fiat", "Argo", "14,0", "16,0"),
                vehicle("Compacto", "Fiat", "Mobi", "13,5", "15,0"),
            ]],
        )],
    };

    let result = process_file(&input, &extractor, &ColumnSchema::pbev(), MIN_ROW_CELLS).unwrap();
    let paths = export_table(&result.table, &input, &output_dir).unwrap();

    assert_eq!(paths.xlsx, output_dir.join("pbev_2024_dados.xlsx"));
    assert_eq!(paths.csv, output_dir.join("pbev_2024_dados.csv"));

    let mut workbook: Xlsx<_> = open_workbook(&paths.xlsx).unwrap();
    assert_eq!(
        workbook.sheet_names(),
        vec![
            "Dados",
            "Resumo_Propulsão",
            "Resumo_Marca",
            "Resumo_Categoria",
            "Dicionário",
            "Legendas"
        ]
    );

    let data = workbook.worksheet_range("Dados").unwrap();
    assert_eq!(data.height(), 3);
    assert_eq!(data.width(), 37);
    assert_eq!(data.get_value((0, 1)), Some(&Data::String("Marca".into())));
    assert_eq!(data.get_value((1, 2)), Some(&Data::String("Argo".into())));
    assert_eq!(data.get_value((1, 31)), Some(&Data::Float(14.9)));
    assert_eq!(data.get_value((1, 36)), Some(&Data::Bool(false)));

    let brands = workbook.worksheet_range("Resumo_Marca").unwrap();
    assert_eq!(brands.get_value((1, 0)), Some(&Data::String("Fiat".into())));
    assert_eq!(brands.get_value((1, 2)), Some(&Data::Float(2.0)));

    let legend = workbook.worksheet_range("Legendas").unwrap();
    assert_eq!(legend.get_value((0, 1)), Some(&Data::String("Código".into())));
    assert!(legend.height() > 60);

    let csv = std::fs::read(&paths.csv).unwrap();
    assert!(csv.starts_with(UTF8_BOM));
    let text = String::from_utf8(csv[UTF8_BOM.len()..].to_vec()).unwrap();
    assert_eq!(text.lines().count(), 3);
    assert!(text.lines().nth(1).unwrap().starts_with("Compacto,Fiat,Argo,"));
}
