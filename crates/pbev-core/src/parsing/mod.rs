pub mod classify;
pub mod values;

use crate::extraction::PageTables;
use crate::model::{RawRow, VehicleRecord};
use crate::schema::{ColumnSchema, ValueKind};
use classify::{classify_row, RowVerdict};
use serde::Serialize;
use values::{clean_cell, clean_number};

/// Counts of table rows by classification outcome.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RowStats {
    pub tables: usize,
    pub kept: usize,
    pub too_short: usize,
    pub header: usize,
    pub not_vehicle: usize,
}

impl RowStats {
    pub fn dropped(&self) -> usize {
        self.too_short + self.header + self.not_vehicle
    }
}

/// Vehicle rows kept from a document, in page and table order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct VehicleRows {
    pub rows: Vec<RawRow>,
    pub stats: RowStats,
}

/// Filter every table row of the document down to vehicle rows.
///
/// Rows that are too short, header rows and rows without a known category
/// are dropped without error; they only show up in the counts.
pub fn collect_vehicle_rows(pages: &[PageTables], min_cells: usize) -> VehicleRows {
    let mut out = VehicleRows::default();

    for page in pages {
        for table in &page.tables {
            out.stats.tables += 1;
            for row in &table.rows {
                match classify_row(row, min_cells) {
                    RowVerdict::Vehicle => {
                        out.stats.kept += 1;
                        out.rows.push(row.clone());
                    }
                    RowVerdict::TooShort => out.stats.too_short += 1,
                    RowVerdict::Header => out.stats.header += 1,
                    RowVerdict::NotVehicle => out.stats.not_vehicle += 1,
                }
                log::trace!("page {}: {:?}", page.page_number, row.first());
            }
        }
    }

    out
}

/// Map one raw row onto the schema.
///
/// The row is read as if padded with absent cells up to the schema width.
/// Returns `None` when the brand is absent after cleaning.
pub fn map_row(row: &[Option<String>], schema: &ColumnSchema) -> Option<VehicleRecord> {
    let mut record = VehicleRecord::default();

    for column in &schema.columns {
        let raw = row.get(column.position).and_then(|c| c.as_deref());
        match column.kind {
            ValueKind::Text => {
                if let Some(slot) = record.text_slot(column.field) {
                    *slot = clean_cell(raw);
                }
            }
            ValueKind::Number => {
                if let Some(slot) = record.number_slot(column.field) {
                    *slot = clean_number(raw);
                }
            }
        }
    }

    record.brand.as_ref()?;
    Some(record)
}

/// Map every kept row, dropping rows without a brand.
pub fn map_records(rows: &[RawRow], schema: &ColumnSchema) -> Vec<VehicleRecord> {
    rows.iter().filter_map(|row| map_row(row, schema)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::ExtractedTable;
    use rust_decimal_macros::dec;

    fn cells(values: &[&str]) -> RawRow {
        values.iter().map(|s| Some(s.to_string())).collect()
    }

    fn full_row() -> RawRow {
        let mut row = cells(&[
            "Compacto", "Fiat", "Argo", "1.0 Drive", "1.0", "Combustão", "M-5", "S", "E", "F",
            "15,2", "210", "ND", "A", "0", "96", "-", "9,8", "10,9", "14,0", "16,0", "\\", "\\",
            "1,46", "-", "B", "A", "Sim",
        ]);
        assert_eq!(row.len(), 28);
        row[12] = None;
        row
    }

    #[test]
    fn test_map_full_row() {
        let record = map_row(&full_row(), &ColumnSchema::pbev()).unwrap();
        assert_eq!(record.category.as_deref(), Some("Compacto"));
        assert_eq!(record.brand.as_deref(), Some("Fiat"));
        assert_eq!(record.transmission.as_deref(), Some("M-5"));
        assert_eq!(record.nmog_nox, Some(dec!(15.2)));
        assert_eq!(record.cho, None);
        assert_eq!(record.co2e_plug_in, None);
        assert_eq!(record.fossil_city, Some(dec!(14.0)));
        assert_eq!(record.electric_city, None);
        assert_eq!(record.energy_consumption, Some(dec!(1.46)));
        assert_eq!(record.conpet_seal.as_deref(), Some("Sim"));
    }

    #[test]
    fn test_short_row_is_padded() {
        let row = cells(&["Compacto", "Fiat", "Argo"]);
        let record = map_row(&row, &ColumnSchema::pbev()).unwrap();
        assert_eq!(record.model.as_deref(), Some("Argo"));
        assert_eq!(record.version, None);
        assert_eq!(record.conpet_seal, None);
        assert_eq!(record.electric_range, None);
    }

    #[test]
    fn test_missing_brand_rejected() {
        let mut row = full_row();
        row[1] = Some(" - ".into());
        assert!(map_row(&row, &ColumnSchema::pbev()).is_none());
        row[1] = None;
        assert!(map_row(&row, &ColumnSchema::pbev()).is_none());
    }

    #[test]
    fn test_extra_cells_ignored() {
        let mut row = full_row();
        row.push(Some("trailing".into()));
        let record = map_row(&row, &ColumnSchema::pbev()).unwrap();
        assert_eq!(record.conpet_seal.as_deref(), Some("Sim"));
    }

    #[test]
    fn test_reordered_schema_follows_positions() {
        let mut schema = ColumnSchema::pbev();
        schema.columns[1].position = 2;
        schema.columns[2].position = 1;
        let record = map_row(&full_row(), &schema).unwrap();
        assert_eq!(record.brand.as_deref(), Some("Argo"));
        assert_eq!(record.model.as_deref(), Some("Fiat"));
    }

    #[test]
    fn test_collect_vehicle_rows_counts() {
        let mut header = cells(&["Categoria", "Marca"]);
        header.resize(28, None);
        let mut noise = cells(&["Caminhão", "X"]);
        noise.resize(28, None);
        let pages = vec![PageTables {
            page_number: 1,
            tables: vec![ExtractedTable {
                page_number: 1,
                rows: vec![header, full_row(), noise, cells(&["Compacto", "Fiat"])],
            }],
        }];

        let collected = collect_vehicle_rows(&pages, classify::MIN_ROW_CELLS);
        assert_eq!(collected.rows.len(), 1);
        assert_eq!(
            collected.stats,
            RowStats {
                tables: 1,
                kept: 1,
                too_short: 1,
                header: 1,
                not_vehicle: 1,
            }
        );
        assert_eq!(collected.stats.dropped(), 3);
    }
}
