use crate::derive::derive_row;
use crate::model::{VehicleRecord, VehicleRow};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashSet;

/// The assembled output table: derived, de-duplicated and sorted.
#[derive(Debug, Clone, Default, Serialize)]
pub struct VehicleTable {
    pub rows: Vec<VehicleRow>,
    pub duplicates_removed: usize,
}

impl VehicleTable {
    /// Derive every record, drop exact duplicates (first occurrence wins)
    /// and sort by category, brand, model, version.
    pub fn from_records(records: Vec<VehicleRecord>) -> Self {
        let total = records.len();
        let mut seen = HashSet::with_capacity(total);
        let mut rows: Vec<VehicleRow> = records
            .into_iter()
            .map(derive_row)
            .filter(|row| seen.insert(row.clone()))
            .collect();
        let duplicates_removed = total - rows.len();

        rows.sort_by(compare_rows);

        log::info!("Records: {} ({} duplicates removed)", rows.len(), duplicates_removed);

        VehicleTable {
            rows,
            duplicates_removed,
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn compare_rows(a: &VehicleRow, b: &VehicleRow) -> Ordering {
    let (a, b) = (&a.record, &b.record);
    absent_last(&a.category, &b.category)
        .then_with(|| absent_last(&a.brand, &b.brand))
        .then_with(|| absent_last(&a.model, &b.model))
        .then_with(|| absent_last(&a.version, &b.version))
}

fn absent_last(a: &Option<String>, b: &Option<String>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.as_bytes().cmp(b.as_bytes()),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
