//! Aggregations over the assembled table: the summary sheets, the column
//! dictionary and the figures printed at the end of a run.

use crate::columns::{output_columns, OutputColumn};
use crate::dataset::VehicleTable;
use crate::derive::COMBUSTION;
use crate::model::{CellValue, VehicleRow};
use crate::schema::Field;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PowertrainSummary {
    pub powertrain: String,
    pub count: usize,
    pub co2_mean: Option<Decimal>,
    pub co2_median: Option<Decimal>,
    pub energy_mean: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BrandSummary {
    pub brand: String,
    pub models: usize,
    pub versions: usize,
    pub co2_mean: Option<Decimal>,
    pub pct_electrified: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategorySummary {
    pub category: String,
    pub count: usize,
    pub co2_mean: Option<Decimal>,
    pub fossil_combined_mean: Option<Decimal>,
}

/// One line of the column dictionary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DictionaryEntry {
    pub number: usize,
    pub column: &'static str,
    pub type_name: &'static str,
    pub filled: usize,
    pub example: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Co2Stats {
    pub mean: Decimal,
    pub median: Decimal,
    pub max: Decimal,
}

/// Figures for the console report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunReport {
    pub records: usize,
    pub source_columns: usize,
    pub derived_columns: usize,
    pub brands: usize,
    pub models: usize,
    /// Powertrain counts, most frequent first.
    pub powertrains: Vec<(String, usize)>,
    pub co2_all: Option<Co2Stats>,
    pub co2_combustion: Option<Co2Stats>,
}

/// Arithmetic mean. Falls back to summing `v / n` when the plain sum
/// overflows; `None` if even that does not fit.
pub fn mean(values: &[Decimal]) -> Option<Decimal> {
    if values.is_empty() {
        return None;
    }
    let n = Decimal::from(values.len());
    match values.iter().try_fold(Decimal::ZERO, |acc, v| acc.checked_add(*v)) {
        Some(sum) => Some(sum / n),
        None => values
            .iter()
            .try_fold(Decimal::ZERO, |acc, v| acc.checked_add(*v / n)),
    }
}

pub fn median(values: &[Decimal]) -> Option<Decimal> {
    let mut sorted = values.to_vec();
    sorted.sort();
    let n = sorted.len();
    match n {
        0 => None,
        _ if n % 2 == 1 => Some(sorted[n / 2]),
        _ => (sorted[n / 2 - 1] / Decimal::TWO).checked_add(sorted[n / 2] / Decimal::TWO),
    }
}

fn round2(value: Option<Decimal>) -> Option<Decimal> {
    value.map(|v| v.round_dp(2))
}

fn present(rows: &[&VehicleRow], field: Field) -> Vec<Decimal> {
    rows.iter().filter_map(|r| r.record.number(field)).collect()
}

/// Rows grouped by a text key, absent keys dropped, keys ascending.
fn group_by<'a>(
    table: &'a VehicleTable,
    key: impl Fn(&VehicleRow) -> Option<&str>,
) -> BTreeMap<String, Vec<&'a VehicleRow>> {
    let mut groups: BTreeMap<String, Vec<&VehicleRow>> = BTreeMap::new();
    for row in &table.rows {
        if let Some(k) = key(row) {
            groups.entry(k.to_string()).or_default().push(row);
        }
    }
    groups
}

pub fn powertrain_summary(table: &VehicleTable) -> Vec<PowertrainSummary> {
    group_by(table, |r| r.record.powertrain.as_deref())
        .into_iter()
        .map(|(powertrain, rows)| {
            let co2 = present(&rows, Field::Co2GasolineDiesel);
            PowertrainSummary {
                powertrain,
                count: rows.len(),
                co2_mean: round2(mean(&co2)),
                co2_median: round2(median(&co2)),
                energy_mean: round2(mean(&present(&rows, Field::EnergyConsumption))),
            }
        })
        .collect()
}

/// Per-brand figures, brands with the most versions first.
pub fn brand_summary(table: &VehicleTable) -> Vec<BrandSummary> {
    let mut out: Vec<BrandSummary> = group_by(table, |r| r.record.brand.as_deref())
        .into_iter()
        .map(|(brand, rows)| {
            let models: BTreeSet<&str> =
                rows.iter().filter_map(|r| r.record.model.as_deref()).collect();
            let electrified = rows.iter().filter(|r| r.derived.electrified).count();
            let share = (Decimal::from(electrified) / Decimal::from(rows.len())).round_dp(2);
            BrandSummary {
                brand,
                models: models.len(),
                versions: rows.iter().filter(|r| r.record.version.is_some()).count(),
                co2_mean: round2(mean(&present(&rows, Field::Co2GasolineDiesel))),
                pct_electrified: (share * Decimal::ONE_HUNDRED).round_dp(1),
            }
        })
        .collect();
    out.sort_by(|a, b| b.versions.cmp(&a.versions));
    out
}

pub fn category_summary(table: &VehicleTable) -> Vec<CategorySummary> {
    group_by(table, |r| r.record.category.as_deref())
        .into_iter()
        .map(|(category, rows)| {
            let combined: Vec<Decimal> =
                rows.iter().filter_map(|r| r.derived.fossil_combined).collect();
            CategorySummary {
                category,
                count: rows.len(),
                co2_mean: round2(mean(&present(&rows, Field::Co2GasolineDiesel))),
                fossil_combined_mean: round2(mean(&combined)),
            }
        })
        .collect()
}

/// One entry per output column, in export order.
pub fn column_dictionary(table: &VehicleTable) -> Vec<DictionaryEntry> {
    output_columns()
        .into_iter()
        .enumerate()
        .map(|(i, column)| dictionary_entry(table, i + 1, column))
        .collect()
}

fn dictionary_entry(table: &VehicleTable, number: usize, column: OutputColumn) -> DictionaryEntry {
    let values: Vec<CellValue> = table
        .rows
        .iter()
        .map(|r| column.value(r))
        .filter(|v| !v.is_empty())
        .collect();
    DictionaryEntry {
        number,
        column: column.label(),
        type_name: column.type_name(),
        filled: values.len(),
        example: values.first().map(|v| v.to_string()).unwrap_or_default(),
    }
}

fn co2_stats(values: &[Decimal]) -> Option<Co2Stats> {
    Some(Co2Stats {
        mean: mean(values)?,
        median: median(values)?,
        max: values.iter().copied().max()?,
    })
}

pub fn run_report(table: &VehicleTable) -> RunReport {
    let brands: BTreeSet<&str> = table
        .rows
        .iter()
        .filter_map(|r| r.record.brand.as_deref())
        .collect();
    let models: BTreeSet<&str> = table
        .rows
        .iter()
        .filter_map(|r| r.record.model.as_deref())
        .collect();

    let mut powertrains: Vec<(String, usize)> = group_by(table, |r| r.record.powertrain.as_deref())
        .into_iter()
        .map(|(k, rows)| (k, rows.len()))
        .collect();
    powertrains.sort_by(|a, b| b.1.cmp(&a.1));

    let all: Vec<&VehicleRow> = table.rows.iter().collect();
    let combustion: Vec<&VehicleRow> = table
        .rows
        .iter()
        .filter(|r| r.record.powertrain.as_deref() == Some(COMBUSTION))
        .collect();

    RunReport {
        records: table.len(),
        source_columns: Field::ALL.len(),
        derived_columns: output_columns().len() - Field::ALL.len(),
        brands: brands.len(),
        models: models.len(),
        powertrains,
        co2_all: co2_stats(&present(&all, Field::Co2GasolineDiesel)),
        co2_combustion: co2_stats(&present(&combustion, Field::Co2GasolineDiesel)),
    }
}
