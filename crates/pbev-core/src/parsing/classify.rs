use crate::model::RawRow;

/// Minimum number of cells for a table row to be considered a vehicle row.
pub const MIN_ROW_CELLS: usize = 25;

/// Substrings that mark a row as part of the report's header block.
///
/// Some keywords contain a line break: they only match multi-line header
/// cells, since the test runs on raw cell text.
pub const HEADER_KEYWORDS: &[&str] = &[
    "categoria",
    "marca",
    "modelo",
    "versão",
    "motor",
    "transmissão",
    "combustível",
    "poluentes",
    "quilometragem",
    "emissões",
    "classificação",
    "programa brasileiro",
    "hidráulica",
    "mecânica",
    "eletro-hidráulica",
    "manual (m)",
    "automática",
    "nmog+nox",
    "gás efeito",
    "consumo energético",
    "menores níveis",
    "maiores níveis",
    "www.",
    "inmetro",
    "conpet",
    "ibama",
    "tipo de",
    "propulsão",
    "comparação",
    "relativa",
    "absoluta",
    "autonomia",
    "ar\ncond",
    "direção",
    "fóssil",
    "cidade\n(km",
    "estrada\n(km",
    "valores em km",
];

/// Vehicle categories of the PBEV report, lowercase.
pub const CATEGORIES: &[&str] = &[
    "sub compacto",
    "compacto",
    "médio",
    "grande",
    "extra grande",
    "utilitário esportivo compacto",
    "utilitário esportivo grande",
    "utilitário esportivo grande 4x4",
    "fora de estrada compacto",
    "fora de estrada grande",
    "minivan",
    "comercial",
    "picape compacta",
    "picape",
    "esportivo",
];

/// Why a table row was not kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowVerdict {
    Vehicle,
    TooShort,
    Header,
    NotVehicle,
}

/// Detect a header row: any keyword occurs in the lowercased, space-joined
/// non-empty cells.
pub fn is_header_row(row: &[Option<String>]) -> bool {
    let text = row
        .iter()
        .flatten()
        .filter(|c| !c.is_empty())
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();
    HEADER_KEYWORDS.iter().any(|kw| text.contains(kw))
}

/// Detect a vehicle row: the first cell contains a known category name.
///
/// Any contained category qualifies, so "picape compacta" matches through
/// both "picape compacta" and "picape".
pub fn is_vehicle_row(row: &[Option<String>]) -> bool {
    first_cell_has_category(row, CATEGORIES)
}

/// Containment test against every entry, so the order of `categories` is
/// irrelevant.
fn first_cell_has_category(row: &[Option<String>], categories: &[&str]) -> bool {
    let first = match row.first() {
        Some(Some(cell)) if !cell.is_empty() => cell.trim().to_lowercase(),
        _ => return false,
    };
    categories.iter().any(|cat| first.contains(cat))
}

/// Classify one raw table row.
pub fn classify_row(row: &RawRow, min_cells: usize) -> RowVerdict {
    if row.len() < min_cells {
        RowVerdict::TooShort
    } else if is_header_row(row) {
        RowVerdict::Header
    } else if !is_vehicle_row(row) {
        RowVerdict::NotVehicle
    } else {
        RowVerdict::Vehicle
    }
}
