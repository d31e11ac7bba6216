pub mod pdftotext;
pub mod table;

use crate::error::PbevError;
use crate::model::RawRow;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BBox {
    pub x_min: f32,
    pub y_min: f32,
    pub x_max: f32,
    pub y_max: f32,
}

impl BBox {
    pub fn y_center(&self) -> f32 {
        (self.y_min + self.y_max) / 2.0
    }
}

/// A positioned word on a page.
#[derive(Debug, Clone, Serialize)]
pub struct Word {
    pub text: String,
    pub bbox: BBox,
}

/// All words of one page, in reading order.
#[derive(Debug, Clone, Serialize)]
pub struct PageWords {
    pub page_number: usize,
    pub words: Vec<Word>,
}

/// One table region detected on a page.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractedTable {
    pub page_number: usize,
    pub rows: Vec<RawRow>,
}

/// Tables extracted from a single page of a PDF.
#[derive(Debug, Clone, Serialize)]
pub struct PageTables {
    pub page_number: usize,
    pub tables: Vec<ExtractedTable>,
}

/// Trait for PDF table extraction backends.
pub trait TableExtractor: Send + Sync {
    /// Extract the tables of every page, pages in document order.
    fn extract_tables(&self, pdf_bytes: &[u8]) -> Result<Vec<PageTables>, PbevError>;

    /// Name of this extraction backend (for diagnostics).
    fn backend_name(&self) -> &str;
}
