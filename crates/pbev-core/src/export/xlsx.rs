//! Minimal SpreadsheetML (.xlsx) writer.
//!
//! Only what the report needs: several sheets, a bold header row, text as
//! inline strings, numeric and boolean cells. Absent values leave the cell
//! out entirely.

use crate::error::PbevError;
use crate::model::CellValue;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

const NS_MAIN: &str = "http://schemas.openxmlformats.org/spreadsheetml/2006/main";
const NS_REL: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const NS_PKG_REL: &str = "http://schemas.openxmlformats.org/package/2006/relationships";
const NS_TYPES: &str = "http://schemas.openxmlformats.org/package/2006/content-types";
const REL_DOCUMENT: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
const REL_WORKSHEET: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet";
const REL_STYLES: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles";
const CT_WORKBOOK: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml";
const CT_WORKSHEET: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml";
const CT_STYLES: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml";
const CT_RELS: &str = "application/vnd.openxmlformats-package.relationships+xml";

/// Style index of the bold header font in `styles.xml`.
const HEADER_STYLE: &str = "1";

/// Excel's limit on sheet name length.
const MAX_SHEET_NAME: usize = 31;

/// One worksheet: a header row followed by data rows.
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    pub name: String,
    pub header: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

impl Sheet {
    pub fn new(name: &str, header: &[&str]) -> Self {
        Sheet {
            name: name.to_string(),
            header: header.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
        }
    }
}

/// Write `sheets` as a workbook at `path`, replacing any existing file.
pub fn write_workbook(path: &Path, sheets: &[Sheet]) -> Result<(), PbevError> {
    let fail = |reason: String| PbevError::Export {
        path: path.to_path_buf(),
        reason,
    };

    for sheet in sheets {
        if sheet.name.is_empty() || sheet.name.chars().count() > MAX_SHEET_NAME {
            return Err(fail(format!("invalid sheet name '{}'", sheet.name)));
        }
    }

    let file = File::create(path).map_err(|e| fail(e.to_string()))?;
    let mut zip = ZipWriter::new(file);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    let mut parts = vec![
        ("[Content_Types].xml".to_string(), content_types(sheets.len())),
        ("_rels/.rels".to_string(), root_rels()),
        ("xl/workbook.xml".to_string(), workbook(sheets)),
        ("xl/_rels/workbook.xml.rels".to_string(), workbook_rels(sheets.len())),
        ("xl/styles.xml".to_string(), styles()),
    ];
    for (i, sheet) in sheets.iter().enumerate() {
        parts.push((format!("xl/worksheets/sheet{}.xml", i + 1), worksheet(sheet)));
    }

    for (name, xml) in parts {
        let xml = xml.map_err(fail)?;
        zip.start_file(name, options).map_err(|e| fail(e.to_string()))?;
        zip.write_all(&xml).map_err(|e| fail(e.to_string()))?;
    }
    zip.finish().map_err(|e| fail(e.to_string()))?;

    log::debug!("wrote {} sheet(s) to {}", sheets.len(), path.display());
    Ok(())
}

type Xml = Writer<Vec<u8>>;
type XmlResult<T> = Result<T, String>;

fn emit(w: &mut Xml, event: Event<'_>) -> XmlResult<()> {
    w.write_event(event).map_err(|e| e.to_string())
}

fn document(build: impl FnOnce(&mut Xml) -> XmlResult<()>) -> XmlResult<Vec<u8>> {
    let mut w = Writer::new(Vec::new());
    emit(&mut w, Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;
    build(&mut w)?;
    Ok(w.into_inner())
}

fn start(w: &mut Xml, tag: &str, attrs: &[(&str, &str)]) -> XmlResult<()> {
    let mut elem = BytesStart::new(tag);
    for &attr in attrs {
        elem.push_attribute(attr);
    }
    emit(w, Event::Start(elem))
}

fn end(w: &mut Xml, tag: &str) -> XmlResult<()> {
    emit(w, Event::End(BytesEnd::new(tag)))
}

fn empty(w: &mut Xml, tag: &str, attrs: &[(&str, &str)]) -> XmlResult<()> {
    let mut elem = BytesStart::new(tag);
    for &attr in attrs {
        elem.push_attribute(attr);
    }
    emit(w, Event::Empty(elem))
}

fn text(w: &mut Xml, tag: &str, attrs: &[(&str, &str)], value: &str) -> XmlResult<()> {
    start(w, tag, attrs)?;
    emit(w, Event::Text(BytesText::new(value)))?;
    end(w, tag)
}

fn content_types(sheet_count: usize) -> XmlResult<Vec<u8>> {
    document(|w| {
        start(w, "Types", &[("xmlns", NS_TYPES)])?;
        empty(w, "Default", &[("Extension", "rels"), ("ContentType", CT_RELS)])?;
        empty(w, "Default", &[("Extension", "xml"), ("ContentType", "application/xml")])?;
        empty(
            w,
            "Override",
            &[("PartName", "/xl/workbook.xml"), ("ContentType", CT_WORKBOOK)],
        )?;
        empty(
            w,
            "Override",
            &[("PartName", "/xl/styles.xml"), ("ContentType", CT_STYLES)],
        )?;
        for i in 1..=sheet_count {
            let part = format!("/xl/worksheets/sheet{i}.xml");
            empty(
                w,
                "Override",
                &[("PartName", part.as_str()), ("ContentType", CT_WORKSHEET)],
            )?;
        }
        end(w, "Types")
    })
}

fn root_rels() -> XmlResult<Vec<u8>> {
    document(|w| {
        start(w, "Relationships", &[("xmlns", NS_PKG_REL)])?;
        empty(
            w,
            "Relationship",
            &[("Id", "rId1"), ("Type", REL_DOCUMENT), ("Target", "xl/workbook.xml")],
        )?;
        end(w, "Relationships")
    })
}

fn workbook(sheets: &[Sheet]) -> XmlResult<Vec<u8>> {
    document(|w| {
        start(w, "workbook", &[("xmlns", NS_MAIN), ("xmlns:r", NS_REL)])?;
        start(w, "sheets", &[])?;
        for (i, sheet) in sheets.iter().enumerate() {
            let id = (i + 1).to_string();
            let rel = format!("rId{}", i + 1);
            empty(
                w,
                "sheet",
                &[("name", sheet.name.as_str()), ("sheetId", id.as_str()), ("r:id", rel.as_str())],
            )?;
        }
        end(w, "sheets")?;
        end(w, "workbook")
    })
}

/// Sheets take rId1..rIdN; styles come last.
fn workbook_rels(sheet_count: usize) -> XmlResult<Vec<u8>> {
    document(|w| {
        start(w, "Relationships", &[("xmlns", NS_PKG_REL)])?;
        for i in 1..=sheet_count {
            let id = format!("rId{i}");
            let target = format!("worksheets/sheet{i}.xml");
            empty(
                w,
                "Relationship",
                &[("Id", id.as_str()), ("Type", REL_WORKSHEET), ("Target", target.as_str())],
            )?;
        }
        let id = format!("rId{}", sheet_count + 1);
        empty(
            w,
            "Relationship",
            &[("Id", id.as_str()), ("Type", REL_STYLES), ("Target", "styles.xml")],
        )?;
        end(w, "Relationships")
    })
}

fn styles() -> XmlResult<Vec<u8>> {
    document(|w| {
        start(w, "styleSheet", &[("xmlns", NS_MAIN)])?;

        start(w, "fonts", &[("count", "2")])?;
        start(w, "font", &[])?;
        empty(w, "sz", &[("val", "11")])?;
        empty(w, "name", &[("val", "Calibri")])?;
        end(w, "font")?;
        start(w, "font", &[])?;
        empty(w, "b", &[])?;
        empty(w, "sz", &[("val", "11")])?;
        empty(w, "name", &[("val", "Calibri")])?;
        end(w, "font")?;
        end(w, "fonts")?;

        start(w, "fills", &[("count", "2")])?;
        start(w, "fill", &[])?;
        empty(w, "patternFill", &[("patternType", "none")])?;
        end(w, "fill")?;
        start(w, "fill", &[])?;
        empty(w, "patternFill", &[("patternType", "gray125")])?;
        end(w, "fill")?;
        end(w, "fills")?;

        start(w, "borders", &[("count", "1")])?;
        empty(w, "border", &[])?;
        end(w, "borders")?;

        start(w, "cellStyleXfs", &[("count", "1")])?;
        empty(w, "xf", &[("numFmtId", "0"), ("fontId", "0"), ("fillId", "0"), ("borderId", "0")])?;
        end(w, "cellStyleXfs")?;

        start(w, "cellXfs", &[("count", "2")])?;
        empty(
            w,
            "xf",
            &[("numFmtId", "0"), ("fontId", "0"), ("fillId", "0"), ("borderId", "0"), ("xfId", "0")],
        )?;
        empty(
            w,
            "xf",
            &[
                ("numFmtId", "0"),
                ("fontId", "1"),
                ("fillId", "0"),
                ("borderId", "0"),
                ("xfId", "0"),
                ("applyFont", "1"),
            ],
        )?;
        end(w, "cellXfs")?;

        end(w, "styleSheet")
    })
}

fn worksheet(sheet: &Sheet) -> XmlResult<Vec<u8>> {
    document(|w| {
        start(w, "worksheet", &[("xmlns", NS_MAIN), ("xmlns:r", NS_REL)])?;
        start(w, "sheetData", &[])?;

        start(w, "row", &[("r", "1")])?;
        for (col, label) in sheet.header.iter().enumerate() {
            let reference = cell_ref(col, 1);
            start(
                w,
                "c",
                &[("r", reference.as_str()), ("s", HEADER_STYLE), ("t", "inlineStr")],
            )?;
            inline_string(w, label)?;
            end(w, "c")?;
        }
        end(w, "row")?;

        for (i, row) in sheet.rows.iter().enumerate() {
            let row_number = i + 2;
            let r = row_number.to_string();
            start(w, "row", &[("r", r.as_str())])?;
            for (col, value) in row.iter().enumerate() {
                write_cell(w, &cell_ref(col, row_number), value)?;
            }
            end(w, "row")?;
        }

        end(w, "sheetData")?;
        end(w, "worksheet")
    })
}

fn inline_string(w: &mut Xml, value: &str) -> XmlResult<()> {
    start(w, "is", &[])?;
    text(w, "t", &[("xml:space", "preserve")], value)?;
    end(w, "is")
}

fn write_cell(w: &mut Xml, reference: &str, value: &CellValue) -> XmlResult<()> {
    match value {
        CellValue::Empty => Ok(()),
        CellValue::Text(s) => {
            start(w, "c", &[("r", reference), ("t", "inlineStr")])?;
            inline_string(w, s)?;
            end(w, "c")
        }
        CellValue::Number(_) | CellValue::Integer(_) => {
            start(w, "c", &[("r", reference)])?;
            text(w, "v", &[], &value.to_string())?;
            end(w, "c")
        }
        CellValue::Bool(b) => {
            start(w, "c", &[("r", reference), ("t", "b")])?;
            text(w, "v", &[], if *b { "1" } else { "0" })?;
            end(w, "c")
        }
    }
}

/// A1-style reference of a zero-based column and one-based row.
fn cell_ref(col: usize, row: usize) -> String {
    let mut letters = Vec::new();
    let mut n = col + 1;
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push(b'A' + rem as u8);
        n = (n - 1) / 26;
    }
    letters.reverse();
    format!("{}{}", String::from_utf8_lossy(&letters), row)
}
