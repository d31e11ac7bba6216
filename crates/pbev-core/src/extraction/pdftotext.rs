use crate::error::PbevError;
use crate::extraction::table::{detect_tables, TableLayout};
use crate::extraction::{BBox, PageTables, PageWords, TableExtractor, Word};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::io::Write;
use std::process::Command;

/// PDF extraction backend using pdftotext (from poppler-utils).
///
/// Uses `pdftotext -bbox-layout` to get every word with its bounding box,
/// then rebuilds table regions from word geometry.
pub struct PdftotextExtractor {
    layout: TableLayout,
}

impl PdftotextExtractor {
    pub fn new(layout: TableLayout) -> Self {
        PdftotextExtractor { layout }
    }
}

impl Default for PdftotextExtractor {
    fn default() -> Self {
        Self::new(TableLayout::default())
    }
}

impl TableExtractor for PdftotextExtractor {
    fn extract_tables(&self, pdf_bytes: &[u8]) -> Result<Vec<PageTables>, PbevError> {
        // The temp file is the open document; it is removed on drop,
        // including on every error path below.
        let mut tmpfile =
            tempfile::NamedTempFile::new().map_err(|e| PbevError::Extraction(e.to_string()))?;
        tmpfile
            .write_all(pdf_bytes)
            .map_err(|e| PbevError::Extraction(e.to_string()))?;

        let output = Command::new("pdftotext")
            .arg("-bbox-layout")
            .arg(tmpfile.path())
            .arg("-") // output to stdout
            .output()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    PbevError::PdftotextNotFound
                } else {
                    PbevError::Extraction(format!("pdftotext -bbox-layout failed: {}", e))
                }
            })?;

        if !output.status.success() {
            let code = output.status.code().unwrap_or(-1);
            let stderr = String::from_utf8_lossy(&output.stderr).to_string();
            return Err(PbevError::PdftotextFailed { code, stderr });
        }

        let xml = String::from_utf8_lossy(&output.stdout);
        let pages = parse_bbox_xml(&xml)?;
        log::info!("Pages: {}", pages.len());

        let tables = pages
            .iter()
            .map(|page| {
                let tables = detect_tables(page, &self.layout);
                log::debug!(
                    "page {}/{}: {} words, {} table(s)",
                    page.page_number,
                    pages.len(),
                    page.words.len(),
                    tables.len()
                );
                PageTables {
                    page_number: page.page_number,
                    tables,
                }
            })
            .collect();

        Ok(tables)
    }

    fn backend_name(&self) -> &str {
        "pdftotext"
    }
}

/// Parse the XHTML produced by `pdftotext -bbox-layout` into words per page.
///
/// Pages are numbered by order of appearance, starting at 1.
pub fn parse_bbox_xml(xml: &str) -> Result<Vec<PageWords>, PbevError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut pages: Vec<PageWords> = Vec::new();
    let mut current_word: Option<(BBox, String)> = None;

    loop {
        let event = reader
            .read_event()
            .map_err(|e| PbevError::Extraction(format!("invalid pdftotext output: {e}")))?;

        match event {
            Event::Start(e) => match e.name().as_ref() {
                b"page" => pages.push(PageWords {
                    page_number: pages.len() + 1,
                    words: Vec::new(),
                }),
                b"word" => current_word = parse_bbox(&e).map(|bbox| (bbox, String::new())),
                _ => {}
            },
            Event::Empty(e) if e.name().as_ref() == b"page" => pages.push(PageWords {
                page_number: pages.len() + 1,
                words: Vec::new(),
            }),
            Event::Text(t) => {
                if let Some((_, text)) = current_word.as_mut() {
                    let unescaped = t
                        .unescape()
                        .map_err(|e| PbevError::Extraction(format!("invalid word text: {e}")))?;
                    text.push_str(&unescaped);
                }
            }
            Event::End(e) if e.name().as_ref() == b"word" => {
                if let (Some((bbox, text)), Some(page)) = (current_word.take(), pages.last_mut()) {
                    let text = text.trim().to_string();
                    if !text.is_empty() {
                        page.words.push(Word { text, bbox });
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(pages)
}

fn parse_bbox(tag: &BytesStart<'_>) -> Option<BBox> {
    let mut x_min = None;
    let mut y_min = None;
    let mut x_max = None;
    let mut y_max = None;

    for attr in tag.attributes().flatten() {
        let value: Option<f32> = attr
            .unescape_value()
            .ok()
            .and_then(|v| v.trim().parse().ok());
        match attr.key.as_ref() {
            b"xMin" => x_min = value,
            b"yMin" => y_min = value,
            b"xMax" => x_max = value,
            b"yMax" => y_max = value,
            _ => {}
        }
    }

    Some(BBox {
        x_min: x_min?,
        y_min: y_min?,
        x_max: x_max?,
        y_max: y_max?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const XML: &str = r#"<!DOCTYPE html PUBLIC "-//W3C//DTD XHTML 1.0 Transitional//EN" "http://www.w3.org/TR/xhtml1/DTD/xhtml1-transitional.dtd">
<html xmlns="http://www.w3.org/1999/xhtml">
<head>
<title></title>
<meta name="Producer" content="Microsoft Excel"/>
</head>
<body>
<doc>
  <page width="841.890000" height="595.276000">
    <flow>
      <block xMin="10.0" yMin="20.0" xMax="120.0" yMax="30.0">
        <line xMin="10.0" yMin="20.0" xMax="120.0" yMax="30.0">
          <word xMin="10.0" yMin="20.0" xMax="40.0" yMax="30.0">Compacto</word>
          <word xMin="60.0" yMin="20.0" xMax="80.0" yMax="30.0">Fiat</word>
          <word xMin="90.0" yMin="20.0" xMax="120.0" yMax="30.0">P&amp;D</word>
        </line>
      </block>
    </flow>
  </page>
  <page width="841.890000" height="595.276000">
  </page>
</doc>
</body>
</html>
"#;

    #[test]
    fn test_parse_bbox_xml_words() {
        let pages = parse_bbox_xml(XML).unwrap();
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].page_number, 1);
        assert_eq!(pages[0].words.len(), 3);
        assert_eq!(pages[0].words[0].text, "Compacto");
        assert_eq!(pages[0].words[0].bbox.x_min, 10.0);
        assert_eq!(pages[0].words[0].bbox.y_max, 30.0);
        assert_eq!(pages[0].words[2].text, "P&D");
        assert_eq!(pages[1].page_number, 2);
        assert!(pages[1].words.is_empty());
    }

    #[test]
    fn test_word_without_bbox_skipped() {
        let xml = r#"<doc><page><word xMin="1">x</word><word xMin="1" yMin="2" xMax="3" yMax="4">y</word></page></doc>"#;
        let pages = parse_bbox_xml(xml).unwrap();
        assert_eq!(pages[0].words.len(), 1);
        assert_eq!(pages[0].words[0].text, "y");
    }

    #[test]
    fn test_parsed_page_feeds_table_detection() {
        let pages = parse_bbox_xml(XML).unwrap();
        let tables = detect_tables(&pages[0], &TableLayout::default());
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].rows[0][2].as_deref(), Some("P&D"));
    }
}
