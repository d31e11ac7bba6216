use crate::extraction::{ExtractedTable, PageWords, Word};
use crate::model::RawRow;
use crate::parsing::classify::is_header_row;
use serde::{Deserialize, Serialize};

/// Rebuild table rows from positioned words.
///
/// PDF reports rarely carry table structure, only glyph positions. Rows are
/// recovered by grouping words on a common baseline, columns by projecting
/// the phrases of the widest lines onto the x axis. Wrapped cell text shows
/// up as sparse lines and is folded into the nearest full line on the same
/// side of the header: header text never lands in a data row.
///
/// All distances are in PDF points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableLayout {
    /// Max difference of vertical centres for words on one text line.
    pub row_tolerance: f32,
    /// Max horizontal gap between words of one phrase.
    pub word_gap: f32,
    /// Vertical gap that separates two table regions.
    pub region_gap: f32,
    /// Max centre distance for folding a sparse line into a full line.
    pub continuation_gap: f32,
    /// Regions with fewer columns are not tables.
    pub min_columns: usize,
    /// Share of columns a line must fill to anchor a row.
    pub dense_ratio: f32,
    /// Lines with at least this share of the widest line's phrases define columns.
    pub projection_ratio: f32,
}

impl Default for TableLayout {
    fn default() -> Self {
        TableLayout {
            row_tolerance: 2.0,
            word_gap: 2.5,
            region_gap: 24.0,
            continuation_gap: 9.0,
            min_columns: 3,
            dense_ratio: 0.5,
            projection_ratio: 0.8,
        }
    }
}

#[derive(Debug, Clone)]
struct Phrase {
    text: String,
    x_min: f32,
    x_max: f32,
}

#[derive(Debug, Clone)]
struct TextLine {
    y: f32,
    top: f32,
    bottom: f32,
    phrases: Vec<Phrase>,
}

/// Column span on the x axis.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Span {
    x_min: f32,
    x_max: f32,
}

/// A table row under construction: text fragments per column with their y.
#[derive(Debug, Clone)]
struct RowBuilder {
    y: f32,
    header: bool,
    fragments: Vec<Vec<(f32, String)>>,
}

/// Detect the table regions of one page.
///
/// Regions with fewer than `layout.min_columns` columns are skipped.
pub fn detect_tables(page: &PageWords, layout: &TableLayout) -> Vec<ExtractedTable> {
    let lines = group_lines(&page.words, layout);

    split_regions(lines, layout.region_gap)
        .into_iter()
        .filter_map(|region| {
            let columns = column_spans(&region, layout);
            if columns.len() < layout.min_columns {
                return None;
            }
            let rows = build_rows(&region, &columns, layout);
            if rows.is_empty() {
                return None;
            }
            Some(ExtractedTable {
                page_number: page.page_number,
                rows,
            })
        })
        .collect()
}

/// Group words into text lines by vertical centre, then into phrases.
fn group_lines(words: &[Word], layout: &TableLayout) -> Vec<TextLine> {
    let mut sorted: Vec<&Word> = words.iter().filter(|w| !w.text.trim().is_empty()).collect();
    sorted.sort_by(|a, b| {
        a.bbox
            .y_center()
            .total_cmp(&b.bbox.y_center())
            .then(a.bbox.x_min.total_cmp(&b.bbox.x_min))
    });

    let mut groups: Vec<Vec<&Word>> = Vec::new();
    for word in sorted {
        match groups.last_mut() {
            Some(group)
                if (word.bbox.y_center() - group[0].bbox.y_center()).abs()
                    <= layout.row_tolerance =>
            {
                group.push(word)
            }
            _ => groups.push(vec![word]),
        }
    }

    groups
        .into_iter()
        .map(|mut group| {
            group.sort_by(|a, b| a.bbox.x_min.total_cmp(&b.bbox.x_min));
            let top = group.iter().map(|w| w.bbox.y_min).fold(f32::MAX, f32::min);
            let bottom = group.iter().map(|w| w.bbox.y_max).fold(f32::MIN, f32::max);
            TextLine {
                y: (top + bottom) / 2.0,
                top,
                bottom,
                phrases: build_phrases(&group, layout.word_gap),
            }
        })
        .collect()
}

fn build_phrases(words: &[&Word], word_gap: f32) -> Vec<Phrase> {
    let mut phrases: Vec<Phrase> = Vec::new();
    for word in words {
        let text = word.text.trim();
        match phrases.last_mut() {
            Some(p) if word.bbox.x_min - p.x_max <= word_gap => {
                p.text.push(' ');
                p.text.push_str(text);
                p.x_max = p.x_max.max(word.bbox.x_max);
            }
            _ => phrases.push(Phrase {
                text: text.to_string(),
                x_min: word.bbox.x_min,
                x_max: word.bbox.x_max,
            }),
        }
    }
    phrases
}

fn split_regions(lines: Vec<TextLine>, region_gap: f32) -> Vec<Vec<TextLine>> {
    let mut regions: Vec<Vec<TextLine>> = Vec::new();
    for line in lines {
        match regions.last_mut() {
            Some(region)
                if region
                    .last()
                    .is_some_and(|prev| line.top - prev.bottom <= region_gap) =>
            {
                region.push(line)
            }
            _ => regions.push(vec![line]),
        }
    }
    regions
}

/// Column spans of a region, left to right.
fn column_spans(region: &[TextLine], layout: &TableLayout) -> Vec<Span> {
    let widest = region.iter().map(|l| l.phrases.len()).max().unwrap_or(0);
    if widest < layout.min_columns {
        return Vec::new();
    }
    let threshold = ((widest as f32) * layout.projection_ratio).ceil() as usize;

    let mut spans: Vec<Span> = region
        .iter()
        .filter(|l| l.phrases.len() >= threshold)
        .flat_map(|l| l.phrases.iter())
        .map(|p| Span {
            x_min: p.x_min,
            x_max: p.x_max,
        })
        .collect();
    spans.sort_by(|a, b| a.x_min.total_cmp(&b.x_min));

    let mut merged: Vec<Span> = Vec::new();
    for span in spans {
        match merged.last_mut() {
            Some(last) if span.x_min <= last.x_max => last.x_max = last.x_max.max(span.x_max),
            _ => merged.push(span),
        }
    }
    merged
}

/// Index of the column a phrase belongs to: largest overlap, else nearest.
fn assign_column(phrase: &Phrase, columns: &[Span]) -> usize {
    let overlap = |c: &Span| phrase.x_max.min(c.x_max) - phrase.x_min.max(c.x_min);
    let best = columns
        .iter()
        .enumerate()
        .max_by(|(_, a), (_, b)| overlap(a).total_cmp(&overlap(b)));
    match best {
        Some((i, c)) if overlap(c) > 0.0 => i,
        _ => {
            let center = (phrase.x_min + phrase.x_max) / 2.0;
            let distance = |c: &Span| {
                if center < c.x_min {
                    c.x_min - center
                } else {
                    (center - c.x_max).max(0.0)
                }
            };
            columns
                .iter()
                .enumerate()
                .min_by(|(_, a), (_, b)| distance(a).total_cmp(&distance(b)))
                .map(|(i, _)| i)
                .unwrap_or(0)
        }
    }
}

fn build_rows(region: &[TextLine], columns: &[Span], layout: &TableLayout) -> Vec<RawRow> {
    let dense_min = layout
        .min_columns
        .max(((columns.len() as f32) * layout.dense_ratio).ceil() as usize);

    let mut rows: Vec<RowBuilder> = Vec::new();
    let mut sparse: Vec<RowBuilder> = Vec::new();

    for line in region {
        let mut fragments: Vec<Vec<(f32, String)>> = vec![Vec::new(); columns.len()];
        for phrase in &line.phrases {
            let col = assign_column(phrase, columns);
            match fragments[col].last_mut() {
                Some((_, text)) => {
                    text.push(' ');
                    text.push_str(&phrase.text);
                }
                None => fragments[col].push((line.y, phrase.text.clone())),
            }
        }
        let filled = fragments.iter().filter(|f| !f.is_empty()).count();
        let builder = RowBuilder {
            y: line.y,
            header: is_header_row(&join_fragments(&fragments)),
            fragments,
        };
        if filled >= dense_min {
            rows.push(builder);
        } else {
            sparse.push(builder);
        }
    }

    for line in sparse {
        let nearest = rows
            .iter_mut()
            .filter(|r| {
                r.header == line.header && (r.y - line.y).abs() <= layout.continuation_gap
            })
            .min_by(|a, b| (a.y - line.y).abs().total_cmp(&(b.y - line.y).abs()));
        match nearest {
            Some(anchor) => {
                for (col, frags) in line.fragments.into_iter().enumerate() {
                    anchor.fragments[col].extend(frags);
                }
            }
            None => rows.push(line),
        }
    }

    rows.sort_by(|a, b| a.y.total_cmp(&b.y));
    rows.into_iter().map(finish_row).collect()
}

fn finish_row(mut row: RowBuilder) -> RawRow {
    for frags in &mut row.fragments {
        frags.sort_by(|a, b| a.0.total_cmp(&b.0));
    }
    join_fragments(&row.fragments)
}

/// One cell per column, fragments joined top to bottom.
fn join_fragments(fragments: &[Vec<(f32, String)>]) -> RawRow {
    fragments
        .iter()
        .map(|frags| {
            if frags.is_empty() {
                return None;
            }
            Some(
                frags
                    .iter()
                    .map(|(_, text)| text.as_str())
                    .collect::<Vec<_>>()
                    .join("\n"),
            )
        })
        .collect()
}
