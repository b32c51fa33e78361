//! Header resolution and row extraction.
//!
//! Pure functions over `calamine::Data` cells — no workbook handle needed.

use calamine::Data;

use citescout_shared::{ColumnLabels, LoadSummary, ReferenceRecord};

/// Resolved positions of the known columns within one sheet's header row.
///
/// Every field is optional: a sheet may omit any column. Rows degrade to
/// blank fields for missing optional columns; a missing title column means
/// no row can pass the inclusion filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnMap {
    pub title: Option<usize>,
    pub doc_type: Option<usize>,
    pub citation: Option<usize>,
    pub year: Option<usize>,
    pub venue: Option<usize>,
}

/// Match the header row against the configured column labels.
///
/// Labels are compared after trimming. If a label appears twice, the first
/// occurrence wins.
pub fn resolve_columns(header: &[Data], labels: &ColumnLabels) -> ColumnMap {
    let mut map = ColumnMap::default();

    for (idx, cell) in header.iter().enumerate() {
        let text = cell_to_string(cell);
        let label = text.trim();

        if label == labels.title {
            map.title.get_or_insert(idx);
        } else if label == labels.doc_type {
            map.doc_type.get_or_insert(idx);
        } else if label == labels.citation {
            map.citation.get_or_insert(idx);
        } else if label == labels.year {
            map.year.get_or_insert(idx);
        } else if label == labels.venue {
            map.venue.get_or_insert(idx);
        }
    }

    map
}

/// Extract one record per row with a non-empty title, in row order.
///
/// `excerpt_len` caps the citation text at a character prefix for display.
pub fn extract_records<'a, I>(
    rows: I,
    columns: &ColumnMap,
    excerpt_len: usize,
) -> (Vec<ReferenceRecord>, LoadSummary)
where
    I: IntoIterator<Item = &'a [Data]>,
{
    let mut records = Vec::new();
    let mut summary = LoadSummary::default();

    for row in rows {
        summary.rows_seen += 1;

        let title = columns
            .title
            .map(|i| cell_text(row, i))
            .unwrap_or_default();
        let title = title.trim().to_string();

        if title.is_empty() {
            summary.skipped += 1;
            continue;
        }

        let doc_type = optional_field(row, columns.doc_type);
        summary.count_record(doc_type.as_deref());

        let citation = columns
            .citation
            .map(|i| cell_text(row, i))
            .unwrap_or_default();

        records.push(ReferenceRecord {
            index: records.len() + 1,
            title,
            citation_excerpt: truncate_chars(citation.trim(), excerpt_len),
            year: optional_field(row, columns.year),
            venue: optional_field(row, columns.venue),
            doc_type,
        });
    }

    (records, summary)
}

/// Best-effort string coercion for a single cell.
///
/// Numeric cells with no fractional part render as integers, so a year
/// stored as `2019.0` comes out as `"2019"`.
pub fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) => float_to_string(*f),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => float_to_string(dt.as_f64()),
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
        Data::Error(_) => String::new(),
    }
}

fn float_to_string(f: f64) -> String {
    if f.fract() == 0.0 && f.abs() < i64::MAX as f64 {
        (f as i64).to_string()
    } else {
        f.to_string()
    }
}

fn cell_text(row: &[Data], idx: usize) -> String {
    row.get(idx).map(cell_to_string).unwrap_or_default()
}

/// A trimmed cell value, `None` when the column is absent or the cell blank.
fn optional_field(row: &[Data], idx: Option<usize>) -> Option<String> {
    let text = cell_text(row, idx?);
    let text = text.trim();
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

/// Character-boundary-safe prefix truncation.
fn truncate_chars(s: &str, max_chars: usize) -> String {
    s.chars().take(max_chars).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels() -> ColumnLabels {
        ColumnLabels {
            title: "Title".into(),
            doc_type: "Type".into(),
            citation: "Citation".into(),
            year: "Year".into(),
            venue: "Venue".into(),
        }
    }

    fn header() -> Vec<Data> {
        vec![
            Data::String("Title".into()),
            Data::String("Type".into()),
            Data::String("Citation".into()),
            Data::String("Year".into()),
            Data::String("Venue".into()),
        ]
    }

    fn row(title: &str, doc_type: &str, citation: &str, year: Data, venue: &str) -> Vec<Data> {
        vec![
            Data::String(title.into()),
            Data::String(doc_type.into()),
            Data::String(citation.into()),
            year,
            Data::String(venue.into()),
        ]
    }

    fn extract(rows: &[Vec<Data>]) -> (Vec<ReferenceRecord>, LoadSummary) {
        let columns = resolve_columns(&header(), &labels());
        extract_records(rows.iter().map(|r| r.as_slice()), &columns, 80)
    }

    #[test]
    fn resolves_columns_in_any_order() {
        let shuffled = vec![
            Data::String("Venue".into()),
            Data::String(" Title ".into()),
            Data::String("Year".into()),
        ];
        let map = resolve_columns(&shuffled, &labels());
        assert_eq!(map.venue, Some(0));
        assert_eq!(map.title, Some(1));
        assert_eq!(map.year, Some(2));
        assert_eq!(map.citation, None);
        assert_eq!(map.doc_type, None);
    }

    #[test]
    fn one_record_per_titled_row_in_order() {
        let rows = vec![
            row("First", "journal article", "A et al.", Data::Float(2019.0), "Nature"),
            row("", "journal article", "skipped", Data::Empty, ""),
            row("Second", "patent", "B et al.", Data::String("2021".into()), "CN1234567"),
        ];
        let (records, summary) = extract(&rows);

        assert_eq!(records.len(), 2);
        assert_eq!(summary.rows_seen, 3);
        assert_eq!(summary.skipped, 1);
        assert_eq!(records[0].index, 1);
        assert_eq!(records[0].title, "First");
        assert_eq!(records[1].index, 2);
        assert_eq!(records[1].title, "Second");
        assert_eq!(summary.by_doc_type.get("journal article"), Some(&1));
        assert_eq!(summary.by_doc_type.get("patent"), Some(&1));
    }

    #[test]
    fn numeric_year_loses_trailing_zero() {
        let rows = vec![row("T", "", "", Data::Float(2019.0), "")];
        let (records, _) = extract(&rows);
        assert_eq!(records[0].year.as_deref(), Some("2019"));
    }

    #[test]
    fn blank_optionals_become_none() {
        let rows = vec![row("Only a title", "", "", Data::Empty, "  ")];
        let (records, _) = extract(&rows);
        let record = &records[0];
        assert_eq!(record.year, None);
        assert_eq!(record.venue, None);
        assert_eq!(record.doc_type, None);
        assert_eq!(record.citation_excerpt, "");
    }

    #[test]
    fn missing_title_column_yields_no_records() {
        let no_title_header = vec![Data::String("Year".into()), Data::String("Venue".into())];
        let columns = resolve_columns(&no_title_header, &labels());
        let rows = vec![vec![Data::String("2020".into()), Data::String("Nature".into())]];

        let (records, summary) =
            extract_records(rows.iter().map(|r| r.as_slice()), &columns, 80);
        assert!(records.is_empty());
        assert_eq!(summary.skipped, 1);
    }

    #[test]
    fn citation_excerpt_is_char_truncated() {
        let long = "字".repeat(120);
        let rows = vec![row("T", "", &long, Data::Empty, "")];
        let (records, _) = extract(&rows);
        assert_eq!(records[0].citation_excerpt.chars().count(), 80);
    }

    #[test]
    fn short_rows_do_not_panic() {
        // A row narrower than the header: trailing cells are simply absent.
        let rows = vec![vec![Data::String("Narrow".into())]];
        let (records, _) = extract(&rows);
        assert_eq!(records[0].title, "Narrow");
        assert_eq!(records[0].venue, None);
    }
}
