//! Spreadsheet loading for CiteScout.
//!
//! Opens an Excel/ODS workbook with `calamine`, treats the first row of the
//! first worksheet as the header, resolves the expected column labels against
//! it, and extracts one [`ReferenceRecord`] per row that carries a title.
//!
//! Header resolution and row extraction live in [`extract`] as pure functions
//! over `calamine::Data` cells, so the mapping logic is testable without
//! workbook fixtures.

mod extract;

pub use extract::{ColumnMap, cell_to_string, extract_records, resolve_columns};

use std::path::Path;

use calamine::{Reader, open_workbook_auto};
use tracing::{debug, info, instrument};

use citescout_shared::{CiteScoutError, ColumnLabels, LoadSummary, ReferenceRecord, Result};

/// Load all references from the given spreadsheet.
///
/// Fails if the file is absent, unreadable, or not a valid workbook. Rows
/// without a title are skipped and counted in the returned [`LoadSummary`];
/// a sheet whose header lacks the title column simply yields zero records.
#[instrument(skip_all, fields(path = %path.display()))]
pub fn load_references(
    path: &Path,
    labels: &ColumnLabels,
    excerpt_len: usize,
) -> Result<(Vec<ReferenceRecord>, LoadSummary)> {
    if !path.exists() {
        return Err(CiteScoutError::spreadsheet(format!(
            "input file not found: {}",
            path.display()
        )));
    }

    let mut workbook = open_workbook_auto(path)
        .map_err(|e| CiteScoutError::spreadsheet(format!("failed to open workbook: {e}")))?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| CiteScoutError::spreadsheet("workbook contains no worksheets"))?;

    let range = workbook.worksheet_range(&sheet_name).map_err(|e| {
        CiteScoutError::spreadsheet(format!("failed to read sheet '{sheet_name}': {e}"))
    })?;

    let mut rows = range.rows();
    let Some(header) = rows.next() else {
        info!(sheet = %sheet_name, "worksheet is empty");
        return Ok((Vec::new(), LoadSummary::default()));
    };

    let columns = resolve_columns(header, labels);
    debug!(?columns, sheet = %sheet_name, "resolved header columns");

    let (records, summary) = extract_records(rows, &columns, excerpt_len);

    info!(
        sheet = %sheet_name,
        rows = summary.rows_seen,
        records = summary.records,
        skipped = summary.skipped,
        "loaded references"
    );

    Ok((records, summary))
}
