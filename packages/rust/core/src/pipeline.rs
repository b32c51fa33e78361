//! End-to-end `generate` pipeline: spreadsheet → records → page → file.

use std::path::PathBuf;
use std::time::Instant;

use chrono::Local;
use tracing::{info, instrument};

use citescout_loader::load_references;
use citescout_render::{RenderOptions, assemble_page, render_record};
use citescout_shared::{ColumnLabels, LoadSummary, Result, SearchEngine, validate_engines};

use crate::emitter;

/// Configuration for one generation run.
#[derive(Debug, Clone)]
pub struct GenerateConfig {
    /// Input spreadsheet path.
    pub input_path: PathBuf,
    /// Directory the page is written to.
    pub output_dir: PathBuf,
    /// Output file name prefix.
    pub output_prefix: String,
    /// Page heading and document title.
    pub page_title: String,
    /// Citation display prefix length (characters).
    pub excerpt_len: usize,
    /// Batch-open size baked into the generated page.
    pub batch_open_size: usize,
    /// Expected spreadsheet column labels.
    pub columns: ColumnLabels,
    /// Outbound search engines.
    pub engines: Vec<SearchEngine>,
}

/// Result of a generation run.
#[derive(Debug)]
pub struct GenerateResult {
    /// Path of the written page.
    pub output_path: PathBuf,
    /// Records included in the page.
    pub record_count: usize,
    /// Load statistics (rows seen, skipped, per-type counts).
    pub summary: LoadSummary,
    /// Total elapsed time.
    pub elapsed: std::time::Duration,
}

/// Progress callback for reporting pipeline status.
pub trait ProgressReporter: Send + Sync {
    /// Called when entering a new phase.
    fn phase(&self, name: &str);
    /// Called after each record is rendered.
    fn record_rendered(&self, current: usize, total: usize);
    /// Called when the pipeline completes.
    fn done(&self, result: &GenerateResult);
}

/// No-op progress reporter for headless/test usage.
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {
    fn phase(&self, _name: &str) {}
    fn record_rendered(&self, _current: usize, _total: usize) {}
    fn done(&self, _result: &GenerateResult) {}
}

/// Run the full generate pipeline.
///
/// 1. Load records from the spreadsheet
/// 2. Render one fragment per record
/// 3. Assemble the page and write it out
///
/// Any failure aborts the whole run before the write phase, so no partial
/// output is ever produced.
#[instrument(skip_all, fields(input = %config.input_path.display()))]
pub fn generate(
    config: &GenerateConfig,
    progress: &dyn ProgressReporter,
) -> Result<GenerateResult> {
    let start = Instant::now();

    validate_engines(&config.engines)?;

    progress.phase("Reading spreadsheet");
    let (records, summary) =
        load_references(&config.input_path, &config.columns, config.excerpt_len)?;

    progress.phase("Rendering page");
    let generated_at = Local::now();
    let opts = RenderOptions {
        page_title: config.page_title.clone(),
        generated_at: generated_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        engines: config.engines.clone(),
        batch_open_size: config.batch_open_size,
    };

    let total = records.len();
    let mut fragments = Vec::with_capacity(total);
    for (i, record) in records.iter().enumerate() {
        fragments.push(render_record(record, &opts.engines));
        progress.record_rendered(i + 1, total);
    }
    let html = assemble_page(&fragments, &opts);

    progress.phase("Writing output");
    let filename = emitter::output_filename(&config.output_prefix, &generated_at);
    let output_path = emitter::write_page(&config.output_dir, &filename, &html)?;

    let result = GenerateResult {
        output_path,
        record_count: total,
        summary,
        elapsed: start.elapsed(),
    };

    info!(
        records = result.record_count,
        skipped = result.summary.skipped,
        path = %result.output_path.display(),
        "generation complete"
    );
    progress.done(&result);

    Ok(result)
}
