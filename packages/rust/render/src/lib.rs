//! HTML rendering for CiteScout.
//!
//! Pure string-building: a [`ReferenceRecord`] plus the configured search
//! engines become one HTML fragment, and the fragments plus [`RenderOptions`]
//! become the complete self-contained page (style block, controls, progress
//! bar, checklist script, footer).
//!
//! All spreadsheet-sourced text is HTML-escaped at every embedding point; the
//! search query is percent-encoded from the raw title.

mod escape;
mod page;

pub use escape::{encode_query, html_escape};
pub use page::STORAGE_KEY;

use tracing::debug;

use citescout_shared::{ReferenceRecord, SearchEngine};

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// Inputs to page assembly beyond the records themselves.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Page heading and document title.
    pub page_title: String,
    /// Preformatted local timestamp shown in header and footer.
    pub generated_at: String,
    /// Search engines, one link per record each.
    pub engines: Vec<SearchEngine>,
    /// How many unretrieved records the batch-open button opens.
    pub batch_open_size: usize,
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Render the complete page for a list of records.
pub fn render_page(records: &[ReferenceRecord], opts: &RenderOptions) -> String {
    let fragments: Vec<String> = records
        .iter()
        .map(|record| render_record(record, &opts.engines))
        .collect();
    assemble_page(&fragments, opts)
}

/// Render one record's HTML block.
///
/// The record index is used consistently as `#<n>` badge text, `paper<n>`
/// block id, and `check<n>` checkbox id; the embedded script relies on all
/// three resolving to the same record.
pub fn render_record(record: &ReferenceRecord, engines: &[SearchEngine]) -> String {
    let n = record.index;
    let title = html_escape(&record.title);
    let citation = html_escape(&record.citation_excerpt);
    let year = html_escape(record.year.as_deref().unwrap_or(""));
    let venue = html_escape(record.venue.as_deref().unwrap_or(""));
    let query = encode_query(&record.title);

    let mut links = String::new();
    for engine in engines {
        let class = if engine.css_class.is_empty() {
            "search-btn".to_string()
        } else {
            format!("search-btn {}", engine.css_class)
        };
        let primary = if engine.primary { r#" data-primary="true""# } else { "" };
        let label = html_escape(&engine.label);

        links.push_str(&format!(
            "                <a href=\"{query_url}{query}\" target=\"_blank\" class=\"{class}\"{primary} onclick=\"markDone({n})\">{label}</a>\n",
            query_url = engine.query_url,
        ));
    }

    format!(
        r#"        <div class="paper" id="paper{n}">
            <div class="paper-number">#{n}</div>
            <div class="paper-title">{title}</div>
            <div class="paper-meta">
                Citation: {citation}<br>
                Year: {year} | Venue: {venue}
            </div>
            <div>
{links}            </div>
            <div class="paper-done">
                <input type="checkbox" id="check{n}" onchange="togglePaper({n})">
                <label for="check{n}">Retrieved</label>
            </div>
        </div>
"#
    )
}

/// Concatenate header, fragments, script, and footer into the final document.
pub fn assemble_page(fragments: &[String], opts: &RenderOptions) -> String {
    let total = fragments.len();
    debug!(records = total, "assembling page");

    let title = html_escape(&opts.page_title);
    let header = page::page_header(
        &opts.page_title,
        total,
        opts.batch_open_size,
        &opts.generated_at,
    );
    let script = page::page_script(total, opts.batch_open_size, &opts.page_title);
    let footer = page::page_footer(&opts.generated_at);
    let body: String = fragments.concat();
    let style = page::STYLE;

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title} - {total} references</title>
    <style>{style}    </style>
</head>
<body>
{header}
    <div id="paperList">
{body}    </div>

{script}

{footer}</body>
</html>
"#
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use citescout_shared::config::default_engines;
    use percent_encoding::percent_decode_str;

    fn record(index: usize, title: &str) -> ReferenceRecord {
        ReferenceRecord {
            index,
            title: title.into(),
            citation_excerpt: "Smith et al. (2020)".into(),
            year: Some("2020".into()),
            venue: Some("Nature Energy".into()),
            doc_type: Some("journal article".into()),
        }
    }

    fn options() -> RenderOptions {
        RenderOptions {
            page_title: "Reference Retrieval Checklist".into(),
            generated_at: "2026-08-07 12:00:00".into(),
            engines: default_engines(),
            batch_open_size: 5,
        }
    }

    #[test]
    fn record_ids_share_one_index() {
        let fragment = render_record(&record(3, "Solar cells"), &default_engines());
        assert!(fragment.contains("#3"));
        assert!(fragment.contains(r#"id="paper3""#));
        assert!(fragment.contains(r#"id="check3""#));
        assert!(fragment.contains("markDone(3)"));
        assert!(fragment.contains("togglePaper(3)"));
    }

    #[test]
    fn one_link_per_engine_one_primary() {
        let fragment = render_record(&record(1, "Solar cells"), &default_engines());
        assert_eq!(fragment.matches("search-btn").count(), 3);
        assert_eq!(fragment.matches("data-primary").count(), 1);
        assert!(fragment.contains("https://scholar.google.com/scholar?q="));
        assert!(fragment.contains("https://www.sciencedirect.com/search?qs="));
        assert!(fragment.contains("https://www.researchgate.net/search/publication?q="));
    }

    #[test]
    fn query_is_percent_encoded_from_raw_title() {
        let fragment = render_record(&record(1, "A & B?"), &default_engines());
        let query = encode_query("A & B?");
        assert!(fragment.contains(&format!("scholar?q={query}")));

        let decoded = percent_decode_str(&query).decode_utf8().unwrap();
        assert_eq!(decoded, "A & B?");
    }

    #[test]
    fn markup_in_fields_renders_escaped() {
        let mut bad = record(1, r#"<script>alert("x")</script> & more"#);
        bad.venue = Some("<i>Nature</i>".into());

        let fragment = render_record(&bad, &default_engines());
        assert!(fragment.contains("&lt;script&gt;alert(&quot;x&quot;)&lt;/script&gt; &amp; more"));
        assert!(fragment.contains("Venue: &lt;i&gt;Nature&lt;/i&gt;"));
        assert!(!fragment.contains("<script>alert"));
        assert!(!fragment.contains("<i>Nature</i>"));
    }

    #[test]
    fn blank_optionals_render_as_blanks() {
        let mut sparse = record(1, "Only a title");
        sparse.year = None;
        sparse.venue = None;
        sparse.citation_excerpt = String::new();

        let fragment = render_record(&sparse, &default_engines());
        assert!(fragment.contains("Citation: <br>"));
        assert!(fragment.contains("Year:  | Venue: "));
    }

    #[test]
    fn page_contains_one_block_per_record() {
        let records: Vec<_> = (1..=4)
            .map(|i| record(i, &format!("Paper {i}")))
            .collect();
        let html = render_page(&records, &options());

        assert_eq!(html.matches(r#"<div class="paper" id="paper"#).count(), 4);
        assert!(html.contains("0/4"));
        assert!(html.contains("const TOTAL = 4;"));
        assert!(html.contains("<title>Reference Retrieval Checklist - 4 references</title>"));
    }

    #[test]
    fn empty_page_still_renders() {
        let html = render_page(&[], &options());
        assert!(html.contains("0/0"));
        assert!(html.contains("const TOTAL = 0;"));
        assert!(html.contains("<strong>0</strong>"));
        assert!(html.contains("</html>"));
    }

    #[test]
    fn page_embeds_storage_wrapper() {
        let html = render_page(&[record(1, "t")], &options());
        assert!(html.contains(&format!("key: '{STORAGE_KEY}'")));
        assert!(html.contains("localStorage.getItem"));
        assert!(html.contains("store.load()"));
        assert!(html.contains("store.save(donePapers)"));
    }
}
