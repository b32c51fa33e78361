//! Application configuration for CiteScout.
//!
//! User config lives at `~/.citescout/citescout.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{CiteScoutError, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "citescout.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".citescout";

// ---------------------------------------------------------------------------
// Config structs (matching citescout.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Global defaults.
    #[serde(default)]
    pub defaults: DefaultsConfig,

    /// Expected spreadsheet column labels.
    #[serde(default)]
    pub columns: ColumnLabels,

    /// Outbound search engines, one link per record each.
    #[serde(default = "default_engines")]
    pub engines: Vec<SearchEngine>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            defaults: DefaultsConfig::default(),
            columns: ColumnLabels::default(),
            engines: default_engines(),
        }
    }
}

/// `[defaults]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Input spreadsheet file name, resolved against the working directory.
    #[serde(default = "default_input_file")]
    pub input_file: String,

    /// Prefix for the generated `<prefix>_<YYYYMMDD_HHMM>.html` file name.
    #[serde(default = "default_output_prefix")]
    pub output_prefix: String,

    /// Heading and document title of the generated page.
    #[serde(default = "default_page_title")]
    pub page_title: String,

    /// Display prefix length (in characters) for the citation text.
    #[serde(default = "default_excerpt_len")]
    pub excerpt_len: usize,

    /// How many unretrieved references the batch-open button opens at once.
    #[serde(default = "default_batch_open_size")]
    pub batch_open_size: usize,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            input_file: default_input_file(),
            output_prefix: default_output_prefix(),
            page_title: default_page_title(),
            excerpt_len: default_excerpt_len(),
            batch_open_size: default_batch_open_size(),
        }
    }
}

fn default_input_file() -> String {
    "references.xlsx".into()
}
fn default_output_prefix() -> String {
    "reference_search".into()
}
fn default_page_title() -> String {
    "Reference Retrieval Checklist".into()
}
fn default_excerpt_len() -> usize {
    80
}
fn default_batch_open_size() -> usize {
    5
}

/// `[columns]` section — the literal header labels the loader looks for.
///
/// The labels are language-dependent: the defaults match the export format
/// the tool was built around, and any of them can be overridden to fit a
/// differently-labelled sheet. Columns other than the title are optional in
/// the sheet and degrade to blank fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnLabels {
    /// Document/patent title column. Rows without a value here are skipped.
    #[serde(default = "default_title_label")]
    pub title: String,

    /// Document/patent type column.
    #[serde(default = "default_doc_type_label")]
    pub doc_type: String,

    /// Full reference citation text column.
    #[serde(default = "default_citation_label")]
    pub citation: String,

    /// Publication year column.
    #[serde(default = "default_year_label")]
    pub year: String,

    /// Journal name / patent number column.
    #[serde(default = "default_venue_label")]
    pub venue: String,
}

impl Default for ColumnLabels {
    fn default() -> Self {
        Self {
            title: default_title_label(),
            doc_type: default_doc_type_label(),
            citation: default_citation_label(),
            year: default_year_label(),
            venue: default_venue_label(),
        }
    }
}

fn default_title_label() -> String {
    "文献/专利名称".into()
}
fn default_doc_type_label() -> String {
    "文献/专利类型".into()
}
fn default_citation_label() -> String {
    "参考文献条目".into()
}
fn default_year_label() -> String {
    "年份".into()
}
fn default_venue_label() -> String {
    "期刊名称/专利号".into()
}

/// `[[engines]]` entry — one outbound search link template.
///
/// The record's title is percent-encoded and appended to `query_url` to form
/// the link target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchEngine {
    /// Short identifier (used in logs).
    pub name: String,
    /// Button label shown on the page.
    pub label: String,
    /// URL prefix the encoded title query is appended to.
    pub query_url: String,
    /// Extra CSS class for the button, empty for the base style.
    #[serde(default)]
    pub css_class: String,
    /// Whether this engine's link is the one the batch-open button follows.
    #[serde(default)]
    pub primary: bool,
}

/// The built-in engine set: scholarly search, publisher portal,
/// researcher network.
pub fn default_engines() -> Vec<SearchEngine> {
    vec![
        SearchEngine {
            name: "scholar".into(),
            label: "🔍 Google Scholar".into(),
            query_url: "https://scholar.google.com/scholar?q=".into(),
            css_class: String::new(),
            primary: true,
        },
        SearchEngine {
            name: "sciencedirect".into(),
            label: "📰 ScienceDirect".into(),
            query_url: "https://www.sciencedirect.com/search?qs=".into(),
            css_class: "sciencedirect".into(),
            primary: false,
        },
        SearchEngine {
            name: "researchgate".into(),
            label: "👥 ResearchGate".into(),
            query_url: "https://www.researchgate.net/search/publication?q=".into(),
            css_class: "researchgate".into(),
            primary: false,
        },
    ]
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.citescout/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| CiteScoutError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.citescout/citescout.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| CiteScoutError::io(path, e))?;

    let config: AppConfig = toml::from_str(&content)
        .map_err(|e| CiteScoutError::config(format!("failed to parse {}: {e}", path.display())))?;

    validate_engines(&config.engines)?;
    Ok(config)
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| CiteScoutError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| CiteScoutError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| CiteScoutError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}

/// Check that the engine set is usable: at least one engine, exactly one
/// marked primary (the batch-open button needs an unambiguous link to follow).
pub fn validate_engines(engines: &[SearchEngine]) -> Result<()> {
    if engines.is_empty() {
        return Err(CiteScoutError::validation(
            "no search engines configured; every record needs at least one outbound link",
        ));
    }

    let primaries = engines.iter().filter(|e| e.primary).count();
    if primaries != 1 {
        return Err(CiteScoutError::validation(format!(
            "expected exactly one primary search engine, found {primaries}"
        )));
    }

    Ok(())
}
