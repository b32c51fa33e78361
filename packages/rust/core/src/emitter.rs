//! Output file emission.
//!
//! The page lands at `<prefix>_<YYYYMMDD_HHMM>.html` in the output directory.
//! Same-minute reruns overwrite the previous file; the write itself is atomic
//! (temp file + rename), so either the complete page exists or nothing does.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use tracing::{debug, info};

use citescout_shared::{CiteScoutError, Result};

/// Timestamped output file name for a generation run.
pub fn output_filename(prefix: &str, at: &DateTime<Local>) -> String {
    format!("{prefix}_{}.html", at.format("%Y%m%d_%H%M"))
}

/// Write the page to `<output_dir>/<filename>`.
///
/// Creates the directory if needed. Returns the path of the written file.
pub fn write_page(output_dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    std::fs::create_dir_all(output_dir).map_err(|e| CiteScoutError::io(output_dir, e))?;

    let target = output_dir.join(filename);
    let temp = output_dir.join(format!(".{filename}.tmp"));

    // Write to temp file first
    std::fs::write(&temp, content).map_err(|e| CiteScoutError::io(&temp, e))?;

    // Atomic rename
    std::fs::rename(&temp, &target).map_err(|e| CiteScoutError::io(&target, e))?;

    debug!(bytes = content.len(), "page content written");
    info!(path = %target.display(), "wrote page");

    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn filename_carries_minute_timestamp() {
        let at = Local.with_ymd_and_hms(2026, 8, 7, 9, 5, 0).unwrap();
        assert_eq!(
            output_filename("reference_search", &at),
            "reference_search_20260807_0905.html"
        );
    }

    #[test]
    fn write_creates_directory_and_file() {
        let tmp = tempfile::tempdir().unwrap();
        let out_dir = tmp.path().join("out");

        let path = write_page(&out_dir, "page.html", "<html></html>").unwrap();

        assert!(path.exists());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "<html></html>");
    }

    #[test]
    fn write_overwrites_existing_file() {
        let tmp = tempfile::tempdir().unwrap();

        write_page(tmp.path(), "page.html", "first").unwrap();
        let path = write_page(tmp.path(), "page.html", "second").unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "second");
    }

    #[test]
    fn write_leaves_no_temp_files() {
        let tmp = tempfile::tempdir().unwrap();
        write_page(tmp.path(), "page.html", "content").unwrap();

        for entry in std::fs::read_dir(tmp.path()).unwrap() {
            let name = entry.unwrap().file_name().to_string_lossy().to_string();
            assert!(!name.starts_with('.'), "temp file left behind: {name}");
        }
    }
}
