//! Plain-text report file.
//!
//! Format:
//! ```text
//! === Final Report ===
//!
//! URL: <url>
//! Summary: <summary>
//! ```
//! with one `URL`/`Summary` block per entry. The file is overwritten on every run.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::info;

use super::{CapabilityError, ReportEntry, ReportSink};

pub const REPORT_HEADER: &str = "=== Final Report ===";

/// Default report path, relative to the working directory.
pub const DEFAULT_REPORT_PATH: &str = "search_results.txt";

/// Renders entries in the report file format.
pub fn format_report(entries: &[ReportEntry]) -> String {
    let mut out = String::from(REPORT_HEADER);
    out.push('\n');
    for e in entries {
        out.push_str(&format!("\nURL: {}\nSummary: {}\n", e.url, e.summary));
    }
    out
}

/// [`ReportSink`] that writes the report file, logs each entry and
/// optionally echoes the report to stdout.
pub struct FileReportSink {
    path: PathBuf,
    echo: bool,
}

impl FileReportSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            echo: false,
        }
    }

    /// Print the rendered report to stdout after writing it.
    pub fn with_echo(mut self, echo: bool) -> Self {
        self.echo = echo;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileReportSink {
    fn default() -> Self {
        Self::new(DEFAULT_REPORT_PATH)
    }
}

#[async_trait]
impl ReportSink for FileReportSink {
    async fn write(&self, entries: &[ReportEntry]) -> Result<(), CapabilityError> {
        let report = format_report(entries);
        tokio::fs::write(&self.path, &report).await?;
        for e in entries {
            info!(url = %e.url, summary = %e.summary, "report entry");
        }
        info!(path = %self.path.display(), entries = entries.len(), "report written");
        if self.echo {
            println!("{}", report);
        }
        Ok(())
    }
}
