use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Counters for one analyzer run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    pub files_processed: u64,
    pub files_with_issues: u64,
    pub issues_found: u64,
    pub html_files_written: u64,
}

impl Default for RunSummary {
    fn default() -> Self {
        Self {
            started_at: Utc::now(),
            finished_at: None,
            files_processed: 0,
            files_with_issues: 0,
            issues_found: 0,
            html_files_written: 0,
        }
    }
}

impl RunSummary {
    /// Account for one processed file pair
    pub fn record_file(&mut self, issue_count: usize, html_written: bool) {
        self.files_processed += 1;
        if issue_count > 0 {
            self.files_with_issues += 1;
        }
        self.issues_found += issue_count as u64;
        if html_written {
            self.html_files_written += 1;
        }
    }

    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    /// Get formatted summary for display
    #[must_use]
    pub fn format(&self) -> String {
        let elapsed = self
            .finished_at
            .map(|end| (end - self.started_at).num_milliseconds())
            .map_or_else(|| "running".to_string(), |ms| format!("{ms}ms"));

        format!(
            "Style check: {} file(s) processed, {} with issues, {} issue(s), \
             {} HTML diff(s) written, started {}, elapsed {}",
            self.files_processed,
            self.files_with_issues,
            self.issues_found,
            self.html_files_written,
            self.started_at.format("%Y-%m-%d %H:%M:%S"),
            elapsed
        )
    }
}
