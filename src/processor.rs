//! File pair processing: read, align, extract, report, and write HTML diffs

use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::discovery::{FilePair, absolutize};
use crate::error::{Result, StyleDiffError};
use crate::html::{DiffWriter, HtmlDiffWriter};
use crate::issue::{IssueRecord, extract_issues};
use crate::lines::LineSequence;
use crate::render_config::DiffRenderConfig;
use crate::summary::RunSummary;

// ============================================================================
// SINGLE PASS
// ============================================================================

/// Result of checking one file pair
#[derive(Debug, Clone, Default)]
pub struct FileOutcome {
    pub issues: Vec<IssueRecord>,
    /// Set when an HTML diff was written for the file
    pub diff_path: Option<PathBuf>,
}

/// Check one file pair against its formatted copy
///
/// The diff writer is only called for files with at least one issue.
pub fn process_file_pair(pair: &FilePair, writer: Option<&dyn DiffWriter>) -> Result<FileOutcome> {
    let source = LineSequence::read(&pair.source)?;
    let target = LineSequence::read(&pair.target)?;

    let issues = extract_issues(&pair.relative, source.as_slice(), target.as_slice());
    log::debug!("{}: {} style issue(s)", pair.relative.display(), issues.len());

    let diff_path = match writer {
        Some(writer) if !issues.is_empty() => {
            Some(writer.write_diff(&pair.relative, source.as_slice(), target.as_slice())?)
        }
        _ => None,
    };

    Ok(FileOutcome { issues, diff_path })
}

/// Check every pair in order and concatenate the issues
///
/// Issues keep file order first and source position second.
pub fn process_file_pairs(
    pairs: &[FilePair],
    writer: Option<&dyn DiffWriter>,
) -> Result<Vec<IssueRecord>> {
    let mut result = Vec::new();
    for pair in pairs {
        result.extend(process_file_pair(pair, writer)?.issues);
    }
    Ok(result)
}

// ============================================================================
// ANALYZER SESSION
// ============================================================================

/// Settings of one analyzer run
#[derive(Debug, Clone)]
pub struct AnalyzerSettings {
    /// Root that reported paths are relative to
    pub source_root: PathBuf,
    /// Where formatted copies and HTML diffs live; relative to `source_root`
    /// unless absolute
    pub output_directory: PathBuf,
    /// Enables HTML diffs when set
    pub render: Option<DiffRenderConfig>,
}

/// Reject an output directory that is the source root itself
///
/// Returns the absolute output directory.
pub fn validate_output_directory(source_root: &Path, output_directory: &Path) -> Result<PathBuf> {
    let output_directory = absolutize(source_root, output_directory);
    if output_directory.exists() && same_directory(&output_directory, source_root) {
        return Err(StyleDiffError::OutputIsSourceRoot(output_directory));
    }
    Ok(output_directory)
}

fn same_directory(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}

/// One style check run over many file pairs
pub struct StyleDiffAnalyzer {
    output_directory: PathBuf,
    writer: Option<Arc<dyn DiffWriter>>,
    summary: Arc<Mutex<RunSummary>>,
}

impl StyleDiffAnalyzer {
    /// Validate and create the output directory before anything is read
    pub fn new(settings: AnalyzerSettings) -> Result<Self> {
        let output_directory =
            validate_output_directory(&settings.source_root, &settings.output_directory)?;

        std::fs::create_dir_all(&output_directory).map_err(|source| StyleDiffError::Write {
            path: output_directory.clone(),
            source,
        })?;

        let writer = settings.render.map(|config| {
            Arc::new(HtmlDiffWriter::new(output_directory.clone(), config)) as Arc<dyn DiffWriter>
        });

        Ok(Self {
            output_directory,
            writer,
            summary: Arc::new(Mutex::new(RunSummary::default())),
        })
    }

    /// Replace the HTML writer with another diff sink
    #[must_use]
    pub fn with_writer(mut self, writer: Arc<dyn DiffWriter>) -> Self {
        self.writer = Some(writer);
        self
    }

    #[must_use]
    pub fn output_directory(&self) -> &Path {
        &self.output_directory
    }

    /// Process pairs one at a time, stopping at the first failure
    pub fn analyze(&self, pairs: &[FilePair]) -> Result<Vec<IssueRecord>> {
        let result = self.analyze_in_order(pairs);
        self.finish();
        result
    }

    fn analyze_in_order(&self, pairs: &[FilePair]) -> Result<Vec<IssueRecord>> {
        let mut result = Vec::new();
        for pair in pairs {
            let outcome = process_file_pair(pair, self.writer.as_deref())?;
            self.summary
                .lock()
                .record_file(outcome.issues.len(), outcome.diff_path.is_some());
            result.extend(outcome.issues);
        }
        Ok(result)
    }

    /// Process every pair on its own blocking worker
    ///
    /// Results are merged in input order, so the output equals [`Self::analyze`].
    /// Every worker has finished when this returns, also on failure; the error
    /// is the one of the first failed pair in input order.
    pub async fn analyze_parallel(&self, pairs: Vec<FilePair>) -> Result<Vec<IssueRecord>> {
        let handles: Vec<_> = pairs
            .into_iter()
            .map(|pair| {
                let writer = self.writer.clone();
                let summary = Arc::clone(&self.summary);
                tokio::task::spawn_blocking(move || {
                    let outcome = process_file_pair(&pair, writer.as_deref())?;
                    summary
                        .lock()
                        .record_file(outcome.issues.len(), outcome.diff_path.is_some());
                    Ok::<_, StyleDiffError>(outcome.issues)
                })
            })
            .collect();

        let mut outcomes = Vec::with_capacity(handles.len());
        for handle in handles {
            outcomes.push(
                handle
                    .await
                    .map_err(|e| StyleDiffError::Worker(e.to_string()))
                    .and_then(|outcome| outcome),
            );
        }
        self.finish();

        let mut result = Vec::new();
        for issues in outcomes {
            result.extend(issues?);
        }
        Ok(result)
    }

    /// Snapshot of the run counters
    #[must_use]
    pub fn summary(&self) -> RunSummary {
        self.summary.lock().clone()
    }

    fn finish(&self) {
        let mut summary = self.summary.lock();
        summary.finish();
        log::info!("{}", summary.format());
    }
}
