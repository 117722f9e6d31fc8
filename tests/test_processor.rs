//! End-to-end tests for file pair processing and analyzer runs

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;

use kodegen_style_diff::error::{Result, StyleDiffError};
use kodegen_style_diff::html::DiffWriter;
use kodegen_style_diff::processor::{process_file_pair, validate_output_directory};
use kodegen_style_diff::{
    AnalyzerSettings, CODE_STYLE_SYMBOL, DiffRenderConfig, FilePair, StyleDiffAnalyzer,
    process_file_pairs,
};

/// Create `relative` under the source root and its formatted copy under `out`
fn write_pair(root: &Path, relative: &str, source: &str, target: &str) -> FilePair {
    let out = root.join("out");
    for (base, content) in [(root, source), (out.as_path(), target)] {
        let path = base.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }
    FilePair::new(root, &out, PathBuf::from(relative))
}

/// Remembers which files a diff was requested for
#[derive(Default)]
struct RecordingWriter {
    written: Mutex<Vec<PathBuf>>,
}

impl DiffWriter for RecordingWriter {
    fn write_diff(&self, relative: &Path, _source: &[String], _target: &[String]) -> Result<PathBuf> {
        self.written.lock().push(relative.to_path_buf());
        Ok(relative.to_path_buf())
    }
}

fn settings(root: &Path, render: Option<DiffRenderConfig>) -> AnalyzerSettings {
    AnalyzerSettings {
        source_root: root.to_path_buf(),
        output_directory: PathBuf::from("out"),
        render,
    }
}

// ============================================================================
// SINGLE FILE
// ============================================================================

#[test]
fn test_single_changed_line_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let pair = write_pair(dir.path(), "src/a.c", "foo\nbar\nbaz\n", "foo\nBAR\nbaz\n");

    let outcome = process_file_pair(&pair, None).unwrap();

    assert_eq!(outcome.issues.len(), 1);
    let issue = &outcome.issues[0];
    assert_eq!(issue.symbol, CODE_STYLE_SYMBOL);
    assert_eq!(issue.path, "src/a.c");
    assert_eq!(issue.line, 2);
    assert_eq!(
        issue.message,
        "\nOriginal code:\n```diff\nfoo↓\nbar↓\n```\nFixed code:\n```diff\nfoo↓\nBAR↓\n```\n"
    );
    assert!(outcome.diff_path.is_none());
}

#[test]
fn test_whitespace_only_change_is_visualized() {
    let dir = tempfile::tempdir().unwrap();
    let pair = write_pair(dir.path(), "b.c", "{\n\tx;\n}\n", "{\n    x;\n}\n");

    let issues = process_file_pair(&pair, None).unwrap().issues;

    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].line, 2);
    assert!(issues[0].message.contains("{↓\n→→→→x;↓\n"));
    assert!(issues[0].message.contains("{↓\n····x;↓\n"));
}

#[test]
fn test_identical_files_report_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let pair = write_pair(dir.path(), "same.c", "int a;\n", "int a;\n");
    let writer = RecordingWriter::default();

    let outcome = process_file_pair(&pair, Some(&writer)).unwrap();

    assert!(outcome.issues.is_empty());
    assert!(outcome.diff_path.is_none());
    assert!(writer.written.lock().is_empty());
}

#[test]
fn test_missing_formatted_copy_is_read_error() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("lonely.c"), "x\n").unwrap();
    let pair = FilePair::new(dir.path(), &dir.path().join("out"), PathBuf::from("lonely.c"));

    let err = process_file_pair(&pair, None).unwrap_err();
    match err {
        StyleDiffError::Read { path, .. } => assert_eq!(path, dir.path().join("out/lonely.c")),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_crlf_source_compares_by_content() {
    let dir = tempfile::tempdir().unwrap();
    let pair = write_pair(dir.path(), "w.c", "a\r\nb\r\n", "a\r\nb\r\n");
    assert!(process_file_pair(&pair, None).unwrap().issues.is_empty());
}

// ============================================================================
// MANY FILES
// ============================================================================

#[test]
fn test_issues_keep_file_order() {
    let dir = tempfile::tempdir().unwrap();
    let pairs = vec![
        write_pair(dir.path(), "a.c", "x\ny\n", "x\nY\n"),
        write_pair(dir.path(), "b.c", "ok\n", "ok\n"),
        write_pair(dir.path(), "c.c", "p\nq\nr\n", "P\nq\nR\n"),
    ];
    let writer = RecordingWriter::default();

    let issues = process_file_pairs(&pairs, Some(&writer)).unwrap();

    let located: Vec<(&str, usize)> = issues.iter().map(|i| (i.path.as_str(), i.line)).collect();
    assert_eq!(located, vec![("a.c", 2), ("c.c", 1), ("c.c", 3)]);
    assert_eq!(
        *writer.written.lock(),
        vec![PathBuf::from("a.c"), PathBuf::from("c.c")]
    );
}

#[test]
fn test_first_failure_aborts_run() {
    let dir = tempfile::tempdir().unwrap();
    let pairs = vec![
        write_pair(dir.path(), "a.c", "x\n", "y\n"),
        FilePair::new(dir.path(), &dir.path().join("out"), PathBuf::from("gone.c")),
    ];
    assert!(matches!(
        process_file_pairs(&pairs, None),
        Err(StyleDiffError::Read { .. })
    ));
}

// ============================================================================
// ANALYZER
// ============================================================================

#[test]
fn test_output_directory_equal_to_root_is_rejected() {
    let dir = tempfile::tempdir().unwrap();

    let err = validate_output_directory(dir.path(), dir.path()).unwrap_err();
    assert!(matches!(err, StyleDiffError::OutputIsSourceRoot(_)));

    let err = validate_output_directory(dir.path(), Path::new(".")).unwrap_err();
    assert!(matches!(err, StyleDiffError::OutputIsSourceRoot(_)));

    let result = StyleDiffAnalyzer::new(AnalyzerSettings {
        source_root: dir.path().to_path_buf(),
        output_directory: PathBuf::from("."),
        render: None,
    });
    assert!(matches!(result, Err(StyleDiffError::OutputIsSourceRoot(_))));
}

#[test]
fn test_relative_output_directory_is_created_under_root() {
    let dir = tempfile::tempdir().unwrap();
    let analyzer = StyleDiffAnalyzer::new(settings(dir.path(), None)).unwrap();

    assert_eq!(analyzer.output_directory(), dir.path().join("out"));
    assert!(dir.path().join("out").is_dir());
}

#[test]
fn test_analyzer_writes_html_for_files_with_issues() {
    let dir = tempfile::tempdir().unwrap();
    let pairs = vec![
        write_pair(dir.path(), "src/a.c", "foo\nbar\nbaz\n", "foo\nBAR\nbaz\n"),
        write_pair(dir.path(), "src/clean.c", "int a;\n", "int a;\n"),
    ];
    let analyzer =
        StyleDiffAnalyzer::new(settings(dir.path(), Some(DiffRenderConfig::default()))).unwrap();

    let issues = analyzer.analyze(&pairs).unwrap();

    assert_eq!(issues.len(), 1);
    let html = fs::read_to_string(dir.path().join("out/src_a.c.html")).unwrap();
    assert!(html.contains("src/a.c"));
    assert!(html.contains("<span class=\"diff_chg\">bar</span>"));
    assert!(html.contains("<span class=\"diff_chg\">BAR</span>"));
    assert!(!dir.path().join("out/src_clean.c.html").exists());

    let summary = analyzer.summary();
    assert_eq!(summary.files_processed, 2);
    assert_eq!(summary.files_with_issues, 1);
    assert_eq!(summary.issues_found, 1);
    assert_eq!(summary.html_files_written, 1);
    assert!(summary.finished_at.is_some());
}

#[test]
fn test_custom_writer_replaces_html() {
    let dir = tempfile::tempdir().unwrap();
    let pairs = vec![write_pair(dir.path(), "a.c", "x\n", "y\n")];
    let writer = Arc::new(RecordingWriter::default());

    let analyzer = StyleDiffAnalyzer::new(settings(dir.path(), None))
        .unwrap()
        .with_writer(writer.clone());
    analyzer.analyze(&pairs).unwrap();

    assert_eq!(*writer.written.lock(), vec![PathBuf::from("a.c")]);
    assert!(!dir.path().join("out/a.c.html").exists());
}

#[tokio::test]
async fn test_parallel_run_matches_sequential_run() {
    let dir = tempfile::tempdir().unwrap();
    let mut pairs = Vec::new();
    for n in 0..8 {
        let source = format!("head\nline {n}\nmiddle\nvalue = {n};\ntail\n");
        let target = format!("head\nline  {n}\nmiddle\nvalue = {n} ;\ntail\n");
        pairs.push(write_pair(dir.path(), &format!("f{n}.c"), &source, &target));
    }

    let sequential = StyleDiffAnalyzer::new(settings(dir.path(), None))
        .unwrap()
        .analyze(&pairs)
        .unwrap();

    let analyzer = StyleDiffAnalyzer::new(settings(dir.path(), None)).unwrap();
    let parallel = analyzer.analyze_parallel(pairs).await.unwrap();

    assert_eq!(parallel, sequential);
    assert_eq!(parallel.len(), 16);
    assert_eq!(analyzer.summary().files_processed, 8);
    assert_eq!(analyzer.summary().issues_found, 16);
}

#[tokio::test]
async fn test_parallel_run_reports_failure() {
    let dir = tempfile::tempdir().unwrap();
    let pairs = vec![FilePair::new(
        dir.path(),
        &dir.path().join("out"),
        PathBuf::from("missing.c"),
    )];
    let analyzer = StyleDiffAnalyzer::new(settings(dir.path(), None)).unwrap();

    let result = analyzer.analyze_parallel(pairs).await;
    assert!(matches!(result, Err(StyleDiffError::Read { .. })));
}

fn html_files(dir: &Path) -> usize {
    fs::read_dir(dir)
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().extension().is_some_and(|ext| ext == "html"))
        .count()
}

#[tokio::test]
async fn test_parallel_failure_waits_for_every_worker() {
    let dir = tempfile::tempdir().unwrap();
    let mut pairs = vec![FilePair::new(
        dir.path(),
        &dir.path().join("out"),
        PathBuf::from("missing.c"),
    )];
    for n in 0..4 {
        let source: String = (0..2000).map(|k| format!("value{k} = {n};\n")).collect();
        let target: String = (0..2000)
            .map(|k| {
                if k % 7 == 0 {
                    format!("value{k}  = {n};\n")
                } else {
                    format!("value{k} = {n};\n")
                }
            })
            .collect();
        pairs.push(write_pair(dir.path(), &format!("f{n}.c"), &source, &target));
    }
    let analyzer =
        StyleDiffAnalyzer::new(settings(dir.path(), Some(DiffRenderConfig::default()))).unwrap();

    let result = analyzer.analyze_parallel(pairs).await;
    assert!(matches!(result, Err(StyleDiffError::Read { .. })));

    let out = dir.path().join("out");
    let html_at_return = html_files(&out);
    let summary_at_return = analyzer.summary();
    assert_eq!(html_at_return, 4);
    assert_eq!(summary_at_return.files_processed, 4);
    assert!(summary_at_return.finished_at.is_some());

    tokio::time::sleep(std::time::Duration::from_millis(200)).await;
    assert_eq!(html_files(&out), html_at_return);
    assert_eq!(analyzer.summary(), summary_at_return);
}

#[test]
fn test_sequential_failure_still_finishes_summary() {
    let dir = tempfile::tempdir().unwrap();
    let pairs = vec![
        write_pair(dir.path(), "a.c", "x\n", "y\n"),
        FilePair::new(dir.path(), &dir.path().join("out"), PathBuf::from("gone.c")),
    ];
    let analyzer = StyleDiffAnalyzer::new(settings(dir.path(), None)).unwrap();

    assert!(analyzer.analyze(&pairs).is_err());
    let summary = analyzer.summary();
    assert_eq!(summary.files_processed, 1);
    assert!(summary.finished_at.is_some());
}
