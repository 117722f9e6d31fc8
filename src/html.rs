//! Side-by-side HTML diffs for files that produced style issues

use std::fs;
use std::ops::Range;
use std::path::{Component, Path, PathBuf};

use crate::error::{Result, StyleDiffError};
use crate::intraline::InlineChange;
use crate::matcher::{OpTag, matching_blocks, opcodes};
use crate::render_config::DiffRenderConfig;

// ============================================================================
// WRITER
// ============================================================================

/// Sink for full-file diffs of files that have issues
pub trait DiffWriter: Send + Sync {
    /// Write the diff of one file and return where it went
    fn write_diff(&self, relative: &Path, source: &[String], target: &[String])
    -> Result<PathBuf>;
}

/// Writes one HTML file per diff into a flat output directory
#[derive(Debug, Clone)]
pub struct HtmlDiffWriter {
    output_directory: PathBuf,
    config: DiffRenderConfig,
}

impl HtmlDiffWriter {
    #[must_use]
    pub fn new(output_directory: PathBuf, config: DiffRenderConfig) -> Self {
        Self {
            output_directory,
            config,
        }
    }

    /// Location of the HTML diff for a file relative to the source root
    #[must_use]
    pub fn output_path(&self, relative: &Path) -> PathBuf {
        self.output_directory.join(flattened_file_name(relative))
    }
}

impl DiffWriter for HtmlDiffWriter {
    fn write_diff(
        &self,
        relative: &Path,
        source: &[String],
        target: &[String],
    ) -> Result<PathBuf> {
        let path = self.output_path(relative);
        let caption = relative.display().to_string();
        let html = render_html_diff(&caption, source, target, self.config);

        fs::write(&path, html).map_err(|source| StyleDiffError::Write {
            path: path.clone(),
            source,
        })?;
        log::debug!("Wrote HTML diff {}", path.display());
        Ok(path)
    }
}

/// Relative path with separators replaced by underscores, plus `.html`
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use kodegen_style_diff::html::flattened_file_name;
///
/// assert_eq!(flattened_file_name(Path::new("src/net/socket.cpp")), "src_net_socket.cpp.html");
/// ```
#[must_use]
pub fn flattened_file_name(relative: &Path) -> String {
    let parts: Vec<String> = relative
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();
    format!("{}.html", parts.join("_"))
}

// ============================================================================
// RENDERING
// ============================================================================

const ADDED: &str = "diff_add";
const CHANGED: &str = "diff_chg";
const DELETED: &str = "diff_sub";

const STYLES: &str = "\
        table.diff {font-family:Courier; border:medium;}
        .diff_header {background-color:#e0e0e0}
        td.diff_header {text-align:right}
        .diff_add {background-color:#aaffaa}
        .diff_chg {background-color:#ffff77}
        .diff_sub {background-color:#ffaaaa}";

const LEGEND: &str = "\
    <table class=\"diff\" summary=\"Legends\">
        <tr> <th colspan=\"2\"> Legends </th> </tr>
        <tr> <td> <table border=\"\" summary=\"Colors\">
                      <tr><th> Colors </th> </tr>
                      <tr><td class=\"diff_add\">&nbsp;Added&nbsp;</td></tr>
                      <tr><td class=\"diff_chg\">Changed</td> </tr>
                      <tr><td class=\"diff_sub\">Deleted</td> </tr>
                  </table></td> </tr>
    </table>";

/// One visual row of one side of the table
#[derive(Debug, Clone, Default)]
struct Cell {
    number: String,
    html: String,
}

/// Render a complete HTML document comparing `source` with `target`
///
/// Every line is shown; tabs are expanded to `tab_size` columns and lines are
/// wrapped at `wrap_column` characters with `>` marking continuation rows.
#[must_use]
pub fn render_html_diff(
    caption: &str,
    source: &[String],
    target: &[String],
    config: DiffRenderConfig,
) -> String {
    let source_lines: Vec<String> = source
        .iter()
        .map(|line| expand_tabs(strip_newline(line), config.tab_size))
        .collect();
    let target_lines: Vec<String> = target
        .iter()
        .map(|line| expand_tabs(strip_newline(line), config.tab_size))
        .collect();

    let mut rows = String::new();
    for op in opcodes(&matching_blocks(source, target)) {
        match op.tag {
            OpTag::Equal => {
                for (i, j) in op.source.zip(op.target) {
                    let left = render_side(i, &source_lines[i], None, config);
                    let right = render_side(j, &target_lines[j], None, config);
                    push_rows(&mut rows, left, right);
                }
            }
            OpTag::Delete => {
                for i in op.source {
                    let line = &source_lines[i];
                    let left = render_side(i, line, Some((0..char_len(line), DELETED)), config);
                    push_rows(&mut rows, left, Vec::new());
                }
            }
            OpTag::Insert => {
                for j in op.target {
                    let line = &target_lines[j];
                    let right = render_side(j, line, Some((0..char_len(line), ADDED)), config);
                    push_rows(&mut rows, Vec::new(), right);
                }
            }
            OpTag::Replace => {
                let pairs = op.source.len().max(op.target.len());
                for k in 0..pairs {
                    let i = op.source.start + k;
                    let j = op.target.start + k;
                    let (left, right) = match (op.source.contains(&i), op.target.contains(&j)) {
                        (true, true) => {
                            let change = InlineChange::new(&source_lines[i], &target_lines[j]);
                            (
                                render_side(
                                    i,
                                    &source_lines[i],
                                    Some((change.old_range(), CHANGED)),
                                    config,
                                ),
                                render_side(
                                    j,
                                    &target_lines[j],
                                    Some((change.new_range(), CHANGED)),
                                    config,
                                ),
                            )
                        }
                        (true, false) => {
                            let line = &source_lines[i];
                            let left =
                                render_side(i, line, Some((0..char_len(line), DELETED)), config);
                            (left, Vec::new())
                        }
                        (false, true) => {
                            let line = &target_lines[j];
                            let right =
                                render_side(j, line, Some((0..char_len(line), ADDED)), config);
                            (Vec::new(), right)
                        }
                        (false, false) => (Vec::new(), Vec::new()),
                    };
                    push_rows(&mut rows, left, right);
                }
            }
        }
    }

    let caption = escape_html(caption);
    format!(
        "<!DOCTYPE html>\n\
         <html>\n\
         <head>\n    \
         <meta http-equiv=\"Content-Type\" content=\"text/html; charset=utf-8\" />\n    \
         <title>{caption}</title>\n    \
         <style type=\"text/css\">\n{STYLES}\n    </style>\n\
         </head>\n\
         <body>\n    \
         <table class=\"diff\" cellspacing=\"0\" cellpadding=\"0\" rules=\"groups\">\n        \
         <colgroup></colgroup> <colgroup></colgroup> <colgroup></colgroup> <colgroup></colgroup>\n        \
         <thead><tr><th colspan=\"2\">{caption} (original)</th><th colspan=\"2\">{caption} (fixed)</th></tr></thead>\n        \
         <tbody>\n{rows}        </tbody>\n    \
         </table>\n\
         {LEGEND}\n\
         </body>\n\
         </html>\n"
    )
}

fn push_rows(rows: &mut String, left: Vec<Cell>, right: Vec<Cell>) {
    let height = left.len().max(right.len());
    let empty = Cell::default();
    for k in 0..height {
        let l = left.get(k).unwrap_or(&empty);
        let r = right.get(k).unwrap_or(&empty);
        rows.push_str(&format!(
            "            <tr><td class=\"diff_header\">{}</td><td nowrap=\"nowrap\">{}</td>\
             <td class=\"diff_header\">{}</td><td nowrap=\"nowrap\">{}</td></tr>\n",
            l.number, l.html, r.number, r.html
        ));
    }
}

/// Wrapped rows for one line, highlighting `mark` (a character range)
fn render_side(
    index: usize,
    line: &str,
    mark: Option<(Range<usize>, &'static str)>,
    config: DiffRenderConfig,
) -> Vec<Cell> {
    let chars: Vec<char> = line.chars().collect();
    let width = if config.wrap_column == 0 {
        chars.len().max(1)
    } else {
        config.wrap_column
    };

    let mut cells = Vec::new();
    let mut start = 0;
    loop {
        let end = (start + width).min(chars.len());
        let html = match &mark {
            Some((range, class)) => highlight(&chars, start..end, range, class),
            None => escape_html(&chars[start..end].iter().collect::<String>()),
        };
        let number = if start == 0 {
            (index + 1).to_string()
        } else {
            ">".to_string()
        };
        cells.push(Cell { number, html });

        if end >= chars.len() {
            break;
        }
        start = end;
    }
    cells
}

/// Escape `chars[chunk]`, wrapping its overlap with `mark` in a span
fn highlight(chars: &[char], chunk: Range<usize>, mark: &Range<usize>, class: &str) -> String {
    let mark_start = mark.start.clamp(chunk.start, chunk.end);
    let mark_end = mark.end.clamp(mark_start, chunk.end);
    let text = |range: Range<usize>| escape_html(&chars[range].iter().collect::<String>());

    let mut out = text(chunk.start..mark_start);
    if mark_start < mark_end {
        out.push_str(&format!(
            "<span class=\"{class}\">{}</span>",
            text(mark_start..mark_end)
        ));
    }
    out.push_str(&text(mark_end..chunk.end));
    out
}

fn strip_newline(line: &str) -> &str {
    line.strip_suffix('\n').unwrap_or(line)
}

fn char_len(line: &str) -> usize {
    line.chars().count()
}

/// Replace tabs with spaces up to the next multiple of `tab_size`
fn expand_tabs(line: &str, tab_size: usize) -> String {
    let mut out = String::with_capacity(line.len());
    let mut column = 0;
    for ch in line.chars() {
        if ch == '\t' {
            if tab_size > 0 {
                let pad = tab_size - column % tab_size;
                out.extend(std::iter::repeat_n(' ', pad));
                column += pad;
            }
        } else {
            out.push(ch);
            column += 1;
        }
    }
    out
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            ' ' => out.push_str("&nbsp;"),
            _ => out.push(c),
        }
    }
    out
}
