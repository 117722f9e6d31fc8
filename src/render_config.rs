//! Wrap column and tab size for HTML diffs, read from the formatter's own config

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Result, StyleDiffError};
use crate::runner::CommandRunner;

// ============================================================================
// CONSTANTS
// ============================================================================

pub const DEFAULT_WRAP_COLUMN: usize = 120;
pub const DEFAULT_TAB_SIZE: usize = 4;

/// Environment variable naming the uncrustify config when none is passed
pub const UNCRUSTIFY_CONFIG_ENV: &str = "UNCRUSTIFY_CONFIG";

const CLANG_COLUMN_LIMIT: &str = "ColumnLimit";
const CLANG_INDENT_WIDTH: &str = "IndentWidth";

const UNCRUSTIFY_CODE_WIDTH: &str = "code_width";
const UNCRUSTIFY_TAB_SIZE: &str = "input_tab_size";

/// `key [,=] value` with a letters/underscore key and a decimal value
static CONFIG_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*([A-Za-z_]+)\s*[,=]?\s*(\d+)").expect("config line pattern should compile")
});

// ============================================================================
// CONFIG
// ============================================================================

/// Presentation settings of the HTML diff writer
///
/// A `wrap_column` of zero disables wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffRenderConfig {
    pub wrap_column: usize,
    pub tab_size: usize,
}

impl Default for DiffRenderConfig {
    fn default() -> Self {
        Self {
            wrap_column: DEFAULT_WRAP_COLUMN,
            tab_size: DEFAULT_TAB_SIZE,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ClangStyleDump {
    column_limit: Option<usize>,
    indent_width: Option<usize>,
}

impl DiffRenderConfig {
    /// Parse `clang-format --dump-config` output
    ///
    /// Only the first YAML document is read. Both keys are required because the
    /// dump always lists every style option.
    ///
    /// # Examples
    ///
    /// ```
    /// use kodegen_style_diff::render_config::DiffRenderConfig;
    ///
    /// let dump = "---\nLanguage: Cpp\nColumnLimit: 100\nIndentWidth: 2\n...\n";
    /// let config = DiffRenderConfig::from_dump_config(dump).unwrap();
    /// assert_eq!((config.wrap_column, config.tab_size), (100, 2));
    /// ```
    pub fn from_dump_config(dump: &str) -> Result<Self> {
        let document = serde_yaml::Deserializer::from_str(dump)
            .next()
            .ok_or_else(|| StyleDiffError::ConfigFormat("empty config dump".to_string()))?;

        let style = ClangStyleDump::deserialize(document).map_err(|e| {
            StyleDiffError::ConfigFormat(format!(
                "Parsing of clang-format config produced the following error: {e}"
            ))
        })?;

        let config = Self {
            wrap_column: style
                .column_limit
                .ok_or(StyleDiffError::MissingConfigKey(CLANG_COLUMN_LIMIT))?,
            tab_size: style
                .indent_width
                .ok_or(StyleDiffError::MissingConfigKey(CLANG_INDENT_WIDTH))?,
        };
        log::debug!("clang-format render config: {config:?}");
        Ok(config)
    }

    /// Ask clang-format for its effective style and parse it
    pub fn from_clang_format(
        runner: &dyn CommandRunner,
        executable: &str,
        style: Option<&str>,
    ) -> Result<Self> {
        let mut cmd = vec![executable, "--dump-config"];
        if let Some(style) = style {
            cmd.extend(["-style", style]);
        }

        let output = runner.run_command(&cmd)?;
        if !output.stderr.is_empty() {
            return Err(StyleDiffError::ToolFailed {
                executable: format!("{executable} --dump-config"),
                code: None,
                stderr: output.stderr,
            });
        }

        Self::from_dump_config(&output.stdout)
    }

    /// Scan a plain `key = value` config text (uncrustify style)
    ///
    /// Unknown keys and malformed lines are skipped; absent keys keep their
    /// defaults.
    ///
    /// # Examples
    ///
    /// ```
    /// use kodegen_style_diff::render_config::DiffRenderConfig;
    ///
    /// let text = "# uncrustify\ncode_width = 80\nindent_columns = 3\ninput_tab_size=8\n";
    /// let config = DiffRenderConfig::from_config_text(text);
    /// assert_eq!((config.wrap_column, config.tab_size), (80, 8));
    /// ```
    #[must_use]
    pub fn from_config_text(text: &str) -> Self {
        let mut config = Self::default();

        for line in text.lines() {
            let Some(caps) = CONFIG_LINE.captures(line) else {
                continue;
            };
            let Ok(value) = caps[2].parse::<usize>() else {
                continue;
            };
            match &caps[1] {
                UNCRUSTIFY_CODE_WIDTH => config.wrap_column = value,
                UNCRUSTIFY_TAB_SIZE => config.tab_size = value,
                _ => {}
            }
        }

        config
    }

    /// Read and scan a plain config file
    pub fn from_config_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| StyleDiffError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_config_text(&text);
        log::debug!("{} render config: {config:?}", path.display());
        Ok(config)
    }
}

/// Uncrustify config location: the explicit path, else `UNCRUSTIFY_CONFIG`
pub fn resolve_uncrustify_config(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }
    std::env::var_os(UNCRUSTIFY_CONFIG_ENV)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
        .ok_or(StyleDiffError::MissingUncrustifyConfig)
}
