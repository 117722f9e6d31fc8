pub mod discovery;
pub mod error;
pub mod html;
pub mod intraline;
pub mod issue;
pub mod lines;
pub mod matcher;
pub mod message;
pub mod mismatch;
pub mod processor;
pub mod render_config;
pub mod report;
pub mod runner;
pub mod summary;
pub mod whitespace;

// Re-export commonly used types
pub use error::{Result, StyleDiffError};

pub use discovery::{FilePair, discover_files};

pub use issue::{CODE_STYLE_SYMBOL, IssueRecord, extract_issues};

pub use processor::{AnalyzerSettings, StyleDiffAnalyzer, process_file_pairs};

pub use render_config::DiffRenderConfig;
