use std::fmt;

use serde::{Deserialize, Serialize};

/// Severity of a static-analysis finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warn,
    Error,
}

impl Severity {
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One static-analysis finding, reported at a specific file and line.
///
/// Violations arrive already parsed from the analysis tool's output. The
/// `file` path is whatever the tool reported, which may differ in root from
/// the paths the review system knows (absolute vs repo-relative).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    pub reporter: String,
    pub rule: Option<String>,
    pub severity: Severity,
    pub file: String,
    pub start_line: u32,
    pub source: Option<String>,
    pub message: String,
}

/// A file that is part of the current reviewable diff, under the filename
/// the review system uses for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangedFile {
    pub filename: String,
}

impl ChangedFile {
    pub fn new(filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
        }
    }
}

/// A comment fetched from the review system.
///
/// The engine only ever inspects `content`; `identifier` is an opaque
/// provider-side handle carried along so deletions can address the comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub identifier: String,
    pub content: String,
}

impl Comment {
    pub fn new(identifier: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            content: content.into(),
        }
    }
}
