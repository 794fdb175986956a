use serde::{Deserialize, Serialize};

/// Fatal errors. A transpile call that fails returns no partial output.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TranspileError {
    #[error("Structural error at line {line}: {message}")]
    Structural { line: usize, message: String },

    #[error("Unknown self-closing mode '{0}' (expected xhtml, html5 or html4)")]
    UnknownMode(String),
}

/// A diagnostic message produced while transpiling.
///
/// Diagnostics are non-fatal: malformed input still produces output, and the
/// output is the same whether or not diagnostics are collected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
    /// 1-based source line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl Diagnostic {
    pub(crate) fn at(severity: Severity, code: &str, line: usize, message: String) -> Self {
        Self {
            severity,
            message,
            line: Some(line),
            code: Some(code.to_string()),
        }
    }
}

/// Severity level for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

/// Diagnostic codes.
pub mod codes {
    pub const UNCLOSED_ATTRS: &str = "W001";
    pub const CONTENT_ON_VOID: &str = "W002";
    pub const BARE_ATTR: &str = "W003";
    pub const MIXED_INDENT: &str = "W004";
    pub const METADATA_PASSTHROUGH: &str = "I001";
}
