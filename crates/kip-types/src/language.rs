use serde::{Deserialize, Serialize};

use crate::LinePositionSpan;

/// How the kernel should treat submitted code.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionType {
    #[default]
    Run,
    Diagnose,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct CompletionItem {
    pub display_text: String,
    pub kind: String,
    pub filter_text: String,
    pub sort_text: String,
    pub insert_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documentation: Option<String>,
}

impl CompletionItem {
    /// An item whose filter, sort and insert text all equal its display text.
    pub fn simple(display_text: impl Into<String>, kind: impl Into<String>) -> Self {
        let display_text = display_text.into();
        Self {
            filter_text: display_text.clone(),
            sort_text: display_text.clone(),
            insert_text: display_text.clone(),
            display_text,
            kind: kind.into(),
            documentation: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticSeverity {
    Hidden,
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    pub line_position_span: LinePositionSpan,
    pub severity: DiagnosticSeverity,
    pub code: String,
    pub message: String,
}
