//! Event payloads: outcomes and notifications a kernel reports back.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::family::{Family, message_family};
use crate::{
    CompletionItem, Diagnostic, FailureReason, FormattedValue, LinePositionSpan,
    ResolvedPackageReference,
};

message_family! {
    /// Every event a kernel channel can carry.
    pub enum Event(EventType) in Family::Event {
        CodeSubmissionReceived,
        CommandFailed,
        CommandSucceeded,
        CompleteCodeSubmissionReceived,
        CompletionsProduced,
        CompletionRequestReceived,
        DiagnosticLogEntryProduced,
        DiagnosticsProduced,
        DisplayedValueProduced,
        DisplayedValueUpdated,
        ErrorProduced,
        HoverTextProduced,
        IncompleteCodeSubmissionReceived,
        InputRequested,
        PackageAdded,
        PasswordRequested,
        ReturnValueProduced,
        StandardErrorValueProduced,
        StandardOutputValueProduced,
        WorkingDirectoryChanged,
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CodeSubmissionReceived {
    pub code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CommandFailed {
    pub reason: FailureReason,
}

impl CommandFailed {
    pub fn new(reason: FailureReason) -> Self {
        Self { reason }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CommandSucceeded {}

/// The submission parsed as a complete unit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CompleteCodeSubmissionReceived {
    pub code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CompletionsProduced {
    pub completion_list: Vec<CompletionItem>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CompletionRequestReceived {}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DiagnosticLogEntryProduced {
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DiagnosticsProduced {
    pub diagnostics: Vec<Diagnostic>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DisplayedValueProduced {
    pub formatted_values: Vec<FormattedValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DisplayedValueUpdated {
    pub formatted_values: Vec<FormattedValue>,
    pub value_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ErrorProduced {
    pub message: String,
    #[serde(default)]
    pub formatted_values: Vec<FormattedValue>,
}

impl ErrorProduced {
    pub fn new(message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            formatted_values: vec![FormattedValue::plain(message.clone())],
            message,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct HoverTextProduced {
    pub content: Vec<FormattedValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_position_span: Option<LinePositionSpan>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct IncompleteCodeSubmissionReceived {}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InputRequested {
    pub prompt: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PackageAdded {
    pub package_reference: ResolvedPackageReference,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PasswordRequested {
    pub prompt: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ReturnValueProduced {
    pub formatted_values: Vec<FormattedValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StandardErrorValueProduced {
    pub formatted_values: Vec<FormattedValue>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StandardOutputValueProduced {
    pub formatted_values: Vec<FormattedValue>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WorkingDirectoryChanged {
    #[serde(with = "crate::wire::path")]
    pub working_directory: PathBuf,
}

impl WorkingDirectoryChanged {
    pub fn new(working_directory: impl Into<PathBuf>) -> Self {
        Self {
            working_directory: working_directory.into(),
        }
    }
}
