//! Command payloads: requests sent from a client to a kernel.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::family::{Family, message_family};
use crate::{FormattedValue, LinePosition, PackageReference, SubmissionType};

message_family! {
    /// Every command a kernel channel can carry.
    pub enum Command(CommandType) in Family::Command {
        AddPackage,
        ChangeWorkingDirectory,
        DisplayError,
        DisplayValue,
        RequestCompletions,
        RequestDiagnostics,
        RequestHoverText,
        SubmitCode,
        UpdateDisplayedValue,
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AddPackage {
    pub package_reference: PackageReference,
}

impl AddPackage {
    pub fn new(package_reference: PackageReference) -> Self {
        Self { package_reference }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ChangeWorkingDirectory {
    #[serde(with = "crate::wire::path")]
    pub working_directory: PathBuf,
}

impl ChangeWorkingDirectory {
    pub fn new(working_directory: impl Into<PathBuf>) -> Self {
        Self {
            working_directory: working_directory.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DisplayError {
    pub message: String,
}

impl DisplayError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DisplayValue {
    pub formatted_value: FormattedValue,
    /// Identifies the display so a later `UpdateDisplayedValue` can replace it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_id: Option<String>,
}

impl DisplayValue {
    pub fn new(formatted_value: FormattedValue) -> Self {
        Self {
            formatted_value,
            value_id: None,
        }
    }

    pub fn with_value_id(mut self, value_id: impl Into<String>) -> Self {
        self.value_id = Some(value_id.into());
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RequestCompletions {
    pub code: String,
    pub line_position: LinePosition,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_kernel_name: Option<String>,
}

impl RequestCompletions {
    pub fn new(code: impl Into<String>, line_position: LinePosition) -> Self {
        Self {
            code: code.into(),
            line_position,
            target_kernel_name: None,
        }
    }

    pub fn with_target_kernel(mut self, name: impl Into<String>) -> Self {
        self.target_kernel_name = Some(name.into());
        self
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RequestDiagnostics {
    /// Code to analyse; `None` asks for diagnostics of the kernel's current state.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_kernel_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RequestHoverText {
    pub code: String,
    pub line_position: LinePosition,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_kernel_name: Option<String>,
}

impl RequestHoverText {
    pub fn new(code: impl Into<String>, line_position: LinePosition) -> Self {
        Self {
            code: code.into(),
            line_position,
            target_kernel_name: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SubmitCode {
    pub code: String,
    /// Language kernel the code is addressed to (e.g. `csharp`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_kernel_name: Option<String>,
    #[serde(default)]
    pub submission_type: SubmissionType,
}

impl SubmitCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            target_kernel_name: None,
            submission_type: SubmissionType::Run,
        }
    }

    pub fn with_target_kernel(mut self, name: impl Into<String>) -> Self {
        self.target_kernel_name = Some(name.into());
        self
    }

    pub fn with_submission_type(mut self, submission_type: SubmissionType) -> Self {
        self.submission_type = submission_type;
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDisplayedValue {
    pub formatted_value: FormattedValue,
    pub value_id: String,
}

impl UpdateDisplayedValue {
    pub fn new(formatted_value: FormattedValue, value_id: impl Into<String>) -> Self {
        Self {
            formatted_value,
            value_id: value_id.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MessageFamily, Variant};
    use serde_json::json;

    #[test]
    fn catalog_lists_every_command_once() {
        let names: Vec<_> = CommandType::ALL.iter().map(|tag| tag.name()).collect();
        assert_eq!(names.len(), 9);
        let mut sorted = names.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), names.len());
        assert!(names.contains(&"SubmitCode"));
        assert_eq!(Command::catalog(), CommandType::ALL);
    }

    #[test]
    fn peel_matches_only_own_variant() {
        let command: Command = SubmitCode::new("123").into();
        assert_eq!(command.tag(), CommandType::SubmitCode);
        assert_eq!(SubmitCode::peel(&command).map(|c| c.code.as_str()), Some("123"));
        assert!(DisplayError::peel(&command).is_none());
    }

    #[test]
    fn submit_code_defaults_to_run() {
        let submit: SubmitCode = serde_json::from_value(json!({ "code": "1+1" })).unwrap();
        assert_eq!(submit.submission_type, SubmissionType::Run);
        assert_eq!(submit.target_kernel_name, None);
    }
}
