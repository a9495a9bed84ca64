use kip_types::commands::{
    AddPackage, ChangeWorkingDirectory, DisplayError, DisplayValue, RequestCompletions,
    RequestDiagnostics, RequestHoverText, SubmitCode, UpdateDisplayedValue,
};
use kip_types::events::{
    CodeSubmissionReceived, CommandFailed, CommandSucceeded, CompleteCodeSubmissionReceived,
    CompletionRequestReceived, CompletionsProduced, DiagnosticLogEntryProduced,
    DiagnosticsProduced, DisplayedValueProduced, DisplayedValueUpdated, ErrorProduced,
    HoverTextProduced, IncompleteCodeSubmissionReceived, InputRequested, PackageAdded,
    PasswordRequested, ReturnValueProduced, StandardErrorValueProduced,
    StandardOutputValueProduced, WorkingDirectoryChanged,
};
use kip_types::{
    CompletionItem, Diagnostic, DiagnosticSeverity, FailureReason, FormattedValue, KernelCommand,
    KernelEvent, LinePosition, LinePositionSpan, PackageReference, ResolvedPackageReference,
    SubmissionType,
};
use std::path::PathBuf;

pub const WORKING_DIRECTORY: &str = "some/different/directory";

/// Token on the command behind the `CommandSucceeded` sample.
pub const CAUSING_TOKEN: &str = "submit-token-1";

fn html_hi() -> FormattedValue {
    FormattedValue::new(FormattedValue::TEXT_HTML, "<b>hi!</b>")
}

/// `SubmitCode("123")` addressed to the C# kernel.
pub fn submit_code() -> KernelCommand {
    KernelCommand::new(
        SubmitCode::new("123")
            .with_target_kernel("csharp")
            .with_submission_type(SubmissionType::Run),
    )
}

fn display_hi() -> KernelCommand {
    KernelCommand::new(SubmitCode::new("b(\"hi!\")").with_target_kernel("csharp"))
}

/// Path of a package asset as a kernel would report it.
pub fn package_asset_path() -> PathBuf {
    std::env::temp_dir().join("ThePackage.dll")
}

pub fn package_added(asset_paths: impl IntoIterator<Item = PathBuf>) -> KernelEvent {
    KernelEvent::new(PackageAdded {
        package_reference: ResolvedPackageReference::new("ThePackage", "1.2.3", asset_paths),
    })
}

/// One sample per command variant.
pub fn commands() -> Vec<KernelCommand> {
    vec![
        KernelCommand::new(AddPackage::new(PackageReference::new(
            "MyAwesomePackage",
            "1.2.3",
        ))),
        KernelCommand::new(ChangeWorkingDirectory::new(WORKING_DIRECTORY)),
        KernelCommand::new(DisplayError::new("oops!")),
        KernelCommand::new(DisplayValue::new(html_hi()).with_value_id("the-value-id")),
        KernelCommand::new(
            RequestCompletions::new("Cons", LinePosition::new(0, 4)).with_target_kernel("csharp"),
        ),
        KernelCommand::new(RequestDiagnostics::default()),
        KernelCommand::new(RequestHoverText::new(
            "document-contents",
            LinePosition::new(1, 2),
        )),
        submit_code(),
        KernelCommand::new(UpdateDisplayedValue::new(html_hi(), "the-value-id")),
    ]
}

/// One or more samples per event variant, most with a causing command.
pub fn events() -> Vec<KernelEvent> {
    let submit = KernelCommand::new(SubmitCode::new("123"));
    let request_completions =
        KernelCommand::new(RequestCompletions::new("Console.Wri", LinePosition::new(0, 11)));
    let request_hover = KernelCommand::new(RequestHoverText::new(
        "document-contents",
        LinePosition::new(1, 2),
    ));

    vec![
        KernelEvent::caused_by(CodeSubmissionReceived { code: "123".into() }, submit.clone()),
        KernelEvent::caused_by(
            CommandFailed::new(FailureReason::message("Oooops!")),
            submit.clone(),
        ),
        KernelEvent::caused_by(
            CommandFailed::new(FailureReason::with_code("Oooops!", "oops")),
            submit.clone(),
        ),
        KernelEvent::caused_by(CommandSucceeded {}, submit_code().with_token(CAUSING_TOKEN)),
        KernelEvent::caused_by(
            CompleteCodeSubmissionReceived { code: "123".into() },
            submit.clone(),
        ),
        KernelEvent::caused_by(
            CompletionsProduced {
                completion_list: vec![CompletionItem {
                    documentation: Some("Writes the line".into()),
                    ..CompletionItem::simple("WriteLine", "Method")
                }],
            },
            request_completions.clone(),
        ),
        KernelEvent::caused_by(CompletionRequestReceived {}, request_completions),
        KernelEvent::caused_by(
            DiagnosticLogEntryProduced {
                message: "oops!".into(),
            },
            submit.clone(),
        ),
        KernelEvent::caused_by(
            DiagnosticsProduced {
                diagnostics: vec![Diagnostic {
                    line_position_span: LinePositionSpan::new(
                        LinePosition::new(0, 0),
                        LinePosition::new(0, 3),
                    ),
                    severity: DiagnosticSeverity::Error,
                    code: "CS0103".into(),
                    message: "The name 'foo' does not exist in the current context".into(),
                }],
            },
            KernelCommand::new(RequestDiagnostics {
                code: Some("foo".into()),
                target_kernel_name: Some("csharp".into()),
            }),
        ),
        KernelEvent::caused_by(
            DisplayedValueProduced {
                formatted_values: vec![html_hi()],
                value_id: None,
            },
            display_hi(),
        ),
        KernelEvent::caused_by(
            DisplayedValueUpdated {
                formatted_values: vec![html_hi()],
                value_id: "the-value-id".into(),
            },
            display_hi(),
        ),
        KernelEvent::new(ErrorProduced::new("oops!")),
        KernelEvent::caused_by(
            HoverTextProduced {
                content: vec![FormattedValue::new(FormattedValue::TEXT_MARKDOWN, "markdown")],
                line_position_span: Some(LinePositionSpan::new(
                    LinePosition::new(1, 2),
                    LinePosition::new(3, 4),
                )),
            },
            request_hover,
        ),
        KernelEvent::caused_by(IncompleteCodeSubmissionReceived {}, submit.clone()),
        KernelEvent::caused_by(
            InputRequested {
                prompt: "prompt".into(),
            },
            submit.clone(),
        ),
        package_added([package_asset_path()]),
        KernelEvent::caused_by(
            PasswordRequested {
                prompt: "password".into(),
            },
            submit.clone(),
        ),
        KernelEvent::caused_by(
            ReturnValueProduced {
                formatted_values: vec![html_hi()],
                value_id: None,
            },
            display_hi(),
        ),
        KernelEvent::caused_by(
            StandardErrorValueProduced {
                formatted_values: vec![FormattedValue::plain("oops!")],
            },
            submit,
        ),
        KernelEvent::caused_by(
            StandardOutputValueProduced {
                formatted_values: vec![FormattedValue::plain("123")],
            },
            KernelCommand::new(SubmitCode::new("Console.Write(123);").with_target_kernel("csharp")),
        ),
        KernelEvent::caused_by(
            WorkingDirectoryChanged::new(WORKING_DIRECTORY),
            ChangeWorkingDirectory::new(WORKING_DIRECTORY),
        ),
    ]
}
