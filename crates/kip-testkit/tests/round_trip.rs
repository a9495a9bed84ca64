use kip_protocol::{CommandEnvelope, EventEnvelope};
use kip_testkit::corpus;
use kip_types::commands::SubmitCode;
use kip_types::events::{CommandFailed, CommandSucceeded, PackageAdded};
use kip_types::{
    Command, CommandToken, Event, EventType, FailureReason, KernelCommand, KernelEvent,
    SubmissionType,
};
use serde_json::json;
use std::path::PathBuf;

fn round_trip_event(event: &KernelEvent) -> EventEnvelope {
    let original = EventEnvelope::create(event).expect("create");
    let json = original.encode().expect("encode");
    let decoded = EventEnvelope::decode(&json).expect("decode");
    assert_eq!(decoded, original, "{json}");
    decoded
}

/// Every sample command survives encode/decode with kind, payload and token intact.
#[test]
fn all_commands_round_trip() {
    for command in corpus::commands() {
        let command = command.with_token("token-1");
        let original = CommandEnvelope::create(&command).expect("create");
        let json = original.encode().expect("encode");
        let decoded = CommandEnvelope::decode(&json).expect("decode");
        assert_eq!(decoded, original, "{json}");

        let rebuilt = decoded.into_command();
        assert_eq!(rebuilt.command, command.command);
        assert_eq!(rebuilt.token, command.token);
    }
}

#[test]
fn all_events_round_trip_with_causing_command() {
    for event in corpus::events() {
        let decoded = round_trip_event(&event);
        let rebuilt = decoded.into_event();
        assert_eq!(rebuilt.event, event.event);
        assert_eq!(
            rebuilt.command.as_ref().map(|c| &c.command),
            event.command.as_ref().map(|c| &c.command),
        );
        assert_eq!(
            rebuilt.command.as_ref().and_then(|c| c.token.as_ref()),
            event.command.as_ref().and_then(|c| c.token.as_ref()),
        );
    }
}

#[test]
fn causing_command_token_survives_the_wire() {
    let event = corpus::events()
        .into_iter()
        .find(|e| e.event_type() == EventType::CommandSucceeded)
        .expect("CommandSucceeded sample");
    let json = EventEnvelope::create(&event)
        .expect("create")
        .encode()
        .expect("encode");
    assert!(json.contains(r#""token":"submit-token-1""#), "{json}");

    let decoded = EventEnvelope::decode(&json).expect("decode");
    let cause = decoded.causing_command.as_ref().expect("causing command");
    assert_eq!(cause.token, Some(CommandToken::new(corpus::CAUSING_TOKEN)));
    let rebuilt = decoded.into_event().command.expect("causing command");
    assert_eq!(rebuilt.token, Some(CommandToken::new(corpus::CAUSING_TOKEN)));
}

#[test]
fn submit_code_scenario() {
    let command = corpus::submit_code();
    let envelope = CommandEnvelope::create(&command).expect("create");
    assert_eq!(envelope.kind, "SubmitCode");
    assert_eq!(
        envelope.to_value().expect("to_value"),
        json!({
            "kind": "SubmitCode",
            "payload": { "code": "123", "targetKernelName": "csharp", "submissionType": "run" },
        })
    );

    let succeeded = KernelEvent::caused_by(CommandSucceeded {}, command);
    let decoded = round_trip_event(&succeeded);
    assert_eq!(decoded.kind, "CommandSucceeded");
    let cause = decoded.causing_command.expect("causing command");
    assert_eq!(cause.kind, "SubmitCode");
    assert_eq!(
        cause.payload,
        Command::SubmitCode(
            SubmitCode::new("123")
                .with_target_kernel("csharp")
                .with_submission_type(SubmissionType::Run)
        )
    );
}

#[test]
fn event_without_cause_decodes_without_cause() {
    let decoded = round_trip_event(&KernelEvent::new(CommandSucceeded {}));
    assert!(decoded.causing_command.is_none());
    assert!(decoded.into_event().command.is_none());
}

fn asset_paths(envelope: EventEnvelope) -> Vec<PathBuf> {
    match envelope.payload {
        Event::PackageAdded(PackageAdded { package_reference }) => {
            assert_eq!(package_reference.package_name, "ThePackage");
            assert_eq!(package_reference.package_version, "1.2.3");
            package_reference.asset_paths
        }
        other => panic!("expected PackageAdded, got {other:?}"),
    }
}

#[test]
fn package_added_preserves_temp_file_path() {
    let file = tempfile::NamedTempFile::new().expect("temp file");
    let path = file.path().to_path_buf();
    let decoded = round_trip_event(&corpus::package_added([path.clone()]));
    assert_eq!(asset_paths(decoded), vec![path]);
}

#[test]
fn package_added_preserves_backslash_separators() {
    let windows = PathBuf::from(r"C:\Users\me\AppData\Local\Temp\tmp1A2B.tmp");
    let event = corpus::package_added([windows.clone()]);
    let json = EventEnvelope::create(&event)
        .expect("create")
        .encode()
        .expect("encode");
    assert!(
        json.contains(r#""C:\\Users\\me\\AppData\\Local\\Temp\\tmp1A2B.tmp""#),
        "{json}"
    );
    let decoded = EventEnvelope::decode(&json).expect("decode");
    assert_eq!(asset_paths(decoded), vec![windows]);
}

#[test]
fn failure_reason_wire_forms() {
    let bare = r#"{"kind":"CommandFailed","payload":{"reason":"Oooops!"}}"#;
    let structured = r#"{"kind":"CommandFailed","payload":{"reason":{"message":"Oooops!"}}}"#;
    let a = EventEnvelope::decode(bare).expect("bare");
    let b = EventEnvelope::decode(structured).expect("structured");
    assert_eq!(a, b);
    assert_eq!(a.encode().expect("encode"), bare);

    let with_code = EventEnvelope::create(&KernelEvent::new(CommandFailed::new(
        FailureReason::with_code("Oooops!", "oops"),
    )))
    .expect("create");
    assert_eq!(
        with_code.to_value().expect("to_value")["payload"]["reason"],
        json!({ "message": "Oooops!", "code": "oops" })
    );
}

#[test]
fn runtime_local_state_is_not_on_the_wire() {
    let mut command = KernelCommand::new(SubmitCode::new("x"))
        .with_token("t-9")
        .with_handler(|_| Vec::new());
    command.set_property("cell", 7u32);

    let envelope = CommandEnvelope::create(&command).expect("create");
    let value = envelope.to_value().expect("to_value");
    assert_eq!(
        value,
        json!({
            "kind": "SubmitCode",
            "payload": { "code": "x", "submissionType": "run" },
            "token": "t-9",
        })
    );

    let rebuilt = CommandEnvelope::from_value(value)
        .expect("from_value")
        .into_command();
    assert_eq!(rebuilt.command, command.command);
    assert!(rebuilt.handler().is_none());
    assert!(rebuilt.property::<u32>("cell").is_none());
}
