//! JSON codec for envelopes.
//!
//! Commands travel as `{ "kind", "payload", "token"? }` and events as
//! `{ "kind", "payload", "causingCommandEnvelope"? }`. Optional members are
//! omitted rather than written as `null`. Decoding reads `kind` first,
//! resolves the variant, then decodes the payload against that variant's
//! shape; unknown payload members are ignored.

use kip_types::{Command, CommandToken, Event, Family, KernelCommand, KernelEvent, MessageFamily};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::builtins::{command_registry, event_registry};
use crate::registry::{DecodeFn, Registry};
use crate::{CommandEnvelope, EnvelopeError, EventEnvelope};

const KIND: &str = "kind";
const PAYLOAD: &str = "payload";
const TOKEN: &str = "token";
const CAUSING_COMMAND: &str = "causingCommandEnvelope";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct WireCommandEnvelope<'a> {
    kind: &'a str,
    payload: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    token: Option<&'a CommandToken>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct WireEventEnvelope<'a> {
    kind: &'a str,
    payload: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    causing_command_envelope: Option<WireCommandEnvelope<'a>>,
}

/// Envelope codec over a pair of registries.
#[derive(Debug, Clone, Copy)]
pub struct Codec<'r> {
    commands: &'r Registry<Command>,
    events: &'r Registry<Event>,
}

impl Codec<'static> {
    /// Codec over the built-in registries.
    pub fn builtin() -> Self {
        Self::new(command_registry(), event_registry())
    }
}

impl<'r> Codec<'r> {
    pub fn new(commands: &'r Registry<Command>, events: &'r Registry<Event>) -> Self {
        Self { commands, events }
    }

    pub fn create_command(
        &self,
        command: &KernelCommand,
    ) -> Result<CommandEnvelope, EnvelopeError> {
        let kind = self.commands.discriminator_for(command.command.tag())?;
        Ok(CommandEnvelope {
            kind: kind.to_owned(),
            payload: command.command.clone(),
            token: command.token.clone(),
        })
    }

    pub fn create_event(&self, event: &KernelEvent) -> Result<EventEnvelope, EnvelopeError> {
        let kind = self.events.discriminator_for(event.event.tag())?;
        let causing_command = event
            .command
            .as_ref()
            .map(|command| self.create_command(command))
            .transpose()?;
        Ok(EventEnvelope {
            kind: kind.to_owned(),
            payload: event.event.clone(),
            causing_command,
        })
    }

    pub fn encode_command(&self, envelope: &CommandEnvelope) -> Result<String, EnvelopeError> {
        let wire = self.wire_command(envelope)?;
        serde_json::to_string(&wire)
            .map_err(|source| encode_error(Family::Command, &envelope.kind, source))
    }

    /// Multi-line form for people to read. Decodes to the same envelope.
    pub fn encode_command_pretty(
        &self,
        envelope: &CommandEnvelope,
    ) -> Result<String, EnvelopeError> {
        let wire = self.wire_command(envelope)?;
        serde_json::to_string_pretty(&wire)
            .map_err(|source| encode_error(Family::Command, &envelope.kind, source))
    }

    pub fn command_to_value(&self, envelope: &CommandEnvelope) -> Result<Value, EnvelopeError> {
        let wire = self.wire_command(envelope)?;
        serde_json::to_value(&wire)
            .map_err(|source| encode_error(Family::Command, &envelope.kind, source))
    }

    pub fn encode_event(&self, envelope: &EventEnvelope) -> Result<String, EnvelopeError> {
        let wire = self.wire_event(envelope)?;
        serde_json::to_string(&wire)
            .map_err(|source| encode_error(Family::Event, &envelope.kind, source))
    }

    pub fn encode_event_pretty(&self, envelope: &EventEnvelope) -> Result<String, EnvelopeError> {
        let wire = self.wire_event(envelope)?;
        serde_json::to_string_pretty(&wire)
            .map_err(|source| encode_error(Family::Event, &envelope.kind, source))
    }

    pub fn event_to_value(&self, envelope: &EventEnvelope) -> Result<Value, EnvelopeError> {
        let wire = self.wire_event(envelope)?;
        serde_json::to_value(&wire)
            .map_err(|source| encode_error(Family::Event, &envelope.kind, source))
    }

    pub fn decode_command(&self, text: &str) -> Result<CommandEnvelope, EnvelopeError> {
        self.command_from_value(parse(Family::Command, text)?)
    }

    pub fn decode_event(&self, text: &str) -> Result<EventEnvelope, EnvelopeError> {
        self.event_from_value(parse(Family::Event, text)?)
    }

    pub fn command_from_value(&self, value: Value) -> Result<CommandEnvelope, EnvelopeError> {
        let mut members = into_members(Family::Command, value)?;
        let kind = take_kind(Family::Command, &mut members)?;
        let handlers = self.commands.resolve(&kind)?;
        let payload = take_payload(Family::Command, &kind, &mut members, handlers.decode)?;
        let token = match members.remove(TOKEN) {
            None | Some(Value::Null) => None,
            Some(Value::String(token)) => Some(CommandToken::new(token)),
            Some(_) => {
                return Err(EnvelopeError::malformed(
                    Family::Command,
                    format!("member '{TOKEN}' must be a string"),
                ));
            }
        };
        Ok(CommandEnvelope {
            kind: handlers.discriminator.to_owned(),
            payload,
            token,
        })
    }

    pub fn event_from_value(&self, value: Value) -> Result<EventEnvelope, EnvelopeError> {
        let mut members = into_members(Family::Event, value)?;
        let kind = take_kind(Family::Event, &mut members)?;
        let handlers = self.events.resolve(&kind)?;
        let payload = take_payload(Family::Event, &kind, &mut members, handlers.decode)?;
        let causing_command = match members.remove(CAUSING_COMMAND) {
            None | Some(Value::Null) => None,
            Some(value) => Some(self.command_from_value(value).map_err(|err| match err {
                EnvelopeError::Malformed { reason, .. } => EnvelopeError::malformed(
                    Family::Event,
                    format!("member '{CAUSING_COMMAND}': {reason}"),
                ),
                other => other,
            })?),
        };
        Ok(EventEnvelope {
            kind: handlers.discriminator.to_owned(),
            payload,
            causing_command,
        })
    }

    fn wire_command<'e>(
        &self,
        envelope: &'e CommandEnvelope,
    ) -> Result<WireCommandEnvelope<'e>, EnvelopeError> {
        let payload = encode_payload(self.commands, &envelope.kind, &envelope.payload)?;
        Ok(WireCommandEnvelope {
            kind: &envelope.kind,
            payload,
            token: envelope.token.as_ref(),
        })
    }

    fn wire_event<'e>(
        &self,
        envelope: &'e EventEnvelope,
    ) -> Result<WireEventEnvelope<'e>, EnvelopeError> {
        let payload = encode_payload(self.events, &envelope.kind, &envelope.payload)?;
        let causing_command_envelope = envelope
            .causing_command
            .as_ref()
            .map(|command| self.wire_command(command))
            .transpose()?;
        Ok(WireEventEnvelope {
            kind: &envelope.kind,
            payload,
            causing_command_envelope,
        })
    }
}

fn encode_payload<M: MessageFamily>(
    registry: &Registry<M>,
    kind: &str,
    payload: &M,
) -> Result<Value, EnvelopeError> {
    let handlers = registry.resolve(kind)?;
    (handlers.encode)(payload).map_err(|source| encode_error(M::FAMILY, kind, source))
}

fn encode_error(family: Family, kind: &str, source: serde_json::Error) -> EnvelopeError {
    EnvelopeError::Encode {
        family,
        discriminator: kind.to_owned(),
        source,
    }
}

fn parse(family: Family, text: &str) -> Result<Value, EnvelopeError> {
    serde_json::from_str(text)
        .map_err(|err| EnvelopeError::malformed(family, format!("invalid JSON: {err}")))
}

fn into_members(family: Family, value: Value) -> Result<Map<String, Value>, EnvelopeError> {
    match value {
        Value::Object(members) => Ok(members),
        other => Err(EnvelopeError::malformed(
            family,
            format!("expected a JSON object, found {}", json_type(&other)),
        )),
    }
}

fn take_kind(family: Family, members: &mut Map<String, Value>) -> Result<String, EnvelopeError> {
    match members.remove(KIND) {
        Some(Value::String(kind)) => Ok(kind),
        Some(other) => Err(EnvelopeError::malformed(
            family,
            format!("member '{KIND}' must be a string, found {}", json_type(&other)),
        )),
        None => Err(EnvelopeError::malformed(
            family,
            format!("missing member '{KIND}'"),
        )),
    }
}

fn take_payload<M>(
    family: Family,
    kind: &str,
    members: &mut Map<String, Value>,
    decode: DecodeFn<M>,
) -> Result<M, EnvelopeError> {
    match members.remove(PAYLOAD) {
        Some(payload @ Value::Object(_)) => decode(payload).map_err(|err| {
            EnvelopeError::malformed(family, format!("payload does not match '{kind}': {err}"))
        }),
        Some(other) => Err(EnvelopeError::malformed(
            family,
            format!("member '{PAYLOAD}' must be an object, found {}", json_type(&other)),
        )),
        None => Err(EnvelopeError::malformed(
            family,
            format!("missing member '{PAYLOAD}'"),
        )),
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
