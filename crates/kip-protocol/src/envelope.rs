use kip_types::{Command, CommandToken, Event, KernelCommand, KernelEvent};
use serde_json::Value;

use crate::{Codec, EnvelopeError};

/// Wire wrapper for one command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandEnvelope {
    pub kind: String,
    pub payload: Command,
    pub token: Option<CommandToken>,
}

/// Wire wrapper for one event, optionally carrying a copy of the command
/// that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventEnvelope {
    pub kind: String,
    pub payload: Event,
    pub causing_command: Option<CommandEnvelope>,
}

impl CommandEnvelope {
    pub fn create(command: &KernelCommand) -> Result<Self, EnvelopeError> {
        Codec::builtin().create_command(command)
    }

    pub fn encode(&self) -> Result<String, EnvelopeError> {
        Codec::builtin().encode_command(self)
    }

    pub fn encode_pretty(&self) -> Result<String, EnvelopeError> {
        Codec::builtin().encode_command_pretty(self)
    }

    pub fn decode(text: &str) -> Result<Self, EnvelopeError> {
        Codec::builtin().decode_command(text)
    }

    pub fn to_value(&self) -> Result<Value, EnvelopeError> {
        Codec::builtin().command_to_value(self)
    }

    pub fn from_value(value: Value) -> Result<Self, EnvelopeError> {
        Codec::builtin().command_from_value(value)
    }

    /// Rebuild the in-process command. Runtime-local state starts empty.
    pub fn into_command(self) -> KernelCommand {
        let mut command = KernelCommand::new(self.payload);
        command.token = self.token;
        command
    }
}

impl EventEnvelope {
    pub fn create(event: &KernelEvent) -> Result<Self, EnvelopeError> {
        Codec::builtin().create_event(event)
    }

    pub fn encode(&self) -> Result<String, EnvelopeError> {
        Codec::builtin().encode_event(self)
    }

    pub fn encode_pretty(&self) -> Result<String, EnvelopeError> {
        Codec::builtin().encode_event_pretty(self)
    }

    pub fn decode(text: &str) -> Result<Self, EnvelopeError> {
        Codec::builtin().decode_event(text)
    }

    pub fn to_value(&self) -> Result<Value, EnvelopeError> {
        Codec::builtin().event_to_value(self)
    }

    pub fn from_value(value: Value) -> Result<Self, EnvelopeError> {
        Codec::builtin().event_from_value(value)
    }

    pub fn into_event(self) -> KernelEvent {
        KernelEvent {
            event: self.payload,
            command: self.causing_command.map(CommandEnvelope::into_command),
        }
    }
}
