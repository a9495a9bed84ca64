//! In-process message objects.
//!
//! `KernelCommand` and `KernelEvent` wrap the wire payloads with state that
//! only makes sense inside one process: an ambient property bag and the
//! handler that executes the command. Codecs only ever see the wrapped
//! `Command`/`Event` and the correlation token.

use serde::{Deserialize, Serialize};
use std::{any::Any, collections::HashMap, fmt, sync::Arc};

use crate::{Command, Event, EventType, MessageFamily};

/// Correlation id linking a command to the events it produces.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommandToken(String);

impl CommandToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// A fresh random token.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CommandToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<S: Into<String>> From<S> for CommandToken {
    fn from(value: S) -> Self {
        Self::new(value)
    }
}

pub type PropertyBag = HashMap<String, Arc<dyn Any + Send + Sync>>;

/// Executes a command and reports the events it produced.
pub type CommandHandler = Arc<dyn Fn(&KernelCommand) -> Vec<KernelEvent> + Send + Sync>;

#[derive(Clone)]
pub struct KernelCommand {
    pub command: Command,
    pub token: Option<CommandToken>,
    properties: PropertyBag,
    handler: Option<CommandHandler>,
}

impl KernelCommand {
    pub fn new(command: impl Into<Command>) -> Self {
        Self {
            command: command.into(),
            token: None,
            properties: PropertyBag::new(),
            handler: None,
        }
    }

    pub fn with_token(mut self, token: impl Into<CommandToken>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn with_handler<F>(mut self, handler: F) -> Self
    where
        F: Fn(&KernelCommand) -> Vec<KernelEvent> + Send + Sync + 'static,
    {
        self.handler = Some(Arc::new(handler));
        self
    }

    /// The token, generating and storing one first if the command has none.
    pub fn ensure_token(&mut self) -> &CommandToken {
        self.token.get_or_insert_with(CommandToken::generate)
    }

    pub fn handler(&self) -> Option<&CommandHandler> {
        self.handler.as_ref()
    }

    /// Run the attached handler; a command without one produces nothing.
    pub fn invoke(&self) -> Vec<KernelEvent> {
        match &self.handler {
            Some(handler) => handler(self),
            None => Vec::new(),
        }
    }

    pub fn properties(&self) -> &PropertyBag {
        &self.properties
    }

    pub fn set_property<T>(&mut self, key: impl Into<String>, value: T)
    where
        T: Any + Send + Sync,
    {
        self.properties.insert(key.into(), Arc::new(value));
    }

    pub fn property<T: Any>(&self, key: &str) -> Option<&T> {
        self.properties.get(key)?.downcast_ref::<T>()
    }
}

impl fmt::Debug for KernelCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<_> = self.properties.keys().collect();
        keys.sort();
        f.debug_struct("KernelCommand")
            .field("command", &self.command)
            .field("token", &self.token)
            .field("properties", &keys)
            .field("handler", &self.handler.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

impl<T: Into<Command>> From<T> for KernelCommand {
    fn from(command: T) -> Self {
        Self::new(command)
    }
}

#[derive(Debug, Clone)]
pub struct KernelEvent {
    pub event: Event,
    /// The command whose execution produced this event, if known.
    pub command: Option<KernelCommand>,
}

impl KernelEvent {
    pub fn new(event: impl Into<Event>) -> Self {
        Self {
            event: event.into(),
            command: None,
        }
    }

    pub fn caused_by(event: impl Into<Event>, command: impl Into<KernelCommand>) -> Self {
        Self {
            event: event.into(),
            command: Some(command.into()),
        }
    }

    pub fn event_type(&self) -> EventType {
        self.event.tag()
    }
}
