//! The process-wide registries for every built-in command and event.
//!
//! Discriminators equal the variant names and must never change once
//! released: they are what both ends of a channel match on.

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
use kip_types::{Command, Event};
use once_cell::sync::Lazy;
use tracing::debug;

use crate::{RegistryError, registry::Registry};

static COMMAND_REGISTRY: Lazy<Registry<Command>> = Lazy::new(|| {
    let registry = builtin_commands()
        .unwrap_or_else(|err| panic!("builtin command registry is inconsistent: {err}"));
    debug!(variants = registry.len(), "command registry initialised");
    registry
});

static EVENT_REGISTRY: Lazy<Registry<Event>> = Lazy::new(|| {
    let registry = builtin_events()
        .unwrap_or_else(|err| panic!("builtin event registry is inconsistent: {err}"));
    debug!(variants = registry.len(), "event registry initialised");
    registry
});

pub fn command_registry() -> &'static Registry<Command> {
    &COMMAND_REGISTRY
}

pub fn event_registry() -> &'static Registry<Event> {
    &EVENT_REGISTRY
}

/// Builds a fresh copy of the built-in command registry.
pub fn builtin_commands() -> Result<Registry<Command>, RegistryError> {
    let mut registry = Registry::new();
    registry.register_variant::<AddPackage>("AddPackage")?;
    registry.register_variant::<ChangeWorkingDirectory>("ChangeWorkingDirectory")?;
    registry.register_variant::<DisplayError>("DisplayError")?;
    registry.register_variant::<DisplayValue>("DisplayValue")?;
    registry.register_variant::<RequestCompletions>("RequestCompletions")?;
    registry.register_variant::<RequestDiagnostics>("RequestDiagnostics")?;
    registry.register_variant::<RequestHoverText>("RequestHoverText")?;
    registry.register_variant::<SubmitCode>("SubmitCode")?;
    registry.register_variant::<UpdateDisplayedValue>("UpdateDisplayedValue")?;
    Ok(registry)
}

/// Builds a fresh copy of the built-in event registry.
pub fn builtin_events() -> Result<Registry<Event>, RegistryError> {
    let mut registry = Registry::new();
    registry.register_variant::<CodeSubmissionReceived>("CodeSubmissionReceived")?;
    registry.register_variant::<CommandFailed>("CommandFailed")?;
    registry.register_variant::<CommandSucceeded>("CommandSucceeded")?;
    registry.register_variant::<CompleteCodeSubmissionReceived>("CompleteCodeSubmissionReceived")?;
    registry.register_variant::<CompletionsProduced>("CompletionsProduced")?;
    registry.register_variant::<CompletionRequestReceived>("CompletionRequestReceived")?;
    registry.register_variant::<DiagnosticLogEntryProduced>("DiagnosticLogEntryProduced")?;
    registry.register_variant::<DiagnosticsProduced>("DiagnosticsProduced")?;
    registry.register_variant::<DisplayedValueProduced>("DisplayedValueProduced")?;
    registry.register_variant::<DisplayedValueUpdated>("DisplayedValueUpdated")?;
    registry.register_variant::<ErrorProduced>("ErrorProduced")?;
    registry.register_variant::<HoverTextProduced>("HoverTextProduced")?;
    registry
        .register_variant::<IncompleteCodeSubmissionReceived>("IncompleteCodeSubmissionReceived")?;
    registry.register_variant::<InputRequested>("InputRequested")?;
    registry.register_variant::<PackageAdded>("PackageAdded")?;
    registry.register_variant::<PasswordRequested>("PasswordRequested")?;
    registry.register_variant::<ReturnValueProduced>("ReturnValueProduced")?;
    registry.register_variant::<StandardErrorValueProduced>("StandardErrorValueProduced")?;
    registry.register_variant::<StandardOutputValueProduced>("StandardOutputValueProduced")?;
    registry.register_variant::<WorkingDirectoryChanged>("WorkingDirectoryChanged")?;
    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use kip_types::{CommandType, EventType};
    use std::thread;

    #[test]
    fn builtin_registries_cover_every_tag() {
        for tag in CommandType::ALL {
            assert_eq!(command_registry().discriminator_for(*tag).unwrap(), tag.name());
        }
        for tag in EventType::ALL {
            assert_eq!(event_registry().discriminator_for(*tag).unwrap(), tag.name());
        }
        assert_eq!(command_registry().len(), CommandType::ALL.len());
        assert_eq!(event_registry().len(), EventType::ALL.len());
    }

    #[test]
    fn concurrent_first_use_sees_one_registry() {
        let handles: Vec<_> = (0..8)
            .map(|_| thread::spawn(|| event_registry() as *const Registry<Event> as usize))
            .collect();
        let addrs: Vec<usize> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert!(addrs.windows(2).all(|pair| pair[0] == pair[1]));
    }
}
