//! Envelope layer of the kernel protocol: the discriminator registry, the
//! command/event envelopes, and the JSON codec between them and wire text.

pub mod builtins;
mod codec;
mod config;
pub mod dispatch;
mod envelope;
mod error;
pub mod registry;

pub use builtins::{command_registry, event_registry};
pub use codec::Codec;
pub use config::{ConfigError, ReceiveConfig};
pub use dispatch::{Dispatcher, LineFailure, ReceiveSummary, Receiver};
pub use envelope::{CommandEnvelope, EventEnvelope};
pub use error::{EnvelopeError, RegistryError};
pub use registry::{Registry, VariantHandlers};
