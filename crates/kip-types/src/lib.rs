//! Kernel protocol payload types: the command and event catalog shared by
//! both ends of a kernel channel, plus the field-level wire rules they use.

pub mod commands;
pub mod events;
mod failure;
mod family;
mod formatting;
mod kernel;
mod language;
mod package;
mod position;
pub mod wire;

pub use commands::{Command, CommandType};
pub use events::{Event, EventType};
pub use failure::FailureReason;
pub use family::{Family, MessageFamily, Variant};
pub use formatting::FormattedValue;
pub use kernel::{CommandHandler, CommandToken, KernelCommand, KernelEvent, PropertyBag};
pub use language::{CompletionItem, Diagnostic, DiagnosticSeverity, SubmissionType};
pub use package::{PackageReference, ResolvedPackageReference};
pub use position::{LinePosition, LinePositionSpan};
