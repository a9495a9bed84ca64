//! Shared fixtures and checks for exercising the kernel protocol.
//!
//! - `corpus`: one or more sample messages for every command and event
//! - `exhaustive`: verifies that catalog, registry and corpus agree

pub mod corpus;
pub mod exhaustive;

pub use exhaustive::{
    Asymmetry, ExhaustivenessError, Source, check_builtins, check_commands, check_events,
};
