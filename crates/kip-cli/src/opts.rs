//! Global CLI options.

use clap::{Args, ValueEnum};
use kip_types::Family;

/// Options shared by every command; the family and pretty flags can also be
/// set via env vars.
#[derive(Args, Debug, Clone)]
pub struct GlobalOpts {
    /// Message family to operate on (env: KIP_FAMILY, default: both where allowed)
    #[arg(short = 'f', long, value_enum, global = true, env = "KIP_FAMILY")]
    pub family: Option<FamilyArg>,

    /// JSON output envelope
    #[arg(long, global = true)]
    pub json: bool,

    /// Pretty-print JSON output (env: KIP_PRETTY)
    #[arg(long, global = true, env = "KIP_PRETTY")]
    pub pretty: bool,
}

impl GlobalOpts {
    /// The selected family, or both when none was given.
    pub fn families(&self) -> Vec<Family> {
        match self.family {
            Some(family) => vec![family.into()],
            None => vec![Family::Command, Family::Event],
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FamilyArg {
    Command,
    Event,
}

impl From<FamilyArg> for Family {
    fn from(value: FamilyArg) -> Self {
        match value {
            FamilyArg::Command => Family::Command,
            FamilyArg::Event => Family::Event,
        }
    }
}
