//! Catalog / registry / corpus agreement.
//!
//! Adding a variant to a family without registering a discriminator for it,
//! or without a corpus sample, is caught here rather than on a live channel.

use kip_protocol::{Registry, command_registry, event_registry};
use kip_types::{Command, Event, Family, KernelCommand, KernelEvent, MessageFamily};
use std::collections::BTreeSet;
use std::fmt;
use thiserror::Error;

/// A set of variant names compared against the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Corpus,
    RegistryDiscriminators,
    RegistryVariants,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Source::Corpus => "corpus",
            Source::RegistryDiscriminators => "registry discriminators",
            Source::RegistryVariants => "registry variants",
        })
    }
}

/// Names a source lacks (`missing`) or has beyond the catalog (`extra`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Asymmetry {
    pub source: Source,
    pub missing: Vec<String>,
    pub extra: Vec<String>,
}

impl fmt::Display for Asymmetry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:", self.source)?;
        if !self.missing.is_empty() {
            write!(f, " missing [{}]", self.missing.join(", "))?;
        }
        if !self.extra.is_empty() {
            write!(f, " extra [{}]", self.extra.join(", "))?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{} catalog is not exhaustively covered: {}", .family, render(.asymmetries))]
pub struct ExhaustivenessError {
    pub family: Family,
    pub asymmetries: Vec<Asymmetry>,
}

impl ExhaustivenessError {
    /// True if any source is missing `name` or carries it as an extra.
    pub fn mentions(&self, name: &str) -> bool {
        self.asymmetries
            .iter()
            .any(|a| a.missing.iter().chain(&a.extra).any(|n| n == name))
    }
}

fn render(asymmetries: &[Asymmetry]) -> String {
    asymmetries
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Compare the catalog of `M` with a registry and the tags a corpus exercises.
pub fn check<M, I>(registry: &Registry<M>, corpus: I) -> Result<(), ExhaustivenessError>
where
    M: MessageFamily,
    I: IntoIterator<Item = M::Tag>,
{
    let catalog: BTreeSet<String> = M::catalog()
        .iter()
        .map(|tag| M::tag_name(*tag).to_string())
        .collect();
    let sources = [
        (
            Source::Corpus,
            corpus
                .into_iter()
                .map(|tag| M::tag_name(tag).to_string())
                .collect::<BTreeSet<_>>(),
        ),
        (
            Source::RegistryDiscriminators,
            registry.discriminators().map(str::to_string).collect(),
        ),
        (
            Source::RegistryVariants,
            registry
                .variants()
                .map(|tag| M::tag_name(tag).to_string())
                .collect(),
        ),
    ];

    let asymmetries: Vec<_> = sources
        .into_iter()
        .filter_map(|(source, names)| {
            let missing: Vec<_> = catalog.difference(&names).cloned().collect();
            let extra: Vec<_> = names.difference(&catalog).cloned().collect();
            (!missing.is_empty() || !extra.is_empty()).then_some(Asymmetry {
                source,
                missing,
                extra,
            })
        })
        .collect();

    if asymmetries.is_empty() {
        Ok(())
    } else {
        Err(ExhaustivenessError {
            family: M::FAMILY,
            asymmetries,
        })
    }
}

pub fn check_commands(
    registry: &Registry<Command>,
    corpus: &[KernelCommand],
) -> Result<(), ExhaustivenessError> {
    check(registry, corpus.iter().map(|c| c.command.tag()))
}

pub fn check_events(
    registry: &Registry<Event>,
    corpus: &[KernelEvent],
) -> Result<(), ExhaustivenessError> {
    check(registry, corpus.iter().map(|e| e.event.tag()))
}

/// Both families against the built-in registries and the sample corpus.
pub fn check_builtins() -> Result<(), ExhaustivenessError> {
    check_commands(command_registry(), &crate::corpus::commands())?;
    check_events(event_registry(), &crate::corpus::events())
}
