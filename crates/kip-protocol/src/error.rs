use kip_types::Family;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("{family} discriminator '{discriminator}' is already registered")]
    DuplicateDiscriminator {
        family: Family,
        discriminator: String,
    },
    #[error("{family} variant {variant} is already registered as '{existing}'")]
    DuplicateVariant {
        family: Family,
        variant: &'static str,
        existing: String,
    },
    #[error("unknown {family} discriminator '{discriminator}'")]
    UnknownDiscriminator {
        family: Family,
        discriminator: String,
    },
    #[error("{family} variant {variant} has no registered discriminator")]
    UnregisteredVariant {
        family: Family,
        variant: &'static str,
    },
}

/// Failure to build, encode or decode one envelope. Never leaves a partial
/// envelope behind.
#[derive(Debug, Error)]
pub enum EnvelopeError {
    #[error(transparent)]
    Registry(#[from] RegistryError),
    #[error("malformed {family} envelope: {reason}")]
    Malformed { family: Family, reason: String },
    #[error("failed to encode {family} payload '{discriminator}': {source}")]
    Encode {
        family: Family,
        discriminator: String,
        #[source]
        source: serde_json::Error,
    },
}

impl EnvelopeError {
    pub(crate) fn malformed(family: Family, reason: impl Into<String>) -> Self {
        EnvelopeError::Malformed {
            family,
            reason: reason.into(),
        }
    }

    /// True for failures caused by the received text, which the transport can
    /// drop or nack while the channel carries on.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            EnvelopeError::Malformed { .. }
                | EnvelopeError::Registry(RegistryError::UnknownDiscriminator { .. })
        )
    }
}
