//! Discriminator registry: the bidirectional mapping between the stable wire
//! tag of a variant and the functions that encode/decode its payload.

use indexmap::IndexMap;
use kip_types::{Family, MessageFamily, Variant};
use serde_json::Value;
use std::{collections::HashMap, fmt};

use crate::error::RegistryError;

pub type EncodeFn<M> = fn(&M) -> Result<Value, serde_json::Error>;
pub type DecodeFn<M> = fn(Value) -> Result<M, serde_json::Error>;

pub struct VariantHandlers<M: MessageFamily> {
    pub discriminator: &'static str,
    pub tag: M::Tag,
    pub encode: EncodeFn<M>,
    pub decode: DecodeFn<M>,
}

impl<M: MessageFamily> fmt::Debug for VariantHandlers<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VariantHandlers")
            .field("discriminator", &self.discriminator)
            .field("tag", &self.tag)
            .finish_non_exhaustive()
    }
}

/// Registry for one message family. Entries keep registration order.
pub struct Registry<M: MessageFamily> {
    entries: IndexMap<&'static str, VariantHandlers<M>>,
    by_tag: HashMap<M::Tag, &'static str>,
}

impl<M: MessageFamily> Registry<M> {
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
            by_tag: HashMap::new(),
        }
    }

    pub fn family(&self) -> Family {
        M::FAMILY
    }

    pub fn register(
        &mut self,
        discriminator: &'static str,
        tag: M::Tag,
        encode: EncodeFn<M>,
        decode: DecodeFn<M>,
    ) -> Result<(), RegistryError> {
        if self.entries.contains_key(discriminator) {
            return Err(RegistryError::DuplicateDiscriminator {
                family: M::FAMILY,
                discriminator: discriminator.to_string(),
            });
        }
        if let Some(existing) = self.by_tag.get(&tag) {
            return Err(RegistryError::DuplicateVariant {
                family: M::FAMILY,
                variant: M::tag_name(tag),
                existing: existing.to_string(),
            });
        }
        self.by_tag.insert(tag, discriminator);
        self.entries.insert(
            discriminator,
            VariantHandlers {
                discriminator,
                tag,
                encode,
                decode,
            },
        );
        Ok(())
    }

    /// Register `V` with serde-derived payload encoding.
    pub fn register_variant<V: Variant<M>>(
        &mut self,
        discriminator: &'static str,
    ) -> Result<(), RegistryError> {
        self.register(
            discriminator,
            V::TAG,
            encode_variant::<M, V>,
            decode_variant::<M, V>,
        )
    }

    pub fn resolve(&self, discriminator: &str) -> Result<&VariantHandlers<M>, RegistryError> {
        self.entries
            .get(discriminator)
            .ok_or_else(|| RegistryError::UnknownDiscriminator {
                family: M::FAMILY,
                discriminator: discriminator.to_string(),
            })
    }

    pub fn discriminator_for(&self, tag: M::Tag) -> Result<&'static str, RegistryError> {
        self.by_tag
            .get(&tag)
            .copied()
            .ok_or(RegistryError::UnregisteredVariant {
                family: M::FAMILY,
                variant: M::tag_name(tag),
            })
    }

    pub fn contains(&self, discriminator: &str) -> bool {
        self.entries.contains_key(discriminator)
    }

    pub fn discriminators(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.keys().copied()
    }

    pub fn variants(&self) -> impl Iterator<Item = M::Tag> + '_ {
        self.entries.values().map(|handlers| handlers.tag)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<M: MessageFamily> Default for Registry<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: MessageFamily> fmt::Debug for Registry<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("family", &M::FAMILY)
            .field("discriminators", &self.entries.keys().collect::<Vec<_>>())
            .finish()
    }
}

fn encode_variant<M, V>(message: &M) -> Result<Value, serde_json::Error>
where
    M: MessageFamily,
    V: Variant<M>,
{
    let payload = V::peel(message).ok_or_else(|| {
        <serde_json::Error as serde::ser::Error>::custom(format!(
            "expected {} payload, found {}",
            M::tag_name(V::TAG),
            M::tag_name(message.tag())
        ))
    })?;
    serde_json::to_value(payload)
}

fn decode_variant<M, V>(payload: Value) -> Result<M, serde_json::Error>
where
    M: MessageFamily,
    V: Variant<M>,
{
    serde_json::from_value::<V>(payload).map(Into::into)
}
