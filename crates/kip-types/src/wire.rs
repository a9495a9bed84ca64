//! Field-level wire rules shared by every payload type.
//!
//! Paths travel as their string form and are never touched on the way
//! through: no separator normalisation, no canonicalisation, no filesystem
//! access. Use with `#[serde(with = "kip_types::wire::path")]`.

use serde::{Serialize, Serializer};
use std::path::Path;

/// A single `PathBuf` field.
pub mod path {
    use serde::{Deserialize, Deserializer, Serializer, ser::Error as _};
    use std::path::{Path, PathBuf};

    pub fn serialize<S>(path: &Path, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let text = path.to_str().ok_or_else(|| {
            S::Error::custom(format!("path '{}' is not valid UTF-8", path.display()))
        })?;
        serializer.serialize_str(text)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<PathBuf, D::Error>
    where
        D: Deserializer<'de>,
    {
        String::deserialize(deserializer).map(PathBuf::from)
    }
}

/// An ordered `Vec<PathBuf>` field.
pub mod paths {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::path::PathBuf;

    use super::PathText;

    pub fn serialize<S>(paths: &[PathBuf], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(paths.iter().map(|path| PathText(path.as_path())))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<PathBuf>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Vec::<String>::deserialize(deserializer)
            .map(|paths| paths.into_iter().map(PathBuf::from).collect())
    }
}

struct PathText<'a>(&'a Path);

impl Serialize for PathText<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        path::serialize(self.0, serializer)
    }
}
