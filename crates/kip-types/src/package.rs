use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A package requested by name and (optionally) version.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct PackageReference {
    pub package_name: String,
    /// Empty means "latest".
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub package_version: String,
}

impl PackageReference {
    pub fn new(package_name: impl Into<String>, package_version: impl Into<String>) -> Self {
        Self {
            package_name: package_name.into(),
            package_version: package_version.into(),
        }
    }
}

/// A package after restore: the concrete version and the asset paths it
/// resolved to, in load order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedPackageReference {
    pub package_name: String,
    pub package_version: String,
    #[serde(default, with = "crate::wire::paths")]
    pub asset_paths: Vec<PathBuf>,
}

impl ResolvedPackageReference {
    pub fn new(
        package_name: impl Into<String>,
        package_version: impl Into<String>,
        asset_paths: impl IntoIterator<Item = PathBuf>,
    ) -> Self {
        Self {
            package_name: package_name.into(),
            package_version: package_version.into(),
            asset_paths: asset_paths.into_iter().collect(),
        }
    }

    pub fn reference(&self) -> PackageReference {
        PackageReference::new(self.package_name.clone(), self.package_version.clone())
    }
}
