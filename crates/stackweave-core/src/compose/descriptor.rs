//! Deployment descriptor: the hand-off artifact for an external deployer.
//!
//! Built once by [`compose`](super::compose) and read-only afterwards.
//!
//! ## Digest
//!
//! `digest()` hashes the canonical JSON form (object keys sorted), so two
//! descriptors with the same settings and the same addon order produce the
//! same digest. Reordering addons changes it.

use serde::Serialize;
use sha2::{Digest, Sha256};

use super::model::{AddonUnit, GlobalSettings};
use crate::errors::Result;

/// Ordered addon units plus global settings
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeploymentDescriptor {
    settings: GlobalSettings,
    addons: Vec<AddonUnit>,
}

impl DeploymentDescriptor {
    pub(crate) fn new(settings: GlobalSettings, addons: Vec<AddonUnit>) -> Self {
        Self { settings, addons }
    }

    pub fn settings(&self) -> &GlobalSettings {
        &self.settings
    }

    /// Addons in deployment order
    pub fn addons(&self) -> &[AddonUnit] {
        &self.addons
    }

    pub fn addon_names(&self) -> Vec<&str> {
        self.addons.iter().map(|a| a.name.as_str()).collect()
    }

    pub fn addon(&self, name: &str) -> Option<&AddonUnit> {
        self.addons.iter().find(|a| a.name == name)
    }

    /// Hex-encoded SHA256 of the canonical JSON form (64 characters)
    ///
    /// # Errors
    ///
    /// Returns `StackError::Serialization` if JSON serialization fails.
    pub fn digest(&self) -> Result<String> {
        let canonical = serde_json::to_string(self)?;
        let mut hasher = Sha256::new();
        hasher.update(canonical.as_bytes());
        Ok(hex::encode(hasher.finalize()))
    }

    /// Pretty JSON for the deployer
    ///
    /// # Errors
    ///
    /// Returns `StackError::Serialization` if JSON serialization fails.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// YAML for the deployer
    ///
    /// # Errors
    ///
    /// Returns `StackError::Serialization` if YAML serialization fails.
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn descriptor(names: &[&str]) -> DeploymentDescriptor {
        let settings = GlobalSettings::new("111122223333", "us-west-2", "1.31");
        let addons = names
            .iter()
            .map(|n| AddonUnit::with_values(*n, json!({"name": n})))
            .collect();
        DeploymentDescriptor::new(settings, addons)
    }

    #[test]
    fn test_digest_deterministic() {
        let d1 = descriptor(&["a", "b"]).digest().unwrap();
        let d2 = descriptor(&["a", "b"]).digest().unwrap();
        assert_eq!(d1, d2);
        assert_eq!(d1.len(), 64);
    }

    #[test]
    fn test_digest_order_sensitive() {
        let d1 = descriptor(&["a", "b"]).digest().unwrap();
        let d2 = descriptor(&["b", "a"]).digest().unwrap();
        assert_ne!(d1, d2);
    }

    #[test]
    fn test_addon_lookup() {
        let d = descriptor(&["a", "b"]);
        assert_eq!(d.addon_names(), ["a", "b"]);
        assert!(d.addon("b").is_some());
        assert!(d.addon("z").is_none());
    }

    #[test]
    fn test_json_shape() {
        let d = descriptor(&["a"]);
        let value: serde_json::Value = serde_json::from_str(&d.to_json_pretty().unwrap()).unwrap();
        assert_eq!(value["settings"]["region"], "us-west-2");
        assert_eq!(value["addons"][0]["name"], "a");
        assert_eq!(value["addons"][0]["payload"]["values"]["name"], "a");
    }
}
