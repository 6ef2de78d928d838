use serde::{Deserialize, Serialize};

use crate::template::Document;

/// Configuration carried by an addon unit
///
/// Opaque to the composer: it is moved into the descriptor untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AddonPayload {
    /// A rendered template (e.g. collector configuration)
    Document(String),
    /// Structured values handed to the deployer as-is
    Values(serde_json::Value),
}

impl Default for AddonPayload {
    fn default() -> Self {
        AddonPayload::Values(serde_json::Value::Null)
    }
}

/// Ordering constraint relative to one named counterpart
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderingHint {
    /// This unit must be applied before the named addon
    Before(String),
    /// This unit must be applied after the named addon
    After(String),
}

impl OrderingHint {
    /// Name of the counterpart addon
    pub fn counterpart(&self) -> &str {
        match self {
            OrderingHint::Before(name) | OrderingHint::After(name) => name,
        }
    }
}

/// A named, independently configured piece of a deployment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddonUnit {
    pub name: String,
    pub payload: AddonPayload,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ordering: Option<OrderingHint>,
}

impl AddonUnit {
    pub fn new(name: impl Into<String>, payload: AddonPayload) -> Self {
        Self {
            name: name.into(),
            payload,
            ordering: None,
        }
    }

    /// Unit carrying structured values
    pub fn with_values(name: impl Into<String>, values: serde_json::Value) -> Self {
        Self::new(name, AddonPayload::Values(values))
    }

    /// Unit carrying a rendered document as its payload
    pub fn rendered(name: impl Into<String>, document: Document) -> Self {
        Self::new(name, AddonPayload::Document(document.into_string()))
    }

    /// Require this unit to be applied before `other`
    pub fn before(mut self, other: impl Into<String>) -> Self {
        self.ordering = Some(OrderingHint::Before(other.into()));
        self
    }

    /// Require this unit to be applied after `other`
    pub fn after(mut self, other: impl Into<String>) -> Self {
        self.ordering = Some(OrderingHint::After(other.into()));
        self
    }
}

/// Named resource provider made available to the deployment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceProvider {
    pub name: String,
    pub kind: String,
    #[serde(default)]
    pub config: serde_json::Value,
}

/// Fully resolved global settings, attached to the descriptor verbatim
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalSettings {
    pub account: String,
    pub region: String,
    pub version: String,
    #[serde(default)]
    pub resource_providers: Vec<ResourceProvider>,
}

impl GlobalSettings {
    pub fn new(
        account: impl Into<String>,
        region: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            account: account.into(),
            region: region.into(),
            version: version.into(),
            resource_providers: Vec::new(),
        }
    }

    pub fn with_resource_provider(mut self, provider: ResourceProvider) -> Self {
        self.resource_providers.push(provider);
        self
    }
}
