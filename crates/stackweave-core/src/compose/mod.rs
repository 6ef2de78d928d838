//! Addon composition pipeline
//!
//! Joins independently configured addon units into one ordered
//! [`DeploymentDescriptor`]. Ordering hints are plain data on each unit and
//! are resolved by an explicit stable topological sort. Global settings are
//! attached as given: resolving account or region is the caller's job.

pub mod descriptor;
pub mod model;
pub mod order;

pub use descriptor::DeploymentDescriptor;
pub use model::{AddonPayload, AddonUnit, GlobalSettings, OrderingHint, ResourceProvider};
pub use order::stable_order;

use crate::errors::Result;

/// Build the deployment descriptor
///
/// # Errors
/// * `DuplicateAddon` - two units share a name
/// * `UnknownAddon` - an ordering hint names an addon that is not present
/// * `OrderingConflict` - the ordering hints form a cycle
pub fn compose(settings: GlobalSettings, units: Vec<AddonUnit>) -> Result<DeploymentDescriptor> {
    let order = stable_order(&units)?;

    let mut slots: Vec<Option<AddonUnit>> = units.into_iter().map(Some).collect();
    let ordered: Vec<AddonUnit> = order
        .into_iter()
        .filter_map(|idx| slots[idx].take())
        .collect();

    tracing::debug!(
        addon_count = ordered.len(),
        order = ?ordered.iter().map(|a| a.name.as_str()).collect::<Vec<_>>(),
        "composed addon order"
    );

    Ok(DeploymentDescriptor::new(settings, ordered))
}
