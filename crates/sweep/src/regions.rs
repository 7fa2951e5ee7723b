//! Which regions to visit, and how to treat each one.
use crate::{provider::Provider, Result};

/// How the sweep treats a region.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum RegionPolicy {
    /// Disable the recorder if one exists.
    #[default]
    Standard,
    /// Opt-in region. A failing existence check means the region is not
    /// enabled for the account.
    OptInExistenceCheck,
    /// Leave the region's recorder in place.
    SkipDisable,
}

const REGION_POLICIES: &[(&str, RegionPolicy)] = &[
    ("ap-east-1", RegionPolicy::OptInExistenceCheck),
    ("us-east-1", RegionPolicy::SkipDisable),
];

pub fn policy_for(region: &str) -> RegionPolicy {
    REGION_POLICIES
        .iter()
        .find_map(|(name, policy)| (*name == region).then_some(*policy))
        .unwrap_or_default()
}

/// Where the region list came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionSource {
    Operator,
    Provider,
}

/// Resolves the regions to visit.
///
/// An operator supplied list is split on commas and used verbatim: no
/// trimming, no validation, no deduplication. Otherwise every region in which
/// the provider offers Config is used. An empty list counts as not supplied.
pub async fn resolve_regions<P: Provider>(
    enabled_regions: Option<&str>,
    provider: &P,
) -> Result<(Vec<String>, RegionSource)> {
    if let Some(list) = enabled_regions.filter(|list| !list.is_empty()) {
        let regions = list.split(',').map(str::to_owned).collect();
        return Ok((regions, RegionSource::Operator));
    }
    let regions = provider.config_regions().await?;
    log::debug!("provider offers config in {} regions", regions.len());
    Ok((regions, RegionSource::Provider))
}
