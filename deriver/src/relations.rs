//! Joins between sibling collections: id lookups, main/regional hospital
//! extraction and center partitioning.

use std::collections::HashMap;
use std::hash::Hash;

use serde::Serialize;

use crate::models::{CenterSummary, CenterType, CollectionCenter, Hospital, HospitalNetwork};

/// Build a lookup map from `key` to item.
///
/// When two items share a key the later one wins; this is logged, not
/// rejected.
pub fn index_by<'a, T, K, F>(items: &'a [T], key: F) -> HashMap<K, &'a T>
where
    K: Eq + Hash,
    F: Fn(&'a T) -> K,
{
    let mut index = HashMap::with_capacity(items.len());
    let mut duplicates = 0usize;
    for item in items {
        if index.insert(key(item), item).is_some() {
            duplicates += 1;
        }
    }
    if duplicates > 0 {
        tracing::warn!(duplicates, "duplicate keys while indexing, keeping the last entry");
    }
    index
}

pub fn networks_by_id(networks: &[HospitalNetwork]) -> HashMap<&str, &HospitalNetwork> {
    index_by(networks, |n| n.id.as_str())
}

pub fn centers_by_id(centers: &[CollectionCenter]) -> HashMap<&str, &CollectionCenter> {
    index_by(centers, |c| c.id.as_str())
}

/// The hospital flagged as main, if any
pub fn main_hospital(network: &HospitalNetwork) -> Option<&Hospital> {
    network.hospitals.iter().find(|h| h.is_main_hospital)
}

/// Every non-main hospital of the network
pub fn regional_hospitals(network: &HospitalNetwork) -> Vec<&Hospital> {
    network
        .hospitals
        .iter()
        .filter(|h| !h.is_main_hospital)
        .collect()
}

#[derive(Debug, Clone, Serialize)]
pub struct MainHospitalRow<'a> {
    pub network: &'a HospitalNetwork,
    pub hospital: &'a Hospital,
    pub regional_count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegionalHospitalRow<'a> {
    pub network: &'a HospitalNetwork,
    pub hospital: &'a Hospital,
}

/// One row per network that has a main hospital.
///
/// Networks without one are skipped.
pub fn main_hospital_rows(networks: &[HospitalNetwork]) -> Vec<MainHospitalRow<'_>> {
    networks
        .iter()
        .filter_map(|network| {
            let Some(hospital) = main_hospital(network) else {
                tracing::debug!(network_id = %network.id, "network has no main hospital");
                return None;
            };
            Some(MainHospitalRow {
                network,
                hospital,
                regional_count: regional_hospitals(network).len(),
            })
        })
        .collect()
}

pub fn regional_hospital_rows(networks: &[HospitalNetwork]) -> Vec<RegionalHospitalRow<'_>> {
    networks
        .iter()
        .flat_map(|network| {
            regional_hospitals(network)
                .into_iter()
                .map(move |hospital| RegionalHospitalRow { network, hospital })
        })
        .collect()
}

/// A center list row joined with its detail record when one was fetched
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ResolvedCenter<'a> {
    pub summary: &'a CenterSummary,
    pub detail: Option<&'a CollectionCenter>,
}

impl<'a> ResolvedCenter<'a> {
    /// Type from the detail record, falling back to the summary
    pub fn center_type(&self) -> Option<CenterType> {
        self.detail
            .and_then(|d| d.center_type)
            .and_then(CenterType::known)
            .or_else(|| self.summary.center_type.and_then(CenterType::known))
    }

    pub fn id(&self) -> &'a str {
        &self.summary.id
    }

    pub fn name(&self) -> &'a str {
        &self.summary.name
    }
}

/// Join each summary with the detail record of the same id.
pub fn resolve_centers<'a>(
    summaries: &'a [CenterSummary],
    details: &'a [CollectionCenter],
) -> Vec<ResolvedCenter<'a>> {
    let detail_index = centers_by_id(details);
    summaries
        .iter()
        .map(|summary| ResolvedCenter {
            summary,
            detail: detail_index.get(summary.id.as_str()).copied(),
        })
        .collect()
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CenterPartition<'a> {
    pub independent: Vec<ResolvedCenter<'a>>,
    pub dependent: Vec<ResolvedCenter<'a>>,
    /// No usable type in either record
    pub unclassified: Vec<ResolvedCenter<'a>>,
}

pub fn partition_centers<'a>(
    centers: impl IntoIterator<Item = ResolvedCenter<'a>>,
) -> CenterPartition<'a> {
    let mut partition = CenterPartition::default();
    for center in centers {
        match center.center_type() {
            Some(CenterType::Independent) => partition.independent.push(center),
            Some(CenterType::Dependent) => partition.dependent.push(center),
            Some(CenterType::Unknown) | None => partition.unclassified.push(center),
        }
    }
    if !partition.unclassified.is_empty() {
        tracing::debug!(count = partition.unclassified.len(), "centers without a type");
    }
    partition
}

/// Dependent centers whose main relation points at `hospital_id`
pub fn dependent_centers_of<'a>(
    centers: &'a [CollectionCenter],
    hospital_id: &str,
) -> Vec<&'a CollectionCenter> {
    centers
        .iter()
        .filter(|c| c.center_type == Some(CenterType::Dependent))
        .filter(|c| {
            c.main_relation()
                .map_or(false, |r| r.hospital_id == hospital_id)
        })
        .collect()
}
