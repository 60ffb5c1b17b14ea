use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::network::ApprovalStatus;
use super::serde_helpers::{flexible_datetime, id_string, null_as_default, opt_id_string};
use super::{StatusKind, Tone};
use crate::error::{ModelError, ModelResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CenterType {
    /// Serves several networks without a supervising hospital
    Independent,
    /// Supervised by exactly one main hospital
    Dependent,
    #[serde(other)]
    Unknown,
}

impl CenterType {
    /// `None` for values the backend sent but we cannot classify
    pub fn known(self) -> Option<Self> {
        match self {
            Self::Independent | Self::Dependent => Some(self),
            Self::Unknown => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationStatus {
    Pending,
    Approved,
    Rejected,
    #[default]
    #[serde(other)]
    Unknown,
}

impl StatusKind for RelationStatus {
    const ALL: &'static [Self] = &[Self::Pending, Self::Approved, Self::Rejected, Self::Unknown];

    fn label(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
            Self::Unknown => "Unknown",
        }
    }

    fn tone(&self) -> Tone {
        match self {
            Self::Pending => Tone::Warning,
            Self::Approved => Tone::Success,
            Self::Rejected => Tone::Danger,
            Self::Unknown => Tone::Neutral,
        }
    }
}

/// Link between a collection center and a hospital of some network
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HospitalRelationship {
    #[serde(default, deserialize_with = "id_string")]
    pub hospital_id: String,
    #[serde(default)]
    pub hospital_name: Option<String>,
    #[serde(default, deserialize_with = "opt_id_string")]
    pub network_id: Option<String>,
    #[serde(default)]
    pub network_name: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_main_hospital: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub relation_status: RelationStatus,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_main_hospital_relation: bool,
    #[serde(default, deserialize_with = "flexible_datetime")]
    pub approved_at: Option<DateTime<Utc>>,
}

/// Detail shape of a collection center
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionCenter {
    #[serde(default, deserialize_with = "id_string")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default)]
    pub center_type: Option<CenterType>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: ApprovalStatus,
    #[serde(default)]
    pub contact_person: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default, deserialize_with = "flexible_datetime")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, alias = "relationships", deserialize_with = "null_as_default")]
    pub hospital_relationships: Vec<HospitalRelationship>,
}

impl CollectionCenter {
    /// The supervising relation of a dependent center
    pub fn main_relation(&self) -> Option<&HospitalRelationship> {
        self.hospital_relationships
            .iter()
            .find(|r| r.is_main_hospital_relation)
    }

    /// Relations HQ or the main hospital has signed off on
    pub fn approved_relationships(&self) -> impl Iterator<Item = &HospitalRelationship> {
        self.hospital_relationships
            .iter()
            .filter(|r| r.relation_status == RelationStatus::Approved)
    }

    /// Distinct network names across all relations, in first-seen order
    pub fn network_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for name in self
            .hospital_relationships
            .iter()
            .filter_map(|r| r.network_name.as_deref())
        {
            if !names.contains(&name) {
                names.push(name);
            }
        }
        names
    }

    /// Check that a dependent center has exactly one main hospital relation.
    ///
    /// Independent centers and centers of unknown type always pass.
    pub fn validate(&self) -> ModelResult<()> {
        if self.center_type != Some(CenterType::Dependent) {
            return Ok(());
        }
        let count = self
            .hospital_relationships
            .iter()
            .filter(|r| r.is_main_hospital_relation)
            .count();
        if count != 1 {
            return Err(ModelError::DependentCenterRelations {
                center_id: self.id.clone(),
                count,
            });
        }
        Ok(())
    }
}

/// List shape of a collection center; some endpoints leave out the type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CenterSummary {
    #[serde(default, deserialize_with = "id_string")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default)]
    pub center_type: Option<CenterType>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: ApprovalStatus,
    #[serde(default)]
    pub city: Option<String>,
}

impl From<&CollectionCenter> for CenterSummary {
    fn from(center: &CollectionCenter) -> Self {
        Self {
            id: center.id.clone(),
            name: center.name.clone(),
            center_type: center.center_type,
            status: center.status,
            city: center.city.clone(),
        }
    }
}
