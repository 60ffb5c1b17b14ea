use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::serde_helpers::{flexible_datetime, id_string, null_as_default, opt_number};
use super::{StatusKind, Tone};
use crate::error::{ModelError, ModelResult};

/// Approval state shared by networks, hospitals and collection centers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApprovalStatus {
    PendingHqApproval,
    PendingMainHospitalApproval,
    Approved,
    Rejected,
    Active,
    #[default]
    #[serde(other)]
    Unknown,
}

impl StatusKind for ApprovalStatus {
    const ALL: &'static [Self] = &[
        Self::PendingHqApproval,
        Self::PendingMainHospitalApproval,
        Self::Approved,
        Self::Rejected,
        Self::Active,
        Self::Unknown,
    ];

    fn label(&self) -> &'static str {
        match self {
            Self::PendingHqApproval => "Pending HQ Approval",
            Self::PendingMainHospitalApproval => "Pending Main Hospital Approval",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
            Self::Active => "Active",
            Self::Unknown => "Unknown",
        }
    }

    fn tone(&self) -> Tone {
        match self {
            Self::PendingHqApproval | Self::PendingMainHospitalApproval => Tone::Warning,
            Self::Approved | Self::Active => Tone::Success,
            Self::Rejected => Tone::Danger,
            Self::Unknown => Tone::Neutral,
        }
    }
}

impl ApprovalStatus {
    /// Waiting on HQ or on the supervising main hospital
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::PendingHqApproval | Self::PendingMainHospitalApproval)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    #[serde(alias = "lat")]
    pub latitude: f64,
    #[serde(alias = "lng", alias = "lon")]
    pub longitude: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hospital {
    #[serde(default, deserialize_with = "id_string")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, alias = "type")]
    pub hospital_type: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_main_hospital: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: ApprovalStatus,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub province: Option<String>,
    #[serde(default)]
    pub coordinates: Option<Coordinates>,
    #[serde(default, deserialize_with = "flexible_datetime")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Top-level tenant: one main hospital plus regional hospitals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HospitalNetwork {
    #[serde(default, deserialize_with = "id_string")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default)]
    pub admin_name: Option<String>,
    #[serde(default)]
    pub admin_email: Option<String>,
    #[serde(default)]
    pub admin_phone: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: ApprovalStatus,
    #[serde(default, deserialize_with = "flexible_datetime")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "opt_number")]
    pub active_riders: Option<u32>,
    #[serde(default, deserialize_with = "opt_number")]
    pub total_orders: Option<u64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub hospitals: Vec<Hospital>,
}

impl HospitalNetwork {
    /// Check that at most one hospital carries the main flag.
    pub fn validate(&self) -> ModelResult<()> {
        let count = self.hospitals.iter().filter(|h| h.is_main_hospital).count();
        if count > 1 {
            return Err(ModelError::MultipleMainHospitals {
                network_id: self.id.clone(),
                count,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_network_deserialization_tolerates_nulls() {
        let network: HospitalNetwork = serde_json::from_value(json!({
            "id": 7,
            "name": "Northern Health",
            "status": "pending_hq_approval",
            "hospitals": null,
            "created_at": "2024-01-10"
        }))
        .unwrap();

        assert_eq!(network.id, "7");
        assert_eq!(network.status, ApprovalStatus::PendingHqApproval);
        assert!(network.hospitals.is_empty());
        assert!(network.created_at.is_some());
        assert!(network.active_riders.is_none());
    }

    #[test]
    fn test_network_counts_from_strings() {
        let network: HospitalNetwork = serde_json::from_value(json!({
            "id": 8,
            "active_riders": "12",
            "total_orders": "many"
        }))
        .unwrap();

        assert_eq!(network.active_riders, Some(12));
        assert!(network.total_orders.is_none());
    }

    #[test]
    fn test_unknown_approval_status() {
        let hospital: Hospital = serde_json::from_value(json!({
            "id": "h1",
            "name": "General",
            "status": "archived",
            "type": "general"
        }))
        .unwrap();

        assert_eq!(hospital.status, ApprovalStatus::Unknown);
        assert_eq!(hospital.status.label(), "Unknown");
        assert_eq!(hospital.hospital_type.as_deref(), Some("general"));
    }

    #[test]
    fn test_approval_labels_are_one_to_one() {
        let raw = [
            ("pending_hq_approval", "Pending HQ Approval"),
            ("pending_main_hospital_approval", "Pending Main Hospital Approval"),
            ("approved", "Approved"),
            ("rejected", "Rejected"),
            ("active", "Active"),
        ];
        for (value, label) in raw {
            let status: ApprovalStatus = serde_json::from_value(json!(value)).unwrap();
            assert_eq!(status.label(), label);
        }
    }

    #[test]
    fn test_validate_rejects_two_main_hospitals() {
        let hospital = |id: &str, main: bool| Hospital {
            id: id.to_string(),
            name: id.to_string(),
            hospital_type: None,
            is_main_hospital: main,
            status: ApprovalStatus::Approved,
            city: None,
            province: None,
            coordinates: None,
            created_at: None,
        };
        let mut network = HospitalNetwork {
            id: "n1".to_string(),
            name: "Net".to_string(),
            admin_name: None,
            admin_email: None,
            admin_phone: None,
            status: ApprovalStatus::Approved,
            created_at: None,
            active_riders: None,
            total_orders: None,
            hospitals: vec![hospital("a", true), hospital("b", false)],
        };
        assert!(network.validate().is_ok());

        network.hospitals.push(hospital("c", true));
        assert_eq!(
            network.validate(),
            Err(ModelError::MultipleMainHospitals {
                network_id: "n1".to_string(),
                count: 2
            })
        );
    }
}
