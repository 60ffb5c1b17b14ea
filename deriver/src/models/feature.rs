use serde::{Deserialize, Serialize};

use super::serde_helpers::{id_string, null_as_default};
use super::{StatusKind, Tone};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureType {
    Core,
    Premium,
    Enterprise,
    #[default]
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureStatus {
    #[default]
    NotRequested,
    Requested,
    Approved,
    Rejected,
    Disabled,
    #[serde(other)]
    Unknown,
}

impl StatusKind for FeatureStatus {
    const ALL: &'static [Self] = &[
        Self::NotRequested,
        Self::Requested,
        Self::Approved,
        Self::Rejected,
        Self::Disabled,
        Self::Unknown,
    ];

    fn label(&self) -> &'static str {
        match self {
            Self::NotRequested => "Not Requested",
            Self::Requested => "Requested",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
            Self::Disabled => "Disabled",
            Self::Unknown => "Unknown",
        }
    }

    fn tone(&self) -> Tone {
        match self {
            Self::NotRequested | Self::Unknown => Tone::Neutral,
            Self::Requested => Tone::Warning,
            Self::Approved => Tone::Success,
            Self::Rejected => Tone::Danger,
            Self::Disabled => Tone::Neutral,
        }
    }
}

/// Per-center state of one optional feature
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureRequest {
    #[serde(default, deserialize_with = "id_string")]
    pub center_id: String,
    #[serde(default, deserialize_with = "id_string")]
    pub feature_id: String,
    #[serde(default)]
    pub feature_name: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub feature_type: FeatureType,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: FeatureStatus,
    #[serde(default, deserialize_with = "null_as_default")]
    pub requires_approval: bool,
}

impl FeatureRequest {
    pub fn is_enabled(&self) -> bool {
        self.status == FeatureStatus::Approved
    }

    /// Requested and gated behind HQ review
    pub fn awaiting_review(&self) -> bool {
        self.status == FeatureStatus::Requested && self.requires_approval
    }
}
