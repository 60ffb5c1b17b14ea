use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::serde_helpers::{flexible_datetime, id_string, null_as_default, opt_id_string};
use super::{StatusKind, Tone};

/// Scan state of a sample QR code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QrStatus {
    Pending,
    Pickup,
    Transit,
    Delivered,
    Failed,
    #[default]
    #[serde(other)]
    Unknown,
}

impl StatusKind for QrStatus {
    const ALL: &'static [Self] = &[
        Self::Pending,
        Self::Pickup,
        Self::Transit,
        Self::Delivered,
        Self::Failed,
        Self::Unknown,
    ];

    fn label(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Pickup => "Pickup",
            Self::Transit => "In Transit",
            Self::Delivered => "Delivered",
            Self::Failed => "Failed",
            Self::Unknown => "Unknown",
        }
    }

    fn tone(&self) -> Tone {
        match self {
            Self::Pending => Tone::Warning,
            Self::Pickup | Self::Transit => Tone::Info,
            Self::Delivered => Tone::Success,
            Self::Failed => Tone::Danger,
            Self::Unknown => Tone::Neutral,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QrLog {
    #[serde(default, alias = "qr_code", deserialize_with = "id_string")]
    pub qr_code_id: String,
    #[serde(default, deserialize_with = "opt_id_string")]
    pub order_id: Option<String>,
    #[serde(default, deserialize_with = "opt_id_string")]
    pub sample_id: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: QrStatus,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default, deserialize_with = "flexible_datetime")]
    pub scanned_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "flexible_datetime")]
    pub created_at: Option<DateTime<Utc>>,
}
