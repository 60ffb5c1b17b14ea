use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::serde_helpers::{flexible_datetime, id_string, null_as_default, opt_id_string};
use super::{StatusKind, Tone};

/// Order lifecycle: pending → assigned → picked_up → in_transit → delivered,
/// or cancelled anywhere before delivery
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Assigned,
    PickedUp,
    InTransit,
    Delivered,
    Cancelled,
    #[default]
    #[serde(other)]
    Unknown,
}

impl StatusKind for OrderStatus {
    const ALL: &'static [Self] = &[
        Self::Pending,
        Self::Assigned,
        Self::PickedUp,
        Self::InTransit,
        Self::Delivered,
        Self::Cancelled,
        Self::Unknown,
    ];

    fn label(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Assigned => "Assigned",
            Self::PickedUp => "Picked Up",
            Self::InTransit => "In Transit",
            Self::Delivered => "Delivered",
            Self::Cancelled => "Cancelled",
            Self::Unknown => "Unknown",
        }
    }

    fn tone(&self) -> Tone {
        match self {
            Self::Pending => Tone::Warning,
            Self::Assigned | Self::PickedUp | Self::InTransit => Tone::Info,
            Self::Delivered => Tone::Success,
            Self::Cancelled => Tone::Danger,
            Self::Unknown => Tone::Neutral,
        }
    }
}

impl OrderStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Delivered | Self::Cancelled)
    }

    /// A rider holds the order; these are the ones tracked live
    pub fn is_in_progress(&self) -> bool {
        matches!(self, Self::Assigned | Self::PickedUp | Self::InTransit)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    Urgent,
    Standard,
    Routine,
    #[default]
    #[serde(other)]
    Unknown,
}

impl StatusKind for Urgency {
    const ALL: &'static [Self] = &[Self::Urgent, Self::Standard, Self::Routine, Self::Unknown];

    fn label(&self) -> &'static str {
        match self {
            Self::Urgent => "Urgent",
            Self::Standard => "Standard",
            Self::Routine => "Routine",
            Self::Unknown => "Unknown",
        }
    }

    fn tone(&self) -> Tone {
        match self {
            Self::Urgent => Tone::Danger,
            Self::Standard => Tone::Info,
            Self::Routine => Tone::Neutral,
            Self::Unknown => Tone::Neutral,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    #[serde(default, deserialize_with = "id_string")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub order_number: String,
    #[serde(default, deserialize_with = "opt_id_string")]
    pub center_id: Option<String>,
    #[serde(default)]
    pub center_name: Option<String>,
    #[serde(default, deserialize_with = "opt_id_string")]
    pub hospital_id: Option<String>,
    #[serde(default)]
    pub hospital_name: Option<String>,
    #[serde(default, deserialize_with = "opt_id_string")]
    pub rider_id: Option<String>,
    #[serde(default)]
    pub rider_name: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: OrderStatus,
    #[serde(default, deserialize_with = "null_as_default")]
    pub urgency: Urgency,
    #[serde(default)]
    pub sample_type: Option<String>,
    #[serde(default, deserialize_with = "flexible_datetime")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "flexible_datetime")]
    pub assigned_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "flexible_datetime")]
    pub pickup_started_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "flexible_datetime")]
    pub picked_up_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "flexible_datetime")]
    pub delivery_started_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "flexible_datetime")]
    pub delivered_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "flexible_datetime")]
    pub cancelled_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub estimated_delivery_minutes: Option<f64>,
    #[serde(default)]
    pub actual_delivery_minutes: Option<f64>,
}

impl Order {
    /// Minutes from pickup to hand-over.
    ///
    /// Prefers the backend's figure and falls back to the stage timestamps.
    pub fn delivery_minutes(&self) -> Option<f64> {
        if let Some(minutes) = self.actual_delivery_minutes {
            return Some(minutes);
        }
        let (start, end) = (self.picked_up_at?, self.delivered_at?);
        Some((end - start).num_seconds() as f64 / 60.0)
    }
}
