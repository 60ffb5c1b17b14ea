//! Chain-of-custody timeline for a single order.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::Order;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TimelineStage {
    Created,
    Assigned,
    PickupStarted,
    PickedUp,
    DeliveryStarted,
    Delivered,
    Cancelled,
}

impl TimelineStage {
    /// Lifecycle stages in display order; `Cancelled` is handled separately
    pub const ORDERED: [TimelineStage; 6] = [
        Self::Created,
        Self::Assigned,
        Self::PickupStarted,
        Self::PickedUp,
        Self::DeliveryStarted,
        Self::Delivered,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Assigned => "assigned",
            Self::PickupStarted => "pickup_started",
            Self::PickedUp => "picked_up",
            Self::DeliveryStarted => "delivery_started",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        }
    }

    pub fn note(&self) -> &'static str {
        match self {
            Self::Created => "Order created",
            Self::Assigned => "Rider assigned to order",
            Self::PickupStarted => "Rider en route to pickup",
            Self::PickedUp => "Sample collected from center",
            Self::DeliveryStarted => "Sample in transit to hospital",
            Self::Delivered => "Sample delivered to hospital",
            Self::Cancelled => "Order cancelled",
        }
    }

    fn timestamp(&self, order: &Order) -> Option<DateTime<Utc>> {
        match self {
            Self::Created => order.created_at,
            Self::Assigned => order.assigned_at,
            Self::PickupStarted => order.pickup_started_at,
            Self::PickedUp => order.picked_up_at,
            Self::DeliveryStarted => order.delivery_started_at,
            Self::Delivered => order.delivered_at,
            Self::Cancelled => order.cancelled_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimelineEvent {
    /// `{order_id}-{stage}`, stable across rebuilds
    pub id: String,
    pub stage: TimelineStage,
    pub timestamp: DateTime<Utc>,
    pub note: &'static str,
}

/// One event per recorded stage timestamp, in lifecycle order.
///
/// Stages without a timestamp are left out rather than shown as pending. A
/// cancellation is appended after every other event, even when later stages
/// also carry timestamps; the builder does not reconcile such records.
pub fn order_timeline(order: &Order) -> Vec<TimelineEvent> {
    TimelineStage::ORDERED
        .iter()
        .chain(std::iter::once(&TimelineStage::Cancelled))
        .filter_map(|stage| {
            stage.timestamp(order).map(|timestamp| TimelineEvent {
                id: format!("{}-{}", order.id, stage.as_str()),
                stage: *stage,
                timestamp,
                note: stage.note(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_full_delivery_has_six_events() {
        let order: Order = serde_json::from_value(json!({
            "id": "o1",
            "created_at": "2024-02-01T08:00:00Z",
            "assigned_at": "2024-02-01T08:05:00Z",
            "pickup_started_at": "2024-02-01T08:10:00Z",
            "picked_up_at": "2024-02-01T08:30:00Z",
            "delivery_started_at": "2024-02-01T08:31:00Z",
            "delivered_at": "2024-02-01T09:00:00Z"
        }))
        .unwrap();

        let stages: Vec<_> = order_timeline(&order).iter().map(|e| e.stage).collect();
        assert_eq!(stages, TimelineStage::ORDERED.to_vec());
    }

    #[test]
    fn test_cancellation_is_appended_last() {
        let order: Order = serde_json::from_value(json!({
            "id": "o2",
            "created_at": "2024-02-01T08:00:00Z",
            "cancelled_at": "2024-02-01T08:02:00Z",
            "delivered_at": "2024-02-01T09:00:00Z"
        }))
        .unwrap();

        let events = order_timeline(&order);
        assert_eq!(events.len(), 3);
        assert_eq!(events[1].stage, TimelineStage::Delivered);
        assert_eq!(events[2].stage, TimelineStage::Cancelled);
        assert_eq!(events[2].id, "o2-cancelled");
        assert_eq!(events[2].note, "Order cancelled");
    }

    #[test]
    fn test_no_timestamps_no_events() {
        let order: Order = serde_json::from_value(json!({"id": "o3"})).unwrap();
        assert!(order_timeline(&order).is_empty());
    }
}
