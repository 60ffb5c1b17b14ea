//! Presentation status derivation.
//!
//! Subscription status is computed from the stored status and the end date
//! relative to an explicit `now`; approval statuses are plain lookups (see
//! [`ApprovalStatus`](crate::models::ApprovalStatus)); performance tiers compare
//! a metric against a target.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::config::DeriverConfig;
use crate::models::{RawSubscriptionStatus, StatusKind, Subscription, Tone};

const MILLIS_PER_DAY: i64 = 86_400_000;

/// Display status of a subscription after applying the end date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SubscriptionStatus {
    Active,
    #[serde(rename = "Expiring Soon")]
    ExpiringSoon,
    Expired,
    Suspended,
}

impl StatusKind for SubscriptionStatus {
    const ALL: &'static [Self] = &[
        Self::Active,
        Self::ExpiringSoon,
        Self::Expired,
        Self::Suspended,
    ];

    fn label(&self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::ExpiringSoon => "Expiring Soon",
            Self::Expired => "Expired",
            Self::Suspended => "Suspended",
        }
    }

    fn tone(&self) -> Tone {
        match self {
            Self::Active => Tone::Success,
            Self::ExpiringSoon => Tone::Warning,
            Self::Expired | Self::Suspended => Tone::Danger,
        }
    }
}

/// Whole days until `end`, rounded up. Negative once `end` has passed.
pub fn days_left(end: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let millis = (end - now).num_milliseconds();
    let days = millis.div_euclid(MILLIS_PER_DAY);
    if millis.rem_euclid(MILLIS_PER_DAY) != 0 {
        days + 1
    } else {
        days
    }
}

/// Derive the display status of a subscription.
///
/// Checks run in a fixed order: a suspended subscription stays suspended
/// whatever its end date, a subscription without an end date keeps its stored
/// status, and only then is the end date compared with `now`.
pub fn subscription_status(
    subscription: &Subscription,
    now: DateTime<Utc>,
    config: &DeriverConfig,
) -> SubscriptionStatus {
    match subscription.subscription_status {
        RawSubscriptionStatus::Suspended => return SubscriptionStatus::Suspended,
        RawSubscriptionStatus::Active | RawSubscriptionStatus::Other => {}
    }

    let Some(end) = subscription.subscription_end else {
        return SubscriptionStatus::Active;
    };

    if end < now {
        return SubscriptionStatus::Expired;
    }

    let left = days_left(end, now);
    if left > 0 && left <= config.expiring_soon_days {
        SubscriptionStatus::ExpiringSoon
    } else {
        SubscriptionStatus::Active
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PerformanceTier {
    Good,
    Warning,
    Critical,
}

impl StatusKind for PerformanceTier {
    const ALL: &'static [Self] = &[Self::Good, Self::Warning, Self::Critical];

    fn label(&self) -> &'static str {
        match self {
            Self::Good => "Good",
            Self::Warning => "Warning",
            Self::Critical => "Critical",
        }
    }

    fn tone(&self) -> Tone {
        match self {
            Self::Good => Tone::Success,
            Self::Warning => Tone::Warning,
            Self::Critical => Tone::Danger,
        }
    }
}

/// Grade `value` against `threshold`.
///
/// Higher is better. For metrics where lower is better (delivery time), pass a
/// transformed value such as `target - actual` with a matching threshold.
pub fn performance_tier(value: f64, threshold: f64, warning_ratio: f64) -> PerformanceTier {
    if value >= threshold {
        PerformanceTier::Good
    } else if value >= warning_ratio * threshold {
        PerformanceTier::Warning
    } else {
        PerformanceTier::Critical
    }
}
