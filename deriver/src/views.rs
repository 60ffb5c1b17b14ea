//! Screen-level view models assembled from the classifiers, resolvers,
//! pipeline and aggregates.

use std::borrow::Cow;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::aggregate::{
    count_by_status, elapsed_days, max_of_field, per_day, ratio_as_percentage,
    sum_with_default, StatusCounts,
};
use crate::config::DeriverConfig;
use crate::models::{
    FeatureRequest, HospitalNetwork, MonthlyTrend, Order, OrderStatus, QrLog, QrStatus,
    Subscription,
};
use crate::pipeline::{ListState, Page, Searchable};
use crate::relations::{main_hospital, regional_hospitals};
use crate::status::{
    days_left, performance_tier, subscription_status, PerformanceTier, SubscriptionStatus,
};

/// A subscription with its derived status, as shown in the billing table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubscriptionRow<'a> {
    pub subscription: &'a Subscription,
    pub status: SubscriptionStatus,
    /// `None` without an end date
    pub days_left: Option<i64>,
    pub payment_method: Cow<'a, str>,
}

impl Searchable for SubscriptionRow<'_> {
    fn search_fields(&self) -> Vec<Option<&str>> {
        self.subscription.search_fields()
    }
}

pub fn subscription_rows<'a>(
    subscriptions: &'a [Subscription],
    now: DateTime<Utc>,
    config: &'a DeriverConfig,
) -> Vec<SubscriptionRow<'a>> {
    subscriptions
        .iter()
        .map(|subscription| SubscriptionRow {
            subscription,
            status: subscription_status(subscription, now, config),
            days_left: subscription.subscription_end.map(|end| days_left(end, now)),
            payment_method: match subscription.payment_method.as_deref() {
                Some(method) => Cow::Borrowed(method),
                None => Cow::Borrowed(config.default_payment_method.as_ref()),
            },
        })
        .collect()
}

/// Billing table page: search over network/admin, filter on derived status and
/// payment method. A stale page in `state` is clamped in place.
pub fn subscription_page<'a>(
    subscriptions: &'a [Subscription],
    state: &mut ListState<SubscriptionStatus, String>,
    now: DateTime<Utc>,
    config: &'a DeriverConfig,
) -> Page<SubscriptionRow<'a>> {
    state.apply(
        subscription_rows(subscriptions, now, config),
        |row| row.status,
        |row| row.payment_method.to_string(),
    )
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubscriptionSummary {
    pub counts: StatusCounts<SubscriptionStatus>,
    pub total_amount: f64,
}

pub fn subscription_summary(
    subscriptions: &[Subscription],
    now: DateTime<Utc>,
    config: &DeriverConfig,
) -> SubscriptionSummary {
    SubscriptionSummary {
        counts: count_by_status(subscriptions.iter(), |s| subscription_status(s, now, config)),
        total_amount: sum_with_default(subscriptions, |s| Some(s.subscription_amount)),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NetworkOverview {
    pub total_networks: usize,
    pub pending_approval: usize,
    pub total_hospitals: usize,
    pub main_hospitals: usize,
    pub regional_hospitals: usize,
    pub total_riders: u32,
}

pub fn network_overview(networks: &[HospitalNetwork]) -> NetworkOverview {
    NetworkOverview {
        total_networks: networks.len(),
        pending_approval: networks.iter().filter(|n| n.status.is_pending()).count(),
        total_hospitals: networks.iter().map(|n| n.hospitals.len()).sum(),
        main_hospitals: networks.iter().filter(|n| main_hospital(n).is_some()).count(),
        regional_hospitals: networks.iter().map(|n| regional_hospitals(n).len()).sum(),
        total_riders: sum_with_default(networks, |n| n.active_riders),
    }
}

/// Orders per day since the network was created; `None` without a creation date
pub fn network_orders_per_day(network: &HospitalNetwork, now: DateTime<Utc>) -> Option<f64> {
    let created = network.created_at?;
    let total = network.total_orders.unwrap_or_default() as f64;
    Some(per_day(total, elapsed_days(created, now)))
}

/// Peak `centers_served` over the trend rows, 0 when there are none
pub fn peak_centers_served(trends: &[MonthlyTrend]) -> u64 {
    max_of_field(trends, |t| t.centers_served)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QrCompliance {
    pub counts: StatusCounts<QrStatus>,
    pub delivered_percent: i64,
    pub failure_percent: i64,
}

pub fn qr_compliance(logs: &[QrLog]) -> QrCompliance {
    let counts = count_by_status(logs.iter(), |log| log.status);
    let total = counts.total() as f64;
    QrCompliance {
        delivered_percent: ratio_as_percentage(counts.get(QrStatus::Delivered) as f64, total),
        failure_percent: ratio_as_percentage(counts.get(QrStatus::Failed) as f64, total),
        counts,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlaCompliance {
    pub delivered: usize,
    pub on_time: usize,
    pub on_time_percent: i64,
    pub tier: PerformanceTier,
    /// Mean pickup-to-delivery minutes over orders with a known duration
    pub average_delivery_minutes: f64,
}

/// On-time delivery rate against the configured SLA.
///
/// Only delivered orders with a known delivery duration count.
pub fn sla_compliance(orders: &[Order], config: &DeriverConfig) -> SlaCompliance {
    let durations: Vec<f64> = orders
        .iter()
        .filter(|o| o.status == OrderStatus::Delivered)
        .filter_map(Order::delivery_minutes)
        .collect();

    let delivered = durations.len();
    let on_time = durations
        .iter()
        .filter(|minutes| **minutes <= config.sla_delivery_minutes)
        .count();
    let on_time_percent = ratio_as_percentage(on_time as f64, delivered as f64);
    let average_delivery_minutes = if delivered == 0 {
        0.0
    } else {
        durations.iter().sum::<f64>() / delivered as f64
    };

    SlaCompliance {
        delivered,
        on_time,
        on_time_percent,
        tier: performance_tier(
            on_time_percent as f64,
            config.sla_target_percent,
            config.warning_ratio,
        ),
        average_delivery_minutes,
    }
}

/// Orders a rider currently holds, for live location tracking
pub fn active_orders(orders: &[Order]) -> Vec<&Order> {
    orders.iter().filter(|o| o.status.is_in_progress()).collect()
}

/// Feature requests gated on HQ review
pub fn feature_review_queue(requests: &[FeatureRequest]) -> Vec<&FeatureRequest> {
    requests.iter().filter(|r| r.awaiting_review()).collect()
}
