use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Business constants used by the derivations.
///
/// Defaults reproduce the dashboard's fixed values; deployments may override
/// them (for example a stricter SLA target).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeriverConfig {
    /// Subscriptions ending within this many days are "Expiring Soon"
    #[serde(default = "default_expiring_soon_days")]
    pub expiring_soon_days: i64,

    /// Fraction of a target that still counts as "warning" rather than "critical"
    #[serde(default = "default_warning_ratio")]
    pub warning_ratio: f64,

    /// Payment method assumed when a subscription has none recorded
    #[serde(default = "default_payment_method")]
    pub default_payment_method: Cow<'static, str>,

    #[serde(default = "default_items_per_page")]
    pub items_per_page: usize,

    /// On-time delivery percentage expected by the SLA
    #[serde(default = "default_sla_target_percent")]
    pub sla_target_percent: f64,

    /// Minutes from pickup to delivery an order may take and still be on time
    #[serde(default = "default_sla_delivery_minutes")]
    pub sla_delivery_minutes: f64,
}

fn default_expiring_soon_days() -> i64 { 30 }
fn default_warning_ratio() -> f64 { 0.9 }
fn default_payment_method() -> Cow<'static, str> { Cow::Borrowed("Bank Transfer") }
fn default_items_per_page() -> usize { 10 }
fn default_sla_target_percent() -> f64 { 95.0 }
fn default_sla_delivery_minutes() -> f64 { 60.0 }

impl Default for DeriverConfig {
    fn default() -> Self {
        Self {
            expiring_soon_days: default_expiring_soon_days(),
            warning_ratio: default_warning_ratio(),
            default_payment_method: default_payment_method(),
            items_per_page: default_items_per_page(),
            sla_target_percent: default_sla_target_percent(),
            sla_delivery_minutes: default_sla_delivery_minutes(),
        }
    }
}

impl DeriverConfig {
    /// Set the expiring-soon window
    pub fn with_expiring_soon_days(mut self, days: i64) -> Self {
        self.expiring_soon_days = days;
        self
    }

    /// Set the warning ratio
    pub fn with_warning_ratio(mut self, ratio: f64) -> Self {
        self.warning_ratio = ratio;
        self
    }

    /// Set the fallback payment method
    pub fn with_default_payment_method(mut self, method: impl Into<Cow<'static, str>>) -> Self {
        self.default_payment_method = method.into();
        self
    }

    /// Set page size; zero is raised to one
    pub fn with_items_per_page(mut self, items: usize) -> Self {
        self.items_per_page = items.max(1);
        self
    }

    /// Set SLA targets
    pub fn with_sla(mut self, target_percent: f64, delivery_minutes: f64) -> Self {
        self.sla_target_percent = target_percent;
        self.sla_delivery_minutes = delivery_minutes;
        self
    }
}
