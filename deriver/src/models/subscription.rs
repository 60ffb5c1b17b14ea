use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::serde_helpers::{
    flexible_datetime, id_string, null_as_default, number_or_default, opt_id_string,
};

/// Status as stored by the backend, before any date-based derivation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RawSubscriptionStatus {
    #[default]
    Active,
    Suspended,
    #[serde(other)]
    Other,
}

/// Billing record of one hospital network
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    #[serde(default, deserialize_with = "id_string")]
    pub id: String,
    #[serde(default, deserialize_with = "opt_id_string")]
    pub network_id: Option<String>,
    #[serde(default)]
    pub network_name: Option<String>,
    #[serde(default)]
    pub admin_name: Option<String>,
    #[serde(default)]
    pub admin_email: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub subscription_status: RawSubscriptionStatus,
    #[serde(default, deserialize_with = "flexible_datetime")]
    pub subscription_end: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "number_or_default")]
    pub subscription_amount: f64,
    #[serde(default, deserialize_with = "number_or_default")]
    pub hospital_count: u32,
    #[serde(default, deserialize_with = "number_or_default")]
    pub payment_count: u32,
    #[serde(default)]
    pub payment_method: Option<String>,
}
