use serde::{Deserialize, Serialize};

use super::serde_helpers::{null_as_default, opt_number};

/// One row of the monthly performance trend chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyTrend {
    #[serde(default, deserialize_with = "null_as_default")]
    pub month: String,
    #[serde(default, deserialize_with = "opt_number")]
    pub orders: Option<u64>,
    #[serde(default, deserialize_with = "opt_number")]
    pub centers_served: Option<u64>,
    #[serde(default, deserialize_with = "opt_number")]
    pub revenue: Option<f64>,
}
