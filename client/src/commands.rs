//! Request bodies of the mutating endpoints and the list query builder.

use std::borrow::Cow;

use chrono::NaiveDate;
use courier_deriver::models::OrderStatus;
use serde::{Deserialize, Serialize};

/// Entity kinds that go through the HQ approval workflow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    HospitalNetwork,
    Hospital,
    CollectionCenter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Paid,
    Pending,
    Overdue,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BillingPeriod {
    Monthly,
    Quarterly,
    Yearly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiderStatus {
    Available,
    Busy,
    Offline,
    Suspended,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApprovalBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<&'a str>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RejectionBody<'a> {
    #[serde(rename = "type")]
    pub kind: EntityKind,
    pub id: &'a str,
    pub reason: &'a str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureToggleBody<'a> {
    pub enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<&'a str>,
}

/// Payment recorded against a network's subscription
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaymentUpdate {
    pub status: PaymentStatus,
    pub amount: f64,
    pub date: NaiveDate,
    pub period: BillingPeriod,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl PaymentUpdate {
    pub fn new(status: PaymentStatus, amount: f64, date: NaiveDate, period: BillingPeriod) -> Self {
        Self {
            status,
            amount,
            date,
            period,
            notes: None,
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiderStatusBody<'a> {
    pub status: RiderStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<&'a str>,
}

/// Server-side narrowing for the order list
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OrderQuery<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<OrderStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub center_id: Option<Cow<'a, str>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hospital_id: Option<Cow<'a, str>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rider_id: Option<Cow<'a, str>>,
}

impl<'a> OrderQuery<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_status(mut self, status: OrderStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_center<S: Into<Cow<'a, str>>>(mut self, center_id: S) -> Self {
        self.center_id = Some(center_id.into());
        self
    }

    pub fn with_hospital<S: Into<Cow<'a, str>>>(mut self, hospital_id: S) -> Self {
        self.hospital_id = Some(hospital_id.into());
        self
    }

    pub fn with_rider<S: Into<Cow<'a, str>>>(mut self, rider_id: S) -> Self {
        self.rider_id = Some(rider_id.into());
        self
    }
}
