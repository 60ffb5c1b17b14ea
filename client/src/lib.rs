//! Async client for the courier operations backend.

pub mod client;
pub mod commands;
pub mod config;
pub mod envelope;
pub mod error;
pub mod refresh;
pub mod session;

pub use client::{CommandOutcome, OperationsClient, REQUEST_ID_HEADER};
pub use commands::{
    BillingPeriod, EntityKind, OrderQuery, PaymentStatus, PaymentUpdate, RiderStatus,
};
pub use config::ClientConfig;
pub use envelope::{ApiErrorBody, ApiResponse};
pub use error::{ClientError, ClientResult, TOKEN_EXPIRED};
pub use refresh::{RefreshLoop, Snapshot, ViewSlice};
pub use session::Session;
