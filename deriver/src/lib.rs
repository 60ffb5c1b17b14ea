//! Pure derivations behind the courier operations dashboards.
//!
//! Everything here works on data already fetched from the backend and takes
//! the current time as an argument, so results are reproducible in tests.

pub mod aggregate;
pub mod config;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod relations;
pub mod status;
pub mod timeline;
pub mod views;

pub use config::DeriverConfig;
pub use error::{ModelError, ModelResult};
pub use models::*;
pub use pipeline::{Filter, ListState, Page, Searchable, SortDirection};
pub use status::{PerformanceTier, SubscriptionStatus};
pub use timeline::{order_timeline, TimelineEvent, TimelineStage};
