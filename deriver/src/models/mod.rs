pub mod center;
pub mod feature;
pub mod network;
pub mod order;
pub mod qr;
pub mod subscription;
pub mod trend;

pub(crate) mod serde_helpers;

pub use center::*;
pub use feature::*;
pub use network::*;
pub use order::*;
pub use qr::*;
pub use subscription::*;
pub use trend::*;

use serde::Serialize;

/// Presentation severity of a status badge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Neutral,
    Info,
    Success,
    Warning,
    Danger,
}

/// A closed set of statuses that can be labelled, colored and counted.
///
/// `ALL` lists every variant in display order. Aggregates seed one bucket per
/// entry so a status missing from the data still reports 0.
pub trait StatusKind: Copy + Eq + std::hash::Hash + 'static {
    const ALL: &'static [Self];

    fn label(&self) -> &'static str;

    fn tone(&self) -> Tone;
}
