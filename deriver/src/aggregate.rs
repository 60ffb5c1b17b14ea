//! Reductions behind the dashboard metric cards.
//!
//! Empty input and zero denominators have defined results (0, or a floor of
//! one) instead of failing.

use std::iter::Sum;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::StatusKind;

/// Count per status, with every status of `S` present
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusCounts<S: StatusKind> {
    buckets: Vec<(S, usize)>,
}

impl<S: StatusKind> StatusCounts<S> {
    pub fn new() -> Self {
        Self {
            buckets: S::ALL.iter().map(|s| (*s, 0)).collect(),
        }
    }

    pub fn add(&mut self, status: S) {
        if let Some(bucket) = self.buckets.iter_mut().find(|(s, _)| *s == status) {
            bucket.1 += 1;
        }
    }

    pub fn get(&self, status: S) -> usize {
        self.buckets
            .iter()
            .find(|(s, _)| *s == status)
            .map_or(0, |(_, n)| *n)
    }

    pub fn total(&self) -> usize {
        self.buckets.iter().map(|(_, n)| n).sum()
    }

    /// Buckets in `S::ALL` order
    pub fn iter(&self) -> impl Iterator<Item = (S, usize)> + '_ {
        self.buckets.iter().copied()
    }
}

impl<S: StatusKind> Default for StatusCounts<S> {
    fn default() -> Self {
        Self::new()
    }
}

/// Group items by a derived status and count each bucket.
pub fn count_by_status<T, S, I>(items: I, classify: impl Fn(&T) -> S) -> StatusCounts<S>
where
    S: StatusKind,
    I: IntoIterator<Item = T>,
{
    let mut counts = StatusCounts::new();
    for item in items {
        counts.add(classify(&item));
    }
    counts
}

/// Sum a field, counting missing values as zero.
pub fn sum_with_default<T, N>(items: &[T], field: impl Fn(&T) -> Option<N>) -> N
where
    N: Default + Sum<N>,
{
    items.iter().map(|item| field(item).unwrap_or_default()).sum()
}

/// Largest value of a field; 0 for empty input, missing values count as 0.
pub fn max_of_field<T, N>(items: &[T], field: impl Fn(&T) -> Option<N>) -> N
where
    N: Default + PartialOrd + Copy,
{
    items
        .iter()
        .map(|item| field(item).unwrap_or_default())
        .fold(None, |best: Option<N>, value| match best {
            Some(current) if current >= value => Some(current),
            _ => Some(value),
        })
        .unwrap_or_default()
}

/// `round(100 * numerator / max(denominator, 1))`
pub fn ratio_as_percentage(numerator: f64, denominator: f64) -> i64 {
    (100.0 * numerator / denominator.max(1.0)).round() as i64
}

/// Whole days from `since` to `now`, floored and never negative
pub fn elapsed_days(since: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (now - since).num_days().max(0)
}

/// `total / max(elapsed_days, 1)`
pub fn per_day(total: f64, elapsed_days: i64) -> f64 {
    total / elapsed_days.max(1) as f64
}
