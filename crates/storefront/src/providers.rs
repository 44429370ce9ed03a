//! Injectable time, randomness and latency.
//!
//! Production code uses [`SystemClock`], [`RandomOrderNumbers`] and
//! [`RandomViews`]; tests substitute the fixed variants so results are
//! deterministic.

use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use chrono::{DateTime, Utc};
use rand::Rng;

use crate::models::Product;

/// Smallest order number handed out.
pub const ORDER_NUMBER_MIN: u32 = 100_000;
/// Largest order number handed out.
pub const ORDER_NUMBER_MAX: u32 = 999_999;

/// Source of the current time.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Always returns the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Source of six-digit order numbers.
pub trait OrderNumberSource: Send + Sync {
    /// Next order number in `ORDER_NUMBER_MIN..=ORDER_NUMBER_MAX`.
    fn next_order_number(&self) -> u32;
}

/// Uniformly random order numbers.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomOrderNumbers;

impl OrderNumberSource for RandomOrderNumbers {
    fn next_order_number(&self) -> u32 {
        rand::rng().random_range(ORDER_NUMBER_MIN..=ORDER_NUMBER_MAX)
    }
}

/// Sequential order numbers starting at a fixed value, wrapping within range.
#[derive(Debug)]
pub struct SequentialOrderNumbers {
    next: AtomicU32,
}

impl SequentialOrderNumbers {
    #[must_use]
    pub fn starting_at(first: u32) -> Self {
        Self {
            next: AtomicU32::new(first.clamp(ORDER_NUMBER_MIN, ORDER_NUMBER_MAX)),
        }
    }
}

impl OrderNumberSource for SequentialOrderNumbers {
    fn next_order_number(&self) -> u32 {
        let n = self.next.fetch_add(1, Ordering::Relaxed);
        ORDER_NUMBER_MIN + (n - ORDER_NUMBER_MIN) % (ORDER_NUMBER_MAX - ORDER_NUMBER_MIN + 1)
    }
}

/// Source of the view counts shown on the seller dashboard.
pub trait ViewCounter: Send + Sync {
    fn views(&self, product: &Product) -> u32;
}

/// Random demo view counts below 100.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomViews;

impl ViewCounter for RandomViews {
    fn views(&self, _product: &Product) -> u32 {
        rand::rng().random_range(0..100)
    }
}

/// Derives view counts from popularity, for reproducible output.
#[derive(Debug, Clone, Copy, Default)]
pub struct PopularityViews;

impl ViewCounter for PopularityViews {
    fn views(&self, product: &Product) -> u32 {
        product.popularity
    }
}

/// Artificial delay standing in for a network round trip.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Latency(pub Duration);

impl Latency {
    /// No delay.
    pub const NONE: Self = Self(Duration::ZERO);

    /// Wait for the configured duration.
    pub async fn simulate(self) {
        if !self.0.is_zero() {
            tracing::debug!(millis = self.0.as_millis(), "Simulating latency");
            tokio::time::sleep(self.0).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::models::product::fixtures::product;

    #[test]
    fn test_random_order_numbers_in_range() {
        let source = RandomOrderNumbers;
        for _ in 0..200 {
            let n = source.next_order_number();
            assert!((ORDER_NUMBER_MIN..=ORDER_NUMBER_MAX).contains(&n));
        }
    }

    #[test]
    fn test_sequential_order_numbers() {
        let source = SequentialOrderNumbers::starting_at(123_456);
        assert_eq!(source.next_order_number(), 123_456);
        assert_eq!(source.next_order_number(), 123_457);
    }

    #[test]
    fn test_sequential_clamps_start() {
        let source = SequentialOrderNumbers::starting_at(5);
        assert_eq!(source.next_order_number(), ORDER_NUMBER_MIN);
    }

    #[test]
    fn test_fixed_clock() {
        let instant = Utc.with_ymd_and_hms(2024, 3, 9, 12, 0, 0).single();
        let clock = FixedClock(instant.unwrap_or_default());
        assert_eq!(clock.now(), clock.now());
    }

    #[test]
    fn test_view_counters() {
        let mut p = product(1, "Tee", 100);
        p.popularity = 57;
        assert_eq!(PopularityViews.views(&p), 57);
        assert!(RandomViews.views(&p) < 100);
    }

    #[tokio::test]
    async fn test_zero_latency_returns_immediately() {
        Latency::NONE.simulate().await;
    }
}
