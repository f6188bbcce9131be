use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicU32, Ordering};

/// `PS` + UTC timestamp to the second + a 3-digit sequence that keeps orders
/// placed within the same second apart.
pub fn generate_order_number(now: DateTime<Utc>, sequence: u32) -> String {
    format!("PS{}{:03}", now.format("%Y%m%d%H%M%S"), sequence % 1000)
}

#[derive(Debug, Default)]
pub struct OrderNumberGenerator {
    sequence: AtomicU32,
}

impl OrderNumberGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next(&self, now: DateTime<Utc>) -> String {
        let sequence = self.sequence.fetch_add(1, Ordering::Relaxed);
        generate_order_number(now, sequence)
    }
}
