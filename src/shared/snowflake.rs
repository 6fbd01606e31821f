//! Snowflake ID Generator
//!
//! Time-ordered unique IDs for users and recipes.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

const SEQUENCE_BITS: u64 = 12;
const SEQUENCE_MASK: u64 = (1 << SEQUENCE_BITS) - 1;

/// Snowflake ID generator
pub struct SnowflakeGenerator {
    machine_id: u64,
    epoch: u64,
    /// Last issued `(timestamp << 12) | sequence`, updated as one word.
    state: AtomicU64,
}

impl SnowflakeGenerator {
    /// Create a new snowflake generator
    pub fn new(machine_id: u64, epoch: u64) -> Self {
        Self {
            machine_id: machine_id & 0x3FF, // 10 bits
            epoch,
            state: AtomicU64::new(0),
        }
    }

    /// Generate a new snowflake ID
    ///
    /// Never repeats: an exhausted sequence waits for the next millisecond,
    /// and a clock that steps backwards keeps issuing from the last timestamp.
    pub fn generate(&self) -> i64 {
        let mut current = self.state.load(Ordering::Acquire);
        let (timestamp, sequence) = loop {
            let now = self.current_timestamp().max(self.epoch);
            let last_timestamp = current >> SEQUENCE_BITS;
            let last_sequence = current & SEQUENCE_MASK;

            let next = if now > last_timestamp {
                (now, 0)
            } else if last_sequence < SEQUENCE_MASK {
                (last_timestamp, last_sequence + 1)
            } else {
                std::hint::spin_loop();
                current = self.state.load(Ordering::Acquire);
                continue;
            };

            match self.state.compare_exchange_weak(
                current,
                (next.0 << SEQUENCE_BITS) | next.1,
                Ordering::AcqRel,
                Ordering::Acquire,
            ) {
                Ok(_) => break next,
                Err(actual) => current = actual,
            }
        };

        let id = ((timestamp - self.epoch) << 22) | (self.machine_id << 12) | sequence;

        (id & i64::MAX as u64) as i64
    }

    /// Extract the millisecond timestamp from an ID produced by this generator
    pub fn extract_timestamp(&self, snowflake: i64) -> u64 {
        ((snowflake as u64) >> 22) + self.epoch
    }

    fn current_timestamp(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or_default()
    }
}
