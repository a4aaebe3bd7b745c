//! Timestamp-derived identifiers for entities saved without one.

use std::sync::atomic::{AtomicI64, Ordering};

/// Issues `<prefix>_<millis>` identifiers.
///
/// The millisecond component never repeats within one generator, so ids stay
/// unique for the life of the process even when several are minted in the
/// same millisecond.
#[derive(Debug, Default)]
pub struct IdGenerator {
    last_millis: AtomicI64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next(&self, prefix: &str) -> String {
        let now = chrono::Utc::now().timestamp_millis();
        let mut last = self.last_millis.load(Ordering::SeqCst);
        loop {
            let candidate = if now > last { now } else { last + 1 };
            match self.last_millis.compare_exchange(
                last,
                candidate,
                Ordering::SeqCst,
                Ordering::SeqCst,
            ) {
                Ok(_) => return format!("{}_{}", prefix, candidate),
                Err(actual) => last = actual,
            }
        }
    }
}
