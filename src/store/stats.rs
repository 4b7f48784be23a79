//! Store Statistics Module
//!
//! Counters backing the in-process store's `info()` reply.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

// == Store Stats ==
/// Tracks command count and uptime for the in-process store.
#[derive(Debug)]
pub struct StoreStats {
    /// Number of commands served since startup
    commands_processed: AtomicU64,
    /// Creation instant, used for uptime
    started_at: Instant,
}

impl StoreStats {
    pub fn new() -> Self {
        Self {
            commands_processed: AtomicU64::new(0),
            started_at: Instant::now(),
        }
    }

    /// Records one processed command.
    pub fn record_command(&self) {
        self.commands_processed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn commands_processed(&self) -> u64 {
        self.commands_processed.load(Ordering::Relaxed)
    }

    pub fn uptime_secs(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}

impl Default for StoreStats {
    fn default() -> Self {
        Self::new()
    }
}

/// Formats a byte count the way Redis renders `used_memory_human`.
///
/// `512` becomes `512B`, `1536` becomes `1.50K`, and so on up to `P`.
pub fn format_human_bytes(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["K", "M", "G", "T", "P"];

    if bytes < 1024 {
        return format!("{}B", bytes);
    }

    let mut value = bytes as f64 / 1024.0;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{:.2}{}", value, UNITS[unit])
}
