//! Process-wide usage counters
//!
//! The registry is the only writer. Counters are monotonic: they are never
//! reset or decremented, so successive snapshots never go backwards.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Point-in-time view of the global counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalStats {
    #[serde(rename = "total_urls")]
    pub total_links_created: u64,
    pub total_clicks: u64,
}

#[derive(Debug, Default)]
pub struct StatsAggregator {
    total_links_created: AtomicU64,
    total_clicks: AtomicU64,
}

impl StatsAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_link_created(&self) {
        self.total_links_created.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_click(&self) {
        self.total_clicks.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> GlobalStats {
        GlobalStats {
            total_links_created: self.total_links_created.load(Ordering::Relaxed),
            total_clicks: self.total_clicks.load(Ordering::Relaxed),
        }
    }
}
