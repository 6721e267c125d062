//! Memory Monitor - periodic process memory snapshot

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::interval;

/// Point-in-time process memory figures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemorySnapshot {
    /// Resident set size, in KiB
    pub rss_kb: u64,
    /// Virtual memory size, in KiB
    pub virtual_kb: u64,
}

impl From<memory_stats::MemoryStats> for MemorySnapshot {
    fn from(stats: memory_stats::MemoryStats) -> Self {
        Self {
            rss_kb: stats.physical_mem as u64 / 1024,
            virtual_kb: stats.virtual_mem as u64 / 1024,
        }
    }
}

/// Read the current process memory usage; `None` where the platform
/// does not expose it
pub fn snapshot() -> Option<MemorySnapshot> {
    memory_stats::memory_stats().map(MemorySnapshot::from)
}

/// Log a memory snapshot every `every`, starting immediately
pub fn spawn_memory_monitor(every: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = interval(every);
        loop {
            ticker.tick().await;
            match snapshot() {
                Some(s) => tracing::info!(
                    rss_kb = s.rss_kb,
                    virtual_kb = s.virtual_kb,
                    "🧮 Memory snapshot"
                ),
                None => tracing::debug!("Memory snapshot unavailable on this platform"),
            }
        }
    })
}
