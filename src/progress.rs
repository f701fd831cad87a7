//! # Progress — Atomic Sieve Progress Counters
//!
//! Thread-safe progress tracking shared between sieve workers and the
//! background status reporter. Workers bump `x_done` once per swept x
//! value with relaxed ordering; nothing reads the counters to make a
//! marking decision.
//!
//! ## Background Reporter
//!
//! An optional thread logs progress every `interval`: x values swept out of
//! the total, percentage, rate, and pairs found so far. It polls the
//! shutdown flag every 100ms so `stop()` followed by `join()` returns
//! promptly even with long intervals.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};
use tracing::{info, warn};

const SHUTDOWN_POLL: Duration = Duration::from_millis(100);

pub struct Progress {
    pub x_done: AtomicU64,
    pub x_total: AtomicU64,
    pub found: AtomicU64,
    start: Instant,
    shutdown: AtomicBool,
}

impl Progress {
    pub fn new() -> Arc<Self> {
        Arc::new(Progress {
            x_done: AtomicU64::new(0),
            x_total: AtomicU64::new(0),
            found: AtomicU64::new(0),
            start: Instant::now(),
            shutdown: AtomicBool::new(false),
        })
    }

    pub fn start_reporter(self: &Arc<Self>, interval: Duration) -> thread::JoinHandle<()> {
        let progress = Arc::clone(self);
        thread::spawn(move || {
            let mut last = Instant::now();
            loop {
                thread::sleep(SHUTDOWN_POLL.min(interval));
                if progress.shutdown.load(Ordering::Relaxed) {
                    break;
                }
                if last.elapsed() >= interval {
                    progress.print_status();
                    last = Instant::now();
                }
            }
        })
    }

    /// Fraction of x values swept, in percent. Zero before the sieve sizes itself.
    pub fn percent(&self) -> f64 {
        let total = self.x_total.load(Ordering::Relaxed);
        if total == 0 {
            return 0.0;
        }
        self.x_done.load(Ordering::Relaxed) as f64 / total as f64 * 100.0
    }

    pub fn print_status(&self) {
        let elapsed = self.start.elapsed();
        let x_done = self.x_done.load(Ordering::Relaxed);
        let x_total = self.x_total.load(Ordering::Relaxed);
        let found = self.found.load(Ordering::Relaxed);
        let rate = if elapsed.as_secs() > 0 {
            x_done as f64 / elapsed.as_secs_f64()
        } else {
            0.0
        };
        let h = elapsed.as_secs() / 3600;
        let m = (elapsed.as_secs() % 3600) / 60;
        let s = elapsed.as_secs() % 60;
        info!(
            x_done,
            x_total,
            percent = format_args!("{:.1}", self.percent()),
            rate = format_args!("{:.2}", rate),
            found,
            elapsed = format_args!("{:02}:{:02}:{:02}", h, m, s),
            "sieve progress"
        );
    }

    pub fn stop(&self) {
        self.shutdown.store(true, Ordering::Relaxed);
    }
}

/// Wait for a reporter thread, logging rather than propagating a panic in it.
pub fn join_reporter(handle: thread::JoinHandle<()>) {
    if let Err(e) = handle.join() {
        let reason = e
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| e.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown panic".to_string());
        warn!(reason = %reason, "progress reporter thread panicked");
    }
}
