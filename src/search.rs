//! # Search — Range to Twin Pairs
//!
//! Ties the pieces together for one inclusive range [inf, sup]:
//!
//! 1. Derive the k-range. An empty range (including sup < 7) skips the
//!    sieve entirely.
//! 2. Run the parallel sieve over the shared mark array.
//! 3. Scan survivors in ascending k, turning each into (6k+5, 6k+7).
//!
//! (3, 5) is outside the residue-class scheme and is emitted first whenever
//! inf ≤ 3.

use anyhow::{bail, Result};
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::info;

use crate::index::{self, KRange};
use crate::pairs::{TwinPair, TwinPairs};
use crate::progress::{self, Progress};
use crate::sieve;

/// A validated inclusive search range with `inf <= sup`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Range {
    inf: u64,
    sup: u64,
}

impl Range {
    pub fn new(inf: u64, sup: u64) -> Result<Self> {
        if sup < inf {
            bail!("upper bound ({}) must be >= lower bound ({})", sup, inf);
        }
        Ok(Range { inf, sup })
    }

    pub fn inf(&self) -> u64 {
        self.inf
    }

    pub fn sup(&self) -> u64 {
        self.sup
    }

    pub fn k_range(&self) -> Option<KRange> {
        KRange::from_bounds(self.inf, self.sup)
    }

    /// Whether the pair (3, 5) is emitted for this range.
    pub fn includes_three_five(&self) -> bool {
        self.inf <= 3
    }
}

#[derive(Debug, Clone, Default)]
pub struct SearchOptions {
    /// Sieve worker threads; 0 = all logical cores.
    pub workers: usize,
    /// Log a progress line this often while sieving; `None` disables it.
    pub progress_interval: Option<Duration>,
}

#[derive(Debug)]
pub struct SearchOutcome {
    pub pairs: TwinPairs,
    pub workers: usize,
    pub elapsed: Duration,
}

/// Enumerate every twin pair in `range`, in ascending order.
pub fn run(range: Range, opts: &SearchOptions) -> Result<SearchOutcome> {
    let started = Instant::now();
    let workers = sieve::resolve_workers(opts.workers);
    let progress = Progress::new();
    let reporter = opts
        .progress_interval
        .map(|interval| progress.start_reporter(interval));

    let result = collect_pairs(range, workers, &progress);

    progress.stop();
    if let Some(handle) = reporter {
        progress::join_reporter(handle);
    }
    let (pairs, workers) = result?;
    let elapsed = started.elapsed();

    info!(
        inf = range.inf,
        sup = range.sup,
        pairs = pairs.len(),
        elapsed_secs = elapsed.as_secs_f64(),
        "search complete"
    );
    Ok(SearchOutcome {
        pairs,
        workers,
        elapsed,
    })
}

/// Returns the pairs and the number of sieve threads that actually ran.
fn collect_pairs(
    range: Range,
    workers: usize,
    progress: &Arc<Progress>,
) -> Result<(TwinPairs, usize)> {
    let Some(k_range) = range.k_range() else {
        info!(inf = range.inf, sup = range.sup, "no (6k+5, 6k+7) candidates in range");
        let mut pairs = TwinPairs::new();
        if range.includes_three_five() {
            pairs.insert(TwinPair::new(3));
        }
        return Ok((pairs, 0));
    };

    let marks = sieve::sieve(k_range, workers, Some(&**progress))?;

    let survivors = marks.survivor_count();
    let mut pairs = TwinPairs::with_capacity(usize::try_from(survivors).unwrap_or(0) + 1);
    if range.includes_three_five() {
        pairs.insert(TwinPair::new(3));
    }
    for k in marks.survivors() {
        let (a, _) = index::k_to_pair(k);
        pairs.insert(TwinPair::new(a));
        progress.found.fetch_add(1, Ordering::Relaxed);
    }
    Ok((pairs, marks.workers()))
}
