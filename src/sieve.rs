//! # Sieve — Parallel Composite Marking over k-Space
//!
//! Decides, for every k in a [`KRange`], whether (6k+5, 6k+7) can both be
//! prime. Every slot starts as a presumed twin generator; the four
//! selection rules knock out each k whose lower or upper member is a product
//! of two factors ≥ 5. Whatever survives is a twin pair.
//!
//! ## Algorithm: Composite Marker
//!
//! For a fixed factor index x, y sweeps upward from `y_start(x, k_start)`:
//!
//! 1. fst(x, y) is the smallest rule output. Once it passes k_end nothing
//!    else for this x can land in range, so the sweep ends.
//! 2. trd(x, y) is checked on its own; its order relative to fth flips at
//!    y = x.
//! 3. fth(x, y) ≤ snd(x, y) always, so an fth past k_end lets the marker
//!    skip snd for this y.
//!
//! fst grows by 6x+5 per step, so every sweep terminates. x runs up to
//! `x_exit(k_end)`: any composite ≤ 6·k_end+7 has a factor below its root.
//!
//! ## Concurrency
//!
//! Worker i of W owns the x values {i, i+W, i+2W, …} (stride partition).
//! Workers run on a dedicated rayon pool of exactly W threads inside one
//! `scope`, which returns only after every worker finishes.
//!
//! The mark array is the only shared state. Different x values can hit the
//! same k through different factorizations, so any worker may write any
//! slot. Slots are one `AtomicBool` each (no bit packing) and the only
//! store is `false` with `Relaxed` ordering. Marking is monotone and
//! idempotent, so the final array is independent of interleaving; the scope
//! join publishes every store to the scanning phase.

use anyhow::{Context, Result};
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, info};

use crate::index::{self, KRange};
use crate::progress::Progress;
use crate::rules;

/// The shared candidate array: one slot per k in the range, `true` while k
/// is still a presumed twin generator.
pub struct CompositeMarks {
    range: KRange,
    slots: Vec<AtomicBool>,
    workers: usize,
}

impl CompositeMarks {
    /// Allocate an all-`true` array covering `range`.
    ///
    /// Allocation failure is reported as an error rather than aborting.
    pub fn new(range: KRange) -> Result<Self> {
        let len = usize::try_from(range.count()).with_context(|| {
            format!(
                "k-range {}..={} does not fit in addressable memory",
                range.start, range.end
            )
        })?;
        let mut slots = Vec::new();
        slots
            .try_reserve_exact(len)
            .with_context(|| format!("failed to allocate mark array of {} slots", len))?;
        slots.resize_with(len, || AtomicBool::new(true));
        Ok(CompositeMarks {
            range,
            slots,
            workers: 0,
        })
    }

    pub fn range(&self) -> KRange {
        self.range
    }

    /// Threads that actually swept this array; 0 until [`sieve`] has run.
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Flag `k` as unable to generate a twin pair. Caller guarantees `k` is in range.
    #[inline]
    fn mark(&self, k: u64) {
        self.slots[(k - self.range.start) as usize].store(false, Ordering::Relaxed);
    }

    #[inline]
    fn mark_in_range(&self, k: u64) {
        if self.range.contains(k) {
            self.mark(k);
        }
    }

    /// Whether `k` survived the sieve. Out-of-range k is never a candidate.
    pub fn is_candidate(&self, k: u64) -> bool {
        self.range.contains(k)
            && self.slots[(k - self.range.start) as usize].load(Ordering::Relaxed)
    }

    /// Surviving k-indices in ascending order.
    pub fn survivors(&self) -> impl Iterator<Item = u64> + '_ {
        let start = self.range.start;
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.load(Ordering::Relaxed))
            .map(move |(i, _)| start + i as u64)
    }

    pub fn survivor_count(&self) -> u64 {
        self.slots
            .iter()
            .filter(|slot| slot.load(Ordering::Relaxed))
            .count() as u64
    }
}

/// Sweep every y for one factor index `x`, marking the k-indices it excludes.
pub fn mark_x(marks: &CompositeMarks, x: u64) {
    let KRange { start, end } = marks.range;
    let mut y = index::y_start(x, start);

    loop {
        let k_fst = rules::fst(x, y);
        if k_fst > end {
            break;
        }
        if k_fst >= start {
            marks.mark(k_fst);
        }

        marks.mark_in_range(rules::trd(x, y));

        let k_fth = rules::fth(x, y);
        if k_fth <= end {
            if k_fth >= start {
                marks.mark(k_fth);
            }
            marks.mark_in_range(rules::snd(x, y));
        }

        y += 1;
    }
}

/// Run [`mark_x`] over the stride class {first, first+stride, …} up to `x_exit`.
pub fn mark_class(
    marks: &CompositeMarks,
    first: u64,
    stride: u64,
    x_exit: u64,
    progress: Option<&Progress>,
) {
    let mut x = first;
    while x <= x_exit {
        mark_x(marks, x);
        if let Some(p) = progress {
            p.x_done.fetch_add(1, Ordering::Relaxed);
        }
        x += stride;
    }
}

/// Resolve a requested worker count: 0 means every available hardware thread.
pub fn resolve_workers(requested: usize) -> usize {
    if requested > 0 {
        return requested;
    }
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

/// Mark every k in `range` that cannot generate a twin pair.
///
/// `workers` is the requested thread count (0 = all cores). It is capped at
/// the number of x values to sweep so no thread starts with an empty class.
pub fn sieve(range: KRange, workers: usize, progress: Option<&Progress>) -> Result<CompositeMarks> {
    let mut marks = CompositeMarks::new(range)?;
    let x_exit = range.x_exit();
    let x_count = x_exit + 1;
    let workers = resolve_workers(workers).min(usize::try_from(x_count).unwrap_or(usize::MAX));

    if let Some(p) = progress {
        p.x_total.store(x_count, Ordering::Relaxed);
    }

    info!(
        k_start = range.start,
        k_end = range.end,
        slots = range.count(),
        x_exit,
        workers,
        "sieve starting"
    );

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .thread_name(|i| format!("sieve-{}", i))
        .build()
        .context("failed to build sieve thread pool")?;

    marks.workers = workers;
    let stride = workers as u64;
    pool.scope(|s| {
        for first in 0..stride {
            let marks = &marks;
            s.spawn(move |_| {
                mark_class(marks, first, stride, x_exit, progress);
                debug!(worker = first, "sieve worker finished");
            });
        }
    });

    info!(survivors = marks.survivor_count(), "sieve complete");
    Ok(marks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rug::integer::IsPrime;
    use rug::Integer;

    fn is_prime(n: u64) -> bool {
        Integer::from(n).is_probably_prime(25) != IsPrime::No
    }

    fn survivors(inf: u64, sup: u64, workers: usize) -> Vec<u64> {
        let range = KRange::from_bounds(inf, sup).unwrap();
        sieve(range, workers, None).unwrap().survivors().collect()
    }

    #[test]
    fn new_marks_start_all_true() {
        let range = KRange { start: 10, end: 19 };
        let marks = CompositeMarks::new(range).unwrap();
        assert_eq!(marks.survivor_count(), 10);
        assert!((10..=19).all(|k| marks.is_candidate(k)));
        assert!(!marks.is_candidate(9));
        assert!(!marks.is_candidate(20));
    }

    #[test]
    fn small_range_survivors() {
        // (5,7) (11,13) (17,19)
        assert_eq!(survivors(1, 20, 1), vec![0, 1, 2]);
        // (101,103) (107,109)
        assert_eq!(survivors(100, 110, 1), vec![16, 17]);
    }

    #[test]
    fn mark_x_zero_excludes_multiples_of_five_and_seven() {
        let range = KRange { start: 0, end: 20 };
        let marks = CompositeMarks::new(range).unwrap();
        mark_x(&marks, 0);
        // k=3: 25, k=5: 35, k=7: 49, k=8: 55
        for k in [3, 5, 7, 8] {
            assert!(!marks.is_candidate(k), "k={} should be marked", k);
        }
        // k=0,1,2: (5,7) (11,13) (17,19)
        for k in [0, 1, 2] {
            assert!(marks.is_candidate(k), "k={} should survive", k);
        }
    }

    #[test]
    fn mark_x_respects_range_start() {
        // Starting the range past k=3 must not panic on fst(0,0)=3
        let range = KRange { start: 100, end: 120 };
        let marks = CompositeMarks::new(range).unwrap();
        for x in 0..=range.x_exit() {
            mark_x(&marks, x);
        }
        for k in marks.survivors() {
            let (a, b) = index::k_to_pair(k);
            assert!(is_prime(a) && is_prime(b), "k={} -> ({}, {})", k, a, b);
        }
    }

    #[test]
    fn survivors_match_primality_oracle() {
        let range = KRange::from_bounds(0, 20_000).unwrap();
        let marks = sieve(range, 1, None).unwrap();
        for k in range.start..=range.end {
            let (a, b) = index::k_to_pair(k);
            assert_eq!(
                marks.is_candidate(k),
                is_prime(a) && is_prime(b),
                "k={} ({}, {})",
                k,
                a,
                b
            );
        }
    }

    #[test]
    fn offset_range_matches_primality_oracle() {
        let range = KRange::from_bounds(1_000_000, 1_050_000).unwrap();
        let marks = sieve(range, 3, None).unwrap();
        for k in range.start..=range.end {
            let (a, b) = index::k_to_pair(k);
            assert_eq!(marks.is_candidate(k), is_prime(a) && is_prime(b), "k={}", k);
        }
    }

    #[test]
    fn worker_count_does_not_change_result() {
        let single = survivors(10_000, 200_000, 1);
        for workers in [2, 3, 4, 7, 16] {
            assert_eq!(survivors(10_000, 200_000, workers), single, "workers={}", workers);
        }
    }

    #[test]
    fn more_workers_than_x_values() {
        // x_exit is 0 here, so only one worker is actually spawned
        assert_eq!(survivors(1, 20, 64), vec![0, 1, 2]);
        let marks = sieve(KRange::from_bounds(1, 20).unwrap(), 64, None).unwrap();
        assert_eq!(marks.workers(), 1);
    }

    #[test]
    fn workers_reports_requested_count_when_enough_x_values() {
        let range = KRange::from_bounds(0, 1_000_000).unwrap();
        assert!(range.x_exit() + 1 >= 4);
        assert_eq!(sieve(range, 4, None).unwrap().workers(), 4);
        assert_eq!(CompositeMarks::new(range).unwrap().workers(), 0);
    }

    #[test]
    fn oversized_range_reports_allocation_failure() {
        let range = KRange::from_bounds(0, u64::MAX).unwrap();
        let err = CompositeMarks::new(range).err().unwrap();
        assert!(
            err.to_string().starts_with("failed to allocate mark array of"),
            "unexpected error: {:#}",
            err
        );
    }

    #[test]
    fn single_slot_range() {
        // k=1 only: (11, 13)
        let range = KRange { start: 1, end: 1 };
        let marks = sieve(range, 2, None).unwrap();
        assert_eq!(marks.survivors().collect::<Vec<_>>(), vec![1]);
        // k=3 only: (23, 25)
        let range = KRange { start: 3, end: 3 };
        let marks = sieve(range, 2, None).unwrap();
        assert_eq!(marks.survivor_count(), 0);
    }

    #[test]
    fn progress_counts_every_x() {
        let progress = Progress::new();
        let range = KRange::from_bounds(0, 1_000_000).unwrap();
        sieve(range, 4, Some(&*progress)).unwrap();
        let total = range.x_exit() + 1;
        assert_eq!(progress.x_total.load(Ordering::Relaxed), total);
        assert_eq!(progress.x_done.load(Ordering::Relaxed), total);
    }

    #[test]
    fn resolve_workers_defaults_to_hardware() {
        assert_eq!(resolve_workers(5), 5);
        assert!(resolve_workers(0) >= 1);
    }
}
