//! # Index — Mapping Between Numbers and k-Indices
//!
//! Every prime p > 3 lies in residue class 5 or 7 modulo 6, so every twin
//! pair beyond (3, 5) has the shape (6k+5, 6k+7) for some k ≥ 0. The sieve
//! works entirely in this k-space; this module converts user bounds into a
//! k-range, derives the loop limits used by the composite marker, and turns
//! a surviving k back into its pair.
//!
//! ## Bounds
//!
//! - `k_start(inf)` = ⌈(inf − 5) / 6⌉, the smallest k with 6k+5 ≥ inf
//!   (0 when inf < 5).
//! - `k_end(sup)` = ⌊(sup − 7) / 6⌋, the largest k with 6k+7 ≤ sup. Only
//!   defined for sup ≥ 7; smaller bounds produce no range at all.
//! - `x_exit(k_end)` = ⌊(⌈√(6·k_end + 7)⌉ − 5) / 6⌋. Any composite member
//!   ≤ 6·k_end+7 has a factor ≤ its square root, so factor indices beyond
//!   x_exit never need to be swept.
//! - `y_start(x, k_start)` = ⌊(k_start − 7x − 7) / (6x + 7)⌋, or 0. Below
//!   this y even the largest rule (snd) stays under k_start.

use crate::{LOWER_RESIDUE_CLASS, MODULO, UPPER_RESIDUE_CLASS};

/// Smallest k such that 6k+5 ≥ `inf`.
pub fn k_start(inf: u64) -> u64 {
    if inf < LOWER_RESIDUE_CLASS {
        return 0;
    }
    (inf - LOWER_RESIDUE_CLASS).div_ceil(MODULO)
}

/// Largest k such that 6k+7 ≤ `sup`, or `None` when `sup < 7`.
pub fn k_end(sup: u64) -> Option<u64> {
    sup.checked_sub(UPPER_RESIDUE_CLASS).map(|d| d / MODULO)
}

/// Largest x whose smallest product (6x+5)² can still reach k_end.
pub fn x_exit(k_end: u64) -> u64 {
    let limit = k_end * MODULO + UPPER_RESIDUE_CLASS;
    ceil_sqrt(limit).saturating_sub(LOWER_RESIDUE_CLASS) / MODULO
}

/// First y worth sweeping for `x` given the lower end of the k-range.
pub fn y_start(x: u64, k_start: u64) -> u64 {
    let floor = UPPER_RESIDUE_CLASS * x + UPPER_RESIDUE_CLASS;
    if k_start < floor {
        return 0;
    }
    (k_start - floor) / (MODULO * x + UPPER_RESIDUE_CLASS)
}

/// The twin candidate encoded by `k`: (6k+5, 6k+7).
pub fn k_to_pair(k: u64) -> (u64, u64) {
    let a = k * MODULO + LOWER_RESIDUE_CLASS;
    (a, a + 2)
}

fn ceil_sqrt(n: u64) -> u64 {
    let r = n.isqrt();
    if r * r < n {
        r + 1
    } else {
        r
    }
}

/// An inclusive, non-empty range of k-indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KRange {
    pub start: u64,
    pub end: u64,
}

impl KRange {
    /// Derive the k-range covering `[inf, sup]`.
    ///
    /// Returns `None` when no candidate pair (6k+5, 6k+7) fits inside the
    /// bounds, including every `sup < 7`.
    pub fn from_bounds(inf: u64, sup: u64) -> Option<Self> {
        let start = k_start(inf);
        let end = k_end(sup)?;
        (start <= end).then_some(KRange { start, end })
    }

    /// Number of k-indices in the range.
    pub fn count(&self) -> u64 {
        self.end - self.start + 1
    }

    pub fn contains(&self, k: u64) -> bool {
        self.start <= k && k <= self.end
    }

    pub fn x_exit(&self) -> u64 {
        x_exit(self.end)
    }
}
