//! # twinsieve — Twin Prime Enumeration by Residue-Class Sieving
//!
//! Every prime p > 3 is congruent to 5 or 7 modulo 6, so every twin pair
//! beyond (3, 5) is (6k+5, 6k+7) for some k. The library maps a numeric range
//! to a k-range ([`index`]), knocks out every k whose pair contains a
//! composite using four closed-form selection rules ([`rules`]) swept by a
//! pool of worker threads ([`sieve`]), and collects the survivors as pairs
//! ([`pairs`], [`search`]).
//!
//! Everything stays within native `u64`: bounds up to `u64::MAX` are
//! supported and no big-number arithmetic is involved in the sieve.

pub mod config;
pub mod index;
pub mod pairs;
pub mod progress;
pub mod rules;
pub mod search;
pub mod sieve;
pub mod summary;
pub mod verify;

/// Spacing of the residue classes that can hold primes > 3.
pub const MODULO: u64 = 6;
/// Residue class of the lower twin member (6k+5).
pub const LOWER_RESIDUE_CLASS: u64 = 5;
/// Residue class of the upper twin member (6k+7).
pub const UPPER_RESIDUE_CLASS: u64 = 7;
