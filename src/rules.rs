//! # Rules — Selection Rules for Composite Members
//!
//! A product of two numbers from the classes 6x+5 and 6y+5 / 6y+7 is again
//! of the form 6k+5 or 6k+7. Each selection rule returns that k, i.e. the
//! index of the twin candidate that one of the products knocks out.
//!
//! | Rule | Product | k | Member hit |
//! |------|---------|---|------------|
//! | fst | (6x+5)(6y+5) | 6xy + 5x + 5y + 3 | 6k+7 |
//! | snd | (6x+7)(6y+7) | 6xy + 7x + 7y + 7 | 6k+7 |
//! | trd | (6x+7)(6y+5) | 6xy + 5x + 7y + 5 | 6k+5 |
//! | fth | (6x+5)(6y+7) | 6xy + 7x + 5y + 5 | 6k+5 |
//!
//! All four share the shape `6xy + cx·x + cy·y + c`. For x, y ≥ 0 both
//! factors are at least 5, so the hit member is a genuine composite.
//!
//! ## Ordering
//!
//! For fixed (x, y):
//!
//! - trd − fst = 2y + 2 and fth − fst = 2x + 2, so fst is the smallest.
//! - snd − trd = 2x + 2 and snd − fth = 2y + 2, so snd is the largest.
//! - trd − fth = 2(y − x): the middle two swap order at y = x.
//!
//! The marker relies only on fst being the minimum and snd being above fth.

use crate::MODULO;

#[inline(always)]
fn rule(x: u64, y: u64, cx: u64, cy: u64, c: u64) -> u64 {
    MODULO * x * y + cx * x + cy * y + c
}

/// (6x+5)(6y+5) = 6·fst + 7.
#[inline]
pub fn fst(x: u64, y: u64) -> u64 {
    rule(x, y, 5, 5, 3)
}

/// (6x+7)(6y+7) = 6·snd + 7.
#[inline]
pub fn snd(x: u64, y: u64) -> u64 {
    rule(x, y, 7, 7, 7)
}

/// (6x+7)(6y+5) = 6·trd + 5.
#[inline]
pub fn trd(x: u64, y: u64) -> u64 {
    rule(x, y, 5, 7, 5)
}

/// (6x+5)(6y+7) = 6·fth + 5.
#[inline]
pub fn fth(x: u64, y: u64) -> u64 {
    rule(x, y, 7, 5, 5)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formulas_match_products() {
        for x in 0..30u64 {
            for y in 0..30u64 {
                let (a5, a7) = (6 * x + 5, 6 * x + 7);
                let (b5, b7) = (6 * y + 5, 6 * y + 7);
                assert_eq!(6 * fst(x, y) + 7, a5 * b5, "fst x={} y={}", x, y);
                assert_eq!(6 * snd(x, y) + 7, a7 * b7, "snd x={} y={}", x, y);
                assert_eq!(6 * trd(x, y) + 5, a7 * b5, "trd x={} y={}", x, y);
                assert_eq!(6 * fth(x, y) + 5, a5 * b7, "fth x={} y={}", x, y);
            }
        }
    }

    #[test]
    fn smallest_products() {
        // 25 = 6*3+7, 49 = 6*7+7, 35 = 6*5+5
        assert_eq!(fst(0, 0), 3);
        assert_eq!(snd(0, 0), 7);
        assert_eq!(trd(0, 0), 5);
        assert_eq!(fth(0, 0), 5);
    }

    #[test]
    fn fst_and_snd_are_symmetric() {
        for x in 0..20u64 {
            for y in 0..20u64 {
                assert_eq!(fst(x, y), fst(y, x));
                assert_eq!(snd(x, y), snd(y, x));
                assert_eq!(trd(x, y), fth(y, x));
            }
        }
    }

    #[test]
    fn fst_strictly_increases_in_y() {
        for x in 0..50u64 {
            for y in 0..50u64 {
                assert_eq!(fst(x, y + 1) - fst(x, y), 6 * x + 5);
            }
        }
    }

    #[test]
    fn middle_rules_swap_at_diagonal() {
        assert!(trd(3, 1) < fth(3, 1));
        assert_eq!(trd(4, 4), fth(4, 4));
        assert!(trd(1, 3) > fth(1, 3));
    }
}
