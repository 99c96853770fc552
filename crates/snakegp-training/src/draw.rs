//! Unit draws used by the tree operators.
//!
//! Every random decision the generator and the subtree operators make
//! consumes exactly one `f64` in `[0, 1)` from the random source, so a run can
//! be replayed from a plain sequence of numbers.

use rand::Rng;

/// Draws `u` and returns whether `u < probability`.
pub(crate) fn chance<R>(rng: &mut R, probability: f64) -> bool
where
    R: Rng + ?Sized,
{
    rng.random::<f64>() < probability
}

/// Draws `u` and returns `⌊u · len⌋`, clamped to `len - 1`.
pub(crate) fn index<R>(rng: &mut R, len: usize) -> usize
where
    R: Rng + ?Sized,
{
    debug_assert!(len > 0);
    let u: f64 = rng.random();
    #[expect(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    let index = (u * len as f64) as usize;
    index.min(len - 1)
}

/// Draws `u` and maps it linearly onto `[start, end)`.
pub(crate) fn in_range<R>(rng: &mut R, start: f64, end: f64) -> f64
where
    R: Rng + ?Sized,
{
    let u: f64 = rng.random();
    start + u * (end - start)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::SequenceRng;

    #[test]
    fn test_draws_follow_sequence() {
        let mut rng = SequenceRng::new([0.1, 0.3, 0.0, 0.5, 1.0, 0.5]);
        assert!(chance(&mut rng, 0.2));
        assert!(!chance(&mut rng, 0.2));
        assert_eq!(index(&mut rng, 3), 0);
        assert_eq!(index(&mut rng, 3), 1);
        assert_eq!(index(&mut rng, 3), 2);
        assert!((in_range(&mut rng, -999.0, 999.0)).abs() < 1e-9);
    }
}
