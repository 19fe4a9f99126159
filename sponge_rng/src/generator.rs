// The contract every generator implements, and the sampling layer built on it.
//
// A generator supplies three things: how many 32-bit words of state it needs
// (`seed_words_required`), how to load those words (`init_state`), and how
// to advance and emit one word (`next_word`). Everything else lives here and
// is written once:
//
// - Seeding. Seeds are arbitrary-length `i32` slices, reinterpreted bit for
//   bit as `u32` and stretched through the Keccak sponge (`sponge.rs`) at a
//   256-bit capacity to exactly the number of words the generator asks for.
//   Identical seeds always produce identical state.
// - Sampling. `Sampling` is a blanket extension trait over `Generator`
//   providing `random_double`, `random_in_range`, and `random_index`.
//   Integer sampling is exact: a word is accepted only if it falls below
//   the largest multiple of the range size that fits in 2^32, so there is
//   no modulo bias for any range, including the full 32-bit one.
//
// Generators in this crate are only constructible already seeded, so there
// is no "uninitialized" state to guard against at sampling time.

use crate::error::RngError;
use crate::sponge::{self, SEED_WORD_RATE};

/// Size of the 32-bit word domain, 2^32.
pub const WORD_SPAN: u64 = 1 << 32;

const INV_2_32: f64 = 1.0 / 4_294_967_296.0;

/// A seedable source of uniformly distributed 32-bit words.
///
/// Implementors provide the state size, state loading, and word production;
/// seeding through the sponge is provided. The trait is object-safe, so
/// `&mut dyn Generator` gets the full `Sampling` API as well.
pub trait Generator {
    /// Short human-readable algorithm name, used in logs and diagnostics.
    fn name(&self) -> &'static str;

    /// Number of words `init_state` consumes.
    fn seed_words_required(&self) -> usize;

    /// Load generator state from `words`, applying any validity fix-up the
    /// algorithm needs.
    ///
    /// Panics if `words.len()` differs from `seed_words_required()`.
    fn init_state(&mut self, words: &[u32]);

    /// Advance the state and return the next word.
    fn next_word(&mut self) -> u32;

    /// Reseed from a single integer. Same as `seed_slice(&[seed])`.
    fn seed(&mut self, seed: i32) {
        self.seed_slice(&[seed]);
    }

    /// Reseed from an arbitrary-length integer sequence, resetting all state.
    fn seed_slice(&mut self, seed: &[i32]) {
        let input: Vec<u32> = seed.iter().map(|&s| s as u32).collect();
        let words = sponge::hash(&input, self.seed_words_required(), SEED_WORD_RATE);
        log::trace!(
            "seeding {} from {} seed words into {} state words",
            self.name(),
            seed.len(),
            words.len()
        );
        self.init_state(&words);
    }
}

/// Largest multiple of `n` not exceeding 2^32.
///
/// Words at or above this bound are rejected by the integer samplers.
///
/// Panics if `n` is zero or greater than 2^32.
pub fn rejection_bound(n: u64) -> u64 {
    assert!(
        (1..=WORD_SPAN).contains(&n),
        "rejection_bound: range size must be in 1..=2^32, got {n}"
    );
    WORD_SPAN - WORD_SPAN % n
}

/// Draw a uniform integer in `[0, n)` from `rng`.
///
/// This is the infallible core of `Sampling::random_in_range`: both consume
/// words identically for the same range size. `n` may be as large as 2^32.
///
/// Panics if `n` is zero or greater than 2^32.
pub fn sample_below<G: Generator + ?Sized>(rng: &mut G, n: u64) -> u64 {
    let bound = rejection_bound(n);
    // bound = step * n, so floor(n * num / bound) = num / step.
    let step = bound / n;
    loop {
        let num = u64::from(rng.next_word());
        if num < bound {
            return num / step;
        }
    }
}

/// Uniform sampling derived from any `Generator`.
pub trait Sampling: Generator {
    /// A double in `[0, 1)`: one word scaled by 2^-32.
    fn random_double(&mut self) -> f64 {
        f64::from(self.next_word()) * INV_2_32
    }

    /// A uniform integer in `[lower, upper]`, both inclusive.
    ///
    /// Works for every pair with `lower <= upper`, including
    /// `(i32::MIN, i32::MAX)`. Expected number of words consumed is below 2.
    fn random_in_range(&mut self, lower: i32, upper: i32) -> Result<i32, RngError> {
        if lower > upper {
            return Err(RngError::InvalidRange { lower, upper });
        }
        let n = (i64::from(upper) - i64::from(lower) + 1) as u64;
        let offset = sample_below(self, n) as i64;
        Ok((i64::from(lower) + offset) as i32)
    }

    /// A uniform index in `[0, count)`.
    ///
    /// A negative count is `NegativeCount`. A count of zero has no valid
    /// index and surfaces as `InvalidRange { lower: 0, upper: -1 }`.
    fn random_index(&mut self, count: i32) -> Result<i32, RngError> {
        if count < 0 {
            return Err(RngError::NegativeCount(count));
        }
        self.random_in_range(0, count - 1)
    }
}

impl<G: Generator + ?Sized> Sampling for G {}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Replays a fixed word script, wrapping at the end.
    pub(crate) struct Scripted {
        words: Vec<u32>,
        pos: usize,
    }

    impl Scripted {
        pub(crate) fn new(words: &[u32]) -> Self {
            Self {
                words: words.to_vec(),
                pos: 0,
            }
        }

        pub(crate) fn consumed(&self) -> usize {
            self.pos
        }
    }

    impl Generator for Scripted {
        fn name(&self) -> &'static str {
            "scripted"
        }

        fn seed_words_required(&self) -> usize {
            4
        }

        fn init_state(&mut self, words: &[u32]) {
            assert_eq!(words.len(), 4);
            self.words = words.to_vec();
            self.pos = 0;
        }

        fn next_word(&mut self) -> u32 {
            let w = self.words[self.pos % self.words.len()];
            self.pos += 1;
            w
        }
    }

    #[test]
    fn bound_is_largest_multiple_within_word_span() {
        for n in [1, 2, 3, 255, 256, 1000, WORD_SPAN - 1, WORD_SPAN] {
            let bound = rejection_bound(n);
            assert_eq!(bound % n, 0, "bound {bound} not a multiple of {n}");
            assert!(bound <= WORD_SPAN);
            assert!(WORD_SPAN - bound < n, "bound {bound} not maximal for {n}");
        }
        assert_eq!(rejection_bound(3), WORD_SPAN - 1);
        assert_eq!(rejection_bound(256), WORD_SPAN);
        assert_eq!(rejection_bound(WORD_SPAN), WORD_SPAN);
    }

    #[test]
    #[should_panic(expected = "range size")]
    fn zero_range_size_panics() {
        rejection_bound(0);
    }

    #[test]
    fn words_at_or_above_bound_are_rejected() {
        // For n = 3 the bound is 2^32 - 1, so u32::MAX must be redrawn.
        let mut rng = Scripted::new(&[u32::MAX, u32::MAX, 5]);
        assert_eq!(rng.random_in_range(10, 12), Ok(10));
        assert_eq!(rng.consumed(), 3);
    }

    #[test]
    fn accepted_word_maps_proportionally() {
        let mut rng = Scripted::new(&[0, u32::MAX / 2 + 1, u32::MAX]);
        // n = 2 has bound 2^32: nothing is rejected.
        assert_eq!(rng.random_in_range(0, 1), Ok(0));
        assert_eq!(rng.random_in_range(0, 1), Ok(1));
        assert_eq!(rng.random_in_range(0, 1), Ok(1));
        assert_eq!(rng.consumed(), 3);
    }

    #[test]
    fn full_word_range_has_no_rejection() {
        let mut rng = Scripted::new(&[0, u32::MAX, 0x8000_0000]);
        assert_eq!(rng.random_in_range(i32::MIN, i32::MAX), Ok(i32::MIN));
        assert_eq!(rng.random_in_range(i32::MIN, i32::MAX), Ok(i32::MAX));
        assert_eq!(rng.random_in_range(i32::MIN, i32::MAX), Ok(0));
    }

    #[test]
    fn degenerate_range_returns_the_bound() {
        let mut rng = Scripted::new(&[0xDEAD_BEEF, 17]);
        for _ in 0..10 {
            assert_eq!(rng.random_in_range(5, 5), Ok(5));
        }
    }

    #[test]
    fn inverted_range_is_an_error() {
        let mut rng = Scripted::new(&[1]);
        assert_eq!(
            rng.random_in_range(5, 3),
            Err(RngError::InvalidRange { lower: 5, upper: 3 })
        );
        assert_eq!(rng.consumed(), 0);
    }

    #[test]
    fn index_errors() {
        let mut rng = Scripted::new(&[1]);
        assert_eq!(rng.random_index(-1), Err(RngError::NegativeCount(-1)));
        assert_eq!(
            rng.random_index(0),
            Err(RngError::InvalidRange { lower: 0, upper: -1 })
        );
        assert_eq!(rng.random_index(1), Ok(0));
    }

    #[test]
    fn double_scales_by_two_to_minus_32() {
        let mut rng = Scripted::new(&[0, 0x8000_0000, u32::MAX]);
        assert_eq!(rng.random_double(), 0.0);
        assert_eq!(rng.random_double(), 0.5);
        let top = rng.random_double();
        assert!(top < 1.0, "double out of range: {top}");
    }

    #[test]
    fn seeding_hashes_to_required_length() {
        let mut rng = Scripted::new(&[0]);
        rng.seed(12345);
        let mut expected = Scripted::new(&[0]);
        expected.init_state(&sponge::hash(&[12345], 4, SEED_WORD_RATE));
        for _ in 0..4 {
            assert_eq!(rng.next_word(), expected.next_word());
        }
    }

    #[test]
    fn negative_seeds_reinterpret_bits() {
        let mut a = Scripted::new(&[0]);
        let mut b = Scripted::new(&[0]);
        a.seed(-1);
        b.init_state(&sponge::hash(&[u32::MAX], 4, SEED_WORD_RATE));
        assert_eq!(a.next_word(), b.next_word());
    }

    #[test]
    fn sampling_through_trait_object() {
        let mut rng = Scripted::new(&[7, 8, 9]);
        let dyn_rng: &mut dyn Generator = &mut rng;
        assert_eq!(dyn_rng.random_in_range(0, 0), Ok(0));
        assert_eq!(dyn_rng.name(), "scripted");
    }
}
