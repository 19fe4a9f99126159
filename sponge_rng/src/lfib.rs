// LFIB4, Marsaglia's four-lag additive generator (1999).
//
// x[n] = x[n-256] + x[n-179] + x[n-119] + x[n-55]  (mod 2^32)
//
// The 256-word table is used as a ring: the slot under the cursor holds
// x[n-256] and is overwritten with x[n]. Fast and statistically solid, but
// needs a lot of seed material for a period of about 2^287, and lagged
// Fibonacci generators are sensitive to poor initialization. The sponge
// seeding covers the latter; forcing word 0 odd keeps the table nonzero.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::RngError;
use crate::generator::Generator;

const STATE_WORDS: usize = 256;
const MASK: usize = STATE_WORDS - 1;
const LAGS: [usize; 3] = [55, 119, 179];

/// Lagged-Fibonacci generator with 8192 bits of state.
///
/// Deserialization rejects an all-zero table or an out-of-range cursor.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Lfib4 {
    #[serde(with = "crate::serde_words")]
    state: [u32; STATE_WORDS],
    index: usize,
}

impl Lfib4 {
    /// Seed from a single integer. Same as `from_seed_slice(&[seed])`.
    pub fn new(seed: i32) -> Self {
        Self::from_seed_slice(&[seed])
    }

    /// Seed from any number of integers, including none.
    pub fn from_seed_slice(seed: &[i32]) -> Self {
        let mut rng = Self {
            state: [0; STATE_WORDS],
            index: 0,
        };
        rng.seed_slice(seed);
        rng
    }

    /// The raw state table, without the cursor.
    pub fn state(&self) -> &[u32; STATE_WORDS] {
        &self.state
    }
}

impl Generator for Lfib4 {
    fn name(&self) -> &'static str {
        "LFIB4"
    }

    fn seed_words_required(&self) -> usize {
        STATE_WORDS
    }

    fn init_state(&mut self, words: &[u32]) {
        self.state.copy_from_slice(words);
        self.state[0] |= 1;
        self.index = 0;
    }

    fn next_word(&mut self) -> u32 {
        let i = self.index & MASK;
        let sum = LAGS.iter().fold(self.state[i], |acc, &lag| {
            acc.wrapping_add(self.state[(i + STATE_WORDS - lag) & MASK])
        });
        self.state[i] = sum;
        self.index = (i + 1) & MASK;
        sum
    }
}

/// Wire shape of `Lfib4`, checked before it becomes a generator.
#[derive(Deserialize)]
struct Lfib4State {
    #[serde(with = "crate::serde_words")]
    state: [u32; STATE_WORDS],
    index: usize,
}

impl Lfib4State {
    fn validate(self) -> Result<Lfib4, RngError> {
        if self.state.iter().all(|&w| w == 0) {
            return Err(RngError::InvalidState("LFIB4 state is all zero"));
        }
        if self.index >= STATE_WORDS {
            return Err(RngError::InvalidState("LFIB4 cursor out of range"));
        }
        Ok(Lfib4 {
            state: self.state,
            index: self.index,
        })
    }
}

impl<'de> Deserialize<'de> for Lfib4 {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Lfib4State::deserialize(deserializer)?
            .validate()
            .map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::Sampling;

    #[test]
    fn determinism_same_seed_same_output() {
        let mut a = Lfib4::from_seed_slice(&[1, 2, 3]);
        let mut b = Lfib4::from_seed_slice(&[1, 2, 3]);
        for _ in 0..1000 {
            assert_eq!(a.next_word(), b.next_word());
        }
    }

    #[test]
    fn seeding_forces_word_zero_odd() {
        for seed in [0, 1, -1, 12345, i32::MAX] {
            let rng = Lfib4::new(seed);
            assert_eq!(rng.state()[0] & 1, 1, "seed {seed}");
        }
    }

    #[test]
    fn sums_the_four_lags() {
        let mut rng = Lfib4::new(0);
        let words: Vec<u32> = (0..STATE_WORDS as u32).collect();
        rng.init_state(&words);
        // Word 0 becomes 1 after the low-bit fix-up.
        // x = s[0] + s[256-55] + s[256-119] + s[256-179] = 1 + 201 + 137 + 77.
        assert_eq!(rng.next_word(), 1 + 201 + 137 + 77);
        assert_eq!(rng.state()[0], 416);
        // Next step reads the just-written window around index 1.
        assert_eq!(rng.next_word(), 1 + 202 + 138 + 78);
    }

    #[test]
    fn addition_wraps() {
        let mut rng = Lfib4::new(0);
        rng.init_state(&[u32::MAX; STATE_WORDS]);
        // Four copies of 0xFFFF_FFFF sum to -4 mod 2^32.
        assert_eq!(rng.next_word(), u32::MAX.wrapping_mul(4));
    }

    #[test]
    fn cursor_wraps_after_full_table() {
        let mut rng = Lfib4::new(99);
        for _ in 0..STATE_WORDS {
            rng.next_word();
        }
        assert_eq!(rng.index, 0);
    }

    #[test]
    fn indices_in_range() {
        let mut rng = Lfib4::new(12345);
        for _ in 0..10_000 {
            let v = rng.random_index(4).unwrap();
            assert!((0..4).contains(&v), "index out of range: {v}");
        }
    }

    #[test]
    fn serialization_roundtrip() {
        let mut rng = Lfib4::new(42);
        for _ in 0..300 {
            rng.next_word();
        }
        let json = serde_json::to_string(&rng).unwrap();
        let mut restored: Lfib4 = serde_json::from_str(&json).unwrap();
        assert_eq!(rng, restored);
        for _ in 0..300 {
            assert_eq!(rng.next_word(), restored.next_word());
        }
    }

    #[test]
    fn truncated_state_is_rejected() {
        let json = r#"{"state":[1,2,3],"index":0}"#;
        assert!(serde_json::from_str::<Lfib4>(json).is_err());
    }

    #[test]
    fn all_zero_state_is_rejected() {
        let json = serde_json::json!({"state": vec![0u32; 256], "index": 0});
        let err = serde_json::from_value::<Lfib4>(json).unwrap_err();
        assert!(err.to_string().contains("all zero"), "unexpected error: {err}");
    }

    #[test]
    fn cursor_past_the_table_is_rejected() {
        let mut json = serde_json::to_value(Lfib4::new(5)).unwrap();
        json["index"] = 256.into();
        let err = serde_json::from_value::<Lfib4>(json).unwrap_err();
        assert!(err.to_string().contains("cursor"), "unexpected error: {err}");
    }
}
