// WELL1024a generator (Panneton, L'Ecuyer & Matsumoto, "Improved
// Long-Period Generators Based on Linear Recurrences Modulo 2", 2006).
//
// 32 words of state in a circular buffer, advanced by a fixed F2-linear
// recurrence of xors and shifts. Period 2^1024 - 1, as long as the state is
// not all zeros; seeding forces the low bit of word 0 to guarantee that.
//
// The cursor walks the buffer backwards: each step writes the current slot
// and the slot before it, then moves onto the slot before it and returns
// that freshly written word.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::RngError;
use crate::generator::Generator;

const STATE_WORDS: usize = 32;
const MASK: usize = STATE_WORDS - 1;

/// Tempered linear-recurrence generator with 1024 bits of state.
///
/// Deserialization rejects an all-zero table or an out-of-range cursor.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Well1024a {
    state: [u32; STATE_WORDS],
    index: usize,
}

impl Well1024a {
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

impl Generator for Well1024a {
    fn name(&self) -> &'static str {
        "WELL1024a"
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
        let s = &mut self.state;
        let i = self.index & MASK;
        let prev = (i + 31) & MASK;
        let m1 = s[(i + 3) & MASK];
        let m2 = s[(i + 24) & MASK];
        let m3 = s[(i + 10) & MASK];

        let z0 = s[prev];
        let z1 = s[i] ^ m1 ^ (m1 >> 8);
        let z2 = m2 ^ (m2 << 19) ^ m3 ^ (m3 << 14);
        s[i] = z1 ^ z2;
        s[prev] = z0 ^ (z0 << 11) ^ z1 ^ (z1 << 7) ^ z2 ^ (z2 << 13);
        self.index = prev;
        s[prev]
    }
}

/// Wire shape of `Well1024a`, checked before it becomes a generator.
#[derive(Deserialize)]
struct Well1024aState {
    state: [u32; STATE_WORDS],
    index: usize,
}

impl Well1024aState {
    fn validate(self) -> Result<Well1024a, RngError> {
        if self.state.iter().all(|&w| w == 0) {
            return Err(RngError::InvalidState("WELL1024a state is all zero"));
        }
        if self.index >= STATE_WORDS {
            return Err(RngError::InvalidState("WELL1024a cursor out of range"));
        }
        Ok(Well1024a {
            state: self.state,
            index: self.index,
        })
    }
}

impl<'de> Deserialize<'de> for Well1024a {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Well1024aState::deserialize(deserializer)?
            .validate()
            .map_err(D::Error::custom)
    }
}
