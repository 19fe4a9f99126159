// ChaCha-based generator (Bernstein, "ChaCha, a variant of Salsa20", 2008).
//
// The seed fills the 8 key words and 2 nonce words of a 16-word ChaCha input
// block whose first four words are the "expand 16-byte k" constants; the
// last 2 words start as a zero block counter. Output is the keystream, read
// one word at a time, 16 words per block.
//
// When a block is used up the counter is bumped before the next block is
// computed. The increment treats words 4..=15 (key, nonce, and counter) as a
// single 384-bit integer with word 15 least significant: it starts at word 15
// and carries toward word 4, never into the four constant words. That is
// not a sound way to use a cipher, but it gives the generator a period of
// 2^388 words instead of stopping after the 64-bit block counter wraps.
//
// The round count trades speed for quality. 12 is the default; 8 and 20
// are the other usual choices. Rounds are applied as column/diagonal double
// rounds, so the count must be even.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::RngError;
use crate::generator::Generator;

const BLOCK_WORDS: usize = 16;
const CONSTANT_WORDS: usize = 4;
const KEY_WORDS: usize = 8;
const NONCE_WORDS: usize = 2;
/// First word of the 64-bit block counter.
const COUNTER_START: usize = CONSTANT_WORDS + KEY_WORDS + NONCE_WORDS;

/// "expand 16-byte k", little-endian words.
const CONSTANTS: [u32; CONSTANT_WORDS] = [0x6170_7865, 0x3120_646e, 0x7962_2d36, 0x6b20_6574];

/// Round count used by `ChaChaRng::new`.
pub const DEFAULT_ROUNDS: u32 = 12;

/// Stream-cipher generator: 16-word ChaCha core plus a buffered output block.
///
/// Deserialization rejects states no constructor could produce: an odd or
/// zero round count, or altered constant words.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ChaChaRng {
    rounds: u32,
    core: [u32; BLOCK_WORDS],
    block: [u32; BLOCK_WORDS],
    /// Index of the next unread word in `block`; `BLOCK_WORDS` when exhausted.
    position: usize,
}

impl ChaChaRng {
    /// A 12-round generator seeded from a single integer.
    pub fn new(seed: i32) -> Self {
        Self::from_seed_slice(&[seed])
    }

    /// A 12-round generator seeded from an integer sequence.
    pub fn from_seed_slice(seed: &[i32]) -> Self {
        let mut rng = Self::unseeded(DEFAULT_ROUNDS);
        rng.seed_slice(seed);
        rng
    }

    /// A generator with a custom round count.
    ///
    /// Returns `InvalidRounds` if `rounds` is zero or odd.
    pub fn with_rounds(rounds: u32, seed: &[i32]) -> Result<Self, RngError> {
        if rounds == 0 || rounds % 2 != 0 {
            return Err(RngError::InvalidRounds(rounds));
        }
        let mut rng = Self::unseeded(rounds);
        rng.seed_slice(seed);
        Ok(rng)
    }

    /// Number of ChaCha rounds run per output block.
    pub fn rounds(&self) -> u32 {
        self.rounds
    }

    /// The 16-word cipher input: constants, key, nonce, counter.
    pub fn core_state(&self) -> &[u32; BLOCK_WORDS] {
        &self.core
    }

    fn unseeded(rounds: u32) -> Self {
        let mut core = [0u32; BLOCK_WORDS];
        core[..CONSTANT_WORDS].copy_from_slice(&CONSTANTS);
        Self {
            rounds,
            core,
            block: [0; BLOCK_WORDS],
            position: BLOCK_WORDS,
        }
    }

    /// Run the block function over `core` into `block`.
    fn refill(&mut self) {
        let mut x = self.core;
        for _ in 0..self.rounds / 2 {
            // Column round.
            quarter_round(&mut x, 0, 4, 8, 12);
            quarter_round(&mut x, 1, 5, 9, 13);
            quarter_round(&mut x, 2, 6, 10, 14);
            quarter_round(&mut x, 3, 7, 11, 15);
            // Diagonal round.
            quarter_round(&mut x, 0, 5, 10, 15);
            quarter_round(&mut x, 1, 6, 11, 12);
            quarter_round(&mut x, 2, 7, 8, 13);
            quarter_round(&mut x, 3, 4, 9, 14);
        }
        for (out, (&mixed, &input)) in self.block.iter_mut().zip(x.iter().zip(&self.core)) {
            *out = mixed.wrapping_add(input);
        }
        self.position = 0;
    }

    /// Increment words 4..=15 as one integer, word 15 least significant.
    fn advance_counter(&mut self) {
        for i in (CONSTANT_WORDS..BLOCK_WORDS).rev() {
            self.core[i] = self.core[i].wrapping_add(1);
            if self.core[i] != 0 {
                if i < COUNTER_START {
                    log::debug!("ChaCha block counter wrapped, carried into core word {i}");
                }
                return;
            }
        }
        log::debug!("ChaCha key, nonce, and counter all wrapped to zero");
    }
}

/// Wire shape of `ChaChaRng`, checked before it becomes a generator.
#[derive(Deserialize)]
struct ChaChaState {
    rounds: u32,
    core: [u32; BLOCK_WORDS],
    block: [u32; BLOCK_WORDS],
    position: usize,
}

impl ChaChaState {
    fn validate(self) -> Result<ChaChaRng, RngError> {
        if self.rounds == 0 || self.rounds % 2 != 0 {
            return Err(RngError::InvalidRounds(self.rounds));
        }
        if self.core[..CONSTANT_WORDS] != CONSTANTS {
            return Err(RngError::InvalidState("ChaCha constant words altered"));
        }
        if self.position > BLOCK_WORDS {
            return Err(RngError::InvalidState("ChaCha block position out of range"));
        }
        Ok(ChaChaRng {
            rounds: self.rounds,
            core: self.core,
            block: self.block,
            position: self.position,
        })
    }
}

impl<'de> Deserialize<'de> for ChaChaRng {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        ChaChaState::deserialize(deserializer)?
            .validate()
            .map_err(D::Error::custom)
    }
}

fn quarter_round(x: &mut [u32; BLOCK_WORDS], a: usize, b: usize, c: usize, d: usize) {
    x[a] = x[a].wrapping_add(x[b]);
    x[d] = (x[d] ^ x[a]).rotate_left(16);
    x[c] = x[c].wrapping_add(x[d]);
    x[b] = (x[b] ^ x[c]).rotate_left(12);
    x[a] = x[a].wrapping_add(x[b]);
    x[d] = (x[d] ^ x[a]).rotate_left(8);
    x[c] = x[c].wrapping_add(x[d]);
    x[b] = (x[b] ^ x[c]).rotate_left(7);
}

impl Generator for ChaChaRng {
    fn name(&self) -> &'static str {
        "ChaCha"
    }

    fn seed_words_required(&self) -> usize {
        KEY_WORDS + NONCE_WORDS
    }

    fn init_state(&mut self, words: &[u32]) {
        assert_eq!(
            words.len(),
            KEY_WORDS + NONCE_WORDS,
            "ChaCha init_state: wrong number of seed words"
        );
        self.core[CONSTANT_WORDS..COUNTER_START].copy_from_slice(words);
        self.core[COUNTER_START..].fill(0);
        self.refill();
    }

    fn next_word(&mut self) -> u32 {
        if self.position >= BLOCK_WORDS {
            self.advance_counter();
            self.refill();
        }
        let word = self.block[self.position];
        self.position += 1;
        word
    }
}
