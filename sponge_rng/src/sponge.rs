// Keccak-f[800] sponge hash, used to stretch arbitrary seeds into generator state.
//
// The permutation works on a 25-word (800-bit) state viewed as a 5x5 grid of
// 32-bit lanes, lane `i` sitting at column `i % 5`, row `i / 5`. Each of the
// 22 rounds applies theta, rho+pi, chi and iota in that order. The rotation
// offsets and round constants are the published Keccak values (round
// constants truncated to 32 bits), and must stay bit-exact: the test vectors
// at the bottom of this file pin them.
//
// `hash` wraps the permutation in a plain sponge: word-aligned "10*1"
// padding, absorb `word_rate` words per permutation, then squeeze the same
// number of words per permutation until enough output exists. Seeding in
// `generator.rs` always uses a 256-bit capacity (`SEED_WORD_RATE` = 17).
//
// This is not a cryptographic hash API. It exists for state expansion only.

/// Number of 32-bit lanes in the permutation state.
pub const STATE_WORDS: usize = 25;

/// Word rate used for seeding: `(800 - 256) / 32`, i.e. a 256-bit capacity.
pub const SEED_WORD_RATE: usize = (800 - 256) / 32;

const ROUNDS: usize = 22;

/// Iota round constants, truncated to the low 32 bits.
const ROUND_CONSTANTS: [u32; ROUNDS] = [
    0x0000_0001,
    0x0000_8082,
    0x0000_808a,
    0x8000_8000,
    0x0000_808b,
    0x8000_0001,
    0x8000_8081,
    0x0000_8009,
    0x0000_008a,
    0x0000_0088,
    0x8000_8009,
    0x8000_000a,
    0x8000_808b,
    0x0000_008b,
    0x0000_8089,
    0x0000_8003,
    0x0000_8002,
    0x0000_0080,
    0x0000_800a,
    0x8000_000a,
    0x8000_8081,
    0x0000_8080,
];

/// Rho rotation offsets (mod 32), indexed by lane.
#[rustfmt::skip]
const RHO_OFFSETS: [u32; STATE_WORDS] = [
     0,  1, 30, 28, 27,
     4, 12,  6, 23, 20,
     3, 10, 11, 25,  7,
     9, 13, 15, 21,  8,
    18,  2, 29, 24, 14,
];

/// Apply the full 22-round Keccak-f[800] permutation in place.
pub fn keccak_f800(state: &mut [u32; STATE_WORDS]) {
    for &rc in &ROUND_CONSTANTS {
        round(state, rc);
    }
}

fn round(a: &mut [u32; STATE_WORDS], rc: u32) {
    // Theta: fold each column's parity into its neighbours.
    let parity: [u32; 5] =
        std::array::from_fn(|x| a[x] ^ a[x + 5] ^ a[x + 10] ^ a[x + 15] ^ a[x + 20]);
    let mix: [u32; 5] =
        std::array::from_fn(|x| parity[(x + 4) % 5] ^ parity[(x + 1) % 5].rotate_left(1));
    for (i, lane) in a.iter_mut().enumerate() {
        *lane ^= mix[i % 5];
    }

    // Rho + pi: rotate each lane, then move (x, y) to (y, 2x + 3y).
    let mut b = [[0u32; 5]; 5];
    for (i, &lane) in a.iter().enumerate() {
        let (x, y) = (i % 5, i / 5);
        b[y][(2 * x + 3 * y) % 5] = lane.rotate_left(RHO_OFFSETS[i]);
    }

    // Chi: the only non-linear step, row-wise.
    for (i, lane) in a.iter_mut().enumerate() {
        let (x, y) = (i % 5, i / 5);
        *lane = b[x][y] ^ (!b[(x + 1) % 5][y] & b[(x + 2) % 5][y]);
    }

    // Iota
    a[0] ^= rc;
}

/// Hash `input` into `output_len` words with the given word rate.
///
/// The input is always padded with at least one extra word, so an input
/// whose length is an exact multiple of `word_rate` gets a whole padding
/// block. Empty input is valid. Longer outputs are prefix-consistent:
/// `hash(x, n, r)` is the first `n` words of `hash(x, m, r)` for `m >= n`.
///
/// Panics if `word_rate` is zero or larger than the 25-word state.
pub fn hash(input: &[u32], output_len: usize, word_rate: usize) -> Vec<u32> {
    assert!(
        (1..=STATE_WORDS).contains(&word_rate),
        "hash: word rate must be in 1..={STATE_WORDS}, got {word_rate}"
    );

    // 10*1 padding at word granularity. The two writes land on the same
    // word when exactly one word of room remains.
    let padded_len = (input.len() / word_rate + 1) * word_rate;
    let mut padded = vec![0u32; padded_len];
    padded[..input.len()].copy_from_slice(input);
    padded[input.len()] = 0x0000_0001;
    padded[padded_len - 1] ^= 0x8000_0000;

    let mut state = [0u32; STATE_WORDS];
    for block in padded.chunks_exact(word_rate) {
        for (lane, &word) in state.iter_mut().zip(block) {
            *lane ^= word;
        }
        keccak_f800(&mut state);
    }

    let mut output = Vec::with_capacity(output_len);
    let mut offset = 0;
    while output.len() < output_len {
        output.push(state[offset]);
        offset += 1;
        if offset == word_rate {
            keccak_f800(&mut state);
            offset = 0;
        }
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    // Vectors from the Keccak code package (Keccak[r=288,c=512] and
    // Keccak[r=544,c=256] over f[800]).
    #[test]
    fn empty_input_rate_nine() {
        assert_eq!(hash(&[], 1, 288 / 32), vec![0x56C5_094D]);
    }

    #[test]
    fn single_word_rate_nine() {
        assert_eq!(hash(&[0xFCFD_ECC1], 1, 288 / 32), vec![0x0E23_B8BD]);
    }

    #[test]
    fn two_words_rate_seventeen() {
        let out = hash(&[0x2420_4F4A, 0x2625_5184], 2, 544 / 32);
        assert_eq!(out.len(), 2);
        assert_eq!(out[1], 0xDB4F_78CE);
    }

    #[test]
    fn seed_rate_is_seventeen() {
        assert_eq!(SEED_WORD_RATE, 17);
    }

    #[test]
    fn output_length_is_exact() {
        for len in [0, 1, 16, 17, 18, 256] {
            assert_eq!(hash(&[7, 8, 9], len, SEED_WORD_RATE).len(), len);
        }
    }

    #[test]
    fn squeeze_is_prefix_consistent() {
        let long = hash(&[1, 2, 3], 300, SEED_WORD_RATE);
        for len in [1, 16, 17, 34, 35, 256] {
            assert_eq!(hash(&[1, 2, 3], len, SEED_WORD_RATE).as_slice(), &long[..len]);
        }
    }

    #[test]
    fn input_at_rate_boundary_gets_padding_block() {
        // Lengths that are exact multiples of the rate must still hash, and
        // must not collide with the one-word-shorter input.
        let full: Vec<u32> = (0..17).collect();
        let short: Vec<u32> = (0..16).collect();
        let a = hash(&full, 4, SEED_WORD_RATE);
        let b = hash(&short, 4, SEED_WORD_RATE);
        assert_eq!(a.len(), 4);
        assert_ne!(a, b);
    }

    #[test]
    fn hash_is_deterministic() {
        let input = [0xDEAD_BEEF, 0, 0xFFFF_FFFF];
        assert_eq!(hash(&input, 40, 9), hash(&input, 40, 9));
    }

    #[test]
    fn permutation_moves_zero_state() {
        let mut state = [0u32; STATE_WORDS];
        keccak_f800(&mut state);
        assert!(state.iter().any(|&w| w != 0));
    }

    #[test]
    #[should_panic(expected = "word rate")]
    fn zero_rate_panics() {
        hash(&[1], 1, 0);
    }

    #[test]
    #[should_panic(expected = "word rate")]
    fn oversized_rate_panics() {
        hash(&[1], 1, STATE_WORDS + 1);
    }
}
