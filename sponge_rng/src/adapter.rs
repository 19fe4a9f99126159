// Bridge from `Generator` to the `rand_core::RngCore` interface.
//
// Lets any generator in this crate drive code written against the `rand`
// ecosystem. Words pass straight through for `next_u32`; `next_u64` joins
// two words little-endian. Byte filling draws each byte as an exact uniform
// integer in 0..=255, the same draw `random_in_range(0, 255)` makes, rather
// than slicing words into bytes, so byte streams stay consistent with the
// crate's own sampling calls.
//
// Enabled by the `rand_core` feature (on by default).

use rand_core::{Error, RngCore, impls};

use crate::generator::{Generator, sample_below};

/// Wraps a seeded generator so it can be used as a `rand_core::RngCore`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RngCoreAdapter<G> {
    inner: G,
}

impl<G: Generator> RngCoreAdapter<G> {
    pub fn new(inner: G) -> Self {
        Self { inner }
    }

    pub fn get_mut(&mut self) -> &mut G {
        &mut self.inner
    }

    pub fn into_inner(self) -> G {
        self.inner
    }
}

impl<G: Generator> RngCore for RngCoreAdapter<G> {
    fn next_u32(&mut self) -> u32 {
        self.inner.next_word()
    }

    fn next_u64(&mut self) -> u64 {
        impls::next_u64_via_u32(self)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for byte in dest {
            *byte = sample_below(&mut self.inner, 256) as u8;
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}
