// sponge_rng — interchangeable deterministic PRNGs with sponge seeding and
// exact uniform sampling.
//
// Three generator algorithms share one seeding pipeline and one sampling
// layer. A seed of any length is stretched with a Keccak-f[800] sponge to
// exactly the amount of state the chosen generator needs; each generator then
// emits uniform 32-bit words, which the sampling layer turns into doubles in
// [0, 1) or unbiased integers in an inclusive range.
//
// Module overview:
// - `sponge.rs`:    Keccak-f[800] permutation and absorb/squeeze hash.
// - `generator.rs`: `Generator` trait (state size, state loading, next word,
//                   seeding) and the blanket `Sampling` extension trait.
// - `chacha.rs`:    `ChaChaRng`, stream-cipher generator (12 rounds default).
// - `well.rs`:      `Well1024a`, tempered linear recurrence, 32-word state.
// - `lfib.rs`:      `Lfib4`, four-lag additive generator, 256-word state.
// - `config.rs`:    JSON-driven `GeneratorConfig` and the `AnyGenerator` enum.
// - `seq.rs`:       `shuffle` and `sample` (without replacement) on slices.
// - `adapter.rs`:   `RngCoreAdapter` for the `rand_core` ecosystem.
// - `error.rs`:     `RngError`.
//
// **Critical constraint: determinism.** Seeding is a pure function of the
// seed, and every generator step is fixed-width integer arithmetic, so the
// same seed yields the same stream on every platform. Nothing here is
// suitable for cryptographic use; the cipher and the sponge are used purely
// for statistical quality.
//
// Generators are plain single-owner state machines with no internal
// locking. Distinct instances are independent; sharing one instance across
// threads needs an external lock.

#[cfg(feature = "rand_core")]
pub mod adapter;
pub mod chacha;
pub mod config;
pub mod error;
pub mod generator;
pub mod lfib;
pub mod seq;
mod serde_words;
pub mod sponge;
pub mod well;

#[cfg(feature = "rand_core")]
pub use adapter::RngCoreAdapter;
pub use chacha::ChaChaRng;
pub use config::{AnyGenerator, ConfigError, GeneratorConfig, GeneratorKind};
pub use error::RngError;
pub use generator::{Generator, Sampling, rejection_bound, sample_below};
pub use lfib::Lfib4;
pub use well::Well1024a;
