// Data-driven generator selection.
//
// A `GeneratorConfig` names the algorithm, its tunables, and the seed, and is
// loaded from JSON so callers can switch generators without recompiling:
//
//     { "kind": "chacha", "chacha_rounds": 12, "seed": [12345] }
//
// `build()` turns a config into an `AnyGenerator`, a closed enum over the
// three algorithms that implements `Generator` by dispatch. Code that wants
// "some generator, chosen at runtime" holds an `AnyGenerator` and gets the
// whole `Sampling` API from it without boxing.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::chacha::{ChaChaRng, DEFAULT_ROUNDS};
use crate::error::RngError;
use crate::generator::Generator;
use crate::lfib::Lfib4;
use crate::well::Well1024a;

/// Which generator algorithm to build.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeneratorKind {
    /// ChaCha keystream generator. The round count comes from the config.
    #[serde(rename = "chacha")]
    ChaCha,
    /// WELL1024a tempered linear recurrence.
    Well1024a,
    /// LFIB4 lagged-Fibonacci generator.
    Lfib4,
}

impl GeneratorKind {
    pub const ALL: [GeneratorKind; 3] = [
        GeneratorKind::ChaCha,
        GeneratorKind::Well1024a,
        GeneratorKind::Lfib4,
    ];

    /// Parse the name used in JSON configs (`"chacha"`, `"well1024a"`,
    /// `"lfib4"`). Goes through the serde derive, so the two cannot drift.
    pub fn from_name(name: &str) -> Option<Self> {
        serde_json::from_value(serde_json::Value::String(name.to_owned())).ok()
    }
}

fn default_rounds() -> u32 {
    DEFAULT_ROUNDS
}

fn default_seed() -> Vec<i32> {
    vec![0]
}

/// Everything needed to construct a seeded generator.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    pub kind: GeneratorKind,
    /// Only read for `GeneratorKind::ChaCha`.
    #[serde(default = "default_rounds")]
    pub chacha_rounds: u32,
    #[serde(default = "default_seed")]
    pub seed: Vec<i32>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("malformed generator config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error(transparent)]
    Rng(#[from] RngError),
}

impl GeneratorConfig {
    pub fn new(kind: GeneratorKind, seed: Vec<i32>) -> Self {
        Self {
            kind,
            chacha_rounds: DEFAULT_ROUNDS,
            seed,
        }
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Construct and seed the configured generator.
    pub fn build(&self) -> Result<AnyGenerator, RngError> {
        let rng = match self.kind {
            GeneratorKind::ChaCha => {
                AnyGenerator::ChaCha(ChaChaRng::with_rounds(self.chacha_rounds, &self.seed)?)
            }
            GeneratorKind::Well1024a => {
                AnyGenerator::Well1024a(Well1024a::from_seed_slice(&self.seed))
            }
            GeneratorKind::Lfib4 => AnyGenerator::Lfib4(Lfib4::from_seed_slice(&self.seed)),
        };
        log::debug!(
            "built {} generator from {} seed words",
            rng.name(),
            self.seed.len()
        );
        Ok(rng)
    }
}

/// A generator whose algorithm is picked at runtime.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnyGenerator {
    ChaCha(ChaChaRng),
    Well1024a(Well1024a),
    Lfib4(Lfib4),
}

impl AnyGenerator {
    pub fn kind(&self) -> GeneratorKind {
        match self {
            AnyGenerator::ChaCha(_) => GeneratorKind::ChaCha,
            AnyGenerator::Well1024a(_) => GeneratorKind::Well1024a,
            AnyGenerator::Lfib4(_) => GeneratorKind::Lfib4,
        }
    }

    /// The raw state words, for diagnostics: the ChaCha core block, or the
    /// recurrence table of the other two.
    pub fn state_words(&self) -> &[u32] {
        match self {
            AnyGenerator::ChaCha(g) => g.core_state(),
            AnyGenerator::Well1024a(g) => g.state(),
            AnyGenerator::Lfib4(g) => g.state(),
        }
    }
}

impl Generator for AnyGenerator {
    fn name(&self) -> &'static str {
        match self {
            AnyGenerator::ChaCha(g) => g.name(),
            AnyGenerator::Well1024a(g) => g.name(),
            AnyGenerator::Lfib4(g) => g.name(),
        }
    }

    fn seed_words_required(&self) -> usize {
        match self {
            AnyGenerator::ChaCha(g) => g.seed_words_required(),
            AnyGenerator::Well1024a(g) => g.seed_words_required(),
            AnyGenerator::Lfib4(g) => g.seed_words_required(),
        }
    }

    fn init_state(&mut self, words: &[u32]) {
        match self {
            AnyGenerator::ChaCha(g) => g.init_state(words),
            AnyGenerator::Well1024a(g) => g.init_state(words),
            AnyGenerator::Lfib4(g) => g.init_state(words),
        }
    }

    fn next_word(&mut self) -> u32 {
        match self {
            AnyGenerator::ChaCha(g) => g.next_word(),
            AnyGenerator::Well1024a(g) => g.next_word(),
            AnyGenerator::Lfib4(g) => g.next_word(),
        }
    }
}
