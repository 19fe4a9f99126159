// Serde glue for fixed-size word arrays.
//
// serde's derive only covers arrays up to 32 elements. Generators with larger
// state (the 256-word lagged-Fibonacci table) route their array through this
// module with `#[serde(with = "crate::serde_words")]`. The array is written
// as a plain sequence and checked for the exact length when read back.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub fn serialize<S: Serializer, const N: usize>(
    words: &[u32; N],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    words.as_slice().serialize(serializer)
}

pub fn deserialize<'de, D: Deserializer<'de>, const N: usize>(
    deserializer: D,
) -> Result<[u32; N], D::Error> {
    let words = Vec::<u32>::deserialize(deserializer)?;
    let len = words.len();
    words
        .try_into()
        .map_err(|_| D::Error::invalid_length(len, &"a fixed-size word array"))
}
