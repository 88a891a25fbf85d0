use wrapping_arithmetic::wrappit;
#[cfg(feature = "serde")] use serde::{Deserialize, Serialize};

use super::{M1, M2};

/// Reasons a candidate seed is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum InvalidSeed {
    #[error("seed component {index} is {value}, must be less than {modulus}")]
    OutOfRange { index: usize, value: u64, modulus: i64 },

    #[error("first three seed components are all zero")]
    FirstTripleZero,

    #[error("last three seed components are all zero")]
    LastTripleZero,
}

/// Validated MRG32k3a seed: six components, the first three in [0, M1)
/// and the last three in [0, M2), with neither triple all zero.
///
/// Serialized as the six components; deserializing validates them like [`Seed::new`].
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "[u64; 6]", into = "[u64; 6]"))]
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Seed([i64; 6]);

#[inline] fn modulus(index: usize) -> i64 {
    if index < 3 { M1 } else { M2 }
}

impl Seed {

    /// Validates six components. Range checks run first, in component order,
    /// then the zero triple checks.
    pub fn new(words: [u64; 6]) -> Result<Self, InvalidSeed> {
        let result = Self::check(&words);
        if let Err(error) = result {
            log::warn!("seed {:?} rejected: {}", words, error);
        }
        result
    }

    fn check(words: &[u64; 6]) -> Result<Self, InvalidSeed> {
        let mut state = [0i64; 6];
        for (index, (&value, component)) in words.iter().zip(state.iter_mut()).enumerate() {
            let modulus = modulus(index);
            if value >= modulus as u64 {
                return Err(InvalidSeed::OutOfRange { index, value, modulus });
            }
            *component = value as i64;
        }
        if state[0 .. 3].iter().all(|&x| x == 0) {
            return Err(InvalidSeed::FirstTripleZero);
        }
        if state[3 .. 6].iter().all(|&x| x == 0) {
            return Err(InvalidSeed::LastTripleZero);
        }
        Ok(Seed(state))
    }

    /// Maps any six words to a valid seed. Each word is reduced modulo
    /// its component's modulus and an all-zero triple gets its first component set to 1.
    /// Distinct inputs may map to the same seed.
    pub fn reduce(words: [u64; 6]) -> Self {
        let mut state = [0i64; 6];
        for (index, (&value, component)) in words.iter().zip(state.iter_mut()).enumerate() {
            *component = (value % modulus(index) as u64) as i64;
        }
        if state[0 .. 3].iter().all(|&x| x == 0) { state[0] = 1; }
        if state[3 .. 6].iter().all(|&x| x == 0) { state[3] = 1; }
        Seed(state)
    }

    /// Expands a 64-bit value into a seed with SplitMix64.
    pub fn from_u64(seed: u64) -> Self {
        let mut words = [0u64; 6];
        for (i, word) in words.iter_mut().enumerate() {
            *word = splitmix64(seed, i as u64 + 1);
        }
        Self::reduce(words)
    }

    /// Returns the six components.
    pub fn to_words(&self) -> [u64; 6] {
        let mut words = [0u64; 6];
        for (word, &x) in words.iter_mut().zip(self.0.iter()) {
            *word = x as u64;
        }
        words
    }

    #[inline]
    pub(crate) fn state(&self) -> [i64; 6] {
        self.0
    }

    /// Wraps a state produced by the recurrence or the transition matrices,
    /// which keep every component in range.
    #[inline]
    pub(crate) fn from_state(state: [i64; 6]) -> Self {
        Seed(state)
    }
}

impl TryFrom<[u64; 6]> for Seed {
    type Error = InvalidSeed;

    fn try_from(words: [u64; 6]) -> Result<Self, InvalidSeed> {
        Seed::new(words)
    }
}

impl From<Seed> for [u64; 6] {
    fn from(seed: Seed) -> Self {
        seed.to_words()
    }
}

/// Output number i of SplitMix64 by Sebastiano Vigna started at the given state.
#[wrappit] #[inline]
fn splitmix64(state: u64, i: u64) -> u64 {
    let x = state + i * 0x9e3779b97f4a7c15;
    let x = (x ^ (x >> 30)) * 0xbf58476d1ce4e5b9;
    let x = (x ^ (x >> 27)) * 0x94d049bb133111eb;
    x ^ (x >> 31)
}
