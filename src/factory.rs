use alloc::string::String;
#[cfg(feature = "serde")] use serde::{Deserialize, Serialize};

use super::seed::{InvalidSeed, Seed};
use super::stream::{transition, Stream};
use super::{A1P127, A2P127, DEFAULT_SEED, M1, M2};

/// Creates streams from a package cursor. Each new stream starts 2^127 steps
/// past the previous one, so streams do not overlap for any practical length.
///
/// Stream creation needs `&mut self`; share a factory between threads
/// behind a lock, or create all streams before fanning out work.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StreamFactory {
    /// Seed of the next stream.
    next: Seed,
}

impl Default for StreamFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl StreamFactory {

    /// Creates a factory whose cursor is the package default seed.
    pub fn new() -> Self {
        StreamFactory { next: Seed::from_state(DEFAULT_SEED.map(|x| x as i64)) }
    }

    /// Creates a factory seeded with set_master_seed.
    pub fn with_master_seed(value: u64) -> Self {
        let mut factory = Self::new();
        factory.set_master_seed(value);
        factory
    }

    /// Creates a factory seeded with set_package_seed.
    pub fn with_package_seed(seed: [u64; 6]) -> Result<Self, InvalidSeed> {
        Ok(StreamFactory { next: Seed::new(seed)? })
    }

    /// Sets the cursor to (value, value + 1, ..., value + 5),
    /// each component taken modulo its component's modulus.
    pub fn set_master_seed(&mut self, value: u64) {
        let mut state = [0i64; 6];
        for (i, x) in state.iter_mut().enumerate() {
            let m = (if i < 3 { M1 } else { M2 }) as u64;
            *x = ((value % m + i as u64) % m) as i64;
        }
        // Three consecutive residues are never all zero.
        self.next = Seed::from_state(state);
        log::debug!("master seed {} installed", value);
    }

    /// Sets the cursor to the given seed. Leaves the cursor untouched if the seed is invalid.
    pub fn set_package_seed(&mut self, seed: [u64; 6]) -> Result<(), InvalidSeed> {
        self.next = Seed::new(seed)?;
        log::debug!("package seed {:?} installed", seed);
        Ok(())
    }

    /// Returns the seed the next created stream will start from.
    #[inline]
    pub fn next_seed(&self) -> [u64; 6] {
        self.next.to_words()
    }

    /// Creates a stream at the cursor and advances the cursor by 2^127 steps.
    pub fn create_stream(&mut self, name: impl Into<String>) -> Stream {
        let stream = Stream::with_seed(name, self.next);
        self.next = Seed::from_state(transition(&A1P127, &A2P127, &self.next.state()));
        log::debug!("created stream {:?} at {:?}", stream.name(), stream.initial_state());
        stream
    }
}

#[cfg(test)] mod tests {
    use super::*;

    #[test] pub fn default_cursor() {
        let factory = StreamFactory::default();
        assert_eq!(DEFAULT_SEED, factory.next_seed());
        assert_eq!(StreamFactory::new(), factory);
    }

    #[test] pub fn cursor_advances_by_2_127() {
        let mut factory = StreamFactory::with_package_seed([12345; 6]).unwrap();
        let g1 = factory.create_stream("g1");
        let mut g2 = factory.create_stream("g2");
        assert_eq!("g2", g2.name());
        assert_eq!([12345; 6], g1.initial_state());
        let mut expected = g1.clone();
        expected.advance_state(127, 0);
        assert_eq!(expected.get_state(), g2.get_state());
        g2.advance_state(127, 0);
        assert_eq!(g2.get_state(), factory.next_seed());
    }

    #[test] pub fn master_seed() {
        let mut factory = StreamFactory::new();
        factory.set_master_seed(5555);
        assert_eq!([5555, 5556, 5557, 5558, 5559, 5560], factory.next_seed());
        assert_eq!(factory, StreamFactory::with_master_seed(5555));

        factory.set_master_seed(M1 as u64 - 1);
        let words = factory.next_seed();
        assert_eq!([M1 as u64 - 1, 0, 1], words[0 .. 3]);
        assert_eq!(Ok(words), Seed::new(words).map(|s| s.to_words()));
        factory.set_master_seed(u64::MAX);
        let words = factory.next_seed();
        assert_eq!(Ok(words), Seed::new(words).map(|s| s.to_words()));
    }

    #[test] pub fn invalid_package_seed() {
        let mut factory = StreamFactory::with_master_seed(5555);
        let before = factory.clone();
        assert_eq!(Err(InvalidSeed::FirstTripleZero), factory.set_package_seed([0, 0, 0, 1, 1, 1]));
        assert_eq!(before, factory);
        assert!(matches!(
            StreamFactory::with_package_seed([1, 1, 1, 1, 1, M2 as u64]),
            Err(InvalidSeed::OutOfRange { index: 5, .. })
        ));
    }
}
