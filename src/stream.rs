use alloc::string::String;
use core::fmt;
#[cfg(feature = "serde")] use serde::{Deserialize, Serialize};

use super::mrg::{mat_mat_mod, mat_pow2_mod, mat_pow_mod, mat_vec_mod, Matrix, Vector};
use super::seed::{InvalidSeed, Seed};
use super::*;

/// MRG32k3a stream with substreams. Not cryptographically secure.
///
/// The stream keeps three states: its initial state, the start of the current substream
/// and the current state. Substreams are 2^76 steps apart.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, PartialEq)]
pub struct Stream {
    /// Initial state of the stream.
    ig: Seed,
    /// Start of the current substream.
    bg: Seed,
    /// Current state.
    cg: Seed,
    /// Return 1 - u instead of u.
    anti: bool,
    /// Combine two steps per draw.
    inc_prec: bool,
    name: String,
}

// Debug shows the label only; use Display or full_state for the state.
impl fmt::Debug for Stream {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Stream {{ name: {:?} }}", self.name)
    }
}

#[inline] fn split(state: &[i64; 6]) -> (Vector, Vector) {
    ([state[0], state[1], state[2]], [state[3], state[4], state[5]])
}

#[inline] fn join(low: Vector, high: Vector) -> [i64; 6] {
    [low[0], low[1], low[2], high[0], high[1], high[2]]
}

/// Applies the per component matrices to a state.
#[inline] pub(crate) fn transition(a1: &Matrix, a2: &Matrix, state: &[i64; 6]) -> [i64; 6] {
    let (low, high) = split(state);
    join(mat_vec_mod(a1, &low, M1), mat_vec_mod(a2, &high, M2))
}

impl Stream {

    /// Creates a stream starting at the given seed.
    pub fn with_seed(name: impl Into<String>, seed: Seed) -> Self {
        Stream { ig: seed, bg: seed, cg: seed, anti: false, inc_prec: false, name: name.into() }
    }

    /// Diagnostic label of the stream.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Advances both components one step and returns the combined output in (0, 1).
    fn u01(&mut self) -> f64 {
        let mut cg = self.cg.state();

        // Component 1.
        let p1 = (A12 * cg[1] - A13N * cg[0]) % M1;
        let p1 = if p1 < 0 { p1 + M1 } else { p1 };
        cg[0] = cg[1];
        cg[1] = cg[2];
        cg[2] = p1;

        // Component 2.
        let p2 = (A21 * cg[5] - A23N * cg[3]) % M2;
        let p2 = if p2 < 0 { p2 + M2 } else { p2 };
        cg[3] = cg[4];
        cg[4] = cg[5];
        cg[5] = p2;
        self.cg = Seed::from_state(cg);

        let u = if p1 > p2 { (p1 - p2) as f64 * NORM } else { (p1 - p2 + M1) as f64 * NORM };
        if self.anti { 1.0 - u } else { u }
    }

    /// Combines two steps into one draw with 24 more bits of resolution.
    fn u01d(&mut self) -> f64 {
        let u = self.u01();
        if !self.anti {
            let u = u + self.u01() * FACT;
            if u < 1.0 { u } else { u - 1.0 }
        } else {
            // u01 already returned 1 - u here, so the low part is complemented as well.
            let u = u + (self.u01() - 1.0) * FACT;
            if u < 0.0 { u + 1.0 } else { u }
        }
    }

    /// Generates the next uniform number in [0, 1).
    #[inline]
    pub fn rand_u01(&mut self) -> f64 {
        if self.inc_prec { self.u01d() } else { self.u01() }
    }

    /// Generates a uniform integer in low ..= high from a single rand_u01 draw.
    /// With high < low the result lies in high + 1 ..= low, as in the reference package.
    pub fn rand_int(&mut self, low: i64, high: i64) -> i64 {
        let width = high as i128 - low as i128 + 1;
        let x = low as i128 + (width as f64 * self.rand_u01()) as i128;
        // Rounding of very wide products can reach low + width.
        x.min(high.max(low) as i128) as i64
    }

    /// Moves the current state and the substream start back to the initial state.
    pub fn reset_start_stream(&mut self) {
        self.bg = self.ig;
        self.cg = self.ig;
    }

    /// Moves the current state back to the start of the substream.
    pub fn reset_start_substream(&mut self) {
        self.cg = self.bg;
    }

    /// Moves to the start of the next substream, 2^76 steps past the current one.
    pub fn reset_next_substream(&mut self) {
        self.bg = Seed::from_state(transition(&A1P76, &A2P76, &self.bg.state()));
        self.cg = self.bg;
    }

    /// Sets the initial state, substream start and current state to the seed.
    /// Leaves the stream untouched if the seed is invalid.
    pub fn set_seed(&mut self, seed: [u64; 6]) -> Result<(), InvalidSeed> {
        let seed = Seed::new(seed)?;
        self.ig = seed;
        self.bg = seed;
        self.cg = seed;
        Ok(())
    }

    /// Jumps the current state by 2^e + c steps if e > 0, by -2^-e + c steps if e < 0,
    /// or by c steps if e = 0. Negative jumps go backward.
    /// The initial state and substream start are not affected.
    pub fn advance_state(&mut self, e: i32, c: i64) {
        let (a1, a2) = if c >= 0 { (&A1P0, &A2P0) } else { (&INV_A1, &INV_A2) };
        let mut c1 = mat_pow_mod(a1, M1, c.unsigned_abs());
        let mut c2 = mat_pow_mod(a2, M2, c.unsigned_abs());

        if e != 0 {
            let (a1, a2) = if e > 0 { (&A1P0, &A2P0) } else { (&INV_A1, &INV_A2) };
            let b1 = mat_pow2_mod(a1, M1, e.unsigned_abs());
            let b2 = mat_pow2_mod(a2, M2, e.unsigned_abs());
            c1 = mat_mat_mod(&b1, &c1, M1);
            c2 = mat_mat_mod(&b2, &c2, M2);
        }

        self.cg = Seed::from_state(transition(&c1, &c2, &self.cg.state()));
    }

    /// Returns the current state. Passing it to set_seed resumes the sequence from here.
    #[inline]
    pub fn get_state(&self) -> [u64; 6] {
        self.cg.to_words()
    }

    /// Returns the initial state of the stream.
    #[inline]
    pub fn initial_state(&self) -> [u64; 6] {
        self.ig.to_words()
    }

    /// Returns the start of the current substream.
    #[inline]
    pub fn substream_state(&self) -> [u64; 6] {
        self.bg.to_words()
    }

    /// Antithetic streams return 1 - u in place of u.
    #[inline]
    pub fn set_antithetic(&mut self, anti: bool) {
        self.anti = anti;
    }

    #[inline]
    pub fn is_antithetic(&self) -> bool {
        self.anti
    }

    /// With increased precision each draw consumes two steps and has 53 bits of resolution.
    #[inline]
    pub fn set_increased_precision(&mut self, inc_prec: bool) {
        self.inc_prec = inc_prec;
    }

    #[inline]
    pub fn is_increased_precision(&self) -> bool {
        self.inc_prec
    }

    /// Displayable view of all three states and both flags.
    pub fn full_state(&self) -> FullState<'_> {
        FullState(self)
    }
}

struct Words<'a>(&'a Seed);

impl fmt::Display for Words<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (i, x) in self.0.to_words().iter().enumerate() {
            if i > 0 { f.write_str(",")?; }
            write!(f, "{}", x)?;
        }
        Ok(())
    }
}

/// Renders the name and current state.
impl fmt::Display for Stream {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}:\n  Cg = {{ {} }}", self.name, Words(&self.cg))
    }
}

/// Full diagnostic rendering of a stream, see [`Stream::full_state`].
pub struct FullState<'a>(&'a Stream);

impl fmt::Display for FullState<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let g = self.0;
        writeln!(f, "{}:", g.name)?;
        writeln!(f, "  Anti = {}", g.anti)?;
        writeln!(f, "  IncPrec = {}", g.inc_prec)?;
        writeln!(f, "  Ig = {{ {} }}", Words(&g.ig))?;
        writeln!(f, "  Bg = {{ {} }}", Words(&g.bg))?;
        write!(f, "  Cg = {{ {} }}", Words(&g.cg))
    }
}

impl RngCore for Stream {
    fn next_u32(&mut self) -> u32 {
        // rand_u01 < 1, so the product stays below 2^32.
        (self.rand_u01() * 4294967296.0) as u32
    }

    fn next_u64(&mut self) -> u64 {
        impls::next_u64_via_u32(self)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        impls::fill_bytes_via_next(self, dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for Stream {
    type Seed = [u8; 24];

    /// Creates an unnamed stream from six little-endian 32-bit words.
    /// Words are reduced into range, so every seed is accepted.
    fn from_seed(bytes: Self::Seed) -> Self {
        let mut words = [0u32; 6];
        le::read_u32_into(&bytes, &mut words);
        let mut seed = [0u64; 6];
        for (x, &w) in seed.iter_mut().zip(words.iter()) {
            *x = w as u64;
        }
        Stream::with_seed(String::new(), Seed::reduce(seed))
    }

    /// Creates an unnamed stream from a 64-bit value expanded with SplitMix64.
    fn seed_from_u64(state: u64) -> Self {
        Stream::with_seed(String::new(), Seed::from_u64(state))
    }
}
