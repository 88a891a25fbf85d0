#![no_std]

extern crate alloc;

pub mod factory;
pub mod mrg;
pub mod seed;
pub mod stream;

pub use factory::*;
pub use seed::*;
pub use stream::*;
pub use rand_core::*;

use mrg::Matrix;

// MRG32k3a parameters from L'Ecuyer, P.,
// Good Parameter Sets for Combined Multiple Recursive
// Random Number Generators, Operations Research 47 (1999).

/// Modulus of the first component.
pub const M1: i64 = 4294967087;
/// Modulus of the second component.
pub const M2: i64 = 4294944443;

pub const A12: i64 = 1403580;
pub const A13N: i64 = 810728;
pub const A21: i64 = 527612;
pub const A23N: i64 = 1370589;

/// 1 / (M1 + 1).
pub const NORM: f64 = 2.328306549295727688e-10;
/// 2^-24.
pub const FACT: f64 = 5.9604644775390625e-8;

/// Package cursor of a freshly constructed factory.
pub const DEFAULT_SEED: [u64; 6] = [12345, 23456, 34567, 45678, 56789, 67890];

// Transition matrices of the two components
// raised to the powers 1, -1, 2^76 and 2^127.

pub const A1P0: Matrix = [
    [0, 1, 0],
    [0, 0, 1],
    [-810728, 1403580, 0],
];

pub const A2P0: Matrix = [
    [0, 1, 0],
    [0, 0, 1],
    [-1370589, 0, 527612],
];

pub const INV_A1: Matrix = [
    [184888585, 0, 1945170933],
    [1, 0, 0],
    [0, 1, 0],
];

pub const INV_A2: Matrix = [
    [0, 360363334, 4225571728],
    [1, 0, 0],
    [0, 1, 0],
];

pub const A1P76: Matrix = [
    [82758667, 1871391091, 4127413238],
    [3672831523, 69195019, 1871391091],
    [3672091415, 3528743235, 69195019],
];

pub const A2P76: Matrix = [
    [1511326704, 3759209742, 1610795712],
    [4292754251, 1511326704, 3889917532],
    [3859662829, 4292754251, 3708466080],
];

pub const A1P127: Matrix = [
    [2427906178, 3580155704, 949770784],
    [226153695, 1230515664, 3580155704],
    [1988835001, 986791581, 1230515664],
];

pub const A2P127: Matrix = [
    [1464411153, 277697599, 1610723613],
    [32183930, 1464411153, 1022607788],
    [2824425944, 32183930, 2093834863],
];
