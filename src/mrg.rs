// This module contains utility functions for working with
// MRGs (multiple recursive generators) in matrix form.
// A component of order 3 advances its state vector s by s <- A * s mod m.

/// Component state vector.
pub type Vector = [i64; 3];

/// Component transition matrix.
pub type Matrix = [[i64; 3]; 3];

pub const IDENTITY: Matrix = [[1, 0, 0], [0, 1, 0], [0, 0, 1]];

const TWO17: i64 = 1 << 17;
const TWO53: i64 = 1 << 53;

/// Returns (a * s + c) mod m, normalized to [0, m).
/// Requires |a| < m < 2^35 and |s| < m; s and c may be negative.
pub fn mul_add_mod(a: i64, s: i64, c: i64, m: i64) -> i64 {
    let v = match a.checked_mul(s).and_then(|v| v.checked_add(c)) {
        Some(v) if v > -TWO53 && v < TWO53 => v,
        _ => {
            // Split a = a1 * 2^17 + a0 and reduce between the two stages
            // so that no intermediate exceeds 2^53 in magnitude.
            let a1 = a / TWO17;
            let a0 = a - a1 * TWO17;
            let v = (a1 * s) % m;
            v * TWO17 + a0 * s + c
        }
    };
    let v = v % m;
    if v < 0 { v + m } else { v }
}

/// Returns A * s mod m.
pub fn mat_vec_mod(a: &Matrix, s: &Vector, m: i64) -> Vector {
    let mut v = [0; 3];
    for (vi, row) in v.iter_mut().zip(a.iter()) {
        let x = mul_add_mod(row[0], s[0], 0, m);
        let x = mul_add_mod(row[1], s[1], x, m);
        *vi = mul_add_mod(row[2], s[2], x, m);
    }
    v
}

/// Returns A * B mod m, computed one column of B at a time.
pub fn mat_mat_mod(a: &Matrix, b: &Matrix, m: i64) -> Matrix {
    let mut c = [[0; 3]; 3];
    for j in 0 .. 3 {
        let column = mat_vec_mod(a, &[b[0][j], b[1][j], b[2][j]], m);
        for i in 0 .. 3 {
            c[i][j] = column[i];
        }
    }
    c
}

/// Returns A^(2^e) mod m by squaring e times.
pub fn mat_pow2_mod(a: &Matrix, m: i64, e: u32) -> Matrix {
    let mut b = *a;
    for _ in 0 .. e {
        b = mat_mat_mod(&b, &b, m);
    }
    b
}

/// Returns A^n mod m using the binary decomposition of n.
pub fn mat_pow_mod(a: &Matrix, m: i64, n: u64) -> Matrix {
    let mut w = *a;
    let mut b = IDENTITY;
    let mut n = n;
    while n > 0 {
        if n & 1 == 1 {
            b = mat_mat_mod(&w, &b, m);
        }
        w = mat_mat_mod(&w, &w, m);
        n >>= 1;
    }
    b
}
