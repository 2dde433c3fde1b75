//! MT19937 run over affine forms instead of bits.
//!
//! [`SymMt`] mirrors `mersenne::twist` and `mersenne::nxt` plane by plane.
//! Bit `j` of state word `i` starts out as the unknown `i * 32 + j`, so after
//! any number of draws every output bit is known as an exact GF(2) formula in
//! the initial state.

use crate::gf2::Form;
use crate::mersenne::{A, B, C, D, L, M32, N32, R, S, STATE_BITS, T, U, W};
use std::array;

/// One 32-bit word, least significant bit first.
pub type SymWord = [Form; W];

fn initial_word(i: usize) -> SymWord {
    array::from_fn(|j| Form::unknown(STATE_BITS, i * W + j))
}

fn twist(arr: &mut [SymWord]) {
    for i in 0..N32 {
        // x = upper bit of arr[i] | lower bits of arr[i + 1]
        let next = &arr[(i + 1) % N32];
        let x: SymWord = array::from_fn(|j| {
            if j == R as usize {
                arr[i][j].clone()
            } else {
                next[j].clone()
            }
        });
        let mut word = arr[(i + M32) % N32].clone();
        for j in 0..W - 1 {
            word[j] ^= &x[j + 1];
        }
        for j in 0..W {
            if A >> j & 1 == 1 {
                word[j] ^= &x[0];
            }
        }
        arr[i] = word;
    }
}

/// `y ^= (y >> n) & and`. Plane `j` reads plane `j + n`, which is still
/// unmodified when walking upwards.
fn xor_shr_and(y: &mut SymWord, n: u32, and: u32) {
    let n = n as usize;
    for j in 0..W - n {
        if and >> j & 1 == 1 {
            let (lo, hi) = y.split_at_mut(j + n);
            lo[j] ^= &hi[0];
        }
    }
}

/// `y ^= (y << n) & and`, walking downwards.
fn xor_shl_and(y: &mut SymWord, n: u32, and: u32) {
    let n = n as usize;
    for j in (n..W).rev() {
        if and >> j & 1 == 1 {
            let (lo, hi) = y.split_at_mut(j);
            hi[0] ^= &lo[j - n];
        }
    }
}

pub struct SymMt {
    n: usize,
    state: Vec<SymWord>,
}

impl SymMt {
    pub fn new() -> Self {
        SymMt {
            n: N32,
            state: (0..N32).map(initial_word).collect(),
        }
    }

    pub fn reset(&mut self) {
        self.n = N32;
        for (i, word) in self.state.iter_mut().enumerate() {
            *word = initial_word(i);
        }
    }

    /// Current state word `i`. Before the first draw this is the word the
    /// unknowns are numbered after.
    pub fn word(&self, i: usize) -> &SymWord {
        &self.state[i]
    }

    pub fn nxt(&mut self) -> SymWord {
        if self.n == N32 {
            tracing::trace!("symbolic twist");
            twist(&mut self.state);
            self.n = 0;
        }
        let mut y = self.state[self.n].clone();
        self.n += 1;
        xor_shr_and(&mut y, U, D);
        xor_shl_and(&mut y, S, B);
        xor_shl_and(&mut y, T, C);
        xor_shr_and(&mut y, L, D);

        y
    }

    pub fn skip(&mut self, words: usize) {
        for _ in 0..words {
            self.nxt();
        }
    }

    /// `k` symbolic bits laid out like `mersenne::getrandbits`.
    pub fn getrandbits(&mut self, k: usize) -> Vec<Form> {
        let mut bits = Vec::with_capacity(k);
        while bits.len() < k {
            let take = (k - bits.len()).min(W);
            bits.extend(self.nxt().into_iter().skip(W - take));
        }
        bits
    }

    /// The 53 mantissa bits behind `mersenne::random`.
    pub fn random(&mut self) -> Vec<Form> {
        let a = self.nxt();
        let b = self.nxt();
        let mut bits: Vec<_> = b.into_iter().skip(6).collect();
        bits.extend(a.into_iter().skip(5));
        bits
    }
}

impl Default for SymMt {
    fn default() -> Self {
        Self::new()
    }
}
