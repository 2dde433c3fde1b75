//! Dense affine forms over GF(2).
//!
//! A [`Form`] over `vars` unknowns is a bit vector of length `vars + 1`. Bit
//! `i < vars` is the coefficient of unknown `i`, bit `vars` is the constant
//! term. Bits are packed into 64-bit limbs so XOR and inner products run a
//! limb at a time.

use std::fmt;
use std::ops::{BitXor, BitXorAssign};

const LIMB: usize = 64;

#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Form {
    vars: usize,
    limbs: Box<[u64]>,
}

impl Form {
    pub fn zero(vars: usize) -> Self {
        let len = (vars + 1 + LIMB - 1) / LIMB;
        Form {
            vars,
            limbs: vec![0; len].into_boxed_slice(),
        }
    }

    pub fn unknown(vars: usize, i: usize) -> Self {
        assert!(i < vars, "unknown {} out of range for {} vars", i, vars);
        let mut form = Form::zero(vars);
        form.flip(i);
        form
    }

    pub fn constant(vars: usize, bit: bool) -> Self {
        let mut form = Form::zero(vars);
        form.set(vars, bit);
        form
    }

    pub fn vars(&self) -> usize {
        self.vars
    }

    pub fn get(&self, i: usize) -> bool {
        self.limbs[i / LIMB] >> (i % LIMB) & 1 == 1
    }

    pub fn set(&mut self, i: usize, bit: bool) {
        if self.get(i) != bit {
            self.flip(i);
        }
    }

    pub fn flip(&mut self, i: usize) {
        self.limbs[i / LIMB] ^= 1u64 << (i % LIMB);
    }

    pub fn constant_term(&self) -> bool {
        self.get(self.vars)
    }

    /// Folds a known value into the constant slot, turning `form == bit`
    /// into the homogeneous equation `form + bit == 0`.
    pub fn xor_constant(&mut self, bit: bool) {
        if bit {
            self.flip(self.vars);
        }
    }

    pub fn is_constant(&self) -> bool {
        self.next_unknown(0).is_none()
    }

    /// Parity of `self AND other` over all `vars + 1` coordinates.
    pub fn dot(&self, other: &Form) -> bool {
        debug_assert_eq!(self.vars, other.vars);
        let ones: u32 = self
            .limbs
            .iter()
            .zip(other.limbs.iter())
            .map(|(a, b)| (a & b).count_ones())
            .sum();
        ones % 2 == 1
    }

    /// Lowest unknown index `>= from` with a set coefficient.
    pub fn next_unknown(&self, from: usize) -> Option<usize> {
        if from >= self.vars {
            return None;
        }
        let mut limb = from / LIMB;
        let mut bits = self.limbs[limb] & (u64::MAX << (from % LIMB));
        loop {
            if bits != 0 {
                let i = limb * LIMB + bits.trailing_zeros() as usize;
                return if i < self.vars { Some(i) } else { None };
            }
            limb += 1;
            if limb == self.limbs.len() {
                return None;
            }
            bits = self.limbs[limb];
        }
    }

    pub fn unknowns(&self) -> impl Iterator<Item = usize> + '_ {
        let mut from = 0;
        std::iter::from_fn(move || {
            let i = self.next_unknown(from)?;
            from = i + 1;
            Some(i)
        })
    }

    /// XOR of `other` into `self`, skipping the limbs below `limb`. Callers
    /// guarantee `other` is zero there.
    pub(crate) fn xor_from(&mut self, other: &Form, limb: usize) {
        debug_assert_eq!(self.vars, other.vars);
        for (a, b) in self.limbs[limb..].iter_mut().zip(other.limbs[limb..].iter()) {
            *a ^= b;
        }
    }

    pub(crate) fn limb_of(i: usize) -> usize {
        i / LIMB
    }
}

impl BitXorAssign<&Form> for Form {
    fn bitxor_assign(&mut self, rhs: &Form) {
        self.xor_from(rhs, 0);
    }
}

impl BitXor<&Form> for &Form {
    type Output = Form;

    fn bitxor(self, rhs: &Form) -> Form {
        let mut res = self.clone();
        res ^= rhs;
        res
    }
}

impl fmt::Display for Form {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut terms: Vec<_> = self.unknowns().map(|i| format!("x{}", i)).collect();
        if self.constant_term() {
            terms.push("1".to_string());
        }
        if terms.is_empty() {
            return write!(f, "0");
        }
        write!(f, "{}", terms.join(" + "))
    }
}

impl fmt::Debug for Form {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Form[{}]({})", self.vars, self)
    }
}
