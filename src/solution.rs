use crate::gf2::Form;
use crate::mersenne::{MT32, N32, STATE_BITS, W};
use num_bigint::BigUint;

/// A concrete assignment of every unknown, stored as a form whose constant
/// slot is set. Evaluating a form is then a plain inner product.
#[derive(Clone, PartialEq, Eq)]
pub struct Solution(Form);

impl Solution {
    pub(crate) fn new(assignment: Form) -> Self {
        debug_assert!(assignment.constant_term());
        Solution(assignment)
    }

    /// The assignment a concrete MT19937 state corresponds to.
    pub fn from_state(arr: &[u32; N32]) -> Self {
        let mut form = Form::constant(STATE_BITS, true);
        for (i, word) in arr.iter().enumerate() {
            for j in 0..W {
                form.set(i * W + j, word >> j & 1 == 1);
            }
        }
        Solution(form)
    }

    pub fn vars(&self) -> usize {
        self.0.vars()
    }

    pub fn bit(&self, i: usize) -> bool {
        self.0.get(i)
    }

    pub fn as_form(&self) -> &Form {
        &self.0
    }

    pub fn evaluate(&self, form: &Form) -> bool {
        self.0.dot(form)
    }

    pub fn evaluate_word(&self, word: &[Form; W]) -> u32 {
        word.iter()
            .enumerate()
            .fold(0, |acc, (j, form)| acc | (self.evaluate(form) as u32) << j)
    }

    /// Packs evaluated bits, `bits[0]` least significant.
    pub fn evaluate_bits(&self, bits: &[Form]) -> BigUint {
        let mut res = BigUint::default();
        for (j, form) in bits.iter().enumerate() {
            if self.evaluate(form) {
                res.set_bit(j as u64, true);
            }
        }
        res
    }

    /// The recovered state words, when the unknowns are an MT19937 state.
    pub fn state(&self) -> Option<[u32; N32]> {
        if self.vars() != STATE_BITS {
            return None;
        }
        let mut arr = [0u32; N32];
        for (i, word) in arr.iter_mut().enumerate() {
            for j in 0..W {
                *word |= (self.bit(i * W + j) as u32) << j;
            }
        }
        Some(arr)
    }

    pub fn into_mt(self) -> Option<MT32> {
        self.state().map(|arr| (N32, arr))
    }
}

impl std::fmt::Debug for Solution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let ones = self.0.unknowns().count();
        write!(f, "Solution {{ vars: {}, ones: {} }}", self.vars(), ones)
    }
}
