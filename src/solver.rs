//! Incremental Gaussian elimination over GF(2).
//!
//! Equations are affine forms asserted to equal zero. Each one is reduced
//! against the basis lowest pivot first: while its lowest unknown `i` has a
//! row, that row is XORed in. Row `i`'s lowest unknown is `i`, so the XOR
//! clears bit `i` and only touches higher bits. Whatever survives becomes a
//! new row at its lowest unknown. The basis therefore stays in row-echelon
//! form and back substitution from the last unknown down yields the unique
//! solution at full rank.

use crate::error::{Error, Result};
use crate::gf2::Form;
use crate::mersenne::W;
use crate::solution::Solution;
use num_bigint::BigUint;

/// What submitting an equation did to the system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reduction {
    Pivot(usize),
    Redundant,
    Contradiction,
}

pub struct Solver {
    vars: usize,
    rank: usize,
    equations: usize,
    basis: Vec<Option<Form>>,
    contradiction: Option<usize>,
    solution: Option<Solution>,
}

impl Solver {
    pub fn new(vars: usize) -> Self {
        Solver {
            vars,
            rank: 0,
            equations: 0,
            basis: vec![None; vars],
            contradiction: None,
            solution: None,
        }
    }

    pub fn vars(&self) -> usize {
        self.vars
    }

    pub fn rank(&self) -> usize {
        self.rank
    }

    pub fn equations(&self) -> usize {
        self.equations
    }

    pub fn is_contradictory(&self) -> bool {
        self.contradiction.is_some()
    }

    pub fn row(&self, i: usize) -> Option<&Form> {
        self.basis[i].as_ref()
    }

    /// Submits `eq == 0`.
    pub fn add_equation(&mut self, mut eq: Form) -> Reduction {
        assert_eq!(eq.vars(), self.vars, "equation over the wrong unknowns");
        let index = self.equations;
        self.equations += 1;

        // at full rank every equation is implied and only needs checking
        match self.solution.as_ref().map(|sol| sol.evaluate(&eq)) {
            Some(true) => return self.contradict(index),
            Some(false) => return Reduction::Redundant,
            None => {}
        }

        let mut from = 0;
        while let Some(i) = eq.next_unknown(from) {
            match &self.basis[i] {
                Some(row) => eq.xor_from(row, Form::limb_of(i)),
                None => {
                    self.basis[i] = Some(eq);
                    self.rank += 1;
                    if self.rank == self.vars {
                        self.back_substitute();
                    }
                    return Reduction::Pivot(i);
                }
            }
            from = i + 1;
        }
        if eq.constant_term() {
            self.contradict(index)
        } else {
            Reduction::Redundant
        }
    }

    pub fn add_bit(&mut self, form: &Form, bit: bool) -> Reduction {
        let mut eq = form.clone();
        eq.xor_constant(bit);
        self.add_equation(eq)
    }

    /// Submits one equation per bit of `value`, bit `j` pairing with `word[j]`.
    /// `word` may be a prefix of a full word.
    pub fn add_word(&mut self, word: &[Form], value: u32) {
        assert!(word.len() <= W, "{} bits do not fit in a u32", word.len());
        for (j, form) in word.iter().enumerate() {
            self.add_bit(form, value >> j & 1 == 1);
        }
    }

    /// Like [`Solver::add_word`] for draws of any width.
    pub fn add_bits(&mut self, bits: &[Form], value: &BigUint) -> Result<()> {
        if value.bits() > bits.len() as u64 {
            return Err(Error::Malformed {
                width: bits.len(),
                value: value.clone(),
            });
        }
        for (j, form) in bits.iter().enumerate() {
            self.add_bit(form, value.bit(j as u64));
        }
        Ok(())
    }

    /// Submits `lhs[j] + rhs[j] == 0` for every bit: two draws known to be
    /// equal without knowing their value.
    pub fn add_equal(&mut self, lhs: &[Form], rhs: &[Form]) {
        assert_eq!(lhs.len(), rhs.len(), "draws of different widths");
        for (a, b) in lhs.iter().zip(rhs) {
            self.add_equation(a ^ b);
        }
    }

    pub fn solution(&self) -> Result<&Solution> {
        if let Some(equation) = self.contradiction {
            return Err(Error::Contradictory { equation });
        }
        self.solution.as_ref().ok_or(Error::Underdetermined {
            rank: self.rank,
            vars: self.vars,
        })
    }

    fn contradict(&mut self, index: usize) -> Reduction {
        if self.contradiction.is_none() {
            tracing::warn!(equation = index, rank = self.rank, "contradictory equation");
            self.contradiction = Some(index);
        }
        Reduction::Contradiction
    }

    fn back_substitute(&mut self) {
        tracing::info!(
            vars = self.vars,
            equations = self.equations,
            "system fully determined"
        );
        let mut sol = Form::constant(self.vars, true);
        for i in (0..self.vars).rev() {
            if let Some(row) = &self.basis[i] {
                let bit = sol.dot(row);
                sol.set(i, bit);
            }
        }
        self.solution = Some(Solution::new(sol));
    }
}
