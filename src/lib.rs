//! Recovers a full MT19937 state from observed outputs.
//!
//! Every state bit is an unknown over GF(2). [`symbolic::SymMt`] runs the
//! generator on affine forms of those unknowns, [`solver::Solver`] reduces
//! the resulting equations, and [`solution::Solution`] evaluates any later
//! draw once the system is fully determined.

pub mod error;
pub mod gf2;
pub mod mersenne;
pub mod recover;
pub mod solution;
pub mod solver;
pub mod symbolic;

pub use error::{Error, Result};
