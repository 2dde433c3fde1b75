use num_bigint::BigUint;

/// Errors ending a recovery attempt.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// Fewer independent equations than unknowns.
    #[error("underdetermined system: rank {rank} of {vars}")]
    Underdetermined { rank: usize, vars: usize },

    /// Some equation reduced to `0 = 1`; no assignment exists.
    #[error("contradictory system: equation #{equation} reduces to 0 = 1")]
    Contradictory { equation: usize },

    /// An observed value wider than the draw it is paired with.
    #[error("malformed observation: {value} does not fit in {width} bits")]
    Malformed { width: usize, value: BigUint },

    /// An observed float that is not a multiple of 2^-53 in [0, 1).
    #[error("malformed observation: {0} is not a 53-bit random() draw")]
    NotRandomDraw(f64),
}

pub type Result<T> = std::result::Result<T, Error>;
