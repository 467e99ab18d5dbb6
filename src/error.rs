//! Error kinds. Empty and sub-width inputs are not errors — they are
//! short-circuit results handled inline by `State::new` and the top-level
//! drivers — so they have no variant here.

use thiserror::Error;

/// Errors the core can report. Both variants are fail-fast: invalid input is
/// rejected before any DP work runs.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AlignError {
    /// Seed endpoints exceed sequence bounds, or begin > end on some axis.
    #[error(
        "invalid seed: H[{beg_h}, {end_h}) against length {h_len}, V[{beg_v}, {end_v}) against length {v_len}"
    )]
    InvalidSeed {
        beg_h: u32,
        end_h: u32,
        h_len: usize,
        beg_v: u32,
        end_v: u32,
        v_len: usize,
    },

    /// `gap >= 0` or `match <= mismatch`; the sweep would still run but the
    /// result would be meaningless.
    #[error(
        "invalid scoring scheme: match={match_score} mismatch={mismatch_score} gap={gap_score}"
    )]
    InvalidScoring {
        match_score: i16,
        mismatch_score: i16,
        gap_score: i16,
    },
}
