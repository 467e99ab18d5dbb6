//! Scoring scheme: match, mismatch, and linear gap scores.

use crate::error::AlignError;

/// Linear-gap scoring scheme: `{matchScore, mismatchScore, gapScore}`.
/// Affine gaps are out of scope for the core — there is deliberately no
/// `gap_extend` field here.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScoringScheme {
    pub match_score: i16,
    pub mismatch_score: i16,
    pub gap_score: i16,
}

impl Default for ScoringScheme {
    /// A zero-initialised scheme yields `{1, -1, -1}`.
    fn default() -> Self {
        Self { match_score: 1, mismatch_score: -1, gap_score: -1 }
    }
}

impl ScoringScheme {
    pub fn new(match_score: i16, mismatch_score: i16, gap_score: i16) -> Self {
        Self { match_score, mismatch_score, gap_score }
    }

    /// `score(a, b) = matchScore if a == b else mismatchScore`.
    #[inline]
    pub fn score(&self, a: u8, b: u8) -> i16 {
        if a == b { self.match_score } else { self.mismatch_score }
    }

    /// Advisory validation: `gap >= 0` or `match <= mismatch` are not
    /// rejected by the core sweep itself (it still runs and produces a
    /// result), but callers who want strictness can opt in by calling this
    /// before `semi_global_alignment`.
    pub fn validate(&self) -> Result<(), AlignError> {
        if self.gap_score >= 0 || self.match_score <= self.mismatch_score {
            return Err(AlignError::InvalidScoring {
                match_score: self.match_score,
                mismatch_score: self.mismatch_score,
                gap_score: self.gap_score,
            });
        }
        Ok(())
    }
}
