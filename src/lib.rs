//! X-drop adaptive banded pairwise sequence alignment with a vectorised
//! anti-diagonal core.
//!
//! Given a seed position within two byte sequences, a linear-gap scoring
//! scheme, and an X-drop threshold, [`seed_and_extend`] (and the lower-level
//! [`semi_global_alignment`]) extend an alignment left and/or right from the
//! seed and report the best score achieved, the exit score, and the final
//! alignment endpoints. Extension terminates early once the running score
//! falls more than the threshold below the best score seen so far (the
//! X-drop condition).
//!
//! The core is a three-register sliding-window computation over a narrow
//! band of `int8` lanes. Affine gaps, traceback, and multi-threaded batch
//! alignment are out of scope; scoring is linear-gap only.

mod aligner;
mod error;
mod scores;
mod seed;
mod state;
mod vector;

pub use aligner::{
    seed_and_extend, seed_and_extend_left, seed_and_extend_right, semi_global_alignment, AlignmentResult,
};
pub use error::AlignError;
pub use scores::ScoringScheme;
pub use seed::Seed;
pub use vector::{LOGICAL_WIDTH, MIDDLE, VECTOR_WIDTH};
