//! The alignment-in-progress.
//!
//! `State` owns the two NINF-padded sequence buffers, the three-register
//! anti-diagonal sliding window, the broadcast score vectors, and the
//! running scores. It is constructed once per extension call and never
//! shared across tasks.

use tracing::debug;

use crate::scores::ScoringScheme;
use crate::seed::Seed;
use crate::vector::{VectorRegister, LOGICAL_WIDTH, VECTOR_WIDTH};

pub(crate) struct State {
    pub(crate) hseq: Vec<i8>,
    pub(crate) vseq: Vec<i8>,
    pub(crate) hlength: usize,
    pub(crate) vlength: usize,

    pub(crate) hoffset: usize,
    pub(crate) voffset: usize,

    pub(crate) match_score: i16,
    pub(crate) mismatch_score: i16,
    pub(crate) gap_score: i16,

    pub(crate) vqueryh: VectorRegister,
    pub(crate) vqueryv: VectorRegister,

    pub(crate) anti_diag1: VectorRegister,
    pub(crate) anti_diag2: VectorRegister,
    pub(crate) anti_diag3: VectorRegister,

    pub(crate) v_match: VectorRegister,
    pub(crate) v_mismatch: VectorRegister,
    pub(crate) v_gap: VectorRegister,

    pub(crate) best_score: i64,
    pub(crate) curr_score: i64,
    pub(crate) score_offset: i64,
    pub(crate) score_dropoff: i64,
    pub(crate) x_drop_cond: bool,

    pub(crate) seed: Seed,

    /// Set when either sequence is shorter than `VECTOR_WIDTH`; the caller
    /// must skip phases 1/2/4 entirely.
    pub(crate) short_circuit: bool,
}

impl State {
    /// Build a `State` from (seed, hseq, vseq, scoring, dropoff).
    pub(crate) fn new(seed: Seed, h: &[u8], v: &[u8], scoring: &ScoringScheme, score_dropoff: i64) -> State {
        let hlength = h.len() + 1;
        let vlength = v.len() + 1;

        let mut seed = seed;
        let short_circuit = hlength < VECTOR_WIDTH || vlength < VECTOR_WIDTH;
        if short_circuit {
            debug!(h_len = h.len(), v_len = v.len(), width = VECTOR_WIDTH, "sequence shorter than vector width, short-circuiting");
            seed.end_h = h.len() as u32;
            seed.end_v = v.len() as u32;
        }

        let mut hseq = vec![0i8; hlength + VECTOR_WIDTH];
        let mut vseq = vec![0i8; vlength + VECTOR_WIDTH];
        for (i, &b) in h.iter().enumerate() {
            hseq[i] = b as i8;
        }
        for (i, &b) in v.iter().enumerate() {
            vseq[i] = b as i8;
        }
        for b in &mut hseq[h.len()..] {
            *b = crate::vector::NINF;
        }
        for b in &mut vseq[v.len()..] {
            *b = crate::vector::NINF;
        }

        State {
            hseq,
            vseq,
            hlength,
            vlength,
            hoffset: LOGICAL_WIDTH,
            voffset: LOGICAL_WIDTH,
            match_score: scoring.match_score,
            mismatch_score: scoring.mismatch_score,
            gap_score: scoring.gap_score,
            vqueryh: VectorRegister::zero(),
            vqueryv: VectorRegister::zero(),
            anti_diag1: VectorRegister::zero(),
            anti_diag2: VectorRegister::zero(),
            anti_diag3: VectorRegister::zero(),
            v_match: VectorRegister::splat(scoring.match_score as i8),
            v_mismatch: VectorRegister::splat(scoring.mismatch_score as i8),
            v_gap: VectorRegister::splat(scoring.gap_score as i8),
            best_score: 0,
            curr_score: 0,
            score_offset: 0,
            score_dropoff,
            x_drop_cond: false,
            seed,
            short_circuit,
        }
    }

    /// `moveRight`: the new anti-diagonal extends toward increasing H.
    #[inline]
    pub(crate) fn move_right(&mut self) {
        self.vqueryh = self.vqueryh.lshift();
        self.vqueryh.set_lane(LOGICAL_WIDTH - 1, self.hseq[self.hoffset] as i8);
        self.hoffset += 1;

        self.anti_diag1 = self.anti_diag2;
        self.anti_diag2 = self.anti_diag3;
        self.anti_diag1 = self.anti_diag1.lshift();
    }

    /// `moveDown`: the new anti-diagonal extends toward increasing V.
    #[inline]
    pub(crate) fn move_down(&mut self) {
        self.vqueryv = self.vqueryv.rshift();
        self.vqueryv.set_lane(0, self.vseq[self.voffset] as i8);
        self.voffset += 1;

        self.anti_diag1 = self.anti_diag2;
        self.anti_diag2 = self.anti_diag3;
        self.anti_diag2 = self.anti_diag2.rshift();
    }
}
