//! The three-phase extension driver: seed DP fill, vectorised sweep, tail
//! sweep, plus the top-level entry points.

use tracing::{debug, instrument, trace};

use crate::error::AlignError;
use crate::scores::ScoringScheme;
use crate::seed::Seed;
use crate::state::State;
use crate::vector::{VectorRegister, CUTOFF, LOGICAL_WIDTH, MIDDLE, NINF, VECTOR_WIDTH};

/// Outcome of an extension: scores plus the H/V endpoints the extension
/// actually reached.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AlignmentResult {
    pub best_score: i64,
    pub exit_score: i64,
    pub beg_h: u32,
    pub beg_v: u32,
    pub end_h: u32,
    pub end_v: u32,
}

/// Phase 1: scalar seed DP fill over the upper-left `(L+2) x (L+2)`
/// triangle. Loads the two most recent anti-diagonals of that triangle into
/// `antiDiag1`/`antiDiag2` and primes `vqueryh`/`vqueryv` for phase 2.
fn phase1(state: &mut State) {
    let l = LOGICAL_WIDTH;
    let dim = l + 2;

    let mut dp = vec![0i32; dim * dim];
    let idx = |i: usize, j: usize| i * dim + j;

    for i in 1..dim {
        dp[idx(0, i)] = -(i as i32);
        dp[idx(i, 0)] = -(i as i32);
    }

    let mut dp_max = 0i32;
    for i in 1..dim {
        for j in 1..=(dim - i) {
            let h_base = state.hseq[i - 1] as u8;
            let v_base = state.vseq[j - 1] as u8;
            let diag = dp[idx(i - 1, j - 1)]
                + if h_base == v_base { state.match_score } else { state.mismatch_score } as i32;
            let vert_horiz = dp[idx(i - 1, j)].max(dp[idx(i, j - 1)]) + state.gap_score as i32;
            let cell = diag.max(vert_horiz);
            dp[idx(i, j)] = cell;
            if cell > dp_max {
                dp_max = cell;
            }
        }
    }

    let mut anti_diag_max = i32::MIN;
    for i in 1..=l {
        let value1 = dp[idx(i, l - i + 1)];
        let value2 = dp[idx(i + 1, l - i + 1)];
        state.anti_diag1.set_lane(i - 1, value1 as i8);
        state.anti_diag2.set_lane(i, value2 as i8);
        if value1 > anti_diag_max {
            anti_diag_max = value1;
        }
    }
    state.anti_diag1.set_lane(l, NINF);
    state.anti_diag2.set_lane(0, NINF);
    state.anti_diag3 = VectorRegister::splat(NINF);

    for i in 0..l {
        state.vqueryh.set_lane(i, state.hseq[i + 1]);
        state.vqueryv.set_lane(i, state.vseq[l - i]);
    }
    state.vqueryh.set_lane(l, NINF);
    state.vqueryv.set_lane(l, NINF);

    state.best_score = dp_max as i64;
    state.curr_score = anti_diag_max as i64;

    trace!(dp_max, anti_diag_max, "phase1 seed DP fill complete");

    if (anti_diag_max as i64) < state.best_score - state.score_dropoff {
        state.x_drop_cond = true;
        state.seed.end_h = state.hoffset as u32;
        state.seed.end_v = state.voffset as u32;
        debug!(best = state.best_score, exit = state.curr_score, "x-drop during phase1");
    }
}

/// One anti-diagonal step shared by phase 2 and phase 4: computes
/// `antiDiag3` from `antiDiag1`/`antiDiag2`, updates scores, and rebases on
/// overflow risk. Returns `true` if the X-drop condition fired.
fn step(state: &mut State) -> bool {
    let m = state.vqueryh.cmpeq(&state.vqueryv);
    let contrib = VectorRegister::blend(&m, &state.v_match, &state.v_mismatch);
    let d1 = state.anti_diag1.add(&contrib);

    let s = state.anti_diag2.lshift();
    let d2 = s.max(&state.anti_diag2).add(&state.v_gap);

    let mut anti_diag3 = d1.max(&d2);
    anti_diag3.set_lane(LOGICAL_WIDTH, NINF);
    state.anti_diag3 = anti_diag3;

    let local_best = state.anti_diag3.max_reduce();
    state.curr_score = local_best as i64 + state.score_offset;

    if state.curr_score < state.best_score - state.score_dropoff {
        state.x_drop_cond = true;
        debug!(best = state.best_score, exit = state.curr_score, "x-drop during sweep");
        return true;
    }

    if local_best > CUTOFF {
        let floor = state.anti_diag3.min_reduce_logical();
        let floor_vec = VectorRegister::splat(floor);
        state.anti_diag2 = state.anti_diag2.sub(&floor_vec);
        state.anti_diag3 = state.anti_diag3.sub(&floor_vec);
        state.score_offset += floor as i64;
        trace!(floor, new_offset = state.score_offset, "rebase");
    }

    if state.curr_score > state.best_score {
        state.best_score = state.curr_score;
    }

    false
}

/// Phase 2: the vectorised anti-diagonal sweep.
fn phase2(state: &mut State) {
    while state.hoffset < state.hlength && state.voffset < state.vlength {
        if step(state) {
            state.seed.beg_h = 0;
            state.seed.beg_v = 0;
            state.seed.end_h = state.hoffset as u32;
            state.seed.end_v = state.voffset as u32;
            return;
        }

        // lowest-index lane wins ties; an all-non-positive anti-diagonal
        // therefore prefers moveDown (p = 0 <= MIDDLE).
        let p = state.anti_diag3.argmax();

        state.seed.end_h = state.hoffset as u32;
        state.seed.end_v = state.voffset as u32;

        if p > MIDDLE {
            state.move_right();
        } else {
            state.move_down();
        }
    }
}

/// Phase 4: the tail sweep, `LOGICAL_WIDTH - 3` forced-direction iterations
/// after one sequence is exhausted. Unlike phase 2, an X-drop here does not
/// touch the seed's offsets.
fn phase4(state: &mut State) {
    let mut dir_down = state.hoffset >= state.hlength;

    for _ in 0..LOGICAL_WIDTH.saturating_sub(3) {
        if state.hoffset >= state.hlength && state.voffset >= state.vlength {
            break;
        }
        if step(state) {
            return;
        }

        state.seed.end_h = state.hoffset as u32;
        state.seed.end_v = state.voffset as u32;

        if dir_down {
            state.move_down();
        } else {
            state.move_right();
        }
        dir_down = !dir_down;
    }
}

/// Run phase 1, then phase 2, then phase 4 on a freshly-built `State`,
/// honouring `xDropCond` as an early-exit signal after each phase.
fn one_direction(state: &mut State) {
    if state.short_circuit {
        return;
    }

    phase1(state);
    if state.x_drop_cond {
        return;
    }

    phase2(state);
    if state.x_drop_cond {
        return;
    }

    phase4(state);
}

/// Extends an alignment from the start of H/V toward increasing offsets
/// (semi-global: no gap penalty for running off either end of a sequence).
#[instrument(skip(h, v, scoring))]
pub fn semi_global_alignment(h: &[u8], v: &[u8], scoring: &ScoringScheme, score_dropoff: i64) -> AlignmentResult {
    // Either sequence empty short-circuits to an all-zero result, distinct
    // from the (nonzero but sub-VECTOR_WIDTH) case handled inside State::new.
    if h.is_empty() || v.is_empty() {
        trace!("empty input, short-circuiting to a zero result");
        return AlignmentResult::default();
    }

    let mut state = State::new(Seed::default(), h, v, scoring, score_dropoff);
    one_direction(&mut state);

    // The short-circuit path never advances hoffset/voffset past their
    // initial LOGICAL_WIDTH value, so its endpoints live on the seed
    // (set in State::new); every other path reports the literal
    // hoffset/voffset reached.
    let (end_h, end_v) = if state.short_circuit {
        (state.seed.end_h, state.seed.end_v)
    } else {
        (state.hoffset as u32, state.voffset as u32)
    };

    AlignmentResult {
        best_score: state.best_score,
        exit_score: state.curr_score,
        beg_h: state.seed.beg_h,
        beg_v: state.seed.beg_v,
        end_h,
        end_v,
    }
}

fn validated(scoring: &ScoringScheme, seed: &Seed, h_len: usize, v_len: usize) -> Result<(), AlignError> {
    scoring.validate()?;
    if !seed.is_valid(h_len, v_len) {
        return Err(AlignError::InvalidSeed {
            beg_h: seed.beg_h,
            end_h: seed.end_h,
            h_len,
            beg_v: seed.beg_v,
            end_v: seed.end_v,
            v_len,
        });
    }
    Ok(())
}

fn reversed_prefix(bytes: &[u8], end: u32) -> Vec<u8> {
    let mut prefix = bytes[..end as usize].to_vec();
    prefix.reverse();
    prefix
}

/// Splits H/V at the seed's end, extends outward on both sides, and
/// translates the two `semiGlobalAlignment` results back into the original
/// coordinate space.
#[instrument(skip(h, v, scoring))]
pub fn seed_and_extend(
    h: &[u8],
    v: &[u8],
    scoring: &ScoringScheme,
    score_dropoff: i64,
    seed: &Seed,
) -> Result<AlignmentResult, AlignError> {
    validated(scoring, seed, h.len(), v.len())?;

    let h_prefix = reversed_prefix(h, seed.end_h);
    let v_prefix = reversed_prefix(v, seed.end_v);
    let h_suffix = &h[seed.end_h as usize..];
    let v_suffix = &v[seed.end_v as usize..];

    let left = semi_global_alignment(&h_prefix, &v_prefix, scoring, score_dropoff);
    let right = semi_global_alignment(h_suffix, v_suffix, scoring, score_dropoff);

    let result = AlignmentResult {
        best_score: left.best_score + right.best_score,
        exit_score: left.exit_score + right.exit_score,
        beg_h: seed.end_h - left.end_h,
        beg_v: seed.end_v - left.end_v,
        end_h: seed.end_h + right.end_h,
        end_v: seed.end_v + right.end_v,
    };

    debug!(
        best_score = result.best_score,
        exit_score = result.exit_score,
        beg_h = result.beg_h,
        beg_v = result.beg_v,
        end_h = result.end_h,
        end_v = result.end_v,
        "seed_and_extend complete"
    );

    Ok(result)
}

/// Extend only toward decreasing H/V; the right endpoints are copied from
/// the seed.
#[instrument(skip(h, v, scoring))]
pub fn seed_and_extend_left(
    h: &[u8],
    v: &[u8],
    scoring: &ScoringScheme,
    score_dropoff: i64,
    seed: &Seed,
) -> Result<AlignmentResult, AlignError> {
    validated(scoring, seed, h.len(), v.len())?;

    let h_prefix = reversed_prefix(h, seed.end_h);
    let v_prefix = reversed_prefix(v, seed.end_v);
    let left = semi_global_alignment(&h_prefix, &v_prefix, scoring, score_dropoff);

    Ok(AlignmentResult {
        best_score: left.best_score,
        exit_score: left.exit_score,
        beg_h: seed.end_h - left.end_h,
        beg_v: seed.end_v - left.end_v,
        end_h: seed.end_h,
        end_v: seed.end_v,
    })
}

/// Extend only toward increasing H/V; the left endpoints are copied from
/// the seed.
#[instrument(skip(h, v, scoring))]
pub fn seed_and_extend_right(
    h: &[u8],
    v: &[u8],
    scoring: &ScoringScheme,
    score_dropoff: i64,
    seed: &Seed,
) -> Result<AlignmentResult, AlignError> {
    validated(scoring, seed, h.len(), v.len())?;

    let h_suffix = &h[seed.beg_h as usize..];
    let v_suffix = &v[seed.beg_v as usize..];
    let right = semi_global_alignment(h_suffix, v_suffix, scoring, score_dropoff);

    Ok(AlignmentResult {
        best_score: right.best_score,
        exit_score: right.exit_score,
        beg_h: seed.beg_h,
        beg_v: seed.beg_v,
        end_h: seed.beg_h + right.end_h,
        end_v: seed.beg_v + right.end_v,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scheme() -> ScoringScheme {
        ScoringScheme::new(1, -1, -1)
    }

    #[test]
    fn identical_strings_align_perfectly() {
        let h = b"ACGTACGTACGTACGTACGTACGTACGTACGT";
        let v = h;
        let result = semi_global_alignment(h, v, &scheme(), 5);
        assert_eq!(result.best_score, 32);
        assert_eq!(result.exit_score, 32);
        assert_eq!(result.end_h, 32);
        assert_eq!(result.end_v, 32);
    }

    #[test]
    fn single_mismatch_is_tolerated() {
        let mut h = vec![b'A'; 32];
        h[16] = b'C';
        let v = vec![b'A'; 32];
        let result = semi_global_alignment(&h, &v, &scheme(), 10);
        assert!(result.best_score >= 30, "best_score={}", result.best_score);
        assert!(!matches!(result.exit_score, s if s < result.best_score - 10));
    }

    #[test]
    fn divergent_tail_triggers_x_drop() {
        let mut h = vec![b'A'; 16];
        h.extend(vec![b'G'; 16]);
        let v = vec![b'A'; 32];
        let result = semi_global_alignment(&h, &v, &scheme(), 3);
        assert!(result.best_score >= 14 && result.best_score <= 18, "best_score={}", result.best_score);
        assert!(result.exit_score < result.best_score - 3 + 1);
    }

    #[test]
    fn empty_query_short_circuits_to_zero() {
        let result = semi_global_alignment(b"", b"AAA", &scheme(), 5);
        assert_eq!(result.best_score, 0);
        assert_eq!(result.exit_score, 0);
        assert_eq!(result.end_h, 0);
        assert_eq!(result.end_v, 0);
    }

    #[test]
    fn sub_width_sequences_short_circuit() {
        let result = semi_global_alignment(b"ACGT", b"ACGT", &scheme(), 5);
        assert_eq!(result.best_score, 0);
        assert_eq!(result.end_h, 4);
        assert_eq!(result.end_v, 4);
    }

    #[test]
    fn seed_and_extend_rejects_out_of_bounds_seed() {
        let h = vec![b'A'; 40];
        let v = vec![b'A'; 40];
        let seed = Seed::new(0, 50, 0, 10);
        let err = seed_and_extend(&h, &v, &scheme(), 5, &seed).unwrap_err();
        assert!(matches!(err, AlignError::InvalidSeed { .. }));
    }

    #[test]
    fn seed_and_extend_rejects_invalid_scoring() {
        let h = vec![b'A'; 40];
        let v = vec![b'A'; 40];
        let seed = Seed::new(0, 10, 0, 10);
        let bad = ScoringScheme::new(1, -1, 0);
        let err = seed_and_extend(&h, &v, &bad, 5, &seed).unwrap_err();
        assert!(matches!(err, AlignError::InvalidScoring { .. }));
    }

    #[test]
    fn seed_and_extend_midpoint() {
        let mut h = b"TTTT".to_vec();
        h.extend(vec![b'A'; 32]);
        h.extend(b"TTTT");
        let mut v = b"GGGG".to_vec();
        v.extend(vec![b'A'; 32]);
        v.extend(b"GGGG");

        let seed = Seed::new(0, 36, 0, 36);
        let result = seed_and_extend(&h, &v, &scheme(), 5, &seed).unwrap();
        assert_eq!(result.beg_h, 4);
        assert_eq!(result.beg_v, 4);
        assert!(result.end_h >= 36);
        assert!(result.end_v >= 36);
    }

    #[test]
    fn seed_and_extend_left_right_split_matches_full_extend_endpoints() {
        let mut h = b"TTTT".to_vec();
        h.extend(vec![b'A'; 32]);
        h.extend(b"TTTT");
        let mut v = b"GGGG".to_vec();
        v.extend(vec![b'A'; 32]);
        v.extend(b"GGGG");

        let seed = Seed::new(0, 36, 0, 36);
        let full = seed_and_extend(&h, &v, &scheme(), 5, &seed).unwrap();
        let left = seed_and_extend_left(&h, &v, &scheme(), 5, &seed).unwrap();
        let right = seed_and_extend_right(&h, &v, &scheme(), 5, &seed).unwrap();

        assert_eq!(full.beg_h, left.beg_h);
        assert_eq!(full.beg_v, left.beg_v);
        assert_eq!(full.end_h, right.end_h);
        assert_eq!(full.end_v, right.end_v);
        assert_eq!(full.best_score, left.best_score + right.best_score);
    }
}
