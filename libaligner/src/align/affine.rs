use crate::align::scoring::{score_add, AffineGap, Score, ScoringScheme, SCORE_FLOOR};
use crate::align::structs::{Trace, TraceGrid, TraceMatrix, TraceStep};

/// The three DP layers of a global alignment under affine gap costs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AffineState {
    /// The cell's column aligns two symbols
    #[default]
    Match,
    /// The cell's column puts a seq 1 symbol against a gap in seq 2
    GapInSeq2,
    /// The cell's column puts a seq 2 symbol against a gap in seq 1
    GapInSeq1,
}

impl AffineState {
    fn step(&self) -> TraceStep {
        match self {
            AffineState::Match => TraceStep::Diagonal,
            AffineState::GapInSeq2 => TraceStep::Up,
            AffineState::GapInSeq1 => TraceStep::Left,
        }
    }
}

/// The backpointers of all three layers at one cell, packed in a byte.
///
/// Bits 0-1 hold the state the match layer came from;
/// bits 2 and 3 are set when the gap layers extend a run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct AffinePointers(u8);

impl AffinePointers {
    const MATCH_MASK: u8 = 0b0011;
    const GAP_IN_SEQ_2_EXTENDS: u8 = 0b0100;
    const GAP_IN_SEQ_1_EXTENDS: u8 = 0b1000;

    fn new(match_from: AffineState, gap_in_seq_2_extends: bool, gap_in_seq_1_extends: bool) -> Self {
        let mut bits = match match_from {
            AffineState::Match => 0,
            AffineState::GapInSeq2 => 1,
            AffineState::GapInSeq1 => 2,
        };
        if gap_in_seq_2_extends {
            bits |= Self::GAP_IN_SEQ_2_EXTENDS;
        }
        if gap_in_seq_1_extends {
            bits |= Self::GAP_IN_SEQ_1_EXTENDS;
        }
        Self(bits)
    }

    /// The layer the previous cell was in, given the layer of this cell.
    fn from(&self, state: AffineState) -> AffineState {
        match state {
            AffineState::Match => match self.0 & Self::MATCH_MASK {
                0 => AffineState::Match,
                1 => AffineState::GapInSeq2,
                _ => AffineState::GapInSeq1,
            },
            AffineState::GapInSeq2 if self.0 & Self::GAP_IN_SEQ_2_EXTENDS != 0 => {
                AffineState::GapInSeq2
            }
            AffineState::GapInSeq1 if self.0 & Self::GAP_IN_SEQ_1_EXTENDS != 0 => {
                AffineState::GapInSeq1
            }
            _ => AffineState::Match,
        }
    }
}

/// Pick the best of the three layers, preferring Match, then GapInSeq2.
#[inline(always)]
fn best_state(
    match_score: Score,
    gap_in_seq_2_score: Score,
    gap_in_seq_1_score: Score,
) -> (Score, AffineState) {
    if match_score >= gap_in_seq_2_score && match_score >= gap_in_seq_1_score {
        (match_score, AffineState::Match)
    } else if gap_in_seq_2_score >= gap_in_seq_1_score {
        (gap_in_seq_2_score, AffineState::GapInSeq2)
    } else {
        (gap_in_seq_1_score, AffineState::GapInSeq1)
    }
}

/// Global alignment with affine gap costs (Gotoh's three-layer recurrence).
///
/// Both sequences must be non-empty.
pub(crate) fn gotoh(
    seq_1: &[u8],
    seq_2: &[u8],
    scheme: &ScoringScheme,
    affine: AffineGap,
) -> (Trace, Score) {
    let seq_1_length = seq_1.len();
    let seq_2_length = seq_2.len();
    let open = affine.open as Score;
    let extend = affine.extend as Score;

    let mut pointers: TraceMatrix<AffinePointers> = TraceMatrix::new(seq_1_length, seq_2_length);

    let mut match_prev = vec![SCORE_FLOOR; seq_2_length + 1];
    let mut gap_2_prev = vec![SCORE_FLOOR; seq_2_length + 1];
    let mut gap_1_prev = vec![SCORE_FLOOR; seq_2_length + 1];
    let mut match_curr = vec![SCORE_FLOOR; seq_2_length + 1];
    let mut gap_2_curr = vec![SCORE_FLOOR; seq_2_length + 1];
    let mut gap_1_curr = vec![SCORE_FLOOR; seq_2_length + 1];

    match_prev[0] = 0;
    for seq_2_idx in 1..=seq_2_length {
        gap_1_prev[seq_2_idx] = if seq_2_idx == 1 {
            open
        } else {
            score_add(gap_1_prev[seq_2_idx - 1], extend)
        };
        pointers.set(
            0,
            seq_2_idx,
            AffinePointers::new(AffineState::Match, false, seq_2_idx > 1),
        );
    }

    for seq_1_idx in 1..=seq_1_length {
        let residue = seq_1[seq_1_idx - 1];

        match_curr[0] = SCORE_FLOOR;
        gap_1_curr[0] = SCORE_FLOOR;
        gap_2_curr[0] = if seq_1_idx == 1 {
            open
        } else {
            score_add(gap_2_prev[0], extend)
        };
        pointers.set(
            seq_1_idx,
            0,
            AffinePointers::new(AffineState::Match, seq_1_idx > 1, false),
        );

        for seq_2_idx in 1..=seq_2_length {
            let (best_prev, match_from) = best_state(
                match_prev[seq_2_idx - 1],
                gap_2_prev[seq_2_idx - 1],
                gap_1_prev[seq_2_idx - 1],
            );
            match_curr[seq_2_idx] =
                score_add(best_prev, scheme.pair_score(residue, seq_2[seq_2_idx - 1]));

            let gap_2_open = score_add(match_prev[seq_2_idx], open);
            let gap_2_extend = score_add(gap_2_prev[seq_2_idx], extend);
            let gap_2_extends = gap_2_extend >= gap_2_open;
            gap_2_curr[seq_2_idx] = gap_2_open.max(gap_2_extend);

            let gap_1_open = score_add(match_curr[seq_2_idx - 1], open);
            let gap_1_extend = score_add(gap_1_curr[seq_2_idx - 1], extend);
            let gap_1_extends = gap_1_extend >= gap_1_open;
            gap_1_curr[seq_2_idx] = gap_1_open.max(gap_1_extend);

            pointers.set(
                seq_1_idx,
                seq_2_idx,
                AffinePointers::new(match_from, gap_2_extends, gap_1_extends),
            );
        }

        std::mem::swap(&mut match_prev, &mut match_curr);
        std::mem::swap(&mut gap_2_prev, &mut gap_2_curr);
        std::mem::swap(&mut gap_1_prev, &mut gap_1_curr);
    }

    let (score, state) = best_state(
        match_prev[seq_2_length],
        gap_2_prev[seq_2_length],
        gap_1_prev[seq_2_length],
    );

    let mut trace = Trace::with_capacity(seq_1_length + seq_2_length);
    let mut seq_1_idx = seq_1_length;
    let mut seq_2_idx = seq_2_length;
    let mut state = state;

    while seq_1_idx > 0 && seq_2_idx > 0 {
        trace.push(state.step());
        let previous = pointers.get(seq_1_idx, seq_2_idx).from(state);
        match state {
            AffineState::Match => {
                seq_1_idx -= 1;
                seq_2_idx -= 1;
            }
            AffineState::GapInSeq2 => seq_1_idx -= 1,
            AffineState::GapInSeq1 => seq_2_idx -= 1,
        }
        state = previous;
    }
    trace.push_many(TraceStep::Up, seq_1_idx);
    trace.push_many(TraceStep::Left, seq_2_idx);

    trace.reverse();
    (trace, score)
}
