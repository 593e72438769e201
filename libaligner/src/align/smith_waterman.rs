use crate::align::scoring::{score_add, Score, ScoringScheme};
use crate::align::structs::{best_step, Alignment, Trace, TraceGrid, TraceMatrix, TraceStep};
use crate::alphabet::uppercase;
use crate::config::AlignLimits;
use crate::error::AlignError;

/// Find the best-scoring pair of substrings with the Smith-Waterman algorithm.
///
/// Returns an empty alignment with score 0 when no pair of
/// symbols scores positively.
pub fn smith_waterman(
    seq_1: &[u8],
    seq_2: &[u8],
    scheme: &ScoringScheme,
    limits: &AlignLimits,
) -> Result<Alignment, AlignError> {
    if scheme.affine.is_some() {
        return Err(AlignError::IncompatibleOptions(
            "affine gap costs are only supported by the global aligner",
        ));
    }
    limits.check_length(seq_1.len())?;
    limits.check_length(seq_2.len())?;

    let seq_1 = uppercase(seq_1)?;
    let seq_2 = uppercase(seq_2)?;
    Ok(local_alignment(&seq_1, &seq_2, scheme, 0, 0))
}

/// The unchecked local aligner. `seq_1_offset` and `seq_2_offset`
/// place the slices within the caller's sequences.
pub(crate) fn local_alignment(
    seq_1: &[u8],
    seq_2: &[u8],
    scheme: &ScoringScheme,
    seq_1_offset: usize,
    seq_2_offset: usize,
) -> Alignment {
    let seq_1_length = seq_1.len();
    let seq_2_length = seq_2.len();
    let gap = scheme.gap();

    // cells left at None are where a local alignment may start
    let mut pointers: TraceMatrix<Option<TraceStep>> = TraceMatrix::new(seq_1_length, seq_2_length);

    let mut prev: Vec<Score> = vec![0; seq_2_length + 1];
    let mut curr: Vec<Score> = vec![0; seq_2_length + 1];

    let mut best_score: Score = 0;
    let mut best_cell = (0, 0);

    for seq_1_idx in 1..=seq_1_length {
        let residue = seq_1[seq_1_idx - 1];
        curr[0] = 0;

        for seq_2_idx in 1..=seq_2_length {
            let (score, step) = best_step(
                score_add(
                    prev[seq_2_idx - 1],
                    scheme.pair_score(residue, seq_2[seq_2_idx - 1]),
                ),
                score_add(prev[seq_2_idx], gap),
                score_add(curr[seq_2_idx - 1], gap),
            );

            if score > 0 {
                curr[seq_2_idx] = score;
                pointers.set(seq_1_idx, seq_2_idx, Some(step));
                if score > best_score {
                    best_score = score;
                    best_cell = (seq_1_idx, seq_2_idx);
                }
            } else {
                curr[seq_2_idx] = 0;
            }
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    if best_score == 0 {
        return Alignment::empty();
    }

    let (mut seq_1_idx, mut seq_2_idx) = best_cell;
    let mut trace = Trace::new();
    while seq_1_idx > 0 && seq_2_idx > 0 {
        let Some(step) = pointers.get(seq_1_idx, seq_2_idx) else {
            break;
        };
        match step {
            TraceStep::Diagonal => {
                seq_1_idx -= 1;
                seq_2_idx -= 1;
            }
            TraceStep::Up => seq_1_idx -= 1,
            TraceStep::Left => seq_2_idx -= 1,
        }
        trace.push(step);
    }
    trace.reverse();

    let ((leading_1, leading_2), removed) = trace.trim_gap_ends();
    let score = score_add(best_score, -gap.saturating_mul(removed as Score));
    let seq_1_start = seq_1_idx + leading_1;
    let seq_2_start = seq_2_idx + leading_2;

    Alignment::from_trace(
        &trace,
        &seq_1[seq_1_start..],
        &seq_2[seq_2_start..],
        seq_1_offset + seq_1_start,
        seq_2_offset + seq_2_start,
        score,
    )
}

/// The best local alignment score of two sequences, in O(m) space.
pub(crate) fn local_score(seq_1: &[u8], seq_2: &[u8], scheme: &ScoringScheme) -> Score {
    let gap = scheme.gap();
    let mut prev: Vec<Score> = vec![0; seq_2.len() + 1];
    let mut curr: Vec<Score> = vec![0; seq_2.len() + 1];
    let mut best_score = 0;

    for &residue in seq_1 {
        for (seq_2_idx, &seq_2_residue) in (1..=seq_2.len()).zip(seq_2) {
            let score = score_add(prev[seq_2_idx - 1], scheme.pair_score(residue, seq_2_residue))
                .max(score_add(prev[seq_2_idx], gap))
                .max(score_add(curr[seq_2_idx - 1], gap))
                .max(0);
            curr[seq_2_idx] = score;
            best_score = best_score.max(score);
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    best_score
}
