use crate::align::affine::gotoh;
use crate::align::scoring::{score_add, Score, ScoringScheme, SCORE_FLOOR};
use crate::align::structs::{
    best_step, Alignment, BandedTraceMatrix, Trace, TraceGrid, TraceMatrix, TraceStep,
};
use crate::alphabet::uppercase;
use crate::config::AlignLimits;
use crate::error::AlignError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GlobalParams {
    /// Restrict the DP to cells within this many columns of the main diagonal.
    ///
    /// Banding is a heuristic: when the optimal path leaves the
    /// band, the reported alignment is the best one inside it.
    pub band_width: Option<usize>,
    pub limits: AlignLimits,
}

impl GlobalParams {
    pub fn banded(band_width: usize) -> Self {
        Self {
            band_width: Some(band_width),
            ..Default::default()
        }
    }
}

/// Globally align two sequences with the Needleman-Wunsch algorithm.
///
/// Uses affine gap costs when the scheme carries them, and a diagonal
/// band when `params.band_width` is set; the two can't be combined.
pub fn needleman_wunsch(
    seq_1: &[u8],
    seq_2: &[u8],
    scheme: &ScoringScheme,
    params: &GlobalParams,
) -> Result<Alignment, AlignError> {
    if params.band_width.is_some() && scheme.affine.is_some() {
        return Err(AlignError::IncompatibleOptions(
            "banding can't be combined with affine gap costs",
        ));
    }
    params.limits.check_length(seq_1.len())?;
    params.limits.check_length(seq_2.len())?;

    let seq_1 = uppercase(seq_1)?;
    let seq_2 = uppercase(seq_2)?;

    let (trace, score) = global_trace(&seq_1, &seq_2, scheme, params.band_width);
    Ok(Alignment::from_trace(&trace, &seq_1, &seq_2, 0, 0, score))
}

/// The unchecked core of the global aligner: pick the DP variant and backtrace it.
pub(crate) fn global_trace(
    seq_1: &[u8],
    seq_2: &[u8],
    scheme: &ScoringScheme,
    band_width: Option<usize>,
) -> (Trace, Score) {
    let seq_1_length = seq_1.len();
    let seq_2_length = seq_2.len();

    if seq_1_length == 0 || seq_2_length == 0 {
        return (
            Trace::all_gaps(seq_1_length, seq_2_length),
            score_add(
                scheme.gap_run(seq_1_length),
                scheme.gap_run(seq_2_length),
            ),
        );
    }

    match (scheme.affine, band_width) {
        (Some(affine), _) => gotoh(seq_1, seq_2, scheme, affine),
        (None, Some(band_width)) => {
            // the band must at least reach the terminal cell
            let band_width = band_width.max(seq_1_length.abs_diff(seq_2_length));
            if band_width >= seq_1_length.max(seq_2_length) {
                full_linear(seq_1, seq_2, scheme)
            } else {
                banded_linear(seq_1, seq_2, scheme, band_width)
            }
        }
        (None, None) => full_linear(seq_1, seq_2, scheme),
    }
}

/// Fill DP row `i` from row `i - 1` under linear gap costs.
///
/// `residue` is seq 1 at position `i`, and `record` receives
/// the chosen backpointer for every column of the row.
#[inline]
fn fill_row(
    prev: &[Score],
    curr: &mut [Score],
    residue: u8,
    seq_2: &[u8],
    scheme: &ScoringScheme,
    mut record: impl FnMut(usize, TraceStep),
) {
    let gap = scheme.gap();
    curr[0] = score_add(prev[0], gap);
    record(0, TraceStep::Up);

    for (seq_2_idx, &seq_2_residue) in (1..=seq_2.len()).zip(seq_2) {
        let diag_score = score_add(
            prev[seq_2_idx - 1],
            scheme.pair_score(residue, seq_2_residue),
        );
        let up_score = score_add(prev[seq_2_idx], gap);
        let left_score = score_add(curr[seq_2_idx - 1], gap);

        let (score, step) = best_step(diag_score, up_score, left_score);
        curr[seq_2_idx] = score;
        record(seq_2_idx, step);
    }
}

fn first_row(seq_2_length: usize, scheme: &ScoringScheme) -> Vec<Score> {
    let mut row = vec![0; seq_2_length + 1];
    for seq_2_idx in 1..=seq_2_length {
        row[seq_2_idx] = score_add(row[seq_2_idx - 1], scheme.gap());
    }
    row
}

/// The final row of the linear-gap global DP matrix of `seq_1` against
/// `seq_2`, computed one row at a time in O(m) space.
///
/// Entry j is the optimal score of `seq_1` against `seq_2[..j]`.
pub fn last_row_scores(seq_1: &[u8], seq_2: &[u8], scheme: &ScoringScheme) -> Vec<Score> {
    let mut prev = first_row(seq_2.len(), scheme);
    let mut curr = vec![0; seq_2.len() + 1];

    for &residue in seq_1 {
        fill_row(&prev, &mut curr, residue, seq_2, scheme, |_, _| {});
        std::mem::swap(&mut prev, &mut curr);
    }
    prev
}

pub(crate) fn full_linear(seq_1: &[u8], seq_2: &[u8], scheme: &ScoringScheme) -> (Trace, Score) {
    let seq_1_length = seq_1.len();
    let seq_2_length = seq_2.len();

    let mut pointers: TraceMatrix<Option<TraceStep>> = TraceMatrix::new(seq_1_length, seq_2_length);
    for seq_2_idx in 1..=seq_2_length {
        pointers.set(0, seq_2_idx, Some(TraceStep::Left));
    }

    let mut prev = first_row(seq_2_length, scheme);
    let mut curr = vec![0; seq_2_length + 1];

    for (seq_1_idx, &residue) in (1..=seq_1_length).zip(seq_1) {
        fill_row(&prev, &mut curr, residue, seq_2, scheme, |seq_2_idx, step| {
            pointers.set(seq_1_idx, seq_2_idx, Some(step))
        });
        std::mem::swap(&mut prev, &mut curr);
    }

    (
        backtrace(&pointers, seq_1_length, seq_2_length),
        prev[seq_2_length],
    )
}

/// Linear-gap global DP restricted to |i - j| <= `band_width`.
///
/// Scores are kept in two sliding windows of 2 * `band_width` + 1 cells, where
/// window offset k of row i holds column i + k - `band_width`. Moving to the
/// previous row shifts the offset: (i-1, j-1) is at k, (i-1, j) at k + 1.
fn banded_linear(
    seq_1: &[u8],
    seq_2: &[u8],
    scheme: &ScoringScheme,
    band_width: usize,
) -> (Trace, Score) {
    let seq_1_length = seq_1.len();
    let seq_2_length = seq_2.len();
    let window_width = BandedTraceMatrix::<Option<TraceStep>>::window_width(band_width);
    let gap = scheme.gap();

    let mut pointers: BandedTraceMatrix<Option<TraceStep>> =
        BandedTraceMatrix::new(seq_1_length, band_width);

    let mut prev = vec![SCORE_FLOOR; window_width];
    let mut curr = vec![SCORE_FLOOR; window_width];

    prev[band_width] = 0;
    for seq_2_idx in 1..=seq_2_length.min(band_width) {
        prev[band_width + seq_2_idx] = score_add(prev[band_width + seq_2_idx - 1], gap);
        pointers.set(0, seq_2_idx, Some(TraceStep::Left));
    }

    for seq_1_idx in 1..=seq_1_length {
        curr.fill(SCORE_FLOOR);
        let residue = seq_1[seq_1_idx - 1];
        let first_col = seq_1_idx.saturating_sub(band_width);
        let last_col = (seq_1_idx + band_width).min(seq_2_length);

        for seq_2_idx in first_col..=last_col {
            let k = seq_2_idx + band_width - seq_1_idx;

            if seq_2_idx == 0 {
                curr[k] = score_add(prev[k + 1], gap);
                pointers.set(seq_1_idx, 0, Some(TraceStep::Up));
                continue;
            }

            let diag_score = score_add(prev[k], scheme.pair_score(residue, seq_2[seq_2_idx - 1]));
            let up_score = prev
                .get(k + 1)
                .map_or(SCORE_FLOOR, |&score| score_add(score, gap));
            let left_score = if k > 0 {
                score_add(curr[k - 1], gap)
            } else {
                SCORE_FLOOR
            };

            let (score, step) = best_step(diag_score, up_score, left_score);
            curr[k] = score;
            pointers.set(seq_1_idx, seq_2_idx, Some(step));
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    let score = prev[seq_2_length + band_width - seq_1_length];
    (backtrace(&pointers, seq_1_length, seq_2_length), score)
}

/// Follow stored backpointers from (`seq_1_length`, `seq_2_length`) back to the origin.
fn backtrace(
    pointers: &impl TraceGrid<Option<TraceStep>>,
    seq_1_length: usize,
    seq_2_length: usize,
) -> Trace {
    let mut trace = Trace::with_capacity(seq_1_length + seq_2_length);
    let mut seq_1_idx = seq_1_length;
    let mut seq_2_idx = seq_2_length;

    while seq_1_idx > 0 || seq_2_idx > 0 {
        let step = if seq_1_idx == 0 {
            TraceStep::Left
        } else if seq_2_idx == 0 {
            TraceStep::Up
        } else {
            // every reachable interior cell was written during the fill
            pointers
                .get(seq_1_idx, seq_2_idx)
                .unwrap_or(TraceStep::Diagonal)
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
    trace
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet::strip_gaps;
    use assert2::{assert, check};

    fn global(seq_1: &str, seq_2: &str) -> anyhow::Result<Alignment> {
        Ok(needleman_wunsch(
            seq_1.as_bytes(),
            seq_2.as_bytes(),
            &ScoringScheme::default(),
            &GlobalParams::default(),
        )?)
    }

    fn assert_round_trip(ali: &Alignment, seq_1: &str, seq_2: &str) {
        check!(ali.seq_1_aligned.len() == ali.seq_2_aligned.len());
        check!(strip_gaps(ali.seq_1_aligned.as_bytes()) == seq_1.as_bytes());
        check!(strip_gaps(ali.seq_2_aligned.as_bytes()) == seq_2.as_bytes());
    }

    #[test]
    fn test_scenario_gap_in_first() -> anyhow::Result<()> {
        let ali = global("AGC", "ACGC")?;
        check!(ali.seq_1_aligned == "A-GC");
        check!(ali.seq_2_aligned == "ACGC");
        check!(ali.score == 1);
        Ok(())
    }

    #[test]
    fn test_scenario_identical() -> anyhow::Result<()> {
        let ali = global("AA", "AA")?;
        check!(ali.seq_1_aligned == "AA");
        check!(ali.seq_2_aligned == "AA");
        check!(ali.score == 2);
        Ok(())
    }

    #[test]
    fn test_scenario_empty_second() -> anyhow::Result<()> {
        let ali = global("A", "")?;
        check!(ali.seq_1_aligned == "A");
        check!(ali.seq_2_aligned == "-");
        check!(ali.score == -2);

        let ali = global("", "")?;
        check!(ali.is_empty());
        check!(ali.score == 0);
        Ok(())
    }

    #[test]
    fn test_self_alignment() -> anyhow::Result<()> {
        let seq = "GATTACAGATTACACCGT";
        let ali = global(seq, seq)?;
        check!(ali.score == seq.len() as Score);
        check!(!ali.seq_1_aligned.contains('-'));
        check!(!ali.seq_2_aligned.contains('-'));
        Ok(())
    }

    #[test]
    fn test_lowercase_input_is_normalized() -> anyhow::Result<()> {
        let ali = global("agc", "ACGC")?;
        check!(ali.seq_1_aligned == "A-GC");
        Ok(())
    }

    #[test]
    fn test_round_trip() -> anyhow::Result<()> {
        let pairs = [
            ("GATTACA", "GCATGCU"),
            ("ACGTTGCA", "TG"),
            ("T", "AAAAT"),
            ("MKVLAAGIVG", "MKVAGGIV"),
        ];
        for (seq_1, seq_2) in pairs {
            let ali = global(seq_1, seq_2)?;
            assert_round_trip(&ali, seq_1, seq_2);
        }
        Ok(())
    }

    #[test]
    fn test_matrix_scoring() -> anyhow::Result<()> {
        let scheme = ScoringScheme::new(0, 0, 0)
            .with_matrix(crate::matrices::SubstitutionMatrix::named("BLOSUM62")?);
        let ali = needleman_wunsch(b"IL", b"IM", &scheme, &GlobalParams::default())?;
        check!(ali.score > 0);
        Ok(())
    }

    #[test]
    fn test_last_row_matches_full() {
        let scheme = ScoringScheme::default();
        let row = last_row_scores(b"GATTACA", b"GCATGCU", &scheme);
        let (_, score) = full_linear(b"GATTACA", b"GCATGCU", &scheme);
        check!(row.len() == 8);
        check!(row[7] == score);
        check!(last_row_scores(b"", b"ACG", &scheme) == vec![0, -2, -4, -6]);
    }

    #[test]
    fn test_wide_band_matches_full() -> anyhow::Result<()> {
        let seq_1 = "ACGTTGACCTAGGA";
        let seq_2 = "ACGTGACCTTAGA";
        let full = global(seq_1, seq_2)?;
        let banded = needleman_wunsch(
            seq_1.as_bytes(),
            seq_2.as_bytes(),
            &ScoringScheme::default(),
            &GlobalParams::banded(seq_1.len().max(seq_2.len())),
        )?;
        check!(banded == full);
        Ok(())
    }

    #[test]
    fn test_narrow_band_matches_full_on_near_diagonal_path() -> anyhow::Result<()> {
        let seq_1 = "ACGTTGACCTAGGAACGT";
        let seq_2 = "ACGTGACCTTAGGAACGT";
        let scheme = ScoringScheme::default();
        let full = global(seq_1, seq_2)?;

        let (trace, score) = banded_linear(seq_1.as_bytes(), seq_2.as_bytes(), &scheme, 3);
        check!(score == full.score);
        check!(trace.score(seq_1.as_bytes(), seq_2.as_bytes(), &scheme) == score);
        check!(trace.seq_1_length() == seq_1.len());
        check!(trace.seq_2_length() == seq_2.len());
        Ok(())
    }

    #[test]
    fn test_band_never_beats_full() -> anyhow::Result<()> {
        let seq_1 = "AAAAAAAACGTCGTCGT";
        let seq_2 = "CGTCGTCGTAAAAAAAA";
        let full = global(seq_1, seq_2)?;
        let banded = needleman_wunsch(
            seq_1.as_bytes(),
            seq_2.as_bytes(),
            &ScoringScheme::default(),
            &GlobalParams::banded(1),
        )?;
        check!(banded.score <= full.score);
        assert_round_trip(&banded, seq_1, seq_2);
        Ok(())
    }

    #[test]
    fn test_band_is_widened_to_reach_terminal_cell() -> anyhow::Result<()> {
        let ali = needleman_wunsch(
            b"ACGTACGTAC",
            b"ACG",
            &ScoringScheme::default(),
            &GlobalParams::banded(0),
        )?;
        assert_round_trip(&ali, "ACGTACGTAC", "ACG");
        Ok(())
    }

    #[test]
    fn test_band_with_affine_is_rejected() {
        let scheme = ScoringScheme::default().with_affine(-4, -1);
        let result = needleman_wunsch(b"ACGT", b"AGT", &scheme, &GlobalParams::banded(2));
        assert!(let Err(AlignError::IncompatibleOptions(_)) = result);
    }

    #[test]
    fn test_too_long() {
        let params = GlobalParams {
            band_width: None,
            limits: AlignLimits {
                max_sequence_length: 4,
                ..Default::default()
            },
        };
        let result = needleman_wunsch(b"ACGTA", b"A", &ScoringScheme::default(), &params);
        assert!(let Err(AlignError::SequenceTooLong { length: 5, limit: 4 }) = result);
    }

    #[test]
    fn test_non_ascii_rejected() {
        let params = GlobalParams::default();
        let scheme = ScoringScheme::default();
        let result = needleman_wunsch(b"\xffA", b"A", &scheme, &params);
        assert!(let Err(AlignError::NonAsciiSymbol { byte: 0xff, position: 0 }) = result);

        // a two-byte symbol would otherwise become two columns
        let result = needleman_wunsch(b"A", "\u{c9}A".as_bytes(), &scheme, &params);
        assert!(let Err(AlignError::NonAsciiSymbol { position: 0, .. }) = result);
    }

    #[test]
    fn test_extreme_scores_are_clamped() -> anyhow::Result<()> {
        let scheme = ScoringScheme::new(i32::MIN, i32::MIN, i32::MIN);
        let ali = needleman_wunsch(b"ACGT", b"TGCA", &scheme, &GlobalParams::default())?;
        check!(ali.score >= SCORE_FLOOR);
        assert_round_trip(&ali, "ACGT", "TGCA");
        Ok(())
    }
}
