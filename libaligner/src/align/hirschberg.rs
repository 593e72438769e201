use log::trace;

use crate::align::needleman_wunsch::{full_linear, last_row_scores};
use crate::align::scoring::{score_add, Score, ScoringScheme};
use crate::align::structs::{Alignment, Trace};
use crate::alphabet::uppercase;
use crate::error::AlignError;
use crate::util::VecMath;

/// Subproblems with at least this many DP cells split their halves across rayon workers.
const PARALLEL_CELL_THRESHOLD: usize = 1 << 20;

/// Globally align two sequences in linear space with Hirschberg's algorithm.
///
/// The result has the same score as `needleman_wunsch` under the same
/// linear gap scheme, but has no length ceiling.
pub fn hirschberg(
    seq_1: &[u8],
    seq_2: &[u8],
    scheme: &ScoringScheme,
) -> Result<Alignment, AlignError> {
    if scheme.affine.is_some() {
        return Err(AlignError::IncompatibleOptions(
            "the linear-space aligner only supports linear gap costs",
        ));
    }

    let seq_1 = uppercase(seq_1)?;
    let seq_2 = uppercase(seq_2)?;

    let trace = hirschberg_trace(&seq_1, &seq_2, scheme);
    let score = trace.score(&seq_1, &seq_2, scheme);
    Ok(Alignment::from_trace(&trace, &seq_1, &seq_2, 0, 0, score))
}

/// The column of seq 2 where an optimal path crosses row `mid` of seq 1.
fn split_point(seq_1: &[u8], seq_2: &[u8], mid: usize, scheme: &ScoringScheme) -> usize {
    let forward = last_row_scores(&seq_1[..mid], seq_2, scheme);

    let seq_1_suffix_rev: Vec<u8> = seq_1[mid..].iter().rev().copied().collect();
    let seq_2_rev: Vec<u8> = seq_2.iter().rev().copied().collect();
    let mut backward = last_row_scores(&seq_1_suffix_rev, &seq_2_rev, scheme);
    backward.reverse();

    let totals: Vec<Score> = forward
        .iter()
        .zip(&backward)
        .map(|(&f, &b)| score_add(f, b))
        .collect();

    totals.argmax().unwrap_or(0)
}

pub(crate) fn hirschberg_trace(seq_1: &[u8], seq_2: &[u8], scheme: &ScoringScheme) -> Trace {
    let seq_1_length = seq_1.len();
    let seq_2_length = seq_2.len();

    if seq_1_length == 0 || seq_2_length == 0 {
        return Trace::all_gaps(seq_1_length, seq_2_length);
    }
    if seq_1_length == 1 || seq_2_length == 1 {
        return full_linear(seq_1, seq_2, scheme).0;
    }

    let mid = seq_1_length / 2;
    let split = split_point(seq_1, seq_2, mid, scheme);
    trace!("split ({seq_1_length}, {seq_2_length}) at ({mid}, {split})");

    let (seq_1_head, seq_1_tail) = seq_1.split_at(mid);
    let (seq_2_head, seq_2_tail) = seq_2.split_at(split);

    let (mut head, tail) = if seq_1_length * seq_2_length >= PARALLEL_CELL_THRESHOLD {
        rayon::join(
            || hirschberg_trace(seq_1_head, seq_2_head, scheme),
            || hirschberg_trace(seq_1_tail, seq_2_tail, scheme),
        )
    } else {
        (
            hirschberg_trace(seq_1_head, seq_2_head, scheme),
            hirschberg_trace(seq_1_tail, seq_2_tail, scheme),
        )
    };

    head.append(tail);
    head
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::align::needleman_wunsch::{needleman_wunsch, GlobalParams};
    use crate::alphabet::strip_gaps;
    use crate::config::AlignLimits;
    use assert2::{assert, check};
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg64;

    fn random_dna(rng: &mut Pcg64, length: usize) -> Vec<u8> {
        (0..length).map(|_| b"ACGT"[rng.gen_range(0..4)]).collect()
    }

    #[test]
    fn test_scores_match_quadratic() -> anyhow::Result<()> {
        let scheme = ScoringScheme::default();
        let pairs: [(&[u8], &[u8]); 5] = [
            (b"AGC", b"ACGC"),
            (b"GATTACA", b"GCATGCU"),
            (b"A", b"TTTTTATTT"),
            (b"ACGTACGTACGT", b"TG"),
            (b"AA", b"AA"),
        ];

        for (seq_1, seq_2) in pairs {
            let linear = hirschberg(seq_1, seq_2, &scheme)?;
            let quadratic = needleman_wunsch(seq_1, seq_2, &scheme, &GlobalParams::default())?;
            check!(linear.score == quadratic.score);
            check!(strip_gaps(linear.seq_1_aligned.as_bytes()) == seq_1);
            check!(strip_gaps(linear.seq_2_aligned.as_bytes()) == seq_2);
        }
        Ok(())
    }

    #[test]
    fn test_random_scores_match_quadratic() -> anyhow::Result<()> {
        let mut rng = Pcg64::seed_from_u64(0);
        let scheme = ScoringScheme::new(2, -1, -2);

        for _ in 0..20 {
            let length_1 = rng.gen_range(0..60);
            let length_2 = rng.gen_range(0..60);
            let seq_1 = random_dna(&mut rng, length_1);
            let seq_2 = random_dna(&mut rng, length_2);

            let linear = hirschberg(&seq_1, &seq_2, &scheme)?;
            let quadratic = needleman_wunsch(&seq_1, &seq_2, &scheme, &GlobalParams::default())?;
            check!(linear.score == quadratic.score);
            check!(linear.seq_1_aligned.len() == linear.seq_2_aligned.len());
        }
        Ok(())
    }

    #[test]
    fn test_ignores_length_ceiling() -> anyhow::Result<()> {
        let mut rng = Pcg64::seed_from_u64(7);
        let length = AlignLimits::default().max_sequence_length + 1;
        let seq_1 = random_dna(&mut rng, length);
        let mut seq_2 = seq_1.clone();
        seq_2.remove(length / 2);

        let ali = hirschberg(&seq_1, &seq_2, &ScoringScheme::default())?;
        check!(ali.score == (length as Score - 1) - 2);
        Ok(())
    }

    #[test]
    fn test_empty_inputs() -> anyhow::Result<()> {
        let ali = hirschberg(b"ACG", b"", &ScoringScheme::default())?;
        check!(ali.seq_1_aligned == "ACG");
        check!(ali.seq_2_aligned == "---");
        check!(ali.score == -6);
        Ok(())
    }

    #[test]
    fn test_affine_is_rejected() {
        let scheme = ScoringScheme::default().with_affine(-5, -1);
        assert!(let Err(AlignError::IncompatibleOptions(_)) = hirschberg(b"AC", b"AG", &scheme));
    }
}
