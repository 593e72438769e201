use std::collections::HashMap;

use log::debug;

use crate::align::scoring::{score_add, Score, ScoringScheme};
use crate::align::smith_waterman::{local_alignment, local_score};
use crate::align::structs::Alignment;
use crate::alphabet::uppercase;
use crate::config::AlignLimits;
use crate::error::AlignError;

/// How far past each side of a seed hit the refinement window reaches.
pub const SEED_WINDOW_FLANK: usize = 50;

/// A seed-and-extend local aligner.
///
/// Every exact k-mer shared by the two sequences is scored by adding the
/// best local scores of the flanks on either side of it. Whenever a hit
/// scores above the best alignment so far, a window of `SEED_WINDOW_FLANK`
/// symbols around it is aligned with Smith-Waterman, and that alignment is
/// kept if it improves on the current best.
///
/// This is a heuristic and may miss the alignment `smith_waterman` finds.
pub fn kmer_seeded_local(
    seq_1: &[u8],
    seq_2: &[u8],
    kmer_length: usize,
    scheme: &ScoringScheme,
    limits: &AlignLimits,
) -> Result<Alignment, AlignError> {
    if kmer_length == 0 {
        return Err(AlignError::IncompatibleOptions("k-mer length must be positive"));
    }
    if scheme.affine.is_some() {
        return Err(AlignError::IncompatibleOptions(
            "affine gap costs are only supported by the global aligner",
        ));
    }
    limits.check_length(seq_1.len())?;
    limits.check_length(seq_2.len())?;

    let seq_1 = uppercase(seq_1)?;
    let seq_2 = uppercase(seq_2)?;

    let mut best = Alignment::empty();
    if seq_1.len() < kmer_length || seq_2.len() < kmer_length {
        return Ok(best);
    }

    let mut kmer_index: HashMap<&[u8], Vec<usize>> = HashMap::new();
    for (start, kmer) in seq_2.windows(kmer_length).enumerate() {
        kmer_index.entry(kmer).or_default().push(start);
    }

    let mut hit_count = 0usize;
    for (seq_1_start, kmer) in seq_1.windows(kmer_length).enumerate() {
        let Some(hits) = kmer_index.get(kmer) else {
            continue;
        };

        for &seq_2_start in hits {
            hit_count += 1;
            let seq_1_end = seq_1_start + kmer_length;
            let seq_2_end = seq_2_start + kmer_length;

            let seq_1_left: Vec<u8> = seq_1[..seq_1_start].iter().rev().copied().collect();
            let seq_2_left: Vec<u8> = seq_2[..seq_2_start].iter().rev().copied().collect();

            let hit_score: Score = [
                scheme.self_score(kmer),
                local_score(&seq_1_left, &seq_2_left, scheme),
                local_score(&seq_1[seq_1_end..], &seq_2[seq_2_end..], scheme),
            ]
            .into_iter()
            .fold(0, score_add);

            if hit_score <= best.score {
                continue;
            }

            let window_1_start = seq_1_start.saturating_sub(SEED_WINDOW_FLANK);
            let window_1_end = (seq_1_end + SEED_WINDOW_FLANK).min(seq_1.len());
            let window_2_start = seq_2_start.saturating_sub(SEED_WINDOW_FLANK);
            let window_2_end = (seq_2_end + SEED_WINDOW_FLANK).min(seq_2.len());

            let refined = local_alignment(
                &seq_1[window_1_start..window_1_end],
                &seq_2[window_2_start..window_2_end],
                scheme,
                window_1_start,
                window_2_start,
            );

            if refined.score > best.score {
                best = refined;
            }
        }
    }

    debug!(
        "{hit_count} {kmer_length}-mer hits, best local score: {}",
        best.score
    );
    Ok(best)
}
