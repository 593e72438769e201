use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_pcg::Pcg64;
use serde::{Deserialize, Serialize};

use crate::alphabet::GAP;

/// How to pick a consensus symbol when several are equally frequent in a column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TieBreak {
    /// The symbol with the lowest byte value
    #[default]
    Lowest,
    /// A uniform random choice from a generator seeded with this value
    Seeded(u64),
}

/// Builds column-wise majority-vote consensus strings.
pub struct ConsensusBuilder {
    rng: Option<Pcg64>,
}

impl ConsensusBuilder {
    pub fn new(tie_break: TieBreak) -> Self {
        Self {
            rng: match tie_break {
                TieBreak::Lowest => None,
                TieBreak::Seeded(seed) => Some(Pcg64::seed_from_u64(seed)),
            },
        }
    }

    /// The consensus of a set of equal-length rows.
    ///
    /// Gaps don't vote; a column of only gaps yields a gap.
    pub fn build(&mut self, rows: &[Vec<u8>]) -> Vec<u8> {
        let width = rows.first().map_or(0, |row| row.len());
        let mut counts = [0usize; 256];
        let mut candidates: Vec<u8> = Vec::with_capacity(4);

        (0..width)
            .map(|col| {
                counts.fill(0);
                rows.iter()
                    .filter_map(|row| row.get(col))
                    .filter(|&&symbol| symbol != GAP)
                    .for_each(|&symbol| counts[symbol as usize] += 1);

                let max_count = counts.iter().copied().max().unwrap_or(0);
                if max_count == 0 {
                    return GAP;
                }

                candidates.clear();
                candidates.extend(
                    (0..=u8::MAX).filter(|&symbol| counts[symbol as usize] == max_count),
                );

                match (&mut self.rng, candidates.len()) {
                    (Some(rng), n) if n > 1 => candidates.choose(rng).copied().unwrap_or(GAP),
                    _ => candidates[0],
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;

    fn rows(rows: &[&str]) -> Vec<Vec<u8>> {
        rows.iter().map(|row| row.as_bytes().to_vec()).collect()
    }

    #[test]
    fn test_majority() {
        let mut builder = ConsensusBuilder::new(TieBreak::Lowest);
        let consensus = builder.build(&rows(&["ACGT", "ACGA", "TCGA"]));
        check!(consensus == b"ACGA");
    }

    #[test]
    fn test_gaps_do_not_vote() {
        let mut builder = ConsensusBuilder::new(TieBreak::Lowest);
        let consensus = builder.build(&rows(&["A--C", "A-GC", "--GC"]));
        check!(consensus == b"A-GC");
    }

    #[test]
    fn test_lowest_tie_break() {
        let mut builder = ConsensusBuilder::new(TieBreak::Lowest);
        check!(builder.build(&rows(&["T", "C", "G"])) == b"C");
    }

    #[test]
    fn test_seeded_tie_break_is_reproducible() {
        let input = rows(&["ACGTACGT", "CATGTGCA", "GTACCATG", "TGCAGTAC"]);
        let first = ConsensusBuilder::new(TieBreak::Seeded(42)).build(&input);
        let second = ConsensusBuilder::new(TieBreak::Seeded(42)).build(&input);
        check!(first == second);
        check!(first.len() == 8);
        // every column is a four-way tie, so each pick is one of the column's symbols
        for (col, symbol) in first.iter().enumerate() {
            check!(input.iter().any(|row| row[col] == *symbol));
        }
    }

    #[test]
    fn test_empty_rows() {
        let mut builder = ConsensusBuilder::new(TieBreak::Lowest);
        check!(builder.build(&[]).is_empty());
    }
}
