use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::align::scoring::Score;
use crate::alphabet::{GAP, UTF8_PIPE, UTF8_SPACE};

use super::Trace;

/// A pairwise alignment: two equal-length rows over the sequence alphabet plus '-'.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alignment {
    /// The aligned row of the first sequence
    pub seq_1_aligned: String,
    /// The aligned row of the second sequence
    pub seq_2_aligned: String,
    /// The score of the alignment under the scheme that produced it
    pub score: Score,
    /// The start coordinate (0-based, inclusive) of seq 1 covered by the alignment
    pub seq_1_start: usize,
    /// The end coordinate (0-based, exclusive) of seq 1 covered by the alignment
    pub seq_1_end: usize,
    /// The start coordinate (0-based, inclusive) of seq 2 covered by the alignment
    pub seq_2_start: usize,
    /// The end coordinate (0-based, exclusive) of seq 2 covered by the alignment
    pub seq_2_end: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AlignmentStats {
    /// The number of alignment columns
    pub length: usize,
    /// The number of columns with identical symbols
    pub identities: usize,
    /// The number of columns with a gap in either row
    pub gaps: usize,
    /// identities / length, or 0 for an empty alignment
    pub identity_fraction: f64,
}

impl Alignment {
    /// Build an alignment from a trace over the given (sub)sequences.
    ///
    /// `seq_1_start` and `seq_2_start` are where those
    /// slices begin in the caller's original sequences.
    pub fn from_trace(
        trace: &Trace,
        seq_1: &[u8],
        seq_2: &[u8],
        seq_1_start: usize,
        seq_2_start: usize,
        score: Score,
    ) -> Self {
        let (top, bottom) = trace.render(seq_1, seq_2);
        Self {
            seq_1_aligned: String::from_utf8_lossy(&top).into_owned(),
            seq_2_aligned: String::from_utf8_lossy(&bottom).into_owned(),
            score,
            seq_1_start,
            seq_1_end: seq_1_start + trace.seq_1_length(),
            seq_2_start,
            seq_2_end: seq_2_start + trace.seq_2_length(),
        }
    }

    /// An alignment with no columns, as produced when no local similarity exists.
    pub fn empty() -> Self {
        Self {
            seq_1_aligned: String::new(),
            seq_2_aligned: String::new(),
            score: 0,
            seq_1_start: 0,
            seq_1_end: 0,
            seq_2_start: 0,
            seq_2_end: 0,
        }
    }

    pub fn length(&self) -> usize {
        self.seq_1_aligned.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seq_1_aligned.is_empty()
    }

    /// The line drawn between the two rows: '|' for identical columns, ' ' otherwise.
    pub fn middle_string(&self) -> String {
        self.columns()
            .map(|(a, b)| {
                if a == b && a != GAP {
                    UTF8_PIPE as char
                } else {
                    UTF8_SPACE as char
                }
            })
            .collect()
    }

    pub fn stats(&self) -> AlignmentStats {
        let length = self.length();
        let (identities, gaps) =
            self.columns()
                .fold((0, 0), |(identities, gaps), (a, b)| match (a, b) {
                    (GAP, _) | (_, GAP) => (identities, gaps + 1),
                    (a, b) if a == b => (identities + 1, gaps),
                    _ => (identities, gaps),
                });

        AlignmentStats {
            length,
            identities,
            gaps,
            identity_fraction: if length == 0 {
                0.0
            } else {
                identities as f64 / length as f64
            },
        }
    }

    fn columns(&self) -> impl Iterator<Item = (u8, u8)> + '_ {
        self.seq_1_aligned
            .bytes()
            .zip(self.seq_2_aligned.bytes())
    }
}

impl Display for Alignment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", self.seq_1_aligned)?;
        writeln!(f, "{}", self.middle_string())?;
        write!(f, "{}", self.seq_2_aligned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::align::structs::TraceStep;
    use assert2::check;

    #[test]
    fn test_from_trace() {
        let trace = Trace {
            steps: vec![TraceStep::Diagonal, TraceStep::Up, TraceStep::Diagonal],
        };
        let ali = Alignment::from_trace(&trace, b"GAC", b"GC", 4, 0, 1);
        check!(ali.seq_1_aligned == "GAC");
        check!(ali.seq_2_aligned == "G-C");
        check!(ali.seq_1_start == 4);
        check!(ali.seq_1_end == 7);
        check!(ali.seq_2_end == 2);
    }

    #[test]
    fn test_stats_and_middle() {
        let ali = Alignment {
            seq_1_aligned: "A-GC".to_string(),
            seq_2_aligned: "ACGA".to_string(),
            score: 0,
            seq_1_start: 0,
            seq_1_end: 3,
            seq_2_start: 0,
            seq_2_end: 4,
        };
        check!(ali.middle_string() == "| | ");
        let stats = ali.stats();
        check!(stats.length == 4);
        check!(stats.identities == 2);
        check!(stats.gaps == 1);
        check!(stats.identity_fraction == 0.5);
        check!(ali.to_string() == "A-GC\n| | \nACGA");
    }

    #[test]
    fn test_empty_stats() {
        let stats = Alignment::empty().stats();
        check!(stats.length == 0);
        check!(stats.identity_fraction == 0.0);
    }
}
