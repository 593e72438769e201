use std::fmt::{Display, Formatter};

use crate::align::scoring::{score_add, Score, ScoringScheme};
use crate::alphabet::GAP;

/// One column of a pairwise alignment, named after the
/// direction the backtrace moves through the DP matrix.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TraceStep {
    /// seq 1 and seq 2 both consume a symbol
    Diagonal,
    /// seq 1 consumes a symbol against a gap
    Up,
    /// seq 2 consumes a symbol against a gap
    Left,
}

impl TraceStep {
    fn as_char(&self) -> char {
        match self {
            TraceStep::Diagonal => 'D',
            TraceStep::Up => 'U',
            TraceStep::Left => 'L',
        }
    }
}

/// Pick the best of the three linear-gap moves into a cell.
///
/// Ties resolve diagonal > up > left, so equal-scoring optima
/// always produce the same alignment.
#[inline(always)]
pub fn best_step(diag: Score, up: Score, left: Score) -> (Score, TraceStep) {
    if diag >= up && diag >= left {
        (diag, TraceStep::Diagonal)
    } else if up >= left {
        (up, TraceStep::Up)
    } else {
        (left, TraceStep::Left)
    }
}

/// An ordered list of alignment columns, first column first.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct Trace {
    pub steps: Vec<TraceStep>,
}

impl Trace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            steps: Vec::with_capacity(capacity),
        }
    }

    /// A trace that aligns `seq_1_length` symbols of seq 1 against
    /// nothing, followed by `seq_2_length` symbols of seq 2 against nothing.
    pub fn all_gaps(seq_1_length: usize, seq_2_length: usize) -> Self {
        let mut trace = Self::with_capacity(seq_1_length + seq_2_length);
        trace.push_many(TraceStep::Up, seq_1_length);
        trace.push_many(TraceStep::Left, seq_2_length);
        trace
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn push(&mut self, step: TraceStep) {
        self.steps.push(step);
    }

    pub fn push_many(&mut self, step: TraceStep, count: usize) {
        self.steps.extend(std::iter::repeat(step).take(count));
    }

    pub fn append(&mut self, other: Trace) {
        self.steps.extend(other.steps);
    }

    /// Backtraces are collected from the last column to the first.
    pub fn reverse(&mut self) {
        self.steps.reverse();
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TraceStep> {
        self.steps.iter()
    }

    /// The number of seq 1 symbols this trace consumes.
    pub fn seq_1_length(&self) -> usize {
        self.iter().filter(|s| **s != TraceStep::Left).count()
    }

    /// The number of seq 2 symbols this trace consumes.
    pub fn seq_2_length(&self) -> usize {
        self.iter().filter(|s| **s != TraceStep::Up).count()
    }

    /// Remove gap columns from both ends of the trace.
    ///
    /// Returns how many (seq 1, seq 2) symbols the leading gap columns consumed,
    /// and the total number of gap columns removed.
    pub fn trim_gap_ends(&mut self) -> ((usize, usize), usize) {
        let first_diagonal = self.iter().position(|s| *s == TraceStep::Diagonal);

        let Some(first_diagonal) = first_diagonal else {
            let removed = self.len();
            let leading = (self.seq_1_length(), self.seq_2_length());
            self.steps.clear();
            return (leading, removed);
        };

        let prefix = &self.steps[..first_diagonal];
        let leading = (
            prefix.iter().filter(|s| **s == TraceStep::Up).count(),
            prefix.iter().filter(|s| **s == TraceStep::Left).count(),
        );

        let last_diagonal = self
            .iter()
            .rposition(|s| *s == TraceStep::Diagonal)
            .unwrap_or(first_diagonal);

        let removed = first_diagonal + (self.len() - last_diagonal - 1);
        self.steps.truncate(last_diagonal + 1);
        self.steps.drain(..first_diagonal);
        (leading, removed)
    }

    /// Render the two aligned rows described by this trace.
    pub fn render(&self, seq_1: &[u8], seq_2: &[u8]) -> (Vec<u8>, Vec<u8>) {
        let mut top = Vec::with_capacity(self.len());
        let mut bottom = Vec::with_capacity(self.len());
        let mut seq_1_idx = 0;
        let mut seq_2_idx = 0;

        for step in self.iter() {
            match step {
                TraceStep::Diagonal => {
                    top.push(seq_1[seq_1_idx]);
                    bottom.push(seq_2[seq_2_idx]);
                    seq_1_idx += 1;
                    seq_2_idx += 1;
                }
                TraceStep::Up => {
                    top.push(seq_1[seq_1_idx]);
                    bottom.push(GAP);
                    seq_1_idx += 1;
                }
                TraceStep::Left => {
                    top.push(GAP);
                    bottom.push(seq_2[seq_2_idx]);
                    seq_2_idx += 1;
                }
            }
        }
        (top, bottom)
    }

    /// Recompute the score of this trace under a scoring scheme,
    /// honoring affine gap costs when the scheme has them.
    pub fn score(&self, seq_1: &[u8], seq_2: &[u8], scheme: &ScoringScheme) -> Score {
        let mut score = 0;
        let mut seq_1_idx = 0;
        let mut seq_2_idx = 0;
        let mut previous: Option<TraceStep> = None;

        for &step in self.iter() {
            let gap_score = |continues_run: bool| match scheme.affine {
                Some(affine) if continues_run => affine.extend as Score,
                Some(affine) => affine.open as Score,
                None => scheme.gap(),
            };

            let column_score = match step {
                TraceStep::Diagonal => {
                    let pair = scheme.pair_score(seq_1[seq_1_idx], seq_2[seq_2_idx]);
                    seq_1_idx += 1;
                    seq_2_idx += 1;
                    pair
                }
                TraceStep::Up => {
                    seq_1_idx += 1;
                    gap_score(previous == Some(TraceStep::Up))
                }
                TraceStep::Left => {
                    seq_2_idx += 1;
                    gap_score(previous == Some(TraceStep::Left))
                }
            };
            score = score_add(score, column_score);
            previous = Some(step);
        }
        score
    }
}

impl Display for Trace {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for step in self.iter() {
            write!(f, "{}", step.as_char())?;
        }
        Ok(())
    }
}
