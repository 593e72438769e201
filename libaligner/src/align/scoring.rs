use serde::{Deserialize, Serialize};

use crate::matrices::SubstitutionMatrix;

/// Alignment scores are accumulated as wide integers so long sequences can't overflow.
pub type Score = i64;

/// The value of an unreachable dynamic programming cell.
///
/// Anything that saturates or falls below this is clamped back to it,
/// so scores never wrap around and stay comparable.
pub const SCORE_FLOOR: Score = i64::MIN / 4;

/// Add two scores, clamping the result at `SCORE_FLOOR`.
#[inline(always)]
pub fn score_add(a: Score, b: Score) -> Score {
    a.saturating_add(b).max(SCORE_FLOOR)
}

/// Affine gap costs: the first position of a gap run scores `open`,
/// every following position in the same run scores `extend`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AffineGap {
    pub open: i32,
    pub extend: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringScheme {
    pub match_score: i32,
    pub mismatch_score: i32,
    /// The score of every gap position under linear gap costs
    pub gap_penalty: i32,
    pub affine: Option<AffineGap>,
    pub matrix: Option<SubstitutionMatrix>,
}

impl Default for ScoringScheme {
    fn default() -> Self {
        Self {
            match_score: 1,
            mismatch_score: -1,
            gap_penalty: -2,
            affine: None,
            matrix: None,
        }
    }
}

impl ScoringScheme {
    pub fn new(match_score: i32, mismatch_score: i32, gap_penalty: i32) -> Self {
        Self {
            match_score,
            mismatch_score,
            gap_penalty,
            ..Default::default()
        }
    }

    pub fn with_affine(mut self, open: i32, extend: i32) -> Self {
        self.affine = Some(AffineGap { open, extend });
        self
    }

    pub fn with_matrix(mut self, matrix: SubstitutionMatrix) -> Self {
        self.matrix = Some(matrix);
        self
    }

    /// A copy of this scheme that only uses linear gap costs.
    pub fn linear(&self) -> Self {
        Self {
            affine: None,
            ..self.clone()
        }
    }

    /// Score one aligned symbol pair.
    #[inline]
    pub fn pair_score(&self, a: u8, b: u8) -> Score {
        let score = match &self.matrix {
            Some(matrix) => matrix.get(a, b).unwrap_or(self.mismatch_score),
            None if a == b => self.match_score,
            None => self.mismatch_score,
        };
        score as Score
    }

    #[inline]
    pub fn gap(&self) -> Score {
        self.gap_penalty as Score
    }

    /// The score of a single uninterrupted gap run of `length` positions.
    pub fn gap_run(&self, length: usize) -> Score {
        if length == 0 {
            return 0;
        }
        match self.affine {
            Some(AffineGap { open, extend }) => {
                score_add(open as Score, (extend as Score).saturating_mul(length as Score - 1))
            }
            None => self.gap().saturating_mul(length as Score).max(SCORE_FLOOR),
        }
    }

    /// The score of aligning a sequence against an identical copy of itself.
    pub fn self_score(&self, seq: &[u8]) -> Score {
        seq.iter()
            .fold(0, |acc, &symbol| score_add(acc, self.pair_score(symbol, symbol)))
    }
}
