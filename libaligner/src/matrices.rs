use std::collections::HashMap;
use std::str::FromStr;

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use strum::EnumString;

use crate::alphabet::{BLOSUM_ALPHABET, UTF8_TO_BLOSUM_IDX};
use crate::error::AlignError;

/// The substitution matrices that ship with the library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum MatrixName {
    #[strum(serialize = "BLOSUM62")]
    Blosum62,
}

/// A symmetric mapping from an (uppercase) symbol pair to an integer score.
///
/// Pairs that are absent from the mapping are scored by the
/// caller's mismatch fallback, so unknown symbols are tolerated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubstitutionMatrix {
    scores: HashMap<(u8, u8), i32>,
}

impl SubstitutionMatrix {
    /// Build a matrix from pair scores; each pair is stored in both orders.
    pub fn from_pairs(pairs: impl IntoIterator<Item = ((u8, u8), i32)>) -> Self {
        let mut scores = HashMap::new();
        for ((a, b), score) in pairs {
            let a = a.to_ascii_uppercase();
            let b = b.to_ascii_uppercase();
            scores.insert((a, b), score);
            scores.insert((b, a), score);
        }
        Self { scores }
    }

    pub fn from_name(name: MatrixName) -> Self {
        match name {
            MatrixName::Blosum62 => BLOSUM_62.clone(),
        }
    }

    /// Look up a built-in matrix by name, e.g. "BLOSUM62" or "blosum62".
    pub fn named(name: &str) -> Result<Self, AlignError> {
        MatrixName::from_str(name)
            .map(Self::from_name)
            .map_err(|_| AlignError::UnknownMatrix(name.to_string()))
    }

    #[inline]
    pub fn get(&self, a: u8, b: u8) -> Option<i32> {
        self.scores.get(&(a, b)).copied()
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

// NCBI BLOSUM62, rows and columns in BLOSUM_ALPHABET order
#[rustfmt::skip]
const BLOSUM_62_TABLE: [[i32; 24]; 24] = [
    //A   R   N   D   C   Q   E   G   H   I   L   K   M   F   P   S   T   W   Y   V   B   Z   X   *
    [ 4, -1, -2, -2,  0, -1, -1,  0, -2, -1, -1, -1, -1, -2, -1,  1,  0, -3, -2,  0, -2, -1,  0, -4], // A
    [-1,  5,  0, -2, -3,  1,  0, -2,  0, -3, -2,  2, -1, -3, -2, -1, -1, -3, -2, -3, -1,  0, -1, -4], // R
    [-2,  0,  6,  1, -3,  0,  0,  0,  1, -3, -3,  0, -2, -3, -2,  1,  0, -4, -2, -3,  3,  0, -1, -4], // N
    [-2, -2,  1,  6, -3,  0,  2, -1, -1, -3, -4, -1, -3, -3, -1,  0, -1, -4, -3, -3,  4,  1, -1, -4], // D
    [ 0, -3, -3, -3,  9, -3, -4, -3, -3, -1, -1, -3, -1, -2, -3, -1, -1, -2, -2, -1, -3, -3, -2, -4], // C
    [-1,  1,  0,  0, -3,  5,  2, -2,  0, -3, -2,  1,  0, -3, -1,  0, -1, -2, -1, -2,  0,  3, -1, -4], // Q
    [-1,  0,  0,  2, -4,  2,  5, -2,  0, -3, -3,  1, -2, -3, -1,  0, -1, -3, -2, -2,  1,  4, -1, -4], // E
    [ 0, -2,  0, -1, -3, -2, -2,  6, -2, -4, -4, -2, -3, -3, -2,  0, -2, -2, -3, -3, -1, -2, -1, -4], // G
    [-2,  0,  1, -1, -3,  0,  0, -2,  8, -3, -3, -1, -2, -1, -2, -1, -2, -2,  2, -3,  0,  0, -1, -4], // H
    [-1, -3, -3, -3, -1, -3, -3, -4, -3,  4,  2, -3,  1,  0, -3, -2, -1, -3, -1,  3, -3, -3, -1, -4], // I
    [-1, -2, -3, -4, -1, -2, -3, -4, -3,  2,  4, -2,  2,  0, -3, -2, -1, -2, -1,  1, -4, -3, -1, -4], // L
    [-1,  2,  0, -1, -3,  1,  1, -2, -1, -3, -2,  5, -1, -3, -1,  0, -1, -3, -2, -2,  0,  1, -1, -4], // K
    [-1, -1, -2, -3, -1,  0, -2, -3, -2,  1,  2, -1,  5,  0, -2, -1, -1, -1, -1,  1, -3, -1, -1, -4], // M
    [-2, -3, -3, -3, -2, -3, -3, -3, -1,  0,  0, -3,  0,  6, -4, -2, -2,  1,  3, -1, -3, -3, -1, -4], // F
    [-1, -2, -2, -1, -3, -1, -1, -2, -2, -3, -3, -1, -2, -4,  7, -1, -1, -4, -3, -2, -2, -1, -2, -4], // P
    [ 1, -1,  1,  0, -1,  0,  0,  0, -1, -2, -2,  0, -1, -2, -1,  4,  1, -3, -2, -2,  0,  0,  0, -4], // S
    [ 0, -1,  0, -1, -1, -1, -1, -2, -2, -1, -1, -1, -1, -2, -1,  1,  5, -2, -2,  0, -1, -1,  0, -4], // T
    [-3, -3, -4, -4, -2, -2, -3, -2, -2, -3, -2, -3, -1,  1, -4, -3, -2, 11,  2, -3, -4, -3, -2, -4], // W
    [-2, -2, -2, -3, -2, -1, -2, -3,  2, -1, -1, -2, -1,  3, -3, -2, -2,  2,  7, -1, -3, -2, -1, -4], // Y
    [ 0, -3, -3, -3, -1, -2, -2, -3, -3,  3,  1, -2,  1, -1, -2, -2,  0, -3, -1,  4, -3, -2, -1, -4], // V
    [-2, -1,  3,  4, -3,  0,  1, -1,  0, -3, -4,  0, -3, -3, -2,  0, -1, -4, -3, -3,  4,  1, -1, -4], // B
    [-1,  0,  0,  1, -3,  3,  4, -2,  0, -3, -3,  1, -1, -3, -1,  0, -1, -3, -2, -2,  1,  4, -1, -4], // Z
    [ 0, -1, -1, -1, -2, -1, -1, -1, -1, -1, -1, -1, -1, -1, -2,  0,  0, -2, -1, -1, -1, -1, -1, -4], // X
    [-4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4,  1], // *
];

lazy_static! {
    static ref BLOSUM_62: SubstitutionMatrix = {
        let mut pairs = vec![];
        for a in BLOSUM_ALPHABET {
            for b in BLOSUM_ALPHABET {
                let row = UTF8_TO_BLOSUM_IDX[&a];
                let col = UTF8_TO_BLOSUM_IDX[&b];
                pairs.push(((a, b), BLOSUM_62_TABLE[row][col]));
            }
        }
        SubstitutionMatrix::from_pairs(pairs)
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::{assert, check};

    #[test]
    fn test_blosum_62_is_symmetric() {
        for (row, scores) in BLOSUM_62_TABLE.iter().enumerate() {
            for (col, score) in scores.iter().enumerate() {
                check!(*score == BLOSUM_62_TABLE[col][row]);
            }
        }
    }

    #[test]
    fn test_named_lookup() -> anyhow::Result<()> {
        let matrix = SubstitutionMatrix::named("blosum62")?;
        check!(matrix.len() == 24 * 24);
        check!(matrix.get(b'W', b'W') == Some(11));
        check!(matrix.get(b'I', b'L') == Some(2));
        check!(matrix.get(b'L', b'I') == Some(2));
        check!(matrix.get(b'U', b'A') == None);
        Ok(())
    }

    #[test]
    fn test_unknown_name() {
        let result = SubstitutionMatrix::named("PAM1000");
        assert!(let Err(AlignError::UnknownMatrix(_)) = result);
    }

    #[test]
    fn test_from_pairs_is_symmetric() {
        let matrix = SubstitutionMatrix::from_pairs([((b'a', b'c'), 3)]);
        check!(matrix.get(b'A', b'C') == Some(3));
        check!(matrix.get(b'C', b'A') == Some(3));
    }
}
