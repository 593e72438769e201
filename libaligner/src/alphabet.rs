use std::borrow::Cow;

use phf::phf_map;

use crate::error::AlignError;

pub const UTF8_SPACE: u8 = 32;
pub const UTF8_STAR: u8 = 42;
pub const UTF8_DASH: u8 = 45;
pub const UTF8_PIPE: u8 = 124;

/// The gap marker used in every aligned row
pub const GAP: u8 = UTF8_DASH;

/// The symbol order of the BLOSUM family of matrices
pub const BLOSUM_ALPHABET: [u8; 24] = *b"ARNDCQEGHILKMFPSTWYVBZX*";

/// maps from \<UTF8 symbol\> -> \<row/column in a BLOSUM table\>
pub const UTF8_TO_BLOSUM_IDX: phf::Map<u8, usize> = phf_map! {
    65u8 => 0,    // A
    82u8 => 1,    // R
    78u8 => 2,    // N
    68u8 => 3,    // D
    67u8 => 4,    // C
    81u8 => 5,    // Q
    69u8 => 6,    // E
    71u8 => 7,    // G
    72u8 => 8,    // H
    73u8 => 9,    // I
    76u8 => 10,   // L
    75u8 => 11,   // K
    77u8 => 12,   // M
    70u8 => 13,   // F
    80u8 => 14,   // P
    83u8 => 15,   // S
    84u8 => 16,   // T
    87u8 => 17,   // W
    89u8 => 18,   // Y
    86u8 => 19,   // V
    // degenerate characters
    66u8 => 20,   // B
    90u8 => 21,   // Z
    88u8 => 22,   // X
    42u8 => 23,   // *
};

/// Borrow the bytes if they are already uppercase, otherwise produce an uppercased copy.
///
/// Every symbol must be a single ASCII byte so that one byte is one alignment column.
pub fn uppercase(bytes: &[u8]) -> Result<Cow<'_, [u8]>, AlignError> {
    if let Some(position) = bytes.iter().position(|b| !b.is_ascii()) {
        return Err(AlignError::NonAsciiSymbol {
            byte: bytes[position],
            position,
        });
    }

    if bytes.iter().any(|b| b.is_ascii_lowercase()) {
        Ok(Cow::Owned(bytes.to_ascii_uppercase()))
    } else {
        Ok(Cow::Borrowed(bytes))
    }
}

/// Drop every gap marker from an aligned row.
pub fn strip_gaps(row: &[u8]) -> Vec<u8> {
    row.iter().copied().filter(|&b| b != GAP).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::{assert, check};

    #[test]
    fn test_blosum_index_covers_alphabet() {
        for (idx, symbol) in BLOSUM_ALPHABET.iter().enumerate() {
            check!(UTF8_TO_BLOSUM_IDX.get(symbol) == Some(&idx));
        }
    }

    #[test]
    fn test_uppercase_borrows_when_clean() -> anyhow::Result<()> {
        check!(matches!(uppercase(b"ACGT")?, Cow::Borrowed(_)));
        check!(uppercase(b"acGt")?.as_ref() == b"ACGT");
        Ok(())
    }

    #[test]
    fn test_uppercase_rejects_non_ascii() {
        assert!(let Err(AlignError::NonAsciiSymbol { byte: 0xff, position: 1 }) = uppercase(b"A\xffC"));
        assert!(let Err(AlignError::NonAsciiSymbol { byte: 0xc3, position: 0 }) = uppercase("\u{c9}A".as_bytes()));
    }
}
