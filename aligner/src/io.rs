use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::Context;
use libaligner::alphabet::{UTF8_SPACE, UTF8_STAR};
use libaligner::structs::Sequence;
use seq_io::fasta::{Reader, Record};
use thiserror::Error;

#[derive(Error, Debug)]
#[error("unknown UTF8 sequence byte: {byte} in sequence: {name}")]
pub struct UnknownUtf8SequenceByteError {
    byte: u8,
    name: String,
}

#[derive(Error, Debug)]
#[error("no sequences found in: {path}")]
pub struct EmptyFastaError {
    path: String,
}

/// Parse every record of a fasta stream into an uppercase `Sequence`.
///
/// The first word of the header is the name and the
/// rest of it becomes the details.
pub fn sequences_from_fasta<R: Read>(reader: R) -> anyhow::Result<Vec<Sequence>> {
    let mut reader = Reader::new(reader);
    let mut seqs: Vec<Sequence> = vec![];

    while let Some(record) = reader.next() {
        let record = record.with_context(|| "failed to read fasta record")?;
        let mut header_bytes = record.head().to_vec();
        let first_space_idx = header_bytes.iter().position(|&b| b == UTF8_SPACE);

        let error_context: fn() -> &'static str =
            || "failed to create String from fasta header bytes";

        let (name, details) = match first_space_idx {
            Some(idx) => {
                let details_bytes = header_bytes.split_off(idx + 1);
                header_bytes.pop();
                (
                    String::from_utf8(header_bytes).with_context(error_context)?,
                    Some(String::from_utf8(details_bytes).with_context(error_context)?),
                )
            }
            None => (
                String::from_utf8(header_bytes).with_context(error_context)?,
                None,
            ),
        };

        let mut utf8_bytes: Vec<u8> = vec![];
        for line in record.seq_lines() {
            for &utf8_byte in line {
                match utf8_byte {
                    b if b.is_ascii_whitespace() => {}
                    b if b.is_ascii_alphabetic() || b == UTF8_STAR => utf8_bytes.push(b),
                    byte => return Err(UnknownUtf8SequenceByteError { byte, name }.into()),
                }
            }
        }

        let mut seq = Sequence::new(name, &utf8_bytes);
        seq.details = details;
        seqs.push(seq);
    }
    Ok(seqs)
}

/// Read the sequences of a fasta file, optionally truncating each one.
///
/// A subsample length of 0 leaves the sequences untouched.
pub fn read_fasta(path: &impl AsRef<Path>, subsample: Option<usize>) -> anyhow::Result<Vec<Sequence>> {
    let path = path.as_ref();
    let file = File::open(path).context(format!(
        "failed to open fasta file: {}",
        path.to_string_lossy()
    ))?;

    let mut seqs = sequences_from_fasta(file)
        .context(format!("failed to parse fasta file: {}", path.to_string_lossy()))?;

    if seqs.is_empty() {
        return Err(EmptyFastaError {
            path: path.to_string_lossy().to_string(),
        }
        .into());
    }

    if let Some(length) = subsample.filter(|&length| length > 0) {
        seqs.iter_mut().for_each(|seq| seq.truncate(length));
    }
    Ok(seqs)
}

/// Read the first record of a fasta file.
pub fn read_first_sequence(
    path: &impl AsRef<Path>,
    subsample: Option<usize>,
) -> anyhow::Result<Sequence> {
    let mut seqs = read_fasta(path, subsample)?;
    if seqs.len() > 1 {
        log::warn!(
            "{} holds {} sequences, only the first is aligned",
            path.as_ref().to_string_lossy(),
            seqs.len()
        );
    }
    // read_fasta never returns an empty list
    Ok(seqs.swap_remove(0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::{assert, check};

    #[test]
    fn test_parse_records() -> anyhow::Result<()> {
        let fasta = b">seq1 first sequence\nacgt\nAC GT\n>seq2\nMKV*\n";
        let seqs = sequences_from_fasta(&fasta[..])?;

        check!(seqs.len() == 2);
        check!(seqs[0].name == "seq1");
        check!(seqs[0].details.as_deref() == Some("first sequence"));
        check!(seqs[0].utf8_bytes == b"ACGTACGT");
        check!(seqs[1].name == "seq2");
        check!(seqs[1].details == None);
        check!(seqs[1].utf8_bytes == b"MKV*");
        Ok(())
    }

    #[test]
    fn test_unknown_byte() {
        let fasta = b">bad\nAC-GT\n";
        let result = sequences_from_fasta(&fasta[..]);
        assert!(let Err(_) = result);
    }

    #[test]
    fn test_subsample() -> anyhow::Result<()> {
        let path = std::env::temp_dir().join(format!("aligner-subsample-{}.fa", std::process::id()));
        std::fs::write(&path, ">a\nACGTACGT\n>b\nTTGA\n")?;

        let full = read_fasta(&path, Some(0))?;
        check!(full[0].utf8_bytes == b"ACGTACGT");
        check!(full[1].utf8_bytes == b"TTGA");

        let truncated = read_fasta(&path, Some(3))?;
        check!(truncated[0].utf8_bytes == b"ACG");
        check!(truncated[1].utf8_bytes == b"TTG");

        std::fs::remove_file(&path)?;
        Ok(())
    }

    #[test]
    fn test_empty_input() -> anyhow::Result<()> {
        check!(sequences_from_fasta(&b""[..])?.is_empty());
        Ok(())
    }
}
