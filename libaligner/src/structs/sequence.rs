use std::fmt::{Debug, Display, Formatter};

/// A named sequence of symbols, stored uppercase.
#[derive(Clone, PartialEq, Eq)]
pub struct Sequence {
    /// The name of the sequence
    pub name: String,
    /// The sequence details. If the sequence comes from a fasta, this
    /// is the information following the sequence name in the header
    pub details: Option<String>,
    /// The string data of the sequence
    pub utf8_bytes: Vec<u8>,
}

impl Sequence {
    pub fn new(name: impl Into<String>, bytes: &[u8]) -> Self {
        Self {
            name: name.into(),
            details: None,
            utf8_bytes: bytes.to_ascii_uppercase(),
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn len(&self) -> usize {
        self.utf8_bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.utf8_bytes.is_empty()
    }

    /// Keep only the first `length` symbols.
    pub fn truncate(&mut self, length: usize) {
        self.utf8_bytes.truncate(length);
    }
}

impl AsRef<[u8]> for Sequence {
    fn as_ref(&self) -> &[u8] {
        &self.utf8_bytes
    }
}

impl Display for Sequence {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, ">{}", self.name)?;

        if let Some(ref details) = self.details {
            write!(f, " {details}")?
        };

        writeln!(f)?;

        let mut iter = self.utf8_bytes.chunks(80).peekable();

        while let Some(byte_chunk) = iter.next() {
            match std::str::from_utf8(byte_chunk) {
                Ok(seq_line) => {
                    write!(f, "{}", seq_line)?;
                    if iter.peek().is_some() {
                        writeln!(f)?;
                    }
                }
                Err(_) => return Err(std::fmt::Error),
            }
        }
        Ok(())
    }
}

impl Debug for Sequence {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.name, String::from_utf8_lossy(&self.utf8_bytes))
    }
}
