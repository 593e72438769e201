use crate::align::structs::{Trace, TraceStep};
use crate::alphabet::GAP;

/// A cluster of the guide tree: its member sequences
/// aligned to one another as equal-length rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    /// The input index of the sequence in each row
    pub members: Vec<usize>,
    pub rows: Vec<Vec<u8>>,
}

impl Profile {
    pub fn from_sequence(member: usize, sequence: &[u8]) -> Self {
        Self {
            members: vec![member],
            rows: vec![sequence.to_vec()],
        }
    }

    /// The number of columns shared by every row.
    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, |row| row.len())
    }

    /// Join two profiles using an alignment of their consensus strings.
    ///
    /// Wherever the trace puts a gap against a profile's consensus, a gap
    /// column is inserted into every one of that profile's rows.
    pub fn merge(self, other: Profile, trace: &Trace) -> Profile {
        let mut rows = expand(&self.rows, trace, |step| step != TraceStep::Left);
        rows.extend(expand(&other.rows, trace, |step| step != TraceStep::Up));

        let mut members = self.members;
        members.extend(other.members);

        Profile { members, rows }
    }
}

fn expand(rows: &[Vec<u8>], trace: &Trace, consumes: impl Fn(TraceStep) -> bool) -> Vec<Vec<u8>> {
    rows.iter()
        .map(|row| {
            let mut symbols = row.iter();
            trace
                .iter()
                .map(|&step| {
                    if consumes(step) {
                        symbols.next().copied().unwrap_or(GAP)
                    } else {
                        GAP
                    }
                })
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;

    #[test]
    fn test_merge_inserts_gap_columns() {
        let left = Profile {
            members: vec![2, 0],
            rows: vec![b"AGC".to_vec(), b"A-C".to_vec()],
        };
        let right = Profile::from_sequence(1, b"ACGC");
        // consensus "AGC" against "ACGC": A-GC / ACGC
        let trace = Trace {
            steps: vec![
                TraceStep::Diagonal,
                TraceStep::Left,
                TraceStep::Diagonal,
                TraceStep::Diagonal,
            ],
        };

        let merged = left.merge(right, &trace);
        check!(merged.members == vec![2, 0, 1]);
        check!(merged.rows[0] == b"A-GC");
        check!(merged.rows[1] == b"A--C");
        check!(merged.rows[2] == b"ACGC");
        check!(merged.width() == 4);
    }
}
