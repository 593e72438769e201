use crate::error::AlignError;

/// Size ceilings that decide which algorithm may run on a given input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlignLimits {
    /// The longest sequence the quadratic-space aligners accept
    pub max_sequence_length: usize,
    /// The most sequences a multiple alignment accepts
    pub max_msa_sequences: usize,
    /// Pairs whose longer sequence exceeds this length are
    /// scored with the linear-space aligner in the distance matrix
    pub linear_space_threshold: usize,
}

impl Default for AlignLimits {
    fn default() -> Self {
        Self {
            max_sequence_length: 10_000,
            max_msa_sequences: 100,
            linear_space_threshold: 5_000,
        }
    }
}

impl AlignLimits {
    pub fn check_length(&self, length: usize) -> Result<(), AlignError> {
        if length > self.max_sequence_length {
            Err(AlignError::SequenceTooLong {
                length,
                limit: self.max_sequence_length,
            })
        } else {
            Ok(())
        }
    }

    pub fn check_sequence_count(&self, count: usize) -> Result<(), AlignError> {
        if count > self.max_msa_sequences {
            Err(AlignError::TooManySequences {
                count,
                limit: self.max_msa_sequences,
            })
        } else {
            Ok(())
        }
    }

    /// Whether a pair with this (longer) length should be handed to the quadratic aligner.
    pub fn fits_quadratic(&self, length: usize) -> bool {
        length <= self.linear_space_threshold && length <= self.max_sequence_length
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;

    #[test]
    fn test_check_length() {
        let limits = AlignLimits::default();
        check!(limits.check_length(10_000).is_ok());
        check!(matches!(
            limits.check_length(10_001),
            Err(AlignError::SequenceTooLong {
                length: 10_001,
                limit: 10_000
            })
        ));
    }

    #[test]
    fn test_fits_quadratic() {
        let limits = AlignLimits {
            max_sequence_length: 100,
            max_msa_sequences: 10,
            linear_space_threshold: 500,
        };
        check!(limits.fits_quadratic(100));
        check!(!limits.fits_quadratic(101));
    }
}
