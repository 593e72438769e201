use log::{debug, info};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::align::{hirschberg, needleman_wunsch, GlobalParams, Score, ScoringScheme};
use crate::alphabet::uppercase;
use crate::config::AlignLimits;
use crate::error::AlignError;

/// A symmetric matrix of pairwise distances with a zero diagonal.
///
/// Lower is closer; similar sequences have negative distances.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistanceMatrix {
    size: usize,
    values: Vec<f64>,
}

impl DistanceMatrix {
    pub fn new(size: usize) -> Self {
        Self {
            size,
            values: vec![0.0; size * size],
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.values[row * self.size + col]
    }

    /// Set both (row, col) and (col, row).
    pub fn set(&mut self, row: usize, col: usize, distance: f64) {
        self.values[row * self.size + col] = distance;
        self.values[col * self.size + row] = distance;
    }

    pub fn row(&self, row: usize) -> &[f64] {
        &self.values[row * self.size..(row + 1) * self.size]
    }
}

/// The distance between two sequences: their global alignment score,
/// negated and divided by the longer length.
pub fn pair_distance(
    seq_1: &[u8],
    seq_2: &[u8],
    scheme: &ScoringScheme,
    limits: &AlignLimits,
) -> Result<f64, AlignError> {
    let longest = seq_1.len().max(seq_2.len());
    if longest == 0 {
        return Ok(0.0);
    }

    let seq_1 = uppercase(seq_1)?;
    let seq_2 = uppercase(seq_2)?;

    let score: Score = if seq_1 == seq_2 {
        scheme.self_score(&seq_1)
    } else if limits.fits_quadratic(longest) {
        let params = GlobalParams {
            band_width: None,
            limits: *limits,
        };
        needleman_wunsch(&seq_1, &seq_2, scheme, &params)?.score
    } else {
        hirschberg(&seq_1, &seq_2, scheme)?.score
    };

    Ok(-(score as f64) / longest as f64)
}

/// Compute every pairwise distance on a dedicated pool of `threads` workers.
///
/// A thread count of 0 lets rayon choose.
pub fn build_distance_matrix<S>(
    sequences: &[S],
    scheme: &ScoringScheme,
    limits: &AlignLimits,
    threads: usize,
) -> Result<DistanceMatrix, AlignError>
where
    S: AsRef<[u8]> + Sync,
{
    let count = sequences.len();
    limits.check_sequence_count(count)?;

    let pairs: Vec<(usize, usize)> = (0..count)
        .flat_map(|row| (row + 1..count).map(move |col| (row, col)))
        .collect();

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()?;
    info!(
        "computing {} pairwise distances on {} threads",
        pairs.len(),
        pool.current_num_threads()
    );

    let distances: Vec<f64> = pool.install(|| {
        pairs
            .par_iter()
            .map(|&(row, col)| {
                pair_distance(
                    sequences[row].as_ref(),
                    sequences[col].as_ref(),
                    scheme,
                    limits,
                )
            })
            .collect::<Result<Vec<f64>, AlignError>>()
    })?;

    let mut matrix = DistanceMatrix::new(count);
    for (&(row, col), distance) in pairs.iter().zip(distances) {
        debug!("distance({row}, {col}) = {distance:.4}");
        matrix.set(row, col, distance);
    }
    Ok(matrix)
}
