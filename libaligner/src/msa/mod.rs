use std::borrow::Cow;

use derive_builder::Builder;
use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::align::ScoringScheme;
use crate::alphabet::uppercase;
use crate::config::AlignLimits;
use crate::error::AlignError;

mod consensus;
pub use consensus::{ConsensusBuilder, TieBreak};

mod distance;
pub use distance::{build_distance_matrix, pair_distance, DistanceMatrix};

mod guide_tree;
pub use guide_tree::{build_guide_tree, GuideTree, Merge};

mod progressive;
pub use progressive::progressive_align;

#[derive(Builder, Debug, Clone, PartialEq)]
#[builder(setter(into), default)]
pub struct MsaParams {
    /// Affine gap costs are dropped; the multiple aligner only uses linear gaps
    pub scheme: ScoringScheme,
    pub limits: AlignLimits,
    /// The size of the distance matrix worker pool; 0 lets rayon decide
    pub threads: usize,
    pub tie_break: TieBreak,
}

impl Default for MsaParams {
    fn default() -> Self {
        Self {
            scheme: ScoringScheme::default(),
            limits: AlignLimits::default(),
            threads: 1,
            tie_break: TieBreak::Lowest,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultipleAlignment {
    /// One aligned row per input sequence, in input order
    pub rows: Vec<String>,
    /// The majority-vote consensus of the final rows
    pub consensus: String,
    pub guide_tree: GuideTree,
    pub distances: DistanceMatrix,
}

impl MultipleAlignment {
    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, |row| row.len())
    }
}

/// Align N sequences: distance matrix, then guide tree, then progressive alignment.
pub fn multiple_sequence_alignment<S>(
    sequences: &[S],
    params: &MsaParams,
) -> Result<MultipleAlignment, AlignError>
where
    S: AsRef<[u8]> + Sync,
{
    if sequences.len() < 2 {
        return Err(AlignError::InsufficientSequences(sequences.len()));
    }
    params.limits.check_sequence_count(sequences.len())?;

    if params.scheme.affine.is_some() {
        warn!("affine gap costs are ignored by the multiple aligner");
    }
    let scheme = params.scheme.linear();

    let sequences: Vec<Cow<[u8]>> = sequences
        .iter()
        .map(|seq| uppercase(seq.as_ref()))
        .collect::<Result<_, _>>()?;

    let distances = build_distance_matrix(&sequences, &scheme, &params.limits, params.threads)?;
    let guide_tree = build_guide_tree(&distances);
    info!("guide tree built with {} merges", guide_tree.merges.len());

    let rows = progressive_align(
        &sequences,
        &guide_tree,
        &scheme,
        &params.limits,
        params.tie_break,
    )?;

    let consensus = ConsensusBuilder::new(params.tie_break).build(&rows);
    let consensus = String::from_utf8_lossy(&consensus).into_owned();
    info!("consensus: {consensus}");

    Ok(MultipleAlignment {
        rows: rows
            .iter()
            .map(|row| String::from_utf8_lossy(row).into_owned())
            .collect(),
        consensus,
        guide_tree,
        distances,
    })
}
