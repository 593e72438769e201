use log::debug;

use crate::align::needleman_wunsch::global_trace;
use crate::align::hirschberg::hirschberg_trace;
use crate::align::ScoringScheme;
use crate::config::AlignLimits;
use crate::error::AlignError;
use crate::structs::Profile;

use super::{ConsensusBuilder, GuideTree, TieBreak};

/// Align sequences progressively along a guide tree.
///
/// Each merge aligns the consensus strings of its two clusters and threads
/// the resulting gap pattern through every member. The returned rows are in
/// input order and share one length.
pub fn progressive_align<S>(
    sequences: &[S],
    tree: &GuideTree,
    scheme: &ScoringScheme,
    limits: &AlignLimits,
    tie_break: TieBreak,
) -> Result<Vec<Vec<u8>>, AlignError>
where
    S: AsRef<[u8]>,
{
    let mut clusters: Vec<Option<Profile>> = sequences
        .iter()
        .enumerate()
        .map(|(idx, seq)| Some(Profile::from_sequence(idx, seq.as_ref())))
        .collect();
    clusters.resize(sequences.len() + tree.merges.len(), None);

    let scheme = scheme.linear();
    let mut consensus_builder = ConsensusBuilder::new(tie_break);

    for merge in &tree.merges {
        let left = take_cluster(&mut clusters, merge.left)?;
        let right = take_cluster(&mut clusters, merge.right)?;

        let left_consensus = consensus_builder.build(&left.rows);
        let right_consensus = consensus_builder.build(&right.rows);

        let longest = left_consensus.len().max(right_consensus.len());
        let trace = if longest <= limits.max_sequence_length {
            global_trace(&left_consensus, &right_consensus, &scheme, None).0
        } else {
            hirschberg_trace(&left_consensus, &right_consensus, &scheme)
        };

        let merged = left.merge(right, &trace);
        debug!(
            "cluster {} has {} members over {} columns",
            merge.cluster,
            merged.members.len(),
            merged.width()
        );

        let slot = clusters
            .get_mut(merge.cluster)
            .ok_or(AlignError::InvalidGuideTree(merge.cluster))?;
        if slot.is_some() {
            return Err(AlignError::InvalidGuideTree(merge.cluster));
        }
        *slot = Some(merged);
    }

    let root = tree
        .root()
        .ok_or(AlignError::InsufficientSequences(sequences.len()))?;
    let profile = take_cluster(&mut clusters, root)?;

    let mut rows: Vec<Vec<u8>> = vec![vec![]; sequences.len()];
    for (member, row) in profile.members.into_iter().zip(profile.rows) {
        rows[member] = row;
    }
    Ok(rows)
}

fn take_cluster(clusters: &mut [Option<Profile>], id: usize) -> Result<Profile, AlignError> {
    clusters
        .get_mut(id)
        .and_then(Option::take)
        .ok_or(AlignError::InvalidGuideTree(id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet::strip_gaps;
    use crate::msa::Merge;
    use assert2::{assert, check};

    fn merge(left: usize, right: usize, cluster: usize) -> Merge {
        Merge {
            left,
            right,
            cluster,
            distance: None,
        }
    }

    #[test]
    fn test_follows_tree() -> anyhow::Result<()> {
        let sequences = ["AGC", "ACGC", "AGGC"];
        let tree = GuideTree {
            leaves: 3,
            merges: vec![merge(1, 2, 3), merge(0, 3, 4)],
        };
        let rows = progressive_align(
            &sequences,
            &tree,
            &ScoringScheme::default(),
            &AlignLimits::default(),
            TieBreak::Lowest,
        )?;

        check!(rows.len() == 3);
        check!(rows.iter().all(|row| row.len() == rows[0].len()));
        for (row, seq) in rows.iter().zip(sequences) {
            check!(strip_gaps(row) == seq.as_bytes());
        }
        Ok(())
    }

    #[test]
    fn test_reused_cluster_is_rejected() {
        let tree = GuideTree {
            leaves: 3,
            merges: vec![merge(0, 1, 3), merge(0, 2, 4)],
        };
        let result = progressive_align(
            &["A", "C", "G"],
            &tree,
            &ScoringScheme::default(),
            &AlignLimits::default(),
            TieBreak::Lowest,
        );
        assert!(let Err(AlignError::InvalidGuideTree(0)) = result);
    }

    #[test]
    fn test_single_sequence() -> anyhow::Result<()> {
        let tree = GuideTree {
            leaves: 1,
            merges: vec![],
        };
        let rows = progressive_align(
            &["ACGT"],
            &tree,
            &ScoringScheme::default(),
            &AlignLimits::default(),
            TieBreak::Lowest,
        )?;
        check!(rows == vec![b"ACGT".to_vec()]);
        Ok(())
    }
}
