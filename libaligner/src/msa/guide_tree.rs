use log::{debug, warn};
use serde::{Deserialize, Serialize};

use super::DistanceMatrix;

/// One agglomeration step of the guide tree.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Merge {
    pub left: usize,
    pub right: usize,
    /// The id of the new cluster; merge k of an N-leaf tree creates id N + k
    pub cluster: usize,
    /// The average-linkage distance between `left` and `right`,
    /// or None if the merge was forced because no nonzero distance remained
    pub distance: Option<f64>,
}

/// A binary merge order over sequences 0..N (the leaves).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuideTree {
    pub leaves: usize,
    pub merges: Vec<Merge>,
}

impl GuideTree {
    pub fn root(&self) -> Option<usize> {
        match self.merges.last() {
            Some(merge) => Some(merge.cluster),
            None => (self.leaves == 1).then_some(0),
        }
    }
}

/// Build the guide tree by average-linkage agglomerative clustering (UPGMA).
///
/// Each step merges the pair of active clusters with the smallest nonzero
/// distance. Ties go to the pair found first when scanning rows then columns
/// in ascending cluster id order. Zero and non-finite distances are never
/// chosen; if only those remain, the two lowest-id clusters are merged.
pub fn build_guide_tree(distances: &DistanceMatrix) -> GuideTree {
    let leaves = distances.size();
    if leaves == 0 {
        return GuideTree {
            leaves,
            merges: vec![],
        };
    }

    let total = 2 * leaves - 1;
    let mut linkage = vec![f64::INFINITY; total * total];
    for row in 0..leaves {
        for col in 0..leaves {
            linkage[row * total + col] = distances.get(row, col);
        }
    }

    let mut sizes = vec![0usize; total];
    sizes[..leaves].fill(1);

    // new ids are always larger, so pushing keeps this sorted
    let mut active: Vec<usize> = (0..leaves).collect();
    let mut merges: Vec<Merge> = Vec::with_capacity(leaves - 1);

    while active.len() > 1 {
        let mut closest: Option<(usize, usize, f64)> = None;
        for (left_pos, &left) in active.iter().enumerate() {
            for (right_pos, &right) in active.iter().enumerate().skip(left_pos + 1) {
                let distance = linkage[left * total + right];
                if distance == 0.0 || !distance.is_finite() {
                    continue;
                }
                match closest {
                    Some((_, _, best)) if distance >= best => {}
                    _ => closest = Some((left_pos, right_pos, distance)),
                }
            }
        }

        let (left_pos, right_pos, distance) = match closest {
            Some((left_pos, right_pos, distance)) => (left_pos, right_pos, Some(distance)),
            None => {
                warn!("no nonzero distances left, merging clusters in id order");
                (0, 1, None)
            }
        };

        let left = active[left_pos];
        let right = active[right_pos];
        let cluster = leaves + merges.len();
        let left_size = sizes[left] as f64;
        let right_size = sizes[right] as f64;

        active.remove(right_pos);
        active.remove(left_pos);

        for &other in &active {
            let linked = (left_size * linkage[left * total + other]
                + right_size * linkage[right * total + other])
                / (left_size + right_size);
            linkage[cluster * total + other] = linked;
            linkage[other * total + cluster] = linked;
        }

        sizes[cluster] = sizes[left] + sizes[right];
        active.push(cluster);

        debug!("merge {left} + {right} -> {cluster} at {distance:?}");
        merges.push(Merge {
            left,
            right,
            cluster,
            distance,
        });
    }

    GuideTree { leaves, merges }
}
