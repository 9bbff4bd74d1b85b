use std::collections::{BTreeSet, HashMap};
use std::hash::Hash;

const UNASSIGNED: usize = usize::MAX;

/// Position list index: rows grouped into clusters of equal projected
/// values. Clusters of a single row are never stored, so an index without
/// clusters means the projection is unique.
///
/// A cluster's position in `clusters` is only an id for bookkeeping during
/// intersection and carries no meaning across indexes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionListIndex {
    num_rows: usize,
    clusters: Vec<Vec<usize>>,
}

impl PositionListIndex {
    /// Groups row positions of a single column by value. Clusters appear in
    /// order of their first row; rows within a cluster are ascending.
    pub fn from_column<V: Hash + Eq>(values: &[V]) -> Self {
        let mut slots: HashMap<&V, usize> = HashMap::new();
        let mut groups: Vec<Vec<usize>> = Vec::new();

        for (row, value) in values.iter().enumerate() {
            let slot = *slots.entry(value).or_insert_with(|| {
                groups.push(Vec::new());
                groups.len() - 1
            });
            groups[slot].push(row);
        }

        groups.retain(|group| group.len() > 1);
        Self {
            num_rows: values.len(),
            clusters: groups,
        }
    }

    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    pub fn clusters(&self) -> &[Vec<usize>] {
        &self.clusters
    }

    pub fn num_clusters(&self) -> usize {
        self.clusters.len()
    }

    /// Rows that share their projection with at least one other row.
    pub fn covered_rows(&self) -> usize {
        self.clusters.iter().map(Vec::len).sum()
    }

    /// Rows that would have to be removed to make the projection unique.
    pub fn key_error(&self) -> usize {
        self.covered_rows() - self.num_clusters()
    }

    pub fn is_unique(&self) -> bool {
        self.clusters.is_empty()
    }

    /// Refines this partition by `other` with a probing table, linear in the
    /// rows covered by both indexes.
    pub fn intersect(&self, other: &Self) -> Self {
        debug_assert_eq!(self.num_rows, other.num_rows);

        let mut probe = vec![UNASSIGNED; self.num_rows];
        for (id, cluster) in self.clusters.iter().enumerate() {
            for &row in cluster {
                probe[row] = id;
            }
        }

        let mut clusters = Vec::new();
        let mut slots: HashMap<usize, usize> = HashMap::new();
        let mut groups: Vec<Vec<usize>> = Vec::new();

        for cluster in &other.clusters {
            for &row in cluster {
                let id = probe[row];
                if id == UNASSIGNED {
                    continue;
                }
                let slot = *slots.entry(id).or_insert_with(|| {
                    groups.push(Vec::new());
                    groups.len() - 1
                });
                groups[slot].push(row);
            }

            clusters.extend(groups.drain(..).filter(|group| group.len() > 1));
            slots.clear();
        }

        Self {
            num_rows: self.num_rows,
            clusters,
        }
    }

    /// Pairwise set intersection of every cluster pair. Quadratic in the
    /// number of clusters; kept as a reference for [`Self::intersect`].
    pub fn intersect_naive(&self, other: &Self) -> Self {
        let mut clusters = Vec::new();
        for left in &self.clusters {
            let left: BTreeSet<usize> = left.iter().copied().collect();
            for right in &other.clusters {
                let common: Vec<usize> = right
                    .iter()
                    .copied()
                    .filter(|row| left.contains(row))
                    .collect();
                if common.len() > 1 {
                    clusters.push(common);
                }
            }
        }
        Self {
            num_rows: self.num_rows,
            clusters,
        }
    }

    /// Same partition with rows and clusters sorted, for comparing indexes
    /// built along different routes.
    pub fn normalized(&self) -> Self {
        let mut clusters: Vec<Vec<usize>> = self
            .clusters
            .iter()
            .map(|cluster| {
                let mut cluster = cluster.clone();
                cluster.sort_unstable();
                cluster
            })
            .collect();
        clusters.sort_unstable();
        Self {
            num_rows: self.num_rows,
            clusters,
        }
    }
}
