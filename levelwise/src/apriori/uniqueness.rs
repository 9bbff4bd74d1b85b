use super::combination::Combination;
use super::oracle::FeasibilityOracle;
use super::pli::PositionListIndex;

/// Unique-column-combination oracle. A combination stays eligible while its
/// position list index still holds a cluster, i.e. while it is not a key.
#[derive(Debug, Clone)]
pub struct UniquenessOracle {
    base: Vec<PositionListIndex>,
}

impl UniquenessOracle {
    /// `base[rank]` is the index of the column with that rank.
    pub fn new(base: Vec<PositionListIndex>) -> Self {
        debug_assert!(base
            .windows(2)
            .all(|pair| pair[0].num_rows() == pair[1].num_rows()));
        Self { base }
    }

    pub fn from_columns<V: std::hash::Hash + Eq>(columns: &[&[V]]) -> Self {
        Self::new(
            columns
                .iter()
                .map(|column| PositionListIndex::from_column(*column))
                .collect(),
        )
    }

    pub fn base(&self, rank: usize) -> &PositionListIndex {
        &self.base[rank]
    }
}

impl FeasibilityOracle for UniquenessOracle {
    type Witness = PositionListIndex;

    fn ground_size(&self) -> usize {
        self.base.len()
    }

    fn seed(&self, rank: usize) -> PositionListIndex {
        self.base[rank].clone()
    }

    fn refine(
        &self,
        _candidate: &Combination,
        left: &PositionListIndex,
        right: &PositionListIndex,
    ) -> PositionListIndex {
        left.intersect(right)
    }

    fn is_feasible(&self, pli: &PositionListIndex) -> bool {
        !pli.is_unique()
    }
}
