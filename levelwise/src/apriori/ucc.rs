use super::combination::{Combination, GroundSet};
use super::config::SearchConfig;
use super::error::{LatticeError, Result};
use super::lattice::{search, Termination};
use super::pli::PositionListIndex;
use super::uniqueness::UniquenessOracle;
use std::fmt::Debug;
use std::hash::Hash;

/// Minimal unique column combinations of a table, with the column names as
/// ground set.
#[derive(Debug, Clone)]
pub struct UniqueColumnCombinations<N> {
    columns: GroundSet<N>,
    minimal: Vec<Combination>,
    termination: Termination,
}

impl<N: Ord + Clone> UniqueColumnCombinations<N> {
    pub fn columns(&self) -> &GroundSet<N> {
        &self.columns
    }

    /// Sorted by size, then lexicographically by column rank.
    pub fn minimal(&self) -> &[Combination] {
        &self.minimal
    }

    pub fn termination(&self) -> Termination {
        self.termination
    }

    pub fn len(&self) -> usize {
        self.minimal.len()
    }

    pub fn is_empty(&self) -> bool {
        self.minimal.is_empty()
    }

    pub fn names(&self) -> Vec<Vec<&N>> {
        self.minimal
            .iter()
            .map(|combination| self.columns.resolve(combination))
            .collect()
    }

    pub fn contains(&self, names: &[N]) -> bool {
        self.columns.encode(names).is_some_and(|combination| {
            self.minimal
                .binary_search_by(|probe| by_size(probe, &combination))
                .is_ok()
        })
    }
}

fn by_size(left: &Combination, right: &Combination) -> std::cmp::Ordering {
    left.len().cmp(&right.len()).then_with(|| left.cmp(right))
}

/// Finds every minimal set of columns whose projection has no duplicate row.
pub fn discover_unique_combinations<N, V>(columns: &[(N, Vec<V>)]) -> Result<UniqueColumnCombinations<N>>
where
    N: Ord + Clone + Debug,
    V: Hash + Eq,
{
    discover_unique_combinations_with_config(columns, SearchConfig::default())
}

pub fn discover_unique_combinations_with_config<N, V>(
    columns: &[(N, Vec<V>)],
    config: SearchConfig,
) -> Result<UniqueColumnCombinations<N>>
where
    N: Ord + Clone + Debug,
    V: Hash + Eq,
{
    let names = GroundSet::new(columns.iter().map(|(name, _)| name.clone()));
    if names.len() != columns.len() {
        let duplicate = columns
            .iter()
            .enumerate()
            .find(|(i, (name, _))| columns[..*i].iter().any(|(seen, _)| seen == name))
            .map(|(_, (name, _))| format!("{name:?}"))
            .unwrap_or_default();
        return Err(LatticeError::DuplicateColumn(duplicate));
    }

    if let Some((_, first)) = columns.first() {
        if let Some((name, values)) = columns.iter().find(|(_, values)| values.len() != first.len()) {
            return Err(LatticeError::InconsistentColumnLengths {
                column: format!("{name:?}"),
                expected: first.len(),
                found: values.len(),
            });
        }
    }

    let mut by_rank: Vec<Option<&[V]>> = vec![None; names.len()];
    for (name, values) in columns {
        if let Some(rank) = names.rank(name) {
            by_rank[rank] = Some(values.as_slice());
        }
    }
    let base: Vec<PositionListIndex> = by_rank
        .into_iter()
        .flatten()
        .map(PositionListIndex::from_column)
        .collect();

    log::info!(
        "discovering unique column combinations over {} columns, {} rows",
        base.len(),
        columns.first().map_or(0, |(_, values)| values.len())
    );
    let oracle = UniquenessOracle::new(base);
    let outcome = search(&oracle, config);

    // Each level's candidates are joins of non-unique parents, so whatever the
    // oracle rejected is minimal.
    let minimal: Vec<Combination> = outcome.infeasible().cloned().collect();
    Ok(UniqueColumnCombinations {
        columns: names,
        minimal,
        termination: outcome.termination,
    })
}
