use super::combination::{Combination, GroundSet};
use super::config::SearchConfig;
use super::error::{LatticeError, Result};
use super::lattice::{search, SearchOutcome, Termination};
use super::storage::FrequentLevel;
use super::support::{min_count_from_fraction, SupportOracle, TransactionDb};
use ndarray::ArrayView2;
use std::collections::BTreeMap;

/// Frequent itemsets grouped by size, with the ground set that gives their
/// ranks meaning.
#[derive(Debug, Clone)]
pub struct FrequentItemsets<T> {
    ground: GroundSet<T>,
    levels: Vec<FrequentLevel>,
    termination: Termination,
}

impl<T: Ord + Clone> FrequentItemsets<T> {
    fn empty() -> Self {
        Self {
            ground: GroundSet::new(Vec::new()),
            levels: Vec::new(),
            termination: Termination::Exhausted,
        }
    }

    pub fn ground(&self) -> &GroundSet<T> {
        &self.ground
    }

    /// Non-empty levels, smallest itemsets first.
    pub fn levels(&self) -> &[FrequentLevel] {
        &self.levels
    }

    pub fn level(&self, size: usize) -> Option<&FrequentLevel> {
        self.levels.iter().find(|level| level.itemset_size == size)
    }

    pub fn termination(&self) -> Termination {
        self.termination
    }

    pub fn len(&self) -> usize {
        self.levels.iter().map(FrequentLevel::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn by_size(&self) -> BTreeMap<usize, Vec<Combination>> {
        self.levels
            .iter()
            .map(|level| {
                let combinations = level.iter_itemsets().map(Combination::from_ranks).collect();
                (level.itemset_size, combinations)
            })
            .collect()
    }

    /// Support of `items` if it is frequent.
    pub fn support(&self, items: &[T]) -> Option<usize> {
        let combination = self.ground.encode(items)?;
        let level = self.level(combination.len())?;
        level
            .position(combination.ranks())
            .map(|idx| level.support(idx))
    }

    /// Every frequent itemset as ground elements, with its support.
    pub fn iter(&self) -> impl Iterator<Item = (Vec<&T>, usize)> + '_ {
        self.levels.iter().flat_map(move |level| {
            level.iter_with_support().map(move |(ranks, support)| {
                let items = ranks
                    .iter()
                    .filter_map(|&rank| self.ground.element(rank))
                    .collect();
                (items, support)
            })
        })
    }
}

/// Finds every itemset contained in at least `min_support` transactions.
///
/// An input without any items yields an empty result. Otherwise the
/// threshold has to lie in `1..=transactions.len()`.
pub fn mine_frequent_sets<T, R>(transactions: &[R], min_support: usize) -> Result<FrequentItemsets<T>>
where
    T: Ord + Clone,
    R: AsRef<[T]>,
{
    mine_frequent_sets_with_config(transactions, min_support, SearchConfig::default())
}

pub fn mine_frequent_sets_with_config<T, R>(
    transactions: &[R],
    min_support: usize,
    config: SearchConfig,
) -> Result<FrequentItemsets<T>>
where
    T: Ord + Clone,
    R: AsRef<[T]>,
{
    let ground = GroundSet::from_transactions(transactions);
    if min_support < 1 || (!transactions.is_empty() && min_support > transactions.len()) {
        return Err(LatticeError::InvalidThreshold {
            threshold: min_support,
            transactions: transactions.len(),
        });
    }
    if ground.is_empty() {
        log::info!("no items in {} transactions", transactions.len());
        return Ok(FrequentItemsets::empty());
    }

    let db = TransactionDb::encode(transactions, &ground);
    let oracle = SupportOracle::new(&db, min_support)?;
    let outcome = search(&oracle, config);

    Ok(FrequentItemsets {
        ground,
        termination: outcome.termination,
        levels: into_frequent_levels(outcome),
    })
}

/// Apriori over a one-hot matrix (rows are transactions, columns items) with
/// `min_support` relative to the number of rows. Column indexes are the ranks.
pub fn apriori_algorithm(transactions: ArrayView2<i32>, min_support: f64) -> Result<Vec<FrequentLevel>> {
    apriori_with_config(transactions, min_support, SearchConfig::default())
}

pub fn apriori_with_config(
    transactions: ArrayView2<i32>,
    min_support: f64,
    config: SearchConfig,
) -> Result<Vec<FrequentLevel>> {
    let num_transactions = transactions.shape()[0];
    let min_count = min_count_from_fraction(min_support, num_transactions)?;
    if num_transactions == 0 || transactions.shape()[1] == 0 {
        return Ok(Vec::new());
    }

    let db = TransactionDb::from_matrix(transactions);
    let oracle = SupportOracle::new(&db, min_count)?;
    Ok(into_frequent_levels(search(&oracle, config)))
}

fn into_frequent_levels(outcome: SearchOutcome<usize>) -> Vec<FrequentLevel> {
    outcome
        .layers
        .iter()
        .filter(|layer| !layer.is_empty())
        .map(|layer| {
            let mut level = FrequentLevel::with_capacity(layer.size(), layer.len());
            for (combination, &support) in layer.iter() {
                level.add_itemset_with_support(combination.ranks(), support);
            }
            level
        })
        .collect()
}
