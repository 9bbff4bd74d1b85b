use super::combination::{Combination, GroundSet};
use super::error::{LatticeError, Result};
use super::oracle::FeasibilityOracle;
use ndarray::{ArrayView2, Axis};

/// Transactions encoded as sorted, duplicate-free rank lists.
#[derive(Debug, Clone, Default)]
pub struct TransactionDb {
    transactions: Vec<Vec<usize>>,
    item_counts: Vec<usize>,
}

impl TransactionDb {
    pub fn encode<T: Ord + Clone, R: AsRef<[T]>>(transactions: &[R], ground: &GroundSet<T>) -> Self {
        let encoded = transactions
            .iter()
            .map(|transaction| {
                let mut ranks: Vec<usize> = transaction
                    .as_ref()
                    .iter()
                    .filter_map(|item| ground.rank(item))
                    .collect();
                ranks.sort_unstable();
                ranks.dedup();
                ranks
            })
            .collect();
        Self::from_ranks(encoded, ground.len())
    }

    /// One-hot matrix input: rows are transactions, column `j` is rank `j`.
    pub fn from_matrix(matrix: ArrayView2<i32>) -> Self {
        let num_items = matrix.shape()[1];
        let transactions = matrix
            .axis_iter(Axis(0))
            .map(|row| {
                (0..num_items)
                    .filter(|&item| row[item] != 0)
                    .collect()
            })
            .collect();
        Self::from_ranks(transactions, num_items)
    }

    fn from_ranks(transactions: Vec<Vec<usize>>, num_items: usize) -> Self {
        let mut item_counts = vec![0; num_items];
        for transaction in &transactions {
            for &item in transaction {
                item_counts[item] += 1;
            }
        }
        Self {
            transactions,
            item_counts,
        }
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn num_items(&self) -> usize {
        self.item_counts.len()
    }

    pub fn item_count(&self, rank: usize) -> usize {
        self.item_counts[rank]
    }

    pub fn transactions(&self) -> &[Vec<usize>] {
        &self.transactions
    }

    /// Number of transactions containing every rank of `combination`.
    pub fn support(&self, combination: &Combination) -> usize {
        match combination.ranks() {
            [] => self.len(),
            [single] => self.item_count(*single),
            _ => self
                .transactions
                .iter()
                .filter(|transaction| combination.is_subset_of(transaction))
                .count(),
        }
    }
}

/// Slack absorbed before rounding a scaled fraction up, so that `0.07 * 100`
/// becomes 7 and not 8.
const FRACTION_TOLERANCE: f64 = 1e-9;

/// Relative support in (0, 1] as an absolute transaction count, rounded up
/// and never below one.
pub fn min_count_from_fraction(fraction: f64, num_transactions: usize) -> Result<usize> {
    if !(fraction > 0.0 && fraction <= 1.0) {
        return Err(LatticeError::InvalidSupportFraction(fraction));
    }
    let scaled = fraction * num_transactions as f64;
    Ok(((scaled - FRACTION_TOLERANCE).ceil() as usize).max(1))
}

/// Frequent-itemset oracle: a combination is eligible when at least
/// `min_count` transactions contain it.
#[derive(Debug, Clone)]
pub struct SupportOracle<'a> {
    db: &'a TransactionDb,
    min_count: usize,
}

impl<'a> SupportOracle<'a> {
    pub fn new(db: &'a TransactionDb, min_count: usize) -> Result<Self> {
        if min_count < 1 || min_count > db.len() {
            return Err(LatticeError::InvalidThreshold {
                threshold: min_count,
                transactions: db.len(),
            });
        }
        Ok(Self { db, min_count })
    }

    pub fn min_count(&self) -> usize {
        self.min_count
    }

    pub fn support(&self, candidate: &Combination) -> usize {
        self.db.support(candidate)
    }

    pub fn is_frequent(&self, candidate: &Combination) -> bool {
        self.support(candidate) >= self.min_count
    }
}

impl FeasibilityOracle for SupportOracle<'_> {
    type Witness = usize;

    fn ground_size(&self) -> usize {
        self.db.num_items()
    }

    fn seed(&self, rank: usize) -> usize {
        self.db.item_count(rank)
    }

    fn refine(&self, candidate: &Combination, _left: &usize, _right: &usize) -> usize {
        self.db.support(candidate)
    }

    fn is_feasible(&self, support: &usize) -> bool {
        *support >= self.min_count
    }
}
