use super::error::LatticeError;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;
use std::str::FromStr;

/// Distinct ground elements in sorted order. An element's index is its rank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroundSet<T> {
    elements: Vec<T>,
}

impl<T: Ord + Clone> GroundSet<T> {
    pub fn new(elements: impl IntoIterator<Item = T>) -> Self {
        let mut elements: Vec<T> = elements.into_iter().collect();
        elements.sort_unstable();
        elements.dedup();
        Self { elements }
    }

    pub fn from_transactions<R: AsRef<[T]>>(transactions: &[R]) -> Self {
        Self::new(
            transactions
                .iter()
                .flat_map(|transaction| transaction.as_ref().iter().cloned()),
        )
    }

    pub fn rank(&self, element: &T) -> Option<usize> {
        self.elements.binary_search(element).ok()
    }

    /// Canonical combination for a set of elements; `None` if any element is
    /// not part of the ground set.
    pub fn encode(&self, elements: &[T]) -> Option<Combination> {
        let ranks = elements
            .iter()
            .map(|element| self.rank(element))
            .collect::<Option<Vec<_>>>()?;
        Some(Combination::from_unsorted(ranks))
    }

    pub fn resolve(&self, combination: &Combination) -> Vec<&T> {
        combination
            .iter()
            .map(|rank| &self.elements[rank])
            .collect()
    }
}

impl<T> GroundSet<T> {
    pub fn element(&self, rank: usize) -> Option<&T> {
        self.elements.get(rank)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.elements.iter()
    }
}

/// A subset of the ground set as strictly increasing ranks.
///
/// The derived ordering is lexicographic over ranks, which is the lattice
/// order within one level.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "Vec<usize>", into = "Vec<usize>")]
pub struct Combination(SmallVec<[usize; 4]>);

impl Combination {
    pub fn empty() -> Self {
        Self(SmallVec::new())
    }

    pub fn singleton(rank: usize) -> Self {
        let mut ranks = SmallVec::new();
        ranks.push(rank);
        Self(ranks)
    }

    /// Panics unless `ranks` is strictly increasing.
    pub fn from_ranks(ranks: &[usize]) -> Self {
        assert!(
            is_strictly_increasing(ranks),
            "combination ranks must be strictly increasing: {ranks:?}"
        );
        Self(SmallVec::from_slice(ranks))
    }

    pub fn from_unsorted(mut ranks: Vec<usize>) -> Self {
        ranks.sort_unstable();
        ranks.dedup();
        Self(SmallVec::from_vec(ranks))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn ranks(&self) -> &[usize] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.0.iter().copied()
    }

    pub fn last(&self) -> Option<usize> {
        self.0.last().copied()
    }

    /// All ranks but the last one.
    pub fn prefix(&self) -> &[usize] {
        match self.0.split_last() {
            Some((_, prefix)) => prefix,
            None => &[],
        }
    }

    /// Appends `rank`, which must exceed every rank already present.
    pub fn extended(&self, rank: usize) -> Self {
        assert!(
            self.last().map_or(true, |last| last < rank),
            "cannot extend {self} with rank {rank}"
        );
        let mut ranks = self.0.clone();
        ranks.push(rank);
        Self(ranks)
    }

    /// The combination with the rank at `index` removed.
    pub fn without(&self, index: usize) -> Self {
        let mut ranks = self.0.clone();
        ranks.remove(index);
        Self(ranks)
    }

    /// The immediate subsets, ordered by the position of the dropped rank.
    pub fn subsets(&self) -> impl Iterator<Item = Combination> + '_ {
        (0..self.len()).map(move |index| self.without(index))
    }

    /// Whether every rank occurs in the sorted slice `ranks`.
    pub fn is_subset_of(&self, ranks: &[usize]) -> bool {
        let mut haystack = ranks.iter();
        self.0
            .iter()
            .all(|needle| haystack.any(|rank| rank == needle))
    }
}

fn is_strictly_increasing(ranks: &[usize]) -> bool {
    ranks.windows(2).all(|pair| pair[0] < pair[1])
}

impl fmt::Display for Combination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, rank) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{rank}")?;
        }
        Ok(())
    }
}

impl FromStr for Combination {
    type Err = LatticeError;

    fn from_str(key: &str) -> Result<Self, Self::Err> {
        if key.is_empty() {
            return Ok(Self::empty());
        }
        let ranks = key
            .split(',')
            .map(|part| part.trim().parse::<usize>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| LatticeError::MalformedKey(key.to_string()))?;
        Self::try_from(ranks).map_err(|_| LatticeError::MalformedKey(key.to_string()))
    }
}

impl TryFrom<Vec<usize>> for Combination {
    type Error = LatticeError;

    fn try_from(ranks: Vec<usize>) -> Result<Self, Self::Error> {
        if !is_strictly_increasing(&ranks) {
            return Err(LatticeError::MalformedKey(format!("{ranks:?}")));
        }
        Ok(Self(SmallVec::from_vec(ranks)))
    }
}

impl From<Combination> for Vec<usize> {
    fn from(combination: Combination) -> Self {
        combination.0.into_vec()
    }
}
