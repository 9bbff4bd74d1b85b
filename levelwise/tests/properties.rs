//! Property tests for the levelwise search against brute-force references

use levelwise::apriori::{
    discover_unique_combinations, generate_candidates, mine_frequent_sets,
    mine_frequent_sets_with_config, search, Combination, PositionListIndex, SearchConfig,
    UniquenessOracle,
};
use proptest::prelude::*;
use std::collections::{BTreeSet, HashSet};

const NUM_ITEMS: usize = 7;

fn arb_transactions() -> impl Strategy<Value = Vec<Vec<usize>>> {
    prop::collection::vec(prop::collection::vec(0..NUM_ITEMS, 0..5), 1..16)
}

fn arb_table() -> impl Strategy<Value = Vec<Vec<u8>>> {
    (1usize..10).prop_flat_map(|rows| {
        prop::collection::vec(prop::collection::vec(0u8..3, rows), 0..5)
    })
}

fn ranks_of(mask: usize) -> Vec<usize> {
    (0..usize::BITS as usize).filter(|&bit| mask & (1 << bit) != 0).collect()
}

fn brute_force_support(transactions: &[Vec<usize>], items: &[usize]) -> usize {
    transactions
        .iter()
        .filter(|transaction| items.iter().all(|item| transaction.contains(item)))
        .count()
}

fn projection_is_unique(table: &[Vec<u8>], columns: &[usize]) -> bool {
    let rows = table.first().map_or(0, Vec::len);
    let projected: HashSet<Vec<u8>> = (0..rows)
        .map(|row| columns.iter().map(|&column| table[column][row]).collect())
        .collect();
    projected.len() == rows
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Mining returns exactly the itemsets a full subset scan finds frequent,
    /// with matching supports
    #[test]
    fn frequent_sets_match_brute_force(
        transactions in arb_transactions(),
        threshold in any::<prop::sample::Index>(),
    ) {
        let min_support = threshold.index(transactions.len()) + 1;
        let frequent = mine_frequent_sets(&transactions, min_support).unwrap();

        let items = frequent.ground();
        let mut expected = BTreeSet::new();
        for mask in 1..(1usize << items.len()) {
            let elements: Vec<usize> = ranks_of(mask)
                .into_iter()
                .map(|rank| *items.element(rank).unwrap())
                .collect();
            if brute_force_support(&transactions, &elements) >= min_support {
                expected.insert(elements);
            }
        }

        let mut found = BTreeSet::new();
        for (elements, support) in frequent.iter() {
            let elements: Vec<usize> = elements.into_iter().copied().collect();
            prop_assert_eq!(support, brute_force_support(&transactions, &elements));
            found.insert(elements);
        }
        prop_assert_eq!(found, expected);
    }

    /// Every immediate subset of a frequent itemset is frequent one level down
    #[test]
    fn frequent_sets_are_downward_closed(
        transactions in arb_transactions(),
        min_support in 1usize..4,
    ) {
        let min_support = min_support.min(transactions.len());
        if let Ok(frequent) = mine_frequent_sets(&transactions, min_support) {
            let by_size = frequent.by_size();
            for (&size, combinations) in by_size.iter().filter(|(size, _)| **size > 1) {
                let below = &by_size[&(size - 1)];
                for combination in combinations {
                    for subset in combination.subsets() {
                        prop_assert!(below.binary_search(&subset).is_ok());
                    }
                }
            }
            prop_assert!(frequent.levels().len() <= frequent.ground().len());
        }
    }

    /// Parallel and sequential evaluation agree
    #[test]
    fn parallel_matches_sequential(transactions in arb_transactions()) {
        let parallel = mine_frequent_sets(&transactions, 1);
        let sequential =
            mine_frequent_sets_with_config(&transactions, 1, SearchConfig::new().sequential());
        match (parallel, sequential) {
            (Ok(parallel), Ok(sequential)) => {
                prop_assert_eq!(parallel.by_size(), sequential.by_size());
            }
            (parallel, sequential) => {
                prop_assert_eq!(parallel.is_err(), sequential.is_err());
            }
        }
    }

    /// Candidates are sorted, unique, joined from eligible parents and have
    /// only eligible subsets; nothing with eligible subsets is left out
    #[test]
    fn candidate_generation_is_sound_and_complete(
        masks in prop::collection::btree_set(0usize..(1 << NUM_ITEMS), 0..40),
        size in 1usize..4,
    ) {
        let eligible: Vec<Combination> = masks
            .into_iter()
            .map(ranks_of)
            .filter(|ranks| ranks.len() == size)
            .map(|ranks| Combination::from_ranks(&ranks))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let candidates = generate_candidates(&eligible);
        for pair in candidates.windows(2) {
            prop_assert!(pair[0].combination < pair[1].combination);
        }
        for candidate in &candidates {
            let combination = &candidate.combination;
            prop_assert_eq!(combination.len(), size + 1);
            prop_assert_eq!(&combination.without(size), &eligible[candidate.left]);
            prop_assert_eq!(&combination.without(size - 1), &eligible[candidate.right]);
            for subset in combination.subsets() {
                prop_assert!(eligible.binary_search(&subset).is_ok());
            }
        }

        let emitted: BTreeSet<Combination> =
            candidates.into_iter().map(|candidate| candidate.combination).collect();
        for mask in 0..(1usize << NUM_ITEMS) {
            let ranks = ranks_of(mask);
            if ranks.len() != size + 1 {
                continue;
            }
            let combination = Combination::from_ranks(&ranks);
            let closed = combination
                .subsets()
                .all(|subset| eligible.binary_search(&subset).is_ok());
            prop_assert_eq!(closed, emitted.contains(&combination));
        }
    }

    /// Probing-table intersection equals pairwise cluster intersection
    #[test]
    fn pli_intersection_matches_naive(
        (left, right) in (1usize..30).prop_flat_map(|rows| (
            prop::collection::vec(0u8..5, rows),
            prop::collection::vec(0u8..5, rows),
        ))
    ) {
        let left = PositionListIndex::from_column(&left);
        let right = PositionListIndex::from_column(&right);

        let probed = left.intersect(&right);
        prop_assert_eq!(probed.normalized(), left.intersect_naive(&right).normalized());
        prop_assert!(probed.clusters().iter().all(|cluster| cluster.len() > 1));
        prop_assert!(probed.key_error() <= left.key_error().min(right.key_error()));
    }

    /// Intersected indexes match the index of the combined column
    #[test]
    fn pli_intersection_matches_combined_column(
        (left, right) in (1usize..30).prop_flat_map(|rows| (
            prop::collection::vec(0u8..4, rows),
            prop::collection::vec(0u8..4, rows),
        ))
    ) {
        let combined: Vec<(u8, u8)> = left.iter().copied().zip(right.iter().copied()).collect();
        let probed = PositionListIndex::from_column(&left)
            .intersect(&PositionListIndex::from_column(&right));
        prop_assert_eq!(
            probed.normalized(),
            PositionListIndex::from_column(&combined).normalized()
        );
    }

    /// Discovered column combinations are exactly the unique projections all
    /// of whose immediate subsets are non-unique
    #[test]
    fn minimal_uccs_match_brute_force(table in arb_table()) {
        let columns: Vec<(usize, Vec<u8>)> = table.iter().cloned().enumerate().collect();
        let uccs = discover_unique_combinations(&columns).unwrap();

        let mut expected = BTreeSet::new();
        for mask in 1..(1usize << table.len()) {
            let ranks = ranks_of(mask);
            let minimal = projection_is_unique(&table, &ranks)
                && ranks.iter().all(|&dropped| {
                    let rest: Vec<usize> = ranks.iter().copied().filter(|&r| r != dropped).collect();
                    rest.is_empty() || !projection_is_unique(&table, &rest)
                });
            if minimal {
                expected.insert(ranks);
            }
        }

        let found: BTreeSet<Vec<usize>> = uccs
            .names()
            .into_iter()
            .map(|names| names.into_iter().copied().collect())
            .collect();
        prop_assert_eq!(found, expected);
    }

    /// The driver never runs more levels than there are columns
    #[test]
    fn search_terminates_within_ground_size(table in arb_table()) {
        let columns: Vec<&[u8]> = table.iter().map(Vec::as_slice).collect();
        let oracle = UniquenessOracle::from_columns(&columns);
        let outcome = search(&oracle, SearchConfig::default());
        prop_assert!(outcome.levels_explored() <= table.len().max(1));
        for (level, layer) in outcome.layers.iter().enumerate() {
            prop_assert_eq!(layer.size(), level + 1);
        }
    }
}
