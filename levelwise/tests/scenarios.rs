//! End-to-end runs on small hand-checked inputs

use levelwise::apriori::{
    discover_unique_combinations, discover_unique_combinations_with_config, mine_frequent_sets,
    Combination, SearchConfig, Termination,
};

fn init_logging() {
    let _ = pretty_env_logger::try_init();
}

#[test]
fn shopping_baskets_stop_after_pairs() {
    init_logging();
    let transactions = vec![
        vec!["a", "b"],
        vec!["a", "b", "c"],
        vec!["a"],
        vec!["b", "c"],
    ];

    let frequent = mine_frequent_sets(&transactions, 2).unwrap();

    let singles: Vec<_> = frequent.level(1).unwrap().iter_with_support().collect();
    assert_eq!(singles, vec![(&[0][..], 3), (&[1][..], 3), (&[2][..], 2)]);

    let pairs: Vec<Vec<&str>> = frequent
        .iter()
        .filter(|(items, _)| items.len() == 2)
        .map(|(items, _)| items.into_iter().copied().collect())
        .collect();
    assert_eq!(pairs, vec![vec!["a", "b"], vec!["b", "c"]]);

    assert!(frequent.level(3).is_none());
    assert_eq!(frequent.termination(), Termination::Exhausted);
}

#[test]
fn interleaved_columns_are_only_unique_together() {
    init_logging();
    // Rows 0 and 2 agree on B, rows 0 and 1 agree on A
    let columns = vec![("A", vec![1, 1, 2, 2]), ("B", vec![1, 2, 1, 2])];

    let uccs = discover_unique_combinations(&columns).unwrap();

    assert_eq!(uccs.minimal(), &[Combination::from_ranks(&[0, 1])]);
    assert_eq!(uccs.names(), vec![vec![&"A", &"B"]]);
}

#[test]
fn key_column_found_without_testing_supersets() {
    init_logging();
    let columns = vec![("A", vec![1, 1, 2, 2]), ("B", vec![1, 2, 3, 4])];

    let uccs = discover_unique_combinations_with_config(&columns, SearchConfig::new().sequential())
        .unwrap();

    assert_eq!(uccs.minimal(), &[Combination::singleton(1)]);
    assert_eq!(uccs.names(), vec![vec![&"B"]]);
    assert_eq!(uccs.termination(), Termination::Exhausted);
}

#[test]
fn empty_transaction_list_yields_nothing() {
    init_logging();
    let transactions: Vec<Vec<String>> = Vec::new();

    let frequent = mine_frequent_sets(&transactions, 1).unwrap();

    assert!(frequent.is_empty());
    assert!(frequent.by_size().is_empty());
    assert_eq!(frequent.termination(), Termination::Exhausted);
}

#[test]
fn composite_key_over_a_small_table() {
    init_logging();
    // (first, last) identifies a person, neither column does on its own
    let columns = vec![
        ("first", vec!["ann", "ann", "bob", "bob"]),
        ("last", vec!["lee", "kim", "lee", "kim"]),
        ("team", vec!["red", "red", "red", "blue"]),
    ];

    let uccs = discover_unique_combinations(&columns).unwrap();

    // (last, team) repeats on rows 0 and 2, so no triple is ever tested
    assert_eq!(uccs.names(), vec![vec![&"first", &"last"]]);
    assert!(uccs.contains(&["last", "first"]));
    assert!(!uccs.contains(&["first", "team"]));
}

#[test]
fn level_limit_returns_partial_uccs() {
    init_logging();
    let columns = vec![
        ("A", vec![1, 1, 2, 2]),
        ("B", vec![1, 1, 1, 2]),
        ("C", vec![1, 2, 1, 1]),
    ];

    let limited =
        discover_unique_combinations_with_config(&columns, SearchConfig::new().with_max_level(2))
            .unwrap();
    assert!(limited.is_empty());
    assert_eq!(limited.termination(), Termination::LevelLimit);

    let full = discover_unique_combinations(&columns).unwrap();
    assert_eq!(full.names(), vec![vec![&"A", &"B", &"C"]]);
}
