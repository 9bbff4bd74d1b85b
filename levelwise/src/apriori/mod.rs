pub mod budget;
pub mod candidates;
pub mod combination;
pub mod config;
pub mod error;
pub mod lattice;
pub mod mining;
pub mod oracle;
pub mod pli;
pub mod storage;
pub mod support;
pub mod ucc;
pub mod uniqueness;


pub use candidates::{generate_candidates, Candidate};
pub use combination::{Combination, GroundSet};
pub use config::SearchConfig;
pub use error::{LatticeError, Result};
pub use lattice::{search, Layer, LevelwiseSearch, SearchOutcome, SearchPhase, Termination};
pub use mining::{
    apriori_algorithm, apriori_with_config, mine_frequent_sets, mine_frequent_sets_with_config,
    FrequentItemsets,
};
pub use oracle::FeasibilityOracle;
pub use pli::PositionListIndex;
pub use storage::{FrequentLevel, ItemsetStorage};
pub use support::{min_count_from_fraction, SupportOracle, TransactionDb};
pub use ucc::{
    discover_unique_combinations, discover_unique_combinations_with_config,
    UniqueColumnCombinations,
};
pub use uniqueness::UniquenessOracle;
