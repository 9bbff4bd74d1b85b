use thiserror::Error;

/// Input validation failures. Invariant violations inside the search are
/// programming errors and panic instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LatticeError {
    #[error("support threshold {threshold} outside 1..={transactions}")]
    InvalidThreshold { threshold: usize, transactions: usize },
    #[error("relative support {0} outside (0, 1]")]
    InvalidSupportFraction(f64),
    #[error("column `{column}` has {found} rows, expected {expected}")]
    InconsistentColumnLengths {
        column: String,
        expected: usize,
        found: usize,
    },
    #[error("column `{0}` appears more than once")]
    DuplicateColumn(String),
    #[error("malformed combination key `{0}`")]
    MalformedKey(String),
}

pub type Result<T> = std::result::Result<T, LatticeError>;
