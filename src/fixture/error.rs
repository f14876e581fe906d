use thiserror::Error;

//─────────────────────────────────────────────────────────────────────────────

/// Error type for fixture generation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FixtureError {
    /// A column did not have the same number of values as the first column.
    #[error("Column '{column}' has {actual} value(s), expected {expected}")]
    ColumnLength {
        column: String,
        expected: usize,
        actual: usize,
    },

    /// A calendar constant could not be represented.
    #[error("Invalid fixture date: {0}")]
    InvalidDate(String),
}
