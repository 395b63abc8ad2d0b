//! Error types for the analytics toolkit
//!
//! Provides a unified error type for all analytics crates, plus a [`Status`]
//! accumulator for checks that can report more than one problem at once.

use thiserror::Error;

/// Core error type for analytics operations
#[derive(Error, Debug)]
pub enum Error {
    /// No input table was bound to the algorithm
    #[error("Input numeric table is not set")]
    NullInputTable,

    /// No result was registered with the algorithm
    #[error("Result is not set")]
    NullResult,

    /// A required parameter field is missing
    #[error("Parameter is not set: {0}")]
    NullParameter(String),

    /// Two sizes that must agree do not
    #[error("Dimension mismatch in {context}: expected {expected}, got {actual}")]
    DimensionMismatch {
        context: String,
        expected: usize,
        actual: usize,
    },

    /// Computation method not supported
    #[error("Unsupported method: {0}")]
    UnsupportedMethod(String),

    /// Result buffers could not be allocated
    #[error("Allocation failure: {0}")]
    AllocationFailure(String),

    /// Initializer parameter lacks an engine or a layer
    #[error("Random engine or layer is not set")]
    NullEngineOrLayer,

    /// Initializer result has no tensor in the value slot
    #[error("Target tensor is missing from the result")]
    MissingTargetTensor,

    /// A column has zero variance and the policy rejects it
    #[error("Column {column} has zero variance")]
    DegenerateColumn { column: usize },

    /// Invalid input data
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Threading or parallelization error
    #[error("Execution error: {0}")]
    Execution(String),

    /// Feature not available
    #[error("Feature not available: {0}")]
    FeatureNotAvailable(String),

    /// Several independent failures reported together
    #[error("{} errors: {}", .0.len(), join_errors(.0))]
    Composite(Vec<Error>),

    /// Other errors
    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

fn join_errors(errors: &[Error]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

impl Error {
    /// Create an error for size mismatch
    pub fn size_mismatch(expected: usize, actual: usize, context: &str) -> Self {
        Self::DimensionMismatch {
            context: context.to_string(),
            expected,
            actual,
        }
    }

    /// Create an error for an empty table
    pub fn empty_table(rows: usize, cols: usize) -> Self {
        Self::InvalidInput(format!(
            "table must have at least one row and one column, got {rows}x{cols}"
        ))
    }

    /// Error codes carried by this error, flattening composites
    pub fn codes(&self) -> Vec<&Error> {
        match self {
            Self::Composite(errors) => errors.iter().flat_map(|e| e.codes()).collect(),
            other => vec![other],
        }
    }
}

/// Accumulates zero or more errors from independent checks
#[derive(Debug, Default)]
pub struct Status {
    errors: Vec<Error>,
}

impl Status {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an error
    pub fn push(&mut self, error: Error) {
        self.errors.push(error);
    }

    /// Record the error of a failed check, if any
    pub fn check(&mut self, result: Result<()>) {
        if let Err(e) = result {
            self.push(e);
        }
    }

    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    /// Collapse into a result: one error is returned as-is, several as `Composite`
    pub fn into_result(self) -> Result<()> {
        match self.into_error() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// The collected error, if any
    pub fn into_error(mut self) -> Option<Error> {
        match self.errors.len() {
            0 => None,
            1 => Some(self.errors.remove(0)),
            _ => Some(Error::Composite(self.errors)),
        }
    }
}
