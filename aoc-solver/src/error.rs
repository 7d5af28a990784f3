//! Failures raised while registering, parsing and solving puzzles

use thiserror::Error;

/// Why a puzzle input could not be turned into shared data
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A line or block that does not fit the puzzle grammar
    #[error("Invalid format: {0}")]
    InvalidFormat(String),
    /// A section the puzzle needs is absent, e.g. an empty transcript
    #[error("Missing data: {0}")]
    MissingData(String),
    #[error("Parse error: {0}")]
    Other(String),
}

/// Why a single part produced no answer
#[derive(Debug, Error)]
pub enum SolveError {
    #[error("Part {0} is not implemented")]
    PartNotImplemented(u8),
    /// Part is 0 or above `Solver::PARTS`
    #[error("Part {0} is out of range")]
    PartOutOfRange(u8),
    /// The puzzle logic rejected the data (bad move, unknown directory, ...)
    #[error("Solve failed: {0}")]
    SolveFailed(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl SolveError {
    /// Wrap a domain error raised while solving
    pub fn failed<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::SolveFailed(Box::new(error))
    }
}

/// Anything that stops a (year, day, part) from yielding an answer
#[derive(Debug, Error)]
pub enum SolverError {
    /// Nothing registered in the slot
    #[error("Solver not found for year {0} day {1}")]
    NotFound(u16, u8),
    #[error("Invalid year/day: {0}/{1}")]
    InvalidYearDay(u16, u8),
    #[error("Parse error: {0}")]
    ParseError(#[from] ParseError),
    #[error("Solve error: {0}")]
    SolveError(#[from] SolveError),
}

/// Rejected registry insertions
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    /// Two solvers claimed the same year/day
    #[error("Duplicate solver registration for year {0} day {1}")]
    DuplicateFactory(u16, u8),
    /// Year/day has no slot in the table
    #[error("Invalid year/day for registration: {0}/{1}")]
    InvalidYearDay(u16, u8),
}
