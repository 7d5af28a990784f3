//! Error types for the CLI

use std::path::PathBuf;

use thiserror::Error;
use thiserror_ext::Arc as ArcDerive;

/// Main CLI error type
#[derive(Error, Debug)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Input tree error
    #[error("Input error: {0}")]
    Input(#[from] InputError),

    /// Solver error
    #[error("Solver error: {0}")]
    Solver(#[from] aoc_solver::SolverError),

    /// Registration error
    #[error("Registration error: {0}")]
    Registration(#[from] aoc_solver::RegistrationError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Executor error (wraps Arc for cheap cloning)
    #[error("{0}")]
    Executor(#[from] ArcExecutorError),
}

/// Errors locating or reading puzzle inputs
#[derive(Error, Debug)]
pub enum InputError {
    /// The input directory itself is missing
    #[error("input directory {} does not exist", .0.display())]
    MissingDirectory(PathBuf),

    /// No input file for a puzzle
    #[error("no input file at {}", .0.display())]
    NotFound(PathBuf),

    /// The file exists but could not be read
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Executor-specific errors
#[derive(Error, Debug, ArcDerive)]
#[thiserror_ext(newtype(name = ArcExecutorError))]
pub enum ExecutorError {
    /// Input could not be loaded
    #[error("Input failed for {year}/{day}: {source}")]
    Input {
        year: u16,
        day: u8,
        #[source]
        source: InputError,
    },

    /// Channel send error
    #[error("Channel send error")]
    ChannelSend,

    /// Thread pool creation failed
    #[error("Thread pool creation failed: {0}")]
    ThreadPool(String),

    /// Multiple errors collected during parallel execution
    #[error("Multiple errors occurred ({} total)", .0.len())]
    Multiple(Vec<ArcExecutorError>),
}

impl ArcExecutorError {
    /// Merge two errors into one `Multiple`, flattening nested ones
    pub fn combine(first: ArcExecutorError, second: ArcExecutorError) -> ArcExecutorError {
        let mut errors = first.flatten();
        errors.extend(second.flatten());
        ExecutorError::Multiple(errors).into()
    }

    /// Combine an optional error with a new error
    pub fn combine_opt(
        existing: Option<ArcExecutorError>,
        new: ArcExecutorError,
    ) -> ArcExecutorError {
        match existing {
            Some(e) => Self::combine(e, new),
            None => new,
        }
    }

    fn flatten(self) -> Vec<ArcExecutorError> {
        match self.inner() {
            ExecutorError::Multiple(errors) => errors.clone(),
            _ => vec![self],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(err: &ArcExecutorError) -> usize {
        match err.inner() {
            ExecutorError::Multiple(errors) => errors.len(),
            _ => 1,
        }
    }

    #[test]
    fn test_combine_flattens() {
        let single = || ArcExecutorError::from(ExecutorError::ChannelSend);

        let pair = ArcExecutorError::combine(single(), single());
        assert_eq!(count(&pair), 2);

        let three = ArcExecutorError::combine(pair.clone(), single());
        assert_eq!(count(&three), 3);

        let five = ArcExecutorError::combine(pair, three);
        assert_eq!(count(&five), 5);
        assert_eq!(five.to_string(), "Multiple errors occurred (5 total)");
    }

    #[test]
    fn test_combine_opt() {
        let first = ArcExecutorError::combine_opt(None, ExecutorError::ChannelSend.into());
        assert_eq!(count(&first), 1);
        let both = ArcExecutorError::combine_opt(
            Some(first),
            ExecutorError::ThreadPool("no threads".into()).into(),
        );
        assert_eq!(count(&both), 2);
    }
}
