//! The traits every puzzle implements

use crate::error::{ParseError, SolveError};

/// Parses raw puzzle input into the data shared by every part.
///
/// # Example
///
/// ```
/// use aoc_solver::{AocParser, ParseError};
///
/// struct Calories;
///
/// impl AocParser for Calories {
///     type SharedData<'a> = Vec<u32>;
///
///     fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
///         input
///             .split("\n\n")
///             .map(|group| {
///                 group
///                     .lines()
///                     .map(|l| l.parse::<u32>().map_err(|e| ParseError::InvalidFormat(e.to_string())))
///                     .sum::<Result<u32, ParseError>>()
///             })
///             .collect()
///     }
/// }
///
/// assert_eq!(Calories::parse("1\n2\n\n4").unwrap(), vec![3, 4]);
/// ```
pub trait AocParser {
    /// Parsed input plus whatever the parts cache between them.
    ///
    /// May borrow from the input text for the lifetime `'a`.
    type SharedData<'a>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError>;
}

/// Solves part `N` of a puzzle.
///
/// Parts receive mutable access to the shared data so that work done by one
/// part (a built tree, a cached total) can be reused by the next.
pub trait PartSolver<const N: u8>: AocParser {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError>;
}

/// A complete puzzle solver: a parser plus a fixed, ordered set of parts.
///
/// Usually implemented with `#[derive(AocSolver)]`, which dispatches
/// `solve_part` to the matching [`PartSolver`] implementation.
pub trait Solver: AocParser {
    /// Parts are numbered `1..=PARTS`
    const PARTS: u8;

    /// Dispatch to part `part`, yielding [`SolveError::PartNotImplemented`]
    /// for numbers without a [`PartSolver`]
    fn solve_part(shared: &mut Self::SharedData<'_>, part: u8) -> Result<String, SolveError>;
}

/// Range-checked part selection, available on every [`Solver`].
pub trait SolverExt: Solver {
    /// Like [`Solver::solve_part`], but rejects parts outside `1..=PARTS` with
    /// [`SolveError::PartOutOfRange`] before dispatching.
    fn solve_part_checked_range(
        shared: &mut Self::SharedData<'_>,
        part: u8,
    ) -> Result<String, SolveError> {
        if (1..=Self::PARTS).contains(&part) {
            Self::solve_part(shared, part)
        } else {
            Err(SolveError::PartOutOfRange(part))
        }
    }
}

impl<T: Solver + ?Sized> SolverExt for T {}
