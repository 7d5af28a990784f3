use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use itertools::Itertools;
use thiserror::Error;

use crate::utils::require_input;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 6, tags = ["2022", "strings"])]
pub struct Solver;

const START_OF_PACKET: usize = 4;
const START_OF_MESSAGE: usize = 14;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("no run of {window} distinct characters in the datastream")]
pub struct NoMarker {
    window: usize,
}

/// Number of characters processed once the last `window` characters are all different
pub fn marker_end(stream: &str, window: usize) -> Result<usize, NoMarker> {
    let chars: Vec<char> = stream.chars().collect();
    chars
        .windows(window)
        .position(|w| w.iter().all_unique())
        .map(|start| start + window)
        .ok_or(NoMarker { window })
}

impl AocParser for Solver {
    type SharedData<'a> = &'a str;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let input = require_input(input, "datastream")?;
        Ok(input.lines().next().unwrap_or_default().trim())
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        marker_end(shared, START_OF_PACKET)
            .map(|n| n.to_string())
            .map_err(SolveError::failed)
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        marker_end(shared, START_OF_MESSAGE)
            .map(|n| n.to_string())
            .map_err(SolveError::failed)
    }
}
