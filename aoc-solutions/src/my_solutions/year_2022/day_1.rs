use anyhow::{Context, anyhow};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use thiserror::Error;

use crate::utils::require_input;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 1, tags = ["2022", "sums"])]
pub struct Solver;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("the top {elves} elves carry more than {} calories", u64::MAX)]
pub struct CalorieOverflow {
    elves: usize,
}

/// Calories carried per elf, largest first
#[derive(Debug)]
pub struct SharedData {
    totals: Vec<u64>,
}

impl AocParser for Solver {
    type SharedData<'a> = SharedData;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let mut totals = require_input(input, "calorie list")?
            .split("\n\n")
            .enumerate()
            .map(|(elf_idx, group)| {
                group
                    .lines()
                    .filter(|line| !line.trim().is_empty())
                    .try_fold(0u64, |total, line| {
                        let calories = line
                            .trim()
                            .parse::<u64>()
                            .with_context(|| format!("invalid calories {:?}", line))?;
                        total
                            .checked_add(calories)
                            .ok_or_else(|| anyhow!("calorie total overflows at {:?}", line))
                    })
                    .map_err(|e| anyhow!("(elf {}) {}", elf_idx + 1, e))
            })
            .collect::<anyhow::Result<Vec<_>>>()
            .map_err(|e| ParseError::InvalidFormat(e.to_string()))?;

        totals.sort_unstable_by(|a, b| b.cmp(a));
        Ok(SharedData { totals })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        top_total(shared, 1).map(|total| total.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        top_total(shared, 3).map(|total| total.to_string())
    }
}

fn top_total(shared: &SharedData, elves: usize) -> Result<u64, SolveError> {
    shared
        .totals
        .iter()
        .take(elves)
        .try_fold(0u64, |sum, &total| sum.checked_add(total))
        .ok_or_else(|| SolveError::failed(CalorieOverflow { elves }))
}
