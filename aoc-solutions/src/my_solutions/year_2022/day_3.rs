use anyhow::{anyhow, bail};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use thiserror::Error;

use crate::utils::parse_lines;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 3, tags = ["2022", "sets"])]
pub struct Solver;

/// Set of item priorities (1..=52), one bit per priority
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ItemSet(u64);

impl ItemSet {
    fn from_items(items: &str) -> anyhow::Result<Self> {
        items.chars().try_fold(ItemSet::default(), |set, item| {
            Ok(ItemSet(set.0 | (1 << priority(item)?)))
        })
    }

    fn intersect(self, other: ItemSet) -> ItemSet {
        ItemSet(self.0 & other.0)
    }

    /// Sum of the priorities in the set
    fn priority_sum(self) -> u32 {
        (1..=52u32).filter(|p| self.0 & (1 << p) != 0).sum()
    }
}

/// a-z map to 1-26, A-Z map to 27-52
fn priority(item: char) -> anyhow::Result<u32> {
    match item {
        'a'..='z' => Ok(item as u32 - 'a' as u32 + 1),
        'A'..='Z' => Ok(item as u32 - 'A' as u32 + 27),
        other => Err(anyhow!("unknown item {:?}", other)),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rucksack {
    left: ItemSet,
    right: ItemSet,
}

impl Rucksack {
    fn all(&self) -> ItemSet {
        ItemSet(self.left.0 | self.right.0)
    }
}

fn parse_rucksack(line: &str) -> anyhow::Result<Rucksack> {
    if !line.is_ascii() {
        bail!("rucksack {:?} contains non-ascii items", line);
    }
    if line.len() % 2 != 0 {
        bail!("rucksack {:?} has an odd number of items", line);
    }
    let (left, right) = line.split_at(line.len() / 2);
    Ok(Rucksack {
        left: ItemSet::from_items(left)?,
        right: ItemSet::from_items(right)?,
    })
}

#[derive(Debug, Error)]
#[error("{0} rucksacks cannot be split into groups of three")]
pub struct UnevenGroups(usize);

impl AocParser for Solver {
    type SharedData<'a> = Vec<Rucksack>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        parse_lines(input, parse_rucksack)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let total: u32 = shared
            .iter()
            .map(|sack| sack.left.intersect(sack.right).priority_sum())
            .sum();
        Ok(total.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        if shared.len() % 3 != 0 {
            return Err(SolveError::failed(UnevenGroups(shared.len())));
        }
        let total: u32 = shared
            .chunks_exact(3)
            .map(|group| {
                group
                    .iter()
                    .map(Rucksack::all)
                    .fold(ItemSet(u64::MAX), ItemSet::intersect)
                    .priority_sum()
            })
            .sum();
        Ok(total.to_string())
    }
}
