use anyhow::{Context, anyhow};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::parse_lines;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 4, tags = ["2022", "ranges"])]
pub struct Solver;

/// Inclusive section range assigned to one elf
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sections {
    start: u32,
    end: u32,
}

impl Sections {
    fn contains(&self, other: &Sections) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    fn overlaps(&self, other: &Sections) -> bool {
        self.start <= other.end && other.start <= self.end
    }
}

fn parse_sections(range: &str) -> anyhow::Result<Sections> {
    let (start, end) = range
        .split_once('-')
        .ok_or_else(|| anyhow!("expected a range like 2-4, got {:?}", range))?;
    Ok(Sections {
        start: start.parse().with_context(|| format!("bad range start {:?}", start))?,
        end: end.parse().with_context(|| format!("bad range end {:?}", end))?,
    })
}

fn parse_pair(line: &str) -> anyhow::Result<(Sections, Sections)> {
    let (first, second) = line
        .split_once(',')
        .ok_or_else(|| anyhow!("expected two comma separated ranges, got {:?}", line))?;
    Ok((parse_sections(first)?, parse_sections(second)?))
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<(Sections, Sections)>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        parse_lines(input, parse_pair)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let count = shared
            .iter()
            .filter(|(a, b)| a.contains(b) || b.contains(a))
            .count();
        Ok(count.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let count = shared.iter().filter(|(a, b)| a.overlaps(b)).count();
        Ok(count.to_string())
    }
}
