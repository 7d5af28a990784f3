use anyhow::{anyhow, bail};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::parse_lines;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 2, tags = ["2022", "games"])]
pub struct Solver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Rock,
    Paper,
    Scissors,
}

impl Shape {
    fn score(self) -> u32 {
        match self {
            Shape::Rock => 1,
            Shape::Paper => 2,
            Shape::Scissors => 3,
        }
    }

    /// The shape that beats `self`
    fn winner(self) -> Shape {
        match self {
            Shape::Rock => Shape::Paper,
            Shape::Paper => Shape::Scissors,
            Shape::Scissors => Shape::Rock,
        }
    }

    /// The shape that `self` beats
    fn loser(self) -> Shape {
        match self {
            Shape::Rock => Shape::Scissors,
            Shape::Paper => Shape::Rock,
            Shape::Scissors => Shape::Paper,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Loss,
    Draw,
    Win,
}

impl Outcome {
    fn of(opponent: Shape, mine: Shape) -> Outcome {
        if opponent == mine {
            Outcome::Draw
        } else if mine == opponent.winner() {
            Outcome::Win
        } else {
            Outcome::Loss
        }
    }

    fn score(self) -> u32 {
        match self {
            Outcome::Loss => 0,
            Outcome::Draw => 3,
            Outcome::Win => 6,
        }
    }
}

/// Second column of the strategy guide; its meaning differs between parts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hint {
    X,
    Y,
    Z,
}

impl Hint {
    fn as_shape(self) -> Shape {
        match self {
            Hint::X => Shape::Rock,
            Hint::Y => Shape::Paper,
            Hint::Z => Shape::Scissors,
        }
    }

    fn as_outcome(self) -> Outcome {
        match self {
            Hint::X => Outcome::Loss,
            Hint::Y => Outcome::Draw,
            Hint::Z => Outcome::Win,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Round {
    opponent: Shape,
    hint: Hint,
}

fn round_score(opponent: Shape, mine: Shape) -> u32 {
    mine.score() + Outcome::of(opponent, mine).score()
}

fn parse_round(line: &str) -> anyhow::Result<Round> {
    let (opponent, hint) = line
        .split_once(' ')
        .ok_or_else(|| anyhow!("expected two columns, got {:?}", line))?;

    let opponent = match opponent {
        "A" => Shape::Rock,
        "B" => Shape::Paper,
        "C" => Shape::Scissors,
        other => bail!("opponent move must be A, B or C, got {:?}", other),
    };
    let hint = match hint.trim() {
        "X" => Hint::X,
        "Y" => Hint::Y,
        "Z" => Hint::Z,
        other => bail!("second column must be X, Y or Z, got {:?}", other),
    };

    Ok(Round { opponent, hint })
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Round>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        parse_lines(input, parse_round)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let total: u32 = shared
            .iter()
            .map(|round| round_score(round.opponent, round.hint.as_shape()))
            .sum();
        Ok(total.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let total: u32 = shared
            .iter()
            .map(|round| {
                let mine = match round.hint.as_outcome() {
                    Outcome::Draw => round.opponent,
                    Outcome::Win => round.opponent.winner(),
                    Outcome::Loss => round.opponent.loser(),
                };
                round_score(round.opponent, mine)
            })
            .sum();
        Ok(total.to_string())
    }
}
