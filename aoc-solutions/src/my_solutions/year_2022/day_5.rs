//! Supply Stacks: a crane rearranging stacks of labelled crates.
//!
//! The input is a drawing of the initial stacks, a numbered footer naming
//! each stack, a blank line, and then one `move N from A to B` per line:
//!
//! ```text
//!     [D]
//! [N] [C]
//! [Z] [M] [P]
//!  1   2   3
//!
//! move 1 from 2 to 1
//! ```
//!
//! Both parts replay the same moves on their own copy of the drawing. The
//! older crane moves crates one at a time, so a moved block lands reversed;
//! the newer one lifts the block in one go and keeps its order.

use std::collections::BTreeMap;
use std::fmt;

use anyhow::{Context, anyhow, bail};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use thiserror::Error;
use tracing::debug;

use crate::utils::parse_lines;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 5, tags = ["2022", "stacks"])]
pub struct Solver;

/// Crates bottom to top; the last element is the top crate
pub type Stack = Vec<char>;

/// Stacks keyed by the identifier printed under them
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StackSet {
    stacks: BTreeMap<u32, Stack>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveOp {
    pub quantity: usize,
    pub from: u32,
    pub to: u32,
}

impl fmt::Display for MoveOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "move {} from {} to {}", self.quantity, self.from, self.to)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CraneModel {
    /// Moves one crate per step, reversing the moved block
    OneAtATime,
    /// Moves the whole block at once, preserving its order
    Bulk,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid move `{op}`: {reason}")]
pub struct InvalidMove {
    pub op: MoveOp,
    pub reason: InvalidMoveReason,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidMoveReason {
    #[error("there is no stack {0}")]
    UnknownStack(u32),
    #[error("stack {stack} holds {available} crates")]
    NotEnoughCrates { stack: u32, available: usize },
}

impl StackSet {
    pub fn new(stacks: BTreeMap<u32, Stack>) -> Self {
        Self { stacks }
    }

    pub fn get(&self, id: u32) -> Option<&[char]> {
        self.stacks.get(&id).map(Vec::as_slice)
    }

    pub fn total_crates(&self) -> usize {
        self.stacks.values().map(Vec::len).sum()
    }

    /// Top crate of every stack in ascending id order; empty stacks are skipped
    pub fn top_crates(&self) -> String {
        self.stacks.values().filter_map(|stack| stack.last()).collect()
    }

    /// Apply one move, leaving the stacks untouched if it is invalid
    pub fn apply(&mut self, op: &MoveOp, model: CraneModel) -> Result<(), InvalidMove> {
        let invalid = |reason| InvalidMove { op: *op, reason };

        let available = self
            .stacks
            .get(&op.from)
            .map(Vec::len)
            .ok_or_else(|| invalid(InvalidMoveReason::UnknownStack(op.from)))?;
        if !self.stacks.contains_key(&op.to) {
            return Err(invalid(InvalidMoveReason::UnknownStack(op.to)));
        }
        if op.quantity > available {
            return Err(invalid(InvalidMoveReason::NotEnoughCrates {
                stack: op.from,
                available,
            }));
        }
        // lifting crates off a stack and putting them back, one by one or all
        // at once, restores the original order
        if op.from == op.to {
            return Ok(());
        }

        let source = self
            .stacks
            .get_mut(&op.from)
            .ok_or_else(|| invalid(InvalidMoveReason::UnknownStack(op.from)))?;
        let mut block = source.split_off(available - op.quantity);
        if model == CraneModel::OneAtATime {
            block.reverse();
        }
        self.stacks
            .get_mut(&op.to)
            .ok_or_else(|| invalid(InvalidMoveReason::UnknownStack(op.to)))?
            .extend(block);
        Ok(())
    }

    fn replay(mut self, ops: &[MoveOp], model: CraneModel) -> Result<Self, InvalidMove> {
        for op in ops {
            self.apply(op, model)?;
        }
        debug!(?model, moves = ops.len(), tops = %self.top_crates(), "replayed crane moves");
        Ok(self)
    }
}

/// Replay `ops` moving crates individually
pub fn apply_one_at_a_time(stacks: StackSet, ops: &[MoveOp]) -> Result<StackSet, InvalidMove> {
    stacks.replay(ops, CraneModel::OneAtATime)
}

/// Replay `ops` moving each block of crates as a unit
pub fn apply_bulk(stacks: StackSet, ops: &[MoveOp]) -> Result<StackSet, InvalidMove> {
    stacks.replay(ops, CraneModel::Bulk)
}

#[derive(Debug)]
pub struct SharedData {
    stacks: StackSet,
    ops: Vec<MoveOp>,
}

/// Whitespace-separated footer tokens with the byte offset of their last character
fn footer_labels(footer: &str) -> Vec<(usize, &str)> {
    let mut labels = Vec::new();
    let mut start = None;
    for (offset, c) in footer.char_indices().chain(std::iter::once((footer.len(), ' '))) {
        match (start, c.is_whitespace()) {
            (None, false) => start = Some(offset),
            (Some(begin), true) => {
                let token = &footer[begin..offset];
                let last = token.char_indices().last().map_or(begin, |(i, _)| begin + i);
                labels.push((last, token));
                start = None;
            }
            _ => {}
        }
    }
    labels
}

/// Parse the stack drawing; crate labels sit above the last character of their stack id
fn parse_drawing(drawing: &str) -> anyhow::Result<StackSet> {
    let mut rows: Vec<&str> = drawing.lines().filter(|l| !l.trim().is_empty()).collect();
    let footer = rows
        .pop()
        .ok_or_else(|| anyhow!("the stack drawing is empty"))?;

    let mut columns = Vec::new();
    let mut stacks = BTreeMap::new();
    for (column, token) in footer_labels(footer) {
        let id = token
            .parse::<u32>()
            .ok()
            .filter(|&id| id > 0)
            .ok_or_else(|| anyhow!("stack ids must be positive integers, got {:?}", token))?;
        if stacks.insert(id, Stack::new()).is_some() {
            bail!("stack {} is listed twice", id);
        }
        columns.push((id, column));
    }

    for row in rows.iter().rev() {
        let cells = row.as_bytes();
        for &(id, column) in &columns {
            match cells.get(column) {
                None | Some(b' ') => {}
                Some(&label) if label.is_ascii_alphanumeric() => {
                    if let Some(stack) = stacks.get_mut(&id) {
                        stack.push(char::from(label));
                    }
                }
                Some(&other) => bail!(
                    "unexpected {:?} above stack {} in {:?}",
                    char::from(other),
                    id,
                    row
                ),
            }
        }
    }

    Ok(StackSet::new(stacks))
}

fn parse_move(line: &str) -> anyhow::Result<MoveOp> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    match tokens.as_slice() {
        ["move", quantity, "from", from, "to", to] => Ok(MoveOp {
            quantity: quantity
                .parse()
                .with_context(|| format!("bad quantity {:?}", quantity))?,
            from: from.parse().with_context(|| format!("bad stack {:?}", from))?,
            to: to.parse().with_context(|| format!("bad stack {:?}", to))?,
        }),
        _ => bail!("expected `move N from A to B`, got {:?}", line),
    }
}

impl AocParser for Solver {
    type SharedData<'a> = SharedData;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        // Leading spaces of the first drawing row are significant
        let input = input.trim_end().replace("\r\n", "\n");
        let (drawing, moves) = input.split_once("\n\n").ok_or_else(|| {
            ParseError::MissingData("blank line between the stack drawing and the moves".into())
        })?;

        let stacks =
            parse_drawing(drawing).map_err(|e| ParseError::InvalidFormat(e.to_string()))?;
        let ops = parse_lines(moves, parse_move)?;
        Ok(SharedData { stacks, ops })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        apply_one_at_a_time(shared.stacks.clone(), &shared.ops)
            .map(|stacks| stacks.top_crates())
            .map_err(SolveError::failed)
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        apply_bulk(shared.stacks.clone(), &shared.ops)
            .map(|stacks| stacks.top_crates())
            .map_err(SolveError::failed)
    }
}
