//! No Space Left On Device
//!
//! Rebuilds a directory tree from a `cd`/`ls` session, then looks for
//! directories worth deleting.

pub mod command;
pub mod filesystem;
pub mod query;

use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use thiserror::Error;

pub use command::{CdTarget, Command, ListEntry, MalformedCommand, parse_transcript};
pub use filesystem::{
    BuildError, DirId, Directory, DuplicateEntry, EntryKind, FileSystem, PathNotFound, SizeOverflow,
};
pub use query::{smallest_directory_to_delete, sum_of_small_directories};

const SMALL_DIRECTORY_LIMIT: u64 = 100_000;
const DISK_SIZE: u64 = 70_000_000;
const REQUIRED_SPACE: u64 = 30_000_000;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 7, tags = ["2022", "filesystem"])]
pub struct Solver;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("no directory is large enough to free {missing} bytes")]
pub struct NoDeletionCandidate {
    missing: u64,
}

#[derive(Debug)]
pub struct SharedData {
    commands: Vec<Command>,
    filesystem: Option<FileSystem>,
}

impl SharedData {
    /// The rebuilt tree, replayed on first use and reused afterwards
    fn filesystem(&mut self) -> Result<&FileSystem, BuildError> {
        let filesystem = match self.filesystem.take() {
            Some(filesystem) => filesystem,
            None => FileSystem::build(&self.commands)?,
        };
        Ok(self.filesystem.insert(filesystem))
    }
}

impl AocParser for Solver {
    type SharedData<'a> = SharedData;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let commands =
            parse_transcript(input).map_err(|e| ParseError::InvalidFormat(e.to_string()))?;
        if commands.is_empty() {
            return Err(ParseError::MissingData("no commands in transcript".into()));
        }
        Ok(SharedData {
            commands,
            filesystem: None,
        })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let fs = shared.filesystem().map_err(SolveError::failed)?;
        Ok(sum_of_small_directories(fs, SMALL_DIRECTORY_LIMIT).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let fs = shared.filesystem().map_err(SolveError::failed)?;
        smallest_directory_to_delete(fs, DISK_SIZE, REQUIRED_SPACE)
            .map(|size| size.to_string())
            .ok_or_else(|| {
                let free = DISK_SIZE.saturating_sub(fs.root().cumulative_size());
                SolveError::failed(NoDeletionCandidate {
                    missing: REQUIRED_SPACE.saturating_sub(free),
                })
            })
    }
}
