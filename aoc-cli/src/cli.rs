//! CLI argument parsing using clap

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Parallelization level for solver execution
#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq)]
pub enum ParallelizeBy {
    /// Run every solver in order on one thread
    Sequential,
    /// One task per year; days and parts run in order within it
    Year,
    /// One task per year/day; parts share a single parsed input (default)
    #[default]
    Day,
    /// One task per part; each part parses its own copy of the input
    Part,
}

/// Which input file to feed the solvers
#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq)]
pub enum InputVariant {
    /// `{day}.sample.txt`, the example from the puzzle text
    #[default]
    Sample,
    /// `{day}.input.txt`, the personal puzzle input
    Full,
}

impl InputVariant {
    pub fn file_suffix(self) -> &'static str {
        match self {
            InputVariant::Sample => "sample",
            InputVariant::Full => "input",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Info,
    #[default]
    Warn,
    Error,
    Silent,
}

impl LogLevel {
    pub fn to_tracing_level(self) -> Option<tracing::Level> {
        match self {
            LogLevel::Debug => Some(tracing::Level::DEBUG),
            LogLevel::Info => Some(tracing::Level::INFO),
            LogLevel::Warn => Some(tracing::Level::WARN),
            LogLevel::Error => Some(tracing::Level::ERROR),
            LogLevel::Silent => None,
        }
    }
}

/// Advent of Code solver runner
#[derive(Parser, Debug)]
#[command(name = "aoc", about = "Run Advent of Code solvers", version)]
pub struct Args {
    /// Year to run (runs all years if omitted)
    #[arg(short, long)]
    pub year: Option<u16>,

    /// Day to run (runs all days if omitted)
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=25))]
    pub day: Option<u8>,

    /// Part to run (runs all parts if omitted)
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=2))]
    pub part: Option<u8>,

    /// Tags to filter solvers (comma-separated, all must match)
    #[arg(short, long, value_delimiter = ',')]
    pub tags: Vec<String>,

    /// Directory holding `{year}/{day}.sample.txt` and `{year}/{day}.input.txt`
    #[arg(short, long, default_value = "inputs")]
    pub input_dir: PathBuf,

    /// Input file to use: sample or full
    #[arg(long, value_enum, default_value = "sample")]
    pub variant: InputVariant,

    /// Number of threads for parallel execution
    #[arg(long)]
    pub threads: Option<usize>,

    /// Parallelization level: sequential, year, day, or part
    #[arg(long, value_enum, default_value = "day")]
    pub parallelize_by: ParallelizeBy,

    /// Quiet mode - only output answers
    #[arg(short, long)]
    pub quiet: bool,

    /// Diagnostics written to stderr: debug, info, warn, error or silent
    #[arg(long, value_enum, default_value = "warn")]
    pub log_level: LogLevel,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["aoc"]).unwrap();
        assert_eq!(args.variant, InputVariant::Sample);
        assert_eq!(args.parallelize_by, ParallelizeBy::Day);
        assert_eq!(args.log_level, LogLevel::Warn);
        assert_eq!(args.input_dir, PathBuf::from("inputs"));
        assert!(args.tags.is_empty());
    }

    #[test]
    fn test_full_arguments() {
        let args = Args::try_parse_from([
            "aoc",
            "--year",
            "2022",
            "--day",
            "7",
            "--part",
            "2",
            "--tags",
            "2022,filesystem",
            "--variant",
            "full",
            "--parallelize-by",
            "part",
            "--log-level",
            "silent",
        ])
        .unwrap();
        assert_eq!(args.year, Some(2022));
        assert_eq!(args.day, Some(7));
        assert_eq!(args.part, Some(2));
        assert_eq!(args.tags, vec!["2022", "filesystem"]);
        assert_eq!(args.variant.file_suffix(), "input");
        assert_eq!(args.parallelize_by, ParallelizeBy::Part);
        assert_eq!(args.log_level.to_tracing_level(), None);
    }

    #[test]
    fn test_rejects_out_of_range_day_and_part() {
        assert!(Args::try_parse_from(["aoc", "--day", "26"]).is_err());
        assert!(Args::try_parse_from(["aoc", "--day", "0"]).is_err());
        assert!(Args::try_parse_from(["aoc", "--part", "3"]).is_err());
    }
}
