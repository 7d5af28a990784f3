//! Parsing helpers shared by the solutions

use anyhow::anyhow;
use aoc_solver::ParseError;

/// Parse every non-empty line of `input` with `parse_line`.
///
/// Failures are reported as [`ParseError::InvalidFormat`] prefixed with the
/// 1-based line number of the offending line.
pub fn parse_lines<T, F>(input: &str, mut parse_line: F) -> Result<Vec<T>, ParseError>
where
    F: FnMut(&str) -> anyhow::Result<T>,
{
    input
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(line_idx, line)| {
            parse_line(line.trim()).map_err(|e| anyhow!("(line {}) {}", line_idx + 1, e))
        })
        .collect::<anyhow::Result<Vec<_>>>()
        .map_err(|e| ParseError::InvalidFormat(e.to_string()))
}

/// Fail with [`ParseError::MissingData`] when `input` has no content.
pub fn require_input<'a>(input: &'a str, what: &str) -> Result<&'a str, ParseError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        Err(ParseError::MissingData(format!("no {} in input", what)))
    } else {
        Ok(trimmed)
    }
}
