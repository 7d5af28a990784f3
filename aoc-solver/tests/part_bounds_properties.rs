//! Property-based tests for part bounds validation

use aoc_solver::{AocParser, ParseError, SolveError, Solver, SolverExt};
use proptest::prelude::*;

/// Test solver with configurable PARTS
struct TestSolver<const N: u8>;

impl<const N: u8> AocParser for TestSolver<N> {
    type SharedData<'a> = ();

    fn parse(_input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        Ok(())
    }
}

impl<const N: u8> Solver for TestSolver<N> {
    const PARTS: u8 = N;

    fn solve_part(_shared: &mut Self::SharedData<'_>, part: u8) -> Result<String, SolveError> {
        Ok(format!("part{}", part))
    }
}

fn checked(max_parts: u8, part: u8) -> (u8, Result<String, SolveError>) {
    let mut shared = ();
    match max_parts {
        1 => (1, TestSolver::<1>::solve_part_checked_range(&mut shared, part)),
        3 => (3, TestSolver::<3>::solve_part_checked_range(&mut shared, part)),
        _ => (2, TestSolver::<2>::solve_part_checked_range(&mut shared, part)),
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Parts 0 and > PARTS are rejected with `PartOutOfRange(part)`
    #[test]
    fn prop_out_of_range_rejection(max_parts in 1u8..=3, part in 0u8..=255) {
        let (effective_max, result) = checked(max_parts, part);

        if part == 0 || part > effective_max {
            match result {
                Err(SolveError::PartOutOfRange(p)) => prop_assert_eq!(p, part),
                other => prop_assert!(false, "Expected PartOutOfRange, got {:?}", other),
            }
        } else {
            prop_assert_eq!(result.unwrap(), format!("part{}", part));
        }
    }

    /// In-range parts give the same answer as calling `solve_part` directly
    #[test]
    fn prop_valid_range_delegation(part in 1u8..=2) {
        let mut shared = ();
        let checked_result = TestSolver::<2>::solve_part_checked_range(&mut shared, part);
        let direct_result = TestSolver::<2>::solve_part(&mut shared, part);

        prop_assert_eq!(checked_result.unwrap(), direct_result.unwrap());
    }
}

#[test]
fn test_part_zero_rejected() {
    let mut shared = ();
    let result = TestSolver::<2>::solve_part_checked_range(&mut shared, 0);
    assert!(matches!(result, Err(SolveError::PartOutOfRange(0))));
}

#[test]
fn test_part_exceeds_max_rejected() {
    let mut shared = ();
    let result = TestSolver::<2>::solve_part_checked_range(&mut shared, 3);
    assert!(matches!(result, Err(SolveError::PartOutOfRange(3))));
}
