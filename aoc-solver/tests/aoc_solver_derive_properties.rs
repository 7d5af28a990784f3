//! Property-based tests for the AocSolver derive macro

use aoc_solver::{AocParser, AocSolver, ParseError, PartSolver, SolveError, Solver};
use proptest::prelude::*;

#[derive(AocSolver)]
#[aoc_solver(max_parts = 2)]
struct Elves;

impl AocParser for Elves {
    type SharedData<'a> = Vec<i64>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        input
            .lines()
            .filter(|l| !l.is_empty())
            .map(|l| {
                l.parse()
                    .map_err(|_| ParseError::InvalidFormat("bad int".into()))
            })
            .collect()
    }
}

impl PartSolver<1> for Elves {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.iter().sum::<i64>().to_string())
    }
}

impl PartSolver<2> for Elves {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.iter().max().copied().unwrap_or_default().to_string())
    }
}

fn to_input(numbers: &[i64]) -> String {
    numbers.iter().map(|n| n.to_string()).collect::<Vec<_>>().join("\n")
}

mod part_dispatch {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// `solve_part(N)` gives the same answer as `PartSolver<N>::solve`
        #[test]
        fn solve_part_dispatches_to_correct_part_solver(
            numbers in prop::collection::vec(-50i64..50, 1..8),
            part in 1u8..=2
        ) {
            let input = to_input(&numbers);
            let mut shared1 = Elves::parse(&input).unwrap();
            let mut shared2 = Elves::parse(&input).unwrap();

            let via_dispatch = Elves::solve_part(&mut shared1, part).unwrap();
            let direct = match part {
                1 => <Elves as PartSolver<1>>::solve(&mut shared2),
                _ => <Elves as PartSolver<2>>::solve(&mut shared2),
            }
            .unwrap();

            prop_assert_eq!(via_dispatch, direct);
        }

        /// Any part outside `1..=max_parts` is `PartNotImplemented`
        #[test]
        fn invalid_part_returns_not_implemented(invalid_part in prop_oneof![Just(0u8), 3u8..=255]) {
            let mut shared = Elves::parse("1\n2\n3").unwrap();

            match Elves::solve_part(&mut shared, invalid_part) {
                Err(SolveError::PartNotImplemented(p)) => prop_assert_eq!(p, invalid_part),
                other => prop_assert!(false, "Expected PartNotImplemented, got {:?}", other),
            }
        }
    }
}

mod shared_state {
    use super::*;

    #[derive(Debug, Clone)]
    struct Totals {
        numbers: Vec<i64>,
        cached_sum: Option<i64>,
    }

    #[derive(AocSolver)]
    #[aoc_solver(max_parts = 2)]
    struct Caching;

    impl AocParser for Caching {
        type SharedData<'a> = Totals;

        fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
            let numbers = Elves::parse(input)?;
            Ok(Totals {
                numbers,
                cached_sum: None,
            })
        }
    }

    impl PartSolver<1> for Caching {
        fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
            let sum: i64 = shared.numbers.iter().sum();
            shared.cached_sum = Some(sum);
            Ok(sum.to_string())
        }
    }

    impl PartSolver<2> for Caching {
        fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
            let sum = shared.cached_sum.unwrap_or(0);
            Ok((sum * 2).to_string())
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Work stored by part 1 is visible to part 2
        #[test]
        fn mutation_is_visible_to_later_parts(numbers in prop::collection::vec(1i64..100, 1..5)) {
            let input = to_input(&numbers);
            let expected_sum: i64 = numbers.iter().sum();

            let mut shared = Caching::parse(&input).unwrap();

            let result1 = Caching::solve_part(&mut shared, 1).unwrap();
            prop_assert_eq!(result1, expected_sum.to_string());
            prop_assert_eq!(shared.cached_sum, Some(expected_sum));

            let result2 = Caching::solve_part(&mut shared, 2).unwrap();
            prop_assert_eq!(result2, (expected_sum * 2).to_string());
        }
    }
}
