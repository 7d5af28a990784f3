use aoc_solver::{
    AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError,
    SolverRegistryBuilder,
};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 4, tags = ["2022", "ranges"])]
struct Tagged;

impl AocParser for Tagged {
    type SharedData<'a> = Vec<u32>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        input
            .split(',')
            .map(|n| n.trim().parse().map_err(|_| ParseError::InvalidFormat(n.into())))
            .collect()
    }
}

impl PartSolver<1> for Tagged {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.iter().sum::<u32>().to_string())
    }
}

impl PartSolver<2> for Tagged {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.iter().max().copied().unwrap_or_default().to_string())
    }
}

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 1)]
#[aoc(year = 2021, day = 1)]
struct Untagged;

impl AocParser for Untagged {
    type SharedData<'a> = &'a str;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        Ok(input)
    }
}

impl PartSolver<1> for Untagged {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.chars().rev().collect())
    }
}

#[test]
fn test_all_plugins_are_registered() {
    let registry = SolverRegistryBuilder::new()
        .register_all_plugins()
        .unwrap()
        .build();

    assert!(registry.storage().contains(2022, 4));
    assert!(registry.storage().contains(2021, 1));
    assert_eq!(registry.storage().get_info(2022, 4).map(|i| i.parts), Some(2));

    let mut solver = registry.create_solver(2022, 4, "2, 8, 5").unwrap();
    assert_eq!(solver.solve(1).unwrap().answer, "15");
    assert_eq!(solver.solve(2).unwrap().answer, "8");
}

#[test]
fn test_tag_filter_selects_plugins() {
    let registry = SolverRegistryBuilder::new()
        .register_solver_plugins(|plugin| plugin.tags.contains(&"ranges"))
        .unwrap()
        .build();

    assert!(registry.storage().contains(2022, 4));
    assert!(!registry.storage().contains(2021, 1));
    assert_eq!(registry.storage().len(), 1);
}

#[test]
fn test_untagged_plugin_solves() {
    let registry = SolverRegistryBuilder::new()
        .register_solver_plugins(|plugin| plugin.year == 2021)
        .unwrap()
        .build();

    let mut solver = registry.create_solver(2021, 1, "abc").unwrap();
    assert_eq!(solver.solve(1).unwrap().answer, "cba");
}
