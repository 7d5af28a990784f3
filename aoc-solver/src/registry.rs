//! Lookup table from (year, day) to the parser/solver registered for it

use crate::error::{ParseError, RegistrationError, SolverError};
use crate::instance::{DynSolver, SolverInstance};
use crate::solver::Solver;

/// First year with a storage slot
pub const BASE_YEAR: u16 = 2015;
/// Number of year rows (2015 through 2034)
pub const MAX_YEARS: usize = 20;
/// Day columns per year row
pub const DAYS_PER_YEAR: usize = 25;
/// Slot count of the flat table
pub const CAPACITY: usize = MAX_YEARS * DAYS_PER_YEAR;

/// Slot for year/day, or None when either is outside the table
#[inline]
fn calc_index(year: u16, day: u8) -> Option<usize> {
    if year < BASE_YEAR || year >= BASE_YEAR + MAX_YEARS as u16 {
        return None;
    }
    if day == 0 || day > DAYS_PER_YEAR as u8 {
        return None;
    }
    let y = (year - BASE_YEAR) as usize;
    let d = (day - 1) as usize;
    Some(y * DAYS_PER_YEAR + d)
}

/// Inverse of [`calc_index`]
#[inline]
fn from_index(index: usize) -> (u16, u8) {
    let year = BASE_YEAR + (index / DAYS_PER_YEAR) as u16;
    let day = (index % DAYS_PER_YEAR) as u8 + 1;
    (year, day)
}

/// Parses an input into a boxed [`DynSolver`] borrowing from it
pub type SolverFactory =
    Box<dyn for<'a> Fn(&'a str) -> Result<Box<dyn DynSolver + 'a>, ParseError> + Send + Sync>;

/// What is registered in one slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FactoryInfo {
    /// The Advent of Code year
    pub year: u16,
    /// The day number (1-25)
    pub day: u8,
    /// Value of `Solver::PARTS` for the registered type
    pub parts: u8,
}

struct SolverFactoryEntry {
    factory: SolverFactory,
    parts: u8,
}

/// Fixed-size table of factories indexed by (year, day)
///
/// Iteration yields registered slots in ascending (year, day) order.
pub struct SolverFactoryStorage {
    entries: Vec<Option<SolverFactoryEntry>>,
}

impl SolverFactoryStorage {
    /// Registered slots in (year, day) order
    pub fn iter_info(&self) -> impl Iterator<Item = FactoryInfo> + '_ {
        self.entries.iter().enumerate().filter_map(|(i, entry)| {
            entry.as_ref().map(|e| {
                let (year, day) = from_index(i);
                FactoryInfo {
                    year,
                    day,
                    parts: e.parts,
                }
            })
        })
    }

    /// Slot info for year/day, if registered
    pub fn get_info(&self, year: u16, day: u8) -> Option<FactoryInfo> {
        self.entry(year, day).map(|e| FactoryInfo {
            year,
            day,
            parts: e.parts,
        })
    }

    /// Whether year/day has a registered solver
    pub fn contains(&self, year: u16, day: u8) -> bool {
        self.entry(year, day).is_some()
    }

    /// Count of occupied slots
    pub fn len(&self) -> usize {
        self.entries.iter().filter(|e| e.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.iter().all(|e| e.is_none())
    }

    fn entry(&self, year: u16, day: u8) -> Option<&SolverFactoryEntry> {
        calc_index(year, day).and_then(|i| self.entries.get(i)?.as_ref())
    }
}

/// Builder for constructing a [`SolverRegistry`]
///
/// Rejects duplicate and out-of-range registrations; the built registry is
/// immutable.
///
/// # Example
///
/// ```no_run
/// # use aoc_solver::SolverRegistryBuilder;
/// let registry = SolverRegistryBuilder::new()
///     .register_solver_plugins(|plugin| plugin.year == 2022)
///     .unwrap()
///     .build();
/// ```
pub struct SolverRegistryBuilder {
    entries: Vec<Option<SolverFactoryEntry>>,
}

impl SolverRegistryBuilder {
    /// Builder with every slot empty
    pub fn new() -> Self {
        Self {
            entries: (0..CAPACITY).map(|_| None).collect(),
        }
    }

    /// Put a raw factory into the year/day slot
    ///
    /// Fails with [`RegistrationError::InvalidYearDay`] outside the table and
    /// [`RegistrationError::DuplicateFactory`] when the slot is taken.
    pub fn register_factory<F>(
        mut self,
        year: u16,
        day: u8,
        parts: u8,
        factory: F,
    ) -> Result<Self, RegistrationError>
    where
        F: for<'a> Fn(&'a str) -> Result<Box<dyn DynSolver + 'a>, ParseError>
            + Send
            + Sync
            + 'static,
    {
        let index = calc_index(year, day).ok_or(RegistrationError::InvalidYearDay(year, day))?;

        if self.entries[index].is_some() {
            return Err(RegistrationError::DuplicateFactory(year, day));
        }

        self.entries[index] = Some(SolverFactoryEntry {
            factory: Box::new(factory),
            parts,
        });
        Ok(self)
    }

    /// Register `S`, parsing through [`SolverInstance::new`]
    pub fn register_solver<S>(self, year: u16, day: u8) -> Result<Self, RegistrationError>
    where
        S: Solver + 'static,
    {
        self.register_factory(year, day, S::PARTS, move |input: &str| {
            let instance = SolverInstance::<S>::new(year, day, input)?;
            Ok(Box::new(instance))
        })
    }

    /// Register every plugin linked into the binary
    pub fn register_all_plugins(self) -> Result<Self, RegistrationError> {
        self.register_solver_plugins(|_| true)
    }

    /// Register the linked plugins accepted by `filter`
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use aoc_solver::SolverRegistryBuilder;
    /// // Only solvers tagged "stacks"
    /// let registry = SolverRegistryBuilder::new()
    ///     .register_solver_plugins(|plugin| plugin.tags.contains(&"stacks"))
    ///     .unwrap()
    ///     .build();
    /// ```
    pub fn register_solver_plugins<F>(mut self, filter: F) -> Result<Self, RegistrationError>
    where
        F: Fn(&SolverPlugin) -> bool,
    {
        for plugin in inventory::iter::<SolverPlugin>() {
            if filter(plugin) {
                self = plugin.solver.register_with(self, plugin.year, plugin.day)?;
            }
        }
        Ok(self)
    }

    /// Freeze the table
    pub fn build(self) -> SolverRegistry {
        SolverRegistry {
            storage: SolverFactoryStorage {
                entries: self.entries,
            },
        }
    }
}

impl Default for SolverRegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Frozen table of solvers, shareable across worker threads
pub struct SolverRegistry {
    storage: SolverFactoryStorage,
}

impl SolverRegistry {
    /// Slot lookup and iteration
    pub fn storage(&self) -> &SolverFactoryStorage {
        &self.storage
    }

    /// Parse `input` with the solver registered for year/day
    ///
    /// An unsupported year/day is reported before an empty slot, and a parse
    /// failure comes back as [`SolverError::ParseError`].
    pub fn create_solver<'a>(
        &self,
        year: u16,
        day: u8,
        input: &'a str,
    ) -> Result<Box<dyn DynSolver + 'a>, SolverError> {
        if calc_index(year, day).is_none() {
            return Err(SolverError::InvalidYearDay(year, day));
        }

        let entry = self
            .storage
            .entry(year, day)
            .ok_or(SolverError::NotFound(year, day))?;

        (entry.factory)(input).map_err(SolverError::ParseError)
    }
}

/// Object-safe registration hook for solver types
///
/// Any type implementing [`Solver`] gets this through a blanket impl, which is
/// what lets heterogeneous solvers sit in one [`SolverPlugin`] collection.
pub trait RegisterableSolver: Sync {
    /// Add `Self` to the builder under year/day
    fn register_with(
        &self,
        builder: SolverRegistryBuilder,
        year: u16,
        day: u8,
    ) -> Result<SolverRegistryBuilder, RegistrationError>;

    /// Same as `Solver::PARTS`
    fn parts(&self) -> u8;
}

impl<S> RegisterableSolver for S
where
    S: Solver + Sync + 'static,
{
    fn register_with(
        &self,
        builder: SolverRegistryBuilder,
        year: u16,
        day: u8,
    ) -> Result<SolverRegistryBuilder, RegistrationError> {
        builder.register_solver::<S>(year, day)
    }

    fn parts(&self) -> u8 {
        S::PARTS
    }
}

/// One link-time registration record
///
/// Normally submitted by `#[derive(AutoRegisterSolver)]`; it can also be
/// submitted by hand:
///
/// ```no_run
/// use aoc_solver::{AocParser, ParseError, SolveError, Solver, SolverPlugin};
///
/// struct Day6;
///
/// impl AocParser for Day6 {
///     type SharedData<'a> = &'a str;
///
///     fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
///         Ok(input)
///     }
/// }
///
/// impl Solver for Day6 {
///     const PARTS: u8 = 1;
///
///     fn solve_part(shared: &mut Self::SharedData<'_>, part: u8) -> Result<String, SolveError> {
///         match part {
///             1 => Ok(shared.len().to_string()),
///             _ => Err(SolveError::PartNotImplemented(part)),
///         }
///     }
/// }
///
/// aoc_solver::inventory::submit! {
///     SolverPlugin {
///         year: 2022,
///         day: 6,
///         solver: &Day6,
///         tags: &["2022", "strings"],
///     }
/// }
/// ```
pub struct SolverPlugin {
    /// The Advent of Code year
    pub year: u16,
    /// The day number (1-25)
    pub day: u8,
    /// The solver unit value, erased
    pub solver: &'static dyn RegisterableSolver,
    /// Tags for filtering (e.g. "2022", "filesystem")
    pub tags: &'static [&'static str],
}

inventory::collect!(SolverPlugin);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SolveError;
    use crate::solver::AocParser;

    struct Sum;

    impl AocParser for Sum {
        type SharedData<'a> = Vec<u32>;

        fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
            input
                .lines()
                .map(|l| l.parse().map_err(|_| ParseError::InvalidFormat(l.to_string())))
                .collect()
        }
    }

    impl Solver for Sum {
        const PARTS: u8 = 1;

        fn solve_part(shared: &mut Self::SharedData<'_>, part: u8) -> Result<String, SolveError> {
            match part {
                1 => Ok(shared.iter().sum::<u32>().to_string()),
                _ => Err(SolveError::PartNotImplemented(part)),
            }
        }
    }

    #[test]
    fn test_index_roundtrip_bounds() {
        assert_eq!(calc_index(2015, 1), Some(0));
        assert_eq!(calc_index(2034, 25), Some(CAPACITY - 1));
        assert_eq!(calc_index(2014, 1), None);
        assert_eq!(calc_index(2035, 1), None);
        assert_eq!(calc_index(2022, 0), None);
        assert_eq!(calc_index(2022, 26), None);
        assert_eq!(from_index(calc_index(2022, 7).unwrap()), (2022, 7));
    }

    #[test]
    fn test_register_and_create() {
        let registry = SolverRegistryBuilder::new()
            .register_solver::<Sum>(2022, 1)
            .unwrap()
            .build();

        assert!(registry.storage().contains(2022, 1));
        assert_eq!(registry.storage().len(), 1);
        assert_eq!(
            registry.storage().get_info(2022, 1),
            Some(FactoryInfo {
                year: 2022,
                day: 1,
                parts: 1
            })
        );

        let mut solver = registry.create_solver(2022, 1, "4\n5").unwrap();
        assert_eq!(solver.solve(1).unwrap().answer, "9");
    }

    #[test]
    fn test_duplicate_registration_rejected() {
        let result = SolverRegistryBuilder::new()
            .register_solver::<Sum>(2022, 1)
            .unwrap()
            .register_solver::<Sum>(2022, 1);
        assert!(matches!(result, Err(RegistrationError::DuplicateFactory(2022, 1))));
    }

    #[test]
    fn test_out_of_range_registration_rejected() {
        let result = SolverRegistryBuilder::new().register_solver::<Sum>(2022, 26);
        assert!(matches!(result, Err(RegistrationError::InvalidYearDay(2022, 26))));
    }

    #[test]
    fn test_create_solver_errors() {
        let registry = SolverRegistryBuilder::new()
            .register_solver::<Sum>(2022, 1)
            .unwrap()
            .build();

        assert!(matches!(
            registry.create_solver(2022, 2, ""),
            Err(SolverError::NotFound(2022, 2))
        ));
        assert!(matches!(
            registry.create_solver(1999, 1, ""),
            Err(SolverError::InvalidYearDay(1999, 1))
        ));
        assert!(matches!(
            registry.create_solver(2022, 1, "x"),
            Err(SolverError::ParseError(ParseError::InvalidFormat(_)))
        ));
    }

    #[test]
    fn test_iter_info_is_ordered() {
        let registry = SolverRegistryBuilder::new()
            .register_solver::<Sum>(2022, 7)
            .unwrap()
            .register_solver::<Sum>(2016, 3)
            .unwrap()
            .register_solver::<Sum>(2022, 1)
            .unwrap()
            .build();

        let keys: Vec<_> = registry
            .storage()
            .iter_info()
            .map(|info| (info.year, info.day))
            .collect();
        assert_eq!(keys, vec![(2016, 3), (2022, 1), (2022, 7)]);
    }
}
