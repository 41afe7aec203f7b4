//! Dataset ingest: CSV tables, locale-aware number parsing and typed records.

mod columns;
mod parse;
mod records;
mod table;
mod transform;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ChartResult;

pub use columns::{BudgetColumns, ClearanceColumns, CrimeColumns, DatasetColumns};
pub use parse::{
    NumericPolicy, ParseNumberError, parse_count, parse_euro, parse_percent, parse_year,
};
pub use records::{BudgetRecord, ClearanceRecord, CrimeRecord, YearRecord, is_year_ordered};
pub use table::{RawRow, RawTable};
pub use transform::{
    BUDGET_DATASET, CLEARANCE_DATASET, CRIME_DATASET, transform_budget, transform_clearance,
    transform_crime,
};

/// Locations of the three CSV resources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataSources {
    pub budget: PathBuf,
    pub crime: PathBuf,
    pub clearance: PathBuf,
}

impl Default for DataSources {
    fn default() -> Self {
        Self {
            budget: PathBuf::from("Begroting.csv"),
            crime: PathBuf::from("Misdrijven.csv"),
            clearance: PathBuf::from("Ophelderingspercentage.csv"),
        }
    }
}

impl DataSources {
    /// Resolves every relative source path against `dir`.
    #[must_use]
    pub fn relative_to(&self, dir: &Path) -> Self {
        let resolve = |path: &PathBuf| {
            if path.is_absolute() {
                path.clone()
            } else {
                dir.join(path)
            }
        };
        Self {
            budget: resolve(&self.budget),
            crime: resolve(&self.crime),
            clearance: resolve(&self.clearance),
        }
    }
}

/// The three raw tables, loaded together.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawTables {
    pub budget: RawTable,
    pub crime: RawTable,
    pub clearance: RawTable,
}

impl RawTables {
    /// Loads all three tables; the first failure aborts the whole load.
    pub fn load(sources: &DataSources) -> ChartResult<Self> {
        let (budget, (crime, clearance)) = join_loads(sources);
        Ok(Self {
            budget: budget?,
            crime: crime?,
            clearance: clearance?,
        })
    }
}

type LoadResults = (
    ChartResult<RawTable>,
    (ChartResult<RawTable>, ChartResult<RawTable>),
);

#[cfg(feature = "parallel-load")]
fn join_loads(sources: &DataSources) -> LoadResults {
    rayon::join(
        || RawTable::load(&sources.budget),
        || {
            rayon::join(
                || RawTable::load(&sources.crime),
                || RawTable::load(&sources.clearance),
            )
        },
    )
}

#[cfg(not(feature = "parallel-load"))]
fn join_loads(sources: &DataSources) -> LoadResults {
    (
        RawTable::load(&sources.budget),
        (
            RawTable::load(&sources.crime),
            RawTable::load(&sources.clearance),
        ),
    )
}

/// Typed, year-ordered records of all three datasets.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Datasets {
    pub budget: Vec<BudgetRecord>,
    pub crime: Vec<CrimeRecord>,
    pub clearance: Vec<ClearanceRecord>,
}

impl Datasets {
    pub fn from_tables(
        tables: &RawTables,
        columns: &DatasetColumns,
        policy: NumericPolicy,
    ) -> ChartResult<Self> {
        let datasets = Self {
            budget: transform_budget(&tables.budget, &columns.budget, policy)?,
            crime: transform_crime(&tables.crime, &columns.crime, policy)?,
            clearance: transform_clearance(&tables.clearance, &columns.clearance, policy)?,
        };
        debug!(
            budget = datasets.budget.len(),
            crime = datasets.crime.len(),
            clearance = datasets.clearance.len(),
            "datasets ready"
        );
        Ok(datasets)
    }

    pub fn load(
        sources: &DataSources,
        columns: &DatasetColumns,
        policy: NumericPolicy,
    ) -> ChartResult<Self> {
        let tables = RawTables::load(sources)?;
        Self::from_tables(&tables, columns, policy)
    }
}
