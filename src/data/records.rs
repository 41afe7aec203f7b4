use serde::{Deserialize, Serialize};

/// Records keyed by calendar year.
pub trait YearRecord {
    fn year(&self) -> i32;
}

/// Police budget for one year, in thousands of euros.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BudgetRecord {
    pub year: i32,
    pub budgeted: Option<f64>,
    pub actual: Option<f64>,
    /// The base-year budget grown with inflation only.
    pub inflation_adjusted: Option<f64>,
}

/// Registered crimes for one year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrimeRecord {
    pub year: i32,
    pub total: Option<u64>,
    pub violent: Option<u64>,
    pub property: Option<u64>,
    pub vandalism: Option<u64>,
}

/// Clearance rates for one year, in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClearanceRecord {
    pub year: i32,
    pub total: Option<f64>,
    pub property: Option<f64>,
    pub violent: Option<f64>,
}

impl YearRecord for BudgetRecord {
    fn year(&self) -> i32 {
        self.year
    }
}

impl YearRecord for CrimeRecord {
    fn year(&self) -> i32 {
        self.year
    }
}

impl YearRecord for ClearanceRecord {
    fn year(&self) -> i32 {
        self.year
    }
}

/// Returns `true` when years never decrease along the slice.
#[must_use]
pub fn is_year_ordered<R: YearRecord>(records: &[R]) -> bool {
    records
        .windows(2)
        .all(|pair| pair[0].year() <= pair[1].year())
}
