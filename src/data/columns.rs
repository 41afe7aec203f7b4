use serde::{Deserialize, Serialize};

/// Header names of the budget CSV.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BudgetColumns {
    pub year: String,
    pub budgeted: String,
    pub actual: String,
    pub inflation_adjusted: String,
}

impl Default for BudgetColumns {
    fn default() -> Self {
        Self {
            year: "Jaar".to_owned(),
            budgeted: "Begroting".to_owned(),
            actual: "Realisatie".to_owned(),
            inflation_adjusted: "Inflatie * Begroting2015".to_owned(),
        }
    }
}

/// Header names of the registered-crime CSV.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrimeColumns {
    pub year: String,
    pub total: String,
    pub violent: String,
    pub property: String,
    pub vandalism: String,
}

impl Default for CrimeColumns {
    fn default() -> Self {
        Self {
            year: "Perioden".to_owned(),
            total: "Totaal".to_owned(),
            violent: "Geweldsmisdrijven".to_owned(),
            property: "Vermogensmisdrijven".to_owned(),
            vandalism: "Vernielingen".to_owned(),
        }
    }
}

/// Header names of the clearance-rate CSV.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClearanceColumns {
    pub year: String,
    pub total: String,
    pub property: String,
    pub violent: String,
}

impl Default for ClearanceColumns {
    fn default() -> Self {
        Self {
            year: "Perioden".to_owned(),
            total: "Totaal".to_owned(),
            property: "Vermogens-".to_owned(),
            violent: "Gewelds-".to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetColumns {
    pub budget: BudgetColumns,
    pub crime: CrimeColumns,
    pub clearance: ClearanceColumns,
}
