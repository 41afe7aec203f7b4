use tracing::{debug, warn};

use crate::error::{ChartError, ChartResult};

use super::{
    BudgetColumns, BudgetRecord, ClearanceColumns, ClearanceRecord, CrimeColumns, CrimeRecord,
    NumericPolicy, ParseNumberError, RawRow, RawTable, YearRecord, parse_count, parse_euro,
    parse_percent, parse_year,
};

pub const BUDGET_DATASET: &str = "budget";
pub const CRIME_DATASET: &str = "crime";
pub const CLEARANCE_DATASET: &str = "clearance";

/// Converts budget rows into year-ordered records.
pub fn transform_budget(
    table: &RawTable,
    columns: &BudgetColumns,
    policy: NumericPolicy,
) -> ChartResult<Vec<BudgetRecord>> {
    require_columns(
        table,
        BUDGET_DATASET,
        [
            &columns.year,
            &columns.budgeted,
            &columns.actual,
            &columns.inflation_adjusted,
        ],
    )?;

    let mut records = Vec::with_capacity(table.rows.len());
    for row in &table.rows {
        let cell = RowCells {
            row,
            dataset: BUDGET_DATASET,
            policy,
        };
        records.push(BudgetRecord {
            year: cell.year(&columns.year)?,
            budgeted: cell.optional(&columns.budgeted, |raw| parse_euro(raw))?,
            actual: cell.optional(&columns.actual, |raw| parse_euro(raw))?,
            inflation_adjusted: cell.optional(&columns.inflation_adjusted, |raw| parse_euro(raw))?,
        });
    }

    Ok(canonicalize_by_year(records, BUDGET_DATASET))
}

/// Converts crime-count rows into year-ordered records.
///
/// Every row with a valid year is kept; an empty count, or a malformed one
/// under the lenient policy, becomes a gap in that series.
pub fn transform_crime(
    table: &RawTable,
    columns: &CrimeColumns,
    policy: NumericPolicy,
) -> ChartResult<Vec<CrimeRecord>> {
    require_columns(
        table,
        CRIME_DATASET,
        [
            &columns.year,
            &columns.total,
            &columns.violent,
            &columns.property,
            &columns.vandalism,
        ],
    )?;

    let mut records = Vec::with_capacity(table.rows.len());
    for row in &table.rows {
        let cell = RowCells {
            row,
            dataset: CRIME_DATASET,
            policy,
        };
        records.push(CrimeRecord {
            year: cell.year(&columns.year)?,
            total: cell.optional(&columns.total, |raw| parse_count(raw))?,
            violent: cell.optional(&columns.violent, |raw| parse_count(raw))?,
            property: cell.optional(&columns.property, |raw| parse_count(raw))?,
            vandalism: cell.optional(&columns.vandalism, |raw| parse_count(raw))?,
        });
    }

    Ok(canonicalize_by_year(records, CRIME_DATASET))
}

/// Converts clearance-rate rows into year-ordered records.
pub fn transform_clearance(
    table: &RawTable,
    columns: &ClearanceColumns,
    policy: NumericPolicy,
) -> ChartResult<Vec<ClearanceRecord>> {
    require_columns(
        table,
        CLEARANCE_DATASET,
        [
            &columns.year,
            &columns.total,
            &columns.property,
            &columns.violent,
        ],
    )?;

    let mut records = Vec::with_capacity(table.rows.len());
    for row in &table.rows {
        let cell = RowCells {
            row,
            dataset: CLEARANCE_DATASET,
            policy,
        };
        records.push(ClearanceRecord {
            year: cell.year(&columns.year)?,
            total: cell.optional(&columns.total, |raw| parse_percent(raw))?,
            property: cell.optional(&columns.property, |raw| parse_percent(raw))?,
            violent: cell.optional(&columns.violent, |raw| parse_percent(raw))?,
        });
    }

    Ok(canonicalize_by_year(records, CLEARANCE_DATASET))
}

fn require_columns<'a>(
    table: &RawTable,
    dataset: &'static str,
    columns: impl IntoIterator<Item = &'a String>,
) -> ChartResult<()> {
    for column in columns {
        if !table.has_column(column) {
            return Err(ChartError::MissingColumn {
                dataset,
                column: column.clone(),
            });
        }
    }
    Ok(())
}

struct RowCells<'a> {
    row: &'a RawRow,
    dataset: &'static str,
    policy: NumericPolicy,
}

impl RowCells<'_> {
    fn malformed(&self, column: &str, err: ParseNumberError) -> ChartError {
        ChartError::MalformedNumber {
            dataset: self.dataset,
            line: self.row.line,
            column: column.to_owned(),
            value: err.value,
        }
    }

    /// Years place the record on the axis, so they are never tolerated as gaps.
    fn year(&self, column: &str) -> ChartResult<i32> {
        let raw = self.row.get(column).unwrap_or_default();
        parse_year(raw).map_err(|err| self.malformed(column, err))
    }

    fn optional<T>(
        &self,
        column: &str,
        parse: impl Fn(Option<&str>) -> Result<Option<T>, ParseNumberError>,
    ) -> ChartResult<Option<T>> {
        match parse(self.row.get(column)) {
            Ok(value) => Ok(value),
            Err(err) => self.tolerate(column, err).map(|()| None),
        }
    }

    fn tolerate(&self, column: &str, err: ParseNumberError) -> ChartResult<()> {
        match self.policy {
            NumericPolicy::Strict => Err(self.malformed(column, err)),
            NumericPolicy::Lenient => {
                warn!(
                    dataset = self.dataset,
                    line = self.row.line,
                    column,
                    value = %err.value,
                    "treating malformed number as missing"
                );
                Ok(())
            }
        }
    }
}

/// Sorts records by year; for duplicate years the later row wins.
fn canonicalize_by_year<R: YearRecord>(mut records: Vec<R>, dataset: &'static str) -> Vec<R> {
    let original_len = records.len();
    let was_ordered = super::is_year_ordered(&records);
    records.sort_by_key(|record| record.year());

    let mut deduped: Vec<R> = Vec::with_capacity(records.len());
    for record in records {
        match deduped.last_mut() {
            Some(last) if last.year() == record.year() => *last = record,
            _ => deduped.push(record),
        }
    }

    let duplicate_count = original_len - deduped.len();
    if !was_ordered || duplicate_count > 0 {
        warn!(
            dataset,
            was_ordered,
            duplicate_count,
            canonical_count = deduped.len(),
            "canonicalized records by year"
        );
    }
    debug!(dataset, count = deduped.len(), "transformed dataset");
    deduped
}

#[cfg(test)]
mod tests {
    use super::{BUDGET_DATASET, transform_budget, transform_crime};
    use crate::data::{BudgetColumns, CrimeColumns, NumericPolicy, RawRow, RawTable};
    use crate::error::ChartError;

    fn budget_row(line: usize, year: &str, budgeted: &str) -> RawRow {
        RawRow::new(line)
            .with_cell("Jaar", year)
            .with_cell("Begroting", budgeted)
            .with_cell("Realisatie", "")
            .with_cell("Inflatie * Begroting2015", "")
    }

    #[test]
    fn duplicate_years_keep_the_later_row() {
        let table = RawTable::from_rows(vec![
            budget_row(2, "2016", "€2,0"),
            budget_row(3, "2015", "€1,0"),
            budget_row(4, "2016", "€3,0"),
        ]);
        let records = transform_budget(&table, &BudgetColumns::default(), NumericPolicy::Strict)
            .expect("transform");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].year, 2015);
        assert_eq!(records[1].budgeted, Some(3.0));
    }

    #[test]
    fn strict_policy_names_the_offending_cell() {
        let table = RawTable::from_rows(vec![budget_row(7, "2015", "€x")]);
        let err = transform_budget(&table, &BudgetColumns::default(), NumericPolicy::Strict)
            .expect_err("must fail");
        match err {
            ChartError::MalformedNumber {
                dataset,
                line,
                column,
                value,
            } => {
                assert_eq!(dataset, BUDGET_DATASET);
                assert_eq!(line, 7);
                assert_eq!(column, "Begroting");
                assert_eq!(value, "€x");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn lenient_crime_rows_keep_bad_counts_as_gaps() {
        let row = |line: usize, year: &str, total: &str| {
            RawRow::new(line)
                .with_cell("Perioden", year)
                .with_cell("Totaal", total)
                .with_cell("Geweldsmisdrijven", "1")
                .with_cell("Vermogensmisdrijven", "2")
                .with_cell("Vernielingen", "3")
        };
        let table = RawTable::from_rows(vec![row(2, "2015", "10"), row(3, "2016", "?")]);
        let records = transform_crime(&table, &CrimeColumns::default(), NumericPolicy::Lenient)
            .expect("transform");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].total, Some(10));
        assert_eq!(records[1].total, None);
        assert_eq!(records[1].vandalism, Some(3));
    }
}
