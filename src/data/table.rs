use std::io::Read;
use std::path::Path;

use indexmap::IndexMap;
use tracing::debug;

use crate::error::{ChartError, ChartResult};

/// One CSV row as a header → cell mapping.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawRow {
    /// 1-based line in the source file (the header is line 1).
    pub line: usize,
    cells: IndexMap<String, String>,
}

impl RawRow {
    #[must_use]
    pub fn new(line: usize) -> Self {
        Self {
            line,
            cells: IndexMap::new(),
        }
    }

    #[must_use]
    pub fn with_cell(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
        self.cells.insert(column.into(), value.into());
        self
    }

    #[must_use]
    pub fn get(&self, column: &str) -> Option<&str> {
        self.cells.get(column).map(String::as_str)
    }
}

/// Headers plus rows of one CSV resource.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<RawRow>,
}

impl RawTable {
    /// Builds a table from in-memory rows; headers are taken from the first row.
    #[must_use]
    pub fn from_rows(rows: Vec<RawRow>) -> Self {
        let headers = rows
            .first()
            .map(|row| row.cells.keys().cloned().collect())
            .unwrap_or_default();
        Self { headers, rows }
    }

    #[must_use]
    pub fn has_column(&self, column: &str) -> bool {
        self.headers.iter().any(|header| header == column)
    }

    /// Reads a comma-separated table with a header row.
    ///
    /// Short rows are accepted; their trailing columns read as absent.
    pub fn read_csv(reader: impl Read) -> Result<Self, csv::Error> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers: Vec<String> = reader.headers()?.iter().map(str::to_owned).collect();
        let mut rows = Vec::new();
        for (index, record) in reader.records().enumerate() {
            let record = record?;
            let mut row = RawRow::new(index + 2);
            for (header, cell) in headers.iter().zip(record.iter()) {
                row.cells.insert(header.clone(), cell.to_owned());
            }
            rows.push(row);
        }

        Ok(Self { headers, rows })
    }

    pub fn load(path: &Path) -> ChartResult<Self> {
        let file = std::fs::File::open(path).map_err(|source| ChartError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let table = Self::read_csv(file).map_err(|source| ChartError::DataLoad {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(
            path = %path.display(),
            columns = table.headers.len(),
            rows = table.rows.len(),
            "loaded csv table"
        );
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::RawTable;

    #[test]
    fn read_csv_keeps_quoted_commas_and_line_numbers() {
        let input = "Jaar,Begroting\n2015,\"€5.100.000,5\"\n2016,\n";
        let table = RawTable::read_csv(input.as_bytes()).expect("csv");
        assert_eq!(table.headers, vec!["Jaar", "Begroting"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0].get("Begroting"), Some("€5.100.000,5"));
        assert_eq!(table.rows[1].line, 3);
        assert_eq!(table.rows[1].get("Begroting"), Some(""));
    }

    #[test]
    fn short_rows_read_missing_cells_as_absent() {
        let input = "Perioden,Totaal,Gewelds-\n2019,24,3\n2020,25\n";
        let table = RawTable::read_csv(input.as_bytes()).expect("csv");
        assert_eq!(table.rows[1].get("Gewelds-"), None);
    }
}
