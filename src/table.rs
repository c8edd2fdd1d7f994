use crate::error::{FormatterError, Result};

/// In-memory source table: ordered headers plus rows of untyped text cells.
///
/// Cells are kept exactly as read; cleaning happens in the pipeline. Short
/// rows are tolerated (a missing trailing cell reads as empty), but a row
/// wider than the header record means the table cannot be addressed by
/// column and is rejected.
#[derive(Debug, Clone)]
pub struct RawTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Result<Self> {
        for (i, row) in rows.iter().enumerate() {
            if row.len() > headers.len() {
                return Err(FormatterError::InvalidInput(format!(
                    "row {} has {} cells but the header record has {}",
                    i + 2,
                    row.len(),
                    headers.len()
                )));
            }
        }
        Ok(Self { headers, rows })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Number of data rows (the header record is not a row).
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Index of the column with this exact header, if present.
    pub fn column_index(&self, header: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == header)
    }

    /// Raw cell text at (row, column); empty for missing cells or an absent
    /// column.
    pub fn cell(&self, row: usize, col: Option<usize>) -> &str {
        let Some(col) = col else { return "" };
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .map(String::as_str)
            .unwrap_or("")
    }
}
