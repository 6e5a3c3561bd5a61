// Survey response table domain model

/// Rows are submissions, columns are questions. A cell is `None` when the
/// respondent left it empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResponseTable {
    headers: Vec<String>,
    rows: Vec<Vec<Option<String>>>,
}

impl ResponseTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<Option<String>>>) -> Self {
        Self { headers, rows }
    }

    /// Build a table from raw string records, treating empty strings as missing
    pub fn from_records(headers: Vec<String>, records: Vec<Vec<String>>) -> Self {
        let rows = records
            .into_iter()
            .map(|record| {
                record
                    .into_iter()
                    .map(|cell| if cell.is_empty() { None } else { Some(cell) })
                    .collect()
            })
            .collect();
        Self::new(headers, rows)
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Non-missing cells of the column at `idx`, in row order. Out-of-range
    /// columns yield nothing.
    pub fn answers_at(&self, idx: usize) -> impl Iterator<Item = &str> {
        self.rows
            .iter()
            .filter_map(move |row| row.get(idx).and_then(|cell| cell.as_deref()))
    }
}
