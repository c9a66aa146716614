use std::fmt::Write as _;

/// Tabular dataset handed to the plot engine: a header row plus exactly one
/// data row per workflow run.
#[derive(Debug, Clone)]
pub struct Table {
    pub header: Vec<String>,
    pub rows: Vec<TableRow>,
}

/// One run's row: the category label plus one numeric cell per data column.
#[derive(Debug, Clone)]
pub struct TableRow {
    pub label: String,
    pub values: Vec<f64>,
}

impl Table {
    pub fn new(header: Vec<String>) -> Self {
        Self {
            header,
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, label: String, values: Vec<f64>) {
        self.rows.push(TableRow { label, values });
    }

    /// Serializes the table as tab-separated text, header line first.
    pub fn to_tsv(&self) -> String {
        let mut out = String::new();
        out.push_str(&self.header.join("\t"));
        out.push('\n');
        for row in &self.rows {
            out.push_str(&row.label);
            for value in &row.values {
                let _ = write!(out, "\t{}", value);
            }
            out.push('\n');
        }
        out
    }
}
