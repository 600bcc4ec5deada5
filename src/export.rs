use crate::results::Collected;
use crate::utils::csv_path;
use csv::Writer;
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("column {column} has {found} values, expected {expected}")]
    Misaligned {
        column: String,
        expected: usize,
        found: usize,
    },

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Row-oriented view of the collected columns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Transpose named columns into rows; row `i` takes the `i`-th value of
    /// every column. All columns must have the same length.
    pub fn from_columns(columns: &[(&str, &[String])]) -> Result<Self, ExportError> {
        let headers = columns.iter().map(|(name, _)| name.to_string()).collect();
        let expected = columns.first().map_or(0, |(_, values)| values.len());

        if let Some((name, values)) = columns.iter().find(|(_, v)| v.len() != expected) {
            return Err(ExportError::Misaligned {
                column: name.to_string(),
                expected,
                found: values.len(),
            });
        }

        let rows = (0..expected)
            .map(|i| columns.iter().map(|(_, values)| values[i].clone()).collect())
            .collect();

        Ok(Self { headers, rows })
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// What the export step did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    /// File written at this path
    Written(PathBuf),
    /// Nothing collected, no file written
    Skipped,
    /// Writing failed; the error was logged
    Failed(String),
}

fn write_table<W: Write>(wtr: &mut Writer<W>, table: &Table) -> Result<(), ExportError> {
    wtr.write_record(&table.headers)?;
    for row in &table.rows {
        wtr.write_record(row)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Render a table as comma-separated text: header line, then one line per row
pub fn render_csv(table: &Table) -> Result<Vec<u8>, ExportError> {
    let mut wtr = Writer::from_writer(Vec::new());
    write_table(&mut wtr, table)?;
    wtr.into_inner().map_err(|e| ExportError::Io(e.into_error()))
}

/// Save the collected records to `<output_prefix>.csv`.
///
/// An empty collection is skipped. Failures are logged and reported in the
/// outcome, never returned as errors.
pub fn export(collected: &Collected, output_prefix: &str) -> ExportOutcome {
    let table = match Table::from_columns(&collected.assemble()) {
        Ok(table) => table,
        Err(e) => {
            ::log::error!("Error converting data into a table: {}", e);
            return ExportOutcome::Failed(e.to_string());
        }
    };

    if table.is_empty() {
        ::log::warn!("Error: no data provided, nothing to save");
        return ExportOutcome::Skipped;
    }

    let path = csv_path(output_prefix);
    let written =
        render_csv(&table).and_then(|bytes| fs::write(&path, bytes).map_err(ExportError::from));
    match written {
        Ok(()) => {
            ::log::info!(
                "Data has been saved to: {} ({} rows)",
                path.display(),
                table.rows.len()
            );
            ExportOutcome::Written(path)
        }
        Err(e) => {
            ::log::error!("Error saving data into {}: {}", path.display(), e);
            ExportOutcome::Failed(e.to_string())
        }
    }
}
