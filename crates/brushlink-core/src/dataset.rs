//! Tabular point datasets and their per-chunk projections.

use serde::{Deserialize, Serialize};

use crate::error::SelectionError;
use crate::partition::ChunkLayout;

/// Ordered numeric columns of equal length.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<f32>>", into = "Vec<Vec<f32>>")]
pub struct Dataset {
    columns: Vec<Vec<f32>>,
}

impl Dataset {
    /// Build a dataset, checking every column has the same length.
    pub fn new(columns: Vec<Vec<f32>>) -> Result<Self, SelectionError> {
        if let Some(first) = columns.first() {
            let expected = first.len();
            if let Some((column, c)) = columns
                .iter()
                .enumerate()
                .find(|(_, c)| c.len() != expected)
            {
                return Err(SelectionError::ColumnLengthMismatch {
                    column,
                    expected,
                    actual: c.len(),
                });
            }
        }
        Ok(Self { columns })
    }

    /// Number of rows (zero when there are no columns).
    pub fn row_count(&self) -> usize {
        self.columns.first().map_or(0, Vec::len)
    }

    /// Number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Values of one column.
    pub fn column(&self, column: usize) -> Option<&[f32]> {
        self.columns.get(column).map(Vec::as_slice)
    }

    /// Interleave two columns into per-chunk `[x0, y0, x1, y1, ...]` arrays,
    /// in the local order used by the partition.
    pub fn project(
        &self,
        x_column: usize,
        y_column: usize,
        layout: &ChunkLayout,
    ) -> Result<Vec<Vec<f32>>, SelectionError> {
        let xs = self.require_column(x_column)?;
        let ys = self.require_column(y_column)?;
        if self.row_count() != layout.row_count() {
            return Err(SelectionError::StaleSnapshot {
                expected: layout.row_count(),
                actual: self.row_count(),
            });
        }

        let chunks = (0..layout.chunk_count())
            .map(|chunk| {
                let start = chunk * layout.capacity();
                let end = start + layout.chunk_len(chunk);
                xs[start..end]
                    .iter()
                    .zip(&ys[start..end])
                    .flat_map(|(&x, &y)| [x, y])
                    .collect()
            })
            .collect();
        Ok(chunks)
    }

    /// New dataset holding only `rows` (global positions), in the given
    /// order. Out-of-range rows are skipped.
    pub fn gather_rows(&self, rows: &[usize]) -> Self {
        let columns = self
            .columns
            .iter()
            .map(|col| rows.iter().filter_map(|&r| col.get(r).copied()).collect())
            .collect();
        Self { columns }
    }

    fn require_column(&self, column: usize) -> Result<&[f32], SelectionError> {
        self.column(column).ok_or(SelectionError::UnknownColumn {
            column,
            column_count: self.columns.len(),
        })
    }
}

impl TryFrom<Vec<Vec<f32>>> for Dataset {
    type Error = SelectionError;

    fn try_from(columns: Vec<Vec<f32>>) -> Result<Self, Self::Error> {
        Self::new(columns)
    }
}

impl From<Dataset> for Vec<Vec<f32>> {
    fn from(dataset: Dataset) -> Self {
        dataset.columns
    }
}
