//! Minimal tabular containers
//!
//! `Series` is a single named column and `DataFrame` a labelled set of
//! columns stored row-major. Both support positional row selection
//! (`iloc`), which is the indexing protocol tabular feature handles must
//! satisfy.

use crate::error::{Result, ValidationError};
use ndarray::{Array1, Array2, Axis};

/// Check that every position addresses an existing row
fn check_positions(positions: &[usize], len: usize) -> Result<()> {
    if let Some(&bad) = positions.iter().find(|&&p| p >= len) {
        return Err(ValidationError::invalid_value(format!(
            "positional index {} is out-of-bounds for length {}",
            bad, len
        )));
    }
    Ok(())
}

/// A single labelled column
#[derive(Debug, Clone, PartialEq)]
pub struct Series<T> {
    name: Option<String>,
    values: Array1<T>,
}

impl<T: Clone> Series<T> {
    /// Create an unnamed series
    pub fn new(values: Vec<T>) -> Self {
        Self {
            name: None,
            values: Array1::from(values),
        }
    }

    /// Attach a column name
    #[must_use]
    pub fn with_name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Borrow the underlying values
    pub fn values(&self) -> &Array1<T> {
        &self.values
    }

    /// Copy the values out as a 1-D array
    pub fn to_array(&self) -> Array1<T> {
        self.values.clone()
    }

    /// Select elements by position
    pub fn iloc(&self, positions: &[usize]) -> Result<Array1<T>> {
        check_positions(positions, self.len())?;
        Ok(self.values.select(Axis(0), positions))
    }
}

/// Labelled columns over a row-major value matrix
#[derive(Debug, Clone, PartialEq)]
pub struct DataFrame<T> {
    columns: Vec<String>,
    data: Array2<T>,
}

impl<T: Clone> DataFrame<T> {
    /// Create a frame from column labels and a `rows x columns` matrix
    pub fn new(columns: Vec<String>, data: Array2<T>) -> Result<Self> {
        if columns.len() != data.ncols() {
            return Err(ValidationError::invalid_value(format!(
                "DataFrame has {} column labels but {} data columns",
                columns.len(),
                data.ncols()
            )));
        }
        Ok(Self { columns, data })
    }

    /// Create a frame from row vectors; every row must have one value per column
    pub fn from_rows(columns: Vec<String>, rows: Vec<Vec<T>>) -> Result<Self> {
        let ncols = columns.len();
        let nrows = rows.len();
        if let Some((i, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != ncols) {
            return Err(ValidationError::invalid_value(format!(
                "DataFrame row {} has {} values, expected {}",
                i,
                row.len(),
                ncols
            )));
        }
        let flat: Vec<T> = rows.into_iter().flatten().collect();
        let data = Array2::from_shape_vec((nrows, ncols), flat)
            .map_err(|e| ValidationError::invalid_value(format!("DataFrame shape error: {}", e)))?;
        Self::new(columns, data)
    }

    /// Create a single-column frame
    pub fn from_column<S: Into<String>>(name: S, values: Vec<T>) -> Self {
        Self {
            columns: vec![name.into()],
            data: Array1::from(values).insert_axis(Axis(1)),
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// `(rows, columns)`
    pub fn shape(&self) -> (usize, usize) {
        self.data.dim()
    }

    pub fn nrows(&self) -> usize {
        self.data.nrows()
    }

    pub fn ncols(&self) -> usize {
        self.data.ncols()
    }

    /// Borrow the value matrix
    pub fn values(&self) -> &Array2<T> {
        &self.data
    }

    /// Select rows by position
    pub fn iloc(&self, positions: &[usize]) -> Result<Array2<T>> {
        check_positions(positions, self.nrows())?;
        Ok(self.data.select(Axis(0), positions))
    }

    /// Select columns by label
    pub fn select_columns<S: AsRef<str>>(&self, labels: &[S]) -> Result<Array2<T>> {
        let mut positions = Vec::with_capacity(labels.len());
        for label in labels {
            let label = label.as_ref();
            let pos = self
                .columns
                .iter()
                .position(|c| c == label)
                .ok_or_else(|| {
                    ValidationError::invalid_value(format!("column '{}' not in DataFrame", label))
                })?;
            positions.push(pos);
        }
        Ok(self.data.select(Axis(1), &positions))
    }
}
