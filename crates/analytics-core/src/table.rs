//! Numeric tables: 2-D containers of observations (rows) by features (columns)
//!
//! Algorithms only depend on the [`NumericTable`] block-access protocol:
//! read or write one column for all rows, or read a row-major block of rows.
//! Two layouts are provided:
//!
//! - [`HomogenTable`]: single element type, row-major
//! - [`SoaTable`]: one typed vector per column, so rows may mix types

use crate::{Error, Numeric, Result};

/// Block-wise access to a 2-D table of numeric values
pub trait NumericTable<T: Numeric>: Send + Sync {
    /// Number of observations
    fn n_rows(&self) -> usize;

    /// Number of features
    fn n_cols(&self) -> usize;

    /// `(rows, cols)`
    fn shape(&self) -> (usize, usize) {
        (self.n_rows(), self.n_cols())
    }

    /// Read column `col` for all rows into `out`, replacing its contents
    fn read_column(&self, col: usize, out: &mut Vec<T>) -> Result<()>;

    /// Read `count` rows starting at `start`, row-major, into `out`
    fn read_rows(&self, start: usize, count: usize, out: &mut Vec<T>) -> Result<()>;

    /// Overwrite column `col` for all rows
    fn write_column(&mut self, col: usize, values: &[T]) -> Result<()>;
}

fn check_column(col: usize, n_cols: usize) -> Result<()> {
    if col >= n_cols {
        return Err(Error::InvalidInput(format!(
            "column index {col} out of range for table with {n_cols} columns"
        )));
    }
    Ok(())
}

fn check_row_block(start: usize, count: usize, n_rows: usize) -> Result<()> {
    match start.checked_add(count) {
        Some(end) if end <= n_rows => Ok(()),
        _ => Err(Error::InvalidInput(format!(
            "row block {start}..{start}+{count} out of range for table with {n_rows} rows"
        ))),
    }
}

/// Allocate a zero-filled buffer of `rows * cols` elements without aborting on failure
pub(crate) fn try_zeroed<T: Numeric>(rows: usize, cols: usize) -> Result<Vec<T>> {
    let len = rows.checked_mul(cols).ok_or_else(|| {
        Error::AllocationFailure(format!("{rows}x{cols} elements overflow usize"))
    })?;
    let mut data = Vec::new();
    data.try_reserve_exact(len).map_err(|e| {
        Error::AllocationFailure(format!("cannot reserve {rows}x{cols} {}: {e}", T::NAME))
    })?;
    data.resize(len, T::default());
    Ok(data)
}

/// Homogeneous row-major numeric table
#[derive(Debug, Clone, PartialEq)]
pub struct HomogenTable<T: Numeric> {
    rows: usize,
    cols: usize,
    data: Vec<T>,
}

impl<T: Numeric> HomogenTable<T> {
    /// Zero-filled table
    pub fn new(rows: usize, cols: usize) -> Result<Self> {
        Ok(Self {
            rows,
            cols,
            data: try_zeroed(rows, cols)?,
        })
    }

    /// Wrap row-major data
    pub fn from_vec(rows: usize, cols: usize, data: Vec<T>) -> Result<Self> {
        let expected = rows
            .checked_mul(cols)
            .ok_or_else(|| Error::InvalidInput(format!("{rows}x{cols} overflows usize")))?;
        if data.len() != expected {
            return Err(Error::size_mismatch(expected, data.len(), "table data"));
        }
        Ok(Self { rows, cols, data })
    }

    /// Build from a slice of equally sized rows
    pub fn from_rows<R: AsRef<[T]>>(rows: &[R]) -> Result<Self> {
        let cols = rows.first().map_or(0, |r| r.as_ref().len());
        let mut data = Vec::with_capacity(rows.len() * cols);
        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != cols {
                return Err(Error::size_mismatch(cols, row.len(), &format!("row {i}")));
            }
            data.extend_from_slice(row);
        }
        Ok(Self {
            rows: rows.len(),
            cols,
            data,
        })
    }

    /// Row-major view of all values
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Single row, if in range
    pub fn row(&self, row: usize) -> Option<&[T]> {
        if row >= self.rows {
            return None;
        }
        let start = row * self.cols;
        Some(&self.data[start..start + self.cols])
    }

    pub fn get(&self, row: usize, col: usize) -> Option<T> {
        if col >= self.cols {
            return None;
        }
        self.row(row).map(|r| r[col])
    }
}

impl<T: Numeric> NumericTable<T> for HomogenTable<T> {
    fn n_rows(&self) -> usize {
        self.rows
    }

    fn n_cols(&self) -> usize {
        self.cols
    }

    fn read_column(&self, col: usize, out: &mut Vec<T>) -> Result<()> {
        check_column(col, self.cols)?;
        out.clear();
        out.extend(self.data.iter().skip(col).step_by(self.cols).copied());
        Ok(())
    }

    fn read_rows(&self, start: usize, count: usize, out: &mut Vec<T>) -> Result<()> {
        check_row_block(start, count, self.rows)?;
        out.clear();
        out.extend_from_slice(&self.data[start * self.cols..(start + count) * self.cols]);
        Ok(())
    }

    fn write_column(&mut self, col: usize, values: &[T]) -> Result<()> {
        check_column(col, self.cols)?;
        if values.len() != self.rows {
            return Err(Error::size_mismatch(self.rows, values.len(), "column block"));
        }
        for (dst, &v) in self.data.iter_mut().skip(col).step_by(self.cols).zip(values) {
            *dst = v;
        }
        Ok(())
    }
}

/// Storage of one column in a [`SoaTable`]
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnData {
    F32(Vec<f32>),
    F64(Vec<f64>),
    I32(Vec<i32>),
}

impl ColumnData {
    pub fn len(&self) -> usize {
        match self {
            Self::F32(v) => v.len(),
            Self::F64(v) => v.len(),
            Self::I32(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn value(&self, row: usize) -> f64 {
        match self {
            Self::F32(v) => v[row] as f64,
            Self::F64(v) => v[row],
            Self::I32(v) => v[row] as f64,
        }
    }

    fn read_into<T: Numeric>(&self, out: &mut Vec<T>) {
        out.clear();
        match self {
            Self::F32(v) => out.extend(v.iter().map(|&x| T::from_f64(x as f64))),
            Self::F64(v) => out.extend(v.iter().map(|&x| T::from_f64(x))),
            Self::I32(v) => out.extend(v.iter().map(|&x| T::from_f64(x as f64))),
        }
    }

    fn write_from<T: Numeric>(&mut self, values: &[T]) {
        match self {
            Self::F32(v) => {
                for (dst, x) in v.iter_mut().zip(values) {
                    *dst = x.to_f64() as f32;
                }
            }
            Self::F64(v) => {
                for (dst, x) in v.iter_mut().zip(values) {
                    *dst = x.to_f64();
                }
            }
            Self::I32(v) => {
                for (dst, x) in v.iter_mut().zip(values) {
                    *dst = x.to_f64().round() as i32;
                }
            }
        }
    }
}

/// Structure-of-arrays table whose columns may have different element types
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SoaTable {
    rows: usize,
    columns: Vec<ColumnData>,
}

impl SoaTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a column; all columns must have the same length
    pub fn with_column(mut self, column: ColumnData) -> Result<Self> {
        self.push_column(column)?;
        Ok(self)
    }

    pub fn push_column(&mut self, column: ColumnData) -> Result<()> {
        if self.columns.is_empty() {
            self.rows = column.len();
        } else if column.len() != self.rows {
            return Err(Error::size_mismatch(self.rows, column.len(), "column length"));
        }
        self.columns.push(column);
        Ok(())
    }

    pub fn column(&self, col: usize) -> Option<&ColumnData> {
        self.columns.get(col)
    }
}

impl<T: Numeric> NumericTable<T> for SoaTable {
    fn n_rows(&self) -> usize {
        self.rows
    }

    fn n_cols(&self) -> usize {
        self.columns.len()
    }

    fn read_column(&self, col: usize, out: &mut Vec<T>) -> Result<()> {
        check_column(col, self.columns.len())?;
        self.columns[col].read_into(out);
        Ok(())
    }

    fn read_rows(&self, start: usize, count: usize, out: &mut Vec<T>) -> Result<()> {
        check_row_block(start, count, self.rows)?;
        out.clear();
        out.reserve(count * self.columns.len());
        for row in start..start + count {
            out.extend(self.columns.iter().map(|c| T::from_f64(c.value(row))));
        }
        Ok(())
    }

    fn write_column(&mut self, col: usize, values: &[T]) -> Result<()> {
        check_column(col, self.columns.len())?;
        if values.len() != self.rows {
            return Err(Error::size_mismatch(self.rows, values.len(), "column block"));
        }
        self.columns[col].write_from(values);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> HomogenTable<f64> {
        HomogenTable::from_rows(&[[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]]).unwrap()
    }

    #[test]
    fn test_homogen_column_access() {
        let mut table = sample();
        assert_eq!(table.shape(), (3, 2));

        let mut col = Vec::new();
        table.read_column(1, &mut col).unwrap();
        assert_eq!(col, vec![2.0, 4.0, 6.0]);

        table.write_column(0, &[7.0, 8.0, 9.0]).unwrap();
        assert_eq!(table.as_slice(), &[7.0, 2.0, 8.0, 4.0, 9.0, 6.0]);
        assert_eq!(table.get(2, 0), Some(9.0));
        assert_eq!(table.get(3, 0), None);
    }

    #[test]
    fn test_homogen_row_block() {
        let table = sample();
        let mut block = Vec::new();
        table.read_rows(1, 2, &mut block).unwrap();
        assert_eq!(block, vec![3.0, 4.0, 5.0, 6.0]);
        assert!(table.read_rows(2, 2, &mut block).is_err());
    }

    #[test]
    fn test_homogen_rejects_bad_shapes() {
        assert!(matches!(
            HomogenTable::from_vec(2, 2, vec![1.0f32; 3]),
            Err(Error::DimensionMismatch { expected: 4, actual: 3, .. })
        ));
        assert!(HomogenTable::from_rows(&[vec![1.0f64, 2.0], vec![3.0]]).is_err());

        let mut table = sample();
        assert!(table.write_column(2, &[0.0; 3]).is_err());
        assert!(table.write_column(0, &[0.0; 2]).is_err());
    }

    #[test]
    fn test_allocation_overflow_is_reported() {
        assert!(matches!(
            HomogenTable::<f64>::new(usize::MAX, 2),
            Err(Error::AllocationFailure(_))
        ));
    }

    #[test]
    fn test_soa_mixed_types() {
        let mut table = SoaTable::new()
            .with_column(ColumnData::I32(vec![1, 3, 5]))
            .unwrap()
            .with_column(ColumnData::F32(vec![2.0, 4.0, 6.0]))
            .unwrap();

        assert_eq!(NumericTable::<f64>::shape(&table), (3, 2));

        let mut col: Vec<f64> = Vec::new();
        table.read_column(0, &mut col).unwrap();
        assert_eq!(col, vec![1.0, 3.0, 5.0]);

        let mut block: Vec<f64> = Vec::new();
        table.read_rows(0, 2, &mut block).unwrap();
        assert_eq!(block, vec![1.0, 2.0, 3.0, 4.0]);

        table.write_column(1, &[0.5f64, 1.5, 2.5][..]).unwrap();
        assert_eq!(table.column(1), Some(&ColumnData::F32(vec![0.5, 1.5, 2.5])));

        assert!(table.push_column(ColumnData::F64(vec![1.0])).is_err());
    }
}
