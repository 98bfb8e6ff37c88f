use crate::cost::Cost;
use crate::error::AssignmentError;
use std::ops::Index;

/// Square matrix of costs, agents along the rows and tasks along the columns.
///
/// Entries are stored row-major. A `CostMatrix` can only be built through the
/// validating constructors, so every instance is non-empty, square and finite.
#[derive(Debug, Clone, PartialEq)]
pub struct CostMatrix<C: Cost> {
    size: usize,
    values: Vec<C>,
}

impl<C: Cost> CostMatrix<C> {
    /// Builds a matrix of `size` x `size` from row-major `values`.
    pub fn from_vec(size: usize, values: Vec<C>) -> Result<Self, AssignmentError> {
        validate(size, &values)?;
        Ok(Self { size, values })
    }

    /// Builds a matrix from rows. Every row must be as long as the number of rows.
    pub fn from_rows<R: AsRef<[C]>>(rows: &[R]) -> Result<Self, AssignmentError> {
        let size = rows.len();
        if size == 0 {
            return Err(AssignmentError::InvalidInput(
                "matrix must have at least one row".to_string(),
            ));
        }
        let mut values = Vec::with_capacity(size.saturating_mul(size));
        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != size {
                return Err(AssignmentError::InvalidInput(format!(
                    "matrix must be square: row {} has {} columns, expected {}",
                    i,
                    row.len(),
                    size
                )));
            }
            values.extend_from_slice(row);
        }
        Self::from_vec(size, values)
    }

    /// Builds a matrix by evaluating `f(row, column)` for every cell.
    pub fn from_fn<F>(size: usize, mut f: F) -> Result<Self, AssignmentError>
    where
        F: FnMut(usize, usize) -> C,
    {
        let mut values = Vec::with_capacity(size.saturating_mul(size));
        for i in 0..size {
            values.extend((0..size).map(|j| f(i, j)));
        }
        Self::from_vec(size, values)
    }

    /// Number of agents, which equals the number of tasks.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn get(&self, row: usize, column: usize) -> C {
        self.values[row * self.size + column]
    }

    #[inline]
    pub fn row(&self, row: usize) -> &[C] {
        let start = row * self.size;
        &self.values[start..start + self.size]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[C]> + '_ {
        self.values.chunks_exact(self.size)
    }

    /// Row-major view of all entries.
    #[inline]
    pub fn values(&self) -> &[C] {
        &self.values
    }

    /// Largest absolute entry, as `f64`.
    pub fn max_abs(&self) -> f64 {
        max_abs(&self.values)
    }

    /// Default tolerance for checking a solution of this matrix, see
    /// [`SolutionReport::is_certified_optimal`](crate::SolutionReport::is_certified_optimal).
    pub fn toleration(&self) -> f64 {
        C::toleration(self.max_abs(), self.size)
    }
}

impl<C: Cost> Index<(usize, usize)> for CostMatrix<C> {
    type Output = C;

    #[inline]
    fn index(&self, (row, column): (usize, usize)) -> &C {
        &self.values[row * self.size + column]
    }
}

fn max_abs<C: Cost>(values: &[C]) -> f64 {
    // widen first, `abs` of an integer MIN overflows
    values.iter().fold(0_f64, |acc, x| {
        let x: f64 = x.as_();
        acc.max(x.abs())
    })
}

/// Checks that `values` describe a non-empty, square matrix of finite costs whose
/// magnitude leaves room for the dual potentials of a size `size` problem.
pub fn validate<C: Cost>(size: usize, values: &[C]) -> Result<(), AssignmentError> {
    if size == 0 {
        return Err(AssignmentError::InvalidInput(
            "matrix must have at least one row".to_string(),
        ));
    }
    if size.checked_mul(size) != Some(values.len()) {
        return Err(AssignmentError::InvalidInput(format!(
            "matrix must be square: {} entries for {} rows",
            values.len(),
            size
        )));
    }
    if let Some(idx) = values.iter().position(|v| !v.is_finite_cost()) {
        return Err(AssignmentError::NonFiniteValue {
            row: idx / size,
            column: idx % size,
        });
    }
    // intermediate slacks stay within (4n + 4) * max|c| of zero
    let max_abs = max_abs(values);
    if max_abs * (4 * size + 4) as f64 > C::LIMIT {
        return Err(AssignmentError::CostOutOfRange { max_abs, size });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{validate, CostMatrix};
    use crate::error::AssignmentError;

    #[test]
    fn test_from_rows() {
        let matrix = CostMatrix::<f64>::from_rows(&[[4., 2.], [3., 1.]]).unwrap();
        assert_eq!(matrix.size(), 2);
        assert_eq!(matrix.get(0, 1), 2.);
        assert_eq!(matrix[(1, 0)], 3.);
        assert_eq!(matrix.row(1), &[3., 1.]);
        assert_eq!(matrix.rows().count(), 2);
        assert_eq!(matrix.max_abs(), 4.);
    }

    #[test]
    fn test_non_square_rows() {
        let rows = vec![vec![1, 2, 3], vec![4, 5, 6]];
        let err = CostMatrix::<i64>::from_rows(&rows).unwrap_err();
        assert!(matches!(err, AssignmentError::InvalidInput(_)));

        let rows = vec![vec![1, 2], vec![4, 5], vec![7, 8]];
        let err = CostMatrix::<i64>::from_rows(&rows).unwrap_err();
        assert!(matches!(err, AssignmentError::InvalidInput(_)));
    }

    #[test]
    fn test_empty() {
        let rows: Vec<Vec<f64>> = Vec::new();
        let err = CostMatrix::from_rows(&rows).unwrap_err();
        assert!(matches!(err, AssignmentError::InvalidInput(_)));
        assert!(CostMatrix::<f64>::from_vec(0, vec![]).is_err());
    }

    #[test]
    fn test_wrong_length() {
        let err = CostMatrix::from_vec(2, vec![1., 2., 3.]).unwrap_err();
        assert!(matches!(err, AssignmentError::InvalidInput(_)));
    }

    #[test]
    fn test_non_finite() {
        let err = CostMatrix::<f64>::from_rows(&[[1., 2.], [f64::NAN, 4.]]).unwrap_err();
        assert!(matches!(
            err,
            AssignmentError::NonFiniteValue { row: 1, column: 0 }
        ));
        let err = CostMatrix::from_fn(3, |i, j| if i == 2 && j == 2 { f32::INFINITY } else { 0. })
            .unwrap_err();
        assert!(matches!(
            err,
            AssignmentError::NonFiniteValue { row: 2, column: 2 }
        ));
    }

    #[test]
    fn test_integer_range() {
        let err = validate(2, &[i64::MAX, 0, 0, 0]).unwrap_err();
        assert!(matches!(err, AssignmentError::CostOutOfRange { size: 2, .. }));
        assert!(validate(2, &[i64::MAX / 16, 0, 0, -(i64::MAX / 16)]).is_ok());
        assert!(validate(2, &[f64::MAX, 0., 0., 0.]).is_err());
    }

    #[test]
    fn test_integer_min_rejected() {
        let err = CostMatrix::from_rows(&[[i64::MIN, 0], [0, 0]]).unwrap_err();
        assert!(matches!(err, AssignmentError::CostOutOfRange { size: 2, .. }));
        let err = CostMatrix::from_rows(&[[0, 0], [0, i32::MIN]]).unwrap_err();
        assert!(matches!(err, AssignmentError::CostOutOfRange { size: 2, .. }));
        assert_eq!(super::max_abs(&[i32::MIN, 5, -3]), -(i32::MIN as f64));
    }

    #[test]
    fn test_from_fn() {
        let matrix = CostMatrix::from_fn(3, |i, j| (i * 3 + j) as i32).unwrap();
        assert_eq!(matrix.values(), &[0, 1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(matrix.toleration(), 0.0);
    }
}
