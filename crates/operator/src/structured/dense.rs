use std::borrow::Cow;

use super::Structured;
use crate::{LinearOperator, OperatorError, Shape};

/// Row-major dense matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct Dense {
	rows: usize,
	cols: usize,
	data: Vec<f64>,
}

impl Dense {
	pub fn new(rows: usize, cols: usize, data: Vec<f64>) -> Result<Self, OperatorError> {
		if rows.checked_mul(cols) != Some(data.len()) {
			return Err(OperatorError::DataLength {
				rows,
				cols,
				len: data.len(),
			});
		}
		Ok(Self { rows, cols, data })
	}

	/// Builds a matrix from equally sized rows.
	pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self, OperatorError> {
		let cols = rows.first().map_or(0, |r| r.as_ref().len());
		let mut data = Vec::with_capacity(rows.len() * cols);
		for (idx, row) in rows.iter().enumerate() {
			let row = row.as_ref();
			if row.len() != cols {
				return Err(OperatorError::RaggedRow {
					row: idx,
					expected: cols,
					found: row.len(),
				});
			}
			data.extend_from_slice(row);
		}
		Self::new(rows.len(), cols, data)
	}

	pub fn from_diagonal(diag: &[f64]) -> Self {
		let n = diag.len();
		let mut data = vec![0.0; n * n];
		for (i, &d) in diag.iter().enumerate() {
			data[i * n + i] = d;
		}
		Self {
			rows: n,
			cols: n,
			data,
		}
	}

	pub fn rows(&self) -> usize {
		self.rows
	}

	pub fn cols(&self) -> usize {
		self.cols
	}

	pub fn data(&self) -> &[f64] {
		&self.data
	}

	pub fn row(&self, r: usize) -> &[f64] {
		&self.data[r * self.cols..(r + 1) * self.cols]
	}

	pub fn get(&self, r: usize, c: usize) -> Option<f64> {
		if r < self.rows && c < self.cols {
			Some(self.data[r * self.cols + c])
		} else {
			None
		}
	}

	/// Returns a copy with row `r` multiplied by `factor(r)`.
	pub fn scale_rows(&self, factor: impl Fn(usize) -> f64) -> Self {
		let mut out = self.clone();
		if self.cols > 0 {
			for (r, row) in out.data.chunks_mut(self.cols).enumerate() {
				let f = factor(r);
				row.iter_mut().for_each(|v| *v *= f);
			}
		}
		out
	}

	/// Returns a copy with column `c` multiplied by `factor(c)`.
	pub fn scale_cols(&self, factor: impl Fn(usize) -> f64) -> Self {
		let mut out = self.clone();
		if self.cols > 0 {
			for row in out.data.chunks_mut(self.cols) {
				for (c, v) in row.iter_mut().enumerate() {
					*v *= factor(c);
				}
			}
		}
		out
	}
}

impl LinearOperator for Dense {
	fn shape(&self) -> Shape {
		Shape::new(self.rows, self.cols)
	}

	fn to_dense(&self) -> Option<Dense> {
		Some(self.clone())
	}
}

impl Structured for Dense {
	fn coerce(op: &dyn LinearOperator) -> Option<Cow<'_, Self>> {
		match op.downcast_ref::<Self>() {
			Some(dense) => Some(Cow::Borrowed(dense)),
			None => op
				.to_dense()
				.filter(|dense| dense.shape() == op.shape())
				.map(Cow::Owned),
		}
	}
}
