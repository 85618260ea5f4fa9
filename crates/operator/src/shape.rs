use std::fmt;

/// Rows by columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
	pub rows: usize,
	pub cols: usize,
}

impl Shape {
	pub const fn new(rows: usize, cols: usize) -> Self {
		Self { rows, cols }
	}

	pub const fn square(n: usize) -> Self {
		Self { rows: n, cols: n }
	}

	pub const fn is_square(&self) -> bool {
		self.rows == self.cols
	}

	/// Returns true if `self * rhs` is defined.
	pub const fn composes_with(&self, rhs: Shape) -> bool {
		self.cols == rhs.rows
	}
}

impl fmt::Display for Shape {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "[{}, {}]", self.rows, self.cols)
	}
}
