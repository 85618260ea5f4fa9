use std::fmt;

use linop_operator::{LinearOperator, OperatorError};

/// Binary operations dispatched through a type-pair registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlgebraOp {
	/// `x` such that `lhs * x = rhs`.
	Solve,
	/// `lhs * rhs`.
	Matmul,
}

impl AlgebraOp {
	pub const fn label(self) -> &'static str {
		match self {
			Self::Solve => "solve",
			Self::Matmul => "matmul",
		}
	}

	/// Validates operand shapes and hints before dispatch.
	pub fn check_operands(
		self,
		lhs: &dyn LinearOperator,
		rhs: &dyn LinearOperator,
	) -> Result<(), OperatorError> {
		let (ls, rs) = (lhs.shape(), rhs.shape());
		if self == Self::Solve {
			if !ls.is_square() {
				return Err(OperatorError::NotSquare {
					op: self.label(),
					shape: ls,
				});
			}
			if lhs.hints().is_non_singular == Some(false) {
				return Err(OperatorError::Singular { kind: lhs.name() });
			}
		}
		if !ls.composes_with(rs) {
			return Err(OperatorError::ShapeMismatch {
				op: self.label(),
				lhs: ls,
				rhs: rs,
			});
		}
		Ok(())
	}
}

impl fmt::Display for AlgebraOp {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.label())
	}
}
