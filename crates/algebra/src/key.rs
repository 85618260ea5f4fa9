use std::fmt;

use linop_operator::{LinearOperator, OperatorKind};

/// Ordered pair of operator kinds. `(A, B)` and `(B, A)` are distinct keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RegistrationKey {
	pub lhs: OperatorKind,
	pub rhs: OperatorKind,
}

impl RegistrationKey {
	pub const fn new(lhs: OperatorKind, rhs: OperatorKind) -> Self {
		Self { lhs, rhs }
	}

	pub fn of<A: LinearOperator, B: LinearOperator>() -> Self {
		Self::new(OperatorKind::of::<A>(), OperatorKind::of::<B>())
	}

	/// Key for the runtime kinds of two operands.
	pub fn for_operands(lhs: &dyn LinearOperator, rhs: &dyn LinearOperator) -> Self {
		Self::new(lhs.kind(), rhs.kind())
	}
}

impl From<(OperatorKind, OperatorKind)> for RegistrationKey {
	fn from((lhs, rhs): (OperatorKind, OperatorKind)) -> Self {
		Self::new(lhs, rhs)
	}
}

impl fmt::Display for RegistrationKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "({}, {})", self.lhs, self.rhs)
	}
}
