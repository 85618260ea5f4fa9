use std::borrow::Cow;
use std::sync::LazyLock;

use super::{Dense, ScaledIdentity, Structured};
use crate::{LinearOperator, OperatorHints, OperatorKind, Shape};

static DIAGONAL_ANCESTRY: LazyLock<[OperatorKind; 1]> =
	LazyLock::new(|| [OperatorKind::of::<Dense>()]);

/// A square operator with entries only on the main diagonal.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagonal {
	diag: Vec<f64>,
}

impl Diagonal {
	pub fn new(diag: Vec<f64>) -> Self {
		Self { diag }
	}

	pub fn diag(&self) -> &[f64] {
		&self.diag
	}

	pub fn dim(&self) -> usize {
		self.diag.len()
	}
}

impl From<Vec<f64>> for Diagonal {
	fn from(diag: Vec<f64>) -> Self {
		Self::new(diag)
	}
}

impl LinearOperator for Diagonal {
	fn shape(&self) -> Shape {
		Shape::square(self.diag.len())
	}

	fn hints(&self) -> OperatorHints {
		OperatorHints::self_adjoint()
			.with_non_singular(self.diag.iter().all(|&d| d != 0.0))
			.with_positive_definite(self.diag.iter().all(|&d| d > 0.0))
	}

	fn ancestry(&self) -> &'static [OperatorKind] {
		&*DIAGONAL_ANCESTRY
	}

	fn to_dense(&self) -> Option<Dense> {
		Some(Dense::from_diagonal(&self.diag))
	}
}

impl Structured for Diagonal {
	fn coerce(op: &dyn LinearOperator) -> Option<Cow<'_, Self>> {
		if let Some(diag) = op.downcast_ref::<Self>() {
			return Some(Cow::Borrowed(diag));
		}
		// Covers Identity as well.
		if let Some(scaled) = ScaledIdentity::coerce(op) {
			return Some(Cow::Owned(Self::new(vec![scaled.scale(); scaled.dim()])));
		}
		None
	}
}
