use std::borrow::Cow;
use std::sync::LazyLock;

use super::{Dense, Diagonal, Structured};
use crate::{LinearOperator, OperatorHints, OperatorKind, Shape};

static IDENTITY_ANCESTRY: LazyLock<[OperatorKind; 3]> = LazyLock::new(|| {
	[
		OperatorKind::of::<ScaledIdentity>(),
		OperatorKind::of::<Diagonal>(),
		OperatorKind::of::<Dense>(),
	]
});

static SCALED_ANCESTRY: LazyLock<[OperatorKind; 2]> =
	LazyLock::new(|| [OperatorKind::of::<Diagonal>(), OperatorKind::of::<Dense>()]);

/// The `n x n` identity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Identity {
	dim: usize,
}

impl Identity {
	pub const fn new(dim: usize) -> Self {
		Self { dim }
	}

	pub const fn dim(&self) -> usize {
		self.dim
	}
}

impl LinearOperator for Identity {
	fn shape(&self) -> Shape {
		Shape::square(self.dim)
	}

	fn hints(&self) -> OperatorHints {
		OperatorHints::self_adjoint()
			.with_non_singular(true)
			.with_positive_definite(true)
	}

	fn ancestry(&self) -> &'static [OperatorKind] {
		&*IDENTITY_ANCESTRY
	}

	fn to_dense(&self) -> Option<Dense> {
		Some(Dense::from_diagonal(&vec![1.0; self.dim]))
	}
}

impl Structured for Identity {
	fn coerce(op: &dyn LinearOperator) -> Option<Cow<'_, Self>> {
		op.downcast_ref::<Self>().map(Cow::Borrowed)
	}
}

/// `scale * I` of dimension `n`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaledIdentity {
	dim: usize,
	scale: f64,
}

impl ScaledIdentity {
	pub const fn new(dim: usize, scale: f64) -> Self {
		Self { dim, scale }
	}

	pub const fn dim(&self) -> usize {
		self.dim
	}

	pub const fn scale(&self) -> f64 {
		self.scale
	}
}

impl LinearOperator for ScaledIdentity {
	fn shape(&self) -> Shape {
		Shape::square(self.dim)
	}

	fn hints(&self) -> OperatorHints {
		OperatorHints::self_adjoint()
			.with_non_singular(self.scale != 0.0)
			.with_positive_definite(self.scale > 0.0)
	}

	fn ancestry(&self) -> &'static [OperatorKind] {
		&*SCALED_ANCESTRY
	}

	fn to_dense(&self) -> Option<Dense> {
		Some(Dense::from_diagonal(&vec![self.scale; self.dim]))
	}
}

impl Structured for ScaledIdentity {
	fn coerce(op: &dyn LinearOperator) -> Option<Cow<'_, Self>> {
		if let Some(scaled) = op.downcast_ref::<Self>() {
			return Some(Cow::Borrowed(scaled));
		}
		op.downcast_ref::<Identity>()
			.map(|id| Cow::Owned(Self::new(id.dim(), 1.0)))
	}
}
