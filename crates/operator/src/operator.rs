use std::any::Any;
use std::fmt;

use crate::{Dense, OperatorKind, Shape};

/// Structural facts an operator asserts about itself.
///
/// `None` means unknown. Implementations must never claim a property that
/// does not hold; the algebra uses `is_non_singular == Some(false)` to reject
/// solves early.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OperatorHints {
	pub is_non_singular: Option<bool>,
	pub is_self_adjoint: Option<bool>,
	pub is_positive_definite: Option<bool>,
}

impl OperatorHints {
	/// Hints for an operator that is known to be structurally symmetric.
	pub const fn self_adjoint() -> Self {
		Self {
			is_non_singular: None,
			is_self_adjoint: Some(true),
			is_positive_definite: None,
		}
	}

	pub const fn with_non_singular(mut self, value: bool) -> Self {
		self.is_non_singular = Some(value);
		self
	}

	pub const fn with_positive_definite(mut self, value: bool) -> Self {
		self.is_positive_definite = Some(value);
		self
	}
}

/// Type identity derived from the concrete operator type.
///
/// Blanket-implemented for every operator, so `kind()` always agrees with the
/// type the registries dispatch on. Smart pointers such as `Arc<dyn
/// LinearOperator>` are not operators and deref to the inner kind.
pub trait OperatorIdentity {
	fn kind(&self) -> OperatorKind;

	fn as_any(&self) -> &dyn Any;
}

impl<T: LinearOperator> OperatorIdentity for T {
	#[inline]
	fn kind(&self) -> OperatorKind {
		OperatorKind::of::<T>()
	}

	#[inline]
	fn as_any(&self) -> &dyn Any {
		self
	}
}

/// An abstract linear transformation.
pub trait LinearOperator: OperatorIdentity + fmt::Debug + Send + Sync + 'static {
	fn shape(&self) -> Shape;

	fn hints(&self) -> OperatorHints {
		OperatorHints::default()
	}

	/// More general kinds this operator can stand in for, nearest first.
	///
	/// Only consulted by nearest-match resolution. The operator's own kind is
	/// implicit and must not be listed.
	fn ancestry(&self) -> &'static [OperatorKind] {
		&[]
	}

	/// Materializes the operator, if it has a dense representation.
	fn to_dense(&self) -> Option<Dense> {
		None
	}

	fn name(&self) -> &'static str {
		self.kind().name()
	}
}

impl<'a> dyn LinearOperator + 'a {
	#[inline]
	pub fn downcast_ref<T: LinearOperator>(&self) -> Option<&T> {
		self.as_any().downcast_ref::<T>()
	}

	#[inline]
	pub fn is<T: LinearOperator>(&self) -> bool {
		self.as_any().is::<T>()
	}
}
