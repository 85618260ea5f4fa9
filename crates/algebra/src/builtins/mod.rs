//! Built-in implementations for the structured operators.
//!
//! Each table lists exact registration keys. Handlers view their operands
//! through [`Structured::coerce`], so under nearest resolution they also accept
//! any descendant kind.

use std::borrow::Cow;
use std::sync::Arc;

use linop_operator::{LinearOperator, OperatorError, OperatorKind, Structured};

use crate::db::{AlgebraDb, OperatorPairRegistry, OperatorResult};
use crate::key::RegistrationKey;
use crate::op::AlgebraOp;
use crate::registry::PairFn;

macro_rules! builtin {
	($lhs:ty, $rhs:ty, $handler:expr) => {
		$crate::builtins::BuiltinPair {
			lhs: linop_operator::OperatorKind::of::<$lhs>,
			rhs: linop_operator::OperatorKind::of::<$rhs>,
			handler: $handler,
			name: stringify!($handler),
		}
	};
}

mod matmul;
mod solve;

pub(crate) use matmul::MATMUL_BUILTINS;
pub(crate) use solve::SOLVE_BUILTINS;

pub type OperatorFn = fn(&dyn LinearOperator, &dyn LinearOperator) -> OperatorResult;

/// A statically declared implementation.
pub struct BuiltinPair {
	pub lhs: fn() -> OperatorKind,
	pub rhs: fn() -> OperatorKind,
	pub handler: OperatorFn,
	/// Handler path, for diagnostics.
	pub name: &'static str,
}

impl BuiltinPair {
	pub fn key(&self) -> RegistrationKey {
		RegistrationKey::new((self.lhs)(), (self.rhs)())
	}
}

pub(crate) fn register_all(db: &AlgebraDb) {
	seed(AlgebraOp::Solve, &db.solve, SOLVE_BUILTINS);
	seed(AlgebraOp::Matmul, &db.matmul, MATMUL_BUILTINS);
}

/// Inserts a table, panicking on a duplicate key: built-in tables must be disjoint.
fn seed(op: AlgebraOp, registry: &OperatorPairRegistry, table: &'static [BuiltinPair]) {
	for pair in table {
		let handler = pair.handler;
		let implementation: PairFn<OperatorResult> =
			Arc::new(move |lhs: &dyn LinearOperator, rhs: &dyn LinearOperator| {
				op.check_operands(lhs, rhs)?;
				handler(lhs, rhs)
			});
		if let Err(e) = registry.register_builtin(pair.key(), implementation) {
			panic!("registry {}: {} ({})", registry.label(), e, pair.name);
		}
	}
}

/// Views `op` as `T` or reports which kind was expected.
fn view<T: Structured>(op: &dyn LinearOperator) -> Result<Cow<'_, T>, OperatorError> {
	T::coerce(op).ok_or(OperatorError::KindMismatch {
		expected: OperatorKind::of::<T>().name(),
		found: op.name(),
	})
}
