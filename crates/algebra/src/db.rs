//! Global registries and the generic algebra entry points.

use std::sync::{Arc, LazyLock, OnceLock};

use linop_operator::{LinearOperator, OperatorKind};

use crate::config::AlgebraConfig;
use crate::error::Result;
use crate::op::AlgebraOp;
use crate::registry::{Registrar, TypePairRegistry};
use crate::{builtins, plugin};

/// Result of a solve or matmul implementation.
pub type OperatorResult = Result<Arc<dyn LinearOperator>>;

/// Registry type used for operator-valued operations.
pub type OperatorPairRegistry = TypePairRegistry<OperatorResult>;

/// The set of algebra registries.
///
/// The process-wide instance is [`get_db`]. Scoped instances built with
/// [`AlgebraDb::with_builtins`] behave identically and can be dropped, which
/// keeps tests independent of each other.
#[derive(Debug)]
pub struct AlgebraDb {
	pub solve: OperatorPairRegistry,
	pub matmul: OperatorPairRegistry,
}

impl AlgebraDb {
	pub fn empty() -> Self {
		Self {
			solve: TypePairRegistry::new(AlgebraOp::Solve.label()),
			matmul: TypePairRegistry::new(AlgebraOp::Matmul.label()),
		}
	}

	/// Creates registries seeded with the built-in implementations.
	pub fn with_builtins() -> Self {
		let db = Self::empty();
		builtins::register_all(&db);
		db
	}

	pub fn registry(&self, op: AlgebraOp) -> &OperatorPairRegistry {
		match op {
			AlgebraOp::Solve => &self.solve,
			AlgebraOp::Matmul => &self.matmul,
		}
	}

	/// Checks operand shapes, then dispatches `op` on the operands' kinds.
	pub fn apply(
		&self,
		op: AlgebraOp,
		lhs: &dyn LinearOperator,
		rhs: &dyn LinearOperator,
	) -> OperatorResult {
		op.check_operands(lhs, rhs)?;
		self.registry(op).dispatch(lhs, rhs)?
	}

	pub fn solve(&self, lhs: &dyn LinearOperator, rhs: &dyn LinearOperator) -> OperatorResult {
		self.apply(AlgebraOp::Solve, lhs, rhs)
	}

	pub fn matmul(&self, lhs: &dyn LinearOperator, rhs: &dyn LinearOperator) -> OperatorResult {
		self.apply(AlgebraOp::Matmul, lhs, rhs)
	}

	pub fn configure(&self, config: &AlgebraConfig) {
		for op in [AlgebraOp::Solve, AlgebraOp::Matmul] {
			self.registry(op)
				.set_resolution(config.operation(op).resolution);
		}
	}
}

static DB: OnceLock<AlgebraDb> = OnceLock::new();

/// Returns the process-wide registries, seeding them on first access.
pub fn get_db() -> &'static AlgebraDb {
	DB.get_or_init(|| {
		let db = AlgebraDb::with_builtins();
		plugin::run_plugins(&db);
		tracing::debug!(
			solve = db.solve.len(),
			matmul = db.matmul.len(),
			"algebra registries seeded"
		);
		db
	})
}

pub static SOLVE: LazyLock<&'static OperatorPairRegistry> = LazyLock::new(|| &get_db().solve);
pub static MATMUL: LazyLock<&'static OperatorPairRegistry> = LazyLock::new(|| &get_db().matmul);

/// Solves `lhs * x = rhs` through the global solve registry.
pub fn solve(lhs: &dyn LinearOperator, rhs: &dyn LinearOperator) -> OperatorResult {
	get_db().solve(lhs, rhs)
}

/// Multiplies `lhs * rhs` through the global matmul registry.
pub fn matmul(lhs: &dyn LinearOperator, rhs: &dyn LinearOperator) -> OperatorResult {
	get_db().matmul(lhs, rhs)
}

/// Registrar for a solve implementation in the global registry.
pub fn register_solve(lhs: OperatorKind, rhs: OperatorKind) -> Registrar<'static, OperatorResult> {
	get_db().solve.register(lhs, rhs)
}

/// Registrar for a matmul implementation in the global registry.
pub fn register_matmul(lhs: OperatorKind, rhs: OperatorKind) -> Registrar<'static, OperatorResult> {
	get_db().matmul.register(lhs, rhs)
}

/// Applies resolution modes to the global registries.
pub fn configure(config: &AlgebraConfig) {
	get_db().configure(config);
}

/// Method-call sugar over the global registries.
pub trait LinearOperatorExt {
	fn solve(&self, rhs: &dyn LinearOperator) -> OperatorResult;

	fn matmul(&self, rhs: &dyn LinearOperator) -> OperatorResult;
}

impl<T: LinearOperator> LinearOperatorExt for T {
	fn solve(&self, rhs: &dyn LinearOperator) -> OperatorResult {
		solve(self, rhs)
	}

	fn matmul(&self, rhs: &dyn LinearOperator) -> OperatorResult {
		matmul(self, rhs)
	}
}
