use linop_operator::{OperatorError, OperatorKind};

use crate::key::RegistrationKey;

pub type Result<T, E = AlgebraError> = std::result::Result<T, E>;

/// Registration and dispatch failures.
///
/// The three registry variants indicate programming or configuration errors.
/// They are returned immediately and never retried.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AlgebraError {
	/// The registration target is not an implementation.
	#[error("{registry} implementation for ({lhs}, {rhs}) must be callable, received: {received}")]
	NotCallable {
		registry: &'static str,
		lhs: OperatorKind,
		rhs: OperatorKind,
		received: String,
	},
	/// The key already maps to an implementation. The existing entry is kept.
	#[error("{registry}({lhs}, {rhs}) has already been registered")]
	DuplicateRegistration {
		registry: &'static str,
		lhs: OperatorKind,
		rhs: OperatorKind,
	},
	/// Nothing is registered for the operand kinds.
	#[error("no {registry} registered for ({lhs}, {rhs})")]
	NoImplementation {
		registry: &'static str,
		lhs: OperatorKind,
		rhs: OperatorKind,
	},
	/// Nearest-match resolution found several candidates at the same distance.
	#[error("ambiguous {registry} for ({lhs}, {rhs}): candidates {}", join_keys(.candidates))]
	Ambiguous {
		registry: &'static str,
		lhs: OperatorKind,
		rhs: OperatorKind,
		candidates: Vec<RegistrationKey>,
	},
	#[error(transparent)]
	Operator(#[from] OperatorError),
}

fn join_keys(keys: &[RegistrationKey]) -> String {
	keys.iter()
		.map(ToString::to_string)
		.collect::<Vec<_>>()
		.join(", ")
}
