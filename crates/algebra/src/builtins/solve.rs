use std::sync::Arc;

use linop_operator::{Dense, Diagonal, Identity, LinearOperator, ScaledIdentity, Structured};

use super::{BuiltinPair, view};
use crate::db::OperatorResult;

pub(crate) static SOLVE_BUILTINS: &[BuiltinPair] = &[
	builtin!(Identity, Identity, identity_solve::<Identity>),
	builtin!(Identity, ScaledIdentity, identity_solve::<ScaledIdentity>),
	builtin!(Identity, Diagonal, identity_solve::<Diagonal>),
	builtin!(Identity, Dense, identity_solve::<Dense>),
	builtin!(ScaledIdentity, ScaledIdentity, scaled_solve_scaled),
	builtin!(ScaledIdentity, Diagonal, scaled_solve_diagonal),
	builtin!(ScaledIdentity, Dense, scaled_solve_dense),
	builtin!(Diagonal, Diagonal, diagonal_solve_diagonal),
	builtin!(Diagonal, Dense, diagonal_solve_dense),
];

fn identity_solve<T: Structured>(_lhs: &dyn LinearOperator, rhs: &dyn LinearOperator) -> OperatorResult {
	Ok(Arc::new(view::<T>(rhs)?.into_owned()))
}

fn scaled_solve_scaled(lhs: &dyn LinearOperator, rhs: &dyn LinearOperator) -> OperatorResult {
	let a = view::<ScaledIdentity>(lhs)?;
	let b = view::<ScaledIdentity>(rhs)?;
	Ok(Arc::new(ScaledIdentity::new(b.dim(), b.scale() / a.scale())))
}

fn scaled_solve_diagonal(lhs: &dyn LinearOperator, rhs: &dyn LinearOperator) -> OperatorResult {
	let a = view::<ScaledIdentity>(lhs)?;
	let b = view::<Diagonal>(rhs)?;
	let scale = a.scale();
	Ok(Arc::new(Diagonal::new(b.diag().iter().map(|&d| d / scale).collect())))
}

fn scaled_solve_dense(lhs: &dyn LinearOperator, rhs: &dyn LinearOperator) -> OperatorResult {
	let a = view::<ScaledIdentity>(lhs)?;
	let b = view::<Dense>(rhs)?;
	let inv = a.scale().recip();
	Ok(Arc::new(b.scale_rows(|_| inv)))
}

fn diagonal_solve_diagonal(lhs: &dyn LinearOperator, rhs: &dyn LinearOperator) -> OperatorResult {
	let a = view::<Diagonal>(lhs)?;
	let b = view::<Diagonal>(rhs)?;
	let diag = a.diag().iter().zip(b.diag()).map(|(&a, &b)| b / a).collect();
	Ok(Arc::new(Diagonal::new(diag)))
}

fn diagonal_solve_dense(lhs: &dyn LinearOperator, rhs: &dyn LinearOperator) -> OperatorResult {
	let a = view::<Diagonal>(lhs)?;
	let b = view::<Dense>(rhs)?;
	let diag = a.diag();
	Ok(Arc::new(b.scale_rows(|r| diag[r].recip())))
}
