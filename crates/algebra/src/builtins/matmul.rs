use std::sync::Arc;

use linop_operator::{Dense, Diagonal, Identity, LinearOperator, ScaledIdentity, Structured};

use super::{BuiltinPair, view};
use crate::db::OperatorResult;

pub(crate) static MATMUL_BUILTINS: &[BuiltinPair] = &[
	builtin!(Identity, Identity, identity_left::<Identity>),
	builtin!(Identity, ScaledIdentity, identity_left::<ScaledIdentity>),
	builtin!(Identity, Diagonal, identity_left::<Diagonal>),
	builtin!(Identity, Dense, identity_left::<Dense>),
	builtin!(ScaledIdentity, Identity, identity_right::<ScaledIdentity>),
	builtin!(Diagonal, Identity, identity_right::<Diagonal>),
	builtin!(Dense, Identity, identity_right::<Dense>),
	builtin!(ScaledIdentity, ScaledIdentity, scaled_matmul_scaled),
	builtin!(Diagonal, Diagonal, diagonal_matmul_diagonal),
	builtin!(Diagonal, Dense, diagonal_matmul_dense),
	builtin!(Dense, Diagonal, dense_matmul_diagonal),
	builtin!(Dense, Dense, dense_matmul_dense),
];

fn identity_left<T: Structured>(_lhs: &dyn LinearOperator, rhs: &dyn LinearOperator) -> OperatorResult {
	Ok(Arc::new(view::<T>(rhs)?.into_owned()))
}

fn identity_right<T: Structured>(lhs: &dyn LinearOperator, _rhs: &dyn LinearOperator) -> OperatorResult {
	Ok(Arc::new(view::<T>(lhs)?.into_owned()))
}

fn scaled_matmul_scaled(lhs: &dyn LinearOperator, rhs: &dyn LinearOperator) -> OperatorResult {
	let a = view::<ScaledIdentity>(lhs)?;
	let b = view::<ScaledIdentity>(rhs)?;
	Ok(Arc::new(ScaledIdentity::new(a.dim(), a.scale() * b.scale())))
}

fn diagonal_matmul_diagonal(lhs: &dyn LinearOperator, rhs: &dyn LinearOperator) -> OperatorResult {
	let a = view::<Diagonal>(lhs)?;
	let b = view::<Diagonal>(rhs)?;
	let diag = a.diag().iter().zip(b.diag()).map(|(&a, &b)| a * b).collect();
	Ok(Arc::new(Diagonal::new(diag)))
}

fn diagonal_matmul_dense(lhs: &dyn LinearOperator, rhs: &dyn LinearOperator) -> OperatorResult {
	let a = view::<Diagonal>(lhs)?;
	let b = view::<Dense>(rhs)?;
	let diag = a.diag();
	Ok(Arc::new(b.scale_rows(|r| diag[r])))
}

fn dense_matmul_diagonal(lhs: &dyn LinearOperator, rhs: &dyn LinearOperator) -> OperatorResult {
	let a = view::<Dense>(lhs)?;
	let b = view::<Diagonal>(rhs)?;
	let diag = b.diag();
	Ok(Arc::new(a.scale_cols(|c| diag[c])))
}

fn dense_matmul_dense(lhs: &dyn LinearOperator, rhs: &dyn LinearOperator) -> OperatorResult {
	let a = view::<Dense>(lhs)?;
	let b = view::<Dense>(rhs)?;
	let (n, m) = (a.rows(), b.cols());
	let mut data = vec![0.0; n * m];
	for i in 0..n {
		for (p, &a_ip) in a.row(i).iter().enumerate() {
			let b_row = b.row(p);
			for (j, &b_pj) in b_row.iter().enumerate() {
				data[i * m + j] += a_ip * b_pj;
			}
		}
	}
	Ok(Arc::new(Dense::new(n, m, data)?))
}
