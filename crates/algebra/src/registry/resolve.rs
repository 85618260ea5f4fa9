//! Nearest-match resolution along operand ancestry.

use std::iter;

use linop_operator::{LinearOperator, OperatorKind};

use super::{RegistryEntry, Snapshot};
use crate::error::{AlgebraError, Result};
use crate::key::RegistrationKey;

/// An operand kind followed by the more general kinds it may be treated as.
#[derive(Debug, Clone, Copy)]
pub struct Lineage<'a> {
	pub kind: OperatorKind,
	pub ancestry: &'a [OperatorKind],
}

impl<'a> Lineage<'a> {
	pub const fn new(kind: OperatorKind, ancestry: &'a [OperatorKind]) -> Self {
		Self { kind, ancestry }
	}

	/// A lineage with no ancestors; nearest resolution degenerates to exact.
	pub const fn exact(kind: OperatorKind) -> Lineage<'static> {
		Lineage { kind, ancestry: &[] }
	}

	/// Kinds paired with their distance from the operand, nearest first.
	pub fn iter(&self) -> impl Iterator<Item = (usize, OperatorKind)> + '_ {
		iter::once(self.kind)
			.chain(self.ancestry.iter().copied())
			.enumerate()
	}
}

impl Lineage<'static> {
	pub fn of(op: &dyn LinearOperator) -> Self {
		Lineage::new(op.kind(), op.ancestry())
	}
}

impl<R> Snapshot<R> {
	pub(super) fn nearest(
		&self,
		label: &'static str,
		lhs: Lineage<'_>,
		rhs: Lineage<'_>,
	) -> Result<&RegistryEntry<R>> {
		let mut best = usize::MAX;
		let mut winners: Vec<&RegistryEntry<R>> = Vec::new();

		for (i, a) in lhs.iter() {
			for (j, b) in rhs.iter() {
				let Some(entry) = self.get(&RegistrationKey::new(a, b)) else {
					continue;
				};
				let distance = i + j;
				if distance < best {
					best = distance;
					winners.clear();
					winners.push(entry);
				} else if distance == best && !winners.iter().any(|w| w.key == entry.key) {
					winners.push(entry);
				}
			}
		}

		match winners.len() {
			0 => Err(AlgebraError::NoImplementation {
				registry: label,
				lhs: lhs.kind,
				rhs: rhs.kind,
			}),
			1 => Ok(winners[0]),
			_ => {
				winners.sort_by_key(|e| e.ordinal);
				Err(AlgebraError::Ambiguous {
					registry: label,
					lhs: lhs.kind,
					rhs: rhs.kind,
					candidates: winners.iter().map(|e| e.key).collect(),
				})
			}
		}
	}
}
