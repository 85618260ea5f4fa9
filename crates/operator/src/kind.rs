//! Stable type identity for operator types.
//!
//! An [`OperatorKind`] is the dispatch token used by the algebra registries.
//! Equality, ordering, and hashing go through [`TypeId`] only, so two kinds are
//! equal exactly when they name the same Rust type. The type name is carried
//! for diagnostics and never participates in comparisons.

use std::any::{TypeId, type_name};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

#[derive(Clone, Copy)]
pub struct OperatorKind {
	id: TypeId,
	name: &'static str,
}

impl OperatorKind {
	/// Returns the kind of `T`.
	pub fn of<T: ?Sized + 'static>() -> Self {
		Self {
			id: TypeId::of::<T>(),
			name: short_type_name(type_name::<T>()),
		}
	}

	#[inline]
	pub fn type_id(&self) -> TypeId {
		self.id
	}

	/// Unqualified type name, e.g. `Diagonal` for `linop_operator::structured::Diagonal`.
	#[inline]
	pub fn name(&self) -> &'static str {
		self.name
	}

	#[inline]
	pub fn is<T: ?Sized + 'static>(&self) -> bool {
		self.id == TypeId::of::<T>()
	}
}

/// Strips the module path, keeping any generic arguments intact.
fn short_type_name(full: &'static str) -> &'static str {
	let head_end = full.find('<').unwrap_or(full.len());
	match full[..head_end].rfind("::") {
		Some(idx) => &full[idx + 2..],
		None => full,
	}
}

impl PartialEq for OperatorKind {
	fn eq(&self, other: &Self) -> bool {
		self.id == other.id
	}
}

impl Eq for OperatorKind {}

impl Hash for OperatorKind {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.id.hash(state);
	}
}

impl PartialOrd for OperatorKind {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		Some(self.cmp(other))
	}
}

impl Ord for OperatorKind {
	fn cmp(&self, other: &Self) -> Ordering {
		self.id.cmp(&other.id)
	}
}

impl fmt::Debug for OperatorKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "OperatorKind({})", self.name)
	}
}

impl fmt::Display for OperatorKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name)
	}
}
