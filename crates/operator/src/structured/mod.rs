//! Concrete structured operators.
//!
//! The kinds form a generalization chain used by nearest-match resolution:
//!
//! | Kind | Ancestry |
//! |------|----------|
//! | [`Identity`] | `ScaledIdentity`, `Diagonal`, `Dense` |
//! | [`ScaledIdentity`] | `Diagonal`, `Dense` |
//! | [`Diagonal`] | `Dense` |
//! | [`Dense`] | none |
//!
//! [`Structured::coerce`] is the matching conversion: an implementation
//! registered for an ancestor kind can view any descendant operand as that
//! ancestor.

use std::borrow::Cow;

use crate::LinearOperator;

mod dense;
mod diagonal;
mod identity;

pub use dense::Dense;
pub use diagonal::Diagonal;
pub use identity::{Identity, ScaledIdentity};

/// A concrete operator that other kinds can be viewed as.
pub trait Structured: LinearOperator + Clone {
	/// Views `op` as `Self`, borrowing when `op` already is `Self`.
	///
	/// Returns `None` when `op` is neither `Self` nor a kind `Self` generalizes.
	fn coerce(op: &dyn LinearOperator) -> Option<Cow<'_, Self>>;
}
