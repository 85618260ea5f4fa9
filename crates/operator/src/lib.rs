//! Linear operator model shared by the operator algebra.
//!
//! Operators are opaque to the algebra registries: they expose a stable type
//! identity ([`OperatorKind`]), a [`Shape`], structural [`OperatorHints`], and an
//! optional ancestry of more general kinds they can stand in for.

/// Operator errors.
pub mod error;
/// Stable type identity for operator types.
pub mod kind;
/// The `LinearOperator` trait and hint metadata.
pub mod operator;
/// Matrix shapes.
pub mod shape;
/// Concrete structured operators.
pub mod structured;

pub use error::OperatorError;
pub use kind::OperatorKind;
pub use operator::{LinearOperator, OperatorHints, OperatorIdentity};
pub use shape::Shape;
pub use structured::{Dense, Diagonal, Identity, ScaledIdentity, Structured};
