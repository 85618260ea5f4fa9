use crate::Shape;

/// Errors raised while constructing or combining operators.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum OperatorError {
	/// Dense storage does not match the declared dimensions.
	#[error("dense data has {len} entries, expected {rows}x{cols}")]
	DataLength { rows: usize, cols: usize, len: usize },
	/// A row passed to `Dense::from_rows` differs in length from the first row.
	#[error("row {row} has {found} entries, expected {expected}")]
	RaggedRow {
		row: usize,
		expected: usize,
		found: usize,
	},
	/// Operand shapes are incompatible for the requested operation.
	#[error("shape mismatch in {op}: {lhs} is incompatible with {rhs}")]
	ShapeMismatch {
		op: &'static str,
		lhs: Shape,
		rhs: Shape,
	},
	/// The operation requires a square operator.
	#[error("{op} requires a square operator, got {shape}")]
	NotSquare { op: &'static str, shape: Shape },
	/// The operator has no inverse.
	#[error("{kind} operator is singular")]
	Singular { kind: &'static str },
	/// An implementation received an operand it cannot interpret.
	#[error("expected operand of kind {expected}, found {found}")]
	KindMismatch {
		expected: &'static str,
		found: &'static str,
	},
}
