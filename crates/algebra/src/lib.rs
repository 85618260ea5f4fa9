//! Type-pair dispatch for linear operator algebra.
//!
//! Binary operations such as solve and matmul are implemented per pair of
//! operator kinds and looked up at call time from the runtime kinds of the
//! operands.
//!
//! # Modules
//!
//! - [`registry`] - [`TypePairRegistry`]: registration, exact and nearest resolution, dispatch
//! - [`db`] - process-wide registries and the [`solve`]/[`matmul`] entry points
//! - [`builtins`] - built-in implementations for the structured operators
//! - [`plugin`] - out-of-crate registrations collected at startup
//! - [`config`] - TOML configuration of resolution modes
//!
//! # Registering an implementation
//!
//! ```ignore
//! let registry = TypePairRegistry::<&'static str>::new("solve");
//! let f = registry.register_kinds::<MyOp, MyOp>().with(|_, _| "OK")?;
//! assert!(Arc::ptr_eq(&f, &registry.resolve_key(RegistrationKey::of::<MyOp, MyOp>())?));
//! ```

pub mod builtins;
pub mod config;
pub mod db;
pub mod error;
pub mod key;
pub mod op;
pub mod plugin;
pub mod registry;

pub use config::{AlgebraConfig, ConfigError, OperationConfig};
pub use db::{
	AlgebraDb, LinearOperatorExt, MATMUL, OperatorPairRegistry, OperatorResult, SOLVE, configure,
	get_db, matmul, register_matmul, register_solve, solve,
};
pub use error::{AlgebraError, Result};
pub use key::RegistrationKey;
pub use linop_operator as operator;
pub use op::AlgebraOp;
pub use plugin::AlgebraPlugin;
pub use registry::{
	Lineage, PairFn, PairFnPtr, Registrar, RegistrationSource, RegistryEntry, ResolutionMode,
	TypePairRegistry,
};

#[doc(hidden)]
pub use inventory;
