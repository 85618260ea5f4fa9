#![cfg_attr(doc, allow(rustdoc::private_intra_doc_links))]
//! Type-pair dispatch registry.
//!
//! # Purpose
//!
//! A [`TypePairRegistry`] maps an ordered pair of operator kinds to the
//! implementation of one binary operation (solve, matmul, ...). Generic entry
//! points look up the runtime kinds of their operands and invoke whatever is
//! registered for that pair.
//!
//! # Mental Model
//!
//! 1. **Registration:** [`TypePairRegistry::register`] returns a [`Registrar`]
//!    for a key. Calling it with an implementation inserts the pair and hands
//!    the same implementation back unchanged, so the call site keeps using it.
//! 2. **Resolution:** [`TypePairRegistry::resolve`] returns the implementation
//!    stored under the exact key. [`TypePairRegistry::resolve_nearest`] widens
//!    each operand along its declared ancestry and picks the closest pair.
//! 3. **Dispatch:** [`TypePairRegistry::dispatch`] resolves by the configured
//!    [`ResolutionMode`] and calls the implementation with both operands.
//!
//! # Concurrency
//!
//! - **Reads:** Wait-free (atomic load of the current [`Snapshot`]).
//! - **Writes:** Lock-free. The duplicate check and the insert run inside one
//!   CAS retry loop, so two racing registrations of one key produce exactly
//!   one winner.
//!
//! # Invariants
//!
//! - A key maps to at most one implementation; re-registration is rejected and
//!   the existing entry is kept.
//!   - Enforced in: [`TypePairRegistry::insert`].
//!   - Tested by: `tests::duplicate_registration_keeps_original`, `tests::concurrent_registration_has_one_winner`.
//! - Only callables are stored; erased targets are checked before any mutation.
//!   - Enforced in: [`Registrar::call_erased`].
//!   - Tested by: `tests::non_callable_is_rejected_and_key_stays_absent`.
//! - Every stored key resolves to the exact `Arc` stored at registration.
//!   - Tested by: `tests::prop_registered_keys_round_trip`.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use arc_swap::ArcSwap;
use linop_operator::{LinearOperator, OperatorKind};
use rustc_hash::FxHashMap as HashMap;
use serde::Deserialize;

use crate::error::{AlgebraError, Result};
use crate::key::RegistrationKey;

mod resolve;

pub use resolve::Lineage;

/// A registered implementation.
pub type PairFn<R> = Arc<dyn Fn(&dyn LinearOperator, &dyn LinearOperator) -> R + Send + Sync>;

/// Plain function pointer form, also accepted by [`Registrar::call_erased`].
pub type PairFnPtr<R> = fn(&dyn LinearOperator, &dyn LinearOperator) -> R;

/// How [`TypePairRegistry::dispatch`] selects an implementation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolutionMode {
	/// Only the exact `(lhs, rhs)` key matches.
	#[default]
	Exact,
	/// Falls back along operand ancestry; see [`TypePairRegistry::resolve_nearest`].
	Nearest,
}

/// Where an entry came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationSource {
	/// Seeded when the global registries were first built.
	Builtin,
	/// Registered through a [`Registrar`].
	Runtime,
}

impl fmt::Display for RegistrationSource {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			Self::Builtin => "builtin",
			Self::Runtime => "runtime",
		})
	}
}

pub struct RegistryEntry<R> {
	key: RegistrationKey,
	implementation: PairFn<R>,
	source: RegistrationSource,
	ordinal: usize,
}

impl<R> RegistryEntry<R> {
	pub fn key(&self) -> RegistrationKey {
		self.key
	}

	pub fn implementation(&self) -> &PairFn<R> {
		&self.implementation
	}

	pub fn source(&self) -> RegistrationSource {
		self.source
	}

	/// Position in registration order.
	pub fn ordinal(&self) -> usize {
		self.ordinal
	}
}

impl<R> Clone for RegistryEntry<R> {
	fn clone(&self) -> Self {
		Self {
			key: self.key,
			implementation: Arc::clone(&self.implementation),
			source: self.source,
			ordinal: self.ordinal,
		}
	}
}

impl<R> fmt::Debug for RegistryEntry<R> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("RegistryEntry")
			.field("key", &self.key)
			.field("source", &self.source)
			.field("ordinal", &self.ordinal)
			.finish_non_exhaustive()
	}
}

/// Immutable published state of a registry.
pub(crate) struct Snapshot<R> {
	by_key: HashMap<RegistrationKey, usize>,
	entries: Vec<RegistryEntry<R>>,
	resolution: ResolutionMode,
}

impl<R> Clone for Snapshot<R> {
	fn clone(&self) -> Self {
		Self {
			by_key: self.by_key.clone(),
			entries: self.entries.clone(),
			resolution: self.resolution,
		}
	}
}

impl<R> Snapshot<R> {
	fn empty(resolution: ResolutionMode) -> Self {
		Self {
			by_key: HashMap::default(),
			entries: Vec::new(),
			resolution,
		}
	}

	#[inline]
	fn get(&self, key: &RegistrationKey) -> Option<&RegistryEntry<R>> {
		self.by_key.get(key).map(|&idx| &self.entries[idx])
	}
}

/// Process-wide or scoped mapping from operator-kind pairs to implementations.
pub struct TypePairRegistry<R> {
	label: &'static str,
	snap: ArcSwap<Snapshot<R>>,
}

impl<R: 'static> TypePairRegistry<R> {
	/// Creates an empty registry. `label` names the operation in errors and logs.
	pub fn new(label: &'static str) -> Self {
		Self::with_resolution(label, ResolutionMode::default())
	}

	pub fn with_resolution(label: &'static str, resolution: ResolutionMode) -> Self {
		Self {
			label,
			snap: ArcSwap::from_pointee(Snapshot::empty(resolution)),
		}
	}

	pub fn label(&self) -> &'static str {
		self.label
	}

	/// Returns a registrar for `(lhs, rhs)`.
	///
	/// Nothing is inserted until the registrar is called with an implementation.
	pub fn register(&self, lhs: OperatorKind, rhs: OperatorKind) -> Registrar<'_, R> {
		Registrar {
			registry: self,
			key: RegistrationKey::new(lhs, rhs),
			source: RegistrationSource::Runtime,
		}
	}

	/// Typed shorthand for [`Self::register`].
	pub fn register_kinds<A: LinearOperator, B: LinearOperator>(&self) -> Registrar<'_, R> {
		self.register(OperatorKind::of::<A>(), OperatorKind::of::<B>())
	}

	pub(crate) fn register_builtin(&self, key: RegistrationKey, implementation: PairFn<R>) -> Result<()> {
		self.insert(key, implementation, RegistrationSource::Builtin)
	}

	/// Returns the implementation registered under exactly `(lhs, rhs)`.
	pub fn resolve(&self, lhs: OperatorKind, rhs: OperatorKind) -> Result<PairFn<R>> {
		self.resolve_key(RegistrationKey::new(lhs, rhs))
	}

	pub fn resolve_key(&self, key: RegistrationKey) -> Result<PairFn<R>> {
		self.get(key).ok_or(AlgebraError::NoImplementation {
			registry: self.label,
			lhs: key.lhs,
			rhs: key.rhs,
		})
	}

	/// Resolves the closest registered pair along both operands' ancestry.
	///
	/// The candidate `(lhs_i, rhs_j)` has distance `i + j`, where index 0 is the
	/// operand's own kind. An exact match therefore always wins. Several
	/// candidates at the minimal distance are reported as
	/// [`AlgebraError::Ambiguous`].
	pub fn resolve_nearest(&self, lhs: Lineage<'_>, rhs: Lineage<'_>) -> Result<PairFn<R>> {
		let snap = self.snap.load();
		snap.nearest(self.label, lhs, rhs)
			.map(|entry| Arc::clone(&entry.implementation))
	}

	/// Resolves the implementation for two operands according to the current
	/// [`ResolutionMode`].
	pub fn resolve_operands(
		&self,
		lhs: &dyn LinearOperator,
		rhs: &dyn LinearOperator,
	) -> Result<PairFn<R>> {
		let snap = self.snap.load();
		let entry = match snap.resolution {
			ResolutionMode::Exact => {
				let key = RegistrationKey::for_operands(lhs, rhs);
				snap.get(&key).ok_or(AlgebraError::NoImplementation {
					registry: self.label,
					lhs: key.lhs,
					rhs: key.rhs,
				})?
			}
			ResolutionMode::Nearest => snap.nearest(self.label, Lineage::of(lhs), Lineage::of(rhs))?,
		};
		Ok(Arc::clone(&entry.implementation))
	}

	/// Resolves and invokes the implementation for `(lhs, rhs)`.
	pub fn dispatch(&self, lhs: &dyn LinearOperator, rhs: &dyn LinearOperator) -> Result<R> {
		let implementation = self.resolve_operands(lhs, rhs)?;
		tracing::trace!(registry = self.label, lhs = %lhs.kind(), rhs = %rhs.kind(), "dispatch");
		Ok(implementation(lhs, rhs))
	}

	pub fn get(&self, key: RegistrationKey) -> Option<PairFn<R>> {
		self.snap
			.load()
			.get(&key)
			.map(|entry| Arc::clone(&entry.implementation))
	}

	pub fn contains(&self, key: RegistrationKey) -> bool {
		self.snap.load().by_key.contains_key(&key)
	}

	pub fn len(&self) -> usize {
		self.snap.load().entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Registered keys in registration order.
	pub fn keys(&self) -> Vec<RegistrationKey> {
		self.snap.load().entries.iter().map(|e| e.key).collect()
	}

	/// Registered entries in registration order.
	pub fn entries(&self) -> Vec<RegistryEntry<R>> {
		self.snap.load().entries.clone()
	}

	pub fn resolution(&self) -> ResolutionMode {
		self.snap.load().resolution
	}

	pub fn set_resolution(&self, resolution: ResolutionMode) {
		self.snap.rcu(|cur| {
			let mut next = Snapshot::clone(cur);
			next.resolution = resolution;
			next
		});
		tracing::debug!(registry = self.label, ?resolution, "resolution mode changed");
	}

	/// Inserts `key` if absent.
	fn insert(
		&self,
		key: RegistrationKey,
		implementation: PairFn<R>,
		source: RegistrationSource,
	) -> Result<()> {
		loop {
			let cur = self.snap.load_full();
			if cur.by_key.contains_key(&key) {
				return Err(AlgebraError::DuplicateRegistration {
					registry: self.label,
					lhs: key.lhs,
					rhs: key.rhs,
				});
			}

			let mut next = Snapshot::clone(&cur);
			let ordinal = next.entries.len();
			next.by_key.insert(key, ordinal);
			next.entries.push(RegistryEntry {
				key,
				implementation: Arc::clone(&implementation),
				source,
				ordinal,
			});

			let prev = self.snap.compare_and_swap(&cur, Arc::new(next));
			if Arc::ptr_eq(&prev, &cur) {
				tracing::debug!(
					registry = self.label,
					lhs = %key.lhs,
					rhs = %key.rhs,
					%source,
					"registered implementation"
				);
				return Ok(());
			}
		}
	}
}

impl<R> fmt::Debug for TypePairRegistry<R> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let snap = self.snap.load();
		f.debug_struct("TypePairRegistry")
			.field("label", &self.label)
			.field("len", &snap.entries.len())
			.field("resolution", &snap.resolution)
			.finish()
	}
}

/// One-shot registration function returned by [`TypePairRegistry::register`].
#[must_use = "a registrar inserts nothing until it is called with an implementation"]
pub struct Registrar<'r, R> {
	registry: &'r TypePairRegistry<R>,
	key: RegistrationKey,
	source: RegistrationSource,
}

impl<R: 'static> Registrar<'_, R> {
	pub fn key(&self) -> RegistrationKey {
		self.key
	}

	/// Registers `implementation` and returns it unchanged.
	pub fn call(self, implementation: PairFn<R>) -> Result<PairFn<R>> {
		self.registry
			.insert(self.key, Arc::clone(&implementation), self.source)?;
		Ok(implementation)
	}

	/// Wraps a closure and registers it.
	pub fn with<F>(self, f: F) -> Result<PairFn<R>>
	where
		F: Fn(&dyn LinearOperator, &dyn LinearOperator) -> R + Send + Sync + 'static,
	{
		self.call(Arc::new(f))
	}

	/// Registers a type-erased target, such as a plugin payload.
	///
	/// Accepts a [`PairFn`] or a [`PairFnPtr`]. Anything else fails with
	/// [`AlgebraError::NotCallable`] and leaves the registry untouched. Function
	/// items must be cast to [`PairFnPtr`] before boxing.
	pub fn call_erased(self, target: Box<dyn Any + Send + Sync>) -> Result<PairFn<R>> {
		let target = match target.downcast::<PairFn<R>>() {
			Ok(implementation) => return self.call(*implementation),
			Err(target) => target,
		};
		match target.downcast::<PairFnPtr<R>>() {
			Ok(ptr) => {
				let implementation: PairFn<R> = Arc::new(*ptr);
				self.call(implementation)
			}
			Err(target) => Err(AlgebraError::NotCallable {
				registry: self.registry.label,
				lhs: self.key.lhs,
				rhs: self.key.rhs,
				received: describe_erased(&*target),
			}),
		}
	}
}

fn describe_erased(value: &(dyn Any + Send + Sync)) -> String {
	if let Some(s) = value.downcast_ref::<&'static str>() {
		format!("{s:?}")
	} else if let Some(s) = value.downcast_ref::<String>() {
		format!("{s:?}")
	} else {
		"value that is neither a PairFn nor a PairFnPtr (wrap closures in Arc or use Registrar::with)".to_owned()
	}
}

#[cfg(test)]
mod tests;
