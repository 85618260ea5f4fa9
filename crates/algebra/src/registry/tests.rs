use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use linop_operator::{LinearOperator, OperatorKind, Shape};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rstest::rstest;

use super::*;

#[derive(Debug)]
struct CustomOp;

impl LinearOperator for CustomOp {
	fn shape(&self) -> Shape {
		Shape::square(1)
	}
}

#[derive(Debug)]
struct OtherOp;

impl LinearOperator for OtherOp {
	fn shape(&self) -> Shape {
		Shape::square(1)
	}
}

/// `Leaf -> Mid -> Root` in both ancestry chains below.
#[derive(Debug)]
struct Root;
#[derive(Debug)]
struct Mid;
#[derive(Debug)]
struct Leaf;

static MID_ANCESTRY: std::sync::LazyLock<[OperatorKind; 1]> =
	std::sync::LazyLock::new(|| [OperatorKind::of::<Root>()]);
static LEAF_ANCESTRY: std::sync::LazyLock<[OperatorKind; 2]> =
	std::sync::LazyLock::new(|| [OperatorKind::of::<Mid>(), OperatorKind::of::<Root>()]);

impl LinearOperator for Root {
	fn shape(&self) -> Shape {
		Shape::square(1)
	}
}

impl LinearOperator for Mid {
	fn shape(&self) -> Shape {
		Shape::square(1)
	}

	fn ancestry(&self) -> &'static [OperatorKind] {
		&*MID_ANCESTRY
	}
}

impl LinearOperator for Leaf {
	fn shape(&self) -> Shape {
		Shape::square(1)
	}

	fn ancestry(&self) -> &'static [OperatorKind] {
		&*LEAF_ANCESTRY
	}
}

fn custom() -> OperatorKind {
	OperatorKind::of::<CustomOp>()
}

fn label_fn(label: &'static str) -> PairFn<&'static str> {
	Arc::new(move |_: &dyn LinearOperator, _: &dyn LinearOperator| label)
}

#[test]
fn registered_implementation_is_dispatched() {
	let registry = TypePairRegistry::<&'static str>::new("solve");
	registry
		.register(custom(), custom())
		.with(|_, _| "OK")
		.unwrap();

	assert_eq!(registry.dispatch(&CustomOp, &CustomOp).unwrap(), "OK");
}

#[test]
fn registrar_returns_implementation_unchanged() {
	let registry = TypePairRegistry::<&'static str>::new("solve");
	let f = label_fn("first");

	let returned = registry.register(custom(), custom()).call(Arc::clone(&f)).unwrap();
	assert!(Arc::ptr_eq(&returned, &f));

	let resolved = registry.resolve(custom(), custom()).unwrap();
	assert!(Arc::ptr_eq(&resolved, &f));
}

#[test]
fn duplicate_registration_keeps_original() {
	let registry = TypePairRegistry::<&'static str>::new("solve");
	let original = registry.register_kinds::<CustomOp, CustomOp>().with(|_, _| "first").unwrap();

	let err = registry
		.register_kinds::<CustomOp, CustomOp>()
		.with(|_, _| "second")
		.err()
		.unwrap();
	assert_eq!(
		err,
		AlgebraError::DuplicateRegistration {
			registry: "solve",
			lhs: custom(),
			rhs: custom(),
		}
	);
	assert!(err.to_string().contains("has already been registered"));

	let resolved = registry.resolve(custom(), custom()).unwrap();
	assert!(Arc::ptr_eq(&resolved, &original));
	assert_eq!(registry.len(), 1);
}

const UNSUPPORTED: &str =
	"value that is neither a PairFn nor a PairFnPtr (wrap closures in Arc or use Registrar::with)";

#[rstest]
#[case::str_literal(Box::new("blah"), "\"blah\"")]
#[case::owned_string(Box::new(String::from("blah")), "\"blah\"")]
#[case::integer(Box::new(42_u32), UNSUPPORTED)]
#[case::unboxed_closure(Box::new(|_: &dyn LinearOperator, _: &dyn LinearOperator| "OK"), UNSUPPORTED)]
fn non_callable_is_rejected_and_key_stays_absent(
	#[case] target: Box<dyn Any + Send + Sync>,
	#[case] received: &str,
) {
	let registry = TypePairRegistry::<&'static str>::new("solve");
	let err = registry
		.register(custom(), custom())
		.call_erased(target)
		.err()
		.unwrap();

	assert!(err.to_string().contains("must be callable"), "{err}");
	assert!(matches!(
		&err,
		AlgebraError::NotCallable { received: r, .. } if r == received
	));
	assert!(!registry.contains(RegistrationKey::new(custom(), custom())));
	assert!(registry.is_empty());
}

#[test]
fn erased_callables_are_accepted() {
	fn named(_: &dyn LinearOperator, _: &dyn LinearOperator) -> &'static str {
		"ptr"
	}

	let registry = TypePairRegistry::<&'static str>::new("solve");
	let f = label_fn("arc");
	let returned = registry
		.register(custom(), custom())
		.call_erased(Box::new(Arc::clone(&f)))
		.unwrap();
	assert!(Arc::ptr_eq(&returned, &f));

	registry
		.register_kinds::<OtherOp, OtherOp>()
		.call_erased(Box::new(named as PairFnPtr<&'static str>))
		.unwrap();
	assert_eq!(registry.dispatch(&OtherOp, &OtherOp).unwrap(), "ptr");
}

#[test]
fn unregistered_pair_has_no_implementation() {
	let registry = TypePairRegistry::<&'static str>::new("matmul");
	registry.register_kinds::<CustomOp, OtherOp>().with(|_, _| "ab").unwrap();

	let err = registry.resolve(OperatorKind::of::<OtherOp>(), custom()).err().unwrap();
	assert_eq!(
		err,
		AlgebraError::NoImplementation {
			registry: "matmul",
			lhs: OperatorKind::of::<OtherOp>(),
			rhs: custom(),
		}
	);
	assert_eq!(err.to_string(), "no matmul registered for (OtherOp, CustomOp)");
	assert!(registry.dispatch(&OtherOp, &CustomOp).is_err());
}

#[test]
fn keys_and_entries_follow_registration_order() {
	let registry = TypePairRegistry::<&'static str>::new("solve");
	registry.register_kinds::<OtherOp, CustomOp>().with(|_, _| "1").unwrap();
	registry.register_kinds::<CustomOp, OtherOp>().with(|_, _| "2").unwrap();

	assert_eq!(
		registry.keys(),
		vec![
			RegistrationKey::of::<OtherOp, CustomOp>(),
			RegistrationKey::of::<CustomOp, OtherOp>(),
		]
	);
	let entries = registry.entries();
	assert_eq!(entries[1].ordinal(), 1);
	assert_eq!(entries[1].source(), RegistrationSource::Runtime);
}

#[test]
fn exact_mode_ignores_ancestry() {
	let registry = TypePairRegistry::<&'static str>::new("solve");
	registry.register_kinds::<Root, Root>().with(|_, _| "root").unwrap();

	assert_eq!(registry.resolution(), ResolutionMode::Exact);
	assert!(matches!(
		registry.dispatch(&Leaf, &Root),
		Err(AlgebraError::NoImplementation { .. })
	));
}

#[test]
fn nearest_prefers_smallest_total_distance() {
	let registry = TypePairRegistry::<&'static str>::with_resolution("solve", ResolutionMode::Nearest);
	registry.register_kinds::<Root, Root>().with(|_, _| "root-root").unwrap();
	registry.register_kinds::<Mid, Root>().with(|_, _| "mid-root").unwrap();

	assert_eq!(registry.dispatch(&Leaf, &Root).unwrap(), "mid-root");
	assert_eq!(registry.dispatch(&Root, &Leaf).unwrap(), "root-root");

	registry.register_kinds::<Leaf, Root>().with(|_, _| "leaf-root").unwrap();
	assert_eq!(registry.dispatch(&Leaf, &Root).unwrap(), "leaf-root");
}

#[test]
fn nearest_reports_ties_as_ambiguous() {
	let registry = TypePairRegistry::<&'static str>::new("solve");
	registry.register_kinds::<Mid, Root>().with(|_, _| "mid-root").unwrap();
	registry.register_kinds::<Root, Mid>().with(|_, _| "root-mid").unwrap();

	let err = registry
		.resolve_nearest(Lineage::of(&Mid), Lineage::of(&Mid))
		.err()
		.unwrap();
	assert_eq!(
		err,
		AlgebraError::Ambiguous {
			registry: "solve",
			lhs: OperatorKind::of::<Mid>(),
			rhs: OperatorKind::of::<Mid>(),
			candidates: vec![
				RegistrationKey::of::<Mid, Root>(),
				RegistrationKey::of::<Root, Mid>(),
			],
		}
	);
	assert_eq!(
		err.to_string(),
		"ambiguous solve for (Mid, Mid): candidates (Mid, Root), (Root, Mid)"
	);
}

#[test]
fn nearest_without_ancestry_is_exact() {
	let registry = TypePairRegistry::<&'static str>::new("solve");
	registry.register_kinds::<CustomOp, CustomOp>().with(|_, _| "OK").unwrap();

	let kind = custom();
	let f = registry
		.resolve_nearest(Lineage::exact(kind), Lineage::exact(kind))
		.unwrap();
	assert_eq!(f(&CustomOp, &CustomOp), "OK");
	assert!(
		registry
			.resolve_nearest(Lineage::exact(kind), Lineage::exact(OperatorKind::of::<OtherOp>()))
			.is_err()
	);
}

#[test]
fn set_resolution_switches_dispatch() {
	let registry = TypePairRegistry::<&'static str>::new("solve");
	registry.register_kinds::<Root, Root>().with(|_, _| "root").unwrap();
	assert!(registry.dispatch(&Mid, &Mid).is_err());

	registry.set_resolution(ResolutionMode::Nearest);
	assert_eq!(registry.dispatch(&Mid, &Mid).unwrap(), "root");
	assert_eq!(registry.len(), 1);
}

#[test]
fn concurrent_registration_has_one_winner() {
	const THREADS: usize = 8;
	let registry = TypePairRegistry::<usize>::new("solve");
	let wins = AtomicUsize::new(0);

	std::thread::scope(|s| {
		for t in 0..THREADS {
			let registry = &registry;
			let wins = &wins;
			s.spawn(move || {
				if registry
					.register(custom(), custom())
					.with(move |_, _| t)
					.is_ok()
				{
					wins.fetch_add(1, Ordering::SeqCst);
				}
			});
		}
	});

	assert_eq!(wins.load(Ordering::SeqCst), 1);
	assert_eq!(registry.len(), 1);
}

#[test]
fn concurrent_distinct_keys_are_all_kept() {
	let registry = TypePairRegistry::<&'static str>::new("solve");
	let keys = [
		RegistrationKey::of::<CustomOp, CustomOp>(),
		RegistrationKey::of::<CustomOp, OtherOp>(),
		RegistrationKey::of::<OtherOp, CustomOp>(),
		RegistrationKey::of::<OtherOp, OtherOp>(),
	];

	std::thread::scope(|s| {
		for key in keys {
			let registry = &registry;
			s.spawn(move || {
				registry
					.register(key.lhs, key.rhs)
					.with(|_, _| "ok")
					.unwrap();
			});
		}
	});

	assert_eq!(registry.len(), keys.len());
	for key in keys {
		assert!(registry.contains(key));
	}
}

fn universe() -> [OperatorKind; 4] {
	[
		OperatorKind::of::<CustomOp>(),
		OperatorKind::of::<OtherOp>(),
		OperatorKind::of::<Root>(),
		OperatorKind::of::<Mid>(),
	]
}

proptest! {
	/// Every stored key resolves to the exact implementation stored under it,
	/// and every repeated key is rejected without disturbing the first.
	#[test]
	fn prop_registered_keys_round_trip(pairs in prop::collection::vec((0..4usize, 0..4usize), 0..24)) {
		let kinds = universe();
		let registry = TypePairRegistry::<usize>::new("solve");
		let mut stored: Vec<(RegistrationKey, PairFn<usize>)> = Vec::new();

		for (n, &(a, b)) in pairs.iter().enumerate() {
			let key = RegistrationKey::new(kinds[a], kinds[b]);
			let f: PairFn<usize> = Arc::new(move |_: &dyn LinearOperator, _: &dyn LinearOperator| n);
			let result = registry.register(key.lhs, key.rhs).call(Arc::clone(&f));
			if stored.iter().any(|(k, _)| *k == key) {
				let is_duplicate = matches!(result, Err(AlgebraError::DuplicateRegistration { .. }));
				prop_assert!(is_duplicate);
			} else {
				prop_assert!(result.is_ok());
				stored.push((key, f));
			}
		}

		prop_assert_eq!(registry.len(), stored.len());
		for (key, f) in &stored {
			let resolved = registry.resolve_key(*key).unwrap();
			prop_assert!(Arc::ptr_eq(&resolved, f));
		}
		for entry in registry.entries() {
			let resolved = registry.resolve_key(entry.key()).unwrap();
			prop_assert!(Arc::ptr_eq(&resolved, entry.implementation()));
		}
	}
}
