//! Out-of-crate registrations collected via `inventory`.

use crate::db::AlgebraDb;
use crate::error::Result;

/// A registration hook run once when the global registries are first built.
pub struct AlgebraPlugin {
	pub name: &'static str,
	/// Crate that submitted the plugin.
	pub crate_name: &'static str,
	pub register: fn(&AlgebraDb) -> Result<()>,
}

inventory::collect!(AlgebraPlugin);

impl AlgebraPlugin {
	pub const fn new(
		name: &'static str,
		crate_name: &'static str,
		register: fn(&AlgebraDb) -> Result<()>,
	) -> Self {
		Self {
			name,
			crate_name,
			register,
		}
	}
}

/// Runs every submitted plugin in `(crate_name, name)` order.
///
/// A failing plugin is logged and skipped; registrations it made before
/// failing stay in place.
pub(crate) fn run_plugins(db: &AlgebraDb) {
	let mut plugins: Vec<&AlgebraPlugin> = inventory::iter::<AlgebraPlugin>.into_iter().collect();
	plugins.sort_by_key(|p| (p.crate_name, p.name));

	for plugin in plugins {
		match (plugin.register)(db) {
			Ok(()) => tracing::debug!(plugin = plugin.name, crate_name = plugin.crate_name, "algebra plugin registered"),
			Err(e) => tracing::error!(
				plugin = plugin.name,
				crate_name = plugin.crate_name,
				"algebra plugin registration failed: {}",
				e
			),
		}
	}
}

/// Submits an [`AlgebraPlugin`] to be run when the global registries are built.
///
/// ```ignore
/// linop_algebra::algebra_plugin!(my_ops, |db| {
///     db.solve.register_kinds::<MyOp, MyOp>().with(my_solve)?;
///     Ok(())
/// });
/// ```
#[macro_export]
macro_rules! algebra_plugin {
	($name:ident, $register:expr) => {
		$crate::inventory::submit! {
			$crate::AlgebraPlugin::new(stringify!($name), env!("CARGO_PKG_NAME"), $register)
		}
	};
}
