// Copyright 2025 Irreducible Inc.
//! Per-solve configuration.

use std::{
	env, fmt,
	io::{self, Write},
	sync::Arc,
};

use crate::hints::Hint;

/// Environment variable that turns on [`SolverOptions::force`] in [`SolverOptions::from_env`].
pub const FORCE_ENV: &str = "WITSOLVE_FORCE";

/// Options for a single solve.
pub struct SolverOptions {
	/// Keep going past unsatisfied constraints and return the (invalid) witness instead of an
	/// error. Meant for tests and benchmarks.
	pub force: bool,
	/// Hint functions available to this solve on top of the registry.
	pub hint_functions: Vec<Arc<dyn Hint>>,
	/// Where the circuit's log lines go. `None` discards them.
	pub logger: Option<Box<dyn Write + Send>>,
}

impl Default for SolverOptions {
	fn default() -> Self {
		Self {
			force: false,
			hint_functions: Vec::new(),
			logger: Some(Box::new(io::stdout())),
		}
	}
}

impl SolverOptions {
	/// Default options, with `force` taken from the `WITSOLVE_FORCE` environment variable.
	///
	/// Any value other than empty, `0` or `false` enables it.
	pub fn from_env() -> Self {
		let force = env::var(FORCE_ENV)
			.map(|value| !matches!(value.trim(), "" | "0" | "false"))
			.unwrap_or(false);
		Self {
			force,
			..Self::default()
		}
	}

	/// Turns on [`force`](Self::force).
	pub fn force(mut self) -> Self {
		self.force = true;
		self
	}

	/// Makes `hints` available to the solve.
	pub fn with_hints(mut self, hints: impl IntoIterator<Item = Arc<dyn Hint>>) -> Self {
		self.hint_functions.extend(hints);
		self
	}

	/// Sends log lines to `writer`.
	pub fn with_output(mut self, writer: impl Write + Send + 'static) -> Self {
		self.logger = Some(Box::new(writer));
		self
	}

	/// Discards log lines.
	pub fn without_output(mut self) -> Self {
		self.logger = None;
		self
	}
}

impl fmt::Debug for SolverOptions {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let hints: Vec<&str> = self.hint_functions.iter().map(|h| h.name()).collect();
		f.debug_struct("SolverOptions")
			.field("force", &self.force)
			.field("hint_functions", &hints)
			.field("logger", &self.logger.is_some())
			.finish()
	}
}
