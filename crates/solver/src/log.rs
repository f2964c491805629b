// Copyright 2025 Irreducible Inc.
//! Rendering of circuit log lines and constraint diagnostics.
//!
//! A [`LogEntry`] is rendered against whatever is solved at the time, so it also works on a solve
//! that stopped half way.

use std::io::{self, Write};

use witsolve_core::{CoeffId, LogEntry, SolverField};

use crate::solution::Solution;

/// Stands in for the value of a wire that is not solved yet.
pub const UNSOLVED: &str = "<unsolved>";

/// Renders an optional value, with [`UNSOLVED`] for `None`.
pub(crate) fn render<F: SolverField>(value: Option<F>) -> String {
	match value {
		Some(value) => value.to_decimal(),
		None => UNSOLVED.to_string(),
	}
}

/// Fills the `{}` placeholders of `format` in order. Placeholders without a piece stay as they are.
fn fill(format: &str, pieces: &[String]) -> String {
	let mut out = String::with_capacity(format.len());
	let mut pieces = pieces.iter();
	let mut rest = format;
	while let Some(pos) = rest.find("{}") {
		out.push_str(&rest[..pos]);
		match pieces.next() {
			Some(piece) => out.push_str(piece),
			None => out.push_str("{}"),
		}
		rest = &rest[pos + 2..];
	}
	out.push_str(rest);
	out
}

impl<F: SolverField> Solution<'_, F> {
	/// Renders `entry` with the values known so far.
	///
	/// Outside of a span, a constant renders as its value (`-1` for the reserved minus one) and a
	/// wire term renders as its coefficient, unless it is `1` or `-1`, followed by the wire's
	/// value. Each of these is a separate piece. A span between two [`Term::DELIMITER`]s renders
	/// as the single sum of its terms; a span left open is closed by the end of the entry.
	///
	/// [`Term::DELIMITER`]: witsolve_core::Term::DELIMITER
	pub fn log_value(&self, entry: &LogEntry) -> String {
		let coefficients = self.coefficients();
		let mut pieces = Vec::with_capacity(entry.to_resolve.len());
		let mut span: Option<Option<F>> = None;

		for &term in &entry.to_resolve {
			if term.is_delimiter() {
				match span.take() {
					Some(sum) => pieces.push(render(sum)),
					None => span = Some(Some(F::zero())),
				}
				continue;
			}

			if let Some(sum) = span.as_mut() {
				*sum = match (*sum, self.is_known(term)) {
					(Some(acc), true) => Some(acc + self.compute_term(term)),
					_ => None,
				};
				continue;
			}

			if term.is_virtual() {
				if term.coeff == CoeffId::MINUS_ONE {
					pieces.push("-1".to_string());
				} else {
					pieces.push(coefficients[term.coeff].to_decimal());
				}
				continue;
			}
			if !term.coeff.is_unit() {
				pieces.push(coefficients[term.coeff].to_decimal());
			}
			pieces.push(render(self.value(term.wire)));
		}
		if let Some(sum) = span {
			pieces.push(render(sum));
		}

		fill(&entry.format, &pieces)
	}

	/// Writes one rendered line per entry of `logs` to `sink`.
	pub fn print_logs(&self, sink: &mut dyn Write, logs: &[LogEntry]) -> io::Result<()> {
		for entry in logs {
			writeln!(sink, "{}", self.log_value(entry))?;
		}
		sink.flush()
	}
}
