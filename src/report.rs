//! Line-oriented reports over an input of formulas.
//!
//! The first input line is a mode header: it turns on classification
//! sentences when it contains `PARSE` and satisfiability sentences when it
//! contains `SAT`. Every following line is one candidate formula.

use crate::error::{ReportError, ReportResult};
use crate::formula::Formula;
use crate::parser::classify;
use crate::truth_tree::{decide_with, TableauConfig};
use std::io::{BufRead, Write};
use tracing::debug;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Mode {
	pub parse: bool,
	pub sat: bool,
}

impl Mode {
	pub fn from_header(header: &str) -> Mode {
		Mode {
			parse: header.contains("PARSE"),
			sat: header.contains("SAT"),
		}
	}
}

pub fn parse_sentence(line: &str, formula: Option<&Formula>) -> String {
	let mut sentence = match formula {
		Some(f) => format!("{} is {}.", line, f.category()),
		None => format!("{} is not a formula.", line),
	};
	if let Some((left, op, right)) = formula.and_then(|f| f.try_operands()) {
		sentence += &format!(
			" Its left hand side is {}, its connective is {}, and its right hand side is {}.",
			left,
			op.symbol(),
			right
		);
	}
	sentence
}

pub fn sat_sentence(line: &str, formula: Option<&Formula>, config: &TableauConfig) -> String {
	match formula {
		Some(f) => format!("{} {}.", line, decide_with(f, config).description()),
		None => format!("{} is not a formula.", line),
	}
}

/// Write the report for `input` to `output`.
///
/// `mode` overrides the header when given; the header line is still consumed.
pub fn run<R, W>(input: R, output: &mut W, mode: Option<Mode>, config: &TableauConfig) -> ReportResult<()>
where
	R: BufRead,
	W: Write,
{
	let mut lines = input.lines();
	let header = lines.next().ok_or(ReportError::MissingHeader)??;
	let mode = mode.unwrap_or_else(|| Mode::from_header(&header));
	debug!(?mode, ?config, "report started");
	for line in lines {
		let line = line?;
		let formula = classify(&line);
		if mode.parse {
			writeln!(output, "{}", parse_sentence(&line, formula.as_ref()))?;
		}
		if mode.sat {
			writeln!(output, "{}", sat_sentence(&line, formula.as_ref(), config))?;
		}
	}
	output.flush()?;
	Ok(())
}
