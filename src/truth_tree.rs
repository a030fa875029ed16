//! Satisfiability by semantic tableau.
//!
//! The frontier is a stack of open branches. Each popped branch is checked for
//! closure and then expanded by the first applicable rule, in this order:
//! conjunction, disjunction, implication, pushing a negation inward, double
//! negation, existential witness, universal instantiation. A branch on which no
//! rule applies is a model, so the search stops there.
//!
//! Quantifier rules draw constants `c0, c1, ...` from a pool of
//! `TableauConfig::max_constants`. A branch that needs more is abandoned, and if
//! the frontier empties after that the verdict is `Unknown` rather than
//! `Unsatisfiable`.

use crate::formula::{Connective, Formula, Quantifier, Term};
use std::collections::BTreeSet;
use std::fmt;
use tracing::{debug, trace};

pub const MAX_CONSTANTS: usize = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Verdict {
	Unsatisfiable,
	Satisfiable,
	/// No contradiction found within the resource bounds.
	Unknown,
}

impl Verdict {
	pub fn description(self) -> &'static str {
		match self {
			Verdict::Unsatisfiable => "is not satisfiable",
			Verdict::Satisfiable => "is satisfiable",
			Verdict::Unknown => "may or may not be satisfiable",
		}
	}
}

/// Configuration for one satisfiability decision.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableauConfig {
	/// Size of the constant pool shared by all branches.
	pub max_constants: usize,
	/// Optional cap on rule applications; running out yields `Unknown`.
	pub max_expansions: Option<usize>,
}

impl Default for TableauConfig {
	fn default() -> Self {
		TableauConfig {
			max_constants: MAX_CONSTANTS,
			max_expansions: None,
		}
	}
}

/// Counters gathered while the tableau runs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TableauStats {
	pub expansions: usize,
	pub closed_branches: usize,
	pub abandoned_branches: usize,
	pub constants_used: usize,
}

#[derive(Clone, Debug)]
struct Branch {
	formulas: BTreeSet<Formula>,
	// (universal formula, constant) pairs already added to this branch
	instantiated: BTreeSet<(Formula, usize)>,
	// constants drawn for this branch, even when no formula mentions them
	domain: BTreeSet<usize>,
}

impl Branch {
	fn new(root: Formula) -> Branch {
		let mut formulas = BTreeSet::new();
		formulas.insert(root);
		Branch {
			formulas,
			instantiated: BTreeSet::new(),
			domain: BTreeSet::new(),
		}
	}

	// Some formula whose negation sits on the same branch.
	fn contradiction(&self) -> Option<&Formula> {
		self.formulas.iter().find_map(|f| match f {
			Formula::Not(inner) if self.formulas.contains(&**inner) => Some(&**inner),
			_ => None,
		})
	}

	fn constants(&self) -> BTreeSet<usize> {
		let mut constants = self.domain.clone();
		for f in &self.formulas {
			f.collect_constants(&mut constants);
		}
		constants
	}

	fn replace<I>(&self, old: &Formula, new: I) -> Branch
	where
		I: IntoIterator<Item = Formula>,
	{
		let mut next = self.clone();
		next.formulas.remove(old);
		next.formulas.extend(new);
		next
	}

	// The universal formula stays, so constants introduced later can reach it.
	fn instantiate(&self, universal: &Formula, var: char, body: &Formula, constants: &[usize]) -> Branch {
		let mut next = self.clone();
		for &c in constants {
			next.formulas.insert(body.substitute(var, Term::Const(c)));
			next.instantiated.insert((universal.clone(), c));
			next.domain.insert(c);
		}
		next
	}
}

impl fmt::Display for Branch {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		let items: Vec<String> = self.formulas.iter().map(|x| x.to_string()).collect();
		write!(f, "{{{}}}", items.join(", "))
	}
}

enum Expansion {
	Alpha(Branch),
	Beta(Branch, Branch),
	// needs a fresh constant and the pool is empty
	Exhausted,
	// no rule applies
	Complete,
}

// Rewrite a negated connective or quantifier into its dual.
fn push_negation(formula: &Formula) -> Option<Formula> {
	let inner = match formula {
		Formula::Not(inner) => inner,
		_ => return None,
	};
	match &**inner {
		Formula::Binary(Connective::And, a, b) => Some(Formula::binary(
			Connective::Or,
			Formula::not((**a).clone()),
			Formula::not((**b).clone()),
		)),
		Formula::Binary(Connective::Or, a, b) => Some(Formula::binary(
			Connective::And,
			Formula::not((**a).clone()),
			Formula::not((**b).clone()),
		)),
		Formula::Binary(Connective::Imply, a, b) => Some(Formula::binary(
			Connective::And,
			(**a).clone(),
			Formula::not((**b).clone()),
		)),
		Formula::Quant(Quantifier::ForAll, var, a) => Some(Formula::quant(
			Quantifier::Exist,
			*var,
			Formula::not((**a).clone()),
		)),
		Formula::Quant(Quantifier::Exist, var, a) => Some(Formula::quant(
			Quantifier::ForAll,
			*var,
			Formula::not((**a).clone()),
		)),
		_ => None,
	}
}

/// One run of the tableau procedure on a single formula.
pub struct Tableau {
	frontier: Vec<Branch>,
	next_constant: usize,
	exhausted: bool,
	config: TableauConfig,
	stats: TableauStats,
}

impl Tableau {
	pub fn new(formula: &Formula, config: TableauConfig) -> Tableau {
		Tableau {
			frontier: vec![Branch::new(formula.clone())],
			next_constant: 0,
			exhausted: false,
			config,
			stats: TableauStats::default(),
		}
	}

	pub fn stats(&self) -> &TableauStats {
		&self.stats
	}

	fn fresh_constant(&mut self) -> Option<usize> {
		if self.next_constant >= self.config.max_constants {
			return None;
		}
		let c = self.next_constant;
		self.next_constant += 1;
		self.stats.constants_used = self.next_constant;
		Some(c)
	}

	fn expand(&mut self, branch: &Branch) -> Expansion {
		for f in &branch.formulas {
			if let Formula::Binary(Connective::And, a, b) = f {
				trace!(formula = %f, "conjunction");
				return Expansion::Alpha(branch.replace(f, vec![(**a).clone(), (**b).clone()]));
			}
		}
		for f in &branch.formulas {
			if let Formula::Binary(Connective::Or, a, b) = f {
				trace!(formula = %f, "disjunction");
				return Expansion::Beta(
					branch.replace(f, Some((**a).clone())),
					branch.replace(f, Some((**b).clone())),
				);
			}
		}
		for f in &branch.formulas {
			if let Formula::Binary(Connective::Imply, a, b) = f {
				trace!(formula = %f, "implication");
				return Expansion::Beta(
					branch.replace(f, Some(Formula::not((**a).clone()))),
					branch.replace(f, Some((**b).clone())),
				);
			}
		}
		for f in &branch.formulas {
			if let Some(pushed) = push_negation(f) {
				trace!(formula = %f, result = %pushed, "negation inward");
				return Expansion::Alpha(branch.replace(f, Some(pushed)));
			}
		}
		for f in &branch.formulas {
			if let Formula::Not(inner) = f {
				if let Formula::Not(a) = &**inner {
					trace!(formula = %f, "double negation");
					return Expansion::Alpha(branch.replace(f, Some((**a).clone())));
				}
			}
		}
		for f in &branch.formulas {
			if let Formula::Quant(Quantifier::Exist, var, a) = f {
				let c = match self.fresh_constant() {
					Some(c) => c,
					None => return Expansion::Exhausted,
				};
				trace!(formula = %f, constant = c, "existential witness");
				let mut next = branch.replace(f, Some(a.substitute(*var, Term::Const(c))));
				next.domain.insert(c);
				return Expansion::Alpha(next);
			}
		}

		let universals: Vec<(&Formula, char, &Formula)> = branch
			.formulas
			.iter()
			.filter_map(|f| match f {
				Formula::Quant(Quantifier::ForAll, var, a) => Some((f, *var, &**a)),
				_ => None,
			})
			.collect();
		if universals.is_empty() {
			return Expansion::Complete;
		}
		let mut constants: Vec<usize> = branch.constants().into_iter().collect();
		if constants.is_empty() {
			match self.fresh_constant() {
				Some(c) => constants.push(c),
				None => return Expansion::Exhausted,
			}
		}
		for (universal, var, body) in universals {
			let pending: Vec<usize> = constants
				.iter()
				.copied()
				.filter(|c| !branch.instantiated.contains(&(universal.clone(), *c)))
				.collect();
			if !pending.is_empty() {
				trace!(formula = %universal, constants = ?pending, "universal instantiation");
				return Expansion::Alpha(branch.instantiate(universal, var, body, &pending));
			}
		}
		Expansion::Complete
	}

	/// Run the search to a verdict.
	pub fn run(&mut self) -> Verdict {
		while let Some(branch) = self.frontier.pop() {
			if let Some(f) = branch.contradiction() {
				trace!(formula = %f, "branch closed");
				self.stats.closed_branches += 1;
				continue;
			}
			if let Some(limit) = self.config.max_expansions {
				if self.stats.expansions >= limit {
					debug!(limit, "expansion budget spent");
					return Verdict::Unknown;
				}
			}
			match self.expand(&branch) {
				Expansion::Alpha(next) => {
					self.stats.expansions += 1;
					self.frontier.push(next);
				}
				Expansion::Beta(left, right) => {
					self.stats.expansions += 1;
					// left is explored first
					self.frontier.push(right);
					self.frontier.push(left);
				}
				Expansion::Exhausted => {
					debug!(branch = %branch, "constant pool exhausted, branch abandoned");
					self.stats.abandoned_branches += 1;
					self.exhausted = true;
				}
				Expansion::Complete => {
					debug!(branch = %branch, stats = ?self.stats, "open complete branch");
					return Verdict::Satisfiable;
				}
			}
		}
		let verdict = if self.exhausted {
			Verdict::Unknown
		} else {
			Verdict::Unsatisfiable
		};
		debug!(?verdict, stats = ?self.stats, "frontier empty");
		verdict
	}
}

/// Decide satisfiability of `formula` with the default configuration.
pub fn decide(formula: &Formula) -> Verdict {
	decide_with(formula, &TableauConfig::default())
}

pub fn decide_with(formula: &Formula, config: &TableauConfig) -> Verdict {
	Tableau::new(formula, config.clone()).run()
}

#[cfg(test)]
mod test {
	use super::*;
	use crate::parser::classify;

	fn sat(text: &str) -> Verdict {
		decide(&classify(text).unwrap())
	}

	fn sat_bounded(text: &str, max_constants: usize) -> Verdict {
		let config = TableauConfig {
			max_constants,
			..TableauConfig::default()
		};
		decide_with(&classify(text).unwrap(), &config)
	}

	#[test]
	fn test_propositional() {
		assert_eq!(sat("(p/\\~p)"), Verdict::Unsatisfiable);
		assert_eq!(sat("(p\\/~p)"), Verdict::Satisfiable);
		assert_eq!(sat("(p=>p)"), Verdict::Satisfiable);
		assert_eq!(sat("p"), Verdict::Satisfiable);
		assert_eq!(sat("~~~p"), Verdict::Satisfiable);
		assert_eq!(sat("(~~p/\\~p)"), Verdict::Unsatisfiable);
		assert_eq!(sat("((p=>q)/\\(p/\\~q))"), Verdict::Unsatisfiable);
		assert_eq!(sat("~(p\\/~p)"), Verdict::Unsatisfiable);
		assert_eq!(sat("~(p=>(q=>p))"), Verdict::Unsatisfiable);
		assert_eq!(sat("(~(p/\\q)/\\(p/\\q))"), Verdict::Unsatisfiable);
		assert_eq!(sat("((p\\/q)/\\(~p/\\~q))"), Verdict::Unsatisfiable);
		assert_eq!(sat("((p\\/q)/\\(~p\\/~q))"), Verdict::Satisfiable);
	}

	#[test]
	fn test_atoms() {
		assert_eq!(sat("(P(x,y)/\\~P(x,y))"), Verdict::Unsatisfiable);
		assert_eq!(sat("(P(x,y)/\\~P(y,x))"), Verdict::Satisfiable);
		assert_eq!(sat("(P(x,y)/\\~Q(x,y))"), Verdict::Satisfiable);
	}

	#[test]
	fn test_quantified() {
		assert_eq!(sat("Ax(P(x,x)=>P(x,x))"), Verdict::Satisfiable);
		assert_eq!(sat("ExP(x,x)"), Verdict::Satisfiable);
		assert_eq!(sat("Ax~P(x,x)"), Verdict::Satisfiable);
		assert_eq!(sat("(ExP(x,x)/\\Ax~P(x,x))"), Verdict::Unsatisfiable);
		assert_eq!(sat("(AxP(x,x)/\\~AxP(x,x))"), Verdict::Unsatisfiable);
		assert_eq!(sat("(ExAyP(x,y)/\\~ExP(x,x))"), Verdict::Unsatisfiable);
		assert_eq!(sat("Ax(P(x,x)/\\~P(x,x))"), Verdict::Unsatisfiable);
	}

	#[test]
	fn test_constant_bound() {
		// every witness demands another one
		assert_eq!(sat("AxEyP(x,y)"), Verdict::Unknown);
		assert_eq!(sat_bounded("ExP(x,x)", 0), Verdict::Unknown);
		assert_eq!(sat_bounded("ExP(x,x)", 1), Verdict::Satisfiable);
		assert_eq!(sat_bounded("(ExP(x,x)/\\ExQ(x,x))", 1), Verdict::Unknown);
		assert_eq!(sat_bounded("(ExP(x,x)/\\ExQ(x,x))", 2), Verdict::Satisfiable);
	}

	#[test]
	fn test_vacuous_quantifiers() {
		// the bound variable never occurs, so one constant is enough
		assert_eq!(sat("AxP(y,y)"), Verdict::Satisfiable);
		assert_eq!(sat("(AxP(y,y)/\\Q(x,x))"), Verdict::Satisfiable);
		assert_eq!(sat("(AxP(y,y)/\\~P(y,y))"), Verdict::Unsatisfiable);
		assert_eq!(sat("ExQ(z,w)"), Verdict::Satisfiable);
		assert_eq!(sat("(ExQ(z,w)/\\AyR(x,x))"), Verdict::Satisfiable);
		assert_eq!(sat_bounded("AxP(y,y)", 1), Verdict::Satisfiable);
	}

	#[test]
	fn test_nested_quantifiers() {
		assert_eq!(sat("AyAxP(x,x)"), Verdict::Satisfiable);
		assert_eq!(sat("(AyAxP(x,x)/\\Ez~P(z,z))"), Verdict::Unsatisfiable);
		assert_eq!(sat("AxAy(P(x,y)=>P(y,x))"), Verdict::Satisfiable);
		assert_eq!(sat("(AxAyP(x,y)/\\ExEy~P(y,x))"), Verdict::Unsatisfiable);
	}

	#[test]
	fn test_closed_branches_beat_exhaustion() {
		// the contradiction closes the only branch before any constant is needed
		assert_eq!(sat_bounded("(p/\\(~p/\\ExP(x,x)))", 0), Verdict::Unsatisfiable);
	}

	#[test]
	fn test_universal_is_retained() {
		// AxQ(x,x) has to fire again on the witness its sibling introduces later
		assert_eq!(
			sat("(AxQ(x,x)/\\Ax(Q(x,x)=>Ey~Q(y,y)))"),
			Verdict::Unsatisfiable
		);
	}

	#[test]
	fn test_shadowing() {
		// inner Ex rebinds x, so the outer witness must not reach it
		assert_eq!(sat("Ex(P(x,x)/\\Ex~P(x,x))"), Verdict::Satisfiable);
	}

	#[test]
	fn test_expansion_budget() {
		let config = TableauConfig {
			max_expansions: Some(1),
			..TableauConfig::default()
		};
		let f = classify("((p\\/q)/\\(r\\/s))").unwrap();
		assert_eq!(decide_with(&f, &config), Verdict::Unknown);
		assert_eq!(decide(&f), Verdict::Satisfiable);
	}

	#[test]
	fn test_expansion_budget_spares_closed_branches() {
		// the second pop is already closed and costs nothing
		let config = TableauConfig {
			max_expansions: Some(1),
			..TableauConfig::default()
		};
		let f = classify("(p/\\~p)").unwrap();
		assert_eq!(decide_with(&f, &config), Verdict::Unsatisfiable);
	}

	#[test]
	fn test_stats() {
		let f = classify("((p\\/q)/\\(~p/\\~q))").unwrap();
		let mut tableau = Tableau::new(&f, TableauConfig::default());
		assert_eq!(tableau.run(), Verdict::Unsatisfiable);
		assert_eq!(tableau.stats().closed_branches, 2);
		assert_eq!(tableau.stats().abandoned_branches, 0);
		assert_eq!(tableau.stats().constants_used, 0);
	}

	#[test]
	fn test_idempotent() {
		let f = classify("(AxEyP(x,y)\\/(q/\\~q))").unwrap();
		assert_eq!(decide(&f), decide(&f));
	}
}
