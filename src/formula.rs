use std::collections::BTreeSet;
use std::fmt;

/// Argument of an atom: a bound variable name or a generated constant `c<N>`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Term {
	Var(char),
	Const(usize),
}

impl fmt::Display for Term {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			Term::Var(ch) => write!(f, "{}", ch),
			Term::Const(n) => write!(f, "c{}", n),
		}
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Connective {
	And,
	Or,
	Imply,
}

impl Connective {
	pub fn symbol(self) -> &'static str {
		match self {
			Connective::And => "/\\",
			Connective::Or => "\\/",
			Connective::Imply => "=>",
		}
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Quantifier {
	ForAll,
	Exist,
}

impl Quantifier {
	pub fn symbol(self) -> char {
		match self {
			Quantifier::ForAll => 'A',
			Quantifier::Exist => 'E',
		}
	}
}

/// A well-formed formula. Rejected text has no `Formula`; see `parser::classify`.
///
/// The derived ordering only exists so branches can be kept in ordered sets,
/// which makes the proof search deterministic.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Formula {
	Prop(char),
	Atom(char, Term, Term),
	Not(Box<Formula>),
	Binary(Connective, Box<Formula>, Box<Formula>),
	Quant(Quantifier, char, Box<Formula>),
}

impl Formula {
	pub fn not(sub: Formula) -> Formula {
		Formula::Not(Box::new(sub))
	}

	pub fn binary(connective: Connective, left: Formula, right: Formula) -> Formula {
		Formula::Binary(connective, Box::new(left), Box::new(right))
	}

	pub fn quant(quantifier: Quantifier, var: char, sub: Formula) -> Formula {
		Formula::Quant(quantifier, var, Box::new(sub))
	}

	/// True when no atom or quantifier occurs anywhere in the formula.
	pub fn is_propositional(&self) -> bool {
		match self {
			Formula::Prop(_) => true,
			Formula::Not(a) => a.is_propositional(),
			Formula::Binary(_, a, b) => a.is_propositional() && b.is_propositional(),
			Formula::Atom(..) | Formula::Quant(..) => false,
		}
	}

	pub fn category(&self) -> Category {
		match self {
			Formula::Prop(_) => Category::Proposition,
			Formula::Atom(..) => Category::Atom,
			Formula::Not(a) => {
				if a.is_propositional() {
					Category::PropNegation
				} else {
					Category::FolNegation
				}
			}
			Formula::Binary(..) => {
				if self.is_propositional() {
					Category::PropBinary
				} else {
					Category::FolBinary
				}
			}
			Formula::Quant(Quantifier::ForAll, _, _) => Category::Universal,
			Formula::Quant(Quantifier::Exist, _, _) => Category::Existential,
		}
	}

	pub fn try_operands(&self) -> Option<(&Formula, Connective, &Formula)> {
		match self {
			Formula::Binary(op, a, b) => Some((a, *op, b)),
			_ => None,
		}
	}

	// operand accessors below must be called on binary formulas, or panic
	fn operands(&self) -> (&Formula, Connective, &Formula) {
		match self.try_operands() {
			Some(operands) => operands,
			None => panic!("not a binary connective formula: {}", self),
		}
	}

	pub fn left_operand(&self) -> &Formula {
		self.operands().0
	}

	pub fn connective_symbol(&self) -> &'static str {
		self.operands().1.symbol()
	}

	pub fn right_operand(&self) -> &Formula {
		self.operands().2
	}

	/// Replace the free occurrences of `var` with `term`.
	///
	/// A nested quantifier that rebinds `var` shadows it, so its body is left alone.
	pub fn substitute(&self, var: char, term: Term) -> Formula {
		let swap = |t: &Term| if *t == Term::Var(var) { term } else { *t };
		match self {
			Formula::Prop(_) => self.clone(),
			Formula::Atom(pred, a, b) => Formula::Atom(*pred, swap(a), swap(b)),
			Formula::Not(a) => Formula::not(a.substitute(var, term)),
			Formula::Binary(op, a, b) => {
				Formula::binary(*op, a.substitute(var, term), b.substitute(var, term))
			}
			Formula::Quant(_, bound, _) if *bound == var => self.clone(),
			Formula::Quant(q, bound, a) => Formula::quant(*q, *bound, a.substitute(var, term)),
		}
	}

	/// Collect the indices of every generated constant in the formula.
	pub fn collect_constants(&self, out: &mut BTreeSet<usize>) {
		match self {
			Formula::Prop(_) => {}
			Formula::Atom(_, a, b) => {
				for term in [a, b].iter() {
					if let Term::Const(n) = term {
						out.insert(*n);
					}
				}
			}
			Formula::Not(a) | Formula::Quant(_, _, a) => a.collect_constants(out),
			Formula::Binary(_, a, b) => {
				a.collect_constants(out);
				b.collect_constants(out);
			}
		}
	}
}

impl fmt::Display for Formula {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			Formula::Prop(ch) => write!(f, "{}", ch),
			Formula::Atom(pred, a, b) => write!(f, "{}({},{})", pred, a, b),
			Formula::Not(a) => write!(f, "~{}", a),
			Formula::Binary(op, a, b) => write!(f, "({}{}{})", a, op.symbol(), b),
			Formula::Quant(q, var, a) => write!(f, "{}{}{}", q.symbol(), var, a),
		}
	}
}

/// The nine outcomes of classification.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Category {
	NotAFormula,
	Atom,
	FolNegation,
	Universal,
	Existential,
	FolBinary,
	Proposition,
	PropNegation,
	PropBinary,
}

impl Category {
	pub fn is_binary(self) -> bool {
		matches!(self, Category::FolBinary | Category::PropBinary)
	}

	pub fn is_propositional(self) -> bool {
		matches!(
			self,
			Category::Proposition | Category::PropNegation | Category::PropBinary
		)
	}

	/// Categories a quantifier body (or a first order negation) may have.
	pub fn is_first_order(self) -> bool {
		matches!(
			self,
			Category::Atom
				| Category::FolNegation
				| Category::Universal
				| Category::Existential
				| Category::FolBinary
		)
	}

	pub fn description(self) -> &'static str {
		match self {
			Category::NotAFormula => "not a formula",
			Category::Atom => "an atom",
			Category::FolNegation => "a negation of a first order logic formula",
			Category::Universal => "a universally quantified formula",
			Category::Existential => "an existentially quantified formula",
			Category::FolBinary => "a binary connective first order formula",
			Category::Proposition => "a proposition",
			Category::PropNegation => "a negation of a propositional formula",
			Category::PropBinary => "a binary connective propositional formula",
		}
	}
}

impl fmt::Display for Category {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		f.write_str(self.description())
	}
}

#[cfg(test)]
mod test {
	use super::*;

	fn pxy() -> Formula {
		Formula::Atom('P', Term::Var('x'), Term::Var('y'))
	}

	#[test]
	fn test_display() {
		let f = Formula::quant(
			Quantifier::ForAll,
			'x',
			Formula::binary(Connective::Imply, pxy(), Formula::not(Formula::Prop('q'))),
		);
		assert_eq!(f.to_string(), "Ax(P(x,y)=>~q)");
		assert_eq!(
			Formula::Atom('S', Term::Const(3), Term::Var('w')).to_string(),
			"S(c3,w)"
		);
	}

	#[test]
	fn test_category() {
		let p = Formula::Prop('p');
		assert_eq!(p.category(), Category::Proposition);
		assert_eq!(Formula::not(p.clone()).category(), Category::PropNegation);
		assert_eq!(Formula::not(pxy()).category(), Category::FolNegation);
		assert_eq!(
			Formula::binary(Connective::Or, p.clone(), p.clone()).category(),
			Category::PropBinary
		);
		assert_eq!(
			Formula::binary(Connective::Or, p, pxy()).category(),
			Category::FolBinary
		);
		assert_eq!(
			Formula::quant(Quantifier::Exist, 'z', pxy()).category(),
			Category::Existential
		);
	}

	#[test]
	fn test_substitute() {
		let f = Formula::binary(
			Connective::And,
			pxy(),
			Formula::quant(Quantifier::ForAll, 'x', pxy()),
		);
		// inner Ax shadows x
		assert_eq!(
			f.substitute('x', Term::Const(0)).to_string(),
			"(P(c0,y)/\\AxP(x,y))"
		);
		assert_eq!(
			f.substitute('y', Term::Const(1)).to_string(),
			"(P(x,c1)/\\AxP(x,c1))"
		);
	}

	#[test]
	fn test_collect_constants() {
		let f = Formula::binary(
			Connective::Or,
			Formula::Atom('Q', Term::Const(2), Term::Var('x')),
			Formula::not(Formula::Atom('R', Term::Const(0), Term::Const(2))),
		);
		let mut out = BTreeSet::new();
		f.collect_constants(&mut out);
		assert_eq!(out.into_iter().collect::<Vec<_>>(), vec![0, 2]);
	}

	#[test]
	fn test_operands() {
		let f = Formula::binary(Connective::Imply, Formula::Prop('p'), pxy());
		assert_eq!(f.left_operand(), &Formula::Prop('p'));
		assert_eq!(f.connective_symbol(), "=>");
		assert_eq!(f.right_operand(), &pxy());
		assert!(pxy().try_operands().is_none());
	}

	#[test]
	#[should_panic]
	fn test_operands_on_atom() {
		pxy().left_operand();
	}
}
