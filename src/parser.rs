use crate::error::NotAFormula;
use crate::formula::{Category, Connective, Formula, Quantifier, Term};
use plex::lexer;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq)]
enum Token {
	Prop(char),
	Var(char),
	Pred(char),
	Quant(Quantifier),
	Not,
	LeftParenthesis,
	RightParenthesis,
	Comma,
	Connective(Connective),
	// anything outside the alphabet, rejected by every rule
	Stray,
}

fn head(text: &str) -> char {
	text.chars().next().unwrap_or_default()
}

lexer! {
	fn next_token(text: 'a) -> Token;

	r#"[pqrs]"# => Token::Prop(head(text)),
	r#"[xyzw]"# => Token::Var(head(text)),
	r#"[PQRS]"# => Token::Pred(head(text)),
	r#"A"# => Token::Quant(Quantifier::ForAll),
	r#"E"# => Token::Quant(Quantifier::Exist),
	r#"\~"# => Token::Not,
	r#"\("# => Token::LeftParenthesis,
	r#"\)"# => Token::RightParenthesis,
	r#","# => Token::Comma,
	r#"/\\"# => Token::Connective(Connective::And),
	r#"\\/"# => Token::Connective(Connective::Or),
	r#"=>"# => Token::Connective(Connective::Imply),
	r#"."# => Token::Stray,
}

fn tokenize(string: &str) -> Option<Vec<Token>> {
	let mut tokens = Vec::new();
	let mut remaining = string;
	while let Some((token, new_remaining)) = next_token(remaining) {
		tokens.push(token);
		remaining = new_remaining;
	}
	// the lexer stops early on input it cannot match at all
	if remaining.is_empty() {
		Some(tokens)
	} else {
		None
	}
}

// First connective sitting directly inside the outermost parentheses.
fn main_connective(tokens: &[Token]) -> Option<(usize, Connective)> {
	let mut depth = 0i32;
	for (id, token) in tokens.iter().enumerate() {
		match token {
			Token::LeftParenthesis => depth += 1,
			Token::RightParenthesis => depth -= 1,
			Token::Connective(op) if depth == 1 => return Some((id, *op)),
			_ => {}
		}
	}
	None
}

fn recognize(tokens: &[Token]) -> Option<Formula> {
	match tokens {
		[Token::Prop(ch)] => Some(Formula::Prop(*ch)),
		// every formula is either propositional or first order, so any
		// recognized operand makes a valid negation
		[Token::Not, rest @ ..] => recognize(rest).map(Formula::not),
		[Token::LeftParenthesis, .., Token::RightParenthesis] => {
			let (id, op) = main_connective(tokens)?;
			let left = recognize(&tokens[1..id])?;
			let right = recognize(&tokens[id + 1..tokens.len() - 1])?;
			Some(Formula::binary(op, left, right))
		}
		[Token::Quant(q), Token::Var(var), rest @ ..] if !rest.is_empty() => {
			let sub = recognize(rest)?;
			if sub.category().is_first_order() {
				Some(Formula::quant(*q, *var, sub))
			} else {
				None
			}
		}
		[Token::Pred(pred), Token::LeftParenthesis, Token::Var(a), Token::Comma, Token::Var(b), Token::RightParenthesis] => {
			Some(Formula::Atom(*pred, Term::Var(*a), Term::Var(*b)))
		}
		_ => None,
	}
}

/// Classify `text` as a formula, or `None` when it is not one.
pub fn classify(text: &str) -> Option<Formula> {
	recognize(&tokenize(text)?)
}

pub fn categorize(text: &str) -> Category {
	match classify(text) {
		Some(formula) => formula.category(),
		None => Category::NotAFormula,
	}
}

impl FromStr for Formula {
	type Err = NotAFormula;

	fn from_str(string: &str) -> Result<Formula, NotAFormula> {
		classify(string).ok_or_else(|| NotAFormula(string.to_string()))
	}
}
