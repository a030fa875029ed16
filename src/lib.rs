//! Classification of propositional and first order formulas, and
//! satisfiability by semantic tableau.
//!
//! ```
//! use fotableau::{classify, decide, Category, Verdict};
//!
//! let formula = classify("(p/\\~p)").unwrap();
//! assert_eq!(formula.category(), Category::PropBinary);
//! assert_eq!(decide(&formula), Verdict::Unsatisfiable);
//! ```

pub mod error;
pub mod formula;
pub mod parser;
pub mod report;
pub mod truth_tree;


pub use error::{NotAFormula, ReportError, ReportResult};
pub use formula::{Category, Connective, Formula, Quantifier, Term};
pub use parser::{categorize, classify};
pub use truth_tree::{decide, decide_with, Tableau, TableauConfig, TableauStats, Verdict, MAX_CONSTANTS};
