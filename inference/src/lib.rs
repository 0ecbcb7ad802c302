//! Classification of graph pattern terms against a tabular resource.
//!
//! Before a graph pattern can be evaluated directly on a set of tables, each
//! of its terms must be given a structural role: table, row, column, cell
//! value, type... This crate computes such roles by propagating local
//! constraints over the pattern until a fixpoint is reached.
//!
//! ```
//! use tabrdf_core::{pattern, term, Translator};
//! use tabrdf_inference::{Classifier, RoleKind};
//!
//! let translator = Translator::default();
//! let pattern = pattern! [
//! 	?row <"http://sparql.xyz/facade-x/data/name"> "Ann" .
//! ];
//!
//! let interpretation = Classifier::new(&translator).classify(&pattern).unwrap();
//! assert_eq!(interpretation.kind_of(&term!(?row)), Some(RoleKind::ContainerRow));
//! ```
use tabrdf_core::{Pattern, Term, Translator};

pub mod interpretation;
pub mod propagation;
pub mod role;
pub mod rules;
pub mod state;

pub use interpretation::{Interpretation, Merge};
pub use propagation::{Classifier, Options, Run, Step};
pub use role::{Join, KindSet, Role, RoleKind};
pub use state::StateGraph;

/// Classification error.
///
/// Any error means that the pattern cannot be pushed down to the tabular
/// resource and must be evaluated on its triple form instead.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
	#[error("unknown entity {0}")]
	UnknownEntity(Term),

	#[error("type conflict on {term}: {existing} is inconsistent with {proposed}")]
	TypeConflict {
		term: Term,
		existing: RoleKind,
		proposed: RoleKind,
	},

	#[error("join conflict on {term}: {existing} cannot be combined with {proposed}")]
	JoinConflict {
		term: Term,
		existing: RoleKind,
		proposed: RoleKind,
	},

	#[error("no fixpoint reached after {passes} passes")]
	NonConvergence { passes: usize },
}

impl Error {
	/// Term on which the error occurred, if any.
	pub fn term(&self) -> Option<&Term> {
		match self {
			Self::UnknownEntity(term)
			| Self::TypeConflict { term, .. }
			| Self::JoinConflict { term, .. } => Some(term),
			Self::NonConvergence { .. } => None,
		}
	}
}

/// Classifies the terms of the given pattern with the default options.
pub fn classify(translator: &Translator, pattern: &Pattern) -> Result<Interpretation, Error> {
	Classifier::new(translator).classify(pattern)
}
