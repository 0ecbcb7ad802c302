//! Fixpoint propagation engine.
use serde::{Deserialize, Serialize};
use tabrdf_core::{Pattern, Position, Term, Translator};

use crate::{
	rules::{self, Proposal},
	Error, Interpretation,
};

/// Propagation options.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Options {
	/// Maximum number of passes over the pattern.
	///
	/// Propagation always terminates, this is only useful to bound the time
	/// spent classifying large patterns.
	pub max_passes: Option<usize>,
}

/// Pattern classifier.
#[derive(Debug, Clone, Copy)]
pub struct Classifier<'t> {
	translator: &'t Translator,
	options: Options,
}

impl<'t> Classifier<'t> {
	pub fn new(translator: &'t Translator) -> Self {
		Self::with_options(translator, Options::default())
	}

	pub fn with_options(translator: &'t Translator, options: Options) -> Self {
		Self {
			translator,
			options,
		}
	}

	pub fn translator(&self) -> &'t Translator {
		self.translator
	}

	pub fn options(&self) -> &Options {
		&self.options
	}

	/// Assigns a role to every term of the given pattern.
	///
	/// On error, the pattern cannot be evaluated directly against the
	/// tabular resource.
	pub fn classify(&self, pattern: &Pattern) -> Result<Interpretation, Error> {
		log::debug!("classifying {} triple patterns", pattern.len());
		let mut run = Run::new(self.translator, pattern);

		loop {
			if let Step::Fixpoint = run.step()? {
				log::debug!("fixpoint reached after {} passes", run.passes());
				break Ok(run.into_interpretation());
			}

			if let Some(max_passes) = self.options.max_passes {
				if run.passes() >= max_passes {
					log::debug!("no fixpoint after {} passes", run.passes());
					break Err(Error::NonConvergence {
						passes: run.passes(),
					});
				}
			}
		}
	}
}

/// Outcome of a propagation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
	/// Some role changed, another pass is required.
	Changed,

	/// No role changed.
	Fixpoint,
}

/// Propagation run.
///
/// Owns the interpretation being computed for a single pattern.
pub struct Run<'a> {
	translator: &'a Translator,
	pattern: &'a Pattern,
	interpretation: Interpretation,
	passes: usize,
}

impl<'a> Run<'a> {
	pub fn new(translator: &'a Translator, pattern: &'a Pattern) -> Self {
		Self {
			translator,
			pattern,
			interpretation: Interpretation::new(),
			passes: 0,
		}
	}

	/// Number of passes performed so far.
	pub fn passes(&self) -> usize {
		self.passes
	}

	/// Interpretation computed so far.
	pub fn interpretation(&self) -> &Interpretation {
		&self.interpretation
	}

	pub fn into_interpretation(self) -> Interpretation {
		self.interpretation
	}

	/// Runs every rule on every triple of the pattern once.
	///
	/// When no role changes, every occurrence of a named constant must have
	/// been classified.
	pub fn step(&mut self) -> Result<Step, Error> {
		let mut changed = false;
		let mut unresolved: Option<&Term> = None;

		for triple in self.pattern {
			for position in Position::ALL {
				let term = position.get(triple);
				match rules::infer(self.translator, &self.interpretation, position, triple)? {
					Proposal::Role(kind) => {
						changed |= self
							.interpretation
							.merge(term, kind, triple)
							.map_err(|e| {
								log::debug!("{e}");
								e
							})?
							.is_changed()
					}
					Proposal::Unresolved => {
						unresolved.get_or_insert(term);
					}
				}
			}
		}

		self.passes += 1;
		log::trace!("pass {} (changed: {changed})", self.passes);

		if changed {
			Ok(Step::Changed)
		} else {
			match unresolved {
				Some(term) => Err(Error::UnknownEntity(term.clone())),
				None => Ok(Step::Fixpoint),
			}
		}
	}
}
