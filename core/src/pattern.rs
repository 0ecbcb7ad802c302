use std::fmt;

use hashbrown::HashSet;
use serde::{Deserialize, Serialize};

use crate::Term;

/// Triple pattern.
pub type Triple = rdf_types::Triple<Term, Term, Term>;

/// Position of a term in a triple pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Position {
	Subject,
	Predicate,
	Object,
}

impl Position {
	pub const ALL: [Self; 3] = [Self::Subject, Self::Predicate, Self::Object];

	/// Returns the term of `triple` at this position.
	pub fn get(self, triple: &Triple) -> &Term {
		match self {
			Self::Subject => &triple.0,
			Self::Predicate => &triple.1,
			Self::Object => &triple.2,
		}
	}
}

impl fmt::Display for Position {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			Self::Subject => write!(f, "subject"),
			Self::Predicate => write!(f, "predicate"),
			Self::Object => write!(f, "object"),
		}
	}
}

/// Graph pattern.
///
/// Ordered sequence of triple patterns. The order only matters for
/// scheduling, never for the meaning of the pattern.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pattern {
	triples: Vec<Triple>,
}

impl Pattern {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn len(&self) -> usize {
		self.triples.len()
	}

	pub fn is_empty(&self) -> bool {
		self.triples.is_empty()
	}

	pub fn push(&mut self, triple: Triple) {
		self.triples.push(triple)
	}

	pub fn triples(&self) -> &[Triple] {
		&self.triples
	}

	pub fn iter(&self) -> std::slice::Iter<Triple> {
		self.triples.iter()
	}

	/// Iterates over the distinct terms of the pattern, in order of first
	/// occurrence.
	pub fn terms(&self) -> Terms {
		Terms {
			triples: self.triples.iter(),
			current: None,
			position: 0,
			visited: HashSet::new(),
		}
	}

	/// Reorders the triples of the pattern.
	///
	/// `order` lists the current indexes of the triples in their new order.
	/// Indexes out of bounds are ignored.
	pub fn permuted(&self, order: &[usize]) -> Self {
		order
			.iter()
			.filter_map(|&i| self.triples.get(i).cloned())
			.collect()
	}
}

impl From<Vec<Triple>> for Pattern {
	fn from(triples: Vec<Triple>) -> Self {
		Self { triples }
	}
}

impl FromIterator<Triple> for Pattern {
	fn from_iter<I: IntoIterator<Item = Triple>>(iter: I) -> Self {
		Self {
			triples: iter.into_iter().collect(),
		}
	}
}

impl IntoIterator for Pattern {
	type Item = Triple;
	type IntoIter = std::vec::IntoIter<Triple>;

	fn into_iter(self) -> Self::IntoIter {
		self.triples.into_iter()
	}
}

impl<'a> IntoIterator for &'a Pattern {
	type Item = &'a Triple;
	type IntoIter = std::slice::Iter<'a, Triple>;

	fn into_iter(self) -> Self::IntoIter {
		self.triples.iter()
	}
}

impl fmt::Display for Pattern {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		for rdf_types::Triple(s, p, o) in &self.triples {
			writeln!(f, "{s} {p} {o} .")?;
		}

		Ok(())
	}
}

/// Iterator over the distinct terms of a pattern.
pub struct Terms<'a> {
	triples: std::slice::Iter<'a, Triple>,
	current: Option<&'a Triple>,
	position: usize,
	visited: HashSet<&'a Term>,
}

impl<'a> Iterator for Terms<'a> {
	type Item = &'a Term;

	fn next(&mut self) -> Option<Self::Item> {
		loop {
			match self.current {
				Some(triple) if self.position < Position::ALL.len() => {
					let term = Position::ALL[self.position].get(triple);
					self.position += 1;
					if self.visited.insert(term) {
						break Some(term);
					}
				}
				_ => {
					self.current = Some(self.triples.next()?);
					self.position = 0;
				}
			}
		}
	}
}
