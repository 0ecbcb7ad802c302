//! Interpretation map.
use indexmap::IndexMap;
use tabrdf_core::{NativeElement, Term, Translator, Triple};

use crate::{
	role::{Join, Role, RoleKind},
	Error,
};

/// Outcome of a merge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Merge {
	Changed,
	Unchanged,
}

impl Merge {
	pub fn is_changed(&self) -> bool {
		matches!(self, Self::Changed)
	}
}

/// Interpretation map, assigning a role to each term of a pattern.
///
/// Roles are only ever refined: once a term holds a role, it can only be
/// replaced by a role specializing it, or absorbed into a join.
///
/// Terms are iterated in the order they were first classified. Two
/// interpretations are equal if they assign the same roles to the same terms,
/// whatever the order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Interpretation {
	roles: IndexMap<Term, Role>,
}

impl Interpretation {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn len(&self) -> usize {
		self.roles.len()
	}

	pub fn is_empty(&self) -> bool {
		self.roles.is_empty()
	}

	pub fn get(&self, term: &Term) -> Option<&Role> {
		self.roles.get(term)
	}

	pub fn kind_of(&self, term: &Term) -> Option<RoleKind> {
		self.roles.get(term).map(Role::kind)
	}

	pub fn contains(&self, term: &Term) -> bool {
		self.roles.contains_key(term)
	}

	pub fn iter(&self) -> indexmap::map::Iter<Term, Role> {
		self.roles.iter()
	}

	/// Projects the interpretation on role kinds, forgetting justifications
	/// and joins.
	pub fn kinds(&self) -> IndexMap<Term, RoleKind> {
		self.roles
			.iter()
			.map(|(term, role)| (term.clone(), role.kind()))
			.collect()
	}

	/// Checks if some term still holds a positional role.
	pub fn is_ambiguous(&self) -> bool {
		self.roles.values().any(|role| role.kind().is_generic())
	}

	/// Element of the tabular resource denoted by the given term.
	///
	/// Returns `None` if the term is not classified, is a variable or holds a
	/// role not denoting any particular element (positional roles, values).
	pub fn native(&self, translator: &Translator, term: &Term) -> Option<NativeElement> {
		match self.kind_of(term)? {
			RoleKind::ContainerTable => translator
				.table_name(term)
				.map(|name| NativeElement::Table(name.to_owned())),
			RoleKind::ContainerRow => translator.row_index(term).map(NativeElement::Row),
			RoleKind::SlotColumn => translator
				.column_name(term)
				.map(|name| NativeElement::Column(name.to_owned())),
			RoleKind::SlotRow => translator.row_ordinal(term).map(NativeElement::Ordinal),
			RoleKind::TypeTable => translator
				.type_table(term)
				.map(|name| NativeElement::TableType(name.to_owned())),
			RoleKind::FacadeRoot => translator.is_root(term).then_some(NativeElement::Root),
			RoleKind::TypeProperty => translator
				.is_type_property(term)
				.then_some(NativeElement::TypeProperty),
			RoleKind::SlotValue | RoleKind::Subject | RoleKind::Predicate | RoleKind::Object => {
				None
			}
		}
	}

	/// Merges a role proposed for `term` by `triple` into the interpretation.
	pub fn merge(&mut self, term: &Term, proposed: RoleKind, triple: &Triple) -> Result<Merge, Error> {
		let existing = match self.roles.get_mut(term) {
			Some(existing) => existing,
			None => {
				log::trace!("{term}: {proposed}");
				let mut role = Role::new(proposed, triple.clone());
				role.normalize(term);
				self.roles.insert(term.clone(), role);
				return Ok(Merge::Changed);
			}
		};

		if existing.contains(proposed) {
			existing.justify(term, triple);
			return Ok(Merge::Unchanged);
		}

		if existing.inconsistent_with().contains(proposed)
			|| proposed.inconsistent_with().contains(existing.kind())
		{
			return Err(Error::TypeConflict {
				term: term.clone(),
				existing: existing.kind(),
				proposed,
			});
		}

		if existing.specializes().contains(proposed) {
			existing.justify(term, triple);
			return Ok(Merge::Unchanged);
		}

		if proposed.specializes().contains(existing.kind()) {
			log::trace!("{term}: {} refined into {proposed}", existing.kind());
			existing.specialize(term, proposed);
			existing.justify(term, triple);
			return Ok(Merge::Changed);
		}

		if term.is_ground() {
			return Err(Error::TypeConflict {
				term: term.clone(),
				existing: existing.kind(),
				proposed,
			});
		}

		match Join::combine(existing, &Role::new(proposed, triple.clone())) {
			Some(join) => {
				log::trace!("{term}: {join}");
				*existing = Role::Join(join);
				existing.normalize(term);
				Ok(Merge::Changed)
			}
			None => Err(Error::JoinConflict {
				term: term.clone(),
				existing: existing.kind(),
				proposed,
			}),
		}
	}

	/// Replaces the role of `term` by a more specific kind.
	///
	/// Returns the previous kind, or `None` if the term is not classified.
	/// The caller is responsible for checking that `kind` specializes the
	/// current role.
	pub(crate) fn specialize(&mut self, term: &Term, kind: RoleKind) -> Option<RoleKind> {
		let role = self.roles.get_mut(term)?;
		let previous = role.kind();
		role.specialize(term, kind);
		Some(previous)
	}
}

impl<'a> IntoIterator for &'a Interpretation {
	type Item = (&'a Term, &'a Role);
	type IntoIter = indexmap::map::Iter<'a, Term, Role>;

	fn into_iter(self) -> Self::IntoIter {
		self.roles.iter()
	}
}

#[cfg(test)]
mod tests {
	use tabrdf_core::{pattern, term, Pattern};

	use super::*;

	fn pattern() -> Pattern {
		pattern! [
			?x <"http://example.org/p"> ?y .
			?z <"http://example.org/q"> ?x .
			<"http://example.org/people"> <"http://example.org/p"> ?x .
		]
	}

	#[test]
	fn install() {
		let p = pattern();
		let mut i = Interpretation::new();
		let x = term!(?x);
		assert_eq!(
			i.merge(&x, RoleKind::Subject, &p.triples()[0]).unwrap(),
			Merge::Changed
		);
		assert_eq!(i.kind_of(&x), Some(RoleKind::Subject));
	}

	#[test]
	fn idempotent() {
		let p = pattern();
		let mut i = Interpretation::new();
		let x = term!(?x);
		i.merge(&x, RoleKind::ContainerRow, &p.triples()[0]).unwrap();
		let before = i.clone();
		assert_eq!(
			i.merge(&x, RoleKind::ContainerRow, &p.triples()[0]).unwrap(),
			Merge::Unchanged
		);
		assert_eq!(i, before)
	}

	#[test]
	fn refinement() {
		let p = pattern();
		let mut i = Interpretation::new();
		let x = term!(?x);
		i.merge(&x, RoleKind::Subject, &p.triples()[0]).unwrap();
		assert!(i
			.merge(&x, RoleKind::ContainerTable, &p.triples()[0])
			.unwrap()
			.is_changed());
		assert_eq!(i.kind_of(&x), Some(RoleKind::ContainerTable));

		// Generalizations are absorbed.
		assert!(!i
			.merge(&x, RoleKind::Subject, &p.triples()[1])
			.unwrap()
			.is_changed());
		assert_eq!(i.kind_of(&x), Some(RoleKind::ContainerTable));
		assert_eq!(i.get(&x).unwrap().triples().len(), 2);
	}

	#[test]
	fn join() {
		let p = pattern();
		let mut i = Interpretation::new();
		let x = term!(?x);
		i.merge(&x, RoleKind::Subject, &p.triples()[0]).unwrap();
		assert!(i
			.merge(&x, RoleKind::Object, &p.triples()[1])
			.unwrap()
			.is_changed());

		let role = i.get(&x).unwrap();
		assert!(role.is_join());
		assert_eq!(role.kind(), RoleKind::ContainerRow);

		// Already absorbed.
		assert!(!i
			.merge(&x, RoleKind::Object, &p.triples()[2])
			.unwrap()
			.is_changed());
		assert!(!i
			.merge(&x, RoleKind::ContainerRow, &p.triples()[2])
			.unwrap()
			.is_changed());
	}

	#[test]
	fn type_conflict() {
		let p = pattern();
		let mut i = Interpretation::new();
		let x = term!(?x);
		i.merge(&x, RoleKind::ContainerTable, &p.triples()[0]).unwrap();
		assert_eq!(
			i.merge(&x, RoleKind::SlotValue, &p.triples()[1]),
			Err(Error::TypeConflict {
				term: x,
				existing: RoleKind::ContainerTable,
				proposed: RoleKind::SlotValue
			})
		)
	}

	#[test]
	fn ground_terms_do_not_join() {
		let p = pattern();
		let mut i = Interpretation::new();
		let people = term!(<"http://example.org/people">);
		i.merge(&people, RoleKind::Subject, &p.triples()[2]).unwrap();
		assert!(matches!(
			i.merge(&people, RoleKind::Object, &p.triples()[2]),
			Err(Error::TypeConflict { .. })
		))
	}

	#[test]
	fn native_elements() {
		let p = pattern();
		let translator = Translator::new(tabrdf_core::Namespaces {
			data: "http://example.org/".to_owned(),
			..Default::default()
		});
		let mut i = Interpretation::new();
		let people = term!(<"http://example.org/people">);
		i.merge(&people, RoleKind::ContainerTable, &p.triples()[2])
			.unwrap();
		assert_eq!(
			i.native(&translator, &people),
			Some(NativeElement::Table("people".to_owned()))
		);
		assert_eq!(i.native(&translator, &term!(?x)), None);
	}
}
