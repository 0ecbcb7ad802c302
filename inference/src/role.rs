//! Role lattice.
//!
//! Every term of a pattern is assigned a role describing which element of
//! the tabular resource it stands for. Roles are ordered by specialization:
//! the generic positional roles ([`RoleKind::Subject`],
//! [`RoleKind::Predicate`], [`RoleKind::Object`]) are refined by the
//! structural roles (tables, rows, slots, types).
use std::fmt;

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use tabrdf_core::{Position, Term, Triple};

pub mod join;

pub use join::Join;

/// Role kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RoleKind {
	/// Unresolved subject.
	Subject,

	/// Unresolved predicate.
	Predicate,

	/// Unresolved object.
	Object,

	/// Table.
	ContainerTable,

	/// Table row.
	ContainerRow,

	/// Column predicate, linking a row to a cell value.
	SlotColumn,

	/// Ordinal predicate, linking a table to one of its rows.
	SlotRow,

	/// Cell value.
	SlotValue,

	/// Canonical "is-a" predicate.
	TypeProperty,

	/// Type of the rows of a table.
	TypeTable,

	/// Reserved root marker.
	FacadeRoot,
}

impl RoleKind {
	pub const ALL: [Self; 11] = [
		Self::Subject,
		Self::Predicate,
		Self::Object,
		Self::ContainerTable,
		Self::ContainerRow,
		Self::SlotColumn,
		Self::SlotRow,
		Self::SlotValue,
		Self::TypeProperty,
		Self::TypeTable,
		Self::FacadeRoot,
	];

	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Subject => "Subject",
			Self::Predicate => "Predicate",
			Self::Object => "Object",
			Self::ContainerTable => "ContainerTable",
			Self::ContainerRow => "ContainerRow",
			Self::SlotColumn => "SlotColumn",
			Self::SlotRow => "SlotRow",
			Self::SlotValue => "SlotValue",
			Self::TypeProperty => "TypeProperty",
			Self::TypeTable => "TypeTable",
			Self::FacadeRoot => "FacadeRoot",
		}
	}

	/// Positional role of the given position.
	pub fn generic(position: Position) -> Self {
		match position {
			Position::Subject => Self::Subject,
			Position::Predicate => Self::Predicate,
			Position::Object => Self::Object,
		}
	}

	/// Checks if this kind is, or refines, the given kind.
	pub fn covers(&self, other: Self) -> bool {
		*self == other || self.specializes().contains(other)
	}

	/// Checks if this is one of the positional roles.
	pub fn is_generic(&self) -> bool {
		matches!(self, Self::Subject | Self::Predicate | Self::Object)
	}

	/// Triple positions a term with this role can occupy.
	pub fn positions(&self) -> &'static [Position] {
		match self {
			Self::Subject | Self::ContainerTable => &[Position::Subject],
			Self::Predicate | Self::SlotColumn | Self::SlotRow | Self::TypeProperty => {
				&[Position::Predicate]
			}
			Self::Object | Self::SlotValue | Self::TypeTable | Self::FacadeRoot => {
				&[Position::Object]
			}
			Self::ContainerRow => &[Position::Subject, Position::Object],
		}
	}

	/// Kinds refined by this kind.
	pub fn specializes(&self) -> KindSet {
		match self {
			Self::Subject | Self::Predicate | Self::Object => KindSet::EMPTY,
			Self::ContainerTable => KindSet::from([Self::Subject]),
			Self::ContainerRow => KindSet::from([Self::Subject, Self::Object]),
			Self::SlotColumn | Self::SlotRow | Self::TypeProperty => {
				KindSet::from([Self::Predicate])
			}
			Self::SlotValue | Self::TypeTable | Self::FacadeRoot => KindSet::from([Self::Object]),
		}
	}

	/// Kinds that can never be held by the same term as this kind.
	///
	/// Two kinds are inconsistent when no triple position accepts both.
	/// Kinds sharing a position may still be incompatible, which is decided
	/// by the [join resolver](join::resolve).
	pub fn inconsistent_with(&self) -> KindSet {
		Self::ALL
			.into_iter()
			.filter(|other| self.excludes(other))
			.collect()
	}

	fn excludes(&self, other: &Self) -> bool {
		if self == other {
			return false;
		}

		match (self.is_generic(), other.is_generic()) {
			// Subjects and objects meet on rows.
			(true, true) => *self == Self::Predicate || *other == Self::Predicate,
			_ => !self
				.positions()
				.iter()
				.any(|p| other.positions().contains(p)),
		}
	}
}

impl fmt::Display for RoleKind {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Set of role kinds.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct KindSet(u16);

impl KindSet {
	pub const EMPTY: Self = Self(0);

	fn bit(kind: RoleKind) -> u16 {
		1 << kind as u16
	}

	pub fn is_empty(&self) -> bool {
		self.0 == 0
	}

	pub fn len(&self) -> usize {
		self.0.count_ones() as usize
	}

	pub fn contains(&self, kind: RoleKind) -> bool {
		self.0 & Self::bit(kind) != 0
	}

	pub fn insert(&mut self, kind: RoleKind) -> bool {
		let inserted = !self.contains(kind);
		self.0 |= Self::bit(kind);
		inserted
	}

	pub fn union(self, other: Self) -> Self {
		Self(self.0 | other.0)
	}

	pub fn iter(&self) -> impl '_ + Iterator<Item = RoleKind> {
		RoleKind::ALL.into_iter().filter(|k| self.contains(*k))
	}
}

impl<const N: usize> From<[RoleKind; N]> for KindSet {
	fn from(kinds: [RoleKind; N]) -> Self {
		kinds.into_iter().collect()
	}
}

impl FromIterator<RoleKind> for KindSet {
	fn from_iter<I: IntoIterator<Item = RoleKind>>(iter: I) -> Self {
		let mut set = Self::EMPTY;
		for kind in iter {
			set.insert(kind);
		}
		set
	}
}

impl fmt::Display for KindSet {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "{{")?;
		for (i, kind) in self.iter().enumerate() {
			if i > 0 {
				write!(f, ", ")?;
			}
			write!(f, "{kind}")?;
		}
		write!(f, "}}")
	}
}

/// Triples justifying a role.
pub type Justification = IndexSet<Triple>;

/// Role of a term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Role {
	/// Role of a single kind.
	Single(RoleKind, Justification),

	/// Combination of compatible roles.
	Join(Join),
}

impl Role {
	pub fn new(kind: RoleKind, triple: Triple) -> Self {
		Self::Single(kind, std::iter::once(triple).collect())
	}

	/// Role kind.
	///
	/// For joins, this is the kind the combined roles resolve to.
	pub fn kind(&self) -> RoleKind {
		match self {
			Self::Single(kind, _) => *kind,
			Self::Join(join) => join.kind(),
		}
	}

	pub fn is_join(&self) -> bool {
		matches!(self, Self::Join(_))
	}

	pub fn as_join(&self) -> Option<&Join> {
		match self {
			Self::Join(join) => Some(join),
			_ => None,
		}
	}

	/// Triples that justified this role.
	pub fn triples(&self) -> &Justification {
		match self {
			Self::Single(_, triples) => triples,
			Self::Join(join) => join.triples(),
		}
	}

	/// Kinds combined into this role.
	pub fn constituents(&self) -> KindSet {
		match self {
			Self::Single(kind, _) => KindSet::from([*kind]),
			Self::Join(join) => join.constituents(),
		}
	}

	/// Checks if this role already accounts for the given kind.
	pub fn contains(&self, kind: RoleKind) -> bool {
		self.kind() == kind || self.constituents().contains(kind)
	}

	pub fn specializes(&self) -> KindSet {
		match self {
			Self::Single(kind, _) => kind.specializes(),
			Self::Join(join) => join.specializes(),
		}
	}

	pub fn inconsistent_with(&self) -> KindSet {
		match self {
			Self::Single(kind, _) => kind.inconsistent_with(),
			Self::Join(join) => join.inconsistent_with(),
		}
	}

	fn triples_mut(&mut self) -> &mut Justification {
		match self {
			Self::Single(_, triples) => triples,
			Self::Join(join) => &mut join.triples,
		}
	}

	/// Records another triple justifying the role of `term`.
	pub fn justify(&mut self, term: &Term, triple: &Triple) {
		let triples = self.triples_mut();
		if !triples.contains(triple) {
			triples.insert(triple.clone());
			self.normalize(term)
		}
	}

	/// Replaces the role of `term` by a more specific kind, keeping its
	/// justification.
	pub(crate) fn specialize(&mut self, term: &Term, kind: RoleKind) {
		let triples = std::mem::take(self.triples_mut());
		*self = Self::Single(kind, triples);
		self.normalize(term)
	}

	/// Puts the role of `term` in normal form.
	///
	/// The role is a join exactly when `term` occupies more than one position
	/// in the justifying triples and the role kind covers each of them. The
	/// constituents are then the positional roles of those positions. The
	/// normal form only depends on the kind and the justification.
	pub(crate) fn normalize(&mut self, term: &Term) {
		let kind = self.kind();
		let positions = positional_kinds(term, self.triples());
		let triples = std::mem::take(self.triples_mut());

		*self = if positions.len() > 1 && positions.iter().all(|p| kind.covers(p)) {
			Self::Join(Join::new(kind, positions, triples))
		} else {
			Self::Single(kind, triples)
		}
	}
}

/// Positional roles of the positions `term` occupies in `triples`.
fn positional_kinds<'a>(term: &Term, triples: impl IntoIterator<Item = &'a Triple>) -> KindSet {
	let mut kinds = KindSet::EMPTY;
	for triple in triples {
		for position in Position::ALL {
			if position.get(triple) == term {
				kinds.insert(RoleKind::generic(position));
			}
		}
	}

	kinds
}

impl fmt::Display for Role {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			Self::Single(kind, _) => write!(f, "{kind}"),
			Self::Join(join) => write!(f, "{join}"),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn inconsistency_is_symmetric() {
		for a in RoleKind::ALL {
			for b in RoleKind::ALL {
				assert_eq!(
					a.inconsistent_with().contains(b),
					b.inconsistent_with().contains(a),
					"{a} / {b}"
				)
			}
		}
	}

	#[test]
	fn specialization_is_consistent() {
		for a in RoleKind::ALL {
			assert!(!a.inconsistent_with().contains(a));
			for b in a.specializes().iter() {
				assert!(!a.inconsistent_with().contains(b), "{a} / {b}");
				assert!(b.is_generic());
				assert!(!b.specializes().contains(a))
			}
		}
	}

	#[test]
	fn positional_exclusion() {
		assert!(RoleKind::ContainerTable
			.inconsistent_with()
			.contains(RoleKind::SlotValue));
		assert!(RoleKind::ContainerTable
			.inconsistent_with()
			.contains(RoleKind::Object));
		assert!(RoleKind::SlotColumn
			.inconsistent_with()
			.contains(RoleKind::ContainerRow));
		assert!(RoleKind::Predicate
			.inconsistent_with()
			.contains(RoleKind::Subject));

		// Same position, left to the join resolver.
		assert!(!RoleKind::ContainerTable
			.inconsistent_with()
			.contains(RoleKind::ContainerRow));
		assert!(!RoleKind::SlotColumn
			.inconsistent_with()
			.contains(RoleKind::SlotRow));
		assert!(!RoleKind::ContainerRow
			.inconsistent_with()
			.contains(RoleKind::Object));
		assert!(!RoleKind::Subject
			.inconsistent_with()
			.contains(RoleKind::Object));
	}

	#[test]
	fn normal_form() {
		let p = tabrdf_core::pattern! [
			?x <"http://example.org/p"> ?y .
			?z <"http://example.org/q"> ?x .
		];
		let x = Term::var("x");

		let mut a = Role::new(RoleKind::ContainerRow, p.triples()[0].clone());
		a.normalize(&x);
		assert!(!a.is_join());
		a.justify(&x, &p.triples()[1]);
		assert!(a.is_join());
		assert_eq!(
			a.constituents(),
			KindSet::from([RoleKind::Subject, RoleKind::Object])
		);

		let mut b = Role::new(RoleKind::Object, p.triples()[1].clone());
		b.justify(&x, &p.triples()[0]);
		assert!(!b.is_join());
		b.specialize(&x, RoleKind::ContainerRow);
		assert_eq!(a, b)
	}

	#[test]
	fn kind_set() {
		let mut set = KindSet::from([RoleKind::Subject, RoleKind::Object]);
		assert_eq!(set.len(), 2);
		assert!(!set.insert(RoleKind::Subject));
		assert!(set.insert(RoleKind::ContainerRow));
		assert_eq!(
			set.iter().collect::<Vec<_>>(),
			vec![RoleKind::Subject, RoleKind::Object, RoleKind::ContainerRow]
		);
		assert_eq!(set.to_string(), "{Subject, Object, ContainerRow}")
	}
}
