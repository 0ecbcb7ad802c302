//! Join resolver.
//!
//! Two roles proposed for the same variable (or anonymous constant) that
//! neither conflict nor specialize one another may still be compatible: a
//! variable used both as a subject and as an object can only be a table row.
//! The combination table below lists every compatible pair.
use std::fmt;

use super::{Justification, KindSet, Role, RoleKind};

/// Resolves the kind of the combination of two role kinds.
///
/// Returns `None` if the kinds cannot be combined. The resolution is
/// commutative.
pub fn resolve(a: RoleKind, b: RoleKind) -> Option<RoleKind> {
	use RoleKind::*;

	if a == b {
		return Some(a);
	}

	match (a.min(b), a.max(b)) {
		(Subject, Object) => Some(ContainerRow),
		(Object, ContainerRow) => Some(ContainerRow),
		(Subject, ContainerRow) => Some(ContainerRow),
		(Predicate, SlotRow) => Some(SlotRow),
		(Predicate, SlotColumn) => Some(SlotColumn),
		(Predicate, TypeProperty) => Some(TypeProperty),
		(Subject, ContainerTable) => Some(ContainerTable),
		(Object, TypeTable) => Some(TypeTable),
		(Object, SlotValue) => Some(SlotValue),
		(Object, FacadeRoot) => Some(FacadeRoot),
		_ => None,
	}
}

/// Combination of roles assigned to the same term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Join {
	kind: RoleKind,
	constituents: KindSet,
	pub(super) triples: Justification,
}

impl Join {
	pub(super) fn new(kind: RoleKind, constituents: KindSet, triples: Justification) -> Self {
		Self {
			kind,
			constituents,
			triples,
		}
	}

	/// Combines two roles.
	///
	/// When one of the roles is already a join, the other is absorbed into
	/// it instead of being wrapped again. Returns `None` if the roles cannot
	/// be combined.
	pub fn combine(a: &Role, b: &Role) -> Option<Self> {
		Some(Self {
			kind: resolve(a.kind(), b.kind())?,
			constituents: a.constituents().union(b.constituents()),
			triples: a.triples().union(b.triples()).cloned().collect(),
		})
	}

	/// Kind the combined roles resolve to.
	pub fn kind(&self) -> RoleKind {
		self.kind
	}

	/// Combined kinds.
	pub fn constituents(&self) -> KindSet {
		self.constituents
	}

	pub fn triples(&self) -> &Justification {
		&self.triples
	}

	pub fn specializes(&self) -> KindSet {
		self.constituents
			.iter()
			.chain(Some(self.kind))
			.fold(KindSet::EMPTY, |set, kind| set.union(kind.specializes()))
	}

	pub fn inconsistent_with(&self) -> KindSet {
		self.constituents
			.iter()
			.chain(Some(self.kind))
			.fold(KindSet::EMPTY, |set, kind| {
				set.union(kind.inconsistent_with())
			})
	}
}

impl fmt::Display for Join {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "Join{}: {}", self.constituents, self.kind)
	}
}
