//! Local inference rules.
//!
//! Each rule looks at a single triple and proposes a role for one of its
//! terms, given what is already known about the two others. Subject and
//! predicate constants are classified by their shape only. An object constant
//! is a value or a row when its predicate is a known slot, and is otherwise
//! classified by its shape.
use tabrdf_core::{Position, Term, Translator, Triple};

use crate::{Error, Interpretation, RoleKind};

/// Role proposed by a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Proposal {
	/// The term should have this role.
	Role(RoleKind),

	/// The term is a named constant matching no naming pattern, unless
	/// something else is learned about its neighbors.
	Unresolved,
}

/// Runs the rule of the given position.
pub fn infer(
	translator: &Translator,
	interpretation: &Interpretation,
	position: Position,
	triple: &Triple,
) -> Result<Proposal, Error> {
	match position {
		Position::Subject => infer_subject(translator, interpretation, triple),
		Position::Predicate => infer_predicate(translator, interpretation, triple),
		Position::Object => infer_object(translator, interpretation, triple),
	}
}

pub fn infer_subject(
	translator: &Translator,
	interpretation: &Interpretation,
	triple: &Triple,
) -> Result<Proposal, Error> {
	let rdf_types::Triple(s, p, o) = triple;

	match s {
		Term::Iri(_) => {
			return if translator.table_name(s).is_some() {
				Ok(Proposal::Role(RoleKind::ContainerTable))
			} else {
				Err(Error::UnknownEntity(s.clone()))
			}
		}
		Term::Literal(_) => return Err(Error::UnknownEntity(s.clone())),
		Term::Blank(_) | Term::Var(_) => (),
	}

	let p = interpretation.kind_of(p);
	let o = interpretation.kind_of(o);

	let kind = if o == Some(RoleKind::FacadeRoot)
		|| p == Some(RoleKind::SlotRow)
		|| o == Some(RoleKind::ContainerRow)
	{
		RoleKind::ContainerTable
	} else if p == Some(RoleKind::SlotColumn)
		|| o == Some(RoleKind::TypeTable)
		|| o == Some(RoleKind::SlotValue)
		|| translator.row_index(s).is_some()
	{
		RoleKind::ContainerRow
	} else {
		RoleKind::Subject
	};

	Ok(Proposal::Role(kind))
}

pub fn infer_predicate(
	translator: &Translator,
	interpretation: &Interpretation,
	triple: &Triple,
) -> Result<Proposal, Error> {
	let rdf_types::Triple(_, p, o) = triple;

	match p {
		Term::Iri(_) => {
			let kind = if translator.row_ordinal(p).is_some() {
				RoleKind::SlotRow
			} else if translator.is_type_property(p) {
				RoleKind::TypeProperty
			} else if translator.column_name(p).is_some() {
				RoleKind::SlotColumn
			} else {
				return Err(Error::UnknownEntity(p.clone()));
			};

			Ok(Proposal::Role(kind))
		}
		Term::Blank(_) | Term::Literal(_) => Err(Error::UnknownEntity(p.clone())),
		Term::Var(_) => {
			let kind = match interpretation.kind_of(o) {
				Some(RoleKind::SlotValue) => RoleKind::SlotColumn,
				Some(RoleKind::TypeTable | RoleKind::FacadeRoot) => RoleKind::TypeProperty,
				Some(RoleKind::ContainerRow) => RoleKind::SlotRow,
				_ => RoleKind::Predicate,
			};

			Ok(Proposal::Role(kind))
		}
	}
}

pub fn infer_object(
	translator: &Translator,
	interpretation: &Interpretation,
	triple: &Triple,
) -> Result<Proposal, Error> {
	let rdf_types::Triple(_, p, o) = triple;
	let p = interpretation.kind_of(p);

	let kind = match o {
		Term::Literal(_) => RoleKind::SlotValue,
		Term::Iri(_) => match p {
			// IRI-valued cell.
			Some(RoleKind::SlotColumn) => RoleKind::SlotValue,
			Some(RoleKind::SlotRow) => RoleKind::ContainerRow,
			_ if translator.is_root(o) => RoleKind::FacadeRoot,
			_ if translator.type_table(o).is_some() => RoleKind::TypeTable,
			_ => return Ok(Proposal::Unresolved),
		},
		Term::Blank(_) | Term::Var(_) => match p {
			Some(RoleKind::SlotColumn) => RoleKind::SlotValue,
			Some(RoleKind::SlotRow) => RoleKind::ContainerRow,
			_ if translator.row_index(o).is_some() => RoleKind::ContainerRow,
			_ => RoleKind::Object,
		},
	};

	Ok(Proposal::Role(kind))
}

#[cfg(test)]
mod tests {
	use tabrdf_core::{pattern, term, Namespaces, Pattern};

	use super::*;

	fn translator() -> Translator {
		Translator::new(Namespaces {
			data: "http://example.org/".to_owned(),
			columns: "http://example.org/".to_owned(),
			types: "http://example.org/type/".to_owned(),
			..Default::default()
		})
	}

	fn role(kind: RoleKind) -> Result<Proposal, Error> {
		Ok(Proposal::Role(kind))
	}

	#[test]
	fn intrinsic_roles() {
		let t = translator();
		let i = Interpretation::new();
		let p: Pattern = pattern! [
			<"http://example.org/people"> <"http://www.w3.org/1999/02/22-rdf-syntax-ns#_1"> _:"http://example.org/people/1" .
			?row <"http://www.w3.org/1999/02/22-rdf-syntax-ns#type"> <"http://example.org/type/people"> .
			?row <"http://example.org/name"> "Ann" .
		];

		assert_eq!(infer_subject(&t, &i, &p.triples()[0]), role(RoleKind::ContainerTable));
		assert_eq!(infer_predicate(&t, &i, &p.triples()[0]), role(RoleKind::SlotRow));
		assert_eq!(infer_object(&t, &i, &p.triples()[0]), role(RoleKind::ContainerRow));
		assert_eq!(infer_subject(&t, &i, &p.triples()[1]), role(RoleKind::Subject));
		assert_eq!(infer_predicate(&t, &i, &p.triples()[1]), role(RoleKind::TypeProperty));
		assert_eq!(infer_object(&t, &i, &p.triples()[1]), role(RoleKind::TypeTable));
		assert_eq!(infer_predicate(&t, &i, &p.triples()[2]), role(RoleKind::SlotColumn));
		assert_eq!(infer_object(&t, &i, &p.triples()[2]), role(RoleKind::SlotValue));
	}

	#[test]
	fn neighbor_roles() {
		let t = translator();
		let mut i = Interpretation::new();
		let p: Pattern = pattern! [
			?row ?column ?value .
		];
		let triple = &p.triples()[0];

		assert_eq!(infer_subject(&t, &i, triple), role(RoleKind::Subject));
		assert_eq!(infer_predicate(&t, &i, triple), role(RoleKind::Predicate));
		assert_eq!(infer_object(&t, &i, triple), role(RoleKind::Object));

		i.merge(&term!(?value), RoleKind::SlotValue, triple).unwrap();
		assert_eq!(infer_subject(&t, &i, triple), role(RoleKind::ContainerRow));
		assert_eq!(infer_predicate(&t, &i, triple), role(RoleKind::SlotColumn));
	}

	#[test]
	fn slot_objects() {
		let t = translator();
		let mut i = Interpretation::new();
		let p: Pattern = pattern! [
			?row ?column <"http://example.org/type/people"> .
		];
		let triple = &p.triples()[0];

		assert_eq!(infer_object(&t, &i, triple), role(RoleKind::TypeTable));

		i.merge(&term!(?column), RoleKind::SlotColumn, triple).unwrap();
		assert_eq!(infer_object(&t, &i, triple), role(RoleKind::SlotValue));
	}

	#[test]
	fn unknown_entities() {
		let t = translator();
		let i = Interpretation::new();
		let p: Pattern = pattern! [
			<"http://other.org/people"> <"http://other.org/name"> <"http://other.org/ann"> .
			?row _:"b0" "Ann" .
		];

		assert_eq!(
			infer_subject(&t, &i, &p.triples()[0]),
			Err(Error::UnknownEntity(term!(<"http://other.org/people">)))
		);
		assert_eq!(
			infer_predicate(&t, &i, &p.triples()[0]),
			Err(Error::UnknownEntity(term!(<"http://other.org/name">)))
		);
		assert_eq!(infer_object(&t, &i, &p.triples()[0]), Ok(Proposal::Unresolved));
		assert_eq!(
			infer_predicate(&t, &i, &p.triples()[1]),
			Err(Error::UnknownEntity(term!(_:"b0")))
		);
	}
}
