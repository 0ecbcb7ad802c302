//! Naming translator.
//!
//! Maps the native naming scheme of a tabular resource (tables, rows,
//! columns, row ordinals) to the terms a graph pattern uses to refer to them,
//! and back.
//!
//! Given a table `people` and the default namespaces:
//! - the table itself is `<http://sparql.xyz/facade-x/data/people>`,
//! - its type is `<http://sparql.xyz/facade-x/type/people>`,
//! - its third row is `_:http://sparql.xyz/facade-x/data/people/3`,
//! - the row is linked to the table by `rdf:_3`,
//! - the `name` column is `<http://sparql.xyz/facade-x/data/name>`.
use std::fmt;

use iref::IriBuf;
use serde::{Deserialize, Serialize};

use crate::Term;

pub const DEFAULT_DATA_NAMESPACE: &str = "http://sparql.xyz/facade-x/data/";
pub const DEFAULT_TYPE_NAMESPACE: &str = "http://sparql.xyz/facade-x/type/";
pub const DEFAULT_ROOT: &str = "http://sparql.xyz/facade-x/ns/root";
pub const RDF_ORDINAL_NAMESPACE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#_";
pub const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";

/// Path separator between a table name and a row index.
pub const PATH_SEPARATOR: char = '/';

/// Namespace configuration of a tabular resource.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct Namespaces {
	/// Prefix of table and row names.
	pub data: String,

	/// Prefix of column predicates.
	pub columns: String,

	/// Prefix of table type names.
	pub types: String,

	/// Reserved root marker.
	pub root: String,

	/// Prefix of the row ordinal predicates.
	pub ordinals: String,

	/// Canonical "is-a" predicate.
	pub type_property: String,
}

impl Default for Namespaces {
	fn default() -> Self {
		Self {
			data: DEFAULT_DATA_NAMESPACE.to_owned(),
			columns: DEFAULT_DATA_NAMESPACE.to_owned(),
			types: DEFAULT_TYPE_NAMESPACE.to_owned(),
			root: DEFAULT_ROOT.to_owned(),
			ordinals: RDF_ORDINAL_NAMESPACE.to_owned(),
			type_property: RDF_TYPE.to_owned(),
		}
	}
}

/// Row of a table.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RowIndex {
	pub table: String,
	pub index: u64,
}

impl RowIndex {
	pub fn new(table: impl Into<String>, index: u64) -> Self {
		Self {
			table: table.into(),
			index,
		}
	}
}

impl fmt::Display for RowIndex {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "{}{PATH_SEPARATOR}{}", self.table, self.index)
	}
}

/// Element of the tabular resource denoted by a classified term.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NativeElement {
	Root,
	Table(String),
	TableType(String),
	Row(RowIndex),
	Column(String),
	Ordinal(u64),
	TypeProperty,
}

impl fmt::Display for NativeElement {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			Self::Root => write!(f, "root"),
			Self::Table(name) => write!(f, "table `{name}`"),
			Self::TableType(name) => write!(f, "type of table `{name}`"),
			Self::Row(row) => write!(f, "row `{row}`"),
			Self::Column(name) => write!(f, "column `{name}`"),
			Self::Ordinal(n) => write!(f, "row ordinal {n}"),
			Self::TypeProperty => write!(f, "type property"),
		}
	}
}

/// Naming translator.
///
/// Every function is total: when a term does not follow the expected naming
/// pattern, `None` (or `false`) is returned.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Translator {
	namespaces: Namespaces,
}

impl Translator {
	pub fn new(namespaces: Namespaces) -> Self {
		Self { namespaces }
	}

	pub fn namespaces(&self) -> &Namespaces {
		&self.namespaces
	}

	/// Returns the name of the table denoted by the given term, if any.
	///
	/// Tables are named constants directly under the data namespace.
	pub fn table_name<'t>(&self, term: &'t Term) -> Option<&'t str> {
		let name = term.as_iri()?.strip_prefix(self.namespaces.data.as_str())?;
		(!name.is_empty() && !name.contains(PATH_SEPARATOR)).then_some(name)
	}

	/// Returns the row denoted by the given term, if any.
	///
	/// Rows are anonymous constants labeled by the data namespace followed by
	/// the table name and the row index, separated by a path separator.
	pub fn row_index(&self, term: &Term) -> Option<RowIndex> {
		let path = term.as_blank()?.strip_prefix(self.namespaces.data.as_str())?;
		let (table, index) = path.split_once(PATH_SEPARATOR)?;
		if table.is_empty() || !is_decimal(index) {
			return None;
		}

		Some(RowIndex::new(table, index.parse().ok()?))
	}

	/// Returns the ordinal of the given row ordinal predicate, if any.
	///
	/// Ordinals start at 1.
	pub fn row_ordinal(&self, term: &Term) -> Option<u64> {
		let suffix = term.as_iri()?.strip_prefix(self.namespaces.ordinals.as_str())?;
		if !is_decimal(suffix) || suffix.starts_with('0') {
			return None;
		}

		suffix.parse().ok()
	}

	/// Returns the name of the column denoted by the given predicate, if any.
	pub fn column_name<'t>(&self, term: &'t Term) -> Option<&'t str> {
		let name = term.as_iri()?.strip_prefix(self.namespaces.columns.as_str())?;
		(!name.is_empty()).then_some(name)
	}

	/// Checks if the given term is the canonical "is-a" predicate.
	pub fn is_type_property(&self, term: &Term) -> bool {
		term.as_iri() == Some(self.namespaces.type_property.as_str())
	}

	/// Checks if the given term is the reserved root marker.
	pub fn is_root(&self, term: &Term) -> bool {
		term.as_iri() == Some(self.namespaces.root.as_str())
	}

	/// Returns the name of the table whose type is the given term, if any.
	pub fn type_table<'t>(&self, term: &'t Term) -> Option<&'t str> {
		let name = term.as_iri()?.strip_prefix(self.namespaces.types.as_str())?;
		(!name.is_empty() && !name.contains(PATH_SEPARATOR)).then_some(name)
	}

	/// Predicate denoting the given column.
	///
	/// Returns `None` if the column name cannot be part of an IRI.
	pub fn column_predicate(&self, name: &str) -> Option<Term> {
		if name.is_empty() {
			return None;
		}

		iri_term(format!("{}{name}", self.namespaces.columns))
	}

	/// Predicate linking a table to its `n`-th row.
	pub fn ordinal_predicate(&self, n: u64) -> Option<Term> {
		if n == 0 {
			return None;
		}

		iri_term(format!("{}{n}", self.namespaces.ordinals))
	}

	/// Type name of the given table.
	pub fn table_type(&self, table: &str) -> Option<Term> {
		if table.is_empty() || table.contains(PATH_SEPARATOR) {
			return None;
		}

		iri_term(format!("{}{table}", self.namespaces.types))
	}

	/// Container name of the given table.
	pub fn table_container(&self, table: &str) -> Option<Term> {
		if table.is_empty() || table.contains(PATH_SEPARATOR) {
			return None;
		}

		iri_term(format!("{}{table}", self.namespaces.data))
	}

	/// Container name of the given row.
	pub fn row_container(&self, row: &RowIndex) -> Term {
		Term::Blank(format!("{}{row}", self.namespaces.data))
	}
}

fn is_decimal(s: &str) -> bool {
	!s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

fn iri_term(iri: String) -> Option<Term> {
	IriBuf::new(iri).ok().map(Term::Iri)
}
