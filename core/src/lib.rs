//! Terms, patterns and naming scheme of tabular resources seen as RDF.
pub mod naming;
pub mod pattern;
pub mod term;
mod macros;

pub use iref;
pub use langtag;
pub use rdf_types;

pub use naming::{Namespaces, NativeElement, RowIndex, Translator};
pub use pattern::{Pattern, Position, Triple};
pub use term::{Literal, LiteralType, Term};
